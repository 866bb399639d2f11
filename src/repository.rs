//! Typed, paginated access to one document collection.

use std::marker::PhantomData;
use std::sync::Arc;

use anyhow::Context;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, ApiResult};
use crate::model::ObjectId;
use crate::store::{
    Document, DocumentStore, Filter, FindQuery, ID_FIELD, Projection, SortKey, Update,
};

mod pagination;

pub use self::pagination::{Pagination, parse_sort};

/// Public name of the identifier field; storage uses `_id`.
pub const PUBLIC_ID_FIELD: &str = "id";

/// A document shape stored through a [`Repository`].
pub trait Record: Serialize + DeserializeOwned + Send + Sync {
    fn id(&self) -> Option<&str>;
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CollectionConfig {
    pub name: String,
}

impl CollectionConfig {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }
}

pub struct Repository<T> {
    store: Arc<dyn DocumentStore>,
    config: CollectionConfig,
    _marker: PhantomData<fn() -> T>,
}

impl<T> Clone for Repository<T> {
    fn clone(&self) -> Self {
        Self {
            store: self.store.clone(),
            config: self.config.clone(),
            _marker: PhantomData,
        }
    }
}

impl<T: Record> Repository<T> {
    pub fn new(store: Arc<dyn DocumentStore>, config: CollectionConfig) -> Self {
        Self {
            store,
            config,
            _marker: PhantomData,
        }
    }

    pub fn collection(&self) -> &str {
        &self.config.name
    }

    pub async fn list(
        &self,
        filter: Filter,
        projection: Option<Projection>,
        pagination: Option<&Pagination>,
    ) -> ApiResult<Vec<T>> {
        let mut query = FindQuery::new(filter).project(projection);
        if let Some(p) = pagination {
            query.sort = p.sort_keys()?.into_iter().map(to_storage_sort).collect();
            if let Some((skip, limit)) = p.window() {
                query = query.window(skip, limit);
            }
        }
        let docs = self.store.find(self.collection(), &query).await?;
        docs.into_iter().map(from_document).collect()
    }

    pub async fn count(&self, filter: &Filter) -> ApiResult<u64> {
        Ok(self.store.count(self.collection(), filter).await?)
    }

    pub async fn get_by_id(&self, id: &str) -> ApiResult<T> {
        self.get_by_id_with(id, None).await
    }

    pub async fn get_by_id_with(&self, id: &str, projection: Option<Projection>) -> ApiResult<T> {
        let oid = self.parse_id(id)?;
        self.find_one_with(Filter::id(&oid), projection)
            .await?
            .ok_or_else(|| self.not_found(id))
    }

    pub async fn find_one(&self, filter: Filter) -> ApiResult<Option<T>> {
        self.find_one_with(filter, None).await
    }

    pub async fn find_one_with(
        &self,
        filter: Filter,
        projection: Option<Projection>,
    ) -> ApiResult<Option<T>> {
        let query = FindQuery::new(filter).project(projection).window(0, 1);
        let mut docs = self.store.find(self.collection(), &query).await?;
        match docs.pop() {
            Some(doc) => Ok(Some(from_document(doc)?)),
            None => Ok(None),
        }
    }

    pub async fn insert(&self, document: &T) -> ApiResult<T> {
        let doc = to_document(document)?;
        let ids = self.store.insert(self.collection(), vec![doc]).await?;
        let id = ids
            .first()
            .context("store returned no id for inserted document")?;
        self.get_by_id(id.as_str()).await
    }

    pub async fn insert_many(&self, documents: &[T]) -> ApiResult<Vec<T>> {
        let docs = documents
            .iter()
            .map(to_document)
            .collect::<ApiResult<Vec<_>>>()?;
        let ids = self.store.insert(self.collection(), docs).await?;
        self.list(Filter::ids(&ids), None, None).await
    }

    /// Merges the set fields of `document` into the stored one, or replaces it entirely when
    /// `replace` is true. The public id addresses the document and is never written.
    pub async fn update(&self, document: &T, replace: bool) -> ApiResult<T> {
        let id = document
            .id()
            .ok_or_else(|| ApiError::unprocessable("document has no id"))?;
        let oid = self.parse_id(id)?;
        let doc = to_document(document)?;
        let update = if replace {
            Update::Replace(doc)
        } else {
            Update::Set(doc)
        };
        let matched = self
            .store
            .update(self.collection(), &Filter::id(&oid), &update)
            .await?;
        if matched == 0 {
            return Err(self.not_found(id));
        }
        self.get_by_id(oid.as_str()).await
    }

    pub async fn unset_fields(&self, id: &str, fields: &[&str]) -> ApiResult<()> {
        let oid = self.parse_id(id)?;
        let update = Update::Unset(fields.iter().map(|f| f.to_string()).collect());
        let matched = self
            .store
            .update(self.collection(), &Filter::id(&oid), &update)
            .await?;
        if matched == 0 {
            return Err(self.not_found(id));
        }
        Ok(())
    }

    pub async fn remove(&self, id: &str) -> ApiResult<u64> {
        let oid = self.parse_id(id)?;
        Ok(self.store.delete(self.collection(), &Filter::id(&oid)).await?)
    }

    /// Deletes every listed document; ids that are not well formed are skipped.
    pub async fn remove_many(&self, ids: &[String]) -> ApiResult<u64> {
        let ids: Vec<ObjectId> = ids.iter().filter_map(|id| ObjectId::parse(id)).collect();
        if ids.is_empty() {
            return Ok(0);
        }
        Ok(self.store.delete(self.collection(), &Filter::ids(&ids)).await?)
    }

    pub async fn push_to_array_field(
        &self,
        document: &T,
        field: &str,
        value: impl Into<Value>,
    ) -> ApiResult<()> {
        let update = Update::Push {
            field: field.to_string(),
            value: value.into(),
        };
        self.update_by_record(document, &update).await
    }

    pub async fn pull_from_array_field(
        &self,
        document: &T,
        field: &str,
        value: impl Into<Value>,
    ) -> ApiResult<()> {
        let update = Update::Pull {
            field: field.to_string(),
            value: value.into(),
        };
        self.update_by_record(document, &update).await
    }

    pub async fn save(&self, document: &T) -> ApiResult<T> {
        if document.id().is_some() {
            return self.update(document, false).await;
        }
        self.insert(document).await
    }

    async fn update_by_record(&self, document: &T, update: &Update) -> ApiResult<()> {
        let id = document
            .id()
            .ok_or_else(|| ApiError::unprocessable("document has no id"))?;
        let oid = self.parse_id(id)?;
        let matched = self
            .store
            .update(self.collection(), &Filter::id(&oid), update)
            .await?;
        if matched == 0 {
            return Err(self.not_found(id));
        }
        Ok(())
    }

    fn parse_id(&self, id: &str) -> ApiResult<ObjectId> {
        ObjectId::parse(id).ok_or_else(|| self.not_found(id))
    }

    fn not_found(&self, id: &str) -> ApiError {
        ApiError::not_found(format!("{} not found: {}", self.collection(), id))
    }
}

fn to_storage_sort(key: SortKey) -> SortKey {
    if key.field == PUBLIC_ID_FIELD {
        return SortKey {
            field: ID_FIELD.to_string(),
            direction: key.direction,
        };
    }
    key
}

/// Serializes a record for storage, dropping its public id.
pub fn to_document<T: Serialize>(record: &T) -> ApiResult<Document> {
    match serde_json::to_value(record).context("serialize document")? {
        Value::Object(mut map) => {
            map.remove(PUBLIC_ID_FIELD);
            Ok(map)
        }
        _ => Err(anyhow::anyhow!("document must serialize to a JSON object").into()),
    }
}

/// Deserializes a stored document, exposing `_id` as the public id.
pub fn from_document<T: DeserializeOwned>(mut doc: Document) -> ApiResult<T> {
    if let Some(id) = doc.remove(ID_FIELD) {
        doc.insert(PUBLIC_ID_FIELD.to_string(), id);
    }
    let record = serde_json::from_value(Value::Object(doc)).context("deserialize document")?;
    Ok(record)
}

#[cfg(test)]
#[path = "tests/repository/repository_tests.rs"]
mod tests;
