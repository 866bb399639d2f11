use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::RwLock;

use super::{Document, DocumentStore, Filter, FindQuery, ID_FIELD, Update};
use crate::model::ObjectId;

/// Collections kept in memory and mirrored to `<data_dir>/<Collection>.json` after every write.
#[derive(Clone)]
pub struct JsonStore {
    data_dir: Option<PathBuf>,
    collections: Arc<RwLock<HashMap<String, Vec<Document>>>>,
}

impl JsonStore {
    pub fn open(data_dir: &Path) -> Result<Self> {
        std::fs::create_dir_all(data_dir)
            .with_context(|| format!("create data dir {}", data_dir.display()))?;

        let mut collections = HashMap::new();
        let entries = std::fs::read_dir(data_dir)
            .with_context(|| format!("read data dir {}", data_dir.display()))?;
        for entry in entries {
            let path = entry.context("read data dir entry")?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let Some(name) = path.file_stem().and_then(|s| s.to_str()) else {
                continue;
            };
            let bytes = std::fs::read(&path).with_context(|| format!("read {}", path.display()))?;
            let docs: Vec<Document> = serde_json::from_slice(&bytes)
                .with_context(|| format!("parse {}", path.display()))?;
            tracing::debug!(collection = name, documents = docs.len(), "loaded collection");
            collections.insert(name.to_string(), docs);
        }

        Ok(Self {
            data_dir: Some(data_dir.to_path_buf()),
            collections: Arc::new(RwLock::new(collections)),
        })
    }

    pub fn in_memory() -> Self {
        Self {
            data_dir: None,
            collections: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    fn persist(&self, collection: &str, docs: &[Document]) -> Result<()> {
        let Some(dir) = &self.data_dir else {
            return Ok(());
        };
        let bytes = serde_json::to_vec_pretty(docs)
            .with_context(|| format!("serialize collection {}", collection))?;
        let path = dir.join(format!("{}.json", collection));
        write_atomic_overwrite(&path, &bytes)
            .with_context(|| format!("write {}", path.display()))
    }
}

#[async_trait]
impl DocumentStore for JsonStore {
    async fn find(&self, collection: &str, query: &FindQuery) -> Result<Vec<Document>> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| query.run(docs))
            .unwrap_or_default())
    }

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let collections = self.collections.read().await;
        Ok(collections
            .get(collection)
            .map(|docs| docs.iter().filter(|d| filter.matches(d)).count() as u64)
            .unwrap_or(0))
    }

    async fn insert(&self, collection: &str, documents: Vec<Document>) -> Result<Vec<ObjectId>> {
        let mut collections = self.collections.write().await;
        let mut docs = collections.get(collection).cloned().unwrap_or_default();

        let mut ids = Vec::with_capacity(documents.len());
        for mut doc in documents {
            let id = match doc.get(ID_FIELD).and_then(Value::as_str).and_then(ObjectId::parse) {
                Some(id) => id,
                None => ObjectId::generate()?,
            };
            let taken = docs
                .iter()
                .any(|d| d.get(ID_FIELD).and_then(Value::as_str) == Some(id.as_str()));
            if taken {
                anyhow::bail!("duplicate id {} in {}", id, collection);
            }
            doc.insert(ID_FIELD.to_string(), Value::String(id.as_str().to_string()));
            docs.push(doc);
            ids.push(id);
        }

        self.persist(collection, &docs)?;
        collections.insert(collection.to_string(), docs);
        Ok(ids)
    }

    async fn update(&self, collection: &str, filter: &Filter, update: &Update) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let Some(current) = collections.get(collection) else {
            return Ok(0);
        };
        let Some(index) = current.iter().position(|d| filter.matches(d)) else {
            return Ok(0);
        };
        let mut docs = current.clone();
        update.apply(&mut docs[index])?;
        self.persist(collection, &docs)?;
        collections.insert(collection.to_string(), docs);
        Ok(1)
    }

    async fn delete(&self, collection: &str, filter: &Filter) -> Result<u64> {
        let mut collections = self.collections.write().await;
        let Some(current) = collections.get(collection) else {
            return Ok(0);
        };
        let docs: Vec<Document> = current
            .iter()
            .filter(|d| !filter.matches(d))
            .cloned()
            .collect();
        let deleted = (current.len() - docs.len()) as u64;
        if deleted > 0 {
            self.persist(collection, &docs)?;
            collections.insert(collection.to_string(), docs);
        }
        Ok(deleted)
    }
}

pub fn write_atomic_overwrite(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create dir {}", parent.display()))?;
    }
    let tmp = path.with_extension(format!("tmp.{}", std::process::id()));
    std::fs::write(&tmp, bytes).with_context(|| format!("write {}", tmp.display()))?;
    if let Err(err) = std::fs::rename(&tmp, path) {
        let _ = std::fs::remove_file(&tmp);
        return Err(err)
            .with_context(|| format!("rename {} -> {}", tmp.display(), path.display()));
    }
    Ok(())
}
