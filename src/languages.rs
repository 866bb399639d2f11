//! Languages and the translation resources they own.

use crate::error::{ApiError, ApiResult};
use crate::model::{Culture, Language, LanguageResource};
use crate::repository::{Pagination, Repository};
use crate::store::{Filter, ID_FIELD, Projection};

mod cultures;

pub use self::cultures::CULTURES;

pub const LANGUAGES_COLLECTION: &str = "Languages";
pub const RESOURCES_COLLECTION: &str = "LanguageResources";

const RESOURCES_FIELD: &str = "resources";
const SEARCH_FIELDS: &[&str] = &["key", "value"];

fn without_resources() -> Projection {
    Projection::exclude(&[RESOURCES_FIELD])
}

pub fn cultures() -> Vec<Culture> {
    CULTURES
        .iter()
        .map(|(code, name)| Culture {
            code: code.to_string(),
            name: name.to_string(),
        })
        .collect()
}

#[derive(Clone)]
pub struct LanguagesService {
    languages: Repository<Language>,
    resources: Repository<LanguageResource>,
}

impl LanguagesService {
    pub fn new(languages: Repository<Language>, resources: Repository<LanguageResource>) -> Self {
        Self {
            languages,
            resources,
        }
    }

    pub async fn list(&self, pagination: &Pagination) -> ApiResult<Vec<Language>> {
        self.languages
            .list(Filter::All, Some(without_resources()), Some(pagination))
            .await
    }

    pub async fn count(&self) -> ApiResult<u64> {
        self.languages.count(&Filter::All).await
    }

    pub async fn get(&self, id: &str) -> ApiResult<Language> {
        self.languages
            .get_by_id_with(id, Some(without_resources()))
            .await
    }

    /// Creates a language, or merges an existing one. The owned resource list is never taken from
    /// the payload.
    pub async fn save(&self, mut language: Language) -> ApiResult<Language> {
        language.resources = None;
        let saved = self.languages.save(&language).await?;
        tracing::info!(language = ?saved.id, culture = %saved.culture, "language saved");
        Ok(Language {
            resources: None,
            ..saved
        })
    }

    pub async fn update(&self, id: &str, mut language: Language) -> ApiResult<Language> {
        if language.id.as_deref().is_some_and(|body_id| body_id != id) {
            return Err(ApiError::unprocessable("Bad language"));
        }
        language.id = Some(id.to_string());
        self.save(language).await
    }

    /// Deletes the referenced resources first, then the language. Not transactional.
    pub async fn remove(&self, id: &str) -> ApiResult<u64> {
        let language = self.owner(id).await?;
        let resources = language.resources.unwrap_or_default();
        let dropped = self.resources.remove_many(&resources).await?;
        let count = self.languages.remove(id).await?;
        tracing::info!(language = %id, resources = dropped, "language removed");
        Ok(count)
    }

    pub async fn get_resources(
        &self,
        lang_id: &str,
        search: Option<&str>,
        pagination: &Pagination,
    ) -> ApiResult<Vec<LanguageResource>> {
        let language = self.owner(lang_id).await?;
        let filter = owned_resources(&language).and(search_filter(search)?);
        self.resources.list(filter, None, Some(pagination)).await
    }

    pub async fn count_resources(&self, lang_id: &str, search: Option<&str>) -> ApiResult<u64> {
        let language = self.owner(lang_id).await?;
        let filter = owned_resources(&language).and(search_filter(search)?);
        self.resources.count(&filter).await
    }

    /// Inserts a new resource and links it to the language, or updates one the language already
    /// references.
    pub async fn save_resource(
        &self,
        lang_id: &str,
        resource: LanguageResource,
    ) -> ApiResult<LanguageResource> {
        let language = self.owner(lang_id).await?;

        let Some(resource_id) = resource.id.clone() else {
            let created = self.resources.insert(&resource).await?;
            let created_id = created
                .id
                .clone()
                .ok_or_else(|| anyhow::anyhow!("inserted resource has no id"))?;
            self.languages
                .push_to_array_field(&language, RESOURCES_FIELD, created_id.clone())
                .await?;
            tracing::debug!(language = %lang_id, resource = %created_id, "resource created");
            return Ok(created);
        };

        if !language.references(&resource_id) {
            return Err(resource_not_found(&resource_id));
        }
        self.resources.update(&resource, false).await
    }

    pub async fn update_resource(
        &self,
        lang_id: &str,
        id: &str,
        mut resource: LanguageResource,
    ) -> ApiResult<LanguageResource> {
        if resource.id.as_deref().is_some_and(|body_id| body_id != id) {
            return Err(ApiError::unprocessable("Bad resource"));
        }
        resource.id = Some(id.to_string());
        self.save_resource(lang_id, resource).await
    }

    pub async fn remove_resource(&self, lang_id: &str, id: &str) -> ApiResult<u64> {
        let language = self.owner(lang_id).await?;
        if !language.references(id) {
            return Err(resource_not_found(id));
        }
        let count = self.resources.remove(id).await?;
        self.languages
            .pull_from_array_field(&language, RESOURCES_FIELD, id)
            .await?;
        Ok(count)
    }

    /// Resources of the language for `culture`, falling back to the first language.
    pub async fn display_resources(&self, culture: &str) -> ApiResult<Vec<LanguageResource>> {
        let language = match self.languages.find_one(Filter::eq("culture", culture)).await? {
            Some(language) => language,
            None => self
                .languages
                .find_one(Filter::All)
                .await?
                .ok_or_else(|| ApiError::not_found("No language exists"))?,
        };
        let projection = Projection::include(&["key", "value"]).without_id();
        self.resources
            .list(owned_resources(&language), Some(projection), None)
            .await
    }

    async fn owner(&self, lang_id: &str) -> ApiResult<Language> {
        self.languages
            .get_by_id_with(lang_id, Some(Projection::include(&[RESOURCES_FIELD])))
            .await
    }
}

fn owned_resources(language: &Language) -> Filter {
    let ids = language
        .resources
        .iter()
        .flatten()
        .map(|id| serde_json::Value::String(id.clone()))
        .collect();
    Filter::In(ID_FIELD.to_string(), ids)
}

fn search_filter(search: Option<&str>) -> ApiResult<Filter> {
    Filter::search(SEARCH_FIELDS, search)
        .map_err(|e| ApiError::unprocessable(format!("invalid search: {}", e)))
}

fn resource_not_found(id: &str) -> ApiError {
    ApiError::not_found(format!("{} not found: {}", RESOURCES_COLLECTION, id))
}

#[cfg(test)]
#[path = "tests/languages_tests.rs"]
mod tests;
