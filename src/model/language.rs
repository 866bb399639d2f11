use serde::{Deserialize, Serialize};

use crate::repository::Record;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Language {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub name: String,

    #[serde(default)]
    pub flag: String,

    #[serde(default)]
    pub culture: String,

    // Ids of the documents in `LanguageResources` owned by this language.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resources: Option<Vec<String>>,
}

impl Record for Language {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

impl Language {
    pub fn references(&self, resource_id: &str) -> bool {
        self.resources
            .as_ref()
            .is_some_and(|ids| ids.iter().any(|id| id == resource_id))
    }
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct LanguageResource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(default)]
    pub key: String,

    #[serde(default)]
    pub value: String,
}

impl Record for LanguageResource {
    fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Culture {
    pub code: String,
    pub name: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CountResponse {
    pub count: u64,
}
