//! Schemaless document collections.
//!
//! Documents are JSON objects grouped into named collections. Each stored document carries a
//! storage-assigned `_id`; translating that into the public `id` is the repository's job.

use anyhow::Result;
use async_trait::async_trait;

use crate::model::ObjectId;

mod filter;
mod json_store;
mod query;

pub use self::filter::{Filter, Projection};
pub use self::json_store::{JsonStore, write_atomic_overwrite};
pub use self::query::{FindQuery, SortDirection, SortKey, Update};

pub type Document = serde_json::Map<String, serde_json::Value>;

pub const ID_FIELD: &str = "_id";

#[async_trait]
pub trait DocumentStore: Send + Sync {
    async fn find(&self, collection: &str, query: &FindQuery) -> Result<Vec<Document>>;

    async fn count(&self, collection: &str, filter: &Filter) -> Result<u64>;

    /// Stores the documents, assigning `_id` to those that carry none. Returns the ids in input
    /// order.
    async fn insert(&self, collection: &str, documents: Vec<Document>) -> Result<Vec<ObjectId>>;

    /// Applies `update` to the first document matching `filter`; returns the matched count.
    async fn update(&self, collection: &str, filter: &Filter, update: &Update) -> Result<u64>;

    async fn delete(&self, collection: &str, filter: &Filter) -> Result<u64>;
}

#[cfg(test)]
#[path = "tests/store/store_tests.rs"]
mod tests;
