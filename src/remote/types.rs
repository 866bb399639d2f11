//! Query payloads sent by the admin client.

use serde::Serialize;

use crate::repository::Pagination;

#[derive(Clone, Debug, Default, Serialize)]
pub struct ListParams {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,

    #[serde(flatten)]
    pub pagination: Pagination,
}

impl ListParams {
    pub fn new(search: Option<&str>, sort: Option<&str>, page: i64, limit: i64) -> Self {
        Self {
            search: search.map(str::to_string),
            pagination: Pagination::new(sort, page, limit),
        }
    }
}
