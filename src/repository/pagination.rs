use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::store::{SortDirection, SortKey};

/// Sort and page window as received on the query string.
///
/// `page` and `limit` stay raw strings: values that do not start with an integer count as 0, and
/// a window is only applied when both are positive.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pagination {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub page: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub limit: Option<String>,
}

impl Pagination {
    pub fn new(sort: Option<&str>, page: i64, limit: i64) -> Self {
        Self {
            sort: sort.map(str::to_string),
            page: Some(page.to_string()),
            limit: Some(limit.to_string()),
        }
    }

    pub fn page(&self) -> i64 {
        parse_leading_int(self.page.as_deref())
    }

    pub fn limit(&self) -> i64 {
        parse_leading_int(self.limit.as_deref())
    }

    /// `(skip, limit)` when both page and limit are positive.
    pub fn window(&self) -> Option<(u64, u64)> {
        let (page, limit) = (self.page(), self.limit());
        if page <= 0 || limit <= 0 {
            return None;
        }
        let skip = (limit as u64).saturating_mul(page as u64 - 1);
        Some((skip, limit as u64))
    }

    pub fn sort_keys(&self) -> ApiResult<Vec<SortKey>> {
        parse_sort(self.sort.as_deref())
    }
}

/// Parses `"field:direction,field2:direction"` into sort keys.
pub fn parse_sort(sort: Option<&str>) -> ApiResult<Vec<SortKey>> {
    let Some(sort) = sort.filter(|s| !s.trim().is_empty()) else {
        return Ok(Vec::new());
    };

    let mut keys = Vec::new();
    for column in sort.split(',') {
        let parts: Vec<&str> = column.split(':').collect();
        let [field, direction] = parts.as_slice() else {
            return Err(sort_format_error(column));
        };
        let field = field.trim();
        if field.is_empty() {
            return Err(sort_format_error(column));
        }
        let direction = SortDirection::parse(direction).ok_or_else(|| sort_format_error(column))?;
        keys.push(SortKey::new(field, direction));
    }
    Ok(keys)
}

fn sort_format_error(column: &str) -> ApiError {
    ApiError::unprocessable(format!("sorting column format error : {}", column))
}

fn parse_leading_int(raw: Option<&str>) -> i64 {
    let Some(raw) = raw else {
        return 0;
    };
    let raw = raw.trim();
    let (sign, digits) = match raw.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, raw.strip_prefix('+').unwrap_or(raw)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    digits[..end].parse::<i64>().map(|n| sign * n).unwrap_or(0)
}
