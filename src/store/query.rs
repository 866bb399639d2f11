use std::cmp::Ordering;

use anyhow::Result;
use serde_json::Value;

use super::filter::lookup;
use super::{Document, Filter, ID_FIELD, Projection};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "asc" | "ascending" | "1" => Some(SortDirection::Asc),
            "desc" | "descending" | "-1" => Some(SortDirection::Desc),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SortDirection::Asc => "asc",
            SortDirection::Desc => "desc",
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SortKey {
    pub field: String,
    pub direction: SortDirection,
}

impl SortKey {
    pub fn new(field: &str, direction: SortDirection) -> Self {
        Self {
            field: field.to_string(),
            direction,
        }
    }
}

#[derive(Clone, Debug, Default)]
pub struct FindQuery {
    pub filter: Filter,
    pub projection: Option<Projection>,
    pub sort: Vec<SortKey>,
    pub skip: Option<u64>,
    pub limit: Option<u64>,
}

impl FindQuery {
    pub fn new(filter: Filter) -> Self {
        Self {
            filter,
            ..Self::default()
        }
    }

    pub fn project(mut self, projection: Option<Projection>) -> Self {
        self.projection = projection;
        self
    }

    pub fn window(mut self, skip: u64, limit: u64) -> Self {
        self.skip = Some(skip);
        self.limit = Some(limit);
        self
    }

    /// Runs the query over an in-memory collection: filter, sort, skip/limit, then projection.
    pub fn run(&self, docs: &[Document]) -> Vec<Document> {
        let mut out: Vec<&Document> = docs.iter().filter(|d| self.filter.matches(d)).collect();
        if !self.sort.is_empty() {
            out.sort_by(|a, b| compare_documents(a, b, &self.sort));
        }
        let skip = self.skip.unwrap_or(0) as usize;
        let limit = self.limit.map(|l| l as usize).unwrap_or(usize::MAX);
        out.into_iter()
            .skip(skip)
            .take(limit)
            .map(|d| match &self.projection {
                Some(p) => p.apply(d.clone()),
                None => d.clone(),
            })
            .collect()
    }
}

fn compare_documents(a: &Document, b: &Document, keys: &[SortKey]) -> Ordering {
    for key in keys {
        let ord = compare_values(lookup(a, &key.field), lookup(b, &key.field));
        let ord = match key.direction {
            SortDirection::Asc => ord,
            SortDirection::Desc => ord.reverse(),
        };
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

// Missing and null sort first, then numbers, strings, objects, arrays, booleans.
fn type_rank(v: Option<&Value>) -> u8 {
    match v {
        None | Some(Value::Null) => 0,
        Some(Value::Number(_)) => 1,
        Some(Value::String(_)) => 2,
        Some(Value::Object(_)) => 3,
        Some(Value::Array(_)) => 4,
        Some(Value::Bool(_)) => 5,
    }
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let rank = type_rank(a).cmp(&type_rank(b));
    if rank != Ordering::Equal {
        return rank;
    }
    match (a, b) {
        (Some(Value::Number(x)), Some(Value::Number(y))) => {
            let x = x.as_f64().unwrap_or(0.0);
            let y = y.as_f64().unwrap_or(0.0);
            x.partial_cmp(&y).unwrap_or(Ordering::Equal)
        }
        (Some(Value::String(x)), Some(Value::String(y))) => x.cmp(y),
        (Some(Value::Bool(x)), Some(Value::Bool(y))) => x.cmp(y),
        _ => Ordering::Equal,
    }
}

#[derive(Clone, Debug, PartialEq)]
pub enum Update {
    /// Merge the given top-level fields into the document.
    Set(Document),
    /// Replace every field except `_id`.
    Replace(Document),
    Unset(Vec<String>),
    Push { field: String, value: Value },
    Pull { field: String, value: Value },
}

impl Update {
    pub fn apply(&self, doc: &mut Document) -> Result<()> {
        match self {
            Update::Set(fields) => {
                for (k, v) in fields {
                    if k == ID_FIELD {
                        continue;
                    }
                    doc.insert(k.clone(), v.clone());
                }
            }
            Update::Replace(fields) => {
                let id = doc.remove(ID_FIELD);
                doc.clear();
                if let Some(id) = id {
                    doc.insert(ID_FIELD.to_string(), id);
                }
                for (k, v) in fields {
                    if k == ID_FIELD {
                        continue;
                    }
                    doc.insert(k.clone(), v.clone());
                }
            }
            Update::Unset(fields) => {
                for f in fields {
                    doc.remove(f);
                }
            }
            Update::Push { field, value } => {
                match doc
                    .entry(field.clone())
                    .or_insert_with(|| Value::Array(Vec::new()))
                {
                    Value::Array(items) => items.push(value.clone()),
                    _ => anyhow::bail!("cannot push to non-array field {}", field),
                }
            }
            Update::Pull { field, value } => match doc.get_mut(field) {
                Some(Value::Array(items)) => items.retain(|x| x != value),
                Some(Value::Null) | None => {}
                Some(_) => anyhow::bail!("cannot pull from non-array field {}", field),
            },
        }
        Ok(())
    }
}
