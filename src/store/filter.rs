use regex::Regex;
use serde_json::Value;

use super::{Document, ID_FIELD};
use crate::model::ObjectId;

#[derive(Clone, Debug, Default)]
pub enum Filter {
    #[default]
    All,
    Eq(String, Value),
    In(String, Vec<Value>),
    Matches(String, Regex),
    And(Vec<Filter>),
    Or(Vec<Filter>),
}

impl Filter {
    pub fn eq(path: &str, value: impl Into<Value>) -> Self {
        Filter::Eq(path.to_string(), value.into())
    }

    pub fn id(id: &ObjectId) -> Self {
        Filter::Eq(ID_FIELD.to_string(), Value::String(id.as_str().to_string()))
    }

    pub fn ids(ids: &[ObjectId]) -> Self {
        Filter::In(
            ID_FIELD.to_string(),
            ids.iter()
                .map(|id| Value::String(id.as_str().to_string()))
                .collect(),
        )
    }

    /// Case-insensitive match of `term` against any of `fields`. A blank term matches everything.
    pub fn search(fields: &[&str], term: Option<&str>) -> Result<Filter, regex::Error> {
        let Some(term) = term.filter(|t| !t.trim().is_empty()) else {
            return Ok(Filter::All);
        };
        let re = regex::RegexBuilder::new(term)
            .case_insensitive(true)
            .build()?;
        Ok(Filter::Or(
            fields
                .iter()
                .map(|f| Filter::Matches(f.to_string(), re.clone()))
                .collect(),
        ))
    }

    pub fn and(self, other: Filter) -> Filter {
        match (self, other) {
            (Filter::All, f) | (f, Filter::All) => f,
            (Filter::And(mut parts), f) => {
                parts.push(f);
                Filter::And(parts)
            }
            (a, b) => Filter::And(vec![a, b]),
        }
    }

    pub fn matches(&self, doc: &Document) -> bool {
        match self {
            Filter::All => true,
            Filter::Eq(path, expected) => match lookup(doc, path) {
                Some(v) => any_element(v, |x| x == expected),
                None => expected.is_null(),
            },
            Filter::In(path, values) => match lookup(doc, path) {
                Some(v) => any_element(v, |x| values.contains(x)),
                None => values.iter().any(Value::is_null),
            },
            Filter::Matches(path, re) => lookup(doc, path)
                .is_some_and(|v| any_element(v, |x| x.as_str().is_some_and(|s| re.is_match(s)))),
            Filter::And(parts) => parts.iter().all(|f| f.matches(doc)),
            Filter::Or(parts) => parts.iter().any(|f| f.matches(doc)),
        }
    }
}

/// Resolves a dotted path (`providers.local.username`) inside a document.
pub(crate) fn lookup<'a>(doc: &'a Document, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut cur = doc.get(parts.next()?)?;
    for part in parts {
        cur = cur.as_object()?.get(part)?;
    }
    Some(cur)
}

fn any_element(v: &Value, pred: impl Fn(&Value) -> bool) -> bool {
    match v {
        Value::Array(items) => pred(v) || items.iter().any(&pred),
        other => pred(other),
    }
}

/// Field selection applied to documents on read. Only top-level fields are addressed.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Projection {
    Include { fields: Vec<String>, with_id: bool },
    Exclude(Vec<String>),
}

impl Projection {
    pub fn include(fields: &[&str]) -> Self {
        Projection::Include {
            fields: fields.iter().map(|f| f.to_string()).collect(),
            with_id: true,
        }
    }

    pub fn exclude(fields: &[&str]) -> Self {
        Projection::Exclude(fields.iter().map(|f| f.to_string()).collect())
    }

    pub fn without_id(self) -> Self {
        match self {
            Projection::Include { fields, .. } => Projection::Include {
                fields,
                with_id: false,
            },
            Projection::Exclude(mut fields) => {
                fields.push(ID_FIELD.to_string());
                Projection::Exclude(fields)
            }
        }
    }

    pub fn apply(&self, mut doc: Document) -> Document {
        match self {
            Projection::Include { fields, with_id } => {
                doc.retain(|k, _| (k == ID_FIELD && *with_id) || fields.iter().any(|f| f == k));
                doc
            }
            Projection::Exclude(fields) => {
                for f in fields {
                    doc.remove(f);
                }
                doc
            }
        }
    }
}
