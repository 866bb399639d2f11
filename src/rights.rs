//! Permission codes.
//!
//! API codes follow `R_API_<RESOURCE>_<C|R|U|D>`; dashboard access is a standalone code.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

pub const R_API_USER_C: &str = "R_API_USER_C";
pub const R_API_USER_R: &str = "R_API_USER_R";
pub const R_API_USER_U: &str = "R_API_USER_U";
pub const R_API_USER_D: &str = "R_API_USER_D";

pub const R_API_LANGUAGE_C: &str = "R_API_LANGUAGE_C";
pub const R_API_LANGUAGE_R: &str = "R_API_LANGUAGE_R";
pub const R_API_LANGUAGE_U: &str = "R_API_LANGUAGE_U";
pub const R_API_LANGUAGE_D: &str = "R_API_LANGUAGE_D";

pub const R_API_LANGUAGE_RESOURCE_C: &str = "R_API_LANGUAGE_RESOURCE_C";
pub const R_API_LANGUAGE_RESOURCE_R: &str = "R_API_LANGUAGE_RESOURCE_R";
pub const R_API_LANGUAGE_RESOURCE_U: &str = "R_API_LANGUAGE_RESOURCE_U";
pub const R_API_LANGUAGE_RESOURCE_D: &str = "R_API_LANGUAGE_RESOURCE_D";

pub const R_ADM_DASHBOARD: &str = "R_ADM_DASHBOARD";

pub const USER_RIGHTS: &[&str] = &[R_API_USER_C, R_API_USER_R, R_API_USER_U, R_API_USER_D];

pub const LANGUAGE_RIGHTS: &[&str] = &[
    R_API_LANGUAGE_C,
    R_API_LANGUAGE_R,
    R_API_LANGUAGE_U,
    R_API_LANGUAGE_D,
];

pub const LANGUAGE_RESOURCE_RIGHTS: &[&str] = &[
    R_API_LANGUAGE_RESOURCE_C,
    R_API_LANGUAGE_RESOURCE_R,
    R_API_LANGUAGE_RESOURCE_U,
    R_API_LANGUAGE_RESOURCE_D,
];

pub const DASHBOARD_RIGHTS: &[&str] = &[R_ADM_DASHBOARD];

/// One family of rights as shown to administrators.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct RightsGroup {
    pub name: String,
    pub rights: Vec<String>,
}

pub fn catalogue() -> Vec<RightsGroup> {
    [
        ("UserRights", USER_RIGHTS),
        ("LanguageRights", LANGUAGE_RIGHTS),
        ("LanguageResourceRights", LANGUAGE_RESOURCE_RIGHTS),
        ("DashboardRights", DASHBOARD_RIGHTS),
    ]
    .into_iter()
    .map(|(name, rights)| RightsGroup {
        name: name.to_string(),
        rights: rights.iter().map(|r| r.to_string()).collect(),
    })
    .collect()
}

/// Catalogue keyed by family name.
pub fn by_family() -> BTreeMap<String, Vec<String>> {
    catalogue().into_iter().map(|g| (g.name, g.rights)).collect()
}

/// Every known code, in catalogue order.
pub fn all() -> Vec<String> {
    catalogue().into_iter().flat_map(|g| g.rights).collect()
}

pub fn is_known(code: &str) -> bool {
    USER_RIGHTS
        .iter()
        .chain(LANGUAGE_RIGHTS)
        .chain(LANGUAGE_RESOURCE_RIGHTS)
        .chain(DASHBOARD_RIGHTS)
        .any(|r| *r == code)
}

/// True when at least one required code is held. Two empty sets do not match.
pub fn intersects(held: &[String], required: &[&str]) -> bool {
    required.iter().any(|r| held.iter().any(|h| h == r))
}

#[cfg(test)]
#[path = "tests/rights_tests.rs"]
mod tests;
