use super::*;

pub(crate) struct AppState {
    pub(crate) auth: Authenticator,
    pub(crate) users: UsersService,
    pub(crate) languages: LanguagesService,
}

/// `search` plus the sort/page window, as sent on list endpoints.
#[derive(Debug, Default, Deserialize)]
pub(crate) struct ListQuery {
    #[serde(default)]
    pub(crate) search: Option<String>,

    #[serde(flatten)]
    pub(crate) pagination: Pagination,
}

#[derive(Debug, Default, Deserialize)]
pub(crate) struct SearchQuery {
    #[serde(default)]
    pub(crate) search: Option<String>,
}
