use std::sync::Arc;

use axum::extract::{Extension, Path, Query, State};
use axum::http::{HeaderMap, header};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Json, Router};
use serde::Deserialize;

use lingo::auth::{Authenticator, Principal, authorize};
use lingo::error::{ApiError, ApiResult};
use lingo::languages::LanguagesService;
use lingo::model::{
    AuthResponse, CountResponse, Credentials, Culture, Language, LanguageResource,
    RefreshRequest, RegisterRequest, User, UserUpdate,
};
use lingo::repository::Pagination;
use lingo::rights;
use lingo::users::UsersService;
use lingo::validators;

#[path = "lingo_server/types.rs"]
mod types;
use self::types::*;
#[path = "lingo_server/handlers_system.rs"]
mod handlers_system;
use self::handlers_system::*;
#[path = "lingo_server/handlers_auth.rs"]
mod handlers_auth;
use self::handlers_auth::*;
#[path = "lingo_server/handlers_users.rs"]
mod handlers_users;
use self::handlers_users::*;
#[path = "lingo_server/handlers_languages.rs"]
mod handlers_languages;
use self::handlers_languages::*;
#[path = "lingo_server/handlers_resources.rs"]
mod handlers_resources;
use self::handlers_resources::*;
#[path = "lingo_server/routes.rs"]
mod routes;
#[path = "lingo_server/runtime/mod.rs"]
mod runtime;

#[tokio::main]
async fn main() {
    if let Err(err) = runtime::run().await {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}
