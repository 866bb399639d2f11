use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::EnvFilter;

use lingo::auth::{AuthConfig, Authenticator};
use lingo::languages::{LANGUAGES_COLLECTION, LanguagesService, RESOURCES_COLLECTION};
use lingo::model::{random_bytes, to_hex};
use lingo::repository::{CollectionConfig, Repository};
use lingo::store::{DocumentStore, JsonStore};
use lingo::users::{USERS_COLLECTION, UsersService};

use super::super::handlers_system::route_not_found;
use super::super::routes::{authed_router, public_router};
use super::super::types::AppState;
use super::Args;

pub(super) fn init_tracing(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    // A subscriber may already be installed when embedded in tests.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

pub(super) fn open_store(args: &Args) -> Result<Arc<dyn DocumentStore>> {
    if args.in_memory {
        tracing::warn!("running with an in-memory store; data is lost on exit");
        return Ok(Arc::new(JsonStore::in_memory()));
    }
    let store = JsonStore::open(&args.data_dir)
        .with_context(|| format!("open store in {}", args.data_dir.display()))?;
    Ok(Arc::new(store))
}

pub(super) fn build_state(args: &Args, store: Arc<dyn DocumentStore>) -> Result<Arc<AppState>> {
    let jwt_secret = match &args.jwt_secret {
        Some(secret) => secret.clone(),
        None => {
            tracing::warn!("no --jwt-secret given; generated an ephemeral one");
            to_hex(&random_bytes::<32>()?)
        }
    };

    let users = UsersService::new(Repository::new(
        store.clone(),
        CollectionConfig::new(USERS_COLLECTION),
    ));
    let languages = LanguagesService::new(
        Repository::new(store.clone(), CollectionConfig::new(LANGUAGES_COLLECTION)),
        Repository::new(store, CollectionConfig::new(RESOURCES_COLLECTION)),
    );
    let auth = Authenticator::new(
        &AuthConfig {
            jwt_secret,
            token_ttl_secs: args.token_ttl_secs,
        },
        users.clone(),
    );

    Ok(Arc::new(AppState {
        auth,
        users,
        languages,
    }))
}

pub(super) fn build_app_router(state: Arc<AppState>) -> Router {
    let authed = authed_router(state.clone());
    public_router()
        .merge(authed)
        .fallback(route_not_found)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
