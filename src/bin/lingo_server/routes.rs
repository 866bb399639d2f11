//! HTTP route registration. Authentication endpoints sit at the root, collections under `/api`.

use super::*;

pub(super) fn public_router() -> Router<Arc<AppState>> {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/ping", get(healthz))
        .route("/auth", post(login))
        .route("/register", post(register))
        .route("/token", post(refresh_token))
        .route("/api/languages/cultures", get(list_cultures))
        .route("/api/languages/:id/display", get(display_resources))
}

pub(super) fn authed_router(state: Arc<AppState>) -> Router<Arc<AppState>> {
    Router::new()
        .route("/token/reject", post(reject_token))
        .route("/api/users", get(list_users).post(create_user))
        .route("/api/users/count", get(count_users))
        .route("/api/users/me", get(current_user))
        .route("/api/users/rights", get(rights_catalogue))
        .route(
            "/api/users/:id",
            get(get_user).put(update_user).delete(delete_user),
        )
        .route(
            "/api/users/:id/rights",
            get(get_user_rights).put(save_user_rights),
        )
        .route(
            "/api/languages",
            get(list_languages).post(create_language),
        )
        .route("/api/languages/count", get(count_languages))
        .route(
            "/api/languages/:id",
            get(get_language)
                .put(update_language)
                .delete(delete_language),
        )
        .route(
            "/api/languages/:id/resources",
            get(list_resources).post(create_resource),
        )
        .route(
            "/api/languages/:id/resources/count",
            get(count_resources),
        )
        .route(
            "/api/languages/:id/resources/:resource_id",
            put(update_resource).delete(delete_resource),
        )
        .route_layer(middleware::from_fn_with_state(state, require_bearer))
}
