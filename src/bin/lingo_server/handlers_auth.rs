use super::*;

pub(super) async fn login(
    State(state): State<Arc<AppState>>,
    Json(credentials): Json<Credentials>,
) -> ApiResult<Json<AuthResponse>> {
    Ok(Json(state.auth.login(&credentials).await?))
}

pub(super) async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Json<AuthResponse>> {
    Ok(Json(state.auth.register(&request).await?))
}

pub(super) async fn refresh_token(
    State(state): State<Arc<AppState>>,
    Json(body): Json<RefreshRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let resp = state
        .auth
        .exchange_refresh_token(body.refresh.as_deref())
        .await?;
    Ok(Json(resp))
}

pub(super) async fn reject_token(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(body): Json<RefreshRequest>,
) -> ApiResult<Json<AuthResponse>> {
    let resp = state
        .auth
        .reject_refresh_token(&principal, body.refresh.as_deref())
        .await?;
    Ok(Json(resp))
}
