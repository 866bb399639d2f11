use super::*;

pub(super) async fn list_users(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<User>>> {
    authorize(&principal, rights::USER_RIGHTS)?;
    let users = state
        .users
        .list(query.search.as_deref(), &query.pagination)
        .await?;
    Ok(Json(users))
}

pub(super) async fn count_users(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<CountResponse>> {
    authorize(&principal, rights::USER_RIGHTS)?;
    let count = state.users.count(query.search.as_deref()).await?;
    Ok(Json(CountResponse { count }))
}

pub(super) async fn current_user(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<User>> {
    authorize(&principal, &[rights::R_API_USER_R])?;
    Ok(Json(state.users.get(&principal.id).await?))
}

pub(super) async fn rights_catalogue() -> Json<std::collections::BTreeMap<String, Vec<String>>> {
    Json(rights::by_family())
}

pub(super) async fn get_user_rights(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Json<Vec<String>>> {
    authorize(&principal, &[rights::R_API_USER_U])?;
    Ok(Json(state.users.get_user_rights(&id).await?))
}

pub(super) async fn save_user_rights(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(codes): Json<Vec<String>>,
) -> ApiResult<Json<Vec<String>>> {
    authorize(&principal, &[rights::R_API_USER_U])?;
    Ok(Json(state.users.save_user_rights(&id, codes).await?))
}

pub(super) async fn get_user(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Json<User>> {
    authorize(&principal, &[rights::R_API_USER_R])?;
    Ok(Json(state.users.get(&id).await?))
}

pub(super) async fn create_user(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(request): Json<RegisterRequest>,
) -> ApiResult<Json<User>> {
    authorize(&principal, &[rights::R_API_USER_C])?;
    validators::validate_register(&request)?;
    let created = state.users.create_user(&request).await?;
    let id = created.id.unwrap_or_default();
    Ok(Json(state.users.get(&id).await?))
}

pub(super) async fn update_user(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(update): Json<UserUpdate>,
) -> ApiResult<Json<User>> {
    authorize(&principal, &[rights::R_API_USER_U])?;
    Ok(Json(state.users.update_profile(&id, update).await?))
}

pub(super) async fn delete_user(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Json<CountResponse>> {
    authorize(&principal, &[rights::R_API_USER_D])?;
    let count = state.users.remove(&id).await?;
    Ok(Json(CountResponse { count }))
}
