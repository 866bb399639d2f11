use super::*;

pub(super) async fn list_resources(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(lang_id): Path<String>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Vec<LanguageResource>>> {
    authorize(&principal, rights::LANGUAGE_RESOURCE_RIGHTS)?;
    let resources = state
        .languages
        .get_resources(&lang_id, query.search.as_deref(), &query.pagination)
        .await?;
    Ok(Json(resources))
}

pub(super) async fn count_resources(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(lang_id): Path<String>,
    Query(query): Query<SearchQuery>,
) -> ApiResult<Json<CountResponse>> {
    authorize(&principal, rights::LANGUAGE_RESOURCE_RIGHTS)?;
    let count = state
        .languages
        .count_resources(&lang_id, query.search.as_deref())
        .await?;
    Ok(Json(CountResponse { count }))
}

pub(super) async fn create_resource(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(lang_id): Path<String>,
    Json(mut resource): Json<LanguageResource>,
) -> ApiResult<Json<LanguageResource>> {
    authorize(&principal, &[rights::R_API_LANGUAGE_RESOURCE_C])?;
    validators::validate_resource(&resource)?;
    resource.id = None;
    Ok(Json(state.languages.save_resource(&lang_id, resource).await?))
}

pub(super) async fn update_resource(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path((lang_id, resource_id)): Path<(String, String)>,
    Json(resource): Json<LanguageResource>,
) -> ApiResult<Json<LanguageResource>> {
    authorize(&principal, &[rights::R_API_LANGUAGE_RESOURCE_U])?;
    validators::validate_resource(&resource)?;
    let updated = state
        .languages
        .update_resource(&lang_id, &resource_id, resource)
        .await?;
    Ok(Json(updated))
}

pub(super) async fn delete_resource(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path((lang_id, resource_id)): Path<(String, String)>,
) -> ApiResult<Json<CountResponse>> {
    authorize(&principal, &[rights::R_API_LANGUAGE_RESOURCE_D])?;
    let count = state
        .languages
        .remove_resource(&lang_id, &resource_id)
        .await?;
    Ok(Json(CountResponse { count }))
}
