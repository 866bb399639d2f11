use super::*;

pub(super) async fn list_cultures() -> Json<Vec<Culture>> {
    Json(lingo::languages::cultures())
}

pub(super) async fn display_resources(
    State(state): State<Arc<AppState>>,
    Path(culture): Path<String>,
) -> ApiResult<Json<Vec<LanguageResource>>> {
    Ok(Json(state.languages.display_resources(&culture).await?))
}

pub(super) async fn list_languages(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Query(pagination): Query<Pagination>,
) -> ApiResult<Json<Vec<Language>>> {
    authorize(&principal, rights::LANGUAGE_RIGHTS)?;
    Ok(Json(state.languages.list(&pagination).await?))
}

pub(super) async fn count_languages(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
) -> ApiResult<Json<CountResponse>> {
    authorize(&principal, rights::LANGUAGE_RIGHTS)?;
    let count = state.languages.count().await?;
    Ok(Json(CountResponse { count }))
}

pub(super) async fn get_language(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Json<Language>> {
    authorize(&principal, &[rights::R_API_LANGUAGE_R, rights::R_API_LANGUAGE_U])?;
    Ok(Json(state.languages.get(&id).await?))
}

pub(super) async fn create_language(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Json(mut language): Json<Language>,
) -> ApiResult<Json<Language>> {
    authorize(&principal, &[rights::R_API_LANGUAGE_C])?;
    validators::validate_language(&language)?;
    language.id = None;
    Ok(Json(state.languages.save(language).await?))
}

pub(super) async fn update_language(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
    Json(language): Json<Language>,
) -> ApiResult<Json<Language>> {
    authorize(&principal, &[rights::R_API_LANGUAGE_U])?;
    validators::validate_language(&language)?;
    Ok(Json(state.languages.update(&id, language).await?))
}

pub(super) async fn delete_language(
    State(state): State<Arc<AppState>>,
    Extension(principal): Extension<Principal>,
    Path(id): Path<String>,
) -> ApiResult<Json<CountResponse>> {
    authorize(&principal, &[rights::R_API_LANGUAGE_D])?;
    let count = state.languages.remove(&id).await?;
    Ok(Json(CountResponse { count }))
}
