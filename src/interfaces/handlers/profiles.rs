use actix_web::{web, HttpResponse, Responder};
use tracing::instrument;

use crate::{
    entities::profile::{ProfilePayload, DEFAULT_PAGE_SIZE},
    errors::AppError,
    AppState,
};

#[instrument(skip(state, query))]
pub async fn list_profiles(
    state: web::Data<AppState>,
    query: web::Query<std::collections::HashMap<String, String>>,
) -> Result<impl Responder, AppError> {
    // Absent or non-numeric values fall back to the defaults.
    let page = query
        .get("page")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(1)
        .max(1);
    let limit = query
        .get("limit")
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, 100);

    let response = state.profile_handler.list_profiles(page, limit).await?;

    Ok(HttpResponse::Ok().json(response))
}

#[instrument(skip(state))]
pub async fn search_profiles(
    term: web::Path<String>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profiles = state.profile_handler.search_profiles(&term).await?;

    tracing::debug!("search for {:?} matched {} profiles", term.as_str(), profiles.len());

    Ok(HttpResponse::Ok().json(profiles))
}

#[instrument(skip(state))]
pub async fn get_profile(
    id: web::Path<i64>,
    state: web::Data<AppState>,
) -> Result<impl Responder, AppError> {
    let profile = state.profile_handler.get_profile(id.into_inner()).await?;

    Ok(HttpResponse::Ok().json(profile))
}

#[instrument(skip(state, data))]
pub async fn create_profile(
    state: web::Data<AppState>,
    data: web::Json<ProfilePayload>,
) -> Result<impl Responder, AppError> {
    let response = state
        .profile_handler
        .create_profile(data.into_inner())
        .await?;

    Ok(HttpResponse::Created().json(response))
}

#[instrument(skip(state, data))]
pub async fn update_profile(
    id: web::Path<i64>,
    state: web::Data<AppState>,
    data: web::Json<ProfilePayload>,
) -> Result<impl Responder, AppError> {
    let response = state
        .profile_handler
        .update_profile(id.into_inner(), data.into_inner())
        .await?;

    Ok(HttpResponse::Ok().json(response))
}
