use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::Query;

use crate::api::params::{parse_id, PmResourceQuery};
use crate::app::AppState;
use crate::db::models::{InsertPmResource, PmResource, PmResourceFilter, PmResourcePatch};
use crate::db::repository::PmResourceRepository;
use crate::error::AppError;

const NOT_FOUND: &str = "PM resource not found";
const INVALID_DATA: &str = "Invalid PM resource data";

pub async fn process_list_pm_resources(
    repo: &dyn PmResourceRepository,
    filter: PmResourceFilter,
) -> Result<Vec<PmResource>, AppError> {
    let resources = repo.list_pm_resources(&filter).await?;
    tracing::debug!(count = resources.len(), ?filter, "Listed PM resources");
    Ok(resources)
}

pub async fn process_get_pm_resource(
    repo: &dyn PmResourceRepository,
    id: &str,
) -> Result<PmResource, AppError> {
    let id = parse_id(id, NOT_FOUND)?;
    repo.get_pm_resource(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn process_create_pm_resource(
    repo: &dyn PmResourceRepository,
    input: InsertPmResource,
) -> Result<PmResource, AppError> {
    input
        .validate()
        .map_err(|detail| AppError::validation(INVALID_DATA, detail))?;

    let resource = repo.create_pm_resource(input).await?;
    tracing::info!(id = %resource.id, stage = %resource.pm_stage, "PM resource created");
    Ok(resource)
}

pub async fn process_update_pm_resource(
    repo: &dyn PmResourceRepository,
    id: &str,
    patch: PmResourcePatch,
) -> Result<PmResource, AppError> {
    let id = parse_id(id, NOT_FOUND)?;
    patch
        .validate()
        .map_err(|detail| AppError::validation(INVALID_DATA, detail))?;

    repo.update_pm_resource(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn process_delete_pm_resource(
    repo: &dyn PmResourceRepository,
    id: &str,
) -> Result<(), AppError> {
    let id = parse_id(id, NOT_FOUND)?;
    if repo.delete_pm_resource(id).await? {
        tracing::info!(%id, "PM resource deleted");
        Ok(())
    } else {
        Err(AppError::NotFound(NOT_FOUND.into()))
    }
}

/// Axum handler for `GET /api/pm-resources`.
pub async fn list_pm_resources_handler(
    State(state): State<AppState>,
    Query(query): Query<PmResourceQuery>,
) -> Result<Json<Vec<PmResource>>, AppError> {
    let filter = query.into_filter()?;
    let resources = process_list_pm_resources(state.pm_resource_repo.as_ref(), filter).await?;
    Ok(Json(resources))
}

/// Axum handler for `GET /api/pm-resources/{id}`.
pub async fn get_pm_resource_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<PmResource>, AppError> {
    let resource = process_get_pm_resource(state.pm_resource_repo.as_ref(), &id).await?;
    Ok(Json(resource))
}

/// Axum handler for `POST /api/pm-resources`.
pub async fn create_pm_resource_handler(
    State(state): State<AppState>,
    payload: Result<Json<InsertPmResource>, JsonRejection>,
) -> Result<(StatusCode, Json<PmResource>), AppError> {
    let Json(input) = payload.map_err(|e| AppError::validation(INVALID_DATA, e.body_text()))?;
    let resource = process_create_pm_resource(state.pm_resource_repo.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(resource)))
}

/// Axum handler for `PATCH /api/pm-resources/{id}`.
pub async fn update_pm_resource_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<PmResourcePatch>, JsonRejection>,
) -> Result<Json<PmResource>, AppError> {
    let Json(patch) = payload.map_err(|e| AppError::validation(INVALID_DATA, e.body_text()))?;
    let resource =
        process_update_pm_resource(state.pm_resource_repo.as_ref(), &id, patch).await?;
    Ok(Json(resource))
}

/// Axum handler for `DELETE /api/pm-resources/{id}`.
pub async fn delete_pm_resource_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    process_delete_pm_resource(state.pm_resource_repo.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
