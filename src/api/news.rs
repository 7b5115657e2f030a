use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use axum_extra::extract::Query;

use crate::api::params::{parse_id, NewsQuery};
use crate::app::AppState;
use crate::db::models::{InsertNewsItem, NewsFilter, NewsItem, NewsItemPatch};
use crate::db::repository::NewsRepository;
use crate::error::AppError;

const NOT_FOUND: &str = "News item not found";
const INVALID_DATA: &str = "Invalid news item data";

/// Core listing logic, separated from the HTTP layer for testability.
pub async fn process_list_news(
    repo: &dyn NewsRepository,
    filter: NewsFilter,
) -> Result<Vec<NewsItem>, AppError> {
    let items = repo.list_news_items(&filter).await?;
    tracing::debug!(count = items.len(), ?filter, "Listed news items");
    Ok(items)
}

pub async fn process_get_news(repo: &dyn NewsRepository, id: &str) -> Result<NewsItem, AppError> {
    let id = parse_id(id, NOT_FOUND)?;
    repo.get_news_item(id)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

/// Validate and persist a new news item.
pub async fn process_create_news(
    repo: &dyn NewsRepository,
    input: InsertNewsItem,
) -> Result<NewsItem, AppError> {
    input
        .validate()
        .map_err(|detail| AppError::validation(INVALID_DATA, detail))?;

    let item = repo.create_news_item(input).await?;
    tracing::info!(id = %item.id, company = %item.company, "News item created");
    Ok(item)
}

pub async fn process_update_news(
    repo: &dyn NewsRepository,
    id: &str,
    patch: NewsItemPatch,
) -> Result<NewsItem, AppError> {
    let id = parse_id(id, NOT_FOUND)?;
    patch
        .validate()
        .map_err(|detail| AppError::validation(INVALID_DATA, detail))?;

    repo.update_news_item(id, patch)
        .await?
        .ok_or_else(|| AppError::NotFound(NOT_FOUND.into()))
}

pub async fn process_delete_news(repo: &dyn NewsRepository, id: &str) -> Result<(), AppError> {
    let id = parse_id(id, NOT_FOUND)?;
    if repo.delete_news_item(id).await? {
        tracing::info!(%id, "News item deleted");
        Ok(())
    } else {
        Err(AppError::NotFound(NOT_FOUND.into()))
    }
}

/// Axum handler for `GET /api/news`.
pub async fn list_news_handler(
    State(state): State<AppState>,
    Query(query): Query<NewsQuery>,
) -> Result<Json<Vec<NewsItem>>, AppError> {
    let filter = query.into_filter()?;
    let items = process_list_news(state.news_repo.as_ref(), filter).await?;
    Ok(Json(items))
}

/// Axum handler for `GET /api/news/{id}`.
pub async fn get_news_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<NewsItem>, AppError> {
    let item = process_get_news(state.news_repo.as_ref(), &id).await?;
    Ok(Json(item))
}

/// Axum handler for `POST /api/news`.
///
/// Body rejections are answered with 400 and the parser's message.
pub async fn create_news_handler(
    State(state): State<AppState>,
    payload: Result<Json<InsertNewsItem>, JsonRejection>,
) -> Result<(StatusCode, Json<NewsItem>), AppError> {
    let Json(input) = payload.map_err(|e| AppError::validation(INVALID_DATA, e.body_text()))?;
    let item = process_create_news(state.news_repo.as_ref(), input).await?;
    Ok((StatusCode::CREATED, Json(item)))
}

/// Axum handler for `PATCH /api/news/{id}`.
pub async fn update_news_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
    payload: Result<Json<NewsItemPatch>, JsonRejection>,
) -> Result<Json<NewsItem>, AppError> {
    let Json(patch) = payload.map_err(|e| AppError::validation(INVALID_DATA, e.body_text()))?;
    let item = process_update_news(state.news_repo.as_ref(), &id, patch).await?;
    Ok(Json(item))
}

/// Axum handler for `DELETE /api/news/{id}`.
pub async fn delete_news_handler(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<StatusCode, AppError> {
    process_delete_news(state.news_repo.as_ref(), &id).await?;
    Ok(StatusCode::NO_CONTENT)
}
