use axum::extract::State;
use axum::Json;
use serde::{Deserialize, Serialize};

use crate::app::AppState;
use crate::db::models::{NewsFilter, PmResourceFilter};
use crate::db::query::distinct;
use crate::db::repository::{NewsRepository, PmResourceRepository};
use crate::error::AppError;

/// Distinct values of every filterable field, used to populate the client's pickers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterOptions {
    pub news: NewsFilterOptions,
    pub pm_resources: PmResourceFilterOptions,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsFilterOptions {
    pub companies: Vec<String>,
    pub implementation_types: Vec<String>,
    pub relevance_categories: Vec<String>,
    pub industries: Vec<String>,
    pub technologies: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PmResourceFilterOptions {
    pub resource_types: Vec<String>,
    pub pm_stages: Vec<String>,
    pub difficulties: Vec<String>,
    pub tags: Vec<String>,
}

/// Scan both full, unfiltered collections and collect distinct values.
///
/// Recomputed on every call. Values keep the order in which they first
/// appear in each collection's list order.
pub async fn process_filter_options(
    news_repo: &dyn NewsRepository,
    resource_repo: &dyn PmResourceRepository,
) -> Result<FilterOptions, AppError> {
    let news = news_repo.list_news_items(&NewsFilter::default()).await?;
    let resources = resource_repo
        .list_pm_resources(&PmResourceFilter::default())
        .await?;

    Ok(FilterOptions {
        news: NewsFilterOptions {
            companies: distinct(news.iter().map(|n| &n.company)),
            implementation_types: distinct(news.iter().map(|n| &n.implementation_type)),
            relevance_categories: distinct(news.iter().flat_map(|n| &n.relevance_categories)),
            industries: distinct(news.iter().map(|n| &n.industry)),
            technologies: distinct(news.iter().map(|n| &n.technology)),
        },
        pm_resources: PmResourceFilterOptions {
            resource_types: distinct(resources.iter().map(|r| &r.resource_type)),
            pm_stages: distinct(resources.iter().map(|r| &r.pm_stage)),
            difficulties: distinct(resources.iter().map(|r| &r.difficulty)),
            tags: distinct(resources.iter().flat_map(|r| &r.tags)),
        },
    })
}

/// Axum handler for `GET /api/filters`.
pub async fn filter_options_handler(
    State(state): State<AppState>,
) -> Result<Json<FilterOptions>, AppError> {
    let options = process_filter_options(
        state.news_repo.as_ref(),
        state.pm_resource_repo.as_ref(),
    )
    .await?;
    Ok(Json(options))
}
