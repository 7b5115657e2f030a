//! Query-string parsing shared by the list endpoints.
//!
//! Every parameter is collected as `Vec<String>` so repeated keys
//! (`?company=OpenAI&company=Google`) arrive intact. Category and tag lists
//! also accept comma-joined values (`?tags=a,b`).

use serde::Deserialize;
use uuid::Uuid;

use crate::db::models::{NewsFilter, Pagination, PmResourceFilter};
use crate::error::AppError;

/// Page size used when a list request omits `limit`.
pub const DEFAULT_LIMIT: usize = 20;

/// Raw query parameters for `GET /api/news`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsQuery {
    pub company: Vec<String>,
    pub implementation_type: Vec<String>,
    pub relevance_categories: Vec<String>,
    pub industry: Vec<String>,
    pub is_breakthrough: Vec<String>,
    pub limit: Vec<String>,
    pub offset: Vec<String>,
}

impl NewsQuery {
    pub fn into_filter(self) -> Result<NewsFilter, AppError> {
        Ok(NewsFilter {
            company: values(&self.company),
            implementation_type: values(&self.implementation_type),
            relevance_categories: split_values(&self.relevance_categories),
            industry: values(&self.industry),
            is_breakthrough: parse_bool("isBreakthrough", &self.is_breakthrough)?,
            page: parse_page(&self.limit, &self.offset)?,
        })
    }
}

/// Raw query parameters for `GET /api/pm-resources`.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PmResourceQuery {
    pub resource_type: Vec<String>,
    pub pm_stage: Vec<String>,
    pub company: Vec<String>,
    pub difficulty: Vec<String>,
    pub tags: Vec<String>,
    pub limit: Vec<String>,
    pub offset: Vec<String>,
}

impl PmResourceQuery {
    pub fn into_filter(self) -> Result<PmResourceFilter, AppError> {
        Ok(PmResourceFilter {
            resource_type: values(&self.resource_type),
            pm_stage: values(&self.pm_stage),
            company: values(&self.company),
            difficulty: values(&self.difficulty),
            tags: split_values(&self.tags),
            page: parse_page(&self.limit, &self.offset)?,
        })
    }
}

/// Parse a record id from a path segment.
///
/// A malformed id cannot name any stored record, so it is reported as not found.
pub fn parse_id(raw: &str, not_found: &str) -> Result<Uuid, AppError> {
    Uuid::parse_str(raw.trim()).map_err(|_| AppError::NotFound(not_found.to_string()))
}

/// Every non-blank occurrence of a repeatable parameter, trimmed.
///
/// Not split on commas: company names may contain them.
fn values(raw: &[String]) -> Vec<String> {
    raw.iter()
        .map(|v| v.trim())
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

/// First non-blank occurrence of a single-valued parameter.
fn first_value(raw: &[String]) -> Option<String> {
    raw.iter()
        .map(|v| v.trim())
        .find(|v| !v.is_empty())
        .map(str::to_string)
}

/// Flatten repeated and comma-joined values into one list.
fn split_values(raw: &[String]) -> Vec<String> {
    raw.iter()
        .flat_map(|v| v.split(','))
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
        .collect()
}

fn parse_usize(name: &str, raw: &[String]) -> Result<Option<usize>, AppError> {
    first_value(raw)
        .map(|v| {
            v.parse::<usize>().map_err(|_| {
                AppError::BadRequest(format!(
                    "Invalid {name} '{v}'. Expected a non-negative integer"
                ))
            })
        })
        .transpose()
}

fn parse_bool(name: &str, raw: &[String]) -> Result<Option<bool>, AppError> {
    first_value(raw)
        .map(|v| match v.to_lowercase().as_str() {
            "true" => Ok(true),
            "false" => Ok(false),
            _ => Err(AppError::BadRequest(format!(
                "Invalid {name} '{v}'. Expected: true, false"
            ))),
        })
        .transpose()
}

fn parse_page(limit: &[String], offset: &[String]) -> Result<Pagination, AppError> {
    Ok(Pagination {
        offset: parse_usize("offset", offset)?.unwrap_or(0),
        limit: Some(parse_usize("limit", limit)?.unwrap_or(DEFAULT_LIMIT)),
    })
}
