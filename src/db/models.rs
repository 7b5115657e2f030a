use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// An AI industry news entry.
///
/// Serialized with camelCase keys, which is the shape the web client reads.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsItem {
    /// Server-generated, never changes.
    pub id: Uuid,
    pub title: String,
    pub description: String,
    /// Optional long-form body.
    pub content: Option<String>,
    pub image_url: Option<String>,
    pub source_url: Option<String>,
    pub company: String,
    /// Released, Research, Beta, Pilot, ... Kept as free text.
    pub implementation_type: String,
    /// Education, Coding, Healthcare, ...
    pub relevance_categories: Vec<String>,
    pub industry: String,
    pub technology: String,
    /// Ranking signal, used as the secondary sort key.
    pub gravity_score: i32,
    /// Stored flag. Not derived from `gravity_score`.
    pub is_breakthrough: bool,
    pub published_at: DateTime<Utc>,
    /// Server-assigned at creation.
    pub created_at: DateTime<Utc>,
}

/// The request payload for creating a news item.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertNewsItem {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub content: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub source_url: Option<String>,
    pub company: String,
    pub implementation_type: String,
    pub relevance_categories: Vec<String>,
    pub industry: String,
    pub technology: String,
    #[serde(default)]
    pub gravity_score: i32,
    #[serde(default)]
    pub is_breakthrough: bool,
    /// Defaults to the creation time when omitted.
    #[serde(default)]
    pub published_at: Option<DateTime<Utc>>,
}

impl InsertNewsItem {
    /// Check the required text fields. Returns every violation, `; `-joined.
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();
        require_text(&mut problems, "title", &self.title);
        require_text(&mut problems, "description", &self.description);
        require_text(&mut problems, "company", &self.company);
        require_text(&mut problems, "implementationType", &self.implementation_type);
        require_text(&mut problems, "industry", &self.industry);
        require_text(&mut problems, "technology", &self.technology);
        finish(problems)
    }
}

impl NewsItem {
    /// Build the persisted record from an insert payload.
    pub fn from_insert(input: InsertNewsItem, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            content: input.content,
            image_url: input.image_url,
            source_url: input.source_url,
            company: input.company,
            implementation_type: input.implementation_type,
            relevance_categories: input.relevance_categories,
            industry: input.industry,
            technology: input.technology,
            gravity_score: input.gravity_score,
            is_breakthrough: input.is_breakthrough,
            published_at: input.published_at.unwrap_or(now),
            created_at: now,
        }
    }
}

/// Partial update for a news item. Absent fields keep their stored value.
///
/// Optional fields take `Some(None)` (JSON `null`) to clear the stored value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct NewsItemPatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub content: Option<Option<String>>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub image_url: Option<Option<String>>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub source_url: Option<Option<String>>,
    pub company: Option<String>,
    pub implementation_type: Option<String>,
    pub relevance_categories: Option<Vec<String>>,
    pub industry: Option<String>,
    pub technology: Option<String>,
    pub gravity_score: Option<i32>,
    pub is_breakthrough: Option<bool>,
    pub published_at: Option<DateTime<Utc>>,
}

impl NewsItemPatch {
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();
        require_optional_text(&mut problems, "title", &self.title);
        require_optional_text(&mut problems, "description", &self.description);
        require_optional_text(&mut problems, "company", &self.company);
        require_optional_text(&mut problems, "implementationType", &self.implementation_type);
        require_optional_text(&mut problems, "industry", &self.industry);
        require_optional_text(&mut problems, "technology", &self.technology);
        finish(problems)
    }

    /// Shallow-merge the supplied fields into `item`.
    pub fn apply(self, item: &mut NewsItem) {
        merge(&mut item.title, self.title);
        merge(&mut item.description, self.description);
        merge(&mut item.content, self.content);
        merge(&mut item.image_url, self.image_url);
        merge(&mut item.source_url, self.source_url);
        merge(&mut item.company, self.company);
        merge(&mut item.implementation_type, self.implementation_type);
        merge(&mut item.relevance_categories, self.relevance_categories);
        merge(&mut item.industry, self.industry);
        merge(&mut item.technology, self.technology);
        merge(&mut item.gravity_score, self.gravity_score);
        merge(&mut item.is_breakthrough, self.is_breakthrough);
        merge(&mut item.published_at, self.published_at);
    }
}

/// A product-management resource: template, teardown, interview questions, ...
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PmResource {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub content: Option<String>,
    pub resource_type: String,
    /// Discovery, Planning, Execution, Launch, Growth, Optimization.
    pub pm_stage: String,
    /// Set for company-specific material such as interview questions.
    pub company: Option<String>,
    pub tags: Vec<String>,
    /// Beginner, Intermediate, Advanced.
    pub difficulty: String,
    pub resource_url: Option<String>,
    pub download_url: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// The request payload for creating a PM resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsertPmResource {
    pub title: String,
    pub description: String,
    #[serde(default)]
    pub content: Option<String>,
    pub resource_type: String,
    pub pm_stage: String,
    #[serde(default)]
    pub company: Option<String>,
    pub tags: Vec<String>,
    pub difficulty: String,
    #[serde(default)]
    pub resource_url: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

impl InsertPmResource {
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();
        require_text(&mut problems, "title", &self.title);
        require_text(&mut problems, "description", &self.description);
        require_text(&mut problems, "resourceType", &self.resource_type);
        require_text(&mut problems, "pmStage", &self.pm_stage);
        require_text(&mut problems, "difficulty", &self.difficulty);
        finish(problems)
    }
}

impl PmResource {
    pub fn from_insert(input: InsertPmResource, id: Uuid, now: DateTime<Utc>) -> Self {
        Self {
            id,
            title: input.title,
            description: input.description,
            content: input.content,
            resource_type: input.resource_type,
            pm_stage: input.pm_stage,
            company: input.company,
            tags: input.tags,
            difficulty: input.difficulty,
            resource_url: input.resource_url,
            download_url: input.download_url,
            created_at: now,
        }
    }
}

/// Partial update for a PM resource. Same absent/`null` rules as [`NewsItemPatch`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PmResourcePatch {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub content: Option<Option<String>>,
    pub resource_type: Option<String>,
    pub pm_stage: Option<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub company: Option<Option<String>>,
    pub tags: Option<Vec<String>>,
    pub difficulty: Option<String>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub resource_url: Option<Option<String>>,
    #[serde(deserialize_with = "nullable", skip_serializing_if = "Option::is_none")]
    pub download_url: Option<Option<String>>,
}

impl PmResourcePatch {
    pub fn validate(&self) -> Result<(), String> {
        let mut problems = Vec::new();
        require_optional_text(&mut problems, "title", &self.title);
        require_optional_text(&mut problems, "description", &self.description);
        require_optional_text(&mut problems, "resourceType", &self.resource_type);
        require_optional_text(&mut problems, "pmStage", &self.pm_stage);
        require_optional_text(&mut problems, "difficulty", &self.difficulty);
        finish(problems)
    }

    pub fn apply(self, resource: &mut PmResource) {
        merge(&mut resource.title, self.title);
        merge(&mut resource.description, self.description);
        merge(&mut resource.content, self.content);
        merge(&mut resource.resource_type, self.resource_type);
        merge(&mut resource.pm_stage, self.pm_stage);
        merge(&mut resource.company, self.company);
        merge(&mut resource.tags, self.tags);
        merge(&mut resource.difficulty, self.difficulty);
        merge(&mut resource.resource_url, self.resource_url);
        merge(&mut resource.download_url, self.download_url);
    }
}

/// A registered user. Only looked up by id or username; no session flow exists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsertUser {
    pub username: String,
    pub password: String,
}

/// Offset/limit window applied after filtering and sorting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Pagination {
    pub offset: usize,
    /// `None` returns everything after `offset`.
    pub limit: Option<usize>,
}

/// Filters for listing news items.
///
/// Fields combine with AND. Within a field any one requested value is enough
/// to match, and an empty list means the field is not filtered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewsFilter {
    /// Case-insensitive substrings of the item's company.
    pub company: Vec<String>,
    /// Exact matches.
    pub implementation_type: Vec<String>,
    pub relevance_categories: Vec<String>,
    /// Case-insensitive substrings of the item's industry.
    pub industry: Vec<String>,
    pub is_breakthrough: Option<bool>,
    pub page: Pagination,
}

/// Filters for listing PM resources. Same combination rules as [`NewsFilter`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PmResourceFilter {
    pub resource_type: Vec<String>,
    pub pm_stage: Vec<String>,
    /// Case-insensitive substrings. Resources without a company never match.
    pub company: Vec<String>,
    pub difficulty: Vec<String>,
    pub tags: Vec<String>,
    pub page: Pagination,
}

fn require_text(problems: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        problems.push(format!("{field} must not be empty"));
    }
}

fn require_optional_text(problems: &mut Vec<String>, field: &str, value: &Option<String>) {
    if let Some(value) = value {
        require_text(problems, field, value);
    }
}

fn finish(problems: Vec<String>) -> Result<(), String> {
    if problems.is_empty() {
        Ok(())
    } else {
        Err(problems.join("; "))
    }
}

fn merge<T>(slot: &mut T, update: Option<T>) {
    if let Some(value) = update {
        *slot = value;
    }
}

/// Present-but-null becomes `Some(None)`; an absent field stays `None` via `default`.
fn nullable<'de, D, T>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}
