use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::models::{
    InsertNewsItem, InsertPmResource, InsertUser, NewsFilter, NewsItem, NewsItemPatch,
    PmResource, PmResourceFilter, PmResourcePatch, User,
};
use crate::error::AppError;

/// Repository trait for news items.
///
/// Handlers only see this trait, so the in-memory store can be swapped for a
/// persistent backend or a mock in tests.
#[async_trait]
pub trait NewsRepository: Send + Sync {
    /// List news items matching `filter`, newest first, paginated.
    async fn list_news_items(&self, filter: &NewsFilter) -> Result<Vec<NewsItem>, AppError>;

    /// Find a news item by id.
    async fn get_news_item(&self, id: Uuid) -> Result<Option<NewsItem>, AppError>;

    /// Persist a new item with a fresh id, stamped with the current time.
    async fn create_news_item(&self, input: InsertNewsItem) -> Result<NewsItem, AppError> {
        self.create_news_item_at(input, Utc::now()).await
    }

    /// Persist a new item with a fresh id and the given `created_at`.
    ///
    /// An input without `published_at` is published at `created_at` too.
    async fn create_news_item_at(
        &self,
        input: InsertNewsItem,
        created_at: DateTime<Utc>,
    ) -> Result<NewsItem, AppError>;

    /// Merge `patch` into an existing item. `None` when the id is unknown.
    async fn update_news_item(
        &self,
        id: Uuid,
        patch: NewsItemPatch,
    ) -> Result<Option<NewsItem>, AppError>;

    /// Remove an item. Returns whether it existed.
    async fn delete_news_item(&self, id: Uuid) -> Result<bool, AppError>;
}

/// Repository trait for PM resources.
#[async_trait]
pub trait PmResourceRepository: Send + Sync {
    /// List resources matching `filter`, most recently created first, paginated.
    async fn list_pm_resources(
        &self,
        filter: &PmResourceFilter,
    ) -> Result<Vec<PmResource>, AppError>;

    async fn get_pm_resource(&self, id: Uuid) -> Result<Option<PmResource>, AppError>;

    async fn create_pm_resource(&self, input: InsertPmResource) -> Result<PmResource, AppError>;

    async fn update_pm_resource(
        &self,
        id: Uuid,
        patch: PmResourcePatch,
    ) -> Result<Option<PmResource>, AppError>;

    async fn delete_pm_resource(&self, id: Uuid) -> Result<bool, AppError>;
}

/// Repository trait for users.
#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError>;

    /// Exact, case-sensitive username lookup.
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError>;

    /// Create a user. Fails with `Conflict` if the username is taken.
    async fn create_user(&self, input: InsertUser) -> Result<User, AppError>;
}
