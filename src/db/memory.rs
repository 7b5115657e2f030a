use std::collections::{BTreeMap, HashMap};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::db::models::{
    InsertNewsItem, InsertPmResource, InsertUser, NewsFilter, NewsItem, NewsItemPatch,
    PmResource, PmResourceFilter, PmResourcePatch, User,
};
use crate::db::query::{select_news, select_pm_resources};
use crate::db::repository::{NewsRepository, PmResourceRepository, UserRepository};
use crate::error::AppError;

/// Id-keyed records that iterate in insertion order.
///
/// Updates keep a record's original position, so equal sort keys fall back
/// to insertion order.
#[derive(Debug)]
struct Collection<T> {
    entries: BTreeMap<u64, T>,
    index: HashMap<Uuid, u64>,
    next_seq: u64,
}

impl<T> Collection<T> {
    fn new() -> Self {
        Self {
            entries: BTreeMap::new(),
            index: HashMap::new(),
            next_seq: 0,
        }
    }

    /// A v4 id not currently used in this collection.
    fn fresh_id(&self) -> Uuid {
        loop {
            let id = Uuid::new_v4();
            if !self.index.contains_key(&id) {
                return id;
            }
        }
    }

    fn get(&self, id: Uuid) -> Option<&T> {
        self.index.get(&id).and_then(|seq| self.entries.get(seq))
    }

    fn get_mut(&mut self, id: Uuid) -> Option<&mut T> {
        let seq = self.index.get(&id)?;
        self.entries.get_mut(seq)
    }

    fn insert(&mut self, id: Uuid, value: T) {
        let seq = self.next_seq;
        self.next_seq += 1;
        if let Some(old) = self.index.insert(id, seq) {
            self.entries.remove(&old);
        }
        self.entries.insert(seq, value);
    }

    fn remove(&mut self, id: Uuid) -> bool {
        match self.index.remove(&id) {
            Some(seq) => self.entries.remove(&seq).is_some(),
            None => false,
        }
    }

    fn values(&self) -> impl Iterator<Item = &T> {
        self.entries.values()
    }
}

/// Process-lifetime store owning the users, news and PM resource collections.
///
/// Implements every repository trait; share it behind an `Arc`.
#[derive(Debug)]
pub struct InMemoryStore {
    users: RwLock<Collection<User>>,
    news_items: RwLock<Collection<NewsItem>>,
    pm_resources: RwLock<Collection<PmResource>>,
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemoryStore {
    /// An empty store. See `demo_seeder` for fixture data.
    pub fn new() -> Self {
        Self {
            users: RwLock::new(Collection::new()),
            news_items: RwLock::new(Collection::new()),
            pm_resources: RwLock::new(Collection::new()),
        }
    }
}

fn read<'a, T>(lock: &'a RwLock<T>, name: &str) -> Result<RwLockReadGuard<'a, T>, AppError> {
    lock.read()
        .map_err(|_| AppError::Internal(format!("{name} collection lock poisoned")))
}

fn write<'a, T>(lock: &'a RwLock<T>, name: &str) -> Result<RwLockWriteGuard<'a, T>, AppError> {
    lock.write()
        .map_err(|_| AppError::Internal(format!("{name} collection lock poisoned")))
}

#[async_trait]
impl NewsRepository for InMemoryStore {
    async fn list_news_items(&self, filter: &NewsFilter) -> Result<Vec<NewsItem>, AppError> {
        let news = read(&self.news_items, "news")?;
        Ok(select_news(news.values(), filter))
    }

    async fn get_news_item(&self, id: Uuid) -> Result<Option<NewsItem>, AppError> {
        let news = read(&self.news_items, "news")?;
        Ok(news.get(id).cloned())
    }

    async fn create_news_item_at(
        &self,
        input: InsertNewsItem,
        created_at: DateTime<Utc>,
    ) -> Result<NewsItem, AppError> {
        let mut news = write(&self.news_items, "news")?;
        let item = NewsItem::from_insert(input, news.fresh_id(), created_at);
        news.insert(item.id, item.clone());
        tracing::debug!(id = %item.id, "Created news item");
        Ok(item)
    }

    async fn update_news_item(
        &self,
        id: Uuid,
        patch: NewsItemPatch,
    ) -> Result<Option<NewsItem>, AppError> {
        let mut news = write(&self.news_items, "news")?;
        Ok(news.get_mut(id).map(|item| {
            patch.apply(item);
            item.clone()
        }))
    }

    async fn delete_news_item(&self, id: Uuid) -> Result<bool, AppError> {
        let mut news = write(&self.news_items, "news")?;
        Ok(news.remove(id))
    }
}

#[async_trait]
impl PmResourceRepository for InMemoryStore {
    async fn list_pm_resources(
        &self,
        filter: &PmResourceFilter,
    ) -> Result<Vec<PmResource>, AppError> {
        let resources = read(&self.pm_resources, "pm resource")?;
        Ok(select_pm_resources(resources.values(), filter))
    }

    async fn get_pm_resource(&self, id: Uuid) -> Result<Option<PmResource>, AppError> {
        let resources = read(&self.pm_resources, "pm resource")?;
        Ok(resources.get(id).cloned())
    }

    async fn create_pm_resource(&self, input: InsertPmResource) -> Result<PmResource, AppError> {
        let mut resources = write(&self.pm_resources, "pm resource")?;
        let resource = PmResource::from_insert(input, resources.fresh_id(), Utc::now());
        resources.insert(resource.id, resource.clone());
        tracing::debug!(id = %resource.id, "Created PM resource");
        Ok(resource)
    }

    async fn update_pm_resource(
        &self,
        id: Uuid,
        patch: PmResourcePatch,
    ) -> Result<Option<PmResource>, AppError> {
        let mut resources = write(&self.pm_resources, "pm resource")?;
        Ok(resources.get_mut(id).map(|resource| {
            patch.apply(resource);
            resource.clone()
        }))
    }

    async fn delete_pm_resource(&self, id: Uuid) -> Result<bool, AppError> {
        let mut resources = write(&self.pm_resources, "pm resource")?;
        Ok(resources.remove(id))
    }
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn get_user(&self, id: Uuid) -> Result<Option<User>, AppError> {
        let users = read(&self.users, "user")?;
        Ok(users.get(id).cloned())
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>, AppError> {
        let users = read(&self.users, "user")?;
        let found = users.values().find(|u| u.username == username).cloned();
        Ok(found)
    }

    async fn create_user(&self, input: InsertUser) -> Result<User, AppError> {
        let mut users = write(&self.users, "user")?;
        if users.values().any(|u| u.username == input.username) {
            return Err(AppError::Conflict(format!(
                "Username '{}' is already taken",
                input.username
            )));
        }

        let user = User {
            id: users.fresh_id(),
            username: input.username,
            password: input.password,
        };
        users.insert(user.id, user.clone());
        Ok(user)
    }
}
