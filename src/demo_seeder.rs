use anyhow::Context;
use chrono::{Duration, Utc};
use serde::Deserialize;

use crate::db::models::{InsertNewsItem, InsertPmResource};
use crate::db::repository::{NewsRepository, PmResourceRepository};

/// Fixture files embedded into the binary.
const NEWS_FIXTURES: &str = include_str!("../seed_data/news.yaml");
const PM_RESOURCE_FIXTURES: &str = include_str!("../seed_data/pm_resources.yaml");

/// A news fixture. Publish and creation times are relative to when seeding runs.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct NewsFixture {
    published_hours_ago: i64,
    #[serde(flatten)]
    item: InsertNewsItem,
}

/// How many records were seeded into each collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedSummary {
    pub news_items: usize,
    pub pm_resources: usize,
}

fn news_fixtures() -> anyhow::Result<Vec<NewsFixture>> {
    serde_yaml::from_str(NEWS_FIXTURES).context("Failed to parse seed_data/news.yaml")
}

fn pm_resource_fixtures() -> anyhow::Result<Vec<InsertPmResource>> {
    serde_yaml::from_str(PM_RESOURCE_FIXTURES).context("Failed to parse seed_data/pm_resources.yaml")
}

/// Seed both collections with the bundled fixture data.
pub async fn seed_demo_data(
    news_repo: &dyn NewsRepository,
    resource_repo: &dyn PmResourceRepository,
) -> anyhow::Result<SeedSummary> {
    tracing::info!("Starting demo data seeding...");

    let now = Utc::now();
    let news = news_fixtures()?;
    let news_count = news.len();
    for fixture in news {
        let published_at = now - Duration::hours(fixture.published_hours_ago);
        let mut item = fixture.item;
        item.published_at = Some(published_at);
        let title = item.title.clone();
        news_repo
            .create_news_item_at(item, published_at)
            .await
            .with_context(|| format!("Failed to seed news item '{title}'"))?;
    }
    tracing::info!("Seeded {} news items.", news_count);

    let resources = pm_resource_fixtures()?;
    let resource_count = resources.len();
    for resource in resources {
        let title = resource.title.clone();
        resource_repo
            .create_pm_resource(resource)
            .await
            .with_context(|| format!("Failed to seed PM resource '{title}'"))?;
    }
    tracing::info!("Seeded {} PM resources.", resource_count);

    Ok(SeedSummary {
        news_items: news_count,
        pm_resources: resource_count,
    })
}
