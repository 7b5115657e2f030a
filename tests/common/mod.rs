use std::sync::Arc;

use axum::Router;

use pm_radar::app::{router, AppState};
use pm_radar::config::AppConfig;
use pm_radar::db::memory::InMemoryStore;
use pm_radar::demo_seeder::seed_demo_data;

/// An in-memory store plus the application router wired to it.
pub struct TestEnv {
    pub store: Arc<InMemoryStore>,
    pub router: Router,
}

impl TestEnv {
    /// Empty collections, no static files, no CORS.
    pub fn empty() -> Self {
        Self::with_config(test_config())
    }

    pub fn with_config(config: AppConfig) -> Self {
        let store = Arc::new(InMemoryStore::new());
        let router = router(AppState::from_store(store.clone()), &config);
        Self { store, router }
    }

    /// Collections populated with the bundled fixtures.
    pub async fn seeded() -> Self {
        let env = Self::empty();
        seed_demo_data(env.store.as_ref(), env.store.as_ref())
            .await
            .expect("Failed to seed demo data");
        env
    }

    /// Build an `axum_test::TestServer` that expects success by default.
    pub fn server(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .expect_success_by_default()
            .build(self.router.clone())
    }

    /// Build a `TestServer` that does NOT expect success by default (for error tests).
    pub fn server_permissive(&self) -> axum_test::TestServer {
        axum_test::TestServer::builder()
            .build(self.router.clone())
    }
}

pub fn test_config() -> AppConfig {
    AppConfig {
        bind_addr: "127.0.0.1:0".to_string(),
        seed_demo_data: false,
        static_dir: None,
        cors_permissive: false,
    }
}

/// A valid `POST /api/news` body.
pub fn news_body(title: &str, company: &str, hours_ago: i64, gravity: i32) -> serde_json::Value {
    let published_at = chrono::Utc::now() - chrono::Duration::hours(hours_ago);
    serde_json::json!({
        "title": title,
        "description": format!("{title} description"),
        "company": company,
        "implementationType": "Released",
        "relevanceCategories": ["Coding", "Research"],
        "industry": "Technology",
        "technology": "Large Language Models",
        "gravityScore": gravity,
        "isBreakthrough": gravity >= 80,
        "publishedAt": published_at,
    })
}

/// A valid `POST /api/pm-resources` body.
pub fn pm_resource_body(title: &str, stage: &str, tags: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "title": title,
        "description": format!("{title} description"),
        "resourceType": "Template",
        "pmStage": stage,
        "tags": tags,
        "difficulty": "Beginner",
    })
}
