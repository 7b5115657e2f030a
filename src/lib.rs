pub mod app;
pub mod config;
pub mod demo_seeder;
pub mod error;
pub mod db {
    pub mod memory;
    pub mod models;
    pub mod query;
    pub mod repository;
}
pub mod api {
    pub mod errors;
    pub mod filters;
    pub mod news;
    pub mod params;
    pub mod pm_resources;
}
