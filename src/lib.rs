pub mod auth;
pub mod cache;
pub mod config;
pub mod db;
pub mod handlers;
pub mod models;
pub mod ordering;
pub mod sitemap;
pub mod slug;
pub mod storage;

pub use db::create_pool;
