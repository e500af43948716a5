pub mod cache;
pub mod config;
pub mod db;
pub mod error;
pub mod events;
pub mod handlers;
pub mod lifecycle;
pub mod models;
pub mod state;

pub use db::create_pool;
