// Library for tests to access modules

pub mod archive_repo;
pub mod collector;
pub mod config;
pub mod error;
pub mod handler;
pub mod metrics_repo;
pub mod models;
pub mod version;
