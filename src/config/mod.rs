/// Application configuration loading from config.toml and environment
pub mod app;

/// Database configuration and connection management
pub mod database;
