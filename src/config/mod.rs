/// Application settings loaded from config.toml
pub mod app;

/// Database connection string, connection management and schema creation
pub mod database;
