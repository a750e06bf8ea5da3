//! Relay configuration: Telegram connection, destination, HTTP port, database, logging and rules.

mod app_config;


pub use app_config::AppConfig;
