pub mod agent;
pub mod api_connection;
pub mod cli;
pub mod config;
pub mod error;
pub mod preferences;
pub mod recipe;
pub mod recipe_search;
pub mod shopping;
