use thiserror::Error;

use crate::agent::selection::SelectionError;
use crate::api_connection::connection::ApiConnectionError;
use crate::config::ConfigError;
use crate::preferences::PreferenceError;
use crate::recipe_search::RecipeApiError;
use crate::shopping::ServingsError;

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Chat completion failed: {0}")]
    Chat(#[from] ApiConnectionError),

    #[error("Recipe search failed: {0}")]
    RecipeSearch(#[from] RecipeApiError),

    #[error("Could not read preferences: {0}")]
    Preferences(#[from] PreferenceError),

    #[error("Could not read recipe selection: {0}")]
    Selection(#[from] SelectionError),

    #[error(transparent)]
    Servings(#[from] ServingsError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Conversation ended without a result after {turns} turns")]
    ConversationExhausted { turns: usize },
}

pub type Result<T> = std::result::Result<T, PlannerError>;
