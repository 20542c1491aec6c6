pub mod edamam;

use async_trait::async_trait;
use thiserror::Error;

use crate::recipe::Recipe;

pub use edamam::EdamamClient;

#[derive(Debug, Error)]
pub enum RecipeApiError {
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Recipe API error {status}: {body}")]
    Api {
        status: reqwest::StatusCode,
        body: String,
    },

    #[error("Malformed recipe API response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct RecipeQuery {
    pub query: String,
    pub diet: Vec<String>,
    pub cuisine_type: Vec<String>,
    pub meal_type: Vec<String>,
    pub dish_type: Vec<String>,
    pub max_results: usize,
}

/// A searchable recipe catalog.
#[async_trait]
pub trait RecipeSource: Send + Sync {
    async fn search_recipes(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, RecipeApiError>;
}
