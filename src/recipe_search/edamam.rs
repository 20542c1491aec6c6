use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::Deserialize;
use tracing::{debug, info, warn};

use super::{RecipeApiError, RecipeQuery, RecipeSource};
use crate::config::Settings;
use crate::recipe::{Ingredient, RawQuantity, Recipe};

const USER_HEADER: &str = "Edamam-Account-User";
const RECIPE_URI_PREFIX: &str = "http://www.edamam.com/ontologies/edamam.owl#recipe_";
const UNIT_PLACEHOLDER: &str = "<unit>"; // Edamam's marker for "no measure"

// --- Wire types ---

#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub hits: Vec<Hit>,
}

#[derive(Debug, Deserialize)]
pub struct Hit {
    pub recipe: EdamamRecipe,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdamamRecipe {
    pub uri: String,
    pub label: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub cuisine_type: Vec<String>,
    #[serde(default)]
    pub diet_labels: Vec<String>,
    #[serde(default)]
    pub health_labels: Vec<String>,
    #[serde(default)]
    pub ingredients: Vec<EdamamIngredient>,
    #[serde(rename = "yield", default)]
    pub recipe_yield: f64,
    #[serde(default)]
    pub total_time: Option<f64>,
    #[serde(default)]
    pub calories: Option<f64>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EdamamIngredient {
    pub food: String,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub quantity: Option<RawQuantity>,
    #[serde(default)]
    pub measure: Option<String>,
    #[serde(default)]
    pub food_category: Option<String>,
}

fn recipe_id_from_uri(uri: &str) -> String {
    let fragment = uri.rsplit('#').next().unwrap_or(uri);
    fragment.strip_prefix("recipe_").unwrap_or(fragment).to_string()
}

impl From<EdamamIngredient> for Ingredient {
    fn from(ing: EdamamIngredient) -> Self {
        // No quantity: fall back to the recipe line, e.g. "salt to taste".
        let quantity = ing
            .quantity
            .unwrap_or_else(|| RawQuantity::Text(ing.text.unwrap_or_default()));
        Ingredient {
            food: ing.food,
            quantity,
            measure: ing.measure.filter(|m| m != UNIT_PLACEHOLDER),
            food_category: ing.food_category,
        }
    }
}

impl From<EdamamRecipe> for Recipe {
    fn from(recipe: EdamamRecipe) -> Self {
        Recipe {
            id: recipe_id_from_uri(&recipe.uri),
            name: recipe.label,
            url: recipe.url,
            image: recipe.image,
            cuisine_type: recipe.cuisine_type,
            diet_labels: recipe.diet_labels,
            health_labels: recipe.health_labels,
            ingredients: recipe.ingredients.into_iter().map(Ingredient::from).collect(),
            servings: recipe.recipe_yield.max(0.0).round() as u32,
            // 0 means "unknown" in Edamam's data
            total_time: recipe
                .total_time
                .filter(|t| *t > 0.0)
                .map(|t| t.round() as u32),
            calories: recipe.calories,
        }
    }
}

// --- Client ---

#[derive(Debug, Clone)]
pub struct EdamamClient {
    client: Client,
    base_url: String,
    app_id: String,
    app_key: String,
    user_id: String,
}

impl EdamamClient {
    pub fn new(settings: &Settings) -> Self {
        Self {
            client: Client::new(),
            base_url: settings.edamam_base_url.trim_end_matches('/').to_string(),
            app_id: settings.edamam_app_id.clone(),
            app_key: settings.edamam_app_key.clone(),
            user_id: settings.edamam_user_id.clone(),
        }
    }

    fn auth_params(&self) -> Vec<(&'static str, String)> {
        vec![
            ("type", "public".to_string()),
            ("app_id", self.app_id.clone()),
            ("app_key", self.app_key.clone()),
        ]
    }

    pub fn search_params(&self, query: &RecipeQuery) -> Vec<(&'static str, String)> {
        let mut params = self.auth_params();
        params.push(("q", query.query.clone()));
        params.extend(query.diet.iter().map(|d| ("health", d.clone())));
        params.extend(query.cuisine_type.iter().map(|c| ("cuisineType", c.clone())));
        params.extend(query.meal_type.iter().map(|m| ("mealType", m.clone())));
        params.extend(query.dish_type.iter().map(|d| ("dishType", d.clone())));
        params
    }

    async fn fetch(&self, url: &str, params: &[(&'static str, String)]) -> Result<reqwest::Response, RecipeApiError> {
        let response = self
            .client
            .get(url)
            .query(params)
            .header(USER_HEADER, &self.user_id)
            .send()
            .await?;
        Ok(response)
    }

    async fn read_error(response: reqwest::Response) -> RecipeApiError {
        let status = response.status();
        let body = response
            .text()
            .await
            .unwrap_or_else(|_| "Failed to read error body".to_string());
        warn!(%status, %body, "Recipe API request failed");
        RecipeApiError::Api { status, body }
    }

    /// Looks a single recipe up by the id returned from a search.
    pub async fn get_recipe_by_id(&self, recipe_id: &str) -> Result<Option<Recipe>, RecipeApiError> {
        let mut params = self.auth_params();
        params.push(("uri", format!("{}{}", RECIPE_URI_PREFIX, recipe_id)));

        let url = format!("{}/by-uri", self.base_url);
        let response = self.fetch(&url, &params).await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let body: SearchResponse = response.json().await?;
        Ok(body.hits.into_iter().next().map(|hit| Recipe::from(hit.recipe)))
    }
}

/// Converts search hits, skipping recipes without a usable yield since they
/// cannot be scaled.
pub fn recipes_from_response(body: SearchResponse, max_results: usize) -> Vec<Recipe> {
    body.hits
        .into_iter()
        .map(|hit| Recipe::from(hit.recipe))
        .filter(|recipe| {
            if recipe.servings == 0 {
                debug!(recipe = %recipe.name, "Skipping recipe without a yield");
            }
            recipe.servings > 0
        })
        .take(max_results)
        .collect()
}

#[async_trait]
impl RecipeSource for EdamamClient {
    async fn search_recipes(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, RecipeApiError> {
        info!(query = %query.query, diet = ?query.diet, cuisine = ?query.cuisine_type, "Searching recipes");
        let response = self.fetch(&self.base_url, &self.search_params(query)).await?;

        if !response.status().is_success() {
            return Err(Self::read_error(response).await);
        }

        let text = response.text().await?;
        let body: SearchResponse = serde_json::from_str(&text)
            .map_err(|e| RecipeApiError::MalformedResponse(e.to_string()))?;
        let recipes = recipes_from_response(body, query.max_results);
        debug!(found = recipes.len(), "Recipe search complete");
        Ok(recipes)
    }
}
