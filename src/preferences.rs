use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::api_connection::strip_code_fences;
use crate::recipe_search::RecipeQuery;

const DEFAULT_QUERY: &str = "healthy";
const MEAL_TYPE: &str = "Dinner";
const DISH_TYPE: &str = "Main course";

#[derive(Debug, Error)]
pub enum PreferenceError {
    #[error("no JSON object found in model output")]
    NoJsonObject,

    #[error("invalid preferences JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("preferences are incomplete (need meals, cooking days and servings)")]
    Incomplete,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub meal_count: u32,
    #[serde(default, deserialize_with = "restrictions_from_list_or_text")]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub cuisine_preferences: Vec<String>,
    #[serde(default)]
    pub cooking_days: Vec<String>,
    #[serde(default = "default_servings_per_meal")]
    pub servings_per_meal: u32,
}

fn default_servings_per_meal() -> u32 {
    1
}

/// The model sometimes answers `"none"` instead of `[]`.
fn restrictions_from_list_or_text<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrText {
        List(Vec<String>),
        Text(String),
        Nothing(()),
    }

    Ok(match ListOrText::deserialize(deserializer)? {
        ListOrText::List(items) => items,
        ListOrText::Text(text) => {
            let lowered = text.trim().to_lowercase();
            if lowered.is_empty() || lowered == "none" || lowered == "no restrictions" {
                Vec::new()
            } else {
                vec![text]
            }
        }
        ListOrText::Nothing(()) => Vec::new(),
    })
}

impl UserPreferences {
    pub fn is_complete(&self) -> bool {
        self.meal_count > 0 && !self.cooking_days.is_empty() && self.servings_per_meal > 0
    }

    pub fn target_servings(&self) -> u32 {
        self.meal_count.saturating_mul(self.servings_per_meal)
    }

    /// First two cuisines, or a generic query when none were given.
    pub fn search_query(&self) -> String {
        let query = self
            .cuisine_preferences
            .iter()
            .take(2)
            .map(String::as_str)
            .collect::<Vec<_>>()
            .join(" ");
        if query.trim().is_empty() {
            DEFAULT_QUERY.to_string()
        } else {
            query
        }
    }

    /// Restrictions as catalog health labels: "Gluten Free" -> "gluten-free".
    pub fn health_labels(&self) -> Vec<String> {
        self.dietary_restrictions
            .iter()
            .map(|r| r.split_whitespace().collect::<Vec<_>>().join("-").to_lowercase())
            .filter(|label| !label.is_empty())
            .collect()
    }

    /// Dinner main courses matching these preferences.
    pub fn recipe_query(&self, max_results: usize) -> RecipeQuery {
        RecipeQuery {
            query: self.search_query(),
            diet: self.health_labels(),
            cuisine_type: self.cuisine_preferences.clone(),
            meal_type: vec![MEAL_TYPE.to_string()],
            dish_type: vec![DISH_TYPE.to_string()],
            max_results,
        }
    }
}

/// Pulls the outermost `{ ... }` out of a model reply and reads it as preferences.
pub fn extract_preferences(text: &str) -> Result<UserPreferences, PreferenceError> {
    let content = strip_code_fences(text);
    let (start, end) = match (content.find('{'), content.rfind('}')) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => return Err(PreferenceError::NoJsonObject),
    };

    let preferences: UserPreferences = serde_json::from_str(&content[start..=end])?;
    if !preferences.is_complete() {
        return Err(PreferenceError::Incomplete);
    }
    Ok(preferences)
}
