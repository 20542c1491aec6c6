use std::env;

use thiserror::Error;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const EDAMAM_APP_ID: &str = "EDAMAM_APP_ID";
pub const EDAMAM_APP_KEY: &str = "EDAMAM_APP_KEY";
pub const EDAMAM_USER_ID: &str = "EDAMAM_USER_ID";
pub const EDAMAM_BASE_URL: &str = "EDAMAM_BASE_URL";
pub const OPENAI_BASE_URL: &str = "OPENAI_BASE_URL";
pub const MODEL_NAME: &str = "MODEL_NAME";
pub const MAX_RESULTS: &str = "MEAL_PLANNER_MAX_RESULTS";
pub const MAX_TURNS: &str = "MEAL_PLANNER_MAX_TURNS";

pub const DEFAULT_EDAMAM_BASE_URL: &str = "https://api.edamam.com/api/recipes/v2";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL_NAME: &str = "gpt-4-turbo-preview";
pub const DEFAULT_MAX_RESULTS: usize = 10;
pub const DEFAULT_MAX_TURNS: usize = 20;

#[derive(Debug, Error, PartialEq)]
pub enum ConfigError {
    #[error("Missing required environment variables: {}", .0.join(", "))]
    MissingVariables(Vec<String>),

    #[error("Invalid value for {key}: '{value}'")]
    InvalidValue { key: String, value: String },
}

#[derive(Debug, Clone)]
pub struct Settings {
    pub openai_api_key: String,
    pub openai_base_url: String,
    pub model_name: String,
    pub edamam_app_id: String,
    pub edamam_app_key: String,
    pub edamam_user_id: String,
    pub edamam_base_url: String,
    pub max_results: usize,
    pub max_turns: usize, // per conversation phase
}

fn parse_count(key: &str, raw: Option<String>, default: usize) -> Result<usize, ConfigError> {
    match raw {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse::<usize>();
            match parsed {
                Ok(n) if n > 0 => Ok(n),
                _ => Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value,
                }),
            }
        }
    }
}

impl Settings {
    /// Loads `.env` (if any) and reads the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds settings from an arbitrary key lookup. Missing optional keys fall back to defaults.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let get = |key: &str| lookup(key).unwrap_or_default();
        let get_or = |key: &str, default: &str| {
            lookup(key)
                .filter(|v| !v.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Ok(Self {
            openai_api_key: get(OPENAI_API_KEY),
            openai_base_url: get_or(OPENAI_BASE_URL, DEFAULT_OPENAI_BASE_URL),
            model_name: get_or(MODEL_NAME, DEFAULT_MODEL_NAME),
            edamam_app_id: get(EDAMAM_APP_ID),
            edamam_app_key: get(EDAMAM_APP_KEY),
            edamam_user_id: get(EDAMAM_USER_ID),
            edamam_base_url: get_or(EDAMAM_BASE_URL, DEFAULT_EDAMAM_BASE_URL),
            max_results: parse_count(MAX_RESULTS, lookup(MAX_RESULTS), DEFAULT_MAX_RESULTS)?,
            max_turns: parse_count(MAX_TURNS, lookup(MAX_TURNS), DEFAULT_MAX_TURNS)?,
        })
    }

    /// Reports every missing credential at once.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let missing: Vec<String> = [
            (OPENAI_API_KEY, &self.openai_api_key),
            (EDAMAM_APP_ID, &self.edamam_app_id),
            (EDAMAM_APP_KEY, &self.edamam_app_key),
            (EDAMAM_USER_ID, &self.edamam_user_id),
        ]
        .iter()
        .filter(|(_, value)| value.trim().is_empty())
        .map(|(key, _)| key.to_string())
        .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::MissingVariables(missing))
        }
    }
}
