use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::recipe::Recipe;

#[derive(Parser, Debug)]
#[command(author, version, about = "Plan a week of dinners and build one shopping list", long_about = None)]
pub struct Cli {
    /// Log verbosity (error, warn, info, debug, trace). RUST_LOG takes precedence.
    #[arg(long, global = true, default_value = "warn")]
    pub log_level: String,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Command {
    /// Chat through preferences and recipe picks (the default)
    Plan {
        /// Overrides MODEL_NAME
        #[arg(long)]
        model: Option<String>,

        /// Overrides MEAL_PLANNER_MAX_RESULTS
        #[arg(long)]
        max_results: Option<usize>,
    },
    /// Build a shopping list from a JSON file of recipes, no chat involved
    List {
        /// Path to a JSON array of recipes
        #[arg(short, long)]
        recipes: PathBuf,

        /// Total servings to shop for
        #[arg(short, long)]
        servings: u32,
    },
}

pub fn parse_args() -> Cli {
    Cli::parse()
}

pub async fn load_recipes_file(path: &Path) -> Result<Vec<Recipe>> {
    let content = tokio::fs::read_to_string(path)
        .await
        .with_context(|| format!("Failed to read recipes file '{}'", path.display()))?;
    let recipes: Vec<Recipe> = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse recipes in '{}'", path.display()))?;
    Ok(recipes)
}
