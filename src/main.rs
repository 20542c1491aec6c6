use anyhow::{Context, Result};
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use meal_planner::agent::{AgentOptions, MealPlannerAgent, ShoppingListView, StdioChannel};
use meal_planner::api_connection::Provider;
use meal_planner::cli::{load_recipes_file, parse_args, Command};
use meal_planner::config::Settings;
use meal_planner::recipe_search::EdamamClient;
use meal_planner::shopping::{format_quantity, ShoppingList};

fn init_logging(level: &str) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run_planner(model: Option<String>, max_results: Option<usize>) -> Result<()> {
    let mut settings = Settings::from_env().context("Failed to load settings")?;
    if let Some(model) = model {
        settings.model_name = model;
    }
    if let Some(max_results) = max_results {
        settings.max_results = max_results;
    }
    settings.validate().context("Missing required settings")?;

    let chat = Provider::openai(&settings);
    let recipes = EdamamClient::new(&settings);
    let mut agent = MealPlannerAgent::new(chat, recipes, StdioChannel::new(), AgentOptions::from(&settings));

    info!(model = %settings.model_name, "Starting planning session");
    match agent.run().await {
        Ok(plan) => {
            println!("\n{}", plan);
            Ok(())
        }
        Err(e) => {
            error!(error = %e, "Planning session failed");
            println!("An error occurred: {}", e);
            Err(e.into())
        }
    }
}

async fn run_list(recipes_path: &std::path::Path, servings: u32) -> Result<()> {
    let recipes = load_recipes_file(recipes_path).await?;
    info!(count = recipes.len(), servings, "Building shopping list from file");

    let mut list = ShoppingList::new();
    let multipliers = list
        .rebuild_from(&recipes, servings)
        .context("Failed to scale recipes")?;

    println!("Recipes:");
    for (recipe, multiplier) in recipes.iter().zip(&multipliers) {
        println!("  • {} (x{})", recipe.name, format_quantity(*multiplier));
    }
    println!("\n=== Shopping List ===\n");
    print!("{}", ShoppingListView(&list.consolidated_list()));
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenv::dotenv().ok();

    let cli_args = parse_args();
    init_logging(&cli_args.log_level);

    match cli_args.command.unwrap_or(Command::Plan {
        model: None,
        max_results: None,
    }) {
        Command::Plan { model, max_results } => run_planner(model, max_results).await,
        Command::List { recipes, servings } => run_list(&recipes, servings).await,
    }
}
