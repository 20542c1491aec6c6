pub mod channel;
pub mod presentation;
pub mod prompts;
pub mod selection;

use tracing::{debug, info, warn};

use crate::api_connection::{ChatCompletion, ChatMessage};
use crate::config::Settings;
use crate::error::{PlannerError, Result};
use crate::preferences::{extract_preferences, UserPreferences};
use crate::recipe::Recipe;
use crate::recipe_search::RecipeSource;
use crate::shopping::{ConsolidatedItem, ShoppingList};

pub use channel::{StdioChannel, UserChannel};
pub use presentation::{RecipeOptions, ShoppingListView};
pub use selection::{parse_selection, Selection, SelectionError};

use prompts::*;

const CONVERSATION_TEMPERATURE: f32 = 0.7;
const EXTRACTION_TEMPERATURE: f32 = 0.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AgentOptions {
    pub max_results: usize,
    /// Upper bound on user turns in each conversation phase.
    pub max_turns: usize,
}

impl Default for AgentOptions {
    fn default() -> Self {
        Self {
            max_results: 10,
            max_turns: 20,
        }
    }
}

impl From<&Settings> for AgentOptions {
    fn from(settings: &Settings) -> Self {
        Self {
            max_results: settings.max_results,
            max_turns: settings.max_turns,
        }
    }
}

/// Outcome of one planning session.
#[derive(Debug, Clone)]
pub struct MealPlan {
    pub preferences: UserPreferences,
    pub recipes: Vec<Recipe>,
    pub multipliers: Vec<f64>, // parallel to `recipes`
    pub shopping_list: Vec<ConsolidatedItem>,
}

impl MealPlan {
    /// Servings the shopping list buys for, after scaling.
    pub fn total_servings(&self) -> f64 {
        self.recipes
            .iter()
            .zip(&self.multipliers)
            .map(|(recipe, multiplier)| f64::from(recipe.servings) * multiplier)
            .sum()
    }
}

/// Walks the user from preferences to a scaled, consolidated shopping list.
pub struct MealPlannerAgent<C, R, U> {
    chat: C,
    recipes: R,
    user: U,
    shopping_list: ShoppingList,
    options: AgentOptions,
}

impl<C, R, U> MealPlannerAgent<C, R, U>
where
    C: ChatCompletion,
    R: RecipeSource,
    U: UserChannel,
{
    pub fn new(chat: C, recipes: R, user: U, options: AgentOptions) -> Self {
        Self {
            chat,
            recipes,
            user,
            shopping_list: ShoppingList::new(),
            options,
        }
    }

    pub fn user(&self) -> &U {
        &self.user
    }

    pub fn shopping_list(&self) -> &ShoppingList {
        &self.shopping_list
    }

    pub async fn run(&mut self) -> Result<MealPlan> {
        self.user.say("\nCollecting your preferences...").await?;
        let preferences = self.collect_user_preferences().await?;

        self.user
            .say("\nSearching for recipes that match your preferences...")
            .await?;
        let found = self.search_recipes(&preferences).await?;

        self.user.say("\nFinding the best recipe matches...").await?;
        let recipes = self.select_recipes(&preferences, &found).await?;

        self.user.say("\nGenerating your shopping list...").await?;
        let (multipliers, shopping_list) =
            self.generate_shopping_list(&recipes, preferences.target_servings())?;

        Ok(MealPlan {
            preferences,
            recipes,
            multipliers,
            shopping_list,
        })
    }

    /// Chats until the assistant announces the recipe search, then has the
    /// model turn the conversation into structured preferences.
    pub async fn collect_user_preferences(&mut self) -> Result<UserPreferences> {
        let mut messages = vec![
            ChatMessage::system(PREFERENCES_SYSTEM_PROMPT),
            ChatMessage::user(OPENING_USER_MESSAGE),
        ];

        for turn in 0..self.options.max_turns {
            let reply = self
                .chat
                .complete(messages.clone(), CONVERSATION_TEMPERATURE)
                .await?;
            self.user.say(&format!("\nAssistant: {}", reply)).await?;

            if reply.to_lowercase().contains(TRANSITION_PHRASE) {
                debug!(turn, "Assistant moved on to recipe search");
                return self.extract_from_conversation(&messages).await;
            }
            messages.push(ChatMessage::assistant(reply));

            let answer = self.user.ask().await?;
            let confirmed = is_confirmation(&answer);
            messages.push(ChatMessage::user(answer));
            if confirmed {
                messages.push(ChatMessage::system(CONFIRMATION_NUDGE));
            }
        }

        warn!(turns = self.options.max_turns, "Preference conversation did not finish");
        Err(PlannerError::ConversationExhausted {
            turns: self.options.max_turns,
        })
    }

    async fn extract_from_conversation(&mut self, messages: &[ChatMessage]) -> Result<UserPreferences> {
        let request = vec![
            ChatMessage::system(PREFERENCES_EXTRACTION_PROMPT),
            ChatMessage::user(render_transcript(messages)),
        ];
        let reply = self.chat.complete(request, EXTRACTION_TEMPERATURE).await?;

        match extract_preferences(&reply) {
            Ok(preferences) => {
                info!(
                    meals = preferences.meal_count,
                    servings = preferences.servings_per_meal,
                    days = ?preferences.cooking_days,
                    "Collected preferences"
                );
                Ok(preferences)
            }
            Err(e) => {
                warn!(error = %e, reply = %reply, "Could not extract preferences");
                self.user.say(PREFERENCES_RETRY_MESSAGE).await?;
                Err(e.into())
            }
        }
    }

    pub async fn search_recipes(&self, preferences: &UserPreferences) -> Result<Vec<Recipe>> {
        let query = preferences.recipe_query(self.options.max_results);
        let recipes = self.recipes.search_recipes(&query).await?;
        info!(count = recipes.len(), "Recipe search finished");
        Ok(recipes)
    }

    /// Lets the user pick from `recipes` until the picks cover the target
    /// servings, or every recipe is picked.
    pub async fn select_recipes(
        &mut self,
        preferences: &UserPreferences,
        recipes: &[Recipe],
    ) -> Result<Vec<Recipe>> {
        if recipes.is_empty() {
            self.user.say(&format!("\n{}", NO_RECIPES_MESSAGE)).await?;
            return Ok(Vec::new());
        }
        self.user.say(&format!("\n{}", RecipeOptions(recipes))).await?;

        let needed = preferences.target_servings();
        let mut selection = Selection::default();
        let mut prompt = format!(
            "I see you need {} meals with {} servings each, for a total of {} servings.\n\
             Please tell me which recipes you'd like to select by their numbers (1-{}).\n\
             You can list multiple numbers separated by commas.",
            preferences.meal_count,
            preferences.servings_per_meal,
            needed,
            recipes.len()
        );

        for _ in 0..self.options.max_turns {
            self.user.say(&format!("\nAssistant: {}", prompt)).await?;
            let answer = self.user.ask().await?;

            let request = vec![
                ChatMessage::system(SELECTION_EXTRACTION_PROMPT),
                ChatMessage::user(answer),
            ];
            let reply = self.chat.complete(request, EXTRACTION_TEMPERATURE).await?;

            let indices = match parse_selection(&reply, recipes.len()) {
                Ok(indices) => indices,
                Err(e) => {
                    warn!(error = %e, "Could not parse recipe selection");
                    prompt = format!(
                        "I didn't understand that selection. Please enter recipe numbers (1-{}) separated by commas.",
                        recipes.len()
                    );
                    continue;
                }
            };

            selection.extend(indices);
            let total = selection.total_servings(recipes);
            debug!(picked = selection.len(), total, needed, "Selection updated");

            if total >= needed {
                self.user
                    .say(&format!(
                        "\nAssistant: Great! You've selected enough recipes to provide {} servings, \
                         which meets your need for {} servings.",
                        total, needed
                    ))
                    .await?;
                return Ok(selection.into_recipes(recipes));
            }
            if selection.len() == recipes.len() {
                self.user
                    .say(&format!(
                        "\nAssistant: You've selected every recipe ({} servings). \
                         I'll scale the quantities up to {} servings.",
                        total, needed
                    ))
                    .await?;
                return Ok(selection.into_recipes(recipes));
            }

            prompt = format!(
                "You've selected {} recipes providing {} servings.\n\
                 You still need {} more servings to meet your goal.\n\
                 Please select additional recipes.",
                selection.len(),
                total,
                selection.remaining(recipes, needed)
            );
        }

        warn!(turns = self.options.max_turns, "Recipe selection did not finish");
        Err(PlannerError::ConversationExhausted {
            turns: self.options.max_turns,
        })
    }

    /// Rebuilds the session's list from `recipes` scaled to `target_servings`.
    pub fn generate_shopping_list(
        &mut self,
        recipes: &[Recipe],
        target_servings: u32,
    ) -> Result<(Vec<f64>, Vec<ConsolidatedItem>)> {
        let multipliers = self.shopping_list.rebuild_from(recipes, target_servings)?;
        let items = self.shopping_list.consolidated_list();
        info!(recipes = recipes.len(), items = items.len(), "Shopping list ready");
        Ok((multipliers, items))
    }
}

fn is_confirmation(answer: &str) -> bool {
    let answer = answer.to_lowercase();
    CONFIRMATION_WORDS.iter().any(|word| answer.contains(word))
}

/// The user/assistant exchange as plain text; system turns are left out.
fn render_transcript(messages: &[ChatMessage]) -> String {
    messages
        .iter()
        .filter(|m| m.role != "system")
        .map(|m| format!("{}: {}", m.role, m.content))
        .collect::<Vec<_>>()
        .join("\n")
}
