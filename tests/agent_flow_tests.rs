use std::collections::VecDeque;
use std::io;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use meal_planner::agent::prompts::{CONFIRMATION_NUDGE, NO_RECIPES_MESSAGE, PREFERENCES_RETRY_MESSAGE};
use meal_planner::agent::{AgentOptions, MealPlannerAgent, UserChannel};
use meal_planner::api_connection::{ApiConnectionError, ChatCompletion, ChatMessage};
use meal_planner::error::PlannerError;
use meal_planner::recipe::{Ingredient, Recipe};
use meal_planner::recipe_search::{RecipeApiError, RecipeQuery, RecipeSource};

type Requests = Arc<Mutex<Vec<(Vec<ChatMessage>, f32)>>>;

/// Answers chat calls from a fixed script and records every request.
struct ScriptedChat {
    replies: Mutex<VecDeque<String>>,
    requests: Requests,
}

impl ScriptedChat {
    fn new(replies: &[&str]) -> (Self, Requests) {
        let requests = Requests::default();
        let chat = Self {
            replies: Mutex::new(replies.iter().map(|r| r.to_string()).collect()),
            requests: requests.clone(),
        };
        (chat, requests)
    }
}

#[async_trait]
impl ChatCompletion for ScriptedChat {
    async fn complete(
        &self,
        messages: Vec<ChatMessage>,
        temperature: f32,
    ) -> Result<String, ApiConnectionError> {
        self.requests.lock().unwrap().push((messages, temperature));
        self.replies
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(ApiConnectionError::EmptyResponse)
    }
}

struct FixedCatalog {
    recipes: Vec<Recipe>,
    queries: Arc<Mutex<Vec<RecipeQuery>>>,
}

impl FixedCatalog {
    fn new(recipes: Vec<Recipe>) -> (Self, Arc<Mutex<Vec<RecipeQuery>>>) {
        let queries = Arc::new(Mutex::new(Vec::new()));
        let catalog = Self {
            recipes,
            queries: queries.clone(),
        };
        (catalog, queries)
    }
}

#[async_trait]
impl RecipeSource for FixedCatalog {
    async fn search_recipes(&self, query: &RecipeQuery) -> Result<Vec<Recipe>, RecipeApiError> {
        self.queries.lock().unwrap().push(query.clone());
        Ok(self.recipes.iter().take(query.max_results).cloned().collect())
    }
}

#[derive(Default)]
struct ScriptedUser {
    answers: VecDeque<String>,
    said: Vec<String>,
}

impl ScriptedUser {
    fn new(answers: &[&str]) -> Self {
        Self {
            answers: answers.iter().map(|a| a.to_string()).collect(),
            said: Vec::new(),
        }
    }

    fn heard(&self, text: &str) -> bool {
        self.said.iter().any(|line| line.contains(text))
    }
}

#[async_trait]
impl UserChannel for ScriptedUser {
    async fn say(&mut self, message: &str) -> io::Result<()> {
        self.said.push(message.to_string());
        Ok(())
    }

    async fn ask(&mut self) -> io::Result<String> {
        self.answers
            .pop_front()
            .ok_or_else(|| io::Error::new(io::ErrorKind::UnexpectedEof, "script finished"))
    }
}

const PREFERENCES_JSON: &str = r#"```json
{"meal_count": 2, "dietary_restrictions": "none", "cuisine_preferences": ["Italian"],
 "cooking_days": ["Monday", "Wednesday"], "servings_per_meal": 4}
```"#;

fn catalog() -> Vec<Recipe> {
    vec![
        Recipe::new(
            "lasagna",
            "Lasagna",
            4,
            vec![
                Ingredient::new("pasta", 250.0, Some("g")).with_category("Grains"),
                Ingredient::new("tomato", 2.0, None).with_category("Produce"),
                Ingredient::new("onion", 1.0, None).with_category("Produce"),
            ],
        ),
        Recipe::new("risotto", "Risotto", 2, vec![Ingredient::new("arborio", 1.0, Some("cup"))]),
        Recipe::new(
            "curry",
            "Curry",
            4,
            vec![
                Ingredient::new("onion", 2.0, None).with_category("Produce"),
                Ingredient::new("rice", 1.0, Some("cup")).with_category("Grains"),
            ],
        ),
    ]
}

fn options(max_turns: usize) -> AgentOptions {
    AgentOptions {
        max_results: 10,
        max_turns,
    }
}

#[tokio::test]
async fn test_full_planning_session() {
    let (chat, requests) = ScriptedChat::new(&[
        "Hi! How many dinners do you need this week?",
        "So: 2 meals, Italian, Monday and Wednesday, 4 servings each. Is that correct?",
        "Great! Let me search for recipes that match your preferences...",
        PREFERENCES_JSON,
        "[1]",
        "I cannot tell",
        "[3]",
    ]);
    let (recipes, queries) = FixedCatalog::new(catalog());
    let user = ScriptedUser::new(&[
        "2 meals, Italian, Monday and Wednesday, 4 servings each",
        "Yes",
        "the first one please",
        "hmm",
        "and the curry",
    ]);

    let mut agent = MealPlannerAgent::new(chat, recipes, user, options(10));
    let plan = agent.run().await.unwrap();

    assert_eq!(plan.preferences.meal_count, 2);
    assert!(plan.preferences.dietary_restrictions.is_empty());
    let names: Vec<&str> = plan.recipes.iter().map(|r| r.name.as_str()).collect();
    assert_eq!(names, vec!["Lasagna", "Curry"]);
    assert_eq!(plan.multipliers, vec![1.0, 1.0]);

    let lines: Vec<String> = plan
        .shopping_list
        .iter()
        .map(|item| format!("{}/{}", item.category, item))
        .collect();
    assert_eq!(
        lines,
        vec![
            "Grains/250 g Pasta",
            "Grains/1 cup Rice",
            "Produce/3 unit Onion",
            "Produce/2 unit Tomato",
        ]
    );
    assert_eq!(agent.shopping_list().len(), 4);

    let queries = queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].query, "Italian");
    assert!(queries[0].diet.is_empty());
    assert_eq!(queries[0].meal_type, vec!["Dinner"]);

    let requests = requests.lock().unwrap();
    assert_eq!(requests.len(), 7);
    let (third_turn, _) = &requests[2];
    assert_eq!(third_turn.last().map(|m| m.content.as_str()), Some(CONFIRMATION_NUDGE));
    let (extraction, temperature) = &requests[3];
    assert_eq!(*temperature, 0.0);
    assert!(extraction[1].content.contains("user: 2 meals, Italian"));

    let user = agent.user();
    assert!(user.heard("1. Lasagna (Makes 4 servings)"));
    assert!(user.heard("I didn't understand that selection. Please enter recipe numbers (1-3)"));
    assert!(user.heard("You still need 4 more servings"));

    let rendered = plan.to_string();
    assert!(rendered.contains("Monday:\n  • Lasagna"));
    assert!(rendered.contains("Wednesday:\n  • Curry"));
    assert!(rendered.contains("• Total servings: 8"));
}

#[tokio::test]
async fn test_selecting_everything_scales_up() {
    let (chat, _) = ScriptedChat::new(&[
        "Great! Let me search for recipes that match your preferences...",
        r#"{"meal_count": 3, "cooking_days": ["Monday"], "servings_per_meal": 4}"#,
        "[1, 2]",
    ]);
    let (recipes, _) = FixedCatalog::new(catalog().into_iter().take(2).collect());
    let user = ScriptedUser::new(&["both"]);

    let mut agent = MealPlannerAgent::new(chat, recipes, user, options(5));
    let plan = agent.run().await.unwrap();

    assert_eq!(plan.multipliers, vec![2.0, 2.0]);
    assert!(agent.user().heard("You've selected every recipe (6 servings)"));
    assert!(plan.to_string().contains("Unscheduled:\n  • Risotto"));
}

#[tokio::test]
async fn test_preference_conversation_is_bounded() {
    let (chat, _) = ScriptedChat::new(&["Tell me more.", "And then?"]);
    let (recipes, queries) = FixedCatalog::new(catalog());
    let user = ScriptedUser::new(&["hmm", "well"]);

    let mut agent = MealPlannerAgent::new(chat, recipes, user, options(2));
    let result = agent.run().await;

    assert!(matches!(result, Err(PlannerError::ConversationExhausted { turns: 2 })));
    assert!(queries.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_unreadable_preferences_reported() {
    let (chat, _) = ScriptedChat::new(&[
        "Great! Let me search for recipes that match your preferences...",
        "I could not find anything useful.",
    ]);
    let (recipes, _) = FixedCatalog::new(catalog());

    let mut agent = MealPlannerAgent::new(chat, recipes, ScriptedUser::default(), options(5));
    let result = agent.run().await;

    assert!(matches!(result, Err(PlannerError::Preferences(_))));
    assert!(agent.user().heard(PREFERENCES_RETRY_MESSAGE));
}

#[tokio::test]
async fn test_no_recipes_gives_empty_plan() {
    let (chat, requests) = ScriptedChat::new(&[
        "Great! Let me search for recipes that match your preferences...",
        PREFERENCES_JSON,
    ]);
    let (recipes, _) = FixedCatalog::new(Vec::new());

    let mut agent = MealPlannerAgent::new(chat, recipes, ScriptedUser::default(), options(5));
    let plan = agent.run().await.unwrap();

    assert!(plan.recipes.is_empty());
    assert!(plan.shopping_list.is_empty());
    assert!(agent.user().heard(NO_RECIPES_MESSAGE));
    assert_eq!(requests.lock().unwrap().len(), 2);
    assert!(plan.to_string().contains("Monday:\n  • No recipe planned"));
}

#[tokio::test]
async fn test_chat_failure_propagates() {
    let (chat, _) = ScriptedChat::new(&[]);
    let (recipes, _) = FixedCatalog::new(catalog());

    let mut agent = MealPlannerAgent::new(chat, recipes, ScriptedUser::default(), options(5));
    let result = agent.run().await;

    assert!(matches!(
        result,
        Err(PlannerError::Chat(ApiConnectionError::EmptyResponse))
    ));
}
