// Prompt text for the planning conversation.

pub const PREFERENCES_SYSTEM_PROMPT: &str = "You are a friendly meal planning assistant.
Gather the following from the user, conversationally but without wasting their time:
1. How many meals they need this week
2. Cuisines they enjoy (Italian, Mexican, Asian, ...)
3. Dietary restrictions (vegetarian, vegan, gluten-free, ...)
4. Which days they can cook
5. How many servings each meal should make

Once everything is known, summarise it and ask the user to confirm.
After the user confirms, do not print JSON and do not ask anything else.
Reply only with: \"Great! Let me search for recipes that match your preferences...\"";

pub const OPENING_USER_MESSAGE: &str = "I need help planning my meals for the week.";

/// The assistant says this once preferences are confirmed.
pub const TRANSITION_PHRASE: &str = "search for recipes";

pub const CONFIRMATION_NUDGE: &str =
    "The user has confirmed. Respond ONLY with: 'Great! Let me search for recipes that match your preferences...'";

pub const CONFIRMATION_WORDS: &[&str] = &["yes", "correct", "looks good"];

pub const PREFERENCES_EXTRACTION_PROMPT: &str = "You extract structured data from conversations.
Read the meal planning conversation and answer with exactly this JSON object:
{
    \"meal_count\": <integer>,
    \"dietary_restrictions\": [<string>, ...],
    \"cuisine_preferences\": [<string>, ...],
    \"cooking_days\": [<string>, ...],
    \"servings_per_meal\": <integer>
}
meal_count and servings_per_meal are integers. Every list is present, empty ([]) when
the user has no preference; \"none\" or \"no restrictions\" means an empty list.
Use these field names exactly and output nothing besides the JSON.";

pub const SELECTION_EXTRACTION_PROMPT: &str = "Extract the recipe numbers the user chose.
Answer with a JSON array of integers and nothing else.
Example: \"I'll take recipes 1, 3, and 5\" -> [1, 3, 5]";

pub const PREFERENCES_RETRY_MESSAGE: &str =
    "I apologize, but I couldn't properly capture all your preferences.";

pub const NO_RECIPES_MESSAGE: &str =
    "No recipes found matching your criteria. Please try again with different preferences.";
