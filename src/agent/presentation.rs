use std::fmt;

use crate::agent::MealPlan;
use crate::recipe::Recipe;
use crate::shopping::{format_quantity, ConsolidatedItem};

const MAX_HEALTH_LABELS: usize = 3;

/// Numbered list of search results for the user to choose from.
pub struct RecipeOptions<'a>(pub &'a [Recipe]);

impl fmt::Display for RecipeOptions<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Here are some recipes that match your preferences:")?;
        for (i, recipe) in self.0.iter().enumerate() {
            let cooking_time = recipe
                .total_time
                .map(|t| format!(", {} minutes", t))
                .unwrap_or_default();
            writeln!(f)?;
            writeln!(
                f,
                "{}. {} (Makes {} servings){}",
                i + 1,
                recipe.name,
                recipe.servings,
                cooking_time
            )?;
            let cuisine = if recipe.cuisine_type.is_empty() {
                "Not specified".to_string()
            } else {
                recipe.cuisine_type.join(", ")
            };
            writeln!(f, "   Cuisine: {}", cuisine)?;
            writeln!(f, "   Link: {}", recipe.url)?;
        }
        Ok(())
    }
}

/// Shopping list grouped under category headings. Expects the
/// category-then-food order `ShoppingList::consolidated_list` produces.
pub struct ShoppingListView<'a>(pub &'a [ConsolidatedItem]);

impl fmt::Display for ShoppingListView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "(nothing to buy)");
        }
        let mut current: Option<&str> = None;
        for item in self.0 {
            if current != Some(item.category.as_str()) {
                if current.is_some() {
                    writeln!(f)?;
                }
                writeln!(f, "{}:", item.category)?;
                current = Some(item.category.as_str());
            }
            writeln!(f, "  • {}", item)?;
        }
        Ok(())
    }
}

fn write_recipe_details(f: &mut fmt::Formatter<'_>, recipe: &Recipe) -> fmt::Result {
    writeln!(f, "  • {}", recipe.name)?;
    writeln!(f, "    Servings: {}", recipe.servings)?;
    if let Some(time) = recipe.total_time {
        writeln!(f, "    Time: {} minutes", time)?;
    }
    if !recipe.cuisine_type.is_empty() {
        writeln!(f, "    Cuisine: {}", recipe.cuisine_type.join(", "))?;
    }
    if !recipe.diet_labels.is_empty() {
        writeln!(f, "    Diet Labels: {}", recipe.diet_labels.join(", "))?;
    }
    if !recipe.health_labels.is_empty() {
        let top: Vec<&str> = recipe
            .health_labels
            .iter()
            .take(MAX_HEALTH_LABELS)
            .map(String::as_str)
            .collect();
        writeln!(f, "    Health Labels: {}", top.join(", "))?;
    }
    if let Some(kcal) = recipe.calories_per_serving() {
        writeln!(f, "    Calories per serving: {} kcal", kcal)?;
    }
    if !recipe.url.is_empty() {
        writeln!(f, "    Recipe Link: {}", recipe.url)?;
    }
    Ok(())
}

impl fmt::Display for MealPlan {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let days = &self.preferences.cooking_days;

        writeln!(f, "=== Your Weekly Dinner Plan ===")?;
        for (i, day) in days.iter().enumerate() {
            writeln!(f)?;
            writeln!(f, "{}:", day)?;
            match self.recipes.get(i) {
                Some(recipe) => write_recipe_details(f, recipe)?,
                None => writeln!(f, "  • No recipe planned")?,
            }
        }

        let unscheduled = self.recipes.iter().skip(days.len()).collect::<Vec<_>>();
        if !unscheduled.is_empty() {
            writeln!(f)?;
            writeln!(f, "Unscheduled:")?;
            for recipe in unscheduled {
                write_recipe_details(f, recipe)?;
            }
        }

        writeln!(f)?;
        writeln!(f, "=== Shopping List ===")?;
        writeln!(f)?;
        write!(f, "{}", ShoppingListView(&self.shopping_list))?;

        writeln!(f)?;
        writeln!(f, "Summary:")?;
        writeln!(f, "• Planned dinners: {}", self.recipes.len())?;
        writeln!(f, "• Cooking days: {}", days.join(", "))?;
        if !self.preferences.dietary_restrictions.is_empty() {
            writeln!(
                f,
                "• Dietary restrictions: {}",
                self.preferences.dietary_restrictions.join(", ")
            )?;
        }
        writeln!(f, "• Total servings: {}", format_quantity(self.total_servings()))?;
        writeln!(f)?;
        write!(f, "Enjoy your meals!")
    }
}
