use std::collections::hash_map::Entry;
use std::collections::HashMap;

use tracing::{debug, trace};

use crate::recipe::Recipe;
use crate::shopping::formatter::{consolidate, ConsolidatedItem};
use crate::shopping::normalizer::{normalize_ingredient, Quantity};
use crate::shopping::servings::{distribute, ServingsError};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemKey {
    pub food: String,
    pub unit: String,
}

impl ItemKey {
    pub fn new(food: &str, unit: &str) -> Self {
        Self {
            food: food.to_string(),
            unit: unit.to_string(),
        }
    }
}

/// Everything gathered so far for one (food, unit) pair.
#[derive(Debug, Clone, PartialEq)]
pub struct AggregatedItem {
    pub food: String,
    pub quantity: Quantity,
    pub unit: String,
    pub category: String, // from the first recipe that introduced the key
}

/// Per-session shopping list. Populate with [`add_recipe`](Self::add_recipe),
/// read with [`consolidated_list`](Self::consolidated_list), then
/// [`clear`](Self::clear) before planning again.
#[derive(Debug, Default, Clone)]
pub struct ShoppingList {
    items: HashMap<ItemKey, AggregatedItem>,
}

impl ShoppingList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds every ingredient of `recipe`, scaled by `multiplier`.
    ///
    /// Contributions under an existing key are folded into that entry; unit
    /// and category stay as the first recipe set them.
    ///
    /// `multiplier` must be finite and positive, as [`distribute`] produces.
    pub fn add_recipe(&mut self, recipe: &Recipe, multiplier: f64) {
        debug_assert!(
            multiplier.is_finite() && multiplier > 0.0,
            "multiplier must be finite and positive, got {}",
            multiplier
        );
        debug!(
            recipe = %recipe.name,
            multiplier,
            ingredients = recipe.ingredients.len(),
            "Adding recipe to shopping list"
        );

        for ingredient in &recipe.ingredients {
            let normalized = normalize_ingredient(ingredient);
            let quantity = normalized.quantity.scaled(multiplier);
            let key = ItemKey {
                food: normalized.food,
                unit: normalized.unit,
            };

            match self.items.entry(key) {
                Entry::Occupied(mut entry) => {
                    let item = entry.get_mut();
                    if !(item.quantity.is_numeric() && quantity.is_numeric()) {
                        trace!(food = %item.food, unit = %item.unit, "Keeping unsummable amounts as a note");
                    }
                    item.quantity.absorb(quantity);
                }
                Entry::Vacant(entry) => {
                    let key = entry.key();
                    let item = AggregatedItem {
                        food: key.food.clone(),
                        unit: key.unit.clone(),
                        quantity,
                        category: normalized.category,
                    };
                    entry.insert(item);
                }
            }
        }
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Starts over from `recipes`: clears, distributes `target_servings`
    /// across them and adds each with its multiplier. Returns the multipliers.
    pub fn rebuild_from(
        &mut self,
        recipes: &[Recipe],
        target_servings: u32,
    ) -> Result<Vec<f64>, ServingsError> {
        self.clear();
        let multipliers = distribute(recipes, target_servings)?;
        for (recipe, multiplier) in recipes.iter().zip(&multipliers) {
            self.add_recipe(recipe, *multiplier);
        }
        Ok(multipliers)
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn get(&self, food: &str, unit: &str) -> Option<&AggregatedItem> {
        self.items.get(&ItemKey::new(food, unit))
    }

    pub fn items(&self) -> impl Iterator<Item = &AggregatedItem> {
        self.items.values()
    }

    /// Display-ready view, sorted by category then food. Does not mutate.
    pub fn consolidated_list(&self) -> Vec<ConsolidatedItem> {
        consolidate(self.items.values())
    }
}
