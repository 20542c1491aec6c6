//! Servings reconciliation and shopping-list consolidation.
//!
//! Selected recipes flow through [`distribute`] to get one multiplier per
//! recipe, then into a [`ShoppingList`] ingredient by ingredient, and come
//! out of [`ShoppingList::consolidated_list`] sorted for the store aisles.

pub mod formatter;
pub mod normalizer;
pub mod servings;
pub mod shopping_list;

pub use formatter::{format_quantity, title_case, ConsolidatedItem};
pub use normalizer::{normalize_ingredient, parse_quantity, NormalizedIngredient, Quantity};
pub use servings::{calculate_servings_multiplier, distribute, ServingsError};
pub use shopping_list::{AggregatedItem, ItemKey, ShoppingList};
