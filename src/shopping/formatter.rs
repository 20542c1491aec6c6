use serde::Serialize;
use std::fmt;

use crate::shopping::shopping_list::AggregatedItem;

/// One line of the final shopping list, ready to print.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ConsolidatedItem {
    pub food: String,
    pub quantity: String,
    pub unit: String,
    pub category: String,
}

impl fmt::Display for ConsolidatedItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.quantity, self.unit, self.food)
    }
}

/// Two decimals, then trailing zeros and a dangling point dropped: `2.50` -> `2.5`, `3.00` -> `3`.
pub fn format_quantity(value: f64) -> String {
    let fixed = format!("{:.2}", value);
    let trimmed = fixed.trim_end_matches('0').trim_end_matches('.');
    if trimmed == "-0" {
        "0".to_string()
    } else {
        trimmed.to_string()
    }
}

/// Upper-cases the first letter of every alphabetic run, lower-cases the rest.
pub fn title_case(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut at_word_start = true;
    for c in text.chars() {
        if c.is_alphabetic() {
            if at_word_start {
                result.extend(c.to_uppercase());
            } else {
                result.extend(c.to_lowercase());
            }
            at_word_start = false;
        } else {
            result.push(c);
            at_word_start = true;
        }
    }
    result
}

pub(crate) fn consolidate<'a>(items: impl Iterator<Item = &'a AggregatedItem>) -> Vec<ConsolidatedItem> {
    let mut consolidated: Vec<ConsolidatedItem> = items
        .map(|item| ConsolidatedItem {
            food: title_case(&item.food),
            quantity: item.quantity.to_string(),
            unit: item.unit.clone(),
            category: item.category.clone(),
        })
        .collect();

    consolidated.sort_by(|a, b| {
        a.category
            .cmp(&b.category)
            .then_with(|| a.food.cmp(&b.food))
            .then_with(|| a.unit.cmp(&b.unit))
    });
    consolidated
}
