use std::fmt;

use crate::recipe::{Ingredient, RawQuantity};
use crate::shopping::formatter::format_quantity;

pub const DEFAULT_UNIT: &str = "unit";
pub const DEFAULT_CATEGORY: &str = "Other";

/// Accumulated amount for one shopping-list entry.
///
/// `Descriptive` holds text that could not be read as a number ("to taste")
/// or a note built from contributions that could not be summed.
#[derive(Debug, Clone, PartialEq)]
pub enum Quantity {
    Numeric(f64),
    Descriptive(String),
}

impl Quantity {
    /// Multipliers only apply to numeric amounts; text passes through unscaled.
    pub fn scaled(self, multiplier: f64) -> Self {
        match self {
            Quantity::Numeric(value) => Quantity::Numeric(value * multiplier),
            descriptive => descriptive,
        }
    }

    /// Folds another contribution into this one.
    ///
    /// Two numbers add up. Anything involving text becomes the note
    /// `"<existing> + <new>"` so neither contribution is lost. Blank text
    /// carries no amount and is dropped.
    pub fn absorb(&mut self, other: Quantity) {
        if other.is_blank() {
            return;
        }
        if self.is_blank() {
            *self = other;
            return;
        }
        match (&mut *self, other) {
            (Quantity::Numeric(total), Quantity::Numeric(value)) => *total += value,
            (existing, other) => {
                *existing = Quantity::Descriptive(format!("{} + {}", existing, other));
            }
        }
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Quantity::Numeric(_))
    }

    pub fn is_blank(&self) -> bool {
        matches!(self, Quantity::Descriptive(text) if text.trim().is_empty())
    }
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantity::Numeric(value) => f.write_str(&format_quantity(*value)),
            Quantity::Descriptive(text) => f.write_str(text),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct NormalizedIngredient {
    pub food: String, // case-folded merge key, never shown as-is
    pub unit: String,
    pub category: String,
    pub quantity: Quantity,
}

/// Integers and decimals become `Numeric`; anything else keeps its original text.
pub fn parse_quantity(raw: &RawQuantity) -> Quantity {
    match raw {
        RawQuantity::Number(value) if value.is_finite() => Quantity::Numeric(*value),
        RawQuantity::Number(value) => Quantity::Descriptive(value.to_string()),
        RawQuantity::Text(text) => match text.trim().parse::<f64>() {
            Ok(value) if value.is_finite() => Quantity::Numeric(value),
            _ => Quantity::Descriptive(text.clone()),
        },
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

pub fn normalize_ingredient(ingredient: &Ingredient) -> NormalizedIngredient {
    NormalizedIngredient {
        food: ingredient.food.trim().to_lowercase(),
        unit: non_blank(ingredient.measure.as_deref())
            .unwrap_or(DEFAULT_UNIT)
            .to_lowercase(),
        category: non_blank(ingredient.food_category.as_deref())
            .unwrap_or(DEFAULT_CATEGORY)
            .to_string(),
        quantity: parse_quantity(&ingredient.quantity),
    }
}
