use serde::{Deserialize, Serialize};
use std::fmt;

/// Quantity as it arrives from the recipe catalog. Most are numbers, but
/// free-text amounts ("to taste", "a pinch") show up too.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawQuantity {
    Number(f64),
    Text(String),
}

impl fmt::Display for RawQuantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RawQuantity::Number(value) => write!(f, "{}", value),
            RawQuantity::Text(text) => write!(f, "{}", text),
        }
    }
}

impl From<f64> for RawQuantity {
    fn from(value: f64) -> Self {
        RawQuantity::Number(value)
    }
}

impl From<&str> for RawQuantity {
    fn from(value: &str) -> Self {
        RawQuantity::Text(value.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ingredient {
    pub food: String,
    pub quantity: RawQuantity,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub measure: Option<String>,
    #[serde(default, alias = "foodCategory", skip_serializing_if = "Option::is_none")]
    pub food_category: Option<String>,
}

impl Ingredient {
    pub fn new(food: &str, quantity: impl Into<RawQuantity>, measure: Option<&str>) -> Self {
        Self {
            food: food.to_string(),
            quantity: quantity.into(),
            measure: measure.map(str::to_string),
            food_category: None,
        }
    }

    pub fn with_category(mut self, category: &str) -> Self {
        self.food_category = Some(category.to_string());
        self
    }
}

/// A recipe as handed over by the catalog. Read-only for the shopping list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Recipe {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub url: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    #[serde(default)]
    pub cuisine_type: Vec<String>,
    #[serde(default)]
    pub diet_labels: Vec<String>,
    #[serde(default)]
    pub health_labels: Vec<String>,
    pub ingredients: Vec<Ingredient>,
    pub servings: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_time: Option<u32>, // minutes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories: Option<f64>, // whole recipe
}

impl Recipe {
    pub fn new(id: &str, name: &str, servings: u32, ingredients: Vec<Ingredient>) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            url: String::new(),
            image: None,
            cuisine_type: Vec::new(),
            diet_labels: Vec::new(),
            health_labels: Vec::new(),
            ingredients,
            servings,
            total_time: None,
            calories: None,
        }
    }

    pub fn calories_per_serving(&self) -> Option<u32> {
        match (self.calories, self.servings) {
            (Some(_), 0) | (None, _) => None,
            (Some(total), servings) => Some((total / f64::from(servings)) as u32),
        }
    }
}
