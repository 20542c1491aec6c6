use std::collections::BTreeSet;

use thiserror::Error;

use crate::api_connection::strip_code_fences;
use crate::recipe::Recipe;

#[derive(Debug, Error)]
pub enum SelectionError {
    #[error("no JSON array found in model output")]
    NoJsonArray,

    #[error("invalid selection JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("no valid recipe numbers found (expected 1-{max})")]
    NoValidIndices { max: usize },
}

/// Reads a JSON array of 1-based recipe numbers out of a model reply,
/// dropping anything outside `1..=recipe_count`.
pub fn parse_selection(text: &str, recipe_count: usize) -> Result<BTreeSet<usize>, SelectionError> {
    let content = strip_code_fences(text);
    let (start, end) = match (content.find('['), content.rfind(']')) {
        (Some(start), Some(end)) if end > start => (start, end),
        _ => return Err(SelectionError::NoJsonArray),
    };

    let numbers: Vec<i64> = serde_json::from_str(&content[start..=end])?;
    let valid: BTreeSet<usize> = numbers
        .into_iter()
        .filter_map(|n| usize::try_from(n).ok())
        .filter(|n| (1..=recipe_count).contains(n))
        .collect();

    if valid.is_empty() {
        return Err(SelectionError::NoValidIndices { max: recipe_count });
    }
    Ok(valid)
}

/// Recipes picked so far, by 1-based position in the search results.
#[derive(Debug, Default, Clone)]
pub struct Selection {
    indices: BTreeSet<usize>,
}

impl Selection {
    pub fn extend(&mut self, indices: impl IntoIterator<Item = usize>) {
        self.indices.extend(indices);
    }

    pub fn len(&self) -> usize {
        self.indices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Saturates at `u32::MAX`; catalog yields are not bounded.
    pub fn total_servings(&self, recipes: &[Recipe]) -> u32 {
        self.picked(recipes)
            .fold(0u32, |total, r| total.saturating_add(r.servings))
    }

    pub fn remaining(&self, recipes: &[Recipe], needed: u32) -> u32 {
        needed.saturating_sub(self.total_servings(recipes))
    }

    fn picked<'a>(&'a self, recipes: &'a [Recipe]) -> impl Iterator<Item = &'a Recipe> + 'a {
        self.indices
            .iter()
            .filter_map(move |i| i.checked_sub(1).and_then(|i| recipes.get(i)))
    }

    pub fn into_recipes(self, recipes: &[Recipe]) -> Vec<Recipe> {
        self.picked(recipes).cloned().collect()
    }
}
