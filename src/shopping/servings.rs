use thiserror::Error;
use tracing::debug;

use crate::recipe::Recipe;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ServingsError {
    #[error("Recipe '{recipe}' declares zero servings and cannot be scaled")]
    ZeroServings { recipe: String },
}

fn ensure_servings(recipe: &Recipe) -> Result<f64, ServingsError> {
    if recipe.servings == 0 {
        return Err(ServingsError::ZeroServings {
            recipe: recipe.name.clone(),
        });
    }
    Ok(f64::from(recipe.servings))
}

/// Multiplier that scales a single recipe to `desired_servings` on its own.
pub fn calculate_servings_multiplier(
    recipe: &Recipe,
    desired_servings: u32,
) -> Result<f64, ServingsError> {
    let base = ensure_servings(recipe)?;
    Ok(f64::from(desired_servings) / base)
}

/// One multiplier per recipe, in input order.
///
/// Every recipe starts at its native yield. When the combined yield falls
/// short of `target_servings`, all multipliers are raised by the same factor
/// so each recipe keeps its share of the total. A surplus is left as is:
/// recipes are never shrunk below their native yield.
///
/// Zero-serving recipes are rejected before any division.
pub fn distribute(recipes: &[Recipe], target_servings: u32) -> Result<Vec<f64>, ServingsError> {
    let bases = recipes
        .iter()
        .map(ensure_servings)
        .collect::<Result<Vec<_>, _>>()?;

    let mut multipliers = vec![1.0_f64; recipes.len()];
    if recipes.is_empty() {
        return Ok(multipliers);
    }

    let total_servings: f64 = bases.iter().zip(&multipliers).map(|(b, m)| b * m).sum();
    let target = f64::from(target_servings);

    if total_servings < target {
        let scale_factor = target / total_servings;
        for multiplier in multipliers.iter_mut() {
            *multiplier *= scale_factor;
        }
        debug!(total_servings, target, scale_factor, "Scaling recipes up to target servings");
    } else {
        debug!(total_servings, target, "Native yields cover target; keeping multipliers at 1.0");
    }

    Ok(multipliers)
}
