// ABOUTME: Ingredient bound model: a candidate food with its allowed gram interval
// ABOUTME: One continuous decision variable per bound in the linear model
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Nutrition Intelligence

use serde::{Deserialize, Serialize};

/// A candidate food and the gram interval the solver may assign to it.
///
/// `min_grams == max_grams` pins the ingredient to a fixed mass; the solver
/// then only checks that the fixed point satisfies all hard constraints.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngredientBound {
    /// Identifier into the nutrient table.
    pub food_id: String,
    /// Lower gram bound, must be `>= 0`.
    pub min_grams: f64,
    /// Upper gram bound, must be `>= min_grams`.
    pub max_grams: f64,
}

impl IngredientBound {
    /// Build a bound without ceremony; used heavily by tests and fixtures.
    #[must_use]
    pub fn new(food_id: impl Into<String>, min_grams: f64, max_grams: f64) -> Self {
        Self {
            food_id: food_id.into(),
            min_grams,
            max_grams,
        }
    }

    /// Whether the interval is well-formed: finite, non-negative, ordered.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        self.min_grams.is_finite()
            && self.max_grams.is_finite()
            && self.min_grams >= 0.0
            && self.max_grams >= self.min_grams
    }
}
