// ABOUTME: Solve response contract: status, solved masses, meal totals, micronutrient coverage
// ABOUTME: Infeasible responses carry zeroed totals but keep reference annotation intact
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Nutrition Intelligence

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Outcome of a solve call.
///
/// Configuration errors, hard-constraint infeasibility, and non-optimal
/// solver verdicts all surface as `Infeasible`; only host failures are `Err`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum SolveStatus {
    /// An optimal meal was found.
    Success,
    /// No meal satisfies the hard constraints (or the request was malformed).
    Infeasible,
}

/// One solved ingredient with its derived macro amounts.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolvedIngredient {
    /// Food identifier from the request.
    pub food_id: String,
    /// Solved mass in grams, never negative.
    pub grams: f64,
    /// Calories contributed by this mass (kcal).
    pub calories: f64,
    /// Protein contributed (grams).
    pub protein_g: f64,
    /// Fat contributed (grams).
    pub fat_g: f64,
    /// Carbohydrates contributed (grams).
    pub carbohydrates_g: f64,
    /// Fiber contributed (grams).
    pub fiber_g: f64,
}

/// Aggregate macro totals for the optimized meal.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct MealTotals {
    /// Total calories (kcal).
    pub calories: f64,
    /// Total protein (grams).
    pub protein_g: f64,
    /// Total fat (grams).
    pub fat_g: f64,
    /// Total carbohydrates (grams).
    pub carbohydrates_g: f64,
    /// Total fiber (grams).
    pub fiber_g: f64,
}

/// Coverage report for one tracked micronutrient.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MicroResult {
    /// Amount achieved by the optimized meal.
    pub total: f64,
    /// Amount consumed outside the meal, as supplied by the caller.
    pub pinned: f64,
    /// Demographic-specific recommended daily intake.
    pub dri: f64,
    /// `max(0, dri - pinned)`: what the meal still had to deliver.
    pub remaining: f64,
    /// `(total + pinned) / dri * 100`; zero when no DRI is known.
    /// Non-negative and may exceed 100.
    pub pct: f64,
    /// Whether this nutrient was among those the solve actually targeted.
    pub optimized: bool,
    /// Estimated average requirement, passed through for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ear: Option<f64>,
    /// Tolerable upper intake level, passed through for display.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ul: Option<f64>,
}

/// The full result of one solve call.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SolveResponse {
    /// Whether an optimal meal was found.
    pub status: SolveStatus,
    /// Solved ingredients in request order; empty when infeasible.
    pub per_ingredient: Vec<SolvedIngredient>,
    /// Macro totals over the solved meal; zeroed when infeasible.
    pub meal_totals: MealTotals,
    /// Coverage per tracked micronutrient.
    pub micro_results: BTreeMap<String, MicroResult>,
}

impl SolveResponse {
    /// An infeasible response: no partial solution, zeroed totals, but the
    /// micronutrient annotation (pinned/DRI context) preserved.
    #[must_use]
    pub fn infeasible(micro_results: BTreeMap<String, MicroResult>) -> Self {
        Self {
            status: SolveStatus::Infeasible,
            per_ingredient: Vec::new(),
            meal_totals: MealTotals::default(),
            micro_results,
        }
    }
}
