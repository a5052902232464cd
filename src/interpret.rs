// ABOUTME: Result interpreter: maps primal gram values back to nutrition-meaningful results
// ABOUTME: Per-ingredient macros, meal totals, and DRI coverage with presentation-only rounding
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Reinterprets a raw LP solution as a solve response.
//!
//! Everything is computed from unrounded values; rounding happens once at
//! response assembly and never feeds back into any computation.

use std::collections::{BTreeMap, BTreeSet};

use remy_core::constants::{display, micronutrients};
use remy_core::models::{
    MealTotals, MicroResult, NutrientCoefficients, SolveRequest, SolveResponse, SolveStatus,
    SolvedIngredient,
};

/// Build a success response from solved gram values.
///
/// `coefficients` and `grams` are parallel to the request's ingredient list.
/// Solved magnitudes below `feasibility` are treated as exactly zero, and
/// grams are clamped non-negative against solver slack.
#[must_use]
pub fn success_response(
    request: &SolveRequest,
    coefficients: &[NutrientCoefficients],
    grams: &[f64],
    epsilon: f64,
    feasibility: f64,
) -> SolveResponse {
    let clamped: Vec<f64> = grams
        .iter()
        .map(|&g| if g < feasibility { 0.0 } else { g })
        .collect();

    let mut totals = MealTotals::default();
    let mut per_ingredient = Vec::with_capacity(clamped.len());
    for ((bound, per_gram), &g) in request
        .ingredients
        .iter()
        .zip(coefficients)
        .zip(&clamped)
    {
        let calories = g * per_gram.calories;
        let protein_g = g * per_gram.protein_g;
        let fat_g = g * per_gram.fat_g;
        let carbohydrates_g = g * per_gram.carbohydrates_g;
        let fiber_g = g * per_gram.fiber_g;
        totals.calories += calories;
        totals.protein_g += protein_g;
        totals.fat_g += fat_g;
        totals.carbohydrates_g += carbohydrates_g;
        totals.fiber_g += fiber_g;
        per_ingredient.push(SolvedIngredient {
            food_id: bound.food_id.clone(),
            grams: round_amount(g),
            calories: round_amount(calories),
            protein_g: round_amount(protein_g),
            fat_g: round_amount(fat_g),
            carbohydrates_g: round_amount(carbohydrates_g),
            fiber_g: round_amount(fiber_g),
        });
    }

    let achieved: BTreeMap<String, f64> = tracked_keys(request)
        .into_iter()
        .map(|key| {
            let total = coefficients
                .iter()
                .zip(&clamped)
                .map(|(per_gram, &g)| g * per_gram.micro(&key))
                .sum();
            (key, total)
        })
        .collect();

    SolveResponse {
        status: SolveStatus::Success,
        per_ingredient,
        meal_totals: MealTotals {
            calories: round_amount(totals.calories),
            protein_g: round_amount(totals.protein_g),
            fat_g: round_amount(totals.fat_g),
            carbohydrates_g: round_amount(totals.carbohydrates_g),
            fiber_g: round_amount(totals.fiber_g),
        },
        micro_results: micro_results(request, &achieved, epsilon),
    }
}

/// Build the deterministic infeasible response: no partial solution, zeroed
/// totals, micronutrient annotation computed from zero achieved amounts.
#[must_use]
pub fn infeasible_response(request: &SolveRequest, epsilon: f64) -> SolveResponse {
    let achieved: BTreeMap<String, f64> = tracked_keys(request)
        .into_iter()
        .map(|key| (key, 0.0))
        .collect();
    SolveResponse::infeasible(micro_results(request, &achieved, epsilon))
}

/// The nutrients the coverage report spans: the fixed tracked set plus any
/// key the request targets or annotates.
fn tracked_keys(request: &SolveRequest) -> BTreeSet<String> {
    let mut keys: BTreeSet<String> = micronutrients::TRACKED
        .iter()
        .map(|&k| k.to_owned())
        .collect();
    keys.extend(request.micro_targets.keys().cloned());
    keys.extend(request.micro_references.keys().cloned());
    keys
}

fn micro_results(
    request: &SolveRequest,
    achieved: &BTreeMap<String, f64>,
    epsilon: f64,
) -> BTreeMap<String, MicroResult> {
    achieved
        .iter()
        .map(|(key, &total)| {
            let reference = request.micro_references.get(key).cloned().unwrap_or_default();
            let remaining = (reference.dri - reference.pinned).max(0.0);
            let pct = if reference.dri > epsilon {
                (total + reference.pinned) / reference.dri * 100.0
            } else {
                0.0
            };
            let optimized = request.optimized_nutrients.contains(key)
                || request.micro_targets.contains_key(key);
            let result = MicroResult {
                total: round_amount(total),
                pinned: round_amount(reference.pinned),
                dri: round_amount(reference.dri),
                remaining: round_amount(remaining),
                pct: round_percent(pct),
                optimized,
                ear: reference.ear,
                ul: reference.ul,
            };
            (key.clone(), result)
        })
        .collect()
}

fn round_amount(value: f64) -> f64 {
    round_to(value, display::AMOUNT_DECIMALS)
}

fn round_percent(value: f64) -> f64 {
    round_to(value, display::PERCENT_DECIMALS)
}

fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10.0_f64.powi(decimals);
    (value * scale).round() / scale
}
