// ABOUTME: Shared test fixtures and setup for integration tests
// ABOUTME: Provides quiet logging plus food table and request builders
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org
#![allow(
    dead_code,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_panics_doc,
    clippy::must_use_candidate
)]
//! Shared test utilities for `remy_engine`
//!
//! Common fixtures to reduce duplication across integration tests. Food
//! composition numbers are per 100 g and roughly match USDA entries; the
//! tests only rely on their relative structure.

use std::collections::BTreeMap;
use std::sync::Once;

use remy_engine::models::{IngredientBound, NutrientProfile, SolveRequest};

static INIT_LOGGER: Once = Once::new();

/// Initialize quiet logging for tests (call once per test process)
pub fn init_test_logging() {
    INIT_LOGGER.call_once(|| {
        let log_level = match std::env::var("TEST_LOG").as_deref() {
            Ok("TRACE") => tracing::Level::TRACE,
            Ok("DEBUG") => tracing::Level::DEBUG,
            Ok("INFO") => tracing::Level::INFO,
            _ => tracing::Level::WARN,
        };
        tracing_subscriber::fmt()
            .with_max_level(log_level)
            .with_test_writer()
            .init();
    });
}

fn micros(entries: &[(&str, f64)]) -> BTreeMap<String, f64> {
    entries
        .iter()
        .map(|&(key, amount)| (key.to_owned(), amount))
        .collect()
}

/// Uncooked white rice, per 100 g.
pub fn rice() -> NutrientProfile {
    NutrientProfile {
        calories: 365.0,
        protein_g: 7.1,
        fat_g: 0.7,
        carbohydrates_g: 80.0,
        fiber_g: 1.3,
        micros: micros(&[("iron_mg", 0.8), ("zinc_mg", 1.1), ("magnesium_mg", 25.0)]),
    }
}

/// Raw broccoli, per 100 g.
pub fn broccoli() -> NutrientProfile {
    NutrientProfile {
        calories: 34.0,
        protein_g: 2.8,
        fat_g: 0.4,
        carbohydrates_g: 6.6,
        fiber_g: 2.6,
        micros: micros(&[
            ("vitamin_c_mg", 89.2),
            ("iron_mg", 0.7),
            ("folate_mcg", 63.0),
            ("vitamin_k_mcg", 101.6),
        ]),
    }
}

/// Olive oil, per 100 g.
pub fn oil() -> NutrientProfile {
    NutrientProfile {
        calories: 884.0,
        fat_g: 100.0,
        micros: micros(&[("vitamin_e_mg", 14.4), ("vitamin_k_mcg", 60.2)]),
        ..NutrientProfile::default()
    }
}

/// Raw spinach, per 100 g.
pub fn spinach() -> NutrientProfile {
    NutrientProfile {
        calories: 23.0,
        protein_g: 2.9,
        fat_g: 0.4,
        carbohydrates_g: 3.6,
        fiber_g: 2.2,
        micros: micros(&[
            ("iron_mg", 2.7),
            ("vitamin_c_mg", 28.1),
            ("folate_mcg", 194.0),
            ("magnesium_mg", 79.0),
        ]),
    }
}

/// Cooked lentils, per 100 g.
pub fn lentils() -> NutrientProfile {
    NutrientProfile {
        calories: 116.0,
        protein_g: 9.0,
        fat_g: 0.4,
        carbohydrates_g: 20.0,
        fiber_g: 7.9,
        micros: micros(&[
            ("iron_mg", 3.3),
            ("folate_mcg", 181.0),
            ("zinc_mg", 1.3),
        ]),
    }
}

/// Chicken breast, per 100 g.
pub fn chicken() -> NutrientProfile {
    NutrientProfile {
        calories: 165.0,
        protein_g: 31.0,
        fat_g: 3.6,
        micros: micros(&[("zinc_mg", 1.0), ("vitamin_b6_mg", 0.6)]),
        ..NutrientProfile::default()
    }
}

/// A request over the given `(food_id, profile, min, max)` rows with a
/// calorie band; everything else stays at its default.
pub fn request_with(
    foods: Vec<(&str, NutrientProfile, f64, f64)>,
    calorie_target: f64,
    calorie_tolerance: f64,
) -> SolveRequest {
    init_test_logging();
    let mut request = SolveRequest::default();
    for (food_id, profile, min_grams, max_grams) in foods {
        request.foods.insert(food_id.to_owned(), profile);
        request
            .ingredients
            .push(IngredientBound::new(food_id, min_grams, max_grams));
    }
    request.meal_calorie_target = calorie_target;
    request.calorie_tolerance = calorie_tolerance;
    request
}
