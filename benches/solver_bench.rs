// ABOUTME: Criterion benchmarks for the end-to-end meal solve path
// ABOUTME: Measures model build, lexicographic compilation, and LP solve together
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Criterion benchmarks for the meal solver.
//!
//! One realistic six-ingredient request with micronutrient targets and a
//! ratio goal, solved end to end.

#![allow(clippy::missing_docs_in_private_items, missing_docs)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use std::collections::BTreeMap;

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use remy_engine::models::{
    IngredientBound, MacroRatioTarget, NutrientProfile, SolveRequest,
};
use remy_engine::SolverRuntime;

fn food(
    calories: f64,
    protein_g: f64,
    fat_g: f64,
    carbohydrates_g: f64,
    fiber_g: f64,
    micros: &[(&str, f64)],
) -> NutrientProfile {
    NutrientProfile {
        calories,
        protein_g,
        fat_g,
        carbohydrates_g,
        fiber_g,
        micros: micros
            .iter()
            .map(|&(key, amount)| (key.to_owned(), amount))
            .collect(),
    }
}

fn realistic_request() -> SolveRequest {
    let mut request = SolveRequest::default();
    let table: Vec<(&str, NutrientProfile, f64, f64)> = vec![
        (
            "rice",
            food(365.0, 7.1, 0.7, 80.0, 1.3, &[("iron_mg", 0.8), ("zinc_mg", 1.1)]),
            0.0,
            400.0,
        ),
        (
            "chicken",
            food(165.0, 31.0, 3.6, 0.0, 0.0, &[("zinc_mg", 1.0), ("vitamin_b6_mg", 0.6)]),
            0.0,
            300.0,
        ),
        (
            "spinach",
            food(
                23.0,
                2.9,
                0.4,
                3.6,
                2.2,
                &[("iron_mg", 2.7), ("folate_mcg", 194.0), ("magnesium_mg", 79.0)],
            ),
            50.0,
            400.0,
        ),
        (
            "lentils",
            food(
                116.0,
                9.0,
                0.4,
                20.0,
                7.9,
                &[("iron_mg", 3.3), ("folate_mcg", 181.0), ("zinc_mg", 1.3)],
            ),
            0.0,
            300.0,
        ),
        (
            "oil",
            food(884.0, 0.0, 100.0, 0.0, 0.0, &[("vitamin_e_mg", 14.4)]),
            0.0,
            40.0,
        ),
        (
            "yogurt",
            food(
                59.0,
                10.0,
                0.7,
                3.6,
                0.0,
                &[("calcium_mg", 110.0), ("vitamin_b12_mcg", 0.75)],
            ),
            0.0,
            500.0,
        ),
    ];
    for (food_id, profile, min_grams, max_grams) in table {
        request.foods.insert(food_id.to_owned(), profile);
        request
            .ingredients
            .push(IngredientBound::new(food_id, min_grams, max_grams));
    }
    request.meal_calorie_target = 900.0;
    request.calorie_tolerance = 60.0;
    request.macro_ratio = Some(MacroRatioTarget {
        carb_pct: 45.0,
        protein_pct: 30.0,
        fat_pct: 25.0,
        ..MacroRatioTarget::default()
    });
    request.micro_targets = BTreeMap::from([
        ("iron_mg".to_owned(), 12.0),
        ("folate_mcg".to_owned(), 320.0),
        ("zinc_mg".to_owned(), 9.0),
        ("calcium_mg".to_owned(), 800.0),
        ("magnesium_mg".to_owned(), 300.0),
    ]);
    request.micro_upper_limits = BTreeMap::from([
        ("iron_mg".to_owned(), 45.0),
        ("zinc_mg".to_owned(), 34.0),
        ("folate_mcg".to_owned(), 900.0),
    ]);
    request
}

fn bench_solve(c: &mut Criterion) {
    SolverRuntime::warm_up();
    let request = realistic_request();

    c.bench_function("solve_six_ingredient_meal", |b| {
        b.iter(|| remy_engine::solve(black_box(&request)).expect("host failure"));
    });
}

criterion_group!(benches, bench_solve);
criterion_main!(benches);
