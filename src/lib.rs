// ABOUTME: Main library entry point for the Remy nutrition engine
// ABOUTME: Solves per-food gram masses against macro and micronutrient goals via a lexicographic LP
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

#![deny(unsafe_code)]

//! # Remy Nutrition Engine
//!
//! A pure, stateless meal-solving engine. Given candidate foods with per-food
//! gram bounds and a set of daily nutrition goals, it computes the exact mass
//! of each food that meets the goals while optimizing several competing
//! objectives in a strict, caller-chosen priority order.
//!
//! All goal kinds (hard and soft gram constraints, minimax fairness across up
//! to twenty micronutrients, percentage-based macro-ratio targets, diversity
//! versus total-mass trade-offs) are compiled into a single linear program
//! with a lexicographically scalarized objective and handed to a generic LP
//! backend. The raw primal solution is then reinterpreted into
//! nutrition-meaningful results: solved ingredient masses, meal totals, and
//! per-micronutrient DRI coverage.
//!
//! ## Architecture
//!
//! - **Models** (`remy-core`): request/response contract and nutrient types
//! - **Model builder**: decision variables, hard/soft constraints, deviation
//!   variables
//! - **Objective compiler**: lexicographic ordering and dominance weights
//! - **Solver adapter**: solver-agnostic LP IR solved through `good_lp`
//! - **Result interpreter**: primal solution back to nutrition results
//!
//! ## Concurrency contract
//!
//! One call is one blocking unit of work with no internal concurrency and no
//! cancellation. Interactive callers that issue overlapping solves must tag
//! each call with a monotonically increasing identifier and discard any
//! result that is not the latest at completion time; the engine itself never
//! aborts an invocation in flight.
//!
//! ## Example
//!
//! ```rust
//! use remy_engine::models::{IngredientBound, NutrientProfile, SolveRequest};
//!
//! let mut request = SolveRequest::default();
//! request.foods.insert(
//!     "rice".into(),
//!     NutrientProfile { calories: 130.0, carbohydrates_g: 28.0, ..NutrientProfile::default() },
//! );
//! request.ingredients.push(IngredientBound::new("rice", 0.0, 400.0));
//! request.meal_calorie_target = 400.0;
//! request.calorie_tolerance = 50.0;
//!
//! let response = remy_engine::solve(&request)?;
//! # Ok::<(), remy_engine::errors::EngineError>(())
//! ```

/// Engine configuration with environment overrides
pub mod config;

/// Solve orchestration: validate, build, compile, solve, interpret
pub mod engine;

/// Result interpreter: primal solution to nutrition results
pub mod interpret;

/// Logging configuration and structured logging setup
pub mod logging;

/// Linear-program intermediate representation, model builder, objective compiler
pub mod model;

/// Solver adapter: backend trait, `good_lp` translation, shared runtime
pub mod solver;

/// Core data models re-exported from `remy-core`
pub mod models {
    pub use remy_core::models::*;
}

/// Error types re-exported from `remy-core`
pub mod errors {
    pub use remy_core::errors::*;
}

/// Domain constants re-exported from `remy-core`
pub mod constants {
    pub use remy_core::constants::*;
}

pub use engine::solve;
pub use solver::runtime::SolverRuntime;
