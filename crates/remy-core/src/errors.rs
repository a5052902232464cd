// ABOUTME: Error types for the Remy nutrition engine
// ABOUTME: Separates host failures (EngineError) from domain infeasibility (a response value)
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Nutrition Intelligence

//! # Engine Error Types
//!
//! Only genuinely unexpected host failures propagate as `Err`: a malformed
//! internal model or a solver runtime breakdown. Everything the caller can
//! cause, from contradictory bounds to unsatisfiable hard constraints, is reported
//! through `SolveStatus::Infeasible` on the response instead, so interactive
//! callers never have to distinguish "bad diet" from "broken server".

use thiserror::Error;

/// Unexpected host failures raised by the engine.
///
/// Callers must treat the whole solve as failed and may retry or surface a
/// generic failure state. Domain-level infeasibility never appears here.
#[derive(Debug, Error)]
pub enum EngineError {
    /// The internal linear model violated a structural invariant
    /// (for example a constraint referencing an unknown variable).
    #[error("malformed linear model: {0}")]
    MalformedModel(String),

    /// The underlying solver runtime failed in a way that is not a
    /// well-formed infeasible/unbounded verdict.
    #[error("solver runtime failure: {0}")]
    SolverRuntime(String),
}

/// Request-level configuration violations.
///
/// These are *not* host failures: the engine answers them with a
/// deterministic infeasible response without invoking the solver. The enum
/// exists so the violation can be logged with a precise reason.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigViolation {
    /// The request carried no ingredients to optimize over.
    #[error("ingredient list is empty")]
    EmptyIngredients,

    /// An ingredient bound is contradictory or out of domain.
    #[error("invalid bound for {food_id}: min={min_grams}, max={max_grams}")]
    InvalidBound {
        /// Offending food identifier.
        food_id: String,
        /// Lower gram bound as supplied.
        min_grams: f64,
        /// Upper gram bound as supplied.
        max_grams: f64,
    },

    /// An ingredient has no entry in the nutrient table.
    #[error("no nutrient data for {food_id}")]
    UnknownFood {
        /// Offending food identifier.
        food_id: String,
    },

    /// A numeric input was NaN or infinite.
    #[error("non-finite value in {field}")]
    NonFinite {
        /// Name of the offending request field.
        field: String,
    },
}
