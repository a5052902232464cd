// ABOUTME: Solve orchestration: validate, extract coefficients, build, compile, solve, interpret
// ABOUTME: One call is one pure, blocking unit of work; infeasibility is a response, not an error
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! The engine's public solve entry point.
//!
//! # Caller-side request superseding
//!
//! The engine provides no in-flight cancellation: once started, an invocation
//! always runs to completion. Callers that issue overlapping solves (a user
//! adjusting inputs while a prior solve runs) must tag each call with a
//! monotonically increasing identifier and discard any result whose
//! identifier is not the latest at completion time.

use tracing::{debug, instrument, warn};

use remy_core::errors::EngineError;
use remy_core::models::{NutrientCoefficients, SolveRequest, SolveResponse};

use crate::config::EngineConfig;
use crate::interpret;
use crate::model::builder::{self, BuiltModel};
use crate::model::objective;
use crate::solver::runtime::SolverRuntime;
use crate::solver::LpStatus;

/// Solve one meal request with the process-wide configuration.
///
/// # Errors
///
/// Returns [`EngineError`] only for genuine host failures (malformed internal
/// model, solver runtime breakdown). Configuration problems and
/// hard-constraint infeasibility are reported through
/// [`remy_core::models::SolveStatus::Infeasible`] on the response.
pub fn solve(request: &SolveRequest) -> Result<SolveResponse, EngineError> {
    solve_with_config(request, EngineConfig::global())
}

/// Solve one meal request with an explicit configuration.
///
/// # Errors
///
/// See [`solve`].
#[instrument(
    skip_all,
    fields(
        ingredients = request.ingredients.len(),
        micro_targets = request.micro_targets.len(),
        demographics = ?request.demographics,
    )
)]
pub fn solve_with_config(
    request: &SolveRequest,
    config: &EngineConfig,
) -> Result<SolveResponse, EngineError> {
    if let Err(violation) = request.validate() {
        warn!(%violation, "configuration error; answering infeasible without solving");
        return Ok(interpret::infeasible_response(request, config.epsilon));
    }

    let mut coefficients: Vec<NutrientCoefficients> =
        Vec::with_capacity(request.ingredients.len());
    for bound in &request.ingredients {
        let Some(profile) = request.foods.get(&bound.food_id) else {
            // validate() already rejects this; kept as a non-panicking guard
            warn!(food_id = %bound.food_id, "missing nutrient profile");
            return Ok(interpret::infeasible_response(request, config.epsilon));
        };
        coefficients.push(profile.per_gram());
    }

    let strategy = request
        .micro_strategy
        .unwrap_or(config.default_micro_strategy);
    let BuiltModel {
        mut model,
        ingredient_vars,
        terms,
    } = builder::build(request, &coefficients, config.epsilon);
    let compiled = objective::compile(&request.priority_order(), strategy, terms);
    for term in &compiled.weighted {
        debug!(
            label = term.label,
            weight = term.weight,
            max_value = term.max_value,
            "objective term"
        );
    }
    model.set_objective(compiled.expr);

    let outcome = SolverRuntime::global().backend().solve(&model)?;
    match outcome.status {
        LpStatus::Optimal => {
            let grams: Vec<f64> = ingredient_vars
                .iter()
                .map(|&var| outcome.values[var])
                .collect();
            Ok(interpret::success_response(
                request,
                &coefficients,
                &grams,
                config.epsilon,
                config.feasibility_tolerance,
            ))
        }
        status => {
            // unbounded/error collapse into infeasible at the boundary; the
            // distinction survives in logs only
            warn!(?status, "solver verdict not optimal; answering infeasible");
            Ok(interpret::infeasible_response(request, config.epsilon))
        }
    }
}
