// ABOUTME: good_lp translation of the LP IR, solved with the pure-Rust microlp backend
// ABOUTME: Maps resolution errors onto the adapter's uniform status taxonomy
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Executes the IR through `good_lp`'s `default_solver` (microlp).
//!
//! Each call builds an independent problem, so no solver state can leak
//! between solves.

use good_lp::{
    default_solver, variable, Expression, ProblemVariables, ResolutionError, Solution, SolverModel,
    Variable,
};
use tracing::{debug, warn};

use remy_core::errors::EngineError;

use crate::model::{LinearModel, Sense};
use crate::solver::{LpBackend, LpOutcome, LpStatus};

/// Stateless `good_lp`/microlp backend.
#[derive(Debug, Clone, Copy, Default)]
pub struct GoodLpBackend;

impl LpBackend for GoodLpBackend {
    fn name(&self) -> &'static str {
        "microlp"
    }

    fn solve(&self, model: &LinearModel) -> Result<LpOutcome, EngineError> {
        model.validate()?;

        let mut vars = ProblemVariables::new();
        let handles: Vec<Variable> = model
            .variables()
            .iter()
            .map(|def| {
                vars.add(
                    variable()
                        .min(def.lower)
                        .max(def.upper)
                        .name(def.name.clone()),
                )
            })
            .collect();

        let mut objective = Expression::with_capacity(model.objective().terms.len());
        for &(var, coefficient) in &model.objective().terms {
            objective.add_mul(coefficient, handles[var]);
        }

        let mut problem = vars.minimise(objective).using(default_solver);
        for constraint in model.constraints() {
            let mut expr = Expression::with_capacity(constraint.expr.terms.len());
            for &(var, coefficient) in &constraint.expr.terms {
                expr.add_mul(coefficient, handles[var]);
            }
            problem = problem.with(match constraint.sense {
                Sense::Le => expr.leq(constraint.rhs),
                Sense::Ge => expr.geq(constraint.rhs),
                Sense::Eq => expr.eq(constraint.rhs),
            });
        }

        match problem.solve() {
            Ok(solution) => {
                let values = handles.iter().map(|&h| solution.value(h)).collect();
                debug!(
                    variables = model.variables().len(),
                    constraints = model.constraints().len(),
                    "solve optimal"
                );
                Ok(LpOutcome {
                    status: LpStatus::Optimal,
                    values,
                })
            }
            Err(ResolutionError::Infeasible) => Ok(LpOutcome {
                status: LpStatus::Infeasible,
                values: Vec::new(),
            }),
            Err(ResolutionError::Unbounded) => {
                warn!("solver reported unbounded despite bounded variables");
                Ok(LpOutcome {
                    status: LpStatus::Unbounded,
                    values: Vec::new(),
                })
            }
            Err(error) => {
                warn!(%error, "solver failed without a verdict");
                Ok(LpOutcome {
                    status: LpStatus::Error,
                    values: Vec::new(),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used)]

    use crate::model::{LinearExpr, LinearModel, Sense};

    use super::*;

    #[test]
    fn minimizes_a_two_variable_program() {
        // min x + 2y  s.t.  x + y >= 10,  0 <= x <= 6, 0 <= y <= 10
        let mut model = LinearModel::new();
        let x = model.add_variable("x", 0.0, 6.0);
        let y = model.add_variable("y", 0.0, 10.0);
        let mut row = LinearExpr::new();
        row.push(x, 1.0);
        row.push(y, 1.0);
        model.add_constraint("demand", row, Sense::Ge, 10.0);
        let mut objective = LinearExpr::new();
        objective.push(x, 1.0);
        objective.push(y, 2.0);
        model.set_objective(objective);

        let outcome = GoodLpBackend.solve(&model).expect("host failure");
        assert_eq!(outcome.status, LpStatus::Optimal);
        assert!((outcome.values[x] - 6.0).abs() < 1e-6, "x should hit its cap");
        assert!((outcome.values[y] - 4.0).abs() < 1e-6);
    }

    #[test]
    fn reports_infeasible_conflicting_rows() {
        let mut model = LinearModel::new();
        let x = model.add_variable("x", 0.0, 1.0);
        model.add_constraint("must_be_big", LinearExpr::variable(x), Sense::Ge, 5.0);
        let outcome = GoodLpBackend.solve(&model).expect("host failure");
        assert_eq!(outcome.status, LpStatus::Infeasible);
    }

    #[test]
    fn malformed_model_is_a_host_error() {
        let mut model = LinearModel::new();
        let x = model.add_variable("x", 0.0, 1.0);
        let mut row = LinearExpr::new();
        row.push(x + 7, 1.0);
        model.add_constraint("dangling", row, Sense::Le, 1.0);
        assert!(GoodLpBackend.solve(&model).is_err());
    }
}
