// ABOUTME: Solver-agnostic linear-program intermediate representation
// ABOUTME: Named bounded variables, linear constraints, and a minimization objective
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Linear-program IR shared by the model builder and the solver adapter.
//!
//! The builder emits this representation; any backend that can minimize a
//! linear objective over linear equality/inequality constraints with
//! per-variable bounds can execute it. Keeping the IR in-house means the
//! builder never sees a solver API and backends are swappable.

pub mod builder;
pub mod objective;

use remy_core::errors::EngineError;

/// Index of a decision variable inside its [`LinearModel`].
pub type VarId = usize;

/// A decision variable with inclusive bounds.
#[derive(Debug, Clone)]
pub struct VariableDef {
    /// Human-readable name, used in constraint labels and debug logs.
    pub name: String,
    /// Inclusive lower bound.
    pub lower: f64,
    /// Inclusive upper bound.
    pub upper: f64,
}

/// Constraint comparison sense.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sense {
    /// Expression `<=` right-hand side.
    Le,
    /// Expression `>=` right-hand side.
    Ge,
    /// Expression `==` right-hand side.
    Eq,
}

/// A sparse linear expression over model variables.
#[derive(Debug, Clone, Default)]
pub struct LinearExpr {
    /// `(variable, coefficient)` pairs; a variable may appear once only.
    pub terms: Vec<(VarId, f64)>,
}

impl LinearExpr {
    /// Empty expression.
    #[must_use]
    pub const fn new() -> Self {
        Self { terms: Vec::new() }
    }

    /// Single-variable expression with coefficient 1.
    #[must_use]
    pub fn variable(var: VarId) -> Self {
        Self {
            terms: vec![(var, 1.0)],
        }
    }

    /// Append a term; zero coefficients are dropped.
    pub fn push(&mut self, var: VarId, coefficient: f64) {
        if coefficient != 0.0 {
            self.terms.push((var, coefficient));
        }
    }

    /// Whether the expression has no terms.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }
}

/// One linear constraint row.
#[derive(Debug, Clone)]
pub struct LinearConstraint {
    /// Label for logs and infeasibility diagnostics.
    pub label: String,
    /// Left-hand side expression.
    pub expr: LinearExpr,
    /// Comparison sense.
    pub sense: Sense,
    /// Right-hand side constant.
    pub rhs: f64,
}

/// A complete minimization LP.
#[derive(Debug, Clone, Default)]
pub struct LinearModel {
    variables: Vec<VariableDef>,
    constraints: Vec<LinearConstraint>,
    objective: LinearExpr,
}

impl LinearModel {
    /// Empty model.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a bounded variable and return its id.
    pub fn add_variable(&mut self, name: impl Into<String>, lower: f64, upper: f64) -> VarId {
        let id = self.variables.len();
        self.variables.push(VariableDef {
            name: name.into(),
            lower,
            upper,
        });
        id
    }

    /// Add a constraint row.
    pub fn add_constraint(
        &mut self,
        label: impl Into<String>,
        expr: LinearExpr,
        sense: Sense,
        rhs: f64,
    ) {
        self.constraints.push(LinearConstraint {
            label: label.into(),
            expr,
            sense,
            rhs,
        });
    }

    /// Replace the minimization objective.
    pub fn set_objective(&mut self, objective: LinearExpr) {
        self.objective = objective;
    }

    /// Defined variables in id order.
    #[must_use]
    pub fn variables(&self) -> &[VariableDef] {
        &self.variables
    }

    /// Constraint rows in insertion order.
    #[must_use]
    pub fn constraints(&self) -> &[LinearConstraint] {
        &self.constraints
    }

    /// The minimization objective.
    #[must_use]
    pub const fn objective(&self) -> &LinearExpr {
        &self.objective
    }

    /// Structural validation before handing the model to a backend.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedModel`] when a constraint or the
    /// objective references an undefined variable, a bound interval is
    /// inverted, or any number is non-finite.
    pub fn validate(&self) -> Result<(), EngineError> {
        for def in &self.variables {
            if !def.lower.is_finite() || !def.upper.is_finite() || def.lower > def.upper {
                return Err(EngineError::MalformedModel(format!(
                    "variable {} has invalid bounds [{}, {}]",
                    def.name, def.lower, def.upper
                )));
            }
        }
        let check_expr = |expr: &LinearExpr, context: &str| -> Result<(), EngineError> {
            for &(var, coefficient) in &expr.terms {
                if var >= self.variables.len() {
                    return Err(EngineError::MalformedModel(format!(
                        "{context} references undefined variable #{var}"
                    )));
                }
                if !coefficient.is_finite() {
                    return Err(EngineError::MalformedModel(format!(
                        "{context} has non-finite coefficient on {}",
                        self.variables[var].name
                    )));
                }
            }
            Ok(())
        };
        for constraint in &self.constraints {
            check_expr(&constraint.expr, &constraint.label)?;
            if !constraint.rhs.is_finite() {
                return Err(EngineError::MalformedModel(format!(
                    "{} has non-finite right-hand side",
                    constraint.label
                )));
            }
        }
        check_expr(&self.objective, "objective")?;
        Ok(())
    }
}
