// ABOUTME: Solver adapter: backend trait and status/outcome types for the LP IR
// ABOUTME: Pure single-shot contract; non-optimal verdicts surface upward uniformly
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Common interface for LP backends.
//!
//! The adapter is a pure, synchronous, single-shot call with no retries. Any
//! non-optimal verdict is collapsed into an infeasible response at the engine
//! boundary; true unboundedness is structurally unreachable because every
//! model variable is bounded, but the status is still reported distinctly
//! here so logs can tell the cases apart.

pub mod good_lp_backend;
pub mod runtime;

use remy_core::errors::EngineError;

use crate::model::LinearModel;

/// Verdict from one LP solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LpStatus {
    /// An optimal primal solution was found.
    Optimal,
    /// The constraint system admits no feasible point.
    Infeasible,
    /// The objective is unbounded below (should be unreachable here).
    Unbounded,
    /// The backend failed without a well-formed verdict.
    Error,
}

/// Solve outcome: a status and, when optimal, the primal values per variable.
#[derive(Debug, Clone)]
pub struct LpOutcome {
    /// Solve verdict.
    pub status: LpStatus,
    /// Primal value per [`crate::model::VarId`]; empty unless optimal.
    pub values: Vec<f64>,
}

/// Common interface for LP solvers.
pub trait LpBackend: Send + Sync {
    /// Backend name for logging and diagnostics.
    fn name(&self) -> &'static str;

    /// Minimize the model's objective subject to its constraints and bounds.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::MalformedModel`] when the model fails
    /// structural validation; backend breakdowns are reported through
    /// [`LpStatus::Error`] rather than `Err`.
    fn solve(&self, model: &LinearModel) -> Result<LpOutcome, EngineError>;
}
