// ABOUTME: Shared solver runtime: lazily constructed, idempotent, immutable after init
// ABOUTME: Safe to warm up ahead of the first request and to reuse across concurrent calls
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Process-wide solver runtime.
//!
//! The runtime is modeled as an explicitly owned resource rather than ambient
//! global mutation: it is constructed at most once behind a `OnceLock`, never
//! torn down, and holds no per-call state, so sequential and concurrent
//! solves cannot leak into each other. With the pure-Rust microlp backend
//! construction is cheap; hosts that swap in a heavier backend keep the same
//! init discipline for free.

use std::sync::OnceLock;

use tracing::debug;

use crate::solver::good_lp_backend::GoodLpBackend;
use crate::solver::LpBackend;

static RUNTIME: OnceLock<SolverRuntime> = OnceLock::new();

/// The shared, immutable solver runtime.
#[derive(Debug)]
pub struct SolverRuntime {
    backend: GoodLpBackend,
}

impl SolverRuntime {
    /// The process-wide runtime, constructed on first use.
    pub fn global() -> &'static Self {
        RUNTIME.get_or_init(|| {
            let runtime = Self {
                backend: GoodLpBackend,
            };
            debug!(backend = runtime.backend.name(), "solver runtime initialized");
            runtime
        })
    }

    /// Eagerly initialize the runtime ahead of the first real request.
    ///
    /// Idempotent; calling it any number of times, from any thread, is safe.
    pub fn warm_up() {
        let _ = Self::global();
    }

    /// The backend all solves run through.
    pub fn backend(&self) -> &dyn LpBackend {
        &self.backend
    }
}
