// ABOUTME: Engine configuration with environment overrides and a process-wide default
// ABOUTME: Numeric tolerances and the default micronutrient coverage strategy
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Engine Configuration Module
//!
//! Type-safe configuration for the solve pipeline. Values come from
//! environment variables when set, otherwise from compiled defaults.
//!
//! # Configuration Methods
//!
//! 1. Environment variables (highest priority):
//!    ```bash
//!    export REMY_MICRO_STRATEGY=breadth
//!    export REMY_EPSILON=1e-9
//!    ```
//!
//! 2. Default values (if env vars not set)

use std::env;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use remy_core::constants::tolerance;
use remy_core::models::MicroStrategy;

/// Global configuration instance, initialized once per process.
static GLOBAL_CONFIG: OnceLock<EngineConfig> = OnceLock::new();

/// Engine-wide tunables consumed by the model builder and interpreter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Magnitudes below this are treated as exactly zero in normalizations.
    #[serde(default = "default_epsilon")]
    pub epsilon: f64,

    /// Feasibility slack accepted from the LP backend.
    #[serde(default = "default_feasibility_tolerance")]
    pub feasibility_tolerance: f64,

    /// Coverage strategy used when the request leaves it unspecified.
    #[serde(default)]
    pub default_micro_strategy: MicroStrategy,
}

fn default_epsilon() -> f64 {
    tolerance::EPSILON
}

fn default_feasibility_tolerance() -> f64 {
    tolerance::FEASIBILITY
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            epsilon: default_epsilon(),
            feasibility_tolerance: default_feasibility_tolerance(),
            default_micro_strategy: MicroStrategy::default(),
        }
    }
}

impl EngineConfig {
    /// Build the configuration from the environment, falling back to defaults
    /// for anything unset or unparseable.
    #[must_use]
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Some(epsilon) = parse_env_f64("REMY_EPSILON") {
            if epsilon > 0.0 {
                config.epsilon = epsilon;
            }
        }
        if let Some(tol) = parse_env_f64("REMY_FEASIBILITY_TOLERANCE") {
            if tol > 0.0 {
                config.feasibility_tolerance = tol;
            }
        }
        match env::var("REMY_MICRO_STRATEGY").as_deref() {
            Ok("breadth") => config.default_micro_strategy = MicroStrategy::Breadth,
            Ok("depth") => config.default_micro_strategy = MicroStrategy::Depth,
            _ => {}
        }
        config
    }

    /// The process-wide configuration, lazily read from the environment on
    /// first access and immutable afterwards.
    pub fn global() -> &'static Self {
        GLOBAL_CONFIG.get_or_init(Self::from_env)
    }
}

fn parse_env_f64(key: &str) -> Option<f64> {
    env::var(key).ok()?.parse().ok().filter(|v: &f64| v.is_finite())
}
