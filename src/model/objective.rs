// ABOUTME: Lexicographic objective compiler: orders candidate terms and weights them
// ABOUTME: Bottom-up dominance weights reproduce strict priority order in one weighted sum
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Compiles the builder's candidate terms into a single minimization
//! objective that honors strict lexicographic precedence.
//!
//! Weights are computed bottom-up: the last term gets weight 1, and
//! `weight[i] = weight[i+1] * max_value[i+1] + 1`. One unit of improvement at
//! priority `i` therefore outweighs the entire attainable range of every
//! lower priority, so a single solve reproduces a multi-phase lexicographic
//! optimization. This only holds while every declared `max_value` is a true
//! upper bound.

use std::collections::BTreeMap;

use remy_core::models::{MicroStrategy, PriorityGoal};

use crate::model::builder::{ObjectiveTerm, TermCatalog};
use crate::model::LinearExpr;

/// One term with its computed dominance weight, kept for logs and tests.
#[derive(Debug, Clone)]
pub struct WeightedTerm {
    /// Term label from the builder.
    pub label: &'static str,
    /// Dominance weight applied in the combined objective.
    pub weight: f64,
    /// Declared true upper bound of the term.
    pub max_value: f64,
}

/// The combined minimization objective plus its weight ledger.
#[derive(Debug, Clone)]
pub struct CompiledObjective {
    /// Weighted-sum expression to minimize.
    pub expr: LinearExpr,
    /// Terms in lexicographic order with their weights.
    pub weighted: Vec<WeightedTerm>,
}

/// Order the produced terms by the caller's priorities and weight them.
///
/// Terms the builder did not produce (empty inputs) are simply absent; the
/// weight ladder is computed over what exists.
#[must_use]
pub fn compile(
    order: &[PriorityGoal],
    strategy: MicroStrategy,
    terms: TermCatalog,
) -> CompiledObjective {
    let ordered = order_terms(order, strategy, terms);

    // weight[last] = 1; weight[i] = weight[i+1] * max_value[i+1] + 1
    let mut weights = vec![0.0; ordered.len()];
    let mut below = 1.0;
    for (index, term) in ordered.iter().enumerate().rev() {
        weights[index] = below;
        below = below * term.max_value.max(0.0) + 1.0;
    }

    let mut combined: BTreeMap<usize, f64> = BTreeMap::new();
    let mut weighted = Vec::with_capacity(ordered.len());
    for (term, weight) in ordered.into_iter().zip(weights) {
        for (var, coefficient) in term.expr.terms {
            *combined.entry(var).or_insert(0.0) += weight * coefficient;
        }
        weighted.push(WeightedTerm {
            label: term.label,
            weight,
            max_value: term.max_value,
        });
    }

    let mut expr = LinearExpr::new();
    for (var, coefficient) in combined {
        expr.push(var, coefficient);
    }
    CompiledObjective { expr, weighted }
}

/// Expand priority goals into the builder's terms, in precedence order.
///
/// The micronutrient-coverage slot expands to its shortfall terms in
/// strategy order, then the UL-proximity term: staying clear of toxicity
/// ceilings matters, but never at the cost of reaching a target.
fn order_terms(
    order: &[PriorityGoal],
    strategy: MicroStrategy,
    terms: TermCatalog,
) -> Vec<ObjectiveTerm> {
    let TermCatalog {
        mut worst_shortfall,
        mut shortfall_sum,
        mut worst_ul_proximity,
        mut macro_fit,
        mut diversity,
        mut total_weight,
    } = terms;

    let mut ordered = Vec::new();
    for goal in order {
        match goal {
            PriorityGoal::MicronutrientCoverage => {
                let (first, second) = match strategy {
                    MicroStrategy::Depth => (worst_shortfall.take(), shortfall_sum.take()),
                    MicroStrategy::Breadth => (shortfall_sum.take(), worst_shortfall.take()),
                };
                ordered.extend(first);
                ordered.extend(second);
                ordered.extend(worst_ul_proximity.take());
            }
            PriorityGoal::MacroRatio => ordered.extend(macro_fit.take()),
            PriorityGoal::IngredientDiversity => ordered.extend(diversity.take()),
            PriorityGoal::TotalWeight => ordered.extend(total_weight.take()),
        }
    }
    ordered
}
