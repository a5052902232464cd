// ABOUTME: Model builder: translates a solve request into the linear-program IR
// ABOUTME: Gram variables, calorie band, hard/soft macros, micro rows, deviation and minimax variables
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Async-IO.org

//! Assembles decision variables, hard and soft constraints, and auxiliary
//! deviation variables from a validated solve request.
//!
//! Every soft goal is expressed as a deviation normalized into `[0, 1]` and
//! folded under a minimax variable, so the objective compiler can rank whole
//! goal families against each other with true upper bounds in hand.

use remy_core::models::{
    ConstraintMode, MacroNutrient, MacroRatioTarget, NutrientCoefficients, SolveRequest,
};

use crate::model::{LinearExpr, LinearModel, Sense, VarId};

/// One candidate objective term with a declared true upper bound.
///
/// An underestimated `max_value` silently breaks lexicographic ordering, so
/// every bound here must hold for any feasible point of the model.
#[derive(Debug, Clone)]
pub struct ObjectiveTerm {
    /// Stable label for logs.
    pub label: &'static str,
    /// The expression to minimize.
    pub expr: LinearExpr,
    /// True upper bound on the expression over the feasible region.
    pub max_value: f64,
}

/// The candidate terms the builder produced; absent when inputs were empty.
#[derive(Debug, Clone, Default)]
pub struct TermCatalog {
    /// Worst normalized micronutrient shortfall.
    pub worst_shortfall: Option<ObjectiveTerm>,
    /// Sum of normalized micronutrient shortfalls.
    pub shortfall_sum: Option<ObjectiveTerm>,
    /// Worst normalized proximity to a tolerable upper intake level.
    pub worst_ul_proximity: Option<ObjectiveTerm>,
    /// Combined macro fit: soft gram deviations and/or ratio deviations.
    pub macro_fit: Option<ObjectiveTerm>,
    /// Largest single-ingredient mass (diversity pressure).
    pub diversity: Option<ObjectiveTerm>,
    /// Total meal mass.
    pub total_weight: Option<ObjectiveTerm>,
}

/// Builder output: the LP plus everything needed to read the solution back.
#[derive(Debug)]
pub struct BuiltModel {
    /// The assembled linear program (objective set later by the compiler).
    pub model: LinearModel,
    /// Gram variable per ingredient, parallel to the request order.
    pub ingredient_vars: Vec<VarId>,
    /// Candidate objective terms for the lexicographic compiler.
    pub terms: TermCatalog,
}

/// Build the linear program for a validated request.
///
/// `coefficients` must be parallel to `request.ingredients`.
#[must_use]
pub fn build(
    request: &SolveRequest,
    coefficients: &[NutrientCoefficients],
    epsilon: f64,
) -> BuiltModel {
    let mut ctx = BuildContext {
        request,
        coefficients,
        epsilon,
        model: LinearModel::new(),
        ingredient_vars: Vec::with_capacity(request.ingredients.len()),
        terms: TermCatalog::default(),
    };

    ctx.add_ingredient_variables();
    ctx.add_calorie_band();
    let (soft_deviations, governed) = ctx.add_macro_constraints();
    ctx.add_micro_upper_limits();
    ctx.add_micro_shortfalls();
    ctx.add_ul_proximity();
    let ratio = ctx.add_macro_ratio(&governed);
    ctx.combine_macro_fit(soft_deviations, ratio);
    ctx.add_diversity();
    ctx.add_total_weight();

    BuiltModel {
        model: ctx.model,
        ingredient_vars: ctx.ingredient_vars,
        terms: ctx.terms,
    }
}

/// Worst-ratio deviation folded under a minimax variable, with its bound.
struct RatioTerm {
    var: VarId,
    max_value: f64,
}

struct BuildContext<'a> {
    request: &'a SolveRequest,
    coefficients: &'a [NutrientCoefficients],
    epsilon: f64,
    model: LinearModel,
    ingredient_vars: Vec<VarId>,
    terms: TermCatalog,
}

impl BuildContext<'_> {
    fn add_ingredient_variables(&mut self) {
        for (index, bound) in self.request.ingredients.iter().enumerate() {
            let name = format!("g{index}_{}", bound.food_id);
            let var = self.model.add_variable(name, bound.min_grams, bound.max_grams);
            self.ingredient_vars.push(var);
        }
    }

    /// `target - tol <= total calories <= target + tol`, tolerance clamped.
    fn add_calorie_band(&mut self) {
        let tolerance = self.request.calorie_tolerance.max(0.0);
        let target = self.request.meal_calorie_target;
        let calories = self.ingredient_expr(|c| c.calories);
        self.model.add_constraint(
            "calories_lower",
            calories.clone(),
            Sense::Ge,
            target - tolerance,
        );
        self.model
            .add_constraint("calories_upper", calories, Sense::Le, target + tolerance);
    }

    /// Hard constraints become rows; soft ones become normalized deviations.
    ///
    /// Returns the soft deviation expressions and the set of macros governed
    /// by any active constraint (those are excluded from ratio targets).
    fn add_macro_constraints(&mut self) -> (Vec<LinearExpr>, Vec<MacroNutrient>) {
        let mut soft_deviations = Vec::new();
        let mut governed = Vec::new();

        for constraint in &self.request.macro_constraints {
            if constraint.mode == ConstraintMode::None {
                continue;
            }
            if !governed.contains(&constraint.nutrient) {
                governed.push(constraint.nutrient);
            }
            let amount = self.ingredient_expr(|c| c.macro_amount(constraint.nutrient));
            let key = constraint.nutrient.key();
            let target = constraint.grams;

            if constraint.hard {
                match constraint.mode {
                    ConstraintMode::Ge => {
                        self.model
                            .add_constraint(format!("{key}_floor"), amount, Sense::Ge, target);
                    }
                    ConstraintMode::Le => {
                        self.model
                            .add_constraint(format!("{key}_ceiling"), amount, Sense::Le, target);
                    }
                    ConstraintMode::Eq => {
                        // zero-width band: one upper and one lower row
                        self.model.add_constraint(
                            format!("{key}_band_lower"),
                            amount.clone(),
                            Sense::Ge,
                            target,
                        );
                        self.model.add_constraint(
                            format!("{key}_band_upper"),
                            amount,
                            Sense::Le,
                            target,
                        );
                    }
                    ConstraintMode::None => unreachable!("filtered above"),
                }
                continue;
            }

            // Soft: deviation normalized by the larger of the target and the
            // maximum the nutrient can reach under the gram bounds.
            let reach = self.max_achievable(|c| c.macro_amount(constraint.nutrient));
            let divisor = target.max(reach);
            if divisor < self.epsilon {
                continue;
            }
            match constraint.mode {
                ConstraintMode::Ge => {
                    let dev = self.model.add_variable(format!("soft_{key}_short"), 0.0, 1.0);
                    let mut row = amount;
                    row.push(dev, divisor);
                    self.model
                        .add_constraint(format!("soft_{key}_floor"), row, Sense::Ge, target);
                    soft_deviations.push(LinearExpr::variable(dev));
                }
                ConstraintMode::Le => {
                    let dev = self
                        .model
                        .add_variable(format!("soft_{key}_excess"), 0.0, 1.0);
                    let mut row = amount;
                    row.push(dev, -divisor);
                    self.model
                        .add_constraint(format!("soft_{key}_ceiling"), row, Sense::Le, target);
                    soft_deviations.push(LinearExpr::variable(dev));
                }
                ConstraintMode::Eq => {
                    let over = self.model.add_variable(format!("soft_{key}_over"), 0.0, 1.0);
                    let under = self
                        .model
                        .add_variable(format!("soft_{key}_under"), 0.0, 1.0);
                    let mut row = amount;
                    row.push(under, divisor);
                    row.push(over, -divisor);
                    self.model
                        .add_constraint(format!("soft_{key}_band"), row, Sense::Eq, target);
                    let mut dev = LinearExpr::variable(over);
                    dev.push(under, 1.0);
                    soft_deviations.push(dev);
                }
                ConstraintMode::None => unreachable!("filtered above"),
            }
        }

        (soft_deviations, governed)
    }

    /// One hard row per positive remaining ceiling; nutrients no ingredient
    /// carries are skipped because their row could never bind.
    fn add_micro_upper_limits(&mut self) {
        for (key, &ceiling) in &self.request.micro_upper_limits {
            if ceiling < self.epsilon {
                continue;
            }
            if self.max_achievable(|c| c.micro(key)) < self.epsilon {
                continue;
            }
            let amount = self.ingredient_expr(|c| c.micro(key));
            self.model
                .add_constraint(format!("ul_{key}"), amount, Sense::Le, ceiling);
        }
    }

    /// Per-target shortfall `s_k = max(0, (T - achieved) / T)` plus the
    /// worst-case and summed aggregates.
    fn add_micro_shortfalls(&mut self) {
        let mut shortfalls = Vec::new();
        for (key, &target) in &self.request.micro_targets {
            if target < self.epsilon {
                continue;
            }
            let shortfall = self.model.add_variable(format!("short_{key}"), 0.0, 1.0);
            let mut row = self.ingredient_expr(|c| c.micro(key));
            row.push(shortfall, target);
            self.model
                .add_constraint(format!("target_{key}"), row, Sense::Ge, target);
            shortfalls.push(shortfall);
        }
        if shortfalls.is_empty() {
            return;
        }

        let deviations: Vec<LinearExpr> =
            shortfalls.iter().map(|&s| LinearExpr::variable(s)).collect();
        let worst = self.fold_minimax("worst_micro_shortfall", &deviations, 1.0);
        self.terms.worst_shortfall = Some(ObjectiveTerm {
            label: "worst_micro_shortfall",
            expr: LinearExpr::variable(worst),
            max_value: 1.0,
        });

        let mut sum = LinearExpr::new();
        for &s in &shortfalls {
            sum.push(s, 1.0);
        }
        self.terms.shortfall_sum = Some(ObjectiveTerm {
            label: "micro_shortfall_sum",
            expr: sum,
            max_value: shortfalls.len() as f64,
        });
    }

    /// For nutrients with both a target and headroom below their tolerable
    /// upper level, measure how close the meal drifts toward the ceiling.
    fn add_ul_proximity(&mut self) {
        let mut proximities = Vec::new();
        for (key, &target) in &self.request.micro_targets {
            let Some(&ceiling) = self.request.micro_upper_limits.get(key) else {
                continue;
            };
            let headroom = ceiling - target;
            if target < self.epsilon || headroom < self.epsilon {
                continue;
            }
            if self.max_achievable(|c| c.micro(key)) < self.epsilon {
                continue;
            }
            let proximity = self.model.add_variable(format!("ulprox_{key}"), 0.0, 1.0);
            let mut row = self.ingredient_expr(|c| c.micro(key));
            row.push(proximity, -headroom);
            self.model
                .add_constraint(format!("ulprox_{key}_row"), row, Sense::Le, target);
            proximities.push(LinearExpr::variable(proximity));
        }
        if proximities.is_empty() {
            return;
        }
        let worst = self.fold_minimax("worst_ul_proximity", &proximities, 1.0);
        self.terms.worst_ul_proximity = Some(ObjectiveTerm {
            label: "worst_ul_proximity",
            expr: LinearExpr::variable(worst),
            max_value: 1.0,
        });
    }

    /// Calorie-share deviation per unconstrained caloric macro, as a
    /// positive/negative split against a constant total-calorie base.
    ///
    /// The base `C_tot = meal target + pinned calories` is held constant
    /// rather than re-derived from the solution to preserve linearity.
    fn add_macro_ratio(&mut self, governed: &[MacroNutrient]) -> Option<RatioTerm> {
        let ratio = self.request.macro_ratio.as_ref()?;
        let total_calories = self.request.meal_calorie_target + ratio.pinned_calories();
        if total_calories < self.epsilon {
            return None;
        }
        // The calorie band caps meal calories at target + tolerance, so a
        // share can exceed 1 by at most tolerance / C_tot.
        let cap = 1.0 + self.request.calorie_tolerance.max(0.0) / total_calories;

        let mut deviations = Vec::new();
        for nutrient in MacroNutrient::CALORIC {
            if governed.contains(&nutrient) {
                continue;
            }
            deviations.push(self.ratio_deviation(ratio, nutrient, total_calories, cap));
        }
        if deviations.is_empty() {
            return None;
        }
        let worst = self.fold_minimax("worst_ratio_dev", &deviations, cap);
        Some(RatioTerm {
            var: worst,
            max_value: cap,
        })
    }

    fn ratio_deviation(
        &mut self,
        ratio: &MacroRatioTarget,
        nutrient: MacroNutrient,
        total_calories: f64,
        cap: f64,
    ) -> LinearExpr {
        let key = nutrient.key();
        let factor = nutrient.kcal_per_gram();
        let over = self
            .model
            .add_variable(format!("ratio_{key}_over"), 0.0, cap);
        let under = self
            .model
            .add_variable(format!("ratio_{key}_under"), 0.0, cap);

        // share(nutrient) - target_share = over - under, with
        // share = factor * (meal grams + pinned grams) / C_tot
        let mut row = LinearExpr::new();
        for (&var, coefficient) in self
            .ingredient_vars
            .iter()
            .zip(self.coefficients.iter().map(|c| c.macro_amount(nutrient)))
        {
            row.push(var, factor * coefficient / total_calories);
        }
        row.push(over, -1.0);
        row.push(under, 1.0);
        let rhs = ratio.target_pct(nutrient) / 100.0
            - factor * ratio.pinned_grams(nutrient) / total_calories;
        self.model
            .add_constraint(format!("ratio_{key}_split"), row, Sense::Eq, rhs);

        let mut deviation = LinearExpr::variable(over);
        deviation.push(under, 1.0);
        deviation
    }

    /// One "macro fit" term: soft deviations and ratio deviations, folded
    /// under a further minimax variable when both exist.
    fn combine_macro_fit(&mut self, soft_deviations: Vec<LinearExpr>, ratio: Option<RatioTerm>) {
        let worst_soft = if soft_deviations.is_empty() {
            None
        } else {
            Some(self.fold_minimax("worst_soft_dev", &soft_deviations, 1.0))
        };

        self.terms.macro_fit = match (worst_soft, ratio) {
            (Some(soft), Some(ratio)) => {
                let bound = ratio.max_value.max(1.0);
                let combined = self.fold_minimax(
                    "worst_macro_dev",
                    &[LinearExpr::variable(soft), LinearExpr::variable(ratio.var)],
                    bound,
                );
                Some(ObjectiveTerm {
                    label: "macro_fit",
                    expr: LinearExpr::variable(combined),
                    max_value: bound,
                })
            }
            (Some(soft), None) => Some(ObjectiveTerm {
                label: "macro_fit",
                expr: LinearExpr::variable(soft),
                max_value: 1.0,
            }),
            (None, Some(ratio)) => Some(ObjectiveTerm {
                label: "macro_fit",
                expr: LinearExpr::variable(ratio.var),
                max_value: ratio.max_value,
            }),
            (None, None) => None,
        };
    }

    /// `div >= grams_i` for every ingredient; minimizing `div` spreads mass.
    fn add_diversity(&mut self) {
        let largest_max = self
            .request
            .ingredients
            .iter()
            .map(|b| b.max_grams)
            .fold(0.0_f64, f64::max);
        let deviations: Vec<LinearExpr> = self
            .ingredient_vars
            .iter()
            .map(|&v| LinearExpr::variable(v))
            .collect();
        let div = self.fold_minimax("diversity_ceiling", &deviations, largest_max);
        self.terms.diversity = Some(ObjectiveTerm {
            label: "ingredient_diversity",
            expr: LinearExpr::variable(div),
            max_value: largest_max,
        });
    }

    fn add_total_weight(&mut self) {
        let mut total = LinearExpr::new();
        let mut max_value = 0.0;
        for (&var, bound) in self.ingredient_vars.iter().zip(&self.request.ingredients) {
            total.push(var, 1.0);
            max_value += bound.max_grams;
        }
        self.terms.total_weight = Some(ObjectiveTerm {
            label: "total_weight",
            expr: total,
            max_value,
        });
    }

    /// Σ over ingredients of `per_gram(coefficient) * grams`.
    fn ingredient_expr(&self, per_gram: impl Fn(&NutrientCoefficients) -> f64) -> LinearExpr {
        let mut expr = LinearExpr::new();
        for (&var, coefficients) in self.ingredient_vars.iter().zip(self.coefficients) {
            expr.push(var, per_gram(coefficients));
        }
        expr
    }

    /// Largest value the quantity can take under the gram upper bounds.
    fn max_achievable(&self, per_gram: impl Fn(&NutrientCoefficients) -> f64) -> f64 {
        self.request
            .ingredients
            .iter()
            .zip(self.coefficients)
            .map(|(bound, coefficients)| per_gram(coefficients) * bound.max_grams)
            .sum()
    }

    /// Add `worst >= deviation` rows and return the minimax variable.
    fn fold_minimax(&mut self, name: &str, deviations: &[LinearExpr], upper: f64) -> VarId {
        let worst = self.model.add_variable(name, 0.0, upper);
        for (index, deviation) in deviations.iter().enumerate() {
            let mut row = deviation.clone();
            row.push(worst, -1.0);
            self.model
                .add_constraint(format!("{name}_bound_{index}"), row, Sense::Le, 0.0);
        }
        worst
    }
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]

    use std::collections::BTreeMap;

    use remy_core::models::{
        ConstraintMode, IngredientBound, MacroConstraint, MacroNutrient, NutrientProfile,
        SolveRequest,
    };

    use super::*;

    fn rice_and_oil() -> SolveRequest {
        let mut request = SolveRequest::default();
        request.foods.insert(
            "rice".into(),
            NutrientProfile {
                calories: 130.0,
                protein_g: 2.7,
                carbohydrates_g: 28.0,
                micros: BTreeMap::from([("iron_mg".into(), 0.2)]),
                ..NutrientProfile::default()
            },
        );
        request.foods.insert(
            "oil".into(),
            NutrientProfile {
                calories: 884.0,
                fat_g: 100.0,
                ..NutrientProfile::default()
            },
        );
        request
            .ingredients
            .push(IngredientBound::new("rice", 0.0, 400.0));
        request
            .ingredients
            .push(IngredientBound::new("oil", 0.0, 20.0));
        request.meal_calorie_target = 600.0;
        request.calorie_tolerance = 50.0;
        request
    }

    fn coefficients(request: &SolveRequest) -> Vec<NutrientCoefficients> {
        request
            .ingredients
            .iter()
            .map(|b| request.foods[&b.food_id].per_gram())
            .collect()
    }

    #[test]
    fn gram_variables_carry_request_bounds() {
        let request = rice_and_oil();
        let built = build(&request, &coefficients(&request), 1e-9);
        assert_eq!(built.ingredient_vars.len(), 2);
        let rice = &built.model.variables()[built.ingredient_vars[0]];
        assert!((rice.lower).abs() < 1e-12);
        assert!((rice.upper - 400.0).abs() < 1e-12);
    }

    #[test]
    fn hard_eq_emits_zero_width_band() {
        let mut request = rice_and_oil();
        request.macro_constraints.push(MacroConstraint {
            nutrient: MacroNutrient::Protein,
            mode: ConstraintMode::Eq,
            grams: 10.0,
            hard: true,
        });
        let built = build(&request, &coefficients(&request), 1e-9);
        let labels: Vec<&str> = built
            .model
            .constraints()
            .iter()
            .map(|c| c.label.as_str())
            .collect();
        assert!(labels.contains(&"protein_band_lower"));
        assert!(labels.contains(&"protein_band_upper"));
    }

    #[test]
    fn soft_constraint_produces_macro_fit_term() {
        let mut request = rice_and_oil();
        request.macro_constraints.push(MacroConstraint {
            nutrient: MacroNutrient::Protein,
            mode: ConstraintMode::Ge,
            grams: 15.0,
            hard: false,
        });
        let built = build(&request, &coefficients(&request), 1e-9);
        let term = built.terms.macro_fit.as_ref().unwrap();
        assert!((term.max_value - 1.0).abs() < 1e-12);
    }

    #[test]
    fn zero_coefficient_upper_limits_are_skipped() {
        let mut request = rice_and_oil();
        request.micro_upper_limits.insert("selenium_mcg".into(), 55.0);
        let built = build(&request, &coefficients(&request), 1e-9);
        assert!(built
            .model
            .constraints()
            .iter()
            .all(|c| c.label != "ul_selenium_mcg"));
    }

    #[test]
    fn micro_target_creates_shortfall_terms() {
        let mut request = rice_and_oil();
        request.micro_targets.insert("iron_mg".into(), 18.0);
        let built = build(&request, &coefficients(&request), 1e-9);
        assert!(built.terms.worst_shortfall.is_some());
        let sum = built.terms.shortfall_sum.as_ref().unwrap();
        assert!((sum.max_value - 1.0).abs() < 1e-12, "one target, sum bound 1");
    }

    #[test]
    fn governed_macro_is_excluded_from_ratio() {
        let mut request = rice_and_oil();
        request.macro_constraints.push(MacroConstraint {
            nutrient: MacroNutrient::Protein,
            mode: ConstraintMode::Ge,
            grams: 15.0,
            hard: true,
        });
        request.macro_ratio = Some(remy_core::models::MacroRatioTarget {
            carb_pct: 50.0,
            protein_pct: 25.0,
            fat_pct: 25.0,
            ..Default::default()
        });
        let built = build(&request, &coefficients(&request), 1e-9);
        let names: Vec<&str> = built
            .model
            .variables()
            .iter()
            .map(|v| v.name.as_str())
            .collect();
        assert!(names.contains(&"ratio_carbs_over"));
        assert!(
            !names.contains(&"ratio_protein_over"),
            "hard-constrained macro must not get a ratio row"
        );
    }

    #[test]
    fn diversity_bound_is_largest_single_max() {
        let request = rice_and_oil();
        let built = build(&request, &coefficients(&request), 1e-9);
        let term = built.terms.diversity.as_ref().unwrap();
        assert!((term.max_value - 400.0).abs() < 1e-12);
        let total = built.terms.total_weight.as_ref().unwrap();
        assert!((total.max_value - 420.0).abs() < 1e-12);
    }
}
