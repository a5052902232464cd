// ABOUTME: Solve request contract: goals, constraints, priorities, and annotation context
// ABOUTME: Carries everything one stateless solve consumes; validation rejects contradictory input
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Nutrition Intelligence

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::errors::ConfigViolation;
use crate::models::{IngredientBound, MacroNutrient, NutrientProfile};

/// Direction of a macro constraint.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintMode {
    /// Total amount must reach at least the target.
    Ge,
    /// Total amount must stay at or below the target.
    Le,
    /// Total amount must equal the target (a zero-width band when hard).
    Eq,
    /// The constraint is switched off; the nutrient stays unguided.
    None,
}

/// A gram-level constraint on one macronutrient.
///
/// Hard constraints become inequalities the solution must satisfy; soft
/// constraints become normalized deviation terms the objective minimizes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MacroConstraint {
    /// Which macronutrient is constrained.
    pub nutrient: MacroNutrient,
    /// Constraint direction, `none` disables it.
    pub mode: ConstraintMode,
    /// Target amount in grams.
    pub grams: f64,
    /// Hard constraints must hold; soft ones are best-effort.
    pub hard: bool,
}

/// Calorie-share targets for the three caloric macros.
///
/// Pinned grams describe food consumed outside the optimized meal; their
/// calories count toward each macro's share but are not decision variables.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MacroRatioTarget {
    /// Target share of total calories from carbohydrates (percent).
    pub carb_pct: f64,
    /// Target share of total calories from protein (percent).
    pub protein_pct: f64,
    /// Target share of total calories from fat (percent).
    pub fat_pct: f64,
    /// Carbohydrate grams already consumed outside the meal.
    pub pinned_carb_grams: f64,
    /// Protein grams already consumed outside the meal.
    pub pinned_protein_grams: f64,
    /// Fat grams already consumed outside the meal.
    pub pinned_fat_grams: f64,
}

impl MacroRatioTarget {
    /// Target percentage for one caloric macro (fiber has no share target).
    #[must_use]
    pub const fn target_pct(&self, nutrient: MacroNutrient) -> f64 {
        match nutrient {
            MacroNutrient::Carbs => self.carb_pct,
            MacroNutrient::Protein => self.protein_pct,
            MacroNutrient::Fat => self.fat_pct,
            MacroNutrient::Fiber => 0.0,
        }
    }

    /// Pinned grams for one caloric macro.
    #[must_use]
    pub const fn pinned_grams(&self, nutrient: MacroNutrient) -> f64 {
        match nutrient {
            MacroNutrient::Carbs => self.pinned_carb_grams,
            MacroNutrient::Protein => self.pinned_protein_grams,
            MacroNutrient::Fat => self.pinned_fat_grams,
            MacroNutrient::Fiber => 0.0,
        }
    }

    /// Calories already consumed outside the meal, by Atwater factors.
    #[must_use]
    pub fn pinned_calories(&self) -> f64 {
        MacroNutrient::CALORIC
            .iter()
            .map(|&m| m.kcal_per_gram() * self.pinned_grams(m))
            .sum()
    }
}

/// Reference intake data for one micronutrient, supplied by the caller.
///
/// DRI tables are an external collaborator; the engine only annotates its
/// coverage report with these values and never derives constraints from them.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MicroReference {
    /// Demographic-specific recommended daily intake.
    pub dri: f64,
    /// Estimated average requirement, informational only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ear: Option<f64>,
    /// Tolerable upper intake level, informational only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ul: Option<f64>,
    /// Amount already consumed outside the optimized meal.
    pub pinned: f64,
}

/// Biological sex used by DRI tables.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Sex {
    /// Male reference intakes.
    Male,
    /// Female reference intakes.
    Female,
}

/// DRI age bands.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum AgeBand {
    /// Ages 9 through 13.
    #[serde(rename = "9-13")]
    Years9To13,
    /// Ages 14 through 18.
    #[serde(rename = "14-18")]
    Years14To18,
    /// Ages 19 through 30.
    #[serde(rename = "19-30")]
    Years19To30,
    /// Ages 31 through 50.
    #[serde(rename = "31-50")]
    Years31To50,
    /// Ages 51 through 70.
    #[serde(rename = "51-70")]
    Years51To70,
    /// Ages above 70.
    #[serde(rename = "70+")]
    Over70,
}

/// Demographic context, used only to annotate logs and responses.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Demographics {
    /// Biological sex for DRI lookup on the caller's side.
    pub sex: Sex,
    /// DRI age band.
    pub age_band: AgeBand,
}

/// The competing goals a caller can rank.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum PriorityGoal {
    /// Close micronutrient shortfalls (strategy decides worst-first or sum-first).
    MicronutrientCoverage,
    /// Match macro calorie shares and soft gram targets.
    MacroRatio,
    /// Spread mass across ingredients instead of concentrating it.
    IngredientDiversity,
    /// Keep the total meal mass down.
    TotalWeight,
}

impl PriorityGoal {
    /// Default lexicographic order when the caller specifies none.
    pub const DEFAULT_ORDER: [Self; 4] = [
        Self::MicronutrientCoverage,
        Self::MacroRatio,
        Self::IngredientDiversity,
        Self::TotalWeight,
    ];
}

/// How micronutrient coverage is prioritized within its slot.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum MicroStrategy {
    /// Minimize the single worst shortfall first, then the sum.
    #[default]
    Depth,
    /// Minimize the summed shortfall first, then the worst case.
    Breadth,
}

/// Everything one solve consumes; the engine holds no other state.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SolveRequest {
    /// Candidate foods with their gram intervals, in caller order.
    pub ingredients: Vec<IngredientBound>,
    /// Per-100g composition for every candidate food.
    pub foods: BTreeMap<String, NutrientProfile>,
    /// Calorie target for the optimized meal (kcal).
    pub meal_calorie_target: f64,
    /// Allowed distance from the calorie target; clamped to `>= 0`.
    pub calorie_tolerance: f64,
    /// Gram-level macro constraints, hard or soft.
    #[serde(default)]
    pub macro_constraints: Vec<MacroConstraint>,
    /// Remaining required micronutrient amounts (DRI minus pinned).
    #[serde(default)]
    pub micro_targets: BTreeMap<String, f64>,
    /// Remaining safe micronutrient ceilings.
    #[serde(default)]
    pub micro_upper_limits: BTreeMap<String, f64>,
    /// Optional calorie-share targets for the caloric macros.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub macro_ratio: Option<MacroRatioTarget>,
    /// Lexicographic goal order; omitted goals follow in default order.
    #[serde(default)]
    pub priorities: Vec<PriorityGoal>,
    /// Coverage strategy; `None` falls back to the engine configuration.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub micro_strategy: Option<MicroStrategy>,
    /// Demographic annotation context, never used for computation.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub demographics: Option<Demographics>,
    /// The nutrients the caller actually optimized for, echoed per result.
    #[serde(default)]
    pub optimized_nutrients: BTreeSet<String>,
    /// Reference intake annotation data per tracked micronutrient.
    #[serde(default)]
    pub micro_references: BTreeMap<String, MicroReference>,
}

impl SolveRequest {
    /// Check the request for configuration errors.
    ///
    /// A violation is answered with a deterministic infeasible response, not
    /// an `Err`; this merely names the reason for logs.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigViolation`] found: empty ingredient list,
    /// contradictory or non-finite bounds, or a food missing from the table.
    pub fn validate(&self) -> Result<(), ConfigViolation> {
        if self.ingredients.is_empty() {
            return Err(ConfigViolation::EmptyIngredients);
        }
        for bound in &self.ingredients {
            if !bound.is_well_formed() {
                return Err(ConfigViolation::InvalidBound {
                    food_id: bound.food_id.clone(),
                    min_grams: bound.min_grams,
                    max_grams: bound.max_grams,
                });
            }
            if !self.foods.contains_key(&bound.food_id) {
                return Err(ConfigViolation::UnknownFood {
                    food_id: bound.food_id.clone(),
                });
            }
        }
        if !self.meal_calorie_target.is_finite() {
            return Err(ConfigViolation::NonFinite {
                field: "meal_calorie_target".into(),
            });
        }
        if !self.calorie_tolerance.is_finite() {
            return Err(ConfigViolation::NonFinite {
                field: "calorie_tolerance".into(),
            });
        }
        Ok(())
    }

    /// Priority order for this request: the caller's ranking, then any
    /// omitted goals in default order.
    #[must_use]
    pub fn priority_order(&self) -> Vec<PriorityGoal> {
        let mut order = self.priorities.clone();
        for goal in PriorityGoal::DEFAULT_ORDER {
            if !order.contains(&goal) {
                order.push(goal);
            }
        }
        order
    }
}
