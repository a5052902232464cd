// ABOUTME: Nutrient domain types: macro nutrients, per-100g profiles, per-gram coefficients
// ABOUTME: Implements the coefficient extraction that feeds the linear model builder
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Nutrition Intelligence

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::constants::energy;

/// Macronutrients the engine can constrain directly.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "snake_case")]
pub enum MacroNutrient {
    /// Carbohydrates (4 kcal/g)
    Carbs,
    /// Protein (4 kcal/g)
    Protein,
    /// Fat (9 kcal/g)
    Fat,
    /// Dietary fiber (no calorie contribution in ratio targets)
    Fiber,
}

impl MacroNutrient {
    /// Atwater energy factor for this macronutrient in kcal per gram.
    ///
    /// Fiber returns 0: ratio targets compare only the caloric macros and
    /// the food data already folds fiber energy into its calorie column.
    #[must_use]
    pub const fn kcal_per_gram(self) -> f64 {
        match self {
            Self::Carbs => energy::KCAL_PER_GRAM_CARBOHYDRATE,
            Self::Protein => energy::KCAL_PER_GRAM_PROTEIN,
            Self::Fat => energy::KCAL_PER_GRAM_FAT,
            Self::Fiber => 0.0,
        }
    }

    /// Stable key used in variable names and log fields.
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Carbs => "carbs",
            Self::Protein => "protein",
            Self::Fat => "fat",
            Self::Fiber => "fiber",
        }
    }

    /// The three macros that participate in calorie-share ratio targets.
    pub const CALORIC: [Self; 3] = [Self::Carbs, Self::Protein, Self::Fat];
}

/// Food composition per 100 g, as delivered by the (external) food database.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutrientProfile {
    /// Energy per 100 g (kcal)
    pub calories: f64,
    /// Protein per 100 g (grams)
    pub protein_g: f64,
    /// Fat per 100 g (grams)
    pub fat_g: f64,
    /// Carbohydrates per 100 g (grams)
    pub carbohydrates_g: f64,
    /// Dietary fiber per 100 g (grams)
    pub fiber_g: f64,
    /// Sparse micronutrient amounts per 100 g, keyed by nutrient id
    /// (an absent key means a zero coefficient)
    #[serde(default)]
    pub micros: BTreeMap<String, f64>,
}

impl NutrientProfile {
    /// Reduce this per-100g profile to per-gram linear coefficients.
    #[must_use]
    pub fn per_gram(&self) -> NutrientCoefficients {
        NutrientCoefficients {
            calories: self.calories / 100.0,
            protein_g: self.protein_g / 100.0,
            fat_g: self.fat_g / 100.0,
            carbohydrates_g: self.carbohydrates_g / 100.0,
            fiber_g: self.fiber_g / 100.0,
            micros: self
                .micros
                .iter()
                .map(|(key, amount)| (key.clone(), amount / 100.0))
                .collect(),
        }
    }
}

/// Per-gram linear coefficients of a food, the model builder's direct input.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NutrientCoefficients {
    /// Energy per gram (kcal)
    pub calories: f64,
    /// Protein per gram (grams)
    pub protein_g: f64,
    /// Fat per gram (grams)
    pub fat_g: f64,
    /// Carbohydrates per gram (grams)
    pub carbohydrates_g: f64,
    /// Dietary fiber per gram (grams)
    pub fiber_g: f64,
    /// Sparse micronutrient amounts per gram
    pub micros: BTreeMap<String, f64>,
}

impl NutrientCoefficients {
    /// Per-gram amount of the given macronutrient.
    #[must_use]
    pub fn macro_amount(&self, nutrient: MacroNutrient) -> f64 {
        match nutrient {
            MacroNutrient::Carbs => self.carbohydrates_g,
            MacroNutrient::Protein => self.protein_g,
            MacroNutrient::Fat => self.fat_g,
            MacroNutrient::Fiber => self.fiber_g,
        }
    }

    /// Per-gram amount of a micronutrient; absent keys are zero coefficients.
    #[must_use]
    pub fn micro(&self, key: &str) -> f64 {
        self.micros.get(key).copied().unwrap_or(0.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn per_gram_scales_all_columns() {
        let profile = NutrientProfile {
            calories: 130.0,
            protein_g: 2.7,
            fat_g: 0.3,
            carbohydrates_g: 28.0,
            fiber_g: 0.4,
            micros: BTreeMap::from([("iron_mg".into(), 0.2)]),
        };
        let per_gram = profile.per_gram();
        assert!((per_gram.calories - 1.3).abs() < 1e-12);
        assert!((per_gram.carbohydrates_g - 0.28).abs() < 1e-12);
        assert!((per_gram.micro("iron_mg") - 0.002).abs() < 1e-12);
        assert!((per_gram.micro("zinc_mg")).abs() < 1e-12, "absent key is zero");
    }

    #[test]
    fn caloric_macros_exclude_fiber() {
        assert!(!MacroNutrient::CALORIC.contains(&MacroNutrient::Fiber));
        assert!((MacroNutrient::Fiber.kcal_per_gram()).abs() < 1e-12);
        assert!((MacroNutrient::Fat.kcal_per_gram() - 9.0).abs() < 1e-12);
    }
}
