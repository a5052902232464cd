// ABOUTME: Nutrition and numeric constants for the Remy engine organized by domain
// ABOUTME: Energy conversion factors, tracked micronutrient set, and solver tolerances
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Remy Nutrition Intelligence

//! # Constants Module
//!
//! Domain constants used throughout the engine. Values with a scientific
//! provenance carry their reference.

/// Energy conversion factors for macronutrients
///
/// References:
/// - Atwater, W.O. & Bryant, A.P. (1900). The availability and fuel value of food materials.
/// - FAO (2003). Food energy – methods of analysis and conversion factors.
///   <https://www.fao.org/3/y5022e/y5022e00.htm>
pub mod energy {
    /// Metabolizable energy of carbohydrate (kcal per gram, Atwater general factor)
    pub const KCAL_PER_GRAM_CARBOHYDRATE: f64 = 4.0;

    /// Metabolizable energy of protein (kcal per gram, Atwater general factor)
    pub const KCAL_PER_GRAM_PROTEIN: f64 = 4.0;

    /// Metabolizable energy of fat (kcal per gram, Atwater general factor)
    pub const KCAL_PER_GRAM_FAT: f64 = 9.0;
}

/// Tracked micronutrient reference set
///
/// The coverage report always spans this fixed set, whether or not a nutrient
/// was targeted in a given solve. Keys carry their unit as a suffix so amounts
/// are never unit-ambiguous.
///
/// Reference: NIH Office of Dietary Supplements, Nutrient Recommendations and
/// Databases (DRI tables). <https://ods.od.nih.gov/HealthInformation/nutrientrecommendations.aspx>
pub mod micronutrients {
    /// The twenty micronutrients the engine reports coverage for.
    pub const TRACKED: [&str; 20] = [
        "vitamin_a_mcg",
        "vitamin_c_mg",
        "vitamin_d_mcg",
        "vitamin_e_mg",
        "vitamin_k_mcg",
        "thiamin_mg",
        "riboflavin_mg",
        "niacin_mg",
        "vitamin_b6_mg",
        "folate_mcg",
        "vitamin_b12_mcg",
        "calcium_mg",
        "iron_mg",
        "magnesium_mg",
        "zinc_mg",
        "potassium_mg",
        "sodium_mg",
        "selenium_mcg",
        "phosphorus_mg",
        "copper_mg",
    ];
}

/// Numeric tolerances shared by the model builder and result interpreter
pub mod tolerance {
    /// Magnitudes below this are treated as exactly zero in every
    /// normalization step, so no divisor can underflow to a blow-up.
    pub const EPSILON: f64 = 1e-9;

    /// Feasibility slack accepted from the LP backend; solved amounts within
    /// this distance of a bound are considered on the bound.
    pub const FEASIBILITY: f64 = 1e-6;
}

/// Presentation rounding applied at response assembly only
pub mod display {
    /// Decimal places for gram and calorie amounts in responses.
    pub const AMOUNT_DECIMALS: i32 = 2;

    /// Decimal places for percent-of-DRI figures in responses.
    pub const PERCENT_DECIMALS: i32 = 1;
}
