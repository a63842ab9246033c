use serde::{Deserialize, Serialize};

// ============================================================================
// Core Domain Models
// ============================================================================

/// SoilReading is a validated snapshot of soil sensor values at one instant.
///
/// Every field is guaranteed in range after normalization; raw device
/// payloads never reach consumers of this type.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SoilReading {
    /// Nitrogen content in mg/kg
    pub nitrogen: f64,
    /// Phosphorus content in mg/kg
    pub phosphorus: f64,
    /// Potassium content in mg/kg
    pub potassium: f64,
    /// Volumetric moisture in percent (0-100)
    pub moisture: f64,
    /// Soil pH (0-14)
    pub ph: f64,
    /// Soil temperature in degrees Celsius
    pub temperature: f64,
    /// RFC3339 timestamp, stamped at normalization time (never by the device)
    pub timestamp: String,
}

impl SoilReading {
    /// Value substituted for a field when no previous good reading exists.
    pub const BASELINE_VALUE: f64 = 0.0;

    /// The reading served before any device has reported.
    ///
    /// All sensor fields are zero so consumers always render a complete
    /// reading instead of an error state.
    pub fn baseline(timestamp: String) -> Self {
        Self {
            nitrogen: Self::BASELINE_VALUE,
            phosphorus: Self::BASELINE_VALUE,
            potassium: Self::BASELINE_VALUE,
            moisture: Self::BASELINE_VALUE,
            ph: Self::BASELINE_VALUE,
            temperature: Self::BASELINE_VALUE,
            timestamp,
        }
    }
}

/// Closed numeric interval, inclusive at both ends.
///
/// Serialized as a two-element `[min, max]` array to match the dashboard's
/// wire contract.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
#[serde(from = "(f64, f64)", into = "(f64, f64)")]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }

    /// Boundary values count as contained (closed interval).
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

impl From<(f64, f64)> for Range {
    fn from((min, max): (f64, f64)) -> Self {
        Self { min, max }
    }
}

impl From<Range> for (f64, f64) {
    fn from(range: Range) -> Self {
        (range.min, range.max)
    }
}

// ============================================================================
// Catalog Models
// ============================================================================

/// Growing difficulty classification for a catalog entry.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Difficulty {
    Easy,
    Moderate,
    Difficult,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Moderate => "Moderate",
            Difficulty::Difficult => "Difficult",
        }
    }
}

/// PlantProfile is one entry of the static plant catalog.
///
/// The five ranges describe the plant's preferred soil conditions and are
/// fixed at catalog-definition time; nothing mutates a profile after load.
/// `optimal_conditions` is informational only and plays no part in matching.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PlantProfile {
    pub id: String,
    pub name: String,
    pub scientific_name: String,
    pub image_url: String,
    pub optimal_conditions: Vec<String>,
    pub growth_period: String,
    pub difficulty: Difficulty,
    pub nitrogen_range: Range,
    pub phosphorus_range: Range,
    pub potassium_range: Range,
    pub moisture_range: Range,
    pub ph_range: Range,
}
