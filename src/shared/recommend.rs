use crate::domain::{PlantProfile, SoilReading};

/// Minimum number of the five attribute checks that must hold for a plant
/// to be recommended. Fixed by design: all attributes weigh equally and the
/// threshold is not configurable per caller.
pub const MATCH_THRESHOLD: u8 = 3;

/// Count how many of the five soil attributes fall within the plant's
/// preferred ranges (0-5). Ranges are closed intervals, so exact boundary
/// values match.
pub fn match_score(reading: &SoilReading, plant: &PlantProfile) -> u8 {
    let checks = [
        plant.nitrogen_range.contains(reading.nitrogen),
        plant.phosphorus_range.contains(reading.phosphorus),
        plant.potassium_range.contains(reading.potassium),
        plant.moisture_range.contains(reading.moisture),
        plant.ph_range.contains(reading.ph),
    ];
    checks.iter().filter(|&&matched| matched).count() as u8
}

/// Return the catalog entries whose match score reaches the threshold,
/// preserving catalog order. No ranking, weighting, or fuzzy matching.
pub fn recommend<'a>(reading: &SoilReading, catalog: &'a [PlantProfile]) -> Vec<&'a PlantProfile> {
    catalog
        .iter()
        .filter(|plant| match_score(reading, plant) >= MATCH_THRESHOLD)
        .collect()
}
