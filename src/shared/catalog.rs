use std::sync::OnceLock;

use crate::domain::{Difficulty, PlantProfile, Range};

/// The static plant catalog.
///
/// Built once on first access and never mutated afterwards; callers only
/// ever see the same ordered slice. The data mirrors the dashboard's plant
/// database, so ids and ordering are part of the external contract.
pub fn catalog() -> &'static [PlantProfile] {
    static CATALOG: OnceLock<Vec<PlantProfile>> = OnceLock::new();
    CATALOG.get_or_init(build_catalog)
}

fn build_catalog() -> Vec<PlantProfile> {
    vec![
        PlantProfile {
            id: "1".to_string(),
            name: "Tomato".to_string(),
            scientific_name: "Solanum lycopersicum".to_string(),
            image_url:
                "https://images.pexels.com/photos/533280/pexels-photo-533280.jpeg?auto=compress&cs=tinysrgb&w=800"
                    .to_string(),
            optimal_conditions: vec![
                "Well-draining soil".to_string(),
                "Full sun exposure".to_string(),
                "Regular watering".to_string(),
                "Slightly acidic soil".to_string(),
            ],
            growth_period: "70-85 days".to_string(),
            difficulty: Difficulty::Moderate,
            nitrogen_range: Range::new(40.0, 80.0),
            phosphorus_range: Range::new(45.0, 85.0),
            potassium_range: Range::new(40.0, 80.0),
            moisture_range: Range::new(40.0, 70.0),
            ph_range: Range::new(6.0, 6.8),
        },
        PlantProfile {
            id: "2".to_string(),
            name: "Carrot".to_string(),
            scientific_name: "Daucus carota".to_string(),
            image_url:
                "https://images.pexels.com/photos/143133/pexels-photo-143133.jpeg?auto=compress&cs=tinysrgb&w=800"
                    .to_string(),
            optimal_conditions: vec![
                "Loose, sandy soil".to_string(),
                "Cool weather crop".to_string(),
                "Consistent moisture".to_string(),
                "Neutral pH".to_string(),
            ],
            growth_period: "60-80 days".to_string(),
            difficulty: Difficulty::Easy,
            nitrogen_range: Range::new(20.0, 50.0),
            phosphorus_range: Range::new(40.0, 70.0),
            potassium_range: Range::new(50.0, 90.0),
            moisture_range: Range::new(50.0, 70.0),
            ph_range: Range::new(6.0, 7.0),
        },
        PlantProfile {
            id: "3".to_string(),
            name: "Lettuce".to_string(),
            scientific_name: "Lactuca sativa".to_string(),
            image_url:
                "https://images.pexels.com/photos/539431/pexels-photo-539431.jpeg?auto=compress&cs=tinysrgb&w=800"
                    .to_string(),
            optimal_conditions: vec![
                "Rich, moisture-retentive soil".to_string(),
                "Cool conditions".to_string(),
                "Regular watering".to_string(),
                "Partial shade in hot weather".to_string(),
            ],
            growth_period: "45-60 days".to_string(),
            difficulty: Difficulty::Easy,
            nitrogen_range: Range::new(30.0, 70.0),
            phosphorus_range: Range::new(20.0, 50.0),
            potassium_range: Range::new(30.0, 60.0),
            moisture_range: Range::new(50.0, 70.0),
            ph_range: Range::new(6.0, 7.0),
        },
        PlantProfile {
            id: "4".to_string(),
            name: "Onion".to_string(),
            scientific_name: "Allium cepa".to_string(),
            image_url:
                "https://images.pexels.com/photos/144206/pexels-photo-144206.jpeg?auto=compress&cs=tinysrgb&w=800"
                    .to_string(),
            optimal_conditions: vec![
                "Well-draining, fertile soil".to_string(),
                "Full sun".to_string(),
                "Consistent moisture".to_string(),
                "Neutral pH".to_string(),
            ],
            growth_period: "90-110 days".to_string(),
            difficulty: Difficulty::Easy,
            nitrogen_range: Range::new(30.0, 60.0),
            phosphorus_range: Range::new(40.0, 80.0),
            potassium_range: Range::new(50.0, 90.0),
            moisture_range: Range::new(40.0, 60.0),
            ph_range: Range::new(6.0, 7.5),
        },
        PlantProfile {
            id: "5".to_string(),
            name: "Bell Pepper".to_string(),
            scientific_name: "Capsicum annuum".to_string(),
            image_url:
                "https://images.pexels.com/photos/128536/pexels-photo-128536.jpeg?auto=compress&cs=tinysrgb&w=800"
                    .to_string(),
            optimal_conditions: vec![
                "Rich, well-draining soil".to_string(),
                "Full sun".to_string(),
                "Regular watering".to_string(),
                "Slightly acidic soil".to_string(),
            ],
            growth_period: "60-90 days".to_string(),
            difficulty: Difficulty::Moderate,
            nitrogen_range: Range::new(40.0, 80.0),
            phosphorus_range: Range::new(45.0, 85.0),
            potassium_range: Range::new(45.0, 85.0),
            moisture_range: Range::new(50.0, 70.0),
            ph_range: Range::new(5.8, 6.5),
        },
        PlantProfile {
            id: "6".to_string(),
            name: "Cucumber".to_string(),
            scientific_name: "Cucumis sativus".to_string(),
            image_url:
                "https://images.pexels.com/photos/37528/cucumber-salad-food-healthy-37528.jpeg?auto=compress&cs=tinysrgb&w=800"
                    .to_string(),
            optimal_conditions: vec![
                "Warm temperatures".to_string(),
                "Well-draining soil".to_string(),
                "Consistent moisture".to_string(),
                "Neutral to slightly acidic soil".to_string(),
            ],
            growth_period: "50-70 days".to_string(),
            difficulty: Difficulty::Easy,
            nitrogen_range: Range::new(30.0, 70.0),
            phosphorus_range: Range::new(40.0, 80.0),
            potassium_range: Range::new(50.0, 90.0),
            moisture_range: Range::new(50.0, 80.0),
            ph_range: Range::new(6.0, 7.0),
        },
    ]
}
