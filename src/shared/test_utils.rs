//! Test utilities for property-based testing
//!
//! Proptest generators for readings and device payloads, shared between the
//! unit suites and the property tests under `tests/`.

pub mod generators {
    use proptest::prelude::*;
    use serde_json::{json, Value};

    use crate::domain::{Range, SoilReading};
    use crate::normalize::{
        MOISTURE_BOUNDS, NITROGEN_BOUNDS, PHOSPHORUS_BOUNDS, PH_BOUNDS, POTASSIUM_BOUNDS,
        TEMPERATURE_BOUNDS,
    };

    /// Generate a value within a closed range, bounds included.
    pub fn within(range: Range) -> impl Strategy<Value = f64> {
        range.min..=range.max
    }

    /// Generate a finite value strictly below the range.
    pub fn below(range: Range) -> impl Strategy<Value = f64> {
        (range.min - 500.0)..range.min
    }

    /// Generate a finite value strictly above the range.
    pub fn above(range: Range) -> impl Strategy<Value = f64> {
        (range.max + 0.001)..(range.max + 500.0)
    }

    /// Generate a value outside the range on either side.
    pub fn outside(range: Range) -> impl Strategy<Value = f64> {
        prop_oneof![below(range), above(range)]
    }

    /// Sensor values all within their plausibility bounds, in canonical
    /// order (nitrogen, phosphorus, potassium, moisture, ph, temperature).
    pub fn admissible_values() -> impl Strategy<Value = (f64, f64, f64, f64, f64, f64)> {
        (
            within(NITROGEN_BOUNDS),
            within(PHOSPHORUS_BOUNDS),
            within(POTASSIUM_BOUNDS),
            within(MOISTURE_BOUNDS),
            within(PH_BOUNDS),
            within(TEMPERATURE_BOUNDS),
        )
    }

    /// A fully valid `SoilReading` with a fixed timestamp.
    pub fn soil_reading() -> impl Strategy<Value = SoilReading> {
        admissible_values().prop_map(|(nitrogen, phosphorus, potassium, moisture, ph, temperature)| {
            SoilReading {
                nitrogen,
                phosphorus,
                potassium,
                moisture,
                ph,
                temperature,
                timestamp: "2024-01-15T10:30:00+00:00".to_string(),
            }
        })
    }

    /// Ingest payload using canonical field names.
    pub fn canonical_payload() -> impl Strategy<Value = Value> {
        admissible_values().prop_map(|(n, p, k, moisture, ph, temperature)| {
            json!({
                "nitrogen": n,
                "phosphorus": p,
                "potassium": k,
                "moisture": moisture,
                "ph": ph,
                "temperature": temperature,
            })
        })
    }

    /// Ingest payload using the device firmware's key aliases.
    pub fn device_payload() -> impl Strategy<Value = Value> {
        admissible_values().prop_map(|(n, p, k, moisture, ph, temperature)| {
            json!({
                "n": n,
                "p": p,
                "k": k,
                "moist": moisture,
                "pH": ph,
                "suhu": temperature,
            })
        })
    }

    /// A junk field value: absent-equivalent, unparseable, or outside the
    /// field's own plausibility bounds.
    pub fn junk_field(bounds: Range) -> impl Strategy<Value = Value> {
        prop_oneof![
            Just(Value::Null),
            "[a-z]{1,8}".prop_map(Value::String),
            outside(bounds).prop_map(|v| json!(v)),
        ]
    }

    /// Payload where every field is junk.
    pub fn junk_payload() -> impl Strategy<Value = Value> {
        (
            junk_field(NITROGEN_BOUNDS),
            junk_field(PHOSPHORUS_BOUNDS),
            junk_field(POTASSIUM_BOUNDS),
            junk_field(MOISTURE_BOUNDS),
            junk_field(PH_BOUNDS),
            junk_field(TEMPERATURE_BOUNDS),
        )
            .prop_map(|(n, p, k, moisture, ph, temperature)| {
                json!({
                    "nitrogen": n,
                    "phosphorus": p,
                    "potassium": k,
                    "moisture": moisture,
                    "ph": ph,
                    "temperature": temperature,
                })
            })
    }
}
