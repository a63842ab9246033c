use std::fmt;

use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;

use crate::domain::{Range, SoilReading};
use crate::time::Clock;

// Plausibility guards for raw sensor values. These bound what a sensor can
// physically report and are distinct from any plant's preferred range.
pub const NITROGEN_BOUNDS: Range = Range::new(0.0, 1000.0);
pub const PHOSPHORUS_BOUNDS: Range = Range::new(0.0, 500.0);
pub const POTASSIUM_BOUNDS: Range = Range::new(0.0, 1000.0);
pub const MOISTURE_BOUNDS: Range = Range::new(0.0, 100.0);
pub const PH_BOUNDS: Range = Range::new(0.0, 14.0);
pub const TEMPERATURE_BOUNDS: Range = Range::new(-10.0, 50.0);

/// Raw ingest payload as posted by a device.
///
/// Field aliases cover the firmware variants observed in the field
/// (`moist`/`suhu` from the ESP build, single-letter nutrient keys, `pH`).
/// Values are kept as raw JSON so that a structurally wrong type can be
/// rejected at the transport layer while everything else flows through
/// fallback substitution.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct IngestPayload {
    #[serde(default, alias = "moist")]
    pub moisture: Option<Value>,
    #[serde(default, alias = "suhu", alias = "temp")]
    pub temperature: Option<Value>,
    #[serde(default, alias = "n", alias = "N")]
    pub nitrogen: Option<Value>,
    #[serde(default, alias = "p", alias = "P")]
    pub phosphorus: Option<Value>,
    #[serde(default, alias = "k", alias = "K")]
    pub potassium: Option<Value>,
    #[serde(default, alias = "pH")]
    pub ph: Option<Value>,
}

impl IngestPayload {
    /// Fields in canonical reading order, for type checks and reporting.
    pub fn fields(&self) -> [(&'static str, Option<&Value>); 6] {
        [
            ("nitrogen", self.nitrogen.as_ref()),
            ("phosphorus", self.phosphorus.as_ref()),
            ("potassium", self.potassium.as_ref()),
            ("moisture", self.moisture.as_ref()),
            ("ph", self.ph.as_ref()),
            ("temperature", self.temperature.as_ref()),
        ]
    }
}

/// A recognized key carried a structurally wrong JSON type.
///
/// This is a transport-level failure (rejected with 400), unlike missing or
/// out-of-range values which are silently substituted.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("field '{field}' must be numeric, got {kind}")]
pub struct FieldTypeError {
    pub field: &'static str,
    pub kind: &'static str,
}

/// Reject payloads where a recognized key holds a bool, array, or object.
pub fn reject_wrong_types(payload: &IngestPayload) -> Result<(), FieldTypeError> {
    for (field, value) in payload.fields() {
        let kind = match value {
            Some(Value::Bool(_)) => "a boolean",
            Some(Value::Array(_)) => "an array",
            Some(Value::Object(_)) => "an object",
            _ => continue,
        };
        return Err(FieldTypeError { field, kind });
    }
    Ok(())
}

/// Why a field value was not taken from the device payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackReason {
    Missing,
    NotNumeric,
    OutOfRange,
}

impl FallbackReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackReason::Missing => "missing",
            FallbackReason::NotNumeric => "not_numeric",
            FallbackReason::OutOfRange => "out_of_range",
        }
    }
}

/// Where the substituted value came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FallbackSource {
    Previous,
    Baseline,
}

impl FallbackSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            FallbackSource::Previous => "previous",
            FallbackSource::Baseline => "baseline",
        }
    }
}

/// Provenance of a single normalized field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldOutcome {
    Accepted,
    Fallback {
        reason: FallbackReason,
        source: FallbackSource,
    },
}

impl FieldOutcome {
    pub fn is_fallback(&self) -> bool {
        matches!(self, FieldOutcome::Fallback { .. })
    }
}

/// Per-field provenance of one normalization pass.
///
/// Exists for observability (log lines, tests); the normalized reading is
/// complete and in range regardless of what the report says.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NormalizationReport {
    pub nitrogen: FieldOutcome,
    pub phosphorus: FieldOutcome,
    pub potassium: FieldOutcome,
    pub moisture: FieldOutcome,
    pub ph: FieldOutcome,
    pub temperature: FieldOutcome,
}

impl NormalizationReport {
    pub fn fields(&self) -> [(&'static str, FieldOutcome); 6] {
        [
            ("nitrogen", self.nitrogen),
            ("phosphorus", self.phosphorus),
            ("potassium", self.potassium),
            ("moisture", self.moisture),
            ("ph", self.ph),
            ("temperature", self.temperature),
        ]
    }

    pub fn fallback_count(&self) -> usize {
        self.fields().iter().filter(|(_, o)| o.is_fallback()).count()
    }
}

impl fmt::Display for NormalizationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.fallback_count() == 0 {
            return write!(f, "all fields accepted");
        }
        let mut first = true;
        for (name, outcome) in self.fields() {
            if let FieldOutcome::Fallback { reason, source } = outcome {
                if !first {
                    write!(f, ", ")?;
                }
                write!(f, "{}={}<-{}", name, reason.as_str(), source.as_str())?;
                first = false;
            }
        }
        Ok(())
    }
}

/// Normalize a raw device payload into a complete, in-range `SoilReading`.
///
/// Each field is accepted only if it parses as a finite number and lies
/// within its plausibility bounds; otherwise the value from `previous` (or
/// the baseline when no reading exists yet) is substituted. The timestamp
/// always comes from `clock`, never from the caller. This function never
/// fails: malformed device input degrades gracefully instead of breaking
/// ingestion.
pub fn normalize(
    payload: &IngestPayload,
    previous: Option<&SoilReading>,
    clock: &dyn Clock,
) -> (SoilReading, NormalizationReport) {
    let (nitrogen, nitrogen_outcome) = normalize_field(
        payload.nitrogen.as_ref(),
        NITROGEN_BOUNDS,
        previous.map(|r| r.nitrogen),
    );
    let (phosphorus, phosphorus_outcome) = normalize_field(
        payload.phosphorus.as_ref(),
        PHOSPHORUS_BOUNDS,
        previous.map(|r| r.phosphorus),
    );
    let (potassium, potassium_outcome) = normalize_field(
        payload.potassium.as_ref(),
        POTASSIUM_BOUNDS,
        previous.map(|r| r.potassium),
    );
    let (moisture, moisture_outcome) = normalize_field(
        payload.moisture.as_ref(),
        MOISTURE_BOUNDS,
        previous.map(|r| r.moisture),
    );
    let (ph, ph_outcome) = normalize_field(payload.ph.as_ref(), PH_BOUNDS, previous.map(|r| r.ph));
    let (temperature, temperature_outcome) = normalize_field(
        payload.temperature.as_ref(),
        TEMPERATURE_BOUNDS,
        previous.map(|r| r.temperature),
    );

    let reading = SoilReading {
        nitrogen,
        phosphorus,
        potassium,
        moisture,
        ph,
        temperature,
        timestamp: clock.now_rfc3339(),
    };
    let report = NormalizationReport {
        nitrogen: nitrogen_outcome,
        phosphorus: phosphorus_outcome,
        potassium: potassium_outcome,
        moisture: moisture_outcome,
        ph: ph_outcome,
        temperature: temperature_outcome,
    };
    (reading, report)
}

enum Raw {
    Absent,
    NotNumeric,
    Number(f64),
}

fn parse_numeric(value: Option<&Value>) -> Raw {
    match value {
        None | Some(Value::Null) => Raw::Absent,
        Some(Value::Number(n)) => match n.as_f64() {
            Some(v) if v.is_finite() => Raw::Number(v),
            _ => Raw::NotNumeric,
        },
        // Device firmware quotes values; numeric strings are accepted.
        Some(Value::String(s)) => match s.trim().parse::<f64>() {
            Ok(v) if v.is_finite() => Raw::Number(v),
            _ => Raw::NotNumeric,
        },
        // Wrong types should have been rejected at the transport layer, but
        // normalization must stay total, so they fall back like bad values.
        Some(_) => Raw::NotNumeric,
    }
}

fn normalize_field(value: Option<&Value>, bounds: Range, previous: Option<f64>) -> (f64, FieldOutcome) {
    let reason = match parse_numeric(value) {
        Raw::Number(v) if bounds.contains(v) => return (v, FieldOutcome::Accepted),
        Raw::Number(_) => FallbackReason::OutOfRange,
        Raw::NotNumeric => FallbackReason::NotNumeric,
        Raw::Absent => FallbackReason::Missing,
    };

    match previous {
        Some(v) => (
            v,
            FieldOutcome::Fallback {
                reason,
                source: FallbackSource::Previous,
            },
        ),
        None => (
            SoilReading::BASELINE_VALUE,
            FieldOutcome::Fallback {
                reason,
                source: FallbackSource::Baseline,
            },
        ),
    }
}
