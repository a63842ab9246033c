use chrono::{DateTime, Utc};

/// Clock trait for abstracting time operations.
///
/// Readings are stamped at normalization time; injecting the clock keeps
/// that instant controllable in tests.
pub trait Clock: Send + Sync {
    /// Get current time as RFC3339 string (e.g. "2024-01-15T10:30:00+00:00")
    fn now_rfc3339(&self) -> String;
}

/// Production implementation of Clock using system time
#[derive(Debug, Clone, Default)]
pub struct SystemClock;

impl SystemClock {
    pub fn new() -> Self {
        Self
    }
}

impl Clock for SystemClock {
    fn now_rfc3339(&self) -> String {
        Utc::now().to_rfc3339()
    }
}

/// Test implementation of Clock with a fixed instant
#[derive(Debug, Clone)]
pub struct FixedClock {
    timestamp: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(timestamp: DateTime<Utc>) -> Self {
        Self { timestamp }
    }

    /// Create a FixedClock from an RFC3339 string
    pub fn from_rfc3339(timestamp_str: &str) -> Result<Self, chrono::ParseError> {
        let timestamp = DateTime::parse_from_rfc3339(timestamp_str)?.with_timezone(&Utc);
        Ok(Self { timestamp })
    }

    /// Advance the fixed time by the given number of seconds
    pub fn advance_seconds(&mut self, seconds: i64) {
        self.timestamp += chrono::Duration::seconds(seconds);
    }
}

impl Clock for FixedClock {
    fn now_rfc3339(&self) -> String {
        self.timestamp.to_rfc3339()
    }
}
