use std::sync::RwLock;

use crate::domain::SoilReading;

/// Process-wide single-slot cache for the most recent validated reading.
///
/// Last-write-wins: every accepted ingest replaces the slot wholesale, never
/// field by field, so a reader can only ever observe a complete reading.
/// The slot starts empty and lives for the process lifetime; it is owned by
/// the ingest/query boundary and injected into handlers rather than living
/// in a module-level global.
#[derive(Debug, Default)]
pub struct LatestReadingSlot {
    slot: RwLock<Option<SoilReading>>,
}

impl LatestReadingSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Atomically replace the slot's content.
    pub fn write(&self, reading: SoilReading) {
        // A poisoned lock still holds a complete reading; recover it rather
        // than propagating the panic of an unrelated thread.
        let mut slot = self.slot.write().unwrap_or_else(|e| e.into_inner());
        *slot = Some(reading);
    }

    /// Snapshot the current content. `None` only before the first write.
    pub fn read_latest(&self) -> Option<SoilReading> {
        self.slot.read().unwrap_or_else(|e| e.into_inner()).clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn reading(value: f64) -> SoilReading {
        SoilReading {
            nitrogen: value,
            phosphorus: value,
            potassium: value,
            moisture: value,
            ph: value,
            temperature: value,
            timestamp: format!("2024-01-15T10:30:{:02}+00:00", value as u32 % 60),
        }
    }

    #[test]
    fn test_empty_before_first_write() {
        let slot = LatestReadingSlot::new();
        assert_eq!(slot.read_latest(), None);
    }

    #[test]
    fn test_write_then_read() {
        let slot = LatestReadingSlot::new();
        slot.write(reading(1.0));
        assert_eq!(slot.read_latest(), Some(reading(1.0)));
    }

    #[test]
    fn test_last_write_wins() {
        let slot = LatestReadingSlot::new();
        slot.write(reading(1.0));
        slot.write(reading(2.0));

        // Exactly B, never a merge of A and B.
        let latest = slot.read_latest().unwrap();
        assert_eq!(latest, reading(2.0));
    }

    #[test]
    fn test_readers_never_observe_torn_readings() {
        // One writer role, many reader roles. Every written reading has all
        // sensor fields equal, so any mixed-field observation would prove a
        // torn read.
        let slot = Arc::new(LatestReadingSlot::new());
        slot.write(reading(0.0));

        let writer = {
            let slot = Arc::clone(&slot);
            std::thread::spawn(move || {
                for i in 1..=500 {
                    slot.write(reading(f64::from(i)));
                }
            })
        };

        let readers: Vec<_> = (0..4)
            .map(|_| {
                let slot = Arc::clone(&slot);
                std::thread::spawn(move || {
                    for _ in 0..500 {
                        let r = slot.read_latest().unwrap();
                        assert_eq!(r.nitrogen, r.phosphorus);
                        assert_eq!(r.nitrogen, r.potassium);
                        assert_eq!(r.nitrogen, r.moisture);
                        assert_eq!(r.nitrogen, r.ph);
                        assert_eq!(r.nitrogen, r.temperature);
                    }
                })
            })
            .collect();

        writer.join().unwrap();
        for reader in readers {
            reader.join().unwrap();
        }
        assert_eq!(slot.read_latest().unwrap().nitrogen, 500.0);
    }
}
