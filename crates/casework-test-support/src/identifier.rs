//! Deterministic clock and identifier generator for tests.

use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, TimeZone, Utc};

use casework_core::identifier::{Clock, IdentifierGenerator, LightweightIdentifier};

/// A clock that always returns a fixed point in time.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Issues identifiers with a fixed timestamp and sequences 1, 2, 3, ...
#[derive(Debug)]
pub struct SequenceIdentifierGenerator {
    timestamp: DateTime<Utc>,
    sequence: AtomicU64,
}

impl SequenceIdentifierGenerator {
    /// Creates a generator anchored at a fixed timestamp.
    #[must_use]
    pub fn new() -> Self {
        Self {
            timestamp: Utc.with_ymd_and_hms(2026, 1, 15, 10, 0, 0).unwrap(),
            sequence: AtomicU64::new(0),
        }
    }
}

impl Default for SequenceIdentifierGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl IdentifierGenerator for SequenceIdentifierGenerator {
    fn next(&self) -> LightweightIdentifier {
        LightweightIdentifier {
            timestamp: self.timestamp,
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
        }
    }
}
