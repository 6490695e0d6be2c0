//! Lightweight event identifiers.
//!
//! Identifiers are unique and ordered for the lifetime of the process only.
//! On restart the sequence starts over, so downstream consumers must not
//! assume global uniqueness across process incarnations.

use std::fmt;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Abstraction over system time, injected so identifier issue times stay
/// deterministic in tests.
pub trait Clock: Send + Sync {
    /// Returns the current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Production clock that delegates to the system clock.
#[derive(Debug, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A process-unique, ordered identifier attached to every emitted event.
///
/// Used downstream for correlation and deduplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct LightweightIdentifier {
    /// Time of issue.
    pub timestamp: DateTime<Utc>,
    /// Issue sequence number, strictly increasing within the process.
    pub sequence: u64,
}

impl fmt::Display for LightweightIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.timestamp.timestamp_millis(), self.sequence)
    }
}

/// Thread-safe source of [`LightweightIdentifier`] values.
pub trait IdentifierGenerator: Send + Sync {
    /// Issues the next identifier. Never returns the same value twice
    /// within a single process.
    fn next(&self) -> LightweightIdentifier;
}

/// Production generator combining the injected clock with an atomic counter.
pub struct SystemIdentifierGenerator {
    clock: Arc<dyn Clock>,
    sequence: AtomicU64,
}

impl SystemIdentifierGenerator {
    /// Creates a generator starting at sequence 1.
    #[must_use]
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            sequence: AtomicU64::new(0),
        }
    }
}

impl IdentifierGenerator for SystemIdentifierGenerator {
    fn next(&self) -> LightweightIdentifier {
        LightweightIdentifier {
            timestamp: self.clock.now(),
            sequence: self.sequence.fetch_add(1, Ordering::Relaxed) + 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::thread;

    use super::{IdentifierGenerator, SystemClock, SystemIdentifierGenerator};

    #[test]
    fn test_identifiers_are_unique_and_increasing() {
        let generator = SystemIdentifierGenerator::new(Arc::new(SystemClock));

        let ids: Vec<_> = (0..100).map(|_| generator.next()).collect();

        let distinct: HashSet<_> = ids.iter().cloned().collect();
        assert_eq!(distinct.len(), ids.len());
        for pair in ids.windows(2) {
            assert!(pair[0].sequence < pair[1].sequence);
        }
    }

    #[test]
    fn test_identifiers_are_unique_across_threads() {
        let generator = Arc::new(SystemIdentifierGenerator::new(Arc::new(SystemClock)));

        let handles: Vec<_> = (0..8)
            .map(|_| {
                let generator = Arc::clone(&generator);
                thread::spawn(move || (0..250).map(|_| generator.next()).collect::<Vec<_>>())
            })
            .collect();

        let mut all = HashSet::new();
        let mut total = 0;
        for handle in handles {
            for id in handle.join().unwrap() {
                all.insert(id.sequence);
                total += 1;
            }
        }
        assert_eq!(all.len(), total);
    }

    #[test]
    fn test_display_combines_millis_and_sequence() {
        let generator = SystemIdentifierGenerator::new(Arc::new(SystemClock));
        let id = generator.next();
        let rendered = id.to_string();
        assert!(rendered.ends_with("-1"));
    }
}
