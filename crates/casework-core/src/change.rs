//! Change type attached to every notification event.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The kind of change an event describes.
///
/// `Add` accompanies case openings, work-item creations, and new-actor
/// allocations. `Delete` accompanies case closings, work-item closings, and
/// deallocations without advance warning. `Modify` accompanies allocation
/// changes announced ahead of time (a time-before window is present).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChangeType {
    /// Something came into existence.
    Add,
    /// Something changed in place.
    Modify,
    /// Something went away.
    Delete,
}

impl fmt::Display for ChangeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ChangeType::Add => "add",
            ChangeType::Modify => "modify",
            ChangeType::Delete => "delete",
        };
        write!(f, "{name}")
    }
}
