//! Shared test mocks and fixtures for the Casework notification subsystem.

mod engine;
mod fixtures;
mod identifier;
mod pipeline;
mod profile;

pub use engine::StubCaseEngine;
pub use fixtures::{actor_ref, case_record, oidless_ref, work_item};
pub use identifier::{FixedClock, SequenceIdentifierGenerator};
pub use pipeline::{DispatchedEvent, FailingPipeline, RecordingPipeline};
pub use profile::{FailingProfileManager, StaticProfileManager};
