//! Shared test helpers for dispatcher integration tests.
#![allow(dead_code)]

use std::sync::Arc;

use casework_core::task::{OperationResult, TaskHandle};
use casework_notifications::application::listener::CaseNotificationDispatcher;
use casework_notifications::application::ports::{ExpressionProfileManager, NotificationPipeline};
use casework_test_support::{RecordingPipeline, SequenceIdentifierGenerator, StaticProfileManager};

/// A dispatcher wired to a recording pipeline and deterministic identifiers.
pub struct Harness {
    pub dispatcher: Arc<CaseNotificationDispatcher>,
    pub pipeline: Arc<RecordingPipeline>,
    pub task: TaskHandle,
    pub result: OperationResult,
}

/// Builds the default harness: recording pipeline, sequence identifiers,
/// static custom-workflow-notifications profile.
pub fn harness() -> Harness {
    harness_with_profiles(Arc::new(StaticProfileManager::custom_workflow_notifications()))
}

/// Builds a harness with a custom profile manager.
pub fn harness_with_profiles(profiles: Arc<dyn ExpressionProfileManager>) -> Harness {
    let pipeline = Arc::new(RecordingPipeline::new());
    let dispatcher = Arc::new(CaseNotificationDispatcher::new(
        Arc::new(SequenceIdentifierGenerator::new()),
        Arc::clone(&pipeline) as Arc<dyn NotificationPipeline>,
        profiles,
    ));
    Harness {
        dispatcher,
        pipeline,
        task: TaskHandle::new("task-test"),
        result: OperationResult::new("caseEventDispatch"),
    }
}
