//! Test pipelines — mock `NotificationPipeline` implementations.

use std::sync::Mutex;

use async_trait::async_trait;

use casework_core::error::DispatchError;
use casework_core::task::{OperationResult, TaskHandle};
use casework_notifications::application::ports::NotificationPipeline;
use casework_notifications::domain::events::NotificationEvent;
use casework_notifications::domain::records::{EventHandlerConfig, ExpressionProfile};

/// One delivery captured by [`RecordingPipeline`].
#[derive(Debug, Clone)]
pub struct DispatchedEvent {
    /// The delivered event.
    pub event: NotificationEvent,
    /// Handler config supplied on the custom path.
    pub handler_config: Option<EventHandlerConfig>,
    /// Expression profile supplied on the custom path.
    pub profile: Option<ExpressionProfile>,
    /// Whether the custom-event entry point was used.
    pub custom_path: bool,
}

/// A pipeline that records every delivery and always succeeds.
#[derive(Debug, Default)]
pub struct RecordingPipeline {
    dispatched: Mutex<Vec<DispatchedEvent>>,
}

impl RecordingPipeline {
    /// Creates an empty recording pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a snapshot of everything delivered so far.
    ///
    /// # Panics
    ///
    /// Panics if the internal mutex is poisoned.
    #[must_use]
    pub fn dispatched(&self) -> Vec<DispatchedEvent> {
        self.dispatched.lock().unwrap().clone()
    }
}

#[async_trait]
impl NotificationPipeline for RecordingPipeline {
    async fn process_event(
        &self,
        event: NotificationEvent,
        _task: &TaskHandle,
        _result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        self.dispatched.lock().unwrap().push(DispatchedEvent {
            event,
            handler_config: None,
            profile: None,
            custom_path: false,
        });
        Ok(())
    }

    async fn process_custom_event(
        &self,
        event: NotificationEvent,
        handler_config: Option<EventHandlerConfig>,
        profile: Option<ExpressionProfile>,
        _task: &TaskHandle,
        _result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        self.dispatched.lock().unwrap().push(DispatchedEvent {
            event,
            handler_config,
            profile,
            custom_path: true,
        });
        Ok(())
    }
}

/// A pipeline that rejects every delivery. Useful for testing error
/// propagation back to the engine.
#[derive(Debug, Default)]
pub struct FailingPipeline;

#[async_trait]
impl NotificationPipeline for FailingPipeline {
    async fn process_event(
        &self,
        _event: NotificationEvent,
        _task: &TaskHandle,
        _result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        Err(DispatchError::Downstream("transport refused".into()))
    }

    async fn process_custom_event(
        &self,
        _event: NotificationEvent,
        _handler_config: Option<EventHandlerConfig>,
        _profile: Option<ExpressionProfile>,
        _task: &TaskHandle,
        _result: &mut OperationResult,
    ) -> Result<(), DispatchError> {
        Err(DispatchError::Downstream("transport refused".into()))
    }
}
