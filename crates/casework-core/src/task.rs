//! Ambient task context threaded through engine callbacks.
//!
//! The workflow engine hands every callback an identity for the task on
//! whose thread the callback runs, plus an accumulator for operation
//! outcomes. The dispatch core passes both through to downstream
//! collaborators without inspecting them.

use serde::{Deserialize, Serialize};

/// Identity of the engine task driving a callback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaskHandle {
    /// Task identifier as assigned by the engine.
    pub identifier: String,
}

impl TaskHandle {
    /// Creates a task handle.
    #[must_use]
    pub fn new(identifier: impl Into<String>) -> Self {
        Self {
            identifier: identifier.into(),
        }
    }
}

/// Outcome of an operation or sub-operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OperationStatus {
    /// Not yet recorded.
    Unknown,
    /// Completed successfully.
    Success,
    /// Failed in a way the caller cannot recover from.
    FatalError,
}

/// Accumulator for operation outcomes, mirroring the engine's result tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OperationResult {
    /// Name of the operation being recorded.
    pub operation: String,
    /// Current status.
    pub status: OperationStatus,
    /// Failure message, set when the status is [`OperationStatus::FatalError`].
    pub message: Option<String>,
    /// Nested sub-operation results.
    pub subresults: Vec<OperationResult>,
}

impl OperationResult {
    /// Creates a result in the [`OperationStatus::Unknown`] state.
    #[must_use]
    pub fn new(operation: impl Into<String>) -> Self {
        Self {
            operation: operation.into(),
            status: OperationStatus::Unknown,
            message: None,
            subresults: Vec::new(),
        }
    }

    /// Opens a sub-operation result and returns a handle to it.
    pub fn subresult(&mut self, operation: impl Into<String>) -> &mut OperationResult {
        self.subresults.push(OperationResult::new(operation));
        self.subresults
            .last_mut()
            .unwrap_or_else(|| unreachable!("subresult was just pushed"))
    }

    /// Marks the operation successful.
    pub fn record_success(&mut self) {
        self.status = OperationStatus::Success;
    }

    /// Marks the operation failed with a message.
    pub fn record_fatal_error(&mut self, message: impl Into<String>) {
        self.status = OperationStatus::FatalError;
        self.message = Some(message.into());
    }
}
