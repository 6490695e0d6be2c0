//! Error taxonomy for the notification dispatch core.

use thiserror::Error;

/// Errors surfaced by dispatch callbacks.
///
/// The core performs no retries and no local recovery; every error is
/// returned to the workflow engine unchanged.
#[derive(Debug, Error)]
pub enum DispatchError {
    /// An actor reference in an allocation callback carries no oid.
    /// The whole callback fails before any event is emitted.
    #[error("no oid in actor object reference {0}")]
    InvalidActorReference(String),

    /// The engine invoked a callback with structurally invalid input.
    #[error("invalid engine callback: {0}")]
    InvalidCallback(String),

    /// The expression profile for custom workflow notifications could not
    /// be resolved.
    #[error("failed to resolve expression profile for custom workflow notifications: {0}")]
    ProfileResolution(#[from] ProfileError),

    /// The downstream notification pipeline rejected an event. The engine
    /// decides whether to retry the callback.
    #[error("downstream event processing failed: {0}")]
    Downstream(String),
}

/// Errors raised by the expression profile manager.
#[derive(Debug, Error)]
pub enum ProfileError {
    /// The profile definition does not conform to the schema.
    #[error("schema error: {0}")]
    Schema(String),

    /// The profile configuration is missing or inconsistent.
    #[error("configuration error: {0}")]
    Configuration(String),
}
