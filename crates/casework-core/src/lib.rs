//! Casework Core — shared primitives.
//!
//! This crate defines the types that the notification dispatch context
//! depends on: lightweight identifiers, object references, change types,
//! ambient task context, and the error taxonomy. It contains no
//! infrastructure code.

pub mod change;
pub mod error;
pub mod identifier;
pub mod reference;
pub mod task;
