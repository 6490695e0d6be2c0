//! Casework — Case / Work-Item Notification Dispatch bounded context.
//!
//! Receives lifecycle callbacks from the workflow engine (case opened or
//! closed, work-item created or closed, allocation changed, custom events)
//! and turns them into typed notification events handed synchronously to
//! the downstream pipeline. The core constructs, enriches, and hands off;
//! it evaluates no handler expressions, delivers to no transports, and
//! persists nothing.

pub mod application;
pub mod domain;
