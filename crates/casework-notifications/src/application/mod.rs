//! Application layer: collaborator ports and the engine listener.

pub mod listener;
pub mod ports;
