//! Domain model: engine-supplied records and the notification event family.

pub mod events;
pub mod records;
