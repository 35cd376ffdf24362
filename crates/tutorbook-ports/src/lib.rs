//! Contracts between the booking core and the outside world.

pub mod error;
pub mod outbound;
pub mod types;
