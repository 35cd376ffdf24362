//! Orchestration over the decision core: fetch, decide, persist, publish.

pub mod availability_service;
pub mod booking_service;
pub mod error;
pub mod matching_service;

#[cfg(test)]
mod testing;

pub use availability_service::AvailabilityService;
pub use booking_service::BookingService;
pub use error::AppError;
pub use matching_service::MatchingService;
