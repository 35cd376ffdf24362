//! Decision core for tutoring session booking and tutor matching.
//!
//! Everything in this crate is a pure computation over snapshots that the
//! caller has already fetched. Persistence lives behind the ports crate.

pub mod availability;
pub mod booking;
pub mod error;
pub mod events;
pub mod ids;
pub mod matching;
pub mod session;
pub mod time;
