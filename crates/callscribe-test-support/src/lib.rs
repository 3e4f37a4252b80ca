//! Shared test mocks and utilities for Callscribe.

mod clock;
mod repository;

pub use clock::FixedClock;
pub use repository::{FailingCallRepository, InMemoryCallRepository, VanishingCallRepository};
