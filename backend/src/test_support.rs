//! Test utilities for the calculator crate.
//!
//! Shared by unit tests (in `src/`) and integration tests (in `tests/`, via
//! the `test-support` feature). Nothing here is compiled into release
//! builds.

mod clock;
mod repositories;

pub use clock::MutableClock;
pub use repositories::{InMemoryCalculationRepository, InMemoryUserRepository};
