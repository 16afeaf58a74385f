//! Ports: abstractions over the environment.
//!
//! The only environment this crate touches is the system clock; it sits
//! behind a trait so report timing stays deterministic under test.

pub mod clock;

pub use self::clock::{Clock, ManualClock, SystemClock};
