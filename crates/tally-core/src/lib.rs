//! tally-core
//!
//! A result envelope for business and data-access operations: one value
//! carrying the outcome of a single attempt (success flag, affected-row
//! count, generated id, messages, an optionally captured error) together
//! with how long the attempt took.
//!
//! # Modules
//! - **domain**: the `Report` envelope, its serializable view, and the
//!   chainable `TallyError` value.
//! - **ports**: the `Clock` abstraction that keeps report timing
//!   deterministic in tests.

pub mod domain;
pub mod ports;
