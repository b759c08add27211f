//! Crate-level support utilities.
//!
//! These modules are public because they are useful when preparing stage
//! inputs by hand, but their APIs are not stable.

pub mod constraint;
pub mod units;
