//! # Oilfield Flow
//!
//! Steady-state models of a small production field: radial inflow from the
//! reservoir, vertical flow up three wells, three buried flowlines, and the
//! trunk line they merge into. Each stage is a [`twine_core::Model`].
//!
//! ## Crate layout
//!
//! - [`models`]: The production stage models.
//! - [`config`]: Typed run configuration loaded from TOML.
//! - [`interchange`]: The state document passed between separate stage runs.
//! - [`support`]: Supporting utilities used by models.
//!
//! ## Utility code lifecycle
//!
//! Modules in [`support`] are part of the public API because they're useful,
//! but their APIs are not stable. Breaking changes may occur as needed.
//!
//! Utility code starts in a model's internal `core` module, moves to the
//! domain-level support module when several stages need it, and reaches
//! [`support`] only when it is useful outside the domain. Only the last is
//! public.

pub mod config;
pub mod interchange;
pub mod models;
pub mod support;
