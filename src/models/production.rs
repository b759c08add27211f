//! Steady-state production flow from the reservoir to the trunk line.
//!
//! Four stages run strictly in sequence, each a [`twine_core::Model`] whose
//! output is the next stage's input:
//!
//! 1. [`Reservoir`]: radial Dupuit inflow to each of the three wells.
//! 2. [`Well`]: vertical march from the bottom hole to the wellhead.
//! 3. [`Flowline`]: horizontal march from each wellhead to the junction.
//! 4. [`Trunk`]: merge at the junction and march along the shared line.
//!
//! [`Pipeline`] chains all four.
//!
//! The three wells and their flowlines are independent until the junction
//! and are solved in parallel.

mod error;
mod flowline;
mod pipeline;
mod profile;
mod reservoir;
mod support;
mod trunk;
mod well;

#[cfg(test)]
mod test_support;

use std::fmt;

pub use error::StageError;
pub use flowline::{Flowline, FlowlineOutput};
pub use pipeline::{Pipeline, PipelineOutput};
pub use profile::{FlowState, LineProfile};
pub use reservoir::{DrainageProfile, Reservoir, ReservoirOutput};
pub use support::DomainError;
pub use trunk::{Junction, Trunk, TrunkOutput};
pub use well::{Well, WellOutput};

/// Number of wells, and of flowlines, in the field.
pub const LINE_COUNT: usize = 3;

/// A stage of the production chain, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Stage {
    Reservoir,
    Well,
    Flowline,
    Trunk,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::Reservoir => "reservoir",
            Stage::Well => "well",
            Stage::Flowline => "flowline",
            Stage::Trunk => "trunk",
        })
    }
}
