//! Support code shared by the production stages.
//!
//! Everything here works on plain SI `f64` values: the closure relations are
//! empirical fits whose dimensions do not combine cleanly as quantities.
//! Stage adapters convert to and from `uom` at their boundaries.

mod error;
mod heat_transfer;
mod lines;
mod march;
mod mixture;
mod regime;

pub use error::DomainError;

pub(crate) use heat_transfer::{BuriedPipe, Formation, FormationParameters};
pub(crate) use lines::solve_lines;
pub(crate) use march::{Geometry, Inlet, Line, LocalLosses, Node, Orientation};
pub(crate) use mixture::Mixture;
pub(crate) use regime::{Hydraulics, Regime};
