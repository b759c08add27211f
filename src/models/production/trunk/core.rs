use tracing::debug;

use crate::models::production::{
    LINE_COUNT,
    support::{
        BuriedPipe, DomainError, Geometry, Hydraulics, Inlet, Line, LocalLosses, Mixture, Node,
        Orientation,
    },
};

/// Tee at the junction.
pub(super) const TEE_LOSS: f64 = 0.23;

/// Combined stream entering the trunk, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Merged {
    pub(super) mass_flow: f64,
    pub(super) temperature: f64,
}

/// Mixes the incoming streams: mass flows add, temperature is the
/// mass-weighted mean.
///
/// # Errors
///
/// Returns [`DomainError::DivisionByZero`] if no mass arrives.
pub(super) fn merge(streams: &[Inlet; LINE_COUNT]) -> Result<Merged, DomainError> {
    let mass_flow = streams.iter().fold(0.0, |total, s| total + s.mass_flow);
    let enthalpy = streams
        .iter()
        .fold(0.0, |total, s| total + s.temperature * s.mass_flow);

    Ok(Merged {
        mass_flow,
        temperature: DomainError::divide("merged mass flow", enthalpy, mass_flow)?,
    })
}

/// The trunk line, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct TrunkLine {
    pub(super) length: f64,
    pub(super) outer_diameter: f64,
    pub(super) inner_diameter: f64,
    /// Depth of the pipe axis below the surface.
    pub(super) axis_depth: f64,
}

/// Shared inputs of the trunk march.
#[derive(Debug, Clone, Copy)]
pub(super) struct TrunkSolver<'a> {
    pub(super) mixture: &'a Mixture,
    pub(super) hydraulics: &'a Hydraulics,
    pub(super) trunk: &'a TrunkLine,
    pub(super) ground_temperature: f64,
    pub(super) ground_conductivity: f64,
    pub(super) segments: usize,
    /// Pressure held at the junction.
    pub(super) delivery_pressure: f64,
}

impl TrunkSolver<'_> {
    /// Marches the merged stream along the trunk from the junction.
    ///
    /// The outer diameter is the characteristic length of the closures and
    /// of the ground coupling; the flow area is that of the bore.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError`] raised while marching.
    pub(super) fn solve(&self, merged: Merged) -> Result<(Vec<Node>, Geometry), DomainError> {
        let trunk = self.trunk;
        let geometry = Geometry::new(
            trunk.outer_diameter,
            Geometry::circular_area(trunk.inner_diameter),
            trunk.length,
            self.segments,
            Orientation::Horizontal,
        )?;
        let sink = BuriedPipe::new(
            self.ground_temperature,
            self.ground_conductivity,
            trunk.outer_diameter,
            trunk.axis_depth,
        )?;

        let line = Line {
            mixture: self.mixture,
            hydraulics: self.hydraulics,
            geometry: &geometry,
            losses: LocalLosses {
                entry: TEE_LOSS,
                exit: None,
            },
            sink: &sink,
        };
        let nodes = line.march(Inlet {
            pressure: self.delivery_pressure,
            temperature: merged.temperature,
            mass_flow: merged.mass_flow,
        })?;

        if let Some(end) = nodes.last() {
            debug!(
                pressure = end.pressure,
                temperature = end.temperature,
                "trunk marched"
            );
        }

        Ok((nodes, geometry))
    }
}
