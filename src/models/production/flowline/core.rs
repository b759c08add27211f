use tracing::debug;

use crate::models::production::support::{
    BuriedPipe, DomainError, Geometry, Hydraulics, Inlet, Line, LocalLosses, Mixture, Node,
    Orientation,
};

/// Contraction factor applied to the well-to-flowline entry ratio.
const CONTRACTION_FACTOR: f64 = 0.762;

/// 45° bend at the end of the outer flowlines.
pub(super) const BEND_LOSS: f64 = 0.44;

/// Entry loss from the well tubing into a flowline, `(1 − d_well/S)²·0.762`.
///
/// The ratio is taken between the tubing bore and the flowline flow area
/// exactly as the empirical coefficient was fitted.
pub(super) fn entry_loss(well_bore: f64, flow_area: f64) -> Result<f64, DomainError> {
    let ratio = DomainError::divide("flowline area", well_bore, flow_area)?;
    Ok((1.0 - ratio).powi(2) * CONTRACTION_FACTOR)
}

/// A buried flowline, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Pipe {
    pub(super) inner_diameter: f64,
    /// Depth of the pipe axis below the surface.
    pub(super) axis_depth: f64,
}

/// Shared inputs of every flowline march.
#[derive(Debug, Clone, Copy)]
pub(super) struct FlowlineSolver<'a> {
    pub(super) mixture: &'a Mixture,
    pub(super) hydraulics: &'a Hydraulics,
    pub(super) pipe: &'a Pipe,
    pub(super) ground_temperature: f64,
    pub(super) ground_conductivity: f64,
    pub(super) segments: usize,
}

impl FlowlineSolver<'_> {
    /// Marches one flowline from its wellhead.
    ///
    /// Returns the nodes and the line geometry.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError`] raised while marching.
    pub(super) fn solve(
        &self,
        length: f64,
        well_bore: f64,
        wellhead: Inlet,
        bend: bool,
    ) -> Result<(Vec<Node>, Geometry), DomainError> {
        let diameter = self.pipe.inner_diameter;
        let geometry = Geometry::new(
            diameter,
            Geometry::circular_area(diameter),
            length,
            self.segments,
            Orientation::Horizontal,
        )?;
        let sink = BuriedPipe::new(
            self.ground_temperature,
            self.ground_conductivity,
            diameter,
            self.pipe.axis_depth,
        )?;

        let line = Line {
            mixture: self.mixture,
            hydraulics: self.hydraulics,
            geometry: &geometry,
            losses: LocalLosses {
                entry: entry_loss(well_bore, geometry.area())?,
                exit: bend.then_some(BEND_LOSS),
            },
            sink: &sink,
        };
        let nodes = line.march(wellhead)?;

        if let Some(end) = nodes.last() {
            debug!(
                junction_pressure = end.pressure,
                junction_temperature = end.temperature,
                mass_flow = end.mass_flow,
                "flowline marched"
            );
        }

        Ok((nodes, geometry))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::production::test_support::{fluid, hydraulics};

    const PIPE: Pipe = Pipe {
        inner_diameter: 0.098,
        axis_depth: 1.549,
    };

    const WELLHEAD: Inlet = Inlet {
        pressure: 5.4e6,
        temperature: 293.0,
        mass_flow: 0.185,
    };

    fn solve(bend: bool) -> (Vec<Node>, Geometry) {
        let mixture = Mixture::new(&fluid(0.2));
        let hydraulics = Hydraulics::new(&hydraulics());
        let solver = FlowlineSolver {
            mixture: &mixture,
            hydraulics: &hydraulics,
            pipe: &PIPE,
            ground_temperature: 278.0,
            ground_conductivity: 1.5,
            segments: 100,
        };
        solver.solve(2000.0, 0.184, WELLHEAD, bend).unwrap()
    }

    #[test]
    fn entry_loss_uses_bore_to_area_ratio() {
        let area = Geometry::circular_area(0.098);
        let ratio = 0.184 / area;

        assert_relative_eq!(
            entry_loss(0.184, area).unwrap(),
            (1.0 - ratio) * (1.0 - ratio) * 0.762,
            max_relative = 1e-12
        );
        assert_eq!(entry_loss(0.0, area).unwrap(), 0.762);
        assert!(entry_loss(0.184, 0.0).is_err());
    }

    #[test]
    fn flowline_cools_toward_ground() {
        let (nodes, geometry) = solve(false);
        let end = nodes[100];

        assert_eq!(geometry.station(100), 2000.0);
        assert!(end.temperature < 293.0 && end.temperature > 278.0);
        assert_relative_eq!(end.mass_flow, 0.185, max_relative = 1e-9);
    }

    #[test]
    fn bend_adds_a_final_loss() {
        let (plain, _) = solve(false);
        let (bent, _) = solve(true);

        assert_eq!(plain[99], bent[99]);
        assert!(bent[100].pressure < plain[100].pressure);
    }

    #[test]
    fn pipe_at_the_surface_is_rejected() {
        let mixture = Mixture::new(&fluid(0.2));
        let hydraulics = Hydraulics::new(&hydraulics());
        let pipe = Pipe {
            inner_diameter: 0.098,
            axis_depth: 0.02,
        };
        let solver = FlowlineSolver {
            mixture: &mixture,
            hydraulics: &hydraulics,
            pipe: &pipe,
            ground_temperature: 278.0,
            ground_conductivity: 1.5,
            segments: 10,
        };

        assert!(matches!(
            solver.solve(2000.0, 0.184, WELLHEAD, false),
            Err(DomainError::NegativeDiscriminant { .. })
        ));
    }
}
