use tracing::debug;

use crate::models::production::support::{
    DomainError, Formation, FormationParameters, Geometry, Hydraulics, Inlet, Line, LocalLosses,
    Mixture, Node, Orientation,
};

/// Local loss where the tubing takes fluid from the bottom hole.
pub(super) const ENTRY_LOSS: f64 = 0.5;

/// 90° elbow plus an open gate valve at the wellhead.
pub(super) const EXIT_LOSS: f64 = 1.37 + 0.15;

/// Thermal surroundings shared by all wells, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Surroundings {
    pub(super) surface_temperature: f64,
    pub(super) gradient: f64,
    pub(super) ground_conductivity: f64,
    pub(super) wall_conductivity: f64,
}

/// One well bore, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Bore {
    pub(super) depth: f64,
    pub(super) outer_diameter: f64,
    pub(super) inner_diameter: f64,
    /// Pay thickness below the bottom of the bore.
    pub(super) pay_thickness: f64,
}

/// Shared inputs of every well march.
#[derive(Debug, Clone, Copy)]
pub(super) struct WellSolver<'a> {
    pub(super) mixture: &'a Mixture,
    pub(super) hydraulics: &'a Hydraulics,
    pub(super) surroundings: &'a Surroundings,
    pub(super) segments: usize,
    pub(super) exit_loss: bool,
}

/// A marched well.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct MarchedWell {
    pub(super) nodes: Vec<Node>,
    pub(super) formation: Formation,
}

impl WellSolver<'_> {
    /// Marches one well from the bottom hole to the wellhead.
    ///
    /// The bottom-hole fluid is at formation temperature at the base of the
    /// pay zone and carries the reservoir inflow.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError`] raised while marching.
    pub(super) fn solve(
        &self,
        bore: &Bore,
        bottom_hole_pressure: f64,
        flow_rate: f64,
    ) -> Result<MarchedWell, DomainError> {
        let geometry = Geometry::new(
            bore.inner_diameter,
            Geometry::circular_area(bore.inner_diameter),
            bore.depth,
            self.segments,
            Orientation::Vertical,
        )?;
        let formation = Formation::new(&FormationParameters {
            surface_temperature: self.surroundings.surface_temperature,
            gradient: self.surroundings.gradient,
            depth: bore.depth,
            segments: self.segments,
            inner_diameter: bore.inner_diameter,
            outer_diameter: bore.outer_diameter,
            wall_conductivity: self.surroundings.wall_conductivity,
            ground_conductivity: self.surroundings.ground_conductivity,
        })?;

        let temperature = self.surroundings.surface_temperature
            + (bore.depth + bore.pay_thickness) * self.surroundings.gradient;
        let mass_flow = flow_rate * self.mixture.density(temperature)?;

        let line = Line {
            mixture: self.mixture,
            hydraulics: self.hydraulics,
            geometry: &geometry,
            losses: LocalLosses {
                entry: ENTRY_LOSS,
                exit: self.exit_loss.then_some(EXIT_LOSS),
            },
            sink: &formation,
        };
        let nodes = line.march(Inlet {
            pressure: bottom_hole_pressure,
            temperature,
            mass_flow,
        })?;

        if let (Some(bottom), Some(head)) = (nodes.first(), nodes.last()) {
            debug!(
                bottom_hole_temperature = bottom.temperature,
                wellhead_pressure = head.pressure,
                wellhead_temperature = head.temperature,
                mass_flow = head.mass_flow,
                "well marched"
            );
        }

        Ok(MarchedWell { nodes, formation })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::production::test_support::{fluid, hydraulics};

    const SURROUNDINGS: Surroundings = Surroundings {
        surface_temperature: 278.0,
        gradient: 0.03,
        ground_conductivity: 1.5,
        wall_conductivity: 50.0,
    };

    const BORE: Bore = Bore {
        depth: 1500.0,
        outer_diameter: 0.2,
        inner_diameter: 0.184,
        pay_thickness: 10.0,
    };

    fn solve(water_cut: f64, exit_loss: bool) -> MarchedWell {
        let mixture = Mixture::new(&fluid(water_cut));
        let hydraulics = Hydraulics::new(&hydraulics());
        let solver = WellSolver {
            mixture: &mixture,
            hydraulics: &hydraulics,
            surroundings: &SURROUNDINGS,
            segments: 100,
            exit_loss,
        };
        solver.solve(&BORE, 18.0e6, 2.1e-4).unwrap()
    }

    #[test]
    fn bottom_hole_state() {
        let well = solve(0.2, false);
        let bottom = well.nodes[0];

        assert_relative_eq!(bottom.temperature, 278.0 + 1510.0 * 0.03, epsilon = 1e-9);
        assert_eq!(bottom.pressure, 18.0e6);
        assert_relative_eq!(
            bottom.mass_flow,
            2.1e-4 * bottom.density,
            max_relative = 1e-12
        );
    }

    #[test]
    fn rising_fluid_cools_and_loses_pressure() {
        let well = solve(0.2, false);
        let head = well.nodes[100];

        assert_eq!(well.nodes.len(), 101);
        assert!(head.temperature < well.nodes[0].temperature);
        assert!(head.temperature > 278.0);
        // Mostly hydrostatic: ρ·g·H for ρ ≈ 870 kg/m³ is about 12.8 MPa.
        let drop = well.nodes[0].pressure - head.pressure;
        assert!(drop > 12.0e6 && drop < 14.0e6, "drop = {drop}");
    }

    #[test]
    fn zero_water_cut_density_follows_the_oil_law() {
        let well = solve(0.0, false);

        for pair in well.nodes.windows(2) {
            let expected = 850.0 / (1.0 + 8.0e-4 * (pair[0].temperature - 293.0));
            assert_eq!(pair[1].density, expected);
        }
    }

    #[test]
    fn exit_loss_only_lowers_wellhead_pressure() {
        let without = solve(0.2, false);
        let with = solve(0.2, true);

        assert_eq!(without.nodes[99], with.nodes[99]);
        assert!(with.nodes[100].pressure < without.nodes[100].pressure);
    }

    #[test]
    fn stations_are_depths() {
        let well = solve(0.2, false);

        assert_eq!(well.formation.depth(0), 1500.0);
        assert_eq!(well.formation.depth(100), 0.0);
    }
}
