//! Buried flowlines from each wellhead to the junction.

mod core;

use tracing::info;
use twine_core::Model;
use uom::si::{
    length::meter, mass_rate::kilogram_per_second, pressure::pascal,
    thermal_conductivity::watt_per_meter_kelvin, thermodynamic_temperature::kelvin,
};

use crate::config::Config;

use super::{
    LINE_COUNT, LineProfile, Stage, StageError, WellOutput,
    support::{Hydraulics, Mixture, solve_lines},
};

use self::core::{FlowlineSolver, Pipe};

/// Flowline stage model.
///
/// Lines are horizontal and lose heat to soil at the ground temperature.
/// The optional bend loss applies to the first and third lines only.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Flowline {
    mixture: Mixture,
    hydraulics: Hydraulics,
    pipe: Pipe,
    lengths: [f64; LINE_COUNT],
    ground_temperature: f64,
    ground_conductivity: f64,
    segments: usize,
    bend_loss: bool,
}

/// Output of the [`Flowline`] stage.
#[derive(Debug, Clone, PartialEq)]
pub struct FlowlineOutput {
    /// One profile per line, wellhead first, stations as distance.
    pub lines: [LineProfile; LINE_COUNT],
}

impl Flowline {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let flowlines = &config.flowlines;
        let inner_diameter = flowlines.outer_diameter.get::<meter>()
            - 2.0 * flowlines.wall_thickness.get::<meter>();

        Self {
            mixture: Mixture::new(&config.fluid),
            hydraulics: Hydraulics::new(&config.hydraulics),
            pipe: Pipe {
                inner_diameter,
                axis_depth: flowlines.burial_depth.get::<meter>() + inner_diameter / 2.0,
            },
            lengths: flowlines.length.map(|length| length.get::<meter>()),
            ground_temperature: config.environment.ground_temperature.get::<kelvin>(),
            ground_conductivity: config
                .environment
                .ground_conductivity
                .get::<watt_per_meter_kelvin>(),
            segments: config.segments.flowline.into_inner(),
            bend_loss: config.fittings.flowline_bend,
        }
    }
}

impl Model for Flowline {
    type Input = WellOutput;
    type Output = FlowlineOutput;
    type Error = StageError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let solver = FlowlineSolver {
            mixture: &self.mixture,
            hydraulics: &self.hydraulics,
            pipe: &self.pipe,
            ground_temperature: self.ground_temperature,
            ground_conductivity: self.ground_conductivity,
            segments: self.segments,
        };

        let lines = solve_lines(&input.wells, |line, well| {
            let bend = self.bend_loss && line != 1;
            let (nodes, geometry) = solver
                .solve(
                    self.lengths[line],
                    well.bore().get::<meter>(),
                    well.outlet().as_inlet(),
                    bend,
                )
                .map_err(StageError::on(Stage::Flowline, Some(line)))?;
            Ok(LineProfile::from_nodes(self.pipe.inner_diameter, &nodes, |node| {
                geometry.station(node)
            }))
        })?;

        for (line, profile) in lines.iter().enumerate() {
            let end = profile.outlet();
            info!(
                line = line + 1,
                junction_pressure = end.pressure.get::<pascal>(),
                junction_temperature = end.temperature.get::<kelvin>(),
                mass_rate = end.mass_rate.get::<kilogram_per_second>(),
                "flowline stage solved"
            );
        }

        Ok(FlowlineOutput { lines })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::production::{Reservoir, Well, test_support::field};

    fn well_output(config: &Config) -> WellOutput {
        let inflow = Reservoir::new(config).call(&config.reservoir).unwrap();
        Well::new(config).call(&inflow).unwrap()
    }

    #[test]
    fn seeds_from_the_wellheads() {
        let config = field();
        let wells = well_output(&config);
        let output = Flowline::new(&config).call(&wells).unwrap();

        for (line, well) in output.lines.iter().zip(&wells.wells) {
            assert_eq!(line.inlet().pressure, well.outlet().pressure);
            assert_eq!(line.inlet().temperature, well.outlet().temperature);
            assert_eq!(line.inlet().mass_rate, well.outlet().mass_rate);
        }
        assert_eq!(
            output.lines[2].stations().last().map(|x| x.get::<meter>()),
            Some(2500.0)
        );
    }

    #[test]
    fn bend_loss_skips_the_middle_line() {
        let config = field();
        let wells = well_output(&config);
        let plain = Flowline::new(&config).call(&wells).unwrap();

        let mut bent_config = config.clone();
        bent_config.fittings.flowline_bend = true;
        let bent = Flowline::new(&bent_config).call(&wells).unwrap();

        assert_eq!(plain.lines[1], bent.lines[1]);
        for line in [0, 2] {
            assert!(bent.lines[line].outlet().pressure < plain.lines[line].outlet().pressure);
        }
    }
}
