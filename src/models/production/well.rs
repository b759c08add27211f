//! Vertical flow up each well bore.
//!
//! Fluid enters at the bottom hole with the reservoir inflow and formation
//! temperature, then climbs against gravity while losing heat to rock that
//! cools toward the surface.

mod core;

use tracing::info;
use twine_core::Model;
use uom::si::{
    length::meter, mass_rate::kilogram_per_second, pressure::pascal,
    thermal_conductivity::watt_per_meter_kelvin, thermodynamic_temperature::kelvin,
    volume_rate::cubic_meter_per_second,
};

use crate::config::Config;

use super::{
    DrainageProfile, LINE_COUNT, LineProfile, ReservoirOutput, Stage, StageError,
    support::{Hydraulics, Mixture, solve_lines},
};

use self::core::{Bore, Surroundings, WellSolver};

/// Well stage model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Well {
    mixture: Mixture,
    hydraulics: Hydraulics,
    surroundings: Surroundings,
    depths: [f64; LINE_COUNT],
    wall_thickness: f64,
    segments: usize,
    exit_loss: bool,
}

/// Output of the [`Well`] stage.
#[derive(Debug, Clone, PartialEq)]
pub struct WellOutput {
    /// One profile per well, bottom hole first, stations as depth.
    pub wells: [LineProfile; LINE_COUNT],
}

impl Well {
    /// Builds the stage from the configuration.
    ///
    /// Well radius and pay thickness are not taken from here; they come with
    /// each inflow profile, so the bore always matches the reservoir solve
    /// that feeds it.
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let environment = &config.environment;

        Self {
            mixture: Mixture::new(&config.fluid),
            hydraulics: Hydraulics::new(&config.hydraulics),
            surroundings: Surroundings {
                surface_temperature: environment.ground_temperature.get::<kelvin>(),
                gradient: environment.geothermal_gradient.value,
                ground_conductivity: environment
                    .ground_conductivity
                    .get::<watt_per_meter_kelvin>(),
                wall_conductivity: environment.wall_conductivity.get::<watt_per_meter_kelvin>(),
            },
            depths: config.wells.depth.map(|depth| depth.get::<meter>()),
            wall_thickness: config.wells.wall_thickness.get::<meter>(),
            segments: config.segments.well.into_inner(),
            exit_loss: config.fittings.well_exit,
        }
    }
}

impl Model for Well {
    type Input = ReservoirOutput;
    type Output = WellOutput;
    type Error = StageError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let solver = WellSolver {
            mixture: &self.mixture,
            hydraulics: &self.hydraulics,
            surroundings: &self.surroundings,
            segments: self.segments,
            exit_loss: self.exit_loss,
        };

        let wells = solve_lines(&input.wells, |line, inflow| {
            let bore = self.bore(line, inflow);
            let well = solver
                .solve(
                    &bore,
                    inflow.well_pressure().get::<pascal>(),
                    inflow.flow_rate().get::<cubic_meter_per_second>(),
                )
                .map_err(StageError::on(Stage::Well, Some(line)))?;
            Ok(LineProfile::from_nodes(bore.inner_diameter, &well.nodes, |node| {
                well.formation.depth(node)
            }))
        })?;

        for (line, well) in wells.iter().enumerate() {
            let head = well.outlet();
            info!(
                well = line + 1,
                wellhead_pressure = head.pressure.get::<pascal>(),
                wellhead_temperature = head.temperature.get::<kelvin>(),
                mass_rate = head.mass_rate.get::<kilogram_per_second>(),
                "well stage solved"
            );
        }

        Ok(WellOutput { wells })
    }
}

impl Well {
    /// Bore of well `line`: the casing outer diameter is the well diameter,
    /// the tubing bore is that minus the wall on both sides.
    fn bore(&self, line: usize, inflow: &DrainageProfile) -> Bore {
        let outer_diameter = 2.0 * inflow.well_radius().get::<meter>();
        Bore {
            depth: self.depths[line],
            outer_diameter,
            inner_diameter: outer_diameter - 2.0 * self.wall_thickness,
            pay_thickness: inflow.thickness().get::<meter>(),
        }
    }
}
