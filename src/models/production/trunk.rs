//! The shared trunk line downstream of the junction.
//!
//! The three flowline streams mix at the junction, which is held at the
//! delivery pressure, and the combined stream is marched along the trunk.

mod core;

use tracing::info;
use twine_core::Model;
use uom::si::{
    f64::{MassRate, ThermodynamicTemperature},
    length::meter,
    mass_rate::kilogram_per_second,
    pressure::pascal,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::config::Config;

use super::{
    FlowlineOutput, LineProfile, Stage, StageError,
    support::{Hydraulics, Mixture},
};

use self::core::{TrunkLine, TrunkSolver, merge};

/// Trunk stage model.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trunk {
    mixture: Mixture,
    hydraulics: Hydraulics,
    line: TrunkLine,
    ground_temperature: f64,
    ground_conductivity: f64,
    segments: usize,
    delivery_pressure: f64,
}

/// The combined stream at the junction.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Junction {
    /// Sum of the incoming mass flows.
    pub mass_rate: MassRate,
    /// Mass-weighted mean of the incoming temperatures.
    pub temperature: ThermodynamicTemperature,
}

/// Output of the [`Trunk`] stage.
#[derive(Debug, Clone, PartialEq)]
pub struct TrunkOutput {
    pub junction: Junction,
    /// Trunk profile, junction first, stations as distance.
    pub line: LineProfile,
}

impl Trunk {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        let trunk = &config.trunk;
        let outer_diameter = trunk.outer_diameter.get::<meter>();

        Self {
            mixture: Mixture::new(&config.fluid),
            hydraulics: Hydraulics::new(&config.hydraulics),
            line: TrunkLine {
                length: trunk.length.get::<meter>(),
                outer_diameter,
                inner_diameter: outer_diameter - 2.0 * trunk.wall_thickness.get::<meter>(),
                axis_depth: trunk.burial_depth.get::<meter>() + outer_diameter / 2.0,
            },
            ground_temperature: config.environment.ground_temperature.get::<kelvin>(),
            ground_conductivity: config
                .environment
                .ground_conductivity
                .get::<watt_per_meter_kelvin>(),
            segments: config.segments.trunk.into_inner(),
            delivery_pressure: trunk.delivery_pressure.get::<pascal>(),
        }
    }
}

impl Model for Trunk {
    type Input = FlowlineOutput;
    type Output = TrunkOutput;
    type Error = StageError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let on_error = StageError::on(Stage::Trunk, None);

        let streams = input.lines.each_ref().map(|line| line.outlet().as_inlet());
        let merged = merge(&streams).map_err(&on_error)?;

        let solver = TrunkSolver {
            mixture: &self.mixture,
            hydraulics: &self.hydraulics,
            trunk: &self.line,
            ground_temperature: self.ground_temperature,
            ground_conductivity: self.ground_conductivity,
            segments: self.segments,
            delivery_pressure: self.delivery_pressure,
        };
        let (nodes, geometry) = solver.solve(merged).map_err(&on_error)?;

        let output = TrunkOutput {
            junction: Junction {
                mass_rate: MassRate::new::<kilogram_per_second>(merged.mass_flow),
                temperature: ThermodynamicTemperature::new::<kelvin>(merged.temperature),
            },
            line: LineProfile::from_nodes(self.line.inner_diameter, &nodes, |node| {
                geometry.station(node)
            }),
        };

        let end = output.line.outlet();
        info!(
            junction_mass_rate = merged.mass_flow,
            junction_temperature = merged.temperature,
            end_pressure = end.pressure.get::<pascal>(),
            end_temperature = end.temperature.get::<kelvin>(),
            "trunk stage solved"
        );

        Ok(output)
    }
}
