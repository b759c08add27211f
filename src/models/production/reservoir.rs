//! Radial inflow from the formation into each well.
//!
//! Closed-form Dupuit solution per well: the pressure and filtration velocity
//! across the drainage area and the steady volumetric inflow.

mod core;

use tracing::info;
use twine_core::Model;
use uom::{
    ConstZero,
    si::{
        f64::{Length, Pressure, Velocity, VolumeRate},
        length::meter,
        pressure::pascal,
        velocity::meter_per_second,
        volume_rate::cubic_meter_per_second,
    },
};

use crate::config::{Config, ReservoirConfig};

use super::{
    LINE_COUNT, Stage, StageError,
    support::{Mixture, solve_lines},
};

/// Reservoir stage model.
///
/// The input is the per-well drainage description; fluid properties and the
/// radial grid resolution come from the configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reservoir {
    mixture: Mixture,
    segments: usize,
}

/// Inflow profile of one well.
#[derive(Debug, Clone, PartialEq)]
pub struct DrainageProfile {
    radii: Vec<Length>,
    pressures: Vec<Pressure>,
    filtration_velocities: Vec<Velocity>,
    flow_rate: VolumeRate,
    thickness: Length,
}

/// Output of the [`Reservoir`] stage.
#[derive(Debug, Clone, PartialEq)]
pub struct ReservoirOutput {
    pub wells: [DrainageProfile; LINE_COUNT],
}

impl Reservoir {
    #[must_use]
    pub fn new(config: &Config) -> Self {
        Self {
            mixture: Mixture::new(&config.fluid),
            segments: config.segments.reservoir.into_inner(),
        }
    }
}

impl Model for Reservoir {
    type Input = ReservoirConfig;
    type Output = ReservoirOutput;
    type Error = StageError;

    fn call(&self, input: &Self::Input) -> Result<Self::Output, Self::Error> {
        let wells = solve_lines(&input.wells, |line, drainage| {
            core::radial_inflow(&self.mixture, drainage, self.segments)
                .map(|inflow| DrainageProfile::from_inflow(inflow, drainage.thickness))
                .map_err(StageError::on(Stage::Reservoir, Some(line)))
        })?;

        let output = ReservoirOutput { wells };
        info!(
            total_flow_rate = output.total_flow_rate().get::<cubic_meter_per_second>(),
            "reservoir stage solved"
        );
        Ok(output)
    }
}

impl ReservoirOutput {
    /// Combined inflow of all wells.
    pub fn total_flow_rate(&self) -> VolumeRate {
        self.wells
            .iter()
            .fold(VolumeRate::ZERO, |total, well| total + well.flow_rate)
    }
}

impl DrainageProfile {
    fn from_inflow(inflow: core::RadialInflow, thickness: Length) -> Self {
        Self {
            radii: inflow.radii.into_iter().map(Length::new::<meter>).collect(),
            pressures: inflow.pressures.into_iter().map(Pressure::new::<pascal>).collect(),
            filtration_velocities: inflow
                .filtration_velocities
                .into_iter()
                .map(Velocity::new::<meter_per_second>)
                .collect(),
            flow_rate: VolumeRate::new::<cubic_meter_per_second>(inflow.flow_rate),
            thickness,
        }
    }

    /// Assembles a profile, or `None` if the arrays are empty or of
    /// different lengths.
    pub(crate) fn new(
        radii: Vec<Length>,
        pressures: Vec<Pressure>,
        filtration_velocities: Vec<Velocity>,
        flow_rate: VolumeRate,
        thickness: Length,
    ) -> Option<Self> {
        let consistent = !radii.is_empty()
            && pressures.len() == radii.len()
            && filtration_velocities.len() == radii.len();
        consistent.then_some(Self {
            radii,
            pressures,
            filtration_velocities,
            flow_rate,
            thickness,
        })
    }

    /// Node radii, well first.
    pub fn radii(&self) -> &[Length] {
        &self.radii
    }

    pub fn pressures(&self) -> &[Pressure] {
        &self.pressures
    }

    /// Filtration velocity at each node, negative toward the well.
    pub fn filtration_velocities(&self) -> &[Velocity] {
        &self.filtration_velocities
    }

    /// Steady volumetric inflow.
    pub fn flow_rate(&self) -> VolumeRate {
        self.flow_rate
    }

    /// Pressure at the well.
    pub fn well_pressure(&self) -> Pressure {
        self.pressures[0]
    }

    /// Radius of the well bore, the first node.
    pub fn well_radius(&self) -> Length {
        self.radii[0]
    }

    /// Net pay thickness the well drains.
    pub fn thickness(&self) -> Length {
        self.thickness
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::models::production::{DomainError, test_support::field};

    #[test]
    fn repeated_calls_are_identical() {
        let config = field();
        let reservoir = Reservoir::new(&config);

        let first = reservoir.call(&config.reservoir).unwrap();
        let second = reservoir.call(&config.reservoir).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn identical_wells_produce_identical_profiles() {
        let config = field();
        let mut input = config.reservoir;
        input.wells = [input.wells[0]; LINE_COUNT];

        let output = Reservoir::new(&config).call(&input).unwrap();
        assert_eq!(output.wells[0], output.wells[1]);
        assert_eq!(output.wells[1], output.wells[2]);
        assert_eq!(output.total_flow_rate(), output.wells[0].flow_rate() * 3.0);
    }

    #[test]
    fn well_pressure_is_the_bottom_hole_pressure() {
        let config = field();
        let output = Reservoir::new(&config).call(&config.reservoir).unwrap();

        for (well, drainage) in output.wells.iter().zip(&config.reservoir.wells) {
            let expected = drainage.bottom_hole_pressure.get::<pascal>();
            assert!((well.well_pressure().get::<pascal>() - expected).abs() < 1e-6);
            assert_eq!(well.radii().len(), 101);
        }
    }

    #[test]
    fn collapsed_drainage_area_names_the_well() {
        let config = field();
        let mut input = config.reservoir;
        input.wells[2].drainage_radius = input.wells[2].well_radius;

        let error = Reservoir::new(&config).call(&input).unwrap_err();
        assert_eq!(
            error,
            StageError::Domain {
                stage: Stage::Reservoir,
                line: Some(2),
                source: DomainError::DivisionByZero {
                    quantity: "drainage radius ratio"
                },
            }
        );
    }
}
