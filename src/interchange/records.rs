use serde::{Deserialize, Serialize};
use uom::si::{
    diffusion_coefficient::square_meter_per_second,
    f64::{
        DiffusionCoefficient, Length, MassDensity, MassRate, Pressure, ThermodynamicTemperature,
        Velocity, VolumeRate,
    },
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
    volume_rate::cubic_meter_per_second,
};

use crate::models::production::{
    DrainageProfile, FlowState, Junction, LineProfile, TrunkOutput,
};

/// One well's radial inflow, SI units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct DrainageRecord {
    flow_rate: f64,
    thickness: f64,
    radius: Vec<f64>,
    pressure: Vec<f64>,
    filtration_velocity: Vec<f64>,
}

impl From<&DrainageProfile> for DrainageRecord {
    fn from(profile: &DrainageProfile) -> Self {
        Self {
            flow_rate: profile.flow_rate().get::<cubic_meter_per_second>(),
            thickness: profile.thickness().get::<meter>(),
            radius: profile.radii().iter().map(|r| r.get::<meter>()).collect(),
            pressure: profile.pressures().iter().map(|p| p.get::<pascal>()).collect(),
            filtration_velocity: profile
                .filtration_velocities()
                .iter()
                .map(|w| w.get::<meter_per_second>())
                .collect(),
        }
    }
}

impl DrainageRecord {
    pub(super) fn to_profile(&self) -> Option<DrainageProfile> {
        DrainageProfile::new(
            self.radius.iter().copied().map(Length::new::<meter>).collect(),
            self.pressure.iter().copied().map(Pressure::new::<pascal>).collect(),
            self.filtration_velocity
                .iter()
                .copied()
                .map(Velocity::new::<meter_per_second>)
                .collect(),
            VolumeRate::new::<cubic_meter_per_second>(self.flow_rate),
            Length::new::<meter>(self.thickness),
        )
    }
}

/// One marched line, SI units, one array entry per node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct LineRecord {
    bore: f64,
    station: Vec<f64>,
    pressure: Vec<f64>,
    temperature: Vec<f64>,
    density: Vec<f64>,
    velocity: Vec<f64>,
    mass_flow: Vec<f64>,
    kinematic_viscosity: Vec<f64>,
}

impl From<&LineProfile> for LineRecord {
    fn from(profile: &LineProfile) -> Self {
        let states = profile.states();
        let column = |f: fn(&FlowState) -> f64| states.iter().map(f).collect::<Vec<_>>();

        Self {
            bore: profile.bore().get::<meter>(),
            station: profile.stations().iter().map(|x| x.get::<meter>()).collect(),
            pressure: column(|s| s.pressure.get::<pascal>()),
            temperature: column(|s| s.temperature.get::<kelvin>()),
            density: column(|s| s.density.get::<kilogram_per_cubic_meter>()),
            velocity: column(|s| s.velocity.get::<meter_per_second>()),
            mass_flow: column(|s| s.mass_rate.get::<kilogram_per_second>()),
            kinematic_viscosity: column(|s| s.kinematic_viscosity.get::<square_meter_per_second>()),
        }
    }
}

impl LineRecord {
    /// Rebuilds the profile, or `None` if the columns disagree in length.
    pub(super) fn to_profile(&self) -> Option<LineProfile> {
        let nodes = self.station.len();
        let columns = [
            &self.pressure,
            &self.temperature,
            &self.density,
            &self.velocity,
            &self.mass_flow,
            &self.kinematic_viscosity,
        ];
        if columns.iter().any(|column| column.len() != nodes) {
            return None;
        }

        let states = (0..nodes)
            .map(|j| FlowState {
                pressure: Pressure::new::<pascal>(self.pressure[j]),
                temperature: ThermodynamicTemperature::new::<kelvin>(self.temperature[j]),
                density: MassDensity::new::<kilogram_per_cubic_meter>(self.density[j]),
                velocity: Velocity::new::<meter_per_second>(self.velocity[j]),
                mass_rate: MassRate::new::<kilogram_per_second>(self.mass_flow[j]),
                kinematic_viscosity: DiffusionCoefficient::new::<square_meter_per_second>(
                    self.kinematic_viscosity[j],
                ),
            })
            .collect();

        LineProfile::new(
            Length::new::<meter>(self.bore),
            self.station.iter().copied().map(Length::new::<meter>).collect(),
            states,
        )
    }
}

/// The merged trunk line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct TrunkRecord {
    junction_mass_flow: f64,
    junction_temperature: f64,
    line: LineRecord,
}

impl From<&TrunkOutput> for TrunkRecord {
    fn from(output: &TrunkOutput) -> Self {
        Self {
            junction_mass_flow: output.junction.mass_rate.get::<kilogram_per_second>(),
            junction_temperature: output.junction.temperature.get::<kelvin>(),
            line: LineRecord::from(&output.line),
        }
    }
}

impl TrunkRecord {
    pub(super) fn to_output(&self) -> Option<TrunkOutput> {
        Some(TrunkOutput {
            junction: Junction {
                mass_rate: MassRate::new::<kilogram_per_second>(self.junction_mass_flow),
                temperature: ThermodynamicTemperature::new::<kelvin>(self.junction_temperature),
            },
            line: self.line.to_profile()?,
        })
    }
}
