use uom::si::{
    diffusion_coefficient::square_meter_per_second,
    f64::{
        DiffusionCoefficient, Length, MassDensity, MassRate, Pressure, TemperatureInterval,
        ThermodynamicTemperature, Velocity,
    },
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second,
    pressure::pascal,
    thermodynamic_temperature::kelvin,
    velocity::meter_per_second,
};

use crate::support::units::TemperatureDifference;

use super::support::{Inlet, Node};

/// Fluid state at one node of a line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowState {
    pub pressure: Pressure,
    pub temperature: ThermodynamicTemperature,
    pub density: MassDensity,
    pub velocity: Velocity,
    pub mass_rate: MassRate,
    /// Kinematic viscosity; `uom` has no dedicated quantity for it.
    pub kinematic_viscosity: DiffusionCoefficient,
}

impl FlowState {
    pub(crate) fn from_node(node: &Node) -> Self {
        Self {
            pressure: Pressure::new::<pascal>(node.pressure),
            temperature: ThermodynamicTemperature::new::<kelvin>(node.temperature),
            density: MassDensity::new::<kilogram_per_cubic_meter>(node.density),
            velocity: Velocity::new::<meter_per_second>(node.velocity),
            mass_rate: MassRate::new::<kilogram_per_second>(node.mass_flow),
            kinematic_viscosity: DiffusionCoefficient::new::<square_meter_per_second>(
                node.kinematic_viscosity,
            ),
        }
    }

    /// This state as the inlet of a downstream line.
    pub(crate) fn as_inlet(&self) -> Inlet {
        Inlet {
            pressure: self.pressure.get::<pascal>(),
            temperature: self.temperature.get::<kelvin>(),
            mass_flow: self.mass_rate.get::<kilogram_per_second>(),
        }
    }
}

/// Axial profile of one line, inlet first.
///
/// A profile always holds at least one node, with one station per state.
#[derive(Debug, Clone, PartialEq)]
pub struct LineProfile {
    bore: Length,
    stations: Vec<Length>,
    states: Vec<FlowState>,
}

impl LineProfile {
    /// Assembles a profile, or `None` if it would be empty or the station
    /// and state counts differ.
    pub(crate) fn new(bore: Length, stations: Vec<Length>, states: Vec<FlowState>) -> Option<Self> {
        (!states.is_empty() && stations.len() == states.len()).then_some(Self {
            bore,
            stations,
            states,
        })
    }

    /// Builds a profile from a marched line and its station coordinates, m.
    ///
    /// `nodes` always starts with the inlet, so the profile is never empty.
    pub(crate) fn from_nodes(bore: f64, nodes: &[Node], station: impl Fn(usize) -> f64) -> Self {
        Self {
            bore: Length::new::<meter>(bore),
            stations: (0..nodes.len())
                .map(|node| Length::new::<meter>(station(node)))
                .collect(),
            states: nodes.iter().map(FlowState::from_node).collect(),
        }
    }

    /// Inner diameter of the line.
    pub fn bore(&self) -> Length {
        self.bore
    }

    /// Axial coordinate of each node.
    ///
    /// Wells report depth below surface; pipelines report distance from
    /// their inlet.
    pub fn stations(&self) -> &[Length] {
        &self.stations
    }

    pub fn states(&self) -> &[FlowState] {
        &self.states
    }

    pub fn inlet(&self) -> &FlowState {
        &self.states[0]
    }

    pub fn outlet(&self) -> &FlowState {
        &self.states[self.states.len() - 1]
    }

    /// Temperature lost between inlet and outlet.
    pub fn temperature_drop(&self) -> TemperatureInterval {
        self.inlet().temperature.minus(self.outlet().temperature)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;
    use uom::si::temperature_interval;

    fn node(pressure: f64, temperature: f64) -> Node {
        Node {
            pressure,
            temperature,
            density: 870.0,
            velocity: 0.5,
            mass_flow: 2.0,
            kinematic_viscosity: 1.7e-5,
        }
    }

    #[test]
    fn endpoints_and_drop() {
        let nodes = [node(5.0e6, 320.0), node(4.9e6, 315.0), node(4.8e6, 311.5)];
        let profile = LineProfile::from_nodes(0.1, &nodes, |j| 10.0 * j as f64);

        assert_eq!(profile.inlet().pressure.get::<pascal>(), 5.0e6);
        assert_eq!(profile.outlet().pressure.get::<pascal>(), 4.8e6);
        assert_eq!(profile.stations()[2].get::<meter>(), 20.0);
        assert_relative_eq!(
            profile.temperature_drop().get::<temperature_interval::kelvin>(),
            8.5,
            epsilon = 1e-12
        );
    }

    #[test]
    fn inlet_round_trips_si_values() {
        let marched = node(4.2e6, 301.25);
        let inlet = FlowState::from_node(&marched).as_inlet();

        assert_eq!(inlet.pressure, 4.2e6);
        assert_eq!(inlet.temperature, 301.25);
        assert_eq!(inlet.mass_flow, 2.0);
    }

    #[test]
    fn kinematic_viscosity_keeps_si_value() {
        let state = FlowState::from_node(&node(4.2e6, 301.25));
        assert_eq!(
            state.kinematic_viscosity.get::<square_meter_per_second>(),
            1.7e-5
        );
    }

    #[test]
    fn rejects_inconsistent_profiles() {
        let bore = Length::new::<meter>(0.1);
        let state = FlowState::from_node(&node(1.0e6, 300.0));

        assert!(LineProfile::new(bore, vec![], vec![]).is_none());
        assert!(LineProfile::new(bore, vec![bore], vec![state, state]).is_none());
        assert!(LineProfile::new(bore, vec![bore], vec![state]).is_some());
    }
}
