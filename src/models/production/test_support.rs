use uom::si::{
    acceleration::meter_per_second_squared,
    dynamic_viscosity::pascal_second,
    f64::{
        Acceleration, DynamicViscosity, MassDensity, SpecificHeatCapacity, ThermalConductivity,
    },
    mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::{
    config::{Config, FluidConfig, HydraulicsConfig, LiquidConfig},
    support::constraint::{StrictlyPositive, UnitInterval},
};

/// Light crude with the given water cut.
pub(crate) fn fluid(water_cut: f64) -> FluidConfig {
    FluidConfig {
        oil: liquid(850.0, 8.0e-4, 2000.0, 0.13),
        water: liquid(1000.0, 2.0e-4, 4200.0, 0.6),
        oil_viscosity: DynamicViscosity::new::<pascal_second>(0.01),
        water_cut: UnitInterval::new(water_cut).unwrap(),
    }
}

fn liquid(density: f64, expansion: f64, heat_capacity: f64, conductivity: f64) -> LiquidConfig {
    LiquidConfig {
        density: MassDensity::new::<kilogram_per_cubic_meter>(density),
        expansion,
        heat_capacity: SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>(heat_capacity),
        conductivity: ThermalConductivity::new::<watt_per_meter_kelvin>(conductivity),
    }
}

/// Re₁ = 2000, Re₂ = 10000, ε = 1e-4, E = 0.95.
pub(crate) fn hydraulics() -> HydraulicsConfig {
    HydraulicsConfig {
        reynolds_laminar: StrictlyPositive::new(2000.0).unwrap(),
        reynolds_turbulent: StrictlyPositive::new(10_000.0).unwrap(),
        roughness: StrictlyPositive::new(1.0e-4).unwrap(),
        technical_condition: StrictlyPositive::new(0.95).unwrap(),
        gravity: Acceleration::new::<meter_per_second_squared>(9.81),
    }
}

/// The bundled sample field.
pub(crate) fn field() -> Config {
    Config::from_toml_str(include_str!("../../../data/field.toml")).unwrap()
}
