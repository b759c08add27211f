//! Run configuration.
//!
//! The configuration is a flat TOML document of SI values. Loading checks the
//! values each stage relies on and groups them into typed sections whose
//! physical fields are [`uom`] quantities. Geometry is left as given: a
//! radius or diameter that cannot be used surfaces as a
//! [`DomainError`](crate::models::production::DomainError) from the stage
//! that needs it.
//!
//! ```
//! let config = oilfield_flow::config::Config::load("data/field.toml").unwrap();
//! assert_eq!(config.segments.well.into_inner(), 100);
//! ```

mod raw;

use std::{fs, io, path::{Path, PathBuf}};

use thiserror::Error;
use uom::si::{
    acceleration::meter_per_second_squared,
    area::square_meter,
    dynamic_viscosity::pascal_second,
    f64::{
        Acceleration, Area, DynamicViscosity, Length, MassDensity, Pressure,
        SpecificHeatCapacity, TemperatureInterval, ThermalConductivity, ThermodynamicTemperature,
    },
    length::meter,
    mass_density::kilogram_per_cubic_meter,
    pressure::pascal,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    temperature_interval,
    thermal_conductivity::watt_per_meter_kelvin,
    thermodynamic_temperature::kelvin,
};

use crate::{
    models::production::LINE_COUNT,
    support::{
        constraint::{
            Constrained, Constraint, ConstraintError, NonNegative, StrictlyPositive, UnitInterval,
        },
        units::TemperatureGradient,
    },
};

use raw::RawConfig;

/// Errors raised while loading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The file could not be read.
    #[error("failed to read configuration file {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A key is missing, has the wrong type, or an array has the wrong length.
    #[error("failed to parse configuration")]
    Parse(#[from] toml::de::Error),

    /// A value is outside its allowed range.
    #[error("invalid value for `{key}`")]
    Invalid {
        key: &'static str,
        #[source]
        source: ConstraintError,
    },

    /// The laminar threshold is not below the turbulent one.
    #[error("reynolds_laminar ({laminar}) must be below reynolds_turbulent ({turbulent})")]
    ReynoldsOrder { laminar: f64, turbulent: f64 },
}

/// A validated run configuration.
#[derive(Debug, Clone, PartialEq)]
pub struct Config {
    pub segments: Segments,
    pub fluid: FluidConfig,
    pub hydraulics: HydraulicsConfig,
    pub environment: EnvironmentConfig,
    pub reservoir: ReservoirConfig,
    pub wells: WellConfig,
    pub flowlines: FlowlineConfig,
    pub trunk: TrunkConfig,
    pub fittings: FittingsConfig,
}

/// Segment count of each stage.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Segments {
    pub reservoir: Constrained<usize, StrictlyPositive>,
    pub well: Constrained<usize, StrictlyPositive>,
    pub flowline: Constrained<usize, StrictlyPositive>,
    pub trunk: Constrained<usize, StrictlyPositive>,
}

/// The produced oil/water mixture.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FluidConfig {
    pub oil: LiquidConfig,
    pub water: LiquidConfig,
    /// Oil viscosity before the emulsion correction.
    pub oil_viscosity: DynamicViscosity,
    /// Volume fraction of water.
    pub water_cut: Constrained<f64, UnitInterval>,
}

/// Properties of one liquid.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiquidConfig {
    /// Density at 293 K.
    pub density: MassDensity,
    /// Linear thermal expansion coefficient, 1/K.
    pub expansion: f64,
    pub heat_capacity: SpecificHeatCapacity,
    pub conductivity: ThermalConductivity,
}

/// Friction and flow-regime constants.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HydraulicsConfig {
    /// Upper Reynolds number of laminar flow.
    pub reynolds_laminar: Constrained<f64, StrictlyPositive>,
    /// Lower Reynolds number of turbulent flow.
    pub reynolds_turbulent: Constrained<f64, StrictlyPositive>,
    /// Relative wall roughness.
    pub roughness: Constrained<f64, StrictlyPositive>,
    /// Technical condition of the pipe walls, `E`.
    pub technical_condition: Constrained<f64, StrictlyPositive>,
    pub gravity: Acceleration,
}

/// The ground the lines run through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnvironmentConfig {
    /// Ground temperature at the surface and along buried pipes.
    pub ground_temperature: ThermodynamicTemperature,
    pub geothermal_gradient: TemperatureGradient,
    pub ground_conductivity: ThermalConductivity,
    /// Conductivity of the well casing.
    pub wall_conductivity: ThermalConductivity,
}

/// Radial inflow parameters of one well.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Drainage {
    pub permeability: Area,
    /// Net pay thickness.
    pub thickness: Length,
    pub bottom_hole_pressure: Pressure,
    /// Pressure at the drainage radius.
    pub boundary_pressure: Pressure,
    pub well_radius: Length,
    pub drainage_radius: Length,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ReservoirConfig {
    pub wells: [Drainage; LINE_COUNT],
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WellConfig {
    pub depth: [Length; LINE_COUNT],
    pub wall_thickness: Length,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FlowlineConfig {
    pub length: [Length; LINE_COUNT],
    pub outer_diameter: Length,
    pub wall_thickness: Length,
    /// Cover depth above the pipe crown.
    pub burial_depth: Length,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrunkConfig {
    pub length: Length,
    pub outer_diameter: Length,
    pub wall_thickness: Length,
    /// Cover depth above the pipe crown.
    pub burial_depth: Length,
    /// Pressure at the junction where the trunk starts.
    pub delivery_pressure: Pressure,
}

/// Optional local losses, both off unless enabled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct FittingsConfig {
    /// Elbow and open valve at the top of each well.
    pub well_exit: bool,
    /// Bend at the end of the first and third flowlines.
    pub flowline_bend: bool,
}

impl Config {
    /// Reads and validates the configuration file at `path`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the file cannot be read, parsed, or
    /// validated.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&text)
    }

    /// Parses and validates a configuration document.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] if the document cannot be parsed or
    /// validated.
    pub fn from_toml_str(text: &str) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(text)?;
        Self::try_from(raw)
    }
}

impl TryFrom<RawConfig> for Config {
    type Error = ConfigError;

    fn try_from(raw: RawConfig) -> Result<Self, Self::Error> {
        let segments = Segments {
            reservoir: check("reservoir_segments", raw.reservoir_segments)?,
            well: check("well_segments", raw.well_segments)?,
            flowline: check("flowline_segments", raw.flowline_segments)?,
            trunk: check("trunk_segments", raw.trunk_segments)?,
        };

        let fluid = FluidConfig {
            oil: LiquidConfig {
                density: positive("oil_density", raw.oil_density, MassDensity::new::<kilogram_per_cubic_meter>)?,
                expansion: check::<_, NonNegative>("oil_expansion", raw.oil_expansion)?.into_inner(),
                heat_capacity: positive(
                    "oil_heat_capacity",
                    raw.oil_heat_capacity,
                    SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>,
                )?,
                conductivity: positive(
                    "oil_conductivity",
                    raw.oil_conductivity,
                    ThermalConductivity::new::<watt_per_meter_kelvin>,
                )?,
            },
            water: LiquidConfig {
                density: positive("water_density", raw.water_density, MassDensity::new::<kilogram_per_cubic_meter>)?,
                expansion: check::<_, NonNegative>("water_expansion", raw.water_expansion)?.into_inner(),
                heat_capacity: positive(
                    "water_heat_capacity",
                    raw.water_heat_capacity,
                    SpecificHeatCapacity::new::<joule_per_kilogram_kelvin>,
                )?,
                conductivity: positive(
                    "water_conductivity",
                    raw.water_conductivity,
                    ThermalConductivity::new::<watt_per_meter_kelvin>,
                )?,
            },
            oil_viscosity: positive("oil_viscosity", raw.oil_viscosity, DynamicViscosity::new::<pascal_second>)?,
            water_cut: check("water_cut", raw.water_cut)?,
        };

        let hydraulics = HydraulicsConfig {
            reynolds_laminar: check("reynolds_laminar", raw.reynolds_laminar)?,
            reynolds_turbulent: check("reynolds_turbulent", raw.reynolds_turbulent)?,
            roughness: check("roughness", raw.roughness)?,
            technical_condition: check("technical_condition", raw.technical_condition)?,
            gravity: Acceleration::new::<meter_per_second_squared>(raw.gravity),
        };
        if raw.reynolds_laminar >= raw.reynolds_turbulent {
            return Err(ConfigError::ReynoldsOrder {
                laminar: raw.reynolds_laminar,
                turbulent: raw.reynolds_turbulent,
            });
        }

        let environment = EnvironmentConfig {
            ground_temperature: ThermodynamicTemperature::new::<kelvin>(raw.ground_temperature),
            geothermal_gradient: TemperatureInterval::new::<temperature_interval::kelvin>(
                raw.geothermal_gradient,
            ) / Length::new::<meter>(1.0),
            ground_conductivity: positive(
                "ground_conductivity",
                raw.ground_conductivity,
                ThermalConductivity::new::<watt_per_meter_kelvin>,
            )?,
            wall_conductivity: positive(
                "wall_conductivity",
                raw.wall_conductivity,
                ThermalConductivity::new::<watt_per_meter_kelvin>,
            )?,
        };

        let reservoir = ReservoirConfig {
            wells: std::array::from_fn(|i| Drainage {
                permeability: Area::new::<square_meter>(raw.permeability[i]),
                thickness: Length::new::<meter>(raw.thickness[i]),
                bottom_hole_pressure: Pressure::new::<pascal>(raw.bottom_hole_pressure[i]),
                boundary_pressure: Pressure::new::<pascal>(raw.boundary_pressure[i]),
                well_radius: Length::new::<meter>(raw.well_radius[i]),
                drainage_radius: Length::new::<meter>(raw.drainage_radius[i]),
            }),
        };

        let wells = WellConfig {
            depth: raw.well_depth.map(Length::new::<meter>),
            wall_thickness: Length::new::<meter>(raw.well_wall_thickness),
        };

        let flowlines = FlowlineConfig {
            length: raw.flowline_length.map(Length::new::<meter>),
            outer_diameter: Length::new::<meter>(raw.flowline_outer_diameter),
            wall_thickness: Length::new::<meter>(raw.flowline_wall_thickness),
            burial_depth: Length::new::<meter>(raw.flowline_burial_depth),
        };

        let trunk = TrunkConfig {
            length: Length::new::<meter>(raw.trunk_length),
            outer_diameter: Length::new::<meter>(raw.trunk_outer_diameter),
            wall_thickness: Length::new::<meter>(raw.trunk_wall_thickness),
            burial_depth: Length::new::<meter>(raw.trunk_burial_depth),
            delivery_pressure: Pressure::new::<pascal>(raw.delivery_pressure),
        };

        let fittings = FittingsConfig {
            well_exit: raw.apply_well_exit_loss,
            flowline_bend: raw.apply_flowline_bend_loss,
        };

        Ok(Self {
            segments,
            fluid,
            hydraulics,
            environment,
            reservoir,
            wells,
            flowlines,
            trunk,
            fittings,
        })
    }
}

/// Wraps `value` in constraint `C`, naming `key` on failure.
fn check<T, C: Constraint<T>>(key: &'static str, value: T) -> Result<Constrained<T, C>, ConfigError> {
    Constrained::new(value).map_err(|source| ConfigError::Invalid { key, source })
}

/// Checks that `value` is strictly positive and converts it to a quantity.
fn positive<Q>(key: &'static str, value: f64, quantity: fn(f64) -> Q) -> Result<Q, ConfigError> {
    check::<_, StrictlyPositive>(key, value).map(|value| quantity(value.into_inner()))
}
