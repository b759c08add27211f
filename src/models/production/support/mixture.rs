//! Oil/water mixture properties.
//!
//! The produced fluid is an emulsion with a constant water cut. Density
//! follows a linear thermal-expansion law for each liquid referenced to
//! 293 K; transport properties are volume-fraction blends, with the
//! emulsion viscosity raised by Einstein's correction.

use uom::si::{
    dynamic_viscosity::pascal_second, mass_density::kilogram_per_cubic_meter,
    specific_heat_capacity::joule_per_kilogram_kelvin,
    thermal_conductivity::watt_per_meter_kelvin,
};

use crate::config::{FluidConfig, LiquidConfig};

use super::DomainError;

/// Reference temperature of the liquid densities, K.
pub(crate) const REFERENCE_TEMPERATURE: f64 = 293.0;

/// Einstein's coefficient for the viscosity of a dilute emulsion.
const EINSTEIN_COEFFICIENT: f64 = 2.5;

/// Fixed oil/water mixture, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Mixture {
    oil: Liquid,
    water: Liquid,
    water_cut: f64,
    viscosity: f64,
    heat_capacity: f64,
    conductivity: f64,
}

/// Density law parameters for one liquid.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Liquid {
    reference_density: f64,
    expansion: f64,
}

impl Liquid {
    fn new(config: &LiquidConfig) -> Self {
        Self {
            reference_density: config.density.get::<kilogram_per_cubic_meter>(),
            expansion: config.expansion,
        }
    }

    /// Density at `temperature` from `ρ = ρ₂₉₃ / (1 + β·(T − 293))`.
    fn density(&self, temperature: f64) -> Result<f64, DomainError> {
        let factor = 1.0 + self.expansion * (temperature - REFERENCE_TEMPERATURE);
        if factor > 0.0 {
            Ok(self.reference_density / factor)
        } else {
            Err(DomainError::NonPhysical {
                quantity: "thermal expansion factor",
                value: factor,
            })
        }
    }
}

impl Mixture {
    pub(crate) fn new(config: &FluidConfig) -> Self {
        let water_cut = *config.water_cut.as_ref();
        let oil_cut = 1.0 - water_cut;

        let viscosity =
            config.oil_viscosity.get::<pascal_second>() * (1.0 + EINSTEIN_COEFFICIENT * water_cut);
        let heat_capacity = config.oil.heat_capacity.get::<joule_per_kilogram_kelvin>() * oil_cut
            + config.water.heat_capacity.get::<joule_per_kilogram_kelvin>() * water_cut;
        let conductivity = config.oil.conductivity.get::<watt_per_meter_kelvin>() * oil_cut
            + config.water.conductivity.get::<watt_per_meter_kelvin>() * water_cut;

        Self {
            oil: Liquid::new(&config.oil),
            water: Liquid::new(&config.water),
            water_cut,
            viscosity,
            heat_capacity,
            conductivity,
        }
    }

    /// Mixture density at `temperature`, kg/m³.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::NonPhysical`] if either liquid's expansion
    /// factor is not positive at this temperature.
    pub(crate) fn density(&self, temperature: f64) -> Result<f64, DomainError> {
        let oil = self.oil.density(temperature)?;
        let water = self.water.density(temperature)?;
        Ok(oil * (1.0 - self.water_cut) + water * self.water_cut)
    }

    /// Kinematic viscosity at the given density, m²/s.
    pub(crate) fn kinematic_viscosity(&self, density: f64) -> Result<f64, DomainError> {
        DomainError::divide("density", self.viscosity, density)
    }

    /// Emulsion dynamic viscosity, Pa·s.
    pub(crate) fn viscosity(&self) -> f64 {
        self.viscosity
    }

    /// Mixture specific heat capacity, J/(kg·K).
    pub(crate) fn heat_capacity(&self) -> f64 {
        self.heat_capacity
    }

    /// Mixture thermal conductivity, W/(m·K).
    pub(crate) fn conductivity(&self) -> f64 {
        self.conductivity
    }

    /// Oil thermal expansion coefficient, 1/K; drives the buoyancy term.
    pub(crate) fn oil_expansion(&self) -> f64 {
        self.oil.expansion
    }

    pub(crate) fn prandtl(&self) -> f64 {
        self.viscosity * self.heat_capacity / self.conductivity
    }
}
