//! Extensions to [`uom`].
//!
//! This crate uses [`uom`] for all physical quantities at its public boundary
//! (configuration, stage outputs). This module adds what [`uom`] lacks:
//!
//! - [`TemperatureDifference`]: subtracts one absolute temperature from
//!   another to get a temperature interval.
//! - [`TemperatureGradient`]: kelvin per meter, used for the geothermal
//!   gradient around a well bore.
//!
//! ```
//! use uom::si::f64::{Length, TemperatureInterval, ThermodynamicTemperature};
//! use uom::si::{length::meter, temperature_interval, thermodynamic_temperature::kelvin};
//! use oilfield_flow::support::units::{TemperatureDifference, TemperatureGradient};
//!
//! let gradient: TemperatureGradient =
//!     TemperatureInterval::new::<temperature_interval::kelvin>(30.0) / Length::new::<meter>(1000.0);
//! assert!((gradient.value - 0.03).abs() < 1e-15);
//!
//! let bottom = ThermodynamicTemperature::new::<kelvin>(323.0);
//! let surface = ThermodynamicTemperature::new::<kelvin>(278.0);
//! assert_eq!(bottom.minus(surface).get::<temperature_interval::kelvin>(), 45.0);
//! ```

mod quantities;
mod temperature_difference;

pub use quantities::TemperatureGradient;
pub use temperature_difference::TemperatureDifference;
