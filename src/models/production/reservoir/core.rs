use std::f64::consts::PI;

use tracing::debug;
use uom::si::{area::square_meter, length::meter, pressure::pascal};

use crate::{config::Drainage, models::production::support::{DomainError, Mixture}};

/// Radial inflow profile of one well, SI units.
#[derive(Debug, Clone, PartialEq)]
pub(super) struct RadialInflow {
    pub(super) radii: Vec<f64>,
    pub(super) pressures: Vec<f64>,
    pub(super) filtration_velocities: Vec<f64>,
    pub(super) flow_rate: f64,
}

/// Solves steady radial inflow to one well.
///
/// Node 0 sits at the well radius; node `j ≥ 1` sits at `rk·j/N`, so the
/// first interval is shorter than the rest by the well radius.
///
/// # Errors
///
/// Returns [`DomainError::NonPhysical`] if either radius is not positive or
/// the drainage radius lies inside the well, and
/// [`DomainError::DivisionByZero`] if the two radii are equal.
pub(super) fn radial_inflow(
    mixture: &Mixture,
    drainage: &Drainage,
    segments: usize,
) -> Result<RadialInflow, DomainError> {
    let permeability = drainage.permeability.get::<square_meter>();
    let thickness = drainage.thickness.get::<meter>();
    let well_pressure = drainage.bottom_hole_pressure.get::<pascal>();
    let boundary_pressure = drainage.boundary_pressure.get::<pascal>();
    let well_radius = positive_radius("well radius", drainage.well_radius.get::<meter>())?;
    let drainage_radius =
        positive_radius("drainage radius", drainage.drainage_radius.get::<meter>())?;
    if drainage_radius < well_radius {
        return Err(DomainError::NonPhysical {
            quantity: "drainage radius",
            value: drainage_radius,
        });
    }
    let viscosity = mixture.viscosity();

    let log_ratio = DomainError::ln(
        "drainage radius ratio",
        DomainError::divide("well radius", drainage_radius, well_radius)?,
    )?;
    let drawdown = boundary_pressure - well_pressure;

    let flow_rate = DomainError::divide(
        "drainage radius ratio",
        2.0 * PI * thickness * permeability * drawdown,
        viscosity * log_ratio,
    )?;
    let pressure_slope = DomainError::divide("drainage radius ratio", drawdown, log_ratio)?;

    let spacing = drainage_radius / segments as f64;
    let radii: Vec<f64> = (0..=segments)
        .map(|j| if j == 0 { well_radius } else { spacing * j as f64 })
        .collect();

    let pressures = radii
        .iter()
        .map(|&radius| {
            let ratio = DomainError::divide("node radius", drainage_radius, radius)?;
            Ok(boundary_pressure - pressure_slope * DomainError::ln("node radius ratio", ratio)?)
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    let filtration_velocities = radii
        .iter()
        .map(|&radius| {
            DomainError::divide(
                "node radius",
                permeability * -drawdown,
                viscosity * log_ratio * radius,
            )
        })
        .collect::<Result<Vec<_>, DomainError>>()?;

    debug!(flow_rate, well_pressure, boundary_pressure, "radial inflow solved");

    Ok(RadialInflow {
        radii,
        pressures,
        filtration_velocities,
        flow_rate,
    })
}

fn positive_radius(quantity: &'static str, value: f64) -> Result<f64, DomainError> {
    if value > 0.0 {
        Ok(value)
    } else {
        Err(DomainError::NonPhysical { quantity, value })
    }
}
