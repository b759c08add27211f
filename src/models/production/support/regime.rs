//! Reynolds-number regime closures: friction factor and Coriolis factor.
//!
//! Two classifications coexist. The friction factor uses five ordered
//! branches (laminar, transitional, onset, smooth turbulent, fully rough),
//! while heat transfer and the kinetic-energy correction use the three-way
//! [`Regime`] split.

use uom::si::acceleration::meter_per_second_squared;

use crate::config::HydraulicsConfig;

/// Allowance for unaccounted local resistances applied on top of the
/// friction factor.
const LOCAL_RESISTANCE_ALLOWANCE: f64 = 1.05;

/// Coriolis factor for a fully developed laminar profile.
const CORIOLIS_LAMINAR: f64 = 2.0;

/// Coriolis factor for a turbulent profile.
const CORIOLIS_TURBULENT: f64 = 1.1;

/// Flow regime used by the heat-transfer and Coriolis closures.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) enum Regime {
    /// `Re ≤ Re₁`.
    Laminar,
    /// `Re₁ < Re < Re₂`, with `fraction = (Re − Re₁)/(Re₂ − Re₁)`.
    Transitional { fraction: f64 },
    /// `Re ≥ Re₂`.
    Turbulent,
}

/// Hydraulic closure constants, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Hydraulics {
    reynolds_laminar: f64,
    reynolds_turbulent: f64,
    roughness: f64,
    technical_condition: f64,
    gravity: f64,
}

impl Hydraulics {
    pub(crate) fn new(config: &HydraulicsConfig) -> Self {
        Self {
            reynolds_laminar: *config.reynolds_laminar.as_ref(),
            reynolds_turbulent: *config.reynolds_turbulent.as_ref(),
            roughness: *config.roughness.as_ref(),
            technical_condition: *config.technical_condition.as_ref(),
            gravity: config.gravity.get::<meter_per_second_squared>(),
        }
    }

    /// Gravitational acceleration, m/s².
    pub(crate) fn gravity(&self) -> f64 {
        self.gravity
    }

    /// Classifies `reynolds` for heat transfer and the Coriolis factor.
    pub(crate) fn regime(&self, reynolds: f64) -> Regime {
        if reynolds <= self.reynolds_laminar {
            Regime::Laminar
        } else if reynolds >= self.reynolds_turbulent {
            Regime::Turbulent
        } else {
            let fraction = (reynolds - self.reynolds_laminar)
                / (self.reynolds_turbulent - self.reynolds_laminar);
            Regime::Transitional { fraction }
        }
    }

    /// Laminar friction factor, `64/Re₁`.
    ///
    /// Evaluated at the threshold rather than at the local Reynolds number.
    pub(crate) fn laminar_friction_factor(&self) -> f64 {
        64.0 / self.reynolds_laminar
    }

    /// Friction factor at the onset of turbulence, `0.11·(68/Re₂ + ε)^0.25`.
    pub(crate) fn onset_friction_factor(&self) -> f64 {
        0.11 * (68.0 / self.reynolds_turbulent + self.roughness).powf(0.25)
    }

    /// Darcy friction factor selected by Reynolds-number branch.
    pub(crate) fn friction_factor(&self, reynolds: f64) -> f64 {
        let laminar = self.laminar_friction_factor();
        let onset = self.onset_friction_factor();
        let rough_limit = 500.0 / self.roughness;

        if reynolds == self.reynolds_turbulent {
            onset
        } else if reynolds <= self.reynolds_laminar {
            laminar
        } else if reynolds <= self.reynolds_turbulent {
            laminar
                + (onset - laminar) / (self.reynolds_turbulent - self.reynolds_laminar)
                    * (reynolds - self.reynolds_laminar)
        } else if reynolds <= rough_limit {
            0.067 * (158.0 / reynolds + 2.0 * self.roughness).powf(0.2)
        } else {
            0.067 * (2.136 * self.roughness).powf(0.2)
        }
    }

    /// Friction factor used in the Darcy–Weisbach loss, `1.05·λ/E²`.
    pub(crate) fn derated_friction_factor(&self, reynolds: f64) -> f64 {
        LOCAL_RESISTANCE_ALLOWANCE * self.friction_factor(reynolds)
            / self.technical_condition.powi(2)
    }

    /// Kinetic-energy (Coriolis) correction factor.
    pub(crate) fn coriolis(&self, reynolds: f64) -> f64 {
        match self.regime(reynolds) {
            Regime::Laminar => CORIOLIS_LAMINAR,
            Regime::Turbulent => CORIOLIS_TURBULENT,
            Regime::Transitional { fraction } => {
                CORIOLIS_LAMINAR + (CORIOLIS_TURBULENT - CORIOLIS_LAMINAR) * fraction
            }
        }
    }
}
