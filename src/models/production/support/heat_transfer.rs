//! Convective film coefficient and the surroundings a line loses heat to.

use std::f64::consts::LN_10;

use super::{DomainError, Hydraulics, Mixture, Regime};

/// Local conditions needed to evaluate the film coefficient.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FilmConditions {
    pub(crate) reynolds: f64,
    pub(crate) diameter: f64,
    pub(crate) step: f64,
    pub(crate) temperature: f64,
    pub(crate) ambient_temperature: f64,
    pub(crate) kinematic_viscosity: f64,
}

/// Fluid-side heat transfer coefficient, W/(m²·K).
///
/// Laminar flow uses `0.17·(λ/d)·Re^0.33·Pr^0.43·Gr^0.1`, turbulent flow uses
/// `0.021·(λ/d)·Re^0.8·Pr^0.43`, and the transitional band blends the two
/// linearly across the configured thresholds. The Grashof number is built on
/// the segment length and the fluid-to-ambient temperature difference.
///
/// # Errors
///
/// Returns [`DomainError::NonPhysical`] if the Grashof number is negative
/// where the laminar correlation is needed (fluid colder than its
/// surroundings), and [`DomainError::DivisionByZero`] for a zero diameter or
/// kinematic viscosity.
pub(crate) fn film_coefficient(
    mixture: &Mixture,
    hydraulics: &Hydraulics,
    conditions: &FilmConditions,
) -> Result<f64, DomainError> {
    let FilmConditions {
        reynolds,
        diameter,
        step,
        temperature,
        ambient_temperature,
        kinematic_viscosity,
    } = *conditions;

    let scale = DomainError::divide("diameter", mixture.conductivity(), diameter)?;
    let prandtl = mixture.prandtl().powf(0.43);
    let turbulent = 0.021 * scale * reynolds.powf(0.8) * prandtl;

    let laminar = || -> Result<f64, DomainError> {
        let grashof = DomainError::divide(
            "kinematic viscosity",
            hydraulics.gravity()
                * step.powi(3)
                * mixture.oil_expansion()
                * (temperature - ambient_temperature),
            kinematic_viscosity.powi(2),
        )?;
        if grashof < 0.0 {
            return Err(DomainError::NonPhysical {
                quantity: "Grashof number",
                value: grashof,
            });
        }
        Ok(0.17 * scale * reynolds.powf(0.33) * prandtl * grashof.powf(0.1))
    };

    match hydraulics.regime(reynolds) {
        Regime::Turbulent => Ok(turbulent),
        Regime::Laminar => laminar(),
        Regime::Transitional { fraction } => {
            let laminar = laminar()?;
            Ok(laminar + (turbulent - laminar) * fraction)
        }
    }
}

/// The surroundings a line exchanges heat with.
pub(crate) trait HeatSink {
    /// Ambient temperature seen by `segment`, K.
    fn ambient_temperature(&self, segment: usize) -> f64;

    /// Overall heat transfer coefficient given the fluid film coefficient.
    ///
    /// # Errors
    ///
    /// Returns a [`DomainError`] if a thermal resistance cannot be formed.
    fn overall_coefficient(&self, film: f64) -> Result<f64, DomainError>;
}

/// Rock surrounding a vertical well, warming with depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Formation {
    surface_temperature: f64,
    gradient: f64,
    step: f64,
    segments: usize,
    wall_term: f64,
    ground_term: f64,
}

/// Parameters of a [`Formation`] sink, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct FormationParameters {
    pub(crate) surface_temperature: f64,
    pub(crate) gradient: f64,
    pub(crate) depth: f64,
    pub(crate) segments: usize,
    pub(crate) inner_diameter: f64,
    pub(crate) outer_diameter: f64,
    pub(crate) wall_conductivity: f64,
    pub(crate) ground_conductivity: f64,
}

impl Formation {
    /// Creates the sink for one well.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if the wall diameter ratio has no logarithm.
    pub(crate) fn new(parameters: &FormationParameters) -> Result<Self, DomainError> {
        let FormationParameters {
            surface_temperature,
            gradient,
            depth,
            segments,
            inner_diameter,
            outer_diameter,
            wall_conductivity,
            ground_conductivity,
        } = *parameters;

        let ratio = DomainError::divide("well inner diameter", outer_diameter, inner_diameter)?;
        let half = inner_diameter / 2.0;

        Ok(Self {
            surface_temperature,
            gradient,
            step: depth / segments as f64,
            segments,
            wall_term: half * wall_conductivity * DomainError::ln("well diameter ratio", ratio)?,
            ground_term: half * ground_conductivity * LN_10,
        })
    }

    /// Depth below surface of `node`, m.
    pub(crate) fn depth(&self, node: usize) -> f64 {
        self.step * (self.segments - node) as f64
    }
}

impl HeatSink for Formation {
    /// Formation temperature at the depth of the segment's far node.
    fn ambient_temperature(&self, segment: usize) -> f64 {
        self.surface_temperature + self.depth(segment + 1) * self.gradient
    }

    fn overall_coefficient(&self, film: f64) -> Result<f64, DomainError> {
        let film_term = DomainError::divide("film coefficient", 1.0, film)?;
        DomainError::divide(
            "thermal resistance",
            1.0,
            film_term + self.wall_term + self.ground_term,
        )
    }
}

/// Soil around a pipe buried at constant depth.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BuriedPipe {
    ground_temperature: f64,
    diameter: f64,
    ground_coefficient: f64,
}

impl BuriedPipe {
    /// Creates the sink using the Forchheimer–Vlasov shape factor.
    ///
    /// `axis_depth` is measured from the surface to the pipe axis.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] if `2H/d` is not above one.
    pub(crate) fn new(
        ground_temperature: f64,
        ground_conductivity: f64,
        diameter: f64,
        axis_depth: f64,
    ) -> Result<Self, DomainError> {
        let ratio = DomainError::divide("pipe diameter", 2.0 * axis_depth, diameter)?;
        let shape = DomainError::ln("burial ratio", ratio)?
            + DomainError::sqrt("burial ratio", ratio.powi(2) - 1.0)?;
        let ground_coefficient =
            DomainError::divide("burial shape factor", 2.0 * ground_conductivity, diameter * shape)?;

        Ok(Self {
            ground_temperature,
            diameter,
            ground_coefficient,
        })
    }
}

impl HeatSink for BuriedPipe {
    fn ambient_temperature(&self, _segment: usize) -> f64 {
        self.ground_temperature
    }

    fn overall_coefficient(&self, film: f64) -> Result<f64, DomainError> {
        let film_term = DomainError::divide("film coefficient", 1.0, film * self.diameter)?;
        let ground_term = 1.0 / (self.ground_coefficient * self.diameter);
        DomainError::divide("thermal resistance", 1.0, film_term + ground_term)
    }
}
