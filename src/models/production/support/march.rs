//! Explicit marching of one line from its known inlet node to its far end.
//!
//! Each segment is advanced once from the already-final upstream node:
//!
//! 1. Density at `j + 1` from the temperature at `j`.
//! 2. Velocity at `j + 1` from continuity.
//! 3. Reynolds number at `j` and the derated friction factor.
//! 4. Friction and local pressure losses on the segment.
//! 5. Heat exchanged with the surroundings and the energy balance.
//! 6. Pressure at `j + 1` from the extended Bernoulli balance.
//!
//! There is no iteration; accuracy is set by the segment count alone.

use std::f64::consts::PI;

use super::{
    DomainError, Hydraulics, Mixture,
    heat_transfer::{FilmConditions, HeatSink, film_coefficient},
};

/// Fluid state at one node, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Node {
    pub(crate) pressure: f64,
    pub(crate) temperature: f64,
    pub(crate) density: f64,
    pub(crate) velocity: f64,
    pub(crate) mass_flow: f64,
    pub(crate) kinematic_viscosity: f64,
}

/// Known boundary state at node 0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Inlet {
    pub(crate) pressure: f64,
    pub(crate) temperature: f64,
    pub(crate) mass_flow: f64,
}

/// Whether the line climbs against gravity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Orientation {
    /// Flow rises one segment length per segment.
    Vertical,
    Horizontal,
}

/// Local loss coefficients by segment position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct LocalLosses {
    /// Applied on the first segment.
    pub(crate) entry: f64,
    /// Applied on the last segment, if present. The entry coefficient takes
    /// precedence on a single-segment line.
    pub(crate) exit: Option<f64>,
}

impl LocalLosses {
    /// Coefficient for `segment` of a line with `segments` segments.
    pub(crate) fn coefficient(&self, segment: usize, segments: usize) -> f64 {
        if segment == 0 {
            self.entry
        } else if segment + 1 == segments {
            self.exit.unwrap_or(0.0)
        } else {
            0.0
        }
    }
}

/// Discretized line geometry, SI units.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct Geometry {
    diameter: f64,
    area: f64,
    step: f64,
    segments: usize,
    orientation: Orientation,
}

impl Geometry {
    /// Splits a line of `length` into `segments` equal segments.
    ///
    /// `diameter` is the characteristic length used by the closures;
    /// `area` is the flow cross-section.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError`] for a non-positive diameter or area, a negative
    /// length, or zero segments.
    pub(crate) fn new(
        diameter: f64,
        area: f64,
        length: f64,
        segments: usize,
        orientation: Orientation,
    ) -> Result<Self, DomainError> {
        if diameter <= 0.0 {
            return Err(DomainError::NonPhysical {
                quantity: "diameter",
                value: diameter,
            });
        }
        if area <= 0.0 {
            return Err(DomainError::NonPhysical {
                quantity: "flow area",
                value: area,
            });
        }
        if length < 0.0 {
            return Err(DomainError::NonPhysical {
                quantity: "line length",
                value: length,
            });
        }
        let step = DomainError::divide("segment count", length, segments as f64)?;

        Ok(Self {
            diameter,
            area,
            step,
            segments,
            orientation,
        })
    }

    /// Flow area of a circular bore.
    pub(crate) fn circular_area(diameter: f64) -> f64 {
        PI * diameter.powi(2) / 4.0
    }

    pub(crate) fn area(&self) -> f64 {
        self.area
    }

    /// Distance of `node` from the inlet, m.
    pub(crate) fn station(&self, node: usize) -> f64 {
        self.step * node as f64
    }
}

/// One line ready to be marched.
#[derive(Debug, Clone, Copy)]
pub(crate) struct Line<'a, S> {
    pub(crate) mixture: &'a Mixture,
    pub(crate) hydraulics: &'a Hydraulics,
    pub(crate) geometry: &'a Geometry,
    pub(crate) losses: LocalLosses,
    pub(crate) sink: &'a S,
}

impl<S: HeatSink> Line<'_, S> {
    /// Marches from `inlet` over every segment, returning `N + 1` nodes.
    ///
    /// # Errors
    ///
    /// Returns the first [`DomainError`] raised by any step. Nothing is
    /// returned for the nodes already computed.
    pub(crate) fn march(&self, inlet: Inlet) -> Result<Vec<Node>, DomainError> {
        let mut nodes = Vec::with_capacity(self.geometry.segments + 1);
        let mut current = self.inlet_node(inlet)?;
        nodes.push(current);

        for segment in 0..self.geometry.segments {
            current = self.step(segment, &current)?;
            nodes.push(current);
        }

        Ok(nodes)
    }

    fn inlet_node(&self, inlet: Inlet) -> Result<Node, DomainError> {
        let density = self.mixture.density(inlet.temperature)?;
        let velocity = DomainError::divide(
            "inlet density",
            inlet.mass_flow,
            density * self.geometry.area,
        )?;

        Ok(Node {
            pressure: inlet.pressure,
            temperature: inlet.temperature,
            density,
            velocity,
            mass_flow: inlet.mass_flow,
            kinematic_viscosity: self.mixture.kinematic_viscosity(density)?,
        })
    }

    /// Advances `current` across `segment`.
    fn step(&self, segment: usize, current: &Node) -> Result<Node, DomainError> {
        let node = segment + 1;
        let Geometry {
            diameter,
            area,
            step,
            segments,
            orientation,
        } = *self.geometry;

        let density = self.mixture.density(current.temperature)?;
        let velocity = DomainError::divide(
            "density",
            current.density * current.velocity,
            density,
        )?;

        let reynolds = DomainError::divide(
            "kinematic viscosity",
            current.velocity * diameter,
            current.kinematic_viscosity,
        )?;
        if reynolds < 0.0 {
            return Err(DomainError::NonPhysical {
                quantity: "Reynolds number",
                value: reynolds,
            });
        }

        let dynamic_pressure = current.density * current.velocity.powi(2) / 2.0;
        let friction =
            self.hydraulics.derated_friction_factor(reynolds) * (step / diameter) * dynamic_pressure;
        let local = self.losses.coefficient(segment, segments) * dynamic_pressure;
        let pressure_loss = friction + local;

        let ambient_temperature = self.sink.ambient_temperature(segment);
        let film = film_coefficient(
            self.mixture,
            self.hydraulics,
            &FilmConditions {
                reynolds,
                diameter,
                step,
                temperature: current.temperature,
                ambient_temperature,
                kinematic_viscosity: current.kinematic_viscosity,
            },
        )?;
        let overall = self.sink.overall_coefficient(film)?;
        let heat_flow =
            overall * PI * diameter * step * (ambient_temperature - current.temperature);
        let temperature = current.temperature
            + DomainError::divide(
                "mass flow",
                heat_flow,
                self.mixture.heat_capacity() * current.mass_flow,
            )?;

        let coriolis = self.hydraulics.coriolis(reynolds);
        let head = match orientation {
            Orientation::Vertical => self.hydraulics.gravity() * step,
            Orientation::Horizontal => 0.0,
        };
        let pressure = density
            * (current.pressure / current.density
                + coriolis * current.velocity.powi(2) / 2.0
                - coriolis * velocity.powi(2) / 2.0
                - head
                - pressure_loss / density);

        let mass_flow = current.density * current.velocity * area;

        Ok(Node {
            pressure: DomainError::finite("pressure", node, pressure)?,
            temperature: DomainError::finite("temperature", node, temperature)?,
            density: DomainError::finite("density", node, density)?,
            velocity: DomainError::finite("velocity", node, velocity)?,
            mass_flow: DomainError::finite("mass flow", node, mass_flow)?,
            kinematic_viscosity: DomainError::finite(
                "kinematic viscosity",
                node,
                self.mixture.kinematic_viscosity(density)?,
            )?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    use crate::models::production::{
        support::heat_transfer::BuriedPipe,
        test_support::{fluid, hydraulics},
    };

    /// A sink at fixed temperature with a given overall coefficient.
    struct Bath {
        temperature: f64,
        coefficient: f64,
    }

    impl HeatSink for Bath {
        fn ambient_temperature(&self, _segment: usize) -> f64 {
            self.temperature
        }

        fn overall_coefficient(&self, _film: f64) -> Result<f64, DomainError> {
            Ok(self.coefficient)
        }
    }

    fn pipe(orientation: Orientation, segments: usize) -> Geometry {
        Geometry::new(0.1, Geometry::circular_area(0.1), 1000.0, segments, orientation).unwrap()
    }

    fn inlet() -> Inlet {
        Inlet {
            pressure: 4.0e6,
            temperature: 320.0,
            mass_flow: 5.0,
        }
    }

    #[test]
    fn mass_flow_is_conserved_on_every_segment() {
        let mixture = Mixture::new(&fluid(0.2));
        let hydraulics = Hydraulics::new(&hydraulics());
        let geometry = pipe(Orientation::Horizontal, 50);
        let sink = BuriedPipe::new(278.0, 1.5, 0.1, 1.55).unwrap();
        let line = Line {
            mixture: &mixture,
            hydraulics: &hydraulics,
            geometry: &geometry,
            losses: LocalLosses {
                entry: 0.5,
                exit: None,
            },
            sink: &sink,
        };

        let nodes = line.march(inlet()).unwrap();
        assert_eq!(nodes.len(), 51);

        for pair in nodes.windows(2) {
            let [upstream, downstream] = pair else {
                unreachable!()
            };
            assert_relative_eq!(downstream.mass_flow, upstream.mass_flow, max_relative = 1e-12);
            assert_relative_eq!(
                downstream.mass_flow,
                downstream.density * downstream.velocity * geometry.area(),
                max_relative = 1e-12
            );
        }

        // Cooling toward the ground without overshoot.
        let outlet = nodes[50];
        assert!(outlet.temperature < 320.0 && outlet.temperature > 278.0);
        assert!(outlet.pressure < 4.0e6);
    }

    #[test]
    fn density_lags_temperature_by_one_node() {
        let mixture = Mixture::new(&fluid(0.2));
        let hydraulics = Hydraulics::new(&hydraulics());
        let geometry = pipe(Orientation::Horizontal, 5);
        let sink = Bath {
            temperature: 280.0,
            coefficient: 5.0,
        };
        let line = Line {
            mixture: &mixture,
            hydraulics: &hydraulics,
            geometry: &geometry,
            losses: LocalLosses {
                entry: 0.0,
                exit: None,
            },
            sink: &sink,
        };

        let nodes = line.march(inlet()).unwrap();
        assert_eq!(nodes[1].density, nodes[0].density);
        for j in 1..5 {
            assert_eq!(
                nodes[j + 1].density,
                mixture.density(nodes[j].temperature).unwrap()
            );
        }
    }

    #[test]
    fn adiabatic_line_keeps_temperature() {
        let mixture = Mixture::new(&fluid(0.0));
        let hydraulics = Hydraulics::new(&hydraulics());
        let geometry = pipe(Orientation::Vertical, 10);
        let sink = Bath {
            temperature: 280.0,
            coefficient: 0.0,
        };
        let line = Line {
            mixture: &mixture,
            hydraulics: &hydraulics,
            geometry: &geometry,
            losses: LocalLosses {
                entry: 0.0,
                exit: None,
            },
            sink: &sink,
        };

        let nodes = line.march(inlet()).unwrap();
        let density = nodes[0].density;
        let velocity = nodes[0].velocity;

        for node in &nodes {
            assert_eq!(node.temperature, 320.0);
            assert_eq!(node.density, density);
            assert_relative_eq!(node.velocity, velocity, max_relative = 1e-12);
        }

        // Each rise of 100 m costs hydrostatic head plus friction.
        let head = density * 9.81 * 100.0;
        let drop = nodes[0].pressure - nodes[1].pressure;
        assert!(drop > head);
    }

    #[test]
    fn local_losses_by_position() {
        let losses = LocalLosses {
            entry: 0.5,
            exit: Some(1.52),
        };

        assert_eq!(losses.coefficient(0, 10), 0.5);
        assert_eq!(losses.coefficient(5, 10), 0.0);
        assert_eq!(losses.coefficient(9, 10), 1.52);
        assert_eq!(losses.coefficient(0, 1), 0.5);

        let without_exit = LocalLosses { exit: None, ..losses };
        assert_eq!(without_exit.coefficient(9, 10), 0.0);
    }

    #[test]
    fn zero_flow_is_rejected() {
        let mixture = Mixture::new(&fluid(0.2));
        let hydraulics = Hydraulics::new(&hydraulics());
        let geometry = pipe(Orientation::Horizontal, 4);
        let sink = Bath {
            temperature: 280.0,
            coefficient: 5.0,
        };
        let line = Line {
            mixture: &mixture,
            hydraulics: &hydraulics,
            geometry: &geometry,
            losses: LocalLosses {
                entry: 0.0,
                exit: None,
            },
            sink: &sink,
        };

        let result = line.march(Inlet {
            mass_flow: 0.0,
            ..inlet()
        });
        assert_eq!(result, Err(DomainError::DivisionByZero { quantity: "mass flow" }));
    }

    #[test]
    fn geometry_rejects_degenerate_lines() {
        assert!(Geometry::new(0.0, 1.0, 10.0, 5, Orientation::Horizontal).is_err());
        assert!(Geometry::new(0.1, 0.0, 10.0, 5, Orientation::Horizontal).is_err());
        assert!(Geometry::new(0.1, 1.0, -10.0, 5, Orientation::Horizontal).is_err());
        assert_eq!(
            Geometry::new(0.1, 1.0, 10.0, 0, Orientation::Horizontal),
            Err(DomainError::DivisionByZero {
                quantity: "segment count"
            })
        );

        let geometry = pipe(Orientation::Horizontal, 4);
        assert_eq!(geometry.station(1), 250.0);
        assert_eq!(geometry.station(4), 1000.0);
    }
}
