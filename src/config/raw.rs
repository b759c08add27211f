use serde::Deserialize;

use crate::models::production::LINE_COUNT;

/// The configuration document as written, SI units throughout.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub(super) struct RawConfig {
    pub(super) reservoir_segments: usize,
    pub(super) well_segments: usize,
    pub(super) flowline_segments: usize,
    pub(super) trunk_segments: usize,

    pub(super) oil_density: f64,
    pub(super) water_density: f64,
    pub(super) oil_expansion: f64,
    pub(super) water_expansion: f64,
    pub(super) oil_viscosity: f64,
    pub(super) water_cut: f64,
    pub(super) oil_heat_capacity: f64,
    pub(super) water_heat_capacity: f64,
    pub(super) oil_conductivity: f64,
    pub(super) water_conductivity: f64,

    pub(super) reynolds_laminar: f64,
    pub(super) reynolds_turbulent: f64,
    pub(super) roughness: f64,
    pub(super) technical_condition: f64,
    pub(super) gravity: f64,

    pub(super) ground_temperature: f64,
    pub(super) geothermal_gradient: f64,
    pub(super) ground_conductivity: f64,
    pub(super) wall_conductivity: f64,

    pub(super) permeability: [f64; LINE_COUNT],
    pub(super) thickness: [f64; LINE_COUNT],
    pub(super) bottom_hole_pressure: [f64; LINE_COUNT],
    pub(super) boundary_pressure: [f64; LINE_COUNT],
    pub(super) well_radius: [f64; LINE_COUNT],
    pub(super) drainage_radius: [f64; LINE_COUNT],

    pub(super) well_depth: [f64; LINE_COUNT],
    pub(super) well_wall_thickness: f64,

    pub(super) flowline_length: [f64; LINE_COUNT],
    pub(super) flowline_outer_diameter: f64,
    pub(super) flowline_wall_thickness: f64,
    pub(super) flowline_burial_depth: f64,

    pub(super) trunk_length: f64,
    pub(super) trunk_outer_diameter: f64,
    pub(super) trunk_wall_thickness: f64,
    pub(super) trunk_burial_depth: f64,
    pub(super) delivery_pressure: f64,

    #[serde(default)]
    pub(super) apply_well_exit_loss: bool,
    #[serde(default)]
    pub(super) apply_flowline_bend_loss: bool,
}
