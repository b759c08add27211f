use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use oilfield_flow::{
    config::Config,
    interchange::StateDocument,
    models::production::{
        Flowline, LineProfile, Pipeline, Reservoir, ReservoirOutput, Trunk, TrunkOutput, Well,
    },
};
use tracing::info;
use twine_core::Model;
use uom::si::{
    f64::{Time, VolumeRate},
    mass_rate::kilogram_per_second,
    pressure::megapascal,
    thermodynamic_temperature::kelvin,
    time::day,
    volume::cubic_meter,
};

/// Arguments shared by every command.
#[derive(Args)]
pub struct StageArgs {
    /// Configuration file
    #[arg(short, long, default_value = "data/field.toml")]
    pub config: PathBuf,

    /// State document read by later stages and written by every stage
    #[arg(short, long, default_value = "state.toml")]
    pub state: PathBuf,
}

pub fn run(args: &StageArgs) -> Result<()> {
    let config = load_config(args)?;
    let output = Pipeline::new(&config)
        .call(&config.reservoir)
        .context("production chain failed")?;

    let mut document = StateDocument::default();
    document.record_reservoir(&output.reservoir);
    document.record_wells(&output.wells);
    document.record_flowlines(&output.flowlines);
    document.record_trunk(&output.trunk);
    save(&document, args)?;

    report_reservoir(&output.reservoir);
    report_trunk(&output.trunk);
    Ok(())
}

pub fn reservoir(args: &StageArgs) -> Result<()> {
    let config = load_config(args)?;
    let output = Reservoir::new(&config)
        .call(&config.reservoir)
        .context("reservoir stage failed")?;

    let mut document = StateDocument::default();
    document.record_reservoir(&output);
    save(&document, args)?;

    report_reservoir(&output);
    Ok(())
}

pub fn well(args: &StageArgs) -> Result<()> {
    let config = load_config(args)?;
    let mut document = load_state(args)?;
    let output = Well::new(&config)
        .call(&document.well_input()?)
        .context("well stage failed")?;

    document.record_wells(&output);
    save(&document, args)?;

    for (i, well) in output.wells.iter().enumerate() {
        report_line("wellhead", i, well);
    }
    Ok(())
}

pub fn flowline(args: &StageArgs) -> Result<()> {
    let config = load_config(args)?;
    let mut document = load_state(args)?;
    let output = Flowline::new(&config)
        .call(&document.flowline_input()?)
        .context("flowline stage failed")?;

    document.record_flowlines(&output);
    save(&document, args)?;

    for (i, line) in output.lines.iter().enumerate() {
        report_line("junction end of flowline", i, line);
    }
    Ok(())
}

pub fn trunk(args: &StageArgs) -> Result<()> {
    let config = load_config(args)?;
    let mut document = load_state(args)?;
    let output = Trunk::new(&config)
        .call(&document.trunk_input()?)
        .context("trunk stage failed")?;

    document.record_trunk(&output);
    save(&document, args)?;

    report_trunk(&output);
    Ok(())
}

fn load_config(args: &StageArgs) -> Result<Config> {
    info!("loading configuration from {}", args.config.display());
    Config::load(&args.config).context("invalid configuration")
}

fn load_state(args: &StageArgs) -> Result<StateDocument> {
    StateDocument::load(&args.state)
        .with_context(|| format!("cannot use state document {}", args.state.display()))
}

fn save(document: &StateDocument, args: &StageArgs) -> Result<()> {
    document.save(&args.state)?;
    info!("state written to {}", args.state.display());
    Ok(())
}

fn report_reservoir(output: &ReservoirOutput) {
    for (i, well) in output.wells.iter().enumerate() {
        info!(
            "well {} inflow: {:.3} m³/day",
            i + 1,
            daily_volume(well.flow_rate())
        );
    }
    info!(
        "total inflow: {:.3} m³/day",
        daily_volume(output.total_flow_rate())
    );
}

/// Volume produced per day at `rate`, m³.
fn daily_volume(rate: VolumeRate) -> f64 {
    (rate * Time::new::<day>(1.0)).get::<cubic_meter>()
}

fn report_line(label: &str, index: usize, profile: &LineProfile) {
    let end = profile.outlet();
    info!(
        "{label} {}: {:.4} MPa, {:.2} K, {:.4} kg/s",
        index + 1,
        end.pressure.get::<megapascal>(),
        end.temperature.get::<kelvin>(),
        end.mass_rate.get::<kilogram_per_second>()
    );
}

fn report_trunk(output: &TrunkOutput) {
    info!(
        "junction: {:.4} kg/s at {:.2} K",
        output.junction.mass_rate.get::<kilogram_per_second>(),
        output.junction.temperature.get::<kelvin>()
    );
    let end = output.line.outlet();
    info!(
        "trunk end: {:.4} MPa, {:.2} K",
        end.pressure.get::<megapascal>(),
        end.temperature.get::<kelvin>()
    );
}
