use approx::assert_relative_eq;
use oilfield_flow::{
    config::Config,
    interchange::StateDocument,
    models::production::{DomainError, LineProfile, Pipeline, Reservoir, Stage, StageError, Well},
    support::constraint::UnitInterval,
};
use twine_core::Model;
use uom::si::{
    length::meter, mass_density::kilogram_per_cubic_meter,
    mass_rate::kilogram_per_second, pressure::pascal, thermodynamic_temperature::kelvin,
};

fn field() -> Config {
    Config::load(concat!(env!("CARGO_MANIFEST_DIR"), "/data/field.toml"))
        .expect("sample configuration should load")
}

fn assert_mass_conserved(profile: &LineProfile) {
    let inlet = profile.inlet().mass_rate.get::<kilogram_per_second>();
    for state in profile.states() {
        assert_relative_eq!(
            state.mass_rate.get::<kilogram_per_second>(),
            inlet,
            max_relative = 1e-12
        );
    }
}

#[test]
fn sample_field_delivers_a_finite_state() {
    let config = field();
    let output = Pipeline::new(&config).call(&config.reservoir).unwrap();

    let end = output.trunk.line.outlet();
    assert!(end.pressure.get::<pascal>().is_finite());
    assert!(end.temperature.get::<kelvin>().is_finite());

    let ground = config.environment.ground_temperature.get::<kelvin>();
    let junction = output.trunk.junction.temperature.get::<kelvin>();
    assert!(end.temperature.get::<kelvin>() < junction);
    assert!(end.temperature.get::<kelvin>() > ground);

    assert_eq!(
        output.trunk.line.inlet().pressure,
        config.trunk.delivery_pressure
    );
}

#[test]
fn junction_follows_the_mixing_law() {
    let config = field();
    let output = Pipeline::new(&config).call(&config.reservoir).unwrap();

    let ends: Vec<_> = output.flowlines.lines.iter().map(LineProfile::outlet).collect();
    let flow: f64 = ends
        .iter()
        .map(|s| s.mass_rate.get::<kilogram_per_second>())
        .sum();
    let heat: f64 = ends
        .iter()
        .map(|s| s.mass_rate.get::<kilogram_per_second>() * s.temperature.get::<kelvin>())
        .sum();

    let junction = &output.trunk.junction;
    assert_relative_eq!(
        junction.mass_rate.get::<kilogram_per_second>(),
        flow,
        max_relative = 1e-12
    );
    assert_relative_eq!(
        junction.temperature.get::<kelvin>(),
        heat / flow,
        max_relative = 1e-12
    );
}

#[test]
fn every_line_conserves_mass() {
    let config = field();
    let output = Pipeline::new(&config).call(&config.reservoir).unwrap();

    output
        .wells
        .wells
        .iter()
        .chain(&output.flowlines.lines)
        .chain(std::iter::once(&output.trunk.line))
        .for_each(assert_mass_conserved);
}

#[test]
fn each_stage_starts_where_the_last_one_ended() {
    let config = field();
    let output = Pipeline::new(&config).call(&config.reservoir).unwrap();

    for (well, drainage) in output.wells.wells.iter().zip(&output.reservoir.wells) {
        assert_eq!(well.inlet().pressure, drainage.well_pressure());
    }
    for (line, well) in output.flowlines.lines.iter().zip(&output.wells.wells) {
        let head = well.outlet();
        let start = line.inlet();
        assert_eq!(start.pressure, head.pressure);
        assert_eq!(start.temperature, head.temperature);
        assert_eq!(start.mass_rate, head.mass_rate);
    }
}

#[test]
fn reservoir_stage_is_idempotent() {
    let config = field();
    let reservoir = Reservoir::new(&config);

    let first = reservoir.call(&config.reservoir).unwrap();
    let second = reservoir.call(&config.reservoir).unwrap();
    assert_eq!(first, second);
}

#[test]
fn identical_wells_produce_identical_profiles() {
    let mut config = field();
    config.reservoir.wells = [config.reservoir.wells[0]; 3];
    config.wells.depth = [config.wells.depth[0]; 3];

    let inflow = Reservoir::new(&config).call(&config.reservoir).unwrap();
    let wells = Well::new(&config).call(&inflow).unwrap();

    let [a, b, c] = &inflow.wells;
    assert_eq!(a, b);
    assert_eq!(b, c);

    let [a, b, c] = &wells.wells;
    assert_eq!(a, b);
    assert_eq!(b, c);
}

#[test]
fn pure_oil_follows_the_oil_density_law() {
    let mut config = field();
    config.fluid.water_cut = UnitInterval::new(0.0).unwrap();

    let inflow = Reservoir::new(&config).call(&config.reservoir).unwrap();
    let wells = Well::new(&config).call(&inflow).unwrap();

    let reference = config.fluid.oil.density.get::<kilogram_per_cubic_meter>();
    let expansion = config.fluid.oil.expansion;
    let oil_density = |t: f64| reference / (1.0 + expansion * (t - 293.0));

    // Each node takes its density at the temperature of the node before it.
    let states = wells.wells[0].states();
    let lagged = std::iter::once(&states[0]).chain(states);
    for (state, upstream) in states.iter().zip(lagged) {
        assert_relative_eq!(
            state.density.get::<kilogram_per_cubic_meter>(),
            oil_density(upstream.temperature.get::<kelvin>()),
            max_relative = 1e-12
        );
    }
}

#[test]
fn collapsed_drainage_area_fails_the_reservoir_stage() {
    let mut config = field();
    let well_radius = config.reservoir.wells[1].well_radius;
    config.reservoir.wells[1].drainage_radius = well_radius;

    let error = Pipeline::new(&config).call(&config.reservoir).unwrap_err();

    assert!(matches!(
        error,
        StageError::Domain {
            stage: Stage::Reservoir,
            line: Some(1),
            source: DomainError::DivisionByZero { .. },
        }
    ));
    assert_eq!(error.to_string(), "reservoir stage failed on line 2");
}

#[test]
fn staged_runs_match_the_chained_run() {
    let config = field();
    let pipeline = Pipeline::new(&config);
    let chained = pipeline.call(&config.reservoir).unwrap();

    let mut document = StateDocument::default();
    document.record_reservoir(&pipeline.reservoir.call(&config.reservoir).unwrap());

    let document = StateDocument::from_toml_str(&document.to_toml_string().unwrap()).unwrap();
    let wells = pipeline.well.call(&document.well_input().unwrap()).unwrap();
    let flowlines = pipeline.flowline.call(&wells).unwrap();
    let trunk = pipeline.trunk.call(&flowlines).unwrap();

    let staged = trunk.line.outlet().pressure.get::<pascal>();
    let direct = chained.trunk.line.outlet().pressure.get::<pascal>();
    assert_relative_eq!(staged, direct, max_relative = 1e-9);
}

#[test]
fn wells_rise_from_bottom_hole_to_wellhead() {
    let config = field();
    let output = Pipeline::new(&config).call(&config.reservoir).unwrap();

    for (well, depth) in output.wells.wells.iter().zip(config.wells.depth) {
        let stations = well.stations();
        assert_relative_eq!(
            stations[0].get::<meter>(),
            depth.get::<meter>(),
            max_relative = 1e-12
        );
        assert_relative_eq!(stations[stations.len() - 1].get::<meter>(), 0.0);
        assert!(well.outlet().pressure < well.inlet().pressure);
    }
}
