//! Integration tests for the dispatch engine's run-level properties.

mod common;

use bess_dispatch::config::BatteryConfig;
use bess_dispatch::dispatch::{BatteryState, DispatchEngine};

#[test]
fn output_preserves_input_length_and_order() {
    let engine = common::default_engine();
    let readings = common::readings_from(&[1.0, 2.0, 3.0, 0.4, 2.7, 1.5, 2.5]);
    let schedule = engine.optimize(&readings);

    assert_eq!(schedule.len(), readings.len());
    for (reading, entry) in readings.iter().zip(schedule.iter()) {
        assert_eq!(entry.consumption_kwh, reading.consumption_kwh);
    }
}

#[test]
fn battery_level_stays_within_bounds() {
    let engine = common::default_engine();
    let values: Vec<f64> = (0..500).map(|i| (i % 7) as f64 * 0.8).collect();
    let schedule = engine.optimize(&common::readings_from(&values));

    for entry in &schedule {
        assert!(entry.battery_level_kwh >= 0.0);
        assert!(entry.battery_level_kwh <= engine.config().capacity_kwh);
    }
}

#[test]
fn charge_and_discharge_are_mutually_exclusive() {
    let engine = common::default_engine();
    let values: Vec<f64> = (0..300).map(|i| (i % 11) as f64 * 0.4).collect();
    let schedule = engine.optimize(&common::readings_from(&values));

    for entry in &schedule {
        assert!(entry.charge_kw >= 0.0);
        assert!(entry.discharge_kw >= 0.0);
        assert!(
            entry.charge_kw == 0.0 || entry.discharge_kw == 0.0,
            "entry charges and discharges at once: {entry}"
        );
    }
}

#[test]
fn empty_input_yields_empty_output() {
    let engine = common::default_engine();
    assert_eq!(engine.optimize(&[]), vec![]);
}

#[test]
fn all_low_consumption_saturates_at_capacity() {
    let engine = common::default_engine();
    let schedule = engine.optimize(&common::readings_from(&[0.5; 60]));

    let cap = engine.config().capacity_kwh;
    let last = schedule.last().expect("non-empty schedule");
    assert!((last.battery_level_kwh - cap).abs() < 1e-9);

    // Once saturated, the level stays pinned at capacity.
    let tail: Vec<f64> = schedule[40..].iter().map(|e| e.battery_level_kwh).collect();
    assert!(tail.iter().all(|&l| (l - cap).abs() < 1e-9));
}

#[test]
fn all_high_consumption_depletes_to_zero() {
    let engine = common::default_engine();
    let schedule = engine.optimize(&common::readings_from(&[4.0; 30]));

    let last = schedule.last().expect("non-empty schedule");
    assert_eq!(last.battery_level_kwh, 0.0);
    assert_eq!(last.discharge_kw, 0.0);

    // Level is monotonically non-increasing on an all-discharge run.
    for pair in schedule.windows(2) {
        assert!(pair[1].battery_level_kwh <= pair[0].battery_level_kwh);
    }
}

#[test]
fn hold_regime_never_moves_the_level() {
    let engine = common::default_engine();
    let schedule = engine.optimize(&common::readings_from(&[2.0, 1.5, 2.5, 1.7, 2.2]));

    // All five samples classify as hold for the default thresholds.
    for entry in &schedule {
        assert_eq!(entry.charge_kw, 0.0);
        assert_eq!(entry.discharge_kw, 0.0);
        assert_eq!(entry.battery_level_kwh, 5.0);
    }
}

#[test]
fn literal_scenario_matches_expected_schedule() {
    let config = BatteryConfig {
        capacity_kwh: 10.0,
        max_charge_kw: 3.0,
        max_discharge_kw: 3.0,
        efficiency: 0.95,
        interval_fraction: 0.25,
    };
    let engine = DispatchEngine::new(config).expect("valid config");
    let schedule = engine.optimize(&common::readings_from(&[1.0, 2.0, 3.0]));

    assert_eq!(schedule.len(), 3);

    assert_eq!(schedule[0].charge_kw, 0.75);
    assert_eq!(schedule[0].discharge_kw, 0.0);
    assert_eq!(schedule[0].battery_level_kwh, 5.713);

    assert_eq!(schedule[1].charge_kw, 0.0);
    assert_eq!(schedule[1].discharge_kw, 0.0);
    assert_eq!(schedule[1].battery_level_kwh, 5.713);

    assert_eq!(schedule[2].charge_kw, 0.0);
    assert_eq!(schedule[2].discharge_kw, 0.75);
    assert_eq!(schedule[2].battery_level_kwh, 4.963);
}

#[test]
fn fresh_runs_are_independent() {
    let engine = common::default_engine();
    let readings = common::readings_from(&[0.2, 3.3, 1.1, 2.9]);

    let first = engine.optimize(&readings);
    let second = engine.optimize(&readings);
    assert_eq!(first, second);
}

#[test]
fn injected_state_continues_across_runs() {
    let engine = common::default_engine();
    let readings = common::readings_from(&[4.0; 4]);

    let (first, carried) = engine.optimize_from(engine.initial_state(), &readings);
    let (second, end) = engine.optimize_from(carried, &readings);

    // 5.0 drains by 0.75 per sample: 2.0 after run one, then keeps falling.
    assert_eq!(first.last().map(|e| e.battery_level_kwh), Some(2.0));
    assert_eq!(second.last().map(|e| e.battery_level_kwh), Some(0.0));
    assert_eq!(end.level_kwh, 0.0);
}

#[test]
fn injected_state_above_capacity_is_clamped() {
    let engine = common::default_engine();
    let (schedule, _) = engine.optimize_from(
        BatteryState::new(99.0),
        &common::readings_from(&[2.0]),
    );
    assert_eq!(schedule[0].battery_level_kwh, engine.config().capacity_kwh);
}

#[test]
fn negative_consumption_is_treated_as_very_low() {
    let engine = common::default_engine();
    let schedule = engine.optimize(&common::readings_from(&[-2.0]));
    assert_eq!(schedule[0].charge_kw, 0.75);
    assert_eq!(schedule[0].discharge_kw, 0.0);
}
