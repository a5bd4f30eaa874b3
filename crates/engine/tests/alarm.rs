mod common;

use common::{Call, MockFinch};
use finch_device::DeviceError;
use finch_engine::{
    alarm::{AmbientLight, Tick},
    ambient_light, monitor, monitor_with, AlarmConfig, Error, Outcome, RangeMode, SensorSelector,
    Temperature,
};

fn scenario_config() -> AlarmConfig {
    AlarmConfig::new()
        .sensor(SensorSelector::Both)
        .range(RangeMode::Maximum)
        .light_threshold(50.0)
        .temperature_threshold_f(200.0)
        .time_budget_seconds(3)
}

#[test]
fn quiet_readings_exhaust_the_budget() {
    let mut device = MockFinch::new()
        .with_left_light([20, 21, 22, 23])
        .with_right_light([30, 31, 32, 33])
        .with_temperatures_f([70.0, 71.0, 72.0, 73.0]);
    let mut ticks = Vec::new();

    let outcome = monitor_with(&scenario_config(), &mut device, |tick| {
        ticks.push(tick.elapsed_seconds)
    })
    .unwrap();

    assert_eq!(
        outcome,
        Outcome::NoBreach {
            light_threshold: 50.0,
            temperature_threshold_f: 200.0,
        }
    );
    assert!(!outcome.is_breach());
    assert_eq!(ticks, [0, 1, 2, 3]);
    assert_eq!(device.count(&Call::ReadTemperature), 4);
    assert_eq!(device.effects(), [Call::Sleep(1000); 3]);
}

#[test]
fn simultaneous_breach_reports_light_and_stops() {
    let mut device = MockFinch::new()
        .with_left_light([10, 10, 60, 10])
        .with_right_light([10, 10, 60, 10])
        .with_temperatures_f([70.0, 70.0, 210.0, 70.0]);

    let outcome = monitor(&scenario_config(), &mut device).unwrap();

    assert_eq!(
        outcome,
        Outcome::LightBreach {
            value: 60,
            threshold: 50.0,
            elapsed_seconds: 2,
        }
    );
    assert_eq!(device.count(&Call::ReadTemperature), 3);
    assert_eq!(device.count(&Call::Sleep(1000)), 2);
    assert_eq!(device.calls.last(), Some(&Call::ReadTemperature));
}

#[test]
fn temperature_breach_under_minimum() {
    let config = AlarmConfig::new()
        .sensor(SensorSelector::Left)
        .range(RangeMode::Minimum)
        .light_threshold(5.0)
        .temperature_threshold_f(50.0)
        .time_budget_seconds(10);
    let mut device = MockFinch::new().with_temperatures_c([20.0, 0.0]);

    let outcome = monitor(&config, &mut device).unwrap();

    assert_eq!(
        outcome,
        Outcome::TemperatureBreach {
            value: Temperature::from_fahrenheit(32.0),
            threshold_f: 50.0,
            elapsed_seconds: 1,
        }
    );
    assert!(outcome.is_breach());
}

#[test]
fn zero_budget_polls_exactly_once() {
    let config = scenario_config().time_budget_seconds(0);
    let mut device = MockFinch::new();

    let outcome = monitor(&config, &mut device).unwrap();

    assert!(matches!(outcome, Outcome::NoBreach { .. }));
    assert_eq!(device.count(&Call::ReadTemperature), 1);
    assert!(device.effects().is_empty());
}

#[test]
fn readings_equal_to_thresholds_never_breach() {
    for range in [RangeMode::Minimum, RangeMode::Maximum] {
        let config = AlarmConfig::new()
            .sensor(SensorSelector::Right)
            .range(range)
            .light_threshold(f64::from(MockFinch::DEFAULT_LIGHT))
            .temperature_threshold_f(68.0)
            .time_budget_seconds(2);
        let mut device = MockFinch::new();

        let outcome = monitor(&config, &mut device).unwrap();

        assert!(!outcome.is_breach(), "{range}");
        assert_eq!(device.count(&Call::ReadTemperature), 3);
    }
}

#[test]
fn selector_picks_the_sensors_read() {
    let config = scenario_config().time_budget_seconds(0);

    let mut left = MockFinch::new();
    monitor(&config.sensor(SensorSelector::Left), &mut left).unwrap();
    assert_eq!(left.calls, [Call::ReadLeftLight, Call::ReadTemperature]);

    let mut right = MockFinch::new();
    monitor(&config.sensor(SensorSelector::Right), &mut right).unwrap();
    assert_eq!(right.calls, [Call::ReadRightLight, Call::ReadTemperature]);

    let mut both = MockFinch::new();
    monitor(&config, &mut both).unwrap();
    assert_eq!(
        both.calls,
        [
            Call::ReadLeftLight,
            Call::ReadRightLight,
            Call::ReadTemperature
        ]
    );
}

#[test]
fn both_sensors_use_the_truncated_mean() {
    let config = scenario_config().time_budget_seconds(0);
    let mut device = MockFinch::new().with_left_light([11]).with_right_light([20]);
    let mut readings = Vec::new();

    monitor_with(&config, &mut device, |tick: &Tick| readings.push(tick.reading.light)).unwrap();

    assert_eq!(readings, [15]);
}

#[test]
fn incomplete_configuration_is_refused() {
    let partial = AlarmConfig::new()
        .sensor(SensorSelector::Both)
        .range(RangeMode::Maximum)
        .light_threshold(50.0)
        .temperature_threshold_f(80.0);
    let mut device = MockFinch::new();

    let error = monitor(&partial, &mut device).unwrap_err();

    assert!(matches!(
        error,
        Error::IncompleteConfiguration {
            missing: "time to monitor"
        }
    ));
    assert!(device.calls.is_empty());
}

#[test]
fn nan_thresholds_are_refused_before_polling() {
    let config = AlarmConfig::new()
        .sensor(SensorSelector::Left)
        .range(RangeMode::Maximum)
        .light_threshold(f64::NAN)
        .temperature_threshold_f(f64::NAN)
        .time_budget_seconds(2);
    let mut device = MockFinch::new()
        .with_left_light([255])
        .with_temperatures_c([500.0]);

    assert!(!config.is_complete());
    assert!(matches!(
        monitor(&config, &mut device),
        Err(Error::InvalidThreshold {
            threshold: "light threshold",
            ..
        })
    ));
    assert!(device.calls.is_empty());
}

#[test]
fn read_failure_aborts_but_earlier_ticks_were_reported() {
    // tick 0 is calls 0..=2, the sleep is call 3, tick 1 fails on its first read
    let mut device = MockFinch::new().failing_at(4);
    let mut ticks = Vec::new();

    let result = monitor_with(&scenario_config(), &mut device, |tick| {
        ticks.push(tick.elapsed_seconds)
    });

    assert!(matches!(
        result,
        Err(Error::DeviceCommunication(DeviceError::Disconnected))
    ));
    assert_eq!(ticks, [0]);
}

#[test]
fn ambient_light_reads_both_sensors() {
    let mut device = MockFinch::new().with_left_light([40]).with_right_light([90]);

    assert_eq!(
        ambient_light(&mut device).unwrap(),
        AmbientLight {
            left: 40,
            right: 90
        }
    );
}
