mod common;

use common::{Call, MockFinch};
use finch_engine::{play, Error, Routine};

#[test]
fn alarm_routine_flashes_then_goes_quiet() {
    let mut device = MockFinch::new();

    play(Routine::Alarm, &mut device).unwrap();

    assert_eq!(device.count(&Call::Led(250, 250, 250)), 1);
    assert_eq!(
        device.calls[device.calls.len() - 2..],
        [Call::Led(0, 0, 0), Call::ToneOff]
    );
}

#[test]
fn dance_drives_within_motor_limits() {
    let mut device = MockFinch::new();

    play(Routine::Dance, &mut device).unwrap();

    assert!(device.calls.iter().all(|call| match call {
        Call::Motors(left, right) => left.abs() <= 255 && right.abs() <= 255,
        _ => true,
    }));
    assert_eq!(device.last_motors(), Some((0, 0)));
    assert_eq!(device.count(&Call::Motors(255, 255)), 5);
}

#[test]
fn routine_stops_at_first_failure() {
    let mut device = MockFinch::new().failing_at(0);

    assert!(matches!(
        play(Routine::Finale, &mut device),
        Err(Error::DeviceCommunication(_))
    ));
    assert_eq!(device.calls.len(), 1);
}
