use std::ops::RangeInclusive;

use crate::ParameterError;

pub const MOTOR_SPEED_RANGE: RangeInclusive<i64> = 0..=255;
pub const BRIGHTNESS_RANGE: RangeInclusive<i64> = 0..=255;
pub const TONE_FREQUENCY_RANGE: RangeInclusive<i64> = 100..=10_000;
pub const WAIT_SECONDS_RANGE: RangeInclusive<f64> = 0.0..=10.0;

/// LED channel brightnesses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Hash)]
pub struct Rgb {
    pub red: u8,
    pub green: u8,
    pub blue: u8,
}

impl Rgb {
    pub const OFF: Rgb = Rgb::new(0, 0, 0);

    pub const fn new(red: u8, green: u8, blue: u8) -> Self {
        Self { red, green, blue }
    }

    pub const fn grey(level: u8) -> Self {
        Self::new(level, level, level)
    }
}

/// The single parameter snapshot shared by every token of a program.
///
/// Only constructible through [`CommandParameters::new`], so a value of this
/// type has always passed range validation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CommandParameters {
    motor_speed: u8,
    led: Rgb,
    tone_frequency_hz: u16,
    wait_seconds: f64,
}

impl CommandParameters {
    pub fn new(
        motor_speed: i64,
        [red, green, blue]: [i64; 3],
        tone_frequency_hz: i64,
        wait_seconds: f64,
    ) -> Result<Self, ParameterError> {
        let motor_speed = check_integer("motor speed", motor_speed, MOTOR_SPEED_RANGE)?;
        let red = check_integer("red brightness", red, BRIGHTNESS_RANGE)?;
        let green = check_integer("green brightness", green, BRIGHTNESS_RANGE)?;
        let blue = check_integer("blue brightness", blue, BRIGHTNESS_RANGE)?;
        let tone_frequency_hz =
            check_integer("tone frequency", tone_frequency_hz, TONE_FREQUENCY_RANGE)?;

        if !wait_seconds.is_finite() {
            return Err(ParameterError::NotFinite {
                name: "wait seconds",
            });
        }

        if !WAIT_SECONDS_RANGE.contains(&wait_seconds) {
            return Err(ParameterError::OutOfRange {
                name: "wait seconds",
                min: *WAIT_SECONDS_RANGE.start(),
                max: *WAIT_SECONDS_RANGE.end(),
                value: wait_seconds,
            });
        }

        Ok(Self {
            motor_speed,
            led: Rgb::new(red, green, blue),
            tone_frequency_hz,
            wait_seconds,
        })
    }

    pub const fn motor_speed(&self) -> u8 {
        self.motor_speed
    }

    pub const fn led(&self) -> Rgb {
        self.led
    }

    pub const fn tone_frequency_hz(&self) -> u16 {
        self.tone_frequency_hz
    }

    pub const fn wait_seconds(&self) -> f64 {
        self.wait_seconds
    }

    /// The wait duration in whole milliseconds, truncating any fraction.
    pub fn wait_ms(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = (self.wait_seconds * 1000.0) as u32;

        millis
    }
}

fn check_integer<T: TryFrom<i64>>(
    name: &'static str,
    value: i64,
    range: RangeInclusive<i64>,
) -> Result<T, ParameterError> {
    let out_of_range = || ParameterError::OutOfRange {
        name,
        min: *range.start() as f64,
        max: *range.end() as f64,
        value: value as f64,
    };

    if !range.contains(&value) {
        return Err(out_of_range());
    }

    T::try_from(value).map_err(|_| out_of_range())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_range_bounds() {
        let low = CommandParameters::new(0, [0, 0, 0], 100, 0.0).unwrap();
        assert_eq!(low.motor_speed(), 0);
        assert_eq!(low.tone_frequency_hz(), 100);

        let high = CommandParameters::new(255, [255, 255, 255], 10_000, 10.0).unwrap();
        assert_eq!(high.led(), Rgb::grey(255));
        assert_eq!(high.wait_ms(), 10_000);
    }

    #[test]
    fn rejects_each_field_independently() {
        let error = CommandParameters::new(256, [0, 0, 0], 440, 1.0).unwrap_err();
        assert!(matches!(
            error,
            ParameterError::OutOfRange {
                name: "motor speed",
                ..
            }
        ));

        let error = CommandParameters::new(10, [0, -1, 0], 440, 1.0).unwrap_err();
        assert!(matches!(
            error,
            ParameterError::OutOfRange {
                name: "green brightness",
                ..
            }
        ));

        let error = CommandParameters::new(10, [0, 0, 0], 99, 1.0).unwrap_err();
        assert!(matches!(
            error,
            ParameterError::OutOfRange {
                name: "tone frequency",
                ..
            }
        ));

        let error = CommandParameters::new(10, [0, 0, 0], 440, 10.5).unwrap_err();
        assert!(matches!(
            error,
            ParameterError::OutOfRange {
                name: "wait seconds",
                ..
            }
        ));
    }

    #[test]
    fn rejects_non_finite_wait() {
        assert_eq!(
            CommandParameters::new(10, [0, 0, 0], 440, f64::NAN),
            Err(ParameterError::NotFinite {
                name: "wait seconds"
            })
        );
    }

    #[test]
    fn wait_truncates_to_whole_milliseconds() {
        let parameters = CommandParameters::new(10, [0, 0, 0], 440, 1.2345).unwrap();

        assert_eq!(parameters.wait_ms(), 1234);
    }
}
