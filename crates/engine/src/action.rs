//! Device-level steps shared by programs and routines.

use finch_device::{DeviceError, Finch};
use tracing::trace;

use crate::{Rgb, Temperature};

/// A single device call.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Action {
    Motors { left: i16, right: i16 },
    Led(Rgb),
    Tone(u16),
    ToneOff,
    Sleep { milliseconds: u32 },
    ReadTemperature,
}

impl Action {
    pub const STOP: Action = Action::Motors { left: 0, right: 0 };
    pub const LED_OFF: Action = Action::Led(Rgb::OFF);

    pub const fn motors(left: i16, right: i16) -> Self {
        Action::Motors { left, right }
    }

    pub const fn led(red: u8, green: u8, blue: u8) -> Self {
        Action::Led(Rgb::new(red, green, blue))
    }

    pub const fn sleep(milliseconds: u32) -> Self {
        Action::Sleep { milliseconds }
    }

    /// Perform the call. Only [`Action::ReadTemperature`] yields a value.
    pub fn apply<D: Finch + ?Sized>(
        self,
        device: &mut D,
    ) -> Result<Option<Temperature>, DeviceError> {
        trace!(action = ?self, "applying action");

        match self {
            Action::Motors { left, right } => device.set_motors(left, right)?,
            Action::Led(Rgb { red, green, blue }) => device.set_led(red, green, blue)?,
            Action::Tone(frequency_hz) => device.tone_on(frequency_hz)?,
            Action::ToneOff => device.tone_off()?,
            Action::Sleep { milliseconds } => device.sleep_ms(milliseconds),
            Action::ReadTemperature => {
                let celsius = device.read_temperature_celsius()?;

                return Ok(Some(Temperature::from_celsius(celsius)));
            }
        }

        Ok(None)
    }
}
