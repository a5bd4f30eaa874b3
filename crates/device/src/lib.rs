//! Device-control capability for the Finch robot.
//!
//! Everything that drives the robot goes through the [`Finch`] trait. The one
//! physical implementation is [`SerialFinch`], which talks to the robot over a
//! USB serial link. Callers acquire the device with a [`Session`], which makes
//! sure the robot is quietened and released on every exit path.

mod error;
mod serial;
mod session;

pub use error::DeviceError;
pub use serial::SerialFinch;
pub use session::Session;

/// Largest magnitude accepted for either wheel.
pub const MAX_MOTOR_SPEED: i16 = 255;

/// Blocking control surface of a single Finch robot.
///
/// Every call is one round trip to the device. Nothing is retried; a failed
/// call is reported to the caller as is.
pub trait Finch {
    /// Open the link to the robot.
    ///
    /// Returns `Ok(false)` when no robot is attached.
    fn connect(&mut self) -> Result<bool, DeviceError>;

    fn disconnect(&mut self);

    /// Drive both wheels. Each speed must lie in `-255..=255`.
    fn set_motors(&mut self, left: i16, right: i16) -> Result<(), DeviceError>;

    fn set_led(&mut self, red: u8, green: u8, blue: u8) -> Result<(), DeviceError>;

    fn tone_on(&mut self, frequency_hz: u16) -> Result<(), DeviceError>;

    fn tone_off(&mut self) -> Result<(), DeviceError>;

    fn read_temperature_celsius(&mut self) -> Result<f64, DeviceError>;

    fn read_left_light(&mut self) -> Result<u8, DeviceError>;

    fn read_right_light(&mut self) -> Result<u8, DeviceError>;

    /// Block the calling thread.
    fn sleep_ms(&mut self, milliseconds: u32);
}

impl<D: Finch + ?Sized> Finch for &mut D {
    fn connect(&mut self) -> Result<bool, DeviceError> {
        (**self).connect()
    }

    fn disconnect(&mut self) {
        (**self).disconnect()
    }

    fn set_motors(&mut self, left: i16, right: i16) -> Result<(), DeviceError> {
        (**self).set_motors(left, right)
    }

    fn set_led(&mut self, red: u8, green: u8, blue: u8) -> Result<(), DeviceError> {
        (**self).set_led(red, green, blue)
    }

    fn tone_on(&mut self, frequency_hz: u16) -> Result<(), DeviceError> {
        (**self).tone_on(frequency_hz)
    }

    fn tone_off(&mut self) -> Result<(), DeviceError> {
        (**self).tone_off()
    }

    fn read_temperature_celsius(&mut self) -> Result<f64, DeviceError> {
        (**self).read_temperature_celsius()
    }

    fn read_left_light(&mut self) -> Result<u8, DeviceError> {
        (**self).read_left_light()
    }

    fn read_right_light(&mut self) -> Result<u8, DeviceError> {
        (**self).read_right_light()
    }

    fn sleep_ms(&mut self, milliseconds: u32) {
        (**self).sleep_ms(milliseconds)
    }
}
