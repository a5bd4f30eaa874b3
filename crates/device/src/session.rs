use std::ops::{Deref, DerefMut};

use tracing::{info, warn};

use crate::{DeviceError, Finch};

/// Exclusive, scoped use of a connected robot.
///
/// Opening a session connects and quietens the robot. Dropping it stops the
/// motors, turns off the LED and buzzer, then disconnects, whether the work
/// done in between succeeded or not.
pub struct Session<'d, D: Finch + ?Sized> {
    device: &'d mut D,
}

impl<'d, D: Finch + ?Sized> Session<'d, D> {
    pub fn open(device: &'d mut D) -> Result<Self, DeviceError> {
        if !device.connect()? {
            return Err(DeviceError::NotConnected);
        }

        let mut session = Self { device };

        session.device.set_led(0, 0, 0)?;
        session.device.tone_off()?;

        info!("session opened");

        Ok(session)
    }

    /// Close the session explicitly. Equivalent to dropping it.
    pub fn close(self) {}

    fn neutralise(&mut self) -> Result<(), DeviceError> {
        self.device.set_motors(0, 0)?;
        self.device.set_led(0, 0, 0)?;
        self.device.tone_off()
    }
}

impl<D: Finch + ?Sized> Deref for Session<'_, D> {
    type Target = D;

    fn deref(&self) -> &D {
        &*self.device
    }
}

impl<D: Finch + ?Sized> DerefMut for Session<'_, D> {
    fn deref_mut(&mut self) -> &mut D {
        &mut *self.device
    }
}

impl<D: Finch + ?Sized> Drop for Session<'_, D> {
    fn drop(&mut self) {
        if let Err(error) = self.neutralise() {
            warn!(%error, "failed to return finch to a neutral state");
        }

        self.device.disconnect();

        info!("session closed");
    }
}
