use std::{
    io::{BufReader, Write},
    thread,
    time::Duration,
};

use serialport::{ClearBuffer, SerialPort};
use tracing::{debug, info, trace, warn};

mod frame;

use self::frame::Request;
use crate::{DeviceError, Finch, MAX_MOTOR_SPEED};

/// A Finch attached to a USB serial port.
pub struct SerialFinch {
    port_name: String,
    baud_rate: u32,
    timeout: Duration,

    link: Option<BufReader<Box<dyn SerialPort>>>,
    buffer: Vec<u8>,
}

impl SerialFinch {
    pub fn new(port_name: impl Into<String>, baud_rate: u32, timeout: Duration) -> Self {
        Self {
            port_name: port_name.into(),
            baud_rate,
            timeout,

            link: None,
            buffer: Vec::new(),
        }
    }

    pub fn port_name(&self) -> &str {
        &self.port_name
    }

    pub fn is_connected(&self) -> bool {
        self.link.is_some()
    }

    fn open(&self) -> Result<Option<BufReader<Box<dyn SerialPort>>>, DeviceError> {
        match serialport::new(&self.port_name, self.baud_rate)
            .timeout(self.timeout)
            .open()
        {
            Ok(stream) => Ok(Some(BufReader::new(stream))),
            Err(e) if e.kind() == serialport::ErrorKind::NoDevice => Ok(None),
            Err(e) if e.kind() == serialport::ErrorKind::Io(std::io::ErrorKind::NotFound) => {
                Ok(None)
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Send one request and wait for its response payload.
    ///
    /// A timeout or a malformed frame leaves the link out of step with the
    /// robot, so any unread input is thrown away before the error is returned.
    fn request(&mut self, request: Request) -> Result<&[u8], DeviceError> {
        let Self { link, buffer, .. } = self;

        let Some(reader) = link.as_mut() else {
            return Err(DeviceError::NotConnected);
        };

        trace!(?request, "sending request");

        let written = {
            let serial = reader.get_mut();

            serial
                .write_all(&request.encode())
                .and_then(|()| serial.flush())
        };

        let frame = match written {
            Ok(()) => frame::read_frame(reader, buffer),
            Err(error) => Err(error.into()),
        };

        match frame {
            Ok(frame) => frame::response_payload(request, frame),
            Err(DeviceError::Disconnected) => {
                info!("serial port disconnected");

                *link = None;

                Err(DeviceError::Disconnected)
            }
            Err(error @ (DeviceError::TimedOut | DeviceError::MalformedFrame)) => {
                warn!(%error, "discarding unread serial input");

                if let Some(reader) = link.take() {
                    *link = resynchronize(reader);
                }

                Err(error)
            }
            Err(error) => Err(error),
        }
    }

    fn ack(&mut self, request: Request) -> Result<(), DeviceError> {
        let payload = self.request(request)?;

        frame::ack(payload)
    }

    fn light(&mut self) -> Result<(u8, u8), DeviceError> {
        let payload = self.request(Request::Light)?;

        frame::light(payload)
    }
}

/// Drop whatever the reader has buffered and flush the port's input queue.
/// The link is closed if the port refuses.
fn resynchronize(
    reader: BufReader<Box<dyn SerialPort>>,
) -> Option<BufReader<Box<dyn SerialPort>>> {
    let serial = reader.into_inner();

    match serial.clear(ClearBuffer::Input) {
        Ok(()) => Some(BufReader::new(serial)),
        Err(error) => {
            warn!(%error, "failed to clear serial input, closing link");

            None
        }
    }
}

fn check_motor_speed(speed: i16) -> Result<(), DeviceError> {
    if (-MAX_MOTOR_SPEED..=MAX_MOTOR_SPEED).contains(&speed) {
        Ok(())
    } else {
        Err(DeviceError::OutOfRange {
            what: "motor speed",
            value: i32::from(speed),
        })
    }
}

impl Finch for SerialFinch {
    fn connect(&mut self) -> Result<bool, DeviceError> {
        if self.link.is_some() {
            warn!("finch commanded to connect when already connected");

            return Ok(true);
        }

        let Some(reader) = self.open()? else {
            debug!(port = %self.port_name, "serial port not found");

            return Ok(false);
        };

        self.link = Some(reader);

        if let Err(error) = self.request(Request::Hello) {
            self.link = None;

            return Err(error);
        }

        info!(port = %self.port_name, baud = self.baud_rate, "finch connected");

        Ok(true)
    }

    fn disconnect(&mut self) {
        if self.link.take().is_some() {
            info!(port = %self.port_name, "finch disconnected");
        }
    }

    fn set_motors(&mut self, left: i16, right: i16) -> Result<(), DeviceError> {
        check_motor_speed(left)?;
        check_motor_speed(right)?;

        self.ack(Request::Motors { left, right })
    }

    fn set_led(&mut self, red: u8, green: u8, blue: u8) -> Result<(), DeviceError> {
        self.ack(Request::Led { red, green, blue })
    }

    fn tone_on(&mut self, frequency_hz: u16) -> Result<(), DeviceError> {
        self.ack(Request::ToneOn { frequency_hz })
    }

    fn tone_off(&mut self) -> Result<(), DeviceError> {
        self.ack(Request::ToneOff)
    }

    fn read_temperature_celsius(&mut self) -> Result<f64, DeviceError> {
        let payload = self.request(Request::Temperature)?;

        frame::temperature_celsius(payload)
    }

    fn read_left_light(&mut self) -> Result<u8, DeviceError> {
        self.light().map(|(left, _)| left)
    }

    fn read_right_light(&mut self) -> Result<u8, DeviceError> {
        self.light().map(|(_, right)| right)
    }

    fn sleep_ms(&mut self, milliseconds: u32) {
        thread::sleep(Duration::from_millis(u64::from(milliseconds)));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn unplugged() -> SerialFinch {
        SerialFinch::new("/dev/finch-does-not-exist", 9600, Duration::from_millis(10))
    }

    #[test]
    fn requests_fail_before_connect() {
        let mut finch = unplugged();

        assert!(!finch.is_connected());
        assert!(matches!(finch.tone_off(), Err(DeviceError::NotConnected)));
        assert!(matches!(
            finch.read_temperature_celsius(),
            Err(DeviceError::NotConnected)
        ));
    }

    #[test]
    fn motor_speed_is_checked_before_sending() {
        let mut finch = unplugged();

        assert!(matches!(
            finch.set_motors(256, 0),
            Err(DeviceError::OutOfRange {
                what: "motor speed",
                value: 256
            })
        ));
        assert!(matches!(
            finch.set_motors(0, -256),
            Err(DeviceError::OutOfRange { value: -256, .. })
        ));
        assert!(matches!(
            finch.set_motors(-255, 255),
            Err(DeviceError::NotConnected)
        ));
    }

    #[test]
    fn disconnect_without_link_is_a_no_op() {
        let mut finch = unplugged();

        finch.disconnect();

        assert!(!finch.is_connected());
    }
}
