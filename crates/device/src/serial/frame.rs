use std::{io::BufRead, mem::size_of};

use crate::DeviceError;

/// One request to the robot, encoded as `[opcode, args...]` with
/// little-endian integers.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) enum Request {
    Hello,
    Motors { left: i16, right: i16 },
    Led { red: u8, green: u8, blue: u8 },
    ToneOn { frequency_hz: u16 },
    ToneOff,
    Temperature,
    Light,
}

impl Request {
    pub fn opcode(&self) -> u8 {
        match self {
            Request::Hello => b'H',
            Request::Motors { .. } => b'M',
            Request::Led { .. } => b'O',
            Request::ToneOn { .. } => b'T',
            Request::ToneOff => b'X',
            Request::Temperature => b'E',
            Request::Light => b'L',
        }
    }

    fn payload(&self) -> Vec<u8> {
        let mut payload = vec![self.opcode()];

        match *self {
            Request::Motors { left, right } => {
                payload.extend_from_slice(&left.to_le_bytes());
                payload.extend_from_slice(&right.to_le_bytes());
            }
            Request::Led { red, green, blue } => payload.extend_from_slice(&[red, green, blue]),
            Request::ToneOn { frequency_hz } => {
                payload.extend_from_slice(&frequency_hz.to_le_bytes())
            }
            Request::Hello | Request::ToneOff | Request::Temperature | Request::Light => {}
        }

        payload
    }

    /// COBS-encode the request and append the frame delimiter.
    pub fn encode(&self) -> Vec<u8> {
        let payload = self.payload();

        let mut frame = vec![0; postcard_cobs::max_encoding_length(payload.len())];
        let len = postcard_cobs::encode(&payload, &mut frame);

        frame.truncate(len);
        frame.push(0x00);

        frame
    }
}

/// Read one zero-delimited COBS frame and decode it in place.
pub(super) fn read_frame<'buffer>(
    reader: &mut impl BufRead,
    buffer: &'buffer mut Vec<u8>,
) -> Result<&'buffer [u8], DeviceError> {
    buffer.clear();

    let len = reader.read_until(0x00, buffer)?;

    if len == 0 {
        return Err(DeviceError::Disconnected);
    }

    let end = if buffer[len - 1] == 0x00 { len - 1 } else { len };

    match postcard_cobs::decode_in_place(&mut buffer[..end]) {
        Ok(decoded) => Ok(&buffer[..decoded]),
        Err(()) => Err(DeviceError::MalformedFrame),
    }
}

/// Split a decoded response into its payload, failing on a non-zero status.
pub(super) fn response_payload(request: Request, frame: &[u8]) -> Result<&[u8], DeviceError> {
    let (&status, payload) = frame.split_first().ok_or(DeviceError::MalformedFrame)?;

    if status != 0 {
        return Err(DeviceError::Rejected {
            opcode: char::from(request.opcode()),
            code: status,
        });
    }

    Ok(payload)
}

/// Acknowledgement of a request that returns nothing.
pub(super) fn ack(payload: &[u8]) -> Result<(), DeviceError> {
    if payload.is_empty() {
        Ok(())
    } else {
        Err(DeviceError::UnexpectedResponse {
            expected: 0,
            got: payload.len(),
        })
    }
}

pub(super) fn temperature_celsius(payload: &[u8]) -> Result<f64, DeviceError> {
    let bytes = payload
        .try_into()
        .map_err(|_| DeviceError::UnexpectedResponse {
            expected: size_of::<f32>(),
            got: payload.len(),
        })?;

    Ok(f64::from(f32::from_le_bytes(bytes)))
}

/// Left and right light sensor values, in that order.
pub(super) fn light(payload: &[u8]) -> Result<(u8, u8), DeviceError> {
    match *payload {
        [left, right] => Ok((left, right)),
        _ => Err(DeviceError::UnexpectedResponse {
            expected: 2,
            got: payload.len(),
        }),
    }
}
