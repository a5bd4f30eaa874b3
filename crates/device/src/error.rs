use std::io;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum DeviceError {
    #[error("finch is not connected")]
    NotConnected,
    #[error("finch disconnected")]
    Disconnected,
    #[error("timed out waiting for the finch to respond")]
    TimedOut,
    #[error("serial port error: {0}")]
    Serial(#[from] serialport::Error),
    #[error("i/o error: {0}")]
    Io(#[source] io::Error),
    #[error("received malformed frame")]
    MalformedFrame,
    #[error("expected a {expected} byte response, got {got} bytes")]
    UnexpectedResponse { expected: usize, got: usize },
    #[error("finch rejected request {opcode:?} with status {code}")]
    Rejected { opcode: char, code: u8 },
    #[error("{what} {value} is out of range")]
    OutOfRange { what: &'static str, value: i32 },
}

impl From<io::Error> for DeviceError {
    fn from(error: io::Error) -> Self {
        match error.kind() {
            io::ErrorKind::TimedOut => DeviceError::TimedOut,
            io::ErrorKind::BrokenPipe
            | io::ErrorKind::PermissionDenied
            | io::ErrorKind::UnexpectedEof => DeviceError::Disconnected,
            _ => DeviceError::Io(error),
        }
    }
}
