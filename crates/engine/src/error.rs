use finch_device::DeviceError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
    #[error("alarm is not fully configured: {missing} has not been set")]
    IncompleteConfiguration { missing: &'static str },
    #[error("alarm {threshold} must be a finite number, got {value}")]
    InvalidThreshold { threshold: &'static str, value: f64 },
    #[error("program has no commands to execute")]
    InvalidProgram,
    #[error("invalid recording: {reason}")]
    InvalidRecording { reason: &'static str },
    #[error(transparent)]
    DeviceCommunication(#[from] DeviceError),
}

/// Rejection of a user-supplied command parameter.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParameterError {
    #[error("{name} must be between {min} and {max}, got {value}")]
    OutOfRange {
        name: &'static str,
        min: f64,
        max: f64,
        value: f64,
    },
    #[error("{name} must be a finite number")]
    NotFinite { name: &'static str },
}
