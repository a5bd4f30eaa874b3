//! Command execution and threshold monitoring for the Finch robot.
//!
//! Two independent components sit on top of [`finch_device::Finch`]:
//!
//! - the command program runner ([`execute`]), which turns a [`Program`] of
//!   [`CommandToken`]s plus one [`CommandParameters`] snapshot into device
//!   calls and one [`FeedbackLine`] per token;
//! - the threshold alarm monitor ([`monitor`]), which polls the light and
//!   temperature sensors once a second until a threshold is breached or the
//!   time budget runs out.
//!
//! Both are strictly sequential. Every device failure is fatal to the
//! current call and is never retried.

pub mod action;
pub mod alarm;
mod error;
pub mod parameters;
pub mod program;
pub mod recorder;
pub mod routine;
pub mod runner;
pub mod temperature;
pub mod token;

pub use self::{
    alarm::{ambient_light, monitor, monitor_with, AlarmConfig, Outcome, RangeMode, SensorSelector},
    error::{Error, ParameterError},
    parameters::{CommandParameters, Rgb},
    program::Program,
    recorder::{record, record_with, RecorderConfig, Sample},
    routine::{play, Routine},
    runner::{execute, execute_with, FeedbackLine},
    temperature::Temperature,
    token::CommandToken,
};
