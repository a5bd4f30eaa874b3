//! Recording Finch double for integration tests.
//!
//! Every call is appended to `calls`. Sensor reads pop scripted values and
//! fall back to a default once the script runs out. A single call can be
//! made to fail to exercise the fatal paths.

#![allow(dead_code)]

use std::collections::VecDeque;

use finch_device::{DeviceError, Finch};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Call {
    Connect,
    Disconnect,
    Motors(i16, i16),
    Led(u8, u8, u8),
    ToneOn(u16),
    ToneOff,
    ReadTemperature,
    ReadLeftLight,
    ReadRightLight,
    Sleep(u32),
}

impl Call {
    pub fn is_read(&self) -> bool {
        matches!(
            self,
            Call::ReadTemperature | Call::ReadLeftLight | Call::ReadRightLight
        )
    }
}

pub struct MockFinch {
    pub calls: Vec<Call>,

    temperatures_c: VecDeque<f64>,
    left_light: VecDeque<u8>,
    right_light: VecDeque<u8>,

    fail_at: Option<usize>,
}

pub fn fahrenheit_to_celsius(fahrenheit: f64) -> f64 {
    (fahrenheit - 32.0) / 9.0 * 5.0
}

impl MockFinch {
    pub const DEFAULT_TEMPERATURE_C: f64 = 20.0;
    pub const DEFAULT_LIGHT: u8 = 10;

    pub fn new() -> Self {
        Self {
            calls: Vec::new(),

            temperatures_c: VecDeque::new(),
            left_light: VecDeque::new(),
            right_light: VecDeque::new(),

            fail_at: None,
        }
    }

    pub fn with_temperatures_c(mut self, readings: impl IntoIterator<Item = f64>) -> Self {
        self.temperatures_c.extend(readings);
        self
    }

    pub fn with_temperatures_f(self, readings: impl IntoIterator<Item = f64>) -> Self {
        self.with_temperatures_c(readings.into_iter().map(fahrenheit_to_celsius))
    }

    pub fn with_left_light(mut self, readings: impl IntoIterator<Item = u8>) -> Self {
        self.left_light.extend(readings);
        self
    }

    pub fn with_right_light(mut self, readings: impl IntoIterator<Item = u8>) -> Self {
        self.right_light.extend(readings);
        self
    }

    /// Make the call with this 0-based index fail with a disconnect.
    pub fn failing_at(mut self, index: usize) -> Self {
        self.fail_at = Some(index);
        self
    }

    /// Calls that change the robot or pass time, without sensor reads.
    pub fn effects(&self) -> Vec<Call> {
        self.calls
            .iter()
            .filter(|call| !call.is_read())
            .copied()
            .collect()
    }

    pub fn count(&self, call: &Call) -> usize {
        self.calls.iter().filter(|c| *c == call).count()
    }

    pub fn last_motors(&self) -> Option<(i16, i16)> {
        self.calls.iter().rev().find_map(|call| match call {
            Call::Motors(left, right) => Some((*left, *right)),
            _ => None,
        })
    }

    fn record(&mut self, call: Call) -> Result<(), DeviceError> {
        let index = self.calls.len();

        self.calls.push(call);

        if self.fail_at == Some(index) {
            return Err(DeviceError::Disconnected);
        }

        Ok(())
    }
}

impl Default for MockFinch {
    fn default() -> Self {
        Self::new()
    }
}

impl Finch for MockFinch {
    fn connect(&mut self) -> Result<bool, DeviceError> {
        self.record(Call::Connect)?;
        Ok(true)
    }

    fn disconnect(&mut self) {
        self.calls.push(Call::Disconnect);
    }

    fn set_motors(&mut self, left: i16, right: i16) -> Result<(), DeviceError> {
        self.record(Call::Motors(left, right))
    }

    fn set_led(&mut self, red: u8, green: u8, blue: u8) -> Result<(), DeviceError> {
        self.record(Call::Led(red, green, blue))
    }

    fn tone_on(&mut self, frequency_hz: u16) -> Result<(), DeviceError> {
        self.record(Call::ToneOn(frequency_hz))
    }

    fn tone_off(&mut self) -> Result<(), DeviceError> {
        self.record(Call::ToneOff)
    }

    fn read_temperature_celsius(&mut self) -> Result<f64, DeviceError> {
        self.record(Call::ReadTemperature)?;

        Ok(self
            .temperatures_c
            .pop_front()
            .unwrap_or(Self::DEFAULT_TEMPERATURE_C))
    }

    fn read_left_light(&mut self) -> Result<u8, DeviceError> {
        self.record(Call::ReadLeftLight)?;

        Ok(self.left_light.pop_front().unwrap_or(Self::DEFAULT_LIGHT))
    }

    fn read_right_light(&mut self) -> Result<u8, DeviceError> {
        self.record(Call::ReadRightLight)?;

        Ok(self.right_light.pop_front().unwrap_or(Self::DEFAULT_LIGHT))
    }

    fn sleep_ms(&mut self, milliseconds: u32) {
        self.calls.push(Call::Sleep(milliseconds));
    }
}
