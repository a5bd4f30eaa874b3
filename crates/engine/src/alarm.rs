//! Threshold alarm: bounded polling of the light and temperature sensors.

use finch_device::Finch;
use tracing::{debug, info};

mod config;

pub use self::config::{AlarmConfig, ParseChoiceError, RangeMode, SensorSelector};

use crate::{Error, Temperature};

/// Time between two polls.
pub const TICK_MS: u32 = 1_000;

/// Both light sensors, read once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AmbientLight {
    pub left: u8,
    pub right: u8,
}

/// One poll's readings.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SensorReading {
    pub light: u8,
    pub temperature: Temperature,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Tick {
    pub elapsed_seconds: u32,
    pub reading: SensorReading,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Outcome {
    LightBreach {
        value: u8,
        threshold: f64,
        elapsed_seconds: u32,
    },
    TemperatureBreach {
        value: Temperature,
        threshold_f: f64,
        elapsed_seconds: u32,
    },
    NoBreach {
        light_threshold: f64,
        temperature_threshold_f: f64,
    },
}

impl Outcome {
    pub fn is_breach(&self) -> bool {
        !matches!(self, Outcome::NoBreach { .. })
    }
}

pub fn ambient_light<D: Finch + ?Sized>(device: &mut D) -> Result<AmbientLight, Error> {
    Ok(AmbientLight {
        left: device.read_left_light()?,
        right: device.read_right_light()?,
    })
}

fn read_light<D: Finch + ?Sized>(sensor: SensorSelector, device: &mut D) -> Result<u8, Error> {
    let light = match sensor {
        SensorSelector::Left => device.read_left_light()?,
        SensorSelector::Right => device.read_right_light()?,
        SensorSelector::Both => {
            let left = u16::from(device.read_left_light()?);
            let right = u16::from(device.read_right_light()?);

            // mean of two u8 always fits
            ((left + right) / 2) as u8
        }
    };

    Ok(light)
}

/// Poll once per tick until a threshold is breached or the time budget runs
/// out, reporting every tick as it is read.
///
/// A budget of `n` seconds allows polls at `t = 0..=n`. When both channels
/// breach on the same tick the light breach is reported.
///
/// The [`TICK_MS`] sleep only happens between two polls. The call returns
/// right after the final poll or a breach, so a run without a breach takes
/// `n` seconds of sleeping rather than `n + 1`.
pub fn monitor_with<D, F>(config: &AlarmConfig, device: &mut D, mut on_tick: F) -> Result<Outcome, Error>
where
    D: Finch + ?Sized,
    F: FnMut(&Tick),
{
    let armed = config.armed()?;

    info!(
        sensor = %armed.sensor,
        range = %armed.range,
        light_threshold = armed.light_threshold,
        temperature_threshold_f = armed.temperature_threshold_f,
        budget = armed.time_budget_seconds,
        "alarm armed"
    );

    let mut elapsed_seconds = 0;

    loop {
        let reading = SensorReading {
            light: read_light(armed.sensor, device)?,
            temperature: Temperature::from_celsius(device.read_temperature_celsius()?),
        };

        let light_breach = armed
            .range
            .is_breach(f64::from(reading.light), armed.light_threshold);
        let temperature_breach = armed.range.is_breach(
            reading.temperature.fahrenheit(),
            armed.temperature_threshold_f,
        );

        debug!(
            elapsed_seconds,
            light = reading.light,
            temperature = %reading.temperature,
            light_breach,
            temperature_breach,
            "alarm tick"
        );

        on_tick(&Tick {
            elapsed_seconds,
            reading,
        });

        if light_breach {
            info!(value = reading.light, "light threshold breached");

            return Ok(Outcome::LightBreach {
                value: reading.light,
                threshold: armed.light_threshold,
                elapsed_seconds,
            });
        }

        if temperature_breach {
            info!(value = %reading.temperature, "temperature threshold breached");

            return Ok(Outcome::TemperatureBreach {
                value: reading.temperature,
                threshold_f: armed.temperature_threshold_f,
                elapsed_seconds,
            });
        }

        if elapsed_seconds >= armed.time_budget_seconds {
            info!("alarm monitoring complete without breach");

            return Ok(Outcome::NoBreach {
                light_threshold: armed.light_threshold,
                temperature_threshold_f: armed.temperature_threshold_f,
            });
        }

        device.sleep_ms(TICK_MS);
        elapsed_seconds += 1;
    }
}

pub fn monitor<D: Finch + ?Sized>(config: &AlarmConfig, device: &mut D) -> Result<Outcome, Error> {
    monitor_with(config, device, |_| {})
}
