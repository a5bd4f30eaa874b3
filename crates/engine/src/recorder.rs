//! Temperature data recorder.

use finch_device::Finch;
use tracing::{debug, info};

use crate::{Error, Temperature};

pub const MAX_INTERVAL_SECONDS: f64 = 60.0;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RecorderConfig {
    points: u32,
    interval_seconds: f64,
}

impl RecorderConfig {
    pub fn new(points: u32, interval_seconds: f64) -> Result<Self, Error> {
        if points == 0 {
            return Err(Error::InvalidRecording {
                reason: "at least one data point is required",
            });
        }

        if !(0.0..=MAX_INTERVAL_SECONDS).contains(&interval_seconds) {
            return Err(Error::InvalidRecording {
                reason: "interval must be between 0 and 60 seconds",
            });
        }

        Ok(Self {
            points,
            interval_seconds,
        })
    }

    pub const fn points(&self) -> u32 {
        self.points
    }

    pub const fn interval_seconds(&self) -> f64 {
        self.interval_seconds
    }

    fn interval_ms(&self) -> u32 {
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let millis = (self.interval_seconds * 1000.0) as u32;

        millis
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    /// 1-based recording number.
    pub number: u32,
    pub temperature: Temperature,
}

/// Take `config.points()` temperature readings, sleeping the configured
/// interval between consecutive readings.
pub fn record_with<D, F>(
    config: &RecorderConfig,
    device: &mut D,
    mut on_sample: F,
) -> Result<Vec<Sample>, Error>
where
    D: Finch + ?Sized,
    F: FnMut(&Sample),
{
    info!(
        points = config.points,
        interval_seconds = config.interval_seconds,
        "recording temperature"
    );

    let mut samples = Vec::new();

    for number in 1..=config.points {
        if number > 1 {
            device.sleep_ms(config.interval_ms());
        }

        let sample = Sample {
            number,
            temperature: Temperature::from_celsius(device.read_temperature_celsius()?),
        };

        debug!(number, temperature = %sample.temperature, "recorded sample");

        on_sample(&sample);
        samples.push(sample);
    }

    Ok(samples)
}

pub fn record<D: Finch + ?Sized>(config: &RecorderConfig, device: &mut D) -> Result<Vec<Sample>, Error> {
    record_with(config, device, |_| {})
}
