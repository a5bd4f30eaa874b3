use std::{
    fmt::{self, Display},
    str::FromStr,
};

use thiserror::Error;

use crate::Error;

/// Which light sensor(s) the alarm watches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SensorSelector {
    Left,
    Right,
    /// Integer mean of both sensors.
    Both,
}

/// Whether thresholds are floors or ceilings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RangeMode {
    Minimum,
    Maximum,
}

impl RangeMode {
    /// Strict comparison: a value equal to the threshold never breaches.
    pub fn is_breach(self, value: f64, threshold: f64) -> bool {
        match self {
            RangeMode::Minimum => value < threshold,
            RangeMode::Maximum => value > threshold,
        }
    }
}

impl Display for SensorSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SensorSelector::Left => "left",
            SensorSelector::Right => "right",
            SensorSelector::Both => "both",
        })
    }
}

impl Display for RangeMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            RangeMode::Minimum => "minimum",
            RangeMode::Maximum => "maximum",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("expected one of {expected}, got {input:?}")]
pub struct ParseChoiceError {
    pub expected: &'static str,
    pub input: String,
}

impl FromStr for SensorSelector {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "l" | "left" => Ok(SensorSelector::Left),
            "r" | "right" => Ok(SensorSelector::Right),
            "b" | "both" => Ok(SensorSelector::Both),
            _ => Err(ParseChoiceError {
                expected: "left, right, both",
                input: s.to_owned(),
            }),
        }
    }
}

impl FromStr for RangeMode {
    type Err = ParseChoiceError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "i" | "min" | "minimum" => Ok(RangeMode::Minimum),
            "x" | "max" | "maximum" => Ok(RangeMode::Maximum),
            _ => Err(ParseChoiceError {
                expected: "minimum, maximum",
                input: s.to_owned(),
            }),
        }
    }
}

/// Alarm settings, filled in one at a time by the caller.
///
/// Every field must be set, and both thresholds must be finite, before
/// monitoring can start. A time budget of zero is a valid setting and allows
/// a single poll.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AlarmConfig {
    pub sensor: Option<SensorSelector>,
    pub range: Option<RangeMode>,
    pub light_threshold: Option<f64>,
    pub temperature_threshold_f: Option<f64>,
    pub time_budget_seconds: Option<u32>,
}

impl AlarmConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sensor(mut self, sensor: SensorSelector) -> Self {
        self.sensor = Some(sensor);
        self
    }

    pub fn range(mut self, range: RangeMode) -> Self {
        self.range = Some(range);
        self
    }

    pub fn light_threshold(mut self, threshold: f64) -> Self {
        self.light_threshold = Some(threshold);
        self
    }

    pub fn temperature_threshold_f(mut self, threshold: f64) -> Self {
        self.temperature_threshold_f = Some(threshold);
        self
    }

    pub fn time_budget_seconds(mut self, seconds: u32) -> Self {
        self.time_budget_seconds = Some(seconds);
        self
    }

    pub fn is_complete(&self) -> bool {
        self.armed().is_ok()
    }

    /// Check the configuration without touching a device.
    pub fn validate(&self) -> Result<(), Error> {
        self.armed().map(drop)
    }

    pub(super) fn armed(&self) -> Result<Armed, Error> {
        fn require<T>(value: Option<T>, missing: &'static str) -> Result<T, Error> {
            value.ok_or(Error::IncompleteConfiguration { missing })
        }

        fn finite(value: f64, threshold: &'static str) -> Result<f64, Error> {
            if value.is_finite() {
                Ok(value)
            } else {
                Err(Error::InvalidThreshold { threshold, value })
            }
        }

        let sensor = require(self.sensor, "sensors to monitor")?;
        let range = require(self.range, "range type")?;
        let light_threshold = require(self.light_threshold, "light threshold")?;
        let temperature_threshold_f =
            require(self.temperature_threshold_f, "temperature threshold")?;
        let time_budget_seconds = require(self.time_budget_seconds, "time to monitor")?;

        Ok(Armed {
            sensor,
            range,
            light_threshold: finite(light_threshold, "light threshold")?,
            temperature_threshold_f: finite(temperature_threshold_f, "temperature threshold")?,
            time_budget_seconds,
        })
    }
}

/// A fully populated [`AlarmConfig`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub(super) struct Armed {
    pub sensor: SensorSelector,
    pub range: RangeMode,
    pub light_threshold: f64,
    pub temperature_threshold_f: f64,
    pub time_budget_seconds: u32,
}
