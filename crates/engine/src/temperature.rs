use std::fmt::{self, Display};

/// Convert a Celsius reading the way the robot's readings are reported.
pub fn celsius_to_fahrenheit(celsius: f64) -> f64 {
    celsius / 5.0 * 9.0 + 32.0
}

/// A temperature, stored in degrees Fahrenheit.
#[derive(Debug, PartialEq, PartialOrd, Clone, Copy, Default)]
pub struct Temperature {
    fahrenheit: f64,
}

impl Temperature {
    pub fn from_celsius(celsius: f64) -> Self {
        Self::from_fahrenheit(celsius_to_fahrenheit(celsius))
    }

    pub const fn from_fahrenheit(fahrenheit: f64) -> Self {
        Self { fahrenheit }
    }
}

impl Temperature {
    pub const fn fahrenheit(&self) -> f64 {
        self.fahrenheit
    }

    pub fn celsius(&self) -> f64 {
        (self.fahrenheit - 32.0) / 9.0 * 5.0
    }
}

impl Display for Temperature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fahrenheit = self.fahrenheit;

        write!(f, "{fahrenheit:.1}°F")
    }
}
