//! Physical units and unit-tagged measurements.
//!
//! WeatherKit reports plain numbers; the decoder pairs each one with the
//! [`Unit`] implied by the payload's declared [`UnitSystem`] or by the field
//! itself. Nothing here converts implicitly. [`Measurement::convert_to`] is
//! the only way to change units and only works within one [`Quantity`].

use std::fmt;

use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::error::{Error, Result};

/// Kind of physical quantity a unit measures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter, strum::Display)]
#[serde(rename_all = "camelCase")]
#[strum(serialize_all = "lowercase")]
pub enum Quantity {
    Length,
    Speed,
    #[strum(serialize = "precipitation rate")]
    PrecipitationRate,
    Pressure,
    Temperature,
    Bearing,
    Percentage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, EnumIter)]
#[serde(rename_all = "camelCase")]
pub enum Unit {
    Millimeters,
    Centimeters,
    Meters,
    Kilometers,
    Inches,
    Feet,
    Miles,

    MetersPerSecond,
    KilometersPerHour,
    MilesPerHour,
    Knots,

    MillimetersPerHour,
    InchesPerHour,

    Millibars,
    Hectopascals,
    InchesOfMercury,

    Celsius,
    Fahrenheit,
    Kelvin,

    Degrees,

    /// A ratio in `0.0..=1.0`, the way WeatherKit reports humidity and cover.
    Fraction,
    Percent,
}

impl Unit {
    pub fn name(self) -> &'static str {
        match self {
            Unit::Millimeters => "millimeters",
            Unit::Centimeters => "centimeters",
            Unit::Meters => "meters",
            Unit::Kilometers => "kilometers",
            Unit::Inches => "inches",
            Unit::Feet => "feet",
            Unit::Miles => "miles",
            Unit::MetersPerSecond => "meters per second",
            Unit::KilometersPerHour => "kilometers per hour",
            Unit::MilesPerHour => "miles per hour",
            Unit::Knots => "knots",
            Unit::MillimetersPerHour => "millimeters per hour",
            Unit::InchesPerHour => "inches per hour",
            Unit::Millibars => "millibars",
            Unit::Hectopascals => "hectopascals",
            Unit::InchesOfMercury => "inches of mercury",
            Unit::Celsius => "degrees Celsius",
            Unit::Fahrenheit => "degrees Fahrenheit",
            Unit::Kelvin => "kelvin",
            Unit::Degrees => "degrees",
            Unit::Fraction => "fraction",
            Unit::Percent => "percent",
        }
    }

    pub fn abbreviation(self) -> &'static str {
        match self {
            Unit::Millimeters => "mm",
            Unit::Centimeters => "cm",
            Unit::Meters => "m",
            Unit::Kilometers => "km",
            Unit::Inches => "in",
            Unit::Feet => "ft",
            Unit::Miles => "mi",
            Unit::MetersPerSecond => "m/s",
            Unit::KilometersPerHour => "km/h",
            Unit::MilesPerHour => "mph",
            Unit::Knots => "kn",
            Unit::MillimetersPerHour => "mm/h",
            Unit::InchesPerHour => "in/h",
            Unit::Millibars => "mb",
            Unit::Hectopascals => "hPa",
            Unit::InchesOfMercury => "inHg",
            Unit::Celsius => "°C",
            Unit::Fahrenheit => "°F",
            Unit::Kelvin => "K",
            Unit::Degrees => "°",
            Unit::Fraction => "frac",
            Unit::Percent => "%",
        }
    }

    pub fn quantity(self) -> Quantity {
        match self {
            Unit::Millimeters
            | Unit::Centimeters
            | Unit::Meters
            | Unit::Kilometers
            | Unit::Inches
            | Unit::Feet
            | Unit::Miles => Quantity::Length,
            Unit::MetersPerSecond | Unit::KilometersPerHour | Unit::MilesPerHour | Unit::Knots => {
                Quantity::Speed
            }
            Unit::MillimetersPerHour | Unit::InchesPerHour => Quantity::PrecipitationRate,
            Unit::Millibars | Unit::Hectopascals | Unit::InchesOfMercury => Quantity::Pressure,
            Unit::Celsius | Unit::Fahrenheit | Unit::Kelvin => Quantity::Temperature,
            Unit::Degrees => Quantity::Bearing,
            Unit::Fraction | Unit::Percent => Quantity::Percentage,
        }
    }

    /// Units of the given quantity.
    pub fn of(quantity: Quantity) -> impl Iterator<Item = Unit> {
        Unit::iter().filter(move |u| u.quantity() == quantity)
    }

    // Value in the quantity's base unit (m, m/s, mm/h, hPa, K, °, fraction).
    fn to_base(self, value: f64) -> f64 {
        match self {
            Unit::Celsius => value + 273.15,
            Unit::Fahrenheit => (value - 32.0) * 5.0 / 9.0 + 273.15,
            _ => value * self.linear_factor(),
        }
    }

    fn out_of_base(self, value: f64) -> f64 {
        match self {
            Unit::Celsius => value - 273.15,
            Unit::Fahrenheit => (value - 273.15) * 9.0 / 5.0 + 32.0,
            _ => value / self.linear_factor(),
        }
    }

    fn linear_factor(self) -> f64 {
        match self {
            Unit::Millimeters => 0.001,
            Unit::Centimeters => 0.01,
            Unit::Meters => 1.0,
            Unit::Kilometers => 1000.0,
            Unit::Inches => 0.0254,
            Unit::Feet => 0.3048,
            Unit::Miles => 1609.344,
            Unit::MetersPerSecond => 1.0,
            Unit::KilometersPerHour => 1.0 / 3.6,
            Unit::MilesPerHour => 0.44704,
            Unit::Knots => 1852.0 / 3600.0,
            Unit::MillimetersPerHour => 1.0,
            Unit::InchesPerHour => 25.4,
            Unit::Millibars | Unit::Hectopascals => 1.0,
            Unit::InchesOfMercury => 33.863_886_666_7,
            Unit::Kelvin | Unit::Degrees | Unit::Fraction => 1.0,
            Unit::Percent => 0.01,
            // Affine scales are handled in to_base/out_of_base.
            Unit::Celsius | Unit::Fahrenheit => 1.0,
        }
    }
}

impl fmt::Display for Unit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.abbreviation())
    }
}

/// Unit system declared by a WeatherKit payload (`metadata.units`).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitSystem {
    #[default]
    #[serde(rename = "m")]
    Metric,
    #[serde(rename = "e")]
    Imperial,
}

impl UnitSystem {
    pub fn unit_for(self, quantity: Quantity) -> Unit {
        match (self, quantity) {
            (UnitSystem::Metric, Quantity::Length) => Unit::Meters,
            (UnitSystem::Imperial, Quantity::Length) => Unit::Feet,
            (UnitSystem::Metric, Quantity::Speed) => Unit::KilometersPerHour,
            (UnitSystem::Imperial, Quantity::Speed) => Unit::MilesPerHour,
            (UnitSystem::Metric, Quantity::PrecipitationRate) => Unit::MillimetersPerHour,
            (UnitSystem::Imperial, Quantity::PrecipitationRate) => Unit::InchesPerHour,
            (UnitSystem::Metric, Quantity::Pressure) => Unit::Millibars,
            (UnitSystem::Imperial, Quantity::Pressure) => Unit::InchesOfMercury,
            (UnitSystem::Metric, Quantity::Temperature) => Unit::Celsius,
            (UnitSystem::Imperial, Quantity::Temperature) => Unit::Fahrenheit,
            (_, Quantity::Bearing) => Unit::Degrees,
            (_, Quantity::Percentage) => Unit::Fraction,
        }
    }

    /// Rain and snow amounts use a finer length unit than visibility.
    pub fn precipitation_unit(self) -> Unit {
        match self {
            UnitSystem::Metric => Unit::Millimeters,
            UnitSystem::Imperial => Unit::Inches,
        }
    }
}

/// A numeric reading paired with its unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Measurement {
    value: f64,
    unit: Unit,
}

impl Measurement {
    pub const fn new(value: f64, unit: Unit) -> Self {
        Self { value, unit }
    }

    pub fn value(&self) -> f64 {
        self.value
    }

    pub fn unit(&self) -> Unit {
        self.unit
    }

    /// Express this measurement in another unit of the same quantity.
    pub fn convert_to(&self, target: Unit) -> Result<Measurement> {
        if self.unit.quantity() != target.quantity() {
            return Err(Error::UnsupportedUnitConversion {
                from: self.unit,
                to: target,
            });
        }
        if self.unit == target {
            return Ok(*self);
        }

        Ok(Measurement::new(target.out_of_base(self.unit.to_base(self.value)), target))
    }
}

impl fmt::Display for Measurement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit {
            Unit::Degrees | Unit::Percent | Unit::Celsius | Unit::Fahrenheit => {
                write!(f, "{}{}", self.value, self.unit)
            }
            _ => write!(f, "{} {}", self.value, self.unit),
        }
    }
}
