use chrono::{DateTime, Utc};

use crate::error::{Error, Result};
use crate::model::DataSet;

/// A validated geographic position.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    latitude: f64,
    longitude: f64,
}

impl Coordinates {
    pub fn new(latitude: f64, longitude: f64) -> Result<Self> {
        Ok(Self {
            latitude: check_range("latitude", latitude, 90.0)?,
            longitude: check_range("longitude", longitude, 180.0)?,
        })
    }

    pub fn latitude(&self) -> f64 {
        self.latitude
    }

    pub fn longitude(&self) -> f64 {
        self.longitude
    }
}

impl TryFrom<(f64, f64)> for Coordinates {
    type Error = Error;

    fn try_from((latitude, longitude): (f64, f64)) -> Result<Self> {
        Self::new(latitude, longitude)
    }
}

fn check_range(name: &'static str, value: f64, limit: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(Error::MissingCoordinate { name });
    }
    if !(-limit..=limit).contains(&value) {
        return Err(Error::CoordinateOutOfRange {
            name,
            value,
            min: -limit,
            max: limit,
        });
    }
    Ok(value)
}

/// Options for the weather endpoint.
///
/// Unset language and timezone fall back to the client's defaults.
#[derive(Debug, Clone, PartialEq)]
pub struct WeatherQuery {
    pub data_sets: Vec<DataSet>,
    pub language: Option<String>,
    pub timezone: Option<String>,
    /// ISO 3166 alpha-2 code; required upstream for `weatherAlerts`.
    pub country_code: Option<String>,
    pub current_as_of: Option<DateTime<Utc>>,
    pub daily_start: Option<DateTime<Utc>>,
    pub daily_end: Option<DateTime<Utc>>,
    pub hourly_start: Option<DateTime<Utc>>,
    pub hourly_end: Option<DateTime<Utc>>,
}

impl Default for WeatherQuery {
    fn default() -> Self {
        Self {
            data_sets: vec![DataSet::CurrentWeather, DataSet::ForecastDaily, DataSet::ForecastHourly],
            language: None,
            timezone: None,
            country_code: None,
            current_as_of: None,
            daily_start: None,
            daily_end: None,
            hourly_start: None,
            hourly_end: None,
        }
    }
}

impl WeatherQuery {
    pub fn with_data_sets(mut self, data_sets: impl IntoIterator<Item = DataSet>) -> Self {
        self.data_sets = data_sets.into_iter().collect();
        self
    }

    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn with_country_code(mut self, country_code: impl Into<String>) -> Self {
        self.country_code = Some(country_code.into());
        self
    }

    pub fn with_daily_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.daily_start = Some(start);
        self.daily_end = Some(end);
        self
    }

    pub fn with_hourly_range(mut self, start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        self.hourly_start = Some(start);
        self.hourly_end = Some(end);
        self
    }
}
