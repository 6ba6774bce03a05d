use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{ConditionCode, MoonPhase, PrecipitationType, PressureTrend, WeatherAlertSummary};
use crate::units::{Measurement, UnitSystem};
use crate::vocabulary::Code;

/// Provenance shared by every WeatherKit data set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metadata {
    pub attribution_url: Option<String>,
    pub expire_time: DateTime<Utc>,
    pub language: Option<String>,
    pub latitude: f64,
    pub longitude: f64,
    pub provider_name: Option<String>,
    pub read_time: Option<DateTime<Utc>>,
    pub reported_time: Option<DateTime<Utc>>,
    pub units: UnitSystem,
    pub version: Option<u32>,
}

/// Response of the weather endpoint. Only requested data sets are present.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Weather {
    pub current_weather: Option<CurrentWeather>,
    pub forecast_daily: Option<DailyForecast>,
    pub forecast_hourly: Option<HourlyForecast>,
    pub weather_alerts: Option<WeatherAlertCollection>,
}

impl Weather {
    pub fn is_empty(&self) -> bool {
        self.current_weather.is_none()
            && self.forecast_daily.is_none()
            && self.forecast_hourly.is_none()
            && self.weather_alerts.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CurrentWeather {
    pub metadata: Metadata,
    pub as_of: DateTime<Utc>,
    pub cloud_cover: Option<Measurement>,
    pub condition_code: Code<ConditionCode>,
    pub daylight: Option<bool>,
    pub humidity: Measurement,
    pub precipitation_intensity: Option<Measurement>,
    pub pressure: Measurement,
    pub pressure_trend: Code<PressureTrend>,
    pub temperature: Measurement,
    pub temperature_apparent: Measurement,
    pub temperature_dew_point: Measurement,
    pub uv_index: u8,
    pub visibility: Measurement,
    pub wind_direction: Option<Measurement>,
    pub wind_gust: Option<Measurement>,
    pub wind_speed: Measurement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DailyForecast {
    pub metadata: Metadata,
    pub days: Vec<DayWeatherConditions>,
    pub learn_more_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayWeatherConditions {
    pub condition_code: Code<ConditionCode>,
    pub forecast_start: DateTime<Utc>,
    pub forecast_end: DateTime<Utc>,
    pub max_uv_index: u8,
    pub moon_phase: Code<MoonPhase>,
    pub moonrise: Option<DateTime<Utc>>,
    pub moonset: Option<DateTime<Utc>>,
    pub precipitation_amount: Measurement,
    pub precipitation_chance: Measurement,
    pub precipitation_type: Code<PrecipitationType>,
    pub snowfall_amount: Measurement,
    pub solar_noon: Option<DateTime<Utc>>,
    pub sunrise: Option<DateTime<Utc>>,
    pub sunset: Option<DateTime<Utc>>,
    pub temperature_max: Measurement,
    pub temperature_min: Measurement,
    pub daytime_forecast: Option<DayPartForecast>,
    pub overnight_forecast: Option<DayPartForecast>,
}

/// Summary for the daytime (7:00–19:00) or overnight part of a day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DayPartForecast {
    pub forecast_start: DateTime<Utc>,
    pub forecast_end: DateTime<Utc>,
    pub cloud_cover: Measurement,
    pub condition_code: Code<ConditionCode>,
    pub humidity: Measurement,
    pub precipitation_amount: Measurement,
    pub precipitation_chance: Measurement,
    pub precipitation_type: Code<PrecipitationType>,
    pub snowfall_amount: Measurement,
    pub wind_direction: Option<Measurement>,
    pub wind_speed: Measurement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourlyForecast {
    pub metadata: Metadata,
    pub hours: Vec<HourWeatherConditions>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HourWeatherConditions {
    pub forecast_start: DateTime<Utc>,
    pub cloud_cover: Measurement,
    pub condition_code: Code<ConditionCode>,
    pub daylight: Option<bool>,
    pub humidity: Measurement,
    pub precipitation_amount: Option<Measurement>,
    pub precipitation_chance: Measurement,
    pub precipitation_type: Code<PrecipitationType>,
    pub pressure: Measurement,
    pub pressure_trend: Option<Code<PressureTrend>>,
    pub temperature: Measurement,
    pub temperature_apparent: Measurement,
    pub temperature_dew_point: Option<Measurement>,
    pub uv_index: u8,
    pub visibility: Measurement,
    pub wind_direction: Option<Measurement>,
    pub wind_gust: Option<Measurement>,
    pub wind_speed: Measurement,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlertCollection {
    pub metadata: Option<Metadata>,
    pub alerts: Vec<WeatherAlertSummary>,
    pub details_url: Option<String>,
}
