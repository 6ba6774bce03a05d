use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::{Payload, UnitAttach, alert::WkAlertSummary};
use crate::model::{
    ConditionCode, CurrentWeather, DailyForecast, DayPartForecast, DayWeatherConditions,
    HourWeatherConditions, HourlyForecast, Metadata, MoonPhase, PrecipitationType, PressureTrend,
    Weather, WeatherAlertCollection,
};
use crate::units::UnitSystem;
use crate::vocabulary::Code;

impl Payload for Weather {
    fn from_value(value: Value) -> serde_json::Result<Self> {
        let wire: WkWeather = serde_json::from_value(value)?;

        Ok(Weather {
            current_weather: wire.current_weather.map(WkCurrentWeather::into_model),
            forecast_daily: wire.forecast_daily.map(WkDailyForecast::into_model),
            forecast_hourly: wire.forecast_hourly.map(WkHourlyForecast::into_model),
            weather_alerts: wire.weather_alerts.map(WkAlertCollection::into_model),
        })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WkWeather {
    current_weather: Option<WkCurrentWeather>,
    forecast_daily: Option<WkDailyForecast>,
    forecast_hourly: Option<WkHourlyForecast>,
    weather_alerts: Option<WkAlertCollection>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WkMetadata {
    #[serde(rename = "attributionURL")]
    attribution_url: Option<String>,
    expire_time: DateTime<Utc>,
    language: Option<String>,
    latitude: f64,
    longitude: f64,
    provider_name: Option<String>,
    read_time: Option<DateTime<Utc>>,
    reported_time: Option<DateTime<Utc>>,
    units: Option<UnitSystem>,
    version: Option<u32>,
}

impl WkMetadata {
    fn into_model(self) -> Metadata {
        Metadata {
            attribution_url: self.attribution_url,
            expire_time: self.expire_time,
            language: self.language,
            latitude: self.latitude,
            longitude: self.longitude,
            provider_name: self.provider_name,
            read_time: self.read_time,
            reported_time: self.reported_time,
            units: self.units.unwrap_or_default(),
            version: self.version,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WkCurrentWeather {
    metadata: WkMetadata,
    as_of: DateTime<Utc>,
    cloud_cover: Option<f64>,
    condition_code: Code<ConditionCode>,
    daylight: Option<bool>,
    humidity: f64,
    precipitation_intensity: Option<f64>,
    pressure: f64,
    pressure_trend: Code<PressureTrend>,
    temperature: f64,
    temperature_apparent: f64,
    temperature_dew_point: f64,
    uv_index: u8,
    visibility: f64,
    wind_direction: Option<f64>,
    wind_gust: Option<f64>,
    wind_speed: f64,
}

impl WkCurrentWeather {
    fn into_model(self) -> CurrentWeather {
        let metadata = self.metadata.into_model();
        let u = UnitAttach(metadata.units);

        CurrentWeather {
            as_of: self.as_of,
            cloud_cover: self.cloud_cover.map(|v| u.fraction(v)),
            condition_code: self.condition_code,
            daylight: self.daylight,
            humidity: u.fraction(self.humidity),
            precipitation_intensity: self.precipitation_intensity.map(|v| u.precipitation_rate(v)),
            pressure: u.pressure(self.pressure),
            pressure_trend: self.pressure_trend,
            temperature: u.temperature(self.temperature),
            temperature_apparent: u.temperature(self.temperature_apparent),
            temperature_dew_point: u.temperature(self.temperature_dew_point),
            uv_index: self.uv_index,
            visibility: u.distance(self.visibility),
            wind_direction: self.wind_direction.map(|v| u.bearing(v)),
            wind_gust: self.wind_gust.map(|v| u.speed(v)),
            wind_speed: u.speed(self.wind_speed),
            metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WkDailyForecast {
    metadata: WkMetadata,
    days: Vec<WkDay>,
    #[serde(rename = "learnMoreURL")]
    learn_more_url: Option<String>,
}

impl WkDailyForecast {
    fn into_model(self) -> DailyForecast {
        let metadata = self.metadata.into_model();
        let u = UnitAttach(metadata.units);

        DailyForecast {
            days: self.days.into_iter().map(|d| d.into_model(u)).collect(),
            learn_more_url: self.learn_more_url,
            metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WkDay {
    condition_code: Code<ConditionCode>,
    forecast_start: DateTime<Utc>,
    forecast_end: DateTime<Utc>,
    max_uv_index: u8,
    moon_phase: Code<MoonPhase>,
    moonrise: Option<DateTime<Utc>>,
    moonset: Option<DateTime<Utc>>,
    precipitation_amount: f64,
    precipitation_chance: f64,
    precipitation_type: Code<PrecipitationType>,
    snowfall_amount: f64,
    solar_noon: Option<DateTime<Utc>>,
    sunrise: Option<DateTime<Utc>>,
    sunset: Option<DateTime<Utc>>,
    temperature_max: f64,
    temperature_min: f64,
    daytime_forecast: Option<WkDayPart>,
    overnight_forecast: Option<WkDayPart>,
}

impl WkDay {
    fn into_model(self, u: UnitAttach) -> DayWeatherConditions {
        DayWeatherConditions {
            condition_code: self.condition_code,
            forecast_start: self.forecast_start,
            forecast_end: self.forecast_end,
            max_uv_index: self.max_uv_index,
            moon_phase: self.moon_phase,
            moonrise: self.moonrise,
            moonset: self.moonset,
            precipitation_amount: u.precipitation(self.precipitation_amount),
            precipitation_chance: u.fraction(self.precipitation_chance),
            precipitation_type: self.precipitation_type,
            snowfall_amount: u.precipitation(self.snowfall_amount),
            solar_noon: self.solar_noon,
            sunrise: self.sunrise,
            sunset: self.sunset,
            temperature_max: u.temperature(self.temperature_max),
            temperature_min: u.temperature(self.temperature_min),
            daytime_forecast: self.daytime_forecast.map(|p| p.into_model(u)),
            overnight_forecast: self.overnight_forecast.map(|p| p.into_model(u)),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WkDayPart {
    forecast_start: DateTime<Utc>,
    forecast_end: DateTime<Utc>,
    cloud_cover: f64,
    condition_code: Code<ConditionCode>,
    humidity: f64,
    precipitation_amount: f64,
    precipitation_chance: f64,
    precipitation_type: Code<PrecipitationType>,
    snowfall_amount: f64,
    wind_direction: Option<f64>,
    wind_speed: f64,
}

impl WkDayPart {
    fn into_model(self, u: UnitAttach) -> DayPartForecast {
        DayPartForecast {
            forecast_start: self.forecast_start,
            forecast_end: self.forecast_end,
            cloud_cover: u.fraction(self.cloud_cover),
            condition_code: self.condition_code,
            humidity: u.fraction(self.humidity),
            precipitation_amount: u.precipitation(self.precipitation_amount),
            precipitation_chance: u.fraction(self.precipitation_chance),
            precipitation_type: self.precipitation_type,
            snowfall_amount: u.precipitation(self.snowfall_amount),
            wind_direction: self.wind_direction.map(|v| u.bearing(v)),
            wind_speed: u.speed(self.wind_speed),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WkHourlyForecast {
    metadata: WkMetadata,
    hours: Vec<WkHour>,
}

impl WkHourlyForecast {
    fn into_model(self) -> HourlyForecast {
        let metadata = self.metadata.into_model();
        let u = UnitAttach(metadata.units);

        HourlyForecast {
            hours: self.hours.into_iter().map(|h| h.into_model(u)).collect(),
            metadata,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WkHour {
    forecast_start: DateTime<Utc>,
    cloud_cover: f64,
    condition_code: Code<ConditionCode>,
    daylight: Option<bool>,
    humidity: f64,
    precipitation_amount: Option<f64>,
    precipitation_chance: f64,
    precipitation_type: Code<PrecipitationType>,
    pressure: f64,
    pressure_trend: Option<Code<PressureTrend>>,
    temperature: f64,
    temperature_apparent: f64,
    temperature_dew_point: Option<f64>,
    uv_index: u8,
    visibility: f64,
    wind_direction: Option<f64>,
    wind_gust: Option<f64>,
    wind_speed: f64,
}

impl WkHour {
    fn into_model(self, u: UnitAttach) -> HourWeatherConditions {
        HourWeatherConditions {
            forecast_start: self.forecast_start,
            cloud_cover: u.fraction(self.cloud_cover),
            condition_code: self.condition_code,
            daylight: self.daylight,
            humidity: u.fraction(self.humidity),
            precipitation_amount: self.precipitation_amount.map(|v| u.precipitation(v)),
            precipitation_chance: u.fraction(self.precipitation_chance),
            precipitation_type: self.precipitation_type,
            pressure: u.pressure(self.pressure),
            pressure_trend: self.pressure_trend,
            temperature: u.temperature(self.temperature),
            temperature_apparent: u.temperature(self.temperature_apparent),
            temperature_dew_point: self.temperature_dew_point.map(|v| u.temperature(v)),
            uv_index: self.uv_index,
            visibility: u.distance(self.visibility),
            wind_direction: self.wind_direction.map(|v| u.bearing(v)),
            wind_gust: self.wind_gust.map(|v| u.speed(v)),
            wind_speed: u.speed(self.wind_speed),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WkAlertCollection {
    metadata: Option<WkMetadata>,
    #[serde(default)]
    alerts: Vec<WkAlertSummary>,
    details_url: Option<String>,
}

impl WkAlertCollection {
    fn into_model(self) -> WeatherAlertCollection {
        WeatherAlertCollection {
            metadata: self.metadata.map(WkMetadata::into_model),
            alerts: self.alerts.into_iter().map(WkAlertSummary::into_model).collect(),
            details_url: self.details_url,
        }
    }
}
