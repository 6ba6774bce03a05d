//! Request options and typed response DTOs.

mod alert;
mod condition;
mod request;
mod weather;

pub use alert::{AlertMessage, Availability, WeatherAlert, WeatherAlertSummary};
pub use condition::{
    AlertResponse, Certainty, ConditionCode, DataSet, MoonPhase, PrecipitationType, PressureTrend,
    Severity, Urgency,
};
pub use request::{Coordinates, WeatherQuery};
pub use weather::{
    CurrentWeather, DailyForecast, DayPartForecast, DayWeatherConditions, HourWeatherConditions,
    HourlyForecast, Metadata, Weather, WeatherAlertCollection,
};
