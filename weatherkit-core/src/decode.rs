//! Decoding of WeatherKit response bodies into typed DTOs.
//!
//! Parsing runs in two passes: bytes to a JSON tree, then tree to wire
//! structs. The first pass reports `JsonDecodeFailed`, the second
//! `MalformedPayload`, so callers can tell a broken body from an
//! unexpected shape. Wire structs mirror upstream field names and are
//! private; each is mapped into its DTO with units attached.

use serde_json::Value;

use crate::error::{Error, Result};
use crate::units::{Measurement, Quantity, Unit, UnitSystem};

mod alert;
mod weather;

/// A DTO that can be built from a WeatherKit JSON document.
pub trait Payload: Sized {
    fn from_value(value: Value) -> serde_json::Result<Self>;
}

/// Decode `bytes` into the requested DTO.
pub fn parse<T: Payload>(bytes: &[u8]) -> Result<T> {
    let value: Value = serde_json::from_slice(bytes).map_err(Error::JsonDecodeFailed)?;

    T::from_value(value).map_err(|e| Error::MalformedPayload {
        message: e.to_string(),
        source: Some(e),
    })
}

/// Attaches units to raw numbers for one payload's unit system.
#[derive(Debug, Clone, Copy)]
struct UnitAttach(UnitSystem);

impl UnitAttach {
    fn quantity(self, value: f64, quantity: Quantity) -> Measurement {
        Measurement::new(value, self.0.unit_for(quantity))
    }

    fn temperature(self, value: f64) -> Measurement {
        self.quantity(value, Quantity::Temperature)
    }

    fn speed(self, value: f64) -> Measurement {
        self.quantity(value, Quantity::Speed)
    }

    fn pressure(self, value: f64) -> Measurement {
        self.quantity(value, Quantity::Pressure)
    }

    fn distance(self, value: f64) -> Measurement {
        self.quantity(value, Quantity::Length)
    }

    fn precipitation(self, value: f64) -> Measurement {
        Measurement::new(value, self.0.precipitation_unit())
    }

    fn precipitation_rate(self, value: f64) -> Measurement {
        self.quantity(value, Quantity::PrecipitationRate)
    }

    fn fraction(self, value: f64) -> Measurement {
        Measurement::new(value, Unit::Fraction)
    }

    fn bearing(self, value: f64) -> Measurement {
        Measurement::new(value, Unit::Degrees)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Availability, ConditionCode, DataSet, PressureTrend, Weather, WeatherAlert};

    const WEATHER: &str = include_str!("../tests/fixtures/weather.json");
    const ALERT: &str = include_str!("../tests/fixtures/weather_alert.json");

    #[test]
    fn rejects_non_json() {
        let err = parse::<Weather>(b"This is not JSON.").unwrap_err();
        assert!(matches!(err, Error::JsonDecodeFailed(_)), "got {err:?}");

        let err = parse::<Availability>(b"").unwrap_err();
        assert!(matches!(err, Error::JsonDecodeFailed(_)), "got {err:?}");

        let err = parse::<Weather>(b"{\"currentWeather\": {").unwrap_err();
        assert!(matches!(err, Error::JsonDecodeFailed(_)), "got {err:?}");
    }

    #[test]
    fn decodes_full_weather_document() {
        let weather: Weather = parse(WEATHER.as_bytes()).unwrap();

        let current = weather.current_weather.as_ref().expect("current weather");
        assert_eq!(current.condition_code.value(), Some(ConditionCode::MostlyClear));
        assert_eq!(current.temperature, Measurement::new(21.5, Unit::Celsius));
        assert_eq!(current.wind_speed, Measurement::new(14.2, Unit::KilometersPerHour));
        assert_eq!(current.pressure, Measurement::new(1012.3, Unit::Millibars));
        assert_eq!(current.humidity, Measurement::new(0.61, Unit::Fraction));
        assert_eq!(current.visibility.unit(), Unit::Meters);
        assert_eq!(current.wind_direction, Some(Measurement::new(212.0, Unit::Degrees)));
        assert_eq!(current.pressure_trend.value(), Some(PressureTrend::Falling));
        assert_eq!(
            current.precipitation_intensity,
            Some(Measurement::new(0.0, Unit::MillimetersPerHour))
        );
        assert_eq!(current.metadata.units, UnitSystem::Metric);
        // Absent optional field
        assert_eq!(current.wind_gust, None);

        let daily = weather.forecast_daily.as_ref().expect("daily forecast");
        assert_eq!(daily.days.len(), 2);
        let today = &daily.days[0];
        assert_eq!(today.precipitation_amount, Measurement::new(1.4, Unit::Millimeters));
        assert!(today.daytime_forecast.is_some());
        assert!(daily.days[1].daytime_forecast.is_none());
        assert!(daily.days[1].sunrise.is_none());

        let hourly = weather.forecast_hourly.as_ref().expect("hourly forecast");
        assert_eq!(hourly.hours.len(), 2);
        assert_eq!(hourly.hours[1].precipitation_amount, None);

        let alerts = weather.weather_alerts.as_ref().expect("alerts");
        assert_eq!(alerts.alerts.len(), 1);
        assert!(alerts.metadata.is_none());
    }

    #[test]
    fn unknown_vocabulary_does_not_fail_decoding() {
        let weather: Weather = parse(WEATHER.as_bytes()).unwrap();
        let hourly = weather.forecast_hourly.unwrap();

        let unknown = &hourly.hours[1].condition_code;
        assert_eq!(unknown.raw(), "VolcanicAsh");
        assert_eq!(unknown.value(), None);
        assert!(matches!(
            unknown.strict(),
            Err(Error::ValueNotFound { enum_name: "ConditionCode", .. })
        ));
    }

    #[test]
    fn missing_data_sets_decode_as_none() {
        let weather: Weather = parse(b"{}").unwrap();
        assert!(weather.is_empty());
        assert_eq!(weather, Weather::default());
    }

    #[test]
    fn missing_required_field_is_malformed() {
        let mut doc: Value = serde_json::from_str(WEATHER).unwrap();
        doc["currentWeather"]
            .as_object_mut()
            .unwrap()
            .remove("temperature");
        let bytes = serde_json::to_vec(&doc).unwrap();

        let err = parse::<Weather>(&bytes).unwrap_err();
        match err {
            Error::MalformedPayload { message, .. } => assert!(message.contains("temperature")),
            other => panic!("expected MalformedPayload, got {other:?}"),
        }
    }

    #[test]
    fn wrong_type_is_malformed() {
        let err = parse::<Availability>(b"{\"dataSets\": 3}").unwrap_err();
        assert!(matches!(err, Error::MalformedPayload { .. }), "got {err:?}");
    }

    #[test]
    fn imperial_payload_gets_imperial_units() {
        let mut doc: Value = serde_json::from_str(WEATHER).unwrap();
        doc["currentWeather"]["metadata"]["units"] = Value::from("e");
        let bytes = serde_json::to_vec(&doc).unwrap();

        let weather: Weather = parse(&bytes).unwrap();
        let current = weather.current_weather.unwrap();
        // Same number, different unit: nothing is converted.
        assert_eq!(current.temperature, Measurement::new(21.5, Unit::Fahrenheit));
        assert_eq!(current.wind_speed.unit(), Unit::MilesPerHour);
        assert_eq!(current.pressure.unit(), Unit::InchesOfMercury);
        assert_eq!(current.precipitation_intensity.unwrap().unit(), Unit::InchesPerHour);
    }

    #[test]
    fn decodes_availability() {
        let availability: Availability =
            parse(br#"["currentWeather","forecastDaily","forecastMonthly"]"#).unwrap();
        assert_eq!(availability.data_sets.len(), 3);
        assert_eq!(availability.known(), vec![DataSet::CurrentWeather, DataSet::ForecastDaily]);
    }

    #[test]
    fn decodes_alert_detail() {
        let alert: WeatherAlert = parse(ALERT.as_bytes()).unwrap();
        assert_eq!(alert.summary.id, "2d4c5c2e-5d4f-4d7c-9b2a-8f2e1c0a9b7d");
        assert_eq!(alert.messages.len(), 2);
        assert!(alert.message("es").unwrap().text.starts_with("AVISO"));
        assert!(alert.message("fr").unwrap().text.starts_with("...FLOOD"));
        assert_eq!(alert.summary.responses.len(), 2);
    }

    #[test]
    fn alert_detail_carries_the_listed_summary() {
        let weather: Weather = parse(WEATHER.as_bytes()).unwrap();
        let listed = &weather.weather_alerts.as_ref().unwrap().alerts[0];

        let doc: Value = serde_json::from_str(WEATHER).unwrap();
        let mut detail = doc["weatherAlerts"]["alerts"][0].clone();
        detail["messages"] = serde_json::json!([{ "language": "en", "text": "Take care." }]);

        let alert: WeatherAlert = parse(&serde_json::to_vec(&detail).unwrap()).unwrap();
        assert_eq!(&alert.summary, listed);
        assert_eq!(alert.message("en").unwrap().text, "Take care.");

        detail.as_object_mut().unwrap().remove("severity");
        let err = parse::<WeatherAlert>(&serde_json::to_vec(&detail).unwrap()).unwrap_err();
        assert!(matches!(err, Error::MalformedPayload { .. }), "got {err:?}");
    }

    #[test]
    fn decoding_is_deterministic() {
        let a: Weather = parse(WEATHER.as_bytes()).unwrap();
        let b: Weather = parse(WEATHER.as_bytes()).unwrap();
        assert_eq!(a, b);
    }
}
