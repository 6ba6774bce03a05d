use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::model::{AlertResponse, Certainty, DataSet, Severity, Urgency};
use crate::vocabulary::Code;

/// An alert as listed inside the weather response. The detail endpoint
/// returns the same fields plus the message text.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlertSummary {
    pub id: String,
    pub area_id: Option<String>,
    pub area_name: Option<String>,
    pub certainty: Option<Code<Certainty>>,
    pub country_code: String,
    pub description: String,
    pub details_url: Option<String>,
    pub effective_time: DateTime<Utc>,
    pub event_end_time: Option<DateTime<Utc>>,
    pub event_onset_time: Option<DateTime<Utc>>,
    pub expire_time: DateTime<Utc>,
    pub issued_time: DateTime<Utc>,
    pub precedence: Option<i32>,
    pub responses: Vec<Code<AlertResponse>>,
    pub severity: Code<Severity>,
    pub source: String,
    pub urgency: Option<Code<Urgency>>,
}

/// Full text of an alert, from the alert detail endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WeatherAlert {
    #[serde(flatten)]
    pub summary: WeatherAlertSummary,
    pub messages: Vec<AlertMessage>,
}

impl WeatherAlert {
    /// First message in `language`, falling back to the first message.
    pub fn message(&self, language: &str) -> Option<&AlertMessage> {
        self.messages
            .iter()
            .find(|m| m.language.as_deref() == Some(language))
            .or_else(|| self.messages.first())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AlertMessage {
    pub language: Option<String>,
    pub text: String,
}

/// Data sets WeatherKit can serve for a location.
///
/// Empty when upstream reports no coverage (including HTTP 404/204).
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Availability {
    pub data_sets: Vec<Code<DataSet>>,
}

impl Availability {
    pub fn is_available(&self, data_set: DataSet) -> bool {
        self.data_sets.iter().any(|code| code.value() == Some(data_set))
    }

    pub fn is_empty(&self) -> bool {
        self.data_sets.is_empty()
    }

    /// Known data sets, skipping symbols this crate does not recognize.
    pub fn known(&self) -> Vec<DataSet> {
        self.data_sets.iter().filter_map(Code::value).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_queries() {
        let availability = Availability {
            data_sets: vec![
                DataSet::CurrentWeather.into(),
                Code::new("forecastMonthly"),
                DataSet::WeatherAlerts.into(),
            ],
        };

        assert!(availability.is_available(DataSet::CurrentWeather));
        assert!(!availability.is_available(DataSet::ForecastHourly));
        assert_eq!(availability.known(), vec![DataSet::CurrentWeather, DataSet::WeatherAlerts]);
        assert!(Availability::default().is_empty());
    }
}
