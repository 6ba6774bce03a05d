use chrono::{DateTime, Utc};
use serde::Deserialize;
use serde_json::Value;

use super::Payload;
use crate::model::{
    AlertMessage, AlertResponse, Availability, Certainty, DataSet, Severity, Urgency, WeatherAlert,
    WeatherAlertSummary,
};
use crate::vocabulary::Code;

impl Payload for WeatherAlert {
    fn from_value(value: Value) -> serde_json::Result<Self> {
        let wire: WkAlert = serde_json::from_value(value)?;
        Ok(wire.into_model())
    }
}

impl Payload for Availability {
    fn from_value(value: Value) -> serde_json::Result<Self> {
        // Upstream answers with a bare array of data set names.
        let data_sets: Vec<Code<DataSet>> = serde_json::from_value(value)?;
        Ok(Availability { data_sets })
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct WkAlertSummary {
    id: String,
    area_id: Option<String>,
    area_name: Option<String>,
    certainty: Option<Code<Certainty>>,
    country_code: String,
    description: String,
    details_url: Option<String>,
    effective_time: DateTime<Utc>,
    event_end_time: Option<DateTime<Utc>>,
    event_onset_time: Option<DateTime<Utc>>,
    expire_time: DateTime<Utc>,
    issued_time: DateTime<Utc>,
    precedence: Option<i32>,
    #[serde(default)]
    responses: Vec<Code<AlertResponse>>,
    severity: Code<Severity>,
    source: String,
    urgency: Option<Code<Urgency>>,
}

impl WkAlertSummary {
    pub(super) fn into_model(self) -> WeatherAlertSummary {
        WeatherAlertSummary {
            id: self.id,
            area_id: self.area_id,
            area_name: self.area_name,
            certainty: self.certainty,
            country_code: self.country_code,
            description: self.description,
            details_url: self.details_url,
            effective_time: self.effective_time,
            event_end_time: self.event_end_time,
            event_onset_time: self.event_onset_time,
            expire_time: self.expire_time,
            issued_time: self.issued_time,
            precedence: self.precedence,
            responses: self.responses,
            severity: self.severity,
            source: self.source,
            urgency: self.urgency,
        }
    }
}

#[derive(Debug, Deserialize)]
struct WkAlert {
    #[serde(flatten)]
    summary: WkAlertSummary,
    #[serde(default)]
    messages: Vec<WkAlertMessage>,
}

#[derive(Debug, Deserialize)]
struct WkAlertMessage {
    language: Option<String>,
    text: String,
}

impl WkAlert {
    fn into_model(self) -> WeatherAlert {
        WeatherAlert {
            summary: self.summary.into_model(),
            messages: self
                .messages
                .into_iter()
                .map(|m| AlertMessage {
                    language: m.language,
                    text: m.text,
                })
                .collect(),
        }
    }
}
