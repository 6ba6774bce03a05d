use anyhow::Context;
use chrono::{DateTime, SecondsFormat, Utc};
use tracing::{debug, warn};
use url::Url;

use crate::{
    Config,
    decode::{self, Payload},
    error::{Error, Result},
    model::{Availability, Coordinates, Weather, WeatherAlert, WeatherQuery},
    token::{KeySource, TokenManager},
    transport::{HttpRequest, HttpResponse, HttpTransport, ReqwestTransport},
    vocabulary::Vocabulary,
};

pub const DEFAULT_BASE_URL: &str = "https://weatherkit.apple.com/api/v1/";
pub const DEFAULT_LANGUAGE: &str = "en";

/// Client for the WeatherKit REST API.
///
/// One request per call, no retries. Each call signs (or reuses) a developer
/// token, sends it through the transport and decodes the reply.
#[derive(Debug)]
pub struct WeatherKitClient {
    transport: Box<dyn HttpTransport>,
    tokens: TokenManager,
    base_url: Url,
    language: String,
    timezone: Option<String>,
}

impl WeatherKitClient {
    /// Client rooted at `base_url`, normally [`DEFAULT_BASE_URL`].
    pub fn new(transport: Box<dyn HttpTransport>, tokens: TokenManager, base_url: Url) -> Self {
        Self {
            transport,
            tokens,
            base_url: with_trailing_slash(base_url),
            language: DEFAULT_LANGUAGE.to_string(),
            timezone: None,
        }
    }

    /// Build the token manager and a `reqwest` transport from configuration.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let mut tokens = TokenManager::new(
            KeySource::path(&config.key_path),
            &config.key_id,
            &config.team_id,
            &config.bundle_id,
        )
        .with_context(|| format!("Failed to load WeatherKit key: {}", config.key_path.display()))?;

        if let Some(ttl) = config.token_ttl()? {
            tokens = tokens.with_ttl(ttl)?;
        }

        let base_url = match config.base_url()? {
            Some(url) => url,
            None => Url::parse(DEFAULT_BASE_URL).context("Invalid default base URL")?,
        };

        let mut client = Self::new(Box::new(ReqwestTransport::new()), tokens, base_url)
            .with_language(config.language.clone());
        if let Some(tz) = &config.timezone {
            client = client.with_timezone(tz.clone());
        }

        Ok(client)
    }

    pub fn with_base_url(mut self, base_url: Url) -> Self {
        self.base_url = with_trailing_slash(base_url);
        self
    }

    /// Default language for requests that do not name one.
    pub fn with_language(mut self, language: impl Into<String>) -> Self {
        self.language = language.into();
        self
    }

    /// Default timezone for requests that do not name one.
    pub fn with_timezone(mut self, timezone: impl Into<String>) -> Self {
        self.timezone = Some(timezone.into());
        self
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn tokens(&self) -> &TokenManager {
        &self.tokens
    }

    /// Current conditions and forecasts for a location.
    ///
    /// HTTP 204 yields an empty [`Weather`].
    pub async fn weather(&self, coordinates: Coordinates, query: &WeatherQuery) -> Result<Weather> {
        let language = query.language.as_deref().unwrap_or(&self.language);
        let mut url = self.endpoint(&[
            "weather",
            language,
            &coordinates.latitude().to_string(),
            &coordinates.longitude().to_string(),
        ])?;

        {
            let mut pairs = url.query_pairs_mut();
            if !query.data_sets.is_empty() {
                let sets: Vec<&str> = query.data_sets.iter().map(|d| d.symbol()).collect();
                pairs.append_pair("dataSets", &sets.join(","));
            }
            if let Some(tz) = query.timezone.as_deref().or(self.timezone.as_deref()) {
                pairs.append_pair("timezone", tz);
            }
            if let Some(country) = &query.country_code {
                pairs.append_pair("countryCode", country);
            }
            let times = [
                ("currentAsOf", query.current_as_of),
                ("dailyStart", query.daily_start),
                ("dailyEnd", query.daily_end),
                ("hourlyStart", query.hourly_start),
                ("hourlyEnd", query.hourly_end),
            ];
            for (name, value) in times {
                if let Some(value) = value {
                    pairs.append_pair(name, &timestamp(value));
                }
            }
        }
        drop_empty_query(&mut url);

        let response = self.get(url).await?;
        match expect_success(response)? {
            Some(body) => decode::parse(&body),
            None => Ok(Weather::default()),
        }
    }

    /// Full text of one alert. HTTP 204 yields `None`.
    pub async fn weather_alert(
        &self,
        alert_id: &str,
        language: Option<&str>,
    ) -> Result<Option<WeatherAlert>> {
        let language = language.unwrap_or(&self.language);
        let url = self.endpoint(&["weatherAlert", language, alert_id])?;

        let response = self.get(url).await?;
        expect_success(response)?
            .map(|body| decode::parse(&body))
            .transpose()
    }

    /// Data sets available at a location.
    ///
    /// Both HTTP 204 and 404 mean "nothing available" and yield an empty
    /// [`Availability`]; this is the only endpoint where 404 is not an error.
    pub async fn availability(
        &self,
        coordinates: Coordinates,
        country: Option<&str>,
    ) -> Result<Availability> {
        let mut url = self.endpoint(&[
            "availability",
            &coordinates.latitude().to_string(),
            &coordinates.longitude().to_string(),
        ])?;
        if let Some(country) = country {
            url.query_pairs_mut().append_pair("country", country);
        }

        let response = self.get(url).await?;
        if response.status == 404 {
            debug!("no WeatherKit coverage at {coordinates:?}");
            return Ok(Availability::default());
        }
        match expect_success(response)? {
            Some(body) => decode::parse(&body),
            None => Ok(Availability::default()),
        }
    }

    /// Decode a body fetched some other way with the same rules as the
    /// endpoint methods.
    pub fn decode<T: Payload>(&self, body: &[u8]) -> Result<T> {
        decode::parse(body)
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| Error::Request {
                message: format!("base URL cannot take a path: {}", self.base_url),
                source: None,
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get(&self, url: Url) -> Result<HttpResponse> {
        let token = self.tokens.current_token()?;
        let request = HttpRequest::get(url)
            .header("Authorization", format!("Bearer {token}"))
            .header("Accept", "application/json");

        debug!("GET {}", request.url);
        let url = request.url.clone();
        let response = self.transport.send(request).await.map_err(|e| {
            let (message, source) = e.into_parts();
            warn!("GET {url} failed: {message}");
            Error::Request { message, source }
        })?;
        debug!("GET {url} -> {}", response.status);

        Ok(response)
    }
}

/// Body of a successful response, `None` for 204.
fn expect_success(response: HttpResponse) -> Result<Option<Vec<u8>>> {
    let status = response.status;
    match status {
        204 => Ok(None),
        200..=299 => Ok(Some(response.body)),
        500..=599 => {
            let body = truncate_body(&response.body);
            warn!("WeatherKit server error {status}: {body}");
            Err(Error::Server { status, body })
        }
        _ => {
            let body = truncate_body(&response.body);
            warn!("WeatherKit request rejected with {status}: {body}");
            Err(Error::Client { status, body })
        }
    }
}

// Endpoint segments are appended below the base path.
fn with_trailing_slash(mut url: Url) -> Url {
    if !url.path().ends_with('/') {
        let path = format!("{}/", url.path());
        url.set_path(&path);
    }
    url
}

fn drop_empty_query(url: &mut Url) {
    if url.query() == Some("") {
        url.set_query(None);
    }
}

fn timestamp(value: DateTime<Utc>) -> String {
    value.to_rfc3339_opts(SecondsFormat::Secs, true)
}

fn truncate_body(body: &[u8]) -> String {
    const MAX: usize = 200;
    let text = String::from_utf8_lossy(body);
    match text.char_indices().nth(MAX) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.into_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncates_long_bodies_on_char_boundary() {
        let body = "é".repeat(300);
        let out = truncate_body(body.as_bytes());
        assert_eq!(out.chars().count(), 203);
        assert!(out.ends_with("..."));

        assert_eq!(truncate_body(b"short"), "short");
    }

    #[test]
    fn status_mapping() {
        assert!(matches!(expect_success(HttpResponse::new(204, "ignored")), Ok(None)));
        assert!(matches!(expect_success(HttpResponse::new(200, "{}")), Ok(Some(_))));
        assert!(matches!(
            expect_success(HttpResponse::new(401, "unauthorized")),
            Err(Error::Client { status: 401, .. })
        ));
        assert!(matches!(
            expect_success(HttpResponse::new(404, "")),
            Err(Error::Client { status: 404, .. })
        ));
        assert!(matches!(
            expect_success(HttpResponse::new(503, "")),
            Err(Error::Server { status: 503, .. })
        ));
    }

    #[test]
    fn base_url_gains_trailing_slash() {
        let url = with_trailing_slash(Url::parse("http://localhost:8080/proxy/v1").unwrap());
        assert_eq!(url.path(), "/proxy/v1/");

        let url = with_trailing_slash(Url::parse(DEFAULT_BASE_URL).unwrap());
        assert_eq!(url.as_str(), DEFAULT_BASE_URL);
    }

    #[test]
    fn timestamps_are_utc_seconds() {
        let t = DateTime::parse_from_rfc3339("2024-06-20T14:00:00.750+02:00")
            .unwrap()
            .with_timezone(&Utc);
        assert_eq!(timestamp(t), "2024-06-20T12:00:00Z");
    }
}
