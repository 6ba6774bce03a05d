//! Developer token for WeatherKit: an ES256-signed JWT built from the
//! developer account's private key.
//!
//! [`TokenManager`] signs one token, hands it out until it expires, then
//! signs a replacement on the next request. There is no background refresh.

use std::{
    fmt,
    path::PathBuf,
    sync::{Arc, Mutex, PoisonError},
};

use base64::{Engine, engine::general_purpose::URL_SAFE_NO_PAD};
use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, errors::ErrorKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Error, Result};

/// Default lifetime of a signed token, in seconds.
pub const DEFAULT_TOKEN_TTL_SECS: i64 = 3600;

/// Longest lifetime WeatherKit accepts for a developer token, in seconds.
pub const MAX_TOKEN_TTL_SECS: i64 = 24 * 3600;

/// Where the PKCS#8 P-256 private key comes from.
#[derive(Clone)]
pub enum KeySource {
    Path(PathBuf),
    /// PEM text or raw DER.
    Bytes(Vec<u8>),
}

impl KeySource {
    pub fn path(path: impl Into<PathBuf>) -> Self {
        Self::Path(path.into())
    }

    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::Bytes(bytes.into())
    }

    fn load(&self) -> Result<Vec<u8>> {
        let (bytes, location) = match self {
            KeySource::Path(path) => {
                let bytes = std::fs::read(path)
                    .map_err(|e| Error::key_not_found(path.display().to_string(), Some(e)))?;
                (bytes, path.display().to_string())
            }
            KeySource::Bytes(bytes) => (bytes.clone(), "<in-memory key>".to_string()),
        };

        if bytes.iter().all(u8::is_ascii_whitespace) {
            return Err(Error::key_not_found(location, None));
        }
        Ok(bytes)
    }
}

impl fmt::Debug for KeySource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            KeySource::Path(path) => f.debug_tuple("Path").field(path).finish(),
            KeySource::Bytes(bytes) => write!(f, "Bytes(<{} bytes>)", bytes.len()),
        }
    }
}

/// Source of "now" for issuing and expiring tokens.
pub trait Clock: Send + Sync + fmt::Debug {
    fn now(&self) -> DateTime<Utc>;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// Team (app prefix) id.
    pub iss: String,
    /// Bundle / service id.
    pub sub: String,
    pub iat: i64,
    pub exp: i64,
}

#[derive(Debug, Serialize)]
struct TokenHeader<'a> {
    alg: &'static str,
    kid: &'a str,
    id: &'a str,
}

/// A signed token together with its claims.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedToken {
    claims: TokenClaims,
    compact: String,
    expires_at: DateTime<Utc>,
}

impl SignedToken {
    pub fn as_str(&self) -> &str {
        &self.compact
    }

    pub fn claims(&self) -> &TokenClaims {
        &self.claims
    }

    pub fn expires_at(&self) -> DateTime<Utc> {
        self.expires_at
    }

    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at <= now
    }
}

/// Issues and caches WeatherKit developer tokens.
///
/// Safe to share between tasks: the expiry check and the re-signing happen
/// under one lock, so concurrent callers get the same token.
pub struct TokenManager {
    key: EncodingKey,
    key_id: String,
    team_id: String,
    bundle_id: String,
    ttl: Duration,
    clock: Arc<dyn Clock>,
    cached: Mutex<Option<SignedToken>>,
}

impl TokenManager {
    pub fn new(
        key_source: KeySource,
        key_id: impl Into<String>,
        team_id: impl Into<String>,
        bundle_id: impl Into<String>,
    ) -> Result<Self> {
        let key_id = non_empty("key id", key_id.into())?;
        let team_id = non_empty("team id", team_id.into())?;
        let bundle_id = non_empty("bundle id", bundle_id.into())?;
        // The header's app id is "<team>.<bundle>".
        if team_id.contains('.') {
            return Err(Error::token_failed(format!("team id must not contain '.': {team_id}")));
        }

        let bytes = key_source.load()?;
        let key = decode_key(&bytes)?;

        Ok(Self {
            key,
            key_id,
            team_id,
            bundle_id,
            ttl: Duration::seconds(DEFAULT_TOKEN_TTL_SECS),
            clock: Arc::new(SystemClock),
            cached: Mutex::new(None),
        })
    }

    /// Lifetime of newly signed tokens, between one second and 24 hours.
    pub fn with_ttl(mut self, ttl: Duration) -> Result<Self> {
        if ttl < Duration::seconds(1) {
            return Err(Error::token_failed(format!("token lifetime too short: {ttl}")));
        }
        if ttl > Duration::seconds(MAX_TOKEN_TTL_SECS) {
            return Err(Error::token_failed(format!("token lifetime too long: {ttl}")));
        }
        self.ttl = ttl;
        Ok(self)
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn key_id(&self) -> &str {
        &self.key_id
    }

    pub fn ttl(&self) -> Duration {
        self.ttl
    }

    /// Compact token for an `Authorization: Bearer` header.
    pub fn current_token(&self) -> Result<String> {
        self.signed_token().map(|token| token.compact)
    }

    /// The cached token, re-signed first if missing or expired.
    pub fn signed_token(&self) -> Result<SignedToken> {
        let mut cached = self.cached.lock().unwrap_or_else(PoisonError::into_inner);
        let now = self.clock.now();

        if let Some(token) = cached.as_ref().filter(|t| !t.is_expired_at(now)) {
            return Ok(token.clone());
        }

        let token = self.sign(now)?;
        debug!(
            key_id = %self.key_id,
            expires_at = %token.expires_at,
            "signed new WeatherKit token"
        );
        *cached = Some(token.clone());
        Ok(token)
    }

    fn sign(&self, now: DateTime<Utc>) -> Result<SignedToken> {
        // Claims carry whole seconds; keep the cache expiry consistent with them.
        let issued_at = now.timestamp();
        let expires_at = DateTime::from_timestamp(issued_at, 0)
            .unwrap_or(now)
            .checked_add_signed(self.ttl)
            .ok_or_else(|| Error::token_failed("token expiry out of range"))?;

        let claims = TokenClaims {
            iss: self.team_id.clone(),
            sub: self.bundle_id.clone(),
            iat: issued_at,
            exp: expires_at.timestamp(),
        };
        let app_id = format!("{}.{}", self.team_id, self.bundle_id);
        let header = TokenHeader {
            alg: "ES256",
            kid: &self.key_id,
            id: &app_id,
        };

        let message = format!("{}.{}", encode_segment(&header)?, encode_segment(&claims)?);
        let signature = jsonwebtoken::crypto::sign(message.as_bytes(), &self.key, Algorithm::ES256)
            .map_err(|e| Error::TokenFailed {
                message: "signing failed".to_string(),
                source: Some(Box::new(e)),
            })?;

        Ok(SignedToken {
            claims,
            compact: format!("{message}.{signature}"),
            expires_at,
        })
    }
}

impl fmt::Debug for TokenManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenManager")
            .field("key_id", &self.key_id)
            .field("team_id", &self.team_id)
            .field("bundle_id", &self.bundle_id)
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

fn non_empty(what: &str, value: String) -> Result<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(Error::token_failed(format!("{what} must not be empty")));
    }
    Ok(trimmed.to_string())
}

fn decode_key(bytes: &[u8]) -> Result<EncodingKey> {
    let key = if bytes.trim_ascii_start().starts_with(b"-----BEGIN") {
        EncodingKey::from_ec_pem(bytes).map_err(|e| Error::DecodingKeyFailed {
            message: e.to_string(),
            source: Some(e),
        })?
    } else {
        EncodingKey::from_ec_der(bytes)
    };

    // The PEM/DER constructors only check framing; a probe signature proves
    // the key is a usable P-256 private key.
    match jsonwebtoken::crypto::sign(b"weatherkit-key-probe", &key, Algorithm::ES256) {
        Ok(_) => Ok(key),
        Err(e) if matches!(e.kind(), ErrorKind::InvalidEcdsaKey | ErrorKind::InvalidKeyFormat) => {
            Err(Error::DecodingKeyFailed {
                message: e.to_string(),
                source: Some(e),
            })
        }
        Err(e) => Err(Error::TokenFailed {
            message: "signing backend rejected the key".to_string(),
            source: Some(Box::new(e)),
        }),
    }
}

fn encode_segment<T: Serialize>(value: &T) -> Result<String> {
    let json = serde_json::to_vec(value).map_err(|e| Error::TokenFailed {
        message: "failed to serialize token segment".to_string(),
        source: Some(Box::new(e)),
    })?;
    Ok(URL_SAFE_NO_PAD.encode(json))
}
