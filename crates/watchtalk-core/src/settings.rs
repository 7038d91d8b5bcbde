//! Settings domain types and validation.
//!
//! Pure domain types with no infrastructure dependencies. Adapters decide
//! where settings come from (a JSON file, env vars, CLI flags) and hand the
//! merged result to [`validate_settings`] before wiring controllers.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use url::Url;

use crate::domain::{HoldKey, ReleasePolicy, UtteranceParams};

/// Default hold-to-pause key.
pub const DEFAULT_HOLD_KEY: &str = "q";

/// Default delay between a surface's load signal and command readiness.
pub const DEFAULT_SETTLE_MS: u64 = 1000;

/// Default origin of the embedded player (postMessage target origin).
pub const DEFAULT_PROVIDER_ORIGIN: &str = "https://www.youtube.com";

/// Default recognizer language.
pub const DEFAULT_RECOGNITION_LANGUAGE: &str = "en-US";

/// Default timeout for the HTTP answer service.
pub const DEFAULT_ANSWER_TIMEOUT_SECS: u64 = 30;

const MAX_SETTLE_MS: u64 = 10_000;

/// Application settings.
///
/// All fields are optional to support partial updates and graceful defaults.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct Settings {
    /// Key whose sustained press pauses the surface.
    pub hold_key: Option<String>,

    /// What releasing the hold key does to playback.
    pub release_policy: Option<ReleasePolicy>,

    /// Settling delay after the surface load signal, in milliseconds.
    pub readiness_settle_ms: Option<u64>,

    /// Origin of the embedded player; commands are posted only to this origin.
    pub provider_origin: Option<String>,

    /// Origin of the hosting page, passed to the embed so postMessage works.
    pub page_origin: Option<String>,

    /// Recognizer language (BCP-47).
    pub recognition_language: Option<String>,

    /// Utterance rate (0.1–10).
    pub speech_rate: Option<f32>,

    /// Utterance pitch (0–2).
    pub speech_pitch: Option<f32>,

    /// Utterance volume (0–1).
    pub speech_volume: Option<f32>,

    /// HTTP endpoint of the answer service. `None` uses the placeholder.
    pub answer_endpoint: Option<String>,

    /// Answer service request timeout, in seconds.
    pub answer_timeout_secs: Option<u64>,
}

impl Settings {
    /// Create settings with sensible defaults.
    #[must_use]
    pub fn with_defaults() -> Self {
        Self {
            hold_key: Some(DEFAULT_HOLD_KEY.to_string()),
            release_policy: Some(ReleasePolicy::default()),
            readiness_settle_ms: Some(DEFAULT_SETTLE_MS),
            provider_origin: Some(DEFAULT_PROVIDER_ORIGIN.to_string()),
            page_origin: None,
            recognition_language: Some(DEFAULT_RECOGNITION_LANGUAGE.to_string()),
            speech_rate: Some(1.0),
            speech_pitch: Some(1.0),
            speech_volume: Some(1.0),
            answer_endpoint: None,
            answer_timeout_secs: Some(DEFAULT_ANSWER_TIMEOUT_SECS),
        }
    }

    pub fn effective_hold_key(&self) -> HoldKey {
        HoldKey::new(self.hold_key.as_deref().unwrap_or(DEFAULT_HOLD_KEY))
    }

    pub fn effective_release_policy(&self) -> ReleasePolicy {
        self.release_policy.unwrap_or_default()
    }

    pub fn effective_settle_delay(&self) -> Duration {
        Duration::from_millis(self.readiness_settle_ms.unwrap_or(DEFAULT_SETTLE_MS))
    }

    pub fn effective_provider_origin(&self) -> &str {
        self.provider_origin
            .as_deref()
            .unwrap_or(DEFAULT_PROVIDER_ORIGIN)
    }

    pub fn effective_recognition_language(&self) -> &str {
        self.recognition_language
            .as_deref()
            .unwrap_or(DEFAULT_RECOGNITION_LANGUAGE)
    }

    pub fn effective_utterance_params(&self) -> UtteranceParams {
        let defaults = UtteranceParams::default();
        UtteranceParams {
            rate: self.speech_rate.unwrap_or(defaults.rate),
            pitch: self.speech_pitch.unwrap_or(defaults.pitch),
            volume: self.speech_volume.unwrap_or(defaults.volume),
        }
    }

    pub fn effective_answer_timeout(&self) -> Duration {
        Duration::from_secs(
            self.answer_timeout_secs
                .unwrap_or(DEFAULT_ANSWER_TIMEOUT_SECS),
        )
    }

    /// Merge another settings into this one, only updating fields that are Some.
    pub fn merge(&mut self, other: &SettingsUpdate) {
        if let Some(ref key) = other.hold_key {
            self.hold_key.clone_from(key);
        }
        if let Some(ref policy) = other.release_policy {
            self.release_policy = *policy;
        }
        if let Some(ref settle) = other.readiness_settle_ms {
            self.readiness_settle_ms = *settle;
        }
        if let Some(ref origin) = other.provider_origin {
            self.provider_origin.clone_from(origin);
        }
        if let Some(ref origin) = other.page_origin {
            self.page_origin.clone_from(origin);
        }
        if let Some(ref language) = other.recognition_language {
            self.recognition_language.clone_from(language);
        }
        if let Some(ref rate) = other.speech_rate {
            self.speech_rate = *rate;
        }
        if let Some(ref pitch) = other.speech_pitch {
            self.speech_pitch = *pitch;
        }
        if let Some(ref volume) = other.speech_volume {
            self.speech_volume = *volume;
        }
        if let Some(ref endpoint) = other.answer_endpoint {
            self.answer_endpoint.clone_from(endpoint);
        }
        if let Some(ref timeout) = other.answer_timeout_secs {
            self.answer_timeout_secs = *timeout;
        }
    }
}

/// Partial settings update.
///
/// Each field is `Option<Option<T>>`:
/// - `None` = don't change this field
/// - `Some(None)` = reset field to its default
/// - `Some(Some(value))` = set field to value
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SettingsUpdate {
    pub hold_key: Option<Option<String>>,
    pub release_policy: Option<Option<ReleasePolicy>>,
    pub readiness_settle_ms: Option<Option<u64>>,
    pub provider_origin: Option<Option<String>>,
    pub page_origin: Option<Option<String>>,
    pub recognition_language: Option<Option<String>>,
    pub speech_rate: Option<Option<f32>>,
    pub speech_pitch: Option<Option<f32>>,
    pub speech_volume: Option<Option<f32>>,
    pub answer_endpoint: Option<Option<String>>,
    pub answer_timeout_secs: Option<Option<u64>>,
}

impl SettingsUpdate {
    /// An update that sets every field `settings` has a value for and
    /// leaves the rest untouched. Used to layer a partial settings file
    /// over the defaults.
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            hold_key: settings.hold_key.clone().map(Some),
            release_policy: settings.release_policy.map(Some),
            readiness_settle_ms: settings.readiness_settle_ms.map(Some),
            provider_origin: settings.provider_origin.clone().map(Some),
            page_origin: settings.page_origin.clone().map(Some),
            recognition_language: settings.recognition_language.clone().map(Some),
            speech_rate: settings.speech_rate.map(Some),
            speech_pitch: settings.speech_pitch.map(Some),
            speech_volume: settings.speech_volume.map(Some),
            answer_endpoint: settings.answer_endpoint.clone().map(Some),
            answer_timeout_secs: settings.answer_timeout_secs.map(Some),
        }
    }
}

/// Settings validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SettingsError {
    #[error("Hold key cannot be empty")]
    EmptyHoldKey,

    #[error("Readiness settle delay must be at most 10000 ms, got {0}")]
    InvalidSettleDelay(u64),

    #[error("{field} must be an http(s) origin without a path, got '{value}'")]
    InvalidOrigin { field: &'static str, value: String },

    #[error("{field} is not a valid URL ('{value}'): {source}")]
    MalformedUrl {
        field: &'static str,
        value: String,
        #[source]
        source: url::ParseError,
    },

    #[error("Recognition language cannot be empty")]
    EmptyLanguage,

    #[error("Speech {field} must be between {min} and {max}, got {value}")]
    OutOfRange {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },

    #[error("Answer endpoint must be an http(s) URL, got '{0}'")]
    InvalidEndpoint(String),

    #[error("Answer timeout must be between 1 and 300 seconds, got {0}")]
    InvalidTimeout(u64),
}

/// Validate settings values.
pub fn validate_settings(settings: &Settings) -> Result<(), SettingsError> {
    if settings.hold_key.as_ref().is_some_and(String::is_empty) {
        return Err(SettingsError::EmptyHoldKey);
    }

    if let Some(settle) = settings.readiness_settle_ms {
        if settle > MAX_SETTLE_MS {
            return Err(SettingsError::InvalidSettleDelay(settle));
        }
    }

    if let Some(ref origin) = settings.provider_origin {
        validate_origin("provider_origin", origin)?;
    }
    if let Some(ref origin) = settings.page_origin {
        validate_origin("page_origin", origin)?;
    }

    if settings
        .recognition_language
        .as_ref()
        .is_some_and(|l| l.trim().is_empty())
    {
        return Err(SettingsError::EmptyLanguage);
    }

    validate_range("rate", settings.speech_rate, 0.1, 10.0)?;
    validate_range("pitch", settings.speech_pitch, 0.0, 2.0)?;
    validate_range("volume", settings.speech_volume, 0.0, 1.0)?;

    if let Some(ref endpoint) = settings.answer_endpoint {
        validate_endpoint(endpoint)?;
    }

    if let Some(timeout) = settings.answer_timeout_secs {
        if !(1..=300).contains(&timeout) {
            return Err(SettingsError::InvalidTimeout(timeout));
        }
    }

    Ok(())
}

fn parse_http_url(field: &'static str, value: &str) -> Result<Option<Url>, SettingsError> {
    let url = Url::parse(value).map_err(|source| SettingsError::MalformedUrl {
        field,
        value: value.to_string(),
        source,
    })?;
    let is_http = matches!(url.scheme(), "http" | "https");
    Ok((is_http && url.host_str().is_some_and(|h| !h.is_empty())).then_some(url))
}

fn validate_endpoint(value: &str) -> Result<(), SettingsError> {
    match parse_http_url("answer_endpoint", value)? {
        Some(_) => Ok(()),
        None => Err(SettingsError::InvalidEndpoint(value.to_string())),
    }
}

/// Scheme, host and optional port only. The parser normalizes an empty
/// path to `/`, so that is the one path accepted.
fn validate_origin(field: &'static str, value: &str) -> Result<(), SettingsError> {
    let is_origin = parse_http_url(field, value)?.is_some_and(|url| {
        url.path() == "/"
            && url.query().is_none()
            && url.fragment().is_none()
            && url.username().is_empty()
            && url.password().is_none()
    });

    if is_origin {
        Ok(())
    } else {
        Err(SettingsError::InvalidOrigin {
            field,
            value: value.to_string(),
        })
    }
}

fn validate_range(
    field: &'static str,
    value: Option<f32>,
    min: f32,
    max: f32,
) -> Result<(), SettingsError> {
    match value {
        Some(v) if !(min..=max).contains(&v) => Err(SettingsError::OutOfRange {
            field,
            min,
            max,
            value: v,
        }),
        _ => Ok(()),
    }
}
