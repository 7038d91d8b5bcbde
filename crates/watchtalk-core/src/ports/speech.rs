//! Speech engine ports — recognition, synthesis, and capability detection.
//!
//! Engines are fire-and-report: `start`/`speak` return as soon as the request
//! is accepted, and the outcome arrives later through the [`SpeechEventSink`]
//! the engine was built with. Every reported event carries the [`SessionId`]
//! it belongs to.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::{RecognitionErrorKind, SessionId, SpeechUtterance};
use crate::settings::DEFAULT_RECOGNITION_LANGUAGE;

// ── Capability detection ───────────────────────────────────────────

/// Whether a platform feature exists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Available,
    Unavailable,
}

impl Capability {
    pub const fn is_available(self) -> bool {
        matches!(self, Self::Available)
    }
}

/// Queried once, when a voice controller is constructed.
pub trait CapabilityProbe {
    fn recognition(&self) -> Capability;

    fn synthesis(&self) -> Capability;

    /// Both recognition and synthesis are present.
    fn voice_supported(&self) -> bool {
        self.recognition().is_available() && self.synthesis().is_available()
    }
}

/// A probe with fixed answers, for hosts that know their platform up front.
#[derive(Debug, Clone, Copy)]
pub struct StaticCapabilities {
    pub recognition: Capability,
    pub synthesis: Capability,
}

impl StaticCapabilities {
    pub const fn all() -> Self {
        Self {
            recognition: Capability::Available,
            synthesis: Capability::Available,
        }
    }

    pub const fn none() -> Self {
        Self {
            recognition: Capability::Unavailable,
            synthesis: Capability::Unavailable,
        }
    }
}

impl CapabilityProbe for StaticCapabilities {
    fn recognition(&self) -> Capability {
        self.recognition
    }

    fn synthesis(&self) -> Capability {
        self.synthesis
    }
}

// ── Engine events ──────────────────────────────────────────────────

/// Events a recognizer reports for one session.
///
/// Contract: exactly one of `Result` or `Error`, then always `End`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognitionEvent {
    Result(String),
    Error(RecognitionErrorKind),
    End,
}

/// Events a synthesizer reports for one utterance.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SynthesisEvent {
    Start,
    End,
    Error(String),
}

/// A speech engine event tagged with its session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Recognition {
        session: SessionId,
        event: RecognitionEvent,
    },
    Synthesis {
        session: SessionId,
        event: SynthesisEvent,
    },
}

/// Where engines deliver their events.
///
/// Wraps a callback so the owning controller decides which queue the events
/// land on; events from every engine then share one arrival order.
#[derive(Clone)]
pub struct SpeechEventSink {
    deliver: Arc<dyn Fn(SpeechEvent) + Send + Sync>,
}

impl SpeechEventSink {
    pub fn new(deliver: impl Fn(SpeechEvent) + Send + Sync + 'static) -> Self {
        Self {
            deliver: Arc::new(deliver),
        }
    }

    pub fn recognition(&self, session: SessionId, event: RecognitionEvent) {
        (self.deliver)(SpeechEvent::Recognition { session, event });
    }

    pub fn synthesis(&self, session: SessionId, event: SynthesisEvent) {
        (self.deliver)(SpeechEvent::Synthesis { session, event });
    }
}

impl std::fmt::Debug for SpeechEventSink {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SpeechEventSink").finish_non_exhaustive()
    }
}

// ── Engines ────────────────────────────────────────────────────────

/// Errors raised synchronously when an engine refuses a request.
#[derive(Debug, Error)]
pub enum SpeechError {
    #[error("Speech recognition could not start: {0}")]
    RecognitionStart(String),

    #[error("Speech synthesis could not start: {0}")]
    SynthesisStart(String),
}

/// Recognizer configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecognitionConfig {
    /// BCP-47 language tag.
    pub language: String,
    /// Keep listening after the first final result.
    pub continuous: bool,
    /// Report partial transcripts.
    pub interim_results: bool,
}

impl Default for RecognitionConfig {
    fn default() -> Self {
        Self {
            language: DEFAULT_RECOGNITION_LANGUAGE.to_string(),
            continuous: false,
            interim_results: false,
        }
    }
}

/// Speech-to-text engine.
pub trait SpeechRecognizer: Send {
    /// Begin capture for `session`. Events arrive through the sink.
    fn start(&mut self, session: SessionId) -> Result<(), SpeechError>;

    /// Ask the engine to finish. It still reports its terminal events.
    fn stop(&mut self);

    /// Abandon capture immediately (teardown).
    fn abort(&mut self);
}

/// Text-to-speech engine.
pub trait SpeechSynthesizer: Send {
    /// Speak `utterance`, implicitly cancelling anything in flight.
    fn speak(&mut self, session: SessionId, utterance: &SpeechUtterance) -> Result<(), SpeechError>;

    /// Cancel queued and playing utterances.
    fn cancel(&mut self);
}
