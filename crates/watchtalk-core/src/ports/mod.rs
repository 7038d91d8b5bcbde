//! Port definitions (trait abstractions) for external systems.
//!
//! Ports define the interfaces the controllers expect from the outside world.
//! They contain no implementation details and use only domain types.
//!
//! # Design Rules
//!
//! - No browser, audio, or HTTP types in any signature
//! - Engines report completions through [`SpeechEventSink`], tagged with the
//!   session that started them, so the owning controller can drop stale ones
//! - Every fallible call returns a port-specific error; controllers convert
//!   them to local state transitions at the call site

pub mod answer;
pub mod event_emitter;
pub mod speech;
pub mod surface;

use thiserror::Error;

pub use answer::{AnswerError, AnswerService};
pub use event_emitter::{ChannelEmitter, EventEmitter, NoopEmitter};
pub use speech::{
    Capability, CapabilityProbe, RecognitionConfig, RecognitionEvent, SpeechError, SpeechEvent,
    SpeechEventSink, SpeechRecognizer, SpeechSynthesizer, StaticCapabilities, SynthesisEvent,
};
pub use surface::{MessagePort, PlayerApi, SurfaceError};

use crate::readiness::ReadinessError;
use crate::settings::SettingsError;

/// Core error type for semantic domain errors.
///
/// Adapters map this to their own error types (CLI exit codes, HTTP statuses).
#[derive(Debug, Error)]
pub enum CoreError {
    /// Surface command dispatch failed.
    #[error(transparent)]
    Surface(#[from] SurfaceError),

    /// A speech engine refused a request.
    #[error(transparent)]
    Speech(#[from] SpeechError),

    /// The answer service failed.
    #[error(transparent)]
    Answer(#[from] AnswerError),

    /// Settings failed validation.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A readiness signal was abandoned.
    #[error(transparent)]
    Readiness(#[from] ReadinessError),

    /// Configuration error that is not a settings-validation failure.
    #[error("Configuration error: {0}")]
    Configuration(String),
}
