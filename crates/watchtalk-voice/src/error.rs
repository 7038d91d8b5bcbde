//! Voice mode error types.

use watchtalk_core::{AnswerError, SpeechError};

/// Errors surfaced by the voice crate to its host.
///
/// Failures inside a session never reach the host this way; they become
/// state transitions and a spoken apology.
#[derive(Debug, thiserror::Error)]
pub enum VoiceError {
    /// Speech recognition or synthesis is missing on this platform.
    #[error("Voice input is not supported on this platform")]
    Unsupported,

    /// A speech engine refused a request.
    #[error(transparent)]
    Speech(#[from] SpeechError),

    /// The answer service failed.
    #[error(transparent)]
    Answer(#[from] AnswerError),

    /// The HTTP client for the answer service could not be built.
    #[error("Failed to build answer service client: {0}")]
    HttpClient(String),

    /// The controller's input queue is closed.
    #[error("Voice controller has stopped")]
    Stopped,
}
