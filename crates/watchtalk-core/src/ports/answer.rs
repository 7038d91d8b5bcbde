//! Answer service port.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::AnswerRequest;

/// Errors from resolving a question.
///
/// The push-to-talk controller treats every variant the same way (one
/// generic spoken apology); the variants exist for logging.
#[derive(Debug, Error)]
pub enum AnswerError {
    #[error("Answer service unavailable: {0}")]
    Unavailable(String),

    #[error("Answer service transport error: {0}")]
    Transport(String),

    #[error("Answer service returned an invalid response: {0}")]
    InvalidResponse(String),

    #[error("Answer service timed out")]
    Timeout,
}

/// Resolves a spoken question about one video into answer text.
///
/// Latency is unbounded; callers must not assume the session that asked is
/// still current when the answer arrives.
#[async_trait]
pub trait AnswerService: Send + Sync {
    async fn resolve(&self, request: &AnswerRequest) -> Result<String, AnswerError>;
}
