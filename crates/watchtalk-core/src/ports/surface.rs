//! Surface control ports: the two ways a command can reach the player.

use thiserror::Error;

/// Errors from delivering a command to a remote surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    /// The surface has not signalled readiness yet.
    #[error("Surface is not ready to accept commands")]
    NotReady,

    /// The surface has no command channel at all.
    #[error("Surface has no command channel")]
    NoChannel,

    /// The surface was detached (unmounted).
    #[error("Surface has been detached")]
    Detached,

    /// The channel threw while sending.
    #[error("Command send failed: {0}")]
    SendFailed(String),

    /// The command envelope could not be encoded.
    #[error("Failed to encode command: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Direct handle to the embedded player's control API.
///
/// Preferred over [`MessagePort`] whenever the host exposes one.
pub trait PlayerApi: Send + Sync {
    fn pause_video(&self) -> Result<(), SurfaceError>;

    fn play_video(&self) -> Result<(), SurfaceError>;
}

/// Cross-origin message channel into the embed frame.
pub trait MessagePort: Send + Sync {
    /// Post a serialized message restricted to `target_origin`.
    fn post_message(&self, data: &str, target_origin: &str) -> Result<(), SurfaceError>;
}
