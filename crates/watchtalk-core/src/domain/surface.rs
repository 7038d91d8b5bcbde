//! Remote surface domain values: identity, readiness, and the control protocol.

use serde::{Deserialize, Serialize};

/// Opaque identifier for an embedded video surface (the provider's content id).
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SurfaceId(String);

impl SurfaceId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SurfaceId {
    fn from(id: &str) -> Self {
        Self::new(id)
    }
}

impl std::fmt::Display for SurfaceId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Whether the remote surface accepts commands yet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Readiness {
    #[default]
    NotReady,
    Ready,
}

impl Readiness {
    pub const fn is_ready(self) -> bool {
        matches!(self, Self::Ready)
    }
}

/// A playback command understood by the remote surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SurfaceCommand {
    Pause,
    Play,
}

impl SurfaceCommand {
    /// Name of the player API function this command invokes.
    pub const fn function_name(self) -> &'static str {
        match self {
            Self::Pause => "pauseVideo",
            Self::Play => "playVideo",
        }
    }
}

impl std::fmt::Display for SurfaceCommand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.function_name())
    }
}

/// Wire envelope posted to the embed's message channel.
///
/// ```json
/// { "event": "command", "func": "pauseVideo", "args": [] }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandEnvelope {
    pub event: String,
    pub func: String,
    pub args: Vec<serde_json::Value>,
}

impl CommandEnvelope {
    const EVENT_COMMAND: &'static str = "command";

    /// Build the envelope for a surface command (commands take no arguments).
    pub fn for_command(command: SurfaceCommand) -> Self {
        Self {
            event: Self::EVENT_COMMAND.to_string(),
            func: command.function_name().to_string(),
            args: Vec::new(),
        }
    }

    /// Serialize to the JSON string the message channel carries.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string(self)
    }
}

/// Transport used to deliver a command to the surface.
///
/// Declaration order is priority order: a direct handle to the player API
/// always wins over the cross-origin message channel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChannelKind {
    DirectHandle,
    MessageChannel,
}

/// What releasing the hold key does to playback.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReleasePolicy {
    /// Clear the paused indicator only; playback stays paused until the
    /// viewer resumes it on the surface itself.
    #[default]
    ClearIndicator,
    /// Send an explicit `playVideo` command. The indicator clears only
    /// once the resume is delivered.
    Resume,
}
