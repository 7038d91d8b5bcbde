//! Command channels into a remote surface.

use watchtalk_core::{ChannelKind, CommandEnvelope, MessagePort, PlayerApi, SurfaceCommand, SurfaceError};

/// One way of delivering a [`SurfaceCommand`] to the embedded player.
pub enum SurfaceChannel {
    /// Direct handle to the player's control API.
    DirectHandle(Box<dyn PlayerApi>),

    /// JSON envelope posted into the embed frame, restricted to the
    /// provider's origin.
    MessageChannel {
        port: Box<dyn MessagePort>,
        target_origin: String,
    },
}

impl SurfaceChannel {
    pub fn direct(api: impl PlayerApi + 'static) -> Self {
        Self::DirectHandle(Box::new(api))
    }

    pub fn message(port: impl MessagePort + 'static, target_origin: impl Into<String>) -> Self {
        Self::MessageChannel {
            port: Box::new(port),
            target_origin: target_origin.into(),
        }
    }

    pub const fn kind(&self) -> ChannelKind {
        match self {
            Self::DirectHandle(_) => ChannelKind::DirectHandle,
            Self::MessageChannel { .. } => ChannelKind::MessageChannel,
        }
    }

    /// Deliver `command`. An `Err` means the channel threw; nothing was sent.
    pub fn send(&self, command: SurfaceCommand) -> Result<(), SurfaceError> {
        match self {
            Self::DirectHandle(api) => match command {
                SurfaceCommand::Pause => api.pause_video(),
                SurfaceCommand::Play => api.play_video(),
            },
            Self::MessageChannel {
                port,
                target_origin,
            } => {
                let payload = CommandEnvelope::for_command(command).to_json()?;
                port.post_message(&payload, target_origin)
            }
        }
    }
}

impl std::fmt::Debug for SurfaceChannel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DirectHandle(_) => f.write_str("DirectHandle"),
            Self::MessageChannel { target_origin, .. } => f
                .debug_struct("MessageChannel")
                .field("target_origin", target_origin)
                .finish_non_exhaustive(),
        }
    }
}
