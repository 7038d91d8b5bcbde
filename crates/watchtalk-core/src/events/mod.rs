//! Canonical event union emitted by both controllers.
//!
//! Hosts render indicators from these events and nothing else; a controller
//! never exposes a UI flag that could drift from its state machine.
//!
//! # Wire Format
//!
//! Events are serialized with a `type` tag:
//!
//! ```json
//! { "type": "pause_indicator_changed", "surfaceId": "dQw4w9WgXcQ", "paused": true }
//! ```

use serde::{Deserialize, Serialize};

use crate::domain::{
    ChannelKind, SessionErrorKind, SessionId, SurfaceCommand, SurfaceId, VoiceIndicator,
    VoiceState,
};

/// Events emitted by the hold-to-pause and push-to-talk controllers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ControllerEvent {
    // ========== Hold-to-pause ==========
    /// The paused indicator over a surface flipped.
    PauseIndicatorChanged {
        #[serde(rename = "surfaceId")]
        surface_id: SurfaceId,
        paused: bool,
    },

    /// A command reached the surface.
    CommandDelivered {
        #[serde(rename = "surfaceId")]
        surface_id: SurfaceId,
        command: SurfaceCommand,
        channel: ChannelKind,
    },

    /// A command was dropped because the surface was not ready.
    CommandDropped {
        #[serde(rename = "surfaceId")]
        surface_id: SurfaceId,
        command: SurfaceCommand,
    },

    /// Every channel refused the command.
    CommandFailed {
        #[serde(rename = "surfaceId")]
        surface_id: SurfaceId,
        command: SurfaceCommand,
        error: String,
    },

    // ========== Push-to-talk ==========
    /// The voice session machine changed state.
    VoiceStateChanged {
        session: Option<SessionId>,
        state: VoiceState,
        indicator: Option<VoiceIndicator>,
    },

    /// The recognizer produced a transcript.
    Transcript { session: SessionId, text: String },

    /// The answer service resolved a question.
    Answer { session: SessionId, text: String },

    /// A session failed and an apology is being spoken.
    SessionFailed {
        session: SessionId,
        error: SessionErrorKind,
    },

    /// Voice input is unsupported on this platform; the control is disabled.
    VoiceUnavailable,
}

impl ControllerEvent {
    /// Build a state-change event with its indicator derived from the state.
    pub const fn voice_state(session: Option<SessionId>, state: VoiceState) -> Self {
        Self::VoiceStateChanged {
            session,
            state,
            indicator: state.indicator(),
        }
    }

    pub const fn pause_indicator(surface_id: SurfaceId, paused: bool) -> Self {
        Self::PauseIndicatorChanged { surface_id, paused }
    }
}
