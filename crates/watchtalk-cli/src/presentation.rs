//! Terminal rendering of controller events.

use watchtalk_core::{ControllerEvent, SessionErrorKind, VoiceState};

/// One-line description of an event.
pub fn describe(event: &ControllerEvent) -> String {
    match event {
        ControllerEvent::PauseIndicatorChanged { surface_id, paused } => {
            if *paused {
                format!("⏸  [{surface_id}] paused indicator on")
            } else {
                format!("   [{surface_id}] paused indicator off")
            }
        }
        ControllerEvent::CommandDelivered {
            surface_id,
            command,
            channel,
        } => format!("✓  [{surface_id}] {command} delivered via {channel:?}"),
        ControllerEvent::CommandDropped {
            surface_id,
            command,
        } => format!("·  [{surface_id}] {command} dropped (surface not ready)"),
        ControllerEvent::CommandFailed {
            surface_id,
            command,
            error,
        } => format!("✗  [{surface_id}] {command} failed: {error}"),
        ControllerEvent::VoiceStateChanged {
            session,
            state,
            indicator,
        } => {
            let session = session.map_or_else(|| "-".to_string(), |s| s.to_string());
            match indicator {
                Some(indicator) => format!("●  {session} {state}: {}", indicator.label()),
                None if *state == VoiceState::Idle => format!("○  {session} idle"),
                None => format!("●  {session} {state}"),
            }
        }
        ControllerEvent::Transcript { session, text } => {
            format!("   {session} transcript: \"{text}\"")
        }
        ControllerEvent::Answer { session, text } => format!("   {session} answer: \"{text}\""),
        ControllerEvent::SessionFailed { session, error } => match error {
            SessionErrorKind::Recognition { code } => {
                format!("✗  {session} recognition failed ({code})")
            }
            SessionErrorKind::AnswerService => format!("✗  {session} answer service failed"),
        },
        ControllerEvent::VoiceUnavailable => "✗  voice input unavailable".to_string(),
    }
}
