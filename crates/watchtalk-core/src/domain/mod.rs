//! Pure domain types shared by both controllers.
//!
//! Nothing in here performs I/O. The controllers in `watchtalk-surface` and
//! `watchtalk-voice` own the state; these are the values they pass around.

mod input;
mod surface;
mod voice;

pub use input::{
    GestureIntent, HoldKey, InputTarget, KeyDisposition, KeyInput, PointerGesture,
    is_text_entry_target,
};
pub use surface::{ChannelKind, CommandEnvelope, Readiness, ReleasePolicy, SurfaceCommand, SurfaceId};
pub use voice::{
    AnswerRequest, RecognitionErrorKind, SessionCounter, SessionErrorKind, SessionId,
    SpeechUtterance, UtteranceParams, VoiceIndicator, VoiceState,
};
