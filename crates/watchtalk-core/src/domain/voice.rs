//! Voice session values: identity, state, and the immutable requests
//! handed to the answer and synthesis services.

use serde::{Deserialize, Serialize};

// ── Session identity ───────────────────────────────────────────────

/// Generation token for one press-to-answer cycle.
///
/// Every asynchronous completion is tagged with the session that started it;
/// completions carrying an older id are stale and must be dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SessionId(u64);

impl SessionId {
    pub const fn get(self) -> u64 {
        self.0
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Monotonic source of [`SessionId`]s. Never hands out the same id twice.
#[derive(Debug, Default)]
pub struct SessionCounter {
    last: u64,
}

impl SessionCounter {
    pub const fn new() -> Self {
        Self { last: 0 }
    }

    /// Allocate the next id, superseding every id handed out before it.
    pub const fn advance(&mut self) -> SessionId {
        self.last += 1;
        SessionId(self.last)
    }

    /// The most recently allocated id, if any.
    pub const fn current(&self) -> Option<SessionId> {
        if self.last == 0 {
            None
        } else {
            Some(SessionId(self.last))
        }
    }
}

// ── Voice state machine states ─────────────────────────────────────

/// State of the push-to-talk voice session machine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceState {
    /// No session in flight. Initial and terminal state of every cycle.
    #[default]
    Idle,
    /// Microphone capture in progress.
    Recording,
    /// Transcript captured; waiting for the answer service.
    Processing,
    /// Speaking the answer.
    Speaking,
    /// Speaking an apology; returns to `Idle` when it finishes. Shows the
    /// speaking indicator while the apology plays, since presses are still
    /// refused.
    Error,
}

impl VoiceState {
    /// The one indicator visible in this state. Only `Idle`, the one state
    /// that accepts a press, shows none.
    pub const fn indicator(self) -> Option<VoiceIndicator> {
        match self {
            Self::Recording => Some(VoiceIndicator::Recording),
            Self::Processing => Some(VoiceIndicator::Processing),
            Self::Speaking | Self::Error => Some(VoiceIndicator::Speaking),
            Self::Idle => None,
        }
    }

    /// Whether the push-to-talk button accepts a press.
    pub const fn accepts_press(self) -> bool {
        matches!(self, Self::Idle)
    }
}

impl std::fmt::Display for VoiceState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let label = match self {
            Self::Idle => "idle",
            Self::Recording => "recording",
            Self::Processing => "processing",
            Self::Speaking => "speaking",
            Self::Error => "error",
        };
        f.write_str(label)
    }
}

/// The UI indicator shown next to the push-to-talk button.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum VoiceIndicator {
    Recording,
    Processing,
    Speaking,
}

impl VoiceIndicator {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Recording => "Listening...",
            Self::Processing => "Processing...",
            Self::Speaking => "Speaking...",
        }
    }
}

// ── Errors carried by a session ────────────────────────────────────

/// Recognition failure reported by the speech recognizer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecognitionErrorKind {
    NoSpeech,
    Network,
    Aborted,
    Other(String),
}

impl RecognitionErrorKind {
    /// Parse a recognizer error code (`"no-speech"`, `"network"`, ...).
    pub fn from_code(code: &str) -> Self {
        match code {
            "no-speech" => Self::NoSpeech,
            "network" => Self::Network,
            "aborted" => Self::Aborted,
            other => Self::Other(other.to_string()),
        }
    }

    pub fn code(&self) -> &str {
        match self {
            Self::NoSpeech => "no-speech",
            Self::Network => "network",
            Self::Aborted => "aborted",
            Self::Other(code) => code,
        }
    }
}

impl std::fmt::Display for RecognitionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

/// Why a session ended in the `Error` state.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SessionErrorKind {
    Recognition { code: RecognitionErrorKind },
    AnswerService,
}

// ── Outbound value objects ─────────────────────────────────────────

/// A question to resolve against one video. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnswerRequest {
    question: String,
    context_id: String,
    context_label: String,
}

impl AnswerRequest {
    pub fn new(
        question: impl Into<String>,
        context_id: impl Into<String>,
        context_label: impl Into<String>,
    ) -> Self {
        Self {
            question: question.into(),
            context_id: context_id.into(),
            context_label: context_label.into(),
        }
    }

    /// The transcribed question.
    pub fn question(&self) -> &str {
        &self.question
    }

    /// Video identifier the question is about.
    pub fn context_id(&self) -> &str {
        &self.context_id
    }

    /// Video title the question is about.
    pub fn context_label(&self) -> &str {
        &self.context_label
    }
}

/// Prosody applied to every utterance.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct UtteranceParams {
    pub rate: f32,
    pub pitch: f32,
    pub volume: f32,
}

impl Default for UtteranceParams {
    fn default() -> Self {
        Self {
            rate: 1.0,
            pitch: 1.0,
            volume: 1.0,
        }
    }
}

/// One thing to say. Immutable once built.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeechUtterance {
    text: String,
    rate: f32,
    pitch: f32,
    volume: f32,
}

impl SpeechUtterance {
    pub fn new(text: impl Into<String>, params: UtteranceParams) -> Self {
        Self {
            text: text.into(),
            rate: params.rate,
            pitch: params.pitch,
            volume: params.volume,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub const fn rate(&self) -> f32 {
        self.rate
    }

    pub const fn pitch(&self) -> f32 {
        self.pitch
    }

    pub const fn volume(&self) -> f32 {
        self.volume
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_ids_are_monotonic() {
        let mut counter = SessionCounter::new();
        assert_eq!(counter.current(), None);

        let first = counter.advance();
        let second = counter.advance();
        assert!(second > first);
        assert_eq!(counter.current(), Some(second));
    }

    #[test]
    fn only_idle_shows_no_indicator() {
        assert_eq!(VoiceState::Idle.indicator(), None);
        assert_eq!(
            VoiceState::Error.indicator(),
            Some(VoiceIndicator::Speaking)
        );
        assert_eq!(
            VoiceState::Recording.indicator(),
            Some(VoiceIndicator::Recording)
        );
        assert_eq!(
            VoiceState::Processing.indicator(),
            Some(VoiceIndicator::Processing)
        );
        assert_eq!(
            VoiceState::Speaking.indicator(),
            Some(VoiceIndicator::Speaking)
        );
    }

    #[test]
    fn indicator_shown_whenever_press_is_refused() {
        for state in [
            VoiceState::Idle,
            VoiceState::Recording,
            VoiceState::Processing,
            VoiceState::Speaking,
            VoiceState::Error,
        ] {
            assert_eq!(state.indicator().is_none(), state.accepts_press());
        }
    }

    #[test]
    fn press_accepted_only_when_idle() {
        assert!(VoiceState::Idle.accepts_press());
        for state in [
            VoiceState::Recording,
            VoiceState::Processing,
            VoiceState::Speaking,
            VoiceState::Error,
        ] {
            assert!(!state.accepts_press(), "{state} must ignore presses");
        }
    }

    #[test]
    fn recognition_error_codes_round_trip() {
        assert_eq!(
            RecognitionErrorKind::from_code("no-speech"),
            RecognitionErrorKind::NoSpeech
        );
        assert_eq!(
            RecognitionErrorKind::from_code("audio-capture"),
            RecognitionErrorKind::Other("audio-capture".to_string())
        );
        assert_eq!(RecognitionErrorKind::Network.code(), "network");
    }

    #[test]
    fn answer_request_serializes_camel_case() {
        let request = AnswerRequest::new("what is this?", "abc123", "Rust in 100 seconds");
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["question"], "what is this?");
        assert_eq!(json["contextId"], "abc123");
        assert_eq!(json["contextLabel"], "Rust in 100 seconds");
    }

    #[test]
    fn utterance_carries_params() {
        let utterance = SpeechUtterance::new(
            "hello",
            UtteranceParams {
                rate: 1.2,
                ..UtteranceParams::default()
            },
        );
        assert_eq!(utterance.text(), "hello");
        assert!((utterance.rate() - 1.2).abs() < f32::EPSILON);
        assert!((utterance.volume() - 1.0).abs() < f32::EPSILON);
    }
}
