//! Spoken messages.

use watchtalk_core::{RecognitionErrorKind, SessionErrorKind};

pub const NO_SPEECH_APOLOGY: &str = "I didn't hear anything. Please try again.";

pub const RECOGNITION_APOLOGY: &str = "Sorry, there was an error with speech recognition.";

pub const ANSWER_APOLOGY: &str = "Sorry, I encountered an error processing your question.";

/// The apology spoken when a session fails.
pub fn apology_for(error: &SessionErrorKind) -> &'static str {
    match error {
        SessionErrorKind::Recognition {
            code: RecognitionErrorKind::NoSpeech,
        } => NO_SPEECH_APOLOGY,
        SessionErrorKind::Recognition { .. } => RECOGNITION_APOLOGY,
        SessionErrorKind::AnswerService => ANSWER_APOLOGY,
    }
}

/// Templated reply used until a real answer backend is configured.
pub fn placeholder_answer(question: &str, video_title: &str) -> String {
    format!(
        "Based on the video \"{video_title}\", I understand you asked: \"{question}\". This feature is currently being developed."
    )
}
