//! `watchtalk ask`: one push-to-talk round trip.
//!
//! Presses and releases the talk button, lets the scripted recognizer
//! "hear" the question and prints every controller event until the
//! session returns to idle.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use watchtalk_core::{
    AnswerService, ChannelEmitter, ControllerEvent, PointerGesture, RecognitionConfig, Settings,
    StaticCapabilities, VoiceState,
};
use watchtalk_voice::{
    PlaceholderAnswerService, VideoContext, VoiceInbox, VoiceQueryController,
    answer_service_from_settings,
};

use crate::adapters::{ConsoleSynthesizer, ScriptedRecognizer};
use crate::error::CliError;
use crate::presentation::describe;

/// Grace period on top of the answer timeout before giving up on a session.
const SESSION_GRACE: Duration = Duration::from_secs(5);

/// Arguments of the ask command.
#[derive(Debug, Clone)]
pub struct AskArgs {
    pub question: Option<String>,
    pub context: VideoContext,
    pub recognition_error: Option<String>,
    pub latency: Duration,
}

pub async fn execute(settings: &Settings, args: AskArgs) -> Result<(), CliError> {
    let inbox = VoiceInbox::new();
    let handle = inbox.handle();

    let recognition = RecognitionConfig {
        language: settings.effective_recognition_language().to_string(),
        ..RecognitionConfig::default()
    };
    let recognizer = match (&args.question, &args.recognition_error) {
        (Some(question), None) => {
            ScriptedRecognizer::hearing(handle.speech_sink(), recognition, question)
        }
        (None, Some(code)) => ScriptedRecognizer::failing(handle.speech_sink(), recognition, code),
        _ => {
            return Err(CliError::Arguments(
                "give either a question or --recognition-error".to_string(),
            ));
        }
    };

    let answers: Arc<dyn AnswerService> = if settings.answer_endpoint.is_some() {
        answer_service_from_settings(settings)?
    } else {
        Arc::new(PlaceholderAnswerService::new().with_latency(args.latency))
    };

    let (emitter, mut events) = ChannelEmitter::new();
    let controller = VoiceQueryController::new(
        inbox,
        &StaticCapabilities::all(),
        Box::new(recognizer),
        Box::new(ConsoleSynthesizer::new(handle.speech_sink())),
        answers,
        Box::new(emitter),
        args.context,
        settings.effective_utterance_params(),
    );
    controller.ensure_available()?;
    let task = tokio::spawn(controller.run());

    handle.gesture(PointerGesture::PointerDown)?;
    handle.gesture(PointerGesture::PointerUp)?;

    let limit = settings.effective_answer_timeout() + SESSION_GRACE;
    let outcome = tokio::time::timeout(limit, watch_session(&mut events)).await;

    handle.shutdown()?;
    if task.await.is_err() {
        tracing::warn!("Voice controller task panicked");
    }

    match outcome {
        Ok(()) => Ok(()),
        Err(_) => Err(CliError::Service(format!(
            "session did not finish within {}s",
            limit.as_secs()
        ))),
    }
}

/// Print events until the session that started recording is idle again.
async fn watch_session(events: &mut mpsc::UnboundedReceiver<ControllerEvent>) {
    let mut started = false;
    while let Some(event) = events.recv().await {
        println!("{}", describe(&event));
        if let ControllerEvent::VoiceStateChanged { state, .. } = event {
            match state {
                VoiceState::Recording => started = true,
                VoiceState::Idle if started => return,
                _ => {}
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(question: Option<&str>, error: Option<&str>) -> AskArgs {
        AskArgs {
            question: question.map(str::to_string),
            context: VideoContext::new("abc", "Rust in 100 Seconds"),
            recognition_error: error.map(str::to_string),
            latency: Duration::ZERO,
        }
    }

    #[tokio::test]
    async fn test_question_round_trip() {
        let settings = Settings::with_defaults();
        execute(&settings, args(Some("what is this about"), None))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn test_recognition_error_still_finishes() {
        let settings = Settings::with_defaults();
        execute(&settings, args(None, Some("no-speech"))).await.unwrap();
    }

    #[tokio::test]
    async fn test_requires_question_or_error() {
        let settings = Settings::with_defaults();
        let err = execute(&settings, args(None, None)).await.unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }
}
