//! Scripted speech engines.

use watchtalk_core::{
    RecognitionConfig, RecognitionErrorKind, RecognitionEvent, SessionId, SpeechError,
    SpeechEventSink, SpeechRecognizer, SpeechSynthesizer, SpeechUtterance, SynthesisEvent,
};

/// Recognizer that "hears" a fixed outcome as soon as it starts.
#[derive(Debug)]
pub struct ScriptedRecognizer {
    sink: SpeechEventSink,
    config: RecognitionConfig,
    outcome: RecognitionEvent,
    active: Option<SessionId>,
}

impl ScriptedRecognizer {
    /// Recognize `transcript`.
    pub fn hearing(sink: SpeechEventSink, config: RecognitionConfig, transcript: &str) -> Self {
        Self::new(sink, config, RecognitionEvent::Result(transcript.to_string()))
    }

    /// Fail with the recognizer error `code` (e.g. `"no-speech"`).
    pub fn failing(sink: SpeechEventSink, config: RecognitionConfig, code: &str) -> Self {
        Self::new(
            sink,
            config,
            RecognitionEvent::Error(RecognitionErrorKind::from_code(code)),
        )
    }

    const fn new(sink: SpeechEventSink, config: RecognitionConfig, outcome: RecognitionEvent) -> Self {
        Self {
            sink,
            config,
            outcome,
            active: None,
        }
    }
}

impl SpeechRecognizer for ScriptedRecognizer {
    fn start(&mut self, session: SessionId) -> Result<(), SpeechError> {
        if self.active.is_some() {
            return Err(SpeechError::RecognitionStart(
                "recognition already started".to_string(),
            ));
        }
        self.active = Some(session);
        println!("  🎤 listening ({})", self.config.language);
        Ok(())
    }

    /// Single-shot: the scripted outcome is delivered when capture stops.
    fn stop(&mut self) {
        if let Some(session) = self.active.take() {
            if let RecognitionEvent::Result(transcript) = &self.outcome {
                println!("  🎤 heard: \"{transcript}\"");
            }
            self.sink.recognition(session, self.outcome.clone());
            self.sink.recognition(session, RecognitionEvent::End);
        }
    }

    fn abort(&mut self) {
        if let Some(session) = self.active.take() {
            self.sink.recognition(
                session,
                RecognitionEvent::Error(RecognitionErrorKind::Aborted),
            );
            self.sink.recognition(session, RecognitionEvent::End);
        }
    }
}

/// Synthesizer that prints utterances instead of playing them.
#[derive(Debug)]
pub struct ConsoleSynthesizer {
    sink: SpeechEventSink,
}

impl ConsoleSynthesizer {
    pub const fn new(sink: SpeechEventSink) -> Self {
        Self { sink }
    }
}

impl SpeechSynthesizer for ConsoleSynthesizer {
    fn speak(&mut self, session: SessionId, utterance: &SpeechUtterance) -> Result<(), SpeechError> {
        self.sink.synthesis(session, SynthesisEvent::Start);
        println!(
            "  🔊 \"{}\" (rate {}, pitch {}, volume {})",
            utterance.text(),
            utterance.rate(),
            utterance.pitch(),
            utterance.volume()
        );
        self.sink.synthesis(session, SynthesisEvent::End);
        Ok(())
    }

    fn cancel(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::{Arc, Mutex};
    use watchtalk_core::{SessionCounter, SpeechEvent};

    fn recording_sink() -> (SpeechEventSink, Arc<Mutex<Vec<SpeechEvent>>>) {
        let seen = Arc::new(Mutex::new(Vec::new()));
        let sink = {
            let seen = Arc::clone(&seen);
            SpeechEventSink::new(move |event| seen.lock().unwrap().push(event))
        };
        (sink, seen)
    }

    #[test]
    fn test_outcome_delivered_on_stop_then_end() {
        let (sink, seen) = recording_sink();
        let mut recognizer =
            ScriptedRecognizer::hearing(sink, RecognitionConfig::default(), "hello");
        let session = SessionCounter::new().advance();

        recognizer.start(session).unwrap();
        assert!(seen.lock().unwrap().is_empty());

        recognizer.stop();
        let seen = seen.lock().unwrap();
        assert_eq!(
            *seen,
            vec![
                SpeechEvent::Recognition {
                    session,
                    event: RecognitionEvent::Result("hello".to_string()),
                },
                SpeechEvent::Recognition {
                    session,
                    event: RecognitionEvent::End,
                },
            ]
        );
    }

    #[test]
    fn test_second_start_is_refused() {
        let (sink, _) = recording_sink();
        let mut recognizer = ScriptedRecognizer::failing(sink, RecognitionConfig::default(), "no-speech");
        let mut counter = SessionCounter::new();

        recognizer.start(counter.advance()).unwrap();
        assert!(recognizer.start(counter.advance()).is_err());
    }

    #[test]
    fn test_synthesizer_reports_start_and_end() {
        let (sink, seen) = recording_sink();
        let mut synthesizer = ConsoleSynthesizer::new(sink);
        let session = SessionCounter::new().advance();

        synthesizer
            .speak(session, &SpeechUtterance::new("hi", Default::default()))
            .unwrap();
        assert_eq!(seen.lock().unwrap().len(), 2);
    }
}
