//! Voice session state machine.
//!
//! Sans-IO: every input returns the effects the caller must perform, in
//! order. The machine never touches an engine, a timer, or a task itself, so
//! it can be driven synchronously from tests.
//!
//! ```text
//!   Idle → Recording → Processing → Speaking → Idle
//!              │            │
//!              └──→ Error ←─┘ (apology) → Idle
//! ```

use watchtalk_core::{
    AnswerError, AnswerRequest, ControllerEvent, RecognitionErrorKind, RecognitionEvent,
    SessionCounter, SessionErrorKind, SessionId, SpeechUtterance, SynthesisEvent,
    UtteranceParams, VoiceState,
};

use crate::messages::apology_for;

// ── Context ────────────────────────────────────────────────────────

/// The video questions are asked about.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct VideoContext {
    /// Provider content id.
    pub id: String,
    /// Video title.
    pub title: String,
}

impl VideoContext {
    pub fn new(id: impl Into<String>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
        }
    }
}

// ── Effects ────────────────────────────────────────────────────────

/// Work the controller must carry out after a transition.
#[derive(Debug, Clone, PartialEq)]
pub enum VoiceEffect {
    StartRecognition(SessionId),
    /// Ask the recognizer to finish. Its terminal events still arrive.
    StopRecognition,
    AbortRecognition,
    CancelSpeech,
    Speak {
        session: SessionId,
        utterance: SpeechUtterance,
    },
    RequestAnswer {
        session: SessionId,
        request: AnswerRequest,
    },
    Emit(ControllerEvent),
}

// ── Session ────────────────────────────────────────────────────────

/// One press-to-answer cycle.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoiceSession {
    pub id: SessionId,
    pub state: VoiceState,
    pub transcript: Option<String>,
    pub answer: Option<String>,
    pub error: Option<SessionErrorKind>,
}

impl VoiceSession {
    const fn new(id: SessionId) -> Self {
        Self {
            id,
            state: VoiceState::Recording,
            transcript: None,
            answer: None,
            error: None,
        }
    }
}

// ── Machine ────────────────────────────────────────────────────────

/// Push-to-talk session state machine.
///
/// At most one session is live. It is dropped (state back to `Idle`) when
/// its cycle completes or it is superseded.
#[derive(Debug)]
pub struct VoiceSessionMachine {
    counter: SessionCounter,
    session: Option<VoiceSession>,
    context: VideoContext,
    utterance: UtteranceParams,
}

impl VoiceSessionMachine {
    pub const fn new(context: VideoContext, utterance: UtteranceParams) -> Self {
        Self {
            counter: SessionCounter::new(),
            session: None,
            context,
            utterance,
        }
    }

    pub fn state(&self) -> VoiceState {
        self.session
            .as_ref()
            .map_or(VoiceState::Idle, |session| session.state)
    }

    pub const fn session(&self) -> Option<&VoiceSession> {
        self.session.as_ref()
    }

    pub const fn context(&self) -> &VideoContext {
        &self.context
    }

    /// Push-to-talk pressed. Ignored unless `Idle`.
    pub fn press(&mut self) -> Vec<VoiceEffect> {
        if !self.state().accepts_press() {
            tracing::debug!(state = %self.state(), "Press ignored, session in flight");
            return Vec::new();
        }

        let id = self.counter.advance();
        self.session = Some(VoiceSession::new(id));
        tracing::debug!(session = %id, "Session started");

        vec![
            VoiceEffect::CancelSpeech,
            VoiceEffect::StartRecognition(id),
            self.state_event(),
        ]
    }

    /// Push-to-talk released. Recording continues until the recognizer ends.
    pub fn release(&mut self) -> Vec<VoiceEffect> {
        if self.state() == VoiceState::Recording {
            vec![VoiceEffect::StopRecognition]
        } else {
            Vec::new()
        }
    }

    pub fn on_recognition(&mut self, id: SessionId, event: RecognitionEvent) -> Vec<VoiceEffect> {
        let Some(state) = self.live_state(id) else {
            tracing::debug!(session = %id, ?event, "Stale recognition event discarded");
            return Vec::new();
        };
        if state != VoiceState::Recording {
            // End after a result or error is the normal terminal signal.
            return Vec::new();
        }

        match event {
            RecognitionEvent::Result(transcript) => self.begin_processing(id, transcript),
            RecognitionEvent::Error(code) => {
                self.fail(id, SessionErrorKind::Recognition { code })
            }
            RecognitionEvent::End => {
                tracing::debug!(session = %id, "Recognizer ended without a result");
                self.finish(id)
            }
        }
    }

    pub fn on_answer(
        &mut self,
        id: SessionId,
        result: Result<String, AnswerError>,
    ) -> Vec<VoiceEffect> {
        if self.live_state(id) != Some(VoiceState::Processing) {
            tracing::debug!(session = %id, "Late answer discarded");
            return Vec::new();
        }

        match result {
            Ok(answer) => {
                let utterance = SpeechUtterance::new(answer.as_str(), self.utterance);
                if let Some(session) = self.session.as_mut() {
                    session.state = VoiceState::Speaking;
                    session.answer = Some(answer.clone());
                }
                vec![
                    VoiceEffect::Emit(ControllerEvent::Answer {
                        session: id,
                        text: answer,
                    }),
                    VoiceEffect::Speak {
                        session: id,
                        utterance,
                    },
                    self.state_event(),
                ]
            }
            Err(e) => {
                tracing::warn!(session = %id, error = %e, "Answer service failed");
                self.fail(id, SessionErrorKind::AnswerService)
            }
        }
    }

    pub fn on_synthesis(&mut self, id: SessionId, event: SynthesisEvent) -> Vec<VoiceEffect> {
        let Some(state) = self.live_state(id) else {
            return Vec::new();
        };
        if !matches!(state, VoiceState::Speaking | VoiceState::Error) {
            return Vec::new();
        }

        match event {
            SynthesisEvent::Start => Vec::new(),
            SynthesisEvent::End => self.finish(id),
            SynthesisEvent::Error(reason) => {
                // No apology for a failed apology.
                tracing::warn!(session = %id, %reason, "Speech synthesis failed");
                self.finish(id)
            }
        }
    }

    /// The recognizer refused to start for session `id`.
    pub fn on_recognition_start_failed(&mut self, id: SessionId, reason: &str) -> Vec<VoiceEffect> {
        tracing::warn!(session = %id, %reason, "Recognizer failed to start");
        self.on_recognition(
            id,
            RecognitionEvent::Error(RecognitionErrorKind::Other(reason.to_string())),
        )
    }

    /// Switch to another video. Any live session is superseded.
    pub fn change_context(&mut self, context: VideoContext) -> Vec<VoiceEffect> {
        self.context = context;
        self.supersede()
    }

    /// Teardown: abandon the live session and stop both engines.
    pub fn shutdown(&mut self) -> Vec<VoiceEffect> {
        self.supersede()
    }

    // ── Internals ──────────────────────────────────────────────────

    fn live_state(&self, id: SessionId) -> Option<VoiceState> {
        self.session
            .as_ref()
            .filter(|session| session.id == id)
            .map(|session| session.state)
    }

    fn begin_processing(&mut self, id: SessionId, transcript: String) -> Vec<VoiceEffect> {
        let request = AnswerRequest::new(
            transcript.as_str(),
            self.context.id.as_str(),
            self.context.title.as_str(),
        );
        if let Some(session) = self.session.as_mut() {
            session.state = VoiceState::Processing;
            session.transcript = Some(transcript.clone());
        }
        tracing::debug!(session = %id, "Transcript captured");

        vec![
            VoiceEffect::CancelSpeech,
            VoiceEffect::Emit(ControllerEvent::Transcript {
                session: id,
                text: transcript,
            }),
            VoiceEffect::RequestAnswer {
                session: id,
                request,
            },
            self.state_event(),
        ]
    }

    fn fail(&mut self, id: SessionId, error: SessionErrorKind) -> Vec<VoiceEffect> {
        let utterance = SpeechUtterance::new(apology_for(&error), self.utterance);
        if let Some(session) = self.session.as_mut() {
            session.state = VoiceState::Error;
            session.error = Some(error.clone());
        }
        tracing::debug!(session = %id, ?error, "Session failed");

        vec![
            VoiceEffect::Emit(ControllerEvent::SessionFailed { session: id, error }),
            VoiceEffect::Speak {
                session: id,
                utterance,
            },
            self.state_event(),
        ]
    }

    fn finish(&mut self, id: SessionId) -> Vec<VoiceEffect> {
        self.session = None;
        tracing::debug!(session = %id, "Session finished");
        vec![VoiceEffect::Emit(ControllerEvent::voice_state(
            Some(id),
            VoiceState::Idle,
        ))]
    }

    fn supersede(&mut self) -> Vec<VoiceEffect> {
        let Some(session) = self.session.take() else {
            return Vec::new();
        };
        // Burn an id so nothing tagged with the old one can match again.
        self.counter.advance();
        tracing::debug!(session = %session.id, state = %session.state, "Session superseded");

        vec![
            VoiceEffect::AbortRecognition,
            VoiceEffect::CancelSpeech,
            VoiceEffect::Emit(ControllerEvent::voice_state(
                Some(session.id),
                VoiceState::Idle,
            )),
        ]
    }

    fn state_event(&self) -> VoiceEffect {
        let session = self.session.as_ref().map(|session| session.id);
        VoiceEffect::Emit(ControllerEvent::voice_state(session, self.state()))
    }
}
