//! Push-to-talk controller.
//!
//! Owns the [`VoiceSessionMachine`] and the speech engines, and serializes
//! everything that can change them through one input queue: host gestures,
//! engine events (via [`SpeechEventSink`]) and answer completions from
//! spawned tasks all arrive as [`VoiceInput`] and are applied in order.

use std::collections::VecDeque;
use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use watchtalk_core::{
    AnswerError, AnswerRequest, AnswerService, CapabilityProbe, ControllerEvent, EventEmitter,
    GestureIntent, PointerGesture, SessionId, SpeechEvent, SpeechEventSink, SpeechRecognizer,
    SpeechSynthesizer, SynthesisEvent, UtteranceParams, VoiceState,
};

use crate::error::VoiceError;
use crate::machine::{VideoContext, VoiceEffect, VoiceSessionMachine};

// ── Input queue ────────────────────────────────────────────────────

/// Everything the controller reacts to.
#[derive(Debug)]
pub enum VoiceInput {
    Gesture(PointerGesture),
    Speech(SpeechEvent),
    Answer {
        session: SessionId,
        result: Result<String, AnswerError>,
    },
    ChangeContext(VideoContext),
    Shutdown,
}

/// Sending side of a controller's input queue. Cheap to clone.
#[derive(Debug, Clone)]
pub struct VoiceHandle {
    tx: mpsc::UnboundedSender<VoiceInput>,
}

impl VoiceHandle {
    pub fn send(&self, input: VoiceInput) -> Result<(), VoiceError> {
        self.tx.send(input).map_err(|_| VoiceError::Stopped)
    }

    pub fn gesture(&self, gesture: PointerGesture) -> Result<(), VoiceError> {
        self.send(VoiceInput::Gesture(gesture))
    }

    pub fn change_context(&self, context: VideoContext) -> Result<(), VoiceError> {
        self.send(VoiceInput::ChangeContext(context))
    }

    pub fn shutdown(&self) -> Result<(), VoiceError> {
        self.send(VoiceInput::Shutdown)
    }

    /// A sink for speech engines that feeds this queue.
    pub fn speech_sink(&self) -> SpeechEventSink {
        let tx = self.tx.clone();
        SpeechEventSink::new(move |event| {
            if tx.send(VoiceInput::Speech(event)).is_err() {
                tracing::trace!("Voice controller gone, speech event dropped");
            }
        })
    }
}

/// A controller's input queue, created before the engines so they can be
/// handed a [`SpeechEventSink`].
#[derive(Debug)]
pub struct VoiceInbox {
    tx: mpsc::UnboundedSender<VoiceInput>,
    rx: mpsc::UnboundedReceiver<VoiceInput>,
}

impl VoiceInbox {
    pub fn new() -> Self {
        let (tx, rx) = mpsc::unbounded_channel();
        Self { tx, rx }
    }

    pub fn handle(&self) -> VoiceHandle {
        VoiceHandle {
            tx: self.tx.clone(),
        }
    }
}

impl Default for VoiceInbox {
    fn default() -> Self {
        Self::new()
    }
}

// ── Controller ─────────────────────────────────────────────────────

/// Binds push-to-talk gestures to the voice session machine.
pub struct VoiceQueryController {
    machine: VoiceSessionMachine,
    recognizer: Box<dyn SpeechRecognizer>,
    synthesizer: Box<dyn SpeechSynthesizer>,
    answers: Arc<dyn AnswerService>,
    emitter: Box<dyn EventEmitter>,
    inbox: VoiceInbox,
    available: bool,
    pending_answers: Vec<JoinHandle<()>>,
}

impl VoiceQueryController {
    /// Build a controller. Platform capability is checked here, once; an
    /// unsupported platform yields a controller that accepts no input.
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        inbox: VoiceInbox,
        capabilities: &dyn CapabilityProbe,
        recognizer: Box<dyn SpeechRecognizer>,
        synthesizer: Box<dyn SpeechSynthesizer>,
        answers: Arc<dyn AnswerService>,
        emitter: Box<dyn EventEmitter>,
        context: VideoContext,
        utterance: UtteranceParams,
    ) -> Self {
        let available = capabilities.voice_supported();
        if available {
            tracing::debug!(video = %context.id, "Voice controller ready");
        } else {
            tracing::info!(
                recognition = ?capabilities.recognition(),
                synthesis = ?capabilities.synthesis(),
                "Voice input unavailable on this platform"
            );
            emitter.emit(ControllerEvent::VoiceUnavailable);
        }

        Self {
            machine: VoiceSessionMachine::new(context, utterance),
            recognizer,
            synthesizer,
            answers,
            emitter,
            inbox,
            available,
            pending_answers: Vec::new(),
        }
    }

    pub const fn is_available(&self) -> bool {
        self.available
    }

    pub fn ensure_available(&self) -> Result<(), VoiceError> {
        if self.available {
            Ok(())
        } else {
            Err(VoiceError::Unsupported)
        }
    }

    pub fn state(&self) -> VoiceState {
        self.machine.state()
    }

    pub const fn machine(&self) -> &VoiceSessionMachine {
        &self.machine
    }

    pub fn handle(&self) -> VoiceHandle {
        self.inbox.handle()
    }

    /// Process inputs until `Shutdown` arrives.
    pub async fn run(mut self) {
        while let Some(input) = self.inbox.rx.recv().await {
            if !self.apply(input) {
                break;
            }
        }
        tracing::debug!("Voice controller stopped");
    }

    /// Process every input already queued, without waiting. Returns `false`
    /// once `Shutdown` was processed.
    pub fn drain(&mut self) -> bool {
        while let Ok(input) = self.inbox.rx.try_recv() {
            if !self.apply(input) {
                return false;
            }
        }
        true
    }

    /// Apply one input. Returns `false` after `Shutdown`.
    pub fn apply(&mut self, input: VoiceInput) -> bool {
        if let VoiceInput::Shutdown = input {
            self.teardown();
            return false;
        }
        if !self.available {
            tracing::trace!(?input, "Voice unavailable, input dropped");
            return true;
        }

        let effects = match input {
            VoiceInput::Gesture(gesture) => match gesture.intent() {
                GestureIntent::Press => self.machine.press(),
                GestureIntent::Release => self.machine.release(),
            },
            VoiceInput::Speech(SpeechEvent::Recognition { session, event }) => {
                self.machine.on_recognition(session, event)
            }
            VoiceInput::Speech(SpeechEvent::Synthesis { session, event }) => {
                self.machine.on_synthesis(session, event)
            }
            VoiceInput::Answer { session, result } => self.machine.on_answer(session, result),
            VoiceInput::ChangeContext(context) => self.machine.change_context(context),
            VoiceInput::Shutdown => Vec::new(),
        };
        self.perform(effects);
        true
    }

    fn teardown(&mut self) {
        let effects = self.machine.shutdown();
        self.perform(effects);
        for task in self.pending_answers.drain(..) {
            task.abort();
        }
        self.inbox.rx.close();
    }

    fn perform(&mut self, effects: Vec<VoiceEffect>) {
        let mut queue: VecDeque<VoiceEffect> = effects.into();

        while let Some(effect) = queue.pop_front() {
            match effect {
                VoiceEffect::StartRecognition(session) => {
                    if let Err(e) = self.recognizer.start(session) {
                        queue.extend(
                            self.machine
                                .on_recognition_start_failed(session, &e.to_string()),
                        );
                    }
                }
                VoiceEffect::StopRecognition => self.recognizer.stop(),
                VoiceEffect::AbortRecognition => self.recognizer.abort(),
                VoiceEffect::CancelSpeech => self.synthesizer.cancel(),
                VoiceEffect::Speak { session, utterance } => {
                    if let Err(e) = self.synthesizer.speak(session, &utterance) {
                        queue.extend(
                            self.machine
                                .on_synthesis(session, SynthesisEvent::Error(e.to_string())),
                        );
                    }
                }
                VoiceEffect::RequestAnswer { session, request } => {
                    self.spawn_answer(session, request);
                }
                VoiceEffect::Emit(event) => self.emitter.emit(event),
            }
        }
    }

    fn spawn_answer(&mut self, session: SessionId, request: AnswerRequest) {
        let answers = Arc::clone(&self.answers);
        let tx = self.inbox.tx.clone();

        self.pending_answers.retain(|task| !task.is_finished());
        self.pending_answers.push(tokio::spawn(async move {
            let result = answers.resolve(&request).await;
            if tx.send(VoiceInput::Answer { session, result }).is_err() {
                tracing::trace!(%session, "Voice controller gone, answer dropped");
            }
        }));
    }
}

impl std::fmt::Debug for VoiceQueryController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VoiceQueryController")
            .field("machine", &self.machine)
            .field("available", &self.available)
            .field("pending_answers", &self.pending_answers.len())
            .finish_non_exhaustive()
    }
}
