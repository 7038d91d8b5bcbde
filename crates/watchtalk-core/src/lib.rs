#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod domain;
pub mod events;
pub mod ports;
pub mod readiness;
pub mod settings;

// Re-export commonly used types for convenience
pub use domain::{
    AnswerRequest, ChannelKind, CommandEnvelope, GestureIntent, HoldKey, InputTarget,
    KeyDisposition, KeyInput, PointerGesture, Readiness, RecognitionErrorKind, ReleasePolicy,
    SessionCounter, SessionErrorKind, SessionId, SpeechUtterance, SurfaceCommand, SurfaceId,
    UtteranceParams, VoiceIndicator, VoiceState, is_text_entry_target,
};
pub use events::ControllerEvent;
pub use ports::{
    AnswerError, AnswerService, Capability, CapabilityProbe, ChannelEmitter, CoreError,
    EventEmitter, MessagePort, NoopEmitter, PlayerApi, RecognitionConfig, RecognitionEvent,
    SpeechError, SpeechEvent, SpeechEventSink, SpeechRecognizer, SpeechSynthesizer,
    StaticCapabilities, SurfaceError, SynthesisEvent,
};
pub use readiness::{ReadinessError, ReadinessSignal, ReadinessTrigger, fire_when_ready, readiness_pair};
pub use settings::{
    DEFAULT_ANSWER_TIMEOUT_SECS, DEFAULT_HOLD_KEY, DEFAULT_PROVIDER_ORIGIN,
    DEFAULT_RECOGNITION_LANGUAGE, DEFAULT_SETTLE_MS, Settings, SettingsError, SettingsUpdate,
    validate_settings,
};
