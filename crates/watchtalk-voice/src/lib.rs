#![doc = include_str!(concat!(env!("OUT_DIR"), "/README_GENERATED.md"))]
#![deny(unused_crate_dependencies)]

pub mod answer;
pub mod controller;
pub mod error;
pub mod machine;
pub mod messages;

// Re-export key types for convenience
pub use answer::{HttpAnswerService, PlaceholderAnswerService, answer_service_from_settings};
pub use controller::{VoiceHandle, VoiceInbox, VoiceInput, VoiceQueryController};
pub use error::VoiceError;
pub use machine::{VideoContext, VoiceEffect, VoiceSession, VoiceSessionMachine};

