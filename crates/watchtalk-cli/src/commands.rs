//! Main commands enum and primary subcommands.

use clap::{Subcommand, ValueEnum};

use crate::handlers::hold::KeyStep;

/// Available commands.
#[derive(Subcommand)]
pub enum Commands {
    /// Print the embed URL and frame attributes for a video
    Embed {
        /// Provider content id (e.g. "dQw4w9WgXcQ")
        content_id: String,
        /// Origin of the page hosting the embed
        #[arg(long, env = "WATCHTALK_PAGE_ORIGIN")]
        page_origin: Option<String>,
    },

    /// Ask one spoken question about a video
    Ask {
        /// What the recognizer "hears"
        question: Option<String>,
        /// Video id the question is about
        #[arg(long, default_value = "dQw4w9WgXcQ")]
        video_id: String,
        /// Video title the question is about
        #[arg(long, default_value = "Untitled video")]
        title: String,
        /// Make the recognizer fail with this error code (e.g. "no-speech")
        #[arg(long, conflicts_with = "question")]
        recognition_error: Option<String>,
        /// Simulated answer service latency in milliseconds (placeholder only)
        #[arg(long, default_value = "0")]
        latency_ms: u64,
    },

    /// Replay a timed key script against a freshly mounted surface
    Hold {
        /// Provider content id
        content_id: String,
        /// Key steps, e.g. down@0 repeat@100 up@400
        #[arg(required = true)]
        steps: Vec<KeyStep>,
        /// When the embed frame reports loaded, in milliseconds
        #[arg(long, default_value = "0")]
        load_after_ms: u64,
        /// Command channel the surface exposes
        #[arg(long, value_enum, default_value_t = ChannelChoice::Message)]
        channel: ChannelChoice,
        /// Make every command send fail
        #[arg(long)]
        fail_sends: bool,
    },

    /// View or edit the settings file
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

/// Which command channel the simulated surface offers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ChannelChoice {
    /// Direct handle to the player API
    Direct,
    /// Cross-origin message channel
    Message,
    /// Both (the direct handle wins)
    Both,
}

/// Settings file commands.
#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show effective settings (file plus overrides)
    Show,
    /// Write settings to the file given with --config
    Set {
        /// Page origin forwarded to the embed
        #[arg(long)]
        page_origin: Option<String>,
        /// Utterance rate (0.1-10)
        #[arg(long)]
        speech_rate: Option<f32>,
        /// Utterance pitch (0-2)
        #[arg(long)]
        speech_pitch: Option<f32>,
        /// Utterance volume (0-1)
        #[arg(long)]
        speech_volume: Option<f32>,
        /// Answer request timeout in seconds (1-300)
        #[arg(long)]
        answer_timeout_secs: Option<u64>,
    },
    /// Reset the settings file to defaults
    Reset,
}
