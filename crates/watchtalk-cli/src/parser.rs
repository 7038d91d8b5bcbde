//! Main CLI parser and top-level argument handling.

use std::path::PathBuf;

use clap::{Args, Parser};
use watchtalk_core::{ReleasePolicy, SettingsUpdate};

use crate::commands::Commands;

/// Hold-to-pause and push-to-talk controllers for embedded video.
#[derive(Parser)]
#[command(name = "watchtalk")]
#[command(about = "Drive the watchtalk hold-to-pause and push-to-talk controllers")]
#[command(version)]
pub struct Cli {
    /// JSON settings file
    #[arg(long, global = true, env = "WATCHTALK_CONFIG")]
    pub config: Option<PathBuf>,

    /// Enable verbose/debug output
    #[arg(short = 'v', long = "verbose", global = true)]
    pub verbose: bool,

    #[command(flatten)]
    pub overrides: SettingsOverrides,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Per-invocation settings overrides, applied on top of the settings file.
#[derive(Args, Debug, Default, Clone)]
pub struct SettingsOverrides {
    /// Key whose sustained press pauses the video
    #[arg(long, global = true, env = "WATCHTALK_HOLD_KEY")]
    pub hold_key: Option<String>,

    /// What releasing the hold key does: clear-indicator or resume
    #[arg(long, global = true, env = "WATCHTALK_RELEASE_POLICY", value_parser = parse_release_policy)]
    pub release_policy: Option<ReleasePolicy>,

    /// Delay between surface load and accepting commands, in milliseconds
    #[arg(long, global = true, env = "WATCHTALK_SETTLE_MS")]
    pub settle_ms: Option<u64>,

    /// Answer service endpoint (placeholder answers when unset)
    #[arg(long, global = true, env = "WATCHTALK_ANSWER_ENDPOINT")]
    pub answer_endpoint: Option<String>,

    /// Recognition language (BCP-47)
    #[arg(long, global = true, env = "WATCHTALK_LANGUAGE")]
    pub language: Option<String>,
}

impl SettingsOverrides {
    /// Only the overrides that were given; everything else is left alone.
    pub fn to_update(&self) -> SettingsUpdate {
        SettingsUpdate {
            hold_key: self.hold_key.clone().map(Some),
            release_policy: self.release_policy.map(Some),
            readiness_settle_ms: self.settle_ms.map(Some),
            answer_endpoint: self.answer_endpoint.clone().map(Some),
            recognition_language: self.language.clone().map(Some),
            ..SettingsUpdate::default()
        }
    }
}

pub fn parse_release_policy(value: &str) -> Result<ReleasePolicy, String> {
    match value.to_ascii_lowercase().replace('_', "-").as_str() {
        "clear-indicator" | "clear" => Ok(ReleasePolicy::ClearIndicator),
        "resume" => Ok(ReleasePolicy::Resume),
        other => Err(format!(
            "unknown release policy '{other}' (expected clear-indicator or resume)"
        )),
    }
}
