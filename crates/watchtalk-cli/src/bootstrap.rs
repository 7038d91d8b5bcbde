//! CLI bootstrap: resolves the settings every command runs with.
//!
//! Precedence, lowest first: built-in defaults, the JSON settings file,
//! then flags and `WATCHTALK_*` environment variables.

use std::path::{Path, PathBuf};

use watchtalk_core::{Settings, SettingsUpdate, validate_settings};

use crate::error::CliError;
use crate::parser::Cli;

/// Bootstrap configuration for the CLI.
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    /// JSON settings file, if one was given.
    pub settings_path: Option<PathBuf>,
    /// Per-invocation overrides.
    pub overrides: SettingsUpdate,
}

impl CliConfig {
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            settings_path: cli.config.clone(),
            overrides: cli.overrides.to_update(),
        }
    }

    /// Settings from the file alone (defaults when there is no file).
    pub fn file_settings(&self) -> Result<Settings, CliError> {
        match &self.settings_path {
            Some(path) => load_settings_file(path),
            None => Ok(Settings::with_defaults()),
        }
    }

    /// File settings with overrides applied, validated.
    pub fn effective_settings(&self) -> Result<Settings, CliError> {
        let mut settings = self.file_settings()?;
        settings.merge(&self.overrides);
        validate_settings(&settings)?;
        Ok(settings)
    }

    /// The settings file path, required by commands that write it.
    pub fn require_settings_path(&self) -> Result<&Path, CliError> {
        self.settings_path.as_deref().ok_or_else(|| {
            CliError::Arguments("--config <FILE> (or WATCHTALK_CONFIG) is required".to_string())
        })
    }
}

/// Read a settings file. A missing file yields the defaults.
pub fn load_settings_file(path: &Path) -> Result<Settings, CliError> {
    if !path.exists() {
        tracing::debug!(path = %path.display(), "Settings file not found, using defaults");
        return Ok(Settings::with_defaults());
    }

    let contents = std::fs::read_to_string(path)?;
    let mut settings = Settings::with_defaults();
    let from_file: Settings = serde_json::from_str(&contents)?;
    settings.merge(&SettingsUpdate::from_settings(&from_file));
    tracing::debug!(path = %path.display(), "Loaded settings file");
    Ok(settings)
}

/// Write `settings` as pretty JSON, creating parent directories.
pub fn save_settings_file(path: &Path, settings: &Settings) -> Result<(), CliError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }
    let json = serde_json::to_string_pretty(settings)?;
    std::fs::write(path, json)?;
    tracing::info!(path = %path.display(), "Saved settings file");
    Ok(())
}
