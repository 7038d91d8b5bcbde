//! `watchtalk config`: show, edit and reset the settings file.

use watchtalk_core::{Settings, SettingsUpdate, validate_settings};

use crate::bootstrap::{CliConfig, save_settings_file};
use crate::error::CliError;

/// Fields `config set` can write.
#[derive(Debug, Clone, Default)]
pub struct SetArgs {
    pub page_origin: Option<String>,
    pub speech_rate: Option<f32>,
    pub speech_pitch: Option<f32>,
    pub speech_volume: Option<f32>,
    pub answer_timeout_secs: Option<u64>,
}

impl SetArgs {
    fn to_update(&self) -> SettingsUpdate {
        SettingsUpdate {
            page_origin: self.page_origin.clone().map(Some),
            speech_rate: self.speech_rate.map(Some),
            speech_pitch: self.speech_pitch.map(Some),
            speech_volume: self.speech_volume.map(Some),
            answer_timeout_secs: self.answer_timeout_secs.map(Some),
            ..SettingsUpdate::default()
        }
    }

    const fn is_empty(&self) -> bool {
        self.page_origin.is_none()
            && self.speech_rate.is_none()
            && self.speech_pitch.is_none()
            && self.speech_volume.is_none()
            && self.answer_timeout_secs.is_none()
    }
}

pub fn show(config: &CliConfig) -> Result<(), CliError> {
    let settings = config.effective_settings()?;
    println!("{}", serde_json::to_string_pretty(&settings)?);
    Ok(())
}

/// Write the file plus the global overrides plus `args`.
pub fn set(config: &CliConfig, args: &SetArgs) -> Result<Settings, CliError> {
    let path = config.require_settings_path()?;
    if args.is_empty() && config.overrides == SettingsUpdate::default() {
        return Err(CliError::Arguments("nothing to set".to_string()));
    }

    let mut settings = config.file_settings()?;
    settings.merge(&config.overrides);
    settings.merge(&args.to_update());
    validate_settings(&settings)?;

    save_settings_file(path, &settings)?;
    println!("Settings written to {}", path.display());
    Ok(settings)
}

pub fn reset(config: &CliConfig) -> Result<(), CliError> {
    let path = config.require_settings_path()?;
    save_settings_file(path, &Settings::with_defaults())?;
    println!("Settings reset to defaults in {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bootstrap::load_settings_file;

    fn config_in(dir: &tempfile::TempDir) -> CliConfig {
        CliConfig {
            settings_path: Some(dir.path().join("settings.json")),
            overrides: SettingsUpdate::default(),
        }
    }

    #[test]
    fn test_set_writes_merged_settings() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config_in(&dir);
        config.overrides.hold_key = Some(Some("p".to_string()));

        let args = SetArgs {
            speech_rate: Some(1.25),
            ..SetArgs::default()
        };
        set(&config, &args).unwrap();

        let saved = load_settings_file(config.settings_path.as_ref().unwrap()).unwrap();
        assert_eq!(saved.hold_key.as_deref(), Some("p"));
        assert_eq!(saved.speech_rate, Some(1.25));
    }

    #[test]
    fn test_set_rejects_invalid_values_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        let args = SetArgs {
            speech_volume: Some(3.0),
            ..SetArgs::default()
        };

        assert!(matches!(set(&config, &args), Err(CliError::Config(_))));
        assert!(!config.settings_path.as_ref().unwrap().exists());
    }

    #[test]
    fn test_set_with_nothing_is_argument_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = set(&config_in(&dir), &SetArgs::default()).unwrap_err();
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn test_reset_restores_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = config_in(&dir);
        set(
            &config,
            &SetArgs {
                answer_timeout_secs: Some(60),
                ..SetArgs::default()
            },
        )
        .unwrap();

        reset(&config).unwrap();
        let saved = load_settings_file(config.settings_path.as_ref().unwrap()).unwrap();
        assert_eq!(saved, Settings::with_defaults());
    }
}
