//! `watchtalk embed`: frame construction for one video.

use watchtalk_core::Settings;
use watchtalk_surface::{EMBED_ALLOW_FEATURES, EmbedConfig};

use crate::error::CliError;

pub fn execute(
    settings: &Settings,
    content_id: &str,
    page_origin: Option<String>,
) -> Result<(), CliError> {
    let mut embed = EmbedConfig::from_settings(content_id, settings);
    if let Some(origin) = page_origin {
        embed = embed.with_page_origin(origin);
    }

    let url = embed
        .embed_url()
        .map_err(|e| CliError::Config(format!("invalid provider origin: {e}")))?;
    let target_origin = embed
        .target_origin()
        .map_err(|e| CliError::Config(format!("invalid provider origin: {e}")))?;

    println!("src:            {url}");
    println!("allow:          {EMBED_ALLOW_FEATURES}");
    println!("allowfullscreen: true");
    println!("message target: {target_origin}");
    Ok(())
}
