//! Embed construction for the remote surface.
//!
//! The player's control API only answers `postMessage` commands when the
//! embed was created with `enablejsapi=1`, and only from the page origin it
//! was told about.

use url::Url;
use watchtalk_core::{DEFAULT_PROVIDER_ORIGIN, Settings, SurfaceId};

/// Features the embed frame is allowed to use (iframe `allow` attribute).
pub const EMBED_ALLOW_FEATURES: &str = "accelerometer; autoplay; clipboard-write; encrypted-media; gyroscope; picture-in-picture; web-share";

/// Everything needed to build the embed frame for one surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmbedConfig {
    pub content_id: SurfaceId,
    /// Origin serving the player, e.g. `https://www.youtube.com`.
    pub provider_origin: String,
    /// Origin of the hosting page, forwarded so the player accepts messages.
    pub page_origin: Option<String>,
}

impl EmbedConfig {
    pub fn new(content_id: impl Into<SurfaceId>) -> Self {
        Self {
            content_id: content_id.into(),
            provider_origin: DEFAULT_PROVIDER_ORIGIN.to_string(),
            page_origin: None,
        }
    }

    pub fn from_settings(content_id: impl Into<SurfaceId>, settings: &Settings) -> Self {
        Self {
            content_id: content_id.into(),
            provider_origin: settings.effective_provider_origin().to_string(),
            page_origin: settings.page_origin.clone(),
        }
    }

    #[must_use]
    pub fn with_page_origin(mut self, origin: impl Into<String>) -> Self {
        self.page_origin = Some(origin.into());
        self
    }

    /// The embed frame source URL.
    ///
    /// `https://www.youtube.com/embed/{id}?rel=0&enablejsapi=1[&origin=...]`
    pub fn embed_url(&self) -> Result<Url, url::ParseError> {
        let mut url = Url::parse(&self.provider_origin)?;
        url.path_segments_mut()
            .map_err(|()| url::ParseError::RelativeUrlWithCannotBeABaseBase)?
            .clear()
            .push("embed")
            .push(self.content_id.as_str());

        {
            let mut query = url.query_pairs_mut();
            query.append_pair("rel", "0").append_pair("enablejsapi", "1");
            if let Some(origin) = &self.page_origin {
                query.append_pair("origin", origin);
            }
        }
        Ok(url)
    }

    /// Origin the message channel must target. Serialized without a trailing
    /// slash, the way `postMessage` expects it.
    pub fn target_origin(&self) -> Result<String, url::ParseError> {
        Ok(Url::parse(&self.provider_origin)?
            .origin()
            .ascii_serialization())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embed_url_enables_control_api() {
        let url = EmbedConfig::new("dQw4w9WgXcQ").embed_url().unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.youtube.com/embed/dQw4w9WgXcQ?rel=0&enablejsapi=1"
        );
    }

    #[test]
    fn embed_url_forwards_page_origin() {
        let url = EmbedConfig::new("abc")
            .with_page_origin("http://localhost:5173")
            .embed_url()
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://www.youtube.com/embed/abc?rel=0&enablejsapi=1&origin=http%3A%2F%2Flocalhost%3A5173"
        );
    }

    #[test]
    fn content_id_is_a_single_path_segment() {
        let url = EmbedConfig::new("a/b").embed_url().unwrap();
        assert_eq!(url.path(), "/embed/a%2Fb");
    }

    #[test]
    fn target_origin_has_no_trailing_slash() {
        let config = EmbedConfig::new("abc");
        assert_eq!(config.target_origin().unwrap(), "https://www.youtube.com");
    }

    #[test]
    fn from_settings_uses_configured_origins() {
        let settings = Settings {
            provider_origin: Some("https://www.youtube-nocookie.com".to_string()),
            page_origin: Some("https://watch.example".to_string()),
            ..Settings::default()
        };
        let config = EmbedConfig::from_settings("abc", &settings);
        assert_eq!(config.provider_origin, "https://www.youtube-nocookie.com");
        assert_eq!(config.page_origin.as_deref(), Some("https://watch.example"));
    }

    #[test]
    fn allow_list_includes_autoplay_and_encrypted_media() {
        assert!(EMBED_ALLOW_FEATURES.contains("autoplay"));
        assert!(EMBED_ALLOW_FEATURES.contains("encrypted-media"));
    }
}
