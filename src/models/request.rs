//! Build request parameters and validation

use super::error::BuildError;
use lazy_static::lazy_static;
use regex::Regex;

/// Fallback splash/background color when the caller supplies none.
pub const DEFAULT_PRIMARY_COLOR: &str = "#0070f3";

lazy_static! {
    static ref APP_ID_RE: Regex =
        Regex::new(r"^[A-Za-z][A-Za-z0-9_]*(\.[A-Za-z][A-Za-z0-9_]*)+$").unwrap();
    static ref COLOR_RE: Regex =
        Regex::new(r"^(#([0-9A-Fa-f]{3}|[0-9A-Fa-f]{4}|[0-9A-Fa-f]{6}|[0-9A-Fa-f]{8})|[A-Za-z]+)$")
            .unwrap();
}

/// Where the web payload for one build comes from.
///
/// Modeled as a tagged variant rather than two optional fields so that the
/// both-present and both-absent combinations cannot be expressed.
#[derive(Debug, Clone)]
pub enum AssetSource {
    /// Wrap a remote site in a synthesized single-page shell.
    Url(String),
    /// Raw bytes of an uploaded ZIP archive of the site.
    Archive(Vec<u8>),
    /// No payload; the project ships an empty web directory.
    None,
}

impl AssetSource {
    pub fn is_url(&self) -> bool {
        matches!(self, AssetSource::Url(_))
    }
}

#[derive(Debug, Clone)]
pub struct BuildRequest {
    /// Display name of the app.
    pub app_name: String,
    /// Reverse-domain identifier, e.g. `com.example.app`.
    pub app_id: String,
    pub source: AssetSource,
    /// CSS color used for the splash screen and wrapper background.
    pub primary_color: String,
}

impl BuildRequest {
    pub fn new(app_name: impl Into<String>, app_id: impl Into<String>, source: AssetSource) -> Self {
        Self {
            app_name: app_name.into(),
            app_id: app_id.into(),
            source,
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
        }
    }

    pub fn with_primary_color(mut self, color: impl Into<String>) -> Self {
        self.primary_color = color.into();
        self
    }

    /// Reject malformed requests before any workspace exists.
    ///
    /// The color check doubles as injection hardening: validated values are
    /// safe to interpolate into the generated HTML and JSON.
    pub fn validate(&self) -> Result<(), BuildError> {
        if self.app_name.trim().is_empty() {
            return Err(BuildError::validation("app name must not be empty"));
        }
        if self.app_id.is_empty() {
            return Err(BuildError::validation("app id must not be empty"));
        }
        if !APP_ID_RE.is_match(&self.app_id) {
            return Err(BuildError::validation(format!(
                "app id {:?} is not a reverse-domain identifier like com.example.app",
                self.app_id
            )));
        }
        if !COLOR_RE.is_match(&self.primary_color) {
            return Err(BuildError::validation(format!(
                "primary color {:?} is not a hex value or color keyword",
                self.primary_color
            )));
        }
        Ok(())
    }
}
