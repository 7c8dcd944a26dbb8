use thiserror::Error;
use url::Url;

/// Storage key under which the confirmed backend URL is persisted.
pub const BACKEND_URL_STORAGE_KEY: &str = "custom_backend_url";

/// Fallback backend when nothing has been saved yet.
///
/// Overridable at build time through `BRIDGE_BACKEND_URL`.
pub const DEFAULT_BACKEND_URL: &str = match option_env!("BRIDGE_BACKEND_URL") {
    Some(url) => url,
    None => "http://localhost:5000",
};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    #[error("invalid backend url {candidate:?}: {reason}")]
    InvalidUrl { candidate: String, reason: String },
}

/// Active backend URL plus the user's unconfirmed edit of it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendConfig {
    active_url: String,
    draft_url: String,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self::load(None, DEFAULT_BACKEND_URL)
    }
}

impl BackendConfig {
    /// Builds the startup config from a previously saved value, if any.
    pub fn load(saved: Option<String>, fallback: &str) -> Self {
        let active_url = saved
            .filter(|url| !url.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Self {
            draft_url: active_url.clone(),
            active_url,
        }
    }

    pub fn active_url(&self) -> &str {
        &self.active_url
    }

    pub fn draft_url(&self) -> &str {
        &self.draft_url
    }

    pub fn set_draft(&mut self, draft: String) {
        self.draft_url = draft;
    }

    /// True while the draft holds an edit that has not been confirmed.
    pub fn is_draft_pending(&self) -> bool {
        self.draft_url != self.active_url
    }

    /// Promotes `candidate` to the active URL if it is a well-formed absolute URL.
    ///
    /// On error the active URL is left untouched.
    pub fn save(&mut self, candidate: &str) -> Result<&str, ConfigError> {
        let candidate = validate_backend_url(candidate)?;
        self.draft_url = candidate.clone();
        self.active_url = candidate;
        Ok(&self.active_url)
    }
}

/// Validates an absolute URL (scheme and host required) and returns it trimmed.
pub fn validate_backend_url(candidate: &str) -> Result<String, ConfigError> {
    let trimmed = candidate.trim();
    let invalid = |reason: String| ConfigError::InvalidUrl {
        candidate: candidate.to_string(),
        reason,
    };
    let parsed = Url::parse(trimmed).map_err(|err| invalid(err.to_string()))?;
    if !parsed.has_host() {
        return Err(invalid("missing host".to_string()));
    }
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_prefers_saved_value() {
        let config = BackendConfig::load(Some("https://saved.example".into()), "http://fallback");
        assert_eq!(config.active_url(), "https://saved.example");
        assert_eq!(config.draft_url(), "https://saved.example");
        assert!(!config.is_draft_pending());
    }

    #[test]
    fn load_ignores_blank_saved_value() {
        let config = BackendConfig::load(Some("   ".into()), "http://fallback");
        assert_eq!(config.active_url(), "http://fallback");
    }

    #[test]
    fn validation_requires_scheme_and_host() {
        assert!(validate_backend_url("not-a-url").is_err());
        assert!(validate_backend_url("localhost:5000/api").is_err());
        assert!(validate_backend_url("mailto:someone@example.com").is_err());
        assert!(validate_backend_url("").is_err());
        assert_eq!(
            validate_backend_url(" https://api.example.com ").unwrap(),
            "https://api.example.com"
        );
    }

    #[test]
    fn failed_save_keeps_active_url() {
        let mut config = BackendConfig::load(None, "http://localhost:5000");
        config.set_draft("not-a-url".into());
        assert!(config.save("not-a-url").is_err());
        assert_eq!(config.active_url(), "http://localhost:5000");
        assert!(config.is_draft_pending());
    }
}
