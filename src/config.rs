/// Connection settings for the KDM collaborator session.
///
/// Settings cover only how the session is established (endpoint, key,
/// timeout) and how probes are paced — never what gets probed. The
/// candidate catalogs are fixed in `catalog` so that sweep results stay
/// comparable across runs.
///
/// Resolution order: built-in defaults, then `kdm.toml` if present, then
/// environment variables (a `.env` file is honored via dotenv).

use crate::model::ProbeError;
use serde::Deserialize;
use std::time::Duration;

const SETTINGS_FILE: &str = "kdm.toml";

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct KdmSettings {
    /// Base URL of the KDM water-data API.
    pub base_url: String,
    /// Optional service key appended to every query.
    pub api_key: Option<String>,
    /// Per-request timeout in seconds.
    pub timeout_secs: u64,
    /// Delay applied after every probe, in milliseconds.
    pub pacing_ms: u64,
}

impl Default for KdmSettings {
    fn default() -> Self {
        KdmSettings {
            base_url: "http://localhost:8100/kdm".to_string(),
            api_key: None,
            timeout_secs: 30,
            // Matches the pacing the upstream operators have tolerated so
            // far; lower at your own risk.
            pacing_ms: 500,
        }
    }
}

impl KdmSettings {
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn pacing(&self) -> Duration {
        Duration::from_millis(self.pacing_ms)
    }
}

/// Parses settings from TOML source. Unknown keys are rejected so a typo'd
/// setting fails loudly instead of silently using a default.
pub fn parse_settings(source: &str) -> Result<KdmSettings, ProbeError> {
    toml::from_str(source).map_err(|e| ProbeError::Config(format!("{}: {}", SETTINGS_FILE, e)))
}

/// Loads settings from `kdm.toml` (if present) and the environment.
pub fn load() -> Result<KdmSettings, ProbeError> {
    dotenv::dotenv().ok();

    let mut settings = match std::fs::read_to_string(SETTINGS_FILE) {
        Ok(source) => parse_settings(&source)?,
        Err(_) => KdmSettings::default(),
    };

    if let Ok(url) = std::env::var("KDM_BASE_URL") {
        settings.base_url = url;
    }
    if let Ok(key) = std::env::var("KDM_API_KEY") {
        settings.api_key = Some(key);
    }
    if let Ok(secs) = std::env::var("KDM_TIMEOUT_SECS") {
        settings.timeout_secs = secs
            .parse()
            .map_err(|_| ProbeError::Config(format!("KDM_TIMEOUT_SECS is not a number: {}", secs)))?;
    }

    Ok(settings)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_sane() {
        let settings = KdmSettings::default();
        assert_eq!(settings.timeout(), Duration::from_secs(30));
        assert_eq!(settings.pacing(), Duration::from_millis(500));
        assert!(settings.api_key.is_none());
    }

    #[test]
    fn test_parse_full_settings_file() {
        let settings = parse_settings(
            r#"
            base_url = "https://kdm.example.or.kr/api"
            api_key = "abc123"
            timeout_secs = 10
            pacing_ms = 250
            "#,
        )
        .expect("valid settings should parse");
        assert_eq!(settings.base_url, "https://kdm.example.or.kr/api");
        assert_eq!(settings.api_key.as_deref(), Some("abc123"));
        assert_eq!(settings.timeout(), Duration::from_secs(10));
        assert_eq!(settings.pacing(), Duration::from_millis(250));
    }

    #[test]
    fn test_parse_partial_settings_fills_defaults() {
        let settings = parse_settings("pacing_ms = 0\n").expect("partial settings should parse");
        assert_eq!(settings.pacing(), Duration::ZERO);
        assert_eq!(settings.base_url, KdmSettings::default().base_url);
    }

    #[test]
    fn test_parse_rejects_unknown_keys() {
        let result = parse_settings("base_urll = \"oops\"\n");
        assert!(result.is_err(), "typo'd key should be rejected, got {:?}", result);
    }
}
