use crate::error::Error;
use config::{Config, Environment, File as ConfigFile};
use serde::Deserialize;

/// Streaming services whose catalogue entries never point at a local file.
pub const DEFAULT_STREAMING_PREFIXES: &[&str] =
    &["tidal:", "soundcloud:", "itunes:", "beatsource:", "beatport:"];

/// How catalogue paths and walked paths are compared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CasePolicy {
    Sensitive,
    Insensitive,
}

impl CasePolicy {
    /// Windows and macOS volumes are case-insensitive by default.
    pub fn host_default() -> Self {
        if cfg!(any(target_os = "windows", target_os = "macos")) {
            CasePolicy::Insensitive
        } else {
            CasePolicy::Sensitive
        }
    }

    pub fn fold(self, path: &str) -> String {
        match self {
            CasePolicy::Sensitive => path.to_string(),
            CasePolicy::Insensitive => path.to_lowercase(),
        }
    }
}

impl Default for CasePolicy {
    fn default() -> Self {
        CasePolicy::host_default()
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub skip_substrings: Vec<String>,
    pub path_case: CasePolicy,
    pub streaming_prefixes: Vec<String>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            skip_substrings: Vec::new(),
            path_case: CasePolicy::default(),
            streaming_prefixes: DEFAULT_STREAMING_PREFIXES
                .iter()
                .map(|s| s.to_string())
                .collect(),
        }
    }
}

impl AppConfig {
    /// Replace the configured skip list with a comma-delimited override.
    pub fn with_skip_list(mut self, list: &str) -> Self {
        self.skip_substrings = parse_skip_list(list);
        self
    }

    pub fn with_path_case(mut self, policy: CasePolicy) -> Self {
        self.path_case = policy;
        self
    }
}

/// Reads `Config.toml` (optional) and `RB_CLEAN_*` environment variables.
pub fn load_configuration() -> Result<AppConfig, Error> {
    let builder = Config::builder()
        .add_source(ConfigFile::with_name("Config").required(false))
        .add_source(
            Environment::with_prefix("RB_CLEAN")
                .try_parsing(true)
                .list_separator(",")
                .with_list_parse_key("skip_substrings")
                .with_list_parse_key("streaming_prefixes"),
        )
        .build()?;
    Ok(builder.try_deserialize::<AppConfig>()?)
}

/// Split a comma-delimited skip list into trimmed, lowercased, non-empty items.
pub fn parse_skip_list(list: &str) -> Vec<String> {
    list.split(',')
        .map(|s| s.trim().to_lowercase())
        .filter(|s| !s.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_skip_list() {
        let items = parse_skip_list(" Tidal, private ,,SAMPLES ");
        assert_eq!(items, vec!["tidal", "private", "samples"]);
    }

    #[test]
    fn test_parse_skip_list_empty() {
        assert!(parse_skip_list("").is_empty());
        assert!(parse_skip_list(" , ,").is_empty());
    }

    #[test]
    fn test_default_config_has_streaming_prefixes() {
        let config = AppConfig::default();
        assert!(config.skip_substrings.is_empty());
        assert!(config.streaming_prefixes.iter().any(|p| p == "tidal:"));
        assert_eq!(config.streaming_prefixes.len(), 5);
    }

    #[test]
    fn test_bad_config_value_is_a_config_error() {
        let err: Error = Config::builder()
            .set_override("path_case", "sideways")
            .and_then(|builder| builder.build())
            .and_then(|config| config.try_deserialize::<AppConfig>())
            .unwrap_err()
            .into();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().starts_with("Configuration error"));
    }

    #[test]
    fn test_case_policy_fold() {
        assert_eq!(CasePolicy::Sensitive.fold("/Music/A.mp3"), "/Music/A.mp3");
        assert_eq!(CasePolicy::Insensitive.fold("/Music/A.mp3"), "/music/a.mp3");
    }

    #[test]
    fn test_with_skip_list_overrides() {
        let config = AppConfig {
            skip_substrings: vec!["old".to_string()],
            ..AppConfig::default()
        }
        .with_skip_list("new,Other");
        assert_eq!(config.skip_substrings, vec!["new", "other"]);
    }
}
