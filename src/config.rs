use crate::error::ConfigError;
use serde::{Deserialize, Serialize};

pub const DEFAULT_GEMINI_MODEL: &str = "gemini-2.0-flash";
pub const DEFAULT_GEMINI_BASE_URL: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_INDEX_NAME: &str = "properties";

/// Text-generation model settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LlmConfig {
    pub api_key: String,
    pub model: String,
    pub base_url: String,
    pub timeout_secs: u64,
    pub temperature: f32,
}

impl LlmConfig {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            model: DEFAULT_GEMINI_MODEL.to_string(),
            base_url: DEFAULT_GEMINI_BASE_URL.to_string(),
            timeout_secs: 30,
            temperature: 0.0,
        }
    }
}

/// Hosted search index settings
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct IndexConfig {
    pub app_id: String,
    pub search_api_key: String,
    pub admin_api_key: Option<String>,
    pub index_name: String,
    /// Override for both read and write hosts (tests, proxies)
    pub host_override: Option<String>,
}

impl IndexConfig {
    /// Writes need the admin key; searching never does.
    pub fn admin_key(&self) -> Result<&str, ConfigError> {
        self.admin_api_key
            .as_deref()
            .ok_or(ConfigError::Missing("ALGOLIA_ADMIN_API_KEY"))
    }
}

/// Everything the binary needs to build its components
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AppConfig {
    pub llm: Option<LlmConfig>,
    pub index: Option<IndexConfig>,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from any variable source. Blank values count as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let llm = match get("GEMINI_API_KEY").or_else(|| get("GOOGLE_API_KEY")) {
            Some(api_key) => {
                let mut llm = LlmConfig::new(api_key);
                if let Some(model) = get("GEMINI_MODEL") {
                    llm.model = model;
                }
                if let Some(url) = get("GEMINI_BASE_URL") {
                    llm.base_url = url;
                }
                if let Some(secs) = get("LLM_TIMEOUT_SECS") {
                    llm.timeout_secs = secs.parse().map_err(|e| ConfigError::Invalid {
                        name: "LLM_TIMEOUT_SECS",
                        reason: format!("{}", e),
                    })?;
                }
                Some(llm)
            }
            None => None,
        };

        let index = match get("ALGOLIA_APP_ID") {
            Some(app_id) => Some(IndexConfig {
                app_id,
                search_api_key: get("ALGOLIA_SEARCH_API_KEY")
                    .ok_or(ConfigError::Missing("ALGOLIA_SEARCH_API_KEY"))?,
                admin_api_key: get("ALGOLIA_ADMIN_API_KEY"),
                index_name: get("ALGOLIA_INDEX_NAME")
                    .unwrap_or_else(|| DEFAULT_INDEX_NAME.to_string()),
                host_override: get("ALGOLIA_HOST"),
            }),
            None => None,
        };

        Ok(Self { llm, index })
    }

    /// Only commands that call the model need its key
    pub fn require_llm(&self) -> Result<&LlmConfig, ConfigError> {
        self.llm.as_ref().ok_or(ConfigError::Missing("GEMINI_API_KEY"))
    }

    /// The hosted index is optional until a command asks for it
    pub fn require_index(&self) -> Result<&IndexConfig, ConfigError> {
        self.index.as_ref().ok_or(ConfigError::Missing("ALGOLIA_APP_ID"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name: &str| map.get(name).cloned()
    }

    #[test]
    fn missing_llm_key_fails_when_required() {
        let config = AppConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.require_llm(), Err(ConfigError::Missing("GEMINI_API_KEY")));
        assert_eq!(config.require_index(), Err(ConfigError::Missing("ALGOLIA_APP_ID")));
    }

    #[test]
    fn index_only_settings_are_enough_for_bulk_load() {
        let config = AppConfig::from_lookup(lookup(&[
            ("ALGOLIA_APP_ID", "APP"),
            ("ALGOLIA_SEARCH_API_KEY", "search"),
            ("ALGOLIA_ADMIN_API_KEY", "admin"),
        ]))
        .unwrap();

        let index = config.require_index().unwrap();
        assert_eq!(index.admin_key(), Ok("admin"));
        assert!(config.require_llm().is_err());
    }

    #[test]
    fn google_key_is_accepted_as_fallback() {
        let config = AppConfig::from_lookup(lookup(&[("GOOGLE_API_KEY", "g-key")])).unwrap();
        let llm = config.require_llm().unwrap();
        assert_eq!(llm.api_key, "g-key");
        assert_eq!(llm.model, DEFAULT_GEMINI_MODEL);
        assert!(config.index.is_none());
    }

    #[test]
    fn index_without_search_key_is_rejected() {
        let err = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("ALGOLIA_APP_ID", "APP"),
        ]))
        .unwrap_err();
        assert_eq!(err, ConfigError::Missing("ALGOLIA_SEARCH_API_KEY"));
    }

    #[test]
    fn index_defaults_and_admin_key() {
        let config = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("ALGOLIA_APP_ID", "APP"),
            ("ALGOLIA_SEARCH_API_KEY", "search"),
            ("ALGOLIA_ADMIN_API_KEY", "  "),
        ]))
        .unwrap();

        let index = config.require_index().unwrap();
        assert_eq!(index.index_name, DEFAULT_INDEX_NAME);
        assert_eq!(index.admin_key(), Err(ConfigError::Missing("ALGOLIA_ADMIN_API_KEY")));
    }

    #[test]
    fn bad_timeout_is_invalid() {
        let err = AppConfig::from_lookup(lookup(&[
            ("GEMINI_API_KEY", "k"),
            ("LLM_TIMEOUT_SECS", "soon"),
        ]))
        .unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { name: "LLM_TIMEOUT_SECS", .. }));
    }
}
