//! Scope factory configuration

use serde::{Deserialize, Serialize};
use warden_authz::SCOPE_PREFIX;

/// Configuration for [`ScopeDeciderFactory`](crate::ScopeDeciderFactory)
///
/// Leaving `required_factors` out means no multi-factor composition at all. An
/// explicit empty list is an empty factor set and is rejected when the factory
/// is built.
///
/// ```rust
/// use warden_oauth2::ScopeFactoryConfig;
///
/// let config = ScopeFactoryConfig::from_json(
///     r#"{ "required_factors": ["FACTOR_PASSWORD"] }"#,
/// ).unwrap();
/// assert_eq!(config.scope_prefix, "SCOPE_");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ScopeFactoryConfig {
    /// Prefix turning a scope name into an authority
    pub scope_prefix: String,

    /// Factor authorities every scope decider also requires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub required_factors: Option<Vec<String>>,
}

impl Default for ScopeFactoryConfig {
    fn default() -> Self {
        Self {
            scope_prefix: SCOPE_PREFIX.to_string(),
            required_factors: None,
        }
    }
}

impl ScopeFactoryConfig {
    /// Parse configuration from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Whether multi-factor composition is configured, even if with no factors
    pub fn has_factors(&self) -> bool {
        self.required_factors.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ScopeFactoryConfig::default();
        assert_eq!(config.scope_prefix, "SCOPE_");
        assert!(!config.has_factors());
    }

    #[test]
    fn test_config_from_json() {
        let config = ScopeFactoryConfig::from_json(
            r#"{"scope_prefix":"SCP_","required_factors":["FACTOR_OTT"]}"#,
        )
        .unwrap();
        assert_eq!(config.scope_prefix, "SCP_");
        assert_eq!(config.required_factors, Some(vec!["FACTOR_OTT".to_string()]));
        assert!(config.has_factors());
    }

    #[test]
    fn test_explicit_empty_factors_kept_apart_from_missing() {
        let missing = ScopeFactoryConfig::from_json("{}").unwrap();
        assert_eq!(missing.required_factors, None);
        assert!(!missing.has_factors());

        let empty = ScopeFactoryConfig::from_json(r#"{"required_factors":[]}"#).unwrap();
        assert_eq!(empty.required_factors, Some(Vec::new()));
        assert!(empty.has_factors());
    }

    #[test]
    fn test_config_rejects_malformed_json() {
        assert!(ScopeFactoryConfig::from_json("{\"required_factors\": 3}").is_err());
    }
}
