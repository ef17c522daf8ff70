//! Core authorization types

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

/// Prefix under which OAuth2 scopes surface as authorities
pub const SCOPE_PREFIX: &str = "SCOPE_";

/// Prefix under which roles surface as authorities
pub const ROLE_PREFIX: &str = "ROLE_";

/// Opaque capability string attached to a principal (e.g. `SCOPE_message:read`).
///
/// Compared by exact, case-sensitive equality. No normalization is applied.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Authority(String);

impl Authority {
    /// Create an authority from its raw string
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Create an authority by prefixing `name`, unless it already carries the prefix
    pub fn prefixed(prefix: &str, name: &str) -> Self {
        if name.starts_with(prefix) {
            Self::new(name)
        } else {
            Self(format!("{}{}", prefix, name))
        }
    }

    /// Scope authority (`SCOPE_` + `scope`)
    pub fn scope(scope: &str) -> Self {
        Self::prefixed(SCOPE_PREFIX, scope)
    }

    /// Returns the raw authority string
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Authority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Authority {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for Authority {
    fn from(value: String) -> Self {
        Self(value)
    }
}

impl AsRef<str> for Authority {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Opaque credential handle. Never printed.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Credentials(String);

impl Credentials {
    /// Wrap a credential value
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    /// Expose the raw credential
    pub fn expose(&self) -> &str {
        &self.0
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credentials([REDACTED])")
    }
}

/// Authenticated identity (user, service account, agent)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Principal {
    /// Identity label (e.g. "user", "service:billing")
    pub name: String,

    /// Credential handle; never serialized
    #[serde(skip)]
    pub credentials: Credentials,

    /// Granted authorities
    #[serde(default)]
    pub authorities: BTreeSet<Authority>,

    /// Whether the authentication subsystem vouched for this principal
    #[serde(default)]
    pub authenticated: bool,
}

impl Principal {
    /// Create an authenticated principal
    pub fn new<I, A>(name: impl Into<String>, credentials: impl Into<String>, authorities: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Authority>,
    {
        Self {
            name: name.into(),
            credentials: Credentials::new(credentials),
            authorities: authorities.into_iter().map(Into::into).collect(),
            authenticated: true,
        }
    }

    /// Create a principal that has not been authenticated
    pub fn unauthenticated(name: impl Into<String>, credentials: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            credentials: Credentials::new(credentials),
            authorities: BTreeSet::new(),
            authenticated: false,
        }
    }

    /// Add an authority to the principal
    pub fn with_authority(mut self, authority: impl Into<Authority>) -> Self {
        self.authorities.insert(authority.into());
        self
    }

    /// Whether the principal bears `authority`
    pub fn has_authority(&self, authority: &Authority) -> bool {
        self.authorities.contains(authority)
    }

    /// Whether the principal is authenticated
    pub fn is_authenticated(&self) -> bool {
        self.authenticated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scope_authority() {
        assert_eq!(Authority::scope("message:read").as_str(), "SCOPE_message:read");
        // already prefixed scopes are kept verbatim
        assert_eq!(Authority::scope("SCOPE_message:read").as_str(), "SCOPE_message:read");
    }

    #[test]
    fn test_authority_is_case_sensitive() {
        assert_ne!(Authority::new("SCOPE_Message:Read"), Authority::new("SCOPE_message:read"));
        assert_eq!(Authority::scope("scope_x").as_str(), "SCOPE_scope_x");
    }

    #[test]
    fn test_principal_creation() {
        let principal = Principal::new("user", "pass", ["SCOPE_message:read", "SCOPE_message:read"])
            .with_authority("ROLE_admin");

        assert_eq!(principal.name, "user");
        assert_eq!(principal.credentials.expose(), "pass");
        assert!(principal.is_authenticated());
        assert_eq!(principal.authorities.len(), 2);
        assert!(principal.has_authority(&Authority::new("ROLE_admin")));
    }

    #[test]
    fn test_credentials_are_redacted() {
        let principal = Principal::new("user", "hunter2", Vec::<Authority>::new());
        let rendered = format!("{:?}", principal);
        assert!(!rendered.contains("hunter2"));

        let json = serde_json::to_string(&principal).unwrap();
        assert!(!json.contains("hunter2"));
    }

    #[test]
    fn test_principal_deserialize() {
        let principal: Principal = serde_json::from_str(
            r#"{"name":"svc","authorities":["SCOPE_a","SCOPE_a","SCOPE_b"],"authenticated":true}"#,
        )
        .unwrap();
        assert_eq!(principal.authorities.len(), 2);
        assert_eq!(principal.credentials, Credentials::default());
    }
}
