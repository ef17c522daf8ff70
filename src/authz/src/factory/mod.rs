//! Decider factories
//!
//! [`AuthorizationDeciderFactory`] is the seam higher-level factories (such as
//! the OAuth2 scope factory) build on. Swapping the implementation changes what
//! every produced decider enforces without the caller knowing its structure.

pub mod multi_factor;

pub use multi_factor::{FactorSet, MultiFactor, MultiFactorBuilder};

use crate::decider::{AuthorityDecider, Decider};
use crate::error::{Result, SystemFailure};
use crate::types::{Authority, ROLE_PREFIX};
use serde::{Deserialize, Serialize};

/// Produces deciders for common authorization questions
pub trait AuthorizationDeciderFactory: Send + Sync {
    /// Decider granting principals that bear `authority`
    fn has_authority(&self, authority: &Authority) -> Result<Decider>;

    /// Decider granting principals that bear at least one of `authorities`
    fn has_any_authority(&self, authorities: &[Authority]) -> Result<Decider>;

    /// Prefix applied by [`has_role`](Self::has_role)
    fn role_prefix(&self) -> &str {
        ROLE_PREFIX
    }

    /// Decider granting principals that hold `role`
    fn has_role(&self, role: &str) -> Result<Decider> {
        if role.is_empty() {
            return Err(SystemFailure::internal("Role must not be empty"));
        }
        self.has_authority(&Authority::prefixed(self.role_prefix(), role))
    }

    /// Decider granting principals that hold at least one of `roles`
    fn has_any_role(&self, roles: &[&str]) -> Result<Decider> {
        if roles.iter().any(|r| r.is_empty()) {
            return Err(SystemFailure::internal("Role must not be empty"));
        }
        let authorities: Vec<Authority> = roles
            .iter()
            .map(|r| Authority::prefixed(self.role_prefix(), r))
            .collect();
        self.has_any_authority(&authorities)
    }

    /// Decider granting any authenticated principal
    fn authenticated(&self) -> Result<Decider> {
        Ok(Decider::Authenticated)
    }

    /// Decider that always grants
    fn permit_all(&self) -> Result<Decider> {
        Ok(Decider::PermitAll)
    }

    /// Decider that always denies
    fn deny_all(&self) -> Result<Decider> {
        Ok(Decider::DenyAll)
    }
}

/// Configuration for [`DefaultDeciderFactory`]
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DeciderFactoryConfig {
    /// Prefix turning a role name into an authority
    pub role_prefix: String,
}

impl Default for DeciderFactoryConfig {
    fn default() -> Self {
        Self {
            role_prefix: ROLE_PREFIX.to_string(),
        }
    }
}

/// Factory producing plain [`AuthorityDecider`]s, no extra factors
#[derive(Debug, Clone, Default)]
pub struct DefaultDeciderFactory {
    config: DeciderFactoryConfig,
}

impl DefaultDeciderFactory {
    /// Create a factory with default configuration
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a factory from configuration
    pub fn with_config(config: DeciderFactoryConfig) -> Self {
        Self { config }
    }
}

impl AuthorizationDeciderFactory for DefaultDeciderFactory {
    fn has_authority(&self, authority: &Authority) -> Result<Decider> {
        Ok(AuthorityDecider::has_authority(authority.clone()).into())
    }

    fn has_any_authority(&self, authorities: &[Authority]) -> Result<Decider> {
        Ok(AuthorityDecider::has_any_authority(authorities.iter().cloned())?.into())
    }

    fn role_prefix(&self) -> &str {
        &self.config.role_prefix
    }
}
