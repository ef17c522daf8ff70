/// OAuth2 scope decider factory
///
/// Maps scope names onto authorities and delegates to a pluggable
/// [`AuthorizationDeciderFactory`] for the actual decider shape.

use std::fmt;
use std::sync::Arc;
use tracing::debug;

use warden_authz::{
    Authority, AuthorizationDeciderFactory, Decider, DefaultDeciderFactory, MultiFactorBuilder,
    Result, SystemFailure, SCOPE_PREFIX,
};

use crate::config::ScopeFactoryConfig;

/// Produces deciders for OAuth2 scope checks
///
/// A scope `s` is checked as the authority `SCOPE_s`. Scopes that already carry
/// the prefix are used verbatim.
///
/// With no delegate configured every decider is a plain
/// [`Decider::Authority`]. With a multi-factor delegate every decider also
/// requires the configured factors.
///
/// # Examples
///
/// ```
/// use warden_authz::{AuthorizationDecider, Principal, Supplied};
/// use warden_oauth2::ScopeDeciderFactory;
///
/// let factory = ScopeDeciderFactory::new();
/// let decider = factory.has_scope("message:read").unwrap();
/// assert!(decider.is_authority());
///
/// let user = Supplied::principal(Principal::new("user", "pass", ["SCOPE_message:read"]));
/// assert!(decider.decide(&user, &()).unwrap().is_granted());
/// ```
#[derive(Clone)]
pub struct ScopeDeciderFactory {
    /// Factory producing the underlying deciders
    delegate: Arc<dyn AuthorizationDeciderFactory>,
    /// Prefix turning a scope into an authority
    scope_prefix: String,
}

impl ScopeDeciderFactory {
    /// Creates a factory producing plain authority deciders
    pub fn new() -> Self {
        Self::with_shared_factory(Arc::new(DefaultDeciderFactory::new()))
    }

    /// Creates a factory delegating to `factory`
    ///
    /// # Arguments
    ///
    /// * `factory` - Decider factory, e.g. a built [`warden_authz::MultiFactor`]
    pub fn with_factory<F>(factory: F) -> Self
    where
        F: AuthorizationDeciderFactory + 'static,
    {
        Self::with_shared_factory(Arc::new(factory))
    }

    /// Creates a factory delegating to a shared `factory`
    pub fn with_shared_factory(factory: Arc<dyn AuthorizationDeciderFactory>) -> Self {
        Self {
            delegate: factory,
            scope_prefix: SCOPE_PREFIX.to_string(),
        }
    }

    /// Creates a factory from configuration
    ///
    /// A config without factors yields the default factory; otherwise the
    /// factors are built into a multi-factor delegate.
    ///
    /// # Errors
    ///
    /// `empty-factor-set` when `required_factors` is present but empty,
    /// `internal` when `scope_prefix` is empty.
    pub fn from_config(config: &ScopeFactoryConfig) -> Result<Self> {
        if config.scope_prefix.is_empty() {
            return Err(SystemFailure::internal("Scope prefix must not be empty"));
        }

        let factory = match &config.required_factors {
            Some(factors) => {
                let multi_factor = MultiFactorBuilder::new()
                    .require_factors(factors.iter().cloned())
                    .build()?;
                Self::with_factory(multi_factor)
            }
            None => Self::new(),
        };

        Ok(factory.with_scope_prefix(config.scope_prefix.clone()))
    }

    /// Overrides the scope prefix (default `SCOPE_`)
    pub fn with_scope_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.scope_prefix = prefix.into();
        self
    }

    /// Returns the scope prefix
    pub fn scope_prefix(&self) -> &str {
        &self.scope_prefix
    }

    /// Returns a decider granting principals that hold `scope`
    ///
    /// # Errors
    ///
    /// `null-scope` when `scope` is empty.
    pub fn has_scope(&self, scope: &str) -> Result<Decider> {
        let authority = self.scope_authority(scope)?;
        debug!("Building scope decider for {}", authority);
        self.delegate.has_authority(&authority)
    }

    /// Returns a decider granting principals that hold at least one of `scopes`
    ///
    /// # Errors
    ///
    /// `empty-any-scope` when `scopes` is empty, `null-scope` when any scope is empty.
    pub fn has_any_scope<I, S>(&self, scopes: I) -> Result<Decider>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let authorities = scopes
            .into_iter()
            .map(|scope| self.scope_authority(scope.as_ref()))
            .collect::<Result<Vec<_>>>()?;

        if authorities.is_empty() {
            return Err(SystemFailure::empty_any_scope(
                "At least one scope is required",
            ));
        }

        debug!("Building any-scope decider for {:?}", authorities);
        self.delegate.has_any_authority(&authorities)
    }

    /// Maps a scope onto its authority
    fn scope_authority(&self, scope: &str) -> Result<Authority> {
        if scope.is_empty() {
            return Err(SystemFailure::null_scope("Scope must not be empty"));
        }
        Ok(Authority::prefixed(&self.scope_prefix, scope))
    }
}

impl Default for ScopeDeciderFactory {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for ScopeDeciderFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopeDeciderFactory")
            .field("scope_prefix", &self.scope_prefix)
            .finish_non_exhaustive()
    }
}
