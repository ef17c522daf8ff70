/// OAuth2 scope deciders
///
/// This module turns scope names into authorization deciders, optionally
/// composed with a multi-factor requirement.
///
/// # Examples
///
/// ```
/// use warden_authz::MultiFactorBuilder;
/// use warden_oauth2::scope::ScopeDeciderFactory;
///
/// let multi_factor = MultiFactorBuilder::new()
///     .require_factors(["FACTOR_PASSWORD"])
///     .build()
///     .unwrap();
/// let factory = ScopeDeciderFactory::with_factory(multi_factor);
///
/// assert!(!factory.has_scope("message:read").unwrap().is_authority());
/// ```

mod factory;


pub use factory::ScopeDeciderFactory;
