//! Multi-factor composition
//!
//! A [`MultiFactor`] enforces a fixed set of factor authorities on top of
//! whatever requirement a caller asks for: every decider it hands out is
//! `AllOf(factors, requirement)`.

use super::AuthorizationDeciderFactory;
use crate::decider::authority::dedup;
use crate::decider::{AuthorityDecider, AuthorizationDecider, Decider, PrincipalSupplier};
use crate::decision::{Quantifier, Verdict};
use crate::error::{Result, SystemFailure};
use crate::types::Authority;
use std::sync::Arc;
use tracing::debug;

/// Ordered, de-duplicated, non-empty set of required factor authorities
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FactorSet {
    factors: Arc<[Authority]>,
}

impl FactorSet {
    /// Create a factor set; an empty input is rejected
    pub fn new<I, A>(factors: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Authority>,
    {
        let factors = dedup(factors.into_iter().map(Into::into));
        if factors.is_empty() {
            return Err(SystemFailure::empty_factor_set(
                "At least one factor authority is required",
            ));
        }

        Ok(Self {
            factors: factors.into(),
        })
    }

    /// Factor authorities, in first-seen order
    pub fn authorities(&self) -> &[Authority] {
        &self.factors
    }

    /// Whether `authority` is one of the factors
    pub fn contains(&self, authority: &Authority) -> bool {
        self.factors.contains(authority)
    }

    /// Number of factors
    pub fn len(&self) -> usize {
        self.factors.len()
    }

    /// Whether the set is empty; never true once built
    pub fn is_empty(&self) -> bool {
        self.factors.is_empty()
    }

    /// Decider requiring every factor, sharing this snapshot
    pub fn decider(&self) -> AuthorityDecider {
        AuthorityDecider::from_shared(Arc::clone(&self.factors), Quantifier::All)
    }
}

/// Builder collecting the factors a [`MultiFactor`] enforces
///
/// # Example
///
/// ```rust
/// use warden_authz::MultiFactorBuilder;
///
/// let multi_factor = MultiFactorBuilder::new()
///     .require_factors(["FACTOR_PASSWORD", "FACTOR_OTT"])
///     .build()
///     .unwrap();
///
/// assert_eq!(multi_factor.factors().len(), 2);
/// ```
#[derive(Debug, Clone, Default)]
pub struct MultiFactorBuilder {
    factors: Vec<Authority>,
}

impl MultiFactorBuilder {
    /// Create an empty builder
    pub fn new() -> Self {
        Self::default()
    }

    /// Add required factor authorities. Repeated calls append.
    pub fn require_factors<I, A>(mut self, factors: I) -> Self
    where
        I: IntoIterator<Item = A>,
        A: Into<Authority>,
    {
        self.factors.extend(factors.into_iter().map(Into::into));
        self
    }

    /// Add a single required factor authority
    pub fn require_factor(self, factor: impl Into<Authority>) -> Self {
        self.require_factors([factor.into()])
    }

    /// Snapshot the configured factors.
    ///
    /// The snapshot is a copy; later changes to a clone of this builder are not
    /// observed by deciders built from it.
    pub fn build(&self) -> Result<MultiFactor> {
        let factors = FactorSet::new(self.factors.iter().cloned())?;
        debug!("Built multi-factor requirement: {:?}", factors.authorities());
        Ok(MultiFactor { factors })
    }
}

/// Immutable multi-factor requirement.
///
/// As a decider it grants when every factor is present. As a factory it wraps
/// each requested decider as `AllOf(factors, requirement)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MultiFactor {
    factors: FactorSet,
}

impl MultiFactor {
    /// Start a builder
    pub fn builder() -> MultiFactorBuilder {
        MultiFactorBuilder::new()
    }

    /// Configured factor set
    pub fn factors(&self) -> &FactorSet {
        &self.factors
    }

    /// Decider requiring every factor
    pub fn decider(&self) -> Decider {
        Decider::Authority(self.factors.decider())
    }

    fn compose(&self, requirement: Decider) -> Decider {
        Decider::all_of([self.decider(), requirement])
    }
}

impl AuthorizationDeciderFactory for MultiFactor {
    fn has_authority(&self, authority: &Authority) -> Result<Decider> {
        // factor check already covers the requirement
        if self.factors.contains(authority) {
            return Ok(self.decider());
        }
        Ok(self.compose(AuthorityDecider::has_authority(authority.clone()).into()))
    }

    fn has_any_authority(&self, authorities: &[Authority]) -> Result<Decider> {
        let requirement = AuthorityDecider::has_any_authority(authorities.iter().cloned())?;
        if authorities.iter().any(|a| self.factors.contains(a)) {
            return Ok(self.decider());
        }
        Ok(self.compose(requirement.into()))
    }

    fn authenticated(&self) -> Result<Decider> {
        Ok(self.compose(Decider::Authenticated))
    }
}

impl<T: ?Sized> AuthorizationDecider<T> for MultiFactor {
    fn decide(&self, principal: &dyn PrincipalSupplier, target: &T) -> Result<Verdict> {
        self.decider().decide(principal, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decider::Supplied;
    use crate::error::FailureKind;
    use crate::types::Principal;

    fn user() -> Supplied {
        Supplied::principal(Principal::new("user", "pass", ["SCOPE_message:read"]))
    }

    #[test]
    fn test_empty_factor_set_rejected() {
        let err = MultiFactorBuilder::new().build().unwrap_err();
        assert_eq!(err.kind(), FailureKind::EmptyFactorSet);

        let err = MultiFactorBuilder::new()
            .require_factors(Vec::<Authority>::new())
            .build()
            .unwrap_err();
        assert_eq!(err.kind(), FailureKind::EmptyFactorSet);
    }

    #[test]
    fn test_factors_deduplicated_in_order() {
        let multi_factor = MultiFactorBuilder::new()
            .require_factors(["FACTOR_OTT", "FACTOR_PASSWORD"])
            .require_factor("FACTOR_OTT")
            .build()
            .unwrap();

        assert_eq!(
            multi_factor.factors().authorities(),
            &[Authority::new("FACTOR_OTT"), Authority::new("FACTOR_PASSWORD")]
        );
    }

    #[test]
    fn test_snapshot_is_immutable() {
        let builder = MultiFactorBuilder::new().require_factor("SCOPE_message:read");
        let multi_factor = builder.build().unwrap();

        let _builder = builder.require_factor("FACTOR_OTT");
        assert_eq!(multi_factor.factors().len(), 1);
        assert!(multi_factor.decide(&user(), &()).unwrap().is_granted());
    }

    #[test]
    fn test_requirement_composed_with_factors() {
        let multi_factor = MultiFactorBuilder::new()
            .require_factor("FACTOR_PASSWORD")
            .build()
            .unwrap();

        let decider = multi_factor
            .has_authority(&Authority::new("SCOPE_message:read"))
            .unwrap();
        assert!(matches!(decider, Decider::AllOf(ref children) if children.len() == 2));

        // user holds the scope but not the factor
        assert!(decider.decide(&user(), &()).unwrap().is_denied());

        let stepped_up = Supplied::principal(
            Principal::new("user", "pass", ["SCOPE_message:read", "FACTOR_PASSWORD"]),
        );
        assert!(decider.decide(&stepped_up, &()).unwrap().is_granted());
    }

    #[test]
    fn test_requirement_collapses_into_factors() {
        let multi_factor = MultiFactorBuilder::new()
            .require_factor("SCOPE_message:read")
            .build()
            .unwrap();

        let decider = multi_factor
            .has_authority(&Authority::new("SCOPE_message:read"))
            .unwrap();
        assert_eq!(decider, multi_factor.decider());

        let decider = multi_factor
            .has_any_authority(&[Authority::new("SCOPE_x"), Authority::new("SCOPE_message:read")])
            .unwrap();
        assert_eq!(decider, multi_factor.decider());
    }

    #[test]
    fn test_authenticated_requires_factors() {
        let multi_factor = MultiFactorBuilder::new()
            .require_factor("FACTOR_OTT")
            .build()
            .unwrap();

        let decider = multi_factor.authenticated().unwrap();
        assert!(decider.decide(&user(), &()).unwrap().is_denied());
        assert!(multi_factor.permit_all().unwrap().decide(&user(), &()).unwrap().is_granted());
    }
}
