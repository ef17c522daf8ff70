//! Authorization deciders
//!
//! A decider maps a lazily supplied principal and a target to a [`Verdict`].
//! Built-in deciders are variants of the [`Decider`] enum; anything else can
//! implement [`AuthorizationDecider`] directly.
//!
//! # Example
//!
//! ```rust
//! use std::sync::Arc;
//! use warden_authz::{AuthorizationDecider, AuthorityDecider, Decider, Principal, Supplied};
//!
//! let decider = Decider::from(AuthorityDecider::has_authority("SCOPE_message:read"));
//! let user = Principal::new("user", "pass", ["SCOPE_message:read"]);
//!
//! let verdict = decider.decide(&Supplied::principal(user), &()).unwrap();
//! assert!(verdict.is_granted());
//! ```

pub mod authority;
mod composite;


pub use authority::AuthorityDecider;

use crate::decision::{DenialReason, Verdict};
use crate::error::{AccessError, Result};
use crate::types::Principal;
use std::cell::OnceCell;
use std::sync::Arc;
use tracing::debug;

/// Zero-argument source of the principal under decision.
///
/// Deciders call it only when they need the principal, so expensive
/// authentication state is never materialized for a short-circuit.
pub trait PrincipalSupplier {
    /// Produce the principal, `None` when there is no authenticated identity
    fn get(&self) -> Result<Option<Arc<Principal>>>;
}

impl<F> PrincipalSupplier for F
where
    F: Fn() -> Result<Option<Arc<Principal>>>,
{
    fn get(&self) -> Result<Option<Arc<Principal>>> {
        self()
    }
}

/// Supplier over an already materialized principal
#[derive(Debug, Clone, Default)]
pub struct Supplied(Option<Arc<Principal>>);

impl Supplied {
    /// Supply `principal`
    pub fn principal(principal: Principal) -> Self {
        Self(Some(Arc::new(principal)))
    }

    /// Supply a shared principal
    pub fn shared(principal: Arc<Principal>) -> Self {
        Self(Some(principal))
    }

    /// Supply no principal at all
    pub fn anonymous() -> Self {
        Self(None)
    }
}

impl PrincipalSupplier for Supplied {
    fn get(&self) -> Result<Option<Arc<Principal>>> {
        Ok(self.0.clone())
    }
}

/// Wraps a supplier so the inner one runs at most once per decision
pub(crate) struct Memoized<'a> {
    inner: &'a dyn PrincipalSupplier,
    cell: OnceCell<Option<Arc<Principal>>>,
}

impl<'a> Memoized<'a> {
    pub(crate) fn new(inner: &'a dyn PrincipalSupplier) -> Self {
        Self {
            inner,
            cell: OnceCell::new(),
        }
    }
}

impl PrincipalSupplier for Memoized<'_> {
    fn get(&self) -> Result<Option<Arc<Principal>>> {
        if let Some(principal) = self.cell.get() {
            return Ok(principal.clone());
        }
        let principal = self.inner.get()?;
        Ok(self.cell.get_or_init(|| principal).clone())
    }
}

/// Decision capability: `(principal, target) -> verdict`.
///
/// Implementations must be immutable after construction; they are shared across
/// threads and invoked without synchronization.
pub trait AuthorizationDecider<T: ?Sized>: Send + Sync {
    /// Decide on `target` for the supplied principal.
    ///
    /// Denials and abstentions are returned as verdicts. `Err` is reserved for
    /// systemic failures, including a failing supplier.
    fn decide(&self, principal: &dyn PrincipalSupplier, target: &T) -> Result<Verdict>;

    /// Like [`decide`](Self::decide), folding the verdict into a result
    fn check(
        &self,
        principal: &dyn PrincipalSupplier,
        target: &T,
    ) -> std::result::Result<(), AccessError> {
        self.decide(principal, target)?.into_result()
    }
}

/// Built-in deciders.
///
/// The variant is observable so callers can specialize on it, for example to
/// inspect the authorities an [`AuthorityDecider`] requires.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decider {
    /// Always grants; never consults the principal
    PermitAll,
    /// Always denies; never consults the principal
    DenyAll,
    /// Grants any authenticated principal
    Authenticated,
    /// Authority set check
    Authority(AuthorityDecider),
    /// Every child must grant
    AllOf(Vec<Decider>),
    /// At least one child must grant
    AnyOf(Vec<Decider>),
}

impl Decider {
    /// Combine deciders under AND
    pub fn all_of(children: impl IntoIterator<Item = Decider>) -> Self {
        Decider::AllOf(children.into_iter().collect())
    }

    /// Combine deciders under OR
    pub fn any_of(children: impl IntoIterator<Item = Decider>) -> Self {
        Decider::AnyOf(children.into_iter().collect())
    }

    /// The authority decider, when this is that variant
    pub fn as_authority(&self) -> Option<&AuthorityDecider> {
        match self {
            Decider::Authority(decider) => Some(decider),
            _ => None,
        }
    }

    /// Whether this is the authority-decider variant
    pub fn is_authority(&self) -> bool {
        matches!(self, Decider::Authority(_))
    }

    /// Evaluate without a target; every built-in decider ignores it
    pub fn evaluate(&self, principal: &dyn PrincipalSupplier) -> Result<Verdict> {
        match self {
            Decider::PermitAll => Ok(Verdict::Granted),
            Decider::DenyAll => Ok(Verdict::denied(DenialReason::DenyAll)),
            Decider::Authenticated => {
                let principal = principal.get()?;
                match principal {
                    Some(p) if p.is_authenticated() => Ok(Verdict::Granted),
                    _ => Ok(Verdict::denied(DenialReason::NotAuthenticated)),
                }
            }
            Decider::Authority(decider) => decider.evaluate_with(principal),
            Decider::AllOf(children) => {
                let memoized = Memoized::new(principal);
                composite::all_of(children, &memoized)
            }
            Decider::AnyOf(children) => {
                let memoized = Memoized::new(principal);
                composite::any_of(children, &memoized)
            }
        }
    }
}

impl From<AuthorityDecider> for Decider {
    fn from(decider: AuthorityDecider) -> Self {
        Decider::Authority(decider)
    }
}

impl<T: ?Sized> AuthorizationDecider<T> for Decider {
    fn decide(&self, principal: &dyn PrincipalSupplier, _target: &T) -> Result<Verdict> {
        let verdict = self.evaluate(principal)?;
        debug!("Decision: {:?}", verdict);
        Ok(verdict)
    }
}
