//! Authority set decider

use super::{AuthorizationDecider, PrincipalSupplier};
use crate::decision::{DenialReason, Quantifier, Verdict};
use crate::error::{Result, SystemFailure};
use crate::types::{Authority, Principal};
use std::collections::HashSet;
use std::sync::Arc;
use tracing::{debug, warn};

/// Grants when the principal's authorities satisfy a required set.
///
/// - `Quantifier::All`: required ⊆ granted
/// - `Quantifier::Any`: required ∩ granted ≠ ∅
///
/// The required set is never empty and keeps first-seen order for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorityDecider {
    required: Arc<[Authority]>,
    quantifier: Quantifier,
}

impl AuthorityDecider {
    /// Create a decider over `required`; duplicates are collapsed
    pub fn new<I, A>(quantifier: Quantifier, required: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Authority>,
    {
        let required = dedup(required.into_iter().map(Into::into));
        if required.is_empty() {
            return Err(SystemFailure::internal(format!(
                "Authority decider ({}) requires at least one authority",
                quantifier
            )));
        }

        Ok(Self::from_shared(required.into(), quantifier))
    }

    /// Share an already validated, non-empty authority snapshot
    pub(crate) fn from_shared(required: Arc<[Authority]>, quantifier: Quantifier) -> Self {
        debug_assert!(!required.is_empty());
        Self {
            required,
            quantifier,
        }
    }

    /// Require a single authority
    pub fn has_authority(authority: impl Into<Authority>) -> Self {
        Self::from_shared(Arc::from(vec![authority.into()]), Quantifier::All)
    }

    /// Require every one of `authorities`
    pub fn has_all_authorities<I, A>(authorities: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Authority>,
    {
        Self::new(Quantifier::All, authorities)
    }

    /// Require at least one of `authorities`
    pub fn has_any_authority<I, A>(authorities: I) -> Result<Self>
    where
        I: IntoIterator<Item = A>,
        A: Into<Authority>,
    {
        Self::new(Quantifier::Any, authorities)
    }

    /// Required authorities, in first-seen order
    pub fn required(&self) -> &[Authority] {
        &self.required
    }

    /// Quantifier the requirement is evaluated under
    pub fn quantifier(&self) -> Quantifier {
        self.quantifier
    }

    /// Pure decision over an already obtained principal
    pub fn evaluate(&self, principal: Option<&Principal>) -> Verdict {
        let principal = match principal {
            Some(p) if p.is_authenticated() => p,
            _ => return Verdict::denied(DenialReason::NotAuthenticated),
        };

        let granted = match self.quantifier {
            Quantifier::All => self.required.iter().all(|a| principal.has_authority(a)),
            Quantifier::Any => self.required.iter().any(|a| principal.has_authority(a)),
        };

        if granted {
            return Verdict::Granted;
        }

        let missing = self
            .required
            .iter()
            .filter(|a| !principal.has_authority(a))
            .cloned()
            .collect();

        Verdict::denied(DenialReason::MissingAuthorities {
            quantifier: self.quantifier,
            required: self.required.to_vec(),
            missing,
        })
    }

    /// Obtain the principal from `supplier` exactly once, then evaluate
    pub(crate) fn evaluate_with(&self, supplier: &dyn PrincipalSupplier) -> Result<Verdict> {
        let principal = supplier.get().map_err(|e| {
            warn!("Principal supplier failed: {}", e);
            e
        })?;

        let verdict = self.evaluate(principal.as_deref());
        debug!(
            "Authority check ({}) over {:?}: granted={}",
            self.quantifier,
            self.required,
            verdict.is_granted()
        );
        Ok(verdict)
    }
}

impl<T: ?Sized> AuthorizationDecider<T> for AuthorityDecider {
    fn decide(&self, principal: &dyn PrincipalSupplier, _target: &T) -> Result<Verdict> {
        self.evaluate_with(principal)
    }
}

/// Collapse duplicates, keeping first-seen order
pub(crate) fn dedup(authorities: impl Iterator<Item = Authority>) -> Vec<Authority> {
    let mut seen = HashSet::new();
    authorities.filter(|a| seen.insert(a.clone())).collect()
}
