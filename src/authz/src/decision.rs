//! Authorization verdicts and denial reasons

use crate::error::AccessError;
use crate::types::Authority;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How a required authority set is matched against a principal
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Quantifier {
    /// Every required authority must be present
    All,
    /// At least one required authority must be present
    Any,
}

impl fmt::Display for Quantifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Quantifier::All => f.write_str("all-of"),
            Quantifier::Any => f.write_str("any-of"),
        }
    }
}

/// Why a decider denied
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DenialReason {
    /// No principal, or principal not authenticated
    NotAuthenticated,

    /// Authority requirement not met
    MissingAuthorities {
        /// Quantifier the requirement was evaluated under
        quantifier: Quantifier,
        /// The full required set
        required: Vec<Authority>,
        /// Required authorities the principal lacks
        missing: Vec<Authority>,
    },

    /// Unconditional denial
    DenyAll,

    /// No decider had an opinion, so nothing granted access
    Abstained,

    /// Several children denied (any-of composition)
    NoneSatisfied {
        /// Reasons reported by each denying child
        reasons: Vec<DenialReason>,
    },
}

impl fmt::Display for DenialReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DenialReason::NotAuthenticated => f.write_str("not-authenticated"),
            DenialReason::MissingAuthorities {
                quantifier: Quantifier::All,
                missing,
                ..
            } => write!(f, "missing authorities [{}]", join(missing)),
            DenialReason::MissingAuthorities {
                quantifier: Quantifier::Any,
                required,
                ..
            } => write!(f, "requires any of [{}]", join(required)),
            DenialReason::DenyAll => f.write_str("deny-all"),
            DenialReason::Abstained => f.write_str("abstained"),
            DenialReason::NoneSatisfied { reasons } => {
                let parts: Vec<String> = reasons.iter().map(ToString::to_string).collect();
                write!(f, "none satisfied: {}", parts.join("; "))
            }
        }
    }
}

fn join(authorities: &[Authority]) -> String {
    authorities
        .iter()
        .map(Authority::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Outcome of a single authorization decision
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "verdict", rename_all = "UPPERCASE")]
pub enum Verdict {
    /// Access granted
    Granted,
    /// Access denied, with the unmet requirement when known
    Denied {
        /// Why access was denied
        reason: DenialReason,
    },
    /// The decider has no opinion
    Abstain,
}

impl Verdict {
    /// Denied verdict
    pub fn denied(reason: DenialReason) -> Self {
        Verdict::Denied { reason }
    }

    /// Whether access was granted
    pub fn is_granted(&self) -> bool {
        matches!(self, Verdict::Granted)
    }

    /// Whether access was denied
    pub fn is_denied(&self) -> bool {
        matches!(self, Verdict::Denied { .. })
    }

    /// Whether the decider abstained
    pub fn is_abstain(&self) -> bool {
        matches!(self, Verdict::Abstain)
    }

    /// Diagnostic reason for a denial
    pub fn reason(&self) -> Option<String> {
        self.denial_reason().map(ToString::to_string)
    }

    /// Structured denial reason
    pub fn denial_reason(&self) -> Option<&DenialReason> {
        match self {
            Verdict::Denied { reason } => Some(reason),
            _ => None,
        }
    }

    /// Convert into a result; anything other than `Granted` is a denial.
    ///
    /// An abstention carries no grant, so it maps to `Abstained`.
    pub fn into_result(self) -> std::result::Result<(), AccessError> {
        match self {
            Verdict::Granted => Ok(()),
            Verdict::Denied { reason } => Err(AccessError::Denied(reason)),
            Verdict::Abstain => Err(AccessError::Denied(DenialReason::Abstained)),
        }
    }
}
