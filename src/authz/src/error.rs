//! Error types for authorization decisions
//!
//! Two tiers are kept apart here. A [`SystemFailure`] means no decision could be
//! reached at all; an [`AccessError::Denied`] means a decision was reached and it
//! was negative. Callers that collapse the two hide bugs behind 403s.

use crate::decision::DenialReason;
use std::fmt;
use thiserror::Error;

/// Boxed underlying cause of a systemic failure
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Machine-readable classification of a [`SystemFailure`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FailureKind {
    /// A multi-factor builder was asked to build with no factors
    EmptyFactorSet,
    /// An any-of scope query was made with no scopes
    EmptyAnyScope,
    /// A scope argument was missing or empty
    NullScope,
    /// The principal supplier itself failed
    PrincipalSupplierThrew,
    /// Internal inconsistency
    Internal,
}

impl FailureKind {
    /// Stable code for this kind (e.g. `empty-factor-set`)
    pub fn code(&self) -> &'static str {
        match self {
            Self::EmptyFactorSet => "empty-factor-set",
            Self::EmptyAnyScope => "empty-any-scope",
            Self::NullScope => "null-scope",
            Self::PrincipalSupplierThrew => "principal-supplier-threw",
            Self::Internal => "internal",
        }
    }
}

impl fmt::Display for FailureKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// An authorization decision could not be computed because of a system problem.
///
/// This is never a policy denial. It is raised (returned as `Err`), not folded into
/// a verdict.
#[derive(Debug, Error)]
pub enum SystemFailure {
    /// Factor set was empty at build time
    #[error("Authorization system failure [empty-factor-set]: {0}")]
    EmptyFactorSet(String),

    /// Any-of scope query with no scopes
    #[error("Authorization system failure [empty-any-scope]: {0}")]
    EmptyAnyScope(String),

    /// Missing or empty scope argument
    #[error("Authorization system failure [null-scope]: {0}")]
    NullScope(String),

    /// Principal supplier failed
    #[error("Authorization system failure [principal-supplier-threw]: {message}")]
    PrincipalSupplier {
        /// Detail message
        message: String,
        /// Root cause
        #[source]
        source: Option<Cause>,
    },

    /// Internal inconsistency
    #[error("Authorization system failure [internal]: {message}")]
    Internal {
        /// Detail message
        message: String,
        /// Root cause
        #[source]
        source: Option<Cause>,
    },
}

impl SystemFailure {
    /// Create an empty-factor-set failure
    pub fn empty_factor_set<S: Into<String>>(msg: S) -> Self {
        SystemFailure::EmptyFactorSet(msg.into())
    }

    /// Create an empty-any-scope failure
    pub fn empty_any_scope<S: Into<String>>(msg: S) -> Self {
        SystemFailure::EmptyAnyScope(msg.into())
    }

    /// Create a null-scope failure
    pub fn null_scope<S: Into<String>>(msg: S) -> Self {
        SystemFailure::NullScope(msg.into())
    }

    /// Create a supplier failure without a cause
    pub fn supplier<S: Into<String>>(msg: S) -> Self {
        SystemFailure::PrincipalSupplier {
            message: msg.into(),
            source: None,
        }
    }

    /// Create a supplier failure wrapping the root cause
    pub fn supplier_with_cause<S, E>(msg: S, cause: E) -> Self
    where
        S: Into<String>,
        E: Into<Cause>,
    {
        SystemFailure::PrincipalSupplier {
            message: msg.into(),
            source: Some(cause.into()),
        }
    }

    /// Create an internal failure without a cause
    pub fn internal<S: Into<String>>(msg: S) -> Self {
        SystemFailure::Internal {
            message: msg.into(),
            source: None,
        }
    }

    /// Create an internal failure wrapping the root cause
    pub fn internal_with_cause<S, E>(msg: S, cause: E) -> Self
    where
        S: Into<String>,
        E: Into<Cause>,
    {
        SystemFailure::Internal {
            message: msg.into(),
            source: Some(cause.into()),
        }
    }

    /// Classification of this failure
    pub fn kind(&self) -> FailureKind {
        match self {
            Self::EmptyFactorSet(_) => FailureKind::EmptyFactorSet,
            Self::EmptyAnyScope(_) => FailureKind::EmptyAnyScope,
            Self::NullScope(_) => FailureKind::NullScope,
            Self::PrincipalSupplier { .. } => FailureKind::PrincipalSupplierThrew,
            Self::Internal { .. } => FailureKind::Internal,
        }
    }

    /// Human-readable detail message, without the kind prefix
    pub fn message(&self) -> &str {
        match self {
            Self::EmptyFactorSet(msg) | Self::EmptyAnyScope(msg) | Self::NullScope(msg) => msg,
            Self::PrincipalSupplier { message, .. } | Self::Internal { message, .. } => message,
        }
    }
}

/// Broad access refusal.
///
/// Consumers that only want "did this go through" can match on this type and still
/// tell a denial from a systemic failure.
#[derive(Debug, Error)]
pub enum AccessError {
    /// A decision was reached and it was negative
    #[error("Access denied: {0}")]
    Denied(DenialReason),

    /// No decision could be reached
    #[error(transparent)]
    System(#[from] SystemFailure),
}

impl AccessError {
    /// Whether this refusal comes from a systemic failure rather than policy
    pub fn is_system_failure(&self) -> bool {
        matches!(self, AccessError::System(_))
    }
}

/// Result type for authorization operations
pub type Result<T> = std::result::Result<T, SystemFailure>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as _;

    #[test]
    fn test_failure_kinds() {
        assert_eq!(SystemFailure::empty_factor_set("x").kind(), FailureKind::EmptyFactorSet);
        assert_eq!(SystemFailure::empty_any_scope("x").kind(), FailureKind::EmptyAnyScope);
        assert_eq!(SystemFailure::null_scope("x").kind(), FailureKind::NullScope);
        assert_eq!(SystemFailure::supplier("x").kind(), FailureKind::PrincipalSupplierThrew);
        assert_eq!(SystemFailure::internal("x").kind(), FailureKind::Internal);
    }

    #[test]
    fn test_failure_display() {
        let err = SystemFailure::empty_factor_set("no factors configured");
        assert_eq!(
            err.to_string(),
            "Authorization system failure [empty-factor-set]: no factors configured"
        );
        assert_eq!(err.message(), "no factors configured");
        assert_eq!(err.kind().to_string(), "empty-factor-set");
    }

    #[test]
    fn test_failure_keeps_cause() {
        let io = std::io::Error::new(std::io::ErrorKind::Other, "session store offline");
        let err = SystemFailure::supplier_with_cause("could not load principal", io);

        let source = err.source().expect("cause should be exposed");
        assert_eq!(source.to_string(), "session store offline");

        assert!(SystemFailure::internal("bare").source().is_none());
    }

    #[test]
    fn test_access_error_distinguishes_system_failure() {
        let err: AccessError = SystemFailure::internal("broken").into();
        assert!(err.is_system_failure());

        let err = AccessError::Denied(DenialReason::NotAuthenticated);
        assert!(!err.is_system_failure());
        assert_eq!(err.to_string(), "Access denied: not-authenticated");
    }
}
