//! # Warden Authorization Core
//!
//! Authorization deciders over authenticated principals and their authorities.
//!
//! ## Features
//!
//! - **Verdicts as values**: granted, denied (with reason) or abstain
//! - **System failures as errors**: a decision that cannot be computed is never
//!   reported as a denial
//! - **Lazy principals**: the principal supplier is only invoked when needed, and
//!   at most once per decision
//! - **Multi-factor composition**: require a fixed set of factor authorities on
//!   top of any requirement
//!
//! ## Example
//!
//! ```rust
//! use warden_authz::{
//!     Authority, AuthorizationDecider, AuthorizationDeciderFactory, MultiFactorBuilder,
//!     Principal, Supplied,
//! };
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = MultiFactorBuilder::new()
//!     .require_factors(["FACTOR_PASSWORD"])
//!     .build()?;
//!
//! let decider = factory.has_authority(&Authority::new("SCOPE_message:read"))?;
//! let user = Principal::new("user", "pass", ["SCOPE_message:read"]);
//!
//! let verdict = decider.decide(&Supplied::principal(user), &())?;
//! assert!(!verdict.is_granted());
//! # Ok(())
//! # }
//! ```

pub mod types;
pub mod decision;
pub mod decider;
pub mod factory;
pub mod error;

// Re-export commonly used types
pub use types::{Authority, Credentials, Principal, ROLE_PREFIX, SCOPE_PREFIX};
pub use decision::{DenialReason, Quantifier, Verdict};
pub use decider::{AuthorityDecider, AuthorizationDecider, Decider, PrincipalSupplier, Supplied};
pub use factory::{
    AuthorizationDeciderFactory, DeciderFactoryConfig, DefaultDeciderFactory, FactorSet,
    MultiFactor, MultiFactorBuilder,
};
pub use error::{AccessError, FailureKind, Result, SystemFailure};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
