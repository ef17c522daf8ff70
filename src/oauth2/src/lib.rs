//! # Warden OAuth2
//!
//! Scope-based authorization deciders for OAuth2 bearer principals.
//!
//! Scopes surface on a principal as `SCOPE_`-prefixed authorities. The
//! [`ScopeDeciderFactory`] builds deciders for "has scope X" and "has any of
//! scopes X, Y" on top of a pluggable decider factory, so a multi-factor
//! requirement can be layered over every scope check.
//!
//! ## Example
//!
//! ```rust
//! use warden_authz::{AuthorizationDecider, MultiFactorBuilder, Principal, Supplied};
//! use warden_oauth2::ScopeDeciderFactory;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let factory = ScopeDeciderFactory::with_factory(
//!     MultiFactorBuilder::new()
//!         .require_factors(["SCOPE_message:read"])
//!         .build()?,
//! );
//!
//! let user = Supplied::principal(Principal::new("user", "pass", ["SCOPE_message:read"]));
//!
//! assert!(factory.has_scope("message:read")?.decide(&user, "")?.is_granted());
//! assert!(!factory.has_scope("message:write")?.decide(&user, "")?.is_granted());
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod scope;

// Re-export commonly used types
pub use config::ScopeFactoryConfig;
pub use scope::ScopeDeciderFactory;

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
