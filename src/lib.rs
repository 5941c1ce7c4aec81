//! # buildcompat
//!
//! A version-gated compatibility resolver for build tooling: default
//! behaviors evolve over time, and any project can pin itself to an older
//! behavior set by declaring an older minimum tool version.
//!
//! ## Features
//!
//! - **Ordered versions**: dotted version numbers with a total,
//!   component-wise ordering (`5.2` == `5.2.0`)
//! - **Capability profiles**: immutable named bundles of typed behavior
//!   flags, each effective from its introduction version onward
//! - **Linear inheritance**: each profile overrides a sparse set of flags on
//!   its predecessor; the chain is validated for strict version monotonicity
//!   and single-path ancestry at construction time
//! - **Ordered resolution**: binary search for the newest profile not newer
//!   than the requested version, with a clear error when the request
//!   predates the ladder entirely
//!
//! ## Quick Start
//!
//! ```rust
//! use buildcompat::prelude::*;
//!
//! // A project declares the minimum tool version it was written against.
//! let declared: VersionSpec = "5.124.7".parse()?;
//!
//! let profile = buildcompat::table::resolve(&declared)?;
//! assert!(profile.supports_licenses());
//! assert!(!profile.overwrite_project_attributes());
//!
//! // Anything older than the first rung of the ladder cannot be served.
//! let ancient: VersionSpec = "4.9.0".parse()?;
//! assert!(buildcompat::table::resolve(&ancient).is_err());
//! # Ok::<(), buildcompat::error::CompatError>(())
//! ```

pub mod chain;
pub mod error;
pub mod ladder;
pub mod prelude;
pub mod profile;
pub mod table;
pub mod version;
