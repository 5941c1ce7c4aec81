use thiserror::Error;

use crate::version::VersionSpec;

pub type CompatResult<T> = Result<T, CompatError>;

/// Failures produced while parsing versions, assembling the compatibility
/// chain, or resolving a requested version against the built table.
///
/// The chain-assembly variants (`NonMonotonicVersion`, `AmbiguousChain`,
/// `EmptyChain`, `BrokenChain`) indicate a defect in the declared ladder
/// itself and should be surfaced immediately rather than recovered from:
/// a broken ladder can silently resolve every later query to the wrong
/// profile. `UnsupportedVersion` is the one legitimate runtime condition.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CompatError {
    #[error("Malformed Version: {input:?} is not a dotted numeric version")]
    MalformedVersion { input: String },

    #[error("Non-Monotonic Version: {next} does not strictly increase over {previous}")]
    NonMonotonicVersion {
        previous: VersionSpec,
        next: VersionSpec,
    },

    #[error("Ambiguous Chain: profiles {first} and {second} both follow {parent}")]
    AmbiguousChain {
        parent: String,
        first: String,
        second: String,
    },

    #[error("Empty Chain: at least one root profile is required")]
    EmptyChain,

    #[error("Broken Chain: profile {profile} has no resolvable predecessor {parent}")]
    BrokenChain { profile: String, parent: String },

    #[error("Unsupported Version: {requested} predates the oldest supported version {minimum}")]
    UnsupportedVersion {
        requested: VersionSpec,
        minimum: VersionSpec,
    },
}
