//! The version-ordered lookup table and its resolution algorithm.
//!
//! A [`CompatibilityTable`] is built exactly once from a validated
//! [`ProfileChain`] and never mutated afterwards. Resolution is a binary
//! search for the rightmost profile whose version does not exceed the query:
//! capability flags hold from their introduction version onward until
//! overridden by a later rung.
//!
//! The table for the built-in ladder is available process-wide through
//! [`CompatibilityTable::shared`], which constructs it at most once even
//! under concurrent first access; all reads after that are lock-free. The
//! table is also an ordinary value, so callers that prefer explicit
//! dependencies can build and pass their own.

use std::sync::OnceLock;

use crate::chain::ProfileChain;
use crate::error::{CompatError, CompatResult};
use crate::ladder;
use crate::profile::CompatibilityProfile;
use crate::version::VersionSpec;

/// Immutable ascending-sorted mapping from version to profile.
///
/// # Examples
///
/// ```
/// use buildcompat::prelude::*;
///
/// let table = CompatibilityTable::shared();
/// let profile = table.resolve(&"5.6.16".parse()?)?;
/// assert_eq!(profile.style_checker_version(), "6.15");
/// # Ok::<(), buildcompat::error::CompatError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompatibilityTable {
    // Invariant: non-empty, strictly ascending by introduced_at.
    entries: Vec<CompatibilityProfile>,
}

impl CompatibilityTable {
    /// Consume a validated chain into a lookup table.
    ///
    /// The chain already guarantees ascending order; this re-validates strict
    /// monotonicity as a safety net against a hand-assembled chain value.
    pub fn build(chain: ProfileChain) -> CompatResult<Self> {
        let entries = chain.into_profiles();
        if entries.is_empty() {
            return Err(CompatError::EmptyChain);
        }
        for pair in entries.windows(2) {
            if pair[1].introduced_at() <= pair[0].introduced_at() {
                return Err(CompatError::NonMonotonicVersion {
                    previous: pair[0].introduced_at().clone(),
                    next: pair[1].introduced_at().clone(),
                });
            }
        }
        Ok(Self { entries })
    }

    /// The process-wide table for the built-in compatibility ladder.
    ///
    /// Built lazily on first access and cached for the process lifetime; the
    /// initialization guard ensures exactly one construction even when the
    /// first accesses race.
    pub fn shared() -> &'static CompatibilityTable {
        static TABLE: OnceLock<CompatibilityTable> = OnceLock::new();
        TABLE.get_or_init(|| {
            // A defective built-in ladder is a programming error, not a
            // runtime condition; surface it immediately.
            ladder::default_table().expect("built-in compatibility ladder must validate")
        })
    }

    /// Resolve a requested version to the profile active at that version:
    /// the greatest table version that is less than or equal to the request.
    ///
    /// Fails with [`CompatError::UnsupportedVersion`] when the request
    /// predates the oldest rung of the ladder.
    pub fn resolve(&self, requested: &VersionSpec) -> CompatResult<&CompatibilityProfile> {
        let index = self
            .entries
            .partition_point(|profile| profile.introduced_at() <= requested);
        if index == 0 {
            return Err(CompatError::UnsupportedVersion {
                requested: requested.clone(),
                minimum: self.min_version().clone(),
            });
        }
        Ok(&self.entries[index - 1])
    }

    /// The oldest version the ladder supports.
    pub fn min_version(&self) -> &VersionSpec {
        self.entries[0].introduced_at()
    }

    /// The newest declared rung of the ladder.
    pub fn max_version(&self) -> &VersionSpec {
        self.entries[self.entries.len() - 1].introduced_at()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Profiles in ascending version order.
    pub fn profiles(&self) -> impl Iterator<Item = &CompatibilityProfile> {
        self.entries.iter()
    }
}

/// Resolve against the shared built-in table. See
/// [`CompatibilityTable::resolve`].
pub fn resolve(requested: &VersionSpec) -> CompatResult<&'static CompatibilityProfile> {
    CompatibilityTable::shared().resolve(requested)
}

/// The oldest version supported by the shared built-in table.
pub fn min_version() -> &'static VersionSpec {
    CompatibilityTable::shared().min_version()
}
