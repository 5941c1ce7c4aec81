//! Declaration and validation of the linear profile inheritance chain.
//!
//! A chain is declared as an ordered list of [`ChainEntry`] values, each
//! deriving from exactly one predecessor. Validation happens once, at
//! construction: the ancestry must form a single path (one root, no
//! branching, no dangling parent references) and versions must strictly
//! increase along it. The validated [`ProfileChain`] carries fully-resolved
//! profiles and is what [`CompatibilityTable::build`] consumes.
//!
//! # Examples
//!
//! ```
//! use buildcompat::prelude::*;
//!
//! let chain = ChainBuilder::new()
//!     .step("1.0.0".parse()?, [])
//!     .step("2.0.0".parse()?, [(Flag::SupportsLicenses, true.into())])
//!     .build()?;
//!
//! assert_eq!(chain.len(), 2);
//! # Ok::<(), buildcompat::error::CompatError>(())
//! ```
//!
//! [`CompatibilityTable::build`]: crate::table::CompatibilityTable::build

use std::collections::BTreeMap;

use typed_builder::TypedBuilder;

use crate::error::{CompatError, CompatResult};
use crate::profile::{CompatibilityProfile, Flag, FlagValue};
use crate::version::VersionSpec;

/// A single declared rung of the compatibility ladder.
#[derive(Debug, Clone, TypedBuilder)]
pub struct ChainEntry {
    /// Profile name, unique within the chain.
    #[builder(setter(into))]
    pub name: String,

    /// Version at which this profile's overrides take effect.
    pub introduced_at: VersionSpec,

    /// Name of the predecessor profile; `None` marks the root.
    #[builder(default, setter(strip_option, into))]
    pub parent: Option<String>,

    /// Sparse flag overrides relative to the predecessor.
    #[builder(default)]
    pub overrides: BTreeMap<Flag, FlagValue>,
}

/// Convenience builder for the common linear declaration: each step derives
/// from the step before it and is named after its version.
#[derive(Debug, Default)]
pub struct ChainBuilder {
    entries: Vec<ChainEntry>,
}

impl ChainBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append the next rung of the ladder with a sparse set of overrides.
    pub fn step(
        mut self,
        introduced_at: VersionSpec,
        overrides: impl IntoIterator<Item = (Flag, FlagValue)>,
    ) -> Self {
        let parent = self.entries.last().map(|entry| entry.name.clone());
        self.entries.push(ChainEntry {
            name: introduced_at.to_string(),
            introduced_at,
            parent,
            overrides: overrides.into_iter().collect(),
        });
        self
    }

    /// Validate the declared entries into a [`ProfileChain`].
    pub fn build(self) -> CompatResult<ProfileChain> {
        ProfileChain::from_entries(self.entries)
    }
}

/// A validated, fully-resolved linear sequence of profiles with strictly
/// increasing versions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileChain {
    profiles: Vec<CompatibilityProfile>,
}

impl ProfileChain {
    /// Flatten and validate a declared entry list into a chain.
    ///
    /// Entries may appear in any declaration order as long as their ancestry
    /// forms a single path; the resulting chain is in ancestry order. Each
    /// validation failure is a distinct [`CompatError`]:
    ///
    /// - no entries at all: [`CompatError::EmptyChain`]
    /// - a parent name that matches no entry, or an entry unreachable from
    ///   the root: [`CompatError::BrokenChain`]
    /// - two roots, two entries with one name, or two entries deriving from
    ///   the same parent: [`CompatError::AmbiguousChain`]
    /// - versions that fail to strictly increase along the path:
    ///   [`CompatError::NonMonotonicVersion`]
    pub fn from_entries(entries: Vec<ChainEntry>) -> CompatResult<Self> {
        if entries.is_empty() {
            return Err(CompatError::EmptyChain);
        }

        let mut by_name: BTreeMap<&str, &ChainEntry> = BTreeMap::new();
        for entry in &entries {
            if let Some(previous) = by_name.insert(&entry.name, entry) {
                return Err(CompatError::AmbiguousChain {
                    parent: previous
                        .parent
                        .clone()
                        .unwrap_or_else(|| "the chain root".to_string()),
                    first: previous.name.clone(),
                    second: entry.name.clone(),
                });
            }
        }

        let mut roots: Vec<&ChainEntry> = Vec::new();
        let mut children: BTreeMap<&str, Vec<&ChainEntry>> = BTreeMap::new();
        for entry in &entries {
            match &entry.parent {
                None => roots.push(entry),
                Some(parent) => {
                    if !by_name.contains_key(parent.as_str()) {
                        return Err(CompatError::BrokenChain {
                            profile: entry.name.clone(),
                            parent: parent.clone(),
                        });
                    }
                    children.entry(parent.as_str()).or_default().push(entry);
                }
            }
        }

        if let [first, second, ..] = roots.as_slice() {
            return Err(CompatError::AmbiguousChain {
                parent: "the chain root".to_string(),
                first: first.name.clone(),
                second: second.name.clone(),
            });
        }
        // No root at all means every entry names a defined parent, which is
        // only possible if the ancestry contains a cycle.
        let Some(root) = roots.first() else {
            return Err(CompatError::BrokenChain {
                profile: entries[0].name.clone(),
                parent: entries[0]
                    .parent
                    .clone()
                    .unwrap_or_else(|| "the chain root".to_string()),
            });
        };

        // Walk the single path from the root, checking linearity as we go.
        let mut current: &ChainEntry = root;
        let mut ordered: Vec<&ChainEntry> = vec![current];
        loop {
            match children.get(current.name.as_str()).map(Vec::as_slice) {
                None | Some([]) => break,
                Some([next]) => {
                    ordered.push(next);
                    current = next;
                }
                Some([first, second, ..]) => {
                    return Err(CompatError::AmbiguousChain {
                        parent: current.name.clone(),
                        first: first.name.clone(),
                        second: second.name.clone(),
                    });
                }
            }
        }
        if let Some(unreached) = entries
            .iter()
            .find(|entry| !ordered.iter().any(|seen| seen.name == entry.name))
        {
            return Err(CompatError::BrokenChain {
                profile: unreached.name.clone(),
                parent: unreached
                    .parent
                    .clone()
                    .unwrap_or_else(|| "the chain root".to_string()),
            });
        }

        for pair in ordered.windows(2) {
            if pair[1].introduced_at <= pair[0].introduced_at {
                return Err(CompatError::NonMonotonicVersion {
                    previous: pair[0].introduced_at.clone(),
                    next: pair[1].introduced_at.clone(),
                });
            }
        }

        let mut profiles: Vec<CompatibilityProfile> = Vec::with_capacity(ordered.len());
        for entry in ordered {
            let profile = match profiles.last() {
                None => CompatibilityProfile::root(
                    entry.name.clone(),
                    entry.introduced_at.clone(),
                    entry.overrides.clone(),
                ),
                Some(parent) => CompatibilityProfile::derived(
                    entry.name.clone(),
                    entry.introduced_at.clone(),
                    parent,
                    entry.overrides.clone(),
                ),
            };
            profiles.push(profile);
        }

        Ok(Self { profiles })
    }

    pub fn len(&self) -> usize {
        self.profiles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.profiles.is_empty()
    }

    /// Profiles in ancestry (ascending version) order.
    pub fn profiles(&self) -> impl Iterator<Item = &CompatibilityProfile> {
        self.profiles.iter()
    }

    pub(crate) fn into_profiles(self) -> Vec<CompatibilityProfile> {
        self.profiles
    }
}
