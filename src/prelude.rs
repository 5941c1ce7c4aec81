//! Convenience re-exports of the public surface.

pub use crate::chain::{ChainBuilder, ChainEntry, ProfileChain};
pub use crate::error::{CompatError, CompatResult};
pub use crate::ladder::{default_chain, default_table};
pub use crate::profile::{CompatibilityProfile, Flag, FlagValue};
pub use crate::table::CompatibilityTable;
pub use crate::version::VersionSpec;
