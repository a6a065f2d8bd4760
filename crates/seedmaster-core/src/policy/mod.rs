//! Seed-assignment policies.
//!
//! A policy is a (mostly) pure function from an engine's identity to a
//! seed. Six concrete policies are supported; `perEvent` is the one
//! composite, delegating construction-time seeding to a nested policy and
//! computing a fresh seed every event from a named algorithm.

mod auto_increment;
pub(crate) mod config_tree;
mod linear_mapping;
mod per_event;
mod predefined_offset;
mod predefined_seed;
mod random;
mod registry;

pub use registry::PolicyRegistry;

use auto_increment::AutoIncrement;
use linear_mapping::LinearMapping;
use per_event::PerEvent;
use predefined_offset::PreDefinedOffset;
use predefined_seed::PreDefinedSeed;
use random::Random;

use crate::engine_id::EngineId;
use crate::error::SeedMasterError;
use crate::event_data::EventData;
use crate::seed::Seed;

/// The six supported policy kinds, used for diagnostics and for resolving a
/// configuration's `policy` name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    AutoIncrement,
    LinearMapping,
    PreDefinedOffset,
    PreDefinedSeed,
    Random,
    PerEvent,
}

impl PolicyKind {
    pub const ALL: [Self; 6] = [
        Self::AutoIncrement,
        Self::LinearMapping,
        Self::PreDefinedOffset,
        Self::PreDefinedSeed,
        Self::Random,
        Self::PerEvent,
    ];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::AutoIncrement => "autoIncrement",
            Self::LinearMapping => "linearMapping",
            Self::PreDefinedOffset => "preDefinedOffset",
            Self::PreDefinedSeed => "preDefinedSeed",
            Self::Random => "random",
            Self::PerEvent => "perEvent",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|k| k.name() == name)
    }
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// A constructed, ready-to-query policy.
#[derive(Debug)]
pub enum Policy {
    AutoIncrement(AutoIncrement),
    LinearMapping(LinearMapping),
    PreDefinedOffset(PreDefinedOffset),
    PreDefinedSeed(PreDefinedSeed),
    Random(Random),
    PerEvent(PerEvent),
}

impl Policy {
    #[must_use]
    pub const fn kind(&self) -> PolicyKind {
        match self {
            Self::AutoIncrement(_) => PolicyKind::AutoIncrement,
            Self::LinearMapping(_) => PolicyKind::LinearMapping,
            Self::PreDefinedOffset(_) => PolicyKind::PreDefinedOffset,
            Self::PreDefinedSeed(_) => PolicyKind::PreDefinedSeed,
            Self::Random(_) => PolicyKind::Random,
            Self::PerEvent(_) => PolicyKind::PerEvent,
        }
    }

    /// Whether this policy is expected to assign distinct seeds to distinct
    /// engines. `SeedMaster` only runs its uniqueness check against policies
    /// that claim this.
    #[must_use]
    pub const fn yields_unique_seeds(&self) -> bool {
        match self {
            Self::AutoIncrement(_) | Self::LinearMapping(_) | Self::PreDefinedOffset(_) | Self::Random(_) => true,
            Self::PreDefinedSeed(_) | Self::PerEvent(_) => false,
        }
    }

    /// Whether this policy computes a genuinely different seed for the same
    /// engine on every event. Only `perEvent` does. `SeedMaster` uses this
    /// to decide whether `get_event_seed` should run this policy's
    /// per-event algorithm at all, or simply reuse the cached construction-
    /// time seed from `get_seed` (calling a non-event-dependent policy's raw
    /// `get_seed` a second time would mutate its internal counter/PRNG
    /// state and mint a different, uncached value).
    #[must_use]
    pub const fn is_event_dependent(&self) -> bool {
        matches!(self, Self::PerEvent(_))
    }

    pub fn get_seed(&mut self, engine: &EngineId) -> Result<Seed, SeedMasterError> {
        match self {
            Self::AutoIncrement(p) => p.get_seed(engine),
            Self::LinearMapping(p) => p.get_seed(engine),
            Self::PreDefinedOffset(p) => p.get_seed(engine),
            Self::PreDefinedSeed(p) => p.get_seed(engine),
            Self::Random(p) => p.get_seed(engine),
            Self::PerEvent(p) => p.get_seed(engine),
        }
    }

    /// Run the `perEvent` per-event algorithm. Only meaningful when
    /// [`Self::is_event_dependent`] is true; `SeedMaster::get_event_seed` is
    /// the only caller and checks that first. Calling this directly on a
    /// non-event-dependent policy falls back to its raw `get_seed`, which is
    /// stateful and uncached — callers outside `SeedMaster` should not rely
    /// on that fallback for reproducible results.
    pub fn get_event_seed(&mut self, engine: &EngineId, data: &EventData) -> Result<Seed, SeedMasterError> {
        match self {
            Self::PerEvent(p) => p.get_event_seed(engine, data),
            other => other.get_seed(engine),
        }
    }
}
