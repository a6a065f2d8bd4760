//! `SeedMaster`: owns the chosen policy, the per-engine record table, and the
//! three seed caches, and exposes the register/query/reseed vocabulary.

use std::collections::BTreeMap;
use std::io::{self, Write};

use serde::Serialize;
use tracing::{debug, instrument, warn};

use crate::engine_id::EngineId;
use crate::error::{LogicError, SeedMasterError, UniquenessError};
use crate::event_data::EventData;
use crate::policy::Policy;
use crate::seed::Seed;

/// A callback invoked with the seed that should be pushed into a real
/// generator. `seedmaster-core` knows nothing about concrete engine
/// families; convenience wrappers for CLHEP/ROOT-style engines live in
/// `seedmaster-service`.
pub type SeederFn = Box<dyn FnMut(&EngineId, Seed)>;

struct EngineRecord {
    seeder: Option<SeederFn>,
    frozen: bool,
}

impl EngineRecord {
    fn new(seeder: Option<SeederFn>) -> Self {
        Self { seeder, frozen: false }
    }
}

/// Owns one policy and the bookkeeping needed to register engines, compute
/// their seeds, and reseed them at the phases the host framework drives.
pub struct SeedMaster {
    policy: Policy,
    records: BTreeMap<EngineId, EngineRecord>,
    configured: BTreeMap<EngineId, Seed>,
    known_event: BTreeMap<EngineId, Seed>,
    current: BTreeMap<EngineId, Seed>,
}

impl SeedMaster {
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self {
            policy,
            records: BTreeMap::new(),
            configured: BTreeMap::new(),
            known_event: BTreeMap::new(),
            current: BTreeMap::new(),
        }
    }

    #[must_use]
    pub const fn policy(&self) -> &Policy {
        &self.policy
    }

    /// Bind `seeder` to `id`. Overwrites any seeder already bound; does not
    /// fail on an existing record (see [`Self::register_new_seeder`] for the
    /// strict variant). Does not compute a seed.
    #[instrument(skip(self, seeder))]
    pub fn register_seeder(&mut self, id: &EngineId, seeder: Option<SeederFn>) {
        match self.records.get_mut(id) {
            Some(record) => record.seeder = seeder,
            None => {
                self.records.insert(id.clone(), EngineRecord::new(seeder));
            }
        }
        debug!(engine = %id, "registered seeder");
    }

    /// Like [`Self::register_seeder`], but fails if `id` is already
    /// registered.
    #[instrument(skip(self, seeder))]
    pub fn register_new_seeder(&mut self, id: &EngineId, seeder: Option<SeederFn>) -> Result<(), SeedMasterError> {
        if self.records.contains_key(id) {
            return Err(LogicError::DuplicateRegistration { engine: id.clone() }.into());
        }
        self.records.insert(id.clone(), EngineRecord::new(seeder));
        debug!(engine = %id, "registered new seeder");
        Ok(())
    }

    /// Mark `id` frozen with `seed`, writing both `configured[id]` and
    /// `current[id]`. Fails if `id` was never registered.
    #[instrument(skip(self))]
    pub fn freeze_seed(&mut self, id: &EngineId, seed: Seed) -> Result<(), SeedMasterError> {
        let record = self
            .records
            .get_mut(id)
            .ok_or_else(|| LogicError::FreezeUnknownEngine { engine: id.clone() })?;
        record.frozen = true;
        self.configured.insert(id.clone(), seed);
        self.current.insert(id.clone(), seed);
        debug!(engine = %id, %seed, "froze seed");
        Ok(())
    }

    #[must_use]
    pub fn is_frozen(&self, id: &EngineId) -> bool {
        self.records.get(id).is_some_and(|r| r.frozen)
    }

    #[must_use]
    pub fn is_registered(&self, id: &EngineId) -> bool {
        self.records.contains_key(id)
    }

    #[must_use]
    pub fn has_seeder(&self, id: &EngineId) -> bool {
        self.records.get(id).is_some_and(|r| r.seeder.is_some())
    }

    /// Invoke the bound seeder (if any) with `current[id]`, regardless of
    /// frozen state. Used by callers that just wrote `current[id]` via
    /// [`Self::freeze_seed`] or [`Self::get_seed`] and need the push to
    /// happen immediately rather than through the frozen-skipping
    /// [`Self::reseed`] path.
    pub fn push_seed(&mut self, id: &EngineId) {
        let seed = self.get_current_seed(id);
        if let Some(record) = self.records.get_mut(id) {
            if let Some(seeder) = record.seeder.as_mut() {
                seeder(id, seed);
            }
        }
    }

    /// Return `configured[id]` if present; else compute it via the policy,
    /// apply the uniqueness check when the policy claims it, cache, and
    /// return it.
    #[instrument(skip(self))]
    pub fn get_seed(&mut self, id: &EngineId) -> Result<Seed, SeedMasterError> {
        if let Some(seed) = self.configured.get(id) {
            return Ok(*seed);
        }
        let seed = self.policy.get_seed(id)?;
        if self.policy.yields_unique_seeds() {
            check_uniqueness(&self.configured, id, seed)?;
        }
        self.configured.insert(id.clone(), seed);
        if seed.is_valid() {
            self.current.insert(id.clone(), seed);
        }
        Ok(seed)
    }

    /// Return `knownEvent[id]` if present; else compute it, cache, and
    /// return it. Only a genuinely event-dependent policy (`perEvent`) runs
    /// its per-event algorithm here; every other policy's seed does not
    /// vary across events, so it is routed through the already-cached
    /// [`Self::get_seed`] instead of recomputing via the raw, stateful
    /// per-policy method (which would mint a fresh, uncached value on every
    /// call and desynchronize `configured` from `current`).
    #[instrument(skip(self, data))]
    pub fn get_event_seed(&mut self, data: &EventData, id: &EngineId) -> Result<Seed, SeedMasterError> {
        if let Some(seed) = self.known_event.get(id) {
            return Ok(*seed);
        }
        let seed = if self.policy.is_event_dependent() {
            let seed = self.policy.get_event_seed(id, data)?;
            if self.policy.yields_unique_seeds() {
                check_uniqueness(&self.known_event, id, seed)?;
            }
            seed
        } else {
            self.get_seed(id)?
        };
        self.known_event.insert(id.clone(), seed);
        if seed.is_valid() {
            self.current.insert(id.clone(), seed);
        }
        Ok(seed)
    }

    /// Non-mutating read of `current[id]`, or `Seed::INVALID`.
    #[must_use]
    pub fn get_current_seed(&self, id: &EngineId) -> Seed {
        self.current.get(id).copied().unwrap_or(Seed::INVALID)
    }

    /// If `id` has no seeder or is frozen, return `Seed::INVALID`; else
    /// compute `get_seed(id)`, invoke its seeder, and return the value.
    #[instrument(skip(self))]
    pub fn reseed(&mut self, id: &EngineId) -> Result<Seed, SeedMasterError> {
        let has_seeder = self.records.get(id).is_some_and(|r| r.seeder.is_some());
        if !has_seeder || self.is_frozen(id) {
            return Ok(Seed::INVALID);
        }
        let seed = self.get_seed(id)?;
        if let Some(record) = self.records.get_mut(id) {
            if let Some(seeder) = record.seeder.as_mut() {
                seeder(id, seed);
            }
        }
        Ok(seed)
    }

    /// Same shape as [`Self::reseed`], but only invokes the seeder when `id`
    /// is not frozen; the event seed is returned either way.
    #[instrument(skip(self, data))]
    pub fn reseed_event(&mut self, id: &EngineId, data: &EventData) -> Result<Seed, SeedMasterError> {
        let seed = self.get_event_seed(data, id)?;
        if !self.is_frozen(id) {
            if let Some(record) = self.records.get_mut(id) {
                if let Some(seeder) = record.seeder.as_mut() {
                    seeder(id, seed);
                }
            }
        }
        Ok(seed)
    }

    /// Clear `knownEvent`. Called at the start of every event.
    pub fn on_new_event(&mut self) {
        self.known_event.clear();
    }

    /// All ids ever registered, declared, or seed-queried, in the engine's
    /// total order — the only externally visible iteration order, used by
    /// `print` and `summary`.
    pub fn known_ids(&self) -> impl Iterator<Item = &EngineId> {
        let mut ids: Vec<&EngineId> = self
            .records
            .keys()
            .chain(self.configured.keys())
            .chain(self.current.keys())
            .collect();
        ids.sort();
        ids.dedup();
        ids.into_iter()
    }

    /// Human-readable end-of-job summary: for each known id, its configured
    /// value, its current value, and any markers.
    pub fn print(&self, out: &mut impl Write) -> io::Result<()> {
        for id in self.known_ids() {
            let configured = self.configured.get(id).copied().unwrap_or(Seed::INVALID);
            let current = self.current.get(id).copied().unwrap_or(Seed::INVALID);
            let mut markers = Vec::new();
            if id.is_global() {
                markers.push("(global)");
            }
            if self.is_frozen(id) {
                markers.push("[overridden]");
            }
            let flag = if !configured.is_valid() && !current.is_valid() {
                " INVALID!!!"
            } else if configured.is_valid() && configured != current {
                " [[ERROR!!!]]"
            } else {
                ""
            };
            writeln!(
                out,
                "{configured} | {current} | {id} {markers}{flag}",
                markers = markers.join(" "),
            )?;
        }
        Ok(())
    }

    /// Structured counterpart of [`Self::print`], for machine consumption.
    #[must_use]
    pub fn summary(&self) -> SeedMasterSummary {
        let rows = self
            .known_ids()
            .map(|id| {
                let configured = self.configured.get(id).copied().unwrap_or(Seed::INVALID);
                let current = self.current.get(id).copied().unwrap_or(Seed::INVALID);
                EngineSummaryRow {
                    engine: id.to_string(),
                    configured: configured.value(),
                    current: current.value(),
                    global: id.is_global(),
                    overridden: self.is_frozen(id),
                    invalid: !configured.is_valid() && !current.is_valid(),
                    mismatch: configured.is_valid() && configured != current,
                }
            })
            .collect();
        SeedMasterSummary { engines: rows }
    }
}

fn check_uniqueness(cache: &BTreeMap<EngineId, Seed>, id: &EngineId, seed: Seed) -> Result<(), SeedMasterError> {
    if !seed.is_valid() {
        return Ok(());
    }
    for (other_id, other_seed) in cache {
        if other_id != id && *other_seed == seed {
            warn!(engine = %id, other = %other_id, %seed, "seed collision");
            return Err(UniquenessError {
                engine: id.clone(),
                other: other_id.clone(),
                seed: seed.value(),
            }
            .into());
        }
    }
    Ok(())
}

#[derive(Debug, Clone, Serialize)]
pub struct EngineSummaryRow {
    pub engine: String,
    pub configured: u32,
    pub current: u32,
    pub global: bool,
    pub overridden: bool,
    pub invalid: bool,
    pub mismatch: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeedMasterSummary {
    pub engines: Vec<EngineSummaryRow>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::policy::PolicyRegistry;

    fn auto_increment_master() -> SeedMaster {
        let tree: toml::Value = "policy = \"autoIncrement\"\nbaseSeed = 100\ncheckRange = false\n"
            .parse()
            .unwrap();
        SeedMaster::new(PolicyRegistry::new().build(&tree).unwrap())
    }

    #[test]
    fn get_seed_is_idempotent_and_distinct_per_engine() {
        let mut master = auto_increment_master();
        let a = EngineId::module("modA", "");
        let b = EngineId::module("modB", "x");
        let c = EngineId::module("modB", "y");
        assert_eq!(master.get_seed(&a).unwrap(), Seed::new(100));
        assert_eq!(master.get_seed(&b).unwrap(), Seed::new(101));
        assert_eq!(master.get_seed(&c).unwrap(), Seed::new(102));
        assert_eq!(master.get_seed(&a).unwrap(), Seed::new(100));
    }

    #[test]
    fn freeze_requires_prior_registration() {
        let mut master = auto_increment_master();
        let id = EngineId::module("modA", "");
        let err = master.freeze_seed(&id, Seed::new(5)).unwrap_err();
        assert_eq!(err.error_code(), "S2006");
    }

    #[test]
    fn frozen_engine_is_not_reseeded() {
        let mut master = auto_increment_master();
        let id = EngineId::module("modA", "");
        master.register_new_seeder(&id, None).unwrap();
        master.freeze_seed(&id, Seed::new(5)).unwrap();
        assert_eq!(master.get_current_seed(&id), Seed::new(5));
        assert_eq!(master.reseed(&id).unwrap(), Seed::INVALID);
        assert_eq!(master.get_current_seed(&id), Seed::new(5));
    }

    #[test]
    fn reseed_invokes_the_bound_seeder() {
        let mut master = auto_increment_master();
        let id = EngineId::module("modA", "");
        let seen = std::rc::Rc::new(std::cell::RefCell::new(None));
        let seen_clone = seen.clone();
        master.register_new_seeder(
            &id,
            Some(Box::new(move |_id, seed| {
                *seen_clone.borrow_mut() = Some(seed);
            })),
        )
        .unwrap();
        let seed = master.reseed(&id).unwrap();
        assert_eq!(*seen.borrow(), Some(seed));
    }

    #[test]
    fn on_new_event_clears_the_known_event_cache() {
        let mut master = auto_increment_master();
        let id = EngineId::module("modA", "");
        let data = EventData::new(1, 1, 1, 10, true, "proc", "modA");
        // autoIncrement has no getEventSeed override; falls back to get_seed.
        master.get_event_seed(&data, &id).unwrap();
        master.on_new_event();
        assert!(master.known_event.is_empty());
    }

    #[test]
    fn duplicate_registration_via_new_seeder_is_an_error() {
        let mut master = auto_increment_master();
        let id = EngineId::module("modA", "");
        master.register_new_seeder(&id, None).unwrap();
        let err = master.register_new_seeder(&id, None).unwrap_err();
        assert_eq!(err.error_code(), "S2002");
    }
}
