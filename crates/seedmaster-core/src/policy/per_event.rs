//! `perEvent`: the composite policy. `getSeed` delegates to a nested
//! `initSeedPolicy` (any non-`perEvent` policy, used for the module's
//! construction-time seed); `getEventSeed` recomputes a fresh seed every
//! event via a named algorithm plus a fixed offset.

use toml::Value;

use super::config_tree::{i64_or, warn_unknown_keys};
use super::registry::build_policy;
use super::Policy;
use crate::engine_id::EngineId;
use crate::error::{ConfigurationError, SeedMasterError};
use crate::event_data::EventData;
use crate::event_hash::event_timestamp_v1;
use crate::seed::Seed;

const NAME: &str = "perEvent";

/// Per-event seeding algorithms `perEvent` knows how to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Algorithm {
    EventTimestampV1,
}

impl Algorithm {
    fn from_name(name: &str) -> Option<Self> {
        match name {
            "EventTimestamp_v1" => Some(Self::EventTimestampV1),
            _ => None,
        }
    }

    fn run(self, id: &EngineId, data: &EventData) -> Result<Seed, SeedMasterError> {
        match self {
            Self::EventTimestampV1 => event_timestamp_v1(id, data),
        }
    }
}

#[derive(Debug)]
pub struct PerEvent {
    algorithm: Algorithm,
    offset: i64,
    init_seed_policy: Option<Box<Policy>>,
}

impl PerEvent {
    pub fn from_config(tree: &Value) -> Result<Self, ConfigurationError> {
        warn_unknown_keys(tree, NAME, &["algorithm", "offset", "initSeedPolicy"]);
        let algorithm_name = tree
            .get("algorithm")
            .and_then(Value::as_str)
            .unwrap_or("EventTimestamp_v1");
        let algorithm = Algorithm::from_name(algorithm_name).ok_or_else(|| ConfigurationError::UnknownPolicy {
            name: algorithm_name.to_string(),
        })?;
        let offset = i64_or(tree, "offset", 0);

        let init_seed_policy = match tree.get("initSeedPolicy") {
            Some(init_cfg) => {
                let init_policy_name = init_cfg.get("policy").and_then(Value::as_str).unwrap_or("autoIncrement");
                if init_policy_name == NAME {
                    return Err(ConfigurationError::NestedPerEventPolicy);
                }
                Some(Box::new(build_policy(init_policy_name, init_cfg)?))
            }
            None => None,
        };

        Ok(Self {
            algorithm,
            offset,
            init_seed_policy,
        })
    }

    /// Delegates to the nested `initSeedPolicy` when configured; otherwise
    /// there is nothing to compute a construction-time seed from.
    pub fn get_seed(&mut self, engine: &EngineId) -> Result<Seed, SeedMasterError> {
        match &mut self.init_seed_policy {
            Some(policy) => policy.get_seed(engine),
            None => Ok(Seed::INVALID),
        }
    }

    pub fn get_event_seed(&mut self, engine: &EngineId, data: &EventData) -> Result<Seed, SeedMasterError> {
        let base = self.algorithm.run(engine, data)?;
        let combined = (i64::from(base.value()) + self.offset) as u32;
        Ok(Seed::new(if combined == 0 { 1 } else { combined }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(text: &str) -> Value {
        text.parse().unwrap()
    }

    fn event(timestamp: u64) -> EventData {
        EventData::new(1, 1, 1, timestamp, true, "proc", "modA")
    }

    #[test]
    fn get_seed_delegates_to_init_seed_policy() {
        let mut p = PerEvent::from_config(&cfg(
            "[initSeedPolicy]\npolicy = \"autoIncrement\"\nbaseSeed = 50\nmaxUniqueEngines = 4\n",
        ))
        .unwrap();
        let seed = p.get_seed(&EngineId::module("modA", "")).unwrap();
        assert_eq!(seed, Seed::new(50));
    }

    #[test]
    fn get_seed_is_invalid_with_no_init_seed_policy_configured() {
        let mut p = PerEvent::from_config(&cfg("")).unwrap();
        let seed = p.get_seed(&EngineId::module("modA", "")).unwrap();
        assert_eq!(seed, Seed::INVALID);
    }

    #[test]
    fn get_event_seed_changes_every_event() {
        let mut p = PerEvent::from_config(&cfg("")).unwrap();
        let id = EngineId::module("modA", "");
        let a = p.get_event_seed(&id, &event(1)).unwrap();
        let b = p.get_event_seed(&id, &event(2)).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn offset_is_applied_to_the_algorithm_result() {
        let plain = PerEvent::from_config(&cfg("")).unwrap().algorithm.run(
            &EngineId::module("modA", ""),
            &event(7),
        );
        let mut offset_policy = PerEvent::from_config(&cfg("offset = 5\n")).unwrap();
        let offset_seed = offset_policy
            .get_event_seed(&EngineId::module("modA", ""), &event(7))
            .unwrap();
        assert_eq!(offset_seed.value(), plain.unwrap().value().wrapping_add(5));
    }

    #[test]
    fn rejects_nested_per_event_as_init_seed_policy() {
        let err = PerEvent::from_config(&cfg("[initSeedPolicy]\npolicy = \"perEvent\"\n")).unwrap_err();
        assert_eq!(err.error_code(), "S1001");
    }
}
