//! `preDefinedSeed`: the seed itself, looked up per engine from a
//! `moduleLabel -> (int | { instanceName -> int })` tree. No range check —
//! the table is the whole of the policy's state, and by definition doesn't
//! grow as engines are discovered.

use toml::Value;

use super::config_tree::lookup_engine_value;
use crate::engine_id::EngineId;
use crate::error::{ConfigurationError, SeedMasterError};
use crate::seed::Seed;

const NAME: &str = "preDefinedSeed";

#[derive(Debug)]
pub struct PreDefinedSeed {
    table: Value,
}

impl PreDefinedSeed {
    pub fn from_config(tree: &Value) -> Result<Self, ConfigurationError> {
        // No `warn_unknown_keys` call here: this policy's entire tree
        // (besides the common keys) is the `moduleLabel -> seed` table, so
        // every key is a legitimate engine entry, not a candidate typo.
        Ok(Self { table: tree.clone() })
    }

    pub fn get_seed(&mut self, engine: &EngineId) -> Result<Seed, SeedMasterError> {
        let seed = lookup_engine_value(&self.table, engine.module_label(), engine.instance_name()).ok_or_else(
            || ConfigurationError::NoOffsetForEngine {
                policy: NAME,
                engine: engine.clone(),
            },
        )?;
        Ok(Seed::new(seed as u32))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg(text: &str) -> Value {
        text.parse().unwrap()
    }

    #[test]
    fn returns_the_configured_seed_directly() {
        let mut p = PreDefinedSeed::from_config(&cfg("modA = 7\n[modB]\nx = 9\n")).unwrap();
        assert_eq!(p.get_seed(&EngineId::module("modA", "")).unwrap(), Seed::new(7));
        assert_eq!(p.get_seed(&EngineId::module("modB", "x")).unwrap(), Seed::new(9));
    }

    #[test]
    fn unconfigured_engine_is_an_error() {
        let mut p = PreDefinedSeed::from_config(&cfg("modA = 7\n")).unwrap();
        let err = p.get_seed(&EngineId::module("modZ", "")).unwrap_err();
        assert_eq!(err.error_code(), "S1005");
    }
}
