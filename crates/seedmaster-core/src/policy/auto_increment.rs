//! `autoIncrement`: assigns `baseSeed + k`, where `k` is the 0-based count of
//! distinct engines seen so far.

use toml::Value;

use super::config_tree::{bool_or, optional_non_negative_i64, require_non_negative_i64, warn_unknown_keys};
use crate::engine_id::EngineId;
use crate::error::{ConfigurationError, SeedMasterError};
use crate::seed::Seed;

const NAME: &str = "autoIncrement";

#[derive(Debug)]
pub struct AutoIncrement {
    base_seed: u32,
    check_range: bool,
    max_unique_engines: Option<u64>,
    next_index: u64,
}

impl AutoIncrement {
    pub fn from_config(tree: &Value) -> Result<Self, ConfigurationError> {
        warn_unknown_keys(tree, NAME, &["baseSeed", "checkRange", "maxUniqueEngines"]);
        let base_seed = require_non_negative_i64(tree, NAME, "baseSeed")? as u32;
        let check_range = bool_or(tree, "checkRange", true);
        let max_unique_engines = optional_non_negative_i64(tree, NAME, "maxUniqueEngines")?.map(|v| v as u64);
        if check_range && max_unique_engines.is_none() {
            return Err(ConfigurationError::MissingRequiredKey {
                policy: NAME,
                key: "maxUniqueEngines",
            });
        }
        Ok(Self {
            base_seed,
            check_range,
            max_unique_engines,
            next_index: 0,
        })
    }

    pub fn get_seed(&mut self, engine: &EngineId) -> Result<Seed, SeedMasterError> {
        let k = self.next_index;
        if self.check_range {
            if let Some(max) = self.max_unique_engines {
                if k >= max {
                    return Err(ConfigurationError::RangeCheckViolated {
                        engine: engine.clone(),
                        index: k,
                        max,
                    }
                    .into());
                }
            }
        }
        self.next_index += 1;
        Ok(Seed::new(self.base_seed + k as u32))
    }
}
