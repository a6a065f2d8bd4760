//! `preDefinedOffset`: assigns `baseSeed + offset`, where `offset` is looked
//! up per engine from a `moduleLabel -> (int | { instanceName -> int })`
//! tree. Range-checked like `autoIncrement`: the range check counts distinct
//! engines seen, independent of the offset values themselves.

use toml::Value;

use super::config_tree::{bool_or, lookup_engine_value, optional_non_negative_i64, require_non_negative_i64};
use crate::engine_id::EngineId;
use crate::error::{ConfigurationError, SeedMasterError};
use crate::seed::Seed;

const NAME: &str = "preDefinedOffset";

#[derive(Debug)]
pub struct PreDefinedOffset {
    base_seed: u32,
    check_range: bool,
    max_unique_engines: Option<u64>,
    next_index: u64,
    table: Value,
}

impl PreDefinedOffset {
    pub fn from_config(tree: &Value) -> Result<Self, ConfigurationError> {
        // No `warn_unknown_keys` call here: every other top-level key in this
        // policy's tree is, by design, a module label in the offset table
        // (spec.md §4.1), so a generic "unrecognized key" scan would warn on
        // every legitimate entry rather than catching typos.
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
            table: tree.clone(),
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

        let offset = lookup_engine_value(&self.table, engine.module_label(), engine.instance_name()).ok_or_else(
            || ConfigurationError::NoOffsetForEngine {
                policy: NAME,
                engine: engine.clone(),
            },
        )?;
        Ok(Seed::new(self.base_seed.wrapping_add(offset as u32)))
    }
}
