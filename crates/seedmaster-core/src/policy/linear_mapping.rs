//! `linearMapping`: assigns `maxUniqueEngines * nJob + k`, partitioning the
//! seed space into one contiguous block per job.

use toml::Value;

use super::config_tree::{bool_or, optional_non_negative_i64, require_non_negative_i64, warn_unknown_keys};
use crate::engine_id::EngineId;
use crate::error::{ConfigurationError, SeedMasterError};
use crate::seed::Seed;

const NAME: &str = "linearMapping";

#[derive(Debug)]
pub struct LinearMapping {
    n_job: u64,
    check_range: bool,
    max_unique_engines: u64,
    next_index: u64,
}

impl LinearMapping {
    pub fn from_config(tree: &Value) -> Result<Self, ConfigurationError> {
        warn_unknown_keys(tree, NAME, &["nJob", "checkRange", "maxUniqueEngines"]);
        let n_job = require_non_negative_i64(tree, NAME, "nJob")? as u64;
        let check_range = bool_or(tree, "checkRange", true);
        let max_unique_engines = optional_non_negative_i64(tree, NAME, "maxUniqueEngines")?.map(|v| v as u64);
        if check_range && max_unique_engines.is_none() {
            return Err(ConfigurationError::MissingRequiredKey {
                policy: NAME,
                key: "maxUniqueEngines",
            });
        }
        Ok(Self {
            n_job,
            check_range,
            // When checkRange is disabled and no maxUniqueEngines is configured, the seed
            // space isn't partitioned: every job lands in the same block and nJob only
            // contributes if maxUniqueEngines is given for another reason.
            max_unique_engines: max_unique_engines.unwrap_or(0),
            next_index: 0,
        })
    }

    pub fn get_seed(&mut self, engine: &EngineId) -> Result<Seed, SeedMasterError> {
        let k = self.next_index;
        if self.check_range && self.max_unique_engines > 0 && k >= self.max_unique_engines {
            return Err(ConfigurationError::RangeCheckViolated {
                engine: engine.clone(),
                index: k,
                max: self.max_unique_engines,
            }
            .into());
        }
        self.next_index += 1;
        let seed = self.max_unique_engines * self.n_job + k;
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
    fn partitions_by_job_number() {
        let mut p = LinearMapping::from_config(&cfg("nJob = 5\nmaxUniqueEngines = 2\n")).unwrap();
        assert_eq!(p.get_seed(&EngineId::module("modA", "")).unwrap(), Seed::new(10));
        assert_eq!(p.get_seed(&EngineId::module("modB", "")).unwrap(), Seed::new(11));
    }

    #[test]
    fn rejects_third_engine_when_max_is_two() {
        let mut p = LinearMapping::from_config(&cfg("nJob = 5\nmaxUniqueEngines = 2\n")).unwrap();
        p.get_seed(&EngineId::module("modA", "")).unwrap();
        p.get_seed(&EngineId::module("modB", "")).unwrap();
        let err = p.get_seed(&EngineId::module("modC", "")).unwrap_err();
        assert_eq!(err.error_code(), "S1004");
    }
}
