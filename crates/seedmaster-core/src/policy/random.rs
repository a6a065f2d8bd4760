//! `random`: draws seeds from a PRNG. Unlike the other policies, `random` is
//! deliberately non-reproducible across runs unless `masterSeed` pins the
//! PRNG's starting state — determinism here is about "same process state
//! yields a distinct draw each call," not "same input yields the same
//! output."
//!
//! The generator is a small SplitMix64 step, not the `rand` crate: the
//! policy only needs a fast, dependency-free stream of 32-bit values, and
//! SplitMix64 is a widely used, easily audited few-line algorithm for
//! exactly that.

use std::time::{SystemTime, UNIX_EPOCH};

use toml::Value;

use super::config_tree::{optional_non_negative_i64, warn_unknown_keys};
use crate::engine_id::EngineId;
use crate::error::{ConfigurationError, SeedMasterError};
use crate::seed::Seed;

const NAME: &str = "random";

#[derive(Debug)]
pub struct Random {
    state: u64,
}

impl Random {
    pub fn from_config(tree: &Value) -> Result<Self, ConfigurationError> {
        warn_unknown_keys(tree, NAME, &["masterSeed"]);
        let seed = match optional_non_negative_i64(tree, NAME, "masterSeed")? {
            Some(v) => v as u64,
            None => seed_from_wall_clock(),
        };
        Ok(Self { state: seed })
    }

    pub fn get_seed(&mut self, _engine: &EngineId) -> Result<Seed, SeedMasterError> {
        let value = self.next_u64();
        let folded = (value ^ (value >> 32)) as u32;
        Ok(Seed::new(if folded == 0 { 1 } else { folded }))
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self.state.wrapping_add(0x9E37_79B9_7F4A_7C15);
        let mut z = self.state;
        z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
        z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
        z ^ (z >> 31)
    }
}

fn seed_from_wall_clock() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0x2545_F491_4F6C_DD1D)
}
