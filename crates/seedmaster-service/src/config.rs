//! Loading the `services.NuRandomService` configuration subtree and
//! resolving seed overrides out of an arbitrary parameter tree.

use std::path::Path;

use thiserror::Error;
use toml::Value;

use seedmaster_core::Seed;

/// The `verbosity` level read from a policy's configuration subtree.
/// Newtype around the underlying integer so call sites express intent
/// ("does this level alone warrant the end-of-job summary?") rather than
/// comparing a bare `i32` against a magic threshold at each use site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct Verbosity(i32);

impl Verbosity {
    pub const SILENT: Self = Self(0);

    #[must_use]
    pub const fn new(level: i32) -> Self {
        Self(level)
    }

    #[must_use]
    pub const fn level(self) -> i32 {
        self.0
    }

    /// Whether this level alone warrants printing the end-of-job summary
    /// (spec.md §4.3: `verbosity >= 1 || endOfJobSummary`).
    #[must_use]
    pub const fn warrants_summary(self) -> bool {
        self.0 >= 1
    }
}

impl Default for Verbosity {
    fn default() -> Self {
        Self::SILENT
    }
}

impl From<i32> for Verbosity {
    fn from(level: i32) -> Self {
        Self::new(level)
    }
}

/// Errors raised while loading the host's configuration file. Distinct from
/// [`seedmaster_core::SeedMasterError`] because these are I/O/parse
/// failures, not policy/registration failures.
#[derive(Debug, Error)]
pub enum ConfigLoadError {
    #[error("failed to read configuration file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse configuration file {path}: {source}")]
    Parse {
        path: String,
        #[source]
        source: toml::de::Error,
    },
    #[error("configuration file {path} has no [services.NuRandomService] table")]
    MissingNuRandomService { path: String },
}

/// Read `path` and return the `services.NuRandomService` subtree, ready to
/// hand to `PolicyRegistry::build`.
pub fn load_nu_random_service_config(path: impl AsRef<Path>) -> Result<Value, ConfigLoadError> {
    let path_ref = path.as_ref();
    let path_str = path_ref.display().to_string();
    let text = std::fs::read_to_string(path_ref).map_err(|source| ConfigLoadError::Io {
        path: path_str.clone(),
        source,
    })?;
    let root: Value = text.parse::<Value>().map_err(|source| ConfigLoadError::Parse {
        path: path_str.clone(),
        source,
    })?;
    root.get("services")
        .and_then(|s| s.get("NuRandomService"))
        .cloned()
        .ok_or(ConfigLoadError::MissingNuRandomService { path: path_str })
}

/// Resolve a seed override by trying `candidate_names` in order against
/// `tree`; the first present key wins. A resolved value of `0` is treated
/// as absent — the documented escape hatch for disabling an override by
/// zeroing it — and resolution falls through to the next candidate name
/// rather than stopping.
#[must_use]
pub fn resolve_override(tree: &Value, candidate_names: &[&str]) -> Option<Seed> {
    for name in candidate_names {
        if let Some(value) = tree.get(*name).and_then(Value::as_integer) {
            let seed = Seed::new(value as u32);
            if seed.is_valid() {
                return Some(seed);
            }
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verbosity_below_one_does_not_warrant_a_summary() {
        assert!(!Verbosity::new(0).warrants_summary());
        assert!(!Verbosity::SILENT.warrants_summary());
    }

    #[test]
    fn verbosity_one_or_above_warrants_a_summary() {
        assert!(Verbosity::new(1).warrants_summary());
        assert!(Verbosity::new(5).warrants_summary());
    }

    #[test]
    fn first_present_candidate_wins() {
        let tree: Value = "Seed = 42\nMySeed = 7\n".parse().unwrap();
        assert_eq!(resolve_override(&tree, &["Seed", "MySeed"]), Some(Seed::new(42)));
    }

    #[test]
    fn zero_on_first_candidate_falls_through_to_next_candidate() {
        let tree: Value = "Seed = 0\nMySeed = 7\n".parse().unwrap();
        assert_eq!(resolve_override(&tree, &["Seed", "MySeed"]), Some(Seed::new(7)));
    }

    #[test]
    fn zero_on_only_candidate_is_absent() {
        let tree: Value = "Seed = 0\n".parse().unwrap();
        assert_eq!(resolve_override(&tree, &["Seed"]), None);
    }

    #[test]
    fn no_candidates_present_is_none() {
        let tree: Value = "".parse().unwrap();
        assert_eq!(resolve_override(&tree, &["Seed", "MySeed"]), None);
    }
}
