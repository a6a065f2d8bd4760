//! Name <-> policy mapping and construction from configuration.

use toml::Value;

use super::auto_increment::AutoIncrement;
use super::linear_mapping::LinearMapping;
use super::per_event::PerEvent;
use super::predefined_offset::PreDefinedOffset;
use super::predefined_seed::PreDefinedSeed;
use super::random::Random;
use super::{Policy, PolicyKind};
use crate::error::ConfigurationError;

/// Construct the [`Policy`] named by `name`, reading its fields from `tree`.
pub fn build_policy(name: &str, tree: &Value) -> Result<Policy, ConfigurationError> {
    let kind = PolicyKind::from_name(name).ok_or_else(|| ConfigurationError::UnknownPolicy { name: name.to_string() })?;
    Ok(match kind {
        PolicyKind::AutoIncrement => Policy::AutoIncrement(AutoIncrement::from_config(tree)?),
        PolicyKind::LinearMapping => Policy::LinearMapping(LinearMapping::from_config(tree)?),
        PolicyKind::PreDefinedOffset => Policy::PreDefinedOffset(PreDefinedOffset::from_config(tree)?),
        PolicyKind::PreDefinedSeed => Policy::PreDefinedSeed(PreDefinedSeed::from_config(tree)?),
        PolicyKind::Random => Policy::Random(Random::from_config(tree)?),
        PolicyKind::PerEvent => Policy::PerEvent(PerEvent::from_config(tree)?),
    })
}

/// Builds policies from a `services.NuRandomService.*`-shaped configuration
/// tree. The tree's own `policy` key selects the variant; the remaining keys
/// are that variant's configuration.
#[derive(Debug, Default)]
pub struct PolicyRegistry;

impl PolicyRegistry {
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    /// Build the policy described by `tree`. `tree` must contain a `policy`
    /// string key naming one of the known [`PolicyKind`] variants.
    pub fn build(&self, tree: &Value) -> Result<Policy, ConfigurationError> {
        let name = tree
            .get("policy")
            .and_then(Value::as_str)
            .ok_or(ConfigurationError::MissingRequiredKey {
                policy: "<unknown>",
                key: "policy",
            })?;
        build_policy(name, tree)
    }
}
