//! Identity of a registered random-number engine.

use std::cmp::Ordering;
use std::fmt;

/// Whether an [`EngineId`] is tied to a specific module or lives outside
/// any module's lifetime.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Scope {
    /// Bound to a module; reseeded at the start of each module callback.
    Module,
    /// Not bound to any module; reseeded at the start of each event.
    Global,
}

/// Identity of a registered engine: `(module_label, instance_name, scope)`.
///
/// `module_label` is empty only for global engines. `instance_name` may be
/// empty, meaning "default instance". Total ordering is by the tuple, so
/// `EngineId` can be used as a `BTreeMap` key to get stable iteration order
/// for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct EngineId {
    module_label: String,
    instance_name: String,
    scope: Scope,
}

impl EngineId {
    /// Construct a module-scoped id. `module_label` must not be empty.
    #[must_use]
    pub fn module(module_label: impl Into<String>, instance_name: impl Into<String>) -> Self {
        Self {
            module_label: module_label.into(),
            instance_name: instance_name.into(),
            scope: Scope::Module,
        }
    }

    /// Construct a global id. Global engines carry no module label.
    #[must_use]
    pub fn global(instance_name: impl Into<String>) -> Self {
        Self {
            module_label: String::new(),
            instance_name: instance_name.into(),
            scope: Scope::Global,
        }
    }

    #[must_use]
    pub fn module_label(&self) -> &str {
        &self.module_label
    }

    #[must_use]
    pub fn instance_name(&self) -> &str {
        &self.instance_name
    }

    #[must_use]
    pub const fn scope(&self) -> Scope {
        self.scope
    }

    #[must_use]
    pub const fn is_global(&self) -> bool {
        matches!(self.scope, Scope::Global)
    }

    fn sort_key(&self) -> (&str, &str, Scope) {
        (&self.module_label, &self.instance_name, self.scope)
    }
}

impl PartialOrd for EngineId {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for EngineId {
    fn cmp(&self, other: &Self) -> Ordering {
        self.sort_key().cmp(&other.sort_key())
    }
}

impl fmt::Display for EngineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_global() {
            write!(f, "<global>.{}", self.instance_name)
        } else {
            write!(f, "{}.{}", self.module_label, self.instance_name)
        }
    }
}
