//! Categorized error types for the seed master.
//!
//! Every error explains what went wrong and names the engine(s) involved.
//! Errors are organized by category and carry stable machine-readable
//! codes for programmatic handling.
//!
//! # Error Code Ranges
//!
//! | Range | Category          |
//! |-------|-------------------|
//! | S1xxx | Configuration     |
//! | S2xxx | Logic             |
//! | S3xxx | Uniqueness        |
//! | S4xxx | Invalid input     |

use crate::engine_id::EngineId;

// ---------------------------------------------------------------------------
// Machine-readable error codes
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    UnknownPolicy,
    MissingRequiredKey,
    OutOfRangeValue,
    RangeCheckViolated,
    UnresolvableOverrideTarget,
    RegistrationOutsideConstructionPhase,
    DuplicateRegistration,
    DefineWithoutDeclare,
    DefineAlreadyDefined,
    NoCurrentModule,
    FreezeUnknownEngine,
    IllegalPhaseTransition,
    SeedCollision,
    InvalidTimestamp,
}

impl ErrorCode {
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnknownPolicy => "S1001",
            Self::MissingRequiredKey => "S1002",
            Self::OutOfRangeValue => "S1003",
            Self::RangeCheckViolated => "S1004",
            Self::UnresolvableOverrideTarget => "S1005",
            Self::RegistrationOutsideConstructionPhase => "S2001",
            Self::DuplicateRegistration => "S2002",
            Self::DefineWithoutDeclare => "S2003",
            Self::DefineAlreadyDefined => "S2004",
            Self::NoCurrentModule => "S2005",
            Self::FreezeUnknownEngine => "S2006",
            Self::IllegalPhaseTransition => "S2007",
            Self::SeedCollision => "S3001",
            Self::InvalidTimestamp => "S4001",
        }
    }

    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::UnknownPolicy => Some("Check the `policy` key against the supported policy names."),
            Self::MissingRequiredKey => Some("Add the missing key to the policy's configuration subtree."),
            Self::OutOfRangeValue => Some("Correct the numeric field to a value in its allowed range."),
            Self::RangeCheckViolated => {
                Some("Raise `maxUniqueEngines`, disable `checkRange`, or register fewer engines.")
            }
            Self::UnresolvableOverrideTarget => {
                Some("Define an offset/seed entry for this engine, or remove the override lookup.")
            }
            Self::RegistrationOutsideConstructionPhase => {
                Some("Move registration into the service or module constructor.")
            }
            Self::DuplicateRegistration => Some("Register each engine id exactly once."),
            Self::DefineWithoutDeclare => Some("Call `declare_engine` before `define_engine`."),
            Self::DefineAlreadyDefined => Some("An engine may only be defined once after declaration."),
            Self::NoCurrentModule => Some("Use a global registration call, or register inside a module."),
            Self::FreezeUnknownEngine => Some("Register the engine before freezing its seed."),
            Self::IllegalPhaseTransition => Some("Check the pre/post callback pairing for this phase."),
            Self::SeedCollision => Some("Use a policy that yields unique seeds, or adjust its configuration."),
            Self::InvalidTimestamp => Some("Supply a valid timestamp or select a policy that tolerates it."),
        }
    }
}

impl std::fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

// ---------------------------------------------------------------------------
// Top-level error
// ---------------------------------------------------------------------------

/// Top-level error type for all seed-master operations.
#[derive(Debug, thiserror::Error)]
pub enum SeedMasterError {
    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    Logic(#[from] LogicError),

    #[error(transparent)]
    Uniqueness(#[from] UniquenessError),

    #[error(transparent)]
    InvalidInput(#[from] InvalidInputError),
}

impl SeedMasterError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::Configuration(e) => e.error_code(),
            Self::Logic(e) => e.error_code(),
            Self::Uniqueness(e) => e.error_code(),
            Self::InvalidInput(e) => e.error_code(),
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::Configuration(e) => e.hint(),
            Self::Logic(e) => e.hint(),
            Self::Uniqueness(e) => e.hint(),
            Self::InvalidInput(e) => e.hint(),
        }
    }
}

// ---------------------------------------------------------------------------
// ConfigurationError
// ---------------------------------------------------------------------------

/// Errors raised while constructing a policy from configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigurationError {
    #[error("{code}: unknown policy '{name}'", code = ErrorCode::UnknownPolicy.code())]
    UnknownPolicy { name: String },

    #[error("{code}: missing required key '{key}' for policy '{policy}'", code = ErrorCode::MissingRequiredKey.code())]
    MissingRequiredKey { policy: &'static str, key: &'static str },

    #[error(
        "{code}: '{key}' = {value} is out of range for policy '{policy}'",
        code = ErrorCode::OutOfRangeValue.code()
    )]
    OutOfRange {
        policy: &'static str,
        key: &'static str,
        value: i64,
    },

    #[error(
        "{code}: engine #{index} for {engine} exceeds maxUniqueEngines={max}",
        code = ErrorCode::RangeCheckViolated.code()
    )]
    RangeCheckViolated {
        engine: EngineId,
        index: u64,
        max: u64,
    },

    #[error(
        "{code}: no offset/seed defined for engine {engine} under policy '{policy}'",
        code = ErrorCode::UnresolvableOverrideTarget.code()
    )]
    NoOffsetForEngine { policy: &'static str, engine: EngineId },

    #[error(
        "{code}: 'perEvent' may not nest another 'perEvent' policy as its initSeedPolicy",
        code = ErrorCode::UnknownPolicy.code()
    )]
    NestedPerEventPolicy,
}

impl ConfigurationError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::UnknownPolicy { .. } | Self::NestedPerEventPolicy => ErrorCode::UnknownPolicy.code(),
            Self::MissingRequiredKey { .. } => ErrorCode::MissingRequiredKey.code(),
            Self::OutOfRange { .. } => ErrorCode::OutOfRangeValue.code(),
            Self::RangeCheckViolated { .. } => ErrorCode::RangeCheckViolated.code(),
            Self::NoOffsetForEngine { .. } => ErrorCode::UnresolvableOverrideTarget.code(),
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::UnknownPolicy { .. } | Self::NestedPerEventPolicy => ErrorCode::UnknownPolicy.hint(),
            Self::MissingRequiredKey { .. } => ErrorCode::MissingRequiredKey.hint(),
            Self::OutOfRange { .. } => ErrorCode::OutOfRangeValue.hint(),
            Self::RangeCheckViolated { .. } => ErrorCode::RangeCheckViolated.hint(),
            Self::NoOffsetForEngine { .. } => ErrorCode::UnresolvableOverrideTarget.hint(),
        }
    }
}

// ---------------------------------------------------------------------------
// LogicError
// ---------------------------------------------------------------------------

/// Errors raised by misuse of the registration/lifecycle protocol.
#[derive(Debug, thiserror::Error)]
pub enum LogicError {
    #[error(
        "{code}: cannot register {engine} outside a legal construction phase",
        code = ErrorCode::RegistrationOutsideConstructionPhase.code()
    )]
    RegistrationOutsideConstructionPhase { engine: EngineId },

    #[error("{code}: {engine} is already registered", code = ErrorCode::DuplicateRegistration.code())]
    DuplicateRegistration { engine: EngineId },

    #[error(
        "{code}: cannot define {engine}: it was never declared",
        code = ErrorCode::DefineWithoutDeclare.code()
    )]
    DefineWithoutDeclare { engine: EngineId },

    #[error(
        "{code}: {engine} is already defined",
        code = ErrorCode::DefineAlreadyDefined.code()
    )]
    DefineAlreadyDefined { engine: EngineId },

    #[error(
        "{code}: module-scoped operation requested with no current module",
        code = ErrorCode::NoCurrentModule.code()
    )]
    NoCurrentModule,

    #[error(
        "{code}: cannot freeze {engine}: it is not registered",
        code = ErrorCode::FreezeUnknownEngine.code()
    )]
    FreezeUnknownEngine { engine: EngineId },

    #[error(
        "{code}: illegal phase transition from {from} to {to}",
        code = ErrorCode::IllegalPhaseTransition.code()
    )]
    IllegalPhaseTransition { from: String, to: String },
}

impl LogicError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::RegistrationOutsideConstructionPhase { .. } => {
                ErrorCode::RegistrationOutsideConstructionPhase.code()
            }
            Self::DuplicateRegistration { .. } => ErrorCode::DuplicateRegistration.code(),
            Self::DefineWithoutDeclare { .. } => ErrorCode::DefineWithoutDeclare.code(),
            Self::DefineAlreadyDefined { .. } => ErrorCode::DefineAlreadyDefined.code(),
            Self::NoCurrentModule => ErrorCode::NoCurrentModule.code(),
            Self::FreezeUnknownEngine { .. } => ErrorCode::FreezeUnknownEngine.code(),
            Self::IllegalPhaseTransition { .. } => ErrorCode::IllegalPhaseTransition.code(),
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::RegistrationOutsideConstructionPhase { .. } => {
                ErrorCode::RegistrationOutsideConstructionPhase.hint()
            }
            Self::DuplicateRegistration { .. } => ErrorCode::DuplicateRegistration.hint(),
            Self::DefineWithoutDeclare { .. } => ErrorCode::DefineWithoutDeclare.hint(),
            Self::DefineAlreadyDefined { .. } => ErrorCode::DefineAlreadyDefined.hint(),
            Self::NoCurrentModule => ErrorCode::NoCurrentModule.hint(),
            Self::FreezeUnknownEngine { .. } => ErrorCode::FreezeUnknownEngine.hint(),
            Self::IllegalPhaseTransition { .. } => ErrorCode::IllegalPhaseTransition.hint(),
        }
    }
}

// ---------------------------------------------------------------------------
// UniquenessError
// ---------------------------------------------------------------------------

/// A policy that claims to yield unique seeds produced a collision.
#[derive(Debug, thiserror::Error)]
#[error(
    "{code}: seed {seed} collides between {engine} and {other}",
    code = ErrorCode::SeedCollision.code()
)]
pub struct UniquenessError {
    pub engine: EngineId,
    pub other: EngineId,
    pub seed: u32,
}

impl UniquenessError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        ErrorCode::SeedCollision.code()
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        ErrorCode::SeedCollision.hint()
    }
}

// ---------------------------------------------------------------------------
// InvalidInputError
// ---------------------------------------------------------------------------

/// An event-dependent policy was invoked with input it cannot use.
#[derive(Debug, thiserror::Error)]
pub enum InvalidInputError {
    #[error(
        "{code}: event timestamp is not valid for engine {engine}",
        code = ErrorCode::InvalidTimestamp.code()
    )]
    InvalidTimestamp { engine: EngineId },
}

impl InvalidInputError {
    #[must_use]
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidTimestamp { .. } => ErrorCode::InvalidTimestamp.code(),
        }
    }

    #[must_use]
    pub fn hint(&self) -> Option<&'static str> {
        match self {
            Self::InvalidTimestamp { .. } => ErrorCode::InvalidTimestamp.hint(),
        }
    }
}
