//! `ArtState`: the host phase tracker and "current module/event" context.
//!
//! Named after the framework whose phase-callback vocabulary it mirrors
//! (construction, begin-run, event, end-job). Transitions are one-way from
//! a "pre" callback to its symmetric "post" callback; anything else is an
//! illegal pairing.

use std::fmt;

use seedmaster_core::error::{LogicError, SeedMasterError};

/// The host's current phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
    NotStarted,
    InServiceConstructor,
    InModuleConstructor,
    InModuleBeginRun,
    InEvent,
    InModuleEvent,
    InEndJob,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::NotStarted => "notStarted",
            Self::InServiceConstructor => "inServiceConstructor",
            Self::InModuleConstructor => "inModuleConstructor",
            Self::InModuleBeginRun => "inModuleBeginRun",
            Self::InEvent => "inEvent",
            Self::InModuleEvent => "inModuleEvent",
            Self::InEndJob => "inEndJob",
        };
        write!(f, "{name}")
    }
}

impl Phase {
    /// Whether `self -> to` is a legal one-way pre/post transition.
    #[must_use]
    pub const fn can_transition_to(self, to: Self) -> bool {
        matches!(
            (self, to),
            (Self::NotStarted, Self::InServiceConstructor)
                | (Self::InServiceConstructor, Self::InModuleConstructor)
                | (Self::InServiceConstructor, Self::NotStarted)
                | (Self::InModuleConstructor, Self::InServiceConstructor)
                | (Self::InModuleConstructor, Self::InModuleBeginRun)
                | (Self::InModuleBeginRun, Self::InModuleConstructor)
                | (Self::InModuleBeginRun, Self::InEvent)
                | (Self::InEvent, Self::InModuleEvent)
                | (Self::InModuleEvent, Self::InEvent)
                | (Self::InEvent, Self::InModuleBeginRun)
                | (Self::InEvent, Self::InEndJob)
                | (Self::InModuleBeginRun, Self::InEndJob)
                | (Self::InEndJob, Self::NotStarted)
        )
    }
}

/// Tracks the host's current phase plus the "current module" and "current
/// event" context the adapter needs to qualify short identifiers and build
/// `EventData`. Single-threaded; mutated only from framework callbacks or
/// the adapter's own entry points.
#[derive(Debug)]
pub struct ArtState {
    phase: Phase,
    current_module: Option<String>,
    current_event: Option<seedmaster_core::EventData>,
}

impl Default for ArtState {
    fn default() -> Self {
        Self::new()
    }
}

impl ArtState {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: Phase::NotStarted,
            current_module: None,
            current_event: None,
        }
    }

    #[must_use]
    pub const fn phase(&self) -> Phase {
        self.phase
    }

    /// The module label of the module currently under construction or
    /// executing, if any.
    #[must_use]
    pub fn current_module(&self) -> Option<&str> {
        self.current_module.as_deref()
    }

    #[must_use]
    pub const fn current_event(&self) -> Option<&seedmaster_core::EventData> {
        self.current_event.as_ref()
    }

    /// Move to `to`. Fails with [`LogicError::IllegalPhaseTransition`] if
    /// the pairing isn't one of the recognized one-way transitions.
    pub fn transition_to(&mut self, to: Phase) -> Result<(), SeedMasterError> {
        if !self.phase.can_transition_to(to) {
            return Err(LogicError::IllegalPhaseTransition {
                from: self.phase.to_string(),
                to: to.to_string(),
            }
            .into());
        }
        self.phase = to;
        Ok(())
    }

    pub fn enter_module(&mut self, module_label: impl Into<String>) {
        self.current_module = Some(module_label.into());
    }

    pub fn leave_module(&mut self) {
        self.current_module = None;
    }

    pub fn begin_event(&mut self, data: seedmaster_core::EventData) {
        self.current_event = Some(data);
    }

    pub fn end_event(&mut self) {
        self.current_event = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn construction_to_begin_run_is_legal() {
        let mut s = ArtState::new();
        s.transition_to(Phase::InServiceConstructor).unwrap();
        s.transition_to(Phase::InModuleConstructor).unwrap();
        assert!(s.transition_to(Phase::InModuleBeginRun).is_ok());
    }

    #[test]
    fn end_job_is_legal_from_between_events() {
        let mut s = ArtState::new();
        s.transition_to(Phase::InServiceConstructor).unwrap();
        s.transition_to(Phase::InModuleConstructor).unwrap();
        s.transition_to(Phase::InModuleBeginRun).unwrap();
        assert!(s.transition_to(Phase::InEndJob).is_ok());
        assert!(s.transition_to(Phase::NotStarted).is_ok());
    }

    #[test]
    fn skipping_straight_to_end_job_is_illegal() {
        let mut s = ArtState::new();
        let err = s.transition_to(Phase::InEndJob).unwrap_err();
        assert_eq!(err.error_code(), "S2007");
    }

    #[test]
    fn default_state_has_no_current_module() {
        let s = ArtState::new();
        assert!(s.current_module().is_none());
    }

    #[test]
    fn event_round_trips_through_begin_and_end() {
        let mut s = ArtState::new();
        let data = seedmaster_core::EventData::new(1, 1, 1, 10, true, "p", "m");
        s.begin_event(data);
        assert!(s.current_event().is_some());
        s.end_event();
        assert!(s.current_event().is_none());
    }
}
