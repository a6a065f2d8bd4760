//! `ServiceAdapter`: the glue between `seedmaster-core` and the host
//! framework. Qualifies short instance names into `EngineId`s, polices
//! phase-legal registration, resolves overrides, and drives reseeding from
//! framework callbacks.

use toml::Value;
use tracing::{info, instrument};

use seedmaster_core::error::LogicError;
use seedmaster_core::{EngineId, EventData, Policy, Seed, SeedMaster, SeedMasterError, SeederFn};

use crate::art_state::{ArtState, Phase};
use crate::config::{resolve_override, Verbosity};

pub struct ServiceAdapter {
    master: SeedMaster,
    state: ArtState,
    verbosity: Verbosity,
    end_of_job_summary: bool,
}

impl ServiceAdapter {
    #[must_use]
    pub fn new(policy: Policy) -> Self {
        Self::with_summary_config(policy, Verbosity::SILENT, false)
    }

    #[must_use]
    pub fn with_summary_config(policy: Policy, verbosity: Verbosity, end_of_job_summary: bool) -> Self {
        Self {
            master: SeedMaster::new(policy),
            state: ArtState::new(),
            verbosity,
            end_of_job_summary,
        }
    }

    #[must_use]
    pub const fn state(&self) -> &ArtState {
        &self.state
    }

    /// Drive the host phase tracker directly. Most callers should prefer the
    /// named `on_*` callbacks below; this is exposed for hosts (and the demo
    /// binary) that need to announce a phase with no associated reseeding,
    /// such as entering construction.
    pub fn state_transition(&mut self, to: Phase) -> Result<(), SeedMasterError> {
        self.state.transition_to(to)
    }

    /// Record `module_label` as the module currently under construction or
    /// executing.
    pub fn enter_module(&mut self, module_label: impl Into<String>) {
        self.state.enter_module(module_label);
    }

    /// Clear the current module, e.g. after a module's constructor returns.
    pub fn leave_module(&mut self) {
        self.state.leave_module();
    }

    #[must_use]
    pub const fn master(&self) -> &SeedMaster {
        &self.master
    }

    /// Build a module-scoped or global `EngineId` for `instance_name`.
    /// Fails if a module-scoped id is requested with no current module.
    pub fn qualify(&self, instance_name: &str, global: bool) -> Result<EngineId, SeedMasterError> {
        if global {
            return Ok(EngineId::global(instance_name));
        }
        let module = self
            .state
            .current_module()
            .ok_or(LogicError::NoCurrentModule)?;
        Ok(EngineId::module(module, instance_name))
    }

    fn police_registration_phase(&self, global: bool, id: &EngineId) -> Result<(), SeedMasterError> {
        let legal = match self.state.phase() {
            Phase::InServiceConstructor => global,
            Phase::InModuleConstructor => !global,
            _ => false,
        };
        if !legal {
            return Err(LogicError::RegistrationOutsideConstructionPhase { engine: id.clone() }.into());
        }
        Ok(())
    }

    /// Register `instance_name` with an explicit, already-resolved
    /// override. Fails if `instance_name` is already registered or the
    /// current phase doesn't permit registration.
    #[instrument(skip(self, seeder))]
    pub fn register(
        &mut self,
        instance_name: &str,
        global: bool,
        seeder: Option<SeederFn>,
        override_seed: Option<Seed>,
    ) -> Result<Seed, SeedMasterError> {
        let id = self.qualify(instance_name, global)?;
        self.police_registration_phase(global, &id)?;
        self.master.register_new_seeder(&id, seeder)?;
        let seed = match override_seed.filter(|s| s.is_valid()) {
            Some(seed) => {
                self.master.freeze_seed(&id, seed)?;
                seed
            }
            None => self.master.get_seed(&id)?,
        };
        self.master.push_seed(&id);
        info!(engine = %id, %seed, "registered engine");
        Ok(seed)
    }

    /// Same as [`Self::register`], but the override is resolved by trying
    /// `candidate_names` against `config_tree` in order; the first present
    /// key wins (a present value of zero is treated as absent).
    #[instrument(skip(self, seeder, config_tree))]
    pub fn register_with_param_names(
        &mut self,
        instance_name: &str,
        global: bool,
        seeder: Option<SeederFn>,
        config_tree: &Value,
        candidate_names: &[&str],
    ) -> Result<Seed, SeedMasterError> {
        let override_seed = resolve_override(config_tree, candidate_names);
        self.register(instance_name, global, seeder, override_seed)
    }

    /// Record `instance_name` with no seeder and return its configured
    /// seed. The first of the three-step `declare` -> `create` ->
    /// `define` pattern.
    #[instrument(skip(self))]
    pub fn declare_engine(&mut self, instance_name: &str, global: bool) -> Result<Seed, SeedMasterError> {
        let id = self.qualify(instance_name, global)?;
        self.police_registration_phase(global, &id)?;
        self.master.register_seeder(&id, None);
        self.master.get_seed(&id)
    }

    /// Attach a seeder to an already-declared id and push its current seed
    /// into it. Fails if `instance_name` was never declared, or if it was
    /// already defined.
    #[instrument(skip(self, seeder))]
    pub fn define_engine(&mut self, instance_name: &str, global: bool, seeder: SeederFn) -> Result<Seed, SeedMasterError> {
        let id = self.qualify(instance_name, global)?;
        if !self.master.is_registered(&id) {
            return Err(LogicError::DefineWithoutDeclare { engine: id }.into());
        }
        if self.master.has_seeder(&id) {
            return Err(LogicError::DefineAlreadyDefined { engine: id }.into());
        }
        self.master.register_seeder(&id, Some(seeder));
        let seed = self.master.get_seed(&id)?;
        self.master.push_seed(&id);
        Ok(seed)
    }

    /// Lazy-declare-on-query: `getSeed(instance_name)` implicitly declares
    /// an unregistered id with no seeder. Preserved exactly as the
    /// original's documented (if surprising) backward-compatibility
    /// behavior — the id can never subsequently be the target of
    /// `register`/`register_new_seeder` once this runs.
    pub fn get_seed(&mut self, instance_name: &str, global: bool) -> Result<Seed, SeedMasterError> {
        let id = self.qualify(instance_name, global)?;
        if !self.master.is_registered(&id) {
            self.master.register_seeder(&id, None);
        }
        self.master.get_seed(&id)
    }

    pub fn get_current_seed(&self, instance_name: &str, global: bool) -> Result<Seed, SeedMasterError> {
        let id = self.qualify(instance_name, global)?;
        Ok(self.master.get_current_seed(&id))
    }

    pub fn is_frozen(&self, instance_name: &str, global: bool) -> Result<bool, SeedMasterError> {
        let id = self.qualify(instance_name, global)?;
        Ok(self.master.is_frozen(&id))
    }

    // -- Reseeding driver -------------------------------------------------

    /// Pre-event callback: clear the per-event cache, then reseed every
    /// global engine.
    #[instrument(skip(self))]
    pub fn on_pre_event(&mut self, data: EventData) -> Result<(), SeedMasterError> {
        self.master.on_new_event();
        self.state.transition_to(Phase::InEvent)?;
        self.state.begin_event(data.clone());
        for id in self.global_engine_ids() {
            self.master.reseed_event(&id, &data)?;
        }
        Ok(())
    }

    /// Pre-module callback during an event: reseed every module-scoped
    /// engine whose `moduleLabel` matches the current module.
    #[instrument(skip(self))]
    pub fn on_pre_module(&mut self, module_label: &str) -> Result<(), SeedMasterError> {
        self.state.transition_to(Phase::InModuleEvent)?;
        self.state.enter_module(module_label);
        let data = self.state.current_event().cloned().ok_or(LogicError::NoCurrentModule)?;
        for id in self.module_engine_ids(module_label) {
            self.master.reseed_event(&id, &data)?;
        }
        Ok(())
    }

    pub fn on_post_module(&mut self) -> Result<(), SeedMasterError> {
        self.state.transition_to(Phase::InEvent)?;
        self.state.leave_module();
        Ok(())
    }

    pub fn on_post_event(&mut self) -> Result<(), SeedMasterError> {
        self.state.transition_to(Phase::InModuleBeginRun)?;
        self.state.end_event();
        Ok(())
    }

    /// Pre-end-job callback: announce that the job is winding down. Legal
    /// from `InEvent` (end-job requested mid-event) or `InModuleBeginRun`
    /// (the ordinary case: the last event's post-event callback already
    /// ran).
    pub fn on_pre_end_job(&mut self) -> Result<(), SeedMasterError> {
        self.state.transition_to(Phase::InEndJob)
    }

    /// Post-end-job callback: print the summary if configured to, then
    /// return the tracker to `NotStarted`.
    pub fn on_post_end_job(&mut self, out: &mut impl std::io::Write) -> Result<(), crate::error::AdapterError> {
        self.state.transition_to(Phase::NotStarted)?;
        if self.verbosity.warrants_summary() || self.end_of_job_summary {
            self.master.print(out)?;
        }
        Ok(())
    }

    fn global_engine_ids(&self) -> Vec<EngineId> {
        self.all_known_ids().into_iter().filter(EngineId::is_global).collect()
    }

    fn module_engine_ids(&self, module_label: &str) -> Vec<EngineId> {
        self.all_known_ids()
            .into_iter()
            .filter(|id| !id.is_global() && id.module_label() == module_label)
            .collect()
    }

    fn all_known_ids(&self) -> Vec<EngineId> {
        self.master.known_ids().cloned().collect()
    }
}
