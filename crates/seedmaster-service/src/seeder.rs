//! The `Seeder` contract and convenience wrappers for the two concrete
//! engine families the host framework knows about.

use seedmaster_core::{EngineId, Seed};

/// Something that can have a seed pushed into it. `seedmaster-core` models
/// this as a plain boxed closure; this trait exists at the service layer so
/// call sites can keep a concrete engine handle and convert it into a
/// closure once, at registration time.
pub trait Seeder {
    fn apply(&mut self, id: &EngineId, seed: Seed);
}

/// Wraps any `FnMut(&EngineId, Seed)` as a [`Seeder`].
impl<F: FnMut(&EngineId, Seed)> Seeder for F {
    fn apply(&mut self, id: &EngineId, seed: Seed) {
        self(id, seed);
    }
}

/// Converts a [`Seeder`] into the boxed closure `seedmaster-core` expects.
pub fn into_seeder_fn(mut seeder: impl Seeder + 'static) -> seedmaster_core::SeederFn {
    Box::new(move |id: &EngineId, seed: Seed| seeder.apply(id, seed))
}

/// A handle to a CLHEP-style engine: `engine.setSeed(seed, 0)`.
pub trait ClhepEngine {
    fn set_seed(&mut self, seed: u32, generator: i32);
}

/// A handle to a ROOT-style engine: `engine.SetSeed(seed)`.
pub trait RootEngine {
    fn set_seed(&mut self, seed: u32);
}

/// Build a [`Seeder`] that calls a CLHEP-style engine's `setSeed(seed, 0)`.
pub fn clhep_seeder<E: ClhepEngine>(mut engine: E) -> impl Seeder {
    move |_id: &EngineId, seed: Seed| engine.set_seed(seed.value(), 0)
}

/// Build a [`Seeder`] that calls a ROOT-style engine's `SetSeed(seed)`.
pub fn root_seeder<E: RootEngine>(mut engine: E) -> impl Seeder {
    move |_id: &EngineId, seed: Seed| engine.set_seed(seed.value())
}
