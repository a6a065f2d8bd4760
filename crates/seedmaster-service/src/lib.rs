#![forbid(unsafe_code)]
//! Host framework adapter for the seed master: phase policing, identifier
//! qualification, override resolution, and the reseeding driver.

pub mod art_state;
pub mod config;
pub mod error;
pub mod seeder;
pub mod service_adapter;

pub use art_state::{ArtState, Phase};
pub use config::{load_nu_random_service_config, resolve_override, ConfigLoadError, Verbosity};
pub use error::AdapterError;
pub use seeder::{clhep_seeder, into_seeder_fn, root_seeder, ClhepEngine, RootEngine, Seeder};
pub use service_adapter::ServiceAdapter;
