#[allow(clippy::module_inception)]
pub mod container;
pub mod dependencies;
pub mod guard;
pub mod lifetime;
pub mod provider;
pub mod registry;

pub use container::Container;
pub use dependencies::{Dependencies, ResolutionPath};
pub use guard::{CircularGuard, GuardToken};
pub use lifetime::{Lifetime, Singleton, Transient};
pub use provider::{Instance, ProviderFn};
pub use registry::{Registry, RegistryEntry};
