//! Named, lazily evaluated dependency container.
//!
//! Providers are registered under a name with a [`Lifetime`] and receive a
//! read-only [`Dependencies`] view from which they pull other entries by
//! name. Nothing is evaluated until somebody asks for it.

pub mod container;
pub mod errors;

pub use container::{Container, Dependencies, Instance, Lifetime, ResolutionPath};
pub use errors::ContainerError;

/// Version information
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Create an empty container
pub fn create_container() -> Container {
    Container::new()
}
