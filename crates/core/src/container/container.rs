use std::any::Any;
use std::sync::Arc;

use uuid::Uuid;

use crate::container::dependencies::Dependencies;
use crate::container::lifetime::Lifetime;
use crate::container::provider::{erase, Instance};
use crate::container::registry::{Registry, RegistryEntry};
use crate::errors::ContainerError;

/// Composition root: register providers, then consume the wired graph
///
/// ```
/// use ddinject_core::{Container, ContainerError};
///
/// struct Writer;
/// struct Logger {
///     writer: std::sync::Arc<Writer>,
/// }
///
/// let mut container = Container::new();
/// container
///     .add("logger", |deps| Ok(Logger { writer: deps.get::<Writer>("writer")? }))?
///     .add("writer", |_| Ok(Writer))?;
///
/// let shared = container.consume(|deps| {
///     let logger = deps.get::<Logger>("logger")?;
///     let writer = deps.get::<Writer>("writer")?;
///     Ok::<_, ContainerError>(std::sync::Arc::ptr_eq(&logger.writer, &writer))
/// })?;
/// assert!(shared);
/// # Ok::<(), ContainerError>(())
/// ```
pub struct Container {
    id: Uuid,
    registry: Arc<Registry>,
}

impl Container {
    /// Create an empty container
    pub fn new() -> Self {
        Self {
            id: Uuid::new_v4(),
            registry: Arc::new(Registry::new()),
        }
    }

    /// Unique id of this container, used in log output
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Alias of [`add_singleton`](Self::add_singleton)
    pub fn add<T, F>(&mut self, name: impl Into<String>, provider: F) -> Result<&mut Self, ContainerError>
    where
        T: Send + Sync + 'static,
        F: Fn(&Dependencies) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        self.add_singleton(name, provider)
    }

    /// Register a provider evaluated on first use and shared afterwards
    pub fn add_singleton<T, F>(&mut self, name: impl Into<String>, provider: F) -> Result<&mut Self, ContainerError>
    where
        T: Send + Sync + 'static,
        F: Fn(&Dependencies) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        let name = validate_name(name.into())?;
        self.register(RegistryEntry::singleton(name, erase(provider)))
    }

    /// Register a provider evaluated again on every use
    pub fn add_transient<T, F>(&mut self, name: impl Into<String>, provider: F) -> Result<&mut Self, ContainerError>
    where
        T: Send + Sync + 'static,
        F: Fn(&Dependencies) -> Result<T, ContainerError> + Send + Sync + 'static,
    {
        let name = validate_name(name.into())?;
        self.register(RegistryEntry::transient(name, erase(provider)))
    }

    /// Register a ready-made value
    pub fn add_value<T>(&mut self, name: impl Into<String>, value: T) -> Result<&mut Self, ContainerError>
    where
        T: Send + Sync + 'static,
    {
        let name = validate_name(name.into())?;
        self.register(RegistryEntry::value(name, Arc::new(value) as Instance))
    }

    /// Run `consumer` against the dependency view and hand back its result as is
    pub fn consume<R, F>(&self, consumer: F) -> R
    where
        F: FnOnce(&Dependencies) -> R,
    {
        consumer(&self.deps())
    }

    /// Resolve a single dependency by name
    pub fn resolve<T>(&self, name: &str) -> Result<Arc<T>, ContainerError>
    where
        T: Any + Send + Sync,
    {
        self.deps().get::<T>(name)
    }

    /// Resolve a dependency, returning None on any failure
    pub fn try_resolve<T>(&self, name: &str) -> Option<Arc<T>>
    where
        T: Any + Send + Sync,
    {
        self.resolve::<T>(name).ok()
    }

    /// Read-only view over the registered dependencies
    pub fn deps(&self) -> Dependencies {
        Dependencies::new(self.registry.clone())
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// Lifetime of a registered name
    pub fn lifetime_of(&self, name: &str) -> Option<Lifetime> {
        self.registry.lifetime_of(name)
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Get the number of registered dependencies
    pub fn len(&self) -> usize {
        self.registry.len()
    }

    pub fn is_empty(&self) -> bool {
        self.registry.is_empty()
    }

    fn register(&mut self, entry: RegistryEntry) -> Result<&mut Self, ContainerError> {
        let name = entry.name().to_string();
        let lifetime = entry.lifetime();
        self.registry.register(entry)?;

        tracing::debug!(container = %self.id, %lifetime, "Registered dependency '{}'", name);
        Ok(self)
    }
}

fn validate_name(name: String) -> Result<String, ContainerError> {
    if name.is_empty() {
        return Err(ContainerError::invalid_argument(
            "dependency name must be a non-empty string",
        ));
    }
    Ok(name)
}

impl Default for Container {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for Container {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Container")
            .field("id", &self.id)
            .field("names", &self.names())
            .finish()
    }
}
