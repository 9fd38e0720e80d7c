use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::container::dependencies::Dependencies;
use crate::container::guard::CircularGuard;
use crate::container::lifetime::{Lifetime, Singleton, Transient};
use crate::container::provider::{Instance, ProviderFn};
use crate::errors::ContainerError;

/// How an entry produces its value
#[derive(Debug)]
enum Activation {
    Singleton(Singleton),
    Transient(Transient),
    Value(Instance),
}

/// A named, fully wrapped resolver
///
/// Singleton and transient entries own a [`CircularGuard`] around their
/// lifetime wrapper. Values cannot recurse, so they carry no guard.
#[derive(Debug)]
pub struct RegistryEntry {
    name: String,
    lifetime: Lifetime,
    guard: Option<CircularGuard>,
    activation: Activation,
}

impl RegistryEntry {
    /// Entry evaluated once and cached
    pub fn singleton(name: impl Into<String>, provider: ProviderFn) -> Self {
        let name = name.into();
        Self {
            guard: Some(CircularGuard::new(name.clone())),
            name,
            lifetime: Lifetime::Singleton,
            activation: Activation::Singleton(Singleton::new(provider)),
        }
    }

    /// Entry evaluated on every resolution
    pub fn transient(name: impl Into<String>, provider: ProviderFn) -> Self {
        let name = name.into();
        Self {
            guard: Some(CircularGuard::new(name.clone())),
            name,
            lifetime: Lifetime::Transient,
            activation: Activation::Transient(Transient::new(provider)),
        }
    }

    /// Entry returning a constant
    pub fn value(name: impl Into<String>, value: Instance) -> Self {
        Self {
            name: name.into(),
            lifetime: Lifetime::Value,
            guard: None,
            activation: Activation::Value(value),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn lifetime(&self) -> Lifetime {
        self.lifetime
    }

    /// Run the wrapped resolver
    ///
    /// `deps` must already have this entry's name on its resolution path.
    pub fn resolve(&self, deps: &Dependencies) -> Result<Instance, ContainerError> {
        let _token = match &self.guard {
            Some(guard) => Some(guard.enter(deps.path())?),
            None => None,
        };

        match &self.activation {
            Activation::Singleton(singleton) => singleton.resolve(deps),
            Activation::Transient(transient) => transient.resolve(deps),
            Activation::Value(value) => Ok(value.clone()),
        }
    }
}

/// Name-keyed registry shared by a container and its dependency views
#[derive(Debug)]
pub struct Registry {
    entries: RwLock<HashMap<String, Arc<RegistryEntry>>>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Insert an entry, failing if its name is already taken
    pub fn register(&self, entry: RegistryEntry) -> Result<(), ContainerError> {
        let mut entries = self.entries.write().map_err(|_| ContainerError::LockError {
            resource: "registry".to_string(),
        })?;

        if entries.contains_key(entry.name()) {
            return Err(ContainerError::DuplicateName {
                name: entry.name().to_string(),
            });
        }

        entries.insert(entry.name().to_string(), Arc::new(entry));
        Ok(())
    }

    /// Find the entry registered under `name`
    ///
    /// The read lock is released before the entry is returned, so providers
    /// can look up further names while resolving.
    pub fn lookup(&self, name: &str) -> Result<Arc<RegistryEntry>, ContainerError> {
        let entries = self.entries.read().map_err(|_| ContainerError::LockError {
            resource: "registry".to_string(),
        })?;

        entries
            .get(name)
            .cloned()
            .ok_or_else(|| ContainerError::unknown_dependency(name))
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(name))
            .unwrap_or(false)
    }

    /// Lifetime of a registered name
    pub fn lifetime_of(&self, name: &str) -> Option<Lifetime> {
        self.entries
            .read()
            .ok()?
            .get(name)
            .map(|entry| entry.lifetime())
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self
            .entries
            .read()
            .map(|entries| entries.keys().cloned().collect())
            .unwrap_or_default();
        names.sort();
        names
    }

    /// Get the number of registered names
    pub fn len(&self) -> usize {
        self.entries.read().map(|entries| entries.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for Registry {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::provider::erase;

    fn constant(value: u32) -> ProviderFn {
        erase(move |_| Ok(value))
    }

    #[test]
    fn test_register_and_lookup() {
        let registry = Registry::new();
        assert!(registry.is_empty());

        registry
            .register(RegistryEntry::singleton("port", constant(8080)))
            .unwrap();
        registry
            .register(RegistryEntry::value("host", Arc::new("localhost")))
            .unwrap();

        assert_eq!(registry.len(), 2);
        assert!(registry.contains("port"));
        assert_eq!(registry.names(), vec!["host".to_string(), "port".to_string()]);
        assert_eq!(registry.lifetime_of("host"), Some(Lifetime::Value));
        assert_eq!(registry.lifetime_of("missing"), None);

        let entry = registry.lookup("port").unwrap();
        assert_eq!(entry.name(), "port");
        assert_eq!(entry.lifetime(), Lifetime::Singleton);
    }

    #[test]
    fn test_duplicate_name_keeps_original() {
        let registry = Registry::new();
        registry
            .register(RegistryEntry::singleton("port", constant(8080)))
            .unwrap();

        let err = registry
            .register(RegistryEntry::transient("port", constant(9090)))
            .unwrap_err();
        assert!(err.is_duplicate());
        assert_eq!(err.name(), Some("port"));

        assert_eq!(registry.len(), 1);
        assert_eq!(registry.lifetime_of("port"), Some(Lifetime::Singleton));
    }

    #[test]
    fn test_lookup_unknown_name() {
        let registry = Registry::new();
        let err = registry.lookup("nope").unwrap_err();
        assert!(err.is_unknown());
        assert_eq!(err.name(), Some("nope"));
    }

    #[test]
    fn test_value_entry_returns_same_instance() {
        let registry = Arc::new(Registry::new());
        let value: Instance = Arc::new(42u32);
        registry
            .register(RegistryEntry::value("limit", value.clone()))
            .unwrap();

        let deps = Dependencies::new(registry.clone());
        let entry = registry.lookup("limit").unwrap();
        let resolved = entry.resolve(&deps).unwrap();
        assert!(Arc::ptr_eq(&resolved, &value));
    }
}
