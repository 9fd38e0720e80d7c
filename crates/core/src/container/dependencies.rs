use std::any::Any;
use std::sync::Arc;

use crate::container::provider::Instance;
use crate::container::registry::Registry;
use crate::errors::ContainerError;

/// Names currently being resolved along one call chain, outermost first
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolutionPath {
    names: Vec<String>,
}

impl ResolutionPath {
    /// Create an empty resolution path
    pub fn new() -> Self {
        Self { names: Vec::new() }
    }

    /// Path extended by one more name
    pub fn child(&self, name: &str) -> Self {
        let mut names = self.names.clone();
        names.push(name.to_string());
        Self { names }
    }

    /// Check if the path contains a name
    pub fn contains(&self, name: &str) -> bool {
        self.names.iter().any(|n| n == name)
    }

    pub fn names(&self) -> &[String] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

impl std::fmt::Display for ResolutionPath {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.names.join(" -> "))
    }
}

/// Read-only, lazily evaluated view over a container's dependencies
///
/// Providers and consumers receive a `Dependencies` and pull what they need
/// by name. Every [`get`](Self::get) resolves through the entry's lifetime
/// policy. The view has no way to add, replace or remove entries:
///
/// ```compile_fail
/// use ddinject_core::Container;
///
/// let container = Container::new();
/// let deps = container.deps();
/// deps.set("limit", 42);
/// ```
#[derive(Clone)]
pub struct Dependencies {
    registry: Arc<Registry>,
    path: ResolutionPath,
}

impl Dependencies {
    pub(crate) fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            path: ResolutionPath::new(),
        }
    }

    /// Resolve `name` and downcast it to `T`
    ///
    /// # Errors
    ///
    /// - [`ContainerError::UnknownDependency`] if `name` was never registered
    /// - [`ContainerError::CircularDependency`] if `name` is already being
    ///   resolved further up this call chain
    /// - [`ContainerError::TypeMismatch`] if the value is not a `T`
    /// - whatever the provider itself returns
    pub fn get<T>(&self, name: &str) -> Result<Arc<T>, ContainerError>
    where
        T: Any + Send + Sync,
    {
        self.get_instance(name)?
            .downcast::<T>()
            .map_err(|_| ContainerError::TypeMismatch {
                name: name.to_string(),
                expected: std::any::type_name::<T>(),
            })
    }

    /// Resolve `name` without downcasting
    pub fn get_instance(&self, name: &str) -> Result<Instance, ContainerError> {
        let entry = self.registry.lookup(name)?;
        let child = Dependencies {
            registry: self.registry.clone(),
            path: self.path.child(name),
        };

        tracing::trace!(path = %child.path, lifetime = %entry.lifetime(), "Resolving dependency");
        entry.resolve(&child)
    }

    /// Check if a name is registered
    pub fn contains(&self, name: &str) -> bool {
        self.registry.contains(name)
    }

    /// All registered names, sorted
    pub fn names(&self) -> Vec<String> {
        self.registry.names()
    }

    /// Names being resolved above this view; empty outside providers
    ///
    /// The path is fixed when the view is created. A view a provider clones
    /// and keeps past its own call still reports the chain it was created
    /// for, even though nothing is being resolved any more.
    pub fn path(&self) -> &ResolutionPath {
        &self.path
    }
}

impl std::fmt::Debug for Dependencies {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dependencies")
            .field("names", &self.names())
            .field("path", &self.path.to_string())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::container::provider::erase;
    use crate::container::registry::RegistryEntry;

    #[test]
    fn test_resolution_path_display() {
        let path = ResolutionPath::new().child("a").child("b").child("a");
        assert_eq!(path.to_string(), "a -> b -> a");
        assert_eq!(path.len(), 3);
        assert!(path.contains("b"));
        assert!(!path.contains("c"));
        assert!(ResolutionPath::new().is_empty());
    }

    #[test]
    fn test_providers_see_their_own_path() {
        let registry = Arc::new(Registry::new());
        registry
            .register(RegistryEntry::transient(
                "inner",
                erase(|deps| Ok(deps.path().to_string())),
            ))
            .unwrap();
        registry
            .register(RegistryEntry::transient(
                "outer",
                erase(|deps| deps.get::<String>("inner").map(|inner| (*inner).clone())),
            ))
            .unwrap();

        let deps = Dependencies::new(registry);
        assert!(deps.path().is_empty());
        assert_eq!(*deps.get::<String>("outer").unwrap(), "outer -> inner");
        assert_eq!(*deps.get::<String>("inner").unwrap(), "inner");
    }

    #[test]
    fn test_kept_view_reports_path_it_was_created_for() {
        struct Holder {
            deps: Dependencies,
        }

        let registry = Arc::new(Registry::new());
        registry
            .register(RegistryEntry::value("limit", Arc::new(7u32)))
            .unwrap();
        registry
            .register(RegistryEntry::singleton(
                "holder",
                erase(|deps| Ok(Holder { deps: deps.clone() })),
            ))
            .unwrap();

        let deps = Dependencies::new(registry);
        let holder = deps.get::<Holder>("holder").unwrap();

        assert_eq!(holder.deps.path().to_string(), "holder");
        assert!(deps.path().is_empty());

        // Cycle detection follows what is in flight, not the captured path.
        assert_eq!(*holder.deps.get::<u32>("limit").unwrap(), 7);
        let again = holder.deps.get::<Holder>("holder").unwrap();
        assert!(Arc::ptr_eq(&holder, &again));
    }

    #[test]
    fn test_type_mismatch() {
        let registry = Arc::new(Registry::new());
        registry
            .register(RegistryEntry::value("limit", Arc::new(42u32)))
            .unwrap();

        let deps = Dependencies::new(registry);
        assert_eq!(*deps.get::<u32>("limit").unwrap(), 42);

        let err = deps.get::<String>("limit").unwrap_err();
        match err {
            ContainerError::TypeMismatch { name, expected } => {
                assert_eq!(name, "limit");
                assert_eq!(expected, "alloc::string::String");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_unknown_name() {
        let deps = Dependencies::new(Arc::new(Registry::new()));
        assert!(!deps.contains("ghost"));
        assert!(deps.get::<u32>("ghost").unwrap_err().is_unknown());
    }
}
