use std::any::Any;
use std::sync::Arc;

use crate::container::dependencies::Dependencies;
use crate::errors::ContainerError;

/// Type-erased, shared dependency value
pub type Instance = Arc<dyn Any + Send + Sync>;

/// Provider function with its output already erased to an [`Instance`]
/// We keep providers behind `Any` so entries of different types share one map
pub type ProviderFn = Box<dyn Fn(&Dependencies) -> Result<Instance, ContainerError> + Send + Sync>;

/// Erase the output type of a user provider
pub(crate) fn erase<T, F>(provider: F) -> ProviderFn
where
    T: Send + Sync + 'static,
    F: Fn(&Dependencies) -> Result<T, ContainerError> + Send + Sync + 'static,
{
    Box::new(move |deps| {
        let value = provider(deps)?;
        Ok(Arc::new(value) as Instance)
    })
}
