use std::sync::OnceLock;

use crate::container::dependencies::Dependencies;
use crate::container::provider::{Instance, ProviderFn};
use crate::errors::ContainerError;

/// Lifetime policy of a registered dependency
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lifetime {
    /// Evaluated once, then shared by every resolution
    Singleton,
    /// Evaluated again on every resolution
    Transient,
    /// Constant registered up front, never evaluated
    Value,
}

impl Lifetime {
    /// Get the lifetime name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Lifetime::Singleton => "singleton",
            Lifetime::Transient => "transient",
            Lifetime::Value => "value",
        }
    }
}

impl std::fmt::Display for Lifetime {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Memoizes the first successful result of its provider
pub struct Singleton {
    provider: ProviderFn,
    cell: OnceLock<Instance>,
}

impl Singleton {
    pub fn new(provider: ProviderFn) -> Self {
        Self {
            provider,
            cell: OnceLock::new(),
        }
    }

    /// Whether a value has been cached yet
    pub fn is_evaluated(&self) -> bool {
        self.cell.get().is_some()
    }

    pub fn resolve(&self, deps: &Dependencies) -> Result<Instance, ContainerError> {
        if let Some(instance) = self.cell.get() {
            return Ok(instance.clone());
        }

        // A failed provider leaves the cell empty so a later call can retry.
        let instance = (self.provider)(deps)?;
        tracing::debug!(path = %deps.path(), "Singleton evaluated");

        // Racing threads may both get here; the first stored value wins.
        Ok(self.cell.get_or_init(|| instance).clone())
    }
}

impl std::fmt::Debug for Singleton {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Singleton")
            .field("evaluated", &self.is_evaluated())
            .finish()
    }
}

/// Calls its provider on every resolution
pub struct Transient {
    provider: ProviderFn,
}

impl Transient {
    pub fn new(provider: ProviderFn) -> Self {
        Self { provider }
    }

    pub fn resolve(&self, deps: &Dependencies) -> Result<Instance, ContainerError> {
        (self.provider)(deps)
    }
}

impl std::fmt::Debug for Transient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Transient").finish_non_exhaustive()
    }
}
