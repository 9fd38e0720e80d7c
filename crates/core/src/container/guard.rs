//! Re-entrancy detection for a single registry entry.
//!
//! A guard is `Idle` for a thread until that thread enters it, and stays
//! `Resolving` until the returned [`GuardToken`] is dropped. Entering again
//! from the same thread while resolving means the dependency chain came back
//! to the same name, which is reported as a circular dependency. Other
//! threads have their own state and never collide.

use std::collections::HashSet;
use std::sync::{Mutex, PoisonError};
use std::thread::{self, ThreadId};

use crate::container::dependencies::ResolutionPath;
use crate::errors::ContainerError;

/// Per-entry circular dependency detector
#[derive(Debug)]
pub struct CircularGuard {
    name: String,
    in_flight: Mutex<HashSet<ThreadId>>,
}

impl CircularGuard {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            in_flight: Mutex::new(HashSet::new()),
        }
    }

    /// Move the current thread to `Resolving`, or fail if it already is
    ///
    /// The set only ever holds thread ids, so a lock poisoned by a panicking
    /// provider is still consistent and is used as is.
    pub fn enter(&self, path: &ResolutionPath) -> Result<GuardToken<'_>, ContainerError> {
        let thread = thread::current().id();
        let mut in_flight = self.in_flight.lock().unwrap_or_else(PoisonError::into_inner);

        if !in_flight.insert(thread) {
            tracing::warn!(name = %self.name, path = %path, "Circular dependency detected");
            return Err(ContainerError::CircularDependency {
                name: self.name.clone(),
                path: path.to_string(),
            });
        }

        Ok(GuardToken {
            guard: self,
            thread,
        })
    }

    /// Whether the current thread is resolving this entry
    pub fn is_resolving(&self) -> bool {
        let thread = thread::current().id();
        self.in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .contains(&thread)
    }
}

/// Returns its thread to `Idle` when dropped, whatever the outcome
#[derive(Debug)]
pub struct GuardToken<'a> {
    guard: &'a CircularGuard,
    thread: ThreadId,
}

impl Drop for GuardToken<'_> {
    fn drop(&mut self) {
        self.guard
            .in_flight
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&self.thread);
    }
}
