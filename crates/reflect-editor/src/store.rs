//! Persistence capability for reflection records.
//!
//! The editor depends on this trait rather than any concrete client, so
//! tests and the demo binary can substitute deterministic in-process
//! implementations without a network stack.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;

use reflect_core::error::ReflectError;
use reflect_core::types::{Reflection, ReflectionId};

/// Capability interface for updating a persisted reflection record.
///
/// Implementations resolve on success and return an error on failure; the
/// editor treats every error identically regardless of the underlying cause.
#[async_trait]
pub trait ReflectionStore: Send + Sync {
    /// Persist a new body for the record with the given identifier.
    async fn update_reflection(&self, id: &ReflectionId, content: &str)
        -> Result<(), ReflectError>;
}

/// In-memory store backing tests and the demo binary.
///
/// Records live in a `HashMap` behind a mutex. A failure switch makes every
/// update reject, for exercising the editor's error path.
pub struct MemoryStore {
    records: Mutex<HashMap<ReflectionId, Reflection>>,
    failing: AtomicBool,
    update_count: AtomicUsize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            records: Mutex::new(HashMap::new()),
            failing: AtomicBool::new(false),
            update_count: AtomicUsize::new(0),
        }
    }

    /// Seed the store with a record. Panics if the record has no identifier.
    pub fn insert(&self, reflection: Reflection) {
        let id = reflection
            .id
            .clone()
            .expect("cannot store a reflection without an identifier");
        // A poisoned lock still holds a coherent map; recover the guard.
        let mut records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.insert(id, reflection);
    }

    /// Fetch a copy of a stored record.
    pub fn get(&self, id: &ReflectionId) -> Option<Reflection> {
        let records = self.records.lock().unwrap_or_else(|e| e.into_inner());
        records.get(id).cloned()
    }

    /// Make every subsequent update fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Number of update calls that reached the store, including failed ones.
    pub fn update_calls(&self) -> usize {
        self.update_count.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ReflectionStore for MemoryStore {
    async fn update_reflection(
        &self,
        id: &ReflectionId,
        content: &str,
    ) -> Result<(), ReflectError> {
        self.update_count.fetch_add(1, Ordering::SeqCst);

        if self.failing.load(Ordering::SeqCst) {
            return Err(ReflectError::Store("simulated store failure".to_string()));
        }

        let mut records = self
            .records
            .lock()
            .map_err(|e| ReflectError::Store(format!("store mutex poisoned: {}", e)))?;
        match records.get_mut(id) {
            Some(record) => {
                record.reflection = content.to_string();
                record.updated_at = Utc::now();
                tracing::debug!(id = %id, body_length = content.len(), "Reflection updated");
                Ok(())
            }
            None => Err(ReflectError::Store(format!("no such reflection: {}", id))),
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
