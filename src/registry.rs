//! Engine registry for sharing engine instances between validations.
//!
//! This module provides the [`EngineRegistry`] type that hands out one
//! [`JsonSchemaEngine`] per distinct set of [`EngineOptions`], so compiled
//! schemas are reused across `validate` calls.

use parking_lot::RwLock;
use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use crate::engine::{EngineOptions, JsonSchemaEngine};

/// Type alias for the engine storage map.
type EngineMap = Arc<RwLock<HashMap<EngineOptions, Arc<JsonSchemaEngine>>>>;

/// A thread-safe cache of engines keyed by their options.
///
/// Each key is populated once; afterwards the entry is only read, so
/// concurrent validations never contend on anything but the lookup.
///
/// # Thread Safety
///
/// The registry uses `Arc<RwLock<...>>` for thread-safe access:
/// - Lookups of existing engines take a shared read lock
/// - Creating an engine for new options takes the write lock once
///
/// # Example
///
/// ```rust
/// use schema_tree::{Draft, EngineOptions, EngineRegistry};
/// use std::sync::Arc;
///
/// let registry = EngineRegistry::new();
///
/// let a = registry.engine(EngineOptions::new());
/// let b = registry.engine(EngineOptions::new());
/// assert!(Arc::ptr_eq(&a, &b));
///
/// let draft7 = registry.engine(EngineOptions::new().draft(Draft::Draft7));
/// assert!(!Arc::ptr_eq(&a, &draft7));
/// assert_eq!(registry.len(), 2);
/// ```
pub struct EngineRegistry {
    engines: EngineMap,
}

impl EngineRegistry {
    /// Creates a new empty registry.
    pub fn new() -> Self {
        Self {
            engines: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Returns the process-wide registry used by [`validate`](crate::validate).
    pub fn global() -> &'static EngineRegistry {
        static GLOBAL: OnceLock<EngineRegistry> = OnceLock::new();
        GLOBAL.get_or_init(EngineRegistry::new)
    }

    /// Returns the engine for `options`, creating it on first use.
    pub fn engine(&self, options: EngineOptions) -> Arc<JsonSchemaEngine> {
        if let Some(engine) = self.get(&options) {
            return engine;
        }

        let mut engines = self.engines.write();
        let engine = engines.entry(options).or_insert_with(|| {
            tracing::trace!(?options, "creating schema engine");
            Arc::new(JsonSchemaEngine::new(options))
        });
        Arc::clone(engine)
    }

    /// Retrieves an existing engine without creating one.
    pub fn get(&self, options: &EngineOptions) -> Option<Arc<JsonSchemaEngine>> {
        self.engines.read().get(options).cloned()
    }

    /// Returns the number of engines created so far.
    pub fn len(&self) -> usize {
        self.engines.read().len()
    }

    /// Returns true if no engine has been created yet.
    pub fn is_empty(&self) -> bool {
        self.engines.read().is_empty()
    }
}

impl Default for EngineRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl Clone for EngineRegistry {
    fn clone(&self) -> Self {
        Self {
            engines: Arc::clone(&self.engines),
        }
    }
}
