//! The dialect provider.
//!
//! Dialects are registered explicitly during process initialization and
//! looked up by the product name a connection reports, or by database
//! system. Lookups by full product string are cached, so repeated
//! resolution is a plain map hit.

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use crate::error::{CoreError, Result};

use super::{AnsiDialect, ColumnarDialect, DatabaseSystem, Dialect};

/// Registry resolving product names and systems to dialects.
///
/// Read-mostly: registration happens once at startup, lookups are
/// concurrent. A full product string ("Columnar Engine 2.0") is matched
/// by substring against registered names and the result cached under
/// the full string, so only the first lookup pays for the scan.
pub struct DialectRegistry {
    by_name: RwLock<HashMap<String, Arc<dyn Dialect>>>,
    by_system: RwLock<HashMap<DatabaseSystem, Arc<dyn Dialect>>>,
}

impl DialectRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self {
            by_name: RwLock::new(HashMap::new()),
            by_system: RwLock::new(HashMap::new()),
        }
    }

    /// Creates a registry with the built-in dialects registered.
    #[must_use]
    pub fn with_defaults() -> Self {
        let registry = Self::new();
        registry.register(Arc::new(AnsiDialect::new()));
        registry.register(Arc::new(ColumnarDialect::new()));
        registry
    }

    /// Registers a dialect under its product name and system.
    pub fn register(&self, dialect: Arc<dyn Dialect>) {
        let name = dialect.product_name().to_lowercase();
        self.by_name
            .write()
            .expect("dialect registry lock poisoned")
            .insert(name, Arc::clone(&dialect));
        self.by_system
            .write()
            .expect("dialect registry lock poisoned")
            .insert(dialect.system(), dialect);
    }

    /// Resolves a dialect from a reported product name.
    ///
    /// Matching is case-insensitive; a registered name that is a
    /// substring of the reported product string matches.
    pub fn by_product_name(&self, product: &str) -> Result<Arc<dyn Dialect>> {
        let needle = product.to_lowercase();
        {
            let map = self.by_name.read().expect("dialect registry lock poisoned");
            if let Some(dialect) = map.get(&needle) {
                return Ok(Arc::clone(dialect));
            }
            // First sight of this product string: scan registered names.
            if let Some(dialect) = map
                .iter()
                .find(|(name, _)| needle.contains(name.as_str()))
                .map(|(_, d)| Arc::clone(d))
            {
                drop(map);
                // Double-checked insert; another thread may have cached
                // the same product string between the locks.
                let mut map = self
                    .by_name
                    .write()
                    .expect("dialect registry lock poisoned");
                let cached = map.entry(needle).or_insert_with(|| Arc::clone(&dialect));
                return Ok(Arc::clone(cached));
            }
        }
        Err(CoreError::UnknownDialect(product.to_string()))
    }

    /// Resolves a dialect by database system.
    pub fn by_system(&self, system: DatabaseSystem) -> Result<Arc<dyn Dialect>> {
        self.by_system
            .read()
            .expect("dialect registry lock poisoned")
            .get(&system)
            .map(Arc::clone)
            .ok_or_else(|| CoreError::UnknownDialect(format!("{system:?}")))
    }
}

impl Default for DialectRegistry {
    fn default() -> Self {
        Self::with_defaults()
    }
}
