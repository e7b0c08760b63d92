//! # Integrator Registry
//!
//! Maps strategy names to integrator implementations, instantiating each
//! one lazily and caching the instance. Unknown names are an explicit
//! error; silently substituting a default strategy would mean silently
//! computing with the wrong algorithm.
//!
//! ## Usage
//!
//! ```rust
//! use section_core::integration::registry::default_registry;
//!
//! let marin = default_registry().get("marin").unwrap();
//! assert_eq!(marin.name(), "marin");
//!
//! let err = default_registry().get("gauss").unwrap_err();
//! assert_eq!(err.error_code(), "UNKNOWN_INTEGRATOR");
//! ```

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use once_cell::sync::Lazy;

use crate::errors::{SectionError, SectionResult};

use super::fiber::FiberIntegrator;
use super::marin::MarinIntegrator;
use super::SectionIntegrator;

/// Constructor for a registered integration strategy.
pub type IntegratorBuilder = fn() -> Arc<dyn SectionIntegrator>;

/// Registry of named integration strategies with per-name instance
/// caching.
pub struct IntegratorRegistry {
    builders: HashMap<String, IntegratorBuilder>,
    instances: Mutex<HashMap<String, Arc<dyn SectionIntegrator>>>,
}

impl IntegratorRegistry {
    /// Create a registry with the built-in strategies ("marin", "fiber").
    pub fn new() -> Self {
        let mut registry = IntegratorRegistry::empty();
        registry.register("marin", || Arc::new(MarinIntegrator::new()));
        registry.register("fiber", || Arc::new(FiberIntegrator::new()));
        registry
    }

    /// Create a registry with no strategies registered.
    pub fn empty() -> Self {
        IntegratorRegistry {
            builders: HashMap::new(),
            instances: Mutex::new(HashMap::new()),
        }
    }

    /// Register (or replace) a strategy under a name.
    pub fn register(&mut self, name: impl Into<String>, builder: IntegratorBuilder) {
        let name = name.into();
        self.instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&name);
        self.builders.insert(name, builder);
    }

    /// Look up a strategy by name, instantiating it on first use.
    pub fn get(&self, name: &str) -> SectionResult<Arc<dyn SectionIntegrator>> {
        let mut instances = self
            .instances
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if let Some(instance) = instances.get(name) {
            return Ok(instance.clone());
        }
        match self.builders.get(name) {
            Some(builder) => {
                let instance = builder();
                instances.insert(name.to_string(), instance.clone());
                Ok(instance)
            }
            None => Err(SectionError::unknown_integrator(
                name,
                self.names().join(", "),
            )),
        }
    }

    /// Registered strategy names, sorted.
    pub fn names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.builders.keys().cloned().collect();
        names.sort();
        names
    }
}

impl Default for IntegratorRegistry {
    fn default() -> Self {
        IntegratorRegistry::new()
    }
}

/// The process-wide registry backing the crate's public entry point.
pub fn default_registry() -> &'static IntegratorRegistry {
    static REGISTRY: Lazy<IntegratorRegistry> = Lazy::new(IntegratorRegistry::new);
    &REGISTRY
}
