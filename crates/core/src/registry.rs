//! Registry of metric descriptors
//!
//! Descriptors are appended in declaration order, which is also the order
//! activation hands sensors out in. The process-wide registry is built and
//! sealed once at startup and is read-only afterwards.

use crate::descriptor::SensorDescriptor;
use crate::error::RegistryError;
use once_cell::sync::{Lazy, OnceCell};
use std::sync::Arc;

/// Ordered collection of descriptors
#[derive(Debug, Default)]
pub struct Registry {
    descriptors: Vec<Arc<SensorDescriptor>>,
    sealed: bool,
}

impl Registry {
    /// Create a new empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a descriptor
    ///
    /// Each key may be registered exactly once, and nothing can be added
    /// after the registry has been sealed.
    pub fn register(&mut self, descriptor: SensorDescriptor) -> Result<(), RegistryError> {
        if self.sealed {
            return Err(RegistryError::Sealed(descriptor.key().to_string()));
        }
        if self.get(descriptor.key()).is_some() {
            return Err(RegistryError::DuplicateKey(descriptor.key().to_string()));
        }

        log::trace!(
            "Registered sensor {} (requires {})",
            descriptor.key(),
            descriptor.requirements()
        );
        self.descriptors.push(Arc::new(descriptor));
        Ok(())
    }

    /// Freeze the registry
    pub fn seal(&mut self) {
        self.sealed = true;
    }

    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    /// All descriptors in declaration order
    pub fn descriptors(&self) -> &[Arc<SensorDescriptor>] {
        &self.descriptors
    }

    /// Look a descriptor up by key
    pub fn get(&self, key: &str) -> Option<&Arc<SensorDescriptor>> {
        self.descriptors.iter().find(|d| d.key() == key)
    }

    /// List all registered keys in declaration order
    pub fn keys(&self) -> Vec<&'static str> {
        self.descriptors.iter().map(|d| d.key()).collect()
    }

    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}

static GLOBAL_REGISTRY: OnceCell<Registry> = OnceCell::new();

static EMPTY_REGISTRY: Lazy<Registry> = Lazy::new(|| Registry {
    descriptors: Vec::new(),
    sealed: true,
});

/// Build, seal and publish the process-wide registry
///
/// Only the first call runs `populate`; later calls return the registry
/// that is already installed. The registry lives until process exit.
pub fn init_global_registry<F>(populate: F) -> Result<&'static Registry, RegistryError>
where
    F: FnOnce(&mut Registry) -> Result<(), RegistryError>,
{
    GLOBAL_REGISTRY.get_or_try_init(|| {
        let mut registry = Registry::new();
        populate(&mut registry)?;
        registry.seal();
        log::info!("Sensor registry initialized with {} sensors", registry.len());
        Ok(registry)
    })
}

/// Get the process-wide registry
///
/// Returns an empty, sealed registry until `init_global_registry` has run.
pub fn global_registry() -> &'static Registry {
    GLOBAL_REGISTRY.get().unwrap_or(&EMPTY_REGISTRY)
}
