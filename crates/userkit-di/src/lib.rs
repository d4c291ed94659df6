//! Dependency injection container for userkit
//!
//! A type-keyed service registry arranged in tiers. Each tier is a
//! container holding an optional parent; resolution looks locally
//! first and falls back to the parent chain, so inner layers never see
//! services registered by outer ones. Registration is idempotent: the
//! first registration of a type wins and later ones are ignored, which
//! lets initialization run more than once without error.
//!
//! [`tiers::initialize`] builds the standard four-tier stack
//! (core, infrastructure, domain, application) over the in-memory
//! infrastructure.

pub mod tiers;

use std::any::{type_name, Any, TypeId};
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use tracing::debug;

/// Errors that can occur during dependency resolution
#[derive(Debug, thiserror::Error)]
pub enum ContainerError {
    #[error("Service not registered: {service_type}")]
    ServiceNotRegistered { service_type: String },

    #[error("Service type mismatch for {service_type}")]
    TypeMismatch { service_type: String },

    #[error("Factory for {service_type} failed: {message}")]
    FactoryFailed {
        service_type: String,
        message: String,
    },
}

pub type DiResult<T> = Result<T, ContainerError>;

type Shared = Arc<dyn Any + Send + Sync>;
type Factory = Arc<dyn Fn(&Container) -> DiResult<Shared> + Send + Sync>;

fn not_registered<T: ?Sized>() -> ContainerError {
    ContainerError::ServiceNotRegistered {
        service_type: type_name::<T>().to_string(),
    }
}

fn type_mismatch<T: ?Sized>() -> ContainerError {
    ContainerError::TypeMismatch {
        service_type: type_name::<T>().to_string(),
    }
}

/// One tier of the service registry
pub struct Container {
    name: &'static str,
    parent: Option<Arc<Container>>,
    instances: RwLock<HashMap<TypeId, Shared>>,
    factories: RwLock<HashMap<TypeId, Factory>>,
}

impl Container {
    /// Create a root container with no parent
    pub fn root(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            parent: None,
            instances: RwLock::new(HashMap::new()),
            factories: RwLock::new(HashMap::new()),
        })
    }

    /// Create a child tier that falls back to `self` on lookup misses
    pub fn child(self: &Arc<Self>, name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            parent: Some(self.clone()),
            instances: RwLock::new(HashMap::new()),
            factories: RwLock::new(HashMap::new()),
        })
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn parent(&self) -> Option<&Arc<Container>> {
        self.parent.as_ref()
    }

    fn already_registered(&self, key: &TypeId) -> bool {
        self.instances.read().unwrap().contains_key(key)
            || self.factories.read().unwrap().contains_key(key)
    }

    /// Register a lazily constructed singleton
    ///
    /// The factory runs at most once, on first resolution, and may
    /// resolve other services from this container or its parents. A
    /// repeated registration of the same type is a no-op.
    pub fn register<T, F>(&self, factory: F)
    where
        T: Send + Sync + 'static,
        F: Fn(&Container) -> DiResult<Arc<T>> + Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        if self.already_registered(&key) {
            debug!(tier = self.name, service = type_name::<T>(), "already registered");
            return;
        }
        let wrapped: Factory = Arc::new(move |container| {
            let instance = factory(container)?;
            Ok(instance as Shared)
        });
        self.factories.write().unwrap().entry(key).or_insert(wrapped);
        debug!(tier = self.name, service = type_name::<T>(), "registered factory");
    }

    /// Register an already-built singleton instance
    pub fn register_instance<T>(&self, instance: Arc<T>)
    where
        T: Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        if self.already_registered(&key) {
            debug!(tier = self.name, service = type_name::<T>(), "already registered");
            return;
        }
        self.instances
            .write()
            .unwrap()
            .entry(key)
            .or_insert(instance as Shared);
        debug!(tier = self.name, service = type_name::<T>(), "registered instance");
    }

    /// Register a trait object, keyed by its `Arc<dyn Trait>` type
    pub fn register_trait<T>(&self, instance: Arc<T>)
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = TypeId::of::<Arc<T>>();
        if self.already_registered(&key) {
            debug!(tier = self.name, service = type_name::<T>(), "already registered");
            return;
        }
        self.instances
            .write()
            .unwrap()
            .entry(key)
            .or_insert(Arc::new(instance) as Shared);
        debug!(tier = self.name, service = type_name::<T>(), "registered trait object");
    }

    /// Resolve a concrete singleton, walking the parent chain on a miss
    pub fn resolve<T>(&self) -> DiResult<Arc<T>>
    where
        T: Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        if let Some(found) = self.instances.read().unwrap().get(&key).cloned() {
            return found.downcast::<T>().map_err(|_| type_mismatch::<T>());
        }

        // Clone the factory out so it runs without any lock held; it
        // may recurse into this container for its own dependencies.
        let factory = self.factories.read().unwrap().get(&key).cloned();
        if let Some(factory) = factory {
            let produced = factory(self)?;
            let stored = self
                .instances
                .write()
                .unwrap()
                .entry(key)
                .or_insert(produced)
                .clone();
            return stored.downcast::<T>().map_err(|_| type_mismatch::<T>());
        }

        match &self.parent {
            Some(parent) => parent.resolve::<T>(),
            None => Err(not_registered::<T>()),
        }
    }

    /// Resolve a trait object registered with [`Container::register_trait`]
    pub fn resolve_trait<T>(&self) -> DiResult<Arc<T>>
    where
        T: ?Sized + Send + Sync + 'static,
    {
        let key = TypeId::of::<Arc<T>>();
        if let Some(found) = self.instances.read().unwrap().get(&key).cloned() {
            let arc = found
                .downcast::<Arc<T>>()
                .map_err(|_| type_mismatch::<T>())?;
            return Ok((*arc).clone());
        }
        match &self.parent {
            Some(parent) => parent.resolve_trait::<T>(),
            None => Err(not_registered::<T>()),
        }
    }

    /// Whether this container or an ancestor can resolve `T`
    pub fn is_registered<T>(&self) -> bool
    where
        T: Send + Sync + 'static,
    {
        let key = TypeId::of::<T>();
        if self.already_registered(&key) {
            return true;
        }
        self.parent
            .as_ref()
            .map(|parent| parent.is_registered::<T>())
            .unwrap_or(false)
    }

    /// Number of services registered in this tier alone
    pub fn service_count(&self) -> usize {
        self.instances.read().unwrap().len() + self.factories.read().unwrap().len()
    }
}
