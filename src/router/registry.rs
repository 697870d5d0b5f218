use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::error::{RouterError, RouterResult};
use crate::router::address::is_valid_scheme;
use crate::services::{self, Service};

/// Mapping from lowercase scheme to service implementation.
///
/// Read-only once built; clone it to share the same service instances.
#[derive(Clone, Default)]
pub struct ServiceRegistry {
    services: HashMap<String, Arc<dyn Service>>,
}

impl ServiceRegistry {
    /// Starts an empty registry builder
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::default()
    }

    /// Registry holding every service shipped with this crate
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        for service in services::builtin_services() {
            let previous = registry
                .services
                .insert(service.name().to_lowercase(), service);
            debug_assert!(previous.is_none(), "built-in service names must be unique");
        }
        registry
    }

    /// Looks up a service, ignoring the scheme's case
    pub fn get(&self, scheme: &str) -> Option<Arc<dyn Service>> {
        self.services.get(&scheme.to_lowercase()).cloned()
    }

    pub fn contains(&self, scheme: &str) -> bool {
        self.services.contains_key(&scheme.to_lowercase())
    }

    /// Registered schemes in sorted order
    pub fn schemes(&self) -> Vec<&str> {
        let mut schemes: Vec<&str> = self.services.keys().map(String::as_str).collect();
        schemes.sort_unstable();
        schemes
    }

    pub fn len(&self) -> usize {
        self.services.len()
    }

    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    /// Reopens the registry for further registrations
    pub fn into_builder(self) -> RegistryBuilder {
        RegistryBuilder {
            services: self.services,
        }
    }
}

impl fmt::Debug for ServiceRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRegistry")
            .field("schemes", &self.schemes())
            .finish()
    }
}

/// Builder for [`ServiceRegistry`] that rejects duplicate schemes
#[derive(Default)]
pub struct RegistryBuilder {
    services: HashMap<String, Arc<dyn Service>>,
}

impl RegistryBuilder {
    /// Registers `service` under `scheme`
    ///
    /// # Errors
    /// `RouterError::DuplicateScheme` if the scheme, compared case-insensitively,
    /// is already taken; `RouterError::MalformedAddress` if it is not a valid
    /// URL scheme.
    pub fn register(mut self, scheme: &str, service: Arc<dyn Service>) -> RouterResult<Self> {
        if !is_valid_scheme(scheme) {
            return Err(RouterError::malformed(
                scheme,
                format!("invalid scheme '{}'", scheme),
            ));
        }

        let key = scheme.to_lowercase();
        if self.services.contains_key(&key) {
            return Err(RouterError::DuplicateScheme { scheme: key });
        }

        self.services.insert(key, service);
        Ok(self)
    }

    /// Registers `service` under its own name
    pub fn register_service(self, service: Arc<dyn Service>) -> RouterResult<Self> {
        let name = service.name();
        self.register(name, service)
    }

    pub fn build(self) -> ServiceRegistry {
        ServiceRegistry {
            services: self.services,
        }
    }
}
