//! Service router: resolves a notification URL to its service and delegates
//! the send.

use std::fmt;
use std::sync::{Arc, PoisonError, RwLock};

use tracing::{debug, instrument};

use crate::error::{RouterError, RouterResult};
use crate::router::address::ServiceUrl;
use crate::router::registry::ServiceRegistry;
use crate::router::sink::{DiscardSink, ServiceLogger, SharedSink};
use crate::services::{SendOptions, Service};

/// Routes messages to notification services using the notification URL.
///
/// The registry is immutable after construction. The logging sink is the
/// only mutable state: it is replaced as a whole by
/// [`set_logging_sink`](Self::set_logging_sink) and the last writer wins.
/// Concurrent callers share the sink; there is no per-call isolation.
pub struct ServiceRouter {
    registry: ServiceRegistry,
    sink: RwLock<SharedSink>,
}

impl ServiceRouter {
    /// Creates a router over `registry` with a discarding sink
    pub fn new(registry: ServiceRegistry) -> Self {
        Self::with_sink(registry, Arc::new(DiscardSink))
    }

    pub fn with_sink(registry: ServiceRegistry, sink: SharedSink) -> Self {
        Self {
            registry,
            sink: RwLock::new(sink),
        }
    }

    /// Router over every service shipped with this crate
    pub fn with_builtin_services() -> Self {
        Self::new(ServiceRegistry::builtin())
    }

    pub fn registry(&self) -> &ServiceRegistry {
        &self.registry
    }

    /// Registered schemes in sorted order
    pub fn schemes(&self) -> Vec<&str> {
        self.registry.schemes()
    }

    /// Replaces the sink handed to services located from now on
    pub fn set_logging_sink(&self, sink: SharedSink) {
        *self.sink.write().unwrap_or_else(PoisonError::into_inner) = sink;
    }

    /// The sink currently handed to located services
    pub fn logging_sink(&self) -> SharedSink {
        self.sink
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Splits a raw notification URL into its scheme and parsed URL
    pub fn extract_service_name(&self, raw: &str) -> RouterResult<(String, ServiceUrl)> {
        let url = ServiceUrl::parse(raw)?;
        Ok((url.scheme().to_string(), url))
    }

    /// Returns the service registered for `scheme`, bound to the current sink
    ///
    /// # Errors
    /// `RouterError::UnknownScheme` when no service is registered for the
    /// lowercase form of `scheme`.
    pub fn locate(&self, scheme: &str) -> RouterResult<LocatedService> {
        let service = self
            .registry
            .get(scheme)
            .ok_or_else(|| RouterError::UnknownScheme {
                scheme: scheme.to_string(),
            })?;

        Ok(LocatedService {
            scheme: scheme.to_lowercase(),
            service,
            sink: self.logging_sink(),
        })
    }

    /// Routes `message` to the service selected by the scheme of `raw`
    ///
    /// Parses, locates and sends; the first failure is returned as is.
    #[instrument(skip_all, fields(scheme = tracing::field::Empty))]
    pub async fn route(&self, raw: &str, message: &str, opts: &SendOptions) -> RouterResult<()> {
        let (scheme, url) = self.extract_service_name(raw)?;
        tracing::Span::current().record("scheme", scheme.as_str());

        let service = self.locate(&scheme)?;
        service.send(&url, message, opts).await
    }

    /// Checks that `raw` parses, resolves and configures its service
    pub fn verify(&self, raw: &str) -> RouterResult<()> {
        let (scheme, url) = self.extract_service_name(raw)?;
        let service = self.locate(&scheme)?;
        service.validate(&url)
    }
}

impl Default for ServiceRouter {
    fn default() -> Self {
        Self::with_builtin_services()
    }
}

impl fmt::Debug for ServiceRouter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceRouter")
            .field("registry", &self.registry)
            .finish_non_exhaustive()
    }
}

/// A service resolved by the router together with the sink in effect at
/// lookup time
#[derive(Clone)]
pub struct LocatedService {
    scheme: String,
    service: Arc<dyn Service>,
    sink: SharedSink,
}

impl LocatedService {
    /// Lowercase scheme the service was found under
    pub fn scheme(&self) -> &str {
        &self.scheme
    }

    pub fn service(&self) -> &Arc<dyn Service> {
        &self.service
    }

    pub fn sink(&self) -> &SharedSink {
        &self.sink
    }

    /// Sends through the service using the bound sink
    ///
    /// Service failures come back as `RouterError::Delivery` with the
    /// service error as source.
    pub async fn send(&self, url: &ServiceUrl, message: &str, opts: &SendOptions) -> RouterResult<()> {
        let logger = ServiceLogger::new(self.sink.clone(), self.scheme.clone());

        debug!(scheme = %self.scheme, "Delegating message to service");
        self.service
            .send(url, message, opts, &logger)
            .await
            .map_err(|source| RouterError::Delivery {
                scheme: self.scheme.clone(),
                source,
            })?;
        debug!(scheme = %self.scheme, "Service accepted message");

        Ok(())
    }

    /// Validates the service configuration carried by `url`
    pub fn validate(&self, url: &ServiceUrl) -> RouterResult<()> {
        self.service
            .validate_url(url)
            .map_err(|source| RouterError::Configuration {
                scheme: self.scheme.clone(),
                source,
            })
    }
}

impl fmt::Debug for LocatedService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LocatedService")
            .field("scheme", &self.scheme)
            .field("service", &self.service.name())
            .finish_non_exhaustive()
    }
}
