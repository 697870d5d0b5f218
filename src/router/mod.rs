//! Routing of notification URLs to services.
//!
//! A raw URL is parsed into a [`ServiceUrl`], its scheme is resolved through
//! the [`ServiceRegistry`], the router's logging sink is bound to the located
//! service, and the send is delegated.

pub mod address;
pub mod registry;
#[allow(clippy::module_inception)]
pub mod router;
pub mod sink;

pub use address::ServiceUrl;
pub use registry::{RegistryBuilder, ServiceRegistry};
pub use router::{LocatedService, ServiceRouter};
pub use sink::{DiscardSink, LogEntry, LogSink, MemorySink, ServiceLogger, SharedSink, TracingSink};
