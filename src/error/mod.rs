mod router_error;
mod service_error;

pub use router_error::{RouterError, RouterResult};
pub use service_error::{ServiceError, ServiceResult};
