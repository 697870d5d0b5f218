//! Services command handler

use crate::router::ServiceRouter;

/// Lists the schemes the router can deliver to
pub struct ServicesCommandHandler<'a> {
    router: &'a ServiceRouter,
}

impl<'a> ServicesCommandHandler<'a> {
    pub fn new(router: &'a ServiceRouter) -> Self {
        Self { router }
    }

    /// One scheme per line, sorted
    pub fn execute(&self) -> String {
        self.router
            .schemes()
            .iter()
            .map(|scheme| format!("{}\n", scheme))
            .collect()
    }
}
