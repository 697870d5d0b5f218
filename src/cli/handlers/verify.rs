//! Verify command handler

use tracing::debug;

use super::report::{UrlFailure, UrlOutcome, UrlReport};
use crate::router::ServiceRouter;

/// Parses, locates and configures each URL without sending
pub struct VerifyCommandHandler<'a> {
    router: &'a ServiceRouter,
}

impl<'a> VerifyCommandHandler<'a> {
    pub fn new(router: &'a ServiceRouter) -> Self {
        Self { router }
    }

    pub fn execute(&self, urls: &[String]) -> UrlReport {
        let outcomes = urls
            .iter()
            .enumerate()
            .map(|(index, url)| {
                let scheme = self
                    .router
                    .extract_service_name(url)
                    .ok()
                    .map(|(scheme, _)| scheme);
                let result = self.router.verify(url).map_err(UrlFailure::from);
                debug!(position = index + 1, ok = result.is_ok(), "Verified service URL");

                UrlOutcome {
                    position: index + 1,
                    scheme,
                    result,
                }
            })
            .collect();

        UrlReport {
            action: "valid",
            outcomes,
        }
    }
}
