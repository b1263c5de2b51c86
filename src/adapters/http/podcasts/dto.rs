//! HTTP DTOs for podcast endpoints.

use serde::Serialize;

use crate::application::handlers::access::AccessVerdict;

/// Response for an episode access check.
#[derive(Debug, Clone, Serialize)]
pub struct AccessResponse {
    pub has_full_access: bool,
}

impl From<AccessVerdict> for AccessResponse {
    fn from(verdict: AccessVerdict) -> Self {
        Self {
            has_full_access: verdict.has_full_access,
        }
    }
}
