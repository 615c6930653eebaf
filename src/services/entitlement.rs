use std::sync::Arc;

use tracing::debug;

use crate::error::{DomainError, DomainResult};
use crate::models::entitlement::Module;
use crate::repositories::EntitlementRepository;

/// Synchronous-semantics gate invoked by any premium operation. "Require"
/// returns Ok(()) or a typed `EntitlementRequired` refusal — callers
/// never get to run the gated operation without consulting this first.
pub struct EntitlementGate {
    repository: Arc<dyn EntitlementRepository>,
}

impl EntitlementGate {
    pub fn new(repository: Arc<dyn EntitlementRepository>) -> Self {
        Self { repository }
    }

    /// If the entitlement store reports zero records for the user,
    /// grants every module (default-allow bootstrap for first-run/local
    /// mode). Otherwise requires the specific (user, module) record to
    /// exist and be active.
    pub async fn require(&self, user_id: &str, module: Module) -> DomainResult<()> {
        let records = self.repository.list(user_id).await?;
        if records.is_empty() {
            debug!(user_id, module = module.as_str(), "default-allow: no entitlement rows");
            return Ok(());
        }

        let active = self.repository.is_active(user_id, module).await?;
        if active {
            Ok(())
        } else {
            Err(DomainError::entitlement_required(module.as_str()))
        }
    }
}
