use std::sync::Arc;

use orbita_core::error::DomainError;
use orbita_core::models::entitlement::{EntitlementSource, Module};
use orbita_core::repositories::memory::InMemoryEntitlementRepository;
use orbita_core::services::entitlement::EntitlementGate;

#[tokio::test]
async fn fresh_user_is_granted_every_module_until_any_row_exists() {
    let repo = Arc::new(InMemoryEntitlementRepository::default());
    let gate = EntitlementGate::new(Arc::clone(&repo) as Arc<dyn orbita_core::repositories::EntitlementRepository>);

    assert!(gate.require("user-1", Module::SmartHabits).await.is_ok());
    assert!(gate.require("user-1", Module::Smart1to1).await.is_ok());

    repo.set("user-1", Module::SmartHabits, true, EntitlementSource::Trial)
        .await
        .unwrap();

    assert!(gate.require("user-1", Module::SmartHabits).await.is_ok());
    let blocked = gate.require("user-1", Module::Smart1to1).await;
    assert!(matches!(blocked, Err(DomainError::EntitlementRequired { .. })));
}
