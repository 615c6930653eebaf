use thiserror::Error;
use tracing::warn;

/// Result alias used throughout the core.
pub type DomainResult<T> = Result<T, DomainError>;

/// The error taxonomy from the core's design: kinds, not type names.
/// Every variant maps 1:1 onto an outbound response at the application
/// edge; infrastructure errors must be wrapped without losing their kind.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    #[error("invalid input: {message}")]
    InvalidInput { message: String },

    #[error("{entity} not found: {id}")]
    NotFound { entity: &'static str, id: String },

    #[error("conflict with existing block(s): {conflicting_ids:?}")]
    Conflict { conflicting_ids: Vec<String> },

    #[error("illegal transition: {message}")]
    IllegalTransition { message: String },

    #[error("no slot available for item {item_id}")]
    NoSlot { item_id: String },

    #[error("module '{module}' requires an active entitlement")]
    EntitlementRequired { module: String },

    #[error("external dependency unavailable: {message}")]
    ExternalUnavailable { message: String },

    #[error("internal error: {message}")]
    Internal { message: String },
}

impl DomainError {
    pub fn invalid_input(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "orbita::validation", %message, "invalid input");
        DomainError::InvalidInput { message }
    }

    pub fn not_found(entity: &'static str, id: impl Into<String>) -> Self {
        let id = id.into();
        warn!(target: "orbita::lookup", entity, %id, "entity not found");
        DomainError::NotFound { entity, id }
    }

    pub fn conflict(conflicting_ids: Vec<String>) -> Self {
        warn!(target: "orbita::schedule", ids = ?conflicting_ids, "block conflict");
        DomainError::Conflict { conflicting_ids }
    }

    pub fn illegal_transition(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "orbita::schedule", %message, "illegal transition");
        DomainError::IllegalTransition { message }
    }

    pub fn no_slot(item_id: impl Into<String>) -> Self {
        let item_id = item_id.into();
        warn!(target: "orbita::scheduler", item_id = %item_id, "no slot found");
        DomainError::NoSlot { item_id }
    }

    pub fn entitlement_required(module: impl Into<String>) -> Self {
        let module = module.into();
        warn!(target: "orbita::entitlement", %module, "entitlement required");
        DomainError::EntitlementRequired { module }
    }

    pub fn external_unavailable(message: impl Into<String>) -> Self {
        let message = message.into();
        warn!(target: "orbita::external", %message, "external dependency unavailable");
        DomainError::ExternalUnavailable { message }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        let message = message.into();
        tracing::error!(target: "orbita::internal", %message, "internal error");
        DomainError::Internal { message }
    }
}
