use serde::{Deserialize, Serialize};

/// Closed set of modules any premium core subsystem gates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Module {
    SmartHabits,
    Smart1to1,
    AdaptiveFrequency,
    AutoRescheduler,
    AiInbox,
    PriorityEngine,
}

impl Module {
    pub fn as_str(&self) -> &'static str {
        match self {
            Module::SmartHabits => "smart-habits",
            Module::Smart1to1 => "smart-1to1",
            Module::AdaptiveFrequency => "adaptive-frequency",
            Module::AutoRescheduler => "auto-rescheduler",
            Module::AiInbox => "ai-inbox",
            Module::PriorityEngine => "priority-engine",
        }
    }
}

/// Where an entitlement grant originated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EntitlementSource {
    Manual,
    Trial,
    License,
    Stripe,
}

/// A (user, module, active, source) tuple authorizing a premium core
/// subsystem.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Entitlement {
    pub user_id: String,
    pub module: Module,
    pub active: bool,
    pub source: EntitlementSource,
}
