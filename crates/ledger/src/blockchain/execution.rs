//! Records of a single application-engine run, produced by the block-persist
//! pipeline and handed to committing/committed handlers before a block lands
//! in storage.

use neo_core::{UInt160, UInt256};

/// A contract notification raised during one execution.
#[derive(Debug, Clone)]
pub struct ExecutedNotification {
    pub contract: UInt160,
    pub event_name: String,
}

/// The outcome of running the `OnPersist`/`PostPersist` hooks or one
/// transaction's script through an application engine.
///
/// `transaction_hash` is `None` for the block-level `OnPersist`/`PostPersist`
/// runs and `Some` for a transaction's own `Application`-trigger run.
#[derive(Debug, Clone)]
pub struct ApplicationExecuted {
    pub transaction_hash: Option<UInt256>,
    pub trigger: String,
    pub vm_state: String,
    pub gas_consumed: i64,
    pub notifications: Vec<ExecutedNotification>,
    pub exception: Option<String>,
}

impl ApplicationExecuted {
    pub fn faulted(transaction_hash: Option<UInt256>, trigger: &str, exception: String) -> Self {
        Self {
            transaction_hash,
            trigger: trigger.to_string(),
            vm_state: "FAULT".to_string(),
            gas_consumed: 0,
            notifications: Vec::new(),
            exception: Some(exception),
        }
    }
}
