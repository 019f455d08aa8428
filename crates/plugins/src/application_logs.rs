//! Records a per-block, per-transaction log of VM execution outcomes as
//! blocks are committed, keyed for later lookup by transaction or block
//! hash. This is the reference consumer of [`crate::NodePlugin`]: it
//! attaches as a committing handler and never touches ledger state itself.

use std::num::NonZeroUsize;
use std::sync::Mutex;

use async_trait::async_trait;
use lru::LruCache;
use neo_core::{UInt160, UInt256};
use neo_ledger::{ApplicationExecuted, Block, Result};
use tracing::debug;

use crate::NodePlugin;

/// One transaction's (or the block's own) recorded VM outcome.
#[derive(Debug, Clone)]
pub struct Execution {
    pub trigger: String,
    pub vm_state: String,
    pub exception: Option<String>,
    pub gas_consumed: i64,
    pub notifications: Vec<Notification>,
}

impl From<&ApplicationExecuted> for Execution {
    fn from(executed: &ApplicationExecuted) -> Self {
        Self {
            trigger: executed.trigger.clone(),
            vm_state: executed.vm_state.clone(),
            exception: executed.exception.clone(),
            gas_consumed: executed.gas_consumed,
            notifications: executed
                .notifications
                .iter()
                .map(|n| Notification {
                    contract: n.contract,
                    event_name: n.event_name.clone(),
                })
                .collect(),
        }
    }
}

/// A contract notification raised during an execution.
#[derive(Debug, Clone)]
pub struct Notification {
    pub contract: UInt160,
    pub event_name: String,
}

/// Log entry for one block: its own `OnPersist`/`PostPersist` executions
/// plus one entry per transaction it contained.
#[derive(Debug, Clone)]
pub struct ApplicationLog {
    pub block_hash: UInt256,
    pub block_index: u32,
    pub block_time: u64,
    pub transactions: Vec<UInt256>,
    pub executions: Vec<Execution>,
}

const DEFAULT_CAPACITY: usize = 10_000;

/// In-memory, LRU-bounded application-log store.
///
/// Real deployments would persist these to disk through an RPC-facing
/// service; that service is out of scope here; this plugin only keeps the
/// bound in-memory map described in the design notes, which is enough for
/// a running node to answer "what happened to this block/transaction"
/// queries from an in-process caller.
pub struct ApplicationLogsPlugin {
    by_block: Mutex<LruCache<UInt256, ApplicationLog>>,
    by_transaction: Mutex<LruCache<UInt256, UInt256>>,
}

impl ApplicationLogsPlugin {
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = NonZeroUsize::new(capacity).unwrap_or(NonZeroUsize::new(1).unwrap());
        Self {
            by_block: Mutex::new(LruCache::new(capacity)),
            by_transaction: Mutex::new(LruCache::new(capacity)),
        }
    }

    pub fn log_for_block(&self, block_hash: &UInt256) -> Option<ApplicationLog> {
        self.by_block.lock().unwrap().get(block_hash).cloned()
    }

    pub fn log_for_transaction(&self, tx_hash: &UInt256) -> Option<ApplicationLog> {
        let block_hash = *self.by_transaction.lock().unwrap().get(tx_hash)?;
        self.log_for_block(&block_hash)
    }
}

impl Default for ApplicationLogsPlugin {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl NodePlugin for ApplicationLogsPlugin {
    fn name(&self) -> &str {
        "ApplicationLogs"
    }

    async fn on_committing(&self, _block: &Block, _executions: &[ApplicationExecuted]) -> Result<()> {
        Ok(())
    }

    async fn on_committed(&self, block: &Block, executions: &[ApplicationExecuted]) {
        let block_hash = block.hash();
        let transactions: Vec<UInt256> = block
            .transactions
            .iter()
            .filter_map(|tx| tx.hash().ok())
            .collect();

        let log = ApplicationLog {
            block_hash,
            block_index: block.index(),
            block_time: block.timestamp(),
            transactions: transactions.clone(),
            executions: executions.iter().map(Execution::from).collect(),
        };

        let mut by_block = self.by_block.lock().unwrap();
        by_block.put(block_hash, log);
        drop(by_block);

        let mut by_transaction = self.by_transaction.lock().unwrap();
        for tx_hash in transactions {
            by_transaction.put(tx_hash, block_hash);
        }
        drop(by_transaction);

        debug!(height = block.index(), "recorded application log for block");
    }
}
