//! Committing/committed extension points for the blockchain persist pipeline.
//!
//! A [`NodePlugin`] is the in-process equivalent of the source's plugin
//! loader, scoped down to what a single node binary needs: no dynamic
//! library loading, no marketplace, just a short list of handlers that
//! observe (and can veto) every block as it is persisted.

pub mod application_logs;

use std::sync::Arc;

use async_trait::async_trait;
use neo_ledger::{ApplicationExecuted, Block, CommittedHandler, CommittingHandler, Result};

pub use application_logs::{ApplicationLog, ApplicationLogsPlugin, Execution, Notification};

/// A plugin observing the blockchain facade's persist pipeline.
///
/// `on_committing` runs before the snapshot commits and may abort
/// persistence by returning an error; `on_committed` runs after and cannot.
/// Both see the `ApplicationExecuted` record for the block's `OnPersist`
/// hook, every transaction, and `PostPersist`, in that order.
#[async_trait]
pub trait NodePlugin: Send + Sync {
    /// Short identifier used in logs and diagnostics.
    fn name(&self) -> &str;

    async fn on_committing(&self, block: &Block, executions: &[ApplicationExecuted]) -> Result<()>;

    async fn on_committed(&self, block: &Block, executions: &[ApplicationExecuted]);
}

/// Adapts a [`NodePlugin`] trait object to the ledger crate's handler traits
/// so it can be registered on a [`neo_ledger::BlockchainPersistence`]
/// without the plugin needing to depend on the handler traits itself.
struct PluginBridge(Arc<dyn NodePlugin>);

#[async_trait]
impl CommittingHandler for PluginBridge {
    async fn on_committing(&self, block: &Block, executions: &[ApplicationExecuted]) -> Result<()> {
        self.0.on_committing(block, executions).await
    }
}

#[async_trait]
impl CommittedHandler for PluginBridge {
    async fn on_committed(&self, block: &Block, executions: &[ApplicationExecuted]) {
        self.0.on_committed(block, executions).await
    }
}

/// Holds the plugins a node was started with and attaches them to a
/// blockchain facade's committing/committed handler registry.
#[derive(Default)]
pub struct PluginRegistry {
    plugins: Vec<Arc<dyn NodePlugin>>,
}

impl PluginRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register(&mut self, plugin: Arc<dyn NodePlugin>) {
        self.plugins.push(plugin);
    }

    pub fn names(&self) -> Vec<&str> {
        self.plugins.iter().map(|p| p.name()).collect()
    }

    /// Attaches every registered plugin to `persistence` as a committing and
    /// committed handler pair, in registration order.
    pub async fn attach(&self, persistence: &neo_ledger::BlockchainPersistence) {
        for plugin in &self.plugins {
            let bridge = Arc::new(PluginBridge(plugin.clone()));
            persistence.add_committing_handler(bridge.clone()).await;
            persistence.add_committed_handler(bridge).await;
        }
    }
}
