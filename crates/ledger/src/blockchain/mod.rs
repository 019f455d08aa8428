//! Blockchain module.
//!
//! This module provides the main blockchain facade: header/transaction
//! verification, snapshot-based persistence, and chain-state bookkeeping.
//! - storage: Storage interface and implementation
//! - genesis: Genesis block creation and initialization
//! - verification: Block, header, and transaction verification
//! - persistence: Block persistence and storage management
//! - state: Blockchain state management
//! - blockchain: Main Blockchain struct

pub mod advanced_validation;
pub mod blockchain;
pub mod execution;
pub mod genesis;
pub mod import;
pub mod persistence;
pub mod state;
pub mod storage;
pub mod validation;
pub mod verification;

pub use blockchain::{Blockchain, BlockchainStats};
pub use execution::{ApplicationExecuted, ExecutedNotification};
pub use genesis::GenesisManager;
pub use persistence::{
    BlockchainPersistence, BlockchainSnapshot, CommittedHandler, CommittingHandler,
};
pub use state::{BlockchainState, PolicySettings};
pub use storage::{RocksDBStorage, Storage, StorageItem, StorageKey, StorageProvider};
pub use verification::{BlockchainVerifier, VerifyResult};
