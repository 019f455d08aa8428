//! Storage module for smart contracts.
//!
//! Provides key-value storage functionality for smart contracts.

pub mod storage_item;
pub mod storage_key;

pub use storage_item::StorageItem;
pub use storage_key::StorageKey;
