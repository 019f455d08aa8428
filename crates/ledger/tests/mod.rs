//! Ledger the Neo protocol Compatibility Test Suite
//!
//! This module contains comprehensive tests that ensure full compatibility
//! with the the reference.Ledger implementation.

mod blockchain_tests;
mod integration_tests;
mod mempool_tests;
mod storage_tests;
