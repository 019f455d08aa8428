//! Native contracts module.
//!
//! This module provides the built-in native contracts for the Neo blockchain,
//! including NEO, GAS, Policy, and other system contracts.

pub mod contract_management;
pub mod crypto_lib;
pub mod fungible_token;
pub mod gas_token;
pub mod governance_types;
pub mod ledger_contract;
pub mod native_contract;
pub mod neo_token;
pub mod oracle_contract;
pub mod policy_contract;
pub mod role_management;
pub mod std_lib;

pub use contract_management::ContractManagement;
pub use crypto_lib::CryptoLib;
pub use gas_token::GasToken;
pub use ledger_contract::LedgerContract;
pub use native_contract::{NativeContract, NativeMethod};
pub use neo_token::NeoToken;
pub use oracle_contract::{OracleContract, OracleRequest, OracleResponse};
pub use policy_contract::PolicyContract;
pub use role_management::{Role, RoleManagement};
pub use std_lib::StdLib;

use neo_core::UInt160;
use std::collections::HashMap;

/// Registry for native contracts.
pub struct NativeRegistry {
    contracts: HashMap<UInt160, Box<dyn NativeContract>>,
}

impl NativeRegistry {
    /// Creates a new native contract registry.
    pub fn new() -> Self {
        let mut registry = Self::empty();

        // Register standard native contracts
        registry.register_standard_contracts();

        registry
    }

    /// Creates a registry with no contracts registered.
    ///
    /// Used to temporarily take a registry out of an `ApplicationEngine` while
    /// running hooks that need `&mut ApplicationEngine` alongside a borrowed
    /// contract reference (see `run_on_persist`/`run_post_persist`).
    pub fn empty() -> Self {
        Self {
            contracts: HashMap::new(),
        }
    }

    /// Registers a native contract.
    pub fn register(&mut self, contract: Box<dyn NativeContract>) {
        self.contracts.insert(contract.hash(), contract);
    }

    /// Gets a native contract by hash.
    pub fn get(&self, hash: &UInt160) -> Option<&dyn NativeContract> {
        self.contracts.get(hash).map(|c| c.as_ref())
    }

    /// Checks if a contract hash is a native contract.
    pub fn is_native(&self, hash: &UInt160) -> bool {
        self.contracts.contains_key(hash)
    }

    /// Gets all native contract hashes.
    pub fn all_hashes(&self) -> Vec<UInt160> {
        self.contracts.keys().copied().collect()
    }

    /// Iterates over all registered native contracts.
    pub fn contracts(&self) -> impl Iterator<Item = &dyn NativeContract> {
        self.contracts.values().map(|c| c.as_ref())
    }

    /// Iterates over all registered native contracts.
    ///
    /// Named to mirror callers that hold an exclusively-owned registry (taken
    /// out of an `ApplicationEngine` via `std::mem::take`) even though the
    /// `NativeContract` hook methods themselves only need `&self`.
    pub fn contracts_mut(&mut self) -> impl Iterator<Item = &dyn NativeContract> {
        self.contracts.values().map(|c| c.as_ref())
    }

    /// Registers standard Neo native contracts.
    fn register_standard_contracts(&mut self) {
        // Register NEO token contract
        self.register(Box::new(NeoToken::new()));

        // Register GAS token contract
        self.register(Box::new(GasToken::new()));

        // Register Policy contract
        self.register(Box::new(PolicyContract::new()));

        // Register RoleManagement contract
        self.register(Box::new(RoleManagement::new()));

        // Register StdLib contract
        self.register(Box::new(StdLib::new()));

        // Register CryptoLib contract
        self.register(Box::new(CryptoLib::new()));

        // Register Oracle contract
        self.register(Box::new(OracleContract::new()));

        // Register Ledger contract
        self.register(Box::new(LedgerContract::new()));

        // Register ContractManagement contract
        self.register(Box::new(ContractManagement::new()));
    }
}

impl Default for NativeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
