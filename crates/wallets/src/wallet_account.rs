//! Wallet account implementation.
//!
//! This module provides the wallet account trait and a standard in-memory
//! implementation backed by a bare [`KeyPair`]. Accounts here never touch
//! disk: they either hold a key pair (ready to sign) or are watch-only
//! (script hash and optional contract only, no signing capability).

use crate::{contract::Contract, key_pair::KeyPair, Error, Result};
use async_trait::async_trait;
use neo_core::{Transaction, UInt160, Witness};

/// The base trait for wallet accounts.
#[async_trait]
pub trait WalletAccount: Send + Sync {
    /// The script hash of the account.
    fn script_hash(&self) -> UInt160;

    /// The address of the account.
    fn address(&self) -> String;

    /// The label of the account.
    fn label(&self) -> Option<&str>;

    /// Sets the label of the account.
    fn set_label(&mut self, label: Option<String>);

    /// Indicates whether the account has a key.
    fn has_key(&self) -> bool;

    /// Gets the key pair of the account.
    fn get_key(&self) -> Option<KeyPair>;

    /// Gets the contract of the account.
    fn get_contract(&self) -> Option<&Contract>;

    /// Signs the specified data.
    async fn sign(&self, data: &[u8]) -> Result<Vec<u8>>;

    /// Signs the specified transaction.
    async fn sign_transaction(&self, transaction: &Transaction) -> Result<Witness>;

    /// Exports the account to WIF format.
    async fn export_wif(&self) -> Result<String>;

    /// Verifies a signature against data.
    async fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool>;

    /// Indicates whether this is a watch-only account.
    fn is_watch_only(&self) -> bool {
        !self.has_key()
    }

    /// Indicates whether this is a multi-signature account.
    fn is_multi_sig(&self) -> bool {
        if let Some(contract) = self.get_contract() {
            contract.is_multi_sig()
        } else {
            false
        }
    }

    /// Gets the public key of the account (if available).
    fn get_public_key(&self) -> Option<Vec<u8>> {
        self.get_key().map(|key| key.public_key())
    }
}

/// A concrete implementation of WalletAccount.
#[derive(Debug, Clone)]
pub struct StandardWalletAccount {
    script_hash: UInt160,
    label: Option<String>,
    key_pair: Option<KeyPair>,
    contract: Option<Contract>,
}

impl StandardWalletAccount {
    /// Creates a new wallet account with a key pair.
    pub fn new_with_key(key_pair: KeyPair, contract: Option<Contract>) -> Self {
        // Always use the KeyPair's script hash for consistency with the Neo protocol implementation
        let script_hash = key_pair.get_script_hash();

        Self {
            script_hash,
            label: None,
            key_pair: Some(key_pair),
            contract,
        }
    }

    /// Creates a new watch-only wallet account.
    pub fn new_watch_only(script_hash: UInt160, contract: Option<Contract>) -> Self {
        Self {
            script_hash,
            label: None,
            key_pair: None,
            contract,
        }
    }
}

#[async_trait]
impl WalletAccount for StandardWalletAccount {
    fn script_hash(&self) -> UInt160 {
        self.script_hash
    }

    fn address(&self) -> String {
        // Convert script hash to Neo address format
        self.script_hash.to_address()
    }

    fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    fn set_label(&mut self, label: Option<String>) {
        self.label = label;
    }

    fn has_key(&self) -> bool {
        self.key_pair.is_some()
    }

    fn get_key(&self) -> Option<KeyPair> {
        self.key_pair.clone()
    }

    fn get_contract(&self) -> Option<&Contract> {
        self.contract.as_ref()
    }

    async fn sign(&self, data: &[u8]) -> Result<Vec<u8>> {
        if let Some(ref key_pair) = self.key_pair {
            key_pair.sign(data)
        } else {
            Err(Error::AccountLocked)
        }
    }

    async fn sign_transaction(&self, transaction: &Transaction) -> Result<Witness> {
        if let Some(ref key_pair) = self.key_pair {
            let signature = key_pair.sign(&transaction.get_hash_data())?;

            // Create witness based on contract type
            if let Some(ref contract) = self.contract {
                contract.create_witness(signature)
            } else {
                // Standard single-signature witness
                Ok(Witness::new_with_scripts(
                    vec![0x0c, 0x40] // PUSHDATA1 64 bytes
                        .into_iter()
                        .chain(signature)
                        .collect(),
                    key_pair.get_verification_script(),
                ))
            }
        } else {
            Err(Error::AccountLocked)
        }
    }

    async fn export_wif(&self) -> Result<String> {
        if let Some(ref key_pair) = self.key_pair {
            Ok(key_pair.to_wif())
        } else {
            Err(Error::AccountLocked)
        }
    }

    async fn verify(&self, data: &[u8], signature: &[u8]) -> Result<bool> {
        if let Some(ref key_pair) = self.key_pair {
            key_pair.verify(data, signature)
        } else {
            Err(Error::AccountLocked)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn watch_only_account_cannot_sign() {
        let account = StandardWalletAccount::new_watch_only(UInt160::new(), None);
        assert!(!account.has_key());
        assert!(account.is_watch_only());
        assert!(account.sign(b"data").await.is_err());
    }

    #[tokio::test]
    async fn keyed_account_signs_and_verifies() {
        let key_pair = KeyPair::generate().unwrap();
        let expected_hash = key_pair.get_script_hash();
        let account = StandardWalletAccount::new_with_key(key_pair, None);

        assert_eq!(account.script_hash(), expected_hash);
        assert!(account.has_key());

        let signature = account.sign(b"hello").await.unwrap();
        assert!(account.verify(b"hello", &signature).await.unwrap());
    }
}
