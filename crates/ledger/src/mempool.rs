//! Bounded, fee-prioritised transaction pool.
//!
//! Transactions land in an `unverified` tier on arrival. A maintenance loop
//! calls [`MemoryPool::reverify_transactions`] to run them through a
//! [`TxVerifier`] and promote the survivors into the verified tiers, from
//! which [`MemoryPool::get_sorted_transactions`] and
//! [`MemoryPool::get_transactions_for_block`] serve block construction.

use crate::{Error, Result};
use neo_core::{Transaction, UInt160, UInt256};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::{BTreeSet, HashMap, HashSet};
use std::sync::{Arc, RwLock};
use std::time::{Duration, SystemTime};
use tokio::sync::broadcast;
use tracing::debug;

/// Pool capacity and admission configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MempoolConfig {
    /// Maximum number of verified transactions (sorted + unsorted).
    pub max_verified: usize,
    /// Maximum number of transactions awaiting (re)verification.
    pub max_unverified: usize,
    /// Seconds a transaction may sit in the pool before it is expired.
    pub transaction_timeout: u64,
    /// Minimum fee-per-byte accepted into the pool.
    pub min_fee_per_byte: u64,
    /// Maximum serialized transaction size, in bytes.
    pub max_transaction_size: usize,
}

impl Default for MempoolConfig {
    fn default() -> Self {
        Self {
            max_verified: 50_000,
            max_unverified: 500,
            transaction_timeout: 120,
            min_fee_per_byte: 0,
            max_transaction_size: 102_400,
        }
    }
}

/// A transaction tracked by the pool, with its priority key cached.
#[derive(Debug, Clone)]
pub struct PooledTransaction {
    pub transaction: Transaction,
    pub received_at: SystemTime,
    pub fee_per_byte: u64,
    pub size: usize,
    pub senders: Vec<UInt160>,
}

impl PooledTransaction {
    pub fn new(transaction: Transaction) -> Result<Self> {
        let size = transaction.size();
        let fee_per_byte = if size > 0 {
            (transaction.network_fee().max(0) as u64) / size as u64
        } else {
            0
        };
        let senders = transaction.signers().iter().map(|s| s.account).collect();
        Ok(Self {
            transaction,
            received_at: SystemTime::now(),
            fee_per_byte,
            size,
            senders,
        })
    }

    pub fn hash(&self) -> Result<UInt256> {
        self.transaction.hash().map_err(|e| Error::MempoolError(e.to_string()))
    }

    pub fn is_expired(&self, timeout: Duration) -> bool {
        self.received_at.elapsed().unwrap_or(Duration::ZERO) > timeout
    }
}

/// Priority ordering key: higher fee-per-byte first, ties broken by hash so
/// ordering stays total and deterministic across nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PriorityKey {
    fee_per_byte: u64,
    hash: UInt256,
}

impl Ord for PriorityKey {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .fee_per_byte
            .cmp(&self.fee_per_byte)
            .then_with(|| self.hash.cmp(&other.hash))
    }
}
impl PartialOrd for PriorityKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Why a transaction left the pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionRemovalReason {
    /// Included in a persisted block.
    Block,
    /// Sat unverified/verified longer than the configured timeout.
    Expired,
    /// Superseded by a strictly-higher-fee conflicting transaction.
    Replaced,
    /// Dropped to make room for a higher-priority transaction.
    LowPriority,
    /// Evicted by explicit maintenance (e.g. pool clear, invalidation).
    Evicted,
}

/// Event fired whenever a transaction leaves the pool. Consumers (RPC
/// notification, block producer) subscribe via [`MemoryPool::subscribe`].
#[derive(Debug, Clone)]
pub struct TransactionRemoved {
    pub hash: UInt256,
    pub transaction: Transaction,
    pub reason: TransactionRemovalReason,
}

/// Pluggable admission check run during [`MemoryPool::reverify_transactions`].
pub trait TxVerifier: Send + Sync {
    fn verify_transaction(&self, transaction: &Transaction) -> Result<bool>;
}

/// Verifier that only checks the structural invariants a transaction must
/// satisfy regardless of chain state (script present, witness/signer counts
/// match, fees non-negative). A real node wires a verifier that additionally
/// checks the transaction against a ledger snapshot.
#[derive(Debug, Default)]
pub struct StructuralTxVerifier;

impl TxVerifier for StructuralTxVerifier {
    fn verify_transaction(&self, transaction: &Transaction) -> Result<bool> {
        if transaction.script().is_empty() {
            return Ok(false);
        }
        if transaction.signers().is_empty() {
            return Ok(false);
        }
        if transaction.witnesses().len() != transaction.signers().len() {
            return Ok(false);
        }
        if transaction.network_fee() < 0 || transaction.system_fee() < 0 {
            return Ok(false);
        }
        let unique_signers: HashSet<_> = transaction.signers().iter().map(|s| s.account).collect();
        if unique_signers.len() != transaction.signers().len() {
            return Ok(false);
        }
        Ok(true)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MempoolStats {
    pub unverified_count: usize,
    pub verified_count: usize,
    pub transactions_added: u64,
    pub transactions_removed: u64,
}

struct Inner {
    unverified: HashMap<UInt256, PooledTransaction>,
    verified: HashMap<UInt256, PooledTransaction>,
    sorted: BTreeSet<(PriorityKey, UInt256)>,
    sender_index: HashMap<UInt160, HashSet<UInt256>>,
    stats: MempoolStats,
}

/// Tiered, fee-prioritised transaction pool.
pub struct MemoryPool {
    config: MempoolConfig,
    inner: RwLock<Inner>,
    verifier: Arc<dyn TxVerifier>,
    removed_tx: broadcast::Sender<TransactionRemoved>,
}

impl MemoryPool {
    pub fn new(config: MempoolConfig) -> Self {
        Self::with_verifier(config, Arc::new(StructuralTxVerifier))
    }

    pub fn with_verifier(config: MempoolConfig, verifier: Arc<dyn TxVerifier>) -> Self {
        let (removed_tx, _) = broadcast::channel(1024);
        Self {
            config,
            inner: RwLock::new(Inner {
                unverified: HashMap::new(),
                verified: HashMap::new(),
                sorted: BTreeSet::new(),
                sender_index: HashMap::new(),
                stats: MempoolStats::default(),
            }),
            verifier,
            removed_tx,
        }
    }

    /// Lazily consumable feed of pool departures.
    pub fn subscribe(&self) -> broadcast::Receiver<TransactionRemoved> {
        self.removed_tx.subscribe()
    }

    /// Inserts `transaction` into the unverified tier. Returns `false` if it
    /// is already present in any tier (duplicate) or the unverified tier is
    /// full and no lower-priority entry could be evicted to make room.
    pub fn try_add(&self, transaction: Transaction) -> Result<bool> {
        let hash = transaction.hash().map_err(|e| Error::MempoolError(e.to_string()))?;
        if self.contains(&hash) {
            return Ok(false);
        }
        let size = transaction.size();
        if size > self.config.max_transaction_size {
            return Ok(false);
        }
        let pooled = PooledTransaction::new(transaction)?;
        if pooled.fee_per_byte < self.config.min_fee_per_byte {
            return Ok(false);
        }

        let mut inner = self.inner.write().unwrap();
        if inner.unverified.len() >= self.config.max_unverified {
            let lowest = inner
                .unverified
                .values()
                .min_by_key(|tx| tx.fee_per_byte)
                .map(|tx| tx.hash())
                .transpose()?;
            match lowest {
                Some(lowest_hash) if inner.unverified[&lowest_hash].fee_per_byte < pooled.fee_per_byte => {
                    let evicted = inner.unverified.remove(&lowest_hash).unwrap();
                    self.fire_removed(lowest_hash, evicted.transaction, TransactionRemovalReason::LowPriority);
                }
                _ => return Ok(false),
            }
        }

        inner.unverified.insert(hash, pooled);
        inner.stats.transactions_added += 1;
        inner.stats.unverified_count = inner.unverified.len();
        debug!("transaction {} entered mempool unverified tier", hash);
        Ok(true)
    }

    /// Runs up to `max` unverified transactions through the verifier and
    /// promotes the ones that pass into the verified tiers.
    pub fn reverify_transactions(&self, max: usize) -> Result<usize> {
        let candidates: Vec<UInt256> = {
            let inner = self.inner.read().unwrap();
            inner.unverified.keys().take(max).copied().collect()
        };

        let mut promoted = 0;
        for hash in candidates {
            let pooled = {
                let mut inner = self.inner.write().unwrap();
                inner.unverified.remove(&hash)
            };
            let Some(pooled) = pooled else { continue };

            if !self.verifier.verify_transaction(&pooled.transaction)? {
                self.fire_removed(hash, pooled.transaction, TransactionRemovalReason::Evicted);
                continue;
            }

            if !self.admit_verified(hash, pooled)? {
                continue;
            }
            promoted += 1;
        }
        Ok(promoted)
    }

    /// Inserts a verified transaction, replacing a strictly-lower-fee
    /// conflicting entry (same sender) if one exists, evicting the
    /// lowest-priority verified entry if the pool is full.
    fn admit_verified(&self, hash: UInt256, pooled: PooledTransaction) -> Result<bool> {
        let mut inner = self.inner.write().unwrap();

        for sender in &pooled.senders {
            if let Some(existing_hashes) = inner.sender_index.get(sender).cloned() {
                for existing_hash in existing_hashes {
                    if existing_hash == hash {
                        continue;
                    }
                    let Some(existing) = inner.verified.get(&existing_hash) else { continue };
                    if pooled.fee_per_byte <= existing.fee_per_byte {
                        return Ok(false);
                    }
                    let replaced = Self::remove_locked(&mut inner, &existing_hash);
                    if let Some(replaced) = replaced {
                        self.fire_removed(existing_hash, replaced.transaction, TransactionRemovalReason::Replaced);
                    }
                }
            }
        }

        if inner.verified.len() >= self.config.max_verified {
            if let Some((&(lowest_key, lowest_hash), _)) = inner.sorted.iter().map(|k| (k, ())).last() {
                if lowest_key.fee_per_byte >= pooled.fee_per_byte {
                    return Ok(false);
                }
                let evicted = Self::remove_locked(&mut inner, &lowest_hash);
                if let Some(evicted) = evicted {
                    self.fire_removed(lowest_hash, evicted.transaction, TransactionRemovalReason::LowPriority);
                }
            }
        }

        let key = PriorityKey {
            fee_per_byte: pooled.fee_per_byte,
            hash,
        };
        for sender in &pooled.senders {
            inner.sender_index.entry(*sender).or_default().insert(hash);
        }
        inner.sorted.insert((key, hash));
        inner.verified.insert(hash, pooled);
        inner.stats.unverified_count = inner.unverified.len();
        inner.stats.verified_count = inner.verified.len();
        Ok(true)
    }

    fn remove_locked(inner: &mut Inner, hash: &UInt256) -> Option<PooledTransaction> {
        let tx = inner.verified.remove(hash)?;
        let key = PriorityKey {
            fee_per_byte: tx.fee_per_byte,
            hash: *hash,
        };
        inner.sorted.remove(&(key, *hash));
        for sender in &tx.senders {
            if let Some(set) = inner.sender_index.get_mut(sender) {
                set.remove(hash);
                if set.is_empty() {
                    inner.sender_index.remove(sender);
                }
            }
        }
        inner.stats.verified_count = inner.verified.len();
        Some(tx)
    }

    /// Removes a transaction from whichever tier holds it and fires
    /// [`TransactionRemoved`].
    pub fn remove(&self, hash: &UInt256, reason: TransactionRemovalReason) -> Option<Transaction> {
        let removed = {
            let mut inner = self.inner.write().unwrap();
            if let Some(tx) = inner.unverified.remove(hash) {
                inner.stats.unverified_count = inner.unverified.len();
                Some(tx)
            } else {
                Self::remove_locked(&mut inner, hash)
            }
        };
        if let Some(tx) = removed {
            self.fire_removed(*hash, tx.transaction.clone(), reason);
            Some(tx.transaction)
        } else {
            None
        }
    }

    fn fire_removed(&self, hash: UInt256, transaction: Transaction, reason: TransactionRemovalReason) {
        self.inner.write().unwrap().stats.transactions_removed += 1;
        let _ = self.removed_tx.send(TransactionRemoved { hash, transaction, reason });
    }

    pub fn contains(&self, hash: &UInt256) -> bool {
        let inner = self.inner.read().unwrap();
        inner.unverified.contains_key(hash) || inner.verified.contains_key(hash)
    }

    pub fn get_transaction(&self, hash: &UInt256) -> Option<Transaction> {
        let inner = self.inner.read().unwrap();
        inner
            .unverified
            .get(hash)
            .or_else(|| inner.verified.get(hash))
            .map(|p| p.transaction.clone())
    }

    /// Verified transactions, highest fee-per-byte first.
    pub fn get_sorted_transactions(&self) -> Vec<Transaction> {
        let inner = self.inner.read().unwrap();
        inner
            .sorted
            .iter()
            .filter_map(|(_, hash)| inner.verified.get(hash))
            .map(|p| p.transaction.clone())
            .collect()
    }

    /// Top-priority verified transactions for block assembly. Per-block size
    /// and fee budgets are enforced by the caller, not the pool.
    pub fn get_transactions_for_block(&self, max_count: usize) -> Vec<Transaction> {
        let inner = self.inner.read().unwrap();
        inner
            .sorted
            .iter()
            .take(max_count)
            .filter_map(|(_, hash)| inner.verified.get(hash))
            .map(|p| p.transaction.clone())
            .collect()
    }

    pub fn remove_expired(&self) -> Vec<UInt256> {
        let timeout = Duration::from_secs(self.config.transaction_timeout);
        let expired: Vec<UInt256> = {
            let inner = self.inner.read().unwrap();
            inner
                .unverified
                .iter()
                .chain(inner.verified.iter())
                .filter(|(_, tx)| tx.is_expired(timeout))
                .map(|(hash, _)| *hash)
                .collect()
        };
        for hash in &expired {
            self.remove(hash, TransactionRemovalReason::Expired);
        }
        expired
    }

    /// Purges every transaction that a newly-persisted block contained.
    pub fn update_for_block_persisted(&self, block_transactions: &[UInt256]) {
        for hash in block_transactions {
            self.remove(hash, TransactionRemovalReason::Block);
        }
    }

    pub fn get_stats(&self) -> MempoolStats {
        self.inner.read().unwrap().stats.clone()
    }

    pub fn verified_count(&self) -> usize {
        self.inner.read().unwrap().verified.len()
    }

    pub fn unverified_count(&self) -> usize {
        self.inner.read().unwrap().unverified.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neo_core::{Signer, Transaction, UInt160, Witness, WitnessScope};

    fn tx_with(nonce: u32, fee: i64) -> Transaction {
        let mut tx = Transaction::new();
        tx.set_nonce(nonce);
        tx.set_script(vec![0x40]);
        tx.set_network_fee(fee);
        tx.add_signer(Signer {
            account: UInt160::zero(),
            scopes: WitnessScope::CalledByEntry,
            allowed_contracts: Vec::new(),
            allowed_groups: Vec::new(),
            rules: Vec::new(),
        });
        tx.add_witness(Witness::default());
        tx
    }

    #[test]
    fn duplicate_add_is_rejected() {
        let pool = MemoryPool::new(MempoolConfig::default());
        let tx = tx_with(1, 10_000);
        assert!(pool.try_add(tx.clone()).unwrap());
        assert!(!pool.try_add(tx).unwrap());
    }

    #[test]
    fn priority_ordering_is_non_increasing() {
        let pool = MemoryPool::new(MempoolConfig::default());
        for (nonce, fee) in [(1, 1_000_000), (2, 5_000_000), (3, 3_000_000), (4, 4_000_000), (5, 2_000_000)] {
            pool.try_add(tx_with(nonce, fee)).unwrap();
        }
        pool.reverify_transactions(10).unwrap();
        let top3 = pool.get_transactions_for_block(3);
        assert_eq!(top3.len(), 3);
        assert_eq!(top3[0].network_fee(), 5_000_000);
        assert_eq!(top3[1].network_fee(), 4_000_000);
        assert_eq!(top3[2].network_fee(), 3_000_000);

        let sorted = pool.get_sorted_transactions();
        for pair in sorted.windows(2) {
            assert!(pair[0].network_fee() >= pair[1].network_fee());
        }
    }

    #[test]
    fn cardinality_bound_is_respected() {
        let config = MempoolConfig {
            max_verified: 2,
            max_unverified: 10,
                ..Default::default()
        };
        let pool = MemoryPool::new(config);
        for i in 0..5u32 {
            let mut tx = tx_with(i, 1_000_000 * (i as i64 + 1));
            tx.signers[0].account = UInt160::from_bytes(&[i as u8; 20]).unwrap();
            pool.try_add(tx).unwrap();
        }
        pool.reverify_transactions(10).unwrap();
        assert!(pool.verified_count() <= 2);
    }

    #[test]
    fn block_persisted_purges_matching_hashes() {
        let pool = MemoryPool::new(MempoolConfig::default());
        let tx = tx_with(1, 10_000);
        let hash = tx.hash().unwrap();
        pool.try_add(tx).unwrap();
        pool.update_for_block_persisted(&[hash]);
        assert!(!pool.contains(&hash));
    }
}
