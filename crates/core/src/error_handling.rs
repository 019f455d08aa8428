//! Enhanced Error Handling Module
//!
//! Provides comprehensive error handling utilities to replace unwrap() and panic! patterns
//! throughout the Neo Rust codebase.

use std::error::Error as StdError;
use std::fmt;
use std::result::Result as StdResult;

/// Type alias for Results with our error type
pub type Result<T> = StdResult<T, NeoError>;

/// Main error type for Neo blockchain operations
#[derive(Debug, Clone)]
/// Represents an enumeration of values.
pub enum NeoError {
    /// Blockchain-related errors
    Blockchain(BlockchainError),
    /// Network and P2P errors
    Network(NetworkError),
    /// Virtual Machine errors
    Vm(VmError),
    /// Consensus mechanism errors
    Consensus(ConsensusError),
    /// Storage and persistence errors
    Storage(StorageError),
    /// Cryptography errors
    Crypto(CryptoError),
    /// Configuration errors
    Config(ConfigError),
    /// Generic internal error
    Internal(String),
    /// Invalid input or parameter
    InvalidInput(String),
    /// Resource not found
    NotFound(String),
    /// Operation timeout
    Timeout(String),
}

/// Blockchain-specific errors
#[derive(Debug, Clone)]
/// Represents an enumeration of values.
pub enum BlockchainError {
    /// Invalid block structure or content
    InvalidBlock(String),
    /// Invalid transaction structure or content
    InvalidTransaction(String),
    /// Invalid cryptographic signature
    InvalidSignature,
    /// Block not found at the specified height
    BlockNotFound(u32),
    /// Chain tip does not match expected value
    ChainTipMismatch,
    /// Block or transaction validation failed
    ValidationFailed(String),
    /// Blockchain state corruption detected
    StateCorruption(String),
}

/// Network-specific errors
#[derive(Debug, Clone)]
/// Represents an enumeration of values.
pub enum NetworkError {
    /// Network connection failed
    ConnectionFailed(String),
    /// Peer not found in the network
    PeerNotFound,
    /// Failed to parse network message
    MessageParsingError(String),
    /// Network protocol violation detected
    ProtocolViolation(String),
    /// Network operation timed out
    Timeout,
    /// Maximum number of peers reached
    MaxPeersReached,
}

/// VM execution errors
#[derive(Debug, Clone)]
/// Represents an enumeration of values.
pub enum VmError {
    /// VM stack overflow occurred
    StackOverflow,
    /// VM stack underflow occurred
    StackUnderflow,
    /// Invalid VM opcode encountered
    InvalidOpcode(u8),
    /// VM ran out of gas
    OutOfGas,
    /// VM execution failed
    ExecutionFailed(String),
    /// Invalid script format
    InvalidScript,
    /// Memory access violation
    AccessViolation,
}

/// Consensus-related errors
#[derive(Debug, Clone)]
/// Represents an enumeration of values.
pub enum ConsensusError {
    /// Invalid consensus proposal
    InvalidProposal,
    /// Invalid consensus vote
    InvalidVote,
    /// Consensus quorum not reached
    QuorumNotReached,
    /// View change operation timed out
    ViewChangeTimeout,
    /// Invalid consensus signature
    InvalidSignature,
    /// Consensus state is corrupted
    ConsensusStateCorrupted,
}

/// Storage errors
#[derive(Debug, Clone)]
/// Represents an enumeration of values.
pub enum StorageError {
    /// Database operation failed
    DatabaseError(String),
    /// Data serialization failed
    SerializationError(String),
    /// Data deserialization failed
    DeserializationError(String),
    /// Data corruption detected
    CorruptedData,
    /// Insufficient storage space
    InsufficientSpace,
    /// Storage lock timeout
    LockTimeout,
}

/// Cryptography errors
#[derive(Debug, Clone)]
/// Represents an enumeration of values.
pub enum CryptoError {
    /// Invalid cryptographic key
    InvalidKey,
    /// Invalid cryptographic signature
    InvalidSignature,
    /// Hash values do not match
    HashMismatch,
    /// Encryption operation failed
    EncryptionFailed,
    /// Decryption operation failed
    DecryptionFailed,
    /// Invalid cryptographic proof
    InvalidProof,
}

/// Configuration errors
#[derive(Debug, Clone)]
/// Represents an enumeration of values.
pub enum ConfigError {
    /// Invalid configuration value
    InvalidValue(String),
    /// Required configuration field is missing
    MissingField(String),
    /// Failed to parse configuration data
    ParseError(String),
    /// Configuration validation failed
    ValidationFailed(String),
}

impl fmt::Display for NeoError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NeoError::Blockchain(e) => write!(f, "Blockchain error: {:?}", e),
            NeoError::Network(e) => write!(f, "Network error: {:?}", e),
            NeoError::Vm(e) => write!(f, "VM error: {:?}", e),
            NeoError::Consensus(e) => write!(f, "Consensus error: {:?}", e),
            NeoError::Storage(e) => write!(f, "Storage error: {:?}", e),
            NeoError::Crypto(e) => write!(f, "Crypto error: {:?}", e),
            NeoError::Config(e) => write!(f, "Config error: {:?}", e),
            NeoError::Internal(msg) => write!(f, "Internal error: {}", msg),
            NeoError::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            NeoError::NotFound(msg) => write!(f, "Not found: {}", msg),
            NeoError::Timeout(msg) => write!(f, "Timeout: {}", msg),
        }
    }
}

impl StdError for NeoError {}

/// Error context trait for adding context to errors
/// Defines a trait interface.
pub trait ErrorContext<T> {
    /// Add context to an error
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static;

    /// Add context with a closure (lazy evaluation)
    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ErrorContext<T> for StdResult<T, E>
where
    E: Into<NeoError>,
{
    fn context<C>(self, context: C) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|e| {
            let base_error = e.into();
            NeoError::Internal(format!("{}: {}", context, base_error))
        })
    }

    fn with_context<C, F>(self, f: F) -> Result<T>
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|e| {
            let base_error = e.into();
            NeoError::Internal(format!("{}: {}", f(), base_error))
        })
    }
}

/// Safe unwrap alternatives
/// Defines a trait interface.
pub trait SafeUnwrap<T> {
    /// Unwrap with a default value
    fn unwrap_or_default(self) -> T
    where
        T: Default;

    /// Unwrap with a provided default
    fn unwrap_or_else_default<F>(self, f: F) -> T
    where
        F: FnOnce() -> T;

    /// Log error and return default
    fn unwrap_or_log(self, message: &str) -> T
    where
        T: Default;
}

impl<T> SafeUnwrap<T> for Result<T> {
    fn unwrap_or_default(self) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(|e| {
            tracing::error!("Error occurred, using default: {:?}", e);
            T::default()
        })
    }

    fn unwrap_or_else_default<F>(self, f: F) -> T
    where
        F: FnOnce() -> T,
    {
        self.unwrap_or_else(|e| {
            tracing::error!("Error occurred: {:?}", e);
            f()
        })
    }

    fn unwrap_or_log(self, message: &str) -> T
    where
        T: Default,
    {
        self.unwrap_or_else(|e| {
            tracing::error!("{}: {:?}", message, e);
            T::default()
        })
    }
}

/// Retry mechanism for transient failures
/// Represents a data structure.
pub struct RetryPolicy {
    max_attempts: u32,
    backoff_ms: u64,
}

impl RetryPolicy {
    /// Creates a new instance.
    /// Creates a new instance.
    pub fn new(max_attempts: u32, backoff_ms: u64) -> Self {
        Self {
            max_attempts,
            backoff_ms,
        }
    }

    pub async fn retry<F, Fut, T>(&self, mut f: F) -> Result<T>
    where
        F: FnMut() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let mut attempts = 0;

        loop {
            attempts += 1;

            match f().await {
                Ok(value) => return Ok(value),
                Err(e) if attempts >= self.max_attempts => return Err(e),
                Err(e) => {
                    tracing::warn!(
                        "Attempt {}/{} failed: {:?}. Retrying in {}ms",
                        attempts,
                        self.max_attempts,
                        e,
                        self.backoff_ms * attempts as u64
                            );

                    tokio::time::sleep(
                        std::time::Duration::from_millis(self.backoff_ms * attempts as u64)
                            ).await;
                }
            }
        }
    }
}

/// Circuit breaker for preventing cascading failures
/// Represents a data structure.
pub struct CircuitBreaker {
    _failure_threshold: u32,
    _success_threshold: u32,
    timeout_ms: u64,
    state: std::sync::Arc<std::sync::Mutex<CircuitState>>,
}

#[derive(Debug, Clone)]
enum CircuitState {
    Closed,
    Open(std::time::Instant),
    HalfOpen,
}

impl CircuitBreaker {
    /// Creates a new instance.
    /// Creates a new instance.
    pub fn new(failure_threshold: u32, success_threshold: u32, timeout_ms: u64) -> Self {
        Self {
            _failure_threshold: failure_threshold,
            _success_threshold: success_threshold,
            timeout_ms,
            state: std::sync::Arc::new(std::sync::Mutex::new(CircuitState::Closed)),
        }
    }

    pub async fn call<F, Fut, T>(&self, f: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: std::future::Future<Output = Result<T>>,
    {
        let state = self.state.lock().unwrap().clone();

        match state {
            CircuitState::Open(opened_at) => {
                if opened_at.elapsed().as_millis() > self.timeout_ms as u128 {
                    *self.state.lock().unwrap() = CircuitState::HalfOpen;
                    // Execute the function directly to avoid recursion
                    match f().await {
                        Ok(value) => {
                            *self.state.lock().unwrap() = CircuitState::Closed;
                            Ok(value)
                        }
                        Err(e) => {
                            *self.state.lock().unwrap() = CircuitState::Open(std::time::Instant::now());
                            Err(e)
                        }
                    }
                } else {
                    Err(NeoError::Internal("Circuit breaker is open".to_string()))
                }
            }
            CircuitState::HalfOpen | CircuitState::Closed => {
                match f().await {
                    Ok(value) => {
                        *self.state.lock().unwrap() = CircuitState::Closed;
                        Ok(value)
                    }
                    Err(e) => {
                        *self.state.lock().unwrap() = CircuitState::Open(std::time::Instant::now());
                        Err(e)
                    }
                }
            }
        }
    }
}

/// Conversion implementations for common error types
impl From<std::io::Error> for NeoError {
    fn from(err: std::io::Error) -> Self {
        NeoError::Storage(StorageError::DatabaseError(err.to_string()))
    }
}

impl From<serde_json::Error> for NeoError {
    fn from(err: serde_json::Error) -> Self {
        NeoError::Storage(StorageError::SerializationError(err.to_string()))
    }
}

impl From<tokio::time::error::Elapsed> for NeoError {
    fn from(_: tokio::time::error::Elapsed) -> Self {
        NeoError::Timeout("Operation timed out".to_string())
    }
}

impl From<std::fmt::Error> for NeoError {
    fn from(error: std::fmt::Error) -> Self {
        NeoError::Internal(format!("Format error: {}", error))
    }
}

impl From<Box<dyn std::error::Error>> for NeoError {
    fn from(error: Box<dyn std::error::Error>) -> Self {
        NeoError::Internal(error.to_string())
    }
}

#[cfg(test)]
#[allow(dead_code)]
mod tests {
    use super::*;

    #[test]
    fn test_error_context() {
        let result: Result<()> = Err(NeoError::NotFound("block".to_string()));
        let with_context = result.context("Failed to process block");
        assert!(with_context.is_err());
    }

    #[test]
    fn test_safe_unwrap() {
        let result: Result<i32> = Err(NeoError::Internal("test".to_string()));
        let value = result.unwrap_or_default();
        assert_eq!(value, 0);
    }

    #[tokio::test]
    async fn test_retry_policy() {
        let policy = RetryPolicy::new(3, 100);
        let attempts = std::sync::Arc::new(std::sync::Mutex::new(0));
        let attempts_clone = attempts.clone();

        let result = policy.retry(move || {
            let attempts = attempts_clone.clone();
            async move {
                let mut count = attempts.lock().unwrap();
                *count += 1;
                if *count < 3 {
                    Err(NeoError::Internal("retry test".to_string()))
                } else {
                    Ok(42)
                }
            }
        }).await;

        assert!(result.is_ok());
        assert_eq!(result.unwrap(), 42);
    }
}