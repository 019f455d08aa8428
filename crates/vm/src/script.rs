//! VM script representation and validation.
//!
//! A [`Script`] wraps the raw bytecode a context executes. Construction can
//! optionally pre-validate every instruction (`strict` mode) so malformed
//! bytecode is rejected before it ever reaches the execution engine.

use crate::error::{VmError, VmResult};
use crate::instruction::Instruction;

/// Executable VM bytecode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Script {
    bytes: Vec<u8>,
}

impl Script {
    /// Creates a script from raw bytes.
    ///
    /// When `strict` is true, every instruction in the script is parsed up
    /// front and an error is returned if any opcode/operand is malformed.
    pub fn new(bytes: Vec<u8>, strict: bool) -> VmResult<Self> {
        let script = Self { bytes };
        if strict {
            script.validate()?;
        }
        Ok(script)
    }

    /// Creates a script from raw bytes without validating its instructions.
    pub fn new_relaxed(bytes: Vec<u8>) -> Self {
        Self { bytes }
    }

    fn validate(&self) -> VmResult<()> {
        let mut position = 0;
        while position < self.bytes.len() {
            let instruction = Instruction::parse(&self.bytes, position)?;
            position += instruction.size();
        }
        Ok(())
    }

    /// Returns the script's raw bytes.
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the script's raw bytes (alias of [`Script::bytes`]).
    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the script's raw bytes as an owned vector.
    pub fn to_array(&self) -> Vec<u8> {
        self.bytes.clone()
    }

    /// Returns the number of bytes in the script.
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    /// Returns true if the script has no bytes.
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Parses the instruction starting at `position`.
    pub fn get_instruction(&self, position: usize) -> VmResult<Instruction> {
        if position >= self.bytes.len() {
            return Err(VmError::invalid_operation_msg(
                "Instruction position is out of range",
            ));
        }
        Instruction::parse(&self.bytes, position)
    }

    /// Computes the script's Hash160 (SHA-256 then RIPEMD-160), matching the
    /// Neo protocol's `Script.ToScriptHash()`.
    pub fn hash(&self) -> Vec<u8> {
        use ripemd::{Digest as _, Ripemd160};
        use sha2::{Digest as _, Sha256};

        let mut sha256 = Sha256::new();
        sha256.update(&self.bytes);
        let sha256_hash = sha256.finalize();

        let mut ripemd160 = Ripemd160::new();
        ripemd160.update(sha256_hash);
        ripemd160.finalize().to_vec()
    }
}
