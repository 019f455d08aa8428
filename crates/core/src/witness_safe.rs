//! Safe implementation of Witness operations without unwrap()
//!
//! This module demonstrates how to refactor existing code to use safe error handling.

use crate::error::CoreError;
use crate::safe_result::{SafeOption, SafeResult};
use crate::witness::Witness;
use neo_io::{BinaryWriter, MemoryReader, Serializable};

/// Safe witness serialization and deserialization
pub struct SafeWitnessOperations;

impl SafeWitnessOperations {
    /// Safely serialize a witness to bytes
    pub fn serialize_witness(witness: &Witness) -> Result<Vec<u8>, CoreError> {
        let mut writer = BinaryWriter::new();

        <Witness as Serializable>::serialize(witness, &mut writer)
            .with_context("Failed to serialize witness")?;

        Ok(writer.to_bytes())
    }

    /// Safely deserialize a witness from bytes
    pub fn deserialize_witness(bytes: &[u8]) -> Result<Witness, CoreError> {
        let mut reader = MemoryReader::new(bytes);

        <Witness as Serializable>::deserialize(&mut reader)
            .with_context("Failed to deserialize witness")
    }

    /// Safe round-trip test for witness serialization
    pub fn test_witness_round_trip(witness: &Witness) -> Result<bool, CoreError> {
        // Serialize the witness
        let serialized = Self::serialize_witness(witness)?;

        // Deserialize it back
        let deserialized = Self::deserialize_witness(&serialized)?;

        // Compare the results
        Ok(witness.invocation_script == deserialized.invocation_script
            && witness.verification_script == deserialized.verification_script)
    }

    /// Safe batch processing of witnesses
    pub fn process_witnesses(witnesses: &[Witness]) -> Result<Vec<Vec<u8>>, CoreError> {
        witnesses
            .iter()
            .enumerate()
            .map(|(index, witness)| {
                Self::serialize_witness(witness)
                    .with_context(&format!("Failed to process witness at index {}", index))
            })
                .collect()
    }

    /// Safe witness validation
    pub fn validate_witness(witness: &Witness) -> Result<(), CoreError> {
        if witness.invocation_script.is_empty() {
            return Err(CoreError::InvalidData {
                message: "Invocation script cannot be empty".to_string(),
            });
        }

        if witness.verification_script.is_empty() {
            return Err(CoreError::InvalidData {
                message: "Verification script cannot be empty".to_string(),
            });
        }

        if witness.invocation_script.len() > 65536 {
            return Err(CoreError::InvalidData {
                message: format!(
                    "Invocation script too large: {} bytes (max: 65536)",
                    witness.invocation_script.len()
                        ),
            });
        }

        if witness.verification_script.len() > 65536 {
            return Err(CoreError::InvalidData {
                message: format!(
                    "Verification script too large: {} bytes (max: 65536)",
                    witness.verification_script.len()
                        ),
            });
        }

        Ok(())
    }
}

/// Safe builder pattern for Witness construction
pub struct SafeWitnessBuilder {
    invocation_script: Option<Vec<u8>>,
    verification_script: Option<Vec<u8>>,
}

impl SafeWitnessBuilder {
    /// Create a new witness builder
    pub fn new() -> Self {
        Self {
            invocation_script: None,
            verification_script: None,
        }
    }

    /// Set the invocation script
    pub fn with_invocation_script(mut self, script: Vec<u8>) -> Self {
        self.invocation_script = Some(script);
        self
    }

    /// Set the verification script
    pub fn with_verification_script(mut self, script: Vec<u8>) -> Self {
        self.verification_script = Some(script);
        self
    }

    /// Build the witness with validation
    pub fn build(self) -> Result<Witness, CoreError> {
        let invocation_script = self
            .invocation_script
            .ok_or_context("Invocation script is required")?;

        let verification_script = self
            .verification_script
            .ok_or_context("Verification script is required")?;

        let witness = Witness::new_with_scripts(invocation_script, verification_script);

        // Validate before returning
        SafeWitnessOperations::validate_witness(&witness)?;

        Ok(witness)
    }
}

impl Default for SafeWitnessBuilder {
    fn default() -> Self {
        Self::new()
    }
}
