// Copyright (C) 2015-2025 The Neo Project.
//
// uint160.rs file belongs to the neo project and is free
// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// repository or http://www.opensource.org/licenses/mit-license.php
// for more details.
//
// Redistribution and use in source and binary forms with or without
// modifications are permitted.

//! Implementation of UInt160, a 160-bit unsigned integer.

use crate::CoreError;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// The length of UInt160 values in bytes.
pub const UINT160_SIZE: usize = 20;

/// Represents a 160-bit unsigned integer.
///
/// This is implemented as a reference type to match the the Neo protocol implementation.
#[derive(Clone, Copy, Default, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub struct UInt160 {
    /// First 8 bytes of the UInt160 (least significant).
    pub value1: u64,
    /// Next 8 bytes of the UInt160.
    pub value2: u64,
    /// Last 4 bytes of the UInt160 (most significant).
    pub value3: u32,
}

/// Zero value for UInt160.
pub static ZERO: UInt160 = UInt160 {
    value1: 0,
    value2: 0,
    value3: 0,
};

impl UInt160 {
    /// Creates a new UInt160 instance.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns a zero UInt160.
    pub fn zero() -> Self {
        Self::default()
    }

    /// Checks if this UInt160 is zero.
    pub fn is_zero(&self) -> bool {
        self.value1 == 0 && self.value2 == 0 && self.value3 == 0
    }

    /// Returns the bytes representation of this UInt160.
    pub fn as_bytes(&self) -> &[u8; 20] {
        unsafe { std::mem::transmute(self) }
    }

    /// Determines whether this instance and another specified UInt160 object have the same value.
    ///
    /// # Arguments
    ///
    /// * `other` - The UInt160 to compare to this instance.
    ///
    /// # Returns
    ///
    /// true if the value of the value parameter is the same as this instance; otherwise, false.
    pub fn equals(&self, other: Option<&Self>) -> bool {
        if let Some(other) = other {
            self.value1 == other.value1
                && self.value2 == other.value2
                && self.value3 == other.value3
        } else {
            false
        }
    }

    /// Creates a new UInt160 from a byte array.
    ///
    /// # Arguments
    ///
    /// * `value` - The byte array to create the UInt160 from.
    ///
    /// # Returns
    ///
    /// A new UInt160 instance.
    pub fn from_bytes(value: &[u8]) -> Result<Self, CoreError> {
        if value.len() != UINT160_SIZE {
            return Err(CoreError::InvalidFormat {
                message: format!("Invalid length: {}", value.len()),
            });
        }

        let mut result = Self::new();

        // Convert bytes to u64 and u32 values to match the Neo protocol implementation
        let mut value1_bytes = [0u8; 8];
        let mut value2_bytes = [0u8; 8];
        let mut value3_bytes = [0u8; 4];

        // For from_bytes, we treat the input as little-endian byte array
        // bytes[0..8] -> value1 (least significant)
        // bytes[8..16] -> value2 (middle)
        // bytes[16..20] -> value3 (most significant)
        value1_bytes.copy_from_slice(&value[0..8]);
        value2_bytes.copy_from_slice(&value[8..16]);
        value3_bytes.copy_from_slice(&value[16..20]);

        result.value1 = u64::from_le_bytes(value1_bytes);
        result.value2 = u64::from_le_bytes(value2_bytes);
        result.value3 = u32::from_le_bytes(value3_bytes);

        Ok(result)
    }

    /// Creates a new UInt160 from a byte span.
    ///
    /// # Arguments
    ///
    /// * `value` - The byte span to create the UInt160 from.
    ///
    /// # Returns
    ///
    /// A new UInt160 instance.
    pub fn from_span(value: &[u8]) -> Self {
        if value.len() != UINT160_SIZE {
            panic!("Invalid length: {}", value.len());
        }

        let mut result = Self::new();

        // Convert bytes to u64 and u32 values to match the Neo protocol implementation
        let mut value1_bytes = [0u8; 8];
        let mut value2_bytes = [0u8; 8];
        let mut value3_bytes = [0u8; 4];

        value1_bytes.copy_from_slice(&value[0..8]);
        value2_bytes.copy_from_slice(&value[8..16]);
        value3_bytes.copy_from_slice(&value[16..20]);

        result.value1 = u64::from_le_bytes(value1_bytes);
        result.value2 = u64::from_le_bytes(value2_bytes);
        result.value3 = u32::from_le_bytes(value3_bytes);

        result
    }

    /// Gets a byte array representation of the UInt160.
    ///
    /// # Returns
    ///
    /// A byte array representation of the UInt160.
    pub fn to_array(&self) -> [u8; UINT160_SIZE] {
        let mut result = [0u8; UINT160_SIZE];

        let value1_bytes = self.value1.to_le_bytes();
        let value2_bytes = self.value2.to_le_bytes();
        let value3_bytes = self.value3.to_le_bytes();

        result[0..8].copy_from_slice(&value1_bytes);
        result[8..16].copy_from_slice(&value2_bytes);
        result[16..20].copy_from_slice(&value3_bytes);

        result
    }

    /// Gets a span that represents the current value in little-endian.
    ///
    /// # Returns
    ///
    /// A byte array that represents the current value in little-endian.
    pub fn get_span(&self) -> [u8; UINT160_SIZE] {
        self.to_array()
    }

    /// Parses a UInt160 from a hexadecimal string.
    ///
    /// # Arguments
    ///
    /// * `s` - The hexadecimal string to parse.
    ///
    /// # Returns
    ///
    /// A Result containing either a new UInt160 instance or an error.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        let mut result = None;
        if !Self::try_parse(s, &mut result) {
            return Err(CoreError::InvalidFormat {
                message: "Invalid format".to_string(),
            });
        }

        match result {
            Some(value) => Ok(value),
            None => Err(CoreError::InvalidFormat {
                message: "Failed to parse UInt160".to_string(),
            }),
        }
    }

    /// Tries to parse a UInt160 from a hexadecimal string.
    ///
    /// # Arguments
    ///
    /// * `s` - The hexadecimal string to parse.
    /// * `result` - Optional mutable reference to store the result.
    ///
    /// # Returns
    ///
    /// A boolean indicating whether the parsing was successful.
    pub fn try_parse(s: &str, result: &mut Option<Self>) -> bool {
        let s = s.strip_prefix("0x").unwrap_or(s);

        if s.len() != UINT160_SIZE * 2 {
            return false;
        }

        // Check if all characters are valid hex
        if !s.chars().all(|c| c.is_ascii_hexdigit()) {
            return false;
        }

        // Try to parse the hex string to bytes
        match hex::decode(s) {
            Ok(bytes) => {
                // Map big-endian hex bytes to little-endian internal storage
                let mut value1_bytes = [0u8; 8];
                let mut value2_bytes = [0u8; 8];
                let mut value3_bytes = [0u8; 4];

                // For the hex "0x0000000000000000000000000000000000000001":
                // bytes = [0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,0,1]
                // We want bytes[19] (the 0x01) to end up in value3 = 0x01000000
                // So bytes[16..20] should go to value3 (the last 4 bytes)

                // Correct mapping:
                // bytes[16..20] -> value3 (most significant in our structure)
                // bytes[8..16] -> value2 (middle)
                // bytes[0..8] -> value1 (least significant in our structure)

                // For value3: bytes[16..20] with bytes[19] going to most significant byte
                // To get 0x01000000 from bytes[19]=1, we need: value3_bytes[3] = bytes[19]
                value3_bytes[3] = bytes[19];
                value3_bytes[2] = bytes[18];
                value3_bytes[1] = bytes[17];
                value3_bytes[0] = bytes[16];

                // For value2: bytes[8..16] reversed
                for i in 0..8 {
                    value2_bytes[7 - i] = bytes[8 + i];
                }

                // For value1: bytes[0..8] reversed
                for i in 0..8 {
                    value1_bytes[7 - i] = bytes[i];
                }

                // Convert to little-endian u64/u32 values
                let mut uint = Self::new();
                uint.value1 = u64::from_le_bytes(value1_bytes);
                uint.value2 = u64::from_le_bytes(value2_bytes);
                uint.value3 = u32::from_le_bytes(value3_bytes);

                // Always set the result
                *result = Some(uint);

                true
            }
            Err(_) => false,
        }
    }

    /// Converts the UInt160 to a hexadecimal string.
    ///
    /// # Returns
    ///
    /// A hexadecimal string representation of the UInt160.
    pub fn to_hex_string(&self) -> String {
        // Convert from internal little-endian storage back to big-endian hex string
        let mut result_bytes = [0u8; UINT160_SIZE];

        // Get the little-endian bytes for each value
        let value1_bytes = self.value1.to_le_bytes();
        let value2_bytes = self.value2.to_le_bytes();
        let value3_bytes = self.value3.to_le_bytes();

        // Reverse the parsing process:
        // value3 -> bytes[16..20]
        // value2 -> bytes[8..16]
        // value1 -> bytes[0..8]

        // For value3: place in bytes[16..20] with value3_bytes[3] going to bytes[19]
        result_bytes[19] = value3_bytes[3];
        result_bytes[18] = value3_bytes[2];
        result_bytes[17] = value3_bytes[1];
        result_bytes[16] = value3_bytes[0];

        // For value2: reverse and place in bytes[8..16]
        for i in 0..8 {
            result_bytes[15 - i] = value2_bytes[i];
        }

        // For value1: reverse and place in bytes[0..8]
        for i in 0..8 {
            result_bytes[7 - i] = value1_bytes[i];
        }

        format!("0x{}", hex::encode(result_bytes))
    }

    /// Gets a hash code for the current UInt160 instance.
    ///
    /// # Returns
    ///
    /// A 32-bit signed integer hash code.
    pub fn get_hash_code(&self) -> i32 {
        // Combine the hash codes of the three fields, similar to the Neo protocol's HashCode.Combine
        let mut hash = 17;
        hash = hash * 31 + (self.value1 as i32);
        hash = hash * 31 + (self.value2 as i32);
        hash = hash * 31 + self.value3 as i32;
        hash
    }

    /// Creates a UInt160 from a script by computing its hash.
    ///
    /// # Arguments
    ///
    /// * `script` - The script bytes to hash
    ///
    /// # Returns
    ///
    /// A new UInt160 instance representing the script hash.
    pub fn from_script(script: &[u8]) -> Self {
        // Compute Hash160 (RIPEMD160 of SHA256) of the script
        use ripemd::Ripemd160;
        use sha2::{Digest, Sha256};

        let mut sha256_hasher = Sha256::new();
        sha256_hasher.update(script);
        let sha256_hash = sha256_hasher.finalize();

        let mut ripemd_hasher = Ripemd160::new();
        ripemd_hasher.update(&sha256_hash);
        let hash160 = ripemd_hasher.finalize();

        Self::from_bytes(&hash160).unwrap_or_default()
    }

    /// Converts this UInt160 to a Neo address string.
    ///
    /// # Returns
    ///
    /// A Neo address string in Base58Check format.
    pub fn to_address(&self) -> String {
        // Neo address format: version byte (0x35) + script hash + checksum
        let version_byte = 0x35u8; // Neo N3 address version
        let mut data = Vec::with_capacity(21);
        data.push(version_byte);
        data.extend_from_slice(&self.to_array());

        // Compute checksum (first 4 bytes of double SHA256)
        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(&data);
        let first_hash = hasher.finalize();

        let mut hasher = Sha256::new();
        hasher.update(&first_hash);
        let second_hash = hasher.finalize();

        let checksum = &second_hash[0..4];
        data.extend_from_slice(checksum);

        // Encode in Base58
        bs58::encode(data).into_string()
    }

    /// Parses a Neo address string to a UInt160.
    ///
    /// # Arguments
    ///
    /// * `address` - The Neo address string to parse
    ///
    /// # Returns
    ///
    /// A Result containing either a new UInt160 instance or an error.
    pub fn from_address(address: &str) -> Result<Self, CoreError> {
        // Decode from Base58
        let decoded = bs58::decode(address)
            .into_vec()
            .map_err(|_| CoreError::InvalidFormat {
                message: "Invalid Base58 address".to_string(),
            })?;

        if decoded.len() != 25 {
            return Err(CoreError::InvalidFormat {
                message: "Invalid address length".to_string(),
            });
        }

        // Check version byte
        if decoded[0] != 0x35 {
            return Err(CoreError::InvalidFormat {
                message: "Invalid address version".to_string(),
            });
        }

        // Verify checksum
        let data = &decoded[0..21];
        let checksum = &decoded[21..25];

        use sha2::{Digest, Sha256};
        let mut hasher = Sha256::new();
        hasher.update(data);
        let first_hash = hasher.finalize();

        let mut hasher = Sha256::new();
        hasher.update(&first_hash);
        let second_hash = hasher.finalize();

        let computed_checksum = &second_hash[0..4];
        if checksum != computed_checksum {
            return Err(CoreError::InvalidFormat {
                message: "Invalid address checksum".to_string(),
            });
        }

        // Extract script hash (skip version byte)
        let script_hash = &decoded[1..21];
        Self::from_bytes(script_hash)
    }
}

// Implement Serializable trait to match the Neo protocol ISerializable
impl neo_io::Serializable for UInt160 {
    fn size(&self) -> usize {
        UINT160_SIZE
    }

    fn serialize(&self, writer: &mut neo_io::BinaryWriter) -> neo_io::IoResult<()> {
        writer.write_u64(self.value1)?;
        writer.write_u64(self.value2)?;
        writer.write_u32(self.value3)?;
        Ok(())
    }

    fn deserialize(reader: &mut neo_io::MemoryReader) -> neo_io::IoResult<Self> {
        let value1 = reader.read_u64()?;
        let value2 = reader.read_u64()?;
        let value3 = reader.read_u32()?;
        Ok(UInt160 {
            value1,
            value2,
            value3,
        })
    }
}

impl FromStr for UInt160 {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex_string())
    }
}

impl fmt::Debug for UInt160 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "UInt160({})", self.to_hex_string())
    }
}

impl PartialOrd for UInt160 {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for UInt160 {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare in reverse order to match the Neo protocol implementation
        // Most significant bytes first
        let result = self.value3.cmp(&other.value3);
        if result != Ordering::Equal {
            return result;
        }
        let result = self.value2.cmp(&other.value2);
        if result != Ordering::Equal {
            return result;
        }
        self.value1.cmp(&other.value1)
    }
}

impl From<[u8; UINT160_SIZE]> for UInt160 {
    fn from(data: [u8; UINT160_SIZE]) -> Self {
        Self::from_bytes(&data).unwrap()
    }
}

impl TryFrom<&[u8]> for UInt160 {
    type Error = CoreError;

    fn try_from(data: &[u8]) -> Result<Self, Self::Error> {
        Self::from_bytes(data)
    }
}

impl From<&str> for UInt160 {
    fn from(s: &str) -> Self {
        Self::parse(s).unwrap_or_default()
    }
}

impl From<Vec<u8>> for UInt160 {
    fn from(data: Vec<u8>) -> Self {
        Self::from_bytes(&data).unwrap_or_default()
    }
}
