//! Message header structure.
//!
//! Wire framing is `flags (1 byte) | command (1 byte) | varint(payload length)`,
//! followed by the (possibly LZ4-compressed) payload. There is no per-message
//! magic or checksum on the wire; `magic` and `checksum` below are populated
//! locally for callers that still want to sanity-check a decoded message
//! against the payload they deserialized.

use crate::{Error, Result};
use super::{
    commands::varlen,
    message_command::MessageCommand,
    message_flags::MessageFlags,
    MAX_MESSAGE_SIZE,
};
use serde::{Deserialize, Serialize};

/// Network message header
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MessageHeader {
    /// Network magic number, set locally (not carried on the wire)
    pub magic: u32,
    /// Compression / framing flags
    pub flags: MessageFlags,
    /// Message command
    pub command: MessageCommand,
    /// Payload length
    pub length: u32,
    /// Payload checksum (SHA256(SHA256(payload))), computed locally
    pub checksum: u32,
}

impl MessageHeader {
    /// Creates a new, uncompressed message header
    pub fn new(magic: u32, command: MessageCommand, payload: &[u8]) -> Self {
        Self::with_flags(magic, MessageFlags::None, command, payload)
    }

    /// Creates a new message header with explicit flags
    pub fn with_flags(magic: u32, flags: MessageFlags, command: MessageCommand, payload: &[u8]) -> Self {
        Self {
            magic,
            flags,
            command,
            length: payload.len() as u32,
            checksum: Self::calculate_checksum(payload),
        }
    }

    /// Calculates checksum for payload (SHA256(SHA256(payload)))
    pub fn calculate_checksum(payload: &[u8]) -> u32 {
        use sha2::{Digest, Sha256};
        let first_hash = Sha256::digest(payload);
        let second_hash = Sha256::digest(&first_hash);
        u32::from_le_bytes([second_hash[0], second_hash[1], second_hash[2], second_hash[3]])
    }

    /// Validates the header against the (decompressed) payload
    pub fn validate(&self, payload: &[u8]) -> Result<()> {
        if self.length as usize != payload.len() {
            return Err(Error::Protocol(format!(
                "Invalid payload length: expected {}, got {}",
                self.length, payload.len()
                    )));
        }

        if self.length as usize > MAX_MESSAGE_SIZE {
            return Err(Error::Protocol(format!(
                "Message too large: {} bytes (max: {})",
                self.length, MAX_MESSAGE_SIZE
                    )));
        }

        let expected_checksum = Self::calculate_checksum(payload);
        if self.checksum != expected_checksum {
            return Err(Error::Protocol(format!(
                "Invalid checksum: expected 0x{:08x}, got 0x{:08x}",
                expected_checksum, self.checksum
                    )));
        }

        Ok(())
    }

    /// Serializes the `flags | command | varint(length)` wire prefix
    pub fn to_bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(6);
        bytes.push(self.flags.to_byte());
        bytes.push(self.command.to_byte());
        bytes.extend_from_slice(&varlen::encode_length(self.length as usize));
        bytes
    }

    /// Parses the `flags | command | varint(length)` wire prefix, returning
    /// the header (with `magic` and `checksum` left unset) and the number of
    /// bytes consumed from `bytes`.
    pub fn from_bytes(bytes: &[u8]) -> Result<(Self, usize)> {
        if bytes.len() < 2 {
            return Err(Error::Protocol("Header too short".to_string()));
        }

        let flags = MessageFlags::from_byte(bytes[0]).map_err(|e| Error::Protocol(e.to_string()))?;
        let command = MessageCommand::from_byte(bytes[1]).map_err(|e| Error::Protocol(e.to_string()))?;
        let (length, len_bytes) =
            varlen::decode_length(&bytes[2..]).map_err(|e| Error::Protocol(e.to_string()))?;

        if length > MAX_MESSAGE_SIZE {
            return Err(Error::Protocol(format!(
                "Message too large: {} bytes (max: {})",
                length, MAX_MESSAGE_SIZE
                    )));
        }

        Ok((
            Self {
                magic: 0,
                flags,
                command,
                length: length as u32,
                checksum: 0,
            },
            2 + len_bytes,
                ))
    }
}
