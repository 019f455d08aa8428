//! Complete network message wrapper.
//!
//! Wire format is `flags | command | varint(payload length) | payload`, the
//! payload LZ4-compressed (and `flags` marked accordingly) when doing so is
//! worthwhile. This replaces the legacy fixed 24-byte magic/checksum header.

use crate::compression::{compress_lz4, decompress_lz4, COMPRESSION_MIN_SIZE, COMPRESSION_THRESHOLD};
use crate::{Error, Result};
use super::{
    header::MessageHeader, message_command::MessageCommand, message_flags::MessageFlags,
    protocol::ProtocolMessage,
};

/// Complete network message
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NetworkMessage {
    /// Message header
    pub header: MessageHeader,
    /// Message payload
    pub payload: ProtocolMessage,
}

impl NetworkMessage {
    /// Creates a new network message, compressing the payload when beneficial
    pub fn new(payload: ProtocolMessage) -> Self {
        Self::new_with_magic(payload, 0)
    }

    /// Creates a new network message, recording `magic` locally (it is not
    /// transmitted on the wire; kept for callers that still compare it).
    pub fn new_with_magic(payload: ProtocolMessage, magic: u32) -> Self {
        let serialized_payload = payload.to_bytes().unwrap_or_default();
        let command = payload.command();
        let header = MessageHeader::new(magic, command, &serialized_payload);

        Self { header, payload }
    }

    /// Convenience accessor mirroring the payload's command
    pub fn command(&self) -> MessageCommand {
        self.header.command
    }

    /// Serializes the message to bytes: `flags | command | varint(len) | payload`
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        let raw_payload = self.payload.to_bytes()?;

        let (flags, wire_payload) = if raw_payload.len() >= COMPRESSION_MIN_SIZE {
            match compress_lz4(&raw_payload) {
                Ok(compressed) if compressed.len() + COMPRESSION_THRESHOLD < raw_payload.len() => {
                    (MessageFlags::Compressed, compressed)
                }
                _ => (MessageFlags::None, raw_payload.clone()),
            }
        } else {
            (MessageFlags::None, raw_payload.clone())
        };

        let header = MessageHeader {
            flags,
            length: wire_payload.len() as u32,
            ..self.header.clone()
        };

        let mut bytes = header.to_bytes();
        bytes.extend_from_slice(&wire_payload);
        Ok(bytes)
    }

    /// Deserializes a message from bytes, decompressing the payload if flagged
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        let (mut header, prefix_len) = MessageHeader::from_bytes(bytes)?;

        let wire_payload = bytes
            .get(prefix_len..prefix_len + header.length as usize)
            .ok_or_else(|| Error::Protocol("Incomplete message".to_string()))?;

        let payload_bytes = if header.flags.is_compressed() {
            decompress_lz4(wire_payload, super::MAX_MESSAGE_SIZE)
                .map_err(|e| Error::Protocol(e.to_string()))?
        } else {
            wire_payload.to_vec()
        };

        header.length = payload_bytes.len() as u32;
        header.checksum = MessageHeader::calculate_checksum(&payload_bytes);
        header.validate(&payload_bytes)?;

        let payload = ProtocolMessage::from_bytes(&header.command, &payload_bytes)?;

        Ok(Self { header, payload })
    }

    /// Gets the serialized size of the message
    pub fn serialized_size(&self) -> usize {
        self.to_bytes().map(|bytes| bytes.len()).unwrap_or(0)
    }
}
