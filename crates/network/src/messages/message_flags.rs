//! Message header flags (mirrors `Neo.Network.P2P.MessageFlags`).

use crate::NetworkError;
use std::net::SocketAddr;

/// Per-message wire flags. Currently only carries the compression bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MessageFlags {
    None,
    Compressed,
}

impl MessageFlags {
    /// Returns the wire-format byte associated with the flags.
    pub fn to_byte(self) -> u8 {
        match self {
            Self::None => 0x00,
            Self::Compressed => 0x01,
        }
    }

    /// Creates a flags value from its byte representation.
    pub fn from_byte(byte: u8) -> Result<Self, NetworkError> {
        match byte {
            0x00 => Ok(Self::None),
            0x01 => Ok(Self::Compressed),
            other => Err(NetworkError::ProtocolViolation {
                peer: SocketAddr::from(([0, 0, 0, 0], 0)),
                violation: format!("Unknown message flags: 0x{:02x}", other),
            }),
        }
    }

    /// Returns `true` when the payload is LZ4-compressed.
    pub fn is_compressed(self) -> bool {
        matches!(self, Self::Compressed)
    }
}
