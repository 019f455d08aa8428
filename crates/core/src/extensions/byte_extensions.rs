// software distributed under the MIT software license, see the
// accompanying file LICENSE in the main directory of the
// modifications are permitted.

//! Extension traits for byte arrays.

use crate::CoreError;

/// Extension trait for byte arrays.
pub trait ByteExtensions {
    /// Converts the byte array to a hexadecimal string.
    ///
    /// # Arguments
    ///
    /// * `reverse` - Whether to reverse the byte array before conversion.
    ///
    /// # Returns
    ///
    /// A hexadecimal string representation of the byte array.
    fn to_hex_string(&self, reverse: bool) -> String;
}

impl ByteExtensions for [u8] {
    fn to_hex_string(&self, reverse: bool) -> String {
        if reverse {
            let mut reversed = self.to_vec();
            reversed.reverse();
            hex::encode(reversed)
        } else {
            hex::encode(self)
        }
    }
}

/// Extension trait for hexadecimal strings.
pub trait HexStringExtensions {
    /// Converts the hexadecimal string to a byte array.
    ///
    /// # Returns
    ///
    /// A Result containing either the byte array or an error.
    fn hex_to_bytes(&self) -> Result<Vec<u8>, CoreError>;

    /// Converts the hexadecimal string to a byte array and reverses it.
    ///
    /// # Returns
    ///
    /// A Result containing either the reversed byte array or an error.
    fn hex_to_bytes_reversed(&self) -> Result<Vec<u8>, CoreError>;
}

impl HexStringExtensions for str {
    fn hex_to_bytes(&self) -> Result<Vec<u8>, CoreError> {
        hex::decode(self).map_err(|e| CoreError::InvalidFormat {
            message: e.to_string(),
        })
    }

    fn hex_to_bytes_reversed(&self) -> Result<Vec<u8>, CoreError> {
        let mut bytes = HexStringExtensions::hex_to_bytes(self)?;
        bytes.reverse();
        Ok(bytes)
    }
}
