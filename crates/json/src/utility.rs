/// Utility functions for JSON processing
///Json.Utility class

/// Strict UTF-8 encoding/decoding utilities
pub struct StrictUtf8;

impl StrictUtf8 {
    /// Converts a string to UTF-8 bytes
    pub fn get_bytes(s: &str) -> Vec<u8> {
        s.as_bytes().to_vec()
    }

    /// Converts UTF-8 bytes to a string
    /// Returns an error if the bytes are not valid UTF-8
    pub fn get_string(bytes: &[u8]) -> Result<String, std::str::Utf8Error> {
        std::str::from_utf8(bytes).map(|s| s.to_string())
    }

    /// Converts UTF-8 bytes to a string, replacing invalid sequences
    pub fn get_string_lossy(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).to_string()
    }
}
