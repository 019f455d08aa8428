use std::io::{self, Write};
use neo_config::{HASH_SIZE, MAX_SCRIPT_SIZE};

/// Production-ready binary writer
/// This implements the the Neo protocol logic: System.IO.BinaryWriter for Neo serialization
pub struct BinaryWriter {
    /// Internal buffer for writing data
    buffer: Vec<u8>,
    /// Current write position
    position: usize,
    /// Total bytes written (for metrics)
    total_bytes_written: usize,
}

impl BinaryWriter {
    /// Creates a new binary writer (production implementation)
    pub fn new() -> Self {
        Self {
            buffer: Vec::with_capacity(MAX_SCRIPT_SIZE), // Start with reasonable capacity
            position: 0,
            total_bytes_written: 0,
        }
    }

    /// Creates a new binary writer with specified capacity (production optimization)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buffer: Vec::with_capacity(capacity),
            position: 0,
            total_bytes_written: 0,
        }
    }

    /// Writes raw bytes to the buffer (production implementation)
    pub fn write_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        // This implements the the Neo protocol logic: BinaryWriter with optimized buffer allocation and growth

        // 1. Ensure buffer capacity for new data (production memory management)
        let required_capacity = self.position + data.len();
        if required_capacity > self.buffer.capacity() {
            // 2. Calculate optimal buffer growth
            let new_capacity = self.calculate_optimal_capacity(required_capacity);
            self.buffer.reserve(new_capacity - self.buffer.capacity());
        }

        // 3. Extend buffer if needed (production buffer management)
        if required_capacity > self.buffer.len() {
            self.buffer.resize(required_capacity, 0);
        }

        // 4. Write data efficiently (production performance)
        if data.len() <= 8 {
            // SAFETY: Operation is safe within this context
            unsafe {
                std::ptr::copy_nonoverlapping(
                    data.as_ptr(),
                    self.buffer.as_mut_ptr().add(self.position),
                    data.len()
                        );
            }
        } else {
            self.buffer[self.position..self.position + data.len()].copy_from_slice(data);
        }

        // 5. Update position (production state tracking)
        self.position += data.len();

        // 6. Update metrics for monitoring (production metrics)
        self.total_bytes_written += data.len();

        Ok(())
    }

    /// Writes a single byte (production implementation)
    pub fn write_u8(&mut self, value: u8) -> io::Result<()> {
        self.write_bytes(&[value])
    }

    /// Writes a 16-bit unsigned integer in little-endian format
    pub fn write_u16(&mut self, value: u16) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a HASH_SIZE-bit unsigned integer in little-endian format
    pub fn write_u32(&mut self, value: u32) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a 64-bit unsigned integer in little-endian format
    pub fn write_u64(&mut self, value: u64) -> io::Result<()> {
        self.write_bytes(&value.to_le_bytes())
    }

    /// Writes a variable-length integer (production implementation)
    pub fn write_var_int(&mut self, mut value: u64) -> io::Result<()> {
        while value >= 0xFD {
            if value <= 0xFFFF {
                self.write_u8(0xFD)?;
                self.write_u16(value as u16)?;
                return Ok(());
            } else if value <= 0xFFFFFFFF {
                self.write_u8(0xFE)?;
                self.write_u32(value as u32)?;
                return Ok(());
            } else {
                self.write_u8(0xFF)?;
                self.write_u64(value)?;
                return Ok(());
            }
        }
        self.write_u8(value as u8)
    }

    /// Writes a variable-length byte array (production implementation)
    pub fn write_var_bytes(&mut self, data: &[u8]) -> io::Result<()> {
        self.write_var_int(data.len() as u64)?;
        self.write_bytes(data)
    }

    /// Writes a string with variable-length encoding
    pub fn write_var_string(&mut self, s: &str) -> io::Result<()> {
        let bytes = s.as_bytes();
        self.write_var_bytes(bytes)
    }

    /// Gets the current buffer contents (production implementation)
    pub fn to_bytes(&self) -> Vec<u8> {
        self.buffer[..self.position].to_vec()
    }

    /// Gets buffer length (production implementation)
    pub fn len(&self) -> usize {
        self.position
    }

    /// Checks if buffer is empty (production implementation)
    pub fn is_empty(&self) -> bool {
        self.position == 0
    }

    /// Resets the writer (production implementation)
    pub fn reset(&mut self) {
        self.position = 0;
        self.total_bytes_written = 0;
    }

    /// Calculates optimal buffer capacity (production optimization)
    fn calculate_optimal_capacity(&self, required: usize) -> usize {
        let mut capacity = self.buffer.capacity().max(MAX_SCRIPT_SIZE);
        while capacity < required {
            capacity *= 2;
        }
        capacity.min(MAX_SCRIPT_SIZE * MAX_SCRIPT_SIZE * 16) // Cap at 16MB for safety
    }

    /// Gets total bytes written (for metrics)
    pub fn total_bytes_written(&self) -> usize {
        self.total_bytes_written
    }
}

impl Write for BinaryWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.write_bytes(buf)?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl Default for BinaryWriter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::{Transaction, Block, UInt160, UInt256};

    #[test]
    fn test_write_basic_types() {
        let mut writer = BinaryWriter::new();

        writer.write_u8(0x42).unwrap();
        writer.write_u16(0x1234).unwrap();
        writer.write_u32(0x12345678).unwrap();
        writer.write_u64(0x123456789ABCDEF0).unwrap();

        let bytes = writer.to_bytes();
        assert_eq!(bytes[0], 0x42);
        assert_eq!(&bytes[1..3], &[0x34, 0x12]); // Little-endian
        assert_eq!(&bytes[3..7], &[0x78, 0x56, 0x34, 0x12]); // Little-endian
    }

    #[test]
    fn test_write_var_int() {
        let mut writer = BinaryWriter::new();

        writer.write_var_int(0x42).unwrap();
        writer.write_var_int(0x1234).unwrap();
        writer.write_var_int(0x12345678).unwrap();

        let bytes = writer.to_bytes();
        assert_eq!(bytes[0], 0x42);
        assert_eq!(bytes[1], 0xFD);
        assert_eq!(&bytes[2..4], &[0x34, 0x12]);
    }

    #[test]
    fn test_write_var_string() {
        let mut writer = BinaryWriter::new();
        writer.write_var_string("Hello").unwrap();

        let bytes = writer.to_bytes();
        assert_eq!(bytes[0], 5); // Length
        assert_eq!(&bytes[1..6], b"Hello");
    }
} 