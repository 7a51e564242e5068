//! UART interface trait
//!
//! Each ranging anchor and the command console is one UART. The control
//! loop never blocks on a UART: it checks `available` and reads what is there.

use crate::platform::Result;

/// UART interface trait
///
/// # Safety Invariants
///
/// - Only one owner per UART instance
/// - `read` never waits for data; it returns how many bytes were copied
pub trait UartInterface {
    /// Write bytes, returning how many were accepted
    fn write(&mut self, data: &[u8]) -> Result<usize>;

    /// Read up to `buffer.len()` bytes that have already arrived
    fn read(&mut self, buffer: &mut [u8]) -> Result<usize>;

    /// Bytes are waiting to be read
    fn available(&self) -> bool;

    /// Write `line` followed by CR LF
    fn write_line(&mut self, line: &str) -> Result<()> {
        self.write(line.as_bytes())?;
        self.write(b"\r\n")?;
        Ok(())
    }
}
