//! Mock UART implementation for testing

use crate::platform::{
    error::{PlatformError, UartError},
    traits::UartInterface,
    Result,
};
use heapless::{Deque, Vec};

/// Bytes each direction can hold before the mock starts dropping
const MOCK_UART_CAPACITY: usize = 512;

/// Mock UART implementation
///
/// Provides in-memory buffers for transmit and receive data,
/// allowing unit tests to verify UART operations without hardware.
#[derive(Debug, Default)]
pub struct MockUart {
    tx_buffer: Vec<u8, MOCK_UART_CAPACITY>,
    rx_buffer: Deque<u8, MOCK_UART_CAPACITY>,
    fail_reads: bool,
    fail_writes: bool,
}

impl MockUart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Get transmitted data (for test verification)
    pub fn tx_buffer(&self) -> &[u8] {
        &self.tx_buffer
    }

    /// Inject receive data (for test setup)
    ///
    /// Bytes past the receive capacity are dropped, like a hardware FIFO overrun.
    pub fn inject_rx_data(&mut self, data: &[u8]) {
        for &byte in data {
            if self.rx_buffer.push_back(byte).is_err() {
                break;
            }
        }
    }

    /// Bytes still waiting in the receive buffer
    pub fn rx_pending(&self) -> usize {
        self.rx_buffer.len()
    }

    /// Make every subsequent read fail
    pub fn set_fail_reads(&mut self, fail: bool) {
        self.fail_reads = fail;
    }

    /// Make every subsequent write fail
    pub fn set_fail_writes(&mut self, fail: bool) {
        self.fail_writes = fail;
    }
}

impl UartInterface for MockUart {
    fn write(&mut self, data: &[u8]) -> Result<usize> {
        if self.fail_writes {
            return Err(PlatformError::Uart(UartError::WriteFailed));
        }
        let room = MOCK_UART_CAPACITY - self.tx_buffer.len();
        let accepted = core::cmp::min(room, data.len());
        self.tx_buffer
            .extend_from_slice(&data[..accepted])
            .map_err(|_| PlatformError::Uart(UartError::WriteFailed))?;
        Ok(accepted)
    }

    fn read(&mut self, buffer: &mut [u8]) -> Result<usize> {
        if self.fail_reads {
            return Err(PlatformError::Uart(UartError::ReadFailed));
        }

        let mut count = 0;
        while count < buffer.len() {
            match self.rx_buffer.pop_front() {
                Some(byte) => {
                    buffer[count] = byte;
                    count += 1;
                }
                None => break,
            }
        }
        Ok(count)
    }

    fn available(&self) -> bool {
        !self.rx_buffer.is_empty()
    }
}
