//! Byte stream sources

/// Non-blocking source of raw telemetry bytes
///
/// Implemented over the RS485 UART by the firmware and over canned
/// buffers in tests. `read` never waits: it returns whatever is
/// pending, or zero when nothing is.
pub trait ByteSource {
    /// Transport error type
    type Error;

    /// Read pending bytes into `buf`
    ///
    /// Returns the number of bytes written.
    fn read(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;
}
