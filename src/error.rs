/// Wrapper for problems when communicating with the ADS7828.
#[derive(Debug, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error<E> {
    /// The bus transfer failed (for example a timeout or a NACK).
    ///
    /// The enclosed value is the error reported by the underlying
    /// [`I2c`](embedded_hal::i2c::I2c) implementation, unchanged. The driver
    /// never retries or reinterprets bus failures, and a failed transfer
    /// leaves the driver state exactly as it was before the call.
    I2c(E),
}
