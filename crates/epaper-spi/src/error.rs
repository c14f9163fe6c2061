//! Driver error type

/// Errors returned by the e-paper driver.
///
/// Transient "not done yet" conditions (panel busy, transfer slice budget
/// exceeded) are not errors; they surface as [`crate::CycleStatus::InProgress`]
/// from `advance()`. Everything here is either fatal at setup time or a bus
/// fault mid-cycle; both permanently disable the driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DriverError {
    /// SPI communication error.
    Communication,
    /// GPIO operation error.
    Gpio,
    /// Frame buffer allocation failed.
    BufferAlloc,
    /// Init sequence was truncated or declared more data bytes than remain.
    MalformedInitSequence,
    /// Operation not valid in the current driver state.
    InvalidState,
}

impl core::fmt::Display for DriverError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Communication => write!(f, "SPI communication error"),
            Self::Gpio => write!(f, "GPIO error"),
            Self::BufferAlloc => write!(f, "Frame buffer allocation failed"),
            Self::MalformedInitSequence => write!(f, "Malformed init sequence"),
            Self::InvalidState => write!(f, "Invalid driver state"),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for DriverError {}
