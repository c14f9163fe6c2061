//! Command/data transport to the panel controller
//!
//! E-paper controllers multiplex commands and parameters over the same SPI
//! bus, discriminated by the DC (data/command) pin. [`DisplayInterface`]
//! abstracts that transport so the state machine and the per-panel command
//! sets never touch pins directly, and so tests can substitute a recorder.

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiDevice;

use crate::error::DriverError;

/// Byte-level transport for controller commands and their payloads.
pub trait DisplayInterface {
    /// Send a one-byte command with the DC pin low.
    fn send_command(&mut self, command: u8) -> Result<(), DriverError>;

    /// Send payload bytes with the DC pin high.
    fn send_data(&mut self, data: &[u8]) -> Result<(), DriverError>;

    /// Send a command immediately followed by its payload.
    fn cmd_data(&mut self, command: u8, data: &[u8]) -> Result<(), DriverError> {
        self.send_command(command)?;
        self.send_data(data)
    }
}

/// SPI + DC pin implementation of [`DisplayInterface`].
///
/// The `SpiDevice` owns chip-select framing; this type only toggles DC and
/// writes bytes.
#[derive(Debug)]
pub struct SpiInterface<SPI, DC> {
    spi: SPI,
    dc: DC,
}

impl<SPI, DC> SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    /// Wrap an SPI device and a DC pin.
    pub fn new(spi: SPI, dc: DC) -> Self {
        Self { spi, dc }
    }

    /// Consume the interface, returning the SPI device and DC pin.
    pub fn release(self) -> (SPI, DC) {
        (self.spi, self.dc)
    }
}

impl<SPI, DC> DisplayInterface for SpiInterface<SPI, DC>
where
    SPI: SpiDevice,
    DC: OutputPin,
{
    fn send_command(&mut self, command: u8) -> Result<(), DriverError> {
        self.dc.set_low().map_err(|_| DriverError::Gpio)?;
        self.spi
            .write(&[command])
            .map_err(|_| DriverError::Communication)
    }

    fn send_data(&mut self, data: &[u8]) -> Result<(), DriverError> {
        if data.is_empty() {
            return Ok(());
        }
        self.dc.set_high().map_err(|_| DriverError::Gpio)?;
        self.spi.write(data).map_err(|_| DriverError::Communication)
    }
}
