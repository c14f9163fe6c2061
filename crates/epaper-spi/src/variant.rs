//! Per-panel-family behaviour behind a marker trait
//!
//! A panel family fixes the pixel packing, the blank pattern, and the handful
//! of controller commands the refresh cycle issues. Families are zero-sized
//! marker types; everything is a static method so the driver carries no
//! per-variant state.

use embedded_graphics::pixelcolor::PixelColor;
use epaper_specs::PanelSpec;

use crate::buffer::FrameBuffer;
use crate::error::DriverError;
use crate::interface::DisplayInterface;

/// Panel family: pixel format plus refresh cycle command set.
pub trait PanelVariant {
    /// Color type the family accepts when drawing.
    type Color: PixelColor;

    /// Packed buffer length in bytes for the given panel geometry.
    fn buffer_len(spec: &PanelSpec) -> usize;

    /// Byte pattern of an all-blank buffer.
    fn blank_byte() -> u8;

    /// Pack one pixel into the buffer. Coordinates outside the panel are
    /// ignored.
    fn set_pixel(buffer: &mut FrameBuffer, spec: &PanelSpec, x: u32, y: u32, color: Self::Color);

    /// Overwrite the whole buffer with one color.
    fn fill(buffer: &mut FrameBuffer, color: Self::Color);

    /// Command opening the frame RAM write window.
    fn begin_transfer<DI: DisplayInterface + ?Sized>(interface: &mut DI)
        -> Result<(), DriverError>;

    /// Enable the panel power rails.
    fn power_on<DI: DisplayInterface + ?Sized>(interface: &mut DI) -> Result<(), DriverError>;

    /// Family-specific follow-up after power-on. Defaults to nothing.
    fn post_power_on<DI: DisplayInterface + ?Sized>(
        interface: &mut DI,
    ) -> Result<(), DriverError> {
        let _ = interface;
        Ok(())
    }

    /// Trigger the physical ink refresh.
    fn refresh_screen<DI: DisplayInterface + ?Sized>(interface: &mut DI)
        -> Result<(), DriverError>;

    /// Disable the panel power rails.
    fn power_off<DI: DisplayInterface + ?Sized>(interface: &mut DI) -> Result<(), DriverError>;

    /// Put the controller into deep sleep.
    fn deep_sleep<DI: DisplayInterface + ?Sized>(interface: &mut DI) -> Result<(), DriverError>;
}
