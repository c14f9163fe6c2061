//! Panel descriptor types
//!
//! Defines the per-model characteristics the driver needs: geometry, display
//! type, init bytecode and reset-pulse timing.

/// Complete descriptor of one e-paper panel model.
///
/// Built once as a `const` table (see [`crate::models`]) and borrowed for the
/// process lifetime; the driver never mutates it.
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct PanelSpec {
    /// Model name (e.g. "spectra-e6"), used in log output.
    pub name: &'static str,

    /// Width in pixels.
    pub width: u16,

    /// Height in pixels.
    pub height: u16,

    /// Display type (drives the pixel encoding a variant applies).
    pub display_type: DisplayType,

    /// Vendor initialisation bytecode.
    ///
    /// Format: repeated records of `[cmd, n, data × (n & 0x7F)]`, where a
    /// second byte of [`crate::DELAY_FLAG`] instead means "delay `cmd`
    /// milliseconds".
    pub init_sequence: &'static [u8],

    /// Reset-pulse hold duration in milliseconds.
    pub reset_duration_ms: u32,

    /// Number of low/high reset cycles.
    ///
    /// A configured 0 is treated as 1 by the driver.
    pub reset_cycles: u8,
}

impl PanelSpec {
    /// Total number of pixels on the panel.
    pub const fn pixel_count(&self) -> u32 {
        self.width as u32 * self.height as u32
    }
}

/// Pixel encoding family of a panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum DisplayType {
    /// 1 bit per pixel, black/white.
    Binary,
    /// Multiple gray levels per pixel.
    Grayscale,
    /// Multi-color palette (e.g. Spectra 6).
    Color,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pixel_count_is_width_times_height() {
        let spec = PanelSpec {
            name: "test",
            width: 800,
            height: 480,
            display_type: DisplayType::Color,
            init_sequence: &[],
            reset_duration_ms: 200,
            reset_cycles: 1,
        };
        assert_eq!(spec.pixel_count(), 384_000);
    }
}
