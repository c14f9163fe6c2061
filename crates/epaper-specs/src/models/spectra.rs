//! Spectra E6 panel family
//!
//! Six-color (black/white/yellow/red/blue/green) panels driven by the
//! Spectra E6 controller. Init values are the vendor reference sequence.

use crate::{DisplayType, PanelSpec};

/// Vendor init sequence for Spectra E6 at 800×480.
///
/// Record format: `cmd, count, data...`. The 0x61 record encodes the panel
/// resolution (width 0x0320 = 800, height 0x01E0 = 480) and must match the
/// descriptor dimensions.
#[rustfmt::skip]
pub const SPECTRA_E6_INIT: &[u8] = &[
    0xAA, 0x06, 0x49, 0x55, 0x20, 0x08, 0x09, 0x18,
    0x01, 0x01, 0x3F,
    0x00, 0x02, 0x5F, 0x69,
    0x03, 0x04, 0x00, 0x54, 0x00, 0x44,
    0x05, 0x04, 0x40, 0x1F, 0x1F, 0x2C,
    0x06, 0x04, 0x6F, 0x1F, 0x17, 0x49,
    0x08, 0x04, 0x6F, 0x1F, 0x1F, 0x22,
    0x30, 0x01, 0x03,
    0x50, 0x01, 0x3F,
    0x60, 0x02, 0x02, 0x00,
    0x61, 0x04, 0x03, 0x20, 0x01, 0xE0,
    0x84, 0x01, 0x01,
    0xE3, 0x01, 0x2F,
];

/// Generic Spectra E6 800×480 panel.
///
/// Two reset cycles: the controller wants a double reset pulse before it
/// reliably accepts the init sequence.
pub const SPECTRA_E6_800X480: PanelSpec = PanelSpec {
    name: "spectra-e6",
    width: 800,
    height: 480,
    display_type: DisplayType::Color,
    init_sequence: SPECTRA_E6_INIT,
    reset_duration_ms: 200,
    reset_cycles: 2,
};

/// Seeed reTerminal E1002 (7.3" Spectra E6, 800×480).
pub const SEEED_RETERMINAL_E1002: PanelSpec = PanelSpec {
    name: "Seeed-reTerminal-E1002",
    ..SPECTRA_E6_800X480
};
