//! Spectra 6 (E6) color panel family
//!
//! Six-entry ink palette, two pixels packed per buffer byte. Incoming RGB is
//! reduced to the palette by a fixed corner-of-the-cube quantizer: near-gray
//! pixels split to black or white on luminance, everything else snaps to the
//! nearest saturated corner, with cyan folded into green and magenta into
//! red since the ink cannot produce either.

use embedded_graphics::pixelcolor::{Rgb888, RgbColor};
use epaper_specs::PanelSpec;

use crate::buffer::FrameBuffer;
use crate::error::DriverError;
use crate::interface::DisplayInterface;
use crate::variant::PanelVariant;

/// Max channel spread below which a pixel counts as gray.
const GRAY_THRESHOLD: u16 = 50;
/// Channel sum splitting gray pixels into black vs white (half of 765).
const LUMINANCE_MIDPOINT: u16 = 382;
/// Channel level above which a channel counts as "on".
const CHANNEL_ON: u8 = 128;

/// Two blank (white) pixels per byte.
const BLANK_BYTE: u8 = 0x11;

/// Controller codes for the six Spectra inks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[repr(u8)]
pub enum Spectra6Code {
    /// Black ink.
    Black = 0x0,
    /// White ink.
    White = 0x1,
    /// Yellow ink.
    Yellow = 0x2,
    /// Red ink.
    Red = 0x3,
    /// Blue ink.
    Blue = 0x5,
    /// Green ink.
    Green = 0x6,
}

/// Reduce an RGB pixel to the nearest Spectra 6 ink.
pub fn quantize(color: Rgb888) -> Spectra6Code {
    let r = color.r();
    let g = color.g();
    let b = color.b();

    let max = r.max(g).max(b);
    let min = r.min(g).min(b);
    if u16::from(max) - u16::from(min) < GRAY_THRESHOLD {
        let sum = u16::from(r) + u16::from(g) + u16::from(b);
        return if sum > LUMINANCE_MIDPOINT {
            Spectra6Code::White
        } else {
            Spectra6Code::Black
        };
    }

    match (r > CHANNEL_ON, g > CHANNEL_ON, b > CHANNEL_ON) {
        (true, true, false) => Spectra6Code::Yellow,
        (true, false, false) => Spectra6Code::Red,
        (false, true, false) => Spectra6Code::Green,
        (false, false, true) => Spectra6Code::Blue,
        // The panel has no cyan or magenta ink.
        (false, true, true) => Spectra6Code::Green,
        (true, false, true) => Spectra6Code::Red,
        (true, true, true) => Spectra6Code::White,
        (false, false, false) => Spectra6Code::Black,
    }
}

/// Marker type for Spectra 6 panels.
#[derive(Debug)]
pub struct Spectra6;

impl PanelVariant for Spectra6 {
    type Color = Rgb888;

    fn buffer_len(spec: &PanelSpec) -> usize {
        spec.pixel_count() as usize / 2
    }

    fn blank_byte() -> u8 {
        BLANK_BYTE
    }

    fn set_pixel(buffer: &mut FrameBuffer, spec: &PanelSpec, x: u32, y: u32, color: Rgb888) {
        if x >= u32::from(spec.width) || y >= u32::from(spec.height) {
            return;
        }
        let index = (y * u32::from(spec.width) + x) as usize;
        // An odd pixel count truncates to a buffer with no room for the
        // final pixel; drop it rather than index past the end.
        if index / 2 >= buffer.len() {
            return;
        }
        let code = quantize(color) as u8;
        let byte = &mut buffer[index / 2];
        if index % 2 == 0 {
            *byte = (*byte & 0x0F) | (code << 4);
        } else {
            *byte = (*byte & 0xF0) | code;
        }
    }

    fn fill(buffer: &mut FrameBuffer, color: Rgb888) {
        let code = quantize(color) as u8;
        buffer.fill(code << 4 | code);
    }

    fn begin_transfer<DI: DisplayInterface + ?Sized>(
        interface: &mut DI,
    ) -> Result<(), DriverError> {
        interface.send_command(0x10)
    }

    fn power_on<DI: DisplayInterface + ?Sized>(interface: &mut DI) -> Result<(), DriverError> {
        interface.send_command(0x04)
    }

    fn post_power_on<DI: DisplayInterface + ?Sized>(
        interface: &mut DI,
    ) -> Result<(), DriverError> {
        interface.cmd_data(0x06, &[0x6F, 0x1F, 0x17, 0x27])
    }

    fn refresh_screen<DI: DisplayInterface + ?Sized>(
        interface: &mut DI,
    ) -> Result<(), DriverError> {
        interface.cmd_data(0x12, &[0x00])
    }

    fn power_off<DI: DisplayInterface + ?Sized>(interface: &mut DI) -> Result<(), DriverError> {
        interface.cmd_data(0x02, &[0x00])
    }

    fn deep_sleep<DI: DisplayInterface + ?Sized>(interface: &mut DI) -> Result<(), DriverError> {
        interface.cmd_data(0x07, &[0xA5])
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use epaper_specs::DisplayType;

    use super::*;

    static TEST_SPEC: PanelSpec = PanelSpec {
        name: "test 4x2",
        width: 4,
        height: 2,
        display_type: DisplayType::Color,
        init_sequence: &[],
        reset_duration_ms: 1,
        reset_cycles: 1,
    };

    #[test]
    fn saturated_corners_map_to_their_inks() {
        assert_eq!(quantize(Rgb888::new(255, 0, 0)), Spectra6Code::Red);
        assert_eq!(quantize(Rgb888::new(0, 255, 0)), Spectra6Code::Green);
        assert_eq!(quantize(Rgb888::new(0, 0, 255)), Spectra6Code::Blue);
        assert_eq!(quantize(Rgb888::new(255, 255, 0)), Spectra6Code::Yellow);
    }

    #[test]
    fn missing_inks_fold_to_neighbours() {
        // Cyan folds to green, magenta to red.
        assert_eq!(quantize(Rgb888::new(0, 255, 255)), Spectra6Code::Green);
        assert_eq!(quantize(Rgb888::new(255, 0, 255)), Spectra6Code::Red);
    }

    #[test]
    fn near_gray_splits_on_luminance() {
        assert_eq!(quantize(Rgb888::new(0, 0, 0)), Spectra6Code::Black);
        assert_eq!(quantize(Rgb888::new(255, 255, 255)), Spectra6Code::White);
        assert_eq!(quantize(Rgb888::new(120, 130, 125)), Spectra6Code::Black);
        assert_eq!(quantize(Rgb888::new(130, 140, 135)), Spectra6Code::White);
        // Spread of exactly 50 is saturated, not gray.
        assert_eq!(quantize(Rgb888::new(178, 128, 128)), Spectra6Code::Red);
    }

    #[test]
    fn dim_saturated_pixels_snap_to_black() {
        assert_eq!(quantize(Rgb888::new(100, 20, 20)), Spectra6Code::Black);
    }

    #[test]
    fn pixels_pack_two_per_byte_even_index_high_nibble() {
        let mut buf = FrameBuffer::try_new(Spectra6::buffer_len(&TEST_SPEC)).unwrap();
        buf.fill(BLANK_BYTE);

        Spectra6::set_pixel(&mut buf, &TEST_SPEC, 0, 0, Rgb888::new(255, 0, 0));
        Spectra6::set_pixel(&mut buf, &TEST_SPEC, 1, 0, Rgb888::new(0, 0, 255));
        Spectra6::set_pixel(&mut buf, &TEST_SPEC, 3, 1, Rgb888::new(255, 255, 0));

        // Red (0x3) in the high nibble, blue (0x5) in the low nibble.
        assert_eq!(buf[0], 0x35);
        assert_eq!(buf[1], BLANK_BYTE);
        // Last pixel of the frame sits in the low nibble of the last byte.
        assert_eq!(buf[3], 0x12);
    }

    #[test]
    fn out_of_bounds_pixels_are_ignored() {
        let mut buf = FrameBuffer::try_new(Spectra6::buffer_len(&TEST_SPEC)).unwrap();
        buf.fill(BLANK_BYTE);

        Spectra6::set_pixel(&mut buf, &TEST_SPEC, 4, 0, Rgb888::new(255, 0, 0));
        Spectra6::set_pixel(&mut buf, &TEST_SPEC, 0, 2, Rgb888::new(255, 0, 0));

        assert!(buf.as_bytes().iter().all(|&b| b == BLANK_BYTE));
    }

    #[test]
    fn odd_pixel_count_never_writes_past_the_buffer() {
        static ODD_SPEC: PanelSpec = PanelSpec {
            name: "test 3x3",
            width: 3,
            height: 3,
            display_type: DisplayType::Color,
            init_sequence: &[],
            reset_duration_ms: 1,
            reset_cycles: 1,
        };
        // 9 pixels truncate to a 4-byte buffer with no room for the ninth.
        let mut buf = FrameBuffer::try_new(Spectra6::buffer_len(&ODD_SPEC)).unwrap();
        buf.fill(BLANK_BYTE);

        Spectra6::set_pixel(&mut buf, &ODD_SPEC, 2, 2, Rgb888::new(255, 0, 0));
        assert!(buf.as_bytes().iter().all(|&b| b == BLANK_BYTE));

        // The pixel before it still lands normally.
        Spectra6::set_pixel(&mut buf, &ODD_SPEC, 1, 2, Rgb888::new(255, 0, 0));
        assert_eq!(buf[3], 0x13);
    }

    #[test]
    fn fill_repeats_the_code_in_both_nibbles() {
        let mut buf = FrameBuffer::try_new(Spectra6::buffer_len(&TEST_SPEC)).unwrap();
        Spectra6::fill(&mut buf, Rgb888::new(0, 255, 0));
        assert!(buf.as_bytes().iter().all(|&b| b == 0x66));
    }

    #[test]
    fn buffer_len_is_half_the_pixel_count() {
        assert_eq!(Spectra6::buffer_len(&TEST_SPEC), 4);
    }
}
