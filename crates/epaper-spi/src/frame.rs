//! Drawing handle passed to the render callback
//!
//! [`Frame`] borrows the driver's buffer for the duration of the render
//! phase and exposes it as an `embedded-graphics` [`DrawTarget`], so callers
//! draw with the usual primitives and never see the packed representation.

use core::convert::Infallible;
use core::marker::PhantomData;

use embedded_graphics::prelude::*;
use epaper_specs::PanelSpec;

use crate::buffer::FrameBuffer;
use crate::variant::PanelVariant;

/// Mutable view of the frame buffer, typed by the panel family's color.
pub struct Frame<'a, V: PanelVariant> {
    buffer: &'a mut FrameBuffer,
    spec: &'static PanelSpec,
    _variant: PhantomData<V>,
}

impl<'a, V: PanelVariant> Frame<'a, V> {
    pub(crate) fn new(buffer: &'a mut FrameBuffer, spec: &'static PanelSpec) -> Self {
        Self {
            buffer,
            spec,
            _variant: PhantomData,
        }
    }

    /// Fill the whole frame with one color.
    pub fn fill(&mut self, color: V::Color) {
        V::fill(self.buffer, color);
    }

    /// Reset the frame to the family's blank pattern.
    pub fn clear_to_blank(&mut self) {
        self.buffer.fill(V::blank_byte());
    }

    /// Geometry of the panel this frame targets.
    pub fn spec(&self) -> &'static PanelSpec {
        self.spec
    }
}

impl<V: PanelVariant> OriginDimensions for Frame<'_, V> {
    fn size(&self) -> Size {
        Size::new(u32::from(self.spec.width), u32::from(self.spec.height))
    }
}

impl<V: PanelVariant> DrawTarget for Frame<'_, V> {
    type Color = V::Color;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x < 0 || point.y < 0 {
                continue;
            }
            V::set_pixel(self.buffer, self.spec, point.x as u32, point.y as u32, color);
        }
        Ok(())
    }
}
