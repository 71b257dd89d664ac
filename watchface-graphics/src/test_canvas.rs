//! A pixel-recording draw target large enough for full-face paints, for
//! host tests only.

use std::collections::HashMap;
use std::convert::Infallible;
use watchface_common::display::{self, PixelFormat};
use watchface_common::embedded_graphics::{
    draw_target::DrawTarget,
    geometry::{OriginDimensions, Size},
    Pixel,
};

pub struct TestCanvas {
    pixels: HashMap<(i32, i32), PixelFormat>,
}

impl TestCanvas {
    pub fn new() -> Self {
        TestCanvas {
            pixels: HashMap::new(),
        }
    }

    pub fn pixel(&self, x: i32, y: i32) -> Option<PixelFormat> {
        self.pixels.get(&(x, y)).copied()
    }

    /// Number of pixels written since creation.
    pub fn touched(&self) -> usize {
        self.pixels.len()
    }

    pub fn all_background(&self) -> bool {
        self.pixels
            .values()
            .all(|color| *color == display::BACKGROUND_COLOR)
    }
}

impl OriginDimensions for TestCanvas {
    fn size(&self) -> Size {
        display::SIZE
    }
}

impl DrawTarget for TestCanvas {
    type Color = PixelFormat;
    type Error = Infallible;

    fn draw_iter<I>(&mut self, pixels: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = Pixel<Self::Color>>,
    {
        for Pixel(point, color) in pixels {
            if point.x >= 0
                && point.y >= 0
                && (point.x as u32) < display::SIZE.width
                && (point.y as u32) < display::SIZE.height
            {
                self.pixels.insert((point.x, point.y), color);
            }
        }
        Ok(())
    }
}
