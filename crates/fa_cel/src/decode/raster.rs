use crate::{
    dimensions::FrameDimensions,
    types::{Image, Rgba, TRANSPARENT},
};

/// Write position moving left-to-right from the bottom row up.
///
/// Writes outside of the image are dropped but still advance the cursor.
#[derive(Debug)]
pub(crate) struct RasterCursor {
    width: usize,
    height: usize,
    x: usize,
    y: isize,
    pixels: Vec<Rgba>,
}

impl RasterCursor {
    pub(crate) fn new(dimensions: FrameDimensions) -> Self {
        let width = dimensions.width as usize;
        let height = dimensions.height as usize;
        Self {
            width,
            height,
            x: 0,
            y: height as isize - 1,
            pixels: vec![TRANSPARENT; dimensions.area()],
        }
    }

    /// Whether the cursor moved above the top row
    pub(crate) fn exhausted(&self) -> bool {
        self.y < 0
    }

    #[inline]
    pub(crate) fn put(&mut self, pixel: Rgba) {
        if self.y >= 0 && self.x < self.width {
            self.pixels[self.y as usize * self.width + self.x] = pixel;
        }

        self.x += 1;
        if self.x >= self.width {
            self.x = 0;
            self.y -= 1;
        }
    }

    pub(crate) fn repeat(&mut self, pixel: Rgba, count: usize) {
        for _ in 0..count {
            self.put(pixel);
        }
    }

    pub(crate) fn into_image(self) -> Image {
        Image::from_pixels(self.width as u32, self.height as u32, self.pixels)
    }
}
