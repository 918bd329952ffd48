//! Base types for structure of CEL files.

use binrw::BinRead;

/// Header word that marks an archive made of eight groups
pub const GROUPED_ARCHIVE_MARKER: u32 = 32;

/// Number of groups in a grouped archive
pub const GROUP_COUNT: usize = 8;

/// An RGBA pixel
pub type Rgba = [u8; 4];

/// A pixel with no color and no coverage
pub const TRANSPARENT: Rgba = [0, 0, 0, 0];

/// Transparent pixel written by the right-facing tile margins.
///
/// Kept distinct from [`TRANSPARENT`] so tile highlighting can tell the explicit margin apart
/// from the implicit one.
pub const MARKED_TRANSPARENT: Rgba = [0, 255, 0, 0];

/// Group table of a grouped archive
///
/// Only present when the first word of the file equals [`GROUPED_ARCHIVE_MARKER`]. All data is stored
/// in little endian format
#[derive(BinRead, Debug, Copy, Clone, PartialEq, Eq)]
#[br(little)]
pub struct GroupTable {
    /// Absolute offset of every group
    pub offsets: [u32; GROUP_COUNT],
}

/// Frame table at the start of every group
///
/// `available` is the number of bytes between the start of the table and the end of the archive.
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
#[br(little, import(available: u64))]
pub struct FrameTable {
    /// The number of frames in the group
    #[br(assert(
        (u64::from(frame_count) + 2) * 4 <= available,
        "frame table of {} frames does not fit in {} bytes",
        frame_count,
        available
    ))]
    pub frame_count: u32,

    /// Start offset of every frame relative to the group, followed by the end of the last frame
    #[br(count = frame_count as usize + 1)]
    pub offsets: Vec<u32>,
}

/// A decoded frame
///
/// Pixels are stored row-major with row 0 at the top of the image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Image {
    width: u32,
    height: u32,
    pixels: Vec<Rgba>,
}

impl Image {
    pub(crate) fn from_pixels(width: u32, height: u32, pixels: Vec<Rgba>) -> Self {
        debug_assert_eq!(pixels.len(), width as usize * height as usize);
        Self {
            width,
            height,
            pixels,
        }
    }

    /// Width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// All pixels, row-major from the top row
    pub fn pixels(&self) -> &[Rgba] {
        &self.pixels
    }

    /// The pixel at `(x, y)`, with `y = 0` being the top row
    pub fn get(&self, x: u32, y: u32) -> Option<Rgba> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.pixels
            .get(y as usize * self.width as usize + x as usize)
            .copied()
    }

    /// A single row of pixels, with `y = 0` being the top row
    pub fn row(&self, y: u32) -> Option<&[Rgba]> {
        if y >= self.height {
            return None;
        }
        let width = self.width as usize;
        let start = y as usize * width;
        self.pixels.get(start..start + width)
    }

    /// Raw RGBA bytes, four per pixel
    pub fn as_bytes(&self) -> &[u8] {
        self.pixels.as_flattened()
    }

    /// Consume the image returning its raw RGBA bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.pixels.into_iter().flatten().collect()
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use pretty_assertions::assert_eq;

    use crate::error::Result;
    use crate::types::{FrameTable, GroupTable, Image, TRANSPARENT};

    #[test]
    fn read_group_table() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x20, 0x00, 0x00, 0x00,
            0x30, 0x00, 0x00, 0x00,
            0x40, 0x00, 0x00, 0x00,
            0x50, 0x00, 0x00, 0x00,
            0x60, 0x00, 0x00, 0x00,
            0x70, 0x00, 0x00, 0x00,
            0x80, 0x00, 0x00, 0x00,
            0x00, 0x01, 0x00, 0x00,
        ]);

        let expected = GroupTable {
            offsets: [0x20, 0x30, 0x40, 0x50, 0x60, 0x70, 0x80, 0x100],
        };

        assert_eq!(GroupTable::read(&mut input)?, expected);

        Ok(())
    }

    #[test]
    fn read_frame_table() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x02, 0x00, 0x00, 0x00,
            0x10, 0x00, 0x00, 0x00,
            0x14, 0x00, 0x00, 0x00,
            0x1A, 0x00, 0x00, 0x00,
        ]);

        let expected = FrameTable {
            frame_count: 2,
            offsets: vec![0x10, 0x14, 0x1A],
        };

        assert_eq!(FrameTable::read_args(&mut input, (16,))?, expected);

        Ok(())
    }

    #[test]
    fn read_frame_table_larger_than_archive() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0xFF, 0xFF, 0xFF, 0xFF,
            0x10, 0x00, 0x00, 0x00,
        ]);

        assert!(FrameTable::read_args(&mut input, (8,)).is_err());
    }

    #[test]
    fn image_rows_start_at_the_top() {
        let red = [255, 0, 0, 255];
        let image = Image::from_pixels(2, 2, vec![red, TRANSPARENT, TRANSPARENT, red]);

        assert_eq!(image.get(0, 0), Some(red));
        assert_eq!(image.get(1, 1), Some(red));
        assert_eq!(image.get(2, 0), None);
        assert_eq!(image.row(1), Some(&[TRANSPARENT, red][..]));
        assert_eq!(image.as_bytes().len(), 16);
    }
}
