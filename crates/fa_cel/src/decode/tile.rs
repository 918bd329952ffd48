//! Level tiles.
//!
//! Tiles are 32 pixels wide. Triangles and trapezoids store only the opaque part of every row,
//! some rows being preceded by two padding bytes; the rest of the row is transparent.

use crate::{
    decode::raster::RasterCursor,
    dimensions::FrameDimensions,
    palette::Palette,
    types::{Image, MARKED_TRANSPARENT, TRANSPARENT},
};

const TILE_WIDTH: usize = 32;

/// Bytes making up the triangular rows at the bottom of a trapezoid
const TRAPEZOID_TRIANGLE_SIZE: usize = 256;

/// Which side of a tile is transparent
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Side {
    Left,
    Right,
}

/// Layout of one stored row
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
struct TileRow {
    /// Opaque pixels stored for the row
    opaque: usize,

    /// Whether two padding bytes precede the row
    padded: bool,
}

impl TileRow {
    /// Row `row` of a triangle, counted from the bottom. Row 15 is not stored.
    fn triangle(row: usize, side: Side) -> Self {
        let lower = row < 16;
        let opaque = if lower {
            2 + 2 * row
        } else {
            TILE_WIDTH - 2 * (row - 16)
        };
        let even = row % 2 == 0;
        let padded = match side {
            Side::Left => lower == even,
            Side::Right => lower != even,
        };

        Self { opaque, padded }
    }

    /// Row `row` of the triangular part of a trapezoid, counted from the bottom
    fn trapezoid(row: usize, side: Side) -> Self {
        let even = row % 2 == 0;
        Self {
            opaque: 2 + 2 * row,
            padded: (side == Side::Left) == even,
        }
    }
}

/// Reads palette indices off a frame, running dry instead of failing
struct Reader<'a> {
    frame: &'a [u8],
    pos: usize,
}

impl Reader<'_> {
    fn skip(&mut self, count: usize) {
        self.pos += count;
    }

    fn next_index(&mut self) -> Option<u8> {
        let index = self.frame.get(self.pos).copied();
        self.pos += 1;
        index
    }
}

fn decode_row(
    row: TileRow,
    side: Side,
    reader: &mut Reader,
    cursor: &mut RasterCursor,
    palette: &Palette,
) -> bool {
    if row.padded {
        reader.skip(2);
    }

    let transparent = TILE_WIDTH - row.opaque;
    if side == Side::Left {
        cursor.repeat(TRANSPARENT, transparent);
    }

    for _ in 0..row.opaque {
        let Some(index) = reader.next_index() else {
            return false;
        };
        cursor.put(palette.colour(index));
    }

    if side == Side::Right {
        cursor.repeat(MARKED_TRANSPARENT, transparent);
    }

    true
}

/// Decode a raw 32x32 tile, the last stored row being the top of the image.
pub fn solid(frame: &[u8], palette: &Palette, dimensions: FrameDimensions) -> Image {
    let width = dimensions.width as usize;
    let height = dimensions.height as usize;

    let mut pixels = Vec::with_capacity(dimensions.area());
    for y in 0..height {
        let line = frame.len().checked_sub(width * (y + 1));
        for x in 0..width {
            let pixel = line
                .and_then(|start| frame.get(start + x))
                .map_or(TRANSPARENT, |&index| palette.colour(index));
            pixels.push(pixel);
        }
    }

    Image::from_pixels(dimensions.width, dimensions.height, pixels)
}

/// Decode a triangular tile whose transparent half is on `side`
pub fn triangle(frame: &[u8], palette: &Palette, dimensions: FrameDimensions, side: Side) -> Image {
    let mut cursor = RasterCursor::new(dimensions);
    let mut reader = Reader { frame, pos: 0 };

    for row in (0..=32).filter(|&row| row != 15) {
        if !decode_row(TileRow::triangle(row, side), side, &mut reader, &mut cursor, palette) {
            break;
        }
    }

    cursor.into_image()
}

/// Decode a trapezoidal tile: a triangle whose transparent corner is on `side`, then opaque rows
pub fn trapezoid(frame: &[u8], palette: &Palette, dimensions: FrameDimensions, side: Side) -> Image {
    let mut cursor = RasterCursor::new(dimensions);
    let mut reader = Reader { frame, pos: 0 };

    for row in 0..15 {
        if !decode_row(TileRow::trapezoid(row, side), side, &mut reader, &mut cursor, palette) {
            break;
        }
    }

    if let Some(block) = frame.get(TRAPEZOID_TRIANGLE_SIZE..) {
        for &index in block {
            cursor.put(palette.colour(index));
        }
    }

    cursor.into_image()
}

pub fn left_triangle(frame: &[u8], palette: &Palette, dimensions: FrameDimensions) -> Image {
    triangle(frame, palette, dimensions, Side::Left)
}

pub fn right_triangle(frame: &[u8], palette: &Palette, dimensions: FrameDimensions) -> Image {
    triangle(frame, palette, dimensions, Side::Right)
}

pub fn left_trapezoid(frame: &[u8], palette: &Palette, dimensions: FrameDimensions) -> Image {
    trapezoid(frame, palette, dimensions, Side::Left)
}

pub fn right_trapezoid(frame: &[u8], palette: &Palette, dimensions: FrameDimensions) -> Image {
    trapezoid(frame, palette, dimensions, Side::Right)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::classify::{TRAPEZOID_TILE_SIZE, TRIANGLE_TILE_SIZE};
    use crate::decode::tile::{solid, trapezoid, triangle, Side, TileRow};
    use crate::dimensions::FrameDimensions;
    use crate::palette::Palette;
    use crate::types::{MARKED_TRANSPARENT, TRANSPARENT};

    const TILE: FrameDimensions = FrameDimensions::new(32, 32);

    fn palette() -> Palette {
        Palette::new(std::array::from_fn(|i| [0, i as u8, 0]))
    }

    fn green(level: u8) -> [u8; 4] {
        [0, level, 0, 255]
    }

    fn stored_bytes(rows: impl Iterator<Item = TileRow>) -> usize {
        rows.map(|row| row.opaque + if row.padded { 2 } else { 0 })
            .sum()
    }

    #[test]
    fn triangle_rows_fill_the_tile() {
        for side in [Side::Left, Side::Right] {
            let rows = (0..=32)
                .filter(|&row| row != 15)
                .map(|row| TileRow::triangle(row, side));
            assert_eq!(stored_bytes(rows), TRIANGLE_TILE_SIZE);
        }
    }

    #[test]
    fn trapezoid_rows_fill_the_tile() {
        let left = (0..15).map(|row| TileRow::trapezoid(row, Side::Left));
        assert_eq!(stored_bytes(left), 256);

        let right = (0..15).map(|row| TileRow::trapezoid(row, Side::Right));
        assert_eq!(stored_bytes(right), 254);
    }

    #[test]
    fn solid_bottom_row_first() {
        let frame: Vec<u8> = (0..1024).map(|i| (i / 32) as u8).collect();

        let image = solid(&frame, &palette(), TILE);
        assert_eq!(image.get(0, 0), Some(green(31)));
        assert_eq!(image.get(31, 31), Some(green(0)));

        // image(x, y) = palette[frame[len - width * (y + 1) + x]]
        for y in 0..32u32 {
            for x in 0..32u32 {
                let index = frame[1024 - 32 * (y as usize + 1) + x as usize];
                assert_eq!(image.get(x, y), Some(green(index)));
            }
        }
    }

    #[test]
    fn solid_short_frame_is_transparent_at_the_bottom() {
        let frame = [7u8; 32 * 31];

        let image = solid(&frame, &palette(), TILE);
        assert_eq!(image.get(0, 30), Some(green(7)));
        assert_eq!(image.get(0, 31), Some(TRANSPARENT));
    }

    #[test]
    fn left_triangle_layout() {
        let frame = [9u8; TRIANGLE_TILE_SIZE];

        let image = triangle(&frame, &palette(), TILE, Side::Left);
        // bottom row: 30 transparent then 2 opaque
        let bottom = image.row(31).unwrap();
        assert!(bottom[..30].iter().all(|&p| p == TRANSPARENT));
        assert_eq!(&bottom[30..], &[green(9), green(9)]);

        // row 16 is fully opaque, row 15 is not stored
        assert!(image.row(16).unwrap().iter().all(|&p| p == green(9)));

        // top row is empty
        assert!(image.row(0).unwrap().iter().all(|&p| p == TRANSPARENT));
    }

    #[test]
    fn right_triangle_marks_its_margin() {
        let frame = [9u8; TRIANGLE_TILE_SIZE];

        let image = triangle(&frame, &palette(), TILE, Side::Right);
        let bottom = image.row(31).unwrap();
        assert_eq!(&bottom[..2], &[green(9), green(9)]);
        assert!(bottom[2..].iter().all(|&p| p == MARKED_TRANSPARENT));
        assert!(image.row(0).unwrap().iter().all(|&p| p == MARKED_TRANSPARENT));
    }

    #[test]
    fn triangle_skips_padding() {
        // Left triangles pad even rows of the lower half, the pad bytes are never drawn
        let mut frame = [1u8; TRIANGLE_TILE_SIZE];
        frame[0] = 0xEE;
        frame[1] = 0xEE;

        let image = triangle(&frame, &palette(), TILE, Side::Left);
        assert!(image.pixels().iter().all(|&p| p != green(0xEE)));
    }

    #[test]
    fn trapezoid_top_is_opaque() {
        let mut frame = [3u8; TRAPEZOID_TILE_SIZE];
        frame[256..].fill(4);

        let image = trapezoid(&frame, &palette(), TILE, Side::Left);
        // 544 raw bytes cover the top 17 rows
        for y in 0..17 {
            assert!(image.row(y).unwrap().iter().all(|&p| p == green(4)), "row {y}");
        }
        let bottom = image.row(31).unwrap();
        assert!(bottom[..30].iter().all(|&p| p == TRANSPARENT));
        assert_eq!(&bottom[30..], &[green(3), green(3)]);
    }

    #[test]
    fn right_trapezoid_margin() {
        let frame = [5u8; TRAPEZOID_TILE_SIZE];

        let image = trapezoid(&frame, &palette(), TILE, Side::Right);
        let row = image.row(17).unwrap();
        assert_eq!(&row[..30], &[green(5); 30]);
        assert_eq!(&row[30..], &[MARKED_TRANSPARENT; 2]);
    }

    #[test]
    fn short_triangle_stops() {
        let frame = [2u8; 40];

        let image = triangle(&frame, &palette(), TILE, Side::Right);
        assert_eq!(image.pixels().len(), 32 * 32);
        assert!(image.row(0).unwrap().iter().all(|&p| p == TRANSPARENT));
    }
}
