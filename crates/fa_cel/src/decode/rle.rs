use crate::{
    decode::raster::RasterCursor,
    dimensions::FrameDimensions,
    palette::Palette,
    types::{Image, TRANSPARENT},
};

/// Largest literal run of a `.cl2` control byte, longer runs are fills
const CL2_LITERAL_LIMIT: usize = 65;

fn literal(cursor: &mut RasterCursor, palette: &Palette, run: &[u8]) {
    for &index in run {
        cursor.put(palette.colour(index));
    }
}

/// Decode signed control bytes: a negative `n` skips `|n|` pixels, anything else is followed by
/// `n` palette indices.
pub fn general_rle(frame: &[u8], palette: &Palette, dimensions: FrameDimensions) -> Image {
    let mut cursor = RasterCursor::new(dimensions);
    let mut pos = 0;

    while let Some(&control) = frame.get(pos) {
        pos += 1;
        let control = control as i8;

        if control < 0 {
            cursor.repeat(TRANSPARENT, control.unsigned_abs() as usize);
        } else {
            let end = (pos + control as usize).min(frame.len());
            literal(&mut cursor, palette, &frame[pos..end]);
            pos = end;
        }
    }

    cursor.into_image()
}

/// Decode `.cl2` control bytes: a positive `n` skips `n` pixels, `-n` up to 65 is followed by `n`
/// palette indices, and beyond that fills `n - 65` pixels with the next index.
///
/// Decoding stops once the raster is full, some frames carry trailing garbage.
pub fn cl2_run(frame: &[u8], palette: &Palette, dimensions: FrameDimensions) -> Image {
    let mut cursor = RasterCursor::new(dimensions);
    let mut pos = 0;

    while let Some(&control) = frame.get(pos) {
        if cursor.exhausted() {
            break;
        }
        pos += 1;
        let control = control as i8;

        if control >= 0 {
            cursor.repeat(TRANSPARENT, control as usize);
            continue;
        }

        let length = control.unsigned_abs() as usize;
        if length <= CL2_LITERAL_LIMIT {
            let end = (pos + length).min(frame.len());
            literal(&mut cursor, palette, &frame[pos..end]);
            pos = end;
        } else {
            let Some(&index) = frame.get(pos) else {
                break;
            };
            cursor.repeat(palette.colour(index), length - CL2_LITERAL_LIMIT);
            pos += 1;
        }
    }

    cursor.into_image()
}
