//! Frame decoders, one per [`FrameEncoding`].
//!
//! Every decoder is a pure function of the frame bytes, the palette and the frame dimensions and
//! always returns an image of exactly those dimensions. Pixels never written stay transparent.

mod raster;
pub mod rle;
pub mod tile;

use tracing::trace;

use crate::{
    classify::{classify, FrameEncoding},
    dimensions::FrameDimensions,
    palette::Palette,
    types::Image,
};

/// Signature shared by all frame decoders
pub type FrameDecoder = fn(&[u8], &Palette, FrameDimensions) -> Image;

/// Decoders in [`FrameEncoding::ALL`] order
const DECODERS: [FrameDecoder; 7] = [
    tile::solid,
    rle::general_rle,
    tile::left_triangle,
    tile::right_triangle,
    tile::left_trapezoid,
    tile::right_trapezoid,
    rle::cl2_run,
];

impl FrameEncoding {
    /// The function decoding frames of this encoding
    pub fn decoder(self) -> FrameDecoder {
        DECODERS[self.ordinal()]
    }

    /// Decode `frame` as this encoding
    pub fn decode(self, frame: &[u8], palette: &Palette, dimensions: FrameDimensions) -> Image {
        (self.decoder())(frame, palette, dimensions)
    }
}

/// Classify and decode the frame at `index` (archive order) of the archive `name`
pub fn decode_frame(
    name: &str,
    index: usize,
    frame: &[u8],
    palette: &Palette,
    dimensions: FrameDimensions,
) -> Image {
    let encoding = classify(name, index, frame);
    trace!(name, index, %encoding, bytes = frame.len(), "decoding frame");
    encoding.decode(frame, palette, dimensions)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::classify::FrameEncoding;
    use crate::decode::decode_frame;
    use crate::dimensions::FrameDimensions;
    use crate::palette::Palette;
    use crate::types::TRANSPARENT;

    fn palette() -> Palette {
        Palette::new(std::array::from_fn(|i| [i as u8, i as u8, i as u8]))
    }

    #[test]
    fn every_decoder_honours_dimensions() {
        let frames: [&[u8]; 4] = [&[], &[0x05, 0x01, 0x02], &[0xBE; 600], &[0x7F; 0x400]];
        let sizes = [
            FrameDimensions::new(0, 0),
            FrameDimensions::new(1, 1),
            FrameDimensions::new(7, 3),
            FrameDimensions::new(32, 32),
            FrameDimensions::new(96, 128),
        ];

        for encoding in FrameEncoding::ALL {
            for frame in frames {
                for size in sizes {
                    let image = encoding.decode(frame, &palette(), size);
                    assert_eq!(image.width(), size.width);
                    assert_eq!(image.height(), size.height);
                    assert_eq!(image.pixels().len(), size.area(), "{encoding} {size:?}");
                }
            }
        }
    }

    #[test]
    fn decoding_is_deterministic() {
        let frame: Vec<u8> = (0..0x220).map(|i| (i % 7) as u8).collect();
        let size = FrameDimensions::new(32, 32);

        for encoding in FrameEncoding::ALL {
            assert_eq!(
                encoding.decode(&frame, &palette(), size),
                encoding.decode(&frame, &palette(), size)
            );
        }
    }

    #[test]
    fn empty_frame_is_transparent() {
        let image = decode_frame("monster.cl2", 0, &[], &palette(), FrameDimensions::new(4, 4));

        assert!(image.pixels().iter().all(|&p| p == TRANSPARENT));
    }

    #[test]
    fn classification_picks_the_decoder() {
        let size = FrameDimensions::new(32, 32);
        let frame = [0x10u8; 0x400];

        let solid = decode_frame("town.cel", 0, &frame, &palette(), size);
        assert!(solid.pixels().iter().all(|&p| p == [0x10, 0x10, 0x10, 255]));

        // the same bytes read as literal runs of 16
        let rle = decode_frame("town.cel", 2328, &frame, &palette(), size);
        assert_eq!(rle, FrameEncoding::GeneralRle.decode(&frame, &palette(), size));
        assert_ne!(rle, solid);
    }
}
