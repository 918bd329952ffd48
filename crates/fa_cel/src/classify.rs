//! Detection of the encoding used by a frame.
//!
//! Archives do not tag their frames. The encoding is guessed from the archive name, the frame size
//! and, for level tiles, a handful of probe bytes that are always zero in triangular tiles.

use std::fmt;

/// Size of a raw 32x32 tile
pub const SOLID_TILE_SIZE: usize = 0x400;

/// Size of a triangular tile
pub const TRIANGLE_TILE_SIZE: usize = 0x220;

/// Size of a trapezoidal tile
pub const TRAPEZOID_TILE_SIZE: usize = 0x320;

/// Archives containing level tiles
const TILESETS: [&str; 5] = ["l1.cel", "l2.cel", "l3.cel", "l4.cel", "town.cel"];

/// Tiles exactly [`SOLID_TILE_SIZE`] bytes long that are run-length encoded anyway
const SOLID_EXCEPTIONS: [(&str, &[usize]); 4] = [
    ("l1.cel", &[148, 159, 181, 186, 188]),
    ("l2.cel", &[47, 1397, 1399, 1411]),
    ("l4.cel", &[336, 639]),
    ("town.cel", &[2328, 2367, 2593]),
];

/// Bytes that are zero in a left triangle or trapezoid
const LEFT_PROBES: [usize; 16] = [
    0, 1, 8, 9, 24, 25, 48, 49, 80, 81, 120, 121, 168, 169, 224, 225,
];

/// Bytes that are zero in a right triangle or trapezoid
const RIGHT_PROBES: [usize; 16] = [
    2, 3, 14, 15, 34, 35, 62, 63, 98, 99, 142, 143, 194, 195, 254, 255,
];

/// Encoding of a single frame
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum FrameEncoding {
    /// Raw palette indices, bottom row first
    Solid32x32,

    /// Transparent and literal runs
    GeneralRle,

    /// Level tile with its opaque half on the right
    LeftTriangle,

    /// Level tile with its opaque half on the left
    RightTriangle,

    /// Left triangle topped by a raw block
    LeftTrapezoid,

    /// Right triangle topped by a raw block
    RightTrapezoid,

    /// Transparent, literal and fill runs of `.cl2` archives
    Cl2Run,
}

impl FrameEncoding {
    /// Every encoding in declaration order
    pub const ALL: [FrameEncoding; 7] = [
        FrameEncoding::Solid32x32,
        FrameEncoding::GeneralRle,
        FrameEncoding::LeftTriangle,
        FrameEncoding::RightTriangle,
        FrameEncoding::LeftTrapezoid,
        FrameEncoding::RightTrapezoid,
        FrameEncoding::Cl2Run,
    ];

    /// Position of the encoding in [`FrameEncoding::ALL`]
    pub const fn ordinal(self) -> usize {
        self as usize
    }

    pub const fn name(self) -> &'static str {
        match self {
            FrameEncoding::Solid32x32 => "solid",
            FrameEncoding::GeneralRle => "rle",
            FrameEncoding::LeftTriangle => "left-triangle",
            FrameEncoding::RightTriangle => "right-triangle",
            FrameEncoding::LeftTrapezoid => "left-trapezoid",
            FrameEncoding::RightTrapezoid => "right-trapezoid",
            FrameEncoding::Cl2Run => "cl2",
        }
    }
}

impl fmt::Display for FrameEncoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.name())
    }
}

/// Whether the archive `name` holds level tiles
pub fn is_tileset(name: &str) -> bool {
    TILESETS.contains(&name)
}

fn is_solid_exception(name: &str, index: usize) -> bool {
    SOLID_EXCEPTIONS
        .iter()
        .any(|(archive, frames)| *archive == name && frames.contains(&index))
}

fn probes_zero(frame: &[u8], probes: &[usize]) -> bool {
    probes.iter().all(|&i| frame.get(i) == Some(&0))
}

/// Guess the encoding of the frame at `index` (archive order) of the archive `name`.
///
/// `name` is the lowercase base name of the archive, `frame` the bytes after the frame header.
pub fn classify(name: &str, index: usize, frame: &[u8]) -> FrameEncoding {
    if is_tileset(name) {
        match frame.len() {
            SOLID_TILE_SIZE if !is_solid_exception(name, index) => {
                return FrameEncoding::Solid32x32
            }
            TRIANGLE_TILE_SIZE if probes_zero(frame, &LEFT_PROBES) => {
                return FrameEncoding::LeftTriangle
            }
            TRIANGLE_TILE_SIZE if probes_zero(frame, &RIGHT_PROBES) => {
                return FrameEncoding::RightTriangle
            }
            TRAPEZOID_TILE_SIZE if probes_zero(frame, &LEFT_PROBES) => {
                return FrameEncoding::LeftTrapezoid
            }
            TRAPEZOID_TILE_SIZE if probes_zero(frame, &RIGHT_PROBES) => {
                return FrameEncoding::RightTrapezoid
            }
            _ => {}
        }
    }

    if name.ends_with("cl2") {
        FrameEncoding::Cl2Run
    } else {
        FrameEncoding::GeneralRle
    }
}
