//! This library handles decoding the **CEL** and **CL2** sprite archives used by *Diablo*.
//!
//! # CEL Archive Format Documentation
//!
//! CEL and CL2 files store indexed-color, run-length-compressed sprite frames. Neither format
//! carries a per-frame type tag: the pixel layout of each frame is inferred from the archive
//! name, the frame's byte length and a few byte probes (see [`classify`]).
//!
//! ## File Structure
//!
//! An archive is either a single group of frames, or a collection of exactly eight groups.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Header word            | 4 bytes: `32` marks an eight group archive                 |
//!
//! ### Group Table
//!
//! When the header word equals `32`, the first eight words are the absolute offsets of eight groups,
//! each laid out like a single group archive. Any other value means the archive holds one group
//! starting at offset zero (the header word is then the group's frame count).
//!
//! ### Frame Table
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Frame Count            | 4 bytes: Number of frames `N` in this group             |
//! | 0x0004         | Frame Offsets          | (N + 1) * 4 bytes: start of every frame, plus an end    |
//!
//! - **Frame Offsets**: relative to the start of the group. The last offset is a sentinel marking
//!   the end of the final frame.
//!
//! ### Frame Data
//!
//! Frame `i` occupies `[offset[i] + header_size, offset[i + 1])`, where `header_size` comes from
//! the per-asset [`settings`]. A frame whose computed size is negative ends parsing of the archive;
//! the frames before it are kept (see [`read::Truncation`]).
//!
//! ### Frame Encodings
//!
//! | Encoding           | Description                                                    |
//! |--------------------|----------------------------------------------------------------|
//! | `Solid32x32`       | Raw palette indices, bottom row first                          |
//! | `GeneralRle`       | Signed control bytes: negative = transparent run, else literal |
//! | `LeftTriangle`     | Tileset triangle, transparent on the left                      |
//! | `RightTriangle`    | Tileset triangle, transparent on the right                     |
//! | `LeftTrapezoid`    | Tileset trapezoid, transparent on the upper left               |
//! | `RightTrapezoid`   | Tileset trapezoid, transparent on the upper right              |
//! | `Cl2Run`           | CL2 control bytes: positive = transparent, negative = literal or fill |
//!
//! ## Additional Information
//!
//! - **File Extension**: `.cel`, `.cl2`
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **Raster Order**: every encoding writes pixels bottom-up, left-to-right
//!

pub mod classify;
pub mod decode;
pub mod decoder;
pub mod dimensions;
pub mod error;
pub mod palette;
pub mod read;
pub mod settings;
pub mod types;

pub use classify::FrameEncoding;
pub use decoder::CelDecoder;
pub use palette::{Palette, PaletteSource};
pub use read::CelArchive;
pub use settings::{AssetSettings, DecoderSettings};
pub use types::Image;
