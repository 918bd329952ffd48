//! Types for reading CEL archives
//!

use binrw::BinRead;
use byteorder::{LittleEndian, ReadBytesExt};
use std::io::{Read, Seek, SeekFrom};
use tracing::{debug, instrument, warn};

use crate::{
    error::{Error, Result},
    types::{FrameTable, GroupTable, GROUPED_ARCHIVE_MARKER},
};

/// Location of a frame inside its archive
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct FrameRecord {
    /// Group the frame belongs to, always 0 for single group archives
    pub group: usize,

    /// Position of the frame inside its group
    pub index: usize,

    /// Position of the frame across the whole archive
    pub sequence: usize,

    /// Absolute offset of the first pixel byte, after the frame header
    pub start: u64,

    /// Absolute offset one past the last byte
    pub end: u64,
}

/// A frame's raw, still encoded, bytes
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawFrame {
    pub record: FrameRecord,
    pub data: Vec<u8>,
}

/// Where parsing stopped early because a frame had a negative size
///
/// Frames up to this point are kept, everything after it is dropped.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct Truncation {
    /// Group of the offending frame
    pub group: usize,

    /// Position of the offending frame inside its group
    pub index: usize,

    /// Computed start of the frame, after the frame header
    pub start: u64,

    /// Declared end of the frame
    pub end: u64,
}

/// CEL or CL2 archive with every frame's raw bytes
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn list_frames(reader: impl Read + Seek) -> fa_cel::error::Result<()> {
///     let archive = fa_cel::CelArchive::new(reader, 0)?;
///
///     for frame in archive.frames() {
///         println!("{:?}: {} bytes", frame.record, frame.data.len());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CelArchive {
    groups: usize,
    frames: Vec<RawFrame>,
    animation_length: usize,
    truncation: Option<Truncation>,
}

impl CelArchive {
    /// Read an archive, skipping `header_size` bytes at the start of every frame.
    #[instrument(skip(reader), err)]
    pub fn new<R: Read + Seek>(mut reader: R, header_size: u32) -> Result<CelArchive> {
        let available = reader.seek(SeekFrom::End(0))?;
        if available < 4 {
            return Err(Error::TruncatedArchive {
                needed: 4,
                available,
            });
        }

        reader.rewind()?;
        let first_word = reader.read_u32::<LittleEndian>()?;
        reader.rewind()?;

        let group_starts = if first_word == GROUPED_ARCHIVE_MARKER {
            GroupTable::read(&mut reader)?.offsets.to_vec()
        } else {
            vec![0]
        };
        debug!(groups = group_starts.len(), available, "reading archive");

        let mut frames = Vec::new();
        let mut animation_length = 0;
        let mut truncation = None;

        'groups: for (group, &group_start) in group_starts.iter().enumerate() {
            let base = u64::from(group_start);
            if base + 4 > available {
                return Err(Error::InvalidGroupOffset {
                    group,
                    offset: group_start,
                    available,
                });
            }

            reader.seek(SeekFrom::Start(base))?;
            let table = FrameTable::read_args(&mut reader, (available - base,))?;
            debug!(group, frames = table.frame_count, "read frame table");

            for (index, bounds) in table.offsets.windows(2).enumerate() {
                let start = base + u64::from(bounds[0]) + u64::from(header_size);
                let end = base + u64::from(bounds[1]);

                if end < start {
                    warn!(group, index, start, end, "frame has a negative size, stopping");
                    truncation = Some(Truncation {
                        group,
                        index,
                        start,
                        end,
                    });
                    break 'groups;
                }

                if end > available {
                    return Err(Error::TruncatedArchive {
                        needed: end,
                        available,
                    });
                }

                let mut data = vec![0u8; (end - start) as usize];
                reader.seek(SeekFrom::Start(start))?;
                reader.read_exact(&mut data)?;

                frames.push(RawFrame {
                    record: FrameRecord {
                        group,
                        index,
                        sequence: frames.len(),
                        start,
                        end,
                    },
                    data,
                });
            }

            animation_length = table.frame_count as usize;
        }

        Ok(CelArchive {
            groups: group_starts.len(),
            frames,
            animation_length,
            truncation,
        })
    }

    /// Number of frames read from the archive
    pub fn len(&self) -> usize {
        self.frames.len()
    }

    /// Whether no frame could be read
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Number of groups declared by the archive, 1 or 8
    pub fn group_count(&self) -> usize {
        self.groups
    }

    /// Number of frames in a group, taken from the last group read in full
    pub fn animation_length(&self) -> usize {
        self.animation_length
    }

    /// Where parsing stopped early, if it did
    pub fn truncation(&self) -> Option<&Truncation> {
        self.truncation.as_ref()
    }

    /// All frames in archive order
    pub fn frames(&self) -> &[RawFrame] {
        &self.frames
    }

    /// Get a frame by its position in the archive
    pub fn frame(&self, sequence: usize) -> Option<&RawFrame> {
        self.frames.get(sequence)
    }
}
