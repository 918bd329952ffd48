//! Decoding of whole archives

use std::io::{Read, Seek};

use tracing::{debug, instrument};

use crate::{
    classify::{classify, FrameEncoding},
    decode,
    dimensions::{DimensionRule, FrameDimensions},
    error::{Error, Result},
    palette::{resolve_palette, Palette, PaletteChoice, PaletteSource},
    read::{CelArchive, RawFrame, Truncation},
    settings::{ArchiveKind, AssetSettings, DecoderSettings},
    types::Image,
};

/// Lowercase base name of the archive at `path`.
///
/// Paths containing a `/` are split on it, anything else on `\`.
pub fn archive_name(path: &str) -> Result<String> {
    if path.is_empty() {
        return Err(Error::EmptyPath);
    }

    let separator = if path.contains('/') { '/' } else { '\\' };
    let name = path.rsplit(separator).next().unwrap_or(path);

    Ok(name.to_lowercase())
}

/// Decoder for a single CEL or CL2 archive
///
/// The archive is parsed up front; frames are decoded on demand.
///
/// ```no_run
/// use std::{collections::HashMap, fs::File, io::BufReader};
///
/// use fa_cel::{CelDecoder, DecoderSettings, Palette};
///
/// fn decode_zombie(settings: &DecoderSettings, palettes: &HashMap<String, Palette>) -> fa_cel::error::Result<()> {
///     let path = "monsters/zombie/zombiew.cl2";
///     let file = BufReader::new(File::open(path)?);
///     let decoder = CelDecoder::new(path, file, settings, palettes)?;
///
///     for image in decoder.frames() {
///         println!("{}x{}", image.width(), image.height());
///     }
///
///     Ok(())
/// }
/// ```
#[derive(Debug, Clone)]
pub struct CelDecoder {
    path: String,
    name: String,
    settings: AssetSettings,
    dimensions: DimensionRule,
    palette_choice: PaletteChoice,
    palette: Palette,
    archive: CelArchive,
}

impl CelDecoder {
    /// Parse the archive read from `reader`, stored at `path` relative to the game data root.
    #[instrument(skip(reader, settings, palettes), err)]
    pub fn new<R: Read + Seek>(
        path: &str,
        reader: R,
        settings: &DecoderSettings,
        palettes: &impl PaletteSource,
    ) -> Result<Self> {
        let name = archive_name(path)?;
        let asset = settings.lookup(&name, ArchiveKind::from_path(path))?;

        let palette_choice = resolve_palette(path);
        let palette = palettes.load(&palette_choice.path)?;

        let dimensions = DimensionRule::for_archive(
            &name,
            FrameDimensions::new(asset.width, asset.height),
        );
        let archive = CelArchive::new(reader, asset.header_size)?;

        debug!(
            name = %name,
            frames = archive.len(),
            animation_length = archive.animation_length(),
            palette = %palette_choice.path,
            "parsed archive"
        );

        Ok(Self {
            path: path.to_owned(),
            name,
            settings: asset,
            dimensions,
            palette_choice,
            palette,
            archive,
        })
    }

    /// Path the decoder was created with
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Lowercase base name of the archive
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Settings the archive was decoded with
    pub fn settings(&self) -> &AssetSettings {
        &self.settings
    }

    /// Number of frames that can be decoded
    pub fn num_frames(&self) -> usize {
        self.archive.len()
    }

    /// Number of frames in one group
    pub fn animation_length(&self) -> usize {
        self.archive.animation_length()
    }

    /// Where parsing stopped early, if it did
    pub fn truncation(&self) -> Option<&Truncation> {
        self.archive.truncation()
    }

    /// The palette and the rule that selected it
    pub fn palette_choice(&self) -> &PaletteChoice {
        &self.palette_choice
    }

    /// The parsed archive
    pub fn archive(&self) -> &CelArchive {
        &self.archive
    }

    /// Encoding of the frame at `index`
    pub fn frame_encoding(&self, index: usize) -> Option<FrameEncoding> {
        self.archive
            .frame(index)
            .map(|frame| classify(&self.name, index, &frame.data))
    }

    /// Dimensions of the frame at `index`
    pub fn frame_dimensions(&self, index: usize) -> FrameDimensions {
        self.dimensions.resolve(index)
    }

    /// Decode the frame at `index`
    pub fn decode_frame(&self, index: usize) -> Option<Image> {
        self.archive.frame(index).map(|frame| self.decode_raw(frame))
    }

    /// Lazily decode every frame in order
    pub fn frames(&self) -> impl Iterator<Item = Image> + '_ {
        self.archive.frames().iter().map(|frame| self.decode_raw(frame))
    }

    /// Decode every frame in order
    #[instrument(skip(self), fields(name = %self.name))]
    pub fn decode(&self) -> Vec<Image> {
        self.frames().collect()
    }

    fn decode_raw(&self, frame: &RawFrame) -> Image {
        let sequence = frame.record.sequence;
        decode::decode_frame(
            &self.name,
            sequence,
            &frame.data,
            &self.palette,
            self.dimensions.resolve(sequence),
        )
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::decoder::archive_name;
    use crate::error::{Error, Result};

    #[test]
    fn name_from_forward_slashes() -> Result<()> {
        assert_eq!(archive_name("Levels/L1Data/L1.CEL")?, "l1.cel");
        assert_eq!(archive_name("objcurs.cel")?, "objcurs.cel");

        Ok(())
    }

    #[test]
    fn name_from_backslashes() -> Result<()> {
        assert_eq!(archive_name("Monsters\\Zombie\\ZombieW.CL2")?, "zombiew.cl2");

        Ok(())
    }

    #[test]
    fn forward_slash_wins() -> Result<()> {
        assert_eq!(archive_name("data\\inv/objcurs.cel")?, "objcurs.cel");
        assert_eq!(archive_name("data/inv\\objcurs.cel")?, "inv\\objcurs.cel");

        Ok(())
    }

    #[test]
    fn empty_name() {
        assert!(matches!(archive_name(""), Err(Error::EmptyPath)));
    }
}
