//! Palettes and the rules selecting one for an archive.

use std::{
    collections::HashMap,
    fs::File,
    io::{BufReader, Read, Seek},
    ops::Index,
    path::PathBuf,
};

use binrw::BinRead;
use tracing::{debug, instrument};

use crate::{
    error::{Error, Result},
    types::Rgba,
};

/// Number of entries in every palette
pub const PALETTE_SIZE: usize = 256;

/// Palette used when no naming rule matches
pub const TOWN_PALETTE: &str = "levels/towndata/town.pal";

/// A 256 entry RGB color table, as stored in `.pal` files
#[derive(BinRead, Debug, Clone, PartialEq, Eq)]
pub struct Palette {
    entries: [[u8; 3]; PALETTE_SIZE],
}

impl Palette {
    /// Build a palette from its entries
    pub fn new(entries: [[u8; 3]; PALETTE_SIZE]) -> Self {
        Self { entries }
    }

    /// Read a `.pal` file, the first 768 bytes are used
    pub fn from_reader<R: Read + Seek>(mut reader: R) -> Result<Self> {
        Ok(Palette::read_ne(&mut reader)?)
    }

    /// Opaque RGBA color for a palette index
    #[inline]
    pub fn colour(&self, index: u8) -> Rgba {
        let [r, g, b] = self[index];
        [r, g, b, 255]
    }
}

impl Index<u8> for Palette {
    type Output = [u8; 3];

    fn index(&self, index: u8) -> &Self::Output {
        &self.entries[index as usize]
    }
}

/// Source of palettes by path, relative to the game data root.
///
/// Paths use `/` as separator.
pub trait PaletteSource {
    /// Load the palette stored at `path`
    fn load(&self, path: &str) -> Result<Palette>;
}

impl PaletteSource for HashMap<String, Palette> {
    fn load(&self, path: &str) -> Result<Palette> {
        self.get(path)
            .cloned()
            .ok_or_else(|| Error::PaletteNotFound(path.to_owned()))
    }
}

/// Loads `.pal` files from an extracted game data directory
#[derive(Debug, Clone)]
pub struct DirectoryPalettes {
    root: PathBuf,
}

impl DirectoryPalettes {
    /// Create a source reading palettes below `root`
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl PaletteSource for DirectoryPalettes {
    #[instrument(skip(self), err)]
    fn load(&self, path: &str) -> Result<Palette> {
        let full = self.root.join(path);
        let file = File::open(&full).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => Error::PaletteNotFound(path.to_owned()),
            _ => Error::from(e),
        })?;

        Palette::from_reader(BufReader::new(file))
    }
}

/// Which rule picked the palette of an archive
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PaletteRule {
    /// Dungeon level tileset with a companion palette
    LevelTileset,

    /// `gendata` art with a palette of the same name
    GenData,

    /// Nothing matched, the town palette is used
    TownFallback,
}

/// The palette selected for an archive
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteChoice {
    /// Path of the palette file
    pub path: String,

    /// The rule that selected it
    pub rule: PaletteRule,
}

/// Archive suffix and the palette file replacing it, for archives under `levels`
const LEVEL_PALETTES: [(&str, &str); 6] = [
    ("l1.cel", "l1.pal"),
    ("l1s.cel", "l1.pal"),
    ("l2.cel", "l2.pal"),
    ("l2s.cel", "l2.pal"),
    ("l3.cel", "l3.pal"),
    ("l4.cel", "l4_1.pal"),
];

/// Select the palette for the archive at `path`.
///
/// Level tilesets keep their directory and swap their file name, `gendata` art swaps its extension,
/// and everything else falls back to [`TOWN_PALETTE`].
pub fn resolve_palette(path: &str) -> PaletteChoice {
    let normalized = path.replace('\\', "/");

    if normalized.starts_with("levels") {
        let level = LEVEL_PALETTES
            .iter()
            .find(|(suffix, _)| normalized.ends_with(suffix));
        if let Some((suffix, palette)) = level {
            let stem = &normalized[..normalized.len() - suffix.len()];
            return PaletteChoice {
                path: format!("{stem}{palette}"),
                rule: PaletteRule::LevelTileset,
            };
        }
    }

    if normalized.to_ascii_lowercase().starts_with("gendata") {
        let stem = normalized
            .char_indices()
            .rev()
            .nth(3)
            .map_or("", |(i, _)| &normalized[..i]);
        return PaletteChoice {
            path: format!("{stem}.pal"),
            rule: PaletteRule::GenData,
        };
    }

    debug!(path, "no palette rule matched, using the town palette");
    PaletteChoice {
        path: TOWN_PALETTE.to_owned(),
        rule: PaletteRule::TownFallback,
    }
}
