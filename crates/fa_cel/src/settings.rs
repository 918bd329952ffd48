//! Per-asset decoding settings.
//!
//! The archives themselves do not record the size of their frames, so every asset needs an entry
//! describing it. Settings are kept in a TOML document with one table per archive kind:
//!
//! ```toml
//! [cel.l1]
//! width = 32
//! height = 32
//!
//! [cl2.zombiew]
//! width = 128
//! height = 128
//! header_size = 10
//! ```

use std::path::Path;

use bon::Builder;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::{instrument, trace};

use crate::error::{Error, Result};

/// Settings of a single asset
#[derive(Debug, Copy, Clone, PartialEq, Eq, Default, Builder, Serialize, Deserialize)]
pub struct AssetSettings {
    /// Width of a frame in pixels
    #[serde(default)]
    pub width: u32,

    /// Height of a frame in pixels
    #[serde(default)]
    pub height: u32,

    /// Bytes skipped at the start of every frame
    #[builder(default)]
    #[serde(default)]
    pub header_size: u32,

    /// Number of images configured separately as `<name>0`, `<name>1`, ...
    #[builder(default)]
    #[serde(default)]
    pub image_count: u32,
}

/// Which settings table an archive belongs to
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ArchiveKind {
    Cel,
    Cl2,
}

impl ArchiveKind {
    /// Kind of the archive at `path`, judged by its extension
    pub fn from_path(path: &str) -> Self {
        if path.to_ascii_lowercase().ends_with("cl2") {
            ArchiveKind::Cl2
        } else {
            ArchiveKind::Cel
        }
    }
}

/// Settings for every known asset
///
/// Built once by the application and shared by reference with every decoder.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DecoderSettings {
    /// Settings of `.cel` archives by name without extension
    #[serde(default)]
    pub cel: IndexMap<String, AssetSettings>,

    /// Settings of `.cl2` archives by name without extension
    #[serde(default)]
    pub cl2: IndexMap<String, AssetSettings>,
}

impl DecoderSettings {
    /// Parse settings from a TOML document
    pub fn from_toml(document: &str) -> Result<Self> {
        Ok(toml::from_str(document)?)
    }

    /// Read settings from a TOML file
    #[instrument(skip_all, fields(path = %path.as_ref().display()), err)]
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let document = std::fs::read_to_string(path)?;
        Self::from_toml(&document)
    }

    /// Add or replace the settings of an asset
    pub fn insert(&mut self, kind: ArchiveKind, name: impl Into<String>, settings: AssetSettings) {
        self.table_mut(kind).insert(name.into(), settings);
    }

    /// Settings of the archive with the lowercase base name `name`.
    ///
    /// Assets made of several images are configured per image; their first image decides.
    pub fn lookup(&self, name: &str, kind: ArchiveKind) -> Result<AssetSettings> {
        let key = strip_extension(name);
        let table = self.table(kind);

        let settings = table
            .get(key)
            .ok_or_else(|| Error::MissingSettings(name.to_owned()))?;

        if settings.image_count == 0 {
            return Ok(*settings);
        }

        let first = format!("{key}0");
        trace!(key, first = %first, "asset has several images, using the first");
        table
            .get(&first)
            .map(|image| AssetSettings {
                image_count: settings.image_count,
                ..*image
            })
            .ok_or(Error::MissingSettings(first))
    }

    fn table(&self, kind: ArchiveKind) -> &IndexMap<String, AssetSettings> {
        match kind {
            ArchiveKind::Cel => &self.cel,
            ArchiveKind::Cl2 => &self.cl2,
        }
    }

    fn table_mut(&mut self, kind: ArchiveKind) -> &mut IndexMap<String, AssetSettings> {
        match kind {
            ArchiveKind::Cel => &mut self.cel,
            ArchiveKind::Cl2 => &mut self.cl2,
        }
    }
}

fn strip_extension(name: &str) -> &str {
    name.strip_suffix(".cel")
        .or_else(|| name.strip_suffix(".cl2"))
        .unwrap_or(name)
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::settings::{ArchiveKind, AssetSettings, DecoderSettings};

    const DOCUMENT: &str = r#"
        [cel.l1]
        width = 32
        height = 32

        [cel.spelicon]
        image_count = 2

        [cel.spelicon0]
        width = 56
        height = 56
        header_size = 10

        [cl2.zombiew]
        width = 128
        height = 128
        header_size = 10
    "#;

    #[test]
    fn parse_document() -> Result<()> {
        let settings = DecoderSettings::from_toml(DOCUMENT)?;

        assert_eq!(settings.cel.len(), 3);
        assert_eq!(settings.cl2.len(), 1);
        assert_eq!(
            settings.lookup("l1.cel", ArchiveKind::Cel)?,
            AssetSettings::builder().width(32).height(32).build()
        );

        Ok(())
    }

    #[test]
    fn lookup_uses_the_matching_table() -> Result<()> {
        let settings = DecoderSettings::from_toml(DOCUMENT)?;

        assert_eq!(settings.lookup("zombiew.cl2", ArchiveKind::Cl2)?.header_size, 10);
        assert!(matches!(
            settings.lookup("zombiew.cl2", ArchiveKind::Cel),
            Err(Error::MissingSettings(_))
        ));

        Ok(())
    }

    #[test]
    fn lookup_multiple_images_reads_the_first() -> Result<()> {
        let settings = DecoderSettings::from_toml(DOCUMENT)?;

        let expected = AssetSettings::builder()
            .width(56)
            .height(56)
            .header_size(10)
            .image_count(2)
            .build();
        assert_eq!(settings.lookup("spelicon.cel", ArchiveKind::Cel)?, expected);

        Ok(())
    }

    #[test]
    fn lookup_missing_first_image() {
        let mut settings = DecoderSettings::default();
        settings.insert(
            ArchiveKind::Cel,
            "panel",
            AssetSettings::builder()
                .width(0)
                .height(0)
                .image_count(3)
                .build(),
        );

        match settings.lookup("panel.cel", ArchiveKind::Cel) {
            Err(Error::MissingSettings(key)) => assert_eq!(key, "panel0"),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn kind_from_path() {
        assert_eq!(ArchiveKind::from_path("monsters/zombie/Zombiew.CL2"), ArchiveKind::Cl2);
        assert_eq!(ArchiveKind::from_path("levels/l1data/l1.cel"), ArchiveKind::Cel);
    }
}
