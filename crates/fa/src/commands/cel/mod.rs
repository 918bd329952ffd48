pub mod extract;
pub mod info;

use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

use clap::Args;
use fa_cel::{palette::DirectoryPalettes, CelDecoder, DecoderSettings};
use itertools::Itertools;
use miette::{Context, IntoDiagnostic, Result};
use tracing::debug;

#[derive(clap::Subcommand)]
pub enum CelCommands {
    /// Describe the frames of an archive
    Info(info::InfoArgs),
    /// Decode archives into PNG files
    Extract(extract::ExtractArgs),
}

impl CelCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            CelCommands::Info(info) => info.handle(),
            CelCommands::Extract(extract) => extract.handle(),
        }
    }
}

/// Where archives, palettes and their settings come from
#[derive(Args)]
pub struct SourceArgs {
    /// Root of the extracted game data
    #[arg(short, long, value_name = "DIR")]
    root: PathBuf,

    /// TOML file with the settings of every asset
    #[arg(short, long, value_name = "FILE")]
    settings: PathBuf,
}

impl SourceArgs {
    pub fn load(&self) -> Result<Source> {
        let settings = DecoderSettings::from_file(&self.settings)
            .context(format!("settings: {}", self.settings.display()))?;
        debug!(
            cel = settings.cel.len(),
            cl2 = settings.cl2.len(),
            "loaded asset settings"
        );

        Ok(Source {
            root: self.root.clone(),
            settings,
            palettes: DirectoryPalettes::new(&self.root),
        })
    }
}

pub struct Source {
    root: PathBuf,
    settings: DecoderSettings,
    palettes: DirectoryPalettes,
}

impl Source {
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Open the archive at `path`, relative to the root
    pub fn open(&self, path: &str) -> Result<CelDecoder> {
        let full = self.root.join(path);
        let file = File::open(&full)
            .into_diagnostic()
            .context(format!("path: {}", full.display()))?;

        CelDecoder::new(path, BufReader::new(file), &self.settings, &self.palettes)
            .context(format!("decoding {path}"))
    }
}

/// `path` relative to `root`, with `/` separators
pub fn relative_path(root: &Path, path: &Path) -> Option<String> {
    let relative = path.strip_prefix(root).ok()?;
    Some(
        relative
            .components()
            .map(|c| c.as_os_str().to_string_lossy())
            .join("/"),
    )
}
