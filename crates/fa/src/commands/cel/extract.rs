use std::path::{Path, PathBuf};

use clap::Args;
use fa_cel::Image;
use image::RgbaImage;
use miette::{miette, Context, IntoDiagnostic, Report, Result};
use rayon::prelude::*;
use tracing::{debug, error, info};
use walkdir::WalkDir;

use super::{relative_path, Source, SourceArgs};

#[derive(Args)]
pub struct ExtractArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Archive paths, relative to the root
    #[arg(short, long = "file", value_name = "PATH")]
    files: Vec<String>,

    /// Extract every archive found below the root
    #[arg(long, default_value_t = false)]
    all: bool,

    /// A target directory
    #[arg(short, long, value_name = "DIR")]
    directory: PathBuf,

    /// Allow overwriting the target
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

fn is_archive(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("cel") || ext.eq_ignore_ascii_case("cl2"))
}

fn find_archives(root: &Path) -> Vec<String> {
    let mut archives = WalkDir::new(root)
        .into_iter()
        .filter_map(|e| e.ok())
        .filter(|e| e.file_type().is_file() && is_archive(e.path()))
        .filter_map(|e| relative_path(root, e.path()))
        .collect::<Vec<_>>();
    archives.sort();
    archives
}

/// Save every non empty frame as `<stem>_<sequence>.png` below `target`, returning how many were
/// written
fn write_frames(
    frames: impl Iterator<Item = Image>,
    target: &Path,
    stem: &str,
    overwrite: bool,
) -> Result<usize> {
    let mut written = 0;
    for (sequence, image) in frames.enumerate() {
        if image.pixels().is_empty() {
            debug!("skipping empty frame {sequence}");
            continue;
        }

        let p = target.join(format!("{stem}_{sequence}.png"));
        if !overwrite && p.exists() {
            return Err(miette!("{} already exists", p.display()));
        }

        let (width, height) = (image.width(), image.height());
        let buffer = RgbaImage::from_raw(width, height, image.into_bytes())
            .ok_or_else(|| miette!("frame {sequence} does not fill {width}x{height}"))?;
        buffer
            .save(&p)
            .into_diagnostic()
            .context(format!("writing {}", p.display()))?;
        written += 1;
    }

    Ok(written)
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        let source = self.source.load()?;

        let mut archives = self.files.clone();
        if self.all {
            archives.extend(find_archives(source.root()));
        }
        if archives.is_empty() {
            return Err(miette!("no archives to extract, pass --file or --all"));
        }
        info!("extracting {} archives", archives.len());

        let failures = archives
            .par_iter()
            .filter_map(|path| {
                self.extract(&source, path)
                    .err()
                    .map(|report| (path.as_str(), report))
            })
            .collect::<Vec<(&str, Report)>>();

        for (path, report) in &failures {
            error!("{path}: {report:?}");
        }

        if failures.is_empty() {
            Ok(())
        } else {
            Err(miette!(
                "{} of {} archives failed to extract",
                failures.len(),
                archives.len()
            ))
        }
    }

    fn extract(&self, source: &Source, path: &str) -> Result<()> {
        let decoder = source.open(path)?;

        let target = self.directory.join(path);
        std::fs::create_dir_all(&target)
            .into_diagnostic()
            .context(format!("creating {}", target.display()))?;

        let stem = decoder
            .name()
            .rsplit_once('.')
            .map_or(decoder.name(), |(stem, _)| stem);

        let written = write_frames(decoder.frames(), &target, stem, self.overwrite)?;
        info!("wrote {written} of {} frames of {path}", decoder.num_frames());
        Ok(())
    }
}
