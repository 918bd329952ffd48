use clap::Args;
use itertools::Itertools;
use miette::Result;
use owo_colors::OwoColorize;

use super::SourceArgs;

#[derive(Args)]
pub struct InfoArgs {
    #[command(flatten)]
    source: SourceArgs,

    /// Archive path, relative to the root
    #[arg(short, long, value_name = "PATH")]
    file: String,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let source = self.source.load()?;
        let decoder = source.open(&self.file)?;

        println!("{} {}", "archive:".bold(), decoder.path());
        println!("{} {}", "frames:".bold(), decoder.num_frames());
        println!("{} {}", "groups:".bold(), decoder.archive().group_count());
        println!(
            "{} {}",
            "animation length:".bold(),
            decoder.animation_length()
        );
        println!(
            "{} {} ({:?})",
            "palette:".bold(),
            decoder.palette_choice().path,
            decoder.palette_choice().rule
        );

        if let Some(truncation) = decoder.truncation() {
            println!(
                "{} group {} frame {} ends at {} before its start {}",
                "truncated:".yellow().bold(),
                truncation.group,
                truncation.index,
                truncation.end,
                truncation.start
            );
        }

        println!();
        println!(
            "{:>6} {:>5} {:>5} {:<16} {:>9} {:>7}",
            "frame".underline(),
            "group".underline(),
            "index".underline(),
            "encoding".underline(),
            "size".underline(),
            "bytes".underline()
        );

        let mut encodings = Vec::with_capacity(decoder.num_frames());
        for frame in decoder.archive().frames() {
            let record = frame.record;
            let Some(encoding) = decoder.frame_encoding(record.sequence) else {
                continue;
            };
            let dimensions = decoder.frame_dimensions(record.sequence);

            println!(
                "{:>6} {:>5} {:>5} {:<16} {:>9} {:>7}",
                record.sequence,
                record.group,
                record.index,
                encoding.name(),
                format!("{}x{}", dimensions.width, dimensions.height),
                frame.data.len()
            );
            encodings.push(encoding);
        }

        println!();
        for (encoding, count) in encodings.into_iter().counts().into_iter().sorted() {
            println!("{:<16} {}", encoding.green(), count);
        }

        Ok(())
    }
}
