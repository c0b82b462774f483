use clap::Args;
use miette::{Context, IntoDiagnostic, Result};
use owo_colors::OwoColorize;
use std::{fs::File, path::PathBuf};

use ffl_res::{CompressionMethod, PartKind, ResourceArchive};

use super::LayoutArgs;

#[derive(Args)]
pub struct InfoArgs {
    /// An input FFRA resource file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,
}

impl InfoArgs {
    pub fn handle(&self) -> Result<()> {
        let f = File::open(&self.file)
            .into_diagnostic()
            .context(format!("path: {}", self.file.display()))?;

        let mut archive = ResourceArchive::new(f, self.layout.layout())?;
        let fits = archive.validate().is_ok();

        let header = archive.header();
        println!("{}", "archive".bold());
        println!("  version: {:#010x}", header.version);
        println!("  decompressed size hint: {} bytes", header.size_hint);
        if let Some(total) = archive.decompressed_size() {
            println!("  decompressed payload: {total} bytes");
        }
        if fits {
            println!("  descriptors: {}", "all inside the file".green());
        } else {
            println!(
                "  descriptors: {}",
                "point outside the file; wrong preset or counts?".red()
            );
        }

        summarize(&archive, PartKind::Texture, archive.texture_max_sizes());
        summarize(&archive, PartKind::Shape, archive.shape_max_sizes());

        Ok(())
    }
}

fn summarize<R>(archive: &ResourceArchive<R>, kind: PartKind, max_sizes: &[u32]) {
    let infos = archive.part_infos(kind);
    let present = infos.iter().filter(|info| info.is_present()).count();
    let raw = infos
        .iter()
        .filter(|info| {
            info.is_present() && info.compression_method() == CompressionMethod::None
        })
        .count();
    let payload: u64 = infos
        .iter()
        .filter(|info| info.is_present())
        .map(|info| u64::from(info.uncompressed_size))
        .sum();

    println!("{}", format!("{kind}s").bold());
    println!("  slots: {}", infos.len());
    println!("  present: {}", present.to_string().green());
    println!("  stored raw: {raw}, zlib: {}", present - raw);
    println!("  decompressed payload: {payload} bytes");
    if let Some(ceiling) = max_sizes.iter().max() {
        println!("  largest buffer hint: {ceiling} bytes");
    }
}
