use clap::Args;
use miette::{miette, Result};
use std::path::PathBuf;
use tracing::info;

use super::LayoutArgs;
use crate::extract::extract;

#[derive(Args)]
pub struct ExtractArgs {
    /// An input FFRA resource file
    #[arg(short, long, value_name = "FILE")]
    file: PathBuf,

    #[command(flatten)]
    layout: LayoutArgs,

    /// A target directory for decoded textures
    #[arg(short, long, value_name = "DIR")]
    texture_dir: Option<PathBuf>,

    /// A target directory for decoded meshes
    #[arg(short, long, value_name = "DIR")]
    shape_dir: Option<PathBuf>,

    /// Allow overwriting the targets
    #[arg(long, default_value_t = false)]
    overwrite: bool,
}

impl ExtractArgs {
    pub fn handle(&self) -> Result<()> {
        if self.texture_dir.is_none() && self.shape_dir.is_none() {
            return Err(miette!(
                "nothing to extract: pass --texture-dir and/or --shape-dir"
            ));
        }

        let summary = extract(
            &self.file,
            self.layout.layout(),
            self.texture_dir.as_deref(),
            self.shape_dir.as_deref(),
            self.overwrite,
        )?;

        if summary.failed > 0 {
            info!("{} slots could not be decoded", summary.failed);
        }

        Ok(())
    }
}
