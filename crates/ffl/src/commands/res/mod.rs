pub mod extract;
pub mod info;

use ffl_res::ArchiveLayout;

#[derive(clap::Subcommand)]
pub enum ResCommands {
    /// Extract an archive's textures and meshes into directories
    Extract(extract::ExtractArgs),
    /// Summarize an archive's header and descriptor tables
    Info(info::InfoArgs),
}

impl ResCommands {
    pub fn handle(&self) -> miette::Result<()> {
        match self {
            ResCommands::Extract(extract) => extract.handle(),
            ResCommands::Info(info) => info.handle(),
        }
    }
}

/// The known retail archive variants
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq, clap::ValueEnum)]
pub enum Preset {
    /// High-resolution archive (FFLResHigh.dat)
    #[default]
    High,
    /// Middle-resolution archive (FFLResMiddle.dat)
    Middle,
}

/// Where the descriptor counts for an archive come from
#[derive(clap::Args)]
pub struct LayoutArgs {
    /// Named archive variant supplying the descriptor counts
    #[arg(short, long, value_enum, default_value_t = Preset::High)]
    preset: Preset,

    /// Number of texture descriptors, overriding the preset
    #[arg(long, requires = "shapes", conflicts_with = "preset")]
    textures: Option<usize>,

    /// Number of shape descriptors, overriding the preset
    #[arg(long, requires = "textures", conflicts_with = "preset")]
    shapes: Option<usize>,
}

impl LayoutArgs {
    pub fn layout(&self) -> ArchiveLayout {
        match (self.textures, self.shapes) {
            (Some(texture_count), Some(shape_count)) => {
                ArchiveLayout::new(texture_count, shape_count)
            }
            _ => match self.preset {
                Preset::High => ArchiveLayout::RES_HIGH,
                Preset::Middle => ArchiveLayout::RES_MIDDLE,
            },
        }
    }
}
