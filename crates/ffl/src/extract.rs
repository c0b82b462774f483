//! Archive extraction, decoupled from the command line.
//!
//! Everything the extraction run needs (input file, descriptor counts, output directories)
//! arrives as an explicit parameter, so the routine is usable from tests and other tools
//! without touching process state.

use std::fs::File;
use std::io::{Cursor, Read, Seek, Write};
use std::path::Path;

use image::codecs::png::PngEncoder;
use image::{GrayAlphaImage, GrayImage, RgbaImage};
use miette::{miette, Context, IntoDiagnostic, Result};
use tracing::{info, warn};

use ffl_glb::GlbWriter;
use ffl_part::shape::NormalData;
use ffl_part::{Shape, Texture, TextureFormat};
use ffl_res::{ArchiveLayout, ResourceArchive};

/// Counters for one extraction run
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
pub struct ExtractSummary {
    /// PNG files written
    pub textures_written: usize,

    /// GLB files written
    pub shapes_written: usize,

    /// Slots skipped because their part failed to decode
    pub failed: usize,
}

/// Extract an archive's textures and/or shapes into the given directories.
///
/// Empty slots are passed over silently. A part that fails to decode is reported with its slot
/// and the run continues; only archive-level problems (unreadable file, wrong magic or version,
/// descriptor counts that do not fit the file) abort.
pub fn extract(
    file: &Path,
    layout: ArchiveLayout,
    texture_dir: Option<&Path>,
    shape_dir: Option<&Path>,
    overwrite: bool,
) -> Result<ExtractSummary> {
    let f = File::open(file)
        .into_diagnostic()
        .context(format!("path: {}", file.display()))?;

    let mut archive = ResourceArchive::new(f, layout)?;
    archive
        .validate()
        .context("the archive does not fit the supplied descriptor counts")?;

    let mut summary = ExtractSummary::default();

    if let Some(directory) = texture_dir {
        std::fs::create_dir_all(directory)
            .into_diagnostic()
            .context(format!("creating {}", directory.display()))?;

        for index in 0..archive.texture_count() {
            match extract_texture(&mut archive, index, directory, overwrite) {
                Ok(true) => summary.textures_written += 1,
                Ok(false) => {}
                Err(err) => {
                    summary.failed += 1;
                    warn!("skipping texture {index}: {err}");
                }
            }
        }
        info!(
            "extracted {} of {} texture slots",
            summary.textures_written,
            archive.texture_count()
        );
    }

    if let Some(directory) = shape_dir {
        std::fs::create_dir_all(directory)
            .into_diagnostic()
            .context(format!("creating {}", directory.display()))?;

        for index in 0..archive.shape_count() {
            match extract_shape(&mut archive, index, directory, overwrite) {
                Ok(true) => summary.shapes_written += 1,
                Ok(false) => {}
                Err(err) => {
                    summary.failed += 1;
                    warn!("skipping shape {index}: {err}");
                }
            }
        }
        info!(
            "extracted {} of {} shape slots",
            summary.shapes_written,
            archive.shape_count()
        );
    }

    Ok(summary)
}

fn extract_texture<R: Read + Seek>(
    archive: &mut ResourceArchive<R>,
    index: usize,
    directory: &Path,
    overwrite: bool,
) -> Result<bool> {
    let Some(data) = archive.texture_data(index)? else {
        return Ok(false);
    };

    let texture = Texture::decode(Cursor::new(data))?;
    let png = texture_to_png_bytes(&texture)?;

    let path = directory.join(format!("tex_{index}.png"));
    info!("writing {}", path.display());
    write_output(&path, &png, overwrite)?;

    Ok(true)
}

fn extract_shape<R: Read + Seek>(
    archive: &mut ResourceArchive<R>,
    index: usize,
    directory: &Path,
    overwrite: bool,
) -> Result<bool> {
    let Some(data) = archive.shape_data(index)? else {
        return Ok(false);
    };

    let mesh = Shape::new(Cursor::new(data))?.mesh()?;

    let mut glb = GlbWriter::new();
    glb.add_positions(&mesh.positions);
    glb.add_triangles(&mesh.triangles);
    glb.add_tex_coords(&mesh.tex_coords);
    if let NormalData::Decoded(normals) = &mesh.normals {
        glb.add_normals(normals);
    }
    glb.add_vertex_colors(&mesh.colors);

    let mut container = Cursor::new(Vec::new());
    glb.finish(&mut container)?;

    let path = directory.join(format!("shape_{index}.glb"));
    info!("writing {}", path.display());
    write_output(&path, container.get_ref(), overwrite)?;

    Ok(true)
}

/// Encode a decoded texture as PNG bytes.
///
/// The pixel layouts map straight onto `image` buffer types: luminance rows, luminance/alpha
/// pairs, or RGBA quads.
pub fn texture_to_png_bytes(texture: &Texture) -> Result<Vec<u8>> {
    let width = u32::from(texture.width);
    let height = u32::from(texture.height);
    let pixels = texture.pixels.clone();

    let mut png = Vec::new();
    let encoder = PngEncoder::new(&mut png);
    match texture.format {
        TextureFormat::Luminance => GrayImage::from_raw(width, height, pixels)
            .ok_or_else(|| miette!("pixel buffer does not cover {width}x{height}"))?
            .write_with_encoder(encoder),
        TextureFormat::LuminanceAlpha => GrayAlphaImage::from_raw(width, height, pixels)
            .ok_or_else(|| miette!("pixel buffer does not cover {width}x{height}"))?
            .write_with_encoder(encoder),
        TextureFormat::Rgba => RgbaImage::from_raw(width, height, pixels)
            .ok_or_else(|| miette!("pixel buffer does not cover {width}x{height}"))?
            .write_with_encoder(encoder),
    }
    .into_diagnostic()?;

    Ok(png)
}

fn write_output(path: &Path, bytes: &[u8], overwrite: bool) -> Result<()> {
    let mut out = if !overwrite {
        File::create_new(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))?
    } else {
        File::create(path)
            .into_diagnostic()
            .context(format!("creating {}", path.display()))?
    };

    out.write_all(bytes).into_diagnostic()?;
    Ok(())
}
