//! Types for reading FFRA archives
//!

use binrw::BinRead;
use byteorder::{BigEndian, ReadBytesExt};
use std::{
    fmt::{self, Debug},
    io::{Read, Seek, SeekFrom},
    sync::Arc,
};

use crate::{
    compression::{CompressionMethod, PartBlockReader},
    error::{Error, Result},
    layout::{ArchiveLayout, SHAPE_MAX_SIZE_COUNT, TEXTURE_MAX_SIZE_COUNT},
    types::{ArchiveHeader, PartKind, PartsInfo, FORMAT_VERSION},
};

/// A struct for reading one stored part from an FFRA archive
///
/// Reading from it yields the decoded bytes: a raw part is passed through unchanged, a zlib part
/// is inflated on the fly.
pub struct PartFile<'a, R: Read + Seek> {
    info: PartsInfo,
    reader: PartBlockReader<'a, R>,
}

impl<R: Read + Seek> Debug for PartFile<'_, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "PartFile({:#?})", self.info)
    }
}

/// Methods for retrieving information on stored parts
impl<R: Read + Seek> PartFile<'_, R> {
    /// Get the size of the part, in bytes, once decompressed
    pub fn size(&self) -> u64 {
        u64::from(self.info.uncompressed_size)
    }

    /// Get the size of the part, in bytes, as stored in the archive
    pub fn compressed_size(&self) -> u64 {
        u64::from(self.info.compressed_size)
    }

    /// Get the starting offset of the stored data
    pub fn data_start(&self) -> u64 {
        u64::from(self.info.offset)
    }

    /// Get the zlib window-bits hint recorded by the packer
    pub fn window_bits(&self) -> u8 {
        self.info.window_bits
    }

    /// Get the storage method used for this part
    pub fn compression_method(&self) -> CompressionMethod {
        self.info.compression_method()
    }

    /// Get the full descriptor for this part
    pub fn info(&self) -> &PartsInfo {
        &self.info
    }
}

impl<R: Read + Seek> Read for PartFile<'_, R> {
    fn read(&mut self, buf: &mut [u8]) -> std::io::Result<usize> {
        self.reader.read(buf)
    }
}

#[derive(Debug)]
pub(crate) struct Shared {
    header: ArchiveHeader,
    texture_max_sizes: [u32; TEXTURE_MAX_SIZE_COUNT],
    textures: Vec<PartsInfo>,
    shape_max_sizes: [u32; SHAPE_MAX_SIZE_COUNT],
    shapes: Vec<PartsInfo>,
}

/// FFRA archive reader
///
/// ```no_run
/// use std::io::prelude::*;
///
/// fn count_present_parts(reader: impl Read + Seek) -> ffl_res::error::Result<usize> {
///     let archive = ffl_res::ResourceArchive::new(reader, ffl_res::ArchiveLayout::RES_HIGH)?;
///
///     let present = archive
///         .part_infos(ffl_res::PartKind::Texture)
///         .iter()
///         .chain(archive.part_infos(ffl_res::PartKind::Shape))
///         .filter(|info| info.is_present())
///         .count();
///
///     Ok(present)
/// }
/// ```
pub struct ResourceArchive<R> {
    reader: R,
    shared: Arc<Shared>,
}

impl<R> ResourceArchive<R> {
    /// The parsed file header
    pub fn header(&self) -> &ArchiveHeader {
        &self.shared.header
    }

    /// Number of texture slots the archive was opened with
    pub fn texture_count(&self) -> usize {
        self.shared.textures.len()
    }

    /// Number of shape slots the archive was opened with
    pub fn shape_count(&self) -> usize {
        self.shared.shapes.len()
    }

    /// Number of slots in one category's descriptor table
    pub fn part_count(&self, kind: PartKind) -> usize {
        self.part_infos(kind).len()
    }

    /// Every descriptor of one category, empty slots included
    pub fn part_infos(&self, kind: PartKind) -> &[PartsInfo] {
        match kind {
            PartKind::Texture => &self.shared.textures,
            PartKind::Shape => &self.shared.shapes,
        }
    }

    /// Maximum-buffer sizes recorded ahead of the texture table, one per part type
    pub fn texture_max_sizes(&self) -> &[u32] {
        &self.shared.texture_max_sizes
    }

    /// Maximum-buffer sizes recorded ahead of the shape table, one per part type
    pub fn shape_max_sizes(&self) -> &[u32] {
        &self.shared.shape_max_sizes
    }

    /// Total size of the stored parts once decompressed, if it can be known.
    /// Doesn't include headers or descriptor tables.
    pub fn decompressed_size(&self) -> Option<u128> {
        let mut total = 0u128;
        for info in self.shared.textures.iter().chain(&self.shared.shapes) {
            if info.is_present() {
                total = total.checked_add(u128::from(info.uncompressed_size))?;
            }
        }
        Some(total)
    }
}

impl<R: Read + Seek> ResourceArchive<R> {
    /// Read an FFRA archive, collecting the descriptors of both categories.
    ///
    /// `layout` supplies the descriptor counts, which the file itself does not record.
    pub fn new(mut reader: R, layout: ArchiveLayout) -> Result<ResourceArchive<R>> {
        let shared = Self::get_metadata(&mut reader, layout)?;
        Ok(ResourceArchive {
            reader,
            shared: shared.into(),
        })
    }

    /// Best-effort check that the supplied layout matches the file.
    ///
    /// Wrong descriptor counts are not directly detectable, since the bytes parse either way,
    /// but they reliably produce descriptors whose stored bytes fall outside the file. This
    /// walks every present descriptor and reports the first one that does. The bound is the
    /// on-disk footprint (`compressed_size`), not [`PartsInfo::read_limit`]: that deliberate
    /// over-read runs past the end of the file on valid archives whose last part is
    /// compressed, and must not count against them.
    pub fn validate(&mut self) -> Result<()> {
        let file_len = self.reader.seek(SeekFrom::End(0))?;

        for kind in [PartKind::Texture, PartKind::Shape] {
            for (index, info) in self.part_infos(kind).iter().enumerate() {
                if !info.is_present() {
                    continue;
                }
                let start = u64::from(info.offset);
                let end = start + u64::from(info.compressed_size);
                if end > file_len {
                    return Err(Error::DescriptorOutOfBounds {
                        kind,
                        index,
                        start,
                        end,
                        file_len,
                    });
                }
            }
        }

        Ok(())
    }

    /// Get a stored texture by slot; `Ok(None)` for an empty slot
    pub fn by_texture(&mut self, index: usize) -> Result<Option<PartFile<'_, R>>> {
        self.by_part(PartKind::Texture, index)
    }

    /// Get a stored shape by slot; `Ok(None)` for an empty slot
    pub fn by_shape(&mut self, index: usize) -> Result<Option<PartFile<'_, R>>> {
        self.by_part(PartKind::Shape, index)
    }

    /// Get a stored part by category and slot.
    ///
    /// An empty slot (descriptor offset 0) is `Ok(None)`; only an index past the end of the
    /// table is an error.
    pub fn by_part(&mut self, kind: PartKind, index: usize) -> Result<Option<PartFile<'_, R>>> {
        let table = match kind {
            PartKind::Texture => &self.shared.textures,
            PartKind::Shape => &self.shared.shapes,
        };
        let count = table.len();
        let Some(info) = table.get(index).copied() else {
            return Err(Error::PartOutOfRange { kind, index, count });
        };

        if !info.is_present() {
            return Ok(None);
        }

        Ok(Some(PartFile {
            info,
            reader: PartBlockReader::new(
                &mut self.reader,
                u64::from(info.offset),
                info.read_limit(),
                info.compression_method(),
            )?,
        }))
    }

    /// Collect a stored texture into memory; `Ok(None)` for an empty slot
    pub fn texture_data(&mut self, index: usize) -> Result<Option<Vec<u8>>> {
        self.part_data(PartKind::Texture, index)
    }

    /// Collect a stored shape into memory; `Ok(None)` for an empty slot
    pub fn shape_data(&mut self, index: usize) -> Result<Option<Vec<u8>>> {
        self.part_data(PartKind::Shape, index)
    }

    /// Collect a stored part into memory, enforcing the declared size.
    ///
    /// A part that fails to decompress, or decodes to a length other than its descriptor's
    /// `uncompressed_size`, is corrupt; the error is scoped to that one part and later slots
    /// stay readable.
    pub fn part_data(&mut self, kind: PartKind, index: usize) -> Result<Option<Vec<u8>>> {
        let Some(mut part) = self.by_part(kind, index)? else {
            return Ok(None);
        };

        // no reservation up front: the descriptor's declared size is untrusted until the
        // decoded length has been checked against it
        let expected = part.size();
        let mut buffer = Vec::new();
        part.read_to_end(&mut buffer)
            .map_err(|source| Error::Decompression {
                kind,
                index,
                source,
            })?;

        if buffer.len() as u64 != expected {
            return Err(Error::SizeMismatch {
                kind,
                index,
                expected,
                actual: buffer.len() as u64,
            });
        }

        Ok(Some(buffer))
    }

    /// Unwrap and return the inner reader object
    ///
    /// The position of the reader is undefined.
    pub fn into_inner(self) -> R {
        self.reader
    }

    fn get_header(reader: &mut R) -> Result<ArchiveHeader> {
        let header = ArchiveHeader::read(reader).map_err(|err| match err {
            binrw::Error::BadMagic { .. } => Error::InvalidArchive,
            err => Error::BinRWError(err),
        })?;

        if header.version != FORMAT_VERSION {
            return Err(Error::UnsupportedVersion(header.version));
        }

        Ok(header)
    }

    fn get_max_sizes<const N: usize>(reader: &mut R) -> Result<[u32; N]> {
        let mut sizes = [0u32; N];
        reader.read_u32_into::<BigEndian>(&mut sizes)?;
        Ok(sizes)
    }

    fn get_parts(reader: &mut R, count: usize) -> Result<Vec<PartsInfo>> {
        (0..count)
            .map(|_| PartsInfo::read(reader).map_err(Error::from))
            .collect()
    }

    fn get_metadata(reader: &mut R, layout: ArchiveLayout) -> Result<Shared> {
        let header = Self::get_header(reader)?;
        let texture_max_sizes = Self::get_max_sizes(reader)?;
        let textures = Self::get_parts(reader, layout.texture_count)?;
        let shape_max_sizes = Self::get_max_sizes(reader)?;
        let shapes = Self::get_parts(reader, layout.shape_count)?;

        Ok(Shared {
            header,
            texture_max_sizes,
            textures,
            shape_max_sizes,
            shapes,
        })
    }
}
