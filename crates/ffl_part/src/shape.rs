//! Types for decoding stored shape (mesh) parts
//!

use std::io::{Read, Seek, SeekFrom};

use binrw::BinRead;
use byteorder::{BigEndian, ByteOrder};

use crate::error::{Error, Result};

/// Number of entries in the section offset/length table
pub const SECTION_COUNT: usize = 6;

/// Section holding vertex positions
pub const SECTION_POSITIONS: usize = 0;
/// Section holding packed vertex normals
pub const SECTION_NORMALS: usize = 1;
/// Section holding texture coordinates
pub const SECTION_TEX_COORDS: usize = 2;
/// Section holding per-vertex colors
pub const SECTION_COLORS: usize = 4;
/// Section holding triangle indices
pub const SECTION_INDICES: usize = 5;

/// Offset/length table opening every shape part
#[derive(BinRead, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[br(big)]
pub struct SectionTable {
    /// Absolute offset of each section inside the blob
    pub offsets: [u32; SECTION_COUNT],

    /// Stored length of each section; the index section's entry is half the
    /// true byte length
    pub lengths: [u32; SECTION_COUNT],
}

/// Outcome of asking a shape for vertex normals
///
/// Section 1 packs one 32-bit value per vertex, by all appearances a 10/10/10/2 fixed-point
/// XYZW quad, but the unpack has not been confirmed against enough real archives to trust.
/// Until it is, decoding reports [`NormalData::Unsupported`] instead of guessing.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NormalData {
    /// Unpacked unit normals, one triple per vertex
    Decoded(Vec<[f32; 3]>),

    /// The stored encoding is not understood; no normals are produced
    #[default]
    Unsupported,
}

/// Fully decoded attributes of one shape
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    /// One x,y,z triple per vertex
    pub positions: Vec<[f32; 3]>,

    /// Normal decode outcome; see [`NormalData`]
    pub normals: NormalData,

    /// One u,v pair per vertex; empty for shapes without a texture layer
    pub tex_coords: Vec<[f32; 2]>,

    /// One RGBA quad per vertex; empty or a single filler entry for shapes
    /// without baked colors
    pub colors: Vec<[u8; 4]>,

    /// Counter-clockwise triangle list
    pub triangles: Vec<[u16; 3]>,
}

/// Shape part reader
///
/// Borrows nothing from the archive: the decompressed blob is handed over as any
/// `Read + Seek` source and the sections are pulled out on demand.
pub struct Shape<R> {
    reader: R,
    table: SectionTable,
}

impl<R: Read + Seek> Shape<R> {
    /// Read the section table that opens every shape part.
    pub fn new(mut reader: R) -> Result<Shape<R>> {
        let table = SectionTable::read(&mut reader)?;
        Ok(Shape { reader, table })
    }

    /// The parsed section table
    pub fn table(&self) -> &SectionTable {
        &self.table
    }

    /// Number of vertices, derived from the position section's length
    pub fn vertex_count(&self) -> usize {
        self.table.lengths[SECTION_POSITIONS] as usize / 16
    }

    /// Number of triangles, derived from the index section's stored length
    pub fn face_count(&self) -> usize {
        self.table.lengths[SECTION_INDICES] as usize / 3
    }

    /// Raw bytes of one section.
    ///
    /// Indices 0 through 5 come from the offset/length table; the index section's stored
    /// length is half its true byte length and is doubled here. Indices 6 through 8 are fixed
    /// regions every shape carries at the same position regardless of the table.
    pub fn section(&mut self, index: usize) -> Result<Vec<u8>> {
        let (offset, length) = match index {
            SECTION_INDICES => (
                u64::from(self.table.offsets[index]),
                self.table.lengths[index] as usize * 2,
            ),
            0..=4 => (
                u64::from(self.table.offsets[index]),
                self.table.lengths[index] as usize,
            ),
            6 => (0x48, 0x24),
            7 => (0x48, 0x48),
            8 => (0x30, 0x18),
            other => return Err(Error::InvalidSection(other)),
        };

        self.reader.seek(SeekFrom::Start(offset))?;
        let mut data = vec![0u8; length];
        self.reader.read_exact(&mut data)?;
        Ok(data)
    }

    /// Vertex positions. Stored as x,y,z,w float quads; w is padding and is dropped.
    pub fn positions(&mut self) -> Result<Vec<[f32; 3]>> {
        let data = self.section(SECTION_POSITIONS)?;
        Ok(data
            .chunks_exact(16)
            .map(|v| {
                [
                    BigEndian::read_f32(&v[0..4]),
                    BigEndian::read_f32(&v[4..8]),
                    BigEndian::read_f32(&v[8..12]),
                ]
            })
            .collect())
    }

    /// Vertex normals; see [`NormalData`] for why this currently never decodes.
    pub fn normals(&mut self) -> Result<NormalData> {
        let _packed = self.section(SECTION_NORMALS)?;
        Ok(NormalData::Unsupported)
    }

    /// Texture coordinates. The stored v axis points away from every downstream consumer's
    /// convention; `v - 1` is applied to each pair.
    pub fn tex_coords(&mut self) -> Result<Vec<[f32; 2]>> {
        let data = self.section(SECTION_TEX_COORDS)?;
        Ok(data
            .chunks_exact(8)
            .map(|uv| {
                [
                    BigEndian::read_f32(&uv[0..4]),
                    BigEndian::read_f32(&uv[4..8]) - 1.0,
                ]
            })
            .collect())
    }

    /// Per-vertex colors, RGBA channel order.
    pub fn colors(&mut self) -> Result<Vec<[u8; 4]>> {
        let data = self.section(SECTION_COLORS)?;
        Ok(data
            .chunks_exact(4)
            .map(|c| [c[0], c[1], c[2], c[3]])
            .collect())
    }

    /// Triangle list, read after the index section's doubling rule is applied.
    pub fn triangles(&mut self) -> Result<Vec<[u16; 3]>> {
        let data = self.section(SECTION_INDICES)?;
        let indices: Vec<u16> = data.chunks_exact(2).map(BigEndian::read_u16).collect();

        if indices.len() % 3 != 0 {
            return Err(Error::PartialTriangle {
                indices: indices.len(),
            });
        }

        Ok(indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]]).collect())
    }

    /// Decode every exportable attribute at once.
    pub fn mesh(&mut self) -> Result<Mesh> {
        Ok(Mesh {
            positions: self.positions()?,
            normals: self.normals()?,
            tex_coords: self.tex_coords()?,
            colors: self.colors()?,
            triangles: self.triangles()?,
        })
    }

    /// Unwrap and return the inner reader object
    pub fn into_inner(self) -> R {
        self.reader
    }
}
