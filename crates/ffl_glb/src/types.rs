//! Base types for the binary framing of a GLB container.

use binrw::{BinRead, BinWrite};

/// Container format version written to every file
pub const CONTAINER_VERSION: u32 = 2;

/// Type tag of the scene-description chunk ("JSON")
pub const CHUNK_JSON: u32 = 0x4E4F_534A;

/// Type tag of the buffer chunk ("BIN\0")
pub const CHUNK_BIN: u32 = 0x004E_4942;

/// 12-byte file header opening every container
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(magic = b"glTF", little)]
pub struct FileHeader {
    /// Container format version, always [`CONTAINER_VERSION`]
    pub version: u32,

    /// Length of the whole file: header plus both chunk headers and their
    /// padded payloads
    pub length: u32,
}

/// 8-byte header in front of each chunk
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(little)]
pub struct ChunkHeader {
    /// Padded payload length in bytes
    pub length: u32,

    /// Chunk type tag, [`CHUNK_JSON`] or [`CHUNK_BIN`]
    pub kind: u32,
}
