//! This library handles reading **FFRA** resource archives used by the Wii U face library.
//!
//! # FFRA Archive Format Documentation
//!
//! This crate provides utilities to read and extract data from the **FFRA** archive format used
//! by the face library to store the textures and meshes that Mii heads are assembled from. The
//! archives ship as `.dat` files (for example the high- and middle-resolution retail archives).
//!
//! ## File Structure
//!
//! An FFRA file consists of a header, a texture category header, a shape category header, and the
//! stored part data.
//!
//! | Offset (bytes) | Field                  | Description                                                |
//! |----------------|------------------------|------------------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "FFRA"                                            |
//! | 0x0004         | Version                | 4 bytes: Fixed value 0x00070000                            |
//! | 0x0008         | Reserved               | 4 bytes                                                    |
//! | 0x000C         | Size hint              | 4 bytes: Total size of the archive once decompressed       |
//! | 0x0010         | Reserved               | 4 bytes                                                    |
//!
//! ### Category Headers
//!
//! Two category headers follow the file header, textures first, shapes second. Each starts with a
//! table of maximum-buffer sizes (one entry per part type, used by the original runtime to size
//! its staging allocation) and continues with a fixed-stride descriptor array:
//!
//! - **Texture category**: 11 maximum-size entries (0x2C bytes), then one 16-byte descriptor per
//!   texture slot.
//! - **Shape category**: 12 maximum-size entries (0x30 bytes), then one 16-byte descriptor per
//!   shape slot.
//!
//! The descriptor counts are **not** stored in the file. They are fixed per archive variant and
//! must be supplied by the caller; see [`layout::ArchiveLayout`].
//!
//! ### Descriptors
//!
//! Each descriptor locates one stored part:
//!
//! | Offset (bytes) | Field                  | Description                                             |
//! |----------------|------------------------|---------------------------------------------------------|
//! | 0x0000         | Data Offset            | 4 bytes: Absolute offset of the data; 0 if no part      |
//! | 0x0004         | Uncompressed Size      | 4 bytes: Size of the data once decompressed             |
//! | 0x0008         | Compressed Size        | 4 bytes: Size of the data as stored                     |
//! | 0x000C         | Unknown                | 1 byte                                                  |
//! | 0x000D         | Window Bits            | 1 byte: zlib window-bits hint recorded by the packer    |
//! | 0x000E         | Unknown                | 1 byte                                                  |
//! | 0x000F         | Compression            | 1 byte: 5 or anything above 100 means raw storage;      |
//! |                |                        | every other value means a zlib stream                   |
//!
//! A descriptor whose offset is 0 marks an empty slot, not an error; the retail archives leave
//! many slots empty.
//!
//! ## Additional Information
//!
//! - **File Extension**: `.dat`
//! - **Endianness**: Big-endian for all multi-byte integers
//! - **Compression**: zlib (DEFLATE) for non-raw parts
//!

pub mod compression;
pub mod error;
pub mod layout;
pub mod read;
pub mod types;

pub use compression::CompressionMethod;
pub use layout::ArchiveLayout;
pub use read::ResourceArchive;
pub use types::PartKind;
