//! This library writes decoded meshes as binary glTF (**GLB**) containers.
//!
//! # Container Documentation
//!
//! A GLB file packs a JSON scene description and its binary buffer into one file, so a decoded
//! mesh travels as a single artifact. The writer here targets the smallest useful subset: one
//! scene, one node, one mesh, one buffer.
//!
//! ## File Structure
//!
//! | Offset (bytes) | Field                  | Description                                        |
//! |----------------|------------------------|----------------------------------------------------|
//! | 0x0000         | Magic number           | 4 bytes: "glTF"                                    |
//! | 0x0004         | Version                | 4 bytes: Fixed value 2                             |
//! | 0x0008         | Total Length           | 4 bytes: Length of the whole file                  |
//! | 0x000C         | JSON Chunk             | 8-byte chunk header, then the scene description    |
//! |                | Binary Chunk           | 8-byte chunk header, then the buffer data          |
//!
//! Each chunk header is a 4-byte payload length followed by a 4-byte type tag ("JSON" or
//! "BIN\0"). The JSON payload is padded to a four-byte boundary with spaces, the binary payload
//! with zero bytes, and both headers record the padded length. The total length in the file
//! header is `12 + 8 + json + 8 + binary` with both payloads already padded.
//!
//! ## Buffer Layout
//!
//! Every attribute handed to [`write::GlbWriter`] appends its bytes to the single buffer and
//! declares a buffer view and an accessor over them, so the binary chunk holds the attributes
//! back to back in declaration order. All values are written little-endian as glTF requires.
//!
//! - **Endianness**: Little-endian for all multi-byte integers
//! - **File Extension**: `.glb`
//!

pub mod document;
pub mod error;
pub mod types;
pub mod write;

pub use write::GlbWriter;
