//! Decoders for the two payload kinds stored in FFRA resource archives.
//!
//! The archive layer ([`ffl_res`](https://docs.rs/ffl_res)) hands out decompressed part blobs;
//! this crate interprets them.
//!
//! # Texture Part Documentation
//!
//! A texture part is a pixel buffer followed by mipmap levels and closed by a twelve-byte
//! footer. The footer sits at a fixed distance from the **end** of the blob:
//!
//! | Offset from end | Field          | Description                                      |
//! |-----------------|----------------|--------------------------------------------------|
//! | -0x0C           | Mipmap Offset  | 4 bytes: Offset of the first mipmap level        |
//! | -0x08           | Width          | 2 bytes                                          |
//! | -0x06           | Height         | 2 bytes                                          |
//! | -0x04           | Mipmap Count   | 1 byte                                           |
//! | -0x03           | Format         | 1 byte: pixel format tag                         |
//! | -0x02           | Unknown        | 2 bytes                                          |
//!
//! The base-level pixels are the leading `width * height * bytes_per_pixel` bytes. Formats:
//! 0 is one byte of luminance per pixel, 1 is a big-endian 16-bit value per pixel carrying
//! luminance in the high byte and alpha in the low byte, 2 is four RGBA bytes per pixel.
//!
//! # Shape Part Documentation
//!
//! A shape part opens with a section table (six big-endian u32 offsets followed by six
//! big-endian u32 lengths), and the sections hold one vertex attribute each:
//!
//! | Section | Contents         | Record layout                                   |
//! |---------|------------------|--------------------------------------------------|
//! | 0       | Positions        | 16 bytes: x, y, z, w floats; w is padding        |
//! | 1       | Normals          | 4 bytes: packed, encoding not confirmed          |
//! | 2       | Texture coords   | 8 bytes: u, v floats; stored v needs `v - 1`     |
//! | 3       | Unknown          |                                                  |
//! | 4       | Vertex colors    | 4 bytes: RGBA                                    |
//! | 5       | Triangle indices | 2 bytes: u16; stored length is half the truth    |
//!
//! Three further pseudo-sections (6, 7 and 8) live at fixed offsets in every shape and are not
//! part of the table; they are addressable through [`shape::Shape::section`] like the others.
//!
//! All multi-byte integers and floats are big-endian.

pub mod error;
pub mod shape;
pub mod texture;

pub use shape::{Mesh, NormalData, Shape};
pub use texture::{Texture, TextureFormat};
