//! Base types for the structure of an FFRA archive.

use std::fmt;

use binrw::{BinRead, BinWrite};

use crate::compression::CompressionMethod;

/// Format version carried by every known retail archive.
pub const FORMAT_VERSION: u32 = 0x0007_0000;

/// FFRA file header
///
/// Every archive starts with the magic bytes "FFRA" followed by a version. All multi-byte
/// integers in the archive are stored big-endian.
#[derive(BinRead, BinWrite, Debug, Copy, Clone, PartialEq, Eq)]
#[brw(magic = b"FFRA", big)]
pub struct ArchiveHeader {
    /// Format version, [`FORMAT_VERSION`] in every known archive
    pub version: u32,

    /// Total size of the archive once every part is decompressed.
    ///
    /// Informational only; nothing in the reader depends on it.
    #[brw(pad_before = 4, pad_after = 4)]
    pub size_hint: u32,
}

impl Default for ArchiveHeader {
    fn default() -> Self {
        Self {
            version: FORMAT_VERSION,
            size_hint: 0,
        }
    }
}

/// The two part categories an archive stores
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub enum PartKind {
    /// Face texture parts (eyes, eyebrows, mouths, ...)
    Texture,
    /// Face mesh parts (head shells, noses, hair, ...)
    Shape,
}

impl fmt::Display for PartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PartKind::Texture => write!(f, "texture"),
            PartKind::Shape => write!(f, "shape"),
        }
    }
}

/// Descriptor locating one stored part
///
/// Sixteen of these bytes follow each category's maximum-size table, one record per slot.
#[derive(BinRead, BinWrite, Debug, Default, Copy, Clone, PartialEq, Eq)]
#[brw(big)]
pub struct PartsInfo {
    /// Absolute byte offset of the stored data; 0 marks an empty slot
    pub offset: u32,

    /// Size of the data once decompressed
    pub uncompressed_size: u32,

    /// Size of the data as stored in the file
    pub compressed_size: u32,

    /// Unknown
    pub unknown1: u8,

    /// zlib window-bits hint recorded by the packer; not needed when reading
    pub window_bits: u8,

    /// Unknown
    pub unknown2: u8,

    /// Storage flag: 5 or anything above 100 means raw storage, every other
    /// value means a zlib stream
    pub compression: u8,
}

impl PartsInfo {
    /// Whether this slot holds a part at all
    pub fn is_present(&self) -> bool {
        self.offset != 0
    }

    /// How the stored bytes are encoded
    pub fn compression_method(&self) -> CompressionMethod {
        CompressionMethod::from(self.compression)
    }

    /// Number of bytes to pull from the archive for this part.
    ///
    /// The retail runtime reads `uncompressed_size` bytes from the file even when the part is a
    /// zlib stream whose stored length is `compressed_size`. The over-read is harmless because
    /// the decoder stops at the end of the stream, but archives in the wild were packed against
    /// that reader, so the behavior is kept verbatim rather than corrected to `compressed_size`.
    pub fn read_limit(&self) -> u64 {
        u64::from(self.uncompressed_size)
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use binrw::BinRead;
    use binrw::BinWrite;
    use pretty_assertions::assert_eq;

    use crate::compression::CompressionMethod;
    use crate::error::Result;
    use crate::types::ArchiveHeader;
    use crate::types::PartsInfo;
    use crate::types::FORMAT_VERSION;

    #[test]
    fn read_header() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            b'F', b'F', b'R', b'A',
            0x00, 0x07, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0xCC, 0x29,
            0x00, 0x00, 0x00, 0x00,
        ]);

        let expected = ArchiveHeader {
            version: FORMAT_VERSION,
            size_hint: 0xCC29,
        };

        assert_eq!(ArchiveHeader::read(&mut input)?, expected);
        assert_eq!(input.position(), 0x14);

        Ok(())
    }

    #[test]
    fn read_header_rejects_bad_magic() {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            b'A', b'R', b'F', b'F',
            0x00, 0x07, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0xCC, 0x29,
            0x00, 0x00, 0x00, 0x00,
        ]);

        assert!(ArchiveHeader::read(&mut input).is_err());
    }

    #[test]
    fn write_header() -> Result<()> {
        #[rustfmt::skip]
        let expected: Vec<u8> = vec![
            b'F', b'F', b'R', b'A',
            0x00, 0x07, 0x00, 0x00,
            0x00, 0x00, 0x00, 0x00,
            0x00, 0x00, 0x28, 0xD1,
            0x00, 0x00, 0x00, 0x00,
        ];

        let header = ArchiveHeader {
            size_hint: 0x28D1,
            ..Default::default()
        };

        let mut actual = Vec::new();
        header.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn read_parts_info() -> Result<()> {
        #[rustfmt::skip]
        let mut input = Cursor::new(vec![
            0x00, 0x00, 0x49, 0xA0,
            0x00, 0x00, 0x08, 0x00,
            0x00, 0x00, 0x02, 0x13,
            0x00, 0x0C, 0x00, 0x01,
        ]);

        let expected = PartsInfo {
            offset: 0x49A0,
            uncompressed_size: 0x800,
            compressed_size: 0x213,
            unknown1: 0,
            window_bits: 0x0C,
            unknown2: 0,
            compression: 1,
        };

        let actual = PartsInfo::read(&mut input)?;
        assert_eq!(actual, expected);
        assert!(actual.is_present());
        assert_eq!(actual.compression_method(), CompressionMethod::Zlib);
        assert_eq!(actual.read_limit(), 0x800);

        Ok(())
    }

    #[test]
    fn write_parts_info() -> Result<()> {
        #[rustfmt::skip]
        let expected = vec![
            0x00, 0x00, 0x49, 0xA0,
            0x00, 0x00, 0x08, 0x00,
            0x00, 0x00, 0x08, 0x00,
            0x00, 0x00, 0x00, 0x05,
        ];

        let info = PartsInfo {
            offset: 0x49A0,
            uncompressed_size: 0x800,
            compressed_size: 0x800,
            compression: 5,
            ..Default::default()
        };

        let mut actual = Vec::new();
        info.write(&mut Cursor::new(&mut actual))?;

        assert_eq!(actual, expected);

        Ok(())
    }

    #[test]
    fn empty_slot_is_not_present() {
        let info = PartsInfo::default();
        assert!(!info.is_present());
    }
}
