//! Types for decoding stored texture parts
//!

use std::io::{Read, Seek, SeekFrom};

use binrw::BinRead;

use crate::error::{Error, Result};

/// Byte length of the footer that closes every texture part
pub const FOOTER_LEN: u64 = 12;

/// Pixel storage formats used by texture parts
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum TextureFormat {
    /// One byte per pixel, a plain luminance value
    Luminance,

    /// Two bytes per pixel as a big-endian 16-bit value: luminance in the
    /// high byte, alpha in the low byte
    LuminanceAlpha,

    /// Four bytes per pixel, RGBA channel order
    Rgba,
}

impl TextureFormat {
    /// Storage cost of one pixel
    pub fn bytes_per_pixel(self) -> usize {
        match self {
            TextureFormat::Luminance => 1,
            TextureFormat::LuminanceAlpha => 2,
            TextureFormat::Rgba => 4,
        }
    }
}

impl TryFrom<u8> for TextureFormat {
    type Error = Error;

    fn try_from(value: u8) -> Result<Self> {
        match value {
            0 => Ok(TextureFormat::Luminance),
            1 => Ok(TextureFormat::LuminanceAlpha),
            2 => Ok(TextureFormat::Rgba),
            other => Err(Error::UnknownTextureFormat(other)),
        }
    }
}

/// Footer closing a texture part, read from [`FOOTER_LEN`] bytes before the end
#[derive(BinRead, Debug, Copy, Clone, PartialEq, Eq)]
#[br(big)]
pub struct TextureFooter {
    /// Offset of the first mipmap level inside the blob
    pub mipmap_offset: u32,

    /// Width of the base level in pixels
    pub width: u16,

    /// Height of the base level in pixels
    pub height: u16,

    /// Number of mipmap levels stored after the base level
    pub mipmap_count: u8,

    /// Raw pixel format tag; see [`TextureFormat`]
    #[br(pad_after = 2)]
    pub format: u8,
}

/// A decoded texture: the base-level pixels plus the footer metadata
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    /// Width in pixels
    pub width: u16,

    /// Height in pixels
    pub height: u16,

    /// Number of mipmap levels stored after the base level; only the base
    /// level is decoded
    pub mipmap_count: u8,

    /// Offset of the first mipmap level inside the original blob
    pub mipmap_offset: u32,

    /// Pixel storage format
    pub format: TextureFormat,

    /// Exactly `width * height * format.bytes_per_pixel()` bytes, rows top
    /// to bottom
    pub pixels: Vec<u8>,
}

impl Texture {
    /// Decode a texture part.
    ///
    /// The footer is located from the end of the blob, so the mipmap data between the base
    /// level and the footer never needs to be walked. Only the base level is read.
    pub fn decode<R: Read + Seek>(mut reader: R) -> Result<Texture> {
        let total = reader.seek(SeekFrom::End(0))?;
        if total < FOOTER_LEN {
            return Err(Error::Truncated {
                expected: FOOTER_LEN,
                actual: total,
            });
        }

        reader.seek(SeekFrom::End(-(FOOTER_LEN as i64)))?;
        let footer = TextureFooter::read(&mut reader)?;
        let format = TextureFormat::try_from(footer.format)?;

        let pixel_len =
            usize::from(footer.width) * usize::from(footer.height) * format.bytes_per_pixel();
        if total < pixel_len as u64 + FOOTER_LEN {
            return Err(Error::Truncated {
                expected: pixel_len as u64 + FOOTER_LEN,
                actual: total,
            });
        }

        reader.seek(SeekFrom::Start(0))?;
        let mut pixels = vec![0u8; pixel_len];
        reader.read_exact(&mut pixels)?;

        Ok(Texture {
            width: footer.width,
            height: footer.height,
            mipmap_count: footer.mipmap_count,
            mipmap_offset: footer.mipmap_offset,
            format,
            pixels,
        })
    }
}

#[cfg(test)]
mod test {
    use std::io::Cursor;

    use pretty_assertions::assert_eq;

    use crate::error::{Error, Result};
    use crate::texture::{Texture, TextureFormat};

    /// Pixel bytes plus a footer describing them.
    fn build_part(width: u16, height: u16, format: u8, pixels: &[u8]) -> Vec<u8> {
        let mut data = pixels.to_vec();
        data.extend_from_slice(&(pixels.len() as u32).to_be_bytes());
        data.extend_from_slice(&width.to_be_bytes());
        data.extend_from_slice(&height.to_be_bytes());
        data.push(1); // mipmap count
        data.push(format);
        data.extend_from_slice(&[0; 2]);
        data
    }

    #[test]
    fn decode_luminance() -> Result<()> {
        let input = build_part(2, 2, 0, &[10, 20, 30, 40]);

        let texture = Texture::decode(Cursor::new(input))?;
        assert_eq!(texture.width, 2);
        assert_eq!(texture.height, 2);
        assert_eq!(texture.format, TextureFormat::Luminance);
        assert_eq!(texture.pixels, vec![10, 20, 30, 40]);

        Ok(())
    }

    #[test]
    fn decode_luminance_alpha() -> Result<()> {
        // one pixel stored as the big-endian 16-bit value 0x1234
        let input = build_part(1, 1, 1, &[0x12, 0x34]);

        let texture = Texture::decode(Cursor::new(input))?;
        assert_eq!(texture.format, TextureFormat::LuminanceAlpha);
        assert_eq!(texture.pixels.len(), 2);

        let luminance = texture.pixels[0];
        let alpha = texture.pixels[1];
        assert_eq!(luminance, 0x12);
        assert_eq!(alpha, 0x34);

        Ok(())
    }

    #[test]
    fn decode_rgba() -> Result<()> {
        let input = build_part(1, 2, 2, &[1, 2, 3, 4, 5, 6, 7, 8]);

        let texture = Texture::decode(Cursor::new(input))?;
        assert_eq!(texture.format, TextureFormat::Rgba);
        assert_eq!(
            texture.pixels.len(),
            usize::from(texture.width)
                * usize::from(texture.height)
                * texture.format.bytes_per_pixel()
        );
        assert_eq!(texture.pixels, vec![1, 2, 3, 4, 5, 6, 7, 8]);

        Ok(())
    }

    #[test]
    fn mipmap_data_between_pixels_and_footer_is_skipped() -> Result<()> {
        let mut input = b"\x0A\x14\x1E\x28".to_vec();
        input.extend_from_slice(&[0xEE; 9]); // stand-in for smaller mip levels
        input.extend_from_slice(&4u32.to_be_bytes());
        input.extend_from_slice(&2u16.to_be_bytes());
        input.extend_from_slice(&2u16.to_be_bytes());
        input.extend_from_slice(&[2, 0, 0, 0]);

        let texture = Texture::decode(Cursor::new(input))?;
        assert_eq!(texture.mipmap_count, 2);
        assert_eq!(texture.mipmap_offset, 4);
        assert_eq!(texture.pixels, vec![0x0A, 0x14, 0x1E, 0x28]);

        Ok(())
    }

    #[test]
    fn unknown_format_is_rejected() {
        let input = build_part(1, 1, 9, &[0xFF]);

        let result = Texture::decode(Cursor::new(input));
        assert!(matches!(result, Err(Error::UnknownTextureFormat(9))));
    }

    #[test]
    fn short_pixel_region_is_rejected() {
        // footer promises 2x2 RGBA but only one pixel of data precedes it
        let input = build_part(2, 2, 2, &[1, 2, 3, 4]);

        let result = Texture::decode(Cursor::new(input));
        assert!(matches!(result, Err(Error::Truncated { .. })));
    }

    #[test]
    fn blob_shorter_than_a_footer_is_rejected() {
        let result = Texture::decode(Cursor::new(vec![0u8; 5]));
        assert!(matches!(
            result,
            Err(Error::Truncated {
                expected: 12,
                actual: 5
            })
        ));
    }
}
