//! Block decompression handling.

use std::fmt;
use std::io::{self, Read, Seek};

use flate2::read::ZlibDecoder;
use tracing::instrument;

use crate::error::Result;

/// Identifies how a part's data is stored inside the archive
///
/// The descriptor byte is not a plain enum on disk: 5 and every value above 100 mark raw
/// storage, anything else marks a zlib stream. Use [`From<u8>`] to classify a flag.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub enum CompressionMethod {
    /// Stores the data as it is
    None,

    /// Compress the data using Zlib
    #[default]
    Zlib,
}

impl From<u8> for CompressionMethod {
    fn from(value: u8) -> Self {
        match value {
            5 => CompressionMethod::None,
            v if v > 100 => CompressionMethod::None,
            _ => CompressionMethod::Zlib,
        }
    }
}

impl fmt::Display for CompressionMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CompressionMethod::None => write!(f, "raw"),
            CompressionMethod::Zlib => write!(f, "zlib"),
        }
    }
}

pub(crate) enum PartBlockReader<'a, R: Read + Seek> {
    Raw(io::Take<&'a mut R>),
    Compressed(Box<ZlibDecoder<io::Take<&'a mut R>>>),
}

impl<'a, R: Read + Seek> PartBlockReader<'a, R> {
    #[instrument(skip(reader))]
    pub fn new(
        reader: &'a mut R,
        start: u64,
        limit: u64,
        compression: CompressionMethod,
    ) -> Result<Self> {
        reader.seek(io::SeekFrom::Start(start))?;

        let limit_reader = reader.by_ref().take(limit);
        Ok(match compression {
            CompressionMethod::None => PartBlockReader::Raw(limit_reader),
            CompressionMethod::Zlib => {
                PartBlockReader::Compressed(Box::new(ZlibDecoder::new(limit_reader)))
            }
        })
    }
}

impl<R: Read + Seek> Read for PartBlockReader<'_, R> {
    #[instrument(skip(self, buf), err)]
    fn read(&mut self, buf: &mut [u8]) -> io::Result<usize> {
        match self {
            PartBlockReader::Raw(r) => r.read(buf),
            PartBlockReader::Compressed(r) => r.read(buf),
        }
    }

    #[instrument(skip(self, buf), err)]
    fn read_exact(&mut self, buf: &mut [u8]) -> io::Result<()> {
        match self {
            PartBlockReader::Raw(r) => r.read_exact(buf),
            PartBlockReader::Compressed(r) => r.read_exact(buf),
        }
    }

    #[instrument(skip(self, buf), err)]
    fn read_to_end(&mut self, buf: &mut Vec<u8>) -> io::Result<usize> {
        match self {
            PartBlockReader::Raw(r) => r.read_to_end(buf),
            PartBlockReader::Compressed(r) => r.read_to_end(buf),
        }
    }
}

#[cfg(test)]
mod test {
    use pretty_assertions::assert_eq;

    use crate::compression::CompressionMethod;

    #[test]
    fn classify_storage_flags() {
        assert_eq!(CompressionMethod::from(5), CompressionMethod::None);
        assert_eq!(CompressionMethod::from(101), CompressionMethod::None);
        assert_eq!(CompressionMethod::from(255), CompressionMethod::None);

        assert_eq!(CompressionMethod::from(0), CompressionMethod::Zlib);
        assert_eq!(CompressionMethod::from(1), CompressionMethod::Zlib);
        assert_eq!(CompressionMethod::from(4), CompressionMethod::Zlib);
        assert_eq!(CompressionMethod::from(6), CompressionMethod::Zlib);
        assert_eq!(CompressionMethod::from(100), CompressionMethod::Zlib);
    }
}
