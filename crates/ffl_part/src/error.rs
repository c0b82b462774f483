//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// the texture carries a pixel format tag this decoder does not know
    #[error("unknown texture format {0}")]
    UnknownTextureFormat(u8),

    /// the blob is shorter than its own metadata requires
    #[error("part is truncated: need {expected} bytes, have {actual}")]
    Truncated {
        /// Byte count the metadata requires
        expected: u64,
        /// Byte count actually available
        actual: u64,
    },

    /// shapes only carry sections 0 through 8
    #[error("shape has no section {0}")]
    InvalidSection(usize),

    /// the index section does not divide into triangles
    #[error("index section holds {indices} entries, which do not form whole triangles")]
    PartialTriangle {
        /// Number of u16 indices found
        indices: usize,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
