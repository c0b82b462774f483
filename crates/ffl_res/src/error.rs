//! Error types that can be emitted from this library

use miette::Diagnostic;
use thiserror::Error;

use crate::types::PartKind;

/// Error type for library
#[derive(Error, Diagnostic, Debug)]
pub enum Error {
    /// Transparent wrapper for [`std::io::Error`]
    #[error(transparent)]
    IOError(#[from] std::io::Error),

    /// Transparent wrapper for [`binrw::Error`]
    #[error(transparent)]
    BinRWError(#[from] binrw::Error),

    /// file is not an FFRA resource archive
    #[error("file is not an FFRA resource archive")]
    InvalidArchive,

    /// the archive version is not one this reader understands
    #[error("archive version {0:#010x} is not supported")]
    UnsupportedVersion(u32),

    /// the requested slot does not exist in the descriptor table
    #[error("no {kind} descriptor at index {index}, the table holds {count}")]
    PartOutOfRange {
        /// Category of the requested part
        kind: PartKind,
        /// Requested slot
        index: usize,
        /// Number of slots the table holds
        count: usize,
    },

    /// stored data could not be decompressed
    #[error("unable to decompress {kind} {index}")]
    Decompression {
        /// Category of the broken part
        kind: PartKind,
        /// Slot of the broken part
        index: usize,
        /// The underlying decoder failure
        #[source]
        source: std::io::Error,
    },

    /// decompressed data does not match its descriptor
    #[error("{kind} {index} decoded to {actual} bytes but its descriptor declares {expected}")]
    SizeMismatch {
        /// Category of the broken part
        kind: PartKind,
        /// Slot of the broken part
        index: usize,
        /// Byte count the descriptor declares
        expected: u64,
        /// Byte count actually decoded
        actual: u64,
    },

    /// a descriptor points outside the file, which usually means the
    /// caller-supplied descriptor counts do not match this archive variant
    #[error(
        "{kind} {index} descriptor spans bytes {start}..{end} but the file ends at {file_len}; \
         check the descriptor counts against the archive variant"
    )]
    DescriptorOutOfBounds {
        /// Category of the offending descriptor
        kind: PartKind,
        /// Slot of the offending descriptor
        index: usize,
        /// First byte the descriptor claims
        start: u64,
        /// One past the last byte the descriptor claims
        end: u64,
        /// Actual length of the file
        file_len: u64,
    },
}

/// Generic result type with crate's Error as its error variant
pub type Result<T> = core::result::Result<T, Error>;
