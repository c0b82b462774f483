//! Externally-supplied descriptor-table dimensions.
//!
//! FFRA files do not record how many descriptors their tables hold; the counts are fixed per
//! archive variant. Supplying the wrong counts makes every later offset misparse, so the
//! dimensions travel with the open call as an [`ArchiveLayout`] and the known retail variants
//! are published as named presets.

/// Number of maximum-buffer-size entries before the texture descriptor table
pub const TEXTURE_MAX_SIZE_COUNT: usize = 11;

/// Number of maximum-buffer-size entries before the shape descriptor table
pub const SHAPE_MAX_SIZE_COUNT: usize = 12;

/// Descriptor-table dimensions of one archive variant
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct ArchiveLayout {
    /// Number of texture descriptors in the archive
    pub texture_count: usize,

    /// Number of shape descriptors in the archive
    pub shape_count: usize,
}

impl ArchiveLayout {
    /// The high-resolution retail archive (`FFLResHigh.dat`)
    pub const RES_HIGH: ArchiveLayout = ArchiveLayout::new(317, 857);

    /// The middle-resolution retail archive (`FFLResMiddle.dat`)
    ///
    /// Shares the high-resolution table dimensions; the two archives differ only in the stored
    /// payloads.
    pub const RES_MIDDLE: ArchiveLayout = ArchiveLayout::new(317, 857);

    /// Dimensions for an archive variant not covered by the presets
    pub const fn new(texture_count: usize, shape_count: usize) -> Self {
        ArchiveLayout {
            texture_count,
            shape_count,
        }
    }
}
