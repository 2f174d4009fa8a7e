use std::num::NonZeroUsize;

use super::Prefix;

/// Validated extraction options.
///
/// Both fields are constrained by their types, so an `Options` value is
/// always well-formed: a non-positive section batch size or an invalid
/// prefix is rejected when the value is constructed, never during
/// extraction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    id_prefix: Option<Prefix>,
    section_batch_size: NonZeroUsize,
}

impl Options {
    /// Default number of rows grouped into one section.
    pub const DEFAULT_SECTION_BATCH: NonZeroUsize =
        NonZeroUsize::new(10).expect("ten is non-zero");

    /// Creates options from pre-validated parts.
    #[must_use]
    pub const fn new(id_prefix: Option<Prefix>, section_batch_size: NonZeroUsize) -> Self {
        Self {
            id_prefix,
            section_batch_size,
        }
    }

    /// The identifier prefix to recognize in cell content, if any.
    #[must_use]
    pub const fn id_prefix(&self) -> Option<&Prefix> {
        self.id_prefix.as_ref()
    }

    /// The number of consecutive rows grouped into one section.
    #[must_use]
    pub const fn section_batch_size(&self) -> NonZeroUsize {
        self.section_batch_size
    }
}

impl Default for Options {
    fn default() -> Self {
        Self::new(None, Self::DEFAULT_SECTION_BATCH)
    }
}
