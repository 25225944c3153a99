//! Reader options.

/// Options for reading HYV files.
#[derive(Debug, Clone, Default)]
pub struct HyvReaderOptions {
    /// Reject a header whose checksum token disagrees with its fields.
    pub strict_checksums: bool,
}

impl HyvReaderOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict options (header checksum verified).
    pub fn strict() -> Self {
        Self {
            strict_checksums: true,
        }
    }

    /// Set whether the header checksum is verified.
    #[must_use]
    pub fn with_strict_checksums(mut self, strict: bool) -> Self {
        self.strict_checksums = strict;
        self
    }
}
