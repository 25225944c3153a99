//! Reader options.

/// Options for reading HY3 files.
#[derive(Debug, Clone, Default)]
pub struct Hy3ReaderOptions {
    /// Reject lines whose stored checksum digits disagree with their
    /// content. Off by default.
    pub strict_checksums: bool,
}

impl Hy3ReaderOptions {
    /// Create new default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create strict options (checksums verified).
    pub fn strict() -> Self {
        Self {
            strict_checksums: true,
        }
    }

    /// Set whether checksums are verified.
    #[must_use]
    pub fn with_strict_checksums(mut self, strict: bool) -> Self {
        self.strict_checksums = strict;
        self
    }
}
