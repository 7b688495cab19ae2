//! Special-line records: one per height override.

/// Identifier of a height override.
///
/// Owned by the caller (typically the id of the decoration requesting the height); the index
/// only uses it as a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct OverrideId(pub u64);

impl OverrideId {
    /// Create an override id from a raw numeric identifier.
    pub const fn new(id: u64) -> Self {
        Self(id)
    }
}

impl From<u64> for OverrideId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

/// A single height override attached to a document line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpecialLine {
    /// Override that owns this record.
    pub id: OverrideId,
    /// Target line (1-based).
    pub line_number: usize,
    /// Height this override asked for.
    pub requested_height: u32,
    /// Height actually used for the line: max requested height among live records on the line.
    pub effective_height: u32,
    /// Total height of every line strictly before `line_number`.
    pub cumulative_before: u64,
    /// Tombstone, purged at the next commit.
    pub deleted: bool,
}

impl SpecialLine {
    pub(crate) fn new(id: OverrideId, line_number: usize, requested_height: u32) -> Self {
        Self {
            id,
            line_number,
            requested_height,
            effective_height: requested_height,
            cumulative_before: 0,
            deleted: false,
        }
    }

    /// Total height through the end of this line.
    pub fn cumulative_through(&self) -> u64 {
        self.cumulative_before + u64::from(self.effective_height)
    }
}
