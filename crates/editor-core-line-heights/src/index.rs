//! Line Height Index
//!
//! Keeps a sorted vector of [`SpecialLine`] records, one per height override, together with
//! per-run effective heights and prefix sums of the document height.
//!
//! Mutations only record intent: new overrides are queued, updated or removed ones lower the
//! "invalid from" marker. The first query after a batch of mutations runs a single commit
//! that merges the queue and recomputes the dirtied suffix, so the cost of a sync cycle with
//! many overlapping mutations is paid once.
//!
//! Line numbers are 1-based. Heights are in pixels (`u32`), cumulative offsets are `u64`.

use crate::config::LineHeightConfig;
use crate::error::LineHeightError;
use crate::special_line::{OverrideId, SpecialLine};
use std::collections::HashMap;

/// Per-line height index for one document.
#[derive(Debug, Clone)]
pub struct LineHeightIndex {
    /// Committed records, sorted by line number (ties keep association order).
    pub(crate) records: Vec<SpecialLine>,
    /// Override id -> position in `records` (committed, live records only).
    pub(crate) positions: HashMap<OverrideId, usize>,
    /// New records not merged into `records` yet.
    pending: Vec<SpecialLine>,
    /// Smallest position whose derived heights may be stale.
    invalid_from: Option<usize>,
    default_height: u32,
}

impl LineHeightIndex {
    /// Create an empty index using `default_height` for every line without an override.
    ///
    /// # Panics
    ///
    /// Panics if `default_height` is zero.
    pub fn new(default_height: u32) -> Self {
        assert!(default_height > 0, "default line height must be positive");
        Self {
            records: Vec::new(),
            positions: HashMap::new(),
            pending: Vec::new(),
            invalid_from: None,
            default_height,
        }
    }

    /// Create an empty index from a configuration, validating it first.
    pub fn from_config(config: &LineHeightConfig) -> Result<Self, LineHeightError> {
        config.validate()?;
        Ok(Self::new(config.default_height))
    }

    /// Height used for lines without an override.
    pub fn default_height(&self) -> u32 {
        self.default_height
    }

    /// Replace the default line height.
    ///
    /// Every stored prefix sum depends on the default, so the whole index is recomputed at the
    /// next query.
    ///
    /// # Panics
    ///
    /// Panics if `height` is zero.
    pub fn set_default_height(&mut self, height: u32) {
        assert!(height > 0, "default line height must be positive");
        if height == self.default_height {
            return;
        }

        tracing::debug!(
            old = self.default_height,
            new = height,
            "default line height changed"
        );
        self.default_height = height;
        if !self.records.is_empty() {
            self.invalidate_from(0);
        }
    }

    /// Insert a new override, or move/resize an existing one.
    ///
    /// # Panics
    ///
    /// Panics if `line_number` is zero.
    pub fn insert_or_update(&mut self, id: OverrideId, line_number: usize, height: u32) {
        assert!(line_number >= 1, "line numbers are 1-based, got {line_number}");

        if let Some(&position) = self.positions.get(&id) {
            let record = &mut self.records[position];
            if record.line_number == line_number {
                if record.requested_height != height {
                    record.requested_height = height;
                    self.invalidate_from(position);
                }
                return;
            }

            // Moving to another line: tombstone here, re-enter through the queue so the
            // commit puts it back in sorted order.
            record.deleted = true;
            self.positions.remove(&id);
            self.invalidate_from(position);
        } else if let Some(index) = self.pending.iter().position(|line| line.id == id) {
            if self.pending[index].line_number == line_number {
                self.pending[index].requested_height = height;
                return;
            }
            self.pending.remove(index);
        }

        self.pending.push(SpecialLine::new(id, line_number, height));
    }

    /// Remove an override. Unknown ids are ignored.
    ///
    /// Returns `true` if an override was removed.
    pub fn remove_override(&mut self, id: OverrideId) -> bool {
        if let Some(position) = self.positions.remove(&id) {
            self.records[position].deleted = true;
            self.invalidate_from(position);
            return true;
        }

        let before = self.pending.len();
        self.pending.retain(|line| line.id != id);
        self.pending.len() != before
    }

    /// Remove every override.
    pub fn clear(&mut self) {
        self.records.clear();
        self.positions.clear();
        self.pending.clear();
        self.invalid_from = None;
    }

    /// Number of live overrides (committed or pending).
    pub fn len(&self) -> usize {
        self.positions.len() + self.pending.len()
    }

    /// Check if there are no overrides.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Check if an override with this id is live.
    pub fn contains(&self, id: OverrideId) -> bool {
        self.positions.contains_key(&id) || self.pending.iter().any(|line| line.id == id)
    }

    /// Whether a mutation is waiting for the next commit.
    pub fn needs_commit(&self) -> bool {
        self.invalid_from.is_some() || !self.pending.is_empty()
    }

    /// Effective height of `line_number`.
    pub fn height_for_line(&mut self, line_number: usize) -> u32 {
        self.commit();
        match self.search(line_number) {
            Ok(index) => self.records[index].effective_height,
            Err(_) => self.default_height,
        }
    }

    /// Total height of lines `1..=line_number`. Line `0` yields `0`.
    pub fn cumulative_height_through(&mut self, line_number: usize) -> u64 {
        self.commit();
        match self.search(line_number) {
            Ok(index) => self.records[index].cumulative_through(),
            Err(0) => self.default_lines_height(line_number),
            Err(insertion) => {
                let previous = &self.records[insertion - 1];
                previous.cumulative_through()
                    + self.default_lines_height(line_number - previous.line_number)
            }
        }
    }

    /// Committed records in line order.
    pub fn special_lines(&mut self) -> &[SpecialLine] {
        self.commit();
        &self.records
    }

    /// Committed overrides in line order, as `(id, line_number, requested_height)`.
    pub fn overrides(&mut self) -> impl Iterator<Item = (OverrideId, usize, u32)> + '_ {
        self.special_lines()
            .iter()
            .map(|line| (line.id, line.line_number, line.requested_height))
    }

    /// Bring the index up to date.
    ///
    /// Queries call this implicitly. Returns `false` if there was nothing to do.
    pub fn commit(&mut self) -> bool {
        if !self.needs_commit() {
            return false;
        }

        let merged = self.pending.len();
        for line in std::mem::take(&mut self.pending) {
            let index = self.first_index_at_or_after(line.line_number + 1);
            self.records.insert(index, line);
            self.invalidate_from(index);
        }

        let mut start = self
            .invalid_from
            .take()
            .unwrap_or(self.records.len())
            .min(self.records.len());
        while start > 0
            && start < self.records.len()
            && self.records[start - 1].line_number == self.records[start].line_number
        {
            start -= 1;
        }

        let default_height = u64::from(self.default_height);
        let suffix = self.records.split_off(start);
        let mut previous = self
            .records
            .last()
            .map(|line| (line.line_number, line.cumulative_through()));
        let mut live = suffix.into_iter().filter(|line| !line.deleted).peekable();
        let mut runs = 0usize;

        while let Some(first) = live.next() {
            let line_number = first.line_number;
            let cumulative_before = match previous {
                Some((previous_line, previous_through)) => {
                    previous_through + default_height * (line_number - previous_line - 1) as u64
                }
                None => default_height * (line_number - 1) as u64,
            };

            let run_start = self.records.len();
            self.records.push(first);
            while let Some(next) = live.next_if(|line| line.line_number == line_number) {
                self.records.push(next);
            }

            let run = &mut self.records[run_start..];
            let effective_height = run
                .iter()
                .map(|line| line.requested_height)
                .max()
                .unwrap_or_default();
            for (offset, line) in run.iter_mut().enumerate() {
                line.effective_height = effective_height;
                line.cumulative_before = cumulative_before;
                self.positions.insert(line.id, run_start + offset);
            }

            previous = Some((
                line_number,
                cumulative_before + u64::from(effective_height),
            ));
            runs += 1;
        }

        #[cfg(debug_assertions)]
        self.assert_consistent();

        tracing::trace!(
            merged,
            rebuilt_from = start,
            runs,
            records = self.records.len(),
            "committed line heights"
        );
        true
    }

    pub(crate) fn invalidate_from(&mut self, position: usize) {
        self.invalid_from = Some(
            self.invalid_from
                .map_or(position, |current| current.min(position)),
        );
    }

    /// Binary search over committed records: `Ok(index)` of some record on `line_number`, or
    /// `Err(insertion_point)`.
    pub(crate) fn search(&self, line_number: usize) -> Result<usize, usize> {
        self.records
            .binary_search_by(|line| line.line_number.cmp(&line_number))
    }

    /// Index of the first committed record with a line number `>= line_number`.
    pub(crate) fn first_index_at_or_after(&self, line_number: usize) -> usize {
        match self.search(line_number) {
            Ok(mut index) => {
                while index > 0 && self.records[index - 1].line_number == line_number {
                    index -= 1;
                }
                index
            }
            Err(index) => index,
        }
    }

    pub(crate) fn default_lines_height(&self, count: usize) -> u64 {
        u64::from(self.default_height) * count as u64
    }

    #[cfg(debug_assertions)]
    fn assert_consistent(&self) {
        let default_height = u64::from(self.default_height);
        let mut previous: Option<&SpecialLine> = None;

        for (position, line) in self.records.iter().enumerate() {
            assert!(!line.deleted, "tombstone survived commit at {position}");
            assert!(line.line_number >= 1, "line number 0 at {position}");
            assert_eq!(
                self.positions.get(&line.id),
                Some(&position),
                "id map out of sync at {position}"
            );

            match previous {
                Some(prev) if prev.line_number == line.line_number => {
                    assert_eq!(prev.effective_height, line.effective_height);
                    assert_eq!(prev.cumulative_before, line.cumulative_before);
                }
                Some(prev) => {
                    assert!(prev.line_number < line.line_number, "unsorted at {position}");
                    assert_eq!(
                        line.cumulative_before,
                        prev.cumulative_through()
                            + default_height * (line.line_number - prev.line_number - 1) as u64
                    );
                }
                None => {
                    assert_eq!(
                        line.cumulative_before,
                        default_height * (line.line_number - 1) as u64
                    );
                }
            }
            previous = Some(line);
        }

        assert_eq!(self.positions.len(), self.records.len());
    }
}

impl Default for LineHeightIndex {
    fn default() -> Self {
        Self::from(LineHeightConfig::default())
    }
}

impl From<LineHeightConfig> for LineHeightIndex {
    fn from(config: LineHeightConfig) -> Self {
        Self::new(config.default_height)
    }
}
