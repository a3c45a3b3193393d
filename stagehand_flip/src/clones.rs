// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Transient clone records and completion tracking.

use kurbo::Rect;
use smallvec::SmallVec;

use crate::invert::FlipTransform;

/// Identifier for one clone within its owning [`CloneSet`].
///
/// Hosts receive the id when a clone is spawned and echo it back when the
/// clone's transform transition completes.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct CloneId(u32);

impl CloneId {
    pub(crate) const fn new(idx: u32) -> Self {
        Self(idx)
    }

    /// Position of this clone in its set's record list.
    pub const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// One transient visual stand-in: where it starts, where it is headed, and
/// the transform that carries it there.
///
/// Both rectangles are in the clone container's coordinate space.
#[derive(Copy, Clone, Debug)]
pub struct CloneRecord {
    /// The clone's id within its set.
    pub id: CloneId,
    /// Where the clone is first painted (the outgoing element's box).
    pub origin: Rect,
    /// Where the clone ends up (the incoming element's box).
    pub target: Rect,
    /// The transform carrying `origin` onto `target`.
    pub transform: FlipTransform,
    finished: bool,
}

impl CloneRecord {
    /// Whether this clone has signaled completion.
    pub fn is_finished(&self) -> bool {
        self.finished
    }
}

/// The clone records of one transition.
///
/// One record per matched pair, created at capture time and destroyed when
/// the transition settles; no clone outlives its owning transition.
/// Completion signals from all clones are awaited through an explicit
/// counter rather than through whichever clone happens to finish last.
#[derive(Clone, Debug, Default)]
pub struct CloneSet {
    records: SmallVec<[CloneRecord; 4]>,
    outstanding: usize,
}

impl CloneSet {
    /// Build records for each `(origin, target)` frame pair, both in
    /// container space, computing the inverse transform per pair.
    pub fn new(frames: impl IntoIterator<Item = (Rect, Rect)>) -> Self {
        let records: SmallVec<[CloneRecord; 4]> = frames
            .into_iter()
            .enumerate()
            .map(|(idx, (origin, target))| {
                #[allow(
                    clippy::cast_possible_truncation,
                    reason = "CloneId uses 32-bit indices by design."
                )]
                let id = CloneId::new(idx as u32);
                CloneRecord {
                    id,
                    origin,
                    target,
                    transform: FlipTransform::invert(origin, target),
                    finished: false,
                }
            })
            .collect();
        let outstanding = records.len();
        Self {
            records,
            outstanding,
        }
    }

    /// Number of clones. Always equal to the matched-pair count it was built
    /// from.
    pub fn len(&self) -> usize {
        self.records.len()
    }

    /// Returns `true` if the set holds no clones.
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// The records, in pair order.
    pub fn records(&self) -> &[CloneRecord] {
        &self.records
    }

    /// Clones that have not signaled completion yet.
    pub fn outstanding(&self) -> usize {
        self.outstanding
    }

    /// Record a completion signal for `id`. Idempotent per clone; unknown
    /// ids are ignored. Returns `true` once every clone in the set has
    /// completed.
    pub fn mark_finished(&mut self, id: CloneId) -> bool {
        if let Some(record) = self.records.get_mut(id.idx()) {
            if record.id == id && !record.finished {
                record.finished = true;
                self.outstanding -= 1;
            }
        }
        self.outstanding == 0
    }

    /// Whether every clone has signaled completion.
    pub fn is_complete(&self) -> bool {
        self.outstanding == 0
    }
}
