// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The instruction protocol between the state machine and its host.

use kurbo::Rect;
use stagehand_flip::{CloneId, FlipTransform};

/// Identifier for one transition session, monotonically increasing per
/// group. Echoed in [`Effect::ScheduleStallTimeout`] so a timeout that fires
/// after its session already settled can be told apart from a live one.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct SessionId(u64);

impl SessionId {
    pub(crate) const fn new(n: u64) -> Self {
        Self(n)
    }
}

/// An instruction for the host, emitted by the intake methods of
/// [`TransitionGroup`](crate::TransitionGroup).
///
/// Hosts apply the effects of one intake call, in order, before delivering
/// the next event. The core relies on this: for example, every clone has been
/// spawned before the frame wait that precedes the transform is answered.
#[derive(Clone, Debug, PartialEq)]
pub enum Effect<N> {
    /// Clone `source`'s visual appearance into a transient element appended
    /// to `parent`: absolutely positioned and sized exactly to `frame`
    /// (container space), transform origin at its top-left, with a
    /// `duration_ms` transform transition enabled. Report the end of that
    /// transition via `clone_finished(clone)`.
    SpawnClone {
        /// Id to echo back on completion.
        clone: CloneId,
        /// The outgoing element whose appearance is cloned.
        source: N,
        /// The shared clone container.
        parent: N,
        /// Placement within the container.
        frame: Rect,
        /// Transform transition duration, in milliseconds.
        duration_ms: u64,
    },
    /// Ask for one "next frame" callback once the current layout/paint pass
    /// has committed; answer it with `frame()`.
    RequestFrame,
    /// Set the clone's transform, letting its enabled transition play.
    ApplyTransform {
        /// The clone to transform.
        clone: CloneId,
        /// The inverse transform carrying it to its target box.
        transform: FlipTransform,
    },
    /// Remove the clone from the container.
    RemoveClone {
        /// The clone to remove.
        clone: CloneId,
    },
    /// Arrange for `stall_timeout(session)` to be delivered after `delay_ms`
    /// milliseconds, as a fallback for completion signals that never arrive.
    ScheduleStallTimeout {
        /// The session the timeout belongs to; stale ids are ignored.
        session: SessionId,
        /// Delay before delivery, in milliseconds.
        delay_ms: u64,
    },
    /// Children or visibility flags changed; the host should re-render from
    /// `children()` and the visibility accessors.
    Invalidate,
}
