// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The transition group: child ownership, phase sequencing, effects.

use alloc::vec::Vec;
use core::hash::Hash;
use core::mem;

use stagehand_flip::{CloneId, CloneSet, container_frame};
use stagehand_match::{MatchSet, Stage, match_shared, sample};
use stagehand_reconcile::{ChildEntry, ChildSet, Role, reconcile};

use crate::config::TransitionConfig;
use crate::effect::{Effect, SessionId};

bitflags::bitflags! {
    /// Mount and visibility bookkeeping for the two transition roots.
    #[derive(Clone, Copy, Debug, PartialEq, Eq)]
    struct GroupFlags: u8 {
        /// The outgoing root has reported mounted.
        const OUTGOING_MOUNTED = 1 << 0;
        /// The incoming root has reported mounted.
        const INCOMING_MOUNTED = 1 << 1;
        /// The outgoing view is currently shown.
        const OUTGOING_SHOWN = 1 << 2;
        /// The incoming view is currently shown.
        const INCOMING_SHOWN = 1 << 3;
    }
}

impl Default for GroupFlags {
    fn default() -> Self {
        Self::OUTGOING_SHOWN
    }
}

/// Where the state machine is in its cycle.
///
/// The cycle is `Idle → Pending → Capturing → Animating → Settling → Idle`.
/// `Capturing` and `Settling` are pass-through: the machine moves through
/// them synchronously inside one intake call, so the observable resting
/// phases are `Idle`, `Pending`, and `Animating`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Phase {
    /// No transition is pending; the static view is displayed.
    Idle,
    /// The key set changed; outgoing and incoming entries coexist in the
    /// child collection but may not be mounted yet.
    Pending,
    /// Matching, sampling, and clone creation are running.
    Capturing,
    /// Clones are live; the machine is waiting out the two-frame layout
    /// flush and then the clone completions.
    Animating,
    /// Cleanup: outgoing entries leave, roles and caches reset.
    Settling,
}

/// The state bundle for one in-flight transition. Created when the
/// transition is captured, dropped when it settles; dropping it is what
/// bounds the matched-pair cache and the clone records.
#[derive(Clone, Debug)]
struct Session<N> {
    id: SessionId,
    pairs: MatchSet<N>,
    clones: CloneSet,
    frames_waited: u8,
    played: bool,
}

/// A shared-element transition orchestrator over a keyed child collection.
///
/// `K` keys children, `C` is their opaque renderable content, and `N` is the
/// host's element handle (the [`Stage::Node`] type). The group owns the
/// children and their roles; the host renders from [`TransitionGroup::children`]
/// and the visibility accessors, delivers events through the intake methods,
/// and applies the [`Effect`]s each intake returns. See the crate docs for
/// the full walkthrough.
pub struct TransitionGroup<K, C, N> {
    config: TransitionConfig,
    children: ChildSet<K, C>,
    phase: Phase,
    pending: bool,
    flags: GroupFlags,
    container: Option<N>,
    outgoing_root: Option<N>,
    incoming_root: Option<N>,
    session: Option<Session<N>>,
    /// Latest child set requested while a transition was in flight.
    queued: Option<Vec<(K, C)>>,
    sessions_started: u64,
}

impl<K, C, N> core::fmt::Debug for TransitionGroup<K, C, N> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TransitionGroup")
            .field("phase", &self.phase)
            .field("pending", &self.pending)
            .field("children", &self.children.len())
            .field("clones", &self.clone_count())
            .finish_non_exhaustive()
    }
}

impl<K, C, N> TransitionGroup<K, C, N> {
    /// The current phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Returns `true` when no transition is pending or in flight.
    pub fn is_idle(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// The group's timing configuration.
    pub fn config(&self) -> &TransitionConfig {
        &self.config
    }

    /// The children to render, in order, with their roles.
    pub fn children(&self) -> impl Iterator<Item = &ChildEntry<K, C>> {
        self.children.iter()
    }

    /// Whether the outgoing view should currently be shown. Meaningful for
    /// entries with [`Role::Outgoing`]; lowered when the transform plays so
    /// the clones finish the illusion.
    pub fn outgoing_visible(&self) -> bool {
        self.flags.contains(GroupFlags::OUTGOING_SHOWN)
    }

    /// Whether the incoming view should currently be shown. Meaningful for
    /// entries with [`Role::Incoming`]; raised when the transform plays.
    pub fn incoming_visible(&self) -> bool {
        self.flags.contains(GroupFlags::INCOMING_SHOWN)
    }

    /// Live clone records. Zero outside `Animating`.
    pub fn clone_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.clones.len())
    }

    /// Cached matched pairs. Zero outside an active session.
    pub fn matched_pair_count(&self) -> usize {
        self.session.as_ref().map_or(0, |s| s.pairs.len())
    }

    /// Register the shared container clones are appended to and whose
    /// coordinate space placement is computed in.
    pub fn set_container(&mut self, node: N) {
        self.container = Some(node);
    }

    /// Report the outgoing view's root element. Children forward their root
    /// handle here when they mount with [`Role::Outgoing`].
    pub fn outgoing_mounted(&mut self, node: N) {
        self.outgoing_root = Some(node);
        self.flags |= GroupFlags::OUTGOING_MOUNTED;
    }

    /// Report the incoming view's root element. Children forward their root
    /// handle here when they mount with [`Role::Incoming`].
    pub fn incoming_mounted(&mut self, node: N) {
        self.incoming_root = Some(node);
        self.flags |= GroupFlags::INCOMING_MOUNTED;
    }
}

impl<K, C, N> TransitionGroup<K, C, N>
where
    K: Eq + Hash + Clone,
    N: Copy + Eq,
{
    /// Create a group over an initial child collection. Initial children are
    /// [`Role::Static`]; no transition is pending.
    pub fn new(initial: impl IntoIterator<Item = (K, C)>) -> Self {
        Self::with_config(initial, TransitionConfig::default())
    }

    /// Create a group with explicit timing configuration.
    pub fn with_config(
        initial: impl IntoIterator<Item = (K, C)>,
        config: TransitionConfig,
    ) -> Self {
        Self {
            config,
            children: initial.into_iter().collect(),
            phase: Phase::Idle,
            pending: false,
            flags: GroupFlags::default(),
            container: None,
            outgoing_root: None,
            incoming_root: None,
            session: None,
            queued: None,
            sessions_started: 0,
        }
    }

    /// The role of the child with `key`, if present.
    pub fn role_of(&self, key: &K) -> Option<Role> {
        self.children.role_of(key)
    }

    /// Replace the child collection.
    ///
    /// In `Idle`, the new set is reconciled against the current one: changed
    /// keys raise a pending transition and the group moves to `Pending`.
    /// While a transition is in flight the request is *coalesced*: only the
    /// latest one is remembered, and it is replayed as a fresh reconciliation
    /// the moment the machine settles back to `Idle`.
    pub fn update(&mut self, next: impl IntoIterator<Item = (K, C)>) -> Vec<Effect<N>> {
        let next: Vec<(K, C)> = next.into_iter().collect();
        if self.phase != Phase::Idle {
            self.queued = Some(next);
            return Vec::new();
        }
        self.begin(next)
    }

    fn begin(&mut self, next: Vec<(K, C)>) -> Vec<Effect<N>> {
        let previous = mem::take(&mut self.children);
        let rec = reconcile(previous, next);
        self.children = rec.children;
        if rec.keys_changed {
            self.pending = true;
            self.phase = Phase::Pending;
            self.flags = GroupFlags::default();
            self.outgoing_root = None;
            self.incoming_root = None;
        }
        alloc::vec![Effect::Invalidate]
    }

    /// Attempt to capture the pending transition. Hosts call this after each
    /// render pass, once mount reports for that pass have been delivered.
    ///
    /// No-op unless a transition is pending. If both roots have reported and
    /// share at least one identity tag, the matched elements are sampled,
    /// clones are created at the outgoing boxes, and the group enters
    /// `Animating` (waiting on two [`Effect::RequestFrame`] answers). If a
    /// root never reported, no container is registered, or no tags are
    /// shared, the transition degrades to the plain cross-fade and settles
    /// immediately.
    pub fn capture<S: Stage<Node = N>>(&mut self, stage: &S) -> Vec<Effect<N>> {
        if self.phase != Phase::Pending || !self.pending {
            return Vec::new();
        }
        self.pending = false;
        self.phase = Phase::Capturing;

        let mounted = self
            .flags
            .contains(GroupFlags::OUTGOING_MOUNTED | GroupFlags::INCOMING_MOUNTED);
        let roots = match (mounted, self.outgoing_root, self.incoming_root, self.container) {
            (true, Some(outgoing), Some(incoming), Some(container)) => {
                Some((outgoing, incoming, container))
            }
            _ => None,
        };
        let Some((outgoing_root, incoming_root, container)) = roots else {
            return self.settle();
        };

        let pairs = match_shared(stage, outgoing_root, incoming_root);
        if pairs.is_empty() {
            return self.settle();
        }

        // Both sides are sampled now: the outgoing elements are still shown
        // and the incoming ones are mounted but untransformed.
        let initial = sample(stage, pairs.outgoing_nodes());
        let target = sample(stage, pairs.incoming_nodes());
        let scroll = stage.scroll_offset();
        let origin = stage.origin_of(container);
        let clones = CloneSet::new(initial.iter().zip(target.iter()).map(|(first, last)| {
            (
                container_frame(*first, scroll, origin),
                container_frame(*last, scroll, origin),
            )
        }));

        let id = SessionId::new(self.sessions_started);
        self.sessions_started += 1;

        let mut effects = Vec::with_capacity(clones.len() + 2);
        for (record, pair) in clones.records().iter().zip(pairs.pairs()) {
            effects.push(Effect::SpawnClone {
                clone: record.id,
                source: pair.outgoing,
                parent: container,
                frame: record.origin,
                duration_ms: self.config.duration_ms,
            });
        }
        if let Some(delay_ms) = self.config.stall_timeout_ms {
            effects.push(Effect::ScheduleStallTimeout {
                session: id,
                delay_ms,
            });
        }
        effects.push(Effect::RequestFrame);

        self.session = Some(Session {
            id,
            pairs,
            clones,
            frames_waited: 0,
            played: false,
        });
        self.phase = Phase::Animating;
        effects
    }

    /// Answer one [`Effect::RequestFrame`]. The first answer requests a
    /// second frame; the second applies the inverse transform to every clone
    /// simultaneously and swaps the visibility flags. Waiting out two
    /// committed frames guarantees every clone starts its transition from
    /// its painted initial box; transforming in the spawn frame would skip
    /// the transition entirely.
    pub fn frame(&mut self) -> Vec<Effect<N>> {
        if self.phase != Phase::Animating {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if session.played {
            return Vec::new();
        }
        session.frames_waited += 1;
        if session.frames_waited < 2 {
            return alloc::vec![Effect::RequestFrame];
        }
        session.played = true;
        let mut effects: Vec<Effect<N>> = session
            .clones
            .records()
            .iter()
            .map(|record| Effect::ApplyTransform {
                clone: record.id,
                transform: record.transform,
            })
            .collect();
        self.flags.remove(GroupFlags::OUTGOING_SHOWN);
        self.flags.insert(GroupFlags::INCOMING_SHOWN);
        effects.push(Effect::Invalidate);
        effects
    }

    /// Report that a clone's transform transition ended. Once every clone of
    /// the active session has reported, the transition settles.
    pub fn clone_finished(&mut self, clone: CloneId) -> Vec<Effect<N>> {
        if self.phase != Phase::Animating {
            return Vec::new();
        }
        let Some(session) = self.session.as_mut() else {
            return Vec::new();
        };
        if session.clones.mark_finished(clone) {
            self.settle()
        } else {
            Vec::new()
        }
    }

    /// Deliver a stall timeout scheduled by
    /// [`Effect::ScheduleStallTimeout`]. Forces the session to settle if it
    /// is still animating; timeouts for settled sessions are ignored.
    pub fn stall_timeout(&mut self, session: SessionId) -> Vec<Effect<N>> {
        if self.phase != Phase::Animating {
            return Vec::new();
        }
        let is_active = matches!(self.session.as_ref(), Some(active) if active.id == session);
        if is_active { self.settle() } else { Vec::new() }
    }

    /// A child's request to leave the live set, typically sent by an
    /// outgoing child once its own local exit animation has finished.
    pub fn exit(&mut self, key: &K) -> Vec<Effect<N>> {
        if self.children.remove(key).is_some() {
            alloc::vec![Effect::Invalidate]
        } else {
            Vec::new()
        }
    }

    fn settle(&mut self) -> Vec<Effect<N>> {
        self.phase = Phase::Settling;
        let mut effects = Vec::new();
        if let Some(session) = self.session.take() {
            for record in session.clones.records() {
                effects.push(Effect::RemoveClone { clone: record.id });
            }
            // Dropping the session here releases the matched-pair cache and
            // the clone records.
        }
        self.children.retain(|entry| !entry.role.is_outgoing());
        for entry in self.children.iter_mut() {
            entry.role = Role::Static;
        }
        self.outgoing_root = None;
        self.incoming_root = None;
        self.flags = GroupFlags::default();
        self.phase = Phase::Idle;
        effects.push(Effect::Invalidate);
        if let Some(next) = self.queued.take() {
            effects.extend(self.begin(next));
        }
        effects
    }
}
