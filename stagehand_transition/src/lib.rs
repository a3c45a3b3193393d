// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagehand Transition: the shared-element transition state machine.
//!
//! [`TransitionGroup`] owns a keyed child collection and walks one view swap
//! at a time through the cycle `Idle → Pending → Capturing → Animating →
//! Settling → Idle`. It is deterministic and sans-IO: the host delivers
//! events through intake methods and applies the [`Effect`]s each call
//! returns. The core never blocks and never touches the host's scene.
//!
//! ## The protocol
//!
//! 1. [`TransitionGroup::update`] replaces the child collection. A changed
//!    key set assigns roles (outgoing / incoming) and raises a pending
//!    transition.
//! 2. The host renders both views from [`TransitionGroup::children`], styles
//!    them from the role flags and the visibility accessors, and reports the
//!    two mounted roots ([`TransitionGroup::outgoing_mounted`] /
//!    [`TransitionGroup::incoming_mounted`]).
//! 3. [`TransitionGroup::capture`] intersects the identity tags of the two
//!    subtrees through the host's [`Stage`], samples before/after geometry,
//!    and emits one `SpawnClone` effect per shared element, placed at its
//!    outgoing box inside the clone container.
//! 4. Two `RequestFrame` / [`TransitionGroup::frame`] round trips later
//!    (enough for the host to have committed the clones' first paint), the
//!    inverse transforms play and the real views cross-fade.
//! 5. When every clone has reported [`TransitionGroup::clone_finished`] (or
//!    the stall timeout fires), the transition settles: clones are removed,
//!    outgoing children leave the collection, incoming children become
//!    static.
//!
//! Every fault (an unreported root, no shared tags, a missing container)
//! degrades to the same cross-fade-only swap; nothing is surfaced as an
//! error.
//!
//! ## Walkthrough
//!
//! ```rust
//! use kurbo::Rect;
//! use stagehand_transition::{Effect, Phase, Stage, TransitionGroup};
//! use stagehand_transition::IdentityTag;
//!
//! // A toy stage: node 1 is the outgoing root, node 2 the incoming root,
//! // node 0 the clone container. Nodes 10 and 20 share the tag "hero".
//! struct Demo;
//!
//! impl Stage for Demo {
//!     type Node = u32;
//!
//!     fn tagged_descendants(&self, root: u32) -> Vec<(u32, IdentityTag)> {
//!         match root {
//!             1 => vec![(10, "hero".into())],
//!             2 => vec![(20, "hero".into())],
//!             _ => Vec::new(),
//!         }
//!     }
//!
//!     fn bounding_rect(&self, node: u32) -> Rect {
//!         match node {
//!             10 => Rect::new(0.0, 0.0, 100.0, 50.0),
//!             20 => Rect::new(10.0, 200.0, 60.0, 225.0),
//!             _ => Rect::ZERO,
//!         }
//!     }
//! }
//!
//! let mut group: TransitionGroup<&str, (), u32> = TransitionGroup::new([("a", ())]);
//! group.set_container(0);
//!
//! // Swap child "a" for child "b".
//! group.update([("b", ())]);
//! assert_eq!(group.phase(), Phase::Pending);
//!
//! // The host renders both views and reports the mounted roots.
//! group.outgoing_mounted(1);
//! group.incoming_mounted(2);
//!
//! // After the render pass, capture: one clone is spawned at the old box.
//! let effects = group.capture(&Demo);
//! let clone = match &effects[0] {
//!     Effect::SpawnClone { clone, .. } => *clone,
//!     _ => unreachable!(),
//! };
//!
//! // Two frame waits, then the transform plays and the views cross-fade.
//! group.frame();
//! let play = group.frame();
//! assert!(play.iter().any(|e| matches!(e, Effect::ApplyTransform { .. })));
//! assert!(group.incoming_visible() && !group.outgoing_visible());
//!
//! // The clone reports completion; the transition settles.
//! group.clone_finished(clone);
//! assert_eq!(group.phase(), Phase::Idle);
//! assert_eq!(group.children().count(), 1);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod config;
mod effect;
mod group;

pub use config::TransitionConfig;
pub use effect::{Effect, SessionId};
pub use group::{Phase, TransitionGroup};

// The types that cross the group's public surface, re-exported so hosts can
// depend on this crate alone.
pub use stagehand_flip::{CloneId, FlipTransform};
pub use stagehand_match::{IdentityTag, Stage};
pub use stagehand_reconcile::{ChildEntry, Role};
