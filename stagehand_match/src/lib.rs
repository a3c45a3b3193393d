// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagehand Match: identity-tag element matching and geometry sampling.
//!
//! A shared-element transition needs to know which elements of the outgoing
//! view correspond to which elements of the incoming view, and where each of
//! them sits on screen. This crate does both, without knowing anything about
//! the host's scene graph:
//!
//! - [`Stage`]: the read surface a host implements, giving tagged descendants of a
//!   subtree in traversal order, bounding rectangles, scroll offset, element
//!   origins.
//! - [`match_shared`]: intersects the identity tags of two mounted subtrees
//!   and returns the matched pairs ([`MatchSet`]).
//! - [`sample`]: reads the current bounding rectangles for one side of the
//!   pair list.
//!
//! ## Matching
//!
//! An *identity tag* is a stable string attached to elements that should keep
//! visual continuity across a view swap. Tags are only required to be unique
//! within a single subtree; an outgoing element and an incoming element
//! sharing a tag are the same conceptual element. [`match_shared`] pairs
//! elements *by tag*, so the `i`-th outgoing node and the `i`-th incoming
//! node of a [`MatchSet`] always correspond, even when the two subtrees order
//! their shared tags differently.
//!
//! The pair list follows the outgoing subtree's traversal order;
//! [`MatchSet::incoming_in_tree_order`] recovers the incoming subtree's own
//! order when a caller needs it. Cardinality is symmetric by construction.
//!
//! Callers cache the [`MatchSet`] for the lifetime of one transition and drop
//! it when the transition settles; matching is only meaningful while both
//! roots are mounted.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod matcher;
mod sample;
mod stage;

pub use matcher::{MatchSet, MatchedPair, match_shared};
pub use sample::sample;
pub use stage::{IdentityTag, Stage};
