// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagehand Reconcile: keyed child set diffing for view transitions.
//!
//! A view swap replaces one keyed collection of children with another. Before
//! the swap can be animated, every child needs a role: is it on its way out,
//! on its way in, or unaffected? This crate provides the ordered keyed
//! collection ([`ChildSet`]) and the diff ([`reconcile`]) that assigns those
//! roles.
//!
//! ## Roles
//!
//! [`reconcile`] builds the union of the previous and next key sets,
//! preserving first-seen order (previous order first, then new keys in next
//! order), and tags each entry:
//!
//! - present only in the previous set → [`Role::Outgoing`], content carried
//!   from the previous set;
//! - present only in the next set → [`Role::Incoming`], content from the next
//!   set;
//! - present in both → [`Role::Static`], content refreshed from the next set.
//!   Unchanged keys take no part in the transition.
//!
//! The returned [`Reconciliation::keys_changed`] flag reports whether the two
//! key *sets* differ (order insensitive); orchestration layers use it to
//! decide whether a transition is pending at all. Reconciling a set against
//! itself is idempotent: no role changes, no pending transition.
//!
//! ## Minimal example
//!
//! ```rust
//! use stagehand_reconcile::{ChildSet, Role, reconcile};
//!
//! let previous: ChildSet<&str, u32> = [("a", 1)].into_iter().collect();
//! let rec = reconcile(previous, [("b", 2)]);
//!
//! assert!(rec.keys_changed);
//! assert_eq!(rec.children.role_of(&"a"), Some(Role::Outgoing));
//! assert_eq!(rec.children.role_of(&"b"), Some(Role::Incoming));
//! ```
//!
//! This crate deliberately does **not** know about elements, geometry, or any
//! particular UI framework. Host frameworks render from the returned
//! [`ChildSet`] and style each child from its role.
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod diff;
mod set;

pub use diff::{Reconciliation, reconcile};
pub use set::{ChildEntry, ChildSet, Role};
