// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stagehand Flip: the geometry half of the FLIP technique.
//!
//! FLIP (First, Last, Invert, Play) animates an element between two boxes
//! without ever animating layout: paint a stand-in at the *first* box, compute
//! the transform that would carry it to the *last* box, then let the host play
//! that transform as a cheap composited transition.
//!
//! This crate owns the arithmetic and the bookkeeping:
//!
//! - [`FlipTransform::invert`]: the scale/translate pair carrying an initial
//!   rectangle onto a final one.
//! - [`container_frame`]: translates a viewport-space rectangle into the
//!   clone container's coordinate space, accounting for scroll.
//! - [`CloneSet`]: the transient clone records of one transition, with an
//!   explicit outstanding-completion counter ([`CloneSet::mark_finished`]).
//!
//! Clone records never outlive their transition: the set is created when the
//! transition is captured and dropped when it settles.
//!
//! ```rust
//! use kurbo::Rect;
//! use stagehand_flip::FlipTransform;
//!
//! let first = Rect::new(0.0, 0.0, 100.0, 50.0);
//! let last = Rect::new(10.0, 200.0, 60.0, 225.0);
//! let t = FlipTransform::invert(first, last);
//!
//! assert_eq!(t.scale_x, 0.5);
//! assert_eq!(t.scale_y, 0.5);
//! assert_eq!(t.translate_x, 10.0);
//! assert_eq!(t.translate_y, 200.0);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

mod clones;
mod invert;

pub use clones::{CloneId, CloneRecord, CloneSet};
pub use invert::{FlipTransform, container_frame};
