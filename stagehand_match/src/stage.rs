// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host-implemented read surface.

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Rect, Vec2};

/// A stable per-element marker correlating an outgoing element with its
/// incoming counterpart. Unique within a single subtree, not globally.
pub type IdentityTag = String;

/// Read access to the host's rendered scene.
///
/// The transition core never owns or mutates a scene graph. Hosts implement
/// this trait over whatever they render (a DOM, a retained scene, a test
/// fixture) and the core samples it while a transition is being captured.
/// All methods are pure reads of current layout state.
///
/// `Node` is a cheap copyable handle (an id, an index, a pointer wrapper)
/// meaningful only to the host.
pub trait Stage {
    /// Handle to one rendered element.
    type Node: Copy + Eq;

    /// All descendants of `root` carrying an identity tag, in subtree
    /// traversal order. Elements without a tag are not reported.
    fn tagged_descendants(&self, root: Self::Node) -> Vec<(Self::Node, IdentityTag)>;

    /// The element's current bounding rectangle, in viewport space.
    fn bounding_rect(&self, node: Self::Node) -> Rect;

    /// The viewport's current scroll offset. Defaults to zero for
    /// non-scrolling hosts.
    fn scroll_offset(&self) -> Vec2 {
        Vec2::ZERO
    }

    /// The element's top-left corner in layout (document) space, the space
    /// scroll-adjusted viewport rectangles land in. The default derives it
    /// from [`Stage::bounding_rect`] and [`Stage::scroll_offset`]; hosts with
    /// a native notion of layout position can answer directly.
    fn origin_of(&self, node: Self::Node) -> Point {
        (self.bounding_rect(node).origin().to_vec2() + self.scroll_offset()).to_point()
    }
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use kurbo::{Point, Rect, Vec2};

    use super::{IdentityTag, Stage};

    struct OneBox {
        scroll: Vec2,
    }

    impl Stage for OneBox {
        type Node = u32;

        fn tagged_descendants(&self, _root: u32) -> Vec<(u32, IdentityTag)> {
            Vec::new()
        }

        fn bounding_rect(&self, _node: u32) -> Rect {
            Rect::new(10.0, 20.0, 110.0, 70.0)
        }

        fn scroll_offset(&self) -> Vec2 {
            self.scroll
        }
    }

    #[test]
    fn default_origin_is_viewport_origin_plus_scroll() {
        let stage = OneBox {
            scroll: Vec2::new(5.0, 7.0),
        };
        assert_eq!(stage.origin_of(0), Point::new(15.0, 27.0));
    }
}
