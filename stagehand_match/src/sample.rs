// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Bounding-box sampling for matched elements.

use alloc::vec::Vec;
use kurbo::Rect;

use crate::stage::Stage;

/// Read the current viewport-space bounding rectangles for `nodes`.
///
/// A pure read of layout geometry, index-aligned with the input order. A
/// transition samples twice: once over the outgoing side of the pair list
/// (before the outgoing view is hidden) and once over the incoming side
/// (after it has mounted, before any transform is applied).
pub fn sample<S: Stage>(stage: &S, nodes: impl IntoIterator<Item = S::Node>) -> Vec<Rect> {
    nodes.into_iter().map(|node| stage.bounding_rect(node)).collect()
}

#[cfg(test)]
mod tests {
    use alloc::vec::Vec;
    use hashbrown::HashMap;
    use kurbo::Rect;

    use super::sample;
    use crate::stage::{IdentityTag, Stage};

    struct RectStage {
        rects: HashMap<u32, Rect>,
    }

    impl Stage for RectStage {
        type Node = u32;

        fn tagged_descendants(&self, _root: u32) -> Vec<(u32, IdentityTag)> {
            Vec::new()
        }

        fn bounding_rect(&self, node: u32) -> Rect {
            self.rects.get(&node).copied().unwrap_or(Rect::ZERO)
        }
    }

    #[test]
    fn samples_in_input_order() {
        let mut rects = HashMap::new();
        rects.insert(1, Rect::new(0.0, 0.0, 10.0, 10.0));
        rects.insert(2, Rect::new(5.0, 5.0, 25.0, 15.0));
        let stage = RectStage { rects };

        let sampled = sample(&stage, [2, 1]);
        assert_eq!(
            sampled,
            [
                Rect::new(5.0, 5.0, 25.0, 15.0),
                Rect::new(0.0, 0.0, 10.0, 10.0),
            ]
        );
    }

    #[test]
    fn empty_input_samples_nothing() {
        let stage = RectStage {
            rects: HashMap::new(),
        };
        assert!(sample(&stage, []).is_empty());
    }
}
