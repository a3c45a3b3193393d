// Copyright 2025 the Stagehand Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Inverse-transform computation and container placement.

use kurbo::{Affine, Point, Rect, Vec2};

/// The scale/translate pair that carries an initial box onto a final box.
///
/// Expressed with the transform origin at the box's top-left corner, which is
/// how clones are positioned: translate first, then scale.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FlipTransform {
    /// Horizontal scale factor (`final width / initial width`).
    pub scale_x: f64,
    /// Vertical scale factor (`final height / initial height`).
    pub scale_y: f64,
    /// Horizontal displacement (`final left − initial left`).
    pub translate_x: f64,
    /// Vertical displacement (`final top − initial top`).
    pub translate_y: f64,
}

impl FlipTransform {
    /// The transform that leaves a box where it is.
    pub const IDENTITY: Self = Self {
        scale_x: 1.0,
        scale_y: 1.0,
        translate_x: 0.0,
        translate_y: 0.0,
    };

    /// Compute the transform that carries `initial` onto `target`.
    ///
    /// A zero initial extent on either axis degrades that axis to scale 1.0
    /// rather than producing a non-finite factor; the translation still
    /// applies.
    pub fn invert(initial: Rect, target: Rect) -> Self {
        let scale_x = if initial.width() == 0.0 {
            1.0
        } else {
            target.width() / initial.width()
        };
        let scale_y = if initial.height() == 0.0 {
            1.0
        } else {
            target.height() / initial.height()
        };
        Self {
            scale_x,
            scale_y,
            translate_x: target.x0 - initial.x0,
            translate_y: target.y0 - initial.y0,
        }
    }

    /// Returns `true` if playing this transform would not move anything.
    pub fn is_identity(&self) -> bool {
        *self == Self::IDENTITY
    }

    /// The equivalent affine map (translate ∘ scale), with the transform
    /// origin at the box's top-left corner.
    pub fn to_affine(&self) -> Affine {
        Affine::translate((self.translate_x, self.translate_y))
            * Affine::scale_non_uniform(self.scale_x, self.scale_y)
    }
}

impl Default for FlipTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// Translate a viewport-space rectangle into the clone container's
/// coordinate space.
///
/// `scroll` is the viewport's current scroll offset and `container_origin`
/// the container's top-left corner in layout (document) space. The result is
/// where a clone must be placed, relative to the container, to appear exactly
/// over the sampled rectangle.
pub fn container_frame(viewport: Rect, scroll: Vec2, container_origin: Point) -> Rect {
    viewport + (scroll - container_origin.to_vec2())
}

#[cfg(test)]
mod tests {
    use kurbo::{Point, Rect, Vec2};

    use super::{FlipTransform, container_frame};

    #[test]
    fn invert_scales_and_translates() {
        let initial = Rect::new(0.0, 0.0, 100.0, 50.0);
        let target = Rect::new(10.0, 200.0, 60.0, 225.0);

        let t = FlipTransform::invert(initial, target);

        assert_eq!(t.scale_x, 0.5);
        assert_eq!(t.scale_y, 0.5);
        assert_eq!(t.translate_x, 10.0);
        assert_eq!(t.translate_y, 200.0);
    }

    #[test]
    fn invert_of_equal_rects_is_identity() {
        let r = Rect::new(3.0, 4.0, 33.0, 44.0);
        let t = FlipTransform::invert(r, r);
        assert!(t.is_identity());
    }

    #[test]
    fn zero_initial_extent_degrades_to_unit_scale() {
        let initial = Rect::new(10.0, 10.0, 10.0, 30.0);
        let target = Rect::new(20.0, 40.0, 60.0, 80.0);

        let t = FlipTransform::invert(initial, target);

        assert_eq!(t.scale_x, 1.0);
        assert_eq!(t.scale_y, 2.0);
        assert_eq!(t.translate_x, 10.0);
        assert_eq!(t.translate_y, 30.0);
    }

    #[test]
    fn affine_maps_the_initial_box_onto_the_target() {
        let initial = Rect::new(0.0, 0.0, 100.0, 50.0);
        let target = Rect::new(10.0, 200.0, 60.0, 225.0);
        let affine = FlipTransform::invert(initial, target).to_affine();

        // Top-left corner of the initial box lands on the target's top-left;
        // width/height vectors land scaled.
        assert_eq!(affine * Point::new(0.0, 0.0), Point::new(10.0, 200.0));
        assert_eq!(affine * Point::new(100.0, 50.0), Point::new(60.0, 225.0));
    }

    #[test]
    fn container_frame_accounts_for_scroll_and_origin() {
        let viewport = Rect::new(10.0, 20.0, 60.0, 50.0);
        let scroll = Vec2::new(0.0, 100.0);
        let origin = Point::new(5.0, 30.0);

        let frame = container_frame(viewport, scroll, origin);
        assert_eq!(frame, Rect::new(5.0, 90.0, 55.0, 120.0));
    }

    #[test]
    fn container_frame_is_the_identity_for_an_unscrolled_origin_container() {
        let viewport = Rect::new(1.0, 2.0, 3.0, 4.0);
        let frame = container_frame(viewport, Vec2::ZERO, Point::ZERO);
        assert_eq!(frame, viewport);
    }
}
