//! Coordinate mapping between the interaction surface and the render surface.
//!
//! The two surfaces have independent scale factors per axis. Factors are
//! derived from current dimensions on every call rather than cached, since
//! either surface may have changed since last use.

use crate::surface::SurfaceSize;

/// A drag rectangle in interaction-surface coordinates.
///
/// Width and height may be negative while a drag is in progress; the
/// rectangle is direction-agnostic until normalized.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

impl GestureRect {
    pub fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self { x, y, width, height }
    }

    /// Rectangle spanning a drag's start corner and current pointer position.
    pub fn from_corners(start: (f32, f32), end: (f32, f32)) -> Self {
        Self { x: start.0, y: start.1, width: end.0 - start.0, height: end.1 - start.1 }
    }

    /// Min-corner, absolute-extent form of the same rectangle.
    pub fn normalized(&self) -> Self {
        Self {
            x: self.x.min(self.x + self.width),
            y: self.y.min(self.y + self.height),
            width: self.width.abs(),
            height: self.height.abs(),
        }
    }

    pub fn is_degenerate(&self) -> bool {
        self.width == 0.0 || self.height == 0.0
    }
}

/// An axis-aligned rectangle in render-surface coordinates. Width and height
/// are always non-negative; coordinates are not clamped to surface bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Per-axis scale factors from interaction space into render space.
///
/// A zero-sized interaction surface maps 1:1; the session never accepts
/// gestures before the surfaces are synchronized, so this only guards
/// against degenerate callers.
pub fn scale_factors(render: SurfaceSize, interaction: SurfaceSize) -> (f32, f32) {
    let scale_x = if interaction.width == 0 {
        1.0
    } else {
        render.width as f32 / interaction.width as f32
    };
    let scale_y = if interaction.height == 0 {
        1.0
    } else {
        render.height as f32 / interaction.height as f32
    };

    (scale_x, scale_y)
}

/// Map a gesture rectangle onto the render surface.
///
/// The output has non-negative extents. No clamping happens here: a gesture
/// released outside the interaction surface maps through the same linear
/// formula and may exceed the render surface; pixel writers clip.
pub fn to_render_space(
    rect: &GestureRect,
    render: SurfaceSize,
    interaction: SurfaceSize,
) -> RenderRect {
    let (scale_x, scale_y) = scale_factors(render, interaction);

    RenderRect {
        x: rect.x.min(rect.x + rect.width) * scale_x,
        y: rect.y.min(rect.y + rect.height) * scale_y,
        width: rect.width.abs() * scale_x,
        height: rect.height.abs() * scale_y,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn negative_extents_map_to_min_corner_form() {
        let render = SurfaceSize::new(800, 1200);
        let interaction = SurfaceSize::new(400, 600);

        let rect = GestureRect::new(50.0, 50.0, 100.0, -50.0);
        let mapped = to_render_space(&rect, render, interaction);

        assert_eq!(mapped, RenderRect { x: 100.0, y: 0.0, width: 200.0, height: 100.0 });
    }

    #[test]
    fn extents_are_never_negative() {
        let render = SurfaceSize::new(300, 300);
        let interaction = SurfaceSize::new(100, 100);

        for (w, h) in [(-40.0, -40.0), (40.0, -40.0), (-40.0, 40.0), (40.0, 40.0)] {
            let mapped =
                to_render_space(&GestureRect::new(50.0, 50.0, w, h), render, interaction);
            assert_eq!(mapped.width, 120.0);
            assert_eq!(mapped.height, 120.0);
            assert!(mapped.width >= 0.0 && mapped.height >= 0.0);
        }
    }

    #[test]
    fn out_of_bounds_gestures_map_without_clamping() {
        let render = SurfaceSize::new(200, 200);
        let interaction = SurfaceSize::new(100, 100);

        let rect = GestureRect::new(90.0, 90.0, 30.0, 30.0);
        let mapped = to_render_space(&rect, render, interaction);

        assert_eq!(mapped.x, 180.0);
        assert_eq!(mapped.width, 60.0);
        assert!(mapped.x + mapped.width > render.width as f32);
    }

    #[test]
    fn identical_surfaces_map_one_to_one() {
        let size = SurfaceSize::new(640, 480);
        let rect = GestureRect::new(10.0, 20.0, 30.0, 40.0);

        let mapped = to_render_space(&rect, size, size);
        assert_eq!(mapped, RenderRect { x: 10.0, y: 20.0, width: 30.0, height: 40.0 });
    }

    #[test]
    fn normalized_preserves_area_and_flips_corner() {
        let rect = GestureRect::new(100.0, 100.0, -60.0, -20.0);
        let normalized = rect.normalized();

        assert_eq!(normalized, GestureRect::new(40.0, 80.0, 60.0, 20.0));
    }
}
