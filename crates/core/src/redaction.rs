//! Destructive redaction of the rendered page.
//!
//! Both operations mutate the render surface in place; there is no overlay
//! layer to peel back, which is what makes the export faithful to what the
//! user sees.

use image::Rgba;

use crate::mapper::{self, GestureRect};
use crate::raster;
use crate::surface::{RenderSurface, SurfaceSize};

/// Fixed box-blur radius, matching a 3px soften.
const BLUR_RADIUS: u32 = 3;

/// Opaque fill matching the page background.
const ERASE_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedactionKind {
    Blur,
    Erase,
}

#[derive(Debug, Default)]
pub struct RedactionEngine;

impl RedactionEngine {
    pub fn new() -> Self {
        Self
    }

    /// Apply a committed gesture to the render surface. Scale factors are
    /// derived from the current surface dimensions on every call.
    pub fn apply(
        &self,
        kind: RedactionKind,
        rect: &GestureRect,
        surface: &mut RenderSurface,
        interaction: SurfaceSize,
    ) {
        match kind {
            RedactionKind::Blur => self.blur(rect, surface, interaction),
            RedactionKind::Erase => self.erase(rect, surface, interaction),
        }
    }

    /// Soften the mapped region with an in-place box blur.
    pub fn blur(&self, rect: &GestureRect, surface: &mut RenderSurface, interaction: SurfaceSize) {
        if rect.is_degenerate() {
            return;
        }

        let mapped = mapper::to_render_space(rect, SurfaceSize::of(surface), interaction);
        raster::box_blur_rect(surface, &mapped, BLUR_RADIUS);
    }

    /// Overwrite the mapped region with an opaque fill.
    pub fn erase(&self, rect: &GestureRect, surface: &mut RenderSurface, interaction: SurfaceSize) {
        if rect.is_degenerate() {
            return;
        }

        let mapped = mapper::to_render_space(rect, SurfaceSize::of(surface), interaction);
        raster::fill_rect(surface, &mapped, ERASE_FILL);
    }
}
