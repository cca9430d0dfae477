//! Surface types shared by the editing pipeline.
//!
//! The render surface is the rasterized page bitmap; the interaction surface
//! is the transparent region the user draws gestures on. The two live in
//! different pixel spaces, and every redaction crosses from one to the other.

pub use pdf_redactor_engine::RgbaImage as RenderSurface;

/// Integer pixel dimensions of a surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SurfaceSize {
    pub width: u32,
    pub height: u32,
}

impl SurfaceSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    pub fn of(surface: &RenderSurface) -> Self {
        Self { width: surface.width(), height: surface.height() }
    }

    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// The region the user directly manipulates with pointer gestures.
///
/// Invariant: after every page change or resize its dimensions equal the
/// displayed size of the render surface. A stale size here is the primary
/// source of misaligned redactions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InteractionSurface {
    size: SurfaceSize,
}

impl InteractionSurface {
    pub fn new(width: u32, height: u32) -> Self {
        Self { size: SurfaceSize::new(width, height) }
    }

    pub fn size(&self) -> SurfaceSize {
        self.size
    }

    /// Resynchronize to the displayed size of the render surface. Called
    /// from the page-change event, never lazily.
    pub fn resize_to(&mut self, display: SurfaceSize) {
        self.size = display;
    }

    pub fn contains(&self, x: f32, y: f32) -> bool {
        x >= 0.0 && y >= 0.0 && x <= self.size.width as f32 && y <= self.size.height as f32
    }
}

impl Default for InteractionSurface {
    fn default() -> Self {
        Self::new(0, 0)
    }
}
