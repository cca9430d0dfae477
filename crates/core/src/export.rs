//! Page export composition.
//!
//! Reads the current render-surface pixels (already carrying every
//! redaction, since redaction is destructive) together with the committed
//! annotations of the exported page, and hands both to the external
//! PDF-writing collaborator.

use pdf_redactor_engine::{DocumentWriter, EngineError, TextPlacement};

use crate::annotation::TextAnnotation;
use crate::mapper;
use crate::surface::{RenderSurface, SurfaceSize};

/// Deterministic name for the downloadable artifact.
pub const EXPORT_FILE_NAME: &str = "modified.pdf";

/// A page ready for the writer: pixels plus the text to stamp on them.
#[derive(Debug)]
pub struct PageComposition<'a> {
    pub pixels: &'a RenderSurface,
    pub placements: Vec<TextPlacement>,
}

impl PageComposition<'_> {
    pub fn write(&self, writer: &dyn DocumentWriter) -> Result<Vec<u8>, EngineError> {
        writer.write_document(self.pixels, &self.placements)
    }
}

pub struct ExportComposer;

impl ExportComposer {
    /// Compose one page for export. Annotations without committed text are
    /// excluded; the rest keep creation order and have their positions
    /// mapped from interaction space into the surface's pixel space.
    pub fn compose<'a>(
        surface: &'a RenderSurface,
        interaction: SurfaceSize,
        annotations: &[&TextAnnotation],
    ) -> PageComposition<'a> {
        let (scale_x, scale_y) = mapper::scale_factors(SurfaceSize::of(surface), interaction);

        let placements = annotations
            .iter()
            .filter(|annotation| annotation.has_text())
            .map(|annotation| TextPlacement {
                text: annotation.text().to_owned(),
                x: annotation.x() * scale_x,
                y: annotation.y() * scale_y,
            })
            .collect();

        PageComposition { pixels: surface, placements }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::AnnotationStore;
    use image::Rgba;

    fn surface(width: u32, height: u32) -> RenderSurface {
        RenderSurface::from_pixel(width, height, Rgba([255, 255, 255, 255]))
    }

    #[test]
    fn uncommitted_annotations_are_excluded() {
        let mut store = AnnotationStore::new();
        let kept = store.create(1);
        let empty = store.create(1);
        let whitespace = store.create(1);

        store.commit_text(kept, "visible");
        store.commit_text(whitespace, "   ");
        let _ = empty;

        let surface = surface(100, 100);
        let composition =
            ExportComposer::compose(&surface, SurfaceSize::new(100, 100), &store.for_page(1));

        assert_eq!(composition.placements.len(), 1);
        assert_eq!(composition.placements[0].text, "visible");
    }

    #[test]
    fn placements_are_scaled_into_surface_space() {
        let mut store = AnnotationStore::new();
        let id = store.create(1);
        store.commit_text(id, "note");
        store.reposition(id, 50.0, 30.0);

        let surface = surface(800, 1200);
        let composition =
            ExportComposer::compose(&surface, SurfaceSize::new(400, 600), &store.for_page(1));

        assert_eq!(composition.placements[0].x, 100.0);
        assert_eq!(composition.placements[0].y, 60.0);
    }

    #[test]
    fn placements_keep_creation_order() {
        let mut store = AnnotationStore::new();
        for text in ["first", "second", "third"] {
            let id = store.create(1);
            store.commit_text(id, text);
        }

        let surface = surface(50, 50);
        let composition =
            ExportComposer::compose(&surface, SurfaceSize::new(50, 50), &store.for_page(1));

        let texts: Vec<&str> =
            composition.placements.iter().map(|p| p.text.as_str()).collect();
        assert_eq!(texts, vec!["first", "second", "third"]);
    }

    #[test]
    fn composition_writes_through_the_collaborator() {
        let mut store = AnnotationStore::new();
        let id = store.create(1);
        store.commit_text(id, "stamped");

        let surface = surface(16, 16);
        let composition =
            ExportComposer::compose(&surface, SurfaceSize::new(16, 16), &store.for_page(1));

        let bytes = composition
            .write(&pdf_redactor_engine::LopdfWriter::new())
            .expect("export should produce bytes");
        assert!(bytes.starts_with(b"%PDF-"));
    }
}
