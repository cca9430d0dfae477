//! Per-page editing session.
//!
//! Owns the active tool mode, the current render surface, the interaction
//! surface, and the gesture/annotation machinery, and routes events between
//! them. All pointer input is gated until the page's render completion has
//! been delivered; events arriving earlier are dropped silently.

use pdf_redactor_engine::{DocumentWriter, EngineError};

use crate::annotation::{AnnotationId, AnnotationStore, TextAnnotation};
use crate::export::ExportComposer;
use crate::gesture::GestureTracker;
use crate::mapper::GestureRect;
use crate::redaction::{RedactionEngine, RedactionKind};
use crate::surface::{InteractionSurface, RenderSurface, SurfaceSize};

/// Session-wide tool selection governing how a completed gesture is
/// interpreted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, serde::Serialize, serde::Deserialize)]
pub enum ToolMode {
    #[default]
    None,
    Blur,
    Erase,
    AddText,
}

impl ToolMode {
    /// The redaction this mode draws with, if any. `None` and `AddText` do
    /// not use drag gestures.
    pub fn redaction_kind(self) -> Option<RedactionKind> {
        match self {
            ToolMode::Blur => Some(RedactionKind::Blur),
            ToolMode::Erase => Some(RedactionKind::Erase),
            ToolMode::None | ToolMode::AddText => None,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("page {0} has not finished rendering")]
    RenderNotReady(u32),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

pub struct PageSession {
    page_number: u32,
    num_pages: u32,
    mode: ToolMode,
    interaction: InteractionSurface,
    surface: Option<RenderSurface>,
    tracker: GestureTracker,
    redaction: RedactionEngine,
    annotations: AnnotationStore,
    preview: Option<GestureRect>,
}

impl PageSession {
    pub fn new() -> Self {
        Self {
            page_number: 1,
            num_pages: 0,
            mode: ToolMode::None,
            interaction: InteractionSurface::default(),
            surface: None,
            tracker: GestureTracker::new(),
            redaction: RedactionEngine::new(),
            annotations: AnnotationStore::new(),
            preview: None,
        }
    }

    /// The document finished loading: reset to page one and wait for its
    /// render completion before accepting input.
    pub fn document_loaded(&mut self, num_pages: u32) {
        self.num_pages = num_pages;
        self.page_number = 1;
        self.invalidate_page();
    }

    /// Async render completion for the current page. Installs the new
    /// render surface and resynchronizes the interaction surface to the
    /// displayed size, which must happen before any further gesture is
    /// accepted.
    pub fn page_rendered(
        &mut self,
        surface: RenderSurface,
        display_width: u32,
        display_height: u32,
    ) {
        self.surface = Some(surface);
        self.interaction.resize_to(SurfaceSize::new(display_width, display_height));
    }

    /// The displayed area changed size without a page change (e.g. window
    /// resize). Keeps the two coordinate spaces synchronized.
    pub fn display_resized(&mut self, display_width: u32, display_height: u32) {
        self.interaction.resize_to(SurfaceSize::new(display_width, display_height));
    }

    pub fn render_ready(&self) -> bool {
        self.surface.is_some()
    }

    pub fn set_mode(&mut self, mode: ToolMode) {
        self.mode = mode;
    }

    pub fn mode(&self) -> ToolMode {
        self.mode
    }

    pub fn page_number(&self) -> u32 {
        self.page_number
    }

    pub fn num_pages(&self) -> u32 {
        self.num_pages
    }

    /// Navigate forward, clamped to the last page. Returns whether the page
    /// changed; a change invalidates the surface until the next render
    /// completion arrives.
    pub fn next_page(&mut self) -> bool {
        if self.page_number >= self.num_pages {
            return false;
        }
        self.page_number += 1;
        self.invalidate_page();
        true
    }

    /// Navigate backward, clamped to page one.
    pub fn prev_page(&mut self) -> bool {
        if self.page_number <= 1 {
            return false;
        }
        self.page_number -= 1;
        self.invalidate_page();
        true
    }

    pub fn pointer_down(&mut self, x: f32, y: f32) {
        if !self.render_ready() {
            log::debug!("pointer-down before page {} rendered, ignoring", self.page_number);
            return;
        }
        self.tracker.pointer_down(self.mode, x, y);
    }

    /// Route pointer motion to whichever interaction is live: an annotation
    /// drag follows the pointer, a rectangle drag updates the preview.
    pub fn pointer_move(&mut self, x: f32, y: f32) {
        if !self.render_ready() {
            return;
        }

        if self.annotations.dragging().is_some() {
            self.annotations.drag_to(x, y);
            return;
        }

        self.preview = self.tracker.pointer_move(x, y);
    }

    /// Finish whichever interaction is live. A committed rectangle is
    /// applied to the render surface with the interpretation captured at
    /// gesture start.
    pub fn pointer_up(&mut self, x: f32, y: f32) {
        if !self.render_ready() {
            return;
        }

        self.annotations.end_drag();
        self.preview = None;

        let Some(committed) = self.tracker.pointer_up(x, y) else {
            return;
        };
        let Some(surface) = self.surface.as_mut() else {
            return;
        };

        self.redaction.apply(committed.kind, &committed.rect, surface, self.interaction.size());
    }

    /// The pointer left the tracked surface: cancel the drag without
    /// committing, and drop any annotation drag.
    pub fn pointer_leave(&mut self) {
        self.tracker.pointer_leave();
        self.annotations.end_drag();
        self.preview = None;
    }

    /// Live drag rectangle for rendering selection chrome.
    pub fn preview_rect(&self) -> Option<GestureRect> {
        self.preview
    }

    /// Switch to the add-text tool and create an annotation on the current
    /// page. Returns `None` before a document is loaded.
    pub fn add_text(&mut self) -> Option<AnnotationId> {
        if self.num_pages == 0 {
            log::debug!("add-text before a document is loaded, ignoring");
            return None;
        }

        self.mode = ToolMode::AddText;
        Some(self.annotations.create(self.page_number))
    }

    pub fn begin_annotation_drag(&mut self, id: AnnotationId) {
        self.annotations.begin_drag(id);
    }

    pub fn move_annotation(&mut self, id: AnnotationId, x: f32, y: f32) {
        self.annotations.reposition(id, x, y);
    }

    pub fn commit_annotation_text(&mut self, id: AnnotationId, text: &str) {
        self.annotations.commit_text(id, text);
    }

    pub fn focus_annotation(&mut self, id: AnnotationId) {
        self.annotations.set_focus(id);
    }

    pub fn annotations(&self) -> &AnnotationStore {
        &self.annotations
    }

    pub fn annotations_mut(&mut self) -> &mut AnnotationStore {
        &mut self.annotations
    }

    /// Annotations of the displayed page, in z-order.
    pub fn visible_annotations(&self) -> Vec<&TextAnnotation> {
        self.annotations.for_page(self.page_number)
    }

    pub fn surface(&self) -> Option<&RenderSurface> {
        self.surface.as_ref()
    }

    /// Compose the current page (post-redaction pixels plus committed
    /// annotations) and write it through the export collaborator.
    pub fn export_page(&self, writer: &dyn DocumentWriter) -> Result<Vec<u8>, SessionError> {
        let surface = self
            .surface
            .as_ref()
            .ok_or(SessionError::RenderNotReady(self.page_number))?;

        let composition = ExportComposer::compose(
            surface,
            self.interaction.size(),
            &self.annotations.for_page(self.page_number),
        );

        Ok(composition.write(writer)?)
    }

    fn invalidate_page(&mut self) {
        self.surface = None;
        self.tracker.pointer_leave();
        self.annotations.end_drag();
        self.preview = None;
    }
}

impl Default for PageSession {
    fn default() -> Self {
        Self::new()
    }
}
