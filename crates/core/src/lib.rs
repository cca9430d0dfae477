//! PDF Redactor Core Library
//!
//! Overlay-editing engine for page redaction: coordinate mapping between the
//! interaction surface and the rendered page bitmap, the drag-rectangle
//! gesture state machine, destructive pixel redaction (blur/erase), the
//! text-annotation store, and the per-page session that wires them together.

pub mod annotation;
pub mod export;
pub mod gesture;
pub mod mapper;
pub mod raster;
pub mod redaction;
pub mod session;
pub mod surface;

pub use annotation::{AnnotationId, AnnotationStore, TextAnnotation};
pub use export::{ExportComposer, PageComposition, EXPORT_FILE_NAME};
pub use gesture::{CommittedGesture, GestureTracker};
pub use mapper::{to_render_space, GestureRect, RenderRect};
pub use redaction::{RedactionEngine, RedactionKind};
pub use session::{PageSession, SessionError, ToolMode};
pub use surface::{InteractionSurface, RenderSurface, SurfaceSize};
