//! PDF collaborator services for the redaction editor.
//!
//! Two capabilities are exposed behind traits so the editing core never
//! touches PDF internals directly: [`PdfRenderer`] turns a document page into
//! a pixel surface and reports its size, and [`DocumentWriter`] composes a
//! pixel surface plus a set of text placements back into a PDF file.

use std::path::{Path, PathBuf};

pub mod renderer;
pub mod writer;

pub use renderer::{LopdfRenderer, PdfRenderer};
pub use writer::{DocumentWriter, LopdfWriter, TextPlacement};

pub type RgbaImage = image::ImageBuffer<image::Rgba<u8>, Vec<u8>>;

/// Handle to a document opened through a [`PdfRenderer`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct DocumentHandle(pub(crate) u64);

impl DocumentHandle {
    pub fn raw(self) -> u64 {
        self.0
    }
}

/// Page dimensions in points (1/72 inch).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width_pt: f32,
    pub height_pt: f32,
}

#[derive(Debug, Clone)]
pub enum OpenSource {
    Path(PathBuf),
    Bytes(Vec<u8>),
}

impl From<PathBuf> for OpenSource {
    fn from(value: PathBuf) -> Self {
        Self::Path(value)
    }
}

impl From<&Path> for OpenSource {
    fn from(value: &Path) -> Self {
        Self::Path(value.to_path_buf())
    }
}

impl From<Vec<u8>> for OpenSource {
    fn from(value: Vec<u8>) -> Self {
        Self::Bytes(value)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("PDF parse error: {0}")]
    Parse(#[from] lopdf::Error),
    #[error("not a valid PDF file")]
    InvalidFileType,
    #[error("invalid handle {0}")]
    InvalidHandle(u64),
    #[error("page {page} out of range (page_count={page_count})")]
    PageOutOfRange { page: u32, page_count: u32 },
    #[error("encrypted PDFs are not supported in the default backend")]
    EncryptedUnsupported,
    #[error("backend error: {0}")]
    Backend(String),
}
