//! Page rendering collaborator.
//!
//! The default backend parses page geometry with `lopdf` and rasterizes a
//! blank page surface at the requested scale. Content rasterization is a
//! backend concern; the editing core only relies on "render page N to a
//! pixel surface, report its size".

use std::collections::HashMap;
use std::fs;

use image::Rgba;

use crate::{DocumentHandle, EngineError, OpenSource, PageSize, RgbaImage};

/// US Letter, used when a page carries no usable MediaBox.
const FALLBACK_PAGE_SIZE: PageSize = PageSize { width_pt: 612.0, height_pt: 792.0 };

const PAGE_FILL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const PAGE_BORDER: Rgba<u8> = Rgba([220, 220, 220, 255]);

pub trait PdfRenderer {
    /// Open a document, validating that the input is a PDF.
    fn open(&mut self, source: OpenSource) -> Result<DocumentHandle, EngineError>;
    fn page_count(&self, handle: DocumentHandle) -> Result<u32, EngineError>;
    fn page_size(
        &self,
        handle: DocumentHandle,
        page_index: u32,
    ) -> Result<PageSize, EngineError>;
    /// Rasterize one page at `scale` pixels per point.
    fn render_page(
        &self,
        handle: DocumentHandle,
        page_index: u32,
        scale: f32,
    ) -> Result<RgbaImage, EngineError>;
    fn close(&mut self, handle: DocumentHandle) -> Result<(), EngineError>;
}

#[derive(Debug, Clone)]
struct DocumentRecord {
    page_sizes: Vec<PageSize>,
}

#[derive(Debug, Default)]
pub struct LopdfRenderer {
    next_handle: u64,
    docs: HashMap<DocumentHandle, DocumentRecord>,
}

impl LopdfRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    fn parse_sizes(bytes: &[u8]) -> Result<Vec<PageSize>, EngineError> {
        if !bytes.starts_with(b"%PDF-") {
            return Err(EngineError::InvalidFileType);
        }

        if bytes.windows("/Encrypt".len()).any(|window| window == b"/Encrypt") {
            return Err(EngineError::EncryptedUnsupported);
        }

        let doc = lopdf::Document::load_mem(bytes)?;
        let pages = doc.get_pages();
        let mut sizes = Vec::with_capacity(pages.len());

        for (_, object_id) in pages {
            let dict = doc.get_dictionary(object_id)?;
            let size = dict
                .get(b"MediaBox")
                .ok()
                .and_then(|obj| obj.as_array().ok())
                .and_then(|array| {
                    if array.len() != 4 {
                        return None;
                    }
                    let x0 = array[0].as_float().ok()?;
                    let y0 = array[1].as_float().ok()?;
                    let x1 = array[2].as_float().ok()?;
                    let y1 = array[3].as_float().ok()?;
                    Some(PageSize { width_pt: (x1 - x0).abs(), height_pt: (y1 - y0).abs() })
                })
                .unwrap_or(FALLBACK_PAGE_SIZE);

            sizes.push(size);
        }

        if sizes.is_empty() {
            return Err(EngineError::Backend("document has no pages".to_owned()));
        }

        Ok(sizes)
    }

    fn record(&self, handle: DocumentHandle) -> Result<&DocumentRecord, EngineError> {
        self.docs.get(&handle).ok_or(EngineError::InvalidHandle(handle.raw()))
    }
}

impl PdfRenderer for LopdfRenderer {
    fn open(&mut self, source: OpenSource) -> Result<DocumentHandle, EngineError> {
        let bytes = match source {
            OpenSource::Path(path) => fs::read(path)?,
            OpenSource::Bytes(bytes) => bytes,
        };

        let page_sizes = Self::parse_sizes(&bytes)?;
        log::debug!("opened document with {} page(s)", page_sizes.len());

        self.next_handle += 1;
        let handle = DocumentHandle(self.next_handle);
        self.docs.insert(handle, DocumentRecord { page_sizes });

        Ok(handle)
    }

    fn page_count(&self, handle: DocumentHandle) -> Result<u32, EngineError> {
        Ok(self.record(handle)?.page_sizes.len() as u32)
    }

    fn page_size(
        &self,
        handle: DocumentHandle,
        page_index: u32,
    ) -> Result<PageSize, EngineError> {
        let record = self.record(handle)?;
        record.page_sizes.get(page_index as usize).copied().ok_or(EngineError::PageOutOfRange {
            page: page_index,
            page_count: record.page_sizes.len() as u32,
        })
    }

    fn render_page(
        &self,
        handle: DocumentHandle,
        page_index: u32,
        scale: f32,
    ) -> Result<RgbaImage, EngineError> {
        let page_size = self.page_size(handle, page_index)?;
        let scale = if scale <= 0.0 { 1.0 } else { scale };

        let width = (page_size.width_pt * scale).round().max(1.0) as u32;
        let height = (page_size.height_pt * scale).round().max(1.0) as u32;

        let mut image = RgbaImage::from_pixel(width, height, PAGE_FILL);

        if width >= 4 && height >= 4 {
            for x in 0..width {
                image.put_pixel(x, 0, PAGE_BORDER);
                image.put_pixel(x, height - 1, PAGE_BORDER);
            }
            for y in 0..height {
                image.put_pixel(0, y, PAGE_BORDER);
                image.put_pixel(width - 1, y, PAGE_BORDER);
            }
        }

        Ok(image)
    }

    fn close(&mut self, handle: DocumentHandle) -> Result<(), EngineError> {
        self.docs.remove(&handle).map(|_| ()).ok_or(EngineError::InvalidHandle(handle.raw()))
    }
}

pub fn default_renderer() -> LopdfRenderer {
    LopdfRenderer::new()
}
