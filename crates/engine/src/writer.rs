//! Export collaborator: compose a pixel surface and text placements into a
//! PDF file.
//!
//! The default backend draws the surface as a full-page JPEG image XObject
//! and stamps each placement as a Helvetica text run on top of it, then
//! serializes the document to bytes. Placement coordinates arrive in pixel
//! space with a top-left origin and are converted to page points here.

use image::codecs::jpeg::JpegEncoder;

use crate::{EngineError, RgbaImage};
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// A4 portrait in points.
const PAGE_WIDTH_PT: f32 = 595.28;
const PAGE_HEIGHT_PT: f32 = 841.89;

const JPEG_QUALITY: u8 = 85;
const TEXT_FONT_SIZE: f32 = 12.0;

/// One committed text annotation, positioned in the pixel space of the
/// exported surface (top-left origin).
#[derive(Debug, Clone, PartialEq)]
pub struct TextPlacement {
    pub text: String,
    pub x: f32,
    pub y: f32,
}

pub trait DocumentWriter {
    /// Produce the bytes of a single-page PDF holding `pixels` with each
    /// placement's text stamped at its stored position.
    fn write_document(
        &self,
        pixels: &RgbaImage,
        placements: &[TextPlacement],
    ) -> Result<Vec<u8>, EngineError>;
}

#[derive(Debug, Default)]
pub struct LopdfWriter;

impl LopdfWriter {
    pub fn new() -> Self {
        Self
    }

    fn encode_jpeg(pixels: &RgbaImage) -> Result<Vec<u8>, EngineError> {
        let rgb = image::DynamicImage::ImageRgba8(pixels.clone()).to_rgb8();
        let mut jpeg = Vec::new();

        JpegEncoder::new_with_quality(&mut jpeg, JPEG_QUALITY)
            .encode(rgb.as_raw(), rgb.width(), rgb.height(), image::ExtendedColorType::Rgb8)
            .map_err(|err| EngineError::Backend(format!("JPEG encoding failed: {err}")))?;

        Ok(jpeg)
    }
}

impl DocumentWriter for LopdfWriter {
    fn write_document(
        &self,
        pixels: &RgbaImage,
        placements: &[TextPlacement],
    ) -> Result<Vec<u8>, EngineError> {
        if pixels.width() == 0 || pixels.height() == 0 {
            return Err(EngineError::Backend("cannot export an empty surface".to_owned()));
        }

        let jpeg = Self::encode_jpeg(pixels)?;

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });

        let image_id = doc.add_object(Stream::new(
            dictionary! {
                "Type" => "XObject",
                "Subtype" => "Image",
                "Width" => pixels.width() as i64,
                "Height" => pixels.height() as i64,
                "ColorSpace" => "DeviceRGB",
                "BitsPerComponent" => 8,
                "Filter" => "DCTDecode",
            },
            jpeg,
        ));

        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! { "F1" => font_id },
            "XObject" => dictionary! { "Im1" => image_id },
        });

        // Pixel space has a top-left origin, page space a bottom-left one.
        let scale_x = PAGE_WIDTH_PT / pixels.width() as f32;
        let scale_y = PAGE_HEIGHT_PT / pixels.height() as f32;

        let mut operations = vec![
            Operation::new("q", vec![]),
            Operation::new(
                "cm",
                vec![
                    PAGE_WIDTH_PT.into(),
                    0.into(),
                    0.into(),
                    PAGE_HEIGHT_PT.into(),
                    0.into(),
                    0.into(),
                ],
            ),
            Operation::new("Do", vec!["Im1".into()]),
            Operation::new("Q", vec![]),
        ];

        for placement in placements {
            let x = placement.x * scale_x;
            let y = PAGE_HEIGHT_PT - placement.y * scale_y;

            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new("Tf", vec!["F1".into(), TEXT_FONT_SIZE.into()]));
            operations.push(Operation::new("Td", vec![x.into(), y.into()]));
            operations.push(Operation::new("Tj", vec![Object::string_literal(placement.text.as_str())]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode()?));

        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH_PT.into(), PAGE_HEIGHT_PT.into()],
        });

        doc.objects.insert(
            pages_id,
            Object::Dictionary(dictionary! {
                "Type" => "Pages",
                "Kids" => vec![page_id.into()],
                "Count" => 1,
            }),
        );

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)?;

        log::debug!(
            "composed {}x{} surface with {} text placement(s) into {} bytes",
            pixels.width(),
            pixels.height(),
            placements.len(),
            bytes.len()
        );

        Ok(bytes)
    }
}
