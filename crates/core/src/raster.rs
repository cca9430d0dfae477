//! Destructive pixel operations on the render surface.
//!
//! Mapped rectangles arrive unclamped in `f32`; this module applies the one
//! rounding rule for the whole pipeline: coordinates are floored to pixel
//! indices, then clipped to the surface. Flooring once here keeps abutting
//! redactions contiguous.

use image::Rgba;

use crate::mapper::RenderRect;
use crate::surface::RenderSurface;

/// Inclusive-exclusive pixel bounds of `rect` clipped to the surface.
/// `None` when the clipped region is empty.
fn clipped_bounds(rect: &RenderRect, surface: &RenderSurface) -> Option<(u32, u32, u32, u32)> {
    let x0 = rect.x.max(0.0).floor() as u32;
    let y0 = rect.y.max(0.0).floor() as u32;
    let x1 = ((rect.x + rect.width).max(0.0).floor() as u32).min(surface.width());
    let y1 = ((rect.y + rect.height).max(0.0).floor() as u32).min(surface.height());

    if x0 >= x1 || y0 >= y1 {
        return None;
    }

    Some((x0, y0, x1, y1))
}

/// Overwrite a rectangle with a solid fill.
pub fn fill_rect(surface: &mut RenderSurface, rect: &RenderRect, color: Rgba<u8>) {
    let Some((x0, y0, x1, y1)) = clipped_bounds(rect, surface) else {
        return;
    };

    for y in y0..y1 {
        for x in x0..x1 {
            surface.put_pixel(x, y, color);
        }
    }
}

/// Box-blur a rectangle in place.
///
/// Samples are taken from a snapshot of the unblurred surface, clamped to
/// the image edge, so the filter reads stable input while writing.
pub fn box_blur_rect(surface: &mut RenderSurface, rect: &RenderRect, radius: u32) {
    let Some((x0, y0, x1, y1)) = clipped_bounds(rect, surface) else {
        return;
    };

    let source = surface.clone();
    let radius = radius as i64;
    let max_x = source.width() as i64 - 1;
    let max_y = source.height() as i64 - 1;

    for y in y0..y1 {
        for x in x0..x1 {
            let mut sum = [0u32; 4];
            let mut count = 0u32;

            for dy in -radius..=radius {
                for dx in -radius..=radius {
                    let sx = (x as i64 + dx).clamp(0, max_x) as u32;
                    let sy = (y as i64 + dy).clamp(0, max_y) as u32;
                    let pixel = source.get_pixel(sx, sy);

                    for (channel, value) in sum.iter_mut().zip(pixel.0) {
                        *channel += value as u32;
                    }
                    count += 1;
                }
            }

            let averaged = Rgba([
                (sum[0] / count) as u8,
                (sum[1] / count) as u8,
                (sum[2] / count) as u8,
                (sum[3] / count) as u8,
            ]);
            surface.put_pixel(x, y, averaged);
        }
    }
}
