//! Placeholder raster: rounded frame, four tinted quadrants, cross dividers.

use std::io::Cursor;

use image::{ImageFormat, ImageResult, Rgba, RgbaImage};

use super::PreviewParams;
use crate::geometry::Rect;
use crate::mask;

const BACKGROUND: Rgba<u8> = Rgba([240, 240, 240, 255]);
const PANEL: Rgba<u8> = Rgba([255, 255, 255, 255]);
const BORDER: Rgba<u8> = Rgba([80, 120, 200, 255]);
/// Top-left, top-right, bottom-left, bottom-right.
const QUADRANTS: [[u8; 4]; 4] = [
    [244, 67, 54, 200],
    [33, 150, 243, 200],
    [76, 175, 80, 200],
    [255, 193, 7, 200],
];

/// Render the placeholder collage for `params` (clamped first).
pub fn render_preview(params: &PreviewParams) -> RgbaImage {
    let p = params.clamped();
    // Clamped values are non-negative.
    let (width, height) = (p.width as u32, p.height as u32);
    let (margin, border, corner) = (p.margin as u32, p.border as u32, p.corner as u32);

    let mut img = RgbaImage::from_pixel(width, height, BACKGROUND);

    let outer = mask::make(Rect::new(0, 0, width, height).inset(margin), corner);
    let inner = outer.inset(border);
    let frame = outer.rect;
    let mid_x = frame.x + frame.width / 2;
    let mid_y = frame.y + frame.height / 2;
    let line = (border / 2).max(1);
    let on_divider = |x: u32, y: u32| {
        let vertical = x + line / 2 >= mid_x && x + line / 2 < mid_x + line;
        let horizontal = y + line / 2 >= mid_y && y + line / 2 < mid_y + line;
        vertical || horizontal
    };

    log::debug!("rendering {width}x{height} preview, frame {frame:?}, radius {}", outer.radius);

    for y in frame.y..frame.bottom() {
        for x in frame.x..frame.right() {
            if !outer.contains(x, y) {
                continue;
            }
            let px = if !inner.contains(x, y) || on_divider(x, y) {
                BORDER
            } else {
                let quadrant = (usize::from(y >= mid_y) << 1) | usize::from(x >= mid_x);
                blend_over(PANEL, QUADRANTS[quadrant])
            };
            img.put_pixel(x, y, px);
        }
    }
    img
}

/// Encode an RGBA image as PNG bytes.
pub fn encode_png(img: &RgbaImage) -> ImageResult<Vec<u8>> {
    let mut out = Cursor::new(Vec::new());
    img.write_to(&mut out, ImageFormat::Png)?;
    Ok(out.into_inner())
}

/// Source-over composite of a translucent color onto an opaque pixel.
fn blend_over(dst: Rgba<u8>, src: [u8; 4]) -> Rgba<u8> {
    let a = src[3] as u32;
    let mix = |s: u8, d: u8| ((s as u32 * a + d as u32 * (255 - a) + 127) / 255) as u8;
    Rgba([
        mix(src[0], dst[0]),
        mix(src[1], dst[1]),
        mix(src[2], dst[2]),
        255,
    ])
}
