//! Composite a grid of decoded photos into one bitmap.
//!
//! Each occupied slot's image is resampled to its fitted size and copied to
//! `cell origin + corner`, clipped by the slot's rounded-corner mask.

use image::imageops::FilterType;
use image::{DynamicImage, Rgba, RgbaImage};

use crate::error::Result;
use crate::grid::CollageGrid;

/// Render the collage onto a canvas of [`CollageGrid::canvas_size`] filled with `background`.
pub fn render_collage(
    grid: &CollageGrid<DynamicImage>,
    background: Rgba<u8>,
    filter: FilterType,
) -> Result<RgbaImage> {
    let canvas_size = grid.canvas_size();
    let mut canvas = RgbaImage::from_pixel(canvas_size.width, canvas_size.height, background);

    let radius = grid.options().corner_radius;
    for ((row, col), slot) in grid.occupied()? {
        let rect = slot.placement()?;
        if rect.width == 0 || rect.height == 0 {
            continue;
        }
        let mask = slot.mask(radius)?;
        let scaled = slot.image()?.resize_exact(rect.width, rect.height, filter).to_rgba8();
        for (dx, dy, px) in scaled.enumerate_pixels() {
            let (x, y) = (rect.x + dx, rect.y + dy);
            if mask.contains(x, y) {
                canvas.put_pixel(x, y, *px);
            }
        }
        log::trace!("composited slot ({row}, {col}) at {rect:?}");
    }
    Ok(canvas)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::GridOptions;
    use std::sync::Arc;

    const RED: Rgba<u8> = Rgba([255, 0, 0, 255]);
    const WHITE: Rgba<u8> = Rgba([255, 255, 255, 255]);

    fn solid(w: u32, h: u32) -> Arc<DynamicImage> {
        Arc::new(DynamicImage::ImageRgba8(RgbaImage::from_pixel(w, h, RED)))
    }

    #[test]
    fn photo_lands_at_corner_offset() {
        let mut grid = CollageGrid::create(1, 2, 40, 40, GridOptions::new().margin(2)).unwrap();
        grid.place(0, 1, solid(36, 18)).unwrap();
        let out = render_collage(&grid, WHITE, FilterType::Nearest).unwrap();
        assert_eq!(out.dimensions(), (80, 40));

        // Cell (0, 1) starts at x=40; margin 2; corner (0, 9).
        assert_eq!(*out.get_pixel(41, 20), WHITE);
        assert_eq!(*out.get_pixel(42, 10), WHITE);
        assert_eq!(*out.get_pixel(42, 11), RED);
        assert_eq!(*out.get_pixel(77, 28), RED);
        assert_eq!(*out.get_pixel(77, 29), WHITE);
        // Empty cell stays background.
        assert_eq!(*out.get_pixel(20, 20), WHITE);
    }

    #[test]
    fn rounded_mask_clips_corners() {
        let mut grid =
            CollageGrid::create(1, 1, 50, 50, GridOptions::new().corner_radius(10)).unwrap();
        grid.place(0, 0, solid(50, 50)).unwrap();
        let out = render_collage(&grid, WHITE, FilterType::Nearest).unwrap();
        assert_eq!(*out.get_pixel(0, 0), WHITE);
        assert_eq!(*out.get_pixel(49, 49), WHITE);
        assert_eq!(*out.get_pixel(25, 0), RED);
        assert_eq!(*out.get_pixel(25, 25), RED);
    }

    #[test]
    fn destroyed_grid_is_an_error() {
        let mut grid = CollageGrid::<DynamicImage>::create(1, 1, 10, 10, GridOptions::new()).unwrap();
        grid.destroy();
        assert!(render_collage(&grid, WHITE, FilterType::Nearest).is_err());
    }
}
