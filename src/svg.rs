//! SVG visualization of a collage grid.
//!
//! Draws every cell, the margin-inset fit box, and each placed image as its
//! rounded-corner mask path, annotated with scaled size and corner offset.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use collage_layout::{CollageGrid, GridOptions, Size, svg::render_grid_svg};
//!
//! let mut grid = CollageGrid::create(2, 2, 200, 150, GridOptions::new().margin(8).corner_radius(12)).unwrap();
//! grid.place(0, 0, Arc::new(Size::new(4000, 3000))).unwrap();
//! grid.place(1, 1, Arc::new(Size::new(900, 1600))).unwrap();
//!
//! let svg = render_grid_svg(&grid).unwrap();
//! assert!(svg.starts_with("<svg"));
//! ```

use alloc::format;
use alloc::string::String;

use crate::error::Result;
use crate::grid::CollageGrid;

/// Space around the canvas.
const MARGIN: u32 = 20;
/// Height of the title line above the canvas.
const TITLE_H: u32 = 24;

/// Render a complete SVG document showing the grid's current layout.
pub fn render_grid_svg<I>(grid: &CollageGrid<I>) -> Result<String> {
    let placements = grid.placements()?;
    let canvas = grid.canvas_size();
    let slot = grid.slot_size();
    let options = grid.options();

    let total_w = canvas.width + 2 * MARGIN;
    let total_h = canvas.height + 2 * MARGIN + TITLE_H;

    let mut svg = String::with_capacity(4096);

    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{total_w}" height="{total_h}" viewBox="0 0 {total_w} {total_h}">"#
    ));
    svg.push('\n');

    // Light and dark styles via prefers-color-scheme
    svg.push_str(r##"<style>
  text { font-family: "Consolas", "DejaVu Sans Mono", "Courier New", monospace; }
  .label { font-size: 13px; font-weight: bold; fill: #333; }
  .annotation { font-size: 11px; fill: #333; }
  .cell { fill: #e8e8e8; stroke: #999; stroke-width: 1; }
  .fitbox { fill: none; stroke: #999; stroke-width: 1; stroke-dasharray: 4,2; }
  .image { fill: #6ba3d6; stroke: #2c6faa; stroke-width: 1.5; }
  @media (prefers-color-scheme: dark) {
    .label { fill: #e0e0e0; }
    .annotation { fill: #e0e0e0; }
    .cell { fill: #2d2d2d; stroke: #555; }
    .fitbox { stroke: #777; }
    .image { fill: #3a72a4; stroke: #5a9fd4; }
  }
</style>
"##);

    let title = format!(
        "Collage  {}×{}  ({}×{} slots of {}×{}, margin {}, radius {})",
        canvas.width,
        canvas.height,
        grid.rows(),
        grid.cols(),
        slot.width,
        slot.height,
        options.margin,
        options.corner_radius
    );
    svg.push_str(&format!(
        r#"<text x="{MARGIN}" y="{}" class="label">{}</text>"#,
        MARGIN + 4,
        escape_xml(&title)
    ));
    svg.push('\n');

    svg.push_str(&format!(
        r#"<g transform="translate({MARGIN} {})">"#,
        MARGIN + TITLE_H
    ));
    svg.push('\n');

    for row in 0..grid.rows() {
        for col in 0..grid.cols() {
            let cell = grid.slot_rect(row, col)?;
            svg.push_str(&format!(
                r#"<rect x="{}" y="{}" width="{}" height="{}" class="cell"/>"#,
                cell.x, cell.y, cell.width, cell.height
            ));
            svg.push('\n');
            if options.margin > 0 {
                let fitbox = cell.inset(options.margin);
                svg.push_str(&format!(
                    r#"<rect x="{}" y="{}" width="{}" height="{}" class="fitbox"/>"#,
                    fitbox.x, fitbox.y, fitbox.width, fitbox.height
                ));
                svg.push('\n');
            }
        }
    }

    for p in &placements {
        if p.image.width == 0 || p.image.height == 0 {
            continue;
        }
        svg.push_str(&format!(
            r#"<path d="{}" class="image"/>"#,
            p.mask.svg_path()
        ));
        svg.push('\n');

        let corner = (p.image.x - p.cell.x - options.margin, p.image.y - p.cell.y - options.margin);
        let annotation = format!(
            "({},{}) {}×{} +{}+{}",
            p.row, p.col, p.image.width, p.image.height, corner.0, corner.1
        );
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" class="annotation" text-anchor="middle">{}</text>"#,
            p.cell.x + p.cell.width / 2,
            p.cell.y + p.cell.height / 2,
            escape_xml(&annotation)
        ));
        svg.push('\n');
    }

    svg.push_str("</g>\n</svg>\n");
    Ok(svg)
}

/// Escape special characters for XML text content.
fn escape_xml(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
