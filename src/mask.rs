//! Rounded-rectangle mask geometry.
//!
//! A [`MaskGeometry`] is a shape description only: four quarter-circle arcs
//! joined by straight edges. Renderers fill or stroke it, clip with
//! [`MaskGeometry::contains`], or emit it as a vector path.
//!
//! # Example
//!
//! ```
//! use collage_layout::{Rect, mask};
//!
//! let m = mask::make(Rect::new(0, 0, 100, 60), 500);
//! assert_eq!(m.radius, 30); // clamped to half the short side
//! assert_eq!(m.arcs().count(), 4);
//! assert!(!m.contains(0, 0));
//! assert!(m.contains(50, 30));
//! ```

use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;
use core::f64::consts::{FRAC_PI_2, PI};

use num_traits::Float;

use crate::geometry::Rect;

/// One corner of a rectangle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Corner {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl Corner {
    /// All corners, clockwise from top-left.
    pub const ALL: [Corner; 4] = [
        Corner::TopLeft,
        Corner::TopRight,
        Corner::BottomRight,
        Corner::BottomLeft,
    ];
}

/// A quarter-circle arc at one corner of the mask.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct CornerArc {
    pub corner: Corner,
    pub center_x: u32,
    pub center_y: u32,
    pub radius: u32,
}

impl CornerArc {
    /// Start and end angle in radians, y axis pointing down, sweeping clockwise.
    pub fn angles(&self) -> (f64, f64) {
        let start = match self.corner {
            Corner::TopLeft => PI,
            Corner::TopRight => 1.5 * PI,
            Corner::BottomRight => 0.0,
            Corner::BottomLeft => FRAC_PI_2,
        };
        (start, start + FRAC_PI_2)
    }
}

/// A straight boundary segment between two arcs (or two corners).
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Edge {
    pub from: (u32, u32),
    pub to: (u32, u32),
}

/// Rounded rectangle: `rect` with every corner cut by a quarter circle of `radius`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct MaskGeometry {
    pub rect: Rect,
    /// Corner radius, already clamped to half the shorter side.
    pub radius: u32,
}

/// Build the mask for `rect` with corner `radius`.
///
/// `radius` is clamped to `[0, min(width, height) / 2]`. A zero radius
/// yields a plain rectangle. A rect reaching past `u32::MAX` is cut off there.
pub fn make(rect: Rect, radius: u32) -> MaskGeometry {
    let rect = Rect::new(rect.x, rect.y, rect.right() - rect.x, rect.bottom() - rect.y);
    let max_radius = rect.width.min(rect.height) / 2;
    MaskGeometry {
        rect,
        radius: radius.min(max_radius),
    }
}

impl MaskGeometry {
    /// True when the mask has no rounded corners.
    pub const fn is_plain(&self) -> bool {
        self.radius == 0
    }

    /// The four rectangle corner points, clockwise from top-left.
    pub const fn corner_points(&self) -> [(u32, u32); 4] {
        let r = &self.rect;
        [
            (r.x, r.y),
            (r.right(), r.y),
            (r.right(), r.bottom()),
            (r.x, r.bottom()),
        ]
    }

    /// Corner arcs, clockwise from top-left. Empty for a plain rectangle.
    pub fn arcs(&self) -> impl Iterator<Item = CornerArc> + '_ {
        let count = if self.is_plain() { 0 } else { 4 };
        Corner::ALL.into_iter().take(count).map(|corner| self.arc(corner))
    }

    fn arc(&self, corner: Corner) -> CornerArc {
        let r = &self.rect;
        let rad = self.radius;
        let (center_x, center_y) = match corner {
            Corner::TopLeft => (r.x + rad, r.y + rad),
            Corner::TopRight => (r.right() - rad, r.y + rad),
            Corner::BottomRight => (r.right() - rad, r.bottom() - rad),
            Corner::BottomLeft => (r.x + rad, r.bottom() - rad),
        };
        CornerArc {
            corner,
            center_x,
            center_y,
            radius: rad,
        }
    }

    /// Straight edges: top, right, bottom, left.
    ///
    /// With a radius of half the side, an edge can have zero length.
    pub fn edges(&self) -> [Edge; 4] {
        let r = &self.rect;
        let rad = self.radius;
        [
            Edge {
                from: (r.x + rad, r.y),
                to: (r.right() - rad, r.y),
            },
            Edge {
                from: (r.right(), r.y + rad),
                to: (r.right(), r.bottom() - rad),
            },
            Edge {
                from: (r.right() - rad, r.bottom()),
                to: (r.x + rad, r.bottom()),
            },
            Edge {
                from: (r.x, r.bottom() - rad),
                to: (r.x, r.y + rad),
            },
        ]
    }

    /// Shrink by `inset` on every edge, reducing the radius by the same amount.
    ///
    /// The inner boundary of a stroke of width `inset`.
    pub fn inset(&self, inset: u32) -> Self {
        make(self.rect.inset(inset), self.radius.saturating_sub(inset))
    }

    /// Whether the center of pixel `(px, py)` lies inside the mask.
    pub fn contains(&self, px: u32, py: u32) -> bool {
        if !self.rect.contains(px, py) {
            return false;
        }
        if self.is_plain() {
            return true;
        }
        let r = &self.rect;
        let rad = self.radius;
        let in_left = px < r.x + rad;
        let in_right = px >= r.right() - rad;
        let in_top = py < r.y + rad;
        let in_bottom = py >= r.bottom() - rad;
        let corner = match (in_left, in_right, in_top, in_bottom) {
            (true, _, true, _) => Corner::TopLeft,
            (_, true, true, _) => Corner::TopRight,
            (_, true, _, true) => Corner::BottomRight,
            (true, _, _, true) => Corner::BottomLeft,
            _ => return true,
        };
        let arc = self.arc(corner);
        // Doubled coordinates keep the pixel-center test in integers.
        let dx = 2 * arc.center_x as i64 - (2 * px as i64 + 1);
        let dy = 2 * arc.center_y as i64 - (2 * py as i64 + 1);
        let r2 = 2 * rad as i64;
        dx * dx + dy * dy <= r2 * r2
    }

    /// Flatten the outline to a closed polygon, clockwise from the top edge.
    ///
    /// Each arc contributes `segments_per_arc + 1` points. A plain rectangle
    /// yields its four corners.
    pub fn outline(&self, segments_per_arc: usize) -> Vec<(f64, f64)> {
        if self.is_plain() {
            return self
                .corner_points()
                .iter()
                .map(|&(x, y)| (x as f64, y as f64))
                .collect();
        }
        let segments = segments_per_arc.max(1);
        let mut points = Vec::with_capacity(4 * (segments + 1));
        // Clockwise from the top edge: TopRight, BottomRight, BottomLeft, TopLeft.
        for corner in [
            Corner::TopRight,
            Corner::BottomRight,
            Corner::BottomLeft,
            Corner::TopLeft,
        ] {
            let arc = self.arc(corner);
            let (start, end) = arc.angles();
            let (cx, cy, rad) = (arc.center_x as f64, arc.center_y as f64, arc.radius as f64);
            for i in 0..=segments {
                let t = start + (end - start) * i as f64 / segments as f64;
                points.push((
                    Float::cos(t).mul_add(rad, cx),
                    Float::sin(t).mul_add(rad, cy),
                ));
            }
        }
        points
    }

    /// SVG path data (`d` attribute) for the outline.
    pub fn svg_path(&self) -> String {
        let r = &self.rect;
        if self.is_plain() {
            return format!(
                "M{} {} H{} V{} H{} Z",
                r.x,
                r.y,
                r.right(),
                r.bottom(),
                r.x
            );
        }
        let rad = self.radius;
        format!(
            "M{} {} H{} A{rad} {rad} 0 0 1 {} {} V{} A{rad} {rad} 0 0 1 {} {} H{} A{rad} {rad} 0 0 1 {} {} V{} A{rad} {rad} 0 0 1 {} {} Z",
            r.x + rad,
            r.y,
            r.right() - rad,
            r.right(),
            r.y + rad,
            r.bottom() - rad,
            r.right() - rad,
            r.bottom(),
            r.x + rad,
            r.x,
            r.bottom() - rad,
            r.y + rad,
            r.x + rad,
            r.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn zero_radius_is_plain_rectangle() {
        let rect = Rect::new(10, 20, 30, 40);
        let m = make(rect, 0);
        assert!(m.is_plain());
        assert_eq!(m.arcs().count(), 0);
        assert_eq!(m.corner_points(), [(10, 20), (40, 20), (40, 60), (10, 60)]);
        // Every pixel of the rect is covered, including the corners.
        assert!(m.contains(10, 20));
        assert!(m.contains(39, 59));
        assert!(!m.contains(40, 59));
        assert_eq!(m.outline(8).len(), 4);
    }

    #[test]
    fn radius_clamps_to_half_short_side() {
        assert_eq!(make(Rect::new(0, 0, 100, 60), 70).radius, 30);
        assert_eq!(make(Rect::new(0, 0, 7, 100), 70).radius, 3);
        assert_eq!(make(Rect::new(0, 0, 100, 60), 12).radius, 12);
    }

    #[test]
    fn rect_past_u32_max_is_cut_off() {
        let m = make(Rect::new(u32::MAX - 10, u32::MAX - 20, 100, 100), 50);
        assert_eq!(m.rect, Rect::new(u32::MAX - 10, u32::MAX - 20, 10, 20));
        assert_eq!(m.radius, 5);
        assert!(m.contains(u32::MAX - 5, u32::MAX - 10));
        assert!(!m.contains(u32::MAX - 10, u32::MAX - 20));
        assert_eq!(m.edges()[0].to, (u32::MAX - 5, u32::MAX - 20));
    }

    #[test]
    fn empty_rect_has_no_arcs() {
        let m = make(Rect::new(5, 5, 0, 10), 4);
        assert!(m.is_plain());
        assert!(!m.contains(5, 5));
    }

    #[test]
    fn arcs_sit_inside_the_rect_corners() {
        let m = make(Rect::new(0, 0, 100, 50), 10);
        let arcs: Vec<_> = m.arcs().collect();
        assert_eq!(arcs.len(), 4);
        assert_eq!((arcs[0].center_x, arcs[0].center_y), (10, 10));
        assert_eq!((arcs[1].center_x, arcs[1].center_y), (90, 10));
        assert_eq!((arcs[2].center_x, arcs[2].center_y), (90, 40));
        assert_eq!((arcs[3].center_x, arcs[3].center_y), (10, 40));
    }

    #[test]
    fn edges_run_between_arcs() {
        let m = make(Rect::new(0, 0, 100, 50), 10);
        let [top, right, bottom, left] = m.edges();
        assert_eq!(top, Edge { from: (10, 0), to: (90, 0) });
        assert_eq!(right, Edge { from: (100, 10), to: (100, 40) });
        assert_eq!(bottom, Edge { from: (90, 50), to: (10, 50) });
        assert_eq!(left, Edge { from: (0, 40), to: (0, 10) });
    }

    #[test]
    fn contains_cuts_corners() {
        let m = make(Rect::new(0, 0, 100, 100), 20);
        assert!(!m.contains(0, 0));
        assert!(!m.contains(99, 0));
        assert!(!m.contains(99, 99));
        assert!(!m.contains(0, 99));
        // Straight edges are fully covered.
        assert!(m.contains(50, 0));
        assert!(m.contains(0, 50));
        // Just inside the arc on the diagonal: 20 - 20/√2 ≈ 5.86.
        assert!(m.contains(6, 6));
        assert!(!m.contains(5, 5));
    }

    #[test]
    fn contains_is_symmetric() {
        let m = make(Rect::new(3, 4, 41, 29), 9);
        for dy in 0..29 {
            for dx in 0..41 {
                let a = m.contains(3 + dx, 4 + dy);
                let b = m.contains(3 + 40 - dx, 4 + 28 - dy);
                assert_eq!(a, b, "({dx}, {dy})");
            }
        }
    }

    #[test]
    fn inset_shrinks_radius() {
        let m = make(Rect::new(0, 0, 100, 100), 20).inset(4);
        assert_eq!(m.rect, Rect::new(4, 4, 92, 92));
        assert_eq!(m.radius, 16);
        let flat = make(Rect::new(0, 0, 100, 100), 3).inset(4);
        assert!(flat.is_plain());
    }

    #[test]
    fn outline_points_lie_on_boundary() {
        let m = make(Rect::new(0, 0, 200, 100), 25);
        let pts = m.outline(6);
        assert_eq!(pts.len(), 4 * 7);
        for &(x, y) in &pts {
            assert!((-1e-9..=200.0 + 1e-9).contains(&x));
            assert!((-1e-9..=100.0 + 1e-9).contains(&y));
        }
        // First point starts the top-right arc at the end of the top edge.
        assert!((pts[0].0 - 175.0).abs() < 1e-9);
        assert!(pts[0].1.abs() < 1e-9);
    }

    #[test]
    fn svg_path_mentions_arcs_only_when_rounded() {
        let rounded = make(Rect::new(0, 0, 40, 40), 5).svg_path();
        assert!(rounded.starts_with("M5 0 H35 A5 5 0 0 1 40 5"));
        assert!(rounded.ends_with('Z'));
        let plain = make(Rect::new(0, 0, 40, 40), 0).svg_path();
        assert_eq!(plain, "M0 0 H40 V40 H0 Z");
    }
}
