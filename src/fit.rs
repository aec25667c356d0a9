//! Aspect-preserving fit of a source image into a slot.
//!
//! Computes the scaled dimensions and the symmetric padding ("corner") that
//! centers the scaled image in its target box. Pure integer geometry: no
//! pixel operations, no allocations.
//!
//! # Example
//!
//! ```
//! use collage_layout::{FitMode, fit};
//!
//! // Already fits: Within keeps native size and centers it.
//! let f = fit(960, 768, 1000, 800);
//! assert_eq!((f.scaled_width, f.scaled_height), (960, 768));
//! assert_eq!(f.offset(), (20, 16));
//!
//! // Fit also upscales.
//! let f = FitMode::Fit.fit(960, 768, 1000, 800);
//! assert_eq!((f.scaled_width, f.scaled_height), (1000, 800));
//! ```
//!
//! # Centering
//!
//! Offsets are `floor((target - scaled) / 2)`. When the leftover on an axis
//! would be odd, the scaled size on that axis moves by one pixel toward the
//! exact proportional size (ties shrink), so `2 * offset + scaled == target`
//! holds exactly for every non-empty target. The resulting aspect error is at
//! most one pixel on each axis.
//!
//! A side whose exact size is under half a pixel rounds to zero, and a
//! one-pixel side centered in an even target shrinks to zero rather than
//! doubling. Such fits are [`empty`](AspectFit::is_empty): nothing is drawn.

use crate::geometry::{Rect, Size};

/// Upscaling policy for [`fit`](FitMode::fit).
#[non_exhaustive]
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum FitMode {
    /// Scale up or down so one axis touches the target.
    Fit,

    /// Like [`Fit`](Self::Fit), but never upscales.
    /// Sources that already fit in both dimensions keep their native size
    /// and are only centered.
    #[default]
    Within,
}

/// Result of fitting a source into a target box.
///
/// For a non-empty target, `2 * offset_x + scaled_width == target.width` and
/// `2 * offset_y + scaled_height == target.height`. When either target side is
/// zero the fit is 0×0 with offsets `(target.width / 2, target.height / 2)`,
/// so an odd side of an otherwise empty target leaves one pixel unaccounted
/// for: `fit(640, 480, 0, 101)` is 0×0 at `(0, 50)`.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct AspectFit {
    /// The box the source was fit into.
    pub target: Size,
    /// Width of the scaled image.
    pub scaled_width: u32,
    /// Height of the scaled image.
    pub scaled_height: u32,
    /// Horizontal padding on the leading edge.
    pub offset_x: u32,
    /// Vertical padding on the top edge.
    pub offset_y: u32,
}

impl AspectFit {
    /// Scaled image dimensions.
    pub const fn scaled(&self) -> Size {
        Size::new(self.scaled_width, self.scaled_height)
    }

    /// The `(offset_x, offset_y)` padding, i.e. the slot "corner".
    pub const fn offset(&self) -> (u32, u32) {
        (self.offset_x, self.offset_y)
    }

    /// True when nothing is drawn: the target was empty, or a side of the
    /// scaled image rounded to zero.
    pub const fn is_empty(&self) -> bool {
        self.scaled_width == 0 || self.scaled_height == 0
    }

    /// Whether the scaled image leaves padding inside the target.
    pub fn needs_padding(&self) -> bool {
        self.scaled() != self.target
    }

    /// Where the scaled image lands when the target box sits at `origin`.
    pub const fn placed_at(&self, origin_x: u32, origin_y: u32) -> Rect {
        Rect::new(
            origin_x + self.offset_x,
            origin_y + self.offset_y,
            self.scaled_width,
            self.scaled_height,
        )
    }
}

impl FitMode {
    /// Fit a `source_w × source_h` image into `target_w × target_h`.
    ///
    /// # Panics
    ///
    /// Panics if either source dimension is zero.
    pub fn fit(self, source_w: u32, source_h: u32, target_w: u32, target_h: u32) -> AspectFit {
        assert!(
            source_w > 0 && source_h > 0,
            "source dimensions must be non-zero, got {source_w}x{source_h}"
        );
        let target = Size::new(target_w, target_h);

        if target.is_empty() {
            return AspectFit {
                target,
                scaled_width: 0,
                scaled_height: 0,
                offset_x: target_w / 2,
                offset_y: target_h / 2,
            };
        }

        let keep_native = self == FitMode::Within && source_w <= target_w && source_h <= target_h;
        let (w, h) = if keep_native {
            (
                Axis::native(source_w, target_w),
                Axis::native(source_h, target_h),
            )
        } else {
            fit_inside(source_w, source_h, target_w, target_h)
        };

        let scaled_width = w.even_leftover();
        let scaled_height = h.even_leftover();
        let fitted = AspectFit {
            target,
            scaled_width,
            scaled_height,
            offset_x: (target_w - scaled_width) / 2,
            offset_y: (target_h - scaled_height) / 2,
        };
        log::trace!(
            "fit {source_w}x{source_h} into {target_w}x{target_h} ({self:?}) -> {scaled_width}x{scaled_height} at {:?}",
            fitted.offset()
        );
        fitted
    }
}

/// Fit with the default policy ([`FitMode::Within`]).
///
/// # Panics
///
/// Panics if either source dimension is zero.
pub fn fit(source_w: u32, source_h: u32, target_w: u32, target_h: u32) -> AspectFit {
    FitMode::default().fit(source_w, source_h, target_w, target_h)
}

// ============================================================================
// Internal geometry
// ============================================================================

/// One axis of a fit: the rounded size, the exact size as `num / den`, and the target.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Axis {
    value: u32,
    num: u64,
    den: u64,
    target: u32,
}

impl Axis {
    fn native(size: u32, target: u32) -> Self {
        Self {
            value: size,
            num: size as u64,
            den: 1,
            target,
        }
    }

    /// `round(num / den)` (half up) clamped to `target`.
    ///
    /// `num` may be close to `u64::MAX`; only the remainder is doubled.
    fn proportional(num: u64, den: u64, target: u32) -> Self {
        let rounded = num / den + u64::from((num % den) * 2 >= den);
        let value = rounded.min(target as u64) as u32;
        Self {
            value,
            num,
            den,
            target,
        }
    }

    /// Nudge the size by one pixel when the leftover is odd.
    ///
    /// Moves toward the exact size; a tie shrinks. The rounded size is within
    /// half a pixel of exact, so the result stays within one pixel of it.
    /// Growing never exceeds the target: an odd leftover is at least one.
    fn even_leftover(self) -> u32 {
        if (self.target - self.value) % 2 == 0 {
            return self.value;
        }
        // num > 0, so value == 0 always grows.
        let exact_at_or_below = self.num <= self.value as u64 * self.den;
        if exact_at_or_below {
            self.value - 1
        } else {
            self.value + 1
        }
    }
}

/// Compute dimensions that fit inside the target box, preserving aspect ratio.
/// One dimension matches the target; the other is ≤ target.
fn fit_inside(sw: u32, sh: u32, tw: u32, th: u32) -> (Axis, Axis) {
    // Cross-multiplication: tw/sw <= th/sh  <=>  tw*sh <= th*sw.
    let width_constrains = tw as u64 * sh as u64 <= th as u64 * sw as u64;
    if width_constrains {
        let h = Axis::proportional(sh as u64 * tw as u64, sw as u64, th);
        (Axis::native(tw, tw), h)
    } else {
        let w = Axis::proportional(sw as u64 * th as u64, sh as u64, tw);
        (w, Axis::native(th, th))
    }
}
