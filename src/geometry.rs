//! Pixel-space value types shared by the fitter, the mask builder and the grid.

/// Width × height dimensions in pixels.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
}

impl Size {
    /// Create a new size.
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True when either dimension is zero.
    pub const fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Shrink by `inset` on every edge, saturating at zero.
    pub const fn inset(self, inset: u32) -> Self {
        Self {
            width: self.width.saturating_sub(inset.saturating_mul(2)),
            height: self.height.saturating_sub(inset.saturating_mul(2)),
        }
    }
}

/// Axis-aligned rectangle in pixel coordinates.
///
/// Coordinates are unsigned, so a rectangle can never have a negative extent.
/// Edges saturate at `u32::MAX`: a rect reaching past it is treated as ending
/// there.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Rect {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Rect {
    /// Create a new rect.
    pub const fn new(x: u32, y: u32, width: u32, height: u32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rect of the given size at the origin.
    pub const fn from_size(size: Size) -> Self {
        Self::new(0, 0, size.width, size.height)
    }

    /// Dimensions of this rect.
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Exclusive right edge, saturating.
    pub const fn right(&self) -> u32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating.
    pub const fn bottom(&self) -> u32 {
        self.y.saturating_add(self.height)
    }

    /// Shrink by `inset` on every edge. The origin moves inward; the size saturates at zero.
    pub const fn inset(self, inset: u32) -> Self {
        let size = self.size().inset(inset);
        Self {
            x: self.x.saturating_add(inset),
            y: self.y.saturating_add(inset),
            width: size.width,
            height: size.height,
        }
    }

    /// Whether the pixel at `(px, py)` lies inside this rect.
    pub const fn contains(&self, px: u32, py: u32) -> bool {
        px >= self.x && py >= self.y && px < self.right() && py < self.bottom()
    }
}
