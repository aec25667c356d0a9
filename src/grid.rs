//! Rows × columns of slots sharing one slot size, margin and corner radius.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use collage_layout::{CollageGrid, GridOptions, Size};
//!
//! let mut grid = CollageGrid::create(2, 3, 300, 200, GridOptions::new().margin(10)).unwrap();
//! grid.place(1, 2, Arc::new(Size::new(1600, 900))).unwrap();
//!
//! // 1600×900 fit into the 280×180 inner box → 280×158, padded (0, 11).
//! let corners = grid.get_corners().unwrap();
//! assert_eq!(corners[&(1, 2)], (0, 11));
//! ```

use alloc::collections::BTreeMap;
use alloc::sync::Arc;
use alloc::vec::Vec;

use crate::error::{CollageError, Result};
use crate::fit::FitMode;
use crate::geometry::{Rect, Size};
use crate::mask::MaskGeometry;
use crate::slot::{ImageSource, SlotImage};

/// Grid-wide options applied to every slot.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GridOptions {
    /// Inset applied on every edge of a slot before fitting.
    pub margin: u32,
    /// Corner radius of each slot's mask.
    pub corner_radius: u32,
    /// Upscaling policy for every slot.
    pub fit_mode: FitMode,
}

impl GridOptions {
    /// No margin, square corners, [`FitMode::Within`].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the per-edge slot margin.
    pub fn margin(mut self, margin: u32) -> Self {
        self.margin = margin;
        self
    }

    /// Set the corner radius.
    pub fn corner_radius(mut self, radius: u32) -> Self {
        self.corner_radius = radius;
        self
    }

    /// Set the upscaling policy.
    pub fn fit_mode(mut self, mode: FitMode) -> Self {
        self.fit_mode = mode;
        self
    }
}

/// Where an occupied slot's image is drawn.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct Placement {
    pub row: usize,
    pub col: usize,
    /// The whole cell, margin included.
    pub cell: Rect,
    /// The scaled image inside the cell.
    pub image: Rect,
    /// Rounded-corner mask around `image`.
    pub mask: MaskGeometry,
}

/// A collage document: `rows × cols` slots, each empty or holding one image.
///
/// Slots are stored and visited in row-major order.
#[derive(Debug)]
pub struct CollageGrid<I> {
    rows: usize,
    cols: usize,
    slot_size: Size,
    options: GridOptions,
    slots: Vec<Option<SlotImage<I>>>,
    destroyed: bool,
}

impl<I> CollageGrid<I> {
    /// Allocate `rows × cols` empty slots of `slot_width × slot_height`.
    ///
    /// Fails with [`CollageError::Configuration`] when a count or dimension is
    /// zero, the margin leaves no room, or the canvas would overflow.
    pub fn create(
        rows: usize,
        cols: usize,
        slot_width: u32,
        slot_height: u32,
        options: GridOptions,
    ) -> Result<Self> {
        if rows == 0 || cols == 0 {
            return Err(CollageError::Configuration {
                reason: "grid needs at least one row and one column",
            });
        }
        let slot_size = Size::new(slot_width, slot_height);
        check_slot_geometry(rows, cols, slot_size, options.margin)?;

        let mut slots = Vec::with_capacity(rows * cols);
        slots.resize_with(rows * cols, || None);
        log::debug!("created {rows}x{cols} collage grid, slots {slot_width}x{slot_height}, {options:?}");
        Ok(Self {
            rows,
            cols,
            slot_size,
            options,
            slots,
            destroyed: false,
        })
    }

    pub fn rows(&self) -> usize {
        self.rows
    }

    pub fn cols(&self) -> usize {
        self.cols
    }

    /// Current per-slot size, margin included.
    pub fn slot_size(&self) -> Size {
        self.slot_size
    }

    pub fn options(&self) -> GridOptions {
        self.options
    }

    /// Size of the whole collage canvas.
    pub fn canvas_size(&self) -> Size {
        Size::new(
            self.slot_size.width * self.cols as u32,
            self.slot_size.height * self.rows as u32,
        )
    }

    pub fn is_destroyed(&self) -> bool {
        self.destroyed
    }

    /// The whole cell at `(row, col)`, margin included.
    pub fn slot_rect(&self, row: usize, col: usize) -> Result<Rect> {
        self.index(row, col)?;
        Ok(self.cell(row, col))
    }

    /// The occupant of `(row, col)`, if any.
    pub fn slot(&self, row: usize, col: usize) -> Result<Option<&SlotImage<I>>> {
        let i = self.index(row, col)?;
        Ok(self.slots[i].as_ref())
    }

    /// Destroy the occupant of `(row, col)`. Empty slots are left alone.
    pub fn clear(&mut self, row: usize, col: usize) -> Result<()> {
        let i = self.index(row, col)?;
        if let Some(mut old) = self.slots[i].take() {
            old.destroy();
            log::debug!("cleared slot ({row}, {col})");
        }
        Ok(())
    }

    /// Change the slot size and refit every occupied slot, row-major.
    pub fn resize_all(&mut self, new_slot_width: u32, new_slot_height: u32) -> Result<()> {
        self.ensure_alive()?;
        let new_size = Size::new(new_slot_width, new_slot_height);
        check_slot_geometry(self.rows, self.cols, new_size, self.options.margin)?;
        self.slot_size = new_size;
        self.refit_all()?;
        log::debug!("resized all slots to {new_slot_width}x{new_slot_height}");
        Ok(())
    }

    /// Change the margin and refit every occupied slot.
    pub fn set_margin(&mut self, margin: u32) -> Result<()> {
        self.ensure_alive()?;
        check_slot_geometry(self.rows, self.cols, self.slot_size, margin)?;
        self.options.margin = margin;
        self.refit_all()
    }

    /// Change the corner radius used for every slot's mask.
    pub fn set_corner_radius(&mut self, radius: u32) -> Result<()> {
        self.ensure_alive()?;
        self.options.corner_radius = radius;
        Ok(())
    }

    /// `(offset_x, offset_y)` padding of every occupied slot.
    pub fn get_corners(&self) -> Result<BTreeMap<(usize, usize), (u32, u32)>> {
        self.occupied()?
            .map(|(pos, slot)| slot.current_fit().map(|f| (pos, f.offset())))
            .collect()
    }

    /// Occupied slots in row-major order.
    pub fn occupied(&self) -> Result<impl Iterator<Item = ((usize, usize), &SlotImage<I>)> + '_> {
        self.ensure_alive()?;
        let cols = self.cols;
        Ok(self
            .slots
            .iter()
            .enumerate()
            .filter_map(move |(i, s)| s.as_ref().map(|s| ((i / cols, i % cols), s))))
    }

    /// Cell, image rect and mask of every occupied slot, row-major.
    pub fn placements(&self) -> Result<Vec<Placement>> {
        self.occupied()?
            .map(|((row, col), slot)| -> Result<Placement> {
                Ok(Placement {
                    row,
                    col,
                    cell: self.cell(row, col),
                    image: slot.placement()?,
                    mask: slot.mask(self.options.corner_radius)?,
                })
            })
            .collect()
    }

    /// Change the grid shape. Occupants inside the new bounds keep their
    /// cell; the rest are destroyed.
    pub fn reshape(&mut self, rows: usize, cols: usize) -> Result<()> {
        self.ensure_alive()?;
        if rows == 0 || cols == 0 {
            return Err(CollageError::Configuration {
                reason: "grid needs at least one row and one column",
            });
        }
        check_slot_geometry(rows, cols, self.slot_size, self.options.margin)?;

        let mut slots = Vec::with_capacity(rows * cols);
        slots.resize_with(rows * cols, || None);
        for (i, occupant) in self.slots.drain(..).enumerate() {
            let (row, col) = (i / self.cols, i % self.cols);
            match occupant {
                Some(slot) if row < rows && col < cols => slots[row * cols + col] = Some(slot),
                Some(mut slot) => slot.destroy(),
                None => {}
            }
        }
        log::debug!("reshaped grid {}x{} -> {rows}x{cols}", self.rows, self.cols);
        self.slots = slots;
        self.rows = rows;
        self.cols = cols;
        Ok(())
    }

    /// Exchange the occupants of two slots, refitting each to its new cell.
    pub fn swap(&mut self, a: (usize, usize), b: (usize, usize)) -> Result<()> {
        let ia = self.index(a.0, a.1)?;
        let ib = self.index(b.0, b.1)?;
        if ia == ib {
            return Ok(());
        }
        self.slots.swap(ia, ib);
        for (i, (row, col)) in [(ia, a), (ib, b)] {
            let target = self.fit_target(row, col);
            if let Some(slot) = self.slots[i].as_mut() {
                slot.resize(target)?;
            }
        }
        log::debug!("swapped slots {a:?} and {b:?}");
        Ok(())
    }

    /// Destroy every slot, then the grid. Calling it again does nothing.
    pub fn destroy(&mut self) {
        if self.destroyed {
            return;
        }
        for slot in self.slots.iter_mut().flatten() {
            slot.destroy();
        }
        self.slots.clear();
        self.destroyed = true;
        log::debug!("destroyed {}x{} collage grid", self.rows, self.cols);
    }

    fn refit_all(&mut self) -> Result<()> {
        for i in 0..self.slots.len() {
            let target = self.fit_target(i / self.cols, i % self.cols);
            if let Some(slot) = self.slots[i].as_mut() {
                slot.resize(target)?;
            }
        }
        Ok(())
    }

    fn cell(&self, row: usize, col: usize) -> Rect {
        Rect::new(
            col as u32 * self.slot_size.width,
            row as u32 * self.slot_size.height,
            self.slot_size.width,
            self.slot_size.height,
        )
    }

    /// The box an image in `(row, col)` is fit into: the cell minus margin.
    fn fit_target(&self, row: usize, col: usize) -> Rect {
        self.cell(row, col).inset(self.options.margin)
    }

    fn index(&self, row: usize, col: usize) -> Result<usize> {
        self.ensure_alive()?;
        if row >= self.rows || col >= self.cols {
            return Err(CollageError::Index {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(row * self.cols + col)
    }

    fn ensure_alive(&self) -> Result<()> {
        if self.destroyed {
            return Err(CollageError::UseAfterDestroy { what: "grid" });
        }
        Ok(())
    }
}

impl<I: ImageSource> CollageGrid<I> {
    /// Put `image` in `(row, col)`, destroying any previous occupant.
    ///
    /// # Panics
    ///
    /// Panics if the image reports a zero dimension.
    pub fn place(&mut self, row: usize, col: usize, image: Arc<I>) -> Result<()> {
        let i = self.index(row, col)?;
        let slot = SlotImage::open_with(image, self.fit_target(row, col), self.options.fit_mode);
        if let Some(mut old) = self.slots[i].replace(slot) {
            old.destroy();
        }
        log::debug!("placed image in slot ({row}, {col})");
        Ok(())
    }
}

fn check_slot_geometry(rows: usize, cols: usize, slot: Size, margin: u32) -> Result<()> {
    if slot.is_empty() {
        return Err(CollageError::Configuration {
            reason: "slot width and height must be positive",
        });
    }
    let twice_margin = margin.checked_mul(2);
    if twice_margin.is_none_or(|m| m > slot.width || m > slot.height) {
        return Err(CollageError::Configuration {
            reason: "margin does not fit inside the slot",
        });
    }
    let fits = u32::try_from(cols)
        .ok()
        .and_then(|c| c.checked_mul(slot.width))
        .zip(u32::try_from(rows).ok().and_then(|r| r.checked_mul(slot.height)));
    if fits.is_none() {
        return Err(CollageError::Configuration {
            reason: "collage canvas exceeds the u32 pixel range",
        });
    }
    Ok(())
}
