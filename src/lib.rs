//! Collage layout: a grid of slots, each holding one photo fitted without
//! distortion and clipped by a rounded-corner mask.
//!
//! The layout engine is pure geometry: no pixel operations, `no_std` + `alloc`
//! compatible. Decoding, compositing and the placeholder preview renderer sit
//! behind the `image` feature.
//!
//! # Modules
//!
//! - [`fit`](mod@fit): Aspect-preserving fit and centering ("corner") of one image in one box
//! - [`mask`]: Rounded-rectangle mask geometry with radius clamping
//! - [`slot`]: A single image bound to a slot, refit from native size on resize
//! - [`grid`]: Rows × columns of slots, corner queries, uniform resize
//! - [`preview`]: Placeholder preview parameters, clamping and (with `image`) rendering
//! - `svg`: SVG visualization of a grid (feature `svg`)
//! - `source`, `compose`: Decoding and compositing with the `image` crate (feature `image`)
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use collage_layout::{CollageGrid, GridOptions, Size};
//!
//! let mut grid = CollageGrid::create(1, 1, 1000, 800, GridOptions::new()).unwrap();
//! grid.place(0, 0, Arc::new(Size::new(960, 768))).unwrap();
//!
//! let corners = grid.get_corners().unwrap();
//! assert_eq!(corners[&(0, 0)], (20, 16));
//! ```

#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]

extern crate alloc;

pub mod error;
pub mod fit;
pub mod geometry;
pub mod grid;
pub mod mask;
pub mod preview;
pub mod slot;

#[cfg(feature = "image")]
pub mod compose;
#[cfg(feature = "image")]
pub mod source;
#[cfg(feature = "svg")]
pub mod svg;

pub use error::{CollageError, Result};
pub use fit::{AspectFit, FitMode, fit};
pub use geometry::{Rect, Size};
pub use grid::{CollageGrid, GridOptions, Placement};
pub use mask::MaskGeometry;
pub use preview::PreviewParams;
pub use slot::{ImageSource, SlotImage};
