//! One photograph fitted into one collage slot.

use alloc::sync::Arc;

use crate::error::{CollageError, Result};
use crate::fit::{AspectFit, FitMode};
use crate::geometry::{Rect, Size};
use crate::mask::{self, MaskGeometry};

/// A decoded image the layout engine can fit.
///
/// The engine only needs native pixel dimensions; pixel data stays with
/// whoever decoded it.
pub trait ImageSource {
    /// Native `(width, height)` in pixels. Both must be non-zero.
    fn dimensions(&self) -> (u32, u32);
}

impl ImageSource for Size {
    fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }
}

/// An image placed in a slot, with its current fit.
///
/// Refits always start from the image's native dimensions, so repeated
/// resizes never accumulate rounding drift.
#[derive(Debug)]
pub struct SlotImage<I> {
    image: Option<Arc<I>>,
    native: Size,
    mode: FitMode,
    target: Rect,
    fit: AspectFit,
}

impl<I: ImageSource> SlotImage<I> {
    /// Fit `image` into `target` using [`FitMode::Within`].
    ///
    /// # Panics
    ///
    /// Panics if the image reports a zero dimension.
    pub fn open(image: Arc<I>, target: Rect) -> Self {
        Self::open_with(image, target, FitMode::default())
    }

    /// Fit `image` into `target` with an explicit upscaling policy.
    ///
    /// # Panics
    ///
    /// Panics if the image reports a zero dimension.
    pub fn open_with(image: Arc<I>, target: Rect, mode: FitMode) -> Self {
        let (w, h) = image.dimensions();
        let native = Size::new(w, h);
        let fit = mode.fit(w, h, target.width, target.height);
        Self {
            image: Some(image),
            native,
            mode,
            target,
            fit,
        }
    }
}

impl<I> SlotImage<I> {
    /// Refit against `new_target`, starting from native dimensions.
    pub fn resize(&mut self, new_target: Rect) -> Result<()> {
        self.ensure_alive()?;
        if new_target == self.target {
            return Ok(());
        }
        self.fit = self.mode.fit(
            self.native.width,
            self.native.height,
            new_target.width,
            new_target.height,
        );
        self.target = new_target;
        Ok(())
    }

    /// The current fit.
    pub fn current_fit(&self) -> Result<AspectFit> {
        self.ensure_alive()?;
        Ok(self.fit)
    }

    /// The rect the image was last fit against.
    pub fn target(&self) -> Result<Rect> {
        self.ensure_alive()?;
        Ok(self.target)
    }

    /// Native dimensions of the source image.
    pub fn native_size(&self) -> Result<Size> {
        self.ensure_alive()?;
        Ok(self.native)
    }

    /// Absolute rect occupied by the scaled image.
    pub fn placement(&self) -> Result<Rect> {
        self.ensure_alive()?;
        Ok(self.fit.placed_at(self.target.x, self.target.y))
    }

    /// Rounded-corner mask around the placed image.
    pub fn mask(&self, radius: u32) -> Result<MaskGeometry> {
        Ok(mask::make(self.placement()?, radius))
    }

    /// Shared handle to the source image.
    pub fn image(&self) -> Result<&Arc<I>> {
        self.image
            .as_ref()
            .ok_or(CollageError::UseAfterDestroy { what: "slot" })
    }

    /// Release the image. Calling it again does nothing.
    pub fn destroy(&mut self) {
        self.image = None;
    }

    /// Whether [`destroy`](Self::destroy) has been called.
    pub fn is_destroyed(&self) -> bool {
        self.image.is_none()
    }

    fn ensure_alive(&self) -> Result<()> {
        self.image().map(|_| ())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn photo(w: u32, h: u32) -> Arc<Size> {
        Arc::new(Size::new(w, h))
    }

    #[test]
    fn open_fits_native_dimensions() {
        let slot = SlotImage::open(photo(960, 768), Rect::new(0, 0, 1000, 800));
        let f = slot.current_fit().unwrap();
        assert_eq!(f.scaled(), Size::new(960, 768));
        assert_eq!(f.offset(), (20, 16));
        assert_eq!(slot.target().unwrap(), Rect::new(0, 0, 1000, 800));
    }

    #[test]
    fn resize_is_idempotent() {
        let mut slot = SlotImage::open(photo(1280, 960), Rect::new(0, 0, 300, 300));
        slot.resize(Rect::new(0, 0, 101, 77)).unwrap();
        let first = slot.current_fit().unwrap();
        slot.resize(Rect::new(0, 0, 101, 77)).unwrap();
        assert_eq!(slot.current_fit().unwrap(), first);
    }

    #[test]
    fn resize_is_anchored_to_native_size() {
        let mut slot = SlotImage::open_with(photo(1283, 967), Rect::new(0, 0, 10, 10), FitMode::Fit);
        slot.resize(Rect::new(0, 0, 37, 23)).unwrap();
        slot.resize(Rect::new(0, 0, 911, 700)).unwrap();
        assert_eq!(slot.current_fit().unwrap(), FitMode::Fit.fit(1283, 967, 911, 700));
    }

    #[test]
    fn placement_and_mask_follow_target_origin() {
        let slot = SlotImage::open(photo(100, 50), Rect::new(40, 60, 100, 100));
        assert_eq!(slot.placement().unwrap(), Rect::new(40, 85, 100, 50));
        let m = slot.mask(80).unwrap();
        assert_eq!(m.rect, Rect::new(40, 85, 100, 50));
        assert_eq!(m.radius, 25);
    }

    #[test]
    fn destroy_releases_image() {
        let image = photo(10, 10);
        let mut slot = SlotImage::open(Arc::clone(&image), Rect::new(0, 0, 5, 5));
        assert_eq!(Arc::strong_count(&image), 2);
        slot.destroy();
        assert_eq!(Arc::strong_count(&image), 1);
        slot.destroy();
        assert!(slot.is_destroyed());
    }

    #[test]
    fn use_after_destroy_is_an_error() {
        let mut slot = SlotImage::open(photo(10, 10), Rect::new(0, 0, 5, 5));
        slot.destroy();
        let err = CollageError::UseAfterDestroy { what: "slot" };
        assert_eq!(slot.current_fit(), Err(err.clone()));
        assert_eq!(slot.resize(Rect::new(0, 0, 6, 6)), Err(err.clone()));
        assert_eq!(slot.placement(), Err(err.clone()));
        assert_eq!(slot.mask(3), Err(err));
    }

    #[test]
    #[should_panic(expected = "source dimensions must be non-zero")]
    fn zero_sized_image_panics() {
        let _ = SlotImage::open(photo(0, 10), Rect::new(0, 0, 5, 5));
    }
}
