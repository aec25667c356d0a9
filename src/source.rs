//! Decoding adapters backed by the `image` crate.
//!
//! Decode errors are returned as-is; the layout engine never retries or
//! reinterprets them.

use std::path::Path;
use std::sync::Arc;

use image::{DynamicImage, GenericImageView, ImageResult, RgbaImage};

use crate::slot::ImageSource;

impl ImageSource for DynamicImage {
    fn dimensions(&self) -> (u32, u32) {
        GenericImageView::dimensions(self)
    }
}

impl ImageSource for RgbaImage {
    fn dimensions(&self) -> (u32, u32) {
        (self.width(), self.height())
    }
}

/// Decode an in-memory image, guessing the format from its header.
pub fn decode_bytes(bytes: &[u8]) -> ImageResult<Arc<DynamicImage>> {
    let img = image::load_from_memory(bytes)?;
    log::debug!("decoded {}x{} image from {} bytes", img.width(), img.height(), bytes.len());
    Ok(Arc::new(img))
}

/// Decode an image file, choosing the format from its extension.
pub fn decode_path(path: impl AsRef<Path>) -> ImageResult<Arc<DynamicImage>> {
    let path = path.as_ref();
    let img = image::open(path)?;
    log::debug!("decoded {}x{} image from {}", img.width(), img.height(), path.display());
    Ok(Arc::new(img))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::preview::{PreviewParams, encode_png, render_preview};

    #[test]
    fn decode_bytes_reports_native_dimensions() {
        let png = encode_png(&render_preview(&PreviewParams {
            width: 120,
            height: 90,
            ..PreviewParams::default()
        }))
        .unwrap();
        let img = decode_bytes(&png).unwrap();
        assert_eq!(ImageSource::dimensions(img.as_ref()), (120, 90));
    }

    #[test]
    fn decode_errors_pass_through() {
        let err = decode_bytes(b"definitely not an image").unwrap_err();
        assert!(matches!(err, image::ImageError::Unsupported(_)));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = decode_path("/nonexistent/collage/photo.png").unwrap_err();
        assert!(matches!(err, image::ImageError::IoError(_)));
    }
}
