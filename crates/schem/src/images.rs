//! Component images for the window.
//!
//! The catalog asks for images through [`EmbeddedLoader`], which only hands
//! out pending assets. The editor decodes them on the background executor
//! and settles each asset back on the main thread.

use gpui::RenderImage;
use schematic::{AssetError, AssetLoader, ImageAsset, ImageSize};
use smallvec::smallvec;
use std::sync::Arc;

/// Hands out pending assets and remembers them for decoding.
#[derive(Debug, Default)]
pub struct EmbeddedLoader {
    pending: Vec<ImageAsset>,
}

impl EmbeddedLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// The assets waiting to be decoded, oldest first.
    pub fn take_pending(&mut self) -> Vec<ImageAsset> {
        std::mem::take(&mut self.pending)
    }
}

impl AssetLoader for EmbeddedLoader {
    fn load(&mut self, url: &str) -> ImageAsset {
        let asset = ImageAsset::pending(url);
        self.pending.push(asset.clone());
        asset
    }
}

/// A decoded image ready to paint.
pub struct DecodedImage {
    pub size: ImageSize,
    pub image: Arc<RenderImage>,
}

/// Decode an embedded image. Safe to run off the main thread.
pub fn decode(url: &str) -> Result<DecodedImage, AssetError> {
    let bytes =
        assets::Assets::get_image(url).ok_or_else(|| AssetError::NotFound(url.to_string()))?;
    let mut pixels = image::load_from_memory(&bytes)
        .map_err(|err| AssetError::Decode {
            url: url.to_string(),
            reason: err.to_string(),
        })?
        .into_rgba8();

    let size = ImageSize::new(pixels.width(), pixels.height());

    // gpui expects BGRA.
    for pixel in pixels.pixels_mut() {
        pixel.0.swap(0, 2);
    }

    let frame = image::Frame::new(pixels);
    Ok(DecodedImage {
        size,
        image: Arc::new(RenderImage::new(smallvec![frame])),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loader_hands_out_pending_assets() {
        let mut loader = EmbeddedLoader::new();
        let asset = loader.load("led.png");
        assert!(!asset.is_settled());

        let pending = loader.take_pending();
        assert_eq!(pending.len(), 1);
        assert!(pending[0].same_asset(&asset));
        assert!(loader.take_pending().is_empty());
    }

    #[test]
    fn test_decode_led() {
        let decoded = decode("led.png").unwrap();
        assert_eq!(decoded.size, ImageSize::new(20, 20));
    }

    #[test]
    fn test_decode_missing_image() {
        assert!(matches!(
            decode("resistor.png"),
            Err(AssetError::NotFound(url)) if url == "resistor.png"
        ));
    }
}
