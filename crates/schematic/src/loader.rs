//! Image loaders.
//!
//! The editor never decodes images itself. A host supplies an
//! [`AssetLoader`] that starts loading a URL and later settles the returned
//! [`ImageAsset`] with its pixel size or an error.

use crate::asset::{AssetError, ImageAsset, LoadResult};
use crate::coords::ImageSize;
use std::collections::HashMap;

/// Starts loading images for the catalog.
pub trait AssetLoader {
    /// Begin loading `url`. The returned asset may still be pending.
    fn load(&mut self, url: &str) -> ImageAsset;
}

/// Resolves images synchronously from a fixed table of sizes.
///
/// URLs missing from the table settle immediately with
/// [`AssetError::NotFound`]. Useful for headless hosts and tests.
#[derive(Debug, Default, Clone)]
pub struct StaticLoader {
    sizes: HashMap<String, ImageSize>,
}

impl StaticLoader {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_image(mut self, url: &str, size: ImageSize) -> Self {
        self.sizes.insert(url.to_string(), size);
        self
    }
}

impl AssetLoader for StaticLoader {
    fn load(&mut self, url: &str) -> ImageAsset {
        let asset = ImageAsset::pending(url);
        let result = self
            .sizes
            .get(url)
            .copied()
            .ok_or_else(|| AssetError::NotFound(url.to_string()));
        asset.finish(result);
        asset
    }
}

/// Hands out pending assets and settles them only when told to.
///
/// Lets callers observe the window between "load started" and "load
/// finished".
#[derive(Debug, Default)]
pub struct ManualLoader {
    assets: Vec<ImageAsset>,
}

impl ManualLoader {
    pub fn new() -> Self {
        Self::default()
    }

    /// URLs whose loads have not been settled yet.
    pub fn pending_urls(&self) -> Vec<String> {
        self.assets
            .iter()
            .filter(|asset| !asset.is_settled())
            .map(|asset| asset.url().to_string())
            .collect()
    }

    /// Settle every pending load of `url`. Returns how many were settled.
    pub fn finish(&self, url: &str, result: LoadResult) -> usize {
        self.assets
            .iter()
            .filter(|asset| asset.url() == url && !asset.is_settled())
            .map(|asset| asset.finish(result.clone()))
            .filter(|settled| *settled)
            .count()
    }

    /// Settle every pending load with the same size.
    pub fn finish_all(&self, size: ImageSize) {
        for asset in self.assets.iter().filter(|asset| !asset.is_settled()) {
            asset.finish(Ok(size));
        }
    }
}

impl AssetLoader for ManualLoader {
    fn load(&mut self, url: &str) -> ImageAsset {
        let asset = ImageAsset::pending(url);
        self.assets.push(asset.clone());
        asset
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_static_loader_settles_immediately() {
        let mut loader = StaticLoader::new().with_image("led.png", ImageSize::new(20, 20));
        let led = loader.load("led.png");
        assert_eq!(led.size(), Some(ImageSize::new(20, 20)));

        let missing = loader.load("resistor.png");
        assert!(missing.is_settled());
        assert_eq!(missing.size(), None);
    }

    #[test]
    fn test_manual_loader_waits_for_finish() {
        let mut loader = ManualLoader::new();
        let led = loader.load("led.png");
        assert_eq!(loader.pending_urls(), vec!["led.png".to_string()]);
        assert!(!led.is_settled());

        assert_eq!(loader.finish("led.png", Ok(ImageSize::new(8, 8))), 1);
        assert_eq!(led.size(), Some(ImageSize::new(8, 8)));
        assert!(loader.pending_urls().is_empty());
        assert_eq!(loader.finish("led.png", Ok(ImageSize::new(9, 9))), 0);
    }
}
