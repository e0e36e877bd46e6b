//! Shared image assets.
//!
//! An [`ImageAsset`] is handed out by an [`AssetLoader`](crate::AssetLoader)
//! before the image has finished loading. Its pixel size is unknown until the
//! loader settles it, so anything that needs geometry either checks
//! [`ImageAsset::size`] or defers work with [`ImageAsset::once_loaded`].

use crate::coords::ImageSize;
use crate::latch::Latch;
use log::{debug, info, warn};
use std::fmt;
use std::rc::Rc;

/// Error type for image loading.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssetError {
    NotFound(String),
    Decode { url: String, reason: String },
}

impl fmt::Display for AssetError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NotFound(url) => write!(f, "Image not found: {}", url),
            Self::Decode { url, reason } => write!(f, "Could not decode {}: {}", url, reason),
        }
    }
}

impl std::error::Error for AssetError {}

pub type LoadResult = Result<ImageSize, AssetError>;

/// A handle to an image that may still be loading.
///
/// Clones are cheap and share load state; every component of a kind holds a
/// clone of the same asset.
#[derive(Clone)]
pub struct ImageAsset {
    url: Rc<str>,
    loaded: Latch<LoadResult>,
}

impl ImageAsset {
    /// A new asset whose load has started but not finished.
    pub fn pending(url: &str) -> Self {
        Self {
            url: Rc::from(url),
            loaded: Latch::new(),
        }
    }

    /// An asset that is already loaded.
    pub fn ready(url: &str, size: ImageSize) -> Self {
        let asset = Self::pending(url);
        asset.finish(Ok(size));
        asset
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    /// Settle the load. Queued callbacks run now, in registration order.
    ///
    /// Returns `false` if the asset had already been settled; the new result
    /// is ignored.
    pub fn finish(&self, result: LoadResult) -> bool {
        if self.loaded.is_fired() {
            warn!("{} finished loading twice; keeping the first result", self.url);
            return false;
        }

        match &result {
            Ok(size) => info!("Loaded {} ({}x{})", self.url, size.width, size.height),
            Err(err) => warn!("{err}; components using it will have no geometry"),
        }
        self.loaded.trigger(result)
    }

    /// Pixel size, once loaded. Stays `None` forever if the load failed.
    pub fn size(&self) -> Option<ImageSize> {
        self.loaded.value().and_then(Result::ok)
    }

    pub fn is_loaded(&self) -> bool {
        self.size().is_some()
    }

    /// Whether the load has finished, successfully or not.
    pub fn is_settled(&self) -> bool {
        self.loaded.is_fired()
    }

    pub fn error(&self) -> Option<AssetError> {
        self.loaded.value().and_then(Result::err)
    }

    /// Run `callback` with the pixel size once the image has loaded.
    ///
    /// Runs immediately if it already has. If the load fails the callback is
    /// dropped without running.
    pub fn once_loaded(&self, callback: impl FnOnce(ImageSize) + 'static) {
        let url = Rc::clone(&self.url);
        self.loaded.on(move |result| match result {
            Ok(size) => callback(*size),
            Err(_) => debug!("Dropping load callback for {url}: image unavailable"),
        });
    }

    /// Run `callback` once the load finishes either way.
    pub fn once_settled(&self, callback: impl FnOnce(&LoadResult) + 'static) {
        self.loaded.on(callback);
    }

    /// Whether both handles refer to the same underlying asset.
    pub fn same_asset(&self, other: &ImageAsset) -> bool {
        Rc::ptr_eq(&self.url, &other.url)
    }
}

impl fmt::Debug for ImageAsset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ImageAsset")
            .field("url", &self.url)
            .field("size", &self.size())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    #[test]
    fn test_size_is_unknown_until_loaded() {
        let asset = ImageAsset::pending("led.png");
        assert_eq!(asset.size(), None);
        assert!(!asset.is_settled());

        asset.finish(Ok(ImageSize::new(20, 30)));
        assert_eq!(asset.size(), Some(ImageSize::new(20, 30)));
        assert!(asset.is_loaded());
    }

    #[test]
    fn test_once_loaded_defers_until_finish() {
        let asset = ImageAsset::pending("led.png");
        let seen = Rc::new(RefCell::new(Vec::new()));

        let log = seen.clone();
        asset.once_loaded(move |size| log.borrow_mut().push(("a", size.width)));
        let log = seen.clone();
        asset.once_loaded(move |size| log.borrow_mut().push(("b", size.width)));
        assert!(seen.borrow().is_empty());

        asset.finish(Ok(ImageSize::new(16, 16)));
        assert_eq!(*seen.borrow(), vec![("a", 16), ("b", 16)]);

        let log = seen.clone();
        asset.once_loaded(move |size| log.borrow_mut().push(("late", size.width)));
        assert_eq!(seen.borrow().last(), Some(&("late", 16)));
    }

    #[test]
    fn test_second_finish_is_ignored() {
        let asset = ImageAsset::pending("led.png");
        assert!(asset.finish(Ok(ImageSize::new(10, 10))));
        assert!(!asset.finish(Ok(ImageSize::new(99, 99))));
        assert_eq!(asset.size(), Some(ImageSize::new(10, 10)));
    }

    #[test]
    fn test_failed_load_drops_callbacks_without_panicking() {
        let asset = ImageAsset::pending("missing.png");
        let ran = Rc::new(Cell::new(false));
        let flag = ran.clone();
        asset.once_loaded(move |_| flag.set(true));

        let settled = Rc::new(Cell::new(false));
        let flag = settled.clone();
        asset.once_settled(move |result| flag.set(result.is_err()));

        asset.finish(Err(AssetError::NotFound("missing.png".into())));
        assert!(!ran.get());
        assert!(settled.get());
        assert_eq!(asset.size(), None);
        assert_eq!(asset.error(), Some(AssetError::NotFound("missing.png".into())));
    }

    #[test]
    fn test_clones_share_load_state() {
        let asset = ImageAsset::pending("led.png");
        let copy = asset.clone();
        asset.finish(Ok(ImageSize::new(4, 4)));
        assert_eq!(copy.size(), Some(ImageSize::new(4, 4)));
        assert!(copy.same_asset(&asset));
        assert!(!copy.same_asset(&ImageAsset::pending("led.png")));
    }
}
