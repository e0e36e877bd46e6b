//! Embedded assets for the schematic editor
//!
//! Component images are compiled into the binary with rust-embed, keyed by
//! the path a component kind asks for (`led.png`).

use rust_embed::RustEmbed;
use std::borrow::Cow;

/// Embedded files from the `assets` directory.
#[derive(RustEmbed)]
#[folder = "assets"]
#[prefix = ""]
pub struct Assets;

impl Assets {
    /// Get an asset by its path
    ///
    /// Returns None if the asset doesn't exist.
    ///
    /// # Example
    /// ```no_run
    /// use assets::Assets;
    ///
    /// if let Some(png) = Assets::get_asset("led.png") {
    ///     println!("led.png is {} bytes", png.len());
    /// }
    /// ```
    pub fn get_asset(path: &str) -> Option<Cow<'static, [u8]>> {
        Self::get(path).map(|file| file.data)
    }

    /// Get a component image by its path.
    ///
    /// Only PNG files are component images; anything else returns None.
    pub fn get_image(path: &str) -> Option<Cow<'static, [u8]>> {
        if !path.ends_with(".png") {
            return None;
        }
        Self::get_asset(path)
    }

    /// List all available assets
    pub fn list() -> impl Iterator<Item = Cow<'static, str>> {
        Self::iter()
    }

    /// List all component images
    ///
    /// # Example
    /// ```no_run
    /// use assets::Assets;
    ///
    /// for image in Assets::list_images() {
    ///     println!("Image: {}", image);
    /// }
    /// ```
    pub fn list_images() -> impl Iterator<Item = String> {
        Self::iter()
            .filter(|path| path.ends_with(".png"))
            .map(|path| path.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const PNG_SIGNATURE: &[u8] = b"\x89PNG\r\n\x1a\n";

    #[test]
    fn test_list_assets() {
        let assets: Vec<_> = Assets::list().collect();
        assert!(!assets.is_empty(), "No assets found");
    }

    #[test]
    fn test_led_image_is_embedded() {
        let led = Assets::get_image("led.png").expect("led.png should exist");
        assert!(led.starts_with(PNG_SIGNATURE));
    }

    #[test]
    fn test_led_image_is_20_by_20() {
        let led = Assets::get_image("led.png").unwrap();
        // IHDR width and height follow the signature and chunk header.
        let width = u32::from_be_bytes([led[16], led[17], led[18], led[19]]);
        let height = u32::from_be_bytes([led[20], led[21], led[22], led[23]]);
        assert_eq!((width, height), (20, 20));
    }

    #[test]
    fn test_list_images() {
        let images: Vec<_> = Assets::list_images().collect();
        assert!(images.contains(&"led.png".to_string()));
    }

    #[test]
    fn test_missing_image() {
        assert!(Assets::get_image("resistor.png").is_none());
        assert!(Assets::get_asset("missing/file.bin").is_none());
    }
}
