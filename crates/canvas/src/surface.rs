use crate::path::Path;
use schematic::{CanvasBounds, CanvasPoint, ImageAsset};
use theme::Color;

/// A host drawing target.
///
/// Coordinates are canvas space; the host maps them onto whatever it draws
/// with.
pub trait Surface {
    /// Erase everything inside `bounds`.
    fn clear(&mut self, bounds: CanvasBounds);

    /// Draw `image` at its natural size with its top-left corner at `origin`.
    fn draw_image(&mut self, image: &ImageAsset, origin: CanvasPoint);

    fn fill_path(&mut self, path: &Path, color: Color);

    fn stroke_path(&mut self, path: &Path, color: Color, width: f32);
}

/// One call made on a [`RecordingSurface`].
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCall {
    Clear(CanvasBounds),
    Image { url: String, origin: CanvasPoint },
    Fill { path: Path, color: Color },
    Stroke { path: Path, color: Color, width: f32 },
}

/// A surface that records what was drawn, for assertions in tests.
#[cfg(any(test, feature = "test-support"))]
#[derive(Clone, Debug, Default)]
pub struct RecordingSurface {
    pub calls: Vec<DrawCall>,
}

#[cfg(any(test, feature = "test-support"))]
impl RecordingSurface {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drain the recorded calls.
    pub fn take(&mut self) -> Vec<DrawCall> {
        std::mem::take(&mut self.calls)
    }

    pub fn images(&self) -> Vec<(&str, CanvasPoint)> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Image { url, origin } => Some((url.as_str(), *origin)),
                _ => None,
            })
            .collect()
    }

    pub fn strokes(&self) -> Vec<&Path> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Stroke { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }

    pub fn fills(&self) -> Vec<&Path> {
        self.calls
            .iter()
            .filter_map(|call| match call {
                DrawCall::Fill { path, .. } => Some(path),
                _ => None,
            })
            .collect()
    }
}

#[cfg(any(test, feature = "test-support"))]
impl Surface for RecordingSurface {
    fn clear(&mut self, bounds: CanvasBounds) {
        self.calls.push(DrawCall::Clear(bounds));
    }

    fn draw_image(&mut self, image: &ImageAsset, origin: CanvasPoint) {
        self.calls.push(DrawCall::Image {
            url: image.url().to_string(),
            origin,
        });
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.calls.push(DrawCall::Fill {
            path: path.clone(),
            color,
        });
    }

    fn stroke_path(&mut self, path: &Path, color: Color, width: f32) {
        self.calls.push(DrawCall::Stroke {
            path: path.clone(),
            color,
            width,
        });
    }
}
