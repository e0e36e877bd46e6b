//! The schematic canvas.
//!
//! [`SchemCanvas`] owns the placed components, the selection and the
//! pointer interaction, and paints itself onto any host [`Surface`].

mod canvas;
pub mod config;
mod controller;
pub mod path;
pub mod render;
mod surface;

pub use canvas::{CanvasEvent, Interaction, SchemCanvas};
pub use config::{CanvasConfig, ConfigError};
pub use controller::{MouseButton, PointerEvent};
pub use path::{Path, PathCommand};
pub use render::{PaintSummary, Renderer};
pub use surface::Surface;
#[cfg(any(test, feature = "test-support"))]
pub use surface::{DrawCall, RecordingSurface};
// Re-export the data model for hosts that only depend on the canvas.
pub use schematic;
