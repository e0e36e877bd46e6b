//! Data model for the schematic editor.
//!
//! Component kinds and their shared image assets live in a [`Catalog`];
//! placed components are [`Component`] instances that point back at their
//! kind's [`Prototype`] while owning their own position and joins. The
//! [`Scene`] holds placed components in draw order and maintains the join
//! graph between them.

pub mod asset;
mod catalog;
mod component;
pub mod coords;
mod joins;
mod kind;
mod latch;
pub mod loader;
mod scene;

pub use asset::{AssetError, ImageAsset};
pub use catalog::{Catalog, Prototype};
pub use component::{Component, ComponentId, Joins};
pub use coords::{CanvasBounds, CanvasPoint, CanvasSize, ImageSize};
pub use joins::{EdgeWalk, JoinChange};
pub use kind::ComponentKind;
pub use latch::Latch;
pub use loader::{AssetLoader, ManualLoader, StaticLoader};
pub use scene::Scene;
