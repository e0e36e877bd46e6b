//! Coordinate types for the schematic canvas.
//!
//! Everything the core touches is in canvas space: pixels relative to the
//! drawing surface's top-left corner. Hosts translate window or screen
//! positions before handing events to the canvas.

use glam::Vec2;
use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// Position in canvas space.
///
/// Component positions are their centers; pointer positions are where the
/// pointer is on the surface.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasPoint(pub Vec2);

/// Width and height in canvas space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CanvasSize(pub Vec2);

/// Pixel dimensions of a loaded image.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct ImageSize {
    pub width: u32,
    pub height: u32,
}

/// Axis-aligned box in canvas space, `origin` being the top-left corner.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct CanvasBounds {
    pub origin: CanvasPoint,
    pub size: CanvasSize,
}

// === CanvasPoint ===

impl CanvasPoint {
    pub fn new(x: f32, y: f32) -> Self {
        Self(Vec2::new(x, y))
    }

    pub fn x(&self) -> f32 {
        self.0.x
    }

    pub fn y(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for CanvasPoint {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<CanvasPoint> for Vec2 {
    fn from(p: CanvasPoint) -> Self {
        p.0
    }
}

impl Add<Vec2> for CanvasPoint {
    type Output = CanvasPoint;

    fn add(self, offset: Vec2) -> Self::Output {
        CanvasPoint(self.0 + offset)
    }
}

impl Sub<Vec2> for CanvasPoint {
    type Output = CanvasPoint;

    fn sub(self, offset: Vec2) -> Self::Output {
        CanvasPoint(self.0 - offset)
    }
}

// === CanvasSize ===

impl CanvasSize {
    pub fn new(width: f32, height: f32) -> Self {
        Self(Vec2::new(width, height))
    }

    pub fn width(&self) -> f32 {
        self.0.x
    }

    pub fn height(&self) -> f32 {
        self.0.y
    }
}

impl From<Vec2> for CanvasSize {
    fn from(v: Vec2) -> Self {
        Self(v)
    }
}

impl From<CanvasSize> for Vec2 {
    fn from(s: CanvasSize) -> Self {
        s.0
    }
}

// === ImageSize ===

impl ImageSize {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Half the width and height, rounded down to whole pixels.
    ///
    /// Images are positioned by their center, and the top-left corner is
    /// always snapped to a whole pixel.
    pub fn half_extents(&self) -> Vec2 {
        Vec2::new((self.width / 2) as f32, (self.height / 2) as f32)
    }

    pub fn to_canvas_size(&self) -> CanvasSize {
        CanvasSize::new(self.width as f32, self.height as f32)
    }
}

// === CanvasBounds ===

impl CanvasBounds {
    pub fn new(origin: CanvasPoint, size: CanvasSize) -> Self {
        Self { origin, size }
    }

    pub fn min(&self) -> CanvasPoint {
        self.origin
    }

    pub fn max(&self) -> CanvasPoint {
        self.origin + self.size.0
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, point: CanvasPoint) -> bool {
        let (min, max) = (self.min(), self.max());
        point.x() >= min.x() && point.x() <= max.x() && point.y() >= min.y() && point.y() <= max.y()
    }
}
