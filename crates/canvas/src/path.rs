//! Simple vector paths for the selection highlight and wires.
//!
//! Paths follow the 2D canvas model: a current point, straight segments and
//! `arc_to` corners that round off the turn between two segments.

use glam::Vec2;
use schematic::{CanvasBounds, CanvasPoint};
use std::f32::consts::PI;

#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PathCommand {
    MoveTo(CanvasPoint),
    LineTo(CanvasPoint),
    /// Round the corner at `corner` with an arc of `radius`, tangent to the
    /// segment from the current point to `corner` and the one from `corner`
    /// to `to`. The current point ends on the second segment.
    ArcTo {
        corner: CanvasPoint,
        to: CanvasPoint,
        radius: f32,
    },
    Close,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Path {
    commands: Vec<PathCommand>,
}

impl Path {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn move_to(mut self, point: CanvasPoint) -> Self {
        self.commands.push(PathCommand::MoveTo(point));
        self
    }

    pub fn line_to(mut self, point: CanvasPoint) -> Self {
        self.commands.push(PathCommand::LineTo(point));
        self
    }

    pub fn arc_to(mut self, corner: CanvasPoint, to: CanvasPoint, radius: f32) -> Self {
        self.commands.push(PathCommand::ArcTo { corner, to, radius });
        self
    }

    pub fn close(mut self) -> Self {
        self.commands.push(PathCommand::Close);
        self
    }

    /// A straight segment.
    pub fn line(from: CanvasPoint, to: CanvasPoint) -> Self {
        Self::new().move_to(from).line_to(to)
    }

    /// A rectangle with rounded corners.
    ///
    /// The radius is clamped to half the width and half the height so the
    /// corners never overlap.
    pub fn rounded_rect(bounds: CanvasBounds, radius: f32) -> Self {
        let (x, y) = (bounds.origin.x(), bounds.origin.y());
        let (w, h) = (bounds.size.width(), bounds.size.height());
        let mut r = radius.max(0.0);
        if w < 2.0 * r {
            r = w / 2.0;
        }
        if h < 2.0 * r {
            r = h / 2.0;
        }

        Self::new()
            .move_to(CanvasPoint::new(x + r, y))
            .arc_to(CanvasPoint::new(x + w, y), CanvasPoint::new(x + w, y + h), r)
            .arc_to(CanvasPoint::new(x + w, y + h), CanvasPoint::new(x, y + h), r)
            .arc_to(CanvasPoint::new(x, y + h), CanvasPoint::new(x, y), r)
            .arc_to(CanvasPoint::new(x, y), CanvasPoint::new(x + w, y), r)
            .close()
    }

    pub fn commands(&self) -> &[PathCommand] {
        &self.commands
    }

    pub fn is_empty(&self) -> bool {
        self.commands.is_empty()
    }

    /// Convert to polylines, one per subpath, approximating each arc with
    /// `arc_segments` straight segments.
    ///
    /// For hosts whose path API has no equivalent of `arc_to`. Closed
    /// subpaths end with their starting point.
    pub fn flatten(&self, arc_segments: usize) -> Vec<Vec<CanvasPoint>> {
        let segments = arc_segments.max(1);
        let mut polylines: Vec<Vec<CanvasPoint>> = Vec::new();
        let mut current: Vec<CanvasPoint> = Vec::new();

        for command in &self.commands {
            match *command {
                PathCommand::MoveTo(point) => {
                    if current.len() > 1 {
                        polylines.push(std::mem::take(&mut current));
                    }
                    current.clear();
                    current.push(point);
                }
                PathCommand::LineTo(point) => current.push(point),
                PathCommand::ArcTo { corner, to, radius } => match current.last().copied() {
                    Some(from) => flatten_arc(from, corner, to, radius, segments, &mut current),
                    None => current.push(corner),
                },
                PathCommand::Close => {
                    if let Some(first) = current.first().copied() {
                        current.push(first);
                        polylines.push(std::mem::take(&mut current));
                        current.push(first);
                    }
                }
            }
        }
        if current.len() > 1 {
            polylines.push(current);
        }
        polylines
    }
}

/// Append the points of an `arc_to` from `from` to `out`.
fn flatten_arc(
    from: CanvasPoint,
    corner: CanvasPoint,
    to: CanvasPoint,
    radius: f32,
    segments: usize,
    out: &mut Vec<CanvasPoint>,
) {
    let p1 = corner.0;
    let v1 = (from.0 - p1).normalize_or_zero();
    let v2 = (to.0 - p1).normalize_or_zero();

    // Degenerate corners collapse to a straight line to the corner.
    if radius <= 0.0 || v1 == Vec2::ZERO || v2 == Vec2::ZERO || v1.perp_dot(v2).abs() < 1e-6 {
        out.push(corner);
        return;
    }

    let theta = v1.dot(v2).clamp(-1.0, 1.0).acos();
    let tangent_distance = radius / (theta / 2.0).tan();
    let t1 = p1 + v1 * tangent_distance;
    let t2 = p1 + v2 * tangent_distance;
    let center = p1 + (v1 + v2).normalize() * (radius / (theta / 2.0).sin());

    if (t1 - from.0).length_squared() > f32::EPSILON {
        out.push(CanvasPoint(t1));
    }

    let start = (t1 - center).to_angle();
    let mut sweep = (t2 - center).to_angle() - start;
    if sweep > PI {
        sweep -= 2.0 * PI;
    } else if sweep <= -PI {
        sweep += 2.0 * PI;
    }

    for step in 1..segments {
        let angle = start + sweep * step as f32 / segments as f32;
        out.push(CanvasPoint(center + Vec2::from_angle(angle) * radius));
    }
    out.push(CanvasPoint(t2));
}
