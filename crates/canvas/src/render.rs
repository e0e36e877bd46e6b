//! Repainting the scene.
//!
//! Every repaint draws the whole scene in a fixed order:
//! 1. clear the surface
//! 2. the selection highlight, behind everything
//! 3. each component's image in insertion order, each followed by the
//!    wires it owns (see [`Scene::edge_walk`])

use crate::path::Path;
use crate::surface::Surface;
use log::trace;
use schematic::{CanvasBounds, CanvasPoint, CanvasSize, Component, ComponentId, Scene};
use theme::Theme;

/// Corner radius of the selection highlight.
pub const DEFAULT_HIGHLIGHT_RADIUS: f32 = 5.0;

pub const DEFAULT_WIRE_WIDTH: f32 = 1.0;

/// What a repaint drew.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PaintSummary {
    pub highlighted: bool,
    pub images: usize,
    pub wires: usize,
}

#[derive(Clone, Debug, PartialEq)]
pub struct Renderer {
    pub theme: Theme,
    pub highlight_radius: f32,
    pub wire_width: f32,
}

impl Default for Renderer {
    fn default() -> Self {
        Self {
            theme: Theme::default(),
            highlight_radius: DEFAULT_HIGHLIGHT_RADIUS,
            wire_width: DEFAULT_WIRE_WIDTH,
        }
    }
}

impl Renderer {
    pub fn new(theme: Theme) -> Self {
        Self {
            theme,
            ..Self::default()
        }
    }

    pub fn paint(
        &self,
        scene: &Scene,
        selected: Option<ComponentId>,
        size: CanvasSize,
        surface: &mut dyn Surface,
    ) -> PaintSummary {
        let mut summary = PaintSummary::default();

        surface.clear(CanvasBounds::new(CanvasPoint::default(), size));

        if let Some(bounds) = selected
            .and_then(|id| scene.get(id))
            .and_then(Component::image_bounds)
        {
            let highlight = Path::rounded_rect(bounds, self.highlight_radius);
            surface.fill_path(&highlight, self.theme.highlight);
            summary.highlighted = true;
        }

        for (component, peers) in scene.edge_walk() {
            match component.image_origin() {
                Some(origin) => {
                    surface.draw_image(component.image(), origin);
                    summary.images += 1;
                }
                None => trace!("Skipping {}: image not loaded", component.id()),
            }

            for peer in peers {
                let wire = Path::line(component.position, peer.position);
                surface.stroke_path(&wire, self.theme.wire, self.wire_width);
                summary.wires += 1;
            }
        }

        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::{DrawCall, RecordingSurface};
    use schematic::{CanvasPoint, ComponentKind, ImageAsset, ImageSize, Prototype};
    use std::rc::Rc;

    fn led(image: ImageAsset) -> Rc<Prototype> {
        Rc::new(Prototype {
            kind: ComponentKind::Led,
            image,
        })
    }

    #[test]
    fn test_draw_order_is_clear_highlight_then_components() {
        let proto = led(ImageAsset::ready("led.png", ImageSize::new(20, 20)));
        let mut scene = Scene::new();
        let a = scene.add_component(proto.clone(), CanvasPoint::new(0.0, 0.0));
        let b = scene.add_component(proto, CanvasPoint::new(100.0, 0.0));
        scene.join(a, b);

        let mut surface = RecordingSurface::new();
        let summary = Renderer::default().paint(
            &scene,
            Some(b),
            CanvasSize::new(400.0, 300.0),
            &mut surface,
        );
        assert_eq!(
            summary,
            PaintSummary {
                highlighted: true,
                images: 2,
                wires: 1
            }
        );

        let calls = surface.take();
        assert_eq!(calls.len(), 5);
        assert_eq!(
            calls[0],
            DrawCall::Clear(CanvasBounds::new(
                CanvasPoint::new(0.0, 0.0),
                CanvasSize::new(400.0, 300.0)
            ))
        );
        assert!(matches!(calls[1], DrawCall::Fill { .. }));
        assert_eq!(
            calls[2],
            DrawCall::Image {
                url: "led.png".into(),
                origin: CanvasPoint::new(-10.0, -10.0)
            }
        );
        assert_eq!(
            calls[3],
            DrawCall::Stroke {
                path: Path::line(CanvasPoint::new(0.0, 0.0), CanvasPoint::new(100.0, 0.0)),
                color: Theme::light().wire,
                width: DEFAULT_WIRE_WIDTH,
            }
        );
        assert_eq!(
            calls[4],
            DrawCall::Image {
                url: "led.png".into(),
                origin: CanvasPoint::new(90.0, -10.0)
            }
        );
    }

    #[test]
    fn test_highlight_covers_the_selected_image() {
        let proto = led(ImageAsset::ready("led.png", ImageSize::new(20, 20)));
        let mut scene = Scene::new();
        let c = scene.add_component(proto, CanvasPoint::new(100.0, 100.0));

        let mut surface = RecordingSurface::new();
        Renderer::default().paint(&scene, Some(c), CanvasSize::new(200.0, 200.0), &mut surface);

        let expected = Path::rounded_rect(
            CanvasBounds::new(CanvasPoint::new(90.0, 90.0), CanvasSize::new(20.0, 20.0)),
            DEFAULT_HIGHLIGHT_RADIUS,
        );
        assert_eq!(surface.fills(), vec![&expected]);
        match &surface.calls[1] {
            DrawCall::Fill { color, .. } => assert_eq!(*color, Theme::light().highlight),
            other => panic!("expected highlight fill, got {other:?}"),
        }
    }

    #[test]
    fn test_unloaded_components_still_show_their_wires() {
        let pending = led(ImageAsset::pending("led.png"));
        let mut scene = Scene::new();
        let a = scene.add_component(pending.clone(), CanvasPoint::new(0.0, 0.0));
        let b = scene.add_component(pending, CanvasPoint::new(10.0, 10.0));
        scene.join(a, b);

        let mut surface = RecordingSurface::new();
        let summary =
            Renderer::default().paint(&scene, Some(a), CanvasSize::new(50.0, 50.0), &mut surface);
        assert!(!summary.highlighted);
        assert_eq!(summary.images, 0);
        assert_eq!(summary.wires, 1);
    }
}
