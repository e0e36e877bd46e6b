use crate::editor::Editor;
use canvas::{Interaction, MouseButton, Path, PointerEvent, Surface};
use gpui::{
    point, px, size, App, Bounds, ContentMask, Corners, DispatchPhase, Element, ElementId, Entity,
    Hitbox, Hsla, IntoElement, MouseDownEvent, MouseMoveEvent, MouseUpEvent, PathBuilder,
    Pixels, Point, RenderImage, Rgba, Style, Window,
};
use log::{trace, warn};
use schematic::{CanvasBounds, CanvasPoint, CanvasSize, ImageAsset};
use std::collections::HashMap;
use std::sync::Arc;
use theme::Color;

pub fn hsla(color: Color) -> Hsla {
    Rgba {
        r: color.red as f32 / 255.0,
        g: color.green as f32 / 255.0,
        b: color.blue as f32 / 255.0,
        a: color.alpha as f32 / 255.0,
    }
    .into()
}

/// A GPUI element that paints an [`Editor`]'s canvas and feeds it pointer
/// input.
pub struct SchemElement {
    editor: Entity<Editor>,
}

impl SchemElement {
    pub fn new(editor: Entity<Editor>) -> Self {
        Self { editor }
    }
}

impl IntoElement for SchemElement {
    type Element = Self;

    fn into_element(self) -> Self::Element {
        self
    }
}

pub struct SchemElementState {
    hitbox: Hitbox,
}

impl Element for SchemElement {
    type RequestLayoutState = ();
    type PrepaintState = SchemElementState;

    fn id(&self) -> Option<ElementId> {
        None
    }

    fn source_location(&self) -> Option<&'static std::panic::Location<'static>> {
        None
    }

    fn request_layout(
        &mut self,
        _id: Option<&gpui::GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        window: &mut Window,
        cx: &mut App,
    ) -> (gpui::LayoutId, Self::RequestLayoutState) {
        let mut style = Style::default();
        style.size.width = gpui::relative(1.).into();
        style.size.height = gpui::relative(1.).into();
        let layout_id = window.request_layout(style, None, cx);
        (layout_id, ())
    }

    fn prepaint(
        &mut self,
        _id: Option<&gpui::GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        window: &mut Window,
        cx: &mut App,
    ) -> Self::PrepaintState {
        let width: f32 = bounds.size.width.into();
        let height: f32 = bounds.size.height.into();
        self.editor.update(cx, |editor, _| {
            editor.resize(CanvasSize::new(width, height));
        });

        let hitbox = window.insert_hitbox(bounds, gpui::HitboxBehavior::BlockMouse);
        SchemElementState { hitbox }
    }

    fn paint(
        &mut self,
        _id: Option<&gpui::GlobalElementId>,
        _inspector_id: Option<&gpui::InspectorElementId>,
        bounds: Bounds<Pixels>,
        _request_layout: &mut Self::RequestLayoutState,
        prepaint: &mut Self::PrepaintState,
        window: &mut Window,
        cx: &mut App,
    ) {
        {
            let editor = self.editor.read(cx);
            window.with_content_mask(Some(ContentMask { bounds }), |window| {
                let mut surface = GpuiSurface {
                    window,
                    origin: bounds.origin,
                    background: hsla(editor.canvas.renderer().theme.canvas_background),
                    images: &editor.images,
                    arc_segments: editor.arc_segments,
                };
                editor.canvas.repaint(&mut surface);
            });
        }

        let hitbox = prepaint.hitbox.clone();

        window.on_mouse_event({
            let editor = self.editor.clone();
            let hitbox = hitbox.clone();
            move |event: &MouseDownEvent, phase, window, cx| {
                if phase == DispatchPhase::Bubble && hitbox.is_hovered(window) {
                    handle_mouse_down(&editor, event, bounds, cx);
                }
            }
        });

        window.on_mouse_event({
            let editor = self.editor.clone();
            let hitbox = hitbox.clone();
            move |event: &MouseMoveEvent, phase, window, cx| {
                let interaction = editor.read(cx).canvas.interaction();
                if phase == DispatchPhase::Bubble
                    && tracks_pointer(interaction, hitbox.is_hovered(window))
                {
                    let position = local_point(event.position, bounds);
                    editor.update(cx, |editor, cx| {
                        editor.handle_pointer(PointerEvent::Move(position), cx);
                    });
                }
            }
        });

        window.on_mouse_event({
            let editor = self.editor.clone();
            move |event: &MouseUpEvent, phase, window, cx| {
                let hovered = hitbox.is_hovered(window);
                let interaction = editor.read(cx).canvas.interaction();
                if phase == DispatchPhase::Bubble && tracks_pointer(interaction, hovered) {
                    handle_mouse_up(&editor, event, bounds, hovered, cx);
                }
            }
        });
    }
}

fn local_point(position: Point<Pixels>, bounds: Bounds<Pixels>) -> CanvasPoint {
    let x: f32 = (position.x - bounds.origin.x).into();
    let y: f32 = (position.y - bounds.origin.y).into();
    CanvasPoint::new(x, y)
}

/// Whether a move or release reaches the canvas. Outside the element only a
/// drag keeps following the pointer, so a release anywhere ends it.
fn tracks_pointer(interaction: Interaction, hovered: bool) -> bool {
    hovered || matches!(interaction, Interaction::Dragging(_))
}

fn button(button: gpui::MouseButton) -> MouseButton {
    match button {
        gpui::MouseButton::Left => MouseButton::Primary,
        gpui::MouseButton::Right => MouseButton::Secondary,
        _ => MouseButton::Other,
    }
}

fn handle_mouse_down(
    editor: &Entity<Editor>,
    event: &MouseDownEvent,
    bounds: Bounds<Pixels>,
    cx: &mut App,
) {
    let position = local_point(event.position, bounds);
    let button = button(event.button);

    // Right clicks belong to the canvas; keep them from reaching a context menu.
    if button == MouseButton::Secondary {
        cx.stop_propagation();
    }

    editor.update(cx, |editor, cx| {
        editor.handle_pointer(PointerEvent::Down { position, button }, cx);
    });
}

fn handle_mouse_up(
    editor: &Entity<Editor>,
    event: &MouseUpEvent,
    bounds: Bounds<Pixels>,
    hovered: bool,
    cx: &mut App,
) {
    if event.button != gpui::MouseButton::Left {
        return;
    }

    let position = local_point(event.position, bounds);
    editor.update(cx, |editor, cx| {
        editor.handle_pointer(PointerEvent::Up(position), cx);
        // A double click is reported after the release that completes it.
        if hovered && event.click_count == 2 {
            editor.handle_pointer(PointerEvent::DoubleClick(position), cx);
        }
    });
}

/// Paints canvas draw calls into a gpui window, offset to the element's
/// origin.
struct GpuiSurface<'a> {
    window: &'a mut Window,
    origin: Point<Pixels>,
    background: Hsla,
    images: &'a HashMap<String, Arc<RenderImage>>,
    arc_segments: usize,
}

impl GpuiSurface<'_> {
    fn to_window(&self, p: CanvasPoint) -> Point<Pixels> {
        point(self.origin.x + px(p.x()), self.origin.y + px(p.y()))
    }

    fn to_window_bounds(&self, bounds: CanvasBounds) -> Bounds<Pixels> {
        Bounds {
            origin: self.to_window(bounds.origin),
            size: size(px(bounds.size.width()), px(bounds.size.height())),
        }
    }

    fn paint(&mut self, mut builder: PathBuilder, path: &Path, close: bool, color: Color) {
        for polyline in path.flatten(self.arc_segments) {
            let mut points = polyline.into_iter();
            let Some(first) = points.next() else {
                continue;
            };
            builder.move_to(self.to_window(first));
            for p in points {
                builder.line_to(self.to_window(p));
            }
            if close {
                builder.close();
            }
        }

        match builder.build() {
            Ok(built) => self.window.paint_path(built, hsla(color)),
            Err(err) => warn!("Could not build path: {:?}", err),
        }
    }
}

impl Surface for GpuiSurface<'_> {
    fn clear(&mut self, bounds: CanvasBounds) {
        let bounds = self.to_window_bounds(bounds);
        self.window.paint_quad(gpui::fill(bounds, self.background));
    }

    fn draw_image(&mut self, image: &ImageAsset, origin: CanvasPoint) {
        let (Some(data), Some(image_size)) = (self.images.get(image.url()), image.size()) else {
            trace!("{} isn't decoded yet", image.url());
            return;
        };
        let bounds = Bounds {
            origin: self.to_window(origin),
            size: size(px(image_size.width as f32), px(image_size.height as f32)),
        };
        let painted = self
            .window
            .paint_image(bounds, Corners::default(), data.clone(), 0, false);
        if let Err(err) = painted {
            warn!("Failed to paint {}: {}", image.url(), err);
        }
    }

    fn fill_path(&mut self, path: &Path, color: Color) {
        self.paint(PathBuilder::fill(), path, true, color);
    }

    fn stroke_path(&mut self, path: &Path, color: Color, width: f32) {
        self.paint(PathBuilder::stroke(px(width)), path, false, color);
    }
}
