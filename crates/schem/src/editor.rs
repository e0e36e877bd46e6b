use crate::element::{hsla, SchemElement};
use crate::images::decode;
use canvas::{CanvasEvent, PointerEvent, SchemCanvas};
use gpui::{
    div, prelude::*, App, Context, FocusHandle, Focusable, IntoElement, RenderImage, Styled,
    Window,
};
use log::{debug, info};
use schematic::{CanvasSize, ImageAsset};
use std::collections::HashMap;
use std::sync::Arc;

/// The window's root view: a schematic canvas plus the decoded images it
/// paints with.
pub struct Editor {
    pub(crate) canvas: SchemCanvas,
    /// Decoded images keyed by asset URL.
    pub(crate) images: HashMap<String, Arc<RenderImage>>,
    pub(crate) arc_segments: usize,
    focus_handle: FocusHandle,
}

impl Editor {
    pub fn new(
        canvas: SchemCanvas,
        pending: Vec<ImageAsset>,
        arc_segments: usize,
        cx: &mut Context<Self>,
    ) -> Self {
        canvas.on_ready(|| info!("Component images loaded"));
        for asset in pending {
            Self::decode_in_background(asset, cx);
        }

        Self {
            canvas,
            images: HashMap::new(),
            arc_segments,
            focus_handle: cx.focus_handle(),
        }
    }

    /// Decode `asset` off the main thread, then settle it and repaint.
    fn decode_in_background(asset: ImageAsset, cx: &mut Context<Self>) {
        let url = asset.url().to_string();
        cx.spawn(async move |this, cx| {
            let decoded = cx
                .background_executor()
                .spawn({
                    let url = url.clone();
                    async move { decode(&url) }
                })
                .await;

            this.update(cx, |editor, cx| {
                let result = decoded.map(|decoded| {
                    editor.images.insert(url, decoded.image);
                    decoded.size
                });
                asset.finish(result);
                cx.notify();
            })
            .ok();
        })
        .detach();
    }

    pub fn handle_pointer(&mut self, event: PointerEvent, cx: &mut Context<Self>) {
        self.canvas.handle_event(event);
        self.flush_events(cx);
    }

    /// Track the element's size. Called while painting, so the repaint the
    /// canvas asks for is already underway.
    pub fn resize(&mut self, size: CanvasSize) {
        self.canvas.set_size(size);
        for event in self.canvas.take_events() {
            if event != CanvasEvent::RepaintRequested {
                debug!("{:?}", event);
            }
        }
    }

    fn flush_events(&mut self, cx: &mut Context<Self>) {
        let mut repaint = false;
        for event in self.canvas.take_events() {
            match event {
                CanvasEvent::RepaintRequested => repaint = true,
                other => debug!("{:?}", other),
            }
        }
        if repaint {
            cx.notify();
        }
    }
}

impl Render for Editor {
    fn render(&mut self, _window: &mut Window, cx: &mut Context<Self>) -> impl IntoElement {
        div()
            .id("schem")
            .key_context("schem")
            .track_focus(&self.focus_handle)
            .size_full()
            .bg(hsla(self.canvas.renderer().theme.canvas_background))
            .child(SchemElement::new(cx.entity()))
    }
}

impl Focusable for Editor {
    fn focus_handle(&self, _cx: &App) -> FocusHandle {
        self.focus_handle.clone()
    }
}
