//! Pointer input.
//!
//! Turns host pointer events into placing, selecting, dragging and joining
//! components. Every handler runs to completion synchronously; the host
//! repaints when it sees [`CanvasEvent::RepaintRequested`](crate::CanvasEvent).

use crate::canvas::{Interaction, SchemCanvas};
use log::{debug, trace, warn};
use schematic::CanvasPoint;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum MouseButton {
    Primary,
    Secondary,
    Other,
}

/// Pointer input in canvas coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PointerEvent {
    DoubleClick(CanvasPoint),
    Down {
        position: CanvasPoint,
        button: MouseButton,
    },
    Move(CanvasPoint),
    Up(CanvasPoint),
}

impl SchemCanvas {
    pub fn handle_event(&mut self, event: PointerEvent) {
        match event {
            PointerEvent::DoubleClick(position) => self.handle_double_click(position),
            PointerEvent::Down {
                position,
                button: MouseButton::Primary,
            } => self.handle_primary_down(position),
            PointerEvent::Down {
                position,
                button: MouseButton::Secondary,
            } => self.handle_secondary_down(position),
            PointerEvent::Down {
                button: MouseButton::Other,
                ..
            } => trace!("Ignoring press of an unbound button"),
            PointerEvent::Move(position) => self.handle_move(position),
            PointerEvent::Up(_) => self.handle_up(),
        }
    }

    /// Place a new component and select it.
    fn handle_double_click(&mut self, at: CanvasPoint) {
        if let Interaction::Dragging(target) = self.interaction {
            debug!("Double click ended the drag of {}", target);
            self.interaction = Interaction::Idle;
        }

        if let Some(id) = self.add_component(self.default_kind, at) {
            self.select(id);
            self.request_repaint();
        }
    }

    /// Select the component under the pointer and start dragging it, or
    /// clear the selection when clicking empty canvas.
    fn handle_primary_down(&mut self, at: CanvasPoint) {
        match self.scene.hit_test(at) {
            Some(id) => {
                // Snap the component's center under the cursor.
                self.move_component(id, at);
                self.select(id);
                self.request_repaint();
                self.interaction = Interaction::Dragging(id);
                debug!("Dragging {}", id);
            }
            None if self.selected.is_some() => {
                self.clear_selection();
                self.request_repaint();
            }
            None => trace!("Click on empty canvas with nothing selected"),
        }
    }

    /// Toggle the wire between the selection and the component under the
    /// pointer. Never changes the selection or the drag.
    fn handle_secondary_down(&mut self, at: CanvasPoint) {
        let Some(anchor) = self.selected else {
            trace!("Secondary click with nothing selected");
            return;
        };
        let Some(target) = self.scene.hit_test(at) else {
            trace!("Secondary click on empty canvas");
            return;
        };
        if target == anchor {
            trace!("Secondary click on the selection itself");
            return;
        }

        self.toggle_join(anchor, target);
        self.request_repaint();
    }

    fn handle_move(&mut self, to: CanvasPoint) {
        let Interaction::Dragging(target) = self.interaction else {
            return;
        };

        if self.move_component(target, to) {
            self.request_repaint();
        } else {
            warn!("Drag target {} is gone; ending drag", target);
            self.interaction = Interaction::Idle;
        }
    }

    fn handle_up(&mut self) {
        if let Interaction::Dragging(target) = self.interaction {
            debug!("Finished dragging {}", target);
            self.interaction = Interaction::Idle;
        }
    }
}
