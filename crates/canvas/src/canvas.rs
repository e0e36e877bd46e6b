use crate::config::{CanvasConfig, ConfigError};
use crate::render::{PaintSummary, Renderer};
use crate::surface::Surface;
use log::{debug, info, warn};
use schematic::{CanvasPoint, CanvasSize, Catalog, ComponentId, ComponentKind, JoinChange, Scene};
use std::rc::Rc;

/// Events emitted by the canvas.
///
/// Hosts drain them with [`SchemCanvas::take_events`] after feeding input.
#[derive(Clone, Debug, PartialEq)]
pub enum CanvasEvent {
    ComponentAdded(ComponentId),
    ComponentMoved(ComponentId),
    SelectionChanged(Option<ComponentId>),
    JoinChanged {
        a: ComponentId,
        b: ComponentId,
        joined: bool,
    },
    /// The canvas needs to be painted again.
    RepaintRequested,
}

/// Transient pointer state.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Interaction {
    #[default]
    Idle,
    /// The primary button is held on a component; moves drag it.
    Dragging(ComponentId),
}

/// A schematic canvas: placed components, the current selection and the
/// pointer interaction on top of them.
pub struct SchemCanvas {
    pub(crate) scene: Scene,
    pub(crate) catalog: Rc<Catalog>,

    /// The join anchor and drag target.
    pub(crate) selected: Option<ComponentId>,

    pub(crate) interaction: Interaction,

    /// Kind placed by a double click.
    pub(crate) default_kind: ComponentKind,

    pub(crate) renderer: Renderer,

    /// Size of the drawing surface.
    pub(crate) size: CanvasSize,

    events: Vec<CanvasEvent>,
}

impl SchemCanvas {
    pub fn new(catalog: Rc<Catalog>, config: &CanvasConfig) -> Result<Self, ConfigError> {
        let renderer = config.renderer()?;
        Ok(Self {
            scene: Scene::new(),
            catalog,
            selected: None,
            interaction: Interaction::Idle,
            default_kind: config.default_kind,
            renderer,
            size: CanvasSize::default(),
            events: Vec::new(),
        })
    }

    pub fn with_defaults(catalog: Rc<Catalog>) -> Self {
        Self {
            scene: Scene::new(),
            catalog,
            selected: None,
            interaction: Interaction::Idle,
            default_kind: ComponentKind::default(),
            renderer: Renderer::default(),
            size: CanvasSize::default(),
            events: Vec::new(),
        }
    }

    pub fn scene(&self) -> &Scene {
        &self.scene
    }

    pub fn selected(&self) -> Option<ComponentId> {
        self.selected
    }

    pub fn interaction(&self) -> Interaction {
        self.interaction
    }

    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    pub fn size(&self) -> CanvasSize {
        self.size
    }

    /// Resize the drawing surface. Requests a repaint when the size changes.
    pub fn set_size(&mut self, size: CanvasSize) {
        if self.size != size {
            self.size = size;
            self.request_repaint();
        }
    }

    /// Run `callback` once every component image has finished loading.
    pub fn on_ready(&self, callback: impl FnOnce() + 'static) {
        self.catalog.on_ready(callback);
    }

    /// Place a new component of `kind` centered at `at`.
    ///
    /// Returns `None` if the catalog has no such kind.
    pub fn add_component(&mut self, kind: ComponentKind, at: CanvasPoint) -> Option<ComponentId> {
        let Some(prototype) = self.catalog.prototype(kind) else {
            warn!("No {} in the catalog; nothing placed", kind);
            return None;
        };
        let id = self.scene.add_component(prototype, at);
        info!("Placed {} {} at ({}, {})", kind, id, at.x(), at.y());
        self.events.push(CanvasEvent::ComponentAdded(id));
        Some(id)
    }

    /// Move a component's center. Returns `false` if it isn't on the canvas.
    pub fn move_component(&mut self, id: ComponentId, to: CanvasPoint) -> bool {
        if !self.scene.set_position(id, to) {
            return false;
        }
        self.events.push(CanvasEvent::ComponentMoved(id));
        true
    }

    pub fn select(&mut self, id: ComponentId) {
        if self.selected != Some(id) && self.scene.contains(id) {
            self.selected = Some(id);
            debug!("Selected {}", id);
            self.events.push(CanvasEvent::SelectionChanged(self.selected));
        }
    }

    pub fn clear_selection(&mut self) {
        if self.selected.take().is_some() {
            debug!("Selection cleared");
            self.events.push(CanvasEvent::SelectionChanged(None));
        }
    }

    pub fn join(&mut self, a: ComponentId, b: ComponentId) -> bool {
        let joined = self.scene.join(a, b);
        if joined {
            self.events.push(CanvasEvent::JoinChanged { a, b, joined: true });
        }
        joined
    }

    pub fn unjoin(&mut self, a: ComponentId, b: ComponentId) -> bool {
        let unjoined = self.scene.unjoin(a, b);
        if unjoined {
            self.events.push(CanvasEvent::JoinChanged { a, b, joined: false });
        }
        unjoined
    }

    pub fn toggle_join(&mut self, a: ComponentId, b: ComponentId) -> JoinChange {
        let change = self.scene.toggle_join(a, b);
        match change {
            JoinChange::Joined => self.events.push(CanvasEvent::JoinChanged { a, b, joined: true }),
            JoinChange::Unjoined => {
                self.events.push(CanvasEvent::JoinChanged { a, b, joined: false })
            }
            JoinChange::Unchanged => {}
        }
        change
    }

    pub fn request_repaint(&mut self) {
        self.events.push(CanvasEvent::RepaintRequested);
    }

    /// Drain pending events, oldest first.
    pub fn take_events(&mut self) -> Vec<CanvasEvent> {
        std::mem::take(&mut self.events)
    }

    /// Clear `surface` and draw the whole canvas onto it.
    pub fn repaint(&self, surface: &mut dyn Surface) -> PaintSummary {
        self.renderer.paint(&self.scene, self.selected, self.size, surface)
    }
}
