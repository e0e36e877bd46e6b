//! The ordered collection of placed components.
//!
//! Insertion order is draw order: later components paint over earlier ones
//! and win hit tests.

use crate::catalog::Prototype;
use crate::component::{Component, ComponentId};
use crate::coords::CanvasPoint;
use log::debug;
use slotmap::SlotMap;
use std::rc::Rc;

#[derive(Debug, Default)]
pub struct Scene {
    pub(crate) components: SlotMap<ComponentId, Component>,
    /// Draw order, back to front.
    pub(crate) order: Vec<ComponentId>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Place a fresh component of `prototype`'s kind centered at `at`.
    pub fn add_component(&mut self, prototype: Rc<Prototype>, at: CanvasPoint) -> ComponentId {
        let kind = prototype.kind;
        let id = self
            .components
            .insert_with_key(|id| Component::new(id, prototype, at));
        self.order.push(id);
        debug!("Added {} {} at ({}, {})", kind, id, at.x(), at.y());
        id
    }

    pub fn get(&self, id: ComponentId) -> Option<&Component> {
        self.components.get(id)
    }

    pub fn get_mut(&mut self, id: ComponentId) -> Option<&mut Component> {
        self.components.get_mut(id)
    }

    pub fn contains(&self, id: ComponentId) -> bool {
        self.components.contains_key(id)
    }

    /// Recenter a component. Returns `false` if it isn't in the scene.
    pub fn set_position(&mut self, id: ComponentId, position: CanvasPoint) -> bool {
        match self.components.get_mut(id) {
            Some(component) => {
                component.position = position;
                true
            }
            None => false,
        }
    }

    /// Find the topmost component under `point`.
    ///
    /// Scans front to back, so when components overlap the most recently
    /// added one wins. Components whose image hasn't loaded are skipped.
    pub fn hit_test(&self, point: CanvasPoint) -> Option<ComponentId> {
        self.order
            .iter()
            .rev()
            .copied()
            .find(|id| self.components[*id].contains_point(point))
    }

    /// Components in draw order, back to front.
    pub fn iter(&self) -> impl Iterator<Item = &Component> + '_ {
        self.order.iter().map(move |id| &self.components[*id])
    }

    pub fn ids(&self) -> &[ComponentId] {
        &self.order
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}
