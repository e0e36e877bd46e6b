//! The join graph: wires between components.
//!
//! Joins form an undirected simple graph stored as adjacency lists on each
//! component. Every operation here keeps both endpoints' lists in step, so
//! an edge is always recorded on both sides or on neither.

use crate::component::{Component, ComponentId};
use crate::scene::Scene;
use log::{debug, trace};
use smallvec::SmallVec;
use std::collections::HashSet;

/// What [`Scene::toggle_join`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum JoinChange {
    Joined,
    Unjoined,
    /// The request was invalid: same component twice, or one end missing.
    Unchanged,
}

impl Scene {
    /// Join two components. No-op (returning `false`) if they are the same
    /// component, either is not in the scene, or they are already joined.
    pub fn join(&mut self, a: ComponentId, b: ComponentId) -> bool {
        if !self.valid_pair(a, b) {
            return false;
        }
        if self.components[a].is_joined_to(b) {
            trace!("{a} and {b} are already joined");
            return false;
        }

        self.components[a].add_join(b);
        self.components[b].add_join(a);
        debug!("Joined {a} and {b}");
        true
    }

    /// Remove the join between two components. No-op (returning `false`)
    /// if they are the same component, either is missing, or they are not
    /// joined.
    pub fn unjoin(&mut self, a: ComponentId, b: ComponentId) -> bool {
        if !self.valid_pair(a, b) {
            return false;
        }
        if !self.components[a].is_joined_to(b) {
            trace!("{a} and {b} are not joined");
            return false;
        }

        self.components[a].remove_join(b);
        self.components[b].remove_join(a);
        debug!("Unjoined {a} and {b}");
        true
    }

    /// Join the pair if they aren't joined, unjoin them if they are.
    pub fn toggle_join(&mut self, a: ComponentId, b: ComponentId) -> JoinChange {
        if !self.valid_pair(a, b) {
            JoinChange::Unchanged
        } else if self.is_joined(a, b) {
            self.unjoin(a, b);
            JoinChange::Unjoined
        } else {
            self.join(a, b);
            JoinChange::Joined
        }
    }

    pub fn is_joined(&self, a: ComponentId, b: ComponentId) -> bool {
        self.get(a).is_some_and(|component| component.is_joined_to(b))
    }

    /// Walk components in draw order together with the joins each one is
    /// responsible for drawing.
    ///
    /// A component draws its joins to every peer that hasn't been walked
    /// yet, so each edge comes up exactly once: at whichever endpoint was
    /// added first.
    pub fn edge_walk(&self) -> EdgeWalk<'_> {
        EdgeWalk {
            scene: self,
            next: 0,
            drawn: HashSet::with_capacity(self.len()),
        }
    }

    /// Every join, once each, ordered by the endpoint added first.
    pub fn edges(&self) -> Vec<(ComponentId, ComponentId)> {
        self.edge_walk()
            .flat_map(|(from, peers)| peers.into_iter().map(move |to| (from.id(), to.id())))
            .collect()
    }

    fn valid_pair(&self, a: ComponentId, b: ComponentId) -> bool {
        if a == b {
            trace!("Ignoring join of {a} with itself");
            return false;
        }
        if !self.contains(a) || !self.contains(b) {
            trace!("Ignoring join of {a} and {b}: not both in the scene");
            return false;
        }
        true
    }
}

/// Iterator returned by [`Scene::edge_walk`].
pub struct EdgeWalk<'a> {
    scene: &'a Scene,
    next: usize,
    drawn: HashSet<ComponentId>,
}

impl<'a> Iterator for EdgeWalk<'a> {
    type Item = (&'a Component, SmallVec<[&'a Component; 4]>);

    fn next(&mut self) -> Option<Self::Item> {
        let scene = self.scene;
        let id = *scene.order.get(self.next)?;
        self.next += 1;

        let component = &scene.components[id];
        let peers = component
            .joins()
            .iter()
            .filter(|peer| !self.drawn.contains(*peer))
            .filter_map(|peer| scene.get(*peer))
            .collect();
        self.drawn.insert(id);

        Some((component, peers))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::asset::ImageAsset;
    use crate::catalog::Prototype;
    use crate::coords::{CanvasPoint, ImageSize};
    use crate::kind::ComponentKind;
    use std::rc::Rc;

    fn scene_with(count: usize) -> (Scene, Vec<ComponentId>) {
        let led = Rc::new(Prototype {
            kind: ComponentKind::Led,
            image: ImageAsset::ready("led.png", ImageSize::new(20, 20)),
        });
        let mut scene = Scene::new();
        let ids = (0..count)
            .map(|i| scene.add_component(led.clone(), CanvasPoint::new(i as f32 * 50.0, 0.0)))
            .collect();
        (scene, ids)
    }

    fn assert_symmetric(scene: &Scene) {
        for component in scene.iter() {
            for peer in component.joins() {
                assert!(
                    scene.get(*peer).unwrap().is_joined_to(component.id()),
                    "{} -> {} has no reverse edge",
                    component.id(),
                    peer
                );
            }
        }
    }

    #[test]
    fn test_join_is_symmetric() {
        let (mut scene, ids) = scene_with(2);
        let (a, b) = (ids[0], ids[1]);

        assert!(scene.join(a, b));
        assert!(scene.get(a).unwrap().is_joined_to(b));
        assert!(scene.get(b).unwrap().is_joined_to(a));
        assert_symmetric(&scene);

        assert!(scene.unjoin(b, a));
        assert!(!scene.is_joined(a, b));
        assert!(!scene.is_joined(b, a));
    }

    #[test]
    fn test_invalid_requests_are_no_ops() {
        let (mut scene, ids) = scene_with(2);
        let (a, b) = (ids[0], ids[1]);

        assert!(!scene.join(a, a));
        assert!(scene.get(a).unwrap().joins().is_empty());

        assert!(!scene.unjoin(a, b));

        assert!(scene.join(a, b));
        assert!(!scene.join(a, b));
        assert!(!scene.join(b, a));
        assert_eq!(scene.get(a).unwrap().joins(), &[b]);
        assert_eq!(scene.get(b).unwrap().joins(), &[a]);

        let (_, foreign) = scene_with(3);
        assert!(!scene.join(a, foreign[2]));
        assert_eq!(scene.toggle_join(a, foreign[2]), JoinChange::Unchanged);
        assert_eq!(scene.toggle_join(a, a), JoinChange::Unchanged);
        assert_symmetric(&scene);
    }

    #[test]
    fn test_toggle_flips_the_edge() {
        let (mut scene, ids) = scene_with(2);
        assert_eq!(scene.toggle_join(ids[0], ids[1]), JoinChange::Joined);
        assert!(scene.is_joined(ids[1], ids[0]));
        assert_eq!(scene.toggle_join(ids[1], ids[0]), JoinChange::Unjoined);
        assert!(!scene.is_joined(ids[0], ids[1]));
    }

    #[test]
    fn test_each_edge_is_walked_once() {
        let (mut scene, ids) = scene_with(3);
        let (a, b, c) = (ids[0], ids[1], ids[2]);
        scene.join(a, b);
        scene.join(b, c);

        assert_eq!(scene.edges(), vec![(a, b), (b, c)]);
    }

    #[test]
    fn test_edges_are_owned_by_the_earlier_endpoint() {
        let (mut scene, ids) = scene_with(4);
        let (a, b, c, d) = (ids[0], ids[1], ids[2], ids[3]);
        scene.join(d, a);
        scene.join(c, b);
        scene.join(c, a);
        scene.join(b, d);

        let walk: Vec<(ComponentId, Vec<ComponentId>)> = scene
            .edge_walk()
            .map(|(from, peers)| (from.id(), peers.iter().map(|p| p.id()).collect()))
            .collect();
        assert_eq!(
            walk,
            vec![(a, vec![d, c]), (b, vec![c, d]), (c, vec![]), (d, vec![])]
        );
        assert_eq!(scene.edges().len(), 4);
    }

    #[test]
    fn test_triangle_has_three_edges() {
        let (mut scene, ids) = scene_with(3);
        scene.join(ids[0], ids[1]);
        scene.join(ids[1], ids[2]);
        scene.join(ids[2], ids[0]);
        assert_eq!(scene.edges().len(), 3);
        assert_symmetric(&scene);
    }
}
