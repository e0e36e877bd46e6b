use crate::asset::ImageAsset;
use crate::catalog::Prototype;
use crate::coords::{CanvasBounds, CanvasPoint, CanvasSize};
use crate::kind::ComponentKind;
use slotmap::{Key, KeyData};
use smallvec::SmallVec;
use std::fmt::{self, Display};
use std::rc::Rc;

slotmap::new_key_type! {
    /// Identifies a placed component within its scene.
    pub struct ComponentId;
}

impl ComponentId {
    pub fn as_u64(self) -> u64 {
        self.data().as_ffi()
    }
}

impl From<u64> for ComponentId {
    fn from(value: u64) -> Self {
        Self(KeyData::from_ffi(value))
    }
}

impl Display for ComponentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_u64())
    }
}

/// A component's joined peers, in the order they were joined.
pub type Joins = SmallVec<[ComponentId; 4]>;

/// A placed component.
///
/// Kind data (the image) is shared with every other component of the same
/// kind through the prototype; position and joins belong to this instance.
#[derive(Debug, Clone)]
pub struct Component {
    id: ComponentId,
    prototype: Rc<Prototype>,
    /// Center of the component in canvas space.
    pub position: CanvasPoint,
    joins: Joins,
}

impl Component {
    pub fn new(id: ComponentId, prototype: Rc<Prototype>, position: CanvasPoint) -> Self {
        Self {
            id,
            prototype,
            position,
            joins: Joins::new(),
        }
    }

    pub fn id(&self) -> ComponentId {
        self.id
    }

    pub fn kind(&self) -> ComponentKind {
        self.prototype.kind
    }

    pub fn image(&self) -> &ImageAsset {
        &self.prototype.image
    }

    pub fn joins(&self) -> &[ComponentId] {
        &self.joins
    }

    pub fn is_joined_to(&self, other: ComponentId) -> bool {
        self.joins.contains(&other)
    }

    /// Where the image's top-left corner goes. `None` until it has loaded.
    pub fn image_origin(&self) -> Option<CanvasPoint> {
        let size = self.image().size()?;
        Some(self.position - size.half_extents())
    }

    /// The full image rectangle, used for drawing and highlighting.
    pub fn image_bounds(&self) -> Option<CanvasBounds> {
        let size = self.image().size()?;
        Some(CanvasBounds::new(
            self.position - size.half_extents(),
            size.to_canvas_size(),
        ))
    }

    /// The clickable box: the half extents either side of the center.
    ///
    /// Matches [`Component::image_bounds`] for even image sizes; for odd
    /// sizes the last pixel row/column is not clickable.
    pub fn hit_bounds(&self) -> Option<CanvasBounds> {
        let half = self.image().size()?.half_extents();
        Some(CanvasBounds::new(
            self.position - half,
            CanvasSize::from(half * 2.0),
        ))
    }

    /// Whether `point` falls on the component. Always `false` while its image
    /// is unavailable.
    pub fn contains_point(&self, point: CanvasPoint) -> bool {
        self.hit_bounds().is_some_and(|bounds| bounds.contains(point))
    }

    pub(crate) fn add_join(&mut self, other: ComponentId) -> bool {
        if self.joins.contains(&other) {
            return false;
        }
        self.joins.push(other);
        true
    }

    pub(crate) fn remove_join(&mut self, other: ComponentId) -> bool {
        match self.joins.iter().position(|id| *id == other) {
            Some(index) => {
                self.joins.remove(index);
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ImageSize;

    fn led(position: CanvasPoint, size: Option<ImageSize>) -> Component {
        let image = match size {
            Some(size) => ImageAsset::ready("led.png", size),
            None => ImageAsset::pending("led.png"),
        };
        let prototype = Rc::new(Prototype {
            kind: ComponentKind::Led,
            image,
        });
        Component::new(ComponentId::null(), prototype, position)
    }

    #[test]
    fn test_hit_box_is_inclusive_and_centered() {
        let c = led(CanvasPoint::new(100.0, 100.0), Some(ImageSize::new(20, 20)));
        assert!(c.contains_point(CanvasPoint::new(90.0, 90.0)));
        assert!(c.contains_point(CanvasPoint::new(110.0, 110.0)));
        assert!(!c.contains_point(CanvasPoint::new(79.0, 90.0)));
        assert!(!c.contains_point(CanvasPoint::new(89.0, 90.0)));
    }

    #[test]
    fn test_odd_sizes_snap_the_origin_down() {
        let c = led(CanvasPoint::new(50.0, 50.0), Some(ImageSize::new(21, 11)));
        assert_eq!(c.image_origin(), Some(CanvasPoint::new(40.0, 45.0)));
        let image = c.image_bounds().unwrap();
        assert_eq!(image.size, CanvasSize::new(21.0, 11.0));
        let hit = c.hit_bounds().unwrap();
        assert_eq!(hit.max(), CanvasPoint::new(60.0, 55.0));
    }

    #[test]
    fn test_no_geometry_before_the_image_loads() {
        let c = led(CanvasPoint::new(0.0, 0.0), None);
        assert_eq!(c.image_bounds(), None);
        assert!(!c.contains_point(CanvasPoint::new(0.0, 0.0)));

        c.image().finish(Ok(ImageSize::new(4, 4)));
        assert!(c.contains_point(CanvasPoint::new(0.0, 0.0)));
    }

    #[test]
    fn test_joins_keep_insertion_order_without_duplicates() {
        let mut c = led(CanvasPoint::default(), None);
        let a = ComponentId::from(1u64 << 32 | 1);
        let b = ComponentId::from(2u64 << 32 | 1);
        assert!(c.add_join(b));
        assert!(c.add_join(a));
        assert!(!c.add_join(b));
        assert_eq!(c.joins(), &[b, a]);
        assert!(c.remove_join(b));
        assert!(!c.remove_join(b));
        assert_eq!(c.joins(), &[a]);
    }
}
