use crate::asset::ImageAsset;
use crate::kind::ComponentKind;
use crate::latch::Latch;
use crate::loader::AssetLoader;
use log::info;
use std::cell::Cell;
use std::rc::Rc;
use strum::IntoEnumIterator;

/// Immutable data shared by every component of one kind.
#[derive(Debug)]
pub struct Prototype {
    pub kind: ComponentKind,
    pub image: ImageAsset,
}

/// The fixed set of component kinds, each backed by one shared image.
///
/// Built once at startup and read-only afterwards.
#[derive(Debug)]
pub struct Catalog {
    prototypes: Vec<Rc<Prototype>>,
    ready: Latch<()>,
}

impl Catalog {
    /// Start loading the image of every known kind.
    pub fn load<L: AssetLoader + ?Sized>(loader: &mut L) -> Self {
        let prototypes: Vec<Rc<Prototype>> = ComponentKind::iter()
            .map(|kind| {
                info!("Loading {} image from {}", kind, kind.asset_path());
                Rc::new(Prototype {
                    kind,
                    image: loader.load(kind.asset_path()),
                })
            })
            .collect();

        let ready = Latch::new();
        let remaining = Rc::new(Cell::new(prototypes.len()));
        if prototypes.is_empty() {
            ready.trigger(());
        }
        for prototype in &prototypes {
            let remaining = remaining.clone();
            let ready = ready.clone();
            prototype.image.once_settled(move |_| {
                remaining.set(remaining.get().saturating_sub(1));
                if remaining.get() == 0 {
                    info!("All component images settled");
                    ready.trigger(());
                }
            });
        }

        Self { prototypes, ready }
    }

    pub fn prototype(&self, kind: ComponentKind) -> Option<Rc<Prototype>> {
        self.prototypes.iter().find(|p| p.kind == kind).cloned()
    }

    pub fn kinds(&self) -> impl Iterator<Item = ComponentKind> + '_ {
        self.prototypes.iter().map(|p| p.kind)
    }

    /// Whether every image has finished loading or failed.
    pub fn is_ready(&self) -> bool {
        self.ready.is_fired()
    }

    /// Run `callback` once every image has settled, or right away if they
    /// all have.
    pub fn on_ready(&self, callback: impl FnOnce() + 'static) {
        self.ready.on(move |_| callback());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coords::ImageSize;
    use crate::loader::{ManualLoader, StaticLoader};

    #[test]
    fn test_led_prototype_is_backed_by_led_png() {
        let mut loader = StaticLoader::new().with_image("led.png", ImageSize::new(20, 20));
        let catalog = Catalog::load(&mut loader);

        let led = catalog.prototype(ComponentKind::Led).unwrap();
        assert_eq!(led.image.url(), "led.png");
        assert_eq!(led.image.size(), Some(ImageSize::new(20, 20)));
        assert_eq!(catalog.kinds().collect::<Vec<_>>(), vec![ComponentKind::Led]);
    }

    #[test]
    fn test_ready_waits_for_every_image() {
        let mut loader = ManualLoader::new();
        let catalog = Catalog::load(&mut loader);
        assert!(!catalog.is_ready());

        let fired = Rc::new(Cell::new(0));
        let counter = fired.clone();
        catalog.on_ready(move || counter.set(counter.get() + 1));
        assert_eq!(fired.get(), 0);

        loader.finish_all(ImageSize::new(20, 20));
        assert!(catalog.is_ready());
        assert_eq!(fired.get(), 1);

        let counter = fired.clone();
        catalog.on_ready(move || counter.set(counter.get() + 1));
        assert_eq!(fired.get(), 2);
    }

    #[test]
    fn test_failed_images_still_count_as_settled() {
        let mut loader = StaticLoader::new();
        let catalog = Catalog::load(&mut loader);
        assert!(catalog.is_ready());
        let led = catalog.prototype(ComponentKind::Led).unwrap();
        assert_eq!(led.image.size(), None);
    }
}
