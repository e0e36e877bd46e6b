use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

/// The kinds of component the editor can place.
///
/// Each kind is backed by one image in the catalog.
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Display, EnumIter, EnumString, Serialize, Deserialize,
)]
pub enum ComponentKind {
    /// Light-emitting diode
    #[default]
    #[strum(to_string = "LED", serialize = "led")]
    #[serde(rename = "LED", alias = "led")]
    Led,
}

impl ComponentKind {
    /// Where the kind's image is loaded from.
    pub fn asset_path(&self) -> &'static str {
        match self {
            Self::Led => "led.png",
        }
    }
}
