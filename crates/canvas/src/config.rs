//! Editor settings.
//!
//! Every field has a default, so an empty JSON object (or no config at
//! all) gives the stock editor.

use crate::render::{Renderer, DEFAULT_HIGHLIGHT_RADIUS, DEFAULT_WIRE_WIDTH};
use schematic::ComponentKind;
use serde::{Deserialize, Serialize};
use std::fmt;
use theme::{parse_color, ParseColorError, Theme};

pub const DEFAULT_ARC_SEGMENTS: usize = 8;

/// Error type for loading editor settings.
#[derive(Debug)]
pub enum ConfigError {
    Parse(String),
    InvalidColor(ParseColorError),
    InvalidValue(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "Parse error: {}", msg),
            Self::InvalidColor(err) => write!(f, "{}", err),
            Self::InvalidValue(msg) => write!(f, "Invalid value: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<ParseColorError> for ConfigError {
    fn from(err: ParseColorError) -> Self {
        Self::InvalidColor(err)
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CanvasConfig {
    /// Corner radius of the selection highlight.
    pub highlight_radius: f32,
    /// Stroke width of wires between joined components.
    pub wire_width: f32,
    /// Kind placed by a double click.
    pub default_kind: ComponentKind,
    /// Straight segments per rounded corner, for hosts that flatten arcs.
    pub arc_segments: usize,
    /// Start from the dark theme instead of the light one.
    pub dark: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub highlight: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub wire: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub background: Option<String>,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            highlight_radius: DEFAULT_HIGHLIGHT_RADIUS,
            wire_width: DEFAULT_WIRE_WIDTH,
            default_kind: ComponentKind::Led,
            arc_segments: DEFAULT_ARC_SEGMENTS,
            dark: false,
            highlight: None,
            wire: None,
            background: None,
        }
    }
}

impl CanvasConfig {
    pub fn from_json(input: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(input).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.highlight_radius.is_finite() || self.highlight_radius < 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "highlight_radius must be a non-negative number, got {}",
                self.highlight_radius
            )));
        }
        if !self.wire_width.is_finite() || self.wire_width <= 0.0 {
            return Err(ConfigError::InvalidValue(format!(
                "wire_width must be positive, got {}",
                self.wire_width
            )));
        }
        if self.arc_segments == 0 {
            return Err(ConfigError::InvalidValue("arc_segments must be at least 1".into()));
        }
        Ok(())
    }

    /// The base theme with any color overrides applied.
    pub fn theme(&self) -> Result<Theme, ConfigError> {
        let mut theme = if self.dark { Theme::dark() } else { Theme::light() };
        if let Some(color) = &self.highlight {
            theme.highlight = parse_color(color)?;
        }
        if let Some(color) = &self.wire {
            theme.wire = parse_color(color)?;
        }
        if let Some(color) = &self.background {
            theme.canvas_background = parse_color(color)?;
        }
        Ok(theme)
    }

    pub fn renderer(&self) -> Result<Renderer, ConfigError> {
        self.validate()?;
        Ok(Renderer {
            theme: self.theme()?,
            highlight_radius: self.highlight_radius,
            wire_width: self.wire_width,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use theme::rgba;

    #[test]
    fn test_empty_object_gives_defaults() {
        let config = CanvasConfig::from_json("{}").unwrap();
        assert_eq!(config, CanvasConfig::default());
        assert_eq!(config.renderer().unwrap(), Renderer::default());
    }

    #[test]
    fn test_overrides_apply_on_top_of_the_base_theme() {
        let config = CanvasConfig::from_json(
            r##"{ "highlight_radius": 3, "dark": true, "wire": "#FF0000", "default_kind": "LED" }"##,
        )
        .unwrap();
        let renderer = config.renderer().unwrap();
        assert_eq!(renderer.highlight_radius, 3.0);
        assert_eq!(renderer.theme.wire, rgba(0xFF, 0, 0, 0xFF));
        assert_eq!(renderer.theme.highlight, Theme::dark().highlight);
        assert_eq!(config.default_kind, ComponentKind::Led);
    }

    #[test]
    fn test_rejects_bad_values() {
        assert!(matches!(
            CanvasConfig::from_json(r#"{ "wire_width": 0 }"#),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{ "highlight_radius": "big" }"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            CanvasConfig::from_json(r#"{ "default_kind": "Resistor" }"#),
            Err(ConfigError::Parse(_))
        ));

        let config = CanvasConfig {
            highlight: Some("#nothex".into()),
            ..CanvasConfig::default()
        };
        assert!(matches!(config.theme(), Err(ConfigError::InvalidColor(_))));
    }
}
