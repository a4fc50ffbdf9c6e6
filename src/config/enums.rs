//! Configuration enum types.

use crate::draw::{Color, TRANSPARENT};
use log::warn;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Color specification - a color string or raw RGB(A) components.
///
/// # Examples
/// ```toml
/// # Named or CSS-style color
/// background = "white"
/// background = "#1e1e2e"
///
/// # RGB color (0-255 per component)
/// background = [255, 128, 0]
///
/// # RGBA color (0-255 per component)
/// background = [0, 0, 0, 128]
/// ```
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, JsonSchema)]
#[serde(untagged)]
pub enum ColorSpec {
    /// Named color (`red`, `transparent`, ...) or `#rrggbb`/`rgb()` string
    Name(String),
    /// RGB color as [red, green, blue] where each component is 0-255
    Rgb([u8; 3]),
    /// RGBA color as [red, green, blue, alpha] where each component is 0-255
    Rgba([u8; 4]),
}

impl Default for ColorSpec {
    fn default() -> Self {
        ColorSpec::Name("transparent".to_string())
    }
}

impl ColorSpec {
    /// Converts the specification to a [`Color`].
    ///
    /// Unparseable strings fall back to transparent with a warning.
    pub fn to_color(&self) -> Color {
        match self {
            ColorSpec::Name(name) => Color::parse(name).unwrap_or_else(|err| {
                warn!("{}, using transparent", err);
                TRANSPARENT
            }),
            ColorSpec::Rgb([r, g, b]) => Color::from_rgba8(*r, *g, *b, 255),
            ColorSpec::Rgba([r, g, b, a]) => Color::from_rgba8(*r, *g, *b, *a),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{RED, WHITE};

    #[derive(Deserialize)]
    struct Wrapper {
        color: ColorSpec,
    }

    fn parse(text: &str) -> Color {
        toml::from_str::<Wrapper>(text).unwrap().color.to_color()
    }

    #[test]
    fn accepts_names_hex_and_arrays() {
        assert_eq!(parse(r#"color = "white""#), WHITE);
        assert_eq!(parse(r##"color = "#ff0000""##), RED);
        assert_eq!(parse("color = [255, 0, 0]"), RED);
        assert_eq!(parse("color = [255, 255, 255, 0]").a, 0.0);
    }

    #[test]
    fn unknown_name_is_transparent() {
        assert_eq!(parse(r#"color = "sparkly""#), TRANSPARENT);
    }
}
