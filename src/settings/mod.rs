//! Flat tool settings and their optional nested option blocks.
//!
//! [`ToolSettings`] is the shape exchanged with host UI controls, registry
//! defaults and the config file. Every field is optional: tools never read
//! fields directly but go through [`Resolved`], which applies the
//! three-tier fallback (call-time settings → tool settings → engine default).
//!
//! Nested blocks (`gradientOptions`, `patternOptions`, `symmetryOptions`)
//! are only present when something set them, and are always replaced
//! wholesale by [`ToolSettings::merged`], never deep-merged.

mod resolve;

pub use resolve::{
    DEFAULT_FONT_FAMILY, DEFAULT_FONT_SIZE, DEFAULT_OPACITY, DEFAULT_SIZE, Resolved,
};

use crate::draw::{GradientKind, GrainDirection, PatternKind, SymmetryKind};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Settings for one tool, as supplied by registry defaults or the caller.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct ToolSettings {
    /// Stroke width in pixels (>= 0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub size: Option<f64>,

    /// Stroke/fill color as a CSS-style string (`#rrggbb`, `rgb()`, names)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub color: Option<String>,

    /// Opacity multiplier (0.0 - 1.0)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub opacity: Option<f64>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub gradient_options: Option<GradientOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub pattern_options: Option<PatternOptions>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub symmetry_options: Option<SymmetryOptions>,

    /// Shape tool: which outline to draw
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shape_type: Option<ShapeKind>,

    /// Shape tool: fill instead of outline
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filled: Option<bool>,

    /// Text tool: font family name
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_family: Option<String>,

    /// Text tool: font size in pixels
    #[serde(skip_serializing_if = "Option::is_none")]
    pub font_size: Option<f64>,
}

impl ToolSettings {
    /// Shallow top-level merge: every field set in `overrides` wins, the
    /// rest comes from `defaults`. Nested blocks are taken whole from one
    /// side or the other.
    pub fn merged(defaults: &ToolSettings, overrides: &ToolSettings) -> ToolSettings {
        fn pick<T: Clone>(over: &Option<T>, base: &Option<T>) -> Option<T> {
            over.clone().or_else(|| base.clone())
        }

        ToolSettings {
            size: pick(&overrides.size, &defaults.size),
            color: pick(&overrides.color, &defaults.color),
            opacity: pick(&overrides.opacity, &defaults.opacity),
            gradient_options: pick(&overrides.gradient_options, &defaults.gradient_options),
            pattern_options: pick(&overrides.pattern_options, &defaults.pattern_options),
            symmetry_options: pick(&overrides.symmetry_options, &defaults.symmetry_options),
            shape_type: pick(&overrides.shape_type, &defaults.shape_type),
            filled: pick(&overrides.filled, &defaults.filled),
            font_family: pick(&overrides.font_family, &defaults.font_family),
            font_size: pick(&overrides.font_size, &defaults.font_size),
        }
    }

    /// Convenience builder used by hosts and tests.
    pub fn with_size(mut self, size: f64) -> Self {
        self.size = Some(size);
        self
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn with_opacity(mut self, opacity: f64) -> Self {
        self.opacity = Some(opacity);
        self
    }

    pub fn with_symmetry(mut self, symmetry: SymmetryOptions) -> Self {
        self.symmetry_options = Some(symmetry);
        self
    }
}

/// Outline drawn by the shape tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ShapeKind {
    #[default]
    #[serde(alias = "rect")]
    Rectangle,
    Circle,
}

/// One gradient anchor as supplied by the host.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct GradientStop {
    pub color: String,
    /// Position along the gradient (clamped to 0.0 - 1.0 when rendered)
    pub position: f64,
}

impl GradientStop {
    pub fn new(color: impl Into<String>, position: f64) -> Self {
        Self {
            color: color.into(),
            position,
        }
    }
}

/// Gradient tool options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct GradientOptions {
    #[serde(rename = "type", default)]
    pub kind: GradientKind,

    /// Stops in any order; rendering sorts them by position
    #[serde(default)]
    pub stops: Vec<GradientStop>,

    /// Angle in degrees (linear without drag, conic sweep start)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub angle: Option<f64>,

    #[serde(default = "default_block_opacity")]
    pub opacity: f64,
}

impl Default for GradientOptions {
    fn default() -> Self {
        Self {
            kind: GradientKind::default(),
            stops: Vec::new(),
            angle: None,
            opacity: default_block_opacity(),
        }
    }
}

impl GradientOptions {
    /// Two-stop gradient between `from` and `to`.
    pub fn two_stop(kind: GradientKind, from: &str, to: &str) -> Self {
        Self {
            kind,
            stops: vec![GradientStop::new(from, 0.0), GradientStop::new(to, 1.0)],
            angle: None,
            opacity: default_block_opacity(),
        }
    }
}

/// Procedural pattern tool options.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct PatternOptions {
    /// Pattern kind; omitted means the pattern tool's own kind
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<PatternKind>,

    /// Multiplier on the 50px base tile (> 0)
    #[serde(default = "default_scale")]
    pub scale: f64,

    #[serde(default = "default_block_opacity")]
    pub opacity: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_color: Option<String>,

    /// Read only when `type` is `wood`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub wood_options: Option<WoodOptions>,

    /// Read only when `type` is `stone`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stone_options: Option<StoneOptions>,

    /// Read only when `type` is `fabric`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fabric_options: Option<FabricOptions>,
}

impl Default for PatternOptions {
    fn default() -> Self {
        Self {
            kind: None,
            scale: default_scale(),
            opacity: default_block_opacity(),
            base_color: None,
            wood_options: None,
            stone_options: None,
            fabric_options: None,
        }
    }
}

impl PatternOptions {
    /// Options for `kind` at scale 1 with no sub-block.
    pub fn of_kind(kind: PatternKind) -> Self {
        Self {
            kind: Some(kind),
            ..Self::default()
        }
    }
}

/// Wood texture parameters.
///
/// Only `grainDirection` shapes the tile today; the others are accepted and
/// carried for future generators.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct WoodOptions {
    pub grain_direction: GrainDirection,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub grain_intensity: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub knots: Option<bool>,
}

/// Stone texture parameters. `seed` picks the speckle layout;
/// `roughness` and `cracks` are carried but not yet rendered.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct StoneOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub roughness: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cracks: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
}

/// Fabric texture parameters (carried, not yet rendered).
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase", default)]
pub struct FabricOptions {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub weave_density: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub thread_thickness: Option<f64>,
}

/// Custom symmetry center in surface coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct AxisPoint {
    pub x: f64,
    pub y: f64,
}

/// Symmetry options shared by the brush and the symmetry tool.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SymmetryOptions {
    #[serde(rename = "type", default)]
    pub kind: SymmetryKind,

    #[serde(default)]
    pub enabled: bool,

    /// Radial image count (default 4)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub points: Option<u32>,

    /// Custom center; defaults to the surface center
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub axis: Option<AxisPoint>,

    /// Draw the axis guide (symmetry tool only, default true)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_axis: Option<bool>,
}

impl SymmetryOptions {
    /// Enabled symmetry of the given kind.
    pub fn enabled(kind: SymmetryKind) -> Self {
        Self {
            kind,
            enabled: true,
            ..Self::default()
        }
    }
}

fn default_block_opacity() -> f64 {
    1.0
}

fn default_scale() -> f64 {
    1.0
}
