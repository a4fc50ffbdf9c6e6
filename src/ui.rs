//! Host-facing settings descriptions and palette grouping.
//!
//! Nothing here draws: a [`SettingsView`] is a plain description of the
//! controls a host UI should build for a tool, and a [`SettingChange`] is what
//! the host sends back when the user edits one of them.

use crate::draw::{GrainDirection, PatternKind, SymmetryKind};
use crate::draw::symmetry::{DEFAULT_RADIAL_POINTS, MAX_RADIAL_POINTS};
use crate::settings::{
    GradientOptions, GradientStop, PatternOptions, Resolved, ShapeKind, StoneOptions,
    SymmetryOptions, ToolSettings, WoodOptions,
};
use crate::tools::ToolCategory;
use crate::tools::registry::ToolRegistry;

// ============================================================================
// Fields
// ============================================================================

/// Numeric settings exposed as sliders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NumberField {
    Size,
    Opacity,
    FontSize,
    GradientAngle,
    GradientOpacity,
    PatternScale,
    PatternOpacity,
    StoneSeed,
    SymmetryPoints,
}

impl NumberField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Size => "Size",
            Self::Opacity => "Opacity",
            Self::FontSize => "Font size",
            Self::GradientAngle => "Angle",
            Self::GradientOpacity => "Gradient opacity",
            Self::PatternScale => "Scale",
            Self::PatternOpacity => "Pattern opacity",
            Self::StoneSeed => "Seed",
            Self::SymmetryPoints => "Points",
        }
    }

    /// Slider range and step as `(min, max, step)`.
    pub fn range(&self) -> (f64, f64, f64) {
        match self {
            Self::Size => (1.0, 100.0, 1.0),
            Self::Opacity | Self::GradientOpacity | Self::PatternOpacity => (0.0, 1.0, 0.05),
            Self::FontSize => (8.0, 144.0, 1.0),
            Self::GradientAngle => (0.0, 360.0, 1.0),
            Self::PatternScale => (0.1, 5.0, 0.1),
            Self::StoneSeed => (0.0, 9999.0, 1.0),
            Self::SymmetryPoints => (2.0, 24.0, 1.0),
        }
    }
}

/// Boolean settings exposed as toggles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToggleField {
    Filled,
    SymmetryEnabled,
    ShowAxis,
}

impl ToggleField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Filled => "Filled",
            Self::SymmetryEnabled => "Symmetry",
            Self::ShowAxis => "Show axis",
        }
    }
}

/// Free-form or color settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextField {
    Color,
    FontFamily,
    PatternBaseColor,
}

impl TextField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Color => "Color",
            Self::FontFamily => "Font",
            Self::PatternBaseColor => "Base color",
        }
    }
}

/// Settings picked from a fixed list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChoiceField {
    ShapeType,
    SymmetryKind,
    GrainDirection,
}

impl ChoiceField {
    pub fn label(&self) -> &'static str {
        match self {
            Self::ShapeType => "Shape",
            Self::SymmetryKind => "Mirror",
            Self::GrainDirection => "Grain",
        }
    }

    pub fn options(&self) -> &'static [&'static str] {
        match self {
            Self::ShapeType => &["rectangle", "circle"],
            Self::SymmetryKind => &["horizontal", "vertical", "bilateral", "radial"],
            Self::GrainDirection => &["horizontal", "vertical"],
        }
    }
}

// ============================================================================
// Views
// ============================================================================

/// One control in a tool's settings panel, carrying its current value.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingsControl {
    Slider {
        field: NumberField,
        min: f64,
        max: f64,
        step: f64,
        value: f64,
    },
    Toggle {
        field: ToggleField,
        value: bool,
    },
    Text {
        field: TextField,
        value: String,
    },
    Choice {
        field: ChoiceField,
        selected: String,
    },
    Stops {
        stops: Vec<GradientStop>,
    },
}

impl SettingsControl {
    fn slider(field: NumberField, value: f64) -> Self {
        let (min, max, step) = field.range();
        Self::Slider {
            field,
            min,
            max,
            step,
            value,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Slider { field, .. } => field.label(),
            Self::Toggle { field, .. } => field.label(),
            Self::Text { field, .. } => field.label(),
            Self::Choice { field, .. } => field.label(),
            Self::Stops { .. } => "Stops",
        }
    }
}

/// Renderable description of a tool's settings panel.
#[derive(Debug, Clone, PartialEq)]
pub struct SettingsView {
    pub tool_id: String,
    pub title: String,
    pub controls: Vec<SettingsControl>,
}

impl SettingsView {
    pub fn new(tool_id: &str, title: &str) -> Self {
        Self {
            tool_id: tool_id.to_string(),
            title: title.to_string(),
            controls: Vec::new(),
        }
    }

    /// Neutral "no settings" placeholder.
    pub fn none(tool_id: &str) -> Self {
        Self::new(tool_id, "No settings")
    }

    pub fn is_empty(&self) -> bool {
        self.controls.is_empty()
    }

    /// Size, color and opacity.
    pub fn with_core(mut self, resolved: &Resolved<'_>) -> Self {
        self.controls.push(SettingsControl::slider(NumberField::Size, resolved.size()));
        self.controls.push(SettingsControl::Text {
            field: TextField::Color,
            value: resolved.color().to_hex(),
        });
        self.controls
            .push(SettingsControl::slider(NumberField::Opacity, resolved.opacity()));
        self
    }

    pub fn with_symmetry(mut self, resolved: &Resolved<'_>) -> Self {
        let options = resolved.symmetry_options().cloned().unwrap_or_default();
        self.controls.push(SettingsControl::Toggle {
            field: ToggleField::SymmetryEnabled,
            value: options.enabled,
        });
        self.controls.push(SettingsControl::Choice {
            field: ChoiceField::SymmetryKind,
            selected: symmetry_kind_name(options.kind).to_string(),
        });
        if options.kind == SymmetryKind::Radial {
            self.controls.push(SettingsControl::slider(
                NumberField::SymmetryPoints,
                options.points.unwrap_or(DEFAULT_RADIAL_POINTS) as f64,
            ));
        }
        self
    }

    /// Symmetry controls plus the axis guide toggle.
    pub fn with_symmetry_guide(self, resolved: &Resolved<'_>) -> Self {
        let mut view = self.with_symmetry(resolved);
        view.controls.push(SettingsControl::Toggle {
            field: ToggleField::ShowAxis,
            value: resolved.show_axis(),
        });
        view
    }

    pub fn with_shape(mut self, resolved: &Resolved<'_>) -> Self {
        let selected = match resolved.shape_kind() {
            ShapeKind::Rectangle => "rectangle",
            ShapeKind::Circle => "circle",
        };
        self.controls.push(SettingsControl::Choice {
            field: ChoiceField::ShapeType,
            selected: selected.to_string(),
        });
        self.controls.push(SettingsControl::Toggle {
            field: ToggleField::Filled,
            value: resolved.filled(),
        });
        self
    }

    pub fn with_text(mut self, resolved: &Resolved<'_>) -> Self {
        self.controls.push(SettingsControl::Text {
            field: TextField::FontFamily,
            value: resolved.font().family,
        });
        self.controls
            .push(SettingsControl::slider(NumberField::FontSize, resolved.font_size()));
        self
    }

    pub fn with_gradient(mut self, resolved: &Resolved<'_>) -> Self {
        let options = resolved.gradient_options();
        self.controls.push(SettingsControl::Stops {
            stops: options.map(|o| o.stops.clone()).unwrap_or_default(),
        });
        self.controls.push(SettingsControl::slider(
            NumberField::GradientAngle,
            options.and_then(|o| o.angle).unwrap_or(0.0),
        ));
        self.controls.push(SettingsControl::slider(
            NumberField::GradientOpacity,
            options.map(|o| o.opacity).unwrap_or(1.0),
        ));
        self
    }

    pub fn with_pattern(mut self, resolved: &Resolved<'_>, kind: PatternKind) -> Self {
        let Some(options) = resolved.pattern_options() else {
            return self;
        };
        self.controls
            .push(SettingsControl::slider(NumberField::PatternScale, options.scale));
        self.controls
            .push(SettingsControl::slider(NumberField::PatternOpacity, options.opacity));
        if let Some(spec) = resolved.tile_spec(kind) {
            self.controls.push(SettingsControl::Text {
                field: TextField::PatternBaseColor,
                value: spec.base.to_hex(),
            });
            match spec.kind {
                PatternKind::Wood => self.controls.push(SettingsControl::Choice {
                    field: ChoiceField::GrainDirection,
                    selected: grain_name(spec.grain).to_string(),
                }),
                PatternKind::Stone => self
                    .controls
                    .push(SettingsControl::slider(NumberField::StoneSeed, spec.seed as f64)),
                _ => {}
            }
        }
        self
    }
}

fn symmetry_kind_name(kind: SymmetryKind) -> &'static str {
    match kind {
        SymmetryKind::Horizontal => "horizontal",
        SymmetryKind::Vertical => "vertical",
        SymmetryKind::Bilateral => "bilateral",
        SymmetryKind::Radial => "radial",
    }
}

fn grain_name(grain: GrainDirection) -> &'static str {
    match grain {
        GrainDirection::Horizontal => "horizontal",
        GrainDirection::Vertical => "vertical",
    }
}

// ============================================================================
// Changes
// ============================================================================

/// A single edit coming back from a host control.
#[derive(Debug, Clone, PartialEq)]
pub enum SettingChange {
    Number(NumberField, f64),
    Toggle(ToggleField, bool),
    Text(TextField, String),
    Choice(ChoiceField, String),
    Stops(Vec<GradientStop>),
}

impl SettingChange {
    /// Writes the change into `settings`, creating nested blocks on demand.
    ///
    /// Returns `false` (and leaves `settings` untouched) when a choice value
    /// is not one of the field's options.
    pub fn apply(&self, settings: &mut ToolSettings) -> bool {
        match self {
            SettingChange::Number(field, value) => {
                let value = *value;
                match field {
                    NumberField::Size => settings.size = Some(value.max(0.0)),
                    NumberField::Opacity => settings.opacity = Some(value.clamp(0.0, 1.0)),
                    NumberField::FontSize => settings.font_size = Some(value.max(1.0)),
                    NumberField::GradientAngle => gradient_block(settings).angle = Some(value),
                    NumberField::GradientOpacity => {
                        gradient_block(settings).opacity = value.clamp(0.0, 1.0)
                    }
                    NumberField::PatternScale => {
                        if value > 0.0 {
                            pattern_block(settings).scale = value;
                        }
                    }
                    NumberField::PatternOpacity => {
                        pattern_block(settings).opacity = value.clamp(0.0, 1.0)
                    }
                    NumberField::StoneSeed => {
                        pattern_block(settings)
                            .stone_options
                            .get_or_insert_with(StoneOptions::default)
                            .seed = Some(value.max(0.0) as u64)
                    }
                    NumberField::SymmetryPoints => {
                        symmetry_block(settings).points =
                            Some(value.clamp(1.0, MAX_RADIAL_POINTS as f64) as u32)
                    }
                }
                true
            }
            SettingChange::Toggle(field, value) => {
                match field {
                    ToggleField::Filled => settings.filled = Some(*value),
                    ToggleField::SymmetryEnabled => symmetry_block(settings).enabled = *value,
                    ToggleField::ShowAxis => symmetry_block(settings).show_axis = Some(*value),
                }
                true
            }
            SettingChange::Text(field, value) => {
                match field {
                    TextField::Color => settings.color = Some(value.clone()),
                    TextField::FontFamily => settings.font_family = Some(value.clone()),
                    TextField::PatternBaseColor => {
                        pattern_block(settings).base_color = Some(value.clone())
                    }
                }
                true
            }
            SettingChange::Choice(field, value) => apply_choice(settings, *field, value),
            SettingChange::Stops(stops) => {
                gradient_block(settings).stops = stops.clone();
                true
            }
        }
    }
}

fn apply_choice(settings: &mut ToolSettings, field: ChoiceField, value: &str) -> bool {
    match (field, value) {
        (ChoiceField::ShapeType, "rectangle") => settings.shape_type = Some(ShapeKind::Rectangle),
        (ChoiceField::ShapeType, "circle") => settings.shape_type = Some(ShapeKind::Circle),
        (ChoiceField::SymmetryKind, name) => {
            let kind = match name {
                "horizontal" => SymmetryKind::Horizontal,
                "vertical" => SymmetryKind::Vertical,
                "bilateral" => SymmetryKind::Bilateral,
                "radial" => SymmetryKind::Radial,
                other => {
                    log::warn!("Unknown symmetry kind '{}'", other);
                    return false;
                }
            };
            symmetry_block(settings).kind = kind;
        }
        (ChoiceField::GrainDirection, name) => {
            let grain = match name {
                "horizontal" => GrainDirection::Horizontal,
                "vertical" => GrainDirection::Vertical,
                other => {
                    log::warn!("Unknown grain direction '{}'", other);
                    return false;
                }
            };
            pattern_block(settings)
                .wood_options
                .get_or_insert_with(WoodOptions::default)
                .grain_direction = grain;
        }
        (ChoiceField::ShapeType, other) => {
            log::warn!("Unknown shape type '{}'", other);
            return false;
        }
    }
    true
}

fn gradient_block(settings: &mut ToolSettings) -> &mut GradientOptions {
    settings
        .gradient_options
        .get_or_insert_with(GradientOptions::default)
}

fn pattern_block(settings: &mut ToolSettings) -> &mut PatternOptions {
    settings
        .pattern_options
        .get_or_insert_with(PatternOptions::default)
}

fn symmetry_block(settings: &mut ToolSettings) -> &mut SymmetryOptions {
    settings
        .symmetry_options
        .get_or_insert_with(SymmetryOptions::default)
}

// ============================================================================
// Palette
// ============================================================================

/// One palette button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteEntry {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
}

/// Palette buttons for one category, in registration order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaletteGroup {
    pub category: ToolCategory,
    pub entries: Vec<PaletteEntry>,
}

/// Groups the registry into palette sections, skipping empty categories.
pub fn palette(registry: &ToolRegistry) -> Vec<PaletteGroup> {
    ToolCategory::ALL
        .iter()
        .map(|&category| PaletteGroup {
            category,
            entries: registry
                .list_by_category(category)
                .map(|def| PaletteEntry {
                    id: def.id,
                    name: def.name,
                    icon: def.icon,
                })
                .collect(),
        })
        .filter(|group| !group.entries.is_empty())
        .collect()
}
