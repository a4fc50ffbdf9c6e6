//! Process-wide tool registry.
//!
//! The registry is built once (from the built-in definitions, optionally with
//! config-file default overrides), installed into a `OnceLock`, and read-only
//! from then on. [`ToolRegistry::global`] installs the plain built-ins on
//! first use if nothing was installed explicitly.

use super::{
    BrushTool, EraserTool, GradientTool, PatternTool, ShapeTool, SymmetryTool, TextTool, Tool,
    ToolCategory,
};
use crate::draw::{GradientKind, GrainDirection, PatternKind, SymmetryKind};
use crate::settings::{
    FabricOptions, GradientOptions, GradientStop, PatternOptions, ShapeKind, StoneOptions,
    SymmetryOptions, ToolSettings, WoodOptions,
};
use std::collections::BTreeMap;
use std::sync::OnceLock;
use thiserror::Error;

static REGISTRY: OnceLock<ToolRegistry> = OnceLock::new();

/// Builds a tool instance from its registry id and merged settings.
pub type ToolConstructor = fn(&str, ToolSettings) -> Box<dyn Tool>;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum RegistryError {
    #[error("tool registry is already initialized")]
    AlreadyInitialized,
}

/// Immutable registry entry.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    pub id: &'static str,
    pub name: &'static str,
    pub icon: &'static str,
    pub category: ToolCategory,
    pub description: &'static str,
    pub constructor: ToolConstructor,
    pub defaults: ToolSettings,
}

impl ToolDefinition {
    /// Constructs a new instance with `settings` shallow-merged over the
    /// definition defaults.
    pub fn instantiate(&self, settings: &ToolSettings) -> Box<dyn Tool> {
        let merged = ToolSettings::merged(&self.defaults, settings);
        (self.constructor)(self.id, merged)
    }
}

/// Ordered set of tool definitions.
#[derive(Debug, Clone)]
pub struct ToolRegistry {
    definitions: Vec<ToolDefinition>,
}

impl ToolRegistry {
    /// The built-in tools in palette order.
    pub fn builtin() -> Self {
        Self {
            definitions: builtin_definitions(),
        }
    }

    /// Applies per-tool default overrides (e.g. from the config file).
    ///
    /// Each override is shallow-merged over the built-in defaults. Unknown
    /// ids are logged and ignored.
    pub fn with_default_overrides(mut self, overrides: &BTreeMap<String, ToolSettings>) -> Self {
        for (id, settings) in overrides {
            match self.definitions.iter_mut().find(|def| def.id == id) {
                Some(def) => {
                    def.defaults = ToolSettings::merged(&def.defaults, settings);
                    log::debug!("Applied default overrides for tool '{}'", id);
                }
                None => log::warn!("Ignoring defaults for unknown tool '{}'", id),
            }
        }
        self
    }

    /// Installs this registry as the process-wide registry.
    ///
    /// Fails if a registry was already installed (explicitly or by an
    /// earlier [`ToolRegistry::global`] call).
    pub fn install(self) -> Result<&'static ToolRegistry, RegistryError> {
        let mut installed = false;
        let registry = REGISTRY.get_or_init(|| {
            installed = true;
            self
        });
        if installed {
            log::info!("Installed tool registry with {} tools", registry.definitions.len());
            Ok(registry)
        } else {
            Err(RegistryError::AlreadyInitialized)
        }
    }

    /// The process-wide registry, populated with the built-ins on first use.
    pub fn global() -> &'static ToolRegistry {
        REGISTRY.get_or_init(ToolRegistry::builtin)
    }

    pub fn get(&self, id: &str) -> Option<&ToolDefinition> {
        self.definitions.iter().find(|def| def.id == id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    pub fn list_all(&self) -> &[ToolDefinition] {
        &self.definitions
    }

    pub fn list_by_category(&self, category: ToolCategory) -> impl Iterator<Item = &ToolDefinition> {
        self.definitions
            .iter()
            .filter(move |def| def.category == category)
    }

    pub fn ids(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.definitions.iter().map(|def| def.id)
    }
}

// ============================================================================
// Built-in definitions
// ============================================================================

fn core_defaults(size: f64) -> ToolSettings {
    ToolSettings::default()
        .with_size(size)
        .with_color("#000000")
        .with_opacity(1.0)
}

fn gradient_defaults(kind: GradientKind, stops: &[(&str, f64)]) -> ToolSettings {
    ToolSettings {
        gradient_options: Some(GradientOptions {
            kind,
            stops: stops
                .iter()
                .map(|(color, position)| GradientStop::new(*color, *position))
                .collect(),
            angle: None,
            opacity: 1.0,
        }),
        ..core_defaults(5.0)
    }
}

fn pattern_defaults(options: PatternOptions) -> ToolSettings {
    ToolSettings {
        pattern_options: Some(options),
        ..core_defaults(30.0)
    }
}

fn builtin_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            id: "brush",
            name: "Brush",
            icon: "brush",
            category: ToolCategory::Core,
            description: "Freehand strokes with optional symmetry",
            constructor: |id, settings| Box::new(BrushTool::new(id, settings)),
            defaults: ToolSettings {
                symmetry_options: Some(SymmetryOptions::default()),
                ..core_defaults(5.0)
            },
        },
        ToolDefinition {
            id: "eraser",
            name: "Eraser",
            icon: "eraser",
            category: ToolCategory::Core,
            description: "Erase to transparency",
            constructor: |id, settings| Box::new(EraserTool::new(id, settings)),
            defaults: core_defaults(20.0),
        },
        ToolDefinition {
            id: "text",
            name: "Text",
            icon: "type",
            category: ToolCategory::Core,
            description: "Click to place a line of text",
            constructor: |id, settings| Box::new(TextTool::new(id, settings)),
            defaults: ToolSettings {
                font_family: Some("Sans".into()),
                font_size: Some(24.0),
                ..core_defaults(5.0)
            },
        },
        ToolDefinition {
            id: "shape",
            name: "Shape",
            icon: "square",
            category: ToolCategory::Core,
            description: "Rectangles and circles with live preview",
            constructor: |id, settings| Box::new(ShapeTool::new(id, settings)),
            defaults: ToolSettings {
                shape_type: Some(ShapeKind::Rectangle),
                filled: Some(false),
                ..core_defaults(3.0)
            },
        },
        ToolDefinition {
            id: "linear-gradient",
            name: "Linear Gradient",
            icon: "gradient-linear",
            category: ToolCategory::Gradient,
            description: "Fill along a dragged direction",
            constructor: |id, settings| Box::new(GradientTool::new(id, GradientKind::Linear, settings)),
            defaults: gradient_defaults(GradientKind::Linear, &[("#000000", 0.0), ("#ffffff", 1.0)]),
        },
        ToolDefinition {
            id: "radial-gradient",
            name: "Radial Gradient",
            icon: "gradient-radial",
            category: ToolCategory::Gradient,
            description: "Fill outward from a center",
            constructor: |id, settings| Box::new(GradientTool::new(id, GradientKind::Radial, settings)),
            defaults: gradient_defaults(GradientKind::Radial, &[("#ffffff", 0.0), ("#000000", 1.0)]),
        },
        ToolDefinition {
            id: "conic-gradient",
            name: "Conic Gradient",
            icon: "gradient-conic",
            category: ToolCategory::Gradient,
            description: "Sweep colors around a center",
            constructor: |id, settings| Box::new(GradientTool::new(id, GradientKind::Conic, settings)),
            defaults: gradient_defaults(
                GradientKind::Conic,
                &[("#ff0000", 0.0), ("#00ff00", 0.33), ("#0000ff", 0.67), ("#ff0000", 1.0)],
            ),
        },
        ToolDefinition {
            id: "wood-pattern",
            name: "Wood",
            icon: "texture-wood",
            category: ToolCategory::Pattern,
            description: "Stamp wood grain",
            constructor: |id, settings| Box::new(PatternTool::new(id, PatternKind::Wood, settings)),
            defaults: pattern_defaults(PatternOptions {
                wood_options: Some(WoodOptions {
                    grain_direction: GrainDirection::Horizontal,
                    grain_intensity: Some(0.5),
                    knots: Some(false),
                }),
                ..PatternOptions::of_kind(PatternKind::Wood)
            }),
        },
        ToolDefinition {
            id: "stone-pattern",
            name: "Stone",
            icon: "texture-stone",
            category: ToolCategory::Pattern,
            description: "Stamp speckled stone",
            constructor: |id, settings| Box::new(PatternTool::new(id, PatternKind::Stone, settings)),
            defaults: pattern_defaults(PatternOptions {
                stone_options: Some(StoneOptions {
                    roughness: Some(0.5),
                    cracks: Some(false),
                    seed: None,
                }),
                ..PatternOptions::of_kind(PatternKind::Stone)
            }),
        },
        ToolDefinition {
            id: "fabric-pattern",
            name: "Fabric",
            icon: "texture-fabric",
            category: ToolCategory::Pattern,
            description: "Stamp woven fabric",
            constructor: |id, settings| Box::new(PatternTool::new(id, PatternKind::Fabric, settings)),
            defaults: pattern_defaults(PatternOptions {
                fabric_options: Some(FabricOptions {
                    weave_density: Some(10.0),
                    thread_thickness: Some(1.0),
                }),
                ..PatternOptions::of_kind(PatternKind::Fabric)
            }),
        },
        ToolDefinition {
            id: "symmetry",
            name: "Symmetry",
            icon: "symmetry",
            category: ToolCategory::Symmetry,
            description: "Mirrored and radial drawing with axis guides",
            constructor: |id, settings| Box::new(SymmetryTool::new(id, settings)),
            defaults: ToolSettings {
                symmetry_options: Some(SymmetryOptions {
                    points: Some(6),
                    show_axis: Some(true),
                    ..SymmetryOptions::enabled(SymmetryKind::Radial)
                }),
                ..core_defaults(5.0)
            },
        },
    ]
}
