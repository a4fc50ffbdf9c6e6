//! Drawing tools.
//!
//! Every tool is a flat struct implementing [`Tool`]. The dispatch loop
//! ([`crate::input::CanvasSession`]) builds a fresh [`DrawingContext`] for
//! each pointer or key event and hands it to the active tool.
//!
//! Tools that own a preview overlay draw only to that overlay until release
//! and drop it on release or in [`Tool::on_deactivate`].

pub mod brush;
pub mod eraser;
pub mod factory;
pub mod gradient;
pub mod pattern;
pub mod registry;
pub mod shape;
pub mod symmetry;
pub mod text;

pub use brush::BrushTool;
pub use eraser::EraserTool;
pub use factory::ToolFactory;
pub use gradient::GradientTool;
pub use pattern::PatternTool;
pub use registry::{RegistryError, ToolDefinition, ToolRegistry};
pub use shape::ShapeTool;
pub use symmetry::SymmetryTool;
pub use text::TextTool;

use crate::draw::Surface;
use crate::input::Key;
use crate::settings::{Resolved, ToolSettings};
use crate::ui::SettingsView;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

/// Surface-relative pointer position.
pub type Point = (f64, f64);

/// Palette category of a tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    Core,
    Gradient,
    Pattern,
    Symmetry,
}

impl ToolCategory {
    pub const ALL: [ToolCategory; 4] = [
        ToolCategory::Core,
        ToolCategory::Gradient,
        ToolCategory::Pattern,
        ToolCategory::Symmetry,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Core => "core",
            ToolCategory::Gradient => "gradient",
            ToolCategory::Pattern => "pattern",
            ToolCategory::Symmetry => "symmetry",
        }
    }
}

impl std::fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.pad(self.as_str())
    }
}

impl std::str::FromStr for ToolCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "core" => Ok(ToolCategory::Core),
            "gradient" => Ok(ToolCategory::Gradient),
            "pattern" => Ok(ToolCategory::Pattern),
            "symmetry" => Ok(ToolCategory::Symmetry),
            other => Err(format!("unknown tool category '{other}'")),
        }
    }
}

/// Per-event drawing state handed to a tool.
#[derive(Debug)]
pub struct DrawingContext<'a> {
    /// Committed drawing surface
    pub surface: &'a mut Surface,
    /// Current pointer position
    pub pos: Point,
    /// Pointer position of the previous event
    pub last_pos: Point,
    /// Pointer position at press
    pub start_pos: Point,
    /// Whether a press is active
    pub is_drawing: bool,
    /// Live call-time settings (first fallback tier)
    pub settings: Option<&'a ToolSettings>,
}

impl<'a> DrawingContext<'a> {
    /// Context for a single position with no stroke in progress.
    pub fn at(surface: &'a mut Surface, pos: Point) -> Self {
        Self {
            surface,
            pos,
            last_pos: pos,
            start_pos: pos,
            is_drawing: false,
            settings: None,
        }
    }

    /// Three-tier settings view for a tool whose own settings are `tool`.
    pub fn resolve<'s>(&self, tool: &'s ToolSettings) -> Resolved<'s>
    where
        'a: 's,
    {
        Resolved::new(self.settings, tool)
    }
}

/// Shared contract of every drawing tool.
pub trait Tool {
    /// Registry identifier this instance was created from.
    fn id(&self) -> &str;

    /// The instance's merged settings (second fallback tier).
    fn settings(&self) -> &ToolSettings;

    fn settings_mut(&mut self) -> &mut ToolSettings;

    /// Pointer down. May arrive without a preceding release.
    fn on_press(&mut self, ctx: &mut DrawingContext<'_>);

    /// Pointer move. Fires even when no stroke is active.
    fn on_drag(&mut self, ctx: &mut DrawingContext<'_>);

    /// Pointer up. Commits or discards any preview.
    fn on_release(&mut self, ctx: &mut DrawingContext<'_>);

    /// The tool became the active tool.
    fn on_activate(&mut self) {}

    /// The tool is being replaced; drop any live preview.
    fn on_deactivate(&mut self) {}

    /// Keyboard input. Returns `true` when the key was consumed.
    fn on_key(&mut self, _key: Key, _ctx: &mut DrawingContext<'_>) -> bool {
        false
    }

    /// The host input lost focus.
    fn on_blur(&mut self, _ctx: &mut DrawingContext<'_>) {}

    /// Live preview overlay, if one exists.
    fn preview(&self) -> Option<&Surface> {
        None
    }

    /// Description of the tool's settings panel.
    fn render_settings(&self) -> SettingsView {
        SettingsView::none(self.id())
    }
}

/// Runs `draw` with a fresh Cairo context for `surface`.
///
/// A context that cannot be acquired aborts this one draw call.
pub(crate) fn draw_on(surface: &Surface, draw: impl FnOnce(&cairo::Context)) {
    match surface.context() {
        Ok(cr) => draw(&cr),
        Err(err) => log::warn!("Skipping draw call, no drawing context: {}", err),
    }
}

/// Creates a same-size overlay for `surface`, logging on failure.
pub(crate) fn new_overlay(surface: &Surface) -> Option<Surface> {
    match surface.overlay() {
        Ok(overlay) => {
            log::debug!("Created {}x{} preview overlay", overlay.width(), overlay.height());
            Some(overlay)
        }
        Err(err) => {
            log::warn!("Could not create preview overlay: {}", err);
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn category_round_trips_through_str() {
        for category in ToolCategory::ALL {
            assert_eq!(category.as_str().parse::<ToolCategory>(), Ok(category));
        }
        assert!("brushes".parse::<ToolCategory>().is_err());
    }

    #[test]
    fn resolve_prefers_context_settings() {
        let mut surface = Surface::new(4, 4).unwrap();
        let live = ToolSettings::default().with_size(9.0);
        let own = ToolSettings::default().with_size(2.0);
        let mut ctx = DrawingContext::at(&mut surface, (1.0, 1.0));
        assert_eq!(ctx.resolve(&own).size(), 2.0);
        ctx.settings = Some(&live);
        assert_eq!(ctx.resolve(&own).size(), 9.0);
    }
}
