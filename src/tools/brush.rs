//! Freehand brush with symmetry fan-out.

use super::{DrawingContext, Tool, draw_on};
use crate::draw::render;
use crate::settings::ToolSettings;
use crate::ui::SettingsView;

/// Continuous round-capped stroke following the pointer.
///
/// With symmetry enabled every drag segment is replicated: image `i` of the
/// previous position connects to image `i` of the current one, all computed
/// around the same center.
#[derive(Debug)]
pub struct BrushTool {
    id: String,
    settings: ToolSettings,
}

impl BrushTool {
    pub fn new(id: &str, settings: ToolSettings) -> Self {
        Self {
            id: id.to_string(),
            settings,
        }
    }
}

impl Tool for BrushTool {
    fn id(&self) -> &str {
        &self.id
    }

    fn settings(&self) -> &ToolSettings {
        &self.settings
    }

    fn settings_mut(&mut self) -> &mut ToolSettings {
        &mut self.settings
    }

    fn on_press(&mut self, ctx: &mut DrawingContext<'_>) {
        log::debug!("Brush stroke started at ({:.1}, {:.1})", ctx.pos.0, ctx.pos.1);
    }

    fn on_drag(&mut self, ctx: &mut DrawingContext<'_>) {
        if !ctx.is_drawing {
            return;
        }

        let resolved = ctx.resolve(&self.settings);
        let color = resolved.stroke_color();
        let width = resolved.size();
        let symmetry = resolved.symmetry(ctx.surface.center());

        let segments = symmetry.segment_images(ctx.last_pos, ctx.pos);
        draw_on(ctx.surface, |cr| {
            for (from, to) in segments {
                render::stroke_segment(cr, from, to, color, width);
            }
        });
    }

    fn on_release(&mut self, _ctx: &mut DrawingContext<'_>) {}

    fn render_settings(&self) -> SettingsView {
        let resolved = crate::settings::Resolved::new(None, &self.settings);
        SettingsView::new(&self.id, "Brush")
            .with_core(&resolved)
            .with_symmetry(&resolved)
    }
}
