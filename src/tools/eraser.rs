//! Eraser tool.

use super::{DrawingContext, Tool, draw_on};
use crate::draw::render;
use crate::settings::{Resolved, ToolSettings};
use crate::ui::SettingsView;

/// Removes coverage with destination-out compositing.
///
/// Press erases a disc of radius `size / 2`; each drag erases the segment
/// from the previous position and stamps another disc at the endpoint so
/// fast strokes stay smooth.
#[derive(Debug)]
pub struct EraserTool {
    id: String,
    settings: ToolSettings,
}

impl EraserTool {
    pub fn new(id: &str, settings: ToolSettings) -> Self {
        Self {
            id: id.to_string(),
            settings,
        }
    }
}

impl Tool for EraserTool {
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
        let size = ctx.resolve(&self.settings).size();
        let pos = ctx.pos;
        draw_on(ctx.surface, |cr| render::erase_circle(cr, pos, size / 2.0));
    }

    fn on_drag(&mut self, ctx: &mut DrawingContext<'_>) {
        if !ctx.is_drawing {
            return;
        }
        let size = ctx.resolve(&self.settings).size();
        let (from, to) = (ctx.last_pos, ctx.pos);
        draw_on(ctx.surface, |cr| {
            render::erase_segment(cr, from, to, size);
            render::erase_circle(cr, to, size / 2.0);
        });
    }

    fn on_release(&mut self, _ctx: &mut DrawingContext<'_>) {}

    fn render_settings(&self) -> SettingsView {
        let resolved = Resolved::new(None, &self.settings);
        let mut view = SettingsView::new(&self.id, "Eraser").with_core(&resolved);
        // Only the size applies to erasing.
        view.controls.truncate(1);
        view
    }
}
