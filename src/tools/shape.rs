//! Rectangle and circle tool with a dashed live preview.

use super::{DrawingContext, Point, Tool, draw_on, new_overlay};
use crate::draw::{Color, Surface, render};
use crate::settings::{Resolved, ShapeKind, ToolSettings};
use crate::ui::SettingsView;
use crate::util;

/// Click-drag shape tool.
///
/// Rectangles span the press and current positions as opposite corners;
/// circles are centered on the press position with radius equal to the
/// distance to the current position.
#[derive(Debug)]
pub struct ShapeTool {
    id: String,
    settings: ToolSettings,
    start: Option<Point>,
    preview: Option<Surface>,
}

impl ShapeTool {
    pub fn new(id: &str, settings: ToolSettings) -> Self {
        Self {
            id: id.to_string(),
            settings,
            start: None,
            preview: None,
        }
    }
}

#[allow(clippy::too_many_arguments)]
fn draw_shape(
    cr: &cairo::Context,
    kind: ShapeKind,
    start: Point,
    end: Point,
    color: Color,
    width: f64,
    filled: bool,
    dashed: bool,
) {
    match kind {
        ShapeKind::Rectangle => {
            let rect = util::normalize_rect(start.0, start.1, end.0, end.1);
            render::render_rect(cr, rect, color, width, filled, dashed);
        }
        ShapeKind::Circle => {
            let radius = util::distance(start.0, start.1, end.0, end.1);
            render::render_circle(cr, start, radius, color, width, filled, dashed);
        }
    }
}

impl Tool for ShapeTool {
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
        // A press without a release in between starts over.
        self.start = Some(ctx.pos);
        self.preview = new_overlay(ctx.surface);
    }

    fn on_drag(&mut self, ctx: &mut DrawingContext<'_>) {
        if !ctx.is_drawing {
            return;
        }
        let (Some(start), Some(overlay)) = (self.start, self.preview.as_ref()) else {
            return;
        };

        let resolved = ctx.resolve(&self.settings);
        let kind = resolved.shape_kind();
        let color = resolved.stroke_color();
        let width = resolved.size();

        if let Err(err) = overlay.clear() {
            log::warn!("Could not clear shape preview: {}", err);
            return;
        }
        let end = ctx.pos;
        draw_on(overlay, |cr| draw_shape(cr, kind, start, end, color, width, false, true));
    }

    fn on_release(&mut self, ctx: &mut DrawingContext<'_>) {
        let start = self.start.take();
        if self.preview.take().is_some() {
            log::debug!("Discarded shape preview overlay");
        }
        let Some(start) = start else {
            return;
        };
        if !ctx.is_drawing {
            return;
        }

        let resolved = ctx.resolve(&self.settings);
        let kind = resolved.shape_kind();
        let color = resolved.stroke_color();
        let width = resolved.size();
        let filled = resolved.filled();
        let end = ctx.pos;
        draw_on(ctx.surface, |cr| draw_shape(cr, kind, start, end, color, width, filled, false));
    }

    fn on_deactivate(&mut self) {
        self.start = None;
        if self.preview.take().is_some() {
            log::debug!("Discarded shape preview on deactivate");
        }
    }

    fn preview(&self) -> Option<&Surface> {
        self.preview.as_ref()
    }

    fn render_settings(&self) -> SettingsView {
        let resolved = Resolved::new(None, &self.settings);
        SettingsView::new(&self.id, "Shape")
            .with_core(&resolved)
            .with_shape(&resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(kind: ShapeKind, filled: bool) -> ToolSettings {
        ToolSettings {
            shape_type: Some(kind),
            filled: Some(filled),
            color: Some("#0000ff".into()),
            size: Some(2.0),
            ..Default::default()
        }
    }

    #[test]
    fn drag_only_touches_the_overlay() {
        let mut surface = Surface::new(100, 100).unwrap();
        let mut tool = ShapeTool::new("shape", settings(ShapeKind::Rectangle, false));
        {
            let mut ctx = DrawingContext::at(&mut surface, (10.0, 10.0));
            ctx.is_drawing = true;
            tool.on_press(&mut ctx);
            ctx.last_pos = ctx.pos;
            ctx.pos = (60.0, 60.0);
            tool.on_drag(&mut ctx);
        }
        assert!(tool.preview().is_some());
        assert!(surface.is_blank());
    }

    #[test]
    fn filled_rectangle_commits_and_drops_preview() {
        let mut surface = Surface::new(100, 100).unwrap();
        let mut tool = ShapeTool::new("shape", settings(ShapeKind::Rectangle, true));
        {
            let mut ctx = DrawingContext::at(&mut surface, (60.0, 60.0));
            ctx.is_drawing = true;
            tool.on_press(&mut ctx);
            ctx.pos = (20.0, 20.0);
            tool.on_drag(&mut ctx);
            tool.on_release(&mut ctx);
        }
        assert!(tool.preview().is_none());
        let inside = surface.pixel(40, 40).unwrap();
        assert_eq!((inside.b, inside.a), (1.0, 1.0));
        assert_eq!(surface.pixel(80, 80).unwrap().a, 0.0);
    }

    #[test]
    fn release_without_press_is_a_no_op() {
        let mut surface = Surface::new(50, 50).unwrap();
        let mut tool = ShapeTool::new("shape", settings(ShapeKind::Circle, true));
        {
            let mut ctx = DrawingContext::at(&mut surface, (25.0, 25.0));
            ctx.is_drawing = true;
            tool.on_release(&mut ctx);
        }
        assert!(surface.is_blank());
    }

    #[test]
    fn deactivate_discards_live_preview() {
        let mut surface = Surface::new(50, 50).unwrap();
        let mut tool = ShapeTool::new("shape", settings(ShapeKind::Circle, false));
        {
            let mut ctx = DrawingContext::at(&mut surface, (25.0, 25.0));
            ctx.is_drawing = true;
            tool.on_press(&mut ctx);
        }
        assert!(tool.preview().is_some());
        tool.on_deactivate();
        assert!(tool.preview().is_none());
        assert!(surface.is_blank());
    }
}
