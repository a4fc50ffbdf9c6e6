//! Symmetry drawing tool and its axis guide overlay.

use super::{DrawingContext, Tool, draw_on, new_overlay};
use crate::draw::symmetry::axis_segments;
use crate::draw::{GRAY, Surface, render};
use crate::settings::{Resolved, ToolSettings};
use crate::ui::SettingsView;

/// Mirrored drawing with an axis guide.
///
/// Press drops a dot on every symmetry image of the pointer; drag connects
/// image `i` of the previous position to image `i` of the current one. While
/// a stroke is active the axis guide lives on a preview overlay, unless
/// `showAxis` is false.
#[derive(Debug)]
pub struct SymmetryTool {
    id: String,
    settings: ToolSettings,
    guides: Option<Surface>,
}

impl SymmetryTool {
    pub fn new(id: &str, settings: ToolSettings) -> Self {
        Self {
            id: id.to_string(),
            settings,
            guides: None,
        }
    }
}

impl Tool for SymmetryTool {
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
        let resolved = ctx.resolve(&self.settings);
        let symmetry = resolved.symmetry(ctx.surface.center());
        let color = resolved.stroke_color();
        let radius = resolved.size() / 2.0;
        let show_axis = resolved.show_axis();

        let dots = symmetry.images(ctx.pos.0, ctx.pos.1);
        draw_on(ctx.surface, |cr| {
            for dot in dots {
                render::fill_circle(cr, dot, radius, color);
            }
        });

        self.guides = None;
        if symmetry.enabled && show_axis {
            let lines = axis_segments(&symmetry, ctx.surface.width() as f64, ctx.surface.height() as f64);
            if let Some(overlay) = new_overlay(ctx.surface) {
                draw_on(&overlay, |cr| render::render_guides(cr, &lines, GRAY));
                self.guides = Some(overlay);
            }
        }
    }

    fn on_drag(&mut self, ctx: &mut DrawingContext<'_>) {
        if !ctx.is_drawing {
            return;
        }
        let resolved = ctx.resolve(&self.settings);
        let symmetry = resolved.symmetry(ctx.surface.center());
        let color = resolved.stroke_color();
        let width = resolved.size();

        let segments = symmetry.segment_images(ctx.last_pos, ctx.pos);
        draw_on(ctx.surface, |cr| {
            for (from, to) in segments {
                render::stroke_segment(cr, from, to, color, width);
            }
        });
    }

    fn on_release(&mut self, _ctx: &mut DrawingContext<'_>) {
        self.guides = None;
    }

    fn on_deactivate(&mut self) {
        if self.guides.take().is_some() {
            log::debug!("Discarded symmetry guides on deactivate");
        }
    }

    fn preview(&self) -> Option<&Surface> {
        self.guides.as_ref()
    }

    fn render_settings(&self) -> SettingsView {
        let resolved = Resolved::new(None, &self.settings);
        SettingsView::new(&self.id, "Symmetry")
            .with_core(&resolved)
            .with_symmetry_guide(&resolved)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::SymmetryKind;
    use crate::settings::SymmetryOptions;

    fn radial(points: u32, show_axis: bool) -> ToolSettings {
        let mut options = SymmetryOptions::enabled(SymmetryKind::Radial);
        options.points = Some(points);
        options.show_axis = Some(show_axis);
        ToolSettings::default()
            .with_size(6.0)
            .with_color("#ff0000")
            .with_symmetry(options)
    }

    #[test]
    fn press_drops_a_dot_on_every_image() {
        let mut surface = Surface::new(100, 100).unwrap();
        let mut tool = SymmetryTool::new("symmetry", radial(4, true));
        {
            let mut ctx = DrawingContext::at(&mut surface, (50.0, 20.0));
            ctx.is_drawing = true;
            tool.on_press(&mut ctx);
        }
        // Images of (50, 20) around (50, 50) every 90 degrees.
        for (x, y) in [(50, 20), (80, 50), (50, 80), (20, 50)] {
            assert_eq!(surface.pixel(x, y).unwrap().a, 1.0, "({x}, {y})");
        }
        assert!(tool.preview().is_some());
    }

    #[test]
    fn guides_respect_show_axis_and_clear_on_release() {
        let mut surface = Surface::new(60, 60).unwrap();
        let mut tool = SymmetryTool::new("symmetry", radial(3, false));
        {
            let mut ctx = DrawingContext::at(&mut surface, (30.0, 10.0));
            ctx.is_drawing = true;
            tool.on_press(&mut ctx);
        }
        assert!(tool.preview().is_none());

        let mut tool = SymmetryTool::new("symmetry", radial(3, true));
        {
            let mut ctx = DrawingContext::at(&mut surface, (30.0, 10.0));
            ctx.is_drawing = true;
            tool.on_press(&mut ctx);
            assert!(tool.preview().is_some());
            tool.on_release(&mut ctx);
        }
        assert!(tool.preview().is_none());
    }

    #[test]
    fn disabled_symmetry_draws_single_dot_without_guides() {
        let mut surface = Surface::new(60, 60).unwrap();
        let mut tool = SymmetryTool::new("symmetry", ToolSettings::default().with_size(6.0));
        {
            let mut ctx = DrawingContext::at(&mut surface, (10.0, 10.0));
            ctx.is_drawing = true;
            tool.on_press(&mut ctx);
        }
        assert!(tool.preview().is_none());
        assert_eq!(surface.pixel(10, 10).unwrap().a, 1.0);
        assert_eq!(surface.pixel(49, 10).unwrap().a, 0.0);
    }
}
