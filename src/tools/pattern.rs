//! Procedural pattern stamps (wood, stone, fabric).

use super::{DrawingContext, Tool, draw_on};
use crate::draw::pattern::{generate_tile, tile_pattern};
use crate::draw::{PatternKind, TileSpec, render};
use crate::settings::{Resolved, ToolSettings};
use crate::ui::SettingsView;

/// Stamps a procedural texture in discs of radius `size / 2`.
///
/// The tile is regenerated from the current settings for every stamp. When
/// no pattern options are configured, or the block names no `type`, the tool
/// uses its own kind.
#[derive(Debug)]
pub struct PatternTool {
    id: String,
    kind: PatternKind,
    settings: ToolSettings,
}

impl PatternTool {
    pub fn new(id: &str, kind: PatternKind, settings: ToolSettings) -> Self {
        Self {
            id: id.to_string(),
            kind,
            settings,
        }
    }

    fn stamp(&self, ctx: &mut DrawingContext<'_>) {
        let resolved = ctx.resolve(&self.settings);
        let spec = resolved
            .tile_spec(self.kind)
            .unwrap_or_else(|| TileSpec::of_kind(self.kind));
        let radius = resolved.size() / 2.0;
        let opacity = resolved.pattern_opacity();

        let tile = match generate_tile(&spec) {
            Ok(tile) => tile,
            Err(err) => {
                log::warn!("Could not generate {:?} tile: {}", spec.kind, err);
                return;
            }
        };
        let pattern = tile_pattern(&tile);
        let center = ctx.pos;
        draw_on(ctx.surface, |cr| render::stamp_pattern(cr, &pattern, center, radius, opacity));
    }
}

impl Tool for PatternTool {
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
        self.stamp(ctx);
    }

    fn on_drag(&mut self, ctx: &mut DrawingContext<'_>) {
        if !ctx.is_drawing {
            return;
        }
        self.stamp(ctx);
    }

    fn on_release(&mut self, _ctx: &mut DrawingContext<'_>) {}

    fn render_settings(&self) -> SettingsView {
        let resolved = Resolved::new(None, &self.settings);
        let title = match self.kind {
            PatternKind::Wood => "Wood pattern",
            PatternKind::Stone => "Stone pattern",
            PatternKind::Fabric => "Fabric pattern",
            PatternKind::Marble => "Marble pattern",
            PatternKind::Metal => "Metal pattern",
            PatternKind::Custom => "Custom pattern",
        };
        let mut view = SettingsView::new(&self.id, title).with_core(&resolved);
        view.controls.truncate(1);
        view.with_pattern(&resolved, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Surface;
    use crate::settings::PatternOptions;

    fn stamp_center(settings: ToolSettings) -> crate::draw::Color {
        let mut surface = Surface::new(60, 60).unwrap();
        let mut tool = PatternTool::new("stone-pattern", PatternKind::Stone, settings);
        {
            let mut ctx = DrawingContext::at(&mut surface, (30.0, 30.0));
            ctx.is_drawing = true;
            tool.on_press(&mut ctx);
        }
        surface.pixel(30, 30).unwrap()
    }

    #[test]
    fn press_stamps_a_disc_of_half_the_size() {
        let mut surface = Surface::new(100, 100).unwrap();
        let mut tool = PatternTool::new("stone-pattern", PatternKind::Stone, ToolSettings::default().with_size(40.0));
        {
            let mut ctx = DrawingContext::at(&mut surface, (50.0, 50.0));
            ctx.is_drawing = true;
            tool.on_press(&mut ctx);
        }
        assert_eq!(surface.pixel(50, 50).unwrap().a, 1.0);
        assert_eq!(surface.pixel(50, 35).unwrap().a, 1.0);
        assert_eq!(surface.pixel(50, 5).unwrap().a, 0.0);
        assert_eq!(surface.pixel(95, 95).unwrap().a, 0.0);
    }

    #[test]
    fn untyped_block_keeps_stone_tile() {
        let untyped = ToolSettings {
            pattern_options: Some(PatternOptions::default()),
            ..ToolSettings::default().with_size(40.0)
        };
        let spec = Resolved::new(None, &untyped).tile_spec(PatternKind::Stone).unwrap();
        assert_eq!(spec.kind, PatternKind::Stone);
        assert_eq!(spec.base, PatternKind::Stone.default_base());

        let stone = ToolSettings {
            pattern_options: Some(PatternOptions::of_kind(PatternKind::Stone)),
            ..ToolSettings::default().with_size(40.0)
        };
        assert_eq!(stamp_center(untyped), stamp_center(stone));
    }

    #[test]
    fn stray_drag_does_not_stamp() {
        let mut surface = Surface::new(40, 40).unwrap();
        let mut tool = PatternTool::new("wood-pattern", PatternKind::Wood, ToolSettings::default());
        {
            let mut ctx = DrawingContext::at(&mut surface, (20.0, 20.0));
            tool.on_drag(&mut ctx);
        }
        assert!(surface.is_blank());
    }
}
