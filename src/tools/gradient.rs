//! Linear, radial and conic gradient fills.

use super::{DrawingContext, Point, Tool, draw_on, new_overlay};
use crate::draw::gradient::normalize_stops;
use crate::draw::{ColorStop, GRAY, GradientKind, GradientSpec, Surface, render};
use crate::settings::{Resolved, ToolSettings};
use crate::ui::SettingsView;

/// Preview fills are painted at this fraction of the committed opacity.
const PREVIEW_OPACITY_FACTOR: f64 = 0.5;

/// Radius of the reference-point marker in the preview indicator.
const MARKER_RADIUS: f64 = 4.0;

/// Full-surface gradient fill anchored at the press position.
///
/// The press position is the start of the gradient vector for linear fills
/// and the center for radial and conic fills. One struct serves all three
/// kinds; the kind is fixed per registry entry.
#[derive(Debug)]
pub struct GradientTool {
    id: String,
    kind: GradientKind,
    settings: ToolSettings,
    origin: Option<Point>,
    preview: Option<Surface>,
}

impl GradientTool {
    pub fn new(id: &str, kind: GradientKind, settings: ToolSettings) -> Self {
        Self {
            id: id.to_string(),
            kind,
            settings,
            origin: None,
            preview: None,
        }
    }

    pub fn kind(&self) -> GradientKind {
        self.kind
    }

    /// Gradient request for this tool's kind. Without gradient options the
    /// fill fades from the tool color to transparent.
    fn spec(&self, resolved: &Resolved<'_>, origin: Point, current: Point) -> GradientSpec {
        let mut spec = resolved.gradient_spec(origin, current).unwrap_or_else(|| {
            let color = resolved.color();
            GradientSpec {
                kind: self.kind,
                stops: normalize_stops([
                    ColorStop {
                        color,
                        position: 0.0,
                    },
                    ColorStop {
                        color: color.with_opacity(0.0),
                        position: 1.0,
                    },
                ]),
                origin,
                current,
                angle: None,
            }
        });
        spec.kind = self.kind;
        spec
    }

    fn draw_preview(&self, ctx: &DrawingContext<'_>) {
        let (Some(origin), Some(overlay)) = (self.origin, self.preview.as_ref()) else {
            return;
        };
        let resolved = ctx.resolve(&self.settings);
        let spec = self.spec(&resolved, origin, ctx.pos);
        let opacity = resolved.gradient_opacity() * PREVIEW_OPACITY_FACTOR;
        let (width, height) = (overlay.width() as f64, overlay.height() as f64);

        if let Err(err) = overlay.clear() {
            log::warn!("Could not clear gradient preview: {}", err);
            return;
        }
        let fill = spec.build(width, height);
        draw_on(overlay, |cr| {
            match fill.set_source(cr) {
                Ok(()) => {
                    let _ = cr.paint_with_alpha(opacity);
                }
                Err(err) => log::warn!("Gradient source rejected: {}", err),
            }
            draw_indicator(cr, &spec, width, height);
        });
    }
}

/// Direction/radius/angle guide drawn over the preview fill.
fn draw_indicator(cr: &cairo::Context, spec: &GradientSpec, width: f64, height: f64) {
    match spec.kind {
        GradientKind::Linear => {
            let (from, to) = spec.linear_endpoints(width, height);
            render::render_guides(cr, &[(from, to)], GRAY);
        }
        GradientKind::Radial => {
            let radius = spec.radius(width, height);
            render::render_circle(cr, spec.origin, radius, GRAY, 1.0, false, true);
            render::render_guides(cr, &[(spec.origin, spec.current)], GRAY);
        }
        GradientKind::Conic => {
            let angle = spec.sweep_start();
            let reach = crate::util::farthest_corner_distance(spec.origin.0, spec.origin.1, width, height);
            let end = (
                spec.origin.0 + angle.cos() * reach,
                spec.origin.1 + angle.sin() * reach,
            );
            render::render_guides(cr, &[(spec.origin, end)], GRAY);
        }
    }
    render::fill_circle(cr, spec.origin, MARKER_RADIUS, GRAY);
}

impl Tool for GradientTool {
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
        self.origin = Some(ctx.pos);
        self.preview = new_overlay(ctx.surface);
        self.draw_preview(ctx);
    }

    fn on_drag(&mut self, ctx: &mut DrawingContext<'_>) {
        if !ctx.is_drawing {
            return;
        }
        self.draw_preview(ctx);
    }

    fn on_release(&mut self, ctx: &mut DrawingContext<'_>) {
        let origin = self.origin.take();
        if self.preview.take().is_some() {
            log::debug!("Discarded gradient preview overlay");
        }
        let Some(origin) = origin else {
            return;
        };
        if !ctx.is_drawing {
            return;
        }

        let resolved = ctx.resolve(&self.settings);
        let spec = self.spec(&resolved, origin, ctx.pos);
        let opacity = resolved.gradient_opacity();
        let fill = spec.build(ctx.surface.width() as f64, ctx.surface.height() as f64);
        draw_on(ctx.surface, |cr| match fill.set_source(cr) {
            Ok(()) => {
                let _ = cr.paint_with_alpha(opacity);
            }
            Err(err) => log::warn!("Gradient source rejected: {}", err),
        });
        log::debug!("Committed {:?} gradient at opacity {:.2}", self.kind, opacity);
    }

    fn on_deactivate(&mut self) {
        self.origin = None;
        if self.preview.take().is_some() {
            log::debug!("Discarded gradient preview on deactivate");
        }
    }

    fn preview(&self) -> Option<&Surface> {
        self.preview.as_ref()
    }

    fn render_settings(&self) -> SettingsView {
        let resolved = Resolved::new(None, &self.settings);
        let title = match self.kind {
            GradientKind::Linear => "Linear gradient",
            GradientKind::Radial => "Radial gradient",
            GradientKind::Conic => "Conic gradient",
        };
        let mut view = SettingsView::new(&self.id, title).with_core(&resolved);
        // Stroke size does not apply to fills.
        view.controls.remove(0);
        view.with_gradient(&resolved)
    }
}
