//! Cairo-based rendering primitives used by the tools.
//!
//! Every function draws immediately onto the given context. Cairo errors from
//! `stroke`/`fill`/`paint` are ignored: a failed primitive simply leaves
//! nothing drawn.

use super::color::Color;
use super::font::FontDescriptor;
use std::f64::consts::TAU;

/// Dash pattern for previews and guides (5 on, 5 off).
const PREVIEW_DASH: [f64; 2] = [5.0, 5.0];

/// Strokes a single round-capped segment.
///
/// Round caps and joins keep consecutive drag segments visually continuous.
pub fn stroke_segment(ctx: &cairo::Context, from: (f64, f64), to: (f64, f64), color: Color, width: f64) {
    color.apply(ctx);
    ctx.set_line_width(width.max(0.0));
    ctx.set_line_cap(cairo::LineCap::Round);
    ctx.set_line_join(cairo::LineJoin::Round);

    ctx.move_to(from.0, from.1);
    ctx.line_to(to.0, to.1);
    let _ = ctx.stroke();
}

/// Fills a solid disc.
pub fn fill_circle(ctx: &cairo::Context, center: (f64, f64), radius: f64, color: Color) {
    if radius <= 0.0 {
        return;
    }
    color.apply(ctx);
    ctx.arc(center.0, center.1, radius, 0.0, TAU);
    let _ = ctx.fill();
}

/// Removes coverage along a segment using destination-out compositing.
pub fn erase_segment(ctx: &cairo::Context, from: (f64, f64), to: (f64, f64), width: f64) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::DestOut);
    stroke_segment(ctx, from, to, super::color::BLACK, width);
    let _ = ctx.restore();
}

/// Removes coverage inside a disc using destination-out compositing.
pub fn erase_circle(ctx: &cairo::Context, center: (f64, f64), radius: f64) {
    let _ = ctx.save();
    ctx.set_operator(cairo::Operator::DestOut);
    fill_circle(ctx, center, radius, super::color::BLACK);
    let _ = ctx.restore();
}

fn set_outline(ctx: &cairo::Context, color: Color, width: f64, dashed: bool) {
    color.apply(ctx);
    ctx.set_line_width(width.max(1.0));
    ctx.set_line_join(cairo::LineJoin::Miter);
    if dashed {
        ctx.set_dash(&PREVIEW_DASH, 0.0);
    } else {
        ctx.set_dash(&[], 0.0);
    }
}

/// Draws a rectangle outline (optionally dashed) or a filled rectangle.
pub fn render_rect(
    ctx: &cairo::Context,
    rect: (f64, f64, f64, f64),
    color: Color,
    width: f64,
    filled: bool,
    dashed: bool,
) {
    let (x, y, w, h) = rect;
    let _ = ctx.save();
    ctx.rectangle(x, y, w, h);
    if filled {
        color.apply(ctx);
        let _ = ctx.fill();
    } else {
        set_outline(ctx, color, width, dashed);
        let _ = ctx.stroke();
    }
    let _ = ctx.restore();
}

/// Draws a circle outline (optionally dashed) or a filled disc.
pub fn render_circle(
    ctx: &cairo::Context,
    center: (f64, f64),
    radius: f64,
    color: Color,
    width: f64,
    filled: bool,
    dashed: bool,
) {
    if radius <= 0.0 {
        return;
    }
    let _ = ctx.save();
    ctx.new_sub_path();
    ctx.arc(center.0, center.1, radius, 0.0, TAU);
    if filled {
        color.apply(ctx);
        let _ = ctx.fill();
    } else {
        set_outline(ctx, color, width, dashed);
        let _ = ctx.stroke();
    }
    let _ = ctx.restore();
}

/// Draws dashed guide lines (symmetry axes, gradient direction).
pub fn render_guides(ctx: &cairo::Context, segments: &[((f64, f64), (f64, f64))], color: Color) {
    if segments.is_empty() {
        return;
    }
    let _ = ctx.save();
    set_outline(ctx, color, 1.0, true);
    for (from, to) in segments {
        ctx.move_to(from.0, from.1);
        ctx.line_to(to.0, to.1);
    }
    let _ = ctx.stroke();
    let _ = ctx.restore();
}

/// Fills a disc with the given source pattern at `opacity`.
pub fn stamp_pattern(
    ctx: &cairo::Context,
    pattern: &cairo::SurfacePattern,
    center: (f64, f64),
    radius: f64,
    opacity: f64,
) {
    if radius <= 0.0 || opacity <= 0.0 {
        return;
    }
    let _ = ctx.save();
    ctx.arc(center.0, center.1, radius, 0.0, TAU);
    ctx.clip();
    if ctx.set_source(pattern).is_ok() {
        let _ = ctx.paint_with_alpha(opacity.min(1.0));
    }
    let _ = ctx.restore();
}

/// Renders text with its top-left corner at `(x, y)` using Pango.
///
/// Text containing newline characters is laid out across multiple lines
/// with spacing from the font metrics.
pub fn render_text(
    ctx: &cairo::Context,
    x: f64,
    y: f64,
    text: &str,
    color: Color,
    size: f64,
    font_descriptor: &FontDescriptor,
) {
    if text.is_empty() {
        return;
    }

    let _ = ctx.save();

    let layout = pangocairo::functions::create_layout(ctx);
    let font_desc = pango::FontDescription::from_string(&font_descriptor.to_pango_string(size));
    layout.set_font_description(Some(&font_desc));
    layout.set_text(text);

    color.apply(ctx);
    ctx.move_to(x, y);
    pangocairo::functions::show_layout(ctx, &layout);

    let _ = ctx.restore();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::Surface;
    use crate::draw::color::{RED, TRANSPARENT};

    #[test]
    fn erase_removes_coverage_instead_of_painting_white() {
        let mut surface = Surface::new(20, 20).unwrap();
        surface.fill(RED).unwrap();
        {
            let ctx = surface.context().unwrap();
            erase_circle(&ctx, (10.0, 10.0), 4.0);
        }
        assert_eq!(surface.pixel(10, 10), Some(TRANSPARENT));
        assert_eq!(surface.pixel(1, 1), Some(RED));
    }

    #[test]
    fn dashed_guides_leave_gaps() {
        let mut surface = Surface::new(40, 10).unwrap();
        {
            let ctx = surface.context().unwrap();
            render_guides(&ctx, &[((0.0, 5.0), (40.0, 5.0))], RED);
        }
        assert!(surface.pixel(2, 5).unwrap().a > 0.0);
        assert_eq!(surface.pixel(7, 5).unwrap().a, 0.0);
        assert!(surface.pixel(12, 5).unwrap().a > 0.0);
    }

    #[test]
    fn zero_radius_draws_nothing() {
        let mut surface = Surface::new(10, 10).unwrap();
        {
            let ctx = surface.context().unwrap();
            fill_circle(&ctx, (5.0, 5.0), 0.0, RED);
            render_circle(&ctx, (5.0, 5.0), 0.0, RED, 2.0, false, false);
        }
        assert!(surface.is_blank());
    }
}
