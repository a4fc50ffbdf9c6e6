//! Procedural pattern tiles.
//!
//! Each pattern kind renders once into a small square tile (side =
//! [`TILE_BASE`] × scale) that is then repeated as a fill source. Tiles are
//! generated fresh for every stamp from the current settings.

use super::color::Color;
use super::surface::{Surface, SurfaceError};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Tile side length at scale 1.0.
pub const TILE_BASE: f64 = 50.0;

/// Largest tile side generated regardless of scale.
const TILE_MAX: i32 = 1024;

/// Seed used for stone speckles when none is configured.
pub const DEFAULT_STONE_SEED: u64 = 0x5eed_57a9;

/// Procedural texture kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum PatternKind {
    #[default]
    Wood,
    Stone,
    Fabric,
    Marble,
    Metal,
    Custom,
}

impl PatternKind {
    /// Base color used when the options carry none.
    pub fn default_base(self) -> Color {
        match self {
            PatternKind::Wood => Color::from_rgba8(0x8b, 0x5a, 0x2b, 0xff),
            PatternKind::Stone => Color::from_rgba8(0x80, 0x80, 0x80, 0xff),
            PatternKind::Fabric => Color::from_rgba8(0x4a, 0x6f, 0xa5, 0xff),
            PatternKind::Marble => Color::from_rgba8(0xf2, 0xf2, 0xf2, 0xff),
            PatternKind::Metal => Color::from_rgba8(0xb0, 0xb0, 0xb0, 0xff),
            PatternKind::Custom => super::color::BLACK,
        }
    }
}

/// Direction the wood grain runs across the tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GrainDirection {
    #[default]
    Horizontal,
    Vertical,
}

/// Resolved tile parameters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TileSpec {
    pub kind: PatternKind,
    pub scale: f64,
    pub base: Color,
    pub grain: GrainDirection,
    pub seed: u64,
}

impl TileSpec {
    /// Scale 1 tile of `kind` in its default base color.
    pub fn of_kind(kind: PatternKind) -> Self {
        Self {
            kind,
            scale: 1.0,
            base: kind.default_base(),
            grain: GrainDirection::default(),
            seed: DEFAULT_STONE_SEED,
        }
    }

    /// Tile side length in pixels for this spec's scale.
    pub fn side(&self) -> i32 {
        tile_side(self.scale)
    }
}

/// Side length for a scale; non-positive or non-finite scales count as 1.0.
pub fn tile_side(scale: f64) -> i32 {
    let scale = if scale.is_finite() && scale > 0.0 {
        scale
    } else {
        1.0
    };
    ((TILE_BASE * scale).round() as i32).clamp(1, TILE_MAX)
}

/// Renders one tile.
pub fn generate_tile(spec: &TileSpec) -> Result<Surface, SurfaceError> {
    let side = spec.side();
    let tile = Surface::new(side, side)?;
    tile.fill(spec.base)?;

    let ctx = tile.context()?;
    let size = side as f64;
    match spec.kind {
        PatternKind::Wood => draw_wood(&ctx, size, spec.base, spec.grain),
        PatternKind::Stone => draw_stone(&ctx, size, spec.base, spec.seed),
        PatternKind::Fabric => draw_fabric(&ctx, size, spec.base),
        PatternKind::Marble => draw_marble(&ctx, size, spec.base),
        PatternKind::Metal => draw_metal(&ctx, size, spec.base),
        PatternKind::Custom => {}
    }
    drop(ctx);

    log::debug!("Generated {:?} tile {}x{}", spec.kind, side, side);
    Ok(tile)
}

/// Wraps a tile into a repeating Cairo pattern.
pub fn tile_pattern(tile: &Surface) -> cairo::SurfacePattern {
    let pattern = cairo::SurfacePattern::create(tile.image());
    pattern.set_extend(cairo::Extend::Repeat);
    pattern
}

fn line_width(size: f64) -> f64 {
    (size / 50.0).max(1.0)
}

fn draw_wood(ctx: &cairo::Context, size: f64, base: Color, grain: GrainDirection) {
    const LINES: usize = 8;
    let grain_color = base.shade(0.7).with_opacity(0.6);
    grain_color.apply(ctx);
    ctx.set_line_width(line_width(size));

    let orient = |along: f64, across: f64| match grain {
        GrainDirection::Horizontal => (along, across),
        GrainDirection::Vertical => (across, along),
    };

    for i in 0..LINES {
        let offset = (i as f64 + 0.5) * size / LINES as f64;
        let phase = i as f64 * 0.9;
        let steps = 20;
        for step in 0..=steps {
            let along = step as f64 / steps as f64 * size;
            // Two full waves per tile keep the grain seamless at the edges.
            let across = offset + (along / size * TAU * 2.0 + phase).sin() * size * 0.03;
            let (x, y) = orient(along, across);
            if step == 0 {
                ctx.move_to(x, y);
            } else {
                ctx.line_to(x, y);
            }
        }
        let _ = ctx.stroke();
    }
}

fn draw_stone(ctx: &cairo::Context, size: f64, base: Color, seed: u64) {
    const BLOBS: usize = 25;
    let mut rng = TileRng::new(seed);
    for _ in 0..BLOBS {
        let x = rng.next_f64() * size;
        let y = rng.next_f64() * size;
        let radius = size * (0.02 + rng.next_f64() * 0.06);
        let shade = 0.6 + rng.next_f64() * 0.7;
        base.shade(shade).with_opacity(0.5).apply(ctx);
        ctx.arc(x, y, radius, 0.0, TAU);
        let _ = ctx.fill();
    }
}

fn draw_fabric(ctx: &cairo::Context, size: f64, base: Color) {
    const THREADS: usize = 10;
    let spacing = size / THREADS as f64;
    base.shade(0.75).apply(ctx);
    ctx.set_line_width(line_width(size));
    for i in 0..THREADS {
        let pos = (i as f64 + 0.5) * spacing;
        ctx.move_to(0.0, pos);
        ctx.line_to(size, pos);
        ctx.move_to(pos, 0.0);
        ctx.line_to(pos, size);
    }
    let _ = ctx.stroke();
}

fn draw_marble(ctx: &cairo::Context, size: f64, base: Color) {
    base.shade(0.55).with_opacity(0.4).apply(ctx);
    ctx.set_line_width(line_width(size) * 1.5);
    for i in 0..3 {
        let y = (i as f64 + 0.5) * size / 3.0;
        ctx.move_to(0.0, y);
        ctx.curve_to(size * 0.3, y - size * 0.2, size * 0.6, y + size * 0.2, size, y);
        let _ = ctx.stroke();
    }
}

fn draw_metal(ctx: &cairo::Context, size: f64, base: Color) {
    let sheen = cairo::LinearGradient::new(0.0, 0.0, 0.0, size);
    for (offset, factor) in [(0.0, 1.2), (0.5, 0.8), (1.0, 1.1)] {
        let c = base.shade(factor);
        sheen.add_color_stop_rgba(offset, c.r, c.g, c.b, c.a);
    }
    if ctx.set_source(&sheen).is_ok() {
        let _ = ctx.paint();
    }

    base.shade(1.3).with_opacity(0.25).apply(ctx);
    ctx.set_line_width(1.0);
    let mut y = 0.5;
    while y < size {
        ctx.move_to(0.0, y);
        ctx.line_to(size, y);
        y += 3.0;
    }
    let _ = ctx.stroke();
}

/// Small xorshift64* generator; stone speckles only need a repeatable
/// sequence, not statistical quality.
struct TileRng(u64);

impl TileRng {
    fn new(seed: u64) -> Self {
        Self(seed.max(1))
    }

    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x >> 12;
        x ^= x << 25;
        x ^= x >> 27;
        self.0 = x;
        x.wrapping_mul(0x2545_f491_4f6c_dd1d)
    }

    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}
