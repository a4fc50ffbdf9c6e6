//! Three-tier settings fallback.
//!
//! Every value a tool reads is looked up in order:
//! 1. the call-time settings carried by the drawing context (the live
//!    values the host UI is editing),
//! 2. the tool instance's own settings (registry defaults merged with the
//!    caller's settings at creation time),
//! 3. the engine constants below.
//!
//! Values that are present but unusable (unparseable colors, negative sizes,
//! non-finite numbers) are skipped with a warning and the next tier is tried.

use super::{GradientOptions, PatternOptions, ShapeKind, SymmetryOptions, ToolSettings};
use crate::draw::gradient::{ColorStop, GradientSpec, normalize_stops};
use crate::draw::pattern::{DEFAULT_STONE_SEED, TileSpec};
use crate::draw::symmetry::{DEFAULT_RADIAL_POINTS, MAX_RADIAL_POINTS, effective_center};
use crate::draw::{BLACK, Color, FontDescriptor, GrainDirection, PatternKind, Symmetry};

/// Stroke width when no tier supplies one.
pub const DEFAULT_SIZE: f64 = 5.0;

/// Opacity when no tier supplies one.
pub const DEFAULT_OPACITY: f64 = 1.0;

/// Text tool font size when no tier supplies one.
pub const DEFAULT_FONT_SIZE: f64 = 24.0;

/// Text tool font family when no tier supplies one.
pub const DEFAULT_FONT_FAMILY: &str = "Sans";

/// Read-only view over the call-time and tool-level settings.
#[derive(Debug, Clone, Copy)]
pub struct Resolved<'a> {
    call: Option<&'a ToolSettings>,
    tool: &'a ToolSettings,
}

impl<'a> Resolved<'a> {
    pub fn new(call: Option<&'a ToolSettings>, tool: &'a ToolSettings) -> Self {
        Self { call, tool }
    }

    /// Tiers 1 and 2 in lookup order.
    fn tiers(&self) -> impl Iterator<Item = &'a ToolSettings> {
        self.call.into_iter().chain(std::iter::once(self.tool))
    }

    /// First tier whose value passes `valid`.
    fn pick<T>(&self, field: &str, get: impl Fn(&'a ToolSettings) -> Option<T>, valid: impl Fn(&T) -> bool) -> Option<T>
    where
        T: std::fmt::Debug,
    {
        for tier in self.tiers() {
            if let Some(value) = get(tier) {
                if valid(&value) {
                    return Some(value);
                }
                log::warn!("Ignoring invalid {} value {:?}", field, value);
            }
        }
        None
    }

    /// Stroke width in pixels.
    pub fn size(&self) -> f64 {
        self.pick("size", |s| s.size, |v| v.is_finite() && *v >= 0.0)
            .unwrap_or(DEFAULT_SIZE)
    }

    /// Base color before opacity is applied.
    pub fn color(&self) -> Color {
        for tier in self.tiers() {
            if let Some(text) = tier.color.as_deref() {
                match Color::parse(text) {
                    Ok(color) => return color,
                    Err(err) => log::warn!("{}; falling back", err),
                }
            }
        }
        BLACK
    }

    /// Opacity multiplier in `0.0..=1.0`.
    pub fn opacity(&self) -> f64 {
        self.pick("opacity", |s| s.opacity, |v| v.is_finite())
            .map(|v| v.clamp(0.0, 1.0))
            .unwrap_or(DEFAULT_OPACITY)
    }

    /// Color with the resolved opacity folded into its alpha.
    pub fn stroke_color(&self) -> Color {
        self.color().with_opacity(self.opacity())
    }

    pub fn gradient_options(&self) -> Option<&'a GradientOptions> {
        self.tiers().find_map(|s| s.gradient_options.as_ref())
    }

    pub fn pattern_options(&self) -> Option<&'a PatternOptions> {
        self.tiers().find_map(|s| s.pattern_options.as_ref())
    }

    pub fn symmetry_options(&self) -> Option<&'a SymmetryOptions> {
        self.tiers().find_map(|s| s.symmetry_options.as_ref())
    }

    pub fn shape_kind(&self) -> ShapeKind {
        self.tiers().find_map(|s| s.shape_type).unwrap_or_default()
    }

    pub fn filled(&self) -> bool {
        self.tiers().find_map(|s| s.filled).unwrap_or(false)
    }

    pub fn font_size(&self) -> f64 {
        self.pick("fontSize", |s| s.font_size, |v| v.is_finite() && *v > 0.0)
            .unwrap_or(DEFAULT_FONT_SIZE)
    }

    pub fn font(&self) -> FontDescriptor {
        let family = self
            .tiers()
            .find_map(|s| s.font_family.as_deref())
            .filter(|f| !f.trim().is_empty())
            .unwrap_or(DEFAULT_FONT_FAMILY);
        FontDescriptor::with_family(family)
    }

    /// Symmetry for a surface whose center is `surface_center`.
    ///
    /// Missing options mean symmetry is disabled; a custom axis point
    /// overrides the surface center.
    pub fn symmetry(&self, surface_center: (f64, f64)) -> Symmetry {
        let Some(options) = self.symmetry_options() else {
            return Symmetry::disabled();
        };
        let requested = options.points.unwrap_or(DEFAULT_RADIAL_POINTS);
        if requested > MAX_RADIAL_POINTS {
            log::warn!(
                "Symmetry points {} above {}, clamping",
                requested,
                MAX_RADIAL_POINTS
            );
        }
        Symmetry {
            kind: options.kind,
            enabled: options.enabled,
            points: requested.clamp(1, MAX_RADIAL_POINTS),
            center: effective_center(options.axis.map(|a| (a.x, a.y)), surface_center),
        }
    }

    /// Whether the symmetry tool should draw its axis guide.
    pub fn show_axis(&self) -> bool {
        self.symmetry_options()
            .and_then(|o| o.show_axis)
            .unwrap_or(true)
    }

    /// Gradient request from `origin` to `current`, or `None` when no
    /// gradient options are configured on any tier.
    pub fn gradient_spec(&self, origin: (f64, f64), current: (f64, f64)) -> Option<GradientSpec> {
        let options = self.gradient_options()?;
        let stops = options.stops.iter().filter_map(|stop| match Color::parse(&stop.color) {
            Ok(color) => Some(ColorStop {
                color,
                position: stop.position,
            }),
            Err(err) => {
                log::warn!("Skipping gradient stop: {}", err);
                None
            }
        });
        Some(GradientSpec {
            kind: options.kind,
            stops: normalize_stops(stops),
            origin,
            current,
            angle: options.angle.filter(|a| a.is_finite()),
        })
    }

    /// Opacity for committed gradients: the block's own opacity times the
    /// tool opacity.
    pub fn gradient_opacity(&self) -> f64 {
        let block = self
            .gradient_options()
            .map(|o| o.opacity)
            .filter(|v| v.is_finite())
            .unwrap_or(1.0);
        (block * self.opacity()).clamp(0.0, 1.0)
    }

    /// Tile parameters, or `None` when no pattern options are configured.
    ///
    /// A block without a `type` keeps `tool_kind`. Only the sub-block
    /// matching the pattern kind is consulted. `custom` patterns without a
    /// base color take the resolved tool color.
    pub fn tile_spec(&self, tool_kind: PatternKind) -> Option<TileSpec> {
        let options = self.pattern_options()?;
        let kind = options.kind.unwrap_or(tool_kind);
        let base = match options.base_color.as_deref().map(Color::parse) {
            Some(Ok(color)) => color,
            Some(Err(err)) => {
                log::warn!("{}; using pattern default", err);
                self.kind_base(kind)
            }
            None => self.kind_base(kind),
        };

        let grain = match kind {
            PatternKind::Wood => options
                .wood_options
                .as_ref()
                .map(|w| w.grain_direction)
                .unwrap_or_default(),
            _ => GrainDirection::default(),
        };
        let seed = match kind {
            PatternKind::Stone => options
                .stone_options
                .as_ref()
                .and_then(|s| s.seed)
                .unwrap_or(DEFAULT_STONE_SEED),
            _ => DEFAULT_STONE_SEED,
        };

        Some(TileSpec {
            kind,
            scale: options.scale,
            base,
            grain,
            seed,
        })
    }

    /// Opacity for pattern stamps: the block's own opacity times the tool
    /// opacity.
    pub fn pattern_opacity(&self) -> f64 {
        let block = self
            .pattern_options()
            .map(|o| o.opacity)
            .filter(|v| v.is_finite())
            .unwrap_or(1.0);
        (block * self.opacity()).clamp(0.0, 1.0)
    }

    fn kind_base(&self, kind: PatternKind) -> Color {
        match kind {
            PatternKind::Custom => self.color(),
            other => other.default_base(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{GradientKind, RED, SymmetryKind};
    use crate::settings::{AxisPoint, GradientStop, StoneOptions, WoodOptions};

    #[test]
    fn engine_defaults_when_nothing_is_set() {
        let tool = ToolSettings::default();
        let resolved = Resolved::new(None, &tool);
        assert_eq!(resolved.size(), DEFAULT_SIZE);
        assert_eq!(resolved.color(), BLACK);
        assert_eq!(resolved.opacity(), 1.0);
        assert!(!resolved.symmetry((50.0, 50.0)).enabled);
        assert_eq!(resolved.font_size(), 24.0);
        assert_eq!(resolved.font().family, "Sans");
        assert!(resolved.gradient_spec((0.0, 0.0), (1.0, 1.0)).is_none());
        assert!(resolved.tile_spec(PatternKind::Wood).is_none());
    }

    #[test]
    fn call_tier_beats_tool_tier() {
        let tool = ToolSettings::default().with_size(8.0).with_color("blue");
        let call = ToolSettings::default().with_size(20.0);
        let resolved = Resolved::new(Some(&call), &tool);
        assert_eq!(resolved.size(), 20.0);
        assert_eq!(resolved.color(), crate::draw::BLUE);
    }

    #[test]
    fn invalid_values_fall_through_to_next_tier() {
        let tool = ToolSettings::default().with_color("#ff0000").with_size(3.0);
        let call = ToolSettings::default().with_color("not-a-color").with_size(-4.0);
        let resolved = Resolved::new(Some(&call), &tool);
        assert_eq!(resolved.color(), RED);
        assert_eq!(resolved.size(), 3.0);

        let lonely = ToolSettings::default().with_color("nope");
        assert_eq!(Resolved::new(None, &lonely).color(), BLACK);
    }

    #[test]
    fn opacity_is_clamped_and_folded_into_stroke_color() {
        let tool = ToolSettings::default().with_color("red").with_opacity(1.7);
        let resolved = Resolved::new(None, &tool);
        assert_eq!(resolved.opacity(), 1.0);

        let tool = ToolSettings::default().with_color("red").with_opacity(0.25);
        let color = Resolved::new(None, &tool).stroke_color();
        assert!((color.a - 0.25).abs() < 1e-9);
    }

    #[test]
    fn symmetry_uses_custom_axis_or_surface_center() {
        let mut options = SymmetryOptions::enabled(SymmetryKind::Radial);
        options.points = Some(6);
        let tool = ToolSettings::default().with_symmetry(options.clone());
        let symmetry = Resolved::new(None, &tool).symmetry((100.0, 50.0));
        assert_eq!(symmetry.center, (100.0, 50.0));
        assert_eq!(symmetry.points, 6);

        options.axis = Some(AxisPoint { x: 10.0, y: 20.0 });
        options.points = Some(0);
        let tool = ToolSettings::default().with_symmetry(options);
        let symmetry = Resolved::new(None, &tool).symmetry((100.0, 50.0));
        assert_eq!(symmetry.center, (10.0, 20.0));
        assert_eq!(symmetry.points, 1);
    }

    #[test]
    fn symmetry_points_are_capped() {
        let mut options = SymmetryOptions::enabled(SymmetryKind::Radial);
        options.points = Some(4_000_000_000);
        let tool = ToolSettings::default().with_symmetry(options);
        let symmetry = Resolved::new(None, &tool).symmetry((100.0, 50.0));
        assert_eq!(symmetry.points, MAX_RADIAL_POINTS);
        assert_eq!(symmetry.images(1.0, 2.0).len(), MAX_RADIAL_POINTS as usize);
    }

    #[test]
    fn gradient_spec_sorts_and_skips_bad_stops() {
        let tool = ToolSettings {
            gradient_options: Some(GradientOptions {
                kind: GradientKind::Conic,
                stops: vec![
                    GradientStop::new("#0000ff", 1.0),
                    GradientStop::new("garbage", 0.5),
                    GradientStop::new("#ff0000", 0.0),
                ],
                angle: Some(90.0),
                opacity: 0.5,
            }),
            ..Default::default()
        }
        .with_opacity(0.5);
        let resolved = Resolved::new(None, &tool);
        let spec = resolved.gradient_spec((0.0, 0.0), (10.0, 0.0)).unwrap();
        assert_eq!(spec.kind, GradientKind::Conic);
        assert_eq!(spec.stops.len(), 2);
        assert_eq!(spec.stops[0].color, RED);
        assert_eq!(spec.angle, Some(90.0));
        assert!((resolved.gradient_opacity() - 0.25).abs() < 1e-9);
    }

    #[test]
    fn tile_spec_reads_only_matching_sub_block() {
        let mut options = PatternOptions::of_kind(PatternKind::Stone);
        options.wood_options = Some(WoodOptions {
            grain_direction: GrainDirection::Vertical,
            ..Default::default()
        });
        options.stone_options = Some(StoneOptions {
            seed: Some(42),
            ..Default::default()
        });
        let tool = ToolSettings {
            pattern_options: Some(options),
            ..Default::default()
        };
        let spec = Resolved::new(None, &tool).tile_spec(PatternKind::Wood).unwrap();
        assert_eq!(spec.kind, PatternKind::Stone);
        assert_eq!(spec.grain, GrainDirection::Horizontal);
        assert_eq!(spec.seed, 42);
        assert_eq!(spec.base, PatternKind::Stone.default_base());
    }

    #[test]
    fn custom_pattern_takes_tool_color() {
        let tool = ToolSettings {
            pattern_options: Some(PatternOptions::of_kind(PatternKind::Custom)),
            ..Default::default()
        }
        .with_color("red");
        let spec = Resolved::new(None, &tool).tile_spec(PatternKind::Wood).unwrap();
        assert_eq!(spec.base, RED);
    }

    #[test]
    fn untyped_pattern_block_keeps_tool_kind() {
        let tool = ToolSettings {
            pattern_options: Some(PatternOptions {
                scale: 2.0,
                ..Default::default()
            }),
            ..Default::default()
        };
        let spec = Resolved::new(None, &tool).tile_spec(PatternKind::Fabric).unwrap();
        assert_eq!(spec.kind, PatternKind::Fabric);
        assert_eq!(spec.scale, 2.0);
        assert_eq!(spec.base, PatternKind::Fabric.default_base());
    }
}
