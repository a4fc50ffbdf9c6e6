//! Gradient construction on top of Cairo gradient patterns.
//!
//! Linear and radial fills map directly onto Cairo's gradient patterns.
//! Cairo has no conic primitive, so conic fills are built as a fan of mesh
//! patches sweeping around the center; each slice interpolates between the
//! colors sampled at its two bounding angles.

use super::color::{BLACK, Color, WHITE};
use crate::util;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Widest angular slice of a conic mesh, in radians (2 degrees).
const CONIC_MAX_SLICE: f64 = TAU / 180.0;

/// Kind of gradient fill.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum GradientKind {
    #[default]
    Linear,
    Radial,
    Conic,
}

/// A resolved gradient stop: parsed color plus position in `0.0..=1.0`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ColorStop {
    pub color: Color,
    pub position: f64,
}

/// Clamps positions to `0..=1` and orders stops by ascending position.
///
/// Stops sharing a position keep their input order. Fewer than two stops are
/// padded so the result always spans at least two anchors: a single stop
/// becomes a solid ramp, none at all falls back to black-to-white.
pub fn normalize_stops(stops: impl IntoIterator<Item = ColorStop>) -> Vec<ColorStop> {
    let mut stops: Vec<ColorStop> = stops
        .into_iter()
        .filter(|s| s.position.is_finite())
        .map(|s| ColorStop {
            position: s.position.clamp(0.0, 1.0),
            ..s
        })
        .collect();
    stops.sort_by(|a, b| a.position.total_cmp(&b.position));

    match stops.len() {
        0 => vec![
            ColorStop {
                color: BLACK,
                position: 0.0,
            },
            ColorStop {
                color: WHITE,
                position: 1.0,
            },
        ],
        1 => {
            let color = stops[0].color;
            vec![
                ColorStop {
                    color,
                    position: 0.0,
                },
                ColorStop {
                    color,
                    position: 1.0,
                },
            ]
        }
        _ => stops,
    }
}

/// Samples sorted stops at `t` (clamped to `0..=1`).
pub fn sample(stops: &[ColorStop], t: f64) -> Color {
    let t = t.clamp(0.0, 1.0);
    let Some(first) = stops.first() else {
        return BLACK;
    };
    if t <= first.position {
        return first.color;
    }

    for pair in stops.windows(2) {
        let (a, b) = (pair[0], pair[1]);
        if t <= b.position {
            let span = b.position - a.position;
            if span <= f64::EPSILON {
                return b.color;
            }
            return a.color.lerp(b.color, (t - a.position) / span);
        }
    }

    stops.last().map(|s| s.color).unwrap_or(BLACK)
}

/// A ready-to-use gradient source.
pub enum GradientFill {
    Linear(cairo::LinearGradient),
    Radial(cairo::RadialGradient),
    Conic(cairo::Mesh),
}

impl GradientFill {
    /// Installs the gradient as the source of `ctx`.
    pub fn set_source(&self, ctx: &cairo::Context) -> Result<(), cairo::Error> {
        match self {
            GradientFill::Linear(pattern) => ctx.set_source(pattern),
            GradientFill::Radial(pattern) => ctx.set_source(pattern),
            GradientFill::Conic(pattern) => ctx.set_source(pattern),
        }
    }
}

fn add_stops(gradient: &cairo::Gradient, stops: &[ColorStop]) {
    for stop in stops {
        let c = stop.color;
        gradient.add_color_stop_rgba(stop.position, c.r, c.g, c.b, c.a);
    }
}

/// Linear gradient along the vector `from` → `to`.
pub fn linear_gradient(stops: &[ColorStop], from: (f64, f64), to: (f64, f64)) -> cairo::LinearGradient {
    let gradient = cairo::LinearGradient::new(from.0, from.1, to.0, to.1);
    add_stops(&gradient, stops);
    gradient
}

/// Radial gradient from `center` outward to `radius`.
pub fn radial_gradient(stops: &[ColorStop], center: (f64, f64), radius: f64) -> cairo::RadialGradient {
    let gradient = cairo::RadialGradient::new(center.0, center.1, 0.0, center.0, center.1, radius.max(1.0));
    add_stops(&gradient, stops);
    gradient
}

/// Conic (sweep) gradient around `center`, starting at `start_angle`
/// radians and covering a disc of `radius`.
pub fn conic_gradient(stops: &[ColorStop], center: (f64, f64), start_angle: f64, radius: f64) -> cairo::Mesh {
    let mesh = cairo::Mesh::new();
    let slices = (TAU / CONIC_MAX_SLICE).ceil() as usize;
    let radius = radius.max(1.0);
    let (cx, cy) = center;
    let point_at = |angle: f64| (cx + radius * angle.cos(), cy + radius * angle.sin());

    for i in 0..slices {
        let t0 = i as f64 / slices as f64;
        let t1 = (i + 1) as f64 / slices as f64;
        let (x0, y0) = point_at(start_angle + t0 * TAU);
        let (x1, y1) = point_at(start_angle + t1 * TAU);
        let c0 = sample(stops, t0);
        let c1 = sample(stops, t1);

        mesh.begin_patch();
        mesh.move_to(cx, cy);
        mesh.line_to(x0, y0);
        mesh.line_to(x1, y1);
        mesh.line_to(cx, cy);
        mesh.set_corner_color_rgba(cairo::MeshCorner::MeshCorner0, c0.r, c0.g, c0.b, c0.a);
        mesh.set_corner_color_rgba(cairo::MeshCorner::MeshCorner1, c0.r, c0.g, c0.b, c0.a);
        mesh.set_corner_color_rgba(cairo::MeshCorner::MeshCorner2, c1.r, c1.g, c1.b, c1.a);
        mesh.set_corner_color_rgba(cairo::MeshCorner::MeshCorner3, c1.r, c1.g, c1.b, c1.a);
        mesh.end_patch();
    }

    mesh
}

/// Gradient request produced by a gradient tool from its reference point
/// (start for linear, center for radial/conic) and the current pointer.
#[derive(Debug, Clone, PartialEq)]
pub struct GradientSpec {
    pub kind: GradientKind,
    pub stops: Vec<ColorStop>,
    pub origin: (f64, f64),
    pub current: (f64, f64),
    /// Angle in degrees for clicks without a drag (linear) or the sweep
    /// start when there is no drag (conic).
    pub angle: Option<f64>,
}

impl GradientSpec {
    fn drag_length(&self) -> f64 {
        util::distance(self.origin.0, self.origin.1, self.current.0, self.current.1)
    }

    fn drag_angle(&self) -> Option<f64> {
        if self.drag_length() < 1.0 {
            return None;
        }
        Some((self.current.1 - self.origin.1).atan2(self.current.0 - self.origin.0))
    }

    /// Endpoints of the linear gradient vector.
    ///
    /// Without a drag the vector spans the whole surface through its center
    /// along `angle` (default 0°, left to right).
    pub fn linear_endpoints(&self, width: f64, height: f64) -> ((f64, f64), (f64, f64)) {
        if self.drag_length() >= 1.0 {
            return (self.origin, self.current);
        }
        let (sin, cos) = self.angle.unwrap_or(0.0).to_radians().sin_cos();
        let reach = (width * cos.abs() + height * sin.abs()) / 2.0;
        let (cx, cy) = (width / 2.0, height / 2.0);
        ((cx - cos * reach, cy - sin * reach), (cx + cos * reach, cy + sin * reach))
    }

    /// Radius of the radial gradient: drag length, or the distance to the
    /// farthest corner when there was no drag.
    pub fn radius(&self, width: f64, height: f64) -> f64 {
        let length = self.drag_length();
        if length >= 1.0 {
            length
        } else {
            util::farthest_corner_distance(self.origin.0, self.origin.1, width, height)
        }
    }

    /// Start angle of the conic sweep in radians.
    pub fn sweep_start(&self) -> f64 {
        self.drag_angle()
            .unwrap_or_else(|| self.angle.unwrap_or(0.0).to_radians())
    }

    /// Builds the Cairo source covering a `width` x `height` surface.
    pub fn build(&self, width: f64, height: f64) -> GradientFill {
        match self.kind {
            GradientKind::Linear => {
                let (from, to) = self.linear_endpoints(width, height);
                GradientFill::Linear(linear_gradient(&self.stops, from, to))
            }
            GradientKind::Radial => {
                GradientFill::Radial(radial_gradient(&self.stops, self.origin, self.radius(width, height)))
            }
            GradientKind::Conic => {
                if width <= 0.0 || height <= 0.0 {
                    log::debug!("Conic gradient on an empty surface, using radial fallback");
                    return GradientFill::Radial(radial_gradient(&self.stops, self.origin, 1.0));
                }
                let reach = util::farthest_corner_distance(self.origin.0, self.origin.1, width, height);
                GradientFill::Conic(conic_gradient(&self.stops, self.origin, self.sweep_start(), reach))
            }
        }
    }
}
