//! Symmetry transforms: mirrored and rotated images of a point.
//!
//! [`symmetry_points`] is the single source of truth for both stroke fan-out
//! and the axis guide ([`axis_segments`]), so strokes and guides never drift
//! apart.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::f64::consts::TAU;

/// Default number of images for radial symmetry.
pub const DEFAULT_RADIAL_POINTS: u32 = 4;

/// Upper bound on radial images per input point.
pub const MAX_RADIAL_POINTS: u32 = 64;

/// Kind of symmetry applied to strokes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum SymmetryKind {
    /// Mirror across the horizontal line through the center (y is reflected)
    Horizontal,
    /// Mirror across the vertical line through the center (x is reflected)
    #[default]
    Vertical,
    /// Both mirrors at once (four images)
    Bilateral,
    /// `n` images rotated evenly around the center
    Radial,
}

/// Fully resolved symmetry parameters for one drawing operation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Symmetry {
    pub kind: SymmetryKind,
    pub enabled: bool,
    /// Image count for radial symmetry (at least 1)
    pub points: u32,
    /// Center of reflection/rotation in surface coordinates
    pub center: (f64, f64),
}

impl Symmetry {
    /// The identity transform: every operation yields the original point.
    pub fn disabled() -> Self {
        Self {
            kind: SymmetryKind::default(),
            enabled: false,
            points: DEFAULT_RADIAL_POINTS,
            center: (0.0, 0.0),
        }
    }

    /// Images of `(x, y)` under this symmetry. The first image is always the
    /// original point.
    pub fn images(&self, x: f64, y: f64) -> Vec<(f64, f64)> {
        symmetry_points(self, x, y)
    }

    /// Images of a segment, paired by index so that image `i` of the start
    /// connects to image `i` of the end.
    pub fn segment_images(&self, from: (f64, f64), to: (f64, f64)) -> Vec<((f64, f64), (f64, f64))> {
        let starts = self.images(from.0, from.1);
        let ends = self.images(to.0, to.1);
        starts.into_iter().zip(ends).collect()
    }
}

/// Center used for every image of one operation: the custom axis point when
/// it is finite, otherwise the surface midpoint.
pub fn effective_center(axis: Option<(f64, f64)>, surface_center: (f64, f64)) -> (f64, f64) {
    axis.filter(|(x, y)| x.is_finite() && y.is_finite())
        .unwrap_or(surface_center)
}

/// Returns one point per symmetry image of `(x, y)`.
///
/// When disabled, returns exactly the original point.
pub fn symmetry_points(symmetry: &Symmetry, x: f64, y: f64) -> Vec<(f64, f64)> {
    if !symmetry.enabled {
        return vec![(x, y)];
    }

    let (cx, cy) = symmetry.center;
    match symmetry.kind {
        SymmetryKind::Horizontal => vec![(x, y), (x, 2.0 * cy - y)],
        SymmetryKind::Vertical => vec![(x, y), (2.0 * cx - x, y)],
        SymmetryKind::Bilateral => vec![
            (x, y),
            (2.0 * cx - x, y),
            (x, 2.0 * cy - y),
            (2.0 * cx - x, 2.0 * cy - y),
        ],
        SymmetryKind::Radial => {
            let n = symmetry.points.clamp(1, MAX_RADIAL_POINTS);
            let (dx, dy) = (x - cx, y - cy);
            (0..n)
                .map(|i| {
                    let angle = i as f64 * TAU / n as f64;
                    let (sin, cos) = angle.sin_cos();
                    (cx + dx * cos - dy * sin, cy + dx * sin + dy * cos)
                })
                .collect()
        }
    }
}

/// Guide lines for the symmetry axes, clipped to a `width` x `height` area.
///
/// Mirror kinds yield their mirror lines; radial yields one spoke per image,
/// produced by transforming a reference point above the center with
/// [`symmetry_points`]. Disabled symmetry yields no lines.
pub fn axis_segments(symmetry: &Symmetry, width: f64, height: f64) -> Vec<((f64, f64), (f64, f64))> {
    if !symmetry.enabled {
        return Vec::new();
    }

    let (cx, cy) = symmetry.center;
    let horizontal_line = ((0.0, cy), (width, cy));
    let vertical_line = ((cx, 0.0), (cx, height));

    match symmetry.kind {
        SymmetryKind::Horizontal => vec![horizontal_line],
        SymmetryKind::Vertical => vec![vertical_line],
        SymmetryKind::Bilateral => vec![horizontal_line, vertical_line],
        SymmetryKind::Radial => {
            let reach = crate::util::farthest_corner_distance(cx, cy, width, height);
            symmetry_points(symmetry, cx, cy - reach)
                .into_iter()
                .map(|end| ((cx, cy), end))
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-9;

    #[test]
    fn effective_center_ignores_non_finite_axis() {
        assert_eq!(effective_center(Some((3.0, 4.0)), (50.0, 50.0)), (3.0, 4.0));
        assert_eq!(effective_center(Some((f64::NAN, 4.0)), (50.0, 50.0)), (50.0, 50.0));
        assert_eq!(effective_center(None, (50.0, 50.0)), (50.0, 50.0));
    }

    fn sym(kind: SymmetryKind, points: u32) -> Symmetry {
        Symmetry {
            kind,
            enabled: true,
            points,
            center: (100.0, 60.0),
        }
    }

    #[test]
    fn disabled_is_identity_for_every_kind() {
        for kind in [
            SymmetryKind::Horizontal,
            SymmetryKind::Vertical,
            SymmetryKind::Bilateral,
            SymmetryKind::Radial,
        ] {
            let s = Symmetry {
                enabled: false,
                ..sym(kind, 8)
            };
            assert_eq!(symmetry_points(&s, 13.5, -7.25), vec![(13.5, -7.25)]);
            assert!(axis_segments(&s, 200.0, 120.0).is_empty());
        }
    }

    #[test]
    fn horizontal_reflection_is_an_involution() {
        let s = sym(SymmetryKind::Horizontal, 0);
        let images = symmetry_points(&s, 30.0, 20.0);
        assert_eq!(images, vec![(30.0, 20.0), (30.0, 100.0)]);
        let (rx, ry) = images[1];
        let back = symmetry_points(&s, rx, ry);
        assert_eq!(back[1], (30.0, 20.0));
    }

    #[test]
    fn vertical_reflects_x_about_center() {
        let s = sym(SymmetryKind::Vertical, 0);
        assert_eq!(
            symmetry_points(&s, 120.0, 50.0),
            vec![(120.0, 50.0), (80.0, 50.0)]
        );
    }

    #[test]
    fn bilateral_yields_four_combinations() {
        let s = sym(SymmetryKind::Bilateral, 0);
        let images = symmetry_points(&s, 110.0, 70.0);
        assert_eq!(
            images,
            vec![(110.0, 70.0), (90.0, 70.0), (110.0, 50.0), (90.0, 50.0)]
        );
    }

    #[test]
    fn radial_images_rotate_into_each_other_and_center_on_axis() {
        for n in [2_u32, 3, 4, 6, 7] {
            let s = sym(SymmetryKind::Radial, n);
            let images = symmetry_points(&s, 140.0, 45.0);
            assert_eq!(images.len(), n as usize);

            let (sx, sy) = images
                .iter()
                .fold((0.0, 0.0), |acc, p| (acc.0 + p.0, acc.1 + p.1));
            assert!((sx / n as f64 - 100.0).abs() < 1e-6);
            assert!((sy / n as f64 - 60.0).abs() < 1e-6);

            let step = TAU / n as f64;
            let (sin, cos) = step.sin_cos();
            for i in 0..n as usize {
                let (x, y) = images[i];
                let (dx, dy) = (x - 100.0, y - 60.0);
                let rotated = (100.0 + dx * cos - dy * sin, 60.0 + dx * sin + dy * cos);
                let next = images[(i + 1) % n as usize];
                assert!((rotated.0 - next.0).abs() < 1e-6);
                assert!((rotated.1 - next.1).abs() < 1e-6);
            }
        }
    }

    #[test]
    fn radial_first_image_is_original() {
        let s = sym(SymmetryKind::Radial, 5);
        let images = symmetry_points(&s, 10.0, 20.0);
        assert!((images[0].0 - 10.0).abs() < EPS);
        assert!((images[0].1 - 20.0).abs() < EPS);
    }

    #[test]
    fn radial_image_count_is_capped() {
        let s = sym(SymmetryKind::Radial, u32::MAX);
        assert_eq!(
            symmetry_points(&s, 10.0, 20.0).len(),
            MAX_RADIAL_POINTS as usize
        );
    }

    #[test]
    fn transform_is_deterministic() {
        let s = sym(SymmetryKind::Radial, 9);
        assert_eq!(
            symmetry_points(&s, 1.25, 3.5),
            symmetry_points(&s, 1.25, 3.5)
        );
    }

    #[test]
    fn segment_images_pair_by_index() {
        let s = sym(SymmetryKind::Vertical, 0);
        let pairs = s.segment_images((100.0, 50.0), (120.0, 50.0));
        assert_eq!(
            pairs,
            vec![
                ((100.0, 50.0), (120.0, 50.0)),
                ((100.0, 50.0), (80.0, 50.0))
            ]
        );
    }

    #[test]
    fn axis_segments_follow_kind() {
        let h = axis_segments(&sym(SymmetryKind::Horizontal, 0), 200.0, 120.0);
        assert_eq!(h, vec![((0.0, 60.0), (200.0, 60.0))]);
        let b = axis_segments(&sym(SymmetryKind::Bilateral, 0), 200.0, 120.0);
        assert_eq!(b.len(), 2);
        let r = axis_segments(&sym(SymmetryKind::Radial, 6), 200.0, 120.0);
        assert_eq!(r.len(), 6);
        assert!(r.iter().all(|(start, _)| *start == (100.0, 60.0)));
    }
}
