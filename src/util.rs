//! Utility functions for color names and small geometry helpers.
//!
//! This module provides:
//! - Color name lookup used by the CSS-style color parser and config file
//! - Point distance math shared by the tools
//! - Rectangle normalization for drag gestures

use crate::draw::{Color, color::*};

// ============================================================================
// Color Mapping
// ============================================================================

/// Maps color name strings to Color values.
///
/// Used by [`Color::parse`] and the configuration system.
///
/// # Supported Names (case-insensitive)
/// - "red", "green", "blue", "yellow", "orange", "pink", "white", "black",
///   "gray"/"grey", "transparent"
///
/// # Returns
/// - `Some(Color)` if the name matches a predefined color
/// - `None` if the name is not recognized
pub fn name_to_color(name: &str) -> Option<Color> {
    match name.trim().to_lowercase().as_str() {
        "red" => Some(RED),
        "green" => Some(GREEN),
        "blue" => Some(BLUE),
        "yellow" => Some(YELLOW),
        "orange" => Some(ORANGE),
        "pink" | "magenta" => Some(PINK),
        "white" => Some(WHITE),
        "black" => Some(BLACK),
        "gray" | "grey" => Some(GRAY),
        "transparent" => Some(TRANSPARENT),
        _ => None,
    }
}

// ============================================================================
// Geometry Utilities
// ============================================================================

/// Euclidean distance between two points.
pub fn distance(x1: f64, y1: f64, x2: f64, y2: f64) -> f64 {
    ((x2 - x1).powi(2) + (y2 - y1).powi(2)).sqrt()
}

/// Normalizes a drag from corner to corner into `(x, y, w, h)` with
/// non-negative width and height.
pub fn normalize_rect(x1: f64, y1: f64, x2: f64, y2: f64) -> (f64, f64, f64, f64) {
    (x1.min(x2), y1.min(y2), (x2 - x1).abs(), (y2 - y1).abs())
}

/// Distance from `(x, y)` to the farthest corner of a `width` x `height` area.
///
/// Radial and conic fills use this as the radius that covers the whole surface.
pub fn farthest_corner_distance(x: f64, y: f64, width: f64, height: f64) -> f64 {
    [(0.0, 0.0), (width, 0.0), (0.0, height), (width, height)]
        .iter()
        .map(|&(cx, cy)| distance(x, y, cx, cy))
        .fold(0.0, f64::max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_color_mappings() {
        assert_eq!(name_to_color("white").unwrap(), WHITE);
        assert_eq!(name_to_color("GREY").unwrap(), GRAY);
        assert!(name_to_color("chartreuse").is_none());
    }

    #[test]
    fn distance_is_euclidean() {
        assert_eq!(distance(50.0, 50.0, 80.0, 50.0), 30.0);
        assert_eq!(distance(0.0, 0.0, 3.0, 4.0), 5.0);
    }

    #[test]
    fn normalize_rect_handles_any_drag_direction() {
        assert_eq!(normalize_rect(30.0, 40.0, 10.0, 5.0), (10.0, 5.0, 20.0, 35.0));
        assert_eq!(normalize_rect(0.0, 0.0, 10.0, 4.0), (0.0, 0.0, 10.0, 4.0));
    }

    #[test]
    fn farthest_corner_covers_surface() {
        assert_eq!(farthest_corner_distance(0.0, 0.0, 3.0, 4.0), 5.0);
        assert_eq!(farthest_corner_distance(1.5, 2.0, 3.0, 4.0), 2.5);
    }
}
