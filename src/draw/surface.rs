//! Raster drawing surfaces backed by Cairo image surfaces.
//!
//! A [`Surface`] is either the committed drawing or a same-size preview
//! overlay owned by a tool. Contexts are created per draw call and dropped
//! right after, so the surface stays exclusively owned between events and
//! its pixels can be inspected or exported.

use super::color::{Color, TRANSPARENT};
use std::fs::File;
use std::path::Path;
use thiserror::Error;

/// Largest side length accepted for a surface.
pub const MAX_SURFACE_SIDE: i32 = 16_384;

/// Errors raised while acquiring or using a drawing surface.
#[derive(Debug, Error)]
pub enum SurfaceError {
    #[error("invalid surface size {width}x{height}")]
    InvalidSize { width: i32, height: i32 },

    #[error("Cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("surface data is borrowed elsewhere: {0}")]
    Borrow(#[from] cairo::BorrowError),

    #[error("failed to encode PNG: {0}")]
    Png(#[from] cairo::IoError),

    #[error("failed to write image: {0}")]
    Io(#[from] std::io::Error),
}

/// A raster surface tools paint onto.
pub struct Surface {
    image: cairo::ImageSurface,
}

impl std::fmt::Debug for Surface {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Surface")
            .field("width", &self.width())
            .field("height", &self.height())
            .finish()
    }
}

impl Surface {
    /// Creates a new fully transparent ARGB surface.
    pub fn new(width: i32, height: i32) -> Result<Self, SurfaceError> {
        if !(1..=MAX_SURFACE_SIDE).contains(&width) || !(1..=MAX_SURFACE_SIDE).contains(&height) {
            return Err(SurfaceError::InvalidSize { width, height });
        }
        let image = cairo::ImageSurface::create(cairo::Format::ARgb32, width, height)?;
        Ok(Self { image })
    }

    /// Creates a preview overlay with the same pixel dimensions.
    pub fn overlay(&self) -> Result<Self, SurfaceError> {
        Self::new(self.width(), self.height())
    }

    pub fn width(&self) -> i32 {
        self.image.width()
    }

    pub fn height(&self) -> i32 {
        self.image.height()
    }

    /// Geometric center of the surface.
    pub fn center(&self) -> (f64, f64) {
        (self.width() as f64 / 2.0, self.height() as f64 / 2.0)
    }

    /// Borrows the underlying Cairo surface (e.g. for use as a paint source).
    pub fn image(&self) -> &cairo::ImageSurface {
        &self.image
    }

    /// Acquires a fresh 2D drawing context for this surface.
    pub fn context(&self) -> Result<cairo::Context, SurfaceError> {
        let ctx = cairo::Context::new(&self.image)?;
        ctx.set_antialias(cairo::Antialias::Best);
        Ok(ctx)
    }

    /// Erases every pixel back to transparent.
    pub fn clear(&self) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Clear);
        ctx.paint()?;
        Ok(())
    }

    /// Replaces every pixel with a solid color.
    pub fn fill(&self, color: Color) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Source);
        color.apply(&ctx);
        ctx.paint()?;
        Ok(())
    }

    /// Replaces this surface's pixels with the pixels of `other`.
    pub fn copy_from(&self, other: &Surface) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_operator(cairo::Operator::Source);
        ctx.set_source_surface(&other.image, 0.0, 0.0)?;
        ctx.paint()?;
        Ok(())
    }

    /// Draws `overlay` on top of this surface at the given opacity.
    pub fn composite(&self, overlay: &Surface, opacity: f64) -> Result<(), SurfaceError> {
        let ctx = self.context()?;
        ctx.set_source_surface(&overlay.image, 0.0, 0.0)?;
        ctx.paint_with_alpha(opacity.clamp(0.0, 1.0))?;
        Ok(())
    }

    /// Returns a new surface holding a copy of this one's pixels.
    pub fn duplicate(&self) -> Result<Self, SurfaceError> {
        let copy = self.overlay()?;
        copy.copy_from(self)?;
        Ok(copy)
    }

    /// Maps a position from a scaled host view onto surface pixels.
    ///
    /// `view_width`/`view_height` are the displayed size of the surface.
    /// A non-positive view size maps the position unchanged.
    pub fn map_position(&self, x: f64, y: f64, view_width: f64, view_height: f64) -> (f64, f64) {
        let scale_x = if view_width > 0.0 {
            self.width() as f64 / view_width
        } else {
            1.0
        };
        let scale_y = if view_height > 0.0 {
            self.height() as f64 / view_height
        } else {
            1.0
        };
        (x * scale_x, y * scale_y)
    }

    /// Reads one pixel as an un-premultiplied color.
    ///
    /// Returns `None` when out of bounds or while a context still
    /// references the surface.
    pub fn pixel(&mut self, x: i32, y: i32) -> Option<Color> {
        if x < 0 || y < 0 || x >= self.width() || y >= self.height() {
            return None;
        }
        self.image.flush();
        let stride = self.image.stride() as usize;
        let data = self.image.data().ok()?;
        let offset = y as usize * stride + x as usize * 4;
        let raw = u32::from_ne_bytes([
            data[offset],
            data[offset + 1],
            data[offset + 2],
            data[offset + 3],
        ]);

        let a = (raw >> 24) & 0xff;
        if a == 0 {
            return Some(TRANSPARENT);
        }
        let unpremultiply = |c: u32| (c as f64 / a as f64).min(1.0);
        Some(Color {
            r: unpremultiply((raw >> 16) & 0xff),
            g: unpremultiply((raw >> 8) & 0xff),
            b: unpremultiply(raw & 0xff),
            a: a as f64 / 255.0,
        })
    }

    /// Returns true when no pixel carries any alpha.
    pub fn is_blank(&mut self) -> bool {
        self.image.flush();
        self.image
            .data()
            .map(|data| data.iter().all(|byte| *byte == 0))
            .unwrap_or(true)
    }

    /// Encodes the surface as PNG at `path`.
    pub fn write_png(&self, path: &Path) -> Result<(), SurfaceError> {
        let mut file = File::create(path)?;
        self.image.write_to_png(&mut file)?;
        log::info!(
            "Exported {}x{} drawing to {}",
            self.width(),
            self.height(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{BLUE, RED};

    #[test]
    fn rejects_degenerate_sizes() {
        assert!(matches!(
            Surface::new(0, 10),
            Err(SurfaceError::InvalidSize { .. })
        ));
        assert!(Surface::new(MAX_SURFACE_SIDE + 1, 1).is_err());
    }

    #[test]
    fn overlay_matches_dimensions() {
        let surface = Surface::new(120, 80).unwrap();
        let overlay = surface.overlay().unwrap();
        assert_eq!((overlay.width(), overlay.height()), (120, 80));
        assert_eq!(surface.center(), (60.0, 40.0));
    }

    #[test]
    fn fill_clear_and_pixel_readback() {
        let mut surface = Surface::new(4, 4).unwrap();
        assert!(surface.is_blank());
        surface.fill(RED).unwrap();
        assert_eq!(surface.pixel(1, 1), Some(RED));
        surface.clear().unwrap();
        assert!(surface.is_blank());
        assert_eq!(surface.pixel(9, 9), None);
    }

    #[test]
    fn composite_and_copy() {
        let mut base = Surface::new(4, 4).unwrap();
        let overlay = base.overlay().unwrap();
        overlay.fill(BLUE).unwrap();
        base.composite(&overlay, 1.0).unwrap();
        assert_eq!(base.pixel(0, 0), Some(BLUE));

        let mut copy = base.duplicate().unwrap();
        assert_eq!(copy.pixel(3, 3), Some(BLUE));
    }

    #[test]
    fn map_position_scales_from_view() {
        let surface = Surface::new(200, 100).unwrap();
        assert_eq!(surface.map_position(50.0, 25.0, 100.0, 50.0), (100.0, 50.0));
        assert_eq!(surface.map_position(7.0, 3.0, 0.0, 0.0), (7.0, 3.0));
    }
}
