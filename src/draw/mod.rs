//! Rendering primitives and the geometry layer (Cairo-based).
//!
//! This module holds everything the tools draw with:
//! - [`Color`]: RGBA color representation with parsing and predefined constants
//! - [`Surface`]: committed drawing surfaces and preview overlays
//! - [`symmetry`], [`gradient`], [`pattern`]: the geometric/procedural subsystems
//! - [`render`]: Cairo primitives (segments, outlines, stamps, text)

pub mod color;
pub mod font;
pub mod gradient;
pub mod pattern;
pub mod render;
pub mod surface;
pub mod symmetry;

// Re-export commonly used types at module level
pub use color::{Color, ColorParseError};
pub use font::FontDescriptor;
pub use gradient::{ColorStop, GradientFill, GradientKind, GradientSpec};
pub use pattern::{GrainDirection, PatternKind, TileSpec};
pub use surface::{Surface, SurfaceError};
pub use symmetry::{Symmetry, SymmetryKind};

#[allow(unused_imports)]
pub use color::{BLACK, BLUE, GRAY, GREEN, ORANGE, PINK, RED, TRANSPARENT, WHITE, YELLOW};
