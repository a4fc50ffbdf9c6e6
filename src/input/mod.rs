//! Input handling and the tool dispatch loop.
//!
//! [`CanvasSession`] owns the committed drawing surface and the active tool,
//! and translates host pointer/keyboard events into tool lifecycle calls.

pub mod events;
pub mod session;

// Re-export commonly used types at module level
pub use events::{Key, MouseButton};
pub use session::{CanvasSession, SettingsCallback};
