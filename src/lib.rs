//! Drawing tool engine for raster art canvases.
//!
//! Tools are registered once in a [`tools::ToolRegistry`], instantiated
//! through a [`tools::ToolFactory`], and driven by pointer and key events
//! against a Cairo-backed [`draw::Surface`]. [`input::CanvasSession`]
//! wires those pieces into a host-agnostic dispatch loop.

pub mod config;
pub mod draw;
pub mod input;
pub mod replay;
pub mod settings;
pub mod tools;
pub mod ui;
pub mod util;

pub use config::Config;
pub use draw::{Color, Surface};
pub use input::CanvasSession;
pub use settings::ToolSettings;
pub use tools::{Tool, ToolFactory, ToolRegistry};
