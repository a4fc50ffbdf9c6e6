//! Scripted drawing sessions.
//!
//! A replay script is a TOML document describing a canvas and a list of
//! strokes. Each stroke selects a tool, presses at its first point, drags
//! through the rest and releases at the last one, exactly as a pointer
//! host would. Text strokes type their text and press Return afterwards.
//!
//! ```toml
//! width = 256
//! height = 256
//! background = "white"
//!
//! [[strokes]]
//! tool = "brush"
//! settings = { size = 6.0, color = "#ff0000" }
//! points = [[20.0, 20.0], [120.0, 40.0], [200.0, 180.0]]
//! ```

use crate::config::{CanvasConfig, ColorSpec};
use crate::draw::Surface;
use crate::input::{CanvasSession, Key, MouseButton};
use crate::settings::ToolSettings;
use crate::tools::ToolFactory;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A canvas plus the strokes to replay on it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ReplayScript {
    /// Canvas width; falls back to `[canvas] width` from the config
    #[serde(default)]
    pub width: Option<u32>,

    /// Canvas height; falls back to `[canvas] height` from the config
    #[serde(default)]
    pub height: Option<u32>,

    #[serde(default)]
    pub background: Option<ColorSpec>,

    #[serde(default)]
    pub strokes: Vec<Stroke>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Stroke {
    /// Registry id of the tool to use
    pub tool: String,

    /// Caller settings merged over the tool defaults
    #[serde(default)]
    pub settings: ToolSettings,

    /// Pointer path in surface coordinates
    #[serde(default)]
    pub points: Vec<[f64; 2]>,

    /// Typed after the pointer is released, followed by Return
    #[serde(default)]
    pub text: Option<String>,
}

/// Outcome of a replay: the committed surface and how many strokes ran.
#[derive(Debug)]
pub struct ReplayOutput {
    pub surface: Surface,
    pub strokes_drawn: usize,
    pub strokes_skipped: usize,
}

impl ReplayScript {
    pub fn load(path: &Path) -> Result<Self> {
        let script_str = fs::read_to_string(path)
            .with_context(|| format!("Failed to read replay script {}", path.display()))?;
        toml::from_str(&script_str)
            .with_context(|| format!("Failed to parse replay script {}", path.display()))
    }

    /// Replays every stroke on a fresh surface.
    ///
    /// Strokes naming an unknown tool or carrying no points are skipped
    /// with a warning; the rest of the script still runs.
    pub fn run(&self, factory: ToolFactory<'_>, canvas: &CanvasConfig) -> Result<ReplayOutput> {
        let width = self.width.unwrap_or(canvas.width);
        let height = self.height.unwrap_or(canvas.height);
        let surface = Surface::new(width as i32, height as i32)
            .with_context(|| format!("Failed to create {}x{} canvas", width, height))?;

        let background = self.background.as_ref().unwrap_or(&canvas.background);
        surface
            .fill(background.to_color())
            .context("Failed to paint canvas background")?;

        let mut session = CanvasSession::new(surface, factory);
        let mut drawn = 0;
        let mut skipped = 0;

        for (index, stroke) in self.strokes.iter().enumerate() {
            if stroke.points.is_empty() {
                log::warn!("Stroke {} ({}) has no points, skipping", index, stroke.tool);
                skipped += 1;
                continue;
            }
            if !session.select_tool(&stroke.tool, &stroke.settings) {
                skipped += 1;
                continue;
            }
            play_stroke(&mut session, stroke);
            drawn += 1;
        }

        // Close any open text input before taking the surface.
        session.blur();
        log::info!("Replayed {} strokes ({} skipped)", drawn, skipped);

        Ok(ReplayOutput {
            surface: session.into_surface(),
            strokes_drawn: drawn,
            strokes_skipped: skipped,
        })
    }
}

fn play_stroke(session: &mut CanvasSession<'_>, stroke: &Stroke) {
    let (first, rest) = match stroke.points.split_first() {
        Some(split) => split,
        None => return,
    };
    let last = rest.last().unwrap_or(first);

    session.pointer_press(MouseButton::Left, first[0], first[1]);
    for point in rest {
        session.pointer_move(point[0], point[1]);
    }
    session.pointer_release(MouseButton::Left, last[0], last[1]);

    if let Some(text) = &stroke.text {
        for c in text.chars() {
            session.key_press(Key::from_char(c));
        }
        session.key_press(Key::Return);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::{RED, WHITE};
    use crate::tools::ToolRegistry;

    fn run(script: &str) -> ReplayOutput {
        let registry = ToolRegistry::builtin();
        let script: ReplayScript = toml::from_str(script).unwrap();
        script
            .run(ToolFactory::new(&registry), &CanvasConfig::default())
            .unwrap()
    }

    #[test]
    fn brush_stroke_lands_on_background() {
        let mut output = run(
            r##"
            width = 64
            height = 64
            background = "white"

            [[strokes]]
            tool = "brush"
            settings = { size = 6.0, color = "#ff0000" }
            points = [[10.0, 32.0], [54.0, 32.0]]
            "##,
        );
        assert_eq!(output.strokes_drawn, 1);
        assert_eq!(output.surface.pixel(32, 32), Some(RED));
        assert_eq!(output.surface.pixel(32, 5), Some(WHITE));
    }

    #[test]
    fn unknown_tools_and_empty_strokes_are_skipped() {
        let mut output = run(
            r##"
            width = 32
            height = 32

            [[strokes]]
            tool = "airbrush"
            points = [[1.0, 1.0]]

            [[strokes]]
            tool = "brush"
            "##,
        );
        assert_eq!(output.strokes_drawn, 0);
        assert_eq!(output.strokes_skipped, 2);
        assert!(output.surface.is_blank());
    }

    #[test]
    fn size_falls_back_to_canvas_config() {
        let output = run("");
        assert_eq!(output.surface.width(), 1024);
        assert_eq!(output.surface.height(), 1024);
    }

    #[test]
    fn text_stroke_is_typed_and_committed() {
        let mut output = run(
            r##"
            width = 200
            height = 80

            [[strokes]]
            tool = "text"
            settings = { fontSize = 32.0 }
            points = [[10.0, 10.0]]
            text = "Hi there"
            "##,
        );
        assert_eq!(output.strokes_drawn, 1);
        assert!(!output.surface.is_blank());
    }
}
