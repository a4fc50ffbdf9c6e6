//! Configuration type definitions.

use super::enums::ColorSpec;
use chrono::{DateTime, Local};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Canvas defaults used by the CLI host when no script overrides them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct CanvasConfig {
    /// Canvas width in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_side")]
    pub width: u32,

    /// Canvas height in pixels (valid range: 1 - 8192)
    #[serde(default = "default_canvas_side")]
    pub height: u32,

    /// Background painted before any stroke - a color name, `#rrggbb`
    /// string, or an RGB(A) array. Defaults to transparent.
    #[serde(default)]
    pub background: ColorSpec,
}

impl Default for CanvasConfig {
    fn default() -> Self {
        Self {
            width: default_canvas_side(),
            height: default_canvas_side(),
            background: ColorSpec::default(),
        }
    }
}

/// Where finished drawings are written.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, JsonSchema)]
pub struct ExportConfig {
    /// Output directory; a leading `~` expands to the home directory
    #[serde(default = "default_export_directory")]
    pub directory: String,

    /// chrono format string for file names, without extension
    /// (e.g. "drawing_%Y-%m-%d_%H%M%S")
    #[serde(default = "default_filename_template")]
    pub filename_template: String,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            directory: default_export_directory(),
            filename_template: default_filename_template(),
        }
    }
}

impl ExportConfig {
    /// The output directory with `~` expanded.
    pub fn resolved_directory(&self) -> PathBuf {
        if let Some(rest) = self.directory.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(rest);
            }
        } else if self.directory == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
        PathBuf::from(&self.directory)
    }

    /// Full PNG path for a drawing exported at `now`.
    pub fn output_path(&self, now: DateTime<Local>) -> PathBuf {
        let name = now.format(&self.filename_template).to_string();
        self.resolved_directory().join(format!("{name}.png"))
    }
}

// =============================================================================
// Default value functions
// =============================================================================

fn default_canvas_side() -> u32 {
    1024
}

fn default_export_directory() -> String {
    "~/Pictures/Mintpaint".to_string()
}

fn default_filename_template() -> String {
    "drawing_%Y-%m-%d_%H%M%S".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn output_path_formats_template() {
        let export = ExportConfig {
            directory: "/tmp/art".into(),
            filename_template: "drawing_%Y%m%d".into(),
        };
        let when = Local.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap();
        assert_eq!(export.output_path(when), PathBuf::from("/tmp/art/drawing_20240309.png"));
    }

    #[test]
    fn tilde_expands_to_home() {
        let export = ExportConfig::default();
        if let Some(home) = dirs::home_dir() {
            assert_eq!(export.resolved_directory(), home.join("Pictures/Mintpaint"));
        }
    }
}
