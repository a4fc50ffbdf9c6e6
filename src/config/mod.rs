//! Configuration file support for mintpaint.
//!
//! Settings are read from `~/.config/mintpaint/config.toml`: canvas defaults,
//! export location, and per-tool default overrides layered over the built-in
//! registry defaults.
//!
//! If no config file exists, sensible defaults are used automatically.

pub mod enums;
pub mod types;

pub use enums::ColorSpec;
pub use types::{CanvasConfig, ExportConfig};

use crate::draw::symmetry::MAX_RADIAL_POINTS;
use crate::settings::ToolSettings;
use crate::tools::ToolRegistry;
use anyhow::{Context, Result};
use log::{debug, info};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

const MAX_CANVAS_SIDE: u32 = 8192;
const MAX_TOOL_SIZE: f64 = 500.0;

/// Main configuration structure containing all user settings.
///
/// # Example TOML
/// ```toml
/// [canvas]
/// width = 1024
/// height = 1024
/// background = "white"
///
/// [export]
/// directory = "~/Pictures/Mintpaint"
///
/// [tools.brush]
/// size = 8.0
/// color = "#ff0000"
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default, JsonSchema)]
pub struct Config {
    /// Canvas size and background
    #[serde(default)]
    pub canvas: CanvasConfig,

    /// Output location for exported drawings
    #[serde(default)]
    pub export: ExportConfig,

    /// Per-tool default overrides keyed by tool id, shallow-merged over the
    /// built-in defaults
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub tools: BTreeMap<String, ToolSettings>,
}

impl Config {
    /// Validates and clamps all configuration values to acceptable ranges.
    ///
    /// Validated ranges:
    /// - `canvas.width`, `canvas.height`: 1 - 8192
    /// - `tools.*.size`, `tools.*.font_size`: 0.0 - 500.0
    /// - `tools.*.opacity`: 0.0 - 1.0
    /// - `tools.*.symmetryOptions.points`: 1 - 64
    ///
    /// Non-finite numbers are dropped so the engine defaults apply, and
    /// overrides for unknown tool ids are removed.
    pub fn validate_and_clamp(&mut self) {
        if !(1..=MAX_CANVAS_SIDE).contains(&self.canvas.width) {
            log::warn!(
                "Invalid canvas width {}, clamping to 1-{} range",
                self.canvas.width,
                MAX_CANVAS_SIDE
            );
            self.canvas.width = self.canvas.width.clamp(1, MAX_CANVAS_SIDE);
        }
        if !(1..=MAX_CANVAS_SIDE).contains(&self.canvas.height) {
            log::warn!(
                "Invalid canvas height {}, clamping to 1-{} range",
                self.canvas.height,
                MAX_CANVAS_SIDE
            );
            self.canvas.height = self.canvas.height.clamp(1, MAX_CANVAS_SIDE);
        }

        let known = ToolRegistry::builtin();
        self.tools.retain(|id, _| {
            let keep = known.contains(id);
            if !keep {
                log::warn!("Ignoring [tools.{}]: no such tool", id);
            }
            keep
        });

        for (id, settings) in self.tools.iter_mut() {
            clamp_field(id, "size", &mut settings.size, 0.0, MAX_TOOL_SIZE);
            clamp_field(id, "font_size", &mut settings.font_size, 0.0, MAX_TOOL_SIZE);
            clamp_field(id, "opacity", &mut settings.opacity, 0.0, 1.0);
            let points = settings
                .symmetry_options
                .as_mut()
                .and_then(|options| options.points.as_mut());
            if let Some(points) = points {
                if !(1..=MAX_RADIAL_POINTS).contains(points) {
                    log::warn!(
                        "Invalid tools.{}.symmetryOptions.points {}, clamping to 1-{} range",
                        id,
                        points,
                        MAX_RADIAL_POINTS
                    );
                    *points = (*points).clamp(1, MAX_RADIAL_POINTS);
                }
            }
        }
    }

    /// Returns the path to the configuration file.
    ///
    /// The config file is located at `~/.config/mintpaint/config.toml`.
    ///
    /// # Errors
    /// Returns an error if the config directory cannot be determined (e.g., HOME not set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("mintpaint");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads configuration from the default path, or returns defaults if
    /// the file does not exist.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;

        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        Self::load_from(&config_path)
    }

    /// Loads and validates configuration from an explicit path.
    ///
    /// # Errors
    /// Returns an error if the file cannot be read or contains invalid TOML.
    pub fn load_from(config_path: &Path) -> Result<Self> {
        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Saves the configuration to the default path.
    pub fn save(&self) -> Result<()> {
        self.save_to(&Self::get_config_path()?)
    }

    /// Serializes the configuration to TOML at `config_path`, creating the
    /// parent directory if needed.
    pub fn save_to(&self, config_path: &Path) -> Result<()> {
        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// JSON schema describing the config file, for editor tooling.
    pub fn json_schema() -> schemars::Schema {
        schemars::schema_for!(Config)
    }

    /// The built-in registry with this config's tool defaults applied.
    pub fn registry(&self) -> ToolRegistry {
        ToolRegistry::builtin().with_default_overrides(&self.tools)
    }
}

fn clamp_field(id: &str, name: &str, value: &mut Option<f64>, min: f64, max: f64) {
    let Some(current) = *value else {
        return;
    };
    if !current.is_finite() {
        log::warn!("Invalid tools.{}.{} {}, ignoring", id, name, current);
        *value = None;
    } else if !(min..=max).contains(&current) {
        log::warn!(
            "Invalid tools.{}.{} {:.2}, clamping to {}-{} range",
            id,
            name,
            current,
            min,
            max
        );
        *value = Some(current.clamp(min, max));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn missing_sections_use_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config, Config::default());
        assert_eq!(config.canvas.width, 1024);
        assert!(config.tools.is_empty());
    }

    #[test]
    fn validate_clamps_canvas_and_tool_values() {
        let mut config: Config = toml::from_str(
            r##"
            [canvas]
            width = 0
            height = 20000

            [tools.brush]
            size = 900.0
            opacity = 1.5

            [tools.eraser]
            size = -3.0
            "##,
        )
        .unwrap();
        config.validate_and_clamp();

        assert_eq!(config.canvas.width, 1);
        assert_eq!(config.canvas.height, MAX_CANVAS_SIDE);
        assert_eq!(config.tools["brush"].size, Some(MAX_TOOL_SIZE));
        assert_eq!(config.tools["brush"].opacity, Some(1.0));
        assert_eq!(config.tools["eraser"].size, Some(0.0));
    }

    #[test]
    fn validate_caps_symmetry_points() {
        let mut config: Config = toml::from_str(
            r##"
            [tools.symmetry.symmetryOptions]
            type = "radial"
            enabled = true
            points = 100000
            "##,
        )
        .unwrap();
        config.validate_and_clamp();

        let options = config.tools["symmetry"].symmetry_options.as_ref().unwrap();
        assert_eq!(options.points, Some(MAX_RADIAL_POINTS));
    }

    #[test]
    fn validate_drops_unknown_tools_and_nan() {
        let mut config = Config::default();
        config
            .tools
            .insert("airbrush".into(), ToolSettings::default().with_size(4.0));
        config
            .tools
            .insert("brush".into(), ToolSettings::default().with_size(f64::NAN));
        config.validate_and_clamp();

        assert!(!config.tools.contains_key("airbrush"));
        assert_eq!(config.tools["brush"].size, None);
    }

    #[test]
    fn save_then_load_preserves_overrides() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::default();
        config.canvas.background = ColorSpec::Name("white".into());
        config.tools.insert(
            "brush".into(),
            ToolSettings::default().with_size(9.0).with_color("#ff0000"),
        );
        config.save_to(&path).unwrap();

        let loaded = Config::load_from(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn load_reports_parse_errors_with_path() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "[canvas\nwidth = 3").unwrap();

        let err = Config::load_from(&path).unwrap_err();
        assert!(format!("{err}").contains("Failed to parse config"));
    }

    #[test]
    fn registry_applies_tool_overrides() {
        let mut config = Config::default();
        config
            .tools
            .insert("eraser".into(), ToolSettings::default().with_size(42.0));
        let registry = config.registry();
        assert_eq!(registry.get("eraser").unwrap().defaults.size, Some(42.0));
    }

    #[test]
    fn example_config_parses_without_warnings() {
        let mut config: Config = toml::from_str(include_str!("../../config.example.toml")).unwrap();
        let before = config.clone();
        config.validate_and_clamp();
        assert_eq!(config, before);
        assert_eq!(config.tools.len(), 8);
        assert_eq!(config.canvas.background.to_color(), crate::draw::TRANSPARENT);
    }

    #[test]
    fn schema_names_top_level_sections() {
        let schema = serde_json::to_value(Config::json_schema()).unwrap();
        let properties = &schema["properties"];
        assert!(properties.get("canvas").is_some());
        assert!(properties.get("tools").is_some());
    }
}
