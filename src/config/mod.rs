//! Configuration file support for overscribe.
//!
//! Loads and validates user settings from
//! `~/.config/overscribe/config.toml`: drawing defaults, the hotkey
//! combination and activation mode, and eraser sizing. A missing file is not
//! an error; defaults apply.

pub mod enums;
pub mod runtime;
pub mod types;

// Re-export commonly used types at module level
pub use enums::{ActivationMode, ColorSpec};
pub use runtime::{Settings, SettingsChange, SettingsHandle};
pub use types::{DrawingConfig, EraserConfig, HotkeyConfig};

use crate::draw::FontDescriptor;
use crate::input::key;
use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Root of the user configuration, deserialized from the TOML file.
///
/// Every field defaults sensibly, so a partial (or absent) file is fine.
///
/// # Example TOML
/// ```toml
/// [drawing]
/// default_color = "red"
/// default_thickness = 3.0
/// default_font_size = 32.0
///
/// [eraser]
/// size = 24.0
///
/// [hotkey]
/// keys = ["ControlLeft", "Alt", "D"]
/// mode = "hold"
/// ```
#[derive(Debug, Serialize, Deserialize, Default)]
pub struct Config {
    /// Drawing tool defaults (color, thickness, font)
    #[serde(default)]
    pub drawing: DrawingConfig,

    /// Eraser sizing
    #[serde(default)]
    pub eraser: EraserConfig,

    /// Hotkey combination and activation mode
    #[serde(default)]
    pub hotkey: HotkeyConfig,
}

impl Config {
    /// Clamps every loaded value into a range the tool engine can work with.
    ///
    /// Out-of-range values are pulled to the nearest bound with a warning
    /// rather than failing the load; an unusable hotkey falls back to the
    /// default combination. Thickness bounds live in 1.0 - 50.0 (min <= max,
    /// with the default thickness inside them), font size in 8.0 - 72.0, and
    /// the eraser side in 4.0 - 200.0.
    fn validate_and_clamp(&mut self) {
        // Thickness bounds first, so the default can clamp into them
        if !(1.0..=50.0).contains(&self.drawing.thickness_min) {
            log::warn!(
                "Invalid thickness_min {:.1}, clamping to 1.0-50.0 range",
                self.drawing.thickness_min
            );
            self.drawing.thickness_min = self.drawing.thickness_min.clamp(1.0, 50.0);
        }
        if !(1.0..=50.0).contains(&self.drawing.thickness_max) {
            log::warn!(
                "Invalid thickness_max {:.1}, clamping to 1.0-50.0 range",
                self.drawing.thickness_max
            );
            self.drawing.thickness_max = self.drawing.thickness_max.clamp(1.0, 50.0);
        }
        if self.drawing.thickness_min > self.drawing.thickness_max {
            log::warn!(
                "thickness_min {:.1} exceeds thickness_max {:.1}; swapping",
                self.drawing.thickness_min,
                self.drawing.thickness_max
            );
            std::mem::swap(
                &mut self.drawing.thickness_min,
                &mut self.drawing.thickness_max,
            );
        }

        let (t_min, t_max) = (self.drawing.thickness_min, self.drawing.thickness_max);
        if !(t_min..=t_max).contains(&self.drawing.default_thickness) {
            log::warn!(
                "Invalid default_thickness {:.1}, clamping to {:.1}-{:.1} range",
                self.drawing.default_thickness,
                t_min,
                t_max
            );
            self.drawing.default_thickness = self.drawing.default_thickness.clamp(t_min, t_max);
        }

        // Font size: 8.0 - 72.0
        if !(8.0..=72.0).contains(&self.drawing.default_font_size) {
            log::warn!(
                "Invalid default_font_size {:.1}, clamping to 8.0-72.0 range",
                self.drawing.default_font_size
            );
            self.drawing.default_font_size = self.drawing.default_font_size.clamp(8.0, 72.0);
        }

        // Eraser size: 4.0 - 200.0
        if !(4.0..=200.0).contains(&self.eraser.size) {
            log::warn!(
                "Invalid eraser size {:.1}, clamping to 4.0-200.0 range",
                self.eraser.size
            );
            self.eraser.size = self.eraser.size.clamp(4.0, 200.0);
        }

        // Validate font weight is reasonable
        let valid_weight = matches!(
            self.drawing.font_weight.to_lowercase().as_str(),
            "normal" | "bold" | "light" | "ultralight" | "heavy" | "ultrabold"
        ) || self
            .drawing
            .font_weight
            .parse::<u32>()
            .is_ok_and(|w| (100..=900).contains(&w));

        if !valid_weight {
            log::warn!(
                "Invalid font_weight '{}', falling back to 'bold'",
                self.drawing.font_weight
            );
            self.drawing.font_weight = "bold".to_string();
        }

        // Validate font style
        if !matches!(
            self.drawing.font_style.to_lowercase().as_str(),
            "normal" | "italic" | "oblique"
        ) {
            log::warn!(
                "Invalid font_style '{}', falling back to 'normal'",
                self.drawing.font_style
            );
            self.drawing.font_style = "normal".to_string();
        }

        // An unusable hotkey would strand the whole application, so fall back
        // rather than fail
        if let Err(err) = key::parse_combination(&self.hotkey.keys) {
            let fallback = HotkeyConfig::default().keys;
            log::warn!(
                "Invalid hotkey combination {:?} ({err}); falling back to {:?}",
                self.hotkey.keys,
                fallback
            );
            self.hotkey.keys = fallback;
        }
    }

    /// Path of the configuration file, `~/.config/overscribe/config.toml`.
    ///
    /// # Errors
    /// Fails when the config directory cannot be determined (e.g., HOME not
    /// set).
    pub fn get_config_path() -> Result<PathBuf> {
        let config_dir = dirs::config_dir()
            .context("Could not find config directory")?
            .join("overscribe");

        Ok(config_dir.join("config.toml"))
    }

    /// Loads the configuration, falling back to defaults when no file exists.
    ///
    /// Loaded values pass through the validate-and-clamp pass before use.
    ///
    /// # Errors
    /// Fails when the config path cannot be determined, or the file exists
    /// but cannot be read or parsed as TOML.
    pub fn load() -> Result<Self> {
        let config_path = Self::get_config_path()?;
        Self::load_from(&config_path)
    }

    /// Loads configuration from an explicit path (missing file = defaults).
    pub fn load_from(config_path: &std::path::Path) -> Result<Self> {
        if !config_path.exists() {
            info!("Config file not found, using defaults");
            debug!("Expected config at: {}", config_path.display());
            return Ok(Self::default());
        }

        let config_str = fs::read_to_string(config_path)
            .with_context(|| format!("Failed to read config from {}", config_path.display()))?;

        let mut config: Config = toml::from_str(&config_str)
            .with_context(|| format!("Failed to parse config from {}", config_path.display()))?;

        // Validate and clamp values to acceptable ranges
        config.validate_and_clamp();

        info!("Loaded config from {}", config_path.display());
        debug!("Config: {:?}", config);

        Ok(config)
    }

    /// Writes the configuration back out as TOML, creating the parent
    /// directory if needed.
    ///
    /// Used by an external settings panel for live config edits.
    pub fn save(&self) -> Result<()> {
        let config_path = Self::get_config_path()?;

        if let Some(parent) = config_path.parent() {
            fs::create_dir_all(parent).context("Failed to create config directory")?;
        }

        let config_str = toml::to_string_pretty(self).context("Failed to serialize config")?;

        fs::write(&config_path, config_str)
            .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

        info!("Saved config to {}", config_path.display());
        Ok(())
    }

    /// Builds the runtime [`Settings`] value from this (validated) config.
    pub fn to_settings(&self) -> Settings {
        let hotkey = key::parse_combination(&self.hotkey.keys)
            .unwrap_or_else(|_| Settings::default().hotkey);

        Settings {
            hotkey,
            activation_mode: self.hotkey.mode,
            color: self.drawing.default_color.to_color(),
            thickness: self.drawing.default_thickness,
            thickness_min: self.drawing.thickness_min,
            thickness_max: self.drawing.thickness_max,
            font_size: self.drawing.default_font_size,
            font: FontDescriptor::new(
                self.drawing.font_family.clone(),
                self.drawing.font_weight.clone(),
                self.drawing.font_style.clone(),
            ),
            eraser_size: self.eraser.size,
            max_elements: self.drawing.max_elements,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::draw::color::{GREEN, RED};
    use std::io::Write;

    fn write_config(contents: &str) -> (tempfile::TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let mut file = fs::File::create(&path).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        (dir, path)
    }

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let config = Config::load_from(&dir.path().join("nope.toml")).unwrap();
        assert_eq!(config.drawing.default_thickness, 3.0);
        assert_eq!(config.hotkey.mode, ActivationMode::Hold);
    }

    #[test]
    fn malformed_toml_is_an_error() {
        let (_dir, path) = write_config("drawing = {{{{");
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn out_of_range_values_are_clamped() {
        let (_dir, path) = write_config(
            r#"
            [drawing]
            default_thickness = 900.0
            default_font_size = 1.0

            [eraser]
            size = 1000.0
            "#,
        );
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.drawing.default_thickness, 20.0);
        assert_eq!(config.drawing.default_font_size, 8.0);
        assert_eq!(config.eraser.size, 200.0);
    }

    #[test]
    fn bad_hotkey_falls_back_to_default() {
        let (_dir, path) = write_config(
            r#"
            [hotkey]
            keys = ["NotAKey"]
            mode = "lock"
            "#,
        );
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.hotkey.keys, HotkeyConfig::default().keys);
        // The mode survives; only the combination was unusable
        assert_eq!(config.hotkey.mode, ActivationMode::Lock);
    }

    #[test]
    fn settings_carry_parsed_hotkey_and_colors() {
        let (_dir, path) = write_config(
            r#"
            [drawing]
            default_color = "green"

            [hotkey]
            keys = ["Ctrl+D"]
            "#,
        );
        let settings = Config::load_from(&path).unwrap().to_settings();
        assert_eq!(settings.color, GREEN);
        assert_eq!(
            settings.hotkey,
            vec![rdev::Key::ControlLeft, rdev::Key::KeyD]
        );
    }

    #[test]
    fn unknown_color_name_falls_back_to_red() {
        let (_dir, path) = write_config(
            r#"
            [drawing]
            default_color = "vermilion-ish"
            "#,
        );
        let settings = Config::load_from(&path).unwrap().to_settings();
        assert_eq!(settings.color, RED);
    }
}
