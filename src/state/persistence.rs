use egui::Color32;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::file_handler::ExportFormat;
use crate::tools::ToolMode;

/// Environment variable naming a JSON settings file
pub const SETTINGS_ENV: &str = "SKETCHPAD_SETTINGS";

/// Largest accepted canvas side, in pixels
pub const MAX_CANVAS_SIDE: u32 = 8192;

/// Errors that can occur while loading or saving settings
#[derive(Debug, Error)]
pub enum SettingsError {
    #[error("Failed to access settings file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse settings: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid color {0:?}, expected #rrggbb")]
    InvalidColor(String),

    #[error("Invalid canvas size {width}x{height}")]
    InvalidSize { width: u32, height: u32 },
}

pub type SettingsResult<T> = Result<T, SettingsError>;

/// User-tunable settings, persisted as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PaintSettings {
    pub canvas_width: u32,
    pub canvas_height: u32,
    /// Starting color as `#rrggbb`
    pub color: String,
    pub initial_mode: ToolMode,
    pub export_format: ExportFormat,
    /// Where native exports are written; the working directory when unset
    pub export_dir: Option<PathBuf>,
    /// Enables the canvas eyedropper
    pub eyedropper: bool,
}

impl Default for PaintSettings {
    fn default() -> Self {
        Self {
            canvas_width: 800,
            canvas_height: 500,
            color: "#000000".to_owned(),
            initial_mode: ToolMode::Draw,
            export_format: ExportFormat::default(),
            export_dir: None,
            eyedropper: true,
        }
    }
}

impl PaintSettings {
    pub fn from_json(json: &str) -> SettingsResult<Self> {
        let settings: Self = serde_json::from_str(json)?;
        settings.validate()?;
        Ok(settings)
    }

    pub fn to_json(&self) -> SettingsResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn load(path: &Path) -> SettingsResult<Self> {
        let json = fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    pub fn save(&self, path: &Path) -> SettingsResult<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, self.to_json()?)?;
        Ok(())
    }

    /// Loads the file named by `SKETCHPAD_SETTINGS`, if the variable is set
    #[cfg(not(target_arch = "wasm32"))]
    pub fn from_env() -> Option<SettingsResult<Self>> {
        let path = std::env::var_os(SETTINGS_ENV)?;
        log::info!("Loading settings from {:?}", path);
        Some(Self::load(Path::new(&path)))
    }

    pub fn validate(&self) -> SettingsResult<()> {
        let valid_side = |side: u32| (1..=MAX_CANVAS_SIDE).contains(&side);
        if !valid_side(self.canvas_width) || !valid_side(self.canvas_height) {
            return Err(SettingsError::InvalidSize {
                width: self.canvas_width,
                height: self.canvas_height,
            });
        }
        parse_hex_color(&self.color)?;
        Ok(())
    }

    pub fn color32(&self) -> SettingsResult<Color32> {
        parse_hex_color(&self.color)
    }

    /// The mode to start in; transient modes cannot be a starting mode
    pub fn start_mode(&self) -> ToolMode {
        if self.initial_mode.is_transient() {
            ToolMode::Draw
        } else {
            self.initial_mode
        }
    }
}

/// Parses `#rrggbb` (the leading `#` is optional) into an opaque color
pub fn parse_hex_color(text: &str) -> SettingsResult<Color32> {
    let invalid = || SettingsError::InvalidColor(text.to_owned());
    let hex = text.strip_prefix('#').unwrap_or(text);
    if hex.len() != 6 || !hex.is_ascii() {
        return Err(invalid());
    }
    let channel = |i: usize| u8::from_str_radix(&hex[i..i + 2], 16).map_err(|_| invalid());
    Ok(Color32::from_rgb(channel(0)?, channel(2)?, channel(4)?))
}

/// Formats the color channels as `#rrggbb`, ignoring alpha
pub fn hex_color(color: Color32) -> String {
    format!("#{:02x}{:02x}{:02x}", color.r(), color.g(), color.b())
}
