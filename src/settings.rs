//! Run settings
//!
//! Loaded from an optional JSON file. Gameplay constants are not settings;
//! they live in `consts`.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::{MAX_SUBSTEPS, TICK_MS};

/// How the host presents each rendered frame
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RenderMode {
    /// Logs only
    Off,
    /// Character grid on stdout
    #[default]
    Text,
    /// One JSON snapshot per line on stdout
    Json,
}

impl RenderMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderMode::Off => "Off",
            RenderMode::Text => "Text",
            RenderMode::Json => "Json",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "off" | "none" => Some(RenderMode::Off),
            "text" | "ascii" => Some(RenderMode::Text),
            "json" => Some(RenderMode::Json),
            _ => None,
        }
    }
}

/// Host settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    /// RNG seed (None = derive from the clock)
    pub seed: Option<u64>,

    // === Timing ===
    /// Tick period in milliseconds
    pub tick_ms: u64,
    /// Max ticks simulated per host frame
    pub max_substeps: u32,
    /// Stop after this many ticks (None = run until game over)
    pub max_ticks: Option<u64>,

    // === Play ===
    /// Let the autopilot drive the ship
    pub idle_mode: bool,
    /// Request a restart as soon as the game is over
    pub auto_restart: bool,

    // === Output ===
    pub render: RenderMode,
    /// Render one frame every N ticks
    pub render_every: u32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            seed: None,

            tick_ms: TICK_MS,
            max_substeps: MAX_SUBSTEPS,
            max_ticks: None,

            // No keyboard capture on the native host
            idle_mode: true,
            auto_restart: false,

            render: RenderMode::Text,
            render_every: 30,
        }
    }
}

impl Settings {
    /// Load settings from a JSON file, falling back to defaults
    pub fn load(path: &Path) -> Self {
        let json = match fs::read_to_string(path) {
            Ok(json) => json,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No settings at {}, using defaults", path.display());
                return Self::default();
            }
            Err(e) => {
                log::warn!("Could not read {}: {}", path.display(), e);
                return Self::default();
            }
        };

        match Self::from_json(&json) {
            Some(settings) => {
                log::info!("Loaded settings from {}", path.display());
                settings
            }
            None => {
                log::warn!("Ignoring malformed settings in {}", path.display());
                Self::default()
            }
        }
    }

    /// Parse settings; missing fields take their defaults
    pub fn from_json(json: &str) -> Option<Self> {
        match serde_json::from_str::<Settings>(json) {
            Ok(settings) => Some(settings.sanitized()),
            Err(e) => {
                log::debug!("Settings parse error: {}", e);
                None
            }
        }
    }

    /// Save settings as pretty JSON
    pub fn save(&self, path: &Path) {
        match serde_json::to_string_pretty(self) {
            Ok(json) => match fs::write(path, json) {
                Ok(()) => log::info!("Settings saved to {}", path.display()),
                Err(e) => log::warn!("Could not write {}: {}", path.display(), e),
            },
            Err(e) => log::warn!("Could not serialize settings: {}", e),
        }
    }

    /// Clamp values that would stall the host loop
    fn sanitized(mut self) -> Self {
        self.tick_ms = self.tick_ms.max(1);
        self.max_substeps = self.max_substeps.max(1);
        self.render_every = self.render_every.max(1);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_mode_names() {
        assert_eq!(RenderMode::from_str("JSON"), Some(RenderMode::Json));
        assert_eq!(RenderMode::from_str("ascii"), Some(RenderMode::Text));
        assert_eq!(RenderMode::from_str("off"), Some(RenderMode::Off));
        assert_eq!(RenderMode::from_str("vga"), None);
        assert_eq!(RenderMode::Json.as_str(), "Json");
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let settings = Settings::from_json(r#"{ "seed": 7, "render": "Json" }"#).unwrap();
        assert_eq!(settings.seed, Some(7));
        assert_eq!(settings.render, RenderMode::Json);
        assert_eq!(settings.tick_ms, 16);
        assert!(settings.idle_mode);
    }

    #[test]
    fn test_zero_values_are_clamped() {
        let settings =
            Settings::from_json(r#"{ "tick_ms": 0, "max_substeps": 0, "render_every": 0 }"#)
                .unwrap();
        assert_eq!(settings.tick_ms, 1);
        assert_eq!(settings.max_substeps, 1);
        assert_eq!(settings.render_every, 1);
    }

    #[test]
    fn test_malformed_json_is_rejected() {
        assert!(Settings::from_json("{ seed: ").is_none());
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let settings = Settings::load(Path::new("/nonexistent/space-invaders.json"));
        assert_eq!(settings.tick_ms, TICK_MS);
        assert_eq!(settings.max_ticks, None);
    }

    #[test]
    fn test_save_then_load() {
        let path = std::env::temp_dir().join(format!(
            "space-invaders-settings-{}.json",
            std::process::id()
        ));
        let settings = Settings {
            seed: Some(99),
            max_ticks: Some(1200),
            auto_restart: true,
            ..Default::default()
        };
        settings.save(&path);

        let loaded = Settings::load(&path);
        let _ = fs::remove_file(&path);
        assert_eq!(loaded.seed, Some(99));
        assert_eq!(loaded.max_ticks, Some(1200));
        assert!(loaded.auto_restart);
    }
}
