use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::script::ActionKind;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub tour: TourConfig,
    #[serde(default)]
    pub motion: MotionConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Data directory path (log file lives here)
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            log_level: default_log_level(),
        }
    }
}

/// Timing budget of the tour sequencer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TourConfig {
    /// Delay after a caption hides, a move settles or a scroll settles
    #[serde(default = "default_grace_ms")]
    pub grace_ms: u64,
    /// Caption shown while a pause waits for the user
    #[serde(default = "default_pause_prompt")]
    pub pause_prompt: String,
    #[serde(default = "default_speak_ms")]
    pub speak_ms: u64,
    #[serde(default = "default_move_ms")]
    pub move_ms: u64,
    #[serde(default = "default_click_ms")]
    pub click_ms: u64,
    #[serde(default = "default_scroll_ms")]
    pub scroll_ms: u64,
    #[serde(default = "default_hover_ms")]
    pub hover_ms: u64,
    #[serde(default = "default_pause_ms")]
    pub pause_ms: u64,
}

impl Default for TourConfig {
    fn default() -> Self {
        Self {
            grace_ms: default_grace_ms(),
            pause_prompt: default_pause_prompt(),
            speak_ms: default_speak_ms(),
            move_ms: default_move_ms(),
            click_ms: default_click_ms(),
            scroll_ms: default_scroll_ms(),
            hover_ms: default_hover_ms(),
            pause_ms: default_pause_ms(),
        }
    }
}

impl TourConfig {
    pub fn grace(&self) -> Duration {
        Duration::from_millis(self.grace_ms)
    }

    /// Nominal duration used when an action leaves its own unset
    pub fn default_duration(&self, kind: ActionKind) -> Duration {
        let ms = match kind {
            ActionKind::Speak => self.speak_ms,
            ActionKind::Move => self.move_ms,
            ActionKind::Click => self.click_ms,
            ActionKind::Scroll => self.scroll_ms,
            ActionKind::Hover => self.hover_ms,
            ActionKind::Pause => self.pause_ms,
            ActionKind::Unknown => 0,
        };
        Duration::from_millis(ms)
    }
}

/// Pointer motion settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MotionConfig {
    #[serde(default = "default_motion_easing")]
    pub easing: EasingType,
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            easing: default_motion_easing(),
            animation_fps: default_animation_fps(),
        }
    }
}

impl MotionConfig {
    pub fn frame_interval(&self) -> Duration {
        frame_interval(self.animation_fps)
    }
}

/// Document scroll settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    #[serde(default = "default_scroll_easing")]
    pub easing: EasingType,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            easing: default_scroll_easing(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds while nothing animates
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Show the stage label in the status bar
    #[serde(default = "default_true")]
    pub show_stage: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            show_stage: default_true(),
        }
    }
}

/// Easing curve applied to animation progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end when the duration elapses
    None,
    Linear,
    /// Cubic ease-out: 1 - (1-t)^3
    #[default]
    Cubic,
    /// Quintic ease-out: 1 - (1-t)^5
    Quintic,
    /// Exponential ease-out
    EaseOut,
    /// Cubic ease-in-out
    CubicInOut,
}

/// Frame period for a rate, never shorter than 1ms
pub fn frame_interval(fps: u32) -> Duration {
    if fps == 0 {
        Duration::from_millis(16) // ~60fps fallback
    } else {
        Duration::from_millis((1000 / fps as u64).max(1))
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("tourline")
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_grace_ms() -> u64 {
    500
}

fn default_pause_prompt() -> String {
    "Your turn: press Space or click to continue".to_string()
}

fn default_speak_ms() -> u64 {
    3000
}

fn default_move_ms() -> u64 {
    2000
}

fn default_click_ms() -> u64 {
    1000
}

fn default_scroll_ms() -> u64 {
    1000
}

fn default_hover_ms() -> u64 {
    2000
}

fn default_pause_ms() -> u64 {
    3000
}

fn default_motion_easing() -> EasingType {
    EasingType::CubicInOut
}

fn default_scroll_easing() -> EasingType {
    EasingType::Cubic
}

fn default_animation_fps() -> u32 {
    60
}

fn default_tick_rate() -> u64 {
    100
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &std::path::Path) -> PathBuf {
    if let Some(path_str) = path.to_str() {
        if let Some(stripped) = path_str.strip_prefix("~/") {
            if let Some(home) = dirs::home_dir() {
                return home.join(stripped);
            }
        } else if path_str == "~" {
            if let Some(home) = dirs::home_dir() {
                return home;
            }
        }
    }
    path.to_path_buf()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content = toml::to_string_pretty(self)
            .map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/tourline/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("tourline")
            .join("config.toml")
    }

    /// Get the log file path used while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("tourline.log")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }
}
