use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub carousel: CarouselConfig,
    #[serde(default)]
    pub ui: UiConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level (overridden by RUST_LOG)
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// Data directory path, holds the TUI log file
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
            data_dir: default_data_dir(),
        }
    }
}

/// Carousel choreography constants, in CSS pixels
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CarouselConfig {
    /// Viewport width at or above which the carousel is active
    #[serde(default = "default_breakpoint")]
    pub breakpoint_px: f64,
    /// Gap between two cards
    #[serde(default = "default_gap")]
    pub gap_px: f64,
    /// Extra room kept after the last card at the end of the strip
    #[serde(default = "default_edge_padding")]
    pub edge_padding_px: f64,
    /// Card width used while the real width is not measurable yet
    #[serde(default = "default_fallback_card_width")]
    pub fallback_card_width_px: f64,
    /// Duration of one autoplay leg (0 to the bound, or back)
    #[serde(default = "default_sweep_duration")]
    pub sweep_duration_ms: u64,
    /// Multiplier from vertical wheel delta to horizontal offset
    #[serde(default = "default_wheel_scale")]
    pub wheel_scale: f64,
    /// Duration of the tween that follows a wheel gesture
    #[serde(default = "default_wheel_tween")]
    pub wheel_tween_ms: u64,
    /// Easing of the wheel tween
    #[serde(default = "default_wheel_easing")]
    pub wheel_easing: EasingType,
    /// Delay between entering desktop mode and the first bounds measurement
    #[serde(default = "default_settle_delay")]
    pub settle_delay_ms: u64,
}

impl Default for CarouselConfig {
    fn default() -> Self {
        Self {
            breakpoint_px: default_breakpoint(),
            gap_px: default_gap(),
            edge_padding_px: default_edge_padding(),
            fallback_card_width_px: default_fallback_card_width(),
            sweep_duration_ms: default_sweep_duration(),
            wheel_scale: default_wheel_scale(),
            wheel_tween_ms: default_wheel_tween(),
            wheel_easing: default_wheel_easing(),
            settle_delay_ms: default_settle_delay(),
        }
    }
}

impl CarouselConfig {
    pub fn sweep_duration(&self) -> Duration {
        Duration::from_millis(self.sweep_duration_ms)
    }

    pub fn wheel_tween_duration(&self) -> Duration {
        Duration::from_millis(self.wheel_tween_ms)
    }

    pub fn settle_delay(&self) -> Duration {
        Duration::from_millis(self.settle_delay_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Idle tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// How many CSS pixels one terminal column stands for
    #[serde(default = "default_px_per_cell")]
    pub px_per_cell: f64,
    /// Card width in terminal columns
    #[serde(default = "default_card_width_cols")]
    pub card_width_cols: u16,
    /// Card height in terminal rows
    #[serde(default = "default_card_height_rows")]
    pub card_height_rows: u16,
    /// Wheel delta reported for a single mouse wheel notch
    #[serde(default = "default_wheel_step")]
    pub wheel_step_px: f64,
    /// Page scroll configuration
    #[serde(default)]
    pub scroll: ScrollConfig,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            px_per_cell: default_px_per_cell(),
            card_width_cols: default_card_width_cols(),
            card_height_rows: default_card_height_rows(),
            wheel_step_px: default_wheel_step(),
            scroll: ScrollConfig::default(),
        }
    }
}

/// Easing curve applied to a tween's progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump to the end value when the tween completes
    None,
    /// Constant speed
    Linear,
    /// Cubic ease-out
    #[default]
    Cubic,
    /// Quintic ease-out
    Quintic,
    /// Exponential ease-out
    EaseOut,
}

/// Smooth page scrolling configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Enable smooth scrolling
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Animation duration in milliseconds
    #[serde(default = "default_scroll_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve
    #[serde(default)]
    pub easing: EasingType,
    /// Rows moved per scroll step
    #[serde(default = "default_scroll_lines")]
    pub scroll_lines: u16,
    /// Frame rate while animating
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_scroll_duration(),
            easing: EasingType::default(),
            scroll_lines: default_scroll_lines(),
            animation_fps: default_animation_fps(),
        }
    }
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_data_dir() -> PathBuf {
    dirs::data_local_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("invento")
}

fn default_true() -> bool {
    true
}

fn default_breakpoint() -> f64 {
    1024.0
}

fn default_gap() -> f64 {
    32.0
}

fn default_edge_padding() -> f64 {
    100.0
}

fn default_fallback_card_width() -> f64 {
    400.0
}

fn default_sweep_duration() -> u64 {
    50_000 // 50 seconds per leg
}

fn default_wheel_scale() -> f64 {
    1.2
}

fn default_wheel_tween() -> u64 {
    150
}

fn default_wheel_easing() -> EasingType {
    EasingType::Cubic
}

fn default_settle_delay() -> u64 {
    50
}

fn default_tick_rate() -> u64 {
    100
}

fn default_px_per_cell() -> f64 {
    8.0
}

fn default_card_width_cols() -> u16 {
    50 // 400px at 8px per column
}

fn default_card_height_rows() -> u16 {
    10
}

fn default_wheel_step() -> f64 {
    100.0
}

fn default_scroll_duration() -> u64 {
    150
}

fn default_scroll_lines() -> u16 {
    3
}

fn default_animation_fps() -> u32 {
    60
}

/// Expand tilde (~) in path to user's home directory
fn expand_tilde(path: &Path) -> PathBuf {
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
    /// Load configuration from the default path or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            Self::load_from(&config_path)
        } else {
            Ok(Self::default())
        }
    }

    /// Load and validate configuration from a specific file
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    /// Parse and validate configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        let config: Self =
            toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save configuration to the default path
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(&config_path, self.to_toml()?)?;

        Ok(())
    }

    pub fn to_toml(&self) -> crate::Result<String> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/invento/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("invento")
            .join("config.toml")
    }

    /// Get the data directory (with tilde expansion)
    pub fn data_dir(&self) -> PathBuf {
        expand_tilde(&self.general.data_dir)
    }

    /// Path of the log file written while the TUI owns the terminal
    pub fn log_path(&self) -> PathBuf {
        self.data_dir().join("invento.log")
    }

    /// Reject values the carousel cannot animate with
    pub fn validate(&self) -> crate::Result<()> {
        let c = &self.carousel;
        if !(c.breakpoint_px > 0.0) {
            return Err(invalid("carousel.breakpoint_px", "must be positive"));
        }
        if !(c.gap_px >= 0.0) {
            return Err(invalid("carousel.gap_px", "must not be negative"));
        }
        if !(c.edge_padding_px >= 0.0) {
            return Err(invalid("carousel.edge_padding_px", "must not be negative"));
        }
        if !(c.fallback_card_width_px > 0.0) {
            return Err(invalid("carousel.fallback_card_width_px", "must be positive"));
        }
        if c.sweep_duration_ms == 0 {
            return Err(invalid("carousel.sweep_duration_ms", "must be positive"));
        }
        if !(c.wheel_scale > 0.0) {
            return Err(invalid("carousel.wheel_scale", "must be positive"));
        }
        if !(self.ui.px_per_cell > 0.0) {
            return Err(invalid("ui.px_per_cell", "must be positive"));
        }
        if self.ui.card_width_cols == 0 || self.ui.card_height_rows < 3 {
            return Err(invalid("ui.card_width_cols/card_height_rows", "card is too small"));
        }
        // Page rows and strip columns are u16 in the terminal host
        if self.ui.card_width_cols > MAX_CARD_COLS || self.ui.card_height_rows > MAX_CARD_ROWS {
            return Err(invalid("ui.card_width_cols/card_height_rows", "card is too large"));
        }
        if c.gap_px / self.ui.px_per_cell > MAX_GAP_COLS {
            return Err(invalid("carousel.gap_px", "gap is wider than the terminal can lay out"));
        }
        Ok(())
    }
}

const MAX_CARD_COLS: u16 = 1000;
const MAX_CARD_ROWS: u16 = 200;
const MAX_GAP_COLS: f64 = 1000.0;

fn invalid(field: &str, reason: &str) -> crate::Error {
    crate::Error::Config(format!("{}: {}", field, reason))
}
