use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::geometry::{ClientSize, Direction};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub list: ListConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GeneralConfig {
    /// Log level
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            log_level: default_log_level(),
        }
    }
}

/// Item size: a fixed extent for plain lists, or minimum cell size for grids
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ItemSize {
    Fixed(f64),
    Grid {
        #[serde(alias = "minWidth")]
        min_width: f64,
        #[serde(alias = "minHeight")]
        min_height: f64,
    },
}

impl Default for ItemSize {
    fn default() -> Self {
        ItemSize::Fixed(default_item_size())
    }
}

impl ItemSize {
    #[inline]
    pub fn is_grid(&self) -> bool {
        matches!(self, ItemSize::Grid { .. })
    }
}

/// Layout-affecting options of a virtual list
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListConfig {
    /// Primary scrolling direction
    #[serde(default)]
    pub direction: Direction,
    /// Item extent (number) or grid cell minimum (`{ min_width, min_height }`)
    #[serde(default)]
    pub item_size: ItemSize,
    /// Number of items; negative values are treated as 0
    #[serde(default)]
    pub data_size: i64,
    /// Gap between items in pixels
    #[serde(default)]
    pub spacing: f64,
    /// Extra lines rendered beyond the viewport
    #[serde(default = "default_overhang")]
    pub overhang: usize,
    /// Focus-follow jumps a page at a time instead of the minimal scroll
    #[serde(default)]
    pub page_scroll: bool,
    /// Right-to-left layout (mirrors horizontal item positions)
    #[serde(default)]
    pub rtl: bool,
    /// Explicit client width; measured by the host when absent
    #[serde(default)]
    pub client_width: Option<f64>,
    /// Explicit client height; measured by the host when absent
    #[serde(default)]
    pub client_height: Option<f64>,
}

impl Default for ListConfig {
    fn default() -> Self {
        Self {
            direction: Direction::default(),
            item_size: ItemSize::default(),
            data_size: 0,
            spacing: 0.0,
            overhang: default_overhang(),
            page_scroll: false,
            rtl: false,
            client_width: None,
            client_height: None,
        }
    }
}

impl ListConfig {
    /// Data size clamped to a non-negative count
    pub fn data_size(&self) -> usize {
        if self.data_size < 0 {
            warn!(data_size = self.data_size, "Negative data size, treating as 0");
            0
        } else {
            self.data_size as usize
        }
    }

    /// Explicit client size, falling back to the measured one per axis
    pub fn client_size_or(&self, measured: ClientSize) -> ClientSize {
        ClientSize {
            width: self.client_width.unwrap_or(measured.width),
            height: self.client_height.unwrap_or(measured.height),
        }
    }

    /// Whether switching from `other` to `self` requires recomputing metrics
    pub fn layout_changed(&self, other: &ListConfig) -> bool {
        self.direction != other.direction
            || self.item_size != other.item_size
            || self.spacing != other.spacing
            || self.client_width != other.client_width
            || self.client_height != other.client_height
    }
}

/// Easing curve applied to animated scrolls
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    Linear,
    EaseIn,
    #[default]
    EaseOut,
    EaseInOut,
}

/// Scroll driving strategy, chosen once per list instance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScrollMode {
    /// Positions are animated by the built-in animator
    #[default]
    Animated,
    /// The host scrolls natively and reports positions back
    Native,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Scroll strategy
    #[serde(default)]
    pub mode: ScrollMode,
    /// Enable animated scrolling for wheel, keys and focus-follow
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Duration of programmatic scroll animations
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: f64,
    /// Easing curve for programmatic scroll animations
    #[serde(default)]
    pub easing: EasingType,
    /// Release later than this after the last drag move is a deliberate stop
    #[serde(default = "default_flick_hold")]
    pub flick_hold_ms: f64,
    /// Targets closer than this to a bound snap onto the bound
    #[serde(default = "default_bound_snap_epsilon")]
    pub bound_snap_epsilon: f64,
    /// Pixels per wheel line in line delta mode
    #[serde(default = "default_wheel_line")]
    pub wheel_line_px: f64,
    /// Largest pixel-mode wheel step as a fraction of the client size
    #[serde(default = "default_wheel_max_page_ratio")]
    pub wheel_max_page_ratio: f64,
    /// Page key step as a fraction of the client size
    #[serde(default = "default_page_multiplier")]
    pub page_multiplier: f64,
    /// Delay before the scrollbar thumb hides after scrolling stops
    #[serde(default = "default_thumb_hide_delay")]
    pub thumb_hide_delay_ms: f64,
    /// Smallest thumb size as a fraction of the track
    #[serde(default = "default_min_thumb_ratio")]
    pub min_thumb_ratio: f64,
    /// Frame rate of the host frame pacing
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u32,
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            mode: ScrollMode::default(),
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            flick_hold_ms: default_flick_hold(),
            bound_snap_epsilon: default_bound_snap_epsilon(),
            wheel_line_px: default_wheel_line(),
            wheel_max_page_ratio: default_wheel_max_page_ratio(),
            page_multiplier: default_page_multiplier(),
            thumb_hide_delay_ms: default_thumb_hide_delay(),
            min_thumb_ratio: default_min_thumb_ratio(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Demo key bindings using Vim-style notation
/// Format: "j", "k", "<C-f>" (Ctrl+f), "<S-g>" (Shift+g), "<PageDown>", "gg"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the demo
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Move focus to the previous line
    #[serde(default = "default_key_move_up")]
    pub move_up: String,
    /// Move focus to the next line
    #[serde(default = "default_key_move_down")]
    pub move_down: String,
    /// Move focus backward within a line
    #[serde(default = "default_key_move_left")]
    pub move_left: String,
    /// Move focus forward within a line
    #[serde(default = "default_key_move_right")]
    pub move_right: String,
    /// Scroll one page back
    #[serde(default = "default_key_page_up")]
    pub page_up: String,
    /// Scroll one page forward
    #[serde(default = "default_key_page_down")]
    pub page_down: String,
    /// Jump to the first item
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to the last item
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            move_up: default_key_move_up(),
            move_down: default_key_move_down(),
            move_left: default_key_move_left(),
            move_right: default_key_move_right(),
            page_up: default_key_page_up(),
            page_down: default_key_page_down(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
        }
    }
}

fn default_key_quit() -> String { "q".to_string() }
fn default_key_move_up() -> String { "k".to_string() }
fn default_key_move_down() -> String { "j".to_string() }
fn default_key_move_left() -> String { "h".to_string() }
fn default_key_move_right() -> String { "l".to_string() }
fn default_key_page_up() -> String { "<C-b>".to_string() }
fn default_key_page_down() -> String { "<C-f>".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_item_size() -> f64 {
    50.0
}

fn default_overhang() -> usize {
    3
}

fn default_animation_duration() -> f64 {
    1000.0
}

fn default_flick_hold() -> f64 {
    50.0
}

fn default_bound_snap_epsilon() -> f64 {
    1.0
}

fn default_wheel_line() -> f64 {
    40.0
}

fn default_wheel_max_page_ratio() -> f64 {
    0.8
}

fn default_page_multiplier() -> f64 {
    0.8
}

fn default_thumb_hide_delay() -> f64 {
    400.0
}

fn default_min_thumb_ratio() -> f64 {
    0.05
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
    /// Load configuration from the default file or return defaults
    pub fn load() -> crate::Result<Self> {
        Self::load_from(&Self::config_path())
    }

    /// Load configuration from a file, returning defaults when it does not exist
    pub fn load_from(path: &Path) -> crate::Result<Self> {
        let path = expand_tilde(path);

        if path.exists() {
            let content = std::fs::read_to_string(&path)?;
            Self::from_toml(&content)
        } else {
            Ok(Self::default())
        }
    }

    /// Parse configuration from TOML text
    pub fn from_toml(content: &str) -> crate::Result<Self> {
        toml::from_str(content).map_err(|e| crate::Error::Config(e.to_string()))
    }

    /// Get the configuration file path
    /// Always uses ~/.config/vlist/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("vlist")
            .join("config.toml")
    }
}
