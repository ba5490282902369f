use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::scheduler::PacingTemplate;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub stream: StreamConfig,
    #[serde(default)]
    pub gestures: GestureConfig,
    #[serde(default)]
    pub scroll: ScrollConfig,
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub ui: UiConfig,
    #[serde(default)]
    pub keymap: KeymapConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            general: GeneralConfig::default(),
            stream: StreamConfig::default(),
            gestures: GestureConfig::default(),
            scroll: ScrollConfig::default(),
            source: SourceConfig::default(),
            ui: UiConfig::default(),
            keymap: KeymapConfig::default(),
        }
    }
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

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StreamConfig {
    /// Category cycle the scheduler walks, by snake_case name
    #[serde(default = "default_pacing_template")]
    pub pacing_template: Vec<String>,
    /// How close to the end of the stream pagination kicks in
    #[serde(default = "default_prefetch_distance")]
    pub prefetch_distance: usize,
    /// How many moments each pagination request asks for
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Interstitials spliced in the first time the reader reaches an index
    #[serde(default = "default_interruptions")]
    pub interruptions: Vec<InterruptionEntry>,
}

impl StreamConfig {
    /// Parse the configured template names into a pacing template.
    pub fn template(&self) -> crate::Result<PacingTemplate> {
        PacingTemplate::parse(&self.pacing_template)
    }
}

impl Default for StreamConfig {
    fn default() -> Self {
        Self {
            pacing_template: default_pacing_template(),
            prefetch_distance: default_prefetch_distance(),
            page_size: default_page_size(),
            interruptions: default_interruptions(),
        }
    }
}

/// One configured interstitial: shown once per session when the reader
/// first reaches `index`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InterruptionEntry {
    pub index: usize,
    pub heading: String,
    pub body: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GestureConfig {
    /// Minimum interval between accepted wheel events, in milliseconds
    #[serde(default = "default_wheel_cooldown")]
    pub wheel_cooldown_ms: u64,
    /// Vertical drag distance that counts as a swipe, in pixels
    #[serde(default = "default_swipe_threshold")]
    pub swipe_threshold_px: f32,
    /// Ceiling on accumulated pull distance, in pixels
    #[serde(default = "default_pull_cap")]
    pub pull_cap_px: f32,
    /// Pull distance past which release commits a refresh, in pixels
    #[serde(default = "default_pull_commit")]
    pub pull_commit_px: f32,
}

impl GestureConfig {
    #[inline]
    pub fn wheel_cooldown(&self) -> Duration {
        Duration::from_millis(self.wheel_cooldown_ms)
    }
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            wheel_cooldown_ms: default_wheel_cooldown(),
            swipe_threshold_px: default_swipe_threshold(),
            pull_cap_px: default_pull_cap(),
            pull_commit_px: default_pull_commit(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScrollConfig {
    /// Animate page transitions instead of jumping
    #[serde(default = "default_true")]
    pub smooth_enabled: bool,
    /// Page transition duration in milliseconds
    #[serde(default = "default_animation_duration")]
    pub animation_duration_ms: u64,
    /// Easing curve for page transitions
    #[serde(default)]
    pub easing: EasingType,
    /// Frame rate while a transition is running
    #[serde(default = "default_animation_fps")]
    pub animation_fps: u16,
}

impl ScrollConfig {
    #[inline]
    pub fn animation_duration(&self) -> Duration {
        Duration::from_millis(self.animation_duration_ms)
    }

    #[inline]
    pub fn animation_tick_duration(&self) -> Duration {
        if self.animation_fps == 0 {
            Duration::from_millis(16) // ~60fps fallback
        } else {
            Duration::from_millis(1000 / self.animation_fps as u64)
        }
    }

    #[inline]
    pub fn is_smooth(&self) -> bool {
        self.smooth_enabled && self.animation_duration_ms > 0
    }
}

impl Default for ScrollConfig {
    fn default() -> Self {
        Self {
            smooth_enabled: default_true(),
            animation_duration_ms: default_animation_duration(),
            easing: EasingType::default(),
            animation_fps: default_animation_fps(),
        }
    }
}

/// Easing curve applied to page transition progress
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EasingType {
    /// Jump at the end of the duration
    None,
    Linear,
    #[default]
    Cubic,
    Quintic,
    EaseOut,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourceConfig {
    /// Remote moments endpoint; unset means the bundled fixture pool
    #[serde(default)]
    pub base_url: Option<String>,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: None,
            request_timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UiConfig {
    /// Tick rate in milliseconds
    #[serde(default = "default_tick_rate")]
    pub tick_rate_ms: u64,
    /// Theme name (e.g. "dusk", "dawn")
    #[serde(default = "default_theme_name")]
    pub theme: String,
    /// Show the anonymous author alias
    #[serde(default = "default_true")]
    pub show_alias: bool,
    /// Show relative timestamps
    #[serde(default = "default_true")]
    pub show_timestamps: bool,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            tick_rate_ms: default_tick_rate(),
            theme: default_theme_name(),
            show_alias: default_true(),
            show_timestamps: default_true(),
        }
    }
}

/// Keymap configuration using Vim-style notation
/// Format: "j", "k", "<C-j>" (Ctrl+j), "<CR>" (Enter), "<Esc>", "<Tab>", "<Space>"
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct KeymapConfig {
    /// Quit the application
    #[serde(default = "default_key_quit")]
    pub quit: String,
    /// Advance to the next moment
    #[serde(default = "default_key_next")]
    pub next: String,
    /// Go back to the previous moment
    #[serde(default = "default_key_prev")]
    pub prev: String,
    /// Jump to the first moment
    #[serde(default = "default_key_jump_to_top")]
    pub jump_to_top: String,
    /// Jump to the last loaded moment
    #[serde(default = "default_key_jump_to_bottom")]
    pub jump_to_bottom: String,
    /// Heart the active moment
    #[serde(default = "default_key_heart")]
    pub heart: String,
    /// Save the active moment
    #[serde(default = "default_key_save")]
    pub save: String,
    /// Open the comment sheet for the active moment
    #[serde(default = "default_key_comment")]
    pub comment: String,
    /// Report the active moment
    #[serde(default = "default_key_report")]
    pub report: String,
    /// Refresh the stream
    #[serde(default = "default_key_refresh")]
    pub refresh: String,
    /// Toggle the help popup
    #[serde(default = "default_key_help")]
    pub help: String,
}

impl Default for KeymapConfig {
    fn default() -> Self {
        Self {
            quit: default_key_quit(),
            next: default_key_next(),
            prev: default_key_prev(),
            jump_to_top: default_key_jump_to_top(),
            jump_to_bottom: default_key_jump_to_bottom(),
            heart: default_key_heart(),
            save: default_key_save(),
            comment: default_key_comment(),
            report: default_key_report(),
            refresh: default_key_refresh(),
            help: default_key_help(),
        }
    }
}

// Default keymap values (Vim-style notation)
fn default_key_quit() -> String { "q".to_string() }
fn default_key_next() -> String { "j".to_string() }
fn default_key_prev() -> String { "k".to_string() }
fn default_key_jump_to_top() -> String { "gg".to_string() }
fn default_key_jump_to_bottom() -> String { "G".to_string() }
fn default_key_heart() -> String { "h".to_string() }
fn default_key_save() -> String { "s".to_string() }
fn default_key_comment() -> String { "c".to_string() }
fn default_key_report() -> String { "x".to_string() }
fn default_key_refresh() -> String { "r".to_string() }
fn default_key_help() -> String { "?".to_string() }

fn default_log_level() -> String {
    "info".to_string()
}

fn default_true() -> bool {
    true
}

fn default_pacing_template() -> Vec<String> {
    ["validation", "confession", "guidance", "confession", "reassurance", "prompt"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

fn default_prefetch_distance() -> usize {
    2
}

fn default_page_size() -> usize {
    10
}

fn default_interruptions() -> Vec<InterruptionEntry> {
    vec![InterruptionEntry {
        index: 4,
        heading: "You're not alone".to_string(),
        body: "Thousands of people are reading and sharing here right now. \
               Take a slow breath before you keep going."
            .to_string(),
    }]
}

fn default_wheel_cooldown() -> u64 {
    600
}

fn default_swipe_threshold() -> f32 {
    50.0
}

fn default_pull_cap() -> f32 {
    120.0
}

fn default_pull_commit() -> f32 {
    80.0
}

fn default_animation_duration() -> u64 {
    300
}

fn default_animation_fps() -> u16 {
    60
}

fn default_timeout() -> u64 {
    30
}

fn default_tick_rate() -> u64 {
    100
}

fn default_theme_name() -> String {
    "dusk".to_string()
}

impl AppConfig {
    /// Load configuration from file or return defaults
    pub fn load() -> crate::Result<Self> {
        let config_path = Self::config_path();

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))
        } else {
            Ok(Self::default())
        }
    }

    /// Save configuration to file
    pub fn save(&self) -> crate::Result<()> {
        let config_path = Self::config_path();

        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let content =
            toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))?;
        std::fs::write(&config_path, content)?;

        Ok(())
    }

    /// Get the configuration file path
    /// Always uses ~/.config/noma-stream/config.toml on all platforms
    pub fn config_path() -> PathBuf {
        dirs::home_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(".config")
            .join("noma-stream")
            .join("config.toml")
    }
}
