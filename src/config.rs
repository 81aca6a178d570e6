//! Page configuration for the storefront demo.
//!
//! A configuration describes the cart the page starts from (totals, code in
//! the voucher field, preselected shipping method), the catalogue the page
//! consults (discount codes, shipping methods) and a script of interactions
//! the demo replays.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use storefront_ui::{Event, KeyCode};

use crate::model::{DropdownSize, Totals};

/// Log level setting for the demo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Show only errors
    Error,
    /// Show errors and warnings
    Warn,
    /// Show errors, warnings, and info messages
    #[default]
    Info,
    /// Show debug-level logging
    Debug,
    /// Show all log messages including trace
    Trace,
}

impl LogLevel {
    /// Convert to log crate's LevelFilter.
    pub fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Current configuration file format version.
/// Increment this when making breaking changes to the config format.
pub const CONFIG_VERSION: u32 = 1;

/// One shipping method offered by the shipping dropdown.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShippingMethod {
    pub label: String,
    pub value: String,
    /// Fee added to the order when this method is chosen
    pub fee: f64,
}

impl ShippingMethod {
    pub fn new(label: impl Into<String>, value: impl Into<String>, fee: f64) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            fee,
        }
    }
}

/// Named spots on the page a script can click without knowing coordinates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "target")]
pub enum ScriptTarget {
    /// The voucher code text field
    CodeInput,
    /// The arrow button inside the voucher field
    ApplyDiscount,
    /// The "Proceed To Checkout" button
    Checkout,
    /// The shipping dropdown's trigger
    ShippingTrigger,
    /// The shipping dropdown's search field
    ShippingSearch,
    /// A row of the open shipping dropdown
    ShippingOption { label: String },
    /// Empty page area, away from every widget
    Background,
}

/// One scripted interaction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "action")]
pub enum ScriptStep {
    /// Left press at raw page coordinates
    Click { x: f32, y: f32 },
    /// Left press on a named target
    ClickOn {
        #[serde(flatten)]
        target: ScriptTarget,
    },
    /// Pointer move
    Move { x: f32, y: f32 },
    /// Wheel scroll at a position
    Scroll { x: f32, y: f32, delta: f32 },
    /// Typed text
    Type { text: String },
    /// A single key press
    Key { key: KeyCode },
}

impl ScriptStep {
    /// The input event for steps that do not need page geometry
    pub fn to_event(&self) -> Option<Event> {
        match self {
            ScriptStep::Click { x, y } => Some(Event::left_press(*x, *y)),
            ScriptStep::ClickOn { .. } => None,
            ScriptStep::Move { x, y } => Some(Event::MouseMove { position: (*x, *y) }),
            ScriptStep::Scroll { x, y, delta } => Some(Event::MouseScroll {
                delta: *delta,
                position: (*x, *y),
            }),
            ScriptStep::Type { text } => Some(Event::text(text.clone())),
            ScriptStep::Key { key } => Some(Event::key(*key)),
        }
    }
}

/// Demo page configuration that can be exported and imported.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PageConfig {
    /// Version of the configuration file format
    pub version: u32,

    /// Log verbosity level
    #[serde(default)]
    pub log_level: LogLevel,

    /// Totals shown before any interaction
    #[serde(default = "default_totals")]
    pub totals: Totals,

    /// Text in the voucher field before any interaction
    #[serde(default)]
    pub input_code: String,

    /// Known voucher codes and the discount each grants
    #[serde(default = "default_discount_codes")]
    pub discount_codes: BTreeMap<String, f64>,

    /// Methods listed in the shipping dropdown
    #[serde(default = "default_shipping_methods")]
    pub shipping_methods: Vec<ShippingMethod>,

    /// `value` of the shipping method selected at start
    #[serde(default)]
    pub preselected_shipping: Option<String>,

    /// Size of the shipping dropdown
    #[serde(default)]
    pub dropdown_size: DropdownSize,

    /// Whether the shipping dropdown has a search field
    #[serde(default = "default_searchable")]
    pub searchable: bool,

    /// Interactions replayed by the demo, in order
    #[serde(default)]
    pub script: Vec<ScriptStep>,
}

fn default_totals() -> Totals {
    Totals::new(100.0, 0.0, 0.0, 100.0)
}

fn default_discount_codes() -> BTreeMap<String, f64> {
    BTreeMap::from([("SAVE10".to_string(), 10.0), ("WELCOME".to_string(), 5.0)])
}

fn default_shipping_methods() -> Vec<ShippingMethod> {
    vec![
        ShippingMethod::new("Free shipping", "free", 0.0),
        ShippingMethod::new("Standard", "standard", 5.0),
        ShippingMethod::new("Express", "express", 15.0),
    ]
}

fn default_searchable() -> bool {
    true
}

fn default_script() -> Vec<ScriptStep> {
    vec![
        ScriptStep::ClickOn {
            target: ScriptTarget::CodeInput,
        },
        ScriptStep::Type {
            text: "SAVE10".to_string(),
        },
        ScriptStep::Key { key: KeyCode::Enter },
        ScriptStep::ClickOn {
            target: ScriptTarget::ShippingTrigger,
        },
        ScriptStep::ClickOn {
            target: ScriptTarget::ShippingSearch,
        },
        ScriptStep::Type {
            text: "stand".to_string(),
        },
        ScriptStep::ClickOn {
            target: ScriptTarget::ShippingOption {
                label: "Standard".to_string(),
            },
        },
        ScriptStep::ClickOn {
            target: ScriptTarget::Checkout,
        },
    ]
}

impl PageConfig {
    /// Create the built-in sample configuration.
    pub fn new() -> Self {
        Self {
            version: CONFIG_VERSION,
            log_level: LogLevel::default(),
            totals: default_totals(),
            input_code: String::new(),
            discount_codes: default_discount_codes(),
            shipping_methods: default_shipping_methods(),
            preselected_shipping: Some("free".to_string()),
            dropdown_size: DropdownSize::default(),
            searchable: default_searchable(),
            script: default_script(),
        }
    }

    /// Serialize the configuration to JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Deserialize configuration from JSON.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;

        if config.version > CONFIG_VERSION {
            return Err(ConfigError::VersionTooNew {
                file_version: config.version,
                supported_version: CONFIG_VERSION,
            });
        }

        if let Some(value) = &config.preselected_shipping {
            if !config.shipping_methods.iter().any(|method| &method.value == value) {
                log::warn!("Preselected shipping method '{}' is not offered, ignoring it", value);
            }
        }

        Ok(config)
    }

    /// Read and parse a configuration file.
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded configuration from {:?}", path);
        Ok(config)
    }

    /// Get the default filename for the config file.
    pub fn default_filename() -> &'static str {
        "storefront.json"
    }

    /// Get the default config file path.
    pub fn default_path() -> Option<PathBuf> {
        // Try to use XDG config directory, fall back to home directory
        if let Some(config_dir) = dirs::config_dir() {
            Some(config_dir.join("storefront").join(Self::default_filename()))
        } else {
            dirs::home_dir().map(|home_dir| {
                home_dir
                    .join(".config")
                    .join("storefront")
                    .join(Self::default_filename())
            })
        }
    }

    /// Load configuration from `path` if a file exists there.
    ///
    /// A missing file is `Ok(None)`; a file that exists but cannot be read or
    /// parsed is an error.
    pub fn load_if_present(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            log::debug!("No config file found at {:?}", path);
            return Ok(None);
        }
        Self::load(path).map(Some)
    }

    /// Load configuration from the default path, if there is one.
    pub fn load_from_default_path() -> Result<Option<Self>, ConfigError> {
        match Self::default_path() {
            Some(path) => Self::load_if_present(&path),
            None => Ok(None),
        }
    }
}

impl Default for PageConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Errors that can occur when loading configuration.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// JSON parsing error
    #[error("Failed to parse configuration: {0}")]
    ParseError(#[from] serde_json::Error),

    /// Configuration version is newer than supported
    #[error(
        "Configuration file version {file_version} is newer than supported version {supported_version}"
    )]
    VersionTooNew {
        file_version: u32,
        supported_version: u32,
    },

    /// I/O error when reading config
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_roundtrip() {
        let config = PageConfig::new();
        let json = config.to_json().unwrap();
        let parsed = PageConfig::from_json(&json).unwrap();

        assert_eq!(parsed.version, CONFIG_VERSION);
        assert_eq!(parsed.totals, config.totals);
        assert_eq!(parsed.shipping_methods, config.shipping_methods);
        assert_eq!(parsed.script, config.script);
    }

    #[test]
    fn test_minimal_config_uses_defaults() {
        let config = PageConfig::from_json(r#"{"version": 1}"#).unwrap();
        assert_eq!(config.log_level, LogLevel::Info);
        assert_eq!(config.totals, Totals::new(100.0, 0.0, 0.0, 100.0));
        assert_eq!(config.discount_codes.get("SAVE10"), Some(&10.0));
        assert_eq!(config.shipping_methods.len(), 3);
        assert!(config.searchable);
        assert!(config.script.is_empty());
        assert_eq!(config.preselected_shipping, None);
    }

    #[test]
    fn test_version_too_new() {
        let json = format!(r#"{{"version": {}}}"#, CONFIG_VERSION + 1);
        let result = PageConfig::from_json(&json);
        assert!(matches!(result, Err(ConfigError::VersionTooNew { .. })));
    }

    #[test]
    fn test_invalid_json() {
        let result = PageConfig::from_json("not json");
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_script_steps_parse() {
        let json = r#"{
            "version": 1,
            "log_level": "debug",
            "dropdown_size": "small",
            "script": [
                {"action": "click", "x": 10, "y": 20},
                {"action": "click_on", "target": "shipping_option", "label": "Express"},
                {"action": "click_on", "target": "checkout"},
                {"action": "type", "text": "SAVE10"},
                {"action": "key", "key": "Enter"},
                {"action": "scroll", "x": 1, "y": 2, "delta": -1}
            ]
        }"#;
        let config = PageConfig::from_json(json).unwrap();
        assert_eq!(config.log_level, LogLevel::Debug);
        assert_eq!(config.dropdown_size, DropdownSize::Small);
        assert_eq!(
            config.script,
            vec![
                ScriptStep::Click { x: 10.0, y: 20.0 },
                ScriptStep::ClickOn {
                    target: ScriptTarget::ShippingOption {
                        label: "Express".to_string()
                    }
                },
                ScriptStep::ClickOn {
                    target: ScriptTarget::Checkout
                },
                ScriptStep::Type {
                    text: "SAVE10".to_string()
                },
                ScriptStep::Key { key: KeyCode::Enter },
                ScriptStep::Scroll {
                    x: 1.0,
                    y: 2.0,
                    delta: -1.0
                },
            ]
        );
    }

    #[test]
    fn test_step_events() {
        assert_eq!(
            ScriptStep::Key { key: KeyCode::Escape }.to_event(),
            Some(Event::key(KeyCode::Escape))
        );
        assert_eq!(
            ScriptStep::Click { x: 3.0, y: 4.0 }.to_event(),
            Some(Event::left_press(3.0, 4.0))
        );
        assert_eq!(
            ScriptStep::ClickOn {
                target: ScriptTarget::Background
            }
            .to_event(),
            None
        );
    }

    #[test]
    fn test_log_level_filter() {
        assert_eq!(LogLevel::Warn.to_level_filter(), log::LevelFilter::Warn);
        assert_eq!(LogLevel::Trace.to_level_filter(), log::LevelFilter::Trace);
    }

    #[test]
    fn test_default_path_file_name() {
        if let Some(path) = PageConfig::default_path() {
            assert!(path.ends_with("storefront/storefront.json"));
        }
    }

    #[test]
    fn test_load_if_present_missing_file() {
        let result = PageConfig::load_if_present(Path::new("/nonexistent/storefront.json"));
        assert!(matches!(result, Ok(None)));
    }

    #[test]
    fn test_load_if_present_rejects_malformed_file() {
        let path = std::env::temp_dir().join(format!("storefront-malformed-{}.json", std::process::id()));
        std::fs::write(&path, "{ not json").unwrap();
        let result = PageConfig::load_if_present(&path);
        std::fs::remove_file(&path).unwrap();
        assert!(matches!(result, Err(ConfigError::ParseError(_))));
    }

    #[test]
    fn test_load_if_present_reads_valid_file() {
        let path = std::env::temp_dir().join(format!("storefront-valid-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"version": 1, "input_code": "SAVE10"}"#).unwrap();
        let result = PageConfig::load_if_present(&path);
        std::fs::remove_file(&path).unwrap();
        assert_eq!(result.unwrap().unwrap().input_code, "SAVE10");
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let result = PageConfig::load(Path::new("/nonexistent/storefront.json"));
        assert!(matches!(result, Err(ConfigError::IoError(_))));
    }
}
