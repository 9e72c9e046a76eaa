use jxlint_common::{Error, RuleRegistry};
use schemars::JsonSchema;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

/// Name of the configuration file looked up from the source directory upwards
pub const CONFIG_FILE_NAME: &str = ".jxlint.toml";

/// Written by `jxlint config init`
pub const DEFAULT_CONFIG_TEMPLATE: &str = r#"# jxlint configuration

# Treat warnings as errors when deciding the exit code
warnings_are_errors = false

# Number of worker threads, 0 = one per available core
jobs = 0

# Per-rule switches. Rule names are case-insensitive.
[rules."XML version specified"]
enabled = false

[rules."Unique attribute"]
enabled = true

[rules."Author tag"]
enabled = true

[rules."Encoding"]
enabled = true

[color]
# "auto", "always" or "never"
ui = "auto"
warning = "yellow"
error = "red"
fatal = "bright_red"
"#;

/// Configuration for jxlint loaded from .jxlint.toml
#[derive(Debug, Default, Deserialize, JsonSchema)]
pub struct LintConfig {
    /// Treat warnings as errors when deciding the exit code
    #[serde(default)]
    pub warnings_are_errors: bool,
    /// Number of worker threads, 0 = one per available core
    #[serde(default)]
    pub jobs: Option<usize>,
    /// Per-rule settings keyed by rule name
    #[serde(default)]
    pub rules: BTreeMap<String, RuleConfig>,
    #[serde(default)]
    pub color: ColorConfig,
}

/// Configuration for a specific lint rule
#[derive(Debug, Clone, Default, Deserialize, JsonSchema)]
pub struct RuleConfig {
    /// Whether the rule runs when no explicit selection is given
    pub enabled: Option<bool>,
}

/// Color output configuration
#[derive(Debug, Clone, Deserialize, JsonSchema)]
pub struct ColorConfig {
    #[serde(default)]
    pub ui: ColorMode,
    #[serde(default = "default_warning_color")]
    pub warning: Color,
    #[serde(default = "default_error_color")]
    pub error: Color,
    #[serde(default = "default_fatal_color")]
    pub fatal: Color,
}

impl Default for ColorConfig {
    fn default() -> Self {
        Self {
            ui: ColorMode::default(),
            warning: default_warning_color(),
            error: default_error_color(),
            fatal: default_fatal_color(),
        }
    }
}

fn default_warning_color() -> Color {
    Color::Yellow
}

fn default_error_color() -> Color {
    Color::Red
}

fn default_fatal_color() -> Color {
    Color::BrightRed
}

/// Color mode for output
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum ColorMode {
    /// Respect NO_COLOR and terminal detection
    #[default]
    Auto,
    Always,
    Never,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Color {
    Black,
    Red,
    Green,
    Yellow,
    Blue,
    Magenta,
    Cyan,
    White,
    BrightBlack,
    BrightRed,
    BrightGreen,
    BrightYellow,
    BrightBlue,
    BrightMagenta,
    BrightCyan,
    BrightWhite,
}

/// A problem found by [`LintConfig::validate`] or [`LintConfig::validate_file`]
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("unknown field '{field}'")]
    UnknownField { field: String },
    #[error("'{name}' is not a valid rule.")]
    UnknownRule { name: String },
}

impl LintConfig {
    /// Load configuration from a file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        Self::from_str_at(&content, path)
    }

    fn from_str_at(content: &str, path: &Path) -> Result<Self, ConfigError> {
        toml::from_str(content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })
    }

    /// Path of the nearest .jxlint.toml in `dir` or one of its parents
    pub fn find(dir: &Path) -> Option<PathBuf> {
        dir.ancestors()
            .map(|d| d.join(CONFIG_FILE_NAME))
            .find(|p| p.is_file())
    }

    /// Find and load .jxlint.toml from the given directory or its parents.
    /// A file that exists but cannot be read or parsed is an error.
    pub fn find_and_load(dir: &Path) -> Result<Option<Self>, ConfigError> {
        match Self::find(dir) {
            Some(path) => {
                tracing::debug!(path = %path.display(), "loading configuration");
                Self::from_file(&path).map(Some)
            }
            None => Ok(None),
        }
    }

    /// Apply the per-rule `enabled` switches to `registry`.
    /// Must run before any validation starts.
    pub fn apply(&self, registry: &mut RuleRegistry) -> Result<(), Error> {
        for name in self.rules.keys() {
            registry.get_lint_rule(name)?;
        }
        for (name, rule) in &self.rules {
            if let Some(enabled) = rule.enabled {
                registry.set_rule_enabled(name, enabled)?;
            }
        }
        Ok(())
    }

    /// Rule names in the file that `registry` does not know
    pub fn validate(&self, registry: &RuleRegistry) -> Vec<ValidationError> {
        self.rules
            .keys()
            .filter(|name| registry.get_lint_rule(name).is_err())
            .map(|name| ValidationError::UnknownRule { name: name.clone() })
            .collect()
    }

    /// Parse `path` and report unknown fields as well as unknown rule names
    pub fn validate_file(
        path: &Path,
        registry: &RuleRegistry,
    ) -> Result<Vec<ValidationError>, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::from_str_at(&content, path)?;
        let raw: toml::Table = toml::from_str(&content).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            source: e,
        })?;

        let mut errors = unknown_fields(&raw);
        errors.extend(config.validate(registry));
        Ok(errors)
    }

    pub fn color_mode(&self) -> ColorMode {
        self.color.ui
    }

    /// JSON Schema describing the configuration file
    pub fn schema() -> schemars::Schema {
        schemars::schema_for!(LintConfig)
    }
}

const TOP_LEVEL_FIELDS: &[&str] = &["warnings_are_errors", "jobs", "rules", "color"];
const RULE_FIELDS: &[&str] = &["enabled"];
const COLOR_FIELDS: &[&str] = &["ui", "warning", "error", "fatal"];

fn unknown_fields(raw: &toml::Table) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let mut check = |table: &toml::Table, known: &[&str], prefix: &str| {
        for key in table.keys() {
            if !known.contains(&key.as_str()) {
                errors.push(ValidationError::UnknownField {
                    field: format!("{}{}", prefix, key),
                });
            }
        }
    };

    check(raw, TOP_LEVEL_FIELDS, "");
    if let Some(color) = raw.get("color").and_then(|v| v.as_table()) {
        check(color, COLOR_FIELDS, "color.");
    }
    if let Some(rules) = raw.get("rules").and_then(|v| v.as_table()) {
        for (name, rule) in rules {
            if let Some(rule) = rule.as_table() {
                check(rule, RULE_FIELDS, &format!("rules.\"{}\".", name));
            }
        }
    }

    errors
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Failed to read config file '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config file '{}': {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}
