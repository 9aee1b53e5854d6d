use crate::errors::{MotionError, Result};
use crate::plugin::MotionTokens;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// TailMotion project configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TailmotionConfig {
    /// Stylesheet bundling settings
    pub build: BuildConfig,

    /// Theme token layer, applied over the defaults
    pub theme: MotionTokens,

    /// Option token layer, applied over the theme
    pub tokens: MotionTokens,
}

impl Default for TailmotionConfig {
    fn default() -> Self {
        Self {
            build: BuildConfig::default(),
            theme: MotionTokens::empty(),
            tokens: MotionTokens::empty(),
        }
    }
}

/// Settings for the `build` step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BuildConfig {
    /// Entry stylesheet, relative to the root
    pub entry: PathBuf,

    /// Bundled output path, relative to the root
    pub output: PathBuf,

    /// Minify the bundled output
    pub minify: bool,

    /// Where to write the JSON build manifest
    pub manifest: Option<PathBuf>,

    /// Banner version; read from `package.json` when unset
    pub version: Option<String>,
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            entry: PathBuf::from("src/index.css"),
            output: PathBuf::from("tailmotion.css"),
            minify: false,
            manifest: None,
            version: None,
        }
    }
}

impl TailmotionConfig {
    /// Load configuration from a YAML file
    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let content = read_config(path)?;
        serde_yaml::from_str(&content).map_err(|e| MotionError::ConfigError {
            message: format!("Failed to parse YAML config: {}", e),
        })
    }

    /// Load configuration from a JSON file
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = read_config(path)?;
        serde_json::from_str(&content).map_err(|e| MotionError::ConfigError {
            message: format!("Failed to parse JSON config: {}", e),
        })
    }

    /// Load configuration from a file (auto-detect format)
    pub fn from_file(path: &Path) -> Result<Self> {
        match path.extension().and_then(|s| s.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            _ => Err(MotionError::ConfigError {
                message: format!(
                    "Unsupported config file format: {}. Use .yaml, .yml, or .json",
                    path.display()
                ),
            }),
        }
    }

    /// Merge with another configuration; `other` wins where it says something.
    pub fn merge(mut self, other: Self) -> Self {
        let defaults = BuildConfig::default();
        if other.build.entry != defaults.entry {
            self.build.entry = other.build.entry;
        }
        if other.build.output != defaults.output {
            self.build.output = other.build.output;
        }
        self.build.minify |= other.build.minify;
        if other.build.manifest.is_some() {
            self.build.manifest = other.build.manifest;
        }
        if other.build.version.is_some() {
            self.build.version = other.build.version;
        }

        self.theme = self.theme.merge(&other.theme);
        self.tokens = self.tokens.merge(&other.tokens);
        self
    }

    /// Token tables after layering defaults, theme and options.
    pub fn resolved_tokens(&self) -> MotionTokens {
        crate::plugin::resolve_tokens(&self.theme, &self.tokens)
    }
}

fn read_config(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| MotionError::ConfigError {
        message: format!("Failed to read config file {}: {}", path.display(), e),
    })
}
