use crate::wrap::{WrapOptions, DEFAULT_FOLD_FULLWIDTH, DEFAULT_HYPHEN, DEFAULT_LOOKBACK};
use clap::Parser;
use config::{
    Config as ConfigCrate, // Need this for builder
    ConfigError as ConfigCrateError,
    Environment,
    File,
    Map,
    Source,
    Value,
};
use serde::{Deserialize, Serialize};
use std::{fmt, path::PathBuf, str::FromStr};
use thiserror::Error;

const ENV_PREFIX: &str = "LABELWRAP";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file error: {0}")]
    ConfigFile(#[from] ConfigCrateError),
    #[error("Unknown device: {0} (expected label, receipt58 or receipt80)")]
    UnknownDevice(String),
    #[error("Validation error: {0}")]
    ValidationError(String),
}

/// Printer classes with a known line length in normal-font columns.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Label printer at double-size font.
    #[default]
    Label,
    /// 58mm receipt paper.
    Receipt58,
    /// 80mm receipt paper.
    Receipt80,
}

impl Device {
    pub fn max_width(self) -> i64 {
        match self {
            Device::Label => 27,
            Device::Receipt58 => 32,
            Device::Receipt80 => 48,
        }
    }
}

impl FromStr for Device {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "label" => Ok(Device::Label),
            "receipt58" => Ok(Device::Receipt58),
            "receipt80" => Ok(Device::Receipt80),
            _ => Err(ConfigError::UnknownDevice(s.to_string())),
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Device::Label => "label",
            Device::Receipt58 => "receipt58",
            Device::Receipt80 => "receipt80",
        };
        f.write_str(name)
    }
}

// Serde struct for deserializing config file values.
// Optional fields allow for layered config (defaults -> file -> env -> args).
#[derive(Deserialize, Debug, Default, Clone)]
#[serde(default)]
struct FileConfig {
    device: Option<String>,
    max_width: Option<i64>,
    lookback: Option<usize>,
    hyphen: Option<String>,
    fold_fullwidth: Option<bool>,
}

// Final Config struct, combining all sources.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub filename: Option<PathBuf>, // From command line argument
    pub device: Device,
    pub max_width: i64,
    pub lookback: usize,
    pub hyphen: String,
    pub fold_fullwidth: bool,
}

impl Default for Config {
    fn default() -> Self {
        let device = Device::default();
        Config {
            filename: None,
            device,
            max_width: device.max_width(),
            lookback: DEFAULT_LOOKBACK,
            hyphen: DEFAULT_HYPHEN.to_string(),
            fold_fullwidth: DEFAULT_FOLD_FULLWIDTH,
        }
    }
}

impl Config {
    pub fn wrap_options(&self) -> WrapOptions {
        WrapOptions::new(self.max_width)
            .with_lookback(self.lookback)
            .with_hyphen(self.hyphen.clone())
            .with_fold_fullwidth(self.fold_fullwidth)
    }
}

// Command line arguments defined using clap.
#[derive(Parser, Debug, Clone)]
#[command(author, version, about = "Reflow text for fixed-width printers", long_about = None)]
pub struct CliArgs {
    /// File to wrap; standard input when omitted
    pub filename: Option<PathBuf>,

    /// Path to a custom configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Printer class: label, receipt58 or receipt80
    #[arg(long)]
    pub device: Option<String>,

    /// Maximum line width in columns; 0 or less disables wrapping
    #[arg(long, allow_negative_numbers = true)]
    pub max_width: Option<i64>,

    /// Code points searched backwards for a word break
    #[arg(long)]
    pub lookback: Option<usize>,

    /// Marker appended when a word has to be broken
    #[arg(long)]
    pub hyphen: Option<String>,

    /// Narrow Fullwidth forms before measuring (default true)
    #[arg(long)]
    pub fold_fullwidth: Option<bool>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub debug_config: bool,

    /// Log wrapping decisions to stderr
    #[arg(short, long)]
    pub verbose: bool,
}

// Function to load configuration from all sources.
pub fn load_config(args: &CliArgs) -> Result<Config, ConfigError> {
    let env_source = Environment::with_prefix(ENV_PREFIX).separator("__");
    // Missing env vars are fine; an unreadable environment just means no overrides.
    let env_map: Map<String, Value> = env_source.collect().unwrap_or_else(|_| Map::new());

    build_config_from_args(args.clone(), Some(env_map))
}

fn default_config_path() -> Option<PathBuf> {
    directories::BaseDirs::new()
        .map(|dirs| dirs.config_dir().join("labelwrap").join("config.toml"))
}

// Separate function to allow testing with specific args and override sources
fn build_config_from_args(
    args: CliArgs,
    override_source: Option<Map<String, Value>>,
) -> Result<Config, ConfigError> {
    let config_file_path = args.config.clone().or_else(default_config_path);

    let mut config_builder = ConfigCrate::builder();

    // An explicitly requested file must exist; the default one is optional.
    if let Some(ref path) = config_file_path {
        config_builder =
            config_builder.add_source(File::from(path.clone()).required(args.config.is_some()));
    }

    // Overrides (environment or test map) beat the file.
    if let Some(overrides) = override_source {
        for (key, value) in overrides {
            config_builder = config_builder.set_override(&key, value)?;
        }
    }

    let loaded_sources: FileConfig = config_builder.build()?.try_deserialize()?;

    // args > overrides > file > defaults
    let device = match args.device.or(loaded_sources.device) {
        Some(name) => name.parse()?,
        None => Device::default(),
    };

    let config = Config {
        filename: args.filename, // Only comes from args
        device,
        max_width: args
            .max_width
            .or(loaded_sources.max_width)
            .unwrap_or_else(|| device.max_width()),
        lookback: args
            .lookback
            .or(loaded_sources.lookback)
            .unwrap_or(DEFAULT_LOOKBACK),
        hyphen: args
            .hyphen
            .or(loaded_sources.hyphen)
            .unwrap_or_else(|| DEFAULT_HYPHEN.to_string()),
        fold_fullwidth: args
            .fold_fullwidth
            .or(loaded_sources.fold_fullwidth)
            .unwrap_or(DEFAULT_FOLD_FULLWIDTH),
    };

    validate_config(&config)?;
    Ok(config)
}

/// Rejects settings that would corrupt the one-line-per-call output contract.
fn validate_config(config: &Config) -> Result<(), ConfigError> {
    if config.hyphen.contains(['\n', '\r']) {
        return Err(ConfigError::ValidationError(
            "hyphen must not contain a line break".to_string(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use config::{Map, Value, ValueKind};
    use std::fs;
    use std::path::PathBuf;
    use tempfile::TempDir;

    // Helper to create args for testing
    fn test_args(filename: Option<&str>, config_path: Option<&str>) -> CliArgs {
        let mut cmd = vec!["test_binary"];
        if let Some(f) = filename {
            cmd.push(f);
        }
        if let Some(c) = config_path {
            cmd.push("--config");
            cmd.push(c);
        }
        CliArgs::try_parse_from(cmd).expect("Failed to parse test args")
    }

    // Config file inside a temp dir so the user's own config never leaks in
    fn write_config(contents: &str) -> (TempDir, String) {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, contents).unwrap();
        let path = path.to_string_lossy().into_owned();
        (dir, path)
    }

    #[test]
    fn test_default_config() {
        let (_dir, path) = write_config("");
        let config = build_config_from_args(test_args(None, Some(&path)), None)
            .expect("Failed to load default config");

        assert_eq!(config.device, Device::Label);
        assert_eq!(config.max_width, 27, "Default max_width mismatch");
        assert_eq!(config.lookback, DEFAULT_LOOKBACK);
        assert_eq!(config.hyphen, "-");
        assert!(config.fold_fullwidth);
        assert!(config.filename.is_none(), "Default filename should be None");
    }

    #[test]
    fn test_file_config() {
        let (_dir, path) = write_config(
            "device = \"receipt80\"\nlookback = 6\nhyphen = \"~\"\nfold_fullwidth = false\n",
        );
        let config = build_config_from_args(test_args(None, Some(&path)), None)
            .expect("Failed to load config file");

        assert_eq!(config.device, Device::Receipt80);
        assert_eq!(config.max_width, 48, "Device preset should set max_width");
        assert_eq!(config.lookback, 6);
        assert_eq!(config.hyphen, "~");
        assert!(!config.fold_fullwidth);
    }

    #[test]
    fn test_explicit_width_beats_device_preset() {
        let (_dir, path) = write_config("device = \"receipt58\"\nmax_width = 20\n");
        let config = build_config_from_args(test_args(None, Some(&path)), None).unwrap();

        assert_eq!(config.device, Device::Receipt58);
        assert_eq!(config.max_width, 20);
    }

    #[test]
    fn test_env_override() {
        let (_dir, path) = write_config("max_width = 20\nlookback = 3\n");
        // Keys are lowercase as config::Environment produces them
        let mut override_map = Map::new();
        override_map.insert(
            "max_width".to_string(),
            Value::new(None, ValueKind::I64(40)),
        );
        override_map.insert(
            "hyphen".to_string(),
            Value::new(None, ValueKind::String("=".to_string())),
        );

        let config = build_config_from_args(test_args(None, Some(&path)), Some(override_map))
            .expect("Failed to load config with simulated env");

        assert_eq!(config.max_width, 40, "Env override max_width failed");
        assert_eq!(config.hyphen, "=", "Env override hyphen failed");
        assert_eq!(config.lookback, 3, "Env override affected unrelated key");
    }

    #[test]
    fn test_arg_override() {
        let (_dir, path) = write_config("max_width = 20\ndevice = \"receipt58\"\n");
        let args = CliArgs::try_parse_from([
            "test_binary",
            "note.txt",
            "--config",
            path.as_str(),
            "--max-width=-1",
            "--device=receipt80",
            "--fold-fullwidth=false",
        ])
        .expect("Failed to parse specific args");

        let config = build_config_from_args(args, None).expect("Failed to build config from args");

        assert_eq!(config.filename, Some(PathBuf::from("note.txt")));
        assert_eq!(config.device, Device::Receipt80);
        assert_eq!(config.max_width, -1);
        assert!(!config.fold_fullwidth);
    }

    #[test]
    fn test_unknown_device_is_rejected() {
        let (_dir, path) = write_config("device = \"dot-matrix\"\n");
        let result = build_config_from_args(test_args(None, Some(&path)), None);

        assert!(matches!(result, Err(ConfigError::UnknownDevice(name)) if name == "dot-matrix"));
    }

    #[test]
    fn test_hyphen_with_line_break_is_rejected() {
        let (_dir, path) = write_config("hyphen = \"-\\n\"\n");
        let result = build_config_from_args(test_args(None, Some(&path)), None);

        assert!(matches!(result, Err(ConfigError::ValidationError(_))));
    }

    #[test]
    fn test_missing_explicit_config_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope.toml");
        let result = build_config_from_args(
            test_args(None, Some(missing.to_str().unwrap())),
            None,
        );

        assert!(matches!(result, Err(ConfigError::ConfigFile(_))));
    }

    #[test]
    fn test_device_parsing() {
        assert_eq!("Receipt58".parse::<Device>().unwrap(), Device::Receipt58);
        assert_eq!(Device::Receipt80.to_string(), "receipt80");
        assert!("".parse::<Device>().is_err());
    }

    #[test]
    fn test_wrap_options_from_config() {
        let config = Config {
            max_width: 12,
            lookback: 4,
            hyphen: "~".to_string(),
            ..Config::default()
        };
        let options = config.wrap_options();

        assert_eq!(options.max_width, 12);
        assert_eq!(options.lookback, 4);
        assert_eq!(options.hyphen, "~");
        assert!(options.fold_fullwidth);
    }
}
