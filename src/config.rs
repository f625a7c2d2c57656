//! urlqr runtime configuration handling

use crate::color::Color;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// URL encoded when none is given on the command line.
pub const DEFAULT_URL: &str = "https://github.com/username";

/// Largest accepted module edge length in pixels.
pub const MAX_MODULE_SIZE: u32 = 100;

/// Top-level configuration, loaded once at startup and passed down explicitly
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where the image is written
    pub output: OutputOptions,
    /// How the image looks
    pub render: RenderOptions,
    /// Logging configuration
    pub logging: LoggingOptions,
    /// File the configuration was read from, if any
    #[serde(skip)]
    pub source: Option<PathBuf>,
}

impl AppConfig {
    /// Load configuration from an explicit path or fall back to discovered defaults,
    /// then apply environment overrides.
    ///
    /// Runs before logging is installed, so nothing is logged here; the chosen
    /// file is kept in [`AppConfig::source`] for the caller to report.
    pub fn load(explicit_path: Option<&Path>) -> Result<Self> {
        let source = match explicit_path {
            Some(path) => Some(path.to_path_buf()),
            None => Self::discover_file()?,
        };

        let mut config = match source.as_deref() {
            Some(path) => Self::from_file(path)?,
            None => Self::default(),
        };
        config.source = source;

        config.apply_env_overrides()?;
        config.render.validate()?;
        Ok(config)
    }

    /// Attempt to locate a configuration file in common locations.
    fn discover_file() -> Result<Option<PathBuf>> {
        let cwd =
            env::current_dir().map_err(|e| Error::Config(format!("Failed to read cwd: {e}")))?;
        for candidate in ["urlqr.toml", "urlqr.yaml", "urlqr.yml"] {
            let path = cwd.join(candidate);
            if path.exists() {
                return Ok(Some(path));
            }
        }

        if let Some(xdg_config) = env::var_os("XDG_CONFIG_HOME") {
            let base = PathBuf::from(xdg_config).join("urlqr");
            for candidate in ["config.toml", "config.yaml"] {
                let path = base.join(candidate);
                if path.exists() {
                    return Ok(Some(path));
                }
            }
        }

        Ok(None)
    }

    /// Read configuration from a concrete file path.
    pub fn from_file(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read {}: {e}", path.display())))?;

        match path
            .extension()
            .and_then(|ext| ext.to_str())
            .unwrap_or("")
            .to_ascii_lowercase()
            .as_str()
        {
            "toml" => toml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse TOML {}: {e}", path.display()))
            }),
            "yaml" | "yml" => serde_yaml::from_str(&contents).map_err(|e| {
                Error::Config(format!("Failed to parse YAML {}: {e}", path.display()))
            }),
            other => Err(Error::Config(format!(
                "Unsupported config format '{}', expected toml/yaml",
                other
            ))),
        }
    }

    /// Apply overrides from the process environment.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        self.output.apply_overrides(&lookup);
        self.render.apply_overrides(&lookup)?;
        self.logging.apply_overrides(&lookup)?;
        Ok(())
    }
}

/// Output location settings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputOptions {
    /// Directory, relative to the working directory, receiving the image
    pub directory: PathBuf,
    /// File name of the image, without the `.png` extension
    pub name: String,
}

impl Default for OutputOptions {
    fn default() -> Self {
        Self {
            directory: PathBuf::from("qr_codes"),
            name: "qr_code".to_string(),
        }
    }
}

impl OutputOptions {
    fn apply_overrides<F>(&mut self, lookup: &F)
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(dir) = lookup("QR_CODE_DIR") {
            self.directory = PathBuf::from(dir);
        }
        if let Some(name) = lookup("QR_CODE_NAME") {
            if !name.trim().is_empty() {
                self.name = name;
            }
        }
    }
}

/// QR error correction level
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "UPPERCASE")]
pub enum ErrorCorrection {
    /// Recovers ~7% of the symbol
    L,
    /// Recovers ~15% of the symbol
    #[default]
    M,
    /// Recovers ~25% of the symbol
    Q,
    /// Recovers ~30% of the symbol
    H,
}

impl FromStr for ErrorCorrection {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_uppercase().as_str() {
            "L" => Ok(Self::L),
            "M" => Ok(Self::M),
            "Q" => Ok(Self::Q),
            "H" => Ok(Self::H),
            _ => Err(Error::Config(format!(
                "Unknown error correction level '{value}', expected L, M, Q or H"
            ))),
        }
    }
}

impl ErrorCorrection {
    pub(crate) fn to_ec_level(self) -> qrcode::EcLevel {
        match self {
            Self::L => qrcode::EcLevel::L,
            Self::M => qrcode::EcLevel::M,
            Self::Q => qrcode::EcLevel::Q,
            Self::H => qrcode::EcLevel::H,
        }
    }
}

/// Appearance of the rendered image
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    /// Color of dark modules
    pub fill_color: Color,
    /// Color of light modules and the quiet zone
    pub back_color: Color,
    /// Error correction level
    pub error_correction: ErrorCorrection,
    /// Edge length of one module in pixels
    pub module_size: u32,
    /// Surround the symbol with the standard quiet zone
    pub quiet_zone: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            fill_color: Color::from_parts("red", [255, 0, 0]),
            back_color: Color::from_parts("white", [255, 255, 255]),
            error_correction: ErrorCorrection::default(),
            module_size: 10,
            quiet_zone: true,
        }
    }
}

impl RenderOptions {
    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(fill) = lookup("FILL_COLOR") {
            self.fill_color = Color::parse(&fill)?;
        }
        if let Some(back) = lookup("BACK_COLOR") {
            self.back_color = Color::parse(&back)?;
        }
        if let Some(level) = lookup("QR_ERROR_CORRECTION") {
            self.error_correction = level.parse()?;
        }
        if let Some(size) = lookup("QR_MODULE_SIZE") {
            self.module_size = size.trim().parse::<u32>().map_err(|e| {
                Error::Config(format!("Invalid QR_MODULE_SIZE '{size}': {e}"))
            })?;
            self.validate()?;
        }
        Ok(())
    }

    /// Reject settings the encoder cannot render.
    pub fn validate(&self) -> Result<()> {
        if !(1..=MAX_MODULE_SIZE).contains(&self.module_size) {
            return Err(Error::Config(format!(
                "Module size {} out of range, expected 1..={MAX_MODULE_SIZE}",
                self.module_size
            )));
        }
        Ok(())
    }
}

/// Structured logging configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingOptions {
    /// Default log level (overridable via `URLQR_LOG_LEVEL`)
    pub level: String,
    /// Optional log file path for teeing structured logs
    pub file: Option<PathBuf>,
    /// Force ANSI colors in stderr logging
    pub color: bool,
    /// Optional log rotation strategy applied to `file`
    pub rotation: Option<LogRotation>,
}

impl Default for LoggingOptions {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            file: None,
            color: true,
            rotation: None,
        }
    }
}

impl LoggingOptions {
    fn apply_overrides<F>(&mut self, lookup: &F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(level) = lookup("URLQR_LOG_LEVEL") {
            self.level = level;
        }
        if let Some(file) = lookup("URLQR_LOG_FILE") {
            self.file = Some(PathBuf::from(file));
        }
        if let Some(color) = lookup("URLQR_LOG_COLOR") {
            match color.to_ascii_lowercase().as_str() {
                "0" | "false" | "off" => self.color = false,
                "1" | "true" | "on" => self.color = true,
                _ => {
                    return Err(Error::Config(format!(
                        "Invalid URLQR_LOG_COLOR '{color}', expected on/off"
                    )));
                }
            }
        }
        if let Some(rotation) = lookup("URLQR_LOG_ROTATION") {
            self.rotation = Some(rotation.parse()?);
        }
        Ok(())
    }
}

/// Supported log rotation policies for file sinks
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogRotation {
    /// Rotate log files once per hour
    Hourly,
    /// Rotate log files once per day
    Daily,
}

impl FromStr for LogRotation {
    type Err = Error;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "hourly" => Ok(Self::Hourly),
            "daily" => Ok(Self::Daily),
            _ => Err(Error::Config(format!(
                "Unknown log rotation '{value}', expected hourly or daily"
            ))),
        }
    }
}
