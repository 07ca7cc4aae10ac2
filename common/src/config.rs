use serde::Deserialize;
use std::fmt::Formatter;
use std::path::{Path, PathBuf};
use std::time::Duration;
use std::{fmt, fs, io};

#[derive(Debug)]
pub enum ConfigError {
    Io(io::Error),
    Yaml(serde_yaml::Error),
}

impl From<io::Error> for ConfigError {
    fn from(err: io::Error) -> Self {
        ConfigError::Io(err)
    }
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::Yaml(err)
    }
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(err) => write!(f, "cannot read config: {}", err),
            ConfigError::Yaml(err) => write!(f, "invalid config: {}", err),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(err) => Some(err),
            ConfigError::Yaml(err) => Some(err),
        }
    }
}

pub fn default_platform() -> String {
    if cfg!(target_os = "windows") {
        "windows"
    } else if cfg!(target_os = "macos") {
        "osx"
    } else {
        "linux"
    }
    .to_owned()
}

fn default_profile() -> String {
    "120".to_owned()
}

/// Inputs of a shader build pass.
///
/// ```yaml
/// source_dir: shaders
/// output_dir: build/shaders
/// tool_dir: tools/bgfx
/// platform: windows
/// profile: "120"
/// timeout_ms: 30000
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BuildConfig {
    pub source_dir: PathBuf,
    pub output_dir: PathBuf,
    /// Directory of the compiler executable, its shared includes and `varying.def.sc`.
    pub tool_dir: PathBuf,
    #[serde(default = "default_platform")]
    pub platform: String,
    #[serde(default = "default_profile")]
    pub profile: String,
    #[serde(default)]
    pub timeout_ms: Option<u64>,
    /// Count a non-zero compiler exit code as a failed file.
    #[serde(default)]
    pub fail_on_exit_code: bool,
}

impl BuildConfig {
    pub fn new(
        source_dir: impl Into<PathBuf>,
        output_dir: impl Into<PathBuf>,
        tool_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_dir: output_dir.into(),
            tool_dir: tool_dir.into(),
            platform: default_platform(),
            profile: default_profile(),
            timeout_ms: None,
            fail_on_exit_code: false,
        }
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let text = fs::read_to_string(path)?;
        Ok(serde_yaml::from_str(&text)?)
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_ms.map(Duration::from_millis)
    }
}
