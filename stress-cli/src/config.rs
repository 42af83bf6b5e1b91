//! Configuration loading for undo-stress.
//!
//! Configuration is loaded from an optional TOML file. Every section and
//! field has a default, so an empty file (or no file) is a valid config.

use serde::Deserialize;
use std::path::PathBuf;
use std::time::Duration;

/// Root configuration for undo-stress.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    /// Actor executable configuration.
    #[serde(default)]
    pub actor: ActorConfig,
    /// Build step configuration.
    #[serde(default)]
    pub build: BuildConfig,
    /// Viewer configuration.
    #[serde(default)]
    pub viewer: ViewerConfig,
}

/// Actor executable configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ActorConfig {
    /// Path to the actor executable (default: target/release/test_undo_redo).
    #[serde(default = "default_actor_binary")]
    pub binary: PathBuf,
    /// Arguments placed before the index and document, e.g. a script path
    /// when `binary` is an interpreter.
    #[serde(default)]
    pub args: Vec<String>,
    /// Per-actor timeout in seconds. Unset means wait forever.
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

/// Build step configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct BuildConfig {
    /// Run the build before launching actors (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Directory the build command runs in (default: current directory).
    #[serde(default = "default_working_dir")]
    pub working_dir: PathBuf,
    /// Program and arguments (default: cargo build --release -p test_undo_redo).
    #[serde(default = "default_build_command")]
    pub command: Vec<String>,
}

/// Viewer configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct ViewerConfig {
    /// Open the viewer for the run's document (default: true).
    #[serde(default = "default_true")]
    pub enabled: bool,
    /// Base URL of the already-running viewer (default: http://127.0.0.1).
    #[serde(default = "default_viewer_base_url")]
    pub base_url: String,
    /// Opener program and leading arguments. The URL is appended.
    /// Defaults to the platform's handler (xdg-open, open, start).
    #[serde(default)]
    pub opener: Option<Vec<String>>,
    /// Delay after opening the viewer before actors start (default: 2000ms).
    #[serde(default = "default_settle_ms")]
    pub settle_ms: u64,
}

// Default value functions
fn default_true() -> bool {
    true
}

fn default_actor_binary() -> PathBuf {
    PathBuf::from("target/release/test_undo_redo")
}

fn default_working_dir() -> PathBuf {
    PathBuf::from(".")
}

fn default_build_command() -> Vec<String> {
    ["cargo", "build", "--release", "-p", "test_undo_redo"]
        .into_iter()
        .map(String::from)
        .collect()
}

fn default_viewer_base_url() -> String {
    "http://127.0.0.1".to_string()
}

fn default_settle_ms() -> u64 {
    2000
}

impl Default for ActorConfig {
    fn default() -> Self {
        Self {
            binary: default_actor_binary(),
            args: Vec::new(),
            timeout_secs: None,
        }
    }
}

impl ActorConfig {
    /// Per-actor timeout, if configured.
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl Default for BuildConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            working_dir: default_working_dir(),
            command: default_build_command(),
        }
    }
}

impl Default for ViewerConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            base_url: default_viewer_base_url(),
            opener: None,
            settle_ms: default_settle_ms(),
        }
    }
}

impl ViewerConfig {
    /// Delay between opening the viewer and starting actors.
    pub fn settle(&self) -> Duration {
        Duration::from_millis(self.settle_ms)
    }
}

impl Config {
    /// Load configuration from a TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn from_file(path: &std::path::Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadError {
            path: path.to_path_buf(),
            source: e,
        })?;

        toml::from_str(&content).map_err(|e| ConfigError::ParseError {
            path: path.to_path_buf(),
            source: e,
        })
    }
}

/// Largest fleet a single run will start.
pub const MAX_ACTORS: u32 = 10_000;

/// Check a requested actor count and narrow it to the fleet's index type.
///
/// # Errors
///
/// Returns [`ConfigError::InvalidActorCount`] for counts outside `1..=MAX_ACTORS`.
pub fn validate_actor_count(count: i64) -> Result<u32, ConfigError> {
    match u32::try_from(count) {
        Ok(n) if (1..=MAX_ACTORS).contains(&n) => Ok(n),
        _ => Err(ConfigError::InvalidActorCount(count)),
    }
}

/// Configuration error types.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Failed to read configuration file.
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// Failed to parse configuration file.
    #[error("failed to parse config file {path}: {source}")]
    ParseError {
        /// Path to the configuration file.
        path: PathBuf,
        /// Underlying TOML parse error.
        source: toml::de::Error,
    },
    /// Actor count outside `1..=MAX_ACTORS`.
    #[error("invalid actor count {0}: expected between 1 and {max} actors", max = MAX_ACTORS)]
    InvalidActorCount(i64),
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_is_valid() {
        let config = Config::default();
        assert_eq!(
            config.actor.binary,
            PathBuf::from("target/release/test_undo_redo")
        );
        assert!(config.actor.timeout().is_none());
        assert!(config.build.enabled);
        assert_eq!(config.build.command[0], "cargo");
        assert_eq!(config.viewer.base_url, "http://127.0.0.1");
        assert_eq!(config.viewer.settle(), Duration::from_secs(2));
    }

    #[test]
    fn config_from_toml_string() {
        let toml = r#"
[actor]
binary = "/opt/actors/undo"
args = ["--scenario", "floors"]
timeout_secs = 90

[build]
enabled = false
working_dir = "/src/project"
command = ["make", "actors"]

[viewer]
base_url = "http://viewer.local:8000/"
opener = ["firefox", "--new-tab"]
settle_ms = 0
"#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.actor.binary, PathBuf::from("/opt/actors/undo"));
        assert_eq!(config.actor.args, vec!["--scenario", "floors"]);
        assert_eq!(config.actor.timeout(), Some(Duration::from_secs(90)));
        assert!(!config.build.enabled);
        assert_eq!(config.build.working_dir, PathBuf::from("/src/project"));
        assert_eq!(config.build.command, vec!["make", "actors"]);
        assert_eq!(config.viewer.base_url, "http://viewer.local:8000/");
        assert_eq!(
            config.viewer.opener,
            Some(vec!["firefox".to_string(), "--new-tab".to_string()])
        );
        assert_eq!(config.viewer.settle_ms, 0);
    }

    #[test]
    fn empty_toml_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert!(config.build.enabled);
        assert!(config.viewer.enabled);
        assert_eq!(config.viewer.settle_ms, 2000);
    }

    #[test]
    fn partial_section_fills_defaults() {
        let config: Config = toml::from_str("[actor]\ntimeout_secs = 5\n").unwrap();
        assert_eq!(
            config.actor.binary,
            PathBuf::from("target/release/test_undo_redo")
        );
        assert_eq!(config.actor.timeout_secs, Some(5));
    }

    #[test]
    fn from_file_reads_toml() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[viewer]\nenabled = false").unwrap();
        let config = Config::from_file(file.path()).unwrap();
        assert!(!config.viewer.enabled);
    }

    #[test]
    fn from_file_missing_is_read_error() {
        let err = Config::from_file(std::path::Path::new("/nonexistent/stress.toml")).unwrap_err();
        assert!(matches!(err, ConfigError::ReadError { .. }));
    }

    #[test]
    fn from_file_bad_toml_is_parse_error() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[actor\nbinary = ").unwrap();
        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::ParseError { .. }));
    }

    #[test]
    fn actor_count_must_be_positive() {
        assert_eq!(validate_actor_count(1).unwrap(), 1);
        assert_eq!(validate_actor_count(64).unwrap(), 64);
        assert!(matches!(
            validate_actor_count(0),
            Err(ConfigError::InvalidActorCount(0))
        ));
        assert!(matches!(
            validate_actor_count(-3),
            Err(ConfigError::InvalidActorCount(-3))
        ));
        assert_eq!(validate_actor_count(i64::from(MAX_ACTORS)).unwrap(), MAX_ACTORS);
        assert!(matches!(
            validate_actor_count(i64::from(MAX_ACTORS) + 1),
            Err(ConfigError::InvalidActorCount(_))
        ));
        assert!(validate_actor_count(i64::from(u32::MAX)).is_err());
        assert!(validate_actor_count(i64::from(u32::MAX) + 1).is_err());
    }
}
