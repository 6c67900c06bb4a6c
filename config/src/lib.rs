//! Configuration for Codon.
//!
//! The config file lives at `~/.codon/config.toml`. Every section is
//! optional; a missing file is not an error and the binary falls back to
//! built-in defaults.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::{env, fs, io};

use serde::Deserialize;
use tempfile::NamedTempFile;
use thiserror::Error;

#[derive(Debug, Default, Deserialize)]
pub struct CodonConfig {
    pub app: Option<AppConfig>,
    pub session: Option<SessionConfig>,
    pub trace: Option<TraceConfig>,
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config at {path}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to parse config at {path}")]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

impl ConfigError {
    #[must_use]
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. } | ConfigError::Parse { path, .. } => path,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
pub struct AppConfig {
    /// Keep reply punctuation to plain ASCII.
    #[serde(default)]
    pub ascii_only: bool,
    /// Directory for the log file. Supports `${ENV_VAR}` references.
    pub log_dir: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct SessionConfig {
    /// Seconds of silence before a session restarts. Default 600.
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize)]
pub struct TraceConfig {
    /// Most derivation lines shown per reply.
    pub max_lines: Option<usize>,
    /// Longest rendered line, in characters.
    pub max_line_chars: Option<usize>,
}

/// Replace `${VAR}` references with the environment's values.
///
/// Missing variables expand to the empty string; an unclosed brace is left
/// verbatim.
#[must_use]
pub fn expand_env_vars(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut rest = value;

    while !rest.is_empty() {
        if let Some(after) = rest.strip_prefix("${")
            && let Some(end) = after.find('}')
        {
            let var = &after[..end];
            if !var.is_empty() {
                out.push_str(&env::var(var).unwrap_or_default());
            }
            rest = &after[end + 1..];
            continue;
        }

        if let Some(ch) = rest.chars().next() {
            out.push(ch);
            rest = &rest[ch.len_utf8()..];
        }
    }

    out
}

impl CodonConfig {
    pub fn load() -> Result<Option<Self>, ConfigError> {
        let Some(path) = config_path() else {
            return Ok(None);
        };
        Self::load_from(&path)
    }

    /// Load a config from an explicit path. Missing file is `Ok(None)`.
    pub fn load_from(path: &Path) -> Result<Option<Self>, ConfigError> {
        if !path.exists() {
            return Ok(None);
        }

        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(err) => {
                tracing::warn!("Failed to read config at {:?}: {}", path, err);
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source: err,
                });
            }
        };

        match toml::from_str(&content) {
            Ok(config) => Ok(Some(config)),
            Err(err) => {
                tracing::warn!("Failed to parse config at {:?}: {}", path, err);
                Err(ConfigError::Parse {
                    path: path.to_path_buf(),
                    source: err,
                })
            }
        }
    }

    #[must_use]
    pub fn path() -> Option<PathBuf> {
        config_path()
    }

    /// Log directory from `[app]`, with `${ENV_VAR}` references expanded.
    #[must_use]
    pub fn log_dir(&self) -> Option<PathBuf> {
        let raw = self.app.as_ref()?.log_dir.as_ref()?;
        Some(PathBuf::from(expand_env_vars(raw)))
    }

    /// Persist the session timeout to the config file.
    ///
    /// Uses `toml_edit` to preserve comments and formatting. Creates the
    /// config file and parent directory if they don't exist. The file is
    /// replaced by rename, never rewritten in place.
    pub fn persist_timeout(timeout_secs: u64) -> io::Result<()> {
        let Some(path) = config_path() else {
            return Err(io::Error::new(
                io::ErrorKind::NotFound,
                "Could not determine config path",
            ));
        };
        Self::persist_timeout_at(&path, timeout_secs)
    }

    /// Same as [`Self::persist_timeout`], against an explicit path.
    pub fn persist_timeout_at(path: &Path, timeout_secs: u64) -> io::Result<()> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let content = if path.exists() {
            fs::read_to_string(path)?
        } else {
            String::new()
        };

        let mut doc = content
            .parse::<toml_edit::DocumentMut>()
            .map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))?;

        if !doc.contains_key("session") {
            doc["session"] = toml_edit::Item::Table(toml_edit::Table::new());
        }
        doc["session"]["timeout_secs"] =
            toml_edit::value(i64::try_from(timeout_secs).unwrap_or(i64::MAX));

        // Write back atomically: temp file in the same directory, then rename.
        let dir = match path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        let mut tmp = NamedTempFile::new_in(dir)?;
        tmp.write_all(doc.to_string().as_bytes())?;
        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|err| err.error)?;
        Ok(())
    }
}

pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".codon").join("config.toml"))
}

#[cfg(test)]
mod tests {
    use super::{CodonConfig, ConfigError, expand_env_vars};
    use std::path::PathBuf;

    // expand_env_vars tests

    #[test]
    fn expand_env_vars_no_vars() {
        let result = expand_env_vars("hello world");
        assert_eq!(result, "hello world");
    }

    #[test]
    fn expand_env_vars_single_var() {
        unsafe {
            std::env::set_var("CODON_TEST_VAR", "replaced");
        }
        let result = expand_env_vars("prefix ${CODON_TEST_VAR} suffix");
        assert_eq!(result, "prefix replaced suffix");
        unsafe {
            std::env::remove_var("CODON_TEST_VAR");
        }
    }

    #[test]
    fn expand_env_vars_missing_var_becomes_empty() {
        unsafe {
            std::env::remove_var("CODON_MISSING_VAR");
        }
        let result = expand_env_vars("before ${CODON_MISSING_VAR} after");
        assert_eq!(result, "before  after");
    }

    #[test]
    fn expand_env_vars_unclosed_brace_preserved() {
        let result = expand_env_vars("test ${UNCLOSED");
        assert_eq!(result, "test ${UNCLOSED");
    }

    #[test]
    fn expand_env_vars_empty_var_name_dropped() {
        let result = expand_env_vars("test ${} more");
        assert_eq!(result, "test  more");
    }

    #[test]
    fn expand_env_vars_adjacent_vars() {
        unsafe {
            std::env::set_var("CODON_ADJ_A", "X");
            std::env::set_var("CODON_ADJ_B", "Y");
        }
        let result = expand_env_vars("${CODON_ADJ_A}${CODON_ADJ_B}");
        assert_eq!(result, "XY");
        unsafe {
            std::env::remove_var("CODON_ADJ_A");
            std::env::remove_var("CODON_ADJ_B");
        }
    }

    // load tests

    #[test]
    fn load_missing_file_is_none() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("config.toml");
        let loaded = CodonConfig::load_from(&path).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn load_reads_all_sections() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("config.toml");
        std::fs::write(
            &path,
            r#"
[app]
ascii_only = true

[session]
timeout_secs = 120

[trace]
max_lines = 10
max_line_chars = 80
"#,
        )
        .unwrap();

        let config = CodonConfig::load_from(&path).unwrap().unwrap();
        assert!(config.app.unwrap().ascii_only);
        assert_eq!(config.session.unwrap().timeout_secs, Some(120));
        let trace = config.trace.unwrap();
        assert_eq!(trace.max_lines, Some(10));
        assert_eq!(trace.max_line_chars, Some(80));
    }

    #[test]
    fn load_partial_config_leaves_rest_none() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("config.toml");
        std::fs::write(&path, "[session]\ntimeout_secs = 60\n").unwrap();

        let config = CodonConfig::load_from(&path).unwrap().unwrap();
        assert!(config.app.is_none());
        assert!(config.trace.is_none());
        assert_eq!(config.session.unwrap().timeout_secs, Some(60));
    }

    #[test]
    fn load_bad_toml_is_parse_error() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("config.toml");
        std::fs::write(&path, "invalid toml [").unwrap();

        let err = CodonConfig::load_from(&path).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
        assert_eq!(err.path(), path.as_path());
    }

    #[test]
    fn log_dir_expands_env_vars() {
        unsafe {
            std::env::set_var("CODON_LOG_BASE", "/var/tmp");
        }
        let config: CodonConfig =
            toml::from_str("[app]\nlog_dir = \"${CODON_LOG_BASE}/codon\"\n").unwrap();
        assert_eq!(config.log_dir(), Some(PathBuf::from("/var/tmp/codon")));
        unsafe {
            std::env::remove_var("CODON_LOG_BASE");
        }
    }

    // persist tests

    #[test]
    fn persist_timeout_creates_new_config() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("config.toml");

        CodonConfig::persist_timeout_at(&path, 300).unwrap();

        let result = std::fs::read_to_string(&path).unwrap();
        assert!(result.contains("[session]"));
        assert!(result.contains("timeout_secs = 300"));
    }

    #[test]
    fn persist_timeout_preserves_other_settings() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("config.toml");

        let original = r#"# My config
[app]
ascii_only = true

[session]
timeout_secs = 600
"#;
        std::fs::write(&path, original).unwrap();

        CodonConfig::persist_timeout_at(&path, 120).unwrap();

        let result = std::fs::read_to_string(&path).unwrap();
        assert!(
            result.contains("# My config"),
            "Comment should be preserved"
        );
        assert!(
            result.contains("timeout_secs = 120"),
            "Timeout should be updated"
        );
        assert!(
            result.contains("ascii_only = true"),
            "Other settings should be preserved"
        );
    }

    #[test]
    fn persist_timeout_round_trips_through_load() {
        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("config.toml");

        CodonConfig::persist_timeout_at(&path, 45).unwrap();

        let config = CodonConfig::load_from(&path).unwrap().unwrap();
        assert_eq!(config.session.unwrap().timeout_secs, Some(45));
    }

    #[cfg(unix)]
    #[test]
    fn persist_timeout_replaces_the_file_instead_of_rewriting_it() {
        use std::os::unix::fs::MetadataExt;

        let tmp_dir = tempfile::tempdir().unwrap();
        let path = tmp_dir.path().join("config.toml");
        std::fs::write(&path, "# keep me\n").unwrap();
        let inode_before = std::fs::metadata(&path).unwrap().ino();

        CodonConfig::persist_timeout_at(&path, 90).unwrap();

        let inode_after = std::fs::metadata(&path).unwrap().ino();
        assert_ne!(
            inode_before, inode_after,
            "expected a rename, not an in-place write"
        );
        assert!(std::fs::read_to_string(&path).unwrap().contains("# keep me"));

        let entries = std::fs::read_dir(tmp_dir.path()).unwrap().count();
        assert_eq!(entries, 1, "no temp file should remain");
    }
}
