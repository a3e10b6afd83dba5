//! Configuration management with layered hierarchy

use serde::Deserialize;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::Project;

/// Quire configuration with layered hierarchy
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Editor command for `quire add` without `--content`
    pub editor: Option<String>,

    /// Output format used when `--format auto` is in effect
    pub default_format: Option<String>,
}

impl Config {
    /// Load configuration from all sources, merging in priority order
    ///
    /// 1. Built-in defaults
    /// 2. Global user config (`<config dir>/quire/config.yaml`)
    /// 3. Project config (`.quire/config.yaml`)
    /// 4. Environment (`QUIRE_EDITOR`)
    pub fn load(project: Option<&Project>) -> Self {
        let mut config = Config::default();

        if let Some(global_path) = Self::global_config_path() {
            if let Some(global) = Self::read_file(&global_path) {
                config.merge(global);
            }
        }

        if let Some(project) = project {
            if let Some(local) = Self::read_file(&project.quire_dir().join("config.yaml")) {
                config.merge(local);
            }
        }

        if let Ok(editor) = std::env::var("QUIRE_EDITOR") {
            config.editor = Some(editor);
        }

        config
    }

    /// Read one config layer; a missing file is silent, a broken one is logged and skipped
    fn read_file(path: &Path) -> Option<Config> {
        if !path.exists() {
            return None;
        }

        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "could not read config");
                return None;
            }
        };

        match serde_yml::from_str::<Option<Config>>(&contents) {
            Ok(parsed) => {
                debug!(path = %path.display(), "loaded config layer");
                // An empty or all-comment file deserializes to None
                Some(parsed.unwrap_or_default())
            }
            Err(e) => {
                warn!(path = %path.display(), error = %e, "ignoring invalid config");
                None
            }
        }
    }

    /// Get the path to the global config file
    fn global_config_path() -> Option<PathBuf> {
        directories::ProjectDirs::from("", "", "quire")
            .map(|dirs| dirs.config_dir().join("config.yaml"))
    }

    /// Merge another config into this one (other takes precedence)
    fn merge(&mut self, other: Config) {
        if other.editor.is_some() {
            self.editor = other.editor;
        }
        if other.default_format.is_some() {
            self.default_format = other.default_format;
        }
    }

    /// Get the editor command
    pub fn editor(&self) -> String {
        self.editor
            .clone()
            .or_else(|| std::env::var("EDITOR").ok())
            .or_else(|| std::env::var("VISUAL").ok())
            .unwrap_or_else(|| "vi".to_string())
    }

    /// Run the editor on a file, handling commands with arguments
    /// (e.g., "emacsclient -nw" or "code --wait")
    pub fn run_editor(&self, file_path: &Path) -> std::io::Result<std::process::ExitStatus> {
        let editor = self.editor();
        let mut parts = editor.split_whitespace();

        let Some(cmd) = parts.next() else {
            return std::process::Command::new("vi").arg(file_path).status();
        };

        std::process::Command::new(cmd)
            .args(parts)
            .arg(file_path)
            .status()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_merge_prefers_later_layer() {
        let mut base = Config {
            editor: Some("nano".to_string()),
            default_format: Some("yaml".to_string()),
        };
        base.merge(Config {
            editor: Some("hx".to_string()),
            default_format: None,
        });

        assert_eq!(base.editor.as_deref(), Some("hx"));
        assert_eq!(base.default_format.as_deref(), Some("yaml"));
    }

    #[test]
    fn test_explicit_editor_wins() {
        let config = Config {
            editor: Some("code --wait".to_string()),
            ..Config::default()
        };
        assert_eq!(config.editor(), "code --wait");
    }

    #[test]
    fn test_read_file_parses_yaml() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "editor: nano\ndefault_format: json\n").unwrap();

        let config = Config::read_file(&path).unwrap();
        assert_eq!(config.editor.as_deref(), Some("nano"));
        assert_eq!(config.default_format.as_deref(), Some("json"));
    }

    #[test]
    fn test_read_file_accepts_comment_only_file() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "# nothing set yet\n").unwrap();

        let config = Config::read_file(&path).unwrap();
        assert!(config.editor.is_none());
    }

    #[test]
    fn test_read_file_skips_invalid_and_missing() {
        let tmp = tempdir().unwrap();
        let path = tmp.path().join("config.yaml");
        std::fs::write(&path, "editor: [unclosed").unwrap();

        assert!(Config::read_file(&path).is_none());
        assert!(Config::read_file(&tmp.path().join("absent.yaml")).is_none());
    }

    #[test]
    fn test_load_reads_project_layer() {
        let tmp = tempdir().unwrap();
        let project = Project::init(tmp.path()).unwrap();
        std::fs::write(
            project.quire_dir().join("config.yaml"),
            "default_format: yaml\n",
        )
        .unwrap();

        let config = Config::load(Some(&project));
        assert_eq!(config.default_format.as_deref(), Some("yaml"));
    }
}
