//! Layered configuration loading

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Project-level config file names, checked in the working directory.
const PROJECT_FILES: [&str; 2] = ["coach.toml", ".coach.toml"];

/// Discovers and merges configuration sources.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Merge all configuration sources, later sources winning:
    /// built-in defaults, then `~/.config/debate-coach/config.toml`, then a
    /// `coach.toml` / `.coach.toml` in the working directory, then the
    /// `--config` path when one was given.
    pub fn load(explicit: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global) = Self::global_path() {
            if global.exists() {
                figment = figment.merge(Toml::file(&global));
            }
        }
        if let Some(project) = Self::project_path() {
            figment = figment.merge(Toml::file(project));
        }
        if let Some(path) = explicit {
            figment = figment.merge(Toml::file(path));
        }

        figment.extract().map_err(Box::new)
    }

    /// Built-in defaults only, skipping every file source (`--no-config`).
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Location of the per-user config file, when a config dir exists.
    pub fn global_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("debate-coach").join("config.toml"))
    }

    /// First project-level config file that exists in the working directory.
    pub fn project_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(Path::new)
            .find(|p| p.exists())
            .map(Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use coach_domain::Mode;
    use std::io::Write;

    #[test]
    fn test_explicit_path_overrides_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "[backend]\nbase_url = \"https://coach.example.org/api\"\n\n[chat]\ndefault_mode = \"pitch_objections\""
        )
        .unwrap();

        let path = file.path().to_path_buf();
        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.backend.base_url, "https://coach.example.org/api");
        assert_eq!(config.default_mode(), Mode::PitchObjections);
        // Untouched keys keep their defaults
        assert_eq!(config.backend.timeout_secs, 30);
    }

    #[test]
    fn test_partial_file_merges_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[backend]\ntimeout_secs = 5").unwrap();

        let path = file.path().to_path_buf();
        let config = ConfigLoader::load(Some(&path)).unwrap();
        assert_eq!(config.backend.timeout_secs, 5);
        assert_eq!(config.backend.base_url, "http://localhost:8000/api");
    }

    #[test]
    fn test_defaults_pass_validation() {
        assert!(ConfigLoader::load_defaults().validate().is_empty());
    }
}
