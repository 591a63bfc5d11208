//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

/// Application directory name under the platform config dir
const APP_DIR: &str = "session-chat";

/// Project-level config file names, checked in order
const PROJECT_FILES: [&str; 2] = ["session-chat.toml", ".session-chat.toml"];

/// Prefix for environment overrides, e.g. `SESSION_CHAT_BACKEND__BASE_URL`
const ENV_PREFIX: &str = "SESSION_CHAT_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Environment: `SESSION_CHAT_<SECTION>__<KEY>`
    /// 2. Explicit config path (if provided)
    /// 3. Project root: `./session-chat.toml` or `./.session-chat.toml`
    /// 4. Global: `$XDG_CONFIG_HOME/session-chat/config.toml`
    /// 5. Default values
    pub fn load(config_path: Option<&Path>) -> Result<FileConfig, Box<figment::Error>> {
        let mut figment = Figment::new().merge(Serialized::defaults(FileConfig::default()));

        if let Some(global_path) = Self::global_config_path()
            && global_path.exists()
        {
            figment = figment.merge(Toml::file(&global_path));
        }

        if let Some(project_path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(&project_path));
        }

        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        figment.extract().map_err(Box::new)
    }

    /// Load defaults merged with a single file, ignoring every other source
    pub fn load_file(path: &Path) -> Result<FileConfig, Box<figment::Error>> {
        Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Toml::file(path))
            .extract()
            .map_err(Box::new)
    }

    /// Pick the sources for a `--config` / `--no-config` combination.
    ///
    /// `--no-config` skips discovered files and the environment; an explicit
    /// path is still read on its own.
    pub fn resolve(
        config_path: Option<&Path>,
        no_config: bool,
    ) -> Result<FileConfig, Box<figment::Error>> {
        match (no_config, config_path) {
            (true, Some(path)) => Self::load_file(path),
            (true, None) => Ok(Self::load_defaults()),
            (false, path) => Self::load(path),
        }
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns `XDG_CONFIG_HOME/session-chat/config.toml` if set,
    /// otherwise the platform config dir equivalent.
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join(APP_DIR).join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Describe the config file locations being used
    pub fn describe_sources(config_path: Option<&Path>, no_config: bool) -> Vec<String> {
        let mut lines = vec!["Configuration sources (in priority order):".to_string()];

        if no_config {
            lines.push(format!("  [SKIP ] Environment: {}*", ENV_PREFIX));
        } else {
            lines.push(format!("  [ENV  ] Environment: {}*", ENV_PREFIX));
        }

        if let Some(path) = config_path {
            let marker = if path.exists() { "FOUND" } else { "MISS " };
            lines.push(format!("  [{}] Explicit: {}", marker, path.display()));
        }

        if no_config {
            lines.push("  [SKIP ] Project and global files (--no-config)".to_string());
        } else {
            match Self::project_config_path() {
                Some(path) => lines.push(format!("  [FOUND] Project: {}", path.display())),
                None => lines.push(format!(
                    "  [     ] Project: ./{} or ./{}",
                    PROJECT_FILES[0], PROJECT_FILES[1]
                )),
            }

            if let Some(path) = Self::global_config_path() {
                let marker = if path.exists() { "FOUND" } else { "     " };
                lines.push(format!("  [{}] Global:  {}", marker, path.display()));
            }
        }

        lines.push("  [     ] Default: built-in defaults".to_string());
        lines
    }

    /// Render a configuration as TOML, with the API key masked
    pub fn render(config: &FileConfig) -> String {
        let mut shown = config.clone();
        if shown.backend.api_key.is_some() {
            shown.backend.api_key = Some("********".to_string());
        }
        toml::to_string_pretty(&shown).unwrap_or_default()
    }
}
