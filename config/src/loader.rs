use crate::{BshConfig, ConfigError};
use regex::Regex;
use std::path::PathBuf;

pub struct ConfigLoader {
    explicit_file: Option<PathBuf>,
    search_paths: Vec<PathBuf>,
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}

impl ConfigLoader {
    pub fn new() -> Self {
        let mut search_paths = Vec::new();

        if let Some(home) = dirs::home_dir() {
            search_paths.push(home.join(".config/bsh/bsh.yaml"));
        }
        search_paths.push(PathBuf::from("./bsh.yaml"));

        #[cfg(unix)]
        search_paths.insert(0, PathBuf::from("/etc/bsh/bsh.yaml"));

        Self {
            explicit_file: None,
            search_paths,
        }
    }

    pub fn with_file(mut self, path: &str) -> Self {
        self.explicit_file = Some(PathBuf::from(path));
        self
    }

    /// Replaces the default search locations. Mostly useful in tests.
    pub fn with_search_paths(mut self, paths: Vec<PathBuf>) -> Self {
        self.search_paths = paths;
        self
    }

    pub fn load(&self) -> Result<BshConfig, ConfigError> {
        let mut config = if let Some(ref explicit) = self.explicit_file {
            self.read_file(explicit)?
        } else if let Ok(env_path) = std::env::var("BSH_CONFIG") {
            self.read_file(&PathBuf::from(env_path))?
        } else {
            self.merge_search_paths()?
        };

        self.apply_env_overrides(&mut config);
        validate(&config)?;
        Ok(config)
    }

    fn merge_search_paths(&self) -> Result<BshConfig, ConfigError> {
        let mut config = BshConfig::default();
        for path in &self.search_paths {
            if path.exists() {
                if let Ok(content) = std::fs::read_to_string(path) {
                    tracing::debug!(path = %path.display(), "merging config file");
                    config = self.merge_yaml(&config, &content)?;
                }
            }
        }
        Ok(config)
    }

    fn read_file(&self, path: &PathBuf) -> Result<BshConfig, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|e| ConfigError::ReadFile {
            path: path.clone(),
            source: e,
        })?;
        self.parse_yaml(&content)
    }

    fn parse_yaml(&self, content: &str) -> Result<BshConfig, ConfigError> {
        let expanded = self.expand_env_vars(content);
        Ok(serde_yaml::from_str(&expanded)?)
    }

    fn merge_yaml(&self, base: &BshConfig, content: &str) -> Result<BshConfig, ConfigError> {
        let overlay = self.parse_yaml(content)?;
        Ok(self.merge_configs(base, &overlay))
    }

    /// Sections that differ from the compiled defaults in `overlay` replace
    /// the matching section of `base`.
    fn merge_configs(&self, base: &BshConfig, overlay: &BshConfig) -> BshConfig {
        let defaults = BshConfig::default();
        let mut result = base.clone();

        if overlay.corpus != defaults.corpus {
            result.corpus = overlay.corpus.clone();
        }
        if overlay.shell.prompt != defaults.shell.prompt {
            result.shell.prompt = overlay.shell.prompt.clone();
        }
        if overlay.shell.color != defaults.shell.color {
            result.shell.color = overlay.shell.color;
        }
        if overlay.shell.bookmarks_file != defaults.shell.bookmarks_file {
            result.shell.bookmarks_file = overlay.shell.bookmarks_file.clone();
        }
        if overlay.shell.history != defaults.shell.history {
            result.shell.history = overlay.shell.history.clone();
        }
        if overlay.logging != defaults.logging {
            result.logging = overlay.logging.clone();
        }

        result
    }

    fn expand_env_vars(&self, content: &str) -> String {
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();
        re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_default()
        })
        .to_string()
    }

    fn apply_env_overrides(&self, config: &mut BshConfig) {
        if let Ok(path) = std::env::var("BSH_CORPUS") {
            if !path.is_empty() {
                config.corpus.path = Some(path);
            }
        }
        if let Ok(path) = std::env::var("BSH_BOOKMARKS") {
            if !path.is_empty() {
                config.shell.bookmarks_file = path;
            }
        }
        if let Ok(level) = std::env::var("BSH_LOG_LEVEL") {
            if let Ok(l) = serde_yaml::from_str(&level) {
                config.logging.level = l;
            }
        }
        if std::env::var_os("NO_COLOR").is_some_and(|v| !v.is_empty()) {
            config.shell.color = false;
        }
    }
}

fn validate(config: &BshConfig) -> Result<(), ConfigError> {
    if config
        .corpus
        .path
        .as_deref()
        .is_some_and(|p| p.trim().is_empty())
    {
        return Err(ConfigError::InvalidValue("corpus.path is empty".to_string()));
    }
    if config.shell.history.enabled && config.shell.history.max_entries == 0 {
        return Err(ConfigError::InvalidValue(
            "shell.history.max_entries must be positive".to_string(),
        ));
    }
    Ok(())
}
