use lectern_engine::{
    ReconstructOptions, RenderOptions, TagDefinition, TagRegistry, UnderscorePolicy,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file at {config_path}: {source}")]
    ConfigReadError {
        config_path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to parse config file at {config_path}: {source}")]
    ConfigParseError {
        config_path: PathBuf,
        source: toml::de::Error,
    },
}

/// Reader-facing presentation settings, stored under `[reader]` in the
/// config file. Every field has a default so a minimal config stays minimal.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReaderConfig {
    pub show_line_numbers: bool,
    pub show_footnotes: bool,
    pub underscore_policy: UnderscorePolicy,
    pub verse_ceiling: usize,
}

impl Default for ReaderConfig {
    fn default() -> Self {
        let render = RenderOptions::default();
        Self {
            show_line_numbers: render.show_line_numbers,
            show_footnotes: render.show_footnotes,
            underscore_policy: render.underscore_policy,
            verse_ceiling: ReconstructOptions::default().verse_ceiling,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    pub content_path: PathBuf,
    pub outline_path: PathBuf,
    /// Restrict the chapter list to one book; absent means all books.
    #[serde(default)]
    pub book: Option<String>,
    #[serde(default)]
    pub reader: ReaderConfig,
    /// Custom markup tags, as `[[tags]]` tables in the config file.
    #[serde(default)]
    pub tags: Vec<TagDefinition>,
}

impl Config {
    pub fn load_from_path<P: AsRef<Path>>(config_path: P) -> Result<Option<Self>, ConfigError> {
        let config_path = config_path.as_ref();
        if !config_path.exists() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(config_path).map_err(|source| {
            ConfigError::ConfigReadError {
                config_path: config_path.to_path_buf(),
                source,
            }
        })?;

        let mut config: Config =
            toml::from_str(&content).map_err(|source| ConfigError::ConfigParseError {
                config_path: config_path.to_path_buf(),
                source,
            })?;

        // Expand shell variables and tilde in the loaded paths
        config.content_path =
            Self::expand_path(&config.content_path).unwrap_or(config.content_path);
        config.outline_path =
            Self::expand_path(&config.outline_path).unwrap_or(config.outline_path);

        Ok(Some(config))
    }

    pub fn load() -> Result<Option<Self>, ConfigError> {
        let config_path = Self::config_path();
        Self::load_from_path(&config_path)
    }

    pub fn save_to_path<P: AsRef<Path>>(&self, config_path: P) -> anyhow::Result<()> {
        let config_path = config_path.as_ref();
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(config_path, content)?;
        Ok(())
    }

    pub fn save(&self) -> anyhow::Result<()> {
        let config_path = Self::config_path();
        self.save_to_path(&config_path)
    }

    pub fn config_path() -> PathBuf {
        let config_dir = shellexpand::tilde("~/.config/lectern");
        PathBuf::from(config_dir.as_ref()).join("config.toml")
    }

    pub fn registry(&self) -> TagRegistry {
        TagRegistry::new(self.tags.clone())
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions {
            show_line_numbers: self.reader.show_line_numbers,
            show_footnotes: self.reader.show_footnotes,
            underscore_policy: self.reader.underscore_policy,
        }
    }

    pub fn reconstruct_options(&self) -> ReconstructOptions {
        ReconstructOptions {
            verse_ceiling: self.reader.verse_ceiling,
        }
    }

    fn expand_path(path: &Path) -> Option<PathBuf> {
        let path_str = path.to_string_lossy();
        match shellexpand::full(&path_str) {
            Ok(expanded) => Some(PathBuf::from(expanded.as_ref())),
            Err(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use tempfile::TempDir;

    fn test_config() -> Config {
        Config {
            content_path: PathBuf::from("/tmp/kjv.txt"),
            outline_path: PathBuf::from("/tmp/kjv-outline.json"),
            book: None,
            reader: ReaderConfig::default(),
            tags: Vec::new(),
        }
    }

    #[test]
    fn test_config_path() {
        let config_path = Config::config_path();
        let path_str = config_path.to_string_lossy();

        // Should not contain tilde anymore
        assert!(!path_str.starts_with('~'));
        assert!(path_str.ends_with(".config/lectern/config.toml"));
    }

    #[test]
    fn test_config_serialization_roundtrip() {
        let original = test_config();

        let toml_str = toml::to_string(&original).unwrap();
        let deserialized: Config = toml::from_str(&toml_str).unwrap();

        assert_eq!(original, deserialized);
    }

    #[test]
    fn test_minimal_config_uses_reader_defaults() {
        let config_content = r#"
content_path = "/data/kjv.txt"
outline_path = "/data/kjv-outline.json"
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.book, None);
        assert!(!config.reader.show_line_numbers);
        assert!(config.reader.show_footnotes);
        assert_eq!(config.reader.underscore_policy, UnderscorePolicy::Keep);
        assert_eq!(config.reader.verse_ceiling, 200);
        assert!(config.tags.is_empty());
    }

    #[test]
    fn test_tags_tables_build_a_registry() {
        let config_content = r#"
content_path = "/data/kjv.txt"
outline_path = "/data/kjv-outline.json"

[[tags]]
name = "divine-name"
open_delimiter = "<DN>"
close_delimiter = "</DN>"
style_class = "divine-name"

[[tags]]
name = "selah"
open_delimiter = "<SL>"
ignored = true
"#;

        let config: Config = toml::from_str(config_content).unwrap();
        let registry = config.registry();

        assert_eq!(config.tags.len(), 2);
        assert!(registry.find("divine-name").is_some());
        assert!(registry.find("selah").is_some_and(|t| t.ignored));
    }

    #[test]
    fn test_underscore_policy_lowercase_in_toml() {
        let config_content = r#"
content_path = "/data/kjv.txt"
outline_path = "/data/kjv-outline.json"

[reader]
underscore_policy = "bold"
show_line_numbers = true
"#;

        let config: Config = toml::from_str(config_content).unwrap();

        assert_eq!(config.reader.underscore_policy, UnderscorePolicy::Bold);
        let options = config.render_options();
        assert!(options.show_line_numbers);
        assert_eq!(options.underscore_policy, UnderscorePolicy::Bold);
    }

    #[test]
    fn test_expand_path_with_tilde() {
        let path = PathBuf::from("~/test/path");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert!(!expanded.to_string_lossy().starts_with('~'));
        assert!(expanded.to_string_lossy().contains("test/path"));
    }

    #[test]
    fn test_expand_path_with_env_var() {
        unsafe {
            env::set_var("TEST_VAR", "/test/env/path");
        }

        let path = PathBuf::from("$TEST_VAR/subdir");
        let expanded = Config::expand_path(&path);

        assert!(expanded.is_some());
        let expanded = expanded.unwrap();
        assert_eq!(expanded, PathBuf::from("/test/env/path/subdir"));

        unsafe {
            env::remove_var("TEST_VAR");
        }
    }

    #[test]
    fn test_expand_path_with_absolute_path() {
        let path = PathBuf::from("/absolute/path");
        let expanded = Config::expand_path(&path).unwrap();

        assert_eq!(expanded, path);
    }

    #[test]
    fn test_load_config_file_not_found() {
        let temp_dir = TempDir::new().unwrap();
        let non_existent_config = temp_dir.path().join("nonexistent.toml");

        let result = Config::load_from_path(&non_existent_config).unwrap();

        assert!(result.is_none());
    }

    #[test]
    fn test_save_and_load_config() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        let test_config = test_config();

        test_config.save_to_path(&config_file).unwrap();

        let loaded_config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(loaded_config, test_config);
    }

    #[test]
    fn test_config_with_tilde_in_toml() {
        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            r#"
content_path = "~/bibles/kjv.txt"
outline_path = "~/bibles/kjv-outline.json"
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        let expanded = config.content_path.to_string_lossy();
        assert!(!expanded.starts_with('~'));
        assert!(expanded.contains("bibles/kjv.txt"));
    }

    #[test]
    fn test_config_with_env_var_in_toml() {
        unsafe {
            env::set_var("BIBLE_ROOT", "/custom/bibles");
        }

        let temp_dir = TempDir::new().unwrap();
        let config_file = temp_dir.path().join("config.toml");
        std::fs::write(
            &config_file,
            r#"
content_path = "$BIBLE_ROOT/kjv.txt"
outline_path = "$BIBLE_ROOT/kjv-outline.json"
"#,
        )
        .unwrap();

        let config = Config::load_from_path(&config_file).unwrap().unwrap();

        assert_eq!(config.content_path, PathBuf::from("/custom/bibles/kjv.txt"));
        assert_eq!(
            config.outline_path,
            PathBuf::from("/custom/bibles/kjv-outline.json")
        );

        unsafe {
            env::remove_var("BIBLE_ROOT");
        }
    }
}
