//! Global configuration for mdo

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use mdoutline::{AnchorStyle, TocOptions};

/// Global mdo configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    /// Where fold state is remembered between runs
    #[serde(default)]
    pub state_file: Option<PathBuf>,
    
    /// Log filter used when MDO_LOG is unset (e.g. "warn", "debug")
    #[serde(default)]
    pub log_level: Option<String>,
    
    /// Defaults for `mdo toc`
    #[serde(default)]
    pub toc: TocConfig,
}

/// Table-of-contents defaults
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TocConfig {
    /// Spaces per nesting level
    #[serde(default)]
    pub indent: Option<usize>,
    
    /// Deepest heading level to include
    #[serde(default)]
    pub max_level: Option<u8>,
    
    /// Link to slugified heading text instead of line ids
    #[serde(default)]
    pub slug: bool,
}

impl TocConfig {
    /// Resolve into render options
    pub fn options(&self) -> TocOptions {
        let defaults = TocOptions::default();
        TocOptions {
            indent: self.indent.unwrap_or(defaults.indent),
            max_level: self.max_level,
            anchor: if self.slug { AnchorStyle::Slug } else { AnchorStyle::Line },
        }
    }
}

impl Config {
    /// Load config from default location (~/.config/mdoutline/config.toml)
    pub fn load() -> Result<Self> {
        let config_path = Self::default_path();
        
        if !config_path.exists() {
            return Ok(Self::default());
        }
        
        Self::load_from(&config_path)
    }
    
    /// Load config from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        
        let config: Config = toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        
        Ok(config)
    }
    
    /// Get default config file path
    /// Checks ~/.config/mdoutline/config.toml first (XDG style),
    /// then falls back to OS-specific location
    pub fn default_path() -> PathBuf {
        if let Some(home) = dirs::home_dir() {
            let xdg_path = home.join(".config").join("mdoutline").join("config.toml");
            if xdg_path.exists() {
                return xdg_path;
            }
        }
        
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mdoutline")
            .join("config.toml")
    }
    
    /// Fold state file, from config or the OS data dir
    pub fn state_file(&self) -> PathBuf {
        if let Some(path) = &self.state_file {
            return path.clone();
        }
        
        dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("mdoutline")
            .join("folds.json")
    }
    
    /// Create default config file if it doesn't exist
    pub fn create_default(config_path: &Path) -> Result<PathBuf> {
        if config_path.exists() {
            return Ok(config_path.to_path_buf());
        }
        
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory: {}", parent.display()))?;
        }
        
        let default_config = r#"# mdoutline configuration

# Where collapsed headings are remembered (defaults to the OS data dir)
# state_file = "/path/to/folds.json"

# Log filter when MDO_LOG is unset
# log_level = "warn"

[toc]
# Spaces per nesting level
# indent = 2

# Deepest heading level to include
# max_level = 3

# Link to slugified heading text instead of #heading-<line>
# slug = false
"#;
        
        std::fs::write(config_path, default_config)
            .with_context(|| format!("Failed to write config: {}", config_path.display()))?;
        
        Ok(config_path.to_path_buf())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;
    
    #[test]
    fn test_load_config() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, r#"
state_file = "/tmp/folds.json"
log_level = "debug"

[toc]
indent = 4
max_level = 2
slug = true
"#).unwrap();
        
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.state_file(), PathBuf::from("/tmp/folds.json"));
        assert_eq!(config.log_level.as_deref(), Some("debug"));
        
        let options = config.toc.options();
        assert_eq!(options.indent, 4);
        assert_eq!(options.max_level, Some(2));
        assert_eq!(options.anchor, AnchorStyle::Slug);
    }
    
    #[test]
    fn test_empty_config_uses_defaults() {
        let config: Config = toml::from_str("").unwrap();
        assert_eq!(config.toc.options(), TocOptions::default());
        assert!(config.state_file().ends_with("folds.json"));
    }
    
    #[test]
    fn test_invalid_config_is_an_error() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[toc]\nindent = \"wide\"").unwrap();
        
        assert!(Config::load_from(&path).is_err());
    }
    
    #[test]
    fn test_default_template_parses() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");
        
        Config::create_default(&path).unwrap();
        let config = Config::load_from(&path).unwrap();
        assert_eq!(config.toc.options(), TocOptions::default());
    }
}
