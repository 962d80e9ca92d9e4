//! Store and shell configuration.
//!
//! Values come from an optional TOML file; command-line flags override them.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::types::{
    TABLE_MAX_PAGES,
    error::{DatabaseError, Result},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Upper bound on pages per table.
    #[serde(default = "default_max_pages")]
    pub max_pages: usize,

    /// Where the shell keeps its line history. No history is kept when unset.
    #[serde(default)]
    pub history_file: Option<PathBuf>,

    #[serde(default = "default_prompt")]
    pub prompt: String,
}

fn default_max_pages() -> usize {
    TABLE_MAX_PAGES
}

fn default_prompt() -> String {
    "db > ".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            max_pages: default_max_pages(),
            history_file: None,
            prompt: default_prompt(),
        }
    }
}

impl StoreConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let config: Self = toml::from_str(content).map_err(|e| DatabaseError::Config {
            details: e.to_string(),
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn with_max_pages(mut self, max_pages: usize) -> Result<Self> {
        self.max_pages = max_pages;
        self.validate()?;
        Ok(self)
    }

    pub fn validate(&self) -> Result<()> {
        if self.max_pages == 0 {
            return Err(DatabaseError::Config {
                details: "max_pages must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}
