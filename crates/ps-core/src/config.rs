//! Configuration types and parsing for planspeak.yml

use crate::error::{CoreError, CoreResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Main configuration from planspeak.yml
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding `<split>_spider_with_ep.json`
    #[serde(default = "default_dataset_dir")]
    pub dataset_dir: String,

    /// Output directory for rendered splits and diagrams
    #[serde(default = "default_output_dir")]
    pub output_dir: String,

    /// Diagram settings
    #[serde(default)]
    pub graph: GraphConfig,

    /// Concurrent plan workers for batch rendering (0 = one per CPU)
    #[serde(default)]
    pub workers: usize,
}

/// Graphviz layout direction
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum RankDir {
    /// Right to left (root on the left)
    #[default]
    RL,
    /// Left to right
    LR,
    /// Top to bottom
    TB,
    /// Bottom to top
    BT,
}

impl std::fmt::Display for RankDir {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            RankDir::RL => "RL",
            RankDir::LR => "LR",
            RankDir::TB => "TB",
            RankDir::BT => "BT",
        };
        f.write_str(s)
    }
}

/// Diagram configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct GraphConfig {
    /// Layout direction
    #[serde(default)]
    pub rankdir: RankDir,

    /// Font used for graph, node and edge labels
    #[serde(default = "default_font")]
    pub font: String,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            rankdir: RankDir::default(),
            font: default_font(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            dataset_dir: default_dataset_dir(),
            output_dir: default_output_dir(),
            graph: GraphConfig::default(),
            workers: 0,
        }
    }
}

fn default_dataset_dir() -> String {
    "dataset".to_string()
}

fn default_output_dir() -> String {
    "target".to_string()
}

fn default_font() -> String {
    "JetBrainsMono NF".to_string()
}

const CONFIG_FILE_NAMES: [&str; 2] = ["planspeak.yml", "planspeak.yaml"];

impl Config {
    /// Load configuration from a file path
    pub fn load(path: &Path) -> CoreResult<Self> {
        if !path.exists() {
            return Err(CoreError::ConfigNotFound {
                path: path.display().to_string(),
            });
        }

        let content = std::fs::read_to_string(path).map_err(|e| CoreError::IoWithPath {
            path: path.display().to_string(),
            source: e,
        })?;
        let config: Config = serde_yaml::from_str(&content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration from planspeak.yml or planspeak.yaml in a directory
    pub fn load_from_dir(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => Err(CoreError::ConfigNotFound {
                path: dir.join(CONFIG_FILE_NAMES[0]).display().to_string(),
            }),
        }
    }

    /// Like [`load_from_dir`](Self::load_from_dir), falling back to defaults
    /// when the directory has no config file
    pub fn discover(dir: &Path) -> CoreResult<Self> {
        match Self::find_in_dir(dir) {
            Some(path) => Self::load(&path),
            None => {
                log::debug!("No config file in {}, using defaults", dir.display());
                Ok(Self::default())
            }
        }
    }

    fn find_in_dir(dir: &Path) -> Option<PathBuf> {
        CONFIG_FILE_NAMES
            .iter()
            .map(|name| dir.join(name))
            .find(|path| path.exists())
    }

    /// Validate configuration values
    pub fn validate(&self) -> CoreResult<()> {
        if self.dataset_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "dataset_dir must not be empty".to_string(),
            });
        }
        if self.output_dir.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "output_dir must not be empty".to_string(),
            });
        }
        if self.graph.font.trim().is_empty() {
            return Err(CoreError::ConfigInvalid {
                message: "graph.font must not be empty".to_string(),
            });
        }
        Ok(())
    }

    /// Dataset directory resolved against `root`
    pub fn dataset_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.dataset_dir)
    }

    /// Output directory resolved against `root`
    pub fn output_dir_absolute(&self, root: &Path) -> PathBuf {
        root.join(&self.output_dir)
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
