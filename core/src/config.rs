use crate::error::{Result, UmbrellaError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::{fmt, fs, path::{Path, PathBuf}, str::FromStr};

pub const DEFAULT_LIBRARY: &str = "polywog";

/// Order in which sibling entries are visited during discovery.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TraversalOrder {
    /// Byte-lexicographic by file name; reproducible across platforms.
    #[default]
    Sorted,
    /// Whatever the filesystem enumerates. Matches legacy output.
    Filesystem,
}

impl fmt::Display for TraversalOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TraversalOrder::Sorted => write!(f, "sorted"),
            TraversalOrder::Filesystem => write!(f, "filesystem"),
        }
    }
}

impl FromStr for TraversalOrder {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "sorted" => Ok(TraversalOrder::Sorted),
            "filesystem" | "fs" => Ok(TraversalOrder::Filesystem),
            other => Err(format!(
                "unknown traversal order '{}', expected 'sorted' or 'filesystem'",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GeneratorConfig {
    pub library: String,
    pub extension: String,
    pub exclude_dirs: Vec<String>,
    pub order: TraversalOrder,
    pub atomic_write: bool,
    pub template: Option<PathBuf>,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            library: DEFAULT_LIBRARY.to_string(),
            extension: "h".to_string(),
            exclude_dirs: vec!["tests".to_string()],
            order: TraversalOrder::Sorted,
            atomic_write: true,
            template: None,
        }
    }
}

impl GeneratorConfig {
    pub fn for_library(library: impl Into<String>) -> Self {
        Self {
            library: library.into(),
            ..Default::default()
        }
    }

    /// Load a TOML config. Missing keys keep their defaults.
    pub fn from_file(path: &Path) -> Result<Self> {
        debug!("GeneratorConfig::from_file: reading {}", path.display());

        let content = fs::read_to_string(path).map_err(|e| UmbrellaError::Config {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;

        let mut config: GeneratorConfig =
            toml::from_str(&content).map_err(|e| UmbrellaError::Config {
                path: path.to_path_buf(),
                reason: e.to_string(),
            })?;

        // Relative template paths are relative to the config file.
        if let (Some(template), Some(parent)) = (config.template.as_mut(), path.parent()) {
            if template.is_relative() {
                *template = parent.join(&*template);
            }
        }

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let name = self.library.as_str();
        if name.is_empty()
            || name == "."
            || name == ".."
            || name.contains(['/', '\\'])
        {
            return Err(UmbrellaError::InvalidLibraryName(self.library.clone()));
        }

        if self.extension.is_empty() || self.extension.starts_with('.') {
            return Err(UmbrellaError::InvalidExtension(self.extension.clone()));
        }

        Ok(())
    }

    pub fn umbrella_file_name(&self) -> String {
        format!("{}.h", self.library)
    }

    pub fn include_guard(&self) -> String {
        let stem: String = self
            .library
            .chars()
            .map(|c| {
                if c.is_ascii_alphanumeric() {
                    c.to_ascii_uppercase()
                } else {
                    '_'
                }
            })
            .collect();
        format!("{}_LIBRARY_H", stem)
    }

    pub(crate) fn is_excluded_dir(&self, name: &str) -> bool {
        self.exclude_dirs.iter().any(|d| d == name)
    }

    pub(crate) fn header_suffix(&self) -> String {
        format!(".{}", self.extension)
    }
}
