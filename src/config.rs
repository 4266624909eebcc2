//! Project file handling for kiln.
//! Loads `kiln.yaml`, `kiln.yml` or `kiln.json` into a component registry.
//!
//! ```yaml
//! kiln:
//!   parts: site
//! site:
//!   templates: site.conf.j2 etc/site.conf
//!   name: World
//! ```

use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use log::debug;

use crate::constants::{options, CONFIG_FILES, ROOT_COMPONENT};
use crate::error::{Error, Result};
use crate::filters::split;
use crate::host::{ComponentRegistry, Options};

/// Finds the first project file present in `dir`.
///
/// # Errors
/// * `Error::ConfigError` if none of [`CONFIG_FILES`] exists
pub fn find_config<P: AsRef<Path>>(dir: P, config_files: &[&str]) -> Result<PathBuf> {
    for file in config_files {
        let config_path = dir.as_ref().join(file);
        if config_path.is_file() {
            debug!("Loading configuration from {}", config_path.display());
            return Ok(config_path);
        }
    }

    Err(Error::ConfigError(format!(
        "No configuration file found (tried: {})",
        config_files.join(", ")
    )))
}

/// Converts one option value to its string form.
///
/// Sequences of scalars become one entry per line, as multi-line options do.
fn option_value(component: &str, key: &str, value: serde_json::Value) -> Result<String> {
    match value {
        serde_json::Value::String(s) => Ok(s),
        serde_json::Value::Null => Ok(String::new()),
        serde_json::Value::Bool(b) => Ok(b.to_string()),
        serde_json::Value::Number(n) => Ok(n.to_string()),
        serde_json::Value::Array(items) => items
            .into_iter()
            .map(|item| match item {
                serde_json::Value::Array(_) | serde_json::Value::Object(_) => Err(
                    Error::ConfigError(format!("'{component}.{key}' may only list scalar values")),
                ),
                scalar => option_value(component, key, scalar),
            })
            .collect::<Result<Vec<_>>>()
            .map(|lines| lines.join("\n")),
        serde_json::Value::Object(_) => {
            Err(Error::ConfigError(format!("'{component}.{key}' must be a scalar or a list")))
        }
    }
}

/// A loaded project: its directory and every component's options.
#[derive(Debug, Clone)]
pub struct Project {
    directory: PathBuf,
    components: IndexMap<String, Options>,
}

impl Project {
    /// Parses project file content. JSON is tried first, then YAML.
    ///
    /// # Arguments
    /// * `content` - Raw file content
    /// * `base_dir` - Directory a relative `directory` option is joined to
    pub fn parse(content: &str, base_dir: &Path) -> Result<Self> {
        let raw: IndexMap<String, IndexMap<String, serde_json::Value>> =
            match serde_json::from_str(content) {
                Ok(v) => v,
                Err(_) => serde_yaml::from_str(content).map_err(|e| {
                    Error::ConfigError(format!("Invalid configuration format: {e}"))
                })?,
            };

        let mut components = IndexMap::new();
        for (component, values) in raw {
            let mut opts = Options::new();
            for (key, value) in values {
                let value = option_value(&component, &key, value)?;
                opts.insert(key, value);
            }
            components.insert(component, opts);
        }

        let root = components.entry(ROOT_COMPONENT.to_string()).or_default();
        let directory = match root.get(options::DIRECTORY).map(|d| d.trim()) {
            Some(dir) if !dir.is_empty() => base_dir.join(dir),
            _ => base_dir.to_path_buf(),
        };
        root.insert(options::DIRECTORY.to_string(), directory.display().to_string());

        Ok(Self {
            directory,
            components,
        })
    }

    /// Reads and parses a project file.
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let base_dir = std::path::absolute(path)?
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();
        Self::parse(&content, &base_dir)
    }

    /// Components listed in the root component's `parts` option.
    pub fn default_parts(&self) -> Vec<String> {
        self.components
            .get(ROOT_COMPONENT)
            .and_then(|root| root.get(options::PARTS))
            .map(|parts| split(parts))
            .unwrap_or_default()
    }
}

impl ComponentRegistry for Project {
    fn directory(&self) -> &Path {
        &self.directory
    }

    fn component_names(&self) -> Vec<String> {
        self.components.keys().cloned().collect()
    }

    fn options(&self, component: &str) -> Option<Options> {
        self.components.get(component).map(|opts| {
            opts.iter().map(|(key, value)| (key.clone(), value.trim().to_string())).collect()
        })
    }
}
