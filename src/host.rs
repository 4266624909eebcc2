//! Interfaces to the orchestrator that invokes a recipe.
//!
//! A recipe never reaches into global state: component options, package
//! resolution, created-path bookkeeping and user-facing messages all come in
//! through the traits below.

use std::fmt;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::error::Result;
use crate::resolver::WorkingSet;

/// Option map of one component, in configuration order.
pub type Options = IndexMap<String, String>;

/// Read access to every configured component.
pub trait ComponentRegistry: fmt::Debug + Send + Sync {
    /// Working directory of the project, absolute.
    fn directory(&self) -> &Path;

    /// Names of all components, the root component included.
    fn component_names(&self) -> Vec<String>;

    /// Trimmed options of `component`, or `None` if it is not configured.
    fn options(&self, component: &str) -> Option<Options>;
}

/// Turns package references into a working set for templates.
pub trait DependencyResolver {
    fn resolve(&self, requirements: &[String]) -> Result<WorkingSet>;
}

/// Receives every directory and file a recipe creates.
pub trait Bookkeeping {
    fn created(&mut self, path: &Path);
}

/// User-facing progress and warnings.
pub trait Reporter {
    fn info(&self, message: &str);
    fn warn(&self, message: &str);
}

/// Forwards messages to the `log` facade.
#[derive(Debug, Default, Clone, Copy)]
pub struct LogReporter;

impl Reporter for LogReporter {
    fn info(&self, message: &str) {
        log::info!("{message}");
    }

    fn warn(&self, message: &str) {
        log::warn!("{message}");
    }
}

/// Collects created paths in creation order.
#[derive(Debug, Default, Clone)]
pub struct CreatedPaths {
    paths: Vec<PathBuf>,
}

impl CreatedPaths {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paths(&self) -> &[PathBuf] {
        &self.paths
    }

    pub fn into_paths(self) -> Vec<PathBuf> {
        self.paths
    }
}

impl Bookkeeping for CreatedPaths {
    fn created(&mut self, path: &Path) {
        self.paths.push(path.to_path_buf());
    }
}
