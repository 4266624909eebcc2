//! kiln renders templates into files for a build orchestrator.
//! A component's options describe the jobs (template, target, optional mode),
//! and become the variables the templates are rendered with.

/// Command-line interface module for the kiln binary
pub mod cli;

/// Project file loading (kiln.yaml, kiln.yml, kiln.json)
pub mod config;

/// Common constants: file names, option names, reserved variables
pub mod constants;

/// Template context assembly
pub mod context;

/// Error types and handling
pub mod error;

/// Built-in filters and host-supplied filter modules
pub mod filters;

/// Traits for the orchestrator's collaborators
pub mod host;

/// Job parsing for the current and legacy option syntaxes
pub mod jobs;

/// Per-job rendering, directory creation and permission bits
pub mod processor;

/// The recipe controller driving a full pass
pub mod recipe;

/// Template loading and rendering with MiniJinja
pub mod renderer;

/// Package references resolved into a working set
pub mod resolver;
