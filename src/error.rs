//! Error handling for kiln.
//! Defines the error taxonomy shared by job parsing, context building and rendering.

use thiserror::Error;

/// Errors that abort a kiln pass.
///
/// Every variant is fatal for the whole invocation: files already written in the
/// same pass are left in place.
#[derive(Error, Debug)]
pub enum Error {
    /// Malformed or contradictory configuration: mismatched list lengths,
    /// reserved variable names, missing required options, bad modes.
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// The requested template does not resolve under the environment root.
    #[error("Template file not found: '{name}'")]
    TemplateNotFound { name: String },

    /// The template engine failed to parse or render a template.
    #[error("Render error: {0}")]
    RenderError(#[from] minijinja::Error),

    /// Directory creation, file write or permission change failed.
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for Results with kiln's [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// # Arguments
/// * `err` - The Error to handle
pub fn default_error_handler(err: Error) {
    eprintln!("{err}");
    std::process::exit(1);
}
