//! Template renderer for kiln.
//! Loads templates by name from the environment root and renders them
//! with MiniJinja.

use std::path::Path;

use log::debug;
use minijinja::{path_loader, Environment, ErrorKind, UndefinedBehavior, Value};

use crate::error::{Error, Result};
use crate::filters::FilterSet;

/// Trait for template rendering engines.
pub trait TemplateRenderer {
    /// Checks that `name` resolves to a loadable template.
    ///
    /// # Errors
    /// * `Error::TemplateNotFound` if no such template exists under the root
    /// * `Error::RenderError` if the template does not parse
    fn resolve(&self, name: &str) -> Result<()>;

    /// Renders the template `name` with the given context.
    fn render(&self, name: &str, context: &Value) -> Result<String>;
}

/// MiniJinja-based renderer reading templates from a directory.
pub struct MiniJinjaRenderer {
    env: Environment<'static>,
}

impl MiniJinjaRenderer {
    /// Creates a renderer loading templates below `root`, with `filters` installed.
    pub fn new<P: AsRef<Path>>(root: P, filters: &FilterSet) -> Self {
        let root = root.as_ref();
        let mut env = Environment::new();
        // Undefined values may be tested in `if`, printing them fails.
        env.set_undefined_behavior(UndefinedBehavior::SemiStrict);
        env.set_loader(path_loader(root.to_path_buf()));
        filters.install(&mut env);
        debug!("Template environment rooted at {}", root.display());
        Self { env }
    }

    /// Maps a lookup failure of the job template `name`.
    ///
    /// Only a missing job template becomes `Error::TemplateNotFound`. A missing
    /// `{% include %}` target fails later, inside `render`, and stays an
    /// `Error::RenderError` whose kind is `ErrorKind::TemplateNotFound`.
    fn template_error(name: &str, err: minijinja::Error) -> Error {
        if err.kind() == ErrorKind::TemplateNotFound {
            Error::TemplateNotFound {
                name: name.to_string(),
            }
        } else {
            Error::RenderError(err)
        }
    }
}

impl TemplateRenderer for MiniJinjaRenderer {
    fn resolve(&self, name: &str) -> Result<()> {
        self.env
            .get_template(name)
            .map(|_| ())
            .map_err(|e| Self::template_error(name, e))
    }

    fn render(&self, name: &str, context: &Value) -> Result<String> {
        let template = self
            .env
            .get_template(name)
            .map_err(|e| Self::template_error(name, e))?;
        template.render(context).map_err(Error::RenderError)
    }
}
