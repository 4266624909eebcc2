//! The recipe: parses a component's jobs, builds the template context and
//! renders every job in order.

use std::path::PathBuf;
use std::sync::Arc;

use log::debug;

use crate::constants::options;
use crate::context::ContextBuilder;
use crate::error::{Error, Result};
use crate::filters::{split, FilterRegistry};
use crate::host::{
    ComponentRegistry, CreatedPaths, DependencyResolver, LogReporter, Options, Reporter,
};
use crate::jobs::{JobList, JobParser, JobSyntax};
use crate::processor::Processor;
use crate::renderer::MiniJinjaRenderer;
use crate::resolver::PinnedResolver;

/// A configured component rendering templates into files.
pub struct Recipe {
    registry: Arc<dyn ComponentRegistry>,
    name: String,
    options: Options,
    filters: FilterRegistry,
    resolver: Box<dyn DependencyResolver>,
    reporter: Box<dyn Reporter>,
}

impl Recipe {
    /// Creates the recipe for component `name`.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the registry has no such component
    pub fn new(registry: Arc<dyn ComponentRegistry>, name: impl Into<String>) -> Result<Self> {
        let name = name.into();
        let options = registry
            .options(&name)
            .ok_or_else(|| Error::ConfigError(format!("no component named '{name}'")))?;

        Ok(Self {
            registry,
            name,
            options,
            filters: FilterRegistry::default(),
            resolver: Box::new(PinnedResolver),
            reporter: Box::new(LogReporter),
        })
    }

    /// Filter modules the `filters` option can select from.
    pub fn with_filters(mut self, filters: FilterRegistry) -> Self {
        self.filters = filters;
        self
    }

    pub fn with_resolver(mut self, resolver: impl DependencyResolver + 'static) -> Self {
        self.resolver = Box::new(resolver);
        self
    }

    pub fn with_reporter(mut self, reporter: impl Reporter + 'static) -> Self {
        self.reporter = Box::new(reporter);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Renders every job of the component.
    ///
    /// # Returns
    /// * `Result<Vec<PathBuf>>` - Created directories and files, in creation order
    ///
    /// # Errors
    /// * `Error::ConfigError` for bad job syntax, reserved names, unknown filter modules
    /// * `Error::TemplateNotFound` / `Error::RenderError` for template failures
    /// * `Error::IoError` if a directory, file or mode cannot be written
    pub fn install(&self) -> Result<Vec<PathBuf>> {
        let Some(syntax) = JobSyntax::from_options(&self.options)? else {
            self.reporter.warn("No templates specified");
            return Ok(Vec::new());
        };
        if matches!(syntax, JobSyntax::Current(_))
            && self.options.contains_key(options::TEMPLATE_FILE)
        {
            self.reporter.warn(&format!(
                "'{}' is set, ignoring the legacy '{}' options",
                options::TEMPLATES,
                options::TEMPLATE_FILE
            ));
        }

        let root = self.root(&syntax);
        let jobs = Arc::new(JobList::new(syntax.parse()?));
        if jobs.is_empty() {
            self.reporter.warn("No templates specified");
        }

        let filter_names = self.options.get(options::FILTERS).map(|f| split(f)).unwrap_or_default();
        let filters = self.filters.select(&filter_names)?;
        let renderer = MiniJinjaRenderer::new(&root, &filters);

        let context = ContextBuilder::new(
            &self.options,
            syntax.reserved_names(),
            Arc::clone(&self.registry),
            Arc::clone(&jobs),
        )
        .build(self.resolver.as_ref(), self.reporter.as_ref())?;

        let processor = Processor::new(&renderer, &root, syntax.target_resolution());
        let mut created = CreatedPaths::new();
        let result = jobs.jobs().iter().enumerate().try_for_each(|(index, job)| {
            jobs.set_current(Some(index));
            self.reporter.info(&job.to_string());
            processor.process(job, &context, &mut created).map(|_| ())
        });
        jobs.set_current(None);
        result?;

        debug!("Component '{}' created {} path(s)", self.name, created.paths().len());
        Ok(created.into_paths())
    }

    /// Same as [`Recipe::install`]: every target is rendered again.
    pub fn update(&self) -> Result<Vec<PathBuf>> {
        self.install()
    }

    /// Environment root: absolute, or relative to the project directory.
    fn root(&self, syntax: &JobSyntax) -> PathBuf {
        let root = self
            .options
            .get(syntax.root_option())
            .map(|r| r.trim())
            .filter(|r| !r.is_empty())
            .unwrap_or(".");
        let root = self.registry.directory().join(root);
        // Keep `./` out of reported paths.
        root.components().collect()
    }
}
