//! Template context assembly.
//!
//! The context holds every option of the recipe's component (values trimmed)
//! plus three reserved entries:
//!
//! * `parts` - lazy lookup of other components' options (`parts.db.port`)
//! * `jobs` - the job list with its `current` cursor
//! * `eggs` - the resolved working set, when the `eggs` option is set

use std::collections::BTreeMap;
use std::sync::Arc;

use log::debug;
use minijinja::value::{DynObject, Enumerator, Object, ObjectRepr};
use minijinja::Value;

use crate::constants::{options, JOBS_VARIABLE, PARTS_VARIABLE};
use crate::error::{Error, Result};
use crate::filters::split;
use crate::host::{ComponentRegistry, DependencyResolver, Options, Reporter};
use crate::jobs::JobList;

/// `parts` inside templates: component name, then option key.
#[derive(Debug)]
pub struct PartsObject {
    registry: Arc<dyn ComponentRegistry>,
}

impl PartsObject {
    pub fn new(registry: Arc<dyn ComponentRegistry>) -> Self {
        Self { registry }
    }
}

impl Object for PartsObject {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Map
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        let options = self.registry.options(key.as_str()?)?;
        Some(Value::from_serialize(&options))
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Values(
            self.registry
                .component_names()
                .into_iter()
                .map(Value::from)
                .collect(),
        )
    }
}

/// Variables a template is rendered with.
#[derive(Debug)]
pub struct Context {
    variables: BTreeMap<String, Value>,
    jobs: Arc<JobList>,
}

impl Context {
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.variables.get(name)
    }

    /// The job list shared with the templates.
    pub fn jobs(&self) -> &Arc<JobList> {
        &self.jobs
    }

    pub fn to_value(&self) -> Value {
        Value::from(self.variables.clone())
    }
}

/// Builds a [`Context`] from a component's options.
pub struct ContextBuilder<'a> {
    options: &'a Options,
    reserved: &'a [&'a str],
    registry: Arc<dyn ComponentRegistry>,
    jobs: Arc<JobList>,
}

impl<'a> ContextBuilder<'a> {
    /// # Arguments
    /// * `options` - The component's raw options
    /// * `reserved` - Variable names the options must not define
    /// * `registry` - Source of the `parts` lookups
    /// * `jobs` - Job list bound to `jobs`
    pub fn new(
        options: &'a Options,
        reserved: &'a [&'a str],
        registry: Arc<dyn ComponentRegistry>,
        jobs: Arc<JobList>,
    ) -> Self {
        Self {
            options,
            reserved,
            registry,
            jobs,
        }
    }

    /// Assembles the context.
    ///
    /// # Errors
    /// * `Error::ConfigError` if an option uses a reserved name or the
    ///   package references cannot be resolved
    pub fn build(
        self,
        resolver: &dyn DependencyResolver,
        reporter: &dyn Reporter,
    ) -> Result<Context> {
        let mut variables: BTreeMap<String, Value> = self
            .options
            .iter()
            .map(|(key, value)| (key.clone(), Value::from(value.trim())))
            .collect();

        let reserved = self
            .reserved
            .iter()
            .find(|name| variables.contains_key(**name));
        if let Some(name) = reserved {
            return Err(Error::ConfigError(format!(
                "'{name}' cannot be used as an option name, it is reserved for the template context"
            )));
        }
        if variables.contains_key(JOBS_VARIABLE) {
            reporter.warn("The 'jobs' option is shadowed by the job list in templates");
        }

        variables.insert(
            PARTS_VARIABLE.to_string(),
            Value::from_object(PartsObject::new(Arc::clone(&self.registry))),
        );
        variables.insert(
            JOBS_VARIABLE.to_string(),
            Value::from_dyn_object(DynObject::new(Arc::clone(&self.jobs))),
        );

        if let Some(eggs) = self.options.get(options::EGGS) {
            reporter.info("Making working set out of the eggs");
            let working_set = resolver.resolve(&split(eggs)).map_err(|err| match err {
                Error::ConfigError(_) => err,
                other => Error::ConfigError(format!("cannot resolve eggs: {other}")),
            })?;
            debug!("Resolved {} package(s)", working_set.distributions().len());
            variables.insert(options::EGGS.to_string(), Value::from_serialize(&working_set));
        }

        Ok(Context {
            variables,
            jobs: self.jobs,
        })
    }
}
