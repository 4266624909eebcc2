//! Template filters available to every kiln template.
//!
//! Built-ins are `split`, `as_bool` (also a test) and the legacy `type`.
//! Hosts can contribute extra filters through a [`FilterRegistry`]; the
//! `filters` option selects which registered modules a recipe installs.

use std::collections::BTreeMap;
use std::fmt;
use std::sync::Arc;

use indexmap::IndexMap;
use log::debug;
use minijinja::{Environment, Value};

use crate::error::{Error, Result};

/// A filter taking the piped string and producing any template value.
pub type FilterFn = Arc<dyn Fn(&str) -> Value + Send + Sync>;

/// Splits a string on runs of whitespace.
///
/// Usage: {{ hosts | split }}
pub fn split(s: &str) -> Vec<String> {
    s.split_whitespace().map(str::to_string).collect()
}

/// Translates a configuration string into a boolean.
///
/// Usage: {% if debug | as_bool %} or {% if debug is as_bool %}
pub fn as_bool(s: &str) -> bool {
    matches!(s.trim().to_lowercase().as_str(), "yes" | "true" | "1" | "on")
}

/// Returns the kind of a value (`string`, `number`, `sequence`, ...).
///
/// Kept for templates written against the legacy options syntax.
pub fn type_of(value: Value) -> String {
    value.kind().to_string()
}

/// A named group of filters contributed by the host.
#[derive(Clone, Default)]
pub struct FilterModule {
    filters: IndexMap<String, FilterFn>,
}

impl FilterModule {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a filter to the module, replacing one with the same name.
    pub fn with_filter<F>(mut self, name: impl Into<String>, filter: F) -> Self
    where
        F: Fn(&str) -> Value + Send + Sync + 'static,
    {
        self.filters.insert(name.into(), Arc::new(filter));
        self
    }
}

impl fmt::Debug for FilterModule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FilterModule").field("filters", &self.filters.keys()).finish()
    }
}

/// Filter modules known to the host, by module name.
#[derive(Clone, Debug, Default)]
pub struct FilterRegistry {
    modules: IndexMap<String, FilterModule>,
}

impl FilterRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a module under `name`.
    pub fn register(mut self, name: impl Into<String>, module: FilterModule) -> Self {
        self.modules.insert(name.into(), module);
        self
    }

    /// Builds the filter set for the given module names.
    ///
    /// # Errors
    /// * `Error::ConfigError` if a module name is not registered
    pub fn select<S: AsRef<str>>(&self, names: &[S]) -> Result<FilterSet> {
        let mut set = FilterSet::defaults();
        for name in names {
            let name = name.as_ref();
            let module = self.modules.get(name).ok_or_else(|| {
                Error::ConfigError(format!("unknown filter module '{name}'"))
            })?;
            debug!("Loading filters from {name}");
            for (filter, func) in &module.filters {
                set.filters.insert(filter.clone(), Arc::clone(func));
            }
        }
        Ok(set)
    }
}

/// String filters installed into a template environment.
#[derive(Clone)]
pub struct FilterSet {
    filters: BTreeMap<String, FilterFn>,
}

impl FilterSet {
    /// The built-in string filters.
    pub fn defaults() -> Self {
        let mut filters: BTreeMap<String, FilterFn> = BTreeMap::new();
        filters.insert("split".to_string(), Arc::new(|s: &str| Value::from(split(s))));
        filters.insert("as_bool".to_string(), Arc::new(|s: &str| Value::from(as_bool(s))));
        Self { filters }
    }

    /// Registers the legacy `type` filter, the `as_bool` test and every filter of the set.
    pub fn install(&self, env: &mut Environment<'static>) {
        env.add_filter("type", type_of);
        env.add_test("as_bool", |s: String| as_bool(&s));
        for (name, func) in &self.filters {
            let func = Arc::clone(func);
            env.add_filter(name.clone(), move |s: String| func(&s));
        }
    }
}

impl fmt::Debug for FilterSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.filters.keys()).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_whitespace_runs() {
        assert!(split("").is_empty());
        assert!(split("   ").is_empty());
        assert_eq!(split("a  b\tc"), vec!["a", "b", "c"]);
        assert_eq!(split("\n one\n two \n"), vec!["one", "two"]);
    }

    #[test]
    fn test_as_bool() {
        for truthy in ["yes", "TRUE", " 1 ", "On"] {
            assert!(as_bool(truthy), "{truthy}");
        }
        for falsy in ["", "no", "false", "0", "off", "y", "truthy"] {
            assert!(!as_bool(falsy), "{falsy}");
        }
    }

    #[test]
    fn test_unknown_module() {
        let err = FilterRegistry::new().select(&["missing"]).unwrap_err();
        assert!(matches!(err, Error::ConfigError(msg) if msg.contains("missing")));
    }

    #[test]
    fn test_module_overrides_builtin() {
        let registry = FilterRegistry::new().register(
            "shout",
            FilterModule::new()
                .with_filter("upper", |s: &str| Value::from(s.to_uppercase()))
                .with_filter("split", |s: &str| Value::from(s.len())),
        );
        let set = registry.select(&["shout"]).unwrap();
        assert_eq!(format!("{set:?}"), r#"["as_bool", "split", "upper"]"#);
        assert_eq!((set.filters["split"])("abc"), Value::from(3));
    }
}
