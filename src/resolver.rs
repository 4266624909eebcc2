//! Package references resolved into a working set.
//!
//! [`PinnedResolver`] is the resolver used by the command-line host: it does
//! not consult any index, it validates each reference and records the version
//! an `==` requirement pins.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::{Error, Result};
use crate::host::DependencyResolver;

static REQUIREMENT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(concat!(
        r"^(?P<name>[A-Za-z0-9](?:[A-Za-z0-9._-]*[A-Za-z0-9])?)",
        r"(?:\[[^\]]*\])?",
        r"\s*(?:(?P<op>===|==|!=|~=|>=|<=|>|<)\s*(?P<version>[A-Za-z0-9.*+!_-]+))?$",
    ))
    .expect("requirement pattern is valid")
});

/// One resolved package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Distribution {
    pub name: String,
    pub version: Option<String>,
    pub requirement: String,
}

/// Resolved packages, in requirement order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct WorkingSet {
    distributions: Vec<Distribution>,
}

impl WorkingSet {
    pub fn new(distributions: Vec<Distribution>) -> Self {
        Self { distributions }
    }

    pub fn distributions(&self) -> &[Distribution] {
        &self.distributions
    }
}

/// Resolves references by their own pins.
#[derive(Debug, Default, Clone, Copy)]
pub struct PinnedResolver;

impl PinnedResolver {
    fn distribution(requirement: &str) -> Result<Distribution> {
        let caps = REQUIREMENT.captures(requirement).ok_or_else(|| {
            Error::ConfigError(format!("invalid package reference '{requirement}'"))
        })?;

        let pinned = matches!(caps.name("op").map(|m| m.as_str()), Some("==" | "==="));
        Ok(Distribution {
            name: caps["name"].to_string(),
            version: caps
                .name("version")
                .filter(|_| pinned)
                .map(|m| m.as_str().to_string()),
            requirement: requirement.to_string(),
        })
    }
}

impl DependencyResolver for PinnedResolver {
    fn resolve(&self, requirements: &[String]) -> Result<WorkingSet> {
        let distributions = requirements
            .iter()
            .map(|requirement| Self::distribution(requirement))
            .collect::<Result<Vec<_>>>()?;
        Ok(WorkingSet::new(distributions))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolve(requirements: &[&str]) -> Result<WorkingSet> {
        let requirements: Vec<String> = requirements.iter().map(|s| s.to_string()).collect();
        PinnedResolver.resolve(&requirements)
    }

    #[test]
    fn test_pinned_versions() {
        let set = resolve(&["Jinja2==3.1.4", "requests[socks]>=2", "six"]).unwrap();
        let names: Vec<_> = set.distributions().iter().map(|d| d.name.as_str()).collect();
        let versions: Vec<_> = set
            .distributions()
            .iter()
            .map(|d| d.version.as_deref())
            .collect();
        assert_eq!(names, vec!["Jinja2", "requests", "six"]);
        assert_eq!(versions, vec![Some("3.1.4"), None, None]);
    }

    #[test]
    fn test_invalid_reference() {
        let err = resolve(&["six", "==1.0"]).unwrap_err();
        assert!(matches!(err, Error::ConfigError(msg) if msg.contains("==1.0")));
    }
}
