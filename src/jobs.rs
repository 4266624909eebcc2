//! Render jobs and the option syntaxes that describe them.
//!
//! Two syntaxes coexist. The current one is a single `templates` option:
//!
//! ```text
//! templates =
//!     site.conf.j2 etc/site.conf
//!     "run script.j2" bin/run mode=755
//! ```
//!
//! The legacy one spreads the same information over three positional lists:
//! `template-file`, `target-file` and `target-executable`.

use std::path::{Component, Path, PathBuf};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, LazyLock};

use log::debug;
use minijinja::value::{Enumerator, Object, ObjectRepr};
use minijinja::Value;
use regex::Regex;
use serde::{Serialize, Serializer};

use crate::constants::{options, EXECUTABLE_MODE, JOBS_VARIABLE, PARTS_VARIABLE};
use crate::error::{Error, Result};
use crate::filters::{as_bool, split};
use crate::host::Options;

/// `<template> <target> [mode=<digits>]`, paths optionally quoted.
static JOB_ENTRY: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"("[^"]*"|'[^']*'|\S+)\s+("[^"]*"|'[^']*'|\S+)(?:\s+mode=(\d+))?"#)
        .expect("job entry pattern is valid")
});

/// One template-to-target rendering instruction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderJob {
    pub template: String,
    pub target: String,
    #[serde(serialize_with = "serialize_mode")]
    pub mode: Option<u32>,
}

impl RenderJob {
    pub fn new(template: impl Into<String>, target: impl Into<String>, mode: Option<u32>) -> Self {
        Self {
            template: template.into(),
            target: target.into(),
            mode,
        }
    }

    /// Mode as a 4-digit octal string, e.g. `0755`.
    pub fn mode_string(&self) -> Option<String> {
        self.mode.map(|mode| format!("{mode:04o}"))
    }
}

impl std::fmt::Display for RenderJob {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {}", self.template, self.target)?;
        if let Some(mode) = self.mode_string() {
            write!(f, ", mode={mode}")?;
        }
        Ok(())
    }
}

fn serialize_mode<S: Serializer>(
    mode: &Option<u32>,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    match mode {
        Some(mode) => serializer.serialize_str(&format!("{mode:04o}")),
        None => serializer.serialize_none(),
    }
}

/// Removes one pair of surrounding double or single quotes.
pub fn strip_quotes(s: &str) -> &str {
    for quote in ['"', '\''] {
        if let Some(inner) = s.strip_prefix(quote).and_then(|rest| rest.strip_suffix(quote)) {
            return inner;
        }
    }
    s
}

/// Reads decimal-looking digits as octal permission bits.
pub fn parse_mode(digits: &str) -> Result<u32> {
    u32::from_str_radix(digits, 8).map_err(|_| {
        Error::ConfigError(format!("invalid file mode '{digits}', expected octal digits"))
    })
}

/// Common contract of the option syntaxes.
pub trait JobParser {
    /// Produces the jobs in configuration order.
    fn parse(&self) -> Result<Vec<RenderJob>>;
}

/// The `templates` option.
#[derive(Debug, Clone)]
pub struct CurrentSyntaxJobs {
    spec: String,
}

impl CurrentSyntaxJobs {
    pub fn new(spec: impl Into<String>) -> Self {
        Self { spec: spec.into() }
    }
}

impl JobParser for CurrentSyntaxJobs {
    /// Extracts every entry left to right. Text that does not form a complete
    /// entry is skipped.
    fn parse(&self) -> Result<Vec<RenderJob>> {
        JOB_ENTRY
            .captures_iter(&self.spec)
            .map(|caps| {
                let mode = caps.get(3).map(|m| parse_mode(m.as_str())).transpose()?;
                Ok(RenderJob::new(strip_quotes(&caps[1]), strip_quotes(&caps[2]), mode))
            })
            .collect()
    }
}

/// The `template-file` / `target-file` / `target-executable` options.
#[derive(Debug, Clone)]
pub struct LegacyJobs {
    templates: Vec<String>,
    targets: Vec<String>,
    executables: Vec<String>,
}

impl LegacyJobs {
    pub fn new(templates: Vec<String>, targets: Vec<String>, executables: Vec<String>) -> Self {
        Self {
            templates,
            targets,
            executables,
        }
    }
}

impl JobParser for LegacyJobs {
    fn parse(&self) -> Result<Vec<RenderJob>> {
        if self.templates.len() != self.targets.len() {
            return Err(Error::ConfigError(format!(
                "the number of template files ({}) and target files ({}) must match",
                self.templates.len(),
                self.targets.len()
            )));
        }

        let flags: Vec<&str> = match self.executables.len() {
            0 => vec!["false"; self.templates.len()],
            1 => vec![self.executables[0].as_str(); self.templates.len()],
            n if n == self.templates.len() => self.executables.iter().map(String::as_str).collect(),
            n => {
                return Err(Error::ConfigError(format!(
                    "expected 0, 1 or {} target-executable values, got {n}",
                    self.templates.len()
                )))
            }
        };

        Ok(self
            .templates
            .iter()
            .zip(&self.targets)
            .zip(flags)
            .map(|((template, target), flag)| {
                let mode = as_bool(flag).then_some(EXECUTABLE_MODE);
                RenderJob::new(strip_quotes(template), strip_quotes(target), mode)
            })
            .collect())
    }
}

/// How a job's target is placed relative to the environment root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TargetResolution {
    /// Relative targets are joined to the root, absolute ones kept.
    JoinRelative,
    /// Every target lands below the root, absolute ones included.
    AlwaysJoin,
}

impl TargetResolution {
    pub fn resolve(self, root: &Path, target: &str) -> PathBuf {
        let target = Path::new(target);
        match self {
            TargetResolution::JoinRelative => root.join(target),
            TargetResolution::AlwaysJoin => root.join(
                target
                    .components()
                    .filter(|c| !matches!(c, Component::Prefix(_) | Component::RootDir))
                    .collect::<PathBuf>(),
            ),
        }
    }
}

/// The option syntax a component uses, chosen once from the keys present.
#[derive(Debug, Clone)]
pub enum JobSyntax {
    Current(CurrentSyntaxJobs),
    Legacy(LegacyJobs),
}

impl JobSyntax {
    /// Picks the syntax, or `None` when no templates are configured.
    ///
    /// # Errors
    /// * `Error::ConfigError` if the legacy syntax misses `target-file`
    pub fn from_options(opts: &Options) -> Result<Option<Self>> {
        if let Some(spec) = opts.get(options::TEMPLATES) {
            return Ok(Some(JobSyntax::Current(CurrentSyntaxJobs::new(spec.as_str()))));
        }

        let Some(templates) = opts.get(options::TEMPLATE_FILE) else {
            return Ok(None);
        };
        let targets = opts.get(options::TARGET_FILE).ok_or_else(|| {
            Error::ConfigError(format!(
                "missing required option '{}' next to '{}'",
                options::TARGET_FILE,
                options::TEMPLATE_FILE
            ))
        })?;
        let executables = opts
            .get(options::TARGET_EXECUTABLE)
            .map(|s| split(s))
            .unwrap_or_default();

        Ok(Some(JobSyntax::Legacy(LegacyJobs::new(
            split(templates),
            split(targets),
            executables,
        ))))
    }

    /// Option naming the environment root.
    pub fn root_option(&self) -> &'static str {
        match self {
            JobSyntax::Current(_) => options::ROOT,
            JobSyntax::Legacy(_) => options::BASE_DIR,
        }
    }

    /// Context variables the configuration must not define.
    pub fn reserved_names(&self) -> &'static [&'static str] {
        match self {
            JobSyntax::Current(_) => &[PARTS_VARIABLE, JOBS_VARIABLE],
            JobSyntax::Legacy(_) => &[PARTS_VARIABLE],
        }
    }

    pub fn target_resolution(&self) -> TargetResolution {
        match self {
            JobSyntax::Current(_) => TargetResolution::JoinRelative,
            JobSyntax::Legacy(_) => TargetResolution::AlwaysJoin,
        }
    }
}

impl JobParser for JobSyntax {
    fn parse(&self) -> Result<Vec<RenderJob>> {
        let jobs = match self {
            JobSyntax::Current(parser) => parser.parse()?,
            JobSyntax::Legacy(parser) => parser.parse()?,
        };
        debug!("Parsed {} job(s)", jobs.len());
        Ok(jobs)
    }
}

const NO_CURRENT: usize = usize::MAX;

/// The ordered jobs of one pass plus the cursor on the job being rendered.
///
/// Templates see it as `jobs`: a sequence with an extra `current` attribute.
/// The render loop is the only writer of the cursor.
#[derive(Debug)]
pub struct JobList {
    jobs: Vec<RenderJob>,
    current: AtomicUsize,
}

impl JobList {
    pub fn new(jobs: Vec<RenderJob>) -> Self {
        Self {
            jobs,
            current: AtomicUsize::new(NO_CURRENT),
        }
    }

    pub fn jobs(&self) -> &[RenderJob] {
        &self.jobs
    }

    pub fn is_empty(&self) -> bool {
        self.jobs.is_empty()
    }

    /// Moves the cursor; `None` or an index past the end clears it.
    pub fn set_current(&self, index: Option<usize>) {
        let index = index.filter(|i| *i < self.jobs.len());
        self.current.store(index.unwrap_or(NO_CURRENT), Ordering::SeqCst);
    }

    pub fn current(&self) -> Option<&RenderJob> {
        self.jobs.get(self.current.load(Ordering::SeqCst))
    }
}

impl Object for JobList {
    fn repr(self: &Arc<Self>) -> ObjectRepr {
        ObjectRepr::Seq
    }

    fn get_value(self: &Arc<Self>, key: &Value) -> Option<Value> {
        if key.as_str() == Some("current") {
            return Some(
                self.current()
                    .map(Value::from_serialize)
                    .unwrap_or(Value::from(())),
            );
        }
        self.jobs.get(key.as_usize()?).map(Value::from_serialize)
    }

    fn enumerate(self: &Arc<Self>) -> Enumerator {
        Enumerator::Seq(self.jobs.len())
    }
}
