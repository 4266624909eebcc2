use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::debug;

use crate::context::Context;
use crate::error::Result;
use crate::host::Bookkeeping;
use crate::jobs::{RenderJob, TargetResolution};
use crate::renderer::TemplateRenderer;

/// Renders jobs into files below a root directory.
pub struct Processor<'a> {
    renderer: &'a dyn TemplateRenderer,
    root: &'a Path,
    resolution: TargetResolution,
}

impl<'a> Processor<'a> {
    pub fn new(
        renderer: &'a dyn TemplateRenderer,
        root: &'a Path,
        resolution: TargetResolution,
    ) -> Self {
        Self {
            renderer,
            root,
            resolution,
        }
    }

    /// Renders one job and writes its target.
    ///
    /// Steps run in order and the first failure aborts: template lookup,
    /// target resolution, parent directories, render, write, mode.
    /// Created directories and the target are reported to `bookkeeping`.
    ///
    /// # Returns
    /// * `Result<PathBuf>` - The written target path
    pub fn process(
        &self,
        job: &RenderJob,
        context: &Context,
        bookkeeping: &mut dyn Bookkeeping,
    ) -> Result<PathBuf> {
        self.renderer.resolve(&job.template)?;

        let target = self.resolution.resolve(self.root, &job.target);
        ensure_parent_dirs(&target, bookkeeping)?;

        let content = self.renderer.render(&job.template, &context.to_value())?;
        debug!("Writing file: {}", target.display());
        fs::write(&target, content)?;

        if let Some(mode) = job.mode {
            set_mode(&target, mode)?;
        }

        bookkeeping.created(&target);
        Ok(target)
    }
}

/// Creates the missing ancestors of `path`, outermost first, reporting each.
pub fn ensure_parent_dirs(path: &Path, bookkeeping: &mut dyn Bookkeeping) -> Result<()> {
    let missing: Vec<&Path> = path
        .ancestors()
        .skip(1)
        .take_while(|dir| !dir.as_os_str().is_empty() && !dir.is_dir())
        .collect();

    for dir in missing.into_iter().rev() {
        match fs::create_dir(dir) {
            Ok(()) => {
                debug!("Created directory: {}", dir.display());
                bookkeeping.created(dir);
            }
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && dir.is_dir() => {}
            Err(e) => return Err(e.into()),
        }
    }
    Ok(())
}

#[cfg(unix)]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(mode))?;
    Ok(())
}

#[cfg(not(unix))]
fn set_mode(path: &Path, mode: u32) -> Result<()> {
    log::warn!("Ignoring mode {mode:04o} for {}: not supported on this platform", path.display());
    Ok(())
}
