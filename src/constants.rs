//! Common constants used throughout kiln.

/// Supported project file names, tried in order.
pub const CONFIG_FILES: [&str; 3] = ["kiln.yaml", "kiln.yml", "kiln.json"];

/// Name of the root component holding project-wide options.
pub const ROOT_COMPONENT: &str = "kiln";

/// Options read from the recipe's own component.
pub mod options {
    /// Job list in the current syntax.
    pub const TEMPLATES: &str = "templates";
    /// Environment root for the current syntax.
    pub const ROOT: &str = "root";
    /// Legacy template list.
    pub const TEMPLATE_FILE: &str = "template-file";
    /// Legacy target list.
    pub const TARGET_FILE: &str = "target-file";
    /// Legacy executable flags.
    pub const TARGET_EXECUTABLE: &str = "target-executable";
    /// Environment root for the legacy syntax.
    pub const BASE_DIR: &str = "base-dir";
    /// Filter modules to install.
    pub const FILTERS: &str = "filters";
    /// Package references resolved into a working set.
    pub const EGGS: &str = "eggs";
    /// Project directory, on the root component.
    pub const DIRECTORY: &str = "directory";
    /// Components run by default, on the root component.
    pub const PARTS: &str = "parts";
}

/// Context variable giving access to every component's options.
pub const PARTS_VARIABLE: &str = "parts";

/// Context variable bound to the job list.
pub const JOBS_VARIABLE: &str = "jobs";

/// Permission bits applied to legacy jobs flagged as executable (rwxr-xr-x).
pub const EXECUTABLE_MODE: u32 = 0o755;
