//! kiln's application entry point.
//! Loads the project file and runs the recipe of every requested component.

use std::sync::Arc;

use kiln::{
    cli::{get_args, Args},
    config::{find_config, Project},
    constants::CONFIG_FILES,
    error::{default_error_handler, Error, Result},
    recipe::Recipe,
};

/// Main application entry point.
fn main() {
    let args = get_args();

    // Logger configuration
    env_logger::Builder::new()
        .filter_level(if args.verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Info
        })
        .init();

    if let Err(err) = run(args) {
        default_error_handler(err);
    }
}

/// Main application logic execution.
///
/// # Flow
/// 1. Locates and loads the project file
/// 2. Selects the components to run
/// 3. Installs (or updates) each component, printing created paths
fn run(args: Args) -> Result<()> {
    let config_path = match args.config {
        Some(path) => path,
        None => find_config(std::env::current_dir()?, &CONFIG_FILES)?,
    };
    let project = Arc::new(Project::load(&config_path)?);

    let parts = if args.parts.is_empty() { project.default_parts() } else { args.parts };
    if parts.is_empty() {
        return Err(Error::ConfigError(
            "no components to run, pass them as arguments or list them in 'kiln.parts'".to_string(),
        ));
    }

    for part in parts {
        let recipe = Recipe::new(project.clone(), &part)?;
        let created = if args.update { recipe.update()? } else { recipe.install()? };
        for path in created {
            println!("{}: '{}'", recipe.name(), path.display());
        }
    }

    Ok(())
}
