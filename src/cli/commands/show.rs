//! `show` command
//!
//! Loads one configuration and prints it back in normalized form: null
//! sections dropped, single font names expanded to lists, key order kept.

use crate::cli::args::{DocumentFormat, ShowArgs};
use crate::config::{ConfigLoader, LoaderOptions};
use crate::error::StyleCfgError;

/// Print a loaded configuration.
///
/// # Errors
///
/// Returns an error if the configuration cannot be found, fails to load,
/// or cannot be serialized.
pub fn run(args: &ShowArgs) -> Result<(), StyleCfgError> {
    let loader = ConfigLoader::new(LoaderOptions {
        base_dir: args.dir.clone(),
        ..LoaderOptions::default()
    });

    let path = match &args.file {
        Some(path) => path.clone(),
        None => loader.locate()?,
    };
    tracing::info!(file = %path.display(), "loading configuration");

    let result = loader.load_from_path(&path)?;
    super::log_warnings(&result.warnings);

    let rendered = match args.format {
        DocumentFormat::Yaml => result.config.to_yaml_string()?,
        DocumentFormat::Json => result.config.to_json_string()?,
    };
    print!("{rendered}");
    if !rendered.ends_with('\n') {
        println!();
    }
    Ok(())
}
