//! Runtime configuration resolution
//!
//! Layers, lowest first: built-in defaults, the `--config` TOML file, then
//! command-line arguments. The install root falls back to two levels above
//! the working directory.

use std::path::Path;

use mapfix_core::{ConfigFile, RuntimeConfig};
use mapfix_fs::InstallLayout;

use crate::cli::Cli;
use crate::error::Result;

/// Build the [`RuntimeConfig`] for this process.
pub fn resolve(cli: &Cli, cwd: &Path) -> Result<RuntimeConfig> {
    let mut file = match &cli.config {
        Some(path) => ConfigFile::load(path)?,
        None => ConfigFile::default(),
    };

    let layout = match cli.install_root.clone().or_else(|| file.install_root.take()) {
        Some(root) => InstallLayout::new(root),
        None => InstallLayout::from_working_dir(cwd)?,
    };

    // Outputs given on the command line replace the file's list
    if !cli.outputs.is_empty() {
        file.output_folders.clear();
    }

    let mut config = RuntimeConfig::new(layout, String::new());
    config.apply_file(file);

    if cli.verbose {
        config.verbose = true;
    }
    if let Some(folder) = &cli.log_folder {
        config.log_folder = folder.clone();
    }
    config.output_folders.extend(cli.outputs.iter().cloned());

    config.validate()?;
    Ok(config)
}
