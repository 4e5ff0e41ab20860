//! Init command: create the data file with the default fleet.

use std::path::Path;

use anyhow::{Context, Result};
use shed_store::StoreError;

/// Creates the data file if it does not exist. An existing readable file is
/// left untouched; an existing unreadable file is an error.
pub fn run(path: &Path) -> Result<()> {
    match shed_store::load(path) {
        Ok(_) => {
            println!("Data file already exists at {}", path.display());
            Ok(())
        }
        Err(StoreError::NotFound(_)) => {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .with_context(|| format!("failed to create {}", parent.display()))?;
            }
            shed_store::save(path, &shed_store::bootstrap())
                .context("failed to write data file")?;
            println!("Created {} with the default fleet", path.display());
            Ok(())
        }
        Err(err) => Err(err).context("existing data file could not be read"),
    }
}
