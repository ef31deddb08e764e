mod config;
mod document;
mod store;

pub use config::Config;
pub use document::{UserData, MAX_RECENT_REWARDS};
pub use store::{JsonStore, MemoryStore, Store};

use std::path::PathBuf;

use crate::error::StoreError;

/// Returns the data directory.
///
/// `HABITPOOL_HOME` wins when set; otherwise `~/.config/habitpool[-dev]/`
/// based on `HABITPOOL_ENV`. Set `HABITPOOL_ENV=dev` to use the development
/// data directory.
///
/// # Errors
/// Returns an error if creating the directory fails.
pub fn data_dir() -> Result<PathBuf, StoreError> {
    let dir = match std::env::var_os("HABITPOOL_HOME") {
        Some(home) => PathBuf::from(home),
        None => {
            let base_dir = dirs::home_dir()
                .unwrap_or_else(|| PathBuf::from("."))
                .join(".config");
            let env = std::env::var("HABITPOOL_ENV").unwrap_or_else(|_| "production".to_string());
            if env == "dev" {
                base_dir.join("habitpool-dev")
            } else {
                base_dir.join("habitpool")
            }
        }
    };

    std::fs::create_dir_all(&dir)
        .map_err(|e| StoreError::DataDirUnavailable(format!("{}: {e}", dir.display())))?;
    Ok(dir)
}
