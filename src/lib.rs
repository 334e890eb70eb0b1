pub mod aggregator;
pub mod bridge;
pub mod categorizer;
pub mod commands;
pub mod constants;
pub mod date_key;
pub mod db;
pub mod error;
pub mod focus;
pub mod models;
pub mod platform;
pub mod report;
pub mod tracker;
pub mod validation;

#[cfg(test)]
mod test_utils;

use crate::error::AppError;
use directories::ProjectDirs;
use std::path::PathBuf;

/// Environment variable overriding the database location.
pub const DB_PATH_ENV: &str = "WELLDESK_DB_PATH";

/// Resolve the database file, creating its parent directory if needed.
pub fn get_db_path() -> Result<PathBuf, AppError> {
    let path = match std::env::var_os(DB_PATH_ENV) {
        Some(path) if !path.is_empty() => PathBuf::from(path),
        _ => {
            let proj_dirs =
                ProjectDirs::from("com", "welldesk", "WellDesk").ok_or(AppError::NoProjectDirs)?;
            proj_dirs.data_dir().join("welldesk.db")
        }
    };

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    Ok(path)
}
