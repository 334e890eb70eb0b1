use crate::error::AppError;
use crate::models::usage::clear_all;
use crate::report::{build_report, Report};
use log::info;

use super::AppState;

pub fn get_report(state: &AppState) -> Result<Report, AppError> {
    let mut db = state.db.lock().map_err(|_| AppError::LockPoisoned)?;
    Ok(build_report(db.connection_mut())?)
}

/// Delete all usage history. Category rules and settings are kept.
pub fn clear_history(state: &AppState) -> Result<(), AppError> {
    let mut db = state.db.lock().map_err(|_| AppError::LockPoisoned)?;
    clear_all(db.connection_mut())?;
    info!("Usage history cleared");
    Ok(())
}
