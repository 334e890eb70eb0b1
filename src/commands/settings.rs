use crate::db::with_connection;
use crate::error::AppError;
use crate::models::Settings;
use crate::validation::validate_focus_minutes;

use super::{AppState, SettingsResponse};

pub fn get_settings(state: &AppState) -> Result<SettingsResponse, AppError> {
    let settings = with_connection(&state.db, Settings::load)?;
    Ok(SettingsResponse::from(settings))
}

pub fn update_settings(state: &AppState, focus_duration_minutes: i32) -> Result<SettingsResponse, AppError> {
    let settings = Settings {
        focus_duration_minutes: validate_focus_minutes(focus_duration_minutes)?,
    };
    with_connection(&state.db, |conn| settings.save(conn))?;
    Ok(SettingsResponse::from(settings))
}
