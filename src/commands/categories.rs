use crate::date_key::today_key;
use crate::db::with_connection;
use crate::error::AppError;
use crate::models::CategoryRule;
use crate::validation::{validate_app_name, validate_category};

use super::{AppState, CategoryRuleResponse};

/// Classify an application. Applies to live sampling immediately and
/// rewrites today's record for the app; earlier days are left as they were.
pub fn set_category(state: &AppState, app_name: &str, category: &str) -> Result<(), AppError> {
    let category = validate_category(category)?;
    let app_name = validate_app_name(app_name)?;

    let mut categorizer = state.categorizer.lock().map_err(|_| AppError::LockPoisoned)?;
    let mut db = state.db.lock().map_err(|_| AppError::LockPoisoned)?;
    categorizer.set_rule(db.connection_mut(), &app_name, category, &today_key())?;
    Ok(())
}

pub fn get_category_rules(state: &AppState) -> Result<Vec<CategoryRuleResponse>, AppError> {
    let rules = with_connection(&state.db, CategoryRule::find_all)?;
    Ok(rules.into_iter().map(CategoryRuleResponse::from).collect())
}
