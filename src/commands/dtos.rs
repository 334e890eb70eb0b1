use crate::focus::{AttentionSignal, FocusState};
use crate::models::{Category, CategoryRule, Settings};
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategoryRuleResponse {
    pub app_name: String,
    pub category: Category,
    pub updated_at: i64,
}

impl From<CategoryRule> for CategoryRuleResponse {
    fn from(rule: CategoryRule) -> Self {
        Self {
            app_name: rule.app_name,
            category: rule.category,
            updated_at: rule.updated_at,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FocusStateResponse {
    pub enabled: bool,
    pub last_signal: Option<AttentionSignal>,
}

impl From<FocusState> for FocusStateResponse {
    fn from(state: FocusState) -> Self {
        Self {
            enabled: state.enabled,
            last_signal: state.last_signal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SettingsResponse {
    pub focus_duration_minutes: i32,
}

impl From<Settings> for SettingsResponse {
    fn from(settings: Settings) -> Self {
        Self {
            focus_duration_minutes: settings.focus_duration_minutes,
        }
    }
}
