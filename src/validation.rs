use crate::constants::{
    KEY_SEPARATOR, MAX_APP_NAME_CHARS, MAX_FOCUS_MINUTES, MAX_WINDOW_TITLE_CHARS,
    UNKNOWN_LABEL,
};
use crate::error::AppError;
use crate::models::Category;

/// Parse a category coming from the presentation layer.
pub fn validate_category(category: &str) -> Result<Category, AppError> {
    category.parse()
}

/// Validate an application name supplied by the presentation layer.
///
/// The result is normalized the same way sampled names are, so a rule
/// keyed on it matches what the sampler records.
pub fn validate_app_name(name: &str) -> Result<String, AppError> {
    let name = replace_separator(name);
    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::InvalidInput {
            field: "app_name",
            reason: "cannot be empty".into(),
        });
    }
    if name.chars().count() > MAX_APP_NAME_CHARS {
        return Err(AppError::InvalidInput {
            field: "app_name",
            reason: format!("cannot exceed {MAX_APP_NAME_CHARS} characters"),
        });
    }
    Ok(name.to_string())
}

/// Validate the focus session length in minutes.
pub fn validate_focus_minutes(minutes: i32) -> Result<i32, AppError> {
    if minutes <= 0 {
        return Err(AppError::InvalidInput {
            field: "focus_duration_minutes",
            reason: "must be positive".into(),
        });
    }
    if minutes > MAX_FOCUS_MINUTES {
        return Err(AppError::InvalidInput {
            field: "focus_duration_minutes",
            reason: format!("cannot exceed {MAX_FOCUS_MINUTES} minutes"),
        });
    }
    Ok(minutes)
}

/// Normalize a sampled application name. Never fails.
///
/// App names are report keys too (e.g. `org.gnome.Nautilus` from `WM_CLASS`),
/// so the key separator is replaced here as well.
pub fn normalize_app_name(name: &str) -> String {
    let name = replace_separator(name);
    let name = name.trim();
    if name.is_empty() {
        return UNKNOWN_LABEL.to_string();
    }
    truncate_chars(name, MAX_APP_NAME_CHARS)
}

/// Make a sampled window title safe to use as a report key.
///
/// The key separator is replaced with a space; the exact title is lost
/// rather than the key space being corrupted.
pub fn sanitize_window_title(title: &str) -> String {
    let replaced = replace_separator(title);
    let replaced = replaced.trim();
    if replaced.is_empty() {
        return UNKNOWN_LABEL.to_string();
    }
    truncate_chars(replaced, MAX_WINDOW_TITLE_CHARS)
}

fn replace_separator(s: &str) -> String {
    s.chars()
        .map(|c| if c == KEY_SEPARATOR { ' ' } else { c })
        .collect()
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((byte_idx, _)) => s.get(..byte_idx).unwrap_or(s).to_string(),
        None => s.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_category_valid() {
        assert_eq!(validate_category("Productive").unwrap(), Category::Productive);
        assert_eq!(validate_category("Neutral").unwrap(), Category::Neutral);
    }

    #[test]
    fn test_validate_category_invalid() {
        let err = validate_category("Fun").unwrap_err();
        assert!(matches!(err, AppError::InvalidInput { field: "category", .. }));
    }

    #[test]
    fn test_validate_app_name() {
        assert_eq!(validate_app_name("  Editor ").unwrap(), "Editor");
        assert!(validate_app_name("   ").is_err());
        assert!(validate_app_name(&"x".repeat(MAX_APP_NAME_CHARS + 1)).is_err());
    }

    #[test]
    fn test_validate_focus_minutes() {
        assert_eq!(validate_focus_minutes(25).unwrap(), 25);
        assert!(validate_focus_minutes(0).is_err());
        assert!(validate_focus_minutes(-5).is_err());
        assert!(validate_focus_minutes(MAX_FOCUS_MINUTES + 1).is_err());
    }

    #[test]
    fn test_sanitize_replaces_separator() {
        assert_eq!(sanitize_window_title("main.rs - project"), "main rs - project");
        assert!(!sanitize_window_title("a.b.c").contains(KEY_SEPARATOR));
    }

    #[test]
    fn test_sanitize_empty_title_becomes_unknown() {
        assert_eq!(sanitize_window_title(""), UNKNOWN_LABEL);
        assert_eq!(sanitize_window_title(" ... "), UNKNOWN_LABEL);
    }

    #[test]
    fn test_sanitize_truncates_on_char_boundary() {
        let long = "é".repeat(MAX_WINDOW_TITLE_CHARS + 10);
        let sanitized = sanitize_window_title(&long);
        assert_eq!(sanitized.chars().count(), MAX_WINDOW_TITLE_CHARS);
    }

    #[test]
    fn test_normalize_app_name() {
        assert_eq!(normalize_app_name(" Firefox "), "Firefox");
        assert_eq!(normalize_app_name(""), UNKNOWN_LABEL);
        assert_eq!(normalize_app_name("org.gnome.Nautilus"), "org gnome Nautilus");
        assert_eq!(normalize_app_name(" . "), UNKNOWN_LABEL);
    }

    #[test]
    fn test_rule_names_match_sampled_names() {
        for raw in ["org.gnome.Nautilus", " Code ", "a.b."] {
            assert_eq!(validate_app_name(raw).unwrap(), normalize_app_name(raw));
        }
        assert!(validate_app_name(" ... ").is_err());
    }
}
