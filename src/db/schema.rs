pub const SCHEMA: &str = r"
CREATE TABLE IF NOT EXISTS daily_totals (
    date TEXT PRIMARY KEY,
    total_secs INTEGER NOT NULL DEFAULT 0
);

CREATE TABLE IF NOT EXISTS app_usage (
    date TEXT NOT NULL,
    app_name TEXT NOT NULL,
    duration_secs INTEGER NOT NULL DEFAULT 0,
    category TEXT NOT NULL DEFAULT 'Neutral'
        CHECK (category IN ('Productive', 'Neutral', 'Distraction')),
    PRIMARY KEY (date, app_name)
);

CREATE TABLE IF NOT EXISTS window_usage (
    date TEXT NOT NULL,
    app_name TEXT NOT NULL,
    window_title TEXT NOT NULL,
    duration_secs INTEGER NOT NULL DEFAULT 0,
    PRIMARY KEY (date, app_name, window_title)
);

CREATE TABLE IF NOT EXISTS category_rules (
    app_name TEXT PRIMARY KEY,
    category TEXT NOT NULL
        CHECK (category IN ('Productive', 'Neutral', 'Distraction')),
    updated_at INTEGER NOT NULL
);

CREATE TABLE IF NOT EXISTS settings (
    key TEXT PRIMARY KEY,
    value TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS idx_app_usage_app ON app_usage(app_name, date);
";

/// Settings rows seeded on first run.
pub const DEFAULT_SETTINGS: &[(&str, &str)] = &[("focus_duration_minutes", "25")];
