use crate::constants::SECS_PER_SAMPLE;
use crate::models::Category;
use rusqlite::{params, Connection, OptionalExtension, Result};

/// Key of one accepted sample, already normalized and sanitized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SampleKey<'a> {
    pub date: &'a str,
    pub app_name: &'a str,
    /// `None` when window-title granularity is disabled.
    pub window_title: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyTotal {
    pub date: String,
    pub total_secs: i64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppRecord {
    pub date: String,
    pub app_name: String,
    pub duration_secs: i64,
    pub category: Category,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowTitleRecord {
    pub date: String,
    pub app_name: String,
    pub window_title: String,
    pub duration_secs: i64,
}

/// Every persisted usage fact, one vector per granularity, ordered by key.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UsageFacts {
    pub daily: Vec<DailyTotal>,
    pub apps: Vec<AppRecord>,
    pub windows: Vec<WindowTitleRecord>,
}

/// Apply one sample's increments at every granularity.
///
/// Each increment is a single atomic upsert, so callers never read-then-write.
/// Run it inside a transaction to make the sample visible all at once.
/// `rule` is the user's rule for the app, if any: it seeds new records and
/// overrides the stored category of existing ones. Returns the category now
/// stored for the app on that day.
pub fn upsert_sample(conn: &Connection, key: &SampleKey<'_>, rule: Option<Category>) -> Result<Category> {
    conn.execute(
        "INSERT INTO daily_totals (date, total_secs) VALUES (?1, ?2)
         ON CONFLICT(date) DO UPDATE SET total_secs = total_secs + excluded.total_secs",
        params![key.date, SECS_PER_SAMPLE],
    )?;

    let category: Category = conn.query_row(
        "INSERT INTO app_usage (date, app_name, duration_secs, category) VALUES (?1, ?2, ?3, ?4)
         ON CONFLICT(date, app_name) DO UPDATE SET
            duration_secs = duration_secs + excluded.duration_secs,
            category = COALESCE(?5, category)
         RETURNING category",
        params![
            key.date,
            key.app_name,
            SECS_PER_SAMPLE,
            rule.unwrap_or_default(),
            rule,
        ],
        |row| row.get(0),
    )?;

    if let Some(title) = key.window_title {
        conn.execute(
            "INSERT INTO window_usage (date, app_name, window_title, duration_secs) VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(date, app_name, window_title) DO UPDATE SET
                duration_secs = duration_secs + excluded.duration_secs",
            params![key.date, key.app_name, title, SECS_PER_SAMPLE],
        )?;
    }

    Ok(category)
}

pub fn find_app_category(conn: &Connection, date: &str, app_name: &str) -> Result<Option<Category>> {
    conn.query_row(
        "SELECT category FROM app_usage WHERE date = ?1 AND app_name = ?2",
        params![date, app_name],
        |row| row.get(0),
    )
    .optional()
}

/// Overwrite the stored category of one app on one day.
/// Returns true if a record existed.
pub fn set_app_category(conn: &Connection, date: &str, app_name: &str, category: Category) -> Result<bool> {
    let changed = conn.execute(
        "UPDATE app_usage SET category = ?1 WHERE date = ?2 AND app_name = ?3",
        params![category, date, app_name],
    )?;
    Ok(changed > 0)
}

pub fn read_all(conn: &Connection) -> Result<UsageFacts> {
    let daily = conn
        .prepare("SELECT date, total_secs FROM daily_totals ORDER BY date")?
        .query_map([], |row| {
            Ok(DailyTotal {
                date: row.get(0)?,
                total_secs: row.get(1)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    let apps = conn
        .prepare("SELECT date, app_name, duration_secs, category FROM app_usage ORDER BY date, app_name")?
        .query_map([], |row| {
            Ok(AppRecord {
                date: row.get(0)?,
                app_name: row.get(1)?,
                duration_secs: row.get(2)?,
                category: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    let windows = conn
        .prepare(
            "SELECT date, app_name, window_title, duration_secs FROM window_usage
             ORDER BY date, app_name, window_title",
        )?
        .query_map([], |row| {
            Ok(WindowTitleRecord {
                date: row.get(0)?,
                app_name: row.get(1)?,
                window_title: row.get(2)?,
                duration_secs: row.get(3)?,
            })
        })?
        .collect::<Result<Vec<_>>>()?;

    Ok(UsageFacts { daily, apps, windows })
}

/// Delete every usage fact. Category rules and settings are kept.
pub fn clear_all(conn: &mut Connection) -> Result<()> {
    let tx = conn.transaction()?;
    tx.execute("DELETE FROM window_usage", [])?;
    tx.execute("DELETE FROM app_usage", [])?;
    tx.execute("DELETE FROM daily_totals", [])?;
    tx.commit()
}
