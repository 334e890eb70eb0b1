use crate::constants::DEFAULT_FOCUS_MINUTES;
use log::warn;
use rusqlite::{params, Connection, OptionalExtension, Result};

const FOCUS_DURATION_KEY: &str = "focus_duration_minutes";

/// Global user preferences. Read and written by the presentation layer only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Settings {
    pub focus_duration_minutes: i32,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            focus_duration_minutes: DEFAULT_FOCUS_MINUTES,
        }
    }
}

impl Settings {
    pub fn load(conn: &Connection) -> Result<Self> {
        let raw: Option<String> = conn
            .query_row(
                "SELECT value FROM settings WHERE key = ?1",
                params![FOCUS_DURATION_KEY],
                |row| row.get(0),
            )
            .optional()?;

        let focus_duration_minutes = match raw {
            Some(value) => value.parse().unwrap_or_else(|_| {
                warn!("Ignoring malformed {FOCUS_DURATION_KEY} setting: {value:?}");
                DEFAULT_FOCUS_MINUTES
            }),
            None => DEFAULT_FOCUS_MINUTES,
        };

        Ok(Self { focus_duration_minutes })
    }

    pub fn save(&self, conn: &Connection) -> Result<()> {
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2)
             ON CONFLICT(key) DO UPDATE SET value = excluded.value",
            params![FOCUS_DURATION_KEY, self.focus_duration_minutes.to_string()],
        )?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::setup_test_db;

    #[test]
    fn test_load_defaults_after_migration() {
        let (db, _dir) = setup_test_db();
        assert_eq!(Settings::load(db.connection()).unwrap(), Settings::default());
    }

    #[test]
    fn test_save_and_load() {
        let (db, _dir) = setup_test_db();
        let settings = Settings { focus_duration_minutes: 50 };
        settings.save(db.connection()).unwrap();
        assert_eq!(Settings::load(db.connection()).unwrap(), settings);
    }

    #[test]
    fn test_malformed_value_falls_back_to_default() {
        let (db, _dir) = setup_test_db();
        db.connection()
            .execute("UPDATE settings SET value = 'soon' WHERE key = ?1", [FOCUS_DURATION_KEY])
            .unwrap();
        assert_eq!(
            Settings::load(db.connection()).unwrap().focus_duration_minutes,
            DEFAULT_FOCUS_MINUTES
        );
    }
}
