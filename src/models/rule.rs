use crate::models::Category;
use rusqlite::{params, Connection, OptionalExtension, Result, Row};

/// A user's classification of one application, independent of date.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryRule {
    pub app_name: String,
    pub category: Category,
    pub updated_at: i64,
}

impl CategoryRule {
    fn from_row(row: &Row<'_>) -> Result<Self> {
        Ok(Self {
            app_name: row.get(0)?,
            category: row.get(1)?,
            updated_at: row.get(2)?,
        })
    }

    pub fn find(conn: &Connection, app_name: &str) -> Result<Option<Self>> {
        conn.query_row(
            "SELECT app_name, category, updated_at FROM category_rules WHERE app_name = ?1",
            params![app_name],
            Self::from_row,
        )
        .optional()
    }

    pub fn find_all(conn: &Connection) -> Result<Vec<Self>> {
        let mut stmt =
            conn.prepare("SELECT app_name, category, updated_at FROM category_rules ORDER BY app_name")?;
        let rows = stmt.query_map([], Self::from_row)?;
        rows.collect()
    }

    /// Create or overwrite the rule for `app_name`.
    pub fn upsert(conn: &Connection, app_name: &str, category: Category) -> Result<Self> {
        let updated_at = chrono::Utc::now().timestamp();
        conn.execute(
            "INSERT INTO category_rules (app_name, category, updated_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(app_name) DO UPDATE SET
                category = excluded.category,
                updated_at = excluded.updated_at",
            params![app_name, category, updated_at],
        )?;
        Ok(Self {
            app_name: app_name.to_string(),
            category,
            updated_at,
        })
    }
}
