use super::schema::{DEFAULT_SETTINGS, SCHEMA};
use rusqlite::{params, Connection, Result};

pub fn run(conn: &Connection) -> Result<()> {
    conn.execute_batch(SCHEMA)?;
    seed_default_settings(conn)?;
    Ok(())
}

fn seed_default_settings(conn: &Connection) -> Result<()> {
    for (key, value) in DEFAULT_SETTINGS {
        conn.execute(
            "INSERT INTO settings (key, value) VALUES (?1, ?2) ON CONFLICT(key) DO NOTHING",
            params![key, value],
        )?;
    }
    Ok(())
}
