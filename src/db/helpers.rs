use crate::db::Database;
use crate::error::AppError;
use log::{error, warn};
use rusqlite::Connection;
use std::sync::{Arc, Mutex, MutexGuard};

/// Execute a database operation with proper lock handling and error mapping.
///
/// # Example
/// ```ignore
/// with_connection(&db, |conn| CategoryRule::find_all(conn))
/// ```
pub fn with_connection<F, T>(db: &Arc<Mutex<Database>>, f: F) -> Result<T, AppError>
where
    F: FnOnce(&Connection) -> rusqlite::Result<T>,
{
    let db = db.lock().map_err(|e| {
        error!("Failed to acquire database lock: {e}");
        AppError::LockPoisoned
    })?;

    f(db.connection()).map_err(|e| {
        error!("Database operation failed: {e}");
        AppError::Database(e)
    })
}

/// Lock a mutex, recovering from poisoning if necessary.
///
/// Used on the sampling path, which must keep ticking after a panic elsewhere.
pub fn safe_lock<'a, T>(mutex: &'a Mutex<T>, context: &str) -> MutexGuard<'a, T> {
    match mutex.lock() {
        Ok(guard) => guard,
        Err(poisoned) => {
            warn!("{context} mutex was poisoned, recovering");
            poisoned.into_inner()
        }
    }
}
