use crate::categorizer::Categorizer;
use crate::date_key::day_key;
use crate::db::{safe_lock, Database};
use crate::error::AppError;
use crate::models::usage::upsert_sample;
use crate::models::{Category, SampleKey};
use crate::validation::{normalize_app_name, sanitize_window_title};
use chrono::{DateTime, Local};
use log::trace;
use std::sync::{Arc, Mutex};

/// Turns accepted samples into counter increments.
pub struct Aggregator {
    db: Arc<Mutex<Database>>,
    categorizer: Arc<Mutex<Categorizer>>,
    track_window_titles: bool,
}

impl Aggregator {
    pub fn new(
        db: Arc<Mutex<Database>>,
        categorizer: Arc<Mutex<Categorizer>>,
        track_window_titles: bool,
    ) -> Self {
        Self {
            db,
            categorizer,
            track_window_titles,
        }
    }

    /// Attribute one second of usage to `app_name` / `window_title` on the
    /// local day of `timestamp`.
    ///
    /// The day, app and title increments commit in one transaction. The
    /// categorizer lock is held for the whole write so a concurrent
    /// [`Categorizer::set_rule`] is ordered strictly before or after this sample.
    pub fn record(
        &self,
        app_name: &str,
        window_title: &str,
        timestamp: DateTime<Local>,
    ) -> Result<Category, AppError> {
        let date = day_key(&timestamp);
        let app_name = normalize_app_name(app_name);
        let title = self
            .track_window_titles
            .then(|| sanitize_window_title(window_title));

        let key = SampleKey {
            date: &date,
            app_name: &app_name,
            window_title: title.as_deref(),
        };

        let categorizer = safe_lock(&self.categorizer, "Categorizer");
        let rule = categorizer.rule_for(&app_name);

        let mut db = safe_lock(&self.db, "Database");
        let tx = db.connection_mut().transaction()?;
        let category = upsert_sample(&tx, &key, rule)?;
        tx.commit()?;
        drop(db);
        drop(categorizer);

        trace!("Recorded {app_name} ({category}) on {date}");
        Ok(category)
    }
}
