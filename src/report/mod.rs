//! Read-side reconstruction of the nested usage report from flat facts.
//!
//! The nested shape is never persisted; it is recomputed on every call.

use crate::models::usage::read_all;
use crate::models::{Category, UsageFacts};
use rusqlite::{Connection, TransactionBehavior};
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct AppReport {
    pub duration: i64,
    pub category: Category,
    pub window_titles: BTreeMap<String, i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct DayReport {
    pub total_seconds: i64,
    pub apps: BTreeMap<String, AppReport>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct CategoryTotals {
    pub productive_secs: i64,
    pub neutral_secs: i64,
    pub distraction_secs: i64,
}

impl DayReport {
    /// Seconds spent per category on this day.
    pub fn category_totals(&self) -> CategoryTotals {
        self.apps
            .values()
            .fold(CategoryTotals::default(), |mut totals, app| {
                match app.category {
                    Category::Productive => totals.productive_secs += app.duration,
                    Category::Neutral => totals.neutral_secs += app.duration,
                    Category::Distraction => totals.distraction_secs += app.duration,
                }
                totals
            })
    }
}

/// Date (`YYYY-MM-DD`) to that day's breakdown.
pub type Report = BTreeMap<String, DayReport>;

/// Build the report from one consistent snapshot of the store.
pub fn build_report(conn: &mut Connection) -> rusqlite::Result<Report> {
    // A read transaction pins the snapshot across the three table scans
    let tx = conn.transaction_with_behavior(TransactionBehavior::Deferred)?;
    let facts = read_all(&tx)?;
    tx.finish()?;
    Ok(assemble(facts))
}

/// Group flat facts by date, then application, then window title.
pub fn assemble(facts: UsageFacts) -> Report {
    let mut report = Report::new();

    for daily in facts.daily {
        report.entry(daily.date).or_default().total_seconds = daily.total_secs;
    }

    for app in facts.apps {
        let day = report.entry(app.date).or_default();
        let entry = day.apps.entry(app.app_name).or_default();
        entry.duration += app.duration_secs;
        entry.category = app.category;
    }

    for window in facts.windows {
        let day = report.entry(window.date).or_default();
        let app = day.apps.entry(window.app_name).or_default();
        *app.window_titles.entry(window.window_title).or_insert(0) += window.duration_secs;
    }

    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::usage::upsert_sample;
    use crate::models::SampleKey;
    use crate::test_utils::setup_test_db;

    fn sample(conn: &Connection, date: &str, app: &str, title: &str, rule: Option<Category>) {
        let key = SampleKey {
            date,
            app_name: app,
            window_title: Some(title),
        };
        upsert_sample(conn, &key, rule).unwrap();
    }

    #[test]
    fn test_empty_store_builds_empty_report() {
        let (mut db, _dir) = setup_test_db();
        assert!(build_report(db.connection_mut()).unwrap().is_empty());
    }

    #[test]
    fn test_report_nests_day_app_title() {
        let (mut db, _dir) = setup_test_db();
        {
            let conn = db.connection();
            sample(conn, "2026-10-14", "Browser", "News", None);
            sample(conn, "2026-10-15", "Editor", "main rs", Some(Category::Productive));
            sample(conn, "2026-10-15", "Editor", "main rs", Some(Category::Productive));
            sample(conn, "2026-10-15", "Editor", "lib rs", Some(Category::Productive));
            sample(conn, "2026-10-15", "Game", "Level 1", Some(Category::Distraction));
        }

        let report = build_report(db.connection_mut()).unwrap();

        assert_eq!(report.len(), 2);
        let today = &report["2026-10-15"];
        assert_eq!(today.total_seconds, 4);
        let editor = &today.apps["Editor"];
        assert_eq!(editor.duration, 3);
        assert_eq!(editor.category, Category::Productive);
        assert_eq!(editor.window_titles["main rs"], 2);
        assert_eq!(editor.window_titles["lib rs"], 1);
        assert_eq!(today.apps["Game"].category, Category::Distraction);
        assert_eq!(report["2026-10-14"].apps["Browser"].duration, 1);
    }

    #[test]
    fn test_report_totals_are_consistent() {
        let (mut db, _dir) = setup_test_db();
        {
            let conn = db.connection();
            for (app, title) in [("A", "x"), ("B", "y"), ("A", "z"), ("C", "x"), ("A", "x")] {
                sample(conn, "2026-10-15", app, title, None);
            }
        }

        let report = build_report(db.connection_mut()).unwrap();

        for day in report.values() {
            let app_sum: i64 = day.apps.values().map(|a| a.duration).sum();
            assert_eq!(app_sum, day.total_seconds);
            for app in day.apps.values() {
                assert_eq!(app.window_titles.values().sum::<i64>(), app.duration);
            }
        }
    }

    #[test]
    fn test_build_report_is_idempotent() {
        let (mut db, _dir) = setup_test_db();
        sample(db.connection(), "2026-10-15", "Editor", "main rs", None);

        let first = build_report(db.connection_mut()).unwrap();
        let second = build_report(db.connection_mut()).unwrap();

        assert_eq!(first, second);
        assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn test_category_totals() {
        let (mut db, _dir) = setup_test_db();
        {
            let conn = db.connection();
            sample(conn, "2026-10-15", "Editor", "a", Some(Category::Productive));
            sample(conn, "2026-10-15", "Editor", "a", Some(Category::Productive));
            sample(conn, "2026-10-15", "Game", "b", Some(Category::Distraction));
            sample(conn, "2026-10-15", "Chat", "c", None);
        }

        let report = build_report(db.connection_mut()).unwrap();

        assert_eq!(
            report["2026-10-15"].category_totals(),
            CategoryTotals {
                productive_secs: 2,
                neutral_secs: 1,
                distraction_secs: 1,
            }
        );
    }

    #[test]
    fn test_serialized_shape() {
        let (mut db, _dir) = setup_test_db();
        sample(db.connection(), "2026-10-15", "Editor", "main rs", None);

        let report = build_report(db.connection_mut()).unwrap();
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["2026-10-15"]["total_seconds"], 1);
        assert_eq!(json["2026-10-15"]["apps"]["Editor"]["duration"], 1);
        assert_eq!(json["2026-10-15"]["apps"]["Editor"]["category"], "Neutral");
        assert_eq!(json["2026-10-15"]["apps"]["Editor"]["window_titles"]["main rs"], 1);
    }
}
