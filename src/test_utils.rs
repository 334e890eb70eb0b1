//! Shared test utilities.
//!
//! Common setup functions and test doubles used across test modules.

#![cfg(test)]

use crate::db::{migrations, Database};
use crate::focus::{AttentionSignal, AttentionSink};
use crate::platform::{ActiveWindow, ActiveWindowProbe};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};
use tempfile::{tempdir, TempDir};

/// Create a temporary test database with migrations applied.
///
/// Returns a tuple of (Database, TempDir). The TempDir must be kept alive
/// for the duration of the test to prevent the database file from being deleted.
pub fn setup_test_db() -> (Database, TempDir) {
    let dir = tempdir().expect("Failed to create temp directory for test DB");
    let db_path = dir.path().join("test.db");
    let db = Database::open(&db_path).expect("Failed to open test database");
    migrations::run(db.connection()).expect("Failed to run migrations on test DB");
    (db, dir)
}

/// Same as [`setup_test_db`], wrapped for sharing across components.
pub fn setup_shared_db() -> (Arc<Mutex<Database>>, TempDir) {
    let (db, dir) = setup_test_db();
    (Arc::new(Mutex::new(db)), dir)
}

/// Probe that replays a fixed script of observations, then reports nothing.
pub struct ScriptedProbe {
    script: Mutex<VecDeque<Option<ActiveWindow>>>,
}

impl ScriptedProbe {
    pub fn new(script: Vec<Option<(&str, &str)>>) -> Self {
        let script = script
            .into_iter()
            .map(|entry| {
                entry.map(|(app, title)| ActiveWindow {
                    app_name: app.to_string(),
                    window_title: title.to_string(),
                })
            })
            .collect();
        Self { script: Mutex::new(script) }
    }
}

impl ActiveWindowProbe for ScriptedProbe {
    fn poll(&self) -> Option<ActiveWindow> {
        self.script.lock().unwrap().pop_front().flatten()
    }
}

/// Sink that records every signal it receives.
#[derive(Default)]
pub struct RecordingSink {
    pub signals: Mutex<Vec<AttentionSignal>>,
}

impl RecordingSink {
    pub fn take(&self) -> Vec<AttentionSignal> {
        std::mem::take(&mut *self.signals.lock().unwrap())
    }
}

impl AttentionSink for RecordingSink {
    fn on_signal(&self, signal: AttentionSignal) {
        self.signals.lock().unwrap().push(signal);
    }
}
