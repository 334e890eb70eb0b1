// Presentation-layer operations, organized by feature.

mod dtos;
pub mod categories;
pub mod focus;
pub mod history;
pub mod settings;

pub use categories::*;
pub use dtos::*;
pub use focus::*;
pub use history::*;
pub use settings::*;

use crate::categorizer::Categorizer;
use crate::db::Database;
use crate::focus::FocusManager;
use std::sync::{Arc, Mutex};

/// Shared handles every command operates on.
#[derive(Clone)]
pub struct AppState {
    pub db: Arc<Mutex<Database>>,
    pub categorizer: Arc<Mutex<Categorizer>>,
    pub focus: Arc<FocusManager>,
}

impl AppState {
    pub fn new(
        db: Arc<Mutex<Database>>,
        categorizer: Arc<Mutex<Categorizer>>,
        focus: Arc<FocusManager>,
    ) -> Self {
        Self {
            db,
            categorizer,
            focus,
        }
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use super::AppState;
    use crate::categorizer::Categorizer;
    use crate::focus::{AttentionSink, FocusManager};
    use crate::test_utils::{setup_shared_db, RecordingSink};
    use std::sync::{Arc, Mutex};
    use tempfile::TempDir;

    pub fn setup_state() -> (AppState, Arc<RecordingSink>, TempDir) {
        let (db, dir) = setup_shared_db();
        let categorizer = Arc::new(Mutex::new(
            Categorizer::new(db.lock().unwrap().connection()).unwrap(),
        ));
        let sink = Arc::new(RecordingSink::default());
        let focus = Arc::new(FocusManager::new(Arc::clone(&sink) as Arc<dyn AttentionSink>));
        (AppState::new(db, categorizer, focus), sink, dir)
    }
}
