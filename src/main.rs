//! Tracking engine for WellDesk.
//!
//! Samples the focused window once per second, records usage, enforces focus
//! mode, and serves the display process over stdin/stdout until it hangs up.

use std::io;
use std::process;
use std::sync::{Arc, Mutex};
use welldesk_lib::{
    bridge::{BridgeHost, BridgeSink},
    categorizer::Categorizer,
    commands::AppState,
    db::{migrations, Database},
    error::AppError,
    focus::FocusManager,
    get_db_path,
    platform::NativeProbe,
    tracker::{TrackerConfig, TrackerService},
};

fn run() -> Result<(), AppError> {
    let db_path = get_db_path()?;
    let db = Database::open(&db_path)?;
    migrations::run(db.connection())?;
    log::info!("Database ready at {}", db_path.display());

    let categorizer = Categorizer::new(db.connection())?;
    log::info!("Loaded {} category rules", categorizer.rules().count());

    let db = Arc::new(Mutex::new(db));
    let categorizer = Arc::new(Mutex::new(categorizer));

    let writer = Arc::new(Mutex::new(io::stdout()));
    let sink = Arc::new(BridgeSink::new(Arc::clone(&writer)));
    let focus_manager = Arc::new(FocusManager::new(sink));

    let tracker = TrackerService::new(
        Arc::clone(&db),
        Arc::clone(&categorizer),
        Arc::clone(&focus_manager),
        TrackerConfig::default(),
    );
    let handle = tracker.start(Box::new(NativeProbe::new()?));

    let host = BridgeHost::new(AppState::new(db, categorizer, focus_manager), writer);
    let served = host.serve(io::stdin().lock());

    // The display process is gone either way; stop sampling before exiting
    tracker.stop();
    if handle.join().is_err() {
        log::error!("Tracker thread panicked");
    }

    served.map_err(AppError::from)
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    if let Err(e) = run() {
        log::error!("WellDesk engine error: {e}");
        process::exit(1);
    }
}
