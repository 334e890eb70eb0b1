use crate::aggregator::Aggregator;
use crate::categorizer::Categorizer;
use crate::constants::TICK_INTERVAL;
use crate::db::{safe_lock, Database};
use crate::focus::FocusManager;
use crate::models::Category;
use crate::platform::ActiveWindowProbe;
use crate::validation::normalize_app_name;
use chrono::Local;
use log::{debug, info, trace, warn};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Instant;

pub struct TrackerConfig {
    pub tick_interval: std::time::Duration,
    pub track_window_titles: bool,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            tick_interval: TICK_INTERVAL,
            track_window_titles: true,
        }
    }
}

/// One tick's worth of work: probe, record, enforce.
struct Sampler {
    aggregator: Aggregator,
    categorizer: Arc<Mutex<Categorizer>>,
    focus: Arc<FocusManager>,
}

impl Sampler {
    fn sample_once(&self, probe: &dyn ActiveWindowProbe) -> Option<Category> {
        let Some(window) = probe.poll() else {
            trace!("No focused window, tick skipped");
            return None;
        };

        let category = match self
            .aggregator
            .record(&window.app_name, &window.window_title, Local::now())
        {
            Ok(category) => category,
            Err(e) => {
                // At-most-once: this second is lost, the loop keeps going
                warn!("Dropped sample for {}: {e}", window.app_name);
                let app_name = normalize_app_name(&window.app_name);
                safe_lock(&self.categorizer, "Categorizer").resolve(&app_name)
            }
        };

        self.focus.observe(&window.app_name, category);
        Some(category)
    }
}

pub struct TrackerService {
    config: TrackerConfig,
    running: Arc<AtomicBool>,
    // Bumped by every `start`; only the newest loop may clear `running`
    generation: Arc<AtomicU64>,
    stop_tx: Mutex<Option<Sender<()>>>,
    sampler: Arc<Sampler>,
}

impl TrackerService {
    pub fn new(
        db: Arc<Mutex<Database>>,
        categorizer: Arc<Mutex<Categorizer>>,
        focus: Arc<FocusManager>,
        config: TrackerConfig,
    ) -> Self {
        let aggregator = Aggregator::new(db, Arc::clone(&categorizer), config.track_window_titles);
        Self {
            config,
            running: Arc::new(AtomicBool::new(false)),
            generation: Arc::new(AtomicU64::new(0)),
            stop_tx: Mutex::new(None),
            sampler: Arc::new(Sampler {
                aggregator,
                categorizer,
                focus,
            }),
        }
    }

    /// Run exactly one sampling tick on the calling thread.
    pub fn sample_once(&self, probe: &dyn ActiveWindowProbe) -> Option<Category> {
        self.sampler.sample_once(probe)
    }

    /// Start the sampling loop on its own thread.
    ///
    /// Ticks are scheduled against a deadline. When a tick overruns into the
    /// next slot (slow probe, system sleep) the schedule restarts from now;
    /// missed ticks are never credited.
    ///
    /// Starting again while a loop is running stops the previous loop.
    pub fn start(&self, probe: Box<dyn ActiveWindowProbe>) -> thread::JoinHandle<()> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let (stop_tx, stop_rx) = mpsc::channel();
        let previous = safe_lock(&self.stop_tx, "Tracker").replace(stop_tx);
        self.running.store(true, Ordering::SeqCst);
        if let Some(previous) = previous {
            warn!("Tracker restarted while running, stopping the previous loop");
            let _ = previous.send(());
        }

        let running = Arc::clone(&self.running);
        let current_generation = Arc::clone(&self.generation);
        let sampler = Arc::clone(&self.sampler);
        let interval = self.config.tick_interval;

        info!("Tracker started (interval {interval:?})");
        thread::spawn(move || {
            let mut next_tick = Instant::now() + interval;
            loop {
                let wait = next_tick.saturating_duration_since(Instant::now());
                match stop_rx.recv_timeout(wait) {
                    Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    Err(RecvTimeoutError::Timeout) => {}
                }

                sampler.sample_once(probe.as_ref());

                next_tick += interval;
                let now = Instant::now();
                if now >= next_tick {
                    debug!("Tracker fell behind by {:?}, dropping missed ticks", now - next_tick);
                    next_tick = now + interval;
                }
            }
            if current_generation.load(Ordering::SeqCst) == generation {
                running.store(false, Ordering::SeqCst);
            }
            info!("Tracker stopped");
        })
    }

    /// Stop issuing ticks. A tick already in progress finishes its write.
    pub fn stop(&self) {
        self.running.store(false, Ordering::SeqCst);
        if let Some(stop_tx) = safe_lock(&self.stop_tx, "Tracker").take() {
            // The loop may already have exited; nothing to signal then
            let _ = stop_tx.send(());
        }
    }

    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}
