use crate::db::safe_lock;
use crate::models::Category;
use log::{debug, info};
use serde::Serialize;
use std::sync::{Arc, Mutex};

/// What the presentation layer should do with its window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AttentionSignal {
    /// Bring the window forward and pin it on top.
    Reclaim,
    /// Unpin the window.
    StandDown,
}

/// Receives enforcement signals; implemented by the presentation layer.
pub trait AttentionSink: Send + Sync {
    fn on_signal(&self, signal: AttentionSignal);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum EnforcerState {
    #[default]
    Idle,
    Guarding,
}

/// Focus-mode state machine.
///
/// Level-triggered: while guarding, every observed sample yields a signal,
/// so a sustained distraction keeps producing `Reclaim`.
#[derive(Debug, Default)]
pub struct FocusEnforcer {
    state: EnforcerState,
}

impl FocusEnforcer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_guarding(&self) -> bool {
        self.state == EnforcerState::Guarding
    }

    /// Toggle focus mode. Leaving `Guarding` always yields one final `StandDown`.
    pub fn set_enabled(&mut self, enabled: bool) -> Option<AttentionSignal> {
        match (self.state, enabled) {
            (EnforcerState::Guarding, false) => {
                self.state = EnforcerState::Idle;
                Some(AttentionSignal::StandDown)
            }
            (EnforcerState::Idle, true) => {
                self.state = EnforcerState::Guarding;
                None
            }
            (EnforcerState::Idle, false) | (EnforcerState::Guarding, true) => None,
        }
    }

    /// React to the live category of the currently sampled application.
    pub fn observe(&self, category: Category) -> Option<AttentionSignal> {
        match self.state {
            EnforcerState::Idle => None,
            EnforcerState::Guarding => Some(match category {
                Category::Distraction => AttentionSignal::Reclaim,
                Category::Productive | Category::Neutral => AttentionSignal::StandDown,
            }),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FocusState {
    pub enabled: bool,
    pub last_signal: Option<AttentionSignal>,
}

struct Inner {
    enforcer: FocusEnforcer,
    last_signal: Option<AttentionSignal>,
}

/// Thread-safe owner of the enforcer, shared by the tracker and the commands.
pub struct FocusManager {
    inner: Mutex<Inner>,
    sink: Arc<dyn AttentionSink>,
}

impl FocusManager {
    pub fn new(sink: Arc<dyn AttentionSink>) -> Self {
        Self {
            inner: Mutex::new(Inner {
                enforcer: FocusEnforcer::new(),
                last_signal: None,
            }),
            sink,
        }
    }

    pub fn set_enabled(&self, enabled: bool) {
        let mut inner = safe_lock(&self.inner, "FocusManager");
        let signal = inner.enforcer.set_enabled(enabled);
        info!("Focus mode {}", if enabled { "enabled" } else { "disabled" });
        self.dispatch(&mut inner, signal);
    }

    pub fn is_enabled(&self) -> bool {
        safe_lock(&self.inner, "FocusManager").enforcer.is_guarding()
    }

    /// Called by the tracker on every accepted sample.
    pub fn observe(&self, app_name: &str, category: Category) {
        let mut inner = safe_lock(&self.inner, "FocusManager");
        let signal = inner.enforcer.observe(category);
        if signal == Some(AttentionSignal::Reclaim) && inner.last_signal != signal {
            debug!("Reclaiming attention from {app_name}");
        }
        self.dispatch(&mut inner, signal);
    }

    pub fn get_state(&self) -> FocusState {
        let inner = safe_lock(&self.inner, "FocusManager");
        FocusState {
            enabled: inner.enforcer.is_guarding(),
            last_signal: inner.last_signal,
        }
    }

    // The sink is called with the lock held so signals reach it in state order.
    fn dispatch(&self, inner: &mut Inner, signal: Option<AttentionSignal>) {
        if let Some(signal) = signal {
            inner.last_signal = Some(signal);
            self.sink.on_signal(signal);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::RecordingSink;
    use AttentionSignal::{Reclaim, StandDown};

    #[test]
    fn test_idle_emits_nothing() {
        let enforcer = FocusEnforcer::new();
        for category in Category::ALL {
            assert_eq!(enforcer.observe(category), None);
        }
    }

    #[test]
    fn test_guarding_signal_sequence() {
        let mut enforcer = FocusEnforcer::new();
        assert_eq!(enforcer.set_enabled(true), None);

        let signals: Vec<_> = [
            Category::Neutral,
            Category::Distraction,
            Category::Distraction,
            Category::Productive,
        ]
        .into_iter()
        .map(|c| enforcer.observe(c))
        .collect();

        assert_eq!(signals, vec![Some(StandDown), Some(Reclaim), Some(Reclaim), Some(StandDown)]);
    }

    #[test]
    fn test_disable_emits_single_stand_down() {
        let mut enforcer = FocusEnforcer::new();
        enforcer.set_enabled(true);
        assert_eq!(enforcer.observe(Category::Distraction), Some(Reclaim));

        assert_eq!(enforcer.set_enabled(false), Some(StandDown));
        assert_eq!(enforcer.set_enabled(false), None);
        assert!(!enforcer.is_guarding());
    }

    #[test]
    fn test_enable_twice_is_noop() {
        let mut enforcer = FocusEnforcer::new();
        assert_eq!(enforcer.set_enabled(true), None);
        assert_eq!(enforcer.set_enabled(true), None);
        assert!(enforcer.is_guarding());
    }

    #[test]
    fn test_manager_forwards_signals_to_sink() {
        let sink = Arc::new(RecordingSink::default());
        let manager = FocusManager::new(Arc::clone(&sink) as Arc<dyn AttentionSink>);

        manager.observe("Game", Category::Distraction);
        assert!(sink.take().is_empty(), "idle manager must not signal");

        manager.set_enabled(true);
        assert!(manager.is_enabled());
        for category in [Category::Neutral, Category::Distraction, Category::Distraction, Category::Productive] {
            manager.observe("App", category);
        }
        assert_eq!(sink.take(), vec![StandDown, Reclaim, Reclaim, StandDown]);
    }

    #[test]
    fn test_manager_disable_after_reclaim() {
        let sink = Arc::new(RecordingSink::default());
        let manager = FocusManager::new(Arc::clone(&sink) as Arc<dyn AttentionSink>);

        manager.set_enabled(true);
        manager.observe("Game", Category::Distraction);
        assert_eq!(manager.get_state().last_signal, Some(Reclaim));
        sink.take();

        manager.set_enabled(false);

        assert_eq!(sink.take(), vec![StandDown]);
        assert_eq!(
            manager.get_state(),
            FocusState { enabled: false, last_signal: Some(StandDown) }
        );
    }
}
