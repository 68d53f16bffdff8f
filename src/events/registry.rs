use serde_json::Value;
use std::collections::{HashMap, VecDeque};
use std::fmt;
use std::ops::ControlFlow;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Arc, PoisonError, RwLock};
use std::time::{Duration, Instant};
use tracing::{debug, trace};

/// Runs before normal listeners.
pub const PRIORITY_HIGH: i32 = 10;
/// Default priority.
pub const PRIORITY_NORMAL: i32 = 100;
/// Runs after normal listeners.
pub const PRIORITY_LOW: i32 = 200;

/// Oldest entries are dropped once this many performance logs are kept.
const MAX_PERFORMANCE_LOGS: usize = 1024;

/// An event listener. Returning `Break` cancels the remaining listeners.
pub type Listener = Arc<dyn Fn(&Value) -> ControlFlow<()> + Send + Sync>;

/// Handle returned by [`EventRegistry::on`], used to remove the listener again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ListenerId(u64);

/// Timing of one listener invocation.
#[derive(Debug, Clone)]
pub struct PerformanceLog {
    pub event: String,
    pub listener: ListenerId,
    pub started_at: Instant,
    pub duration: Duration,
}

struct Registered {
    id: ListenerId,
    priority: i32,
    listener: Listener,
}

#[derive(Default)]
struct State {
    // Each list is kept sorted by priority, registration order within a priority.
    listeners: HashMap<String, Vec<Registered>>,
    simulate: bool,
    performance: VecDeque<PerformanceLog>,
}

/// Event listener registry with priority ordering.
///
/// `Send + Sync`; listeners run outside the internal lock, so a listener may
/// register or remove listeners while an event is being triggered. Such
/// changes take effect from the next trigger.
pub struct EventRegistry {
    state: RwLock<State>,
    next_id: AtomicU64,
    record_performance: AtomicBool,
}

impl Default for EventRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for EventRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read();
        let counts: HashMap<&str, usize> = state
            .listeners
            .iter()
            .map(|(event, list)| (event.as_str(), list.len()))
            .collect();
        f.debug_struct("EventRegistry")
            .field("listeners", &counts)
            .field("simulate", &state.simulate)
            .finish()
    }
}

impl EventRegistry {
    pub fn new() -> Self {
        Self {
            state: RwLock::new(State::default()),
            next_id: AtomicU64::new(1),
            record_performance: AtomicBool::new(true),
        }
    }

    fn read(&self) -> std::sync::RwLockReadGuard<'_, State> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> std::sync::RwLockWriteGuard<'_, State> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Register `listener` for `event` at [`PRIORITY_NORMAL`].
    pub fn on<F>(&self, event: &str, listener: F) -> ListenerId
    where
        F: Fn(&Value) -> ControlFlow<()> + Send + Sync + 'static,
    {
        self.on_with_priority(event, PRIORITY_NORMAL, listener)
    }

    /// Register `listener` for `event`; lower `priority` values run first.
    pub fn on_with_priority<F>(&self, event: &str, priority: i32, listener: F) -> ListenerId
    where
        F: Fn(&Value) -> ControlFlow<()> + Send + Sync + 'static,
    {
        let id = ListenerId(self.next_id.fetch_add(1, Ordering::Relaxed));
        let mut state = self.write();
        let list = state.listeners.entry(event.to_string()).or_default();
        let at = list.partition_point(|r| r.priority <= priority);
        list.insert(
            at,
            Registered {
                id,
                priority,
                listener: Arc::new(listener),
            },
        );
        debug!(event = %event, priority, listener = id.0, "Listener registered");
        id
    }

    /// Run every listener of `event` in priority order.
    ///
    /// Returns `false` when a listener cancelled the chain. In simulate mode no
    /// listener runs and the result is `true`.
    pub fn trigger(&self, event: &str, payload: &Value) -> bool {
        let snapshot: Vec<(ListenerId, Listener)> = {
            let state = self.read();
            if state.simulate {
                trace!(event = %event, "Simulated trigger");
                return true;
            }
            match state.listeners.get(event) {
                Some(list) => list
                    .iter()
                    .map(|r| (r.id, Arc::clone(&r.listener)))
                    .collect(),
                None => return true,
            }
        };

        let record = self.record_performance.load(Ordering::Relaxed);
        for (id, listener) in snapshot {
            let started_at = Instant::now();
            let flow = listener(payload);
            if record {
                self.push_performance_log(PerformanceLog {
                    event: event.to_string(),
                    listener: id,
                    started_at,
                    duration: started_at.elapsed(),
                });
            }
            if flow.is_break() {
                debug!(event = %event, listener = id.0, "Event cancelled by listener");
                return false;
            }
        }
        true
    }

    fn push_performance_log(&self, log: PerformanceLog) {
        let mut state = self.write();
        if state.performance.len() == MAX_PERFORMANCE_LOGS {
            state.performance.pop_front();
        }
        state.performance.push_back(log);
    }

    /// Listener ids of `event` in execution order.
    #[must_use]
    pub fn listeners(&self, event: &str) -> Vec<ListenerId> {
        self.read()
            .listeners
            .get(event)
            .map(|list| list.iter().map(|r| r.id).collect())
            .unwrap_or_default()
    }

    /// Remove one listener. `false` if it was not registered for `event`.
    pub fn remove_listener(&self, event: &str, id: ListenerId) -> bool {
        let mut state = self.write();
        let Some(list) = state.listeners.get_mut(event) else {
            return false;
        };
        match list.iter().position(|r| r.id == id) {
            Some(at) => {
                list.remove(at);
                if list.is_empty() {
                    state.listeners.remove(event);
                }
                true
            }
            None => false,
        }
    }

    /// Remove the listeners of `event`, or of every event when `None`.
    pub fn remove_all_listeners(&self, event: Option<&str>) {
        let mut state = self.write();
        match event {
            Some(event) => {
                state.listeners.remove(event);
            }
            None => state.listeners.clear(),
        }
    }

    /// In simulate mode `trigger` runs no listener.
    pub fn simulate(&self, choice: bool) {
        self.write().simulate = choice;
    }

    #[must_use]
    pub fn is_simulating(&self) -> bool {
        self.read().simulate
    }

    /// Enable or disable listener timing.
    pub fn set_performance_logging(&self, enabled: bool) {
        self.record_performance.store(enabled, Ordering::Relaxed);
    }

    /// Timings of listener runs, oldest first.
    #[must_use]
    pub fn performance_logs(&self) -> Vec<PerformanceLog> {
        self.read().performance.iter().cloned().collect()
    }

    /// Back to a fresh state: no listeners, no logs, simulate off.
    pub fn reset(&self) {
        *self.write() = State::default();
    }
}
