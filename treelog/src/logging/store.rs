use std::{collections::VecDeque, sync::Arc};

use crossbeam::channel::{self, Receiver, Sender, TrySendError};
use log::{debug, trace, warn};
use parking_lot::Mutex;

use crate::{config::StoreConfig, error::Result, logging::LogEntry};

/// Change notification published by a [`LogStore`].
#[derive(Debug, Clone, PartialEq)]
pub enum StoreEvent {
    Added(Arc<LogEntry>),
    Cleared,
}

/// Handle returned when registering an observer, used to unregister it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ObserverId(u64);

type AddedCallback = Box<dyn Fn(&Arc<LogEntry>) + Send>;
type ClearedCallback = Box<dyn Fn() + Send>;

enum Observer {
    Added(AddedCallback),
    Cleared(ClearedCallback),
    Channel(Sender<StoreEvent>),
}

impl Observer {
    /// Delivers `event`; returns false once the observer can no longer receive anything.
    fn notify(&self, event: &StoreEvent) -> bool {
        match (self, event) {
            (Observer::Added(callback), StoreEvent::Added(entry)) => {
                callback(entry);
                true
            }
            (Observer::Cleared(callback), StoreEvent::Cleared) => {
                callback();
                true
            }
            (Observer::Channel(sender), event) => match sender.try_send(event.clone()) {
                Ok(()) => true,
                Err(TrySendError::Full(_)) => {
                    warn!(
                        "Log store channel subscriber fell {} events behind, dropping it",
                        sender.len()
                    );
                    false
                }
                Err(TrySendError::Disconnected(_)) => false,
            },
            _ => true,
        }
    }
}

struct State {
    entries: VecDeque<Arc<LogEntry>>,
    observers: Vec<(ObserverId, Observer)>,
    next_id: u64,
}

impl State {
    fn register(&mut self, observer: Observer) -> ObserverId {
        let id = ObserverId(self.next_id);
        self.next_id += 1;
        self.observers.push((id, observer));
        trace!("Registered log store observer {id:?}");
        id
    }

    fn publish(&mut self, event: StoreEvent) {
        self.observers.retain(|(id, observer)| {
            let alive = observer.notify(&event);
            if !alive {
                trace!("Pruned disconnected log store observer {id:?}");
            }
            alive
        });
    }
}

/// Bounded, chronologically ordered collection of log entries.
///
/// Once `max_logs` entries are held, the next append first drops the oldest
/// `eviction_batch` entries together. Observers are invoked synchronously, in registration
/// order, while the store lock is held: an observer must not call back into the store.
pub struct LogStore {
    max_logs: usize,
    eviction_batch: usize,
    state: Mutex<State>,
}

impl Default for LogStore {
    fn default() -> Self {
        Self::with_limits(StoreConfig::default())
    }
}

impl std::fmt::Debug for LogStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("LogStore")
            .field("max_logs", &self.max_logs)
            .field("eviction_batch", &self.eviction_batch)
            .field("len", &state.entries.len())
            .field("observers", &state.observers.len())
            .finish()
    }
}

impl LogStore {
    /// Store with validated limits.
    pub fn new(config: StoreConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::with_limits(config))
    }

    fn with_limits(config: StoreConfig) -> Self {
        LogStore {
            max_logs: config.max_logs,
            eviction_batch: config.eviction_batch,
            state: Mutex::new(State {
                entries: VecDeque::with_capacity(config.max_logs),
                observers: Vec::new(),
                next_id: 0,
            }),
        }
    }

    pub fn capacity(&self) -> usize {
        self.max_logs
    }

    pub fn eviction_batch(&self) -> usize {
        self.eviction_batch
    }

    /// Appends `entry`, evicting the oldest batch first when the store is full.
    pub fn append(&self, entry: LogEntry) -> Arc<LogEntry> {
        let entry = Arc::new(entry);
        let mut state = self.state.lock();

        if state.entries.len() >= self.max_logs {
            let evicted = self.eviction_batch.min(state.entries.len());
            state.entries.drain(..evicted);
            debug!(
                "Log store reached {} entries, evicted the oldest {evicted}",
                self.max_logs
            );
        }

        state.entries.push_back(Arc::clone(&entry));
        state.publish(StoreEvent::Added(Arc::clone(&entry)));
        entry
    }

    /// Drops every entry and notifies the cleared observers once.
    pub fn clear(&self) {
        let mut state = self.state.lock();
        let dropped = state.entries.len();
        state.entries.clear();
        trace!("Cleared {dropped} log entries");
        state.publish(StoreEvent::Cleared);
    }

    /// Snapshot of the current entries, oldest first.
    pub fn entries(&self) -> Vec<Arc<LogEntry>> {
        self.state.lock().entries.iter().cloned().collect()
    }

    /// Entries whose tree matches `query`, oldest first.
    pub fn search(&self, query: &str) -> Vec<Arc<LogEntry>> {
        self.state
            .lock()
            .entries
            .iter()
            .filter(|entry| entry.matches_query(query))
            .cloned()
            .collect()
    }

    pub fn last(&self) -> Option<Arc<LogEntry>> {
        self.state.lock().entries.back().cloned()
    }

    pub fn len(&self) -> usize {
        self.state.lock().entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.state.lock().entries.is_empty()
    }

    pub fn on_added<F>(&self, callback: F) -> ObserverId
    where
        F: Fn(&Arc<LogEntry>) + Send + 'static,
    {
        self.state.lock().register(Observer::Added(Box::new(callback)))
    }

    pub fn on_cleared<F>(&self, callback: F) -> ObserverId
    where
        F: Fn() + Send + 'static,
    {
        self.state
            .lock()
            .register(Observer::Cleared(Box::new(callback)))
    }

    /// Receiver of every future [`StoreEvent`]. Dropping the receiver unsubscribes it.
    ///
    /// The channel holds at most [`LogStore::capacity`] undelivered events. A subscriber
    /// that falls further behind is unsubscribed: it can still drain what was queued, after
    /// which the receiver reports a disconnect.
    pub fn subscribe_channel(&self) -> Receiver<StoreEvent> {
        let (sender, receiver) = channel::bounded(self.max_logs);
        self.state.lock().register(Observer::Channel(sender));
        receiver
    }

    /// Removes an observer; returns whether it was still registered.
    pub fn unsubscribe(&self, id: ObserverId) -> bool {
        let mut state = self.state.lock();
        let before = state.observers.len();
        state.observers.retain(|(observer_id, _)| *observer_id != id);
        let removed = state.observers.len() != before;
        if removed {
            trace!("Unregistered log store observer {id:?}");
        }
        removed
    }
}
