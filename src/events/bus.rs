//! Event fan-out to registered listeners.

use std::sync::{Arc, Mutex, PoisonError};

use super::event::GameEvent;
use crate::core::SessionView;

/// Receives every event the engine publishes.
///
/// Listeners get a read-only view of the session as it stands right after
/// the event; they cannot mutate core state.
pub trait EventListener: Send {
    fn on_event(&mut self, event: &GameEvent, view: &SessionView<'_>);
}

/// Ordered list of listeners. Events reach them in registration order.
#[derive(Default)]
pub struct EventBus {
    listeners: Vec<Box<dyn EventListener>>,
}

impl EventBus {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe(&mut self, listener: Box<dyn EventListener>) {
        self.listeners.push(listener);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.listeners.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.listeners.is_empty()
    }

    pub fn publish(&mut self, event: &GameEvent, view: &SessionView<'_>) {
        for listener in &mut self.listeners {
            listener.on_event(event, view);
        }
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

/// Recording listener with a shared handle.
///
/// Clone the log, subscribe one clone, and read events through the other.
///
/// ```
/// use polyboard::events::EventLog;
///
/// let log = EventLog::new();
/// let reader = log.clone();
/// assert!(reader.events().is_empty());
/// ```
#[derive(Clone, Debug, Default)]
pub struct EventLog {
    events: Arc<Mutex<Vec<GameEvent>>>,
}

impl EventLog {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of everything recorded so far.
    #[must_use]
    pub fn events(&self) -> Vec<GameEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Number of recorded events matching `predicate`.
    pub fn count(&self, predicate: impl Fn(&GameEvent) -> bool) -> usize {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|e| predicate(e))
            .count()
    }

    pub fn clear(&self) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl EventListener for EventLog {
    fn on_event(&mut self, event: &GameEvent, _view: &SessionView<'_>) {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(event.clone());
    }
}
