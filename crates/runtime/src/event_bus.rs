use std::collections::{BTreeMap, VecDeque};

use crate::frame::Frame;

/// A recorded event, stamped with the frame it was emitted in.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Event<E> {
    pub frame_index: u64,
    pub payload: E,
}

/// Owned handle to a listener registration.
///
/// Dropping the handle does not unsubscribe; pass it back to
/// [`EventBus::unsubscribe`].
#[derive(Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[must_use = "a subscription must be released with EventBus::unsubscribe"]
pub struct Subscription(u64);

type Listener<E> = Box<dyn FnMut(&E)>;

/// Typed, synchronous event bus.
///
/// `emit` calls every listener in subscription order, then appends the event
/// to a bounded history that consumers may inspect or drain.
pub struct EventBus<E> {
    events: VecDeque<Event<E>>,
    history_limit: Option<usize>,
    listeners: BTreeMap<u64, Listener<E>>,
    next_subscription: u64,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: std::fmt::Debug> std::fmt::Debug for EventBus<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("events", &self.events)
            .field("history_limit", &self.history_limit)
            .field("listeners", &self.listeners.len())
            .finish()
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self {
            events: VecDeque::new(),
            history_limit: None,
            listeners: BTreeMap::new(),
            next_subscription: 0,
        }
    }

    /// Keep at most `limit` events; the oldest are dropped first.
    pub fn with_history_limit(limit: usize) -> Self {
        Self {
            history_limit: Some(limit),
            ..Self::new()
        }
    }

    pub fn subscribe(&mut self, listener: impl FnMut(&E) + 'static) -> Subscription {
        let id = self.next_subscription;
        self.next_subscription += 1;
        self.listeners.insert(id, Box::new(listener));
        Subscription(id)
    }

    /// Returns `true` if the subscription was still registered.
    pub fn unsubscribe(&mut self, subscription: Subscription) -> bool {
        self.listeners.remove(&subscription.0).is_some()
    }

    pub fn emit(&mut self, frame: Frame, payload: E) {
        for listener in self.listeners.values_mut() {
            listener(&payload);
        }

        if self.history_limit == Some(0) {
            return;
        }
        self.events.push_back(Event {
            frame_index: frame.index,
            payload,
        });
        if let Some(limit) = self.history_limit {
            while self.events.len() > limit {
                self.events.pop_front();
            }
        }
    }

    pub fn events(&self) -> impl Iterator<Item = &Event<E>> + '_ {
        self.events.iter()
    }

    pub fn drain(&mut self) -> Vec<Event<E>> {
        self.events.drain(..).collect()
    }
}
