//! Event bus
//!
//! Listeners are called synchronously on the publishing thread, in the
//! order they subscribed. A process-wide bus is available through
//! [`event_bus`] for callers that do not own one.

use parking_lot::RwLock;
use std::fmt;
use std::sync::OnceLock;
use uuid::Uuid;

use super::events::{AppEvent, EventCategory};

/// Handle returned by [`EventBus::subscribe`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(Uuid);

impl fmt::Display for SubscriptionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "listener-{}", self.0.simple())
    }
}

/// Which events a listener wants
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum EventFilter {
    #[default]
    All,
    /// Events in any of these categories
    Categories(Vec<EventCategory>),
}

impl EventFilter {
    pub fn matches(&self, event: &AppEvent) -> bool {
        match self {
            EventFilter::All => true,
            EventFilter::Categories(categories) => categories.contains(&event.category()),
        }
    }
}

type Listener = Box<dyn Fn(&AppEvent) + Send + Sync>;

struct Subscription {
    id: SubscriptionId,
    filter: EventFilter,
    listener: Listener,
}

/// Ordered list of filtered listeners
#[derive(Default)]
pub struct EventBus {
    subscriptions: RwLock<Vec<Subscription>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver `event` to every matching listener.
    ///
    /// Returns how many listeners received it. Listeners must not subscribe
    /// or unsubscribe from inside the callback.
    pub fn publish(&self, event: &AppEvent) -> usize {
        let subscriptions = self.subscriptions.read();
        let mut delivered = 0;
        for subscription in subscriptions.iter().filter(|s| s.filter.matches(event)) {
            (subscription.listener)(event);
            delivered += 1;
        }
        tracing::trace!("{} delivered to {} listeners", event.description(), delivered);
        delivered
    }

    /// Add a listener for events passing `filter`
    pub fn subscribe<F>(&self, filter: EventFilter, listener: F) -> SubscriptionId
    where
        F: Fn(&AppEvent) + Send + Sync + 'static,
    {
        let id = SubscriptionId(Uuid::new_v4());
        self.subscriptions.write().push(Subscription {
            id,
            filter,
            listener: Box::new(listener),
        });
        tracing::debug!("Added {}", id);
        id
    }

    /// Remove a listener. Returns false if it was already gone.
    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        let mut subscriptions = self.subscriptions.write();
        let before = subscriptions.len();
        subscriptions.retain(|s| s.id != id);
        subscriptions.len() != before
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscriptions.read().len()
    }
}

impl fmt::Debug for EventBus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EventBus")
            .field("subscribers", &self.subscriber_count())
            .finish()
    }
}

static EVENT_BUS: OnceLock<EventBus> = OnceLock::new();

/// The process-wide bus
pub fn event_bus() -> &'static EventBus {
    EVENT_BUS.get_or_init(EventBus::new)
}
