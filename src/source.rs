//! Injected event sources
//!
//! Platform listeners (motion sensors, hardware keyboards) sit behind
//! [`EventSource`] so the keyboard core can be driven by a test feed or by the
//! window event loop alike. A subscription is a receiving end that the owner
//! drains on its own loop; unsubscribing drops it and stops delivery.

use std::fmt;
use std::sync::mpsc::{self, Receiver, Sender, TryIter};

/// Why a source refused a subscription
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceError {
    /// The platform has no such sensor or API
    Unsupported,
    /// The user declined the permission prompt
    PermissionDenied,
}

impl fmt::Display for SourceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SourceError::Unsupported => write!(f, "input source is not supported on this device"),
            SourceError::PermissionDenied => write!(f, "permission to read the input source was denied"),
        }
    }
}

impl std::error::Error for SourceError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SubscriptionId(u64);

/// Receiving end of a source subscription
pub struct Subscription<E> {
    id: SubscriptionId,
    receiver: Receiver<E>,
}

impl<E> Subscription<E> {
    pub fn id(&self) -> SubscriptionId {
        self.id
    }

    /// Pending events in delivery order, without blocking
    pub fn drain(&self) -> TryIter<'_, E> {
        self.receiver.try_iter()
    }
}

pub trait EventSource<E> {
    fn subscribe(&mut self) -> Result<Subscription<E>, SourceError>;

    fn unsubscribe(&mut self, subscription: Subscription<E>);
}

/// Source fed by whoever owns it: the window loop, a simulator, or a test
pub struct ChannelSource<E> {
    availability: Result<(), SourceError>,
    subscribers: Vec<(SubscriptionId, Sender<E>)>,
    next_id: u64,
}

impl<E: Clone> ChannelSource<E> {
    pub fn new() -> Self {
        Self {
            availability: Ok(()),
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    /// A source whose every subscription attempt fails with `error`
    pub fn unavailable(error: SourceError) -> Self {
        Self {
            availability: Err(error),
            ..Self::new()
        }
    }

    pub fn is_available(&self) -> bool {
        self.availability.is_ok()
    }

    pub fn subscriber_count(&self) -> usize {
        self.subscribers.len()
    }

    /// Deliver `event` to every live subscriber. Returns how many received it.
    pub fn emit(&mut self, event: E) -> usize {
        self.subscribers
            .retain(|(_, sender)| sender.send(event.clone()).is_ok());
        self.subscribers.len()
    }
}

impl<E: Clone> Default for ChannelSource<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: Clone> EventSource<E> for ChannelSource<E> {
    fn subscribe(&mut self) -> Result<Subscription<E>, SourceError> {
        self.availability?;
        let (sender, receiver) = mpsc::channel();
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, sender));
        Ok(Subscription { id, receiver })
    }

    fn unsubscribe(&mut self, subscription: Subscription<E>) {
        self.subscribers.retain(|(id, _)| *id != subscription.id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_events_arrive_in_order() {
        let mut source: ChannelSource<String> = ChannelSource::new();
        let sub = source.subscribe().unwrap();
        source.emit("a".to_string());
        source.emit("Enter".to_string());
        let events: Vec<String> = sub.drain().collect();
        assert_eq!(events, vec!["a", "Enter"]);
        assert_eq!(sub.drain().count(), 0);
    }

    #[test]
    fn test_unsubscribe_stops_delivery() {
        let mut source: ChannelSource<u8> = ChannelSource::new();
        let first = source.subscribe().unwrap();
        let second = source.subscribe().unwrap();
        assert_ne!(first.id(), second.id());
        source.unsubscribe(first);
        assert_eq!(source.emit(1u8), 1);
        assert_eq!(second.drain().collect::<Vec<_>>(), vec![1]);
    }

    #[test]
    fn test_dropped_subscription_is_pruned() {
        let mut source: ChannelSource<f32> = ChannelSource::new();
        drop(source.subscribe().unwrap());
        assert_eq!(source.emit(0.5f32), 0);
        assert_eq!(source.subscriber_count(), 0);
    }

    #[test]
    fn test_unavailable_source_refuses() {
        let mut source: ChannelSource<f32> =
            ChannelSource::unavailable(SourceError::PermissionDenied);
        assert!(!source.is_available());
        assert_eq!(source.subscribe().err(), Some(SourceError::PermissionDenied));
        assert_eq!(source.emit(1.0), 0);
    }
}
