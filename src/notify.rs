//! Change notifications
//!
//! The clock publishes one [`ModelChanged`] per completed tick. Nothing else
//! travels with it: observers pull whatever they draw from the controller.

use crossbeam_channel::{Receiver, Sender, TrySendError, bounded};
use parking_lot::Mutex;

/// A tick completed and the state may have changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ModelChanged {
    /// Tick counter of the committed state
    pub tick: u64,
}

/// Notifications a subscriber may fall behind by before new ones are dropped
pub const SUBSCRIBER_BACKLOG: usize = 64;

type Callback = Box<dyn Fn(ModelChanged) + Send + Sync>;

/// Callback registry plus channel subscribers
#[derive(Default)]
pub struct ChangeNotifier {
    callbacks: Mutex<Vec<Callback>>,
    subscribers: Mutex<Vec<Sender<ModelChanged>>>,
}

impl ChangeNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a callback run on the clock thread after each tick.
    /// Callbacks must not register further callbacks.
    pub fn on_change(&self, callback: impl Fn(ModelChanged) + Send + Sync + 'static) {
        self.callbacks.lock().push(Box::new(callback));
    }

    /// Receive notifications on a channel. A subscriber that stops reading
    /// misses notifications once `SUBSCRIBER_BACKLOG` are queued.
    pub fn subscribe(&self) -> Receiver<ModelChanged> {
        let (tx, rx) = bounded(SUBSCRIBER_BACKLOG);
        self.subscribers.lock().push(tx);
        rx
    }

    /// Publish a notification; dropped receivers are forgotten
    pub fn publish(&self, change: ModelChanged) {
        for callback in self.callbacks.lock().iter() {
            callback(change);
        }
        self.subscribers.lock().retain(|tx| match tx.try_send(change) {
            Ok(()) | Err(TrySendError::Full(_)) => true,
            Err(TrySendError::Disconnected(_)) => false,
        });
    }

    #[cfg(test)]
    fn subscriber_count(&self) -> usize {
        self.subscribers.lock().len()
    }
}

impl std::fmt::Debug for ChangeNotifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeNotifier")
            .field("callbacks", &self.callbacks.lock().len())
            .field("subscribers", &self.subscribers.lock().len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU64, Ordering};

    #[test]
    fn test_callbacks_and_channels() {
        let notifier = ChangeNotifier::new();
        let last = Arc::new(AtomicU64::new(0));
        let seen = last.clone();
        notifier.on_change(move |change| seen.store(change.tick, Ordering::SeqCst));
        let rx = notifier.subscribe();

        notifier.publish(ModelChanged { tick: 1 });
        notifier.publish(ModelChanged { tick: 2 });

        assert_eq!(last.load(Ordering::SeqCst), 2);
        assert_eq!(rx.try_recv(), Ok(ModelChanged { tick: 1 }));
        assert_eq!(rx.try_recv(), Ok(ModelChanged { tick: 2 }));
        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn test_dropped_subscriber_is_pruned() {
        let notifier = ChangeNotifier::new();
        let keep = notifier.subscribe();
        drop(notifier.subscribe());
        assert_eq!(notifier.subscriber_count(), 2);

        notifier.publish(ModelChanged { tick: 7 });
        assert_eq!(notifier.subscriber_count(), 1);
        assert_eq!(keep.recv(), Ok(ModelChanged { tick: 7 }));
    }

    #[test]
    fn test_idle_subscriber_backlog_is_capped() {
        let notifier = ChangeNotifier::new();
        let idle = notifier.subscribe();
        for tick in 1..=(SUBSCRIBER_BACKLOG as u64 * 3) {
            notifier.publish(ModelChanged { tick });
        }
        assert_eq!(idle.len(), SUBSCRIBER_BACKLOG);
        // Oldest kept, overflow dropped, subscriber still registered
        assert_eq!(idle.recv(), Ok(ModelChanged { tick: 1 }));
        assert_eq!(notifier.subscriber_count(), 1);

        notifier.publish(ModelChanged { tick: 1_000 });
        let last = idle.try_iter().last();
        assert_eq!(last, Some(ModelChanged { tick: 1_000 }));
    }
}
