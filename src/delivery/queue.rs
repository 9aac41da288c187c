//! FIFO hand-off between synchronous logging calls and an async consumer
//!
//! Producers run inside logging calls and must never wait, so
//! [`DeliverySender::push`] neither blocks nor fails. The consumer side
//! awaits items with [`DeliveryReceiver::pop`].

use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tokio::sync::mpsc::{self, error::TrySendError};

/// Queue size limit
///
/// # Example
///
/// ```
/// use rust_logging_kit::delivery::QueueCapacity;
///
/// // Default: the queue grows as needed
/// let capacity = QueueCapacity::default();
///
/// // Keep at most 1000 pending messages, drop the rest
/// let capacity = QueueCapacity::Bounded(1000);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum QueueCapacity {
    #[default]
    Unbounded,
    /// Items pushed while the queue is full are dropped and counted
    Bounded(usize),
}

enum SenderInner<T> {
    Unbounded(mpsc::UnboundedSender<T>),
    Bounded(mpsc::Sender<T>),
}

impl<T> Clone for SenderInner<T> {
    fn clone(&self) -> Self {
        match self {
            SenderInner::Unbounded(tx) => SenderInner::Unbounded(tx.clone()),
            SenderInner::Bounded(tx) => SenderInner::Bounded(tx.clone()),
        }
    }
}

enum ReceiverInner<T> {
    Unbounded(mpsc::UnboundedReceiver<T>),
    Bounded(mpsc::Receiver<T>),
}

/// Producer half; cheap to clone
pub struct DeliverySender<T> {
    inner: SenderInner<T>,
    dropped: Arc<AtomicU64>,
}

impl<T> Clone for DeliverySender<T> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            dropped: Arc::clone(&self.dropped),
        }
    }
}

/// Consumer half
pub struct DeliveryReceiver<T> {
    inner: ReceiverInner<T>,
}

pub struct DeliveryQueue;

impl DeliveryQueue {
    /// Create a connected sender/receiver pair
    ///
    /// A bounded capacity of zero is treated as one, the smallest queue
    /// tokio can build.
    pub fn new<T>(capacity: QueueCapacity) -> (DeliverySender<T>, DeliveryReceiver<T>) {
        let (tx, rx) = match capacity {
            QueueCapacity::Unbounded => {
                let (tx, rx) = mpsc::unbounded_channel();
                (SenderInner::Unbounded(tx), ReceiverInner::Unbounded(rx))
            }
            QueueCapacity::Bounded(n) => {
                let (tx, rx) = mpsc::channel(n.max(1));
                (SenderInner::Bounded(tx), ReceiverInner::Bounded(rx))
            }
        };

        (
            DeliverySender {
                inner: tx,
                dropped: Arc::new(AtomicU64::new(0)),
            },
            DeliveryReceiver { inner: rx },
        )
    }
}

impl<T> DeliverySender<T> {
    /// Enqueue without waiting
    ///
    /// Once the receiver is gone this is a no-op. On a full bounded queue the
    /// item is dropped and counted.
    pub fn push(&self, item: T) {
        match self.inner {
            SenderInner::Unbounded(ref tx) => {
                let _ = tx.send(item);
            }
            SenderInner::Bounded(ref tx) => match tx.try_send(item) {
                Ok(()) | Err(TrySendError::Closed(_)) => {}
                Err(TrySendError::Full(_)) => {
                    self.dropped.fetch_add(1, Ordering::Relaxed);
                }
            },
        }
    }

    /// Items dropped because a bounded queue was full
    pub fn dropped_count(&self) -> u64 {
        self.dropped.load(Ordering::Relaxed)
    }

    pub fn is_closed(&self) -> bool {
        match self.inner {
            SenderInner::Unbounded(ref tx) => tx.is_closed(),
            SenderInner::Bounded(ref tx) => tx.is_closed(),
        }
    }
}

impl<T> DeliveryReceiver<T> {
    /// Wait for the next item in push order
    ///
    /// Returns `None` once every sender has been dropped and the queue is
    /// drained.
    pub async fn pop(&mut self) -> Option<T> {
        match self.inner {
            ReceiverInner::Unbounded(ref mut rx) => rx.recv().await,
            ReceiverInner::Bounded(ref mut rx) => rx.recv().await,
        }
    }

    pub fn try_pop(&mut self) -> Option<T> {
        match self.inner {
            ReceiverInner::Unbounded(ref mut rx) => rx.try_recv().ok(),
            ReceiverInner::Bounded(ref mut rx) => rx.try_recv().ok(),
        }
    }

    /// Stop accepting new items; already queued items can still be popped
    pub fn close(&mut self) {
        match self.inner {
            ReceiverInner::Unbounded(ref mut rx) => rx.close(),
            ReceiverInner::Bounded(ref mut rx) => rx.close(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_fifo_order() {
        let (tx, mut rx) = DeliveryQueue::new(QueueCapacity::Unbounded);
        for i in 0..5 {
            tx.push(i);
        }
        for i in 0..5 {
            assert_eq!(rx.pop().await, Some(i));
        }
    }

    #[tokio::test]
    async fn test_bounded_overflow_drops_newest() {
        let (tx, mut rx) = DeliveryQueue::new(QueueCapacity::Bounded(2));
        tx.push("a");
        tx.push("b");
        tx.push("c");

        assert_eq!(tx.dropped_count(), 1);
        assert_eq!(rx.try_pop(), Some("a"));
        assert_eq!(rx.try_pop(), Some("b"));
        assert_eq!(rx.try_pop(), None);
    }

    #[tokio::test]
    async fn test_push_after_receiver_dropped() {
        let (tx, rx) = DeliveryQueue::new::<u32>(QueueCapacity::Bounded(1));
        drop(rx);
        tx.push(1);
        tx.push(2);
        assert!(tx.is_closed());
        assert_eq!(tx.dropped_count(), 0);
    }

    #[tokio::test]
    async fn test_pop_ends_when_senders_gone() {
        let (tx, mut rx) = DeliveryQueue::new(QueueCapacity::Unbounded);
        let tx2 = tx.clone();
        tx.push(1);
        drop(tx);
        drop(tx2);

        assert_eq!(rx.pop().await, Some(1));
        assert_eq!(rx.pop().await, None);
    }

    #[test]
    fn test_pop_pending_until_push() {
        let (tx, mut rx) = DeliveryQueue::new(QueueCapacity::Unbounded);
        let mut pop = tokio_test::task::spawn(rx.pop());

        tokio_test::assert_pending!(pop.poll());
        tx.push(5);
        assert!(pop.is_woken());
        tokio_test::assert_ready_eq!(pop.poll(), Some(5));
    }

    #[tokio::test]
    async fn test_close_keeps_queued_items() {
        for capacity in [QueueCapacity::Unbounded, QueueCapacity::Bounded(4)] {
            let (tx, mut rx) = DeliveryQueue::new(capacity);
            tx.push("queued");
            rx.close();

            tx.push("late");
            assert!(tx.is_closed());
            assert_eq!(tx.dropped_count(), 0);
            assert_eq!(rx.pop().await, Some("queued"));
            assert_eq!(rx.pop().await, None);
        }
    }

    #[test]
    fn test_zero_capacity_still_holds_one() {
        let (tx, mut rx) = DeliveryQueue::new(QueueCapacity::Bounded(0));
        tx.push(7);
        assert_eq!(rx.try_pop(), Some(7));
    }
}
