//! Asynchronous delivery of rich messages to notification sinks

pub mod queue;
pub mod sink;

pub use queue::{DeliveryQueue, DeliveryReceiver, DeliverySender, QueueCapacity};
pub use sink::{register_notification_handler, spawn_delivery_worker, NotificationSink};
