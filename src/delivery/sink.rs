//! Async consumers of rich messages

use super::queue::{DeliveryQueue, DeliveryReceiver, QueueCapacity};
use crate::appenders::QueueAppender;
use crate::core::{LogLevel, Logger, Result};
use crate::formatters::RichMessage;
use async_trait::async_trait;
use tokio::task::JoinHandle;

/// Destination for notifications, such as a chat channel
///
/// # Example
///
/// ```no_run
/// use rust_logging_kit::delivery::NotificationSink;
/// use rust_logging_kit::formatters::RichMessage;
/// use rust_logging_kit::Result;
/// use async_trait::async_trait;
///
/// struct AlertsChannel;
///
/// #[async_trait]
/// impl NotificationSink for AlertsChannel {
///     async fn send(&self, message: RichMessage) -> Result<()> {
///         println!("{}", message.to_json()?);
///         Ok(())
///     }
///
///     fn name(&self) -> &str {
///         "alerts"
///     }
/// }
/// ```
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn send(&self, message: RichMessage) -> Result<()>;

    fn name(&self) -> &str;
}

/// Forward every queued message to `sink` until the queue closes
///
/// Failed sends are reported on stderr and not retried.
pub fn spawn_delivery_worker<S>(
    mut receiver: DeliveryReceiver<RichMessage>,
    sink: S,
) -> JoinHandle<()>
where
    S: NotificationSink + 'static,
{
    tokio::spawn(async move {
        while let Some(message) = receiver.pop().await {
            if let Err(e) = sink.send(message).await {
                eprintln!(
                    "[LOGGER ERROR] Notification sink '{}' failed: {}",
                    sink.name(),
                    e
                );
            }
        }
    })
}

/// Route entries at or above `level` from `logger` to `sink`
///
/// Must be called from within a tokio runtime; the worker runs on it.
pub fn register_notification_handler<S>(
    logger: &Logger,
    sink: S,
    level: LogLevel,
    capacity: QueueCapacity,
) -> JoinHandle<()>
where
    S: NotificationSink + 'static,
{
    let (sender, receiver) = DeliveryQueue::new(capacity);
    logger.add_appender(Box::new(QueueAppender::new(sender).with_min_level(level)));
    spawn_delivery_worker(receiver, sink)
}
