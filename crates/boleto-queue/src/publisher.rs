//! # Queue Publisher
//!
//! The transport seam between the dispatcher and the downstream queue.
//!
//! Redis lists act as the queue: producers `RPUSH`, workers `BLPOP`, giving
//! FIFO delivery to any number of competing consumers.

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::OnceCell;
use tracing::{debug, info};

use crate::error::{QueueError, QueueResult};

// =============================================================================
// Publisher Trait
// =============================================================================

/// Sends a text message to a named queue.
#[async_trait]
pub trait QueuePublisher: Send + Sync {
    /// Name of the destination queue.
    fn queue_name(&self) -> &str;

    /// Publishes one message.
    async fn publish(&self, message: &str) -> QueueResult<()>;
}

// =============================================================================
// Redis Publisher
// =============================================================================

/// Publishes to a Redis list.
///
/// The connection is opened on first publish, so the API starts even while
/// Redis is unreachable; `ConnectionManager` reconnects on its own afterwards.
pub struct RedisQueuePublisher {
    client: redis::Client,
    queue_name: String,
    connection: OnceCell<ConnectionManager>,
}

impl RedisQueuePublisher {
    /// Creates a publisher for `queue_name` on the server at `target`
    /// (`redis://host:port/db`).
    ///
    /// Only the target's syntax is checked here; no connection is made.
    pub fn new(target: &str, queue_name: impl Into<String>) -> QueueResult<Self> {
        let client =
            redis::Client::open(target).map_err(|e| QueueError::InvalidTarget(e.to_string()))?;

        Ok(RedisQueuePublisher {
            client,
            queue_name: queue_name.into(),
            connection: OnceCell::new(),
        })
    }

    /// Returns the shared connection, opening it if needed.
    async fn connection(&self) -> QueueResult<ConnectionManager> {
        let manager = self
            .connection
            .get_or_try_init(|| async {
                let manager = self
                    .client
                    .get_connection_manager()
                    .await
                    .map_err(|e| QueueError::Connection(e.to_string()))?;
                info!(queue = %self.queue_name, "Connected to queue server");
                Ok::<_, QueueError>(manager)
            })
            .await?;

        Ok(manager.clone())
    }
}

#[async_trait]
impl QueuePublisher for RedisQueuePublisher {
    fn queue_name(&self) -> &str {
        &self.queue_name
    }

    async fn publish(&self, message: &str) -> QueueResult<()> {
        let mut conn = self.connection().await?;

        let depth: usize = conn
            .rpush(&self.queue_name, message)
            .await
            .map_err(|e| QueueError::Publish {
                queue: self.queue_name.clone(),
                reason: e.to_string(),
            })?;

        debug!(queue = %self.queue_name, depth, "Message pushed");
        Ok(())
    }
}
