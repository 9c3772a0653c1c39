//! # Publish Dispatcher
//!
//! Background task that publishes queued messages one at a time.
//!
//! ## Dispatch Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Publish Dispatcher Flow                            │
//! │                                                                         │
//! │  HTTP handler                                                           │
//! │      │ handle.enqueue(json)                                             │
//! │      ├── buffer full   → Err(DispatcherFull)    (caller logs, moves on) │
//! │      ├── task stopped  → Err(DispatcherClosed)  (caller logs, moves on) │
//! │      └── accepted      → Ok(())                                         │
//! │                │                                                        │
//! │                ▼                                                        │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    PublishDispatcher::run                       │   │
//! │  │                                                                 │   │
//! │  │  1. Receive: next message from the bounded channel             │   │
//! │  │  2. Publish: publisher.publish(&message).await                 │   │
//! │  │  3. Record:  published += 1  |  failed += 1 (warn, no retry)   │   │
//! │  │  4. Shutdown: close channel, drain what is left, return stats  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;
use tracing::{info, warn};

use crate::error::{QueueError, QueueResult};
use crate::publisher::QueuePublisher;

// =============================================================================
// Dispatch Summary
// =============================================================================

/// Counters reported when the dispatcher stops.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchSummary {
    /// Messages the publisher accepted.
    pub published: u64,
    /// Messages the publisher rejected.
    pub failed: u64,
}

// =============================================================================
// Dispatch Handle
// =============================================================================

/// Handle for feeding and stopping a [`PublishDispatcher`].
#[derive(Clone)]
pub struct DispatchHandle {
    /// Sender for messages awaiting publication.
    message_tx: mpsc::Sender<String>,

    /// Shutdown sender.
    shutdown_tx: mpsc::Sender<()>,
}

impl DispatchHandle {
    /// Queues a message for publication without waiting.
    pub fn enqueue(&self, message: String) -> QueueResult<()> {
        self.message_tx.try_send(message).map_err(|e| match e {
            TrySendError::Full(_) => QueueError::DispatcherFull,
            TrySendError::Closed(_) => QueueError::DispatcherClosed,
        })
    }

    /// Triggers graceful shutdown. Already-queued messages are still published.
    pub async fn shutdown(&self) -> QueueResult<()> {
        self.shutdown_tx
            .send(())
            .await
            .map_err(|_| QueueError::DispatcherClosed)
    }
}

// =============================================================================
// Publish Dispatcher
// =============================================================================

/// Publishes messages in arrival order on a background task.
pub struct PublishDispatcher {
    /// Transport.
    publisher: Arc<dyn QueuePublisher>,

    /// Messages awaiting publication.
    message_rx: mpsc::Receiver<String>,

    /// Shutdown receiver.
    shutdown_rx: mpsc::Receiver<()>,

    /// Running counters.
    summary: DispatchSummary,
}

impl PublishDispatcher {
    /// Creates a dispatcher buffering up to `capacity` messages and returns
    /// its handle.
    pub fn new(publisher: Arc<dyn QueuePublisher>, capacity: usize) -> (Self, DispatchHandle) {
        let (message_tx, message_rx) = mpsc::channel(capacity.max(1));
        let (shutdown_tx, shutdown_rx) = mpsc::channel(1);

        let dispatcher = PublishDispatcher {
            publisher,
            message_rx,
            shutdown_rx,
            summary: DispatchSummary::default(),
        };

        let handle = DispatchHandle {
            message_tx,
            shutdown_tx,
        };

        (dispatcher, handle)
    }

    /// Runs until shutdown is requested or every handle is dropped.
    ///
    /// This should be spawned as a background task.
    pub async fn run(mut self) -> DispatchSummary {
        info!(queue = %self.publisher.queue_name(), "Publish dispatcher starting");

        loop {
            tokio::select! {
                message = self.message_rx.recv() => match message {
                    Some(message) => self.publish(message).await,
                    None => break,
                },

                _ = self.shutdown_rx.recv() => {
                    info!("Publish dispatcher shutting down");
                    break;
                }
            }
        }

        // Stop accepting, then flush what was already accepted.
        self.message_rx.close();
        while let Some(message) = self.message_rx.recv().await {
            self.publish(message).await;
        }

        info!(
            published = self.summary.published,
            failed = self.summary.failed,
            "Publish dispatcher stopped"
        );

        self.summary
    }

    /// Publishes one message. Failures are logged and dropped.
    async fn publish(&mut self, message: String) {
        let queue = self.publisher.queue_name().to_string();

        match self.publisher.publish(&message).await {
            Ok(()) => {
                self.summary.published += 1;
                info!(queue = %queue, bytes = message.len(), "Message sent to queue");
            }
            Err(e) => {
                self.summary.failed += 1;
                warn!(queue = %queue, error = %e, "Dropping message after failed publish");
            }
        }
    }
}

// =============================================================================
// Tests
// =============================================================================
