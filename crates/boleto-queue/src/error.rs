//! # Queue Error Types
//!
//! ## Error Categories
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ┌─────────────────┐  ┌─────────────────┐  ┌─────────────────────────┐ │
//! │  │  Configuration  │  │   Transport     │  │     Dispatcher          │ │
//! │  │                 │  │                 │  │                         │ │
//! │  │  InvalidTarget  │  │  Connection     │  │  DispatcherFull         │ │
//! │  │                 │  │  Publish        │  │  DispatcherClosed       │ │
//! │  └─────────────────┘  └─────────────────┘  └─────────────────────────┘ │
//! │                                                                         │
//! │  None of these reach the HTTP client. They are logged and dropped.     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Result type alias for queue operations.
pub type QueueResult<T> = Result<T, QueueError>;

/// Queue publishing failures.
#[derive(Debug, Error)]
pub enum QueueError {
    // =========================================================================
    // Configuration Errors
    // =========================================================================
    /// The connection target could not be parsed.
    #[error("Invalid queue connection target: {0}")]
    InvalidTarget(String),

    // =========================================================================
    // Transport Errors
    // =========================================================================
    /// Could not reach the queue server.
    #[error("Queue connection failed: {0}")]
    Connection(String),

    /// The server rejected or dropped the message.
    #[error("Publish to {queue} failed: {reason}")]
    Publish { queue: String, reason: String },

    // =========================================================================
    // Dispatcher Errors
    // =========================================================================
    /// The dispatch buffer is full; the message was not accepted.
    #[error("Publish dispatcher buffer is full")]
    DispatcherFull,

    /// The dispatcher has stopped.
    #[error("Publish dispatcher is closed")]
    DispatcherClosed,
}
