//! # boleto-queue: Downstream Queue Publishing
//!
//! Hands generated barcodes to the downstream work queue without ever
//! holding up, or failing, the HTTP request that produced them.
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  ┌────────────────┐   enqueue()    ┌──────────────────────────────┐    │
//! │  │ DispatchHandle │ ─────────────► │ PublishDispatcher (task)     │    │
//! │  │ (cloned into   │  try_send on   │                              │    │
//! │  │  HTTP state)   │  bounded mpsc  │  loop {                      │    │
//! │  └────────────────┘                │    recv message              │    │
//! │          │                         │    publisher.publish(msg)    │    │
//! │          │ shutdown()              │    log ok / warn on error    │    │
//! │          └───────────────────────► │  }                           │    │
//! │                                    │  drain remaining, exit       │    │
//! │                                    └──────────────┬───────────────┘    │
//! │                                                   │                     │
//! │                                    ┌──────────────▼───────────────┐    │
//! │                                    │ dyn QueuePublisher           │    │
//! │                                    │  RedisQueuePublisher (RPUSH) │    │
//! │                                    └──────────────────────────────┘    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`publisher`] - `QueuePublisher` trait and the Redis implementation
//! - [`dispatcher`] - Background publishing task and its handle
//! - [`error`] - Queue error types

pub mod dispatcher;
pub mod error;
pub mod publisher;

pub use dispatcher::{DispatchHandle, DispatchSummary, PublishDispatcher};
pub use error::{QueueError, QueueResult};
pub use publisher::{QueuePublisher, RedisQueuePublisher};

/// Queue name used when none is configured.
pub const DEFAULT_QUEUE_NAME: &str = "gerador-codigo-barras";
