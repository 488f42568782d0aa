//! Command Queue - Core
//!
//! Delivery of one-shot commands from background work to a consumer that
//! comes and goes, such as a UI screen that is rotated or backgrounded.
//!
//! - [`queue`] - the [`CommandQueue`] itself
//! - [`tasks`] - a main thread [`TaskQueue`] for posting work to the UI thread
//! - [`config`] - TOML configuration for the queue and applications

pub mod config;
pub mod queue;
pub mod tasks;

// Re-export commonly used items
pub use queue::{CommandQueue, CommandQueueBuilder, Receiver};
pub use tasks::{Task, TaskError, TaskQueue, TaskSender};

// Re-export config types
pub use config::{AppConfig, ConfigError, ConfigResult, CoreConfig, QueueConfig};
