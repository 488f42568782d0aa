//! Task queue for main thread execution
//!
//! Allows background threads to post work to the thread that owns a
//! [`TaskQueue`] (typically the UI or main loop thread). Tasks run when that
//! thread pumps the queue.

pub mod queue;

pub use queue::*;

/// Errors returned when posting a task
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum TaskError {
    /// The queue is at capacity; the task was dropped
    #[error("Task queue full, task dropped")]
    QueueFull,

    /// The owning [`TaskQueue`] was dropped; the task will never run
    #[error("Task queue disconnected")]
    Disconnected,
}
