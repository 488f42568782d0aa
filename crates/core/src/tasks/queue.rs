//! Main thread task queue
//!
//! Background threads post closures through a [`TaskSender`]; the owning
//! thread runs them by calling [`TaskQueue::process_queued_tasks`] or
//! [`TaskQueue::wait_and_process`] from its loop.

use std::time::Duration;

use crossbeam_channel::{bounded, Receiver, RecvTimeoutError, Sender, TrySendError};

use super::TaskError;

/// A task to execute on the main thread
pub type Task = Box<dyn FnOnce() + Send + 'static>;

/// Default capacity of a task queue
pub const DEFAULT_CAPACITY: usize = 1024;

/// Receiving side of a main thread task queue
///
/// Owned by the thread that runs the tasks. Dropping it disconnects every
/// [`TaskSender`].
pub struct TaskQueue {
    sender: Sender<Task>,
    receiver: Receiver<Task>,
    capacity: usize,
}

/// Cloneable handle for posting tasks to a [`TaskQueue`]
#[derive(Clone)]
pub struct TaskSender {
    sender: Sender<Task>,
}

impl TaskQueue {
    /// Create a queue holding at most `capacity` pending tasks
    ///
    /// A capacity of 0 is raised to 1.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (sender, receiver) = bounded(capacity);
        Self {
            sender,
            receiver,
            capacity,
        }
    }

    /// Get a handle that can post tasks from any thread
    pub fn sender(&self) -> TaskSender {
        TaskSender {
            sender: self.sender.clone(),
        }
    }

    /// Process all queued tasks
    ///
    /// Runs at most `capacity` tasks per call, so tasks that post further
    /// tasks cannot starve the caller. Returns the number of tasks processed.
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn process_queued_tasks(&self) -> usize {
        let mut count = 0;

        while let Ok(task) = self.receiver.try_recv() {
            task();
            count += 1;

            if count >= self.capacity {
                break;
            }
        }

        count
    }

    /// Wait up to `timeout` for a task, then process everything queued
    ///
    /// Returns the number of tasks processed (0 on timeout).
    #[tracing::instrument(level = "trace", skip(self))]
    pub fn wait_and_process(&self, timeout: Duration) -> usize {
        match self.receiver.recv_timeout(timeout) {
            Ok(task) => {
                task();
                1 + self.process_queued_tasks()
            }
            Err(RecvTimeoutError::Timeout) => 0,
            // We hold a sender ourselves, so this cannot happen while `self` lives
            Err(RecvTimeoutError::Disconnected) => 0,
        }
    }

    /// Check how many tasks are currently queued
    pub fn queued_task_count(&self) -> usize {
        self.receiver.len()
    }

    /// Maximum number of pending tasks
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

impl Default for TaskQueue {
    fn default() -> Self {
        Self::new(DEFAULT_CAPACITY)
    }
}

impl std::fmt::Debug for TaskQueue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskQueue")
            .field("queued", &self.receiver.len())
            .field("capacity", &self.capacity)
            .finish()
    }
}

impl TaskSender {
    /// Queue a task to execute on the owning thread
    ///
    /// This is safe to call from any thread and never blocks.
    ///
    /// # Errors
    /// - [`TaskError::QueueFull`] if the queue is full (task is dropped)
    /// - [`TaskError::Disconnected`] if the [`TaskQueue`] is gone
    #[tracing::instrument(skip(task))]
    pub fn queue_task<F>(&self, task: F) -> Result<(), TaskError>
    where
        F: FnOnce() + Send + 'static,
    {
        match self.sender.try_send(Box::new(task)) {
            Ok(()) => Ok(()),
            Err(TrySendError::Full(_)) => {
                tracing::warn!("Task queue full, dropping task");
                Err(TaskError::QueueFull)
            }
            Err(TrySendError::Disconnected(_)) => {
                tracing::error!("Task queue disconnected");
                Err(TaskError::Disconnected)
            }
        }
    }

    /// Queue a task, blocking if the queue is full
    ///
    /// # Warning
    /// Only call from background threads, never from the owning thread
    /// (would deadlock if the queue is full and waiting to be processed)
    #[tracing::instrument(skip(task))]
    pub fn queue_task_blocking<F>(&self, task: F) -> Result<(), TaskError>
    where
        F: FnOnce() + Send + 'static,
    {
        self.sender.send(Box::new(task)).map_err(|e| {
            tracing::error!("Failed to queue task (blocking): {}", e);
            TaskError::Disconnected
        })
    }
}

impl std::fmt::Debug for TaskSender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TaskSender")
            .field("queued", &self.sender.len())
            .finish()
    }
}
