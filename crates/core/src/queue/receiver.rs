//! Receiver trait for command consumers

use std::sync::Arc;

/// A consumer of commands sent through a [`CommandQueue`](super::CommandQueue)
///
/// Implemented for every `Fn(T) + Send + Sync` closure, so most callers
/// simply pass a closure to `set_receiver`.
pub trait Receiver<T>: Send + Sync {
    /// Handle a single command
    fn receive_command(&self, command: T);
}

impl<T, F> Receiver<T> for F
where
    F: Fn(T) + Send + Sync,
{
    fn receive_command(&self, command: T) {
        self(command)
    }
}

/// Receiver as stored in the queue's receiver slot
pub(crate) type SharedReceiver<T> = Arc<dyn Receiver<T>>;
