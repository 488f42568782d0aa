//! Command queue for one-shot events
//!
//! A [`CommandQueue`] buffers commands sent from any thread and delivers
//! them, in order, to at most one attached receiver. Commands sent while no
//! receiver is attached (or while the queue is paused) are kept in a backlog
//! and drained as soon as delivery becomes possible again.
//!
//! # Example
//!
//! ```
//! use std::sync::Arc;
//! use parking_lot::Mutex;
//! use commandqueue_core::CommandQueue;
//!
//! let queue = CommandQueue::new();
//! queue.send(1);
//! queue.send(2);
//!
//! let seen = Arc::new(Mutex::new(Vec::new()));
//! let sink = Arc::clone(&seen);
//! queue.set_receiver(move |command: u32| sink.lock().push(command));
//! assert_eq!(*seen.lock(), vec![1, 2]);
//!
//! queue.detach_receiver();
//! queue.send(3);
//! assert_eq!(queue.pending_count(), 1);
//! ```
//!
//! # Locking
//!
//! All mutating operations are serialized by a re-entrant delivery lock, so
//! a receiver may call back into the queue from `receive_command`. Such
//! nested calls never deliver recursively: they only touch the backlog and
//! receiver slot, and the outer drain picks the result up in order.
//!
//! Receivers run with the delivery lock held. A receiver that blocks on
//! another thread which is itself sending to the same queue will deadlock.

mod builder;
mod receiver;

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::{Mutex, ReentrantMutex};

pub use builder::CommandQueueBuilder;
pub use receiver::Receiver;

use builder::CommandFilter;
use receiver::SharedReceiver;

/// Backlog, receiver slot and delivery flags, guarded together
struct QueueState<T> {
    backlog: VecDeque<T>,
    receiver: Option<SharedReceiver<T>>,
    paused: bool,
    /// Set while a receiver callback is running
    emitting: bool,
    limit: Option<usize>,
    filter: Option<CommandFilter<T>>,
}

impl<T> QueueState<T> {
    /// A receiver is attached and delivery is not paused
    fn can_deliver(&self) -> bool {
        self.receiver.is_some() && !self.paused
    }

    fn can_emit(&self) -> bool {
        self.can_deliver() && !self.emitting
    }

    fn admits(&mut self, command: &T) -> bool {
        match self.filter.as_mut() {
            Some(filter) => filter(command),
            None => true,
        }
    }
}

/// Single-receiver mailbox that never loses a command
///
/// See the [module documentation](self) for the delivery rules.
pub struct CommandQueue<T> {
    delivery: ReentrantMutex<()>,
    state: Mutex<QueueState<T>>,
}

impl<T> CommandQueue<T> {
    /// Create an unbounded queue with no receiver
    pub fn new() -> Self {
        Self::with_parts(None, None)
    }

    /// Start building a queue with a limit or duplicate suppression
    pub fn builder() -> CommandQueueBuilder<T> {
        CommandQueueBuilder::new()
    }

    fn with_parts(limit: Option<usize>, filter: Option<CommandFilter<T>>) -> Self {
        Self {
            delivery: ReentrantMutex::new(()),
            state: Mutex::new(QueueState {
                backlog: VecDeque::new(),
                receiver: None,
                paused: false,
                emitting: false,
                limit,
                filter,
            }),
        }
    }

    /// Send a command
    ///
    /// Delivered immediately if a receiver is attached and the queue is not
    /// paused, otherwise appended to the backlog.
    pub fn send(&self, command: T) {
        let _delivery = self.delivery.lock();

        {
            let mut state = self.state.lock();
            // Commands sent from inside a callback are picked up by the running drain
            if !state.can_deliver() {
                if let Some(limit) = state.limit {
                    if state.backlog.len() >= limit {
                        tracing::warn!("Command backlog full ({} queued), dropping command", limit);
                        return;
                    }
                }
            }
            state.backlog.push_back(command);
        }

        self.drain();
    }

    /// Attach a receiver, replacing any current one
    ///
    /// Every queued command is delivered to `receiver` before this returns.
    pub fn set_receiver<R>(&self, receiver: R)
    where
        R: Receiver<T> + 'static,
    {
        let _delivery = self.delivery.lock();

        {
            let mut state = self.state.lock();
            let replaced = state.receiver.replace(Arc::new(receiver)).is_some();
            tracing::debug!(
                "Receiver {} ({} commands pending)",
                if replaced { "replaced" } else { "attached" },
                state.backlog.len()
            );
        }

        self.drain();
    }

    /// Detach the current receiver
    ///
    /// Commands sent afterwards are queued. Does nothing if no receiver is
    /// attached.
    pub fn detach_receiver(&self) {
        let _delivery = self.delivery.lock();

        if self.state.lock().receiver.take().is_some() {
            tracing::debug!("Receiver detached");
        }
    }

    /// Returns true if a receiver is attached
    pub fn has_receiver(&self) -> bool {
        self.state.lock().receiver.is_some()
    }

    /// Pause or resume delivery
    ///
    /// A paused queue keeps its receiver but queues every command. Resuming
    /// with a receiver attached drains the backlog.
    pub fn set_paused(&self, paused: bool) {
        let _delivery = self.delivery.lock();

        let was_paused = std::mem::replace(&mut self.state.lock().paused, paused);
        if was_paused != paused {
            tracing::debug!("Queue {}", if paused { "paused" } else { "resumed" });
        }

        if was_paused && !paused {
            self.drain();
        }
    }

    /// Returns true if delivery is paused
    pub fn is_paused(&self) -> bool {
        self.state.lock().paused
    }

    /// Number of commands waiting in the backlog
    pub fn pending_count(&self) -> usize {
        self.state.lock().backlog.len()
    }

    /// Returns true if the backlog is empty
    pub fn is_empty(&self) -> bool {
        self.state.lock().backlog.is_empty()
    }

    /// Deliver backlog commands until the backlog is empty or delivery
    /// becomes impossible.
    ///
    /// Must be called with the delivery lock held. The receiver is re-read on
    /// every iteration, so a receiver swapped from inside a callback takes
    /// over the rest of the backlog.
    fn drain(&self) {
        loop {
            let (receiver, command) = {
                let mut state = self.state.lock();
                if !state.can_emit() {
                    return;
                }
                let Some(receiver) = state.receiver.clone() else {
                    return;
                };
                let Some(command) = state.backlog.pop_front() else {
                    return;
                };
                if !state.admits(&command) {
                    tracing::trace!("Skipping duplicate command");
                    continue;
                }
                state.emitting = true;
                (receiver, command)
            };

            let _emitting = EmittingGuard { state: &self.state };
            tracing::trace!("Delivering command");
            receiver.receive_command(command);
        }
    }
}

/// Clears the emitting flag when a callback returns or unwinds
struct EmittingGuard<'a, T> {
    state: &'a Mutex<QueueState<T>>,
}

impl<T> Drop for EmittingGuard<'_, T> {
    fn drop(&mut self) {
        self.state.lock().emitting = false;
    }
}

impl<T> Default for CommandQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for CommandQueue<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.lock();
        f.debug_struct("CommandQueue")
            .field("pending", &state.backlog.len())
            .field("has_receiver", &state.receiver.is_some())
            .field("paused", &state.paused)
            .field("limit", &state.limit)
            .finish()
    }
}
