//! Builder for configured command queues

use crate::config::QueueConfig;

use super::CommandQueue;

/// Delivery filter applied to each command as it leaves the backlog.
///
/// Returns `false` to skip the command.
pub(crate) type CommandFilter<T> = Box<dyn FnMut(&T) -> bool + Send>;

/// Builder for a [`CommandQueue`] with optional capacity limit and
/// duplicate suppression
///
/// # Example
///
/// ```
/// use commandqueue_core::CommandQueue;
///
/// let queue: CommandQueue<u32> = CommandQueue::builder().limit(16).distinct_only().build();
/// assert!(!queue.has_receiver());
/// ```
pub struct CommandQueueBuilder<T> {
    limit: Option<usize>,
    filter: Option<CommandFilter<T>>,
}

impl<T> CommandQueueBuilder<T> {
    pub(crate) fn new() -> Self {
        Self {
            limit: None,
            filter: None,
        }
    }

    /// Cap the backlog at `limit` commands.
    ///
    /// Commands sent while the queue cannot deliver and the backlog is full
    /// are dropped.
    pub fn limit(mut self, limit: usize) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Build the queue
    pub fn build(self) -> CommandQueue<T> {
        CommandQueue::with_parts(self.limit, self.filter)
    }
}

impl<T> CommandQueueBuilder<T>
where
    T: PartialEq + Clone + Send + 'static,
{
    /// Skip a command when it equals the previously delivered one
    pub fn distinct_only(mut self) -> Self {
        let mut previous: Option<T> = None;
        self.filter = Some(Box::new(move |command: &T| {
            if previous.as_ref() == Some(command) {
                return false;
            }
            previous = Some(command.clone());
            true
        }));
        self
    }

    /// Create a builder from configuration
    pub fn from_config(config: &QueueConfig) -> Self {
        let mut builder = Self::new();
        if let Some(limit) = config.limit {
            builder = builder.limit(limit);
        }
        if config.distinct_only {
            builder = builder.distinct_only();
        }
        builder
    }
}

impl<T> Default for CommandQueueBuilder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> std::fmt::Debug for CommandQueueBuilder<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandQueueBuilder")
            .field("limit", &self.limit)
            .field("distinct_only", &self.filter.is_some())
            .finish()
    }
}
