//! Main view model
//!
//! Owns the command queue for the main screen and runs slow work on a
//! background thread. Results are posted back to the main thread, where
//! they are sent as commands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

use commandqueue_core::{CommandQueue, TaskSender};
use parking_lot::Mutex;

use crate::events::Events;

pub struct MainViewModel {
    command_queue: Arc<CommandQueue<Events>>,
    loading: Arc<AtomicBool>,
    main_thread: TaskSender,
    work_duration: Duration,
    workers: Mutex<Vec<JoinHandle<()>>>,
}

impl MainViewModel {
    /// Create a view model posting results through `main_thread`
    pub fn new(
        main_thread: TaskSender,
        command_queue: CommandQueue<Events>,
        work_duration: Duration,
    ) -> Self {
        Self {
            command_queue: Arc::new(command_queue),
            loading: Arc::new(AtomicBool::new(false)),
            main_thread,
            work_duration,
            workers: Mutex::new(Vec::new()),
        }
    }

    /// The queue the screen attaches to
    pub fn command_queue(&self) -> &CommandQueue<Events> {
        &self.command_queue
    }

    /// Whether background work is in progress
    pub fn is_loading(&self) -> bool {
        self.loading.load(Ordering::Acquire)
    }

    /// Start the background work
    ///
    /// Returns `false` if work is already running (the request is ignored)
    /// or the worker thread could not be started.
    pub fn do_something_interesting(&self) -> bool {
        if self.loading.swap(true, Ordering::AcqRel) {
            tracing::debug!("Already loading, ignoring request");
            return false;
        }

        let loading = Arc::clone(&self.loading);
        let queue = Arc::clone(&self.command_queue);
        let main_thread = self.main_thread.clone();
        let work_duration = self.work_duration;

        let spawned = thread::Builder::new()
            .name("background".to_string())
            .spawn(move || {
                tracing::debug!("Working for {:?}", work_duration);
                thread::sleep(work_duration);
                loading.store(false, Ordering::Release);

                let posted = main_thread.queue_task_blocking(move || {
                    queue.send(Events::do_something());
                    queue.send(Events::do_other_thing());
                });
                if let Err(e) = posted {
                    tracing::warn!("Dropping work results: {}", e);
                }
            });

        match spawned {
            Ok(handle) => {
                let mut workers = self.workers.lock();
                reap_finished(&mut workers);
                workers.push(handle);
                true
            }
            Err(e) => {
                tracing::error!("Failed to start background worker: {}", e);
                self.loading.store(false, Ordering::Release);
                false
            }
        }
    }
}

/// Join workers that have exited. A worker still running may be waiting
/// for the main thread to drain its task queue, so it is never waited on here.
fn reap_finished(workers: &mut Vec<JoinHandle<()>>) {
    let (finished, running): (Vec<_>, Vec<_>) =
        workers.drain(..).partition(|worker| worker.is_finished());
    *workers = running;
    finished.into_iter().for_each(join_worker);
}

fn join_worker(worker: JoinHandle<()>) {
    if worker.join().is_err() {
        tracing::error!("Background worker panicked");
    }
}

impl Drop for MainViewModel {
    fn drop(&mut self) {
        self.workers.get_mut().drain(..).for_each(join_worker);
    }
}
