//! # Command Queue Sample
//!
//! A view model does slow work on a background thread and reports the result
//! as one-shot commands. The screen that shows them may be stopped and started
//! again (e.g. rotated) while the work runs; commands produced in between wait
//! in the queue and are shown exactly once when the screen comes back.

pub mod config;
pub mod events;
pub mod screen;
pub mod view_model;

use std::time::Instant;

use commandqueue_core::{CommandQueueBuilder, CoreConfig, TaskQueue};
use tracing_subscriber::EnvFilter;

pub use config::SampleConfig;
pub use events::Events;
pub use screen::{MainScreen, Toast, ToastLength};
pub use view_model::MainViewModel;

/// Extra time allowed past the work duration before giving up
const RUN_GRACE: std::time::Duration = std::time::Duration::from_secs(5);

/// Install the fmt subscriber
///
/// `RUST_LOG` wins; otherwise `debug` or `info` depending on `debug`.
pub fn init_logging(debug: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if debug { "debug" } else { "info" }));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Run the sample on the calling thread, which acts as the main thread
///
/// Returns the toasts the screen showed.
pub fn run(config: &SampleConfig, core: &CoreConfig) -> Vec<Toast> {
    let main_thread = TaskQueue::default();
    let queue = CommandQueueBuilder::from_config(&core.queue).build();
    let view_model = MainViewModel::new(main_thread.sender(), queue, config.work_duration());
    let screen = MainScreen::new();

    screen.on_start(&view_model);
    screen.on_button_click(&view_model);

    let mut stopped = config.simulate_rotation;
    if stopped {
        screen.on_stop(&view_model);
        tracing::info!("Screen stopped while work is running");
    }

    let deadline = Instant::now() + config.work_duration() + RUN_GRACE;
    while screen.toasts().len() < 2 {
        if Instant::now() >= deadline {
            tracing::warn!("Gave up waiting for commands");
            break;
        }

        main_thread.wait_and_process(config.tick());

        if stopped && !view_model.command_queue().is_empty() {
            tracing::info!(
                "Screen started again, {} commands waiting",
                view_model.command_queue().pending_count()
            );
            screen.on_start(&view_model);
            stopped = false;
        }
    }

    screen.on_stop(&view_model);
    screen.toasts()
}
