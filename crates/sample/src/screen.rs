//! Main screen
//!
//! The consumer side: attaches to the view model's command queue while
//! started and detaches when stopped. Toasts are recorded and logged in
//! place of a real widget.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::events::Events;
use crate::view_model::MainViewModel;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToastLength {
    Short,
    Long,
}

/// A toast shown by the screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toast {
    pub message: &'static str,
    pub length: ToastLength,
}

#[derive(Debug, Default)]
pub struct MainScreen {
    toasts: Arc<Mutex<Vec<Toast>>>,
}

impl MainScreen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start receiving commands. Anything queued while stopped is shown now.
    pub fn on_start(&self, view_model: &MainViewModel) {
        let toasts = Arc::clone(&self.toasts);
        view_model
            .command_queue()
            .set_receiver(move |command: Events| {
                let toast = match command {
                    Events::DoSomething { .. } => Toast {
                        message: "Do something!",
                        length: ToastLength::Short,
                    },
                    Events::DoOtherThing { .. } => Toast {
                        message: "Do other thing!",
                        length: ToastLength::Long,
                    },
                };
                show_toast(&toasts, toast);
            });
    }

    /// Stop receiving commands
    pub fn on_stop(&self, view_model: &MainViewModel) {
        view_model.command_queue().detach_receiver();
    }

    /// The button was clicked
    pub fn on_button_click(&self, view_model: &MainViewModel) {
        view_model.do_something_interesting();
    }

    /// Toasts shown so far
    pub fn toasts(&self) -> Vec<Toast> {
        self.toasts.lock().clone()
    }
}

fn show_toast(toasts: &Mutex<Vec<Toast>>, toast: Toast) {
    tracing::info!(length = ?toast.length, "Toast: {}", toast.message);
    toasts.lock().push(toast);
}

#[cfg(test)]
mod tests {
    use super::*;
    use commandqueue_core::{CommandQueue, TaskQueue};
    use std::time::Duration;

    fn view_model(main_thread: &TaskQueue) -> MainViewModel {
        MainViewModel::new(main_thread.sender(), CommandQueue::new(), Duration::ZERO)
    }

    #[test]
    fn test_started_screen_shows_toasts() {
        let main_thread = TaskQueue::default();
        let vm = view_model(&main_thread);
        let screen = MainScreen::new();

        screen.on_start(&vm);
        vm.command_queue().send(Events::do_other_thing());
        vm.command_queue().send(Events::do_something());

        assert_eq!(
            screen.toasts(),
            vec![
                Toast {
                    message: "Do other thing!",
                    length: ToastLength::Long,
                },
                Toast {
                    message: "Do something!",
                    length: ToastLength::Short,
                },
            ]
        );
        screen.on_stop(&vm);
    }

    #[test]
    fn test_stopped_screen_catches_up_on_start() {
        let main_thread = TaskQueue::default();
        let vm = view_model(&main_thread);
        let screen = MainScreen::new();

        screen.on_start(&vm);
        screen.on_stop(&vm);
        vm.command_queue().send(Events::do_something());
        assert!(screen.toasts().is_empty());

        screen.on_start(&vm);
        assert_eq!(
            screen.toasts(),
            vec![Toast {
                message: "Do something!",
                length: ToastLength::Short,
            }]
        );
        screen.on_stop(&vm);
        assert!(!vm.command_queue().has_receiver());
    }
}
