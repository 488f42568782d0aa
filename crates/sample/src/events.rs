//! Commands sent from the view model to the screen

/// One-shot commands for the main screen
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Events {
    DoSomething { placeholder: String },
    DoOtherThing { placeholder: String },
}

impl Events {
    pub fn do_something() -> Self {
        Events::DoSomething {
            placeholder: String::new(),
        }
    }

    pub fn do_other_thing() -> Self {
        Events::DoOtherThing {
            placeholder: String::new(),
        }
    }
}
