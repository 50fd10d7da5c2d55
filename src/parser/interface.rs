use std::io::Write;

/// The parser's view of the console.
///
/// [`crate::CommandParser`] writes usage text and error messages through
/// this trait, and reads interactive prompt answers from it.  Replace the
/// default [`ConsoleInterface`] to redirect output or script prompts.
pub trait UserInterface {
    /// Write an ordinary message.
    fn print(&self, message: String);

    /// Write an error message.
    fn print_error(&self, message: String);

    /// Write `prompt` without a trailing newline and read one line of input.
    /// `None` means no input could be read.
    fn prompt_line(&self, prompt: String) -> Option<String>;

    /// As [`UserInterface::prompt_line`], but without echoing the input.
    fn prompt_masked(&self, prompt: String) -> Option<String>;

    /// Whether a human is plausibly on the other end.  Prompting is skipped
    /// when unattended.
    fn is_attended(&self) -> bool;
}

/// The standard streams: messages to stdout, errors to stderr, prompts read
/// from stdin.
#[derive(Debug, Default)]
pub struct ConsoleInterface {}

impl UserInterface for ConsoleInterface {
    fn print(&self, message: String) {
        println!("{message}");
    }

    fn print_error(&self, message: String) {
        eprintln!("{message}");
    }

    fn prompt_line(&self, prompt: String) -> Option<String> {
        print!("{prompt}");
        std::io::stdout().flush().ok()?;

        let mut buffer = String::new();
        std::io::stdin().read_line(&mut buffer).ok()?;
        Some(buffer.trim_end_matches(['\r', '\n']).to_string())
    }

    fn prompt_masked(&self, prompt: String) -> Option<String> {
        print!("{prompt}");
        std::io::stdout().flush().ok()?;

        crossterm::terminal::enable_raw_mode().ok()?;
        let result = masked_loop();
        // Raw mode must not outlive the read, even on failure.
        let _ = crossterm::terminal::disable_raw_mode();
        println!();
        result
    }

    fn is_attended(&self) -> bool {
        use std::io::IsTerminal;

        std::io::stdout().is_terminal()
    }
}

// Lets a host (or test) keep a handle on the interface it hands to the
// parser.
impl<T: UserInterface + ?Sized> UserInterface for std::rc::Rc<T> {
    fn print(&self, message: String) {
        (**self).print(message)
    }

    fn print_error(&self, message: String) {
        (**self).print_error(message)
    }

    fn prompt_line(&self, prompt: String) -> Option<String> {
        (**self).prompt_line(prompt)
    }

    fn prompt_masked(&self, prompt: String) -> Option<String> {
        (**self).prompt_masked(prompt)
    }

    fn is_attended(&self) -> bool {
        (**self).is_attended()
    }
}

fn masked_loop() -> Option<String> {
    use crossterm::event::{read, Event, KeyCode, KeyEventKind};

    let mut buffer = String::new();

    loop {
        match read().ok()? {
            Event::Key(key) if key.kind == KeyEventKind::Press => match key.code {
                KeyCode::Enter => break,
                KeyCode::Backspace => {
                    buffer.pop();
                }
                KeyCode::Char(c) => buffer.push(c),
                _ => {}
            },
            _ => {}
        }
    }

    Some(buffer)
}

#[cfg(test)]
pub(crate) mod util {
    use std::cell::RefCell;
    use std::collections::VecDeque;

    use super::UserInterface;

    /// Scriptable console double.  Push prompt answers with `respond`, then
    /// inspect what the parser wrote with `consume`.
    pub(crate) struct InMemoryInterface {
        messages: RefCell<Vec<String>>,
        errors: RefCell<Vec<String>>,
        prompts: RefCell<Vec<String>>,
        responses: RefCell<VecDeque<Option<String>>>,
        attended: bool,
    }

    impl InMemoryInterface {
        pub(crate) fn attended() -> Self {
            Self {
                messages: RefCell::default(),
                errors: RefCell::default(),
                prompts: RefCell::default(),
                responses: RefCell::default(),
                attended: true,
            }
        }

        pub(crate) fn unattended() -> Self {
            Self {
                attended: false,
                ..Self::attended()
            }
        }

        pub(crate) fn respond(&self, response: impl Into<String>) {
            self.responses
                .borrow_mut()
                .push_back(Some(response.into()));
        }

        pub(crate) fn decline(&self) {
            self.responses.borrow_mut().push_back(None);
        }

        pub(crate) fn consume(self) -> (Vec<String>, Vec<String>, Vec<String>) {
            (
                self.messages.into_inner(),
                self.errors.into_inner(),
                self.prompts.into_inner(),
            )
        }

        pub(crate) fn messages(&self) -> Vec<String> {
            self.messages.borrow().clone()
        }

        pub(crate) fn errors(&self) -> Vec<String> {
            self.errors.borrow().clone()
        }

        pub(crate) fn prompts(&self) -> Vec<String> {
            self.prompts.borrow().clone()
        }
    }

    impl UserInterface for InMemoryInterface {
        fn print(&self, message: String) {
            self.messages.borrow_mut().push(message);
        }

        fn print_error(&self, message: String) {
            self.errors.borrow_mut().push(message);
        }

        fn prompt_line(&self, prompt: String) -> Option<String> {
            self.prompts.borrow_mut().push(prompt);
            self.responses.borrow_mut().pop_front().flatten()
        }

        fn prompt_masked(&self, prompt: String) -> Option<String> {
            self.prompts.borrow_mut().push(format!("masked:{prompt}"));
            self.responses.borrow_mut().pop_front().flatten()
        }

        fn is_attended(&self) -> bool {
            self.attended
        }
    }
}
