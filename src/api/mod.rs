mod argument;
mod capture;
mod command;

pub use argument::{Argument, ArgumentTemplate, Binder};
pub use capture::{parse_into, store_into, toggle};
pub use command::{Action, BeforeParse, Command, CommandTemplate, HelpCommandTemplate};
