mod base;
mod command;
mod interface;
mod options;
mod printer;

pub use command::CommandParser;
pub use interface::{ConsoleInterface, UserInterface};
pub use options::{ParseOptions, WriteUsageMode};
pub use printer::UsageOverride;
