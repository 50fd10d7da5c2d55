//! `argot` parses console arguments the declarative way: describe each
//! argument and command in code, hand the parser the raw token vector, and
//! let it bind values through your own closures.
//!
//! ```
//! use argot::{Argument, CommandParser, ParseResult, store_into};
//!
//! let mut name = String::new();
//! let mut arguments = vec![Argument::required_value(
//!     "-name",
//!     &["-n"],
//!     "The name to greet.",
//!     store_into(&mut name),
//! )];
//!
//! let mut parser = CommandParser::new("greet.exe");
//! let result = parser.parse_arguments(&["-n", "bob"], &mut arguments).unwrap();
//! assert_eq!(result, ParseResult::Success);
//! drop(arguments);
//! assert_eq!(name, "bob");
//! ```
//!
//! Sub-command style programs register [`Command`]s instead and use
//! [`CommandParser::parse_command`] or [`CommandParser::parse_and_execute`].
//! Matching is ascii case-insensitive, unrecognized tokens are skipped, and
//! help/quiet/interactive switches are built in (see [`ParseOptions`]).
#![deny(missing_docs)]
mod api;
mod constant;
mod matcher;
mod model;
mod parser;

pub use api::*;
pub use model::*;
pub use parser::{
    CommandParser, ConsoleInterface, ParseOptions, UsageOverride, UserInterface, WriteUsageMode,
};
