use thiserror::Error;

/// Error raised by an argument's value binder.
///
/// Binders belong to the host application; the parser only transports the
/// failure (see [`crate::ParseOptions::throw_on_setter_error`]).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct BindError(String);

impl BindError {
    /// Create a bind error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Error raised by a command's action.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("{0}")]
pub struct ExecuteError(String);

impl ExecuteError {
    /// Create an execute error from a message.
    pub fn new(message: impl Into<String>) -> Self {
        Self(message.into())
    }

    /// The failure message.
    pub fn message(&self) -> &str {
        &self.0
    }
}

/// Errors which fail a parse call outright, as opposed to the recoverable
/// outcomes carried by [`ParseOutcome`].
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The definition set itself is invalid (ex: a duplicate argument or
    /// command name).  Indicates a misconfigured tool, not bad user input.
    #[error("invalid definitions: {0}")]
    Config(String),

    /// A value binder failed while `throw_on_setter_error` was enabled.
    #[error("error setting the value for the argument '{name}': {source}")]
    Setter {
        /// Name of the definition whose binder failed.
        name: String,
        /// The binder's failure.
        source: BindError,
    },

    /// A command action failed while `throw_on_execute_error` was enabled.
    #[error("error executing the '{name}' command: {source}")]
    Execute {
        /// Name of the command whose action failed.
        name: String,
        /// The action's failure.
        source: ExecuteError,
    },
}

/// The detailed result of a single argument parsing pass.
///
/// Exactly one case applies.  Offending definitions are identified by name;
/// the caller retains the definition set itself for usage rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ParseOutcome {
    /// Every matched definition bound and no required definition is missing.
    Success,

    /// Zero input tokens were supplied and
    /// [`crate::ParseOptions::fail_on_no_arguments`] is enabled.
    NoArguments,

    /// A value-requiring definition was matched but no value was available,
    /// including a declined interactive prompt.
    MissingValue {
        /// Name of the definition missing its value.
        name: String,
    },

    /// A definition's value binder failed.
    BindingFailed {
        /// Name of the definition whose binder failed.
        name: String,
        /// The binder's failure.
        error: BindError,
    },

    /// One or more required definitions were never matched.
    MissingRequired {
        /// Names of the unbound required definitions, in definition order.
        names: Vec<String>,
    },
}

impl ParseOutcome {
    /// Whether the pass completed without error.
    pub fn is_success(&self) -> bool {
        matches!(self, ParseOutcome::Success)
    }
}

/// The coarse outcome of a parse call, used by hosts to choose an exit code.
///
/// The parser never terminates the process itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseResult {
    /// Parsing succeeded; continue execution.
    Success,

    /// Outright failure; execution should not continue.
    Failure,

    /// Help text was written to the output.
    DisplayedHelp,

    /// No matching argument/command was found (permissive mode only).
    NoMatchFound,
}

/// The outcome of resolving a command from the token stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandParseResult {
    /// A command was resolved and its arguments parsed successfully.
    Success {
        /// Index of the resolved command within the caller's slice.
        command: usize,
    },

    /// Resolution or the inner argument parse failed.
    Failure,

    /// Help text was written to the output.
    DisplayedHelp,

    /// No command matched (permissive mode only).
    NoMatchFound,
}

impl CommandParseResult {
    /// The coarse [`ParseResult`] equivalent of this outcome.
    pub fn status(&self) -> ParseResult {
        match self {
            CommandParseResult::Success { .. } => ParseResult::Success,
            CommandParseResult::Failure => ParseResult::Failure,
            CommandParseResult::DisplayedHelp => ParseResult::DisplayedHelp,
            CommandParseResult::NoMatchFound => ParseResult::NoMatchFound,
        }
    }
}

/// The outcome of the full parse-then-execute pipeline.
///
/// Distinguishes "the arguments were invalid" from "the arguments were fine
/// but the command itself failed".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExecuteResult {
    /// The action ran; carries the action's own success/failure verdict.
    Executed {
        /// The action's return value.
        success: bool,
    },

    /// The action raised while `throw_on_execute_error` was disabled.
    ExecutionFailed {
        /// The action's failure.
        error: ExecuteError,
    },

    /// Parsing did not reach the action.
    NotExecuted(ParseResult),
}
