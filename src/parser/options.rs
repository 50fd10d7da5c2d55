use crate::api::{ArgumentTemplate, HelpCommandTemplate};
use crate::constant::*;

/// How much detail command listings include per command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WriteUsageMode {
    /// Just the command name.
    CommandNameOnly,
    /// The command name and its display title.
    CommandNameAndTitle,
    /// The command name, title, and full argument detail.
    CommandNameAndArguments,
}

/// The knobs controlling a [`crate::CommandParser`].
///
/// All fields are public; start from [`ParseOptions::default`] and adjust.
/// The built-in templates (`help_argument` and friends) can be set to `None`
/// to disable the corresponding behavior, or replaced to rename it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// The character separating an argument name from its value.  A space
    /// means the value arrives in the following token(s); any other
    /// character means the value is inline (ex: `-name=bob`).
    pub argument_value_separator: char,

    /// Whether a binder failure aborts the parse call with an error, rather
    /// than being captured in the outcome.
    pub throw_on_setter_error: bool,

    /// Whether an action failure aborts `parse_and_execute` with an error,
    /// rather than being captured in the result.
    pub throw_on_execute_error: bool,

    /// Whether an unrecognized command yields `NoMatchFound` instead of a
    /// printed error and `Failure`.
    pub allow_no_matching_commands: bool,

    /// Whether to prompt for missing values even without the interactive
    /// switch on the command line.
    pub interactive_mode_enabled: bool,

    /// Whether zero input tokens is an error.
    pub fail_on_no_arguments: bool,

    /// The built-in help switch.  `None` disables help detection.
    pub help_argument: Option<ArgumentTemplate>,

    /// The built-in quiet-mode switch.  `None` disables quiet mode.
    pub quiet_mode_argument: Option<ArgumentTemplate>,

    /// The built-in interactive-mode switch.  `None` means interactivity is
    /// controlled solely by `interactive_mode_enabled`.
    pub interactive_mode_argument: Option<ArgumentTemplate>,

    /// The synthetic help command.  `None` disables it.
    pub help_command: Option<HelpCommandTemplate>,

    /// The placeholder shown after value-bearing argument names.
    pub argument_value_indicator: String,

    /// The marker prefixed to required arguments in detail rows.
    pub required_argument_indicator: String,

    /// The `{}` format wrapping required argument names in the summary line.
    pub required_argument_format: String,

    /// The `{}` format wrapping optional argument names in the summary line.
    pub optional_argument_format: String,

    /// How much detail command listings include.
    pub write_usage_mode: WriteUsageMode,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            argument_value_separator: ' ',
            throw_on_setter_error: true,
            throw_on_execute_error: true,
            allow_no_matching_commands: false,
            interactive_mode_enabled: false,
            fail_on_no_arguments: false,
            help_argument: Some(ArgumentTemplate::new(
                HELP_ARGUMENT_NAME,
                HELP_ARGUMENT_ALIASES,
                "Displays this usage information",
            )),
            quiet_mode_argument: Some(ArgumentTemplate::new(
                QUIET_ARGUMENT_NAME,
                QUIET_ARGUMENT_ALIASES,
                "Suppresses all output",
            )),
            interactive_mode_argument: Some(ArgumentTemplate::new(
                INTERACTIVE_ARGUMENT_NAME,
                &[],
                "Prompts for any missing argument values",
            )),
            help_command: Some(HelpCommandTemplate {
                name: HELP_COMMAND_NAME.to_string(),
                title: HELP_COMMAND_NAME.to_string(),
                description: HELP_COMMAND_DESCRIPTION.to_string(),
                command_argument: ArgumentTemplate::new(
                    HELP_COMMAND_ARGUMENT_NAME,
                    HELP_COMMAND_ARGUMENT_ALIASES,
                    "The command to display usage information for",
                )
                .requires_value()
                .required(),
            }),
            argument_value_indicator: ARGUMENT_VALUE_INDICATOR.to_string(),
            required_argument_indicator: REQUIRED_ARGUMENT_INDICATOR.to_string(),
            required_argument_format: REQUIRED_ARGUMENT_FORMAT.to_string(),
            optional_argument_format: OPTIONAL_ARGUMENT_FORMAT.to_string(),
            write_usage_mode: WriteUsageMode::CommandNameAndArguments,
        }
    }
}
