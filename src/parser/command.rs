use crate::api::{store_into, Argument, Command, HelpCommandTemplate};
use crate::matcher::{contains_template, validate_commands};
use crate::model::{CommandParseResult, ExecuteResult, ParseError, ParseOutcome, ParseResult};
use crate::parser::base::Engine;
use crate::parser::interface::{ConsoleInterface, UserInterface};
use crate::parser::options::ParseOptions;
use crate::parser::printer::{CommandRow, Printer, UsageOverride, UsageRow};

/// The entry point: parses flat argument sets, resolves sub-commands, and
/// optionally executes them.
///
/// The parser never terminates the process; every path reports a result and
/// leaves the exit decision to the host.
///
/// ### Example
/// ```no_run
/// use argot::{Argument, Command, CommandParser, ExecuteResult, store_into};
///
/// let mut user = String::new();
/// let mut commands = vec![Command::new("Login", "Logs the user in.", || Ok(true))
///     .argument(Argument::required_value("-userName", &["-u"], "The user.", store_into(&mut user)))];
///
/// let tokens: Vec<String> = std::env::args().skip(1).collect();
/// let tokens: Vec<&str> = tokens.iter().map(String::as_str).collect();
/// let mut parser = CommandParser::new("tool.exe");
/// match parser.parse_and_execute(&tokens, &mut commands) {
///     Ok(ExecuteResult::Executed { success: true }) => {}
///     _ => std::process::exit(1),
/// }
/// ```
pub struct CommandParser {
    program: String,
    options: ParseOptions,
    interface: Box<dyn UserInterface>,
    quiet: bool,
    interactive: bool,
}

impl CommandParser {
    /// Create a parser with default options, writing to the standard
    /// streams.  `program` appears in usage text.
    pub fn new(program: impl Into<String>) -> Self {
        Self::with_options(program, ParseOptions::default())
    }

    /// Create a parser with explicit options.
    pub fn with_options(program: impl Into<String>, options: ParseOptions) -> Self {
        Self::with_interface(program, options, Box::new(ConsoleInterface::default()))
    }

    /// Create a parser writing through a custom [`UserInterface`].
    pub fn with_interface(
        program: impl Into<String>,
        options: ParseOptions,
        interface: Box<dyn UserInterface>,
    ) -> Self {
        Self {
            program: program.into(),
            options,
            interface,
            quiet: false,
            interactive: false,
        }
    }

    /// The options the parser was built with.
    pub fn options(&self) -> &ParseOptions {
        &self.options
    }

    /// Parse a flat argument set, without command resolution.
    ///
    /// A help request writes the usage text (host definitions plus the
    /// built-in switches) and reports [`ParseResult::DisplayedHelp`]; other
    /// failures write an error plus the usage text and report
    /// [`ParseResult::Failure`].
    pub fn parse_arguments(
        &mut self,
        tokens: &[&str],
        arguments: &mut [Argument<'_>],
    ) -> Result<ParseResult, ParseError> {
        self.detect_modes(tokens);

        if self.help_requested(tokens) {
            self.write_argument_rows(arguments, None);
            return Ok(ParseResult::DisplayedHelp);
        }

        let outcome = Engine::new(&self.options, self.interactive).parse(
            tokens,
            arguments,
            self.interface.as_ref(),
        )?;

        match outcome_message(&outcome) {
            None => Ok(ParseResult::Success),
            Some(message) => {
                self.print_error(message);
                self.write_argument_rows(arguments, None);
                Ok(ParseResult::Failure)
            }
        }
    }

    /// Resolve `tokens[0]` against the command set and parse the remaining
    /// tokens with the matched command's arguments.
    ///
    /// The matched command is reported by index; it is not executed (see
    /// [`CommandParser::parse_and_execute`]).
    pub fn parse_command(
        &mut self,
        tokens: &[&str],
        commands: &mut [Command<'_>],
    ) -> Result<CommandParseResult, ParseError> {
        validate_commands(commands)?;
        self.detect_modes(tokens);

        if tokens.is_empty() {
            if self.options.allow_no_matching_commands {
                return Ok(CommandParseResult::NoMatchFound);
            }

            self.print_error("No arguments given.".to_string());
            self.write_command_rows(commands);
            return Ok(CommandParseResult::Failure);
        }

        if let Some(template) = self.options.help_command.clone() {
            if template.name.eq_ignore_ascii_case(tokens[0]) {
                return self.run_help_command(&template, &tokens[1..], commands);
            }
        }

        let Some(index) = commands
            .iter()
            .position(|command| command.name().eq_ignore_ascii_case(tokens[0]))
        else {
            if self.options.allow_no_matching_commands {
                if self.help_requested(tokens) {
                    self.write_command_rows(commands);
                    return Ok(CommandParseResult::DisplayedHelp);
                }

                return Ok(CommandParseResult::NoMatchFound);
            }

            self.print_error("Invalid command.".to_string());
            self.write_command_rows(commands);
            return Ok(CommandParseResult::Failure);
        };

        #[cfg(feature = "tracing_debug")]
        tracing::debug!(command = commands[index].name(), "resolved");

        let command = &mut commands[index];
        command.prepare();

        if self.help_requested(&tokens[1..]) {
            self.write_command_row(&CommandRow::from(&*command), None);
            return Ok(CommandParseResult::DisplayedHelp);
        }

        let outcome = Engine::new(&self.options, self.interactive).parse(
            &tokens[1..],
            command.arguments_mut(),
            self.interface.as_ref(),
        )?;

        match outcome_message(&outcome) {
            None => Ok(CommandParseResult::Success { command: index }),
            Some(message) => {
                self.print_error(message);
                self.write_command_row(&CommandRow::from(&commands[index]), None);
                Ok(CommandParseResult::Failure)
            }
        }
    }

    /// [`CommandParser::parse_command`], then run the matched command's
    /// action.
    ///
    /// Distinguishes a parse failure ([`ExecuteResult::NotExecuted`]) from
    /// an action that ran and reported failure
    /// ([`ExecuteResult::Executed`] with `success: false`) and from an
    /// action that raised ([`ExecuteResult::ExecutionFailed`], or an error
    /// when [`ParseOptions::throw_on_execute_error`] is set).
    pub fn parse_and_execute(
        &mut self,
        tokens: &[&str],
        commands: &mut [Command<'_>],
    ) -> Result<ExecuteResult, ParseError> {
        match self.parse_command(tokens, commands)? {
            CommandParseResult::Success { command: index } => {
                let command = &mut commands[index];
                match command.execute() {
                    Ok(success) => Ok(ExecuteResult::Executed { success }),
                    Err(error) => {
                        if self.options.throw_on_execute_error {
                            return Err(ParseError::Execute {
                                name: command.name().to_string(),
                                source: error,
                            });
                        }

                        self.print_error(format!(
                            "Error executing the '{}' command: {error}",
                            command.name()
                        ));
                        Ok(ExecuteResult::ExecutionFailed { error })
                    }
                }
            }
            other => Ok(ExecuteResult::NotExecuted(other.status())),
        }
    }

    /// Write the usage text for a flat argument set, including the built-in
    /// switches.
    pub fn write_usage(&self, arguments: &[Argument<'_>]) {
        self.write_argument_rows(arguments, None);
    }

    /// As [`CommandParser::write_usage`], with a per-argument row override.
    pub fn write_usage_with(&self, arguments: &[Argument<'_>], usage_override: UsageOverride<'_>) {
        self.write_argument_rows(arguments, Some(usage_override));
    }

    /// Write the detailed usage text for one command.
    pub fn write_command_usage(&self, command: &Command<'_>) {
        self.write_command_row(&CommandRow::from(command), None);
    }

    /// As [`CommandParser::write_command_usage`], with a per-argument row
    /// override.
    pub fn write_command_usage_with(
        &self,
        command: &Command<'_>,
        usage_override: UsageOverride<'_>,
    ) {
        self.write_command_row(&CommandRow::from(command), Some(usage_override));
    }

    /// Write the command listing at the configured
    /// [`ParseOptions::write_usage_mode`] detail level.
    pub fn write_commands_usage(&self, commands: &[Command<'_>]) {
        self.write_command_rows(commands);
    }

    // The synthetic help command: parse its own -command argument, then
    // render the target's usage.
    fn run_help_command(
        &mut self,
        template: &HelpCommandTemplate,
        tokens: &[&str],
        commands: &[Command<'_>],
    ) -> Result<CommandParseResult, ParseError> {
        let mut target = String::default();
        let mut arguments = vec![Argument::from_template(
            &template.command_argument,
            store_into(&mut target),
        )];

        let outcome = Engine::new(&self.options, self.interactive).parse(
            tokens,
            &mut arguments,
            self.interface.as_ref(),
        )?;

        if let Some(message) = outcome_message(&outcome) {
            self.print_error(message);
            self.write_command_row(&CommandRow::from(template), None);
            return Ok(CommandParseResult::Failure);
        }

        drop(arguments);
        match commands
            .iter()
            .find(|command| command.name().eq_ignore_ascii_case(&target))
        {
            Some(command) => {
                self.write_command_row(&CommandRow::from(command), None);
                Ok(CommandParseResult::DisplayedHelp)
            }
            None => {
                self.print_error(format!("Invalid command '{target}'."));
                Ok(CommandParseResult::Failure)
            }
        }
    }

    // Quiet mode wins over interactive mode; a host asking for silence does
    // not get prompts.
    fn detect_modes(&mut self, tokens: &[&str]) {
        self.quiet = match &self.options.quiet_mode_argument {
            Some(template) => contains_template(tokens, template),
            None => false,
        };

        let switched = match &self.options.interactive_mode_argument {
            Some(template) => contains_template(tokens, template),
            None => false,
        };
        self.interactive = !self.quiet && (self.options.interactive_mode_enabled || switched);
    }

    fn help_requested(&self, tokens: &[&str]) -> bool {
        match &self.options.help_argument {
            Some(template) => contains_template(tokens, template),
            None => false,
        }
    }

    fn print_error(&self, message: String) {
        if !self.quiet {
            self.interface.print_error(message);
        }
    }

    fn printer(&self) -> Printer<'_> {
        Printer::terminal(&self.program, &self.options)
    }

    fn write_argument_rows(
        &self,
        arguments: &[Argument<'_>],
        usage_override: Option<UsageOverride<'_>>,
    ) {
        if self.quiet {
            return;
        }

        let mut rows: Vec<UsageRow> = arguments.iter().map(UsageRow::from).collect();
        rows.extend(self.builtin_rows());
        self.printer()
            .write_arguments(self.interface.as_ref(), &rows, usage_override);
    }

    fn write_command_row(&self, row: &CommandRow, usage_override: Option<UsageOverride<'_>>) {
        if self.quiet {
            return;
        }

        self.printer()
            .write_command(self.interface.as_ref(), row, usage_override);
    }

    fn write_command_rows(&self, commands: &[Command<'_>]) {
        if self.quiet {
            return;
        }

        let mut rows: Vec<CommandRow> = commands.iter().map(CommandRow::from).collect();
        if let Some(template) = &self.options.help_command {
            rows.push(CommandRow::from(template));
        }
        self.printer()
            .write_command_list(self.interface.as_ref(), &rows);
    }

    fn builtin_rows(&self) -> Vec<UsageRow> {
        [
            &self.options.interactive_mode_argument,
            &self.options.quiet_mode_argument,
            &self.options.help_argument,
        ]
        .into_iter()
        .flatten()
        .map(UsageRow::from)
        .collect()
    }
}

fn outcome_message(outcome: &ParseOutcome) -> Option<String> {
    match outcome {
        ParseOutcome::Success => None,
        ParseOutcome::NoArguments => Some("No arguments given.".to_string()),
        ParseOutcome::MissingValue { name } => {
            Some(format!("Missing argument value for '{name}'."))
        }
        ParseOutcome::BindingFailed { name, error } => Some(format!(
            "Error setting the value for the argument '{name}': {error}"
        )),
        ParseOutcome::MissingRequired { names } => Some(format!(
            "Missing the following required arguments: {}",
            names.join(", ")
        )),
    }
}
