use crate::api::argument::Argument;
use crate::model::ExecuteError;

/// The work a [`Command`] performs once its arguments are bound.
///
/// `Ok(true)` means the command succeeded, `Ok(false)` that it ran but
/// reported failure, and `Err(..)` that it raised.
pub type Action<'a> = Box<dyn FnMut() -> Result<bool, ExecuteError> + 'a>;

/// The hook run immediately before a command's arguments are parsed.
///
/// Receives the argument list to rebuild; composition (merging a base
/// command's arguments, re-ordering, injecting) happens here, in host code.
pub type BeforeParse<'a> = Box<dyn FnMut(&mut Vec<Argument<'a>>) + 'a>;

/// A sub-command: a named entry point with its own argument set and action.
///
/// ### Example
/// ```
/// use argot::{Argument, Command, store_into};
///
/// let mut user = String::new();
/// let command = Command::new("Login", "Logs the user in.", || Ok(true))
///     .argument(Argument::required_value("-userName", &["-u"], "The user.", store_into(&mut user)));
/// assert_eq!(command.name(), "Login");
/// ```
pub struct Command<'a> {
    name: String,
    title: String,
    description: String,
    ordinal: i32,
    arguments: Vec<Argument<'a>>,
    action: Action<'a>,
    before_parse: Option<BeforeParse<'a>>,
}

impl<'a> Command<'a> {
    /// Create a command with an empty argument set.  The title defaults to
    /// the name.
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        action: impl FnMut() -> Result<bool, ExecuteError> + 'a,
    ) -> Self {
        let name = name.into();
        Self {
            title: name.clone(),
            name,
            description: description.into(),
            ordinal: i32::MAX,
            arguments: Vec::default(),
            action: Box::new(action),
            before_parse: None,
        }
    }

    /// Attach an action to a template, producing a command with an empty
    /// argument set.
    pub fn from_template(
        template: &CommandTemplate,
        action: impl FnMut() -> Result<bool, ExecuteError> + 'a,
    ) -> Self {
        Self::new(template.name.clone(), template.description.clone(), action)
            .title(template.title.clone())
    }

    /// Set the short display title used in command listings.
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// Set the display-order hint; lower sorts first in command listings.
    pub fn ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// Append an argument definition.
    pub fn argument(mut self, argument: Argument<'a>) -> Self {
        self.arguments.push(argument);
        self
    }

    /// Install the pre-parse hook.  The hook receives the full argument list
    /// and replaces it wholesale; repeated parses re-run the hook rather
    /// than accumulate.
    pub fn before_parse(mut self, hook: impl FnMut(&mut Vec<Argument<'a>>) + 'a) -> Self {
        self.before_parse = Some(Box::new(hook));
        self
    }

    /// The name of the command.  This is what the user types.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The short display title.
    pub fn display_title(&self) -> &str {
        &self.title
    }

    /// A description of what the command does.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// The display-order hint.
    pub fn display_ordinal(&self) -> i32 {
        self.ordinal
    }

    /// The command's argument definitions.
    pub fn arguments(&self) -> &[Argument<'a>] {
        &self.arguments
    }

    pub(crate) fn arguments_mut(&mut self) -> &mut [Argument<'a>] {
        &mut self.arguments
    }

    pub(crate) fn prepare(&mut self) {
        let Command {
            arguments,
            before_parse,
            ..
        } = self;
        if let Some(hook) = before_parse.as_mut() {
            hook(arguments);
        }
    }

    pub(crate) fn execute(&mut self) -> Result<bool, ExecuteError> {
        (self.action)()
    }
}

impl<'a> std::fmt::Debug for Command<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Command")
            .field("name", &self.name)
            .field("title", &self.title)
            .field("ordinal", &self.ordinal)
            .field("arguments", &self.arguments)
            .finish()
    }
}

/// A binder-less description of a command, used for usage rendering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandTemplate {
    /// The name of the command.
    pub name: String,
    /// The short display title.
    pub title: String,
    /// A description of what the command does.
    pub description: String,
}

/// Describes the synthetic help command injected by
/// [`crate::CommandParser::parse_command`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HelpCommandTemplate {
    /// The name of the help command.
    pub name: String,
    /// The short display title.
    pub title: String,
    /// A description of what the help command does.
    pub description: String,
    /// The argument naming the command to describe.
    pub command_argument: crate::api::argument::ArgumentTemplate,
}
