use crate::model::BindError;

/// The value-binding callback attached to an [`Argument`].
///
/// Receives the raw extracted value; side effects belong to the host.
pub type Binder<'a> = Box<dyn FnMut(&str) -> Result<(), BindError> + 'a>;

/// A binder-less description of an argument: just the identity and matching
/// metadata.
///
/// Templates describe the built-in help / quiet-mode / interactive-mode
/// switches on [`crate::ParseOptions`], and can be turned into a full
/// [`Argument`] with [`Argument::from_template`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArgumentTemplate {
    /// The name of the argument.  This is what the user types.
    pub name: String,
    /// Additional case-insensitive match keys.  Blank entries are ignored.
    pub aliases: Vec<String>,
    /// A description of what the argument does.
    pub description: String,
    /// Whether the argument carries a value.
    pub requires_value: bool,
    /// Whether the argument must be supplied.
    pub is_required: bool,
}

impl ArgumentTemplate {
    /// Create a valueless, optional template.
    pub fn new(name: impl Into<String>, aliases: &[&str], description: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            description: description.into(),
            requires_value: false,
            is_required: false,
        }
    }

    /// Mark the template as value-bearing.
    pub fn requires_value(mut self) -> Self {
        self.requires_value = true;
        self
    }

    /// Mark the template as required.
    pub fn required(mut self) -> Self {
        self.is_required = true;
        self
    }
}

/// The description of one console argument: identity, matching metadata, and
/// the binder invoked with its extracted value.
///
/// Construct via the factory per convenience combination (ex:
/// [`Argument::required_value`], [`Argument::optional_password`]), then
/// adjust with the builder methods.
///
/// ### Example
/// ```
/// use argot::Argument;
///
/// let mut user = String::new();
/// let argument = Argument::required_value("-userName", &["-u"], "The user to log in as.", |value| {
///     user = value.to_string();
///     Ok(())
/// });
/// assert!(argument.is_required());
/// assert!(argument.requires_value());
/// ```
pub struct Argument<'a> {
    name: String,
    aliases: Vec<String>,
    description: String,
    is_required: bool,
    requires_value: bool,
    value_token_count: usize,
    is_password: bool,
    ordinal: i32,
    binder: Option<Binder<'a>>,
}

impl<'a> Argument<'a> {
    fn build(
        name: impl Into<String>,
        aliases: &[&str],
        description: impl Into<String>,
        is_required: bool,
        requires_value: bool,
        is_password: bool,
        binder: Option<Binder<'a>>,
    ) -> Self {
        Self {
            name: name.into(),
            aliases: aliases.iter().map(|a| a.to_string()).collect(),
            description: description.into(),
            is_required,
            requires_value,
            value_token_count: 1,
            is_password,
            ordinal: i32::MAX,
            binder,
        }
    }

    /// A valueless, optional argument with no binder.  Its presence can only
    /// be observed through the parse outcome; use [`Argument::optional`] to
    /// observe it through a callback.
    pub fn flag(name: impl Into<String>, aliases: &[&str], description: impl Into<String>) -> Self {
        Self::build(name, aliases, description, false, false, false, None)
    }

    /// A valueless, optional argument.  The binder is invoked with an empty
    /// value when the argument is present.
    pub fn optional(
        name: impl Into<String>,
        aliases: &[&str],
        description: impl Into<String>,
        binder: impl FnMut(&str) -> Result<(), BindError> + 'a,
    ) -> Self {
        Self::build(name, aliases, description, false, false, false, Some(Box::new(binder)))
    }

    /// A valueless, required argument.
    pub fn required(
        name: impl Into<String>,
        aliases: &[&str],
        description: impl Into<String>,
        binder: impl FnMut(&str) -> Result<(), BindError> + 'a,
    ) -> Self {
        Self::build(name, aliases, description, true, false, false, Some(Box::new(binder)))
    }

    /// An optional, value-bearing argument.
    pub fn optional_value(
        name: impl Into<String>,
        aliases: &[&str],
        description: impl Into<String>,
        binder: impl FnMut(&str) -> Result<(), BindError> + 'a,
    ) -> Self {
        Self::build(name, aliases, description, false, true, false, Some(Box::new(binder)))
    }

    /// A required, value-bearing argument.
    pub fn required_value(
        name: impl Into<String>,
        aliases: &[&str],
        description: impl Into<String>,
        binder: impl FnMut(&str) -> Result<(), BindError> + 'a,
    ) -> Self {
        Self::build(name, aliases, description, true, true, false, Some(Box::new(binder)))
    }

    /// An optional password argument: value-bearing, read without echo when
    /// prompted interactively.
    pub fn optional_password(
        name: impl Into<String>,
        aliases: &[&str],
        description: impl Into<String>,
        binder: impl FnMut(&str) -> Result<(), BindError> + 'a,
    ) -> Self {
        Self::build(name, aliases, description, false, true, true, Some(Box::new(binder)))
    }

    /// A required password argument.
    pub fn required_password(
        name: impl Into<String>,
        aliases: &[&str],
        description: impl Into<String>,
        binder: impl FnMut(&str) -> Result<(), BindError> + 'a,
    ) -> Self {
        Self::build(name, aliases, description, true, true, true, Some(Box::new(binder)))
    }

    /// Attach a binder to a template, producing a full argument.
    pub fn from_template(
        template: &ArgumentTemplate,
        binder: impl FnMut(&str) -> Result<(), BindError> + 'a,
    ) -> Self {
        let aliases: Vec<&str> = template.aliases.iter().map(String::as_str).collect();
        Self::build(
            template.name.clone(),
            &aliases,
            template.description.clone(),
            template.is_required,
            template.requires_value,
            false,
            Some(Box::new(binder)),
        )
    }

    /// Set the number of subsequent whitespace-delimited tokens that
    /// constitute this argument's value (space separator only).  Clamped to
    /// at least `1`.
    pub fn value_token_count(mut self, count: usize) -> Self {
        self.value_token_count = std::cmp::max(count, 1);
        self
    }

    /// Set the display-order hint; lower sorts first in usage listings.
    /// Independent of parse/match order.
    pub fn ordinal(mut self, ordinal: i32) -> Self {
        self.ordinal = ordinal;
        self
    }

    /// The name of the argument.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The additional case-insensitive match keys.
    pub fn aliases(&self) -> &[String] {
        &self.aliases
    }

    /// A description of what the argument does.
    pub fn description(&self) -> &str {
        &self.description
    }

    /// Whether the argument must be supplied.
    pub fn is_required(&self) -> bool {
        self.is_required
    }

    /// Whether the argument carries a value.
    pub fn requires_value(&self) -> bool {
        self.requires_value
    }

    /// The number of tokens that constitute the value.
    pub fn token_count(&self) -> usize {
        self.value_token_count
    }

    /// Whether interactive prompts for this argument must not echo.
    pub fn is_password(&self) -> bool {
        self.is_password
    }

    /// The display-order hint.
    pub fn display_ordinal(&self) -> i32 {
        self.ordinal
    }

    pub(crate) fn bind(&mut self, value: &str) -> Result<(), BindError> {
        match self.binder.as_mut() {
            Some(binder) => binder(value),
            None => Ok(()),
        }
    }
}

impl<'a> std::fmt::Debug for Argument<'a> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Argument")
            .field("name", &self.name)
            .field("aliases", &self.aliases)
            .field("is_required", &self.is_required)
            .field("requires_value", &self.requires_value)
            .field("value_token_count", &self.value_token_count)
            .field("is_password", &self.is_password)
            .field("ordinal", &self.ordinal)
            .finish()
    }
}
