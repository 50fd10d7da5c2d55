use std::collections::HashSet;

use crate::api::{Argument, ArgumentTemplate, Command};
use crate::model::ParseError;

/// A raw token split into its match key and, for non-space separators, the
/// inline value.
#[derive(Debug, PartialEq, Eq)]
pub(crate) struct TokenSplit<'t> {
    pub(crate) name: &'t str,
    pub(crate) inline_value: Option<&'t str>,
}

/// Split a token on the configured separator.
///
/// The space separator never appears inside a token (the shell already split
/// on it), so the whole token is the match key and the value lives in the
/// following token(s).
pub(crate) fn split_token(token: &str, separator: char) -> TokenSplit<'_> {
    if separator == ' ' {
        return TokenSplit {
            name: token,
            inline_value: None,
        };
    }

    match token.split_once(separator) {
        Some((name, value)) => TokenSplit {
            name,
            inline_value: Some(value),
        },
        None => TokenSplit {
            name: token,
            inline_value: None,
        },
    }
}

/// Find the first definition whose name or a non-blank alias matches `name`,
/// ignoring ascii case.
pub(crate) fn find_argument(name: &str, arguments: &[Argument<'_>]) -> Option<usize> {
    arguments.iter().position(|argument| {
        argument.name().eq_ignore_ascii_case(name)
            || argument
                .aliases()
                .iter()
                .any(|alias| !alias.trim().is_empty() && alias.eq_ignore_ascii_case(name))
    })
}

/// Whether any whole token matches the template's name or a non-blank alias,
/// ignoring ascii case.  Used to detect the built-in switches before the
/// main scan runs.
pub(crate) fn contains_template(tokens: &[&str], template: &ArgumentTemplate) -> bool {
    tokens.iter().any(|token| {
        template.name.eq_ignore_ascii_case(token)
            || template
                .aliases
                .iter()
                .any(|alias| !alias.trim().is_empty() && alias.eq_ignore_ascii_case(token))
    })
}

/// Reject definition sets where two definitions would compete for the same
/// match key.  Names and aliases share one keyspace.
pub(crate) fn validate_arguments(arguments: &[Argument<'_>]) -> Result<(), ParseError> {
    let mut keys: HashSet<String> = HashSet::default();

    for argument in arguments {
        if !keys.insert(argument.name().to_ascii_lowercase()) {
            return Err(ParseError::Config(format!(
                "duplicate argument name '{}'.",
                argument.name()
            )));
        }

        for alias in argument.aliases() {
            if alias.trim().is_empty() {
                continue;
            }

            if !keys.insert(alias.to_ascii_lowercase()) {
                return Err(ParseError::Config(format!(
                    "duplicate argument alias '{alias}'."
                )));
            }
        }
    }

    Ok(())
}

/// Reject command sets with duplicate names.
pub(crate) fn validate_commands(commands: &[Command<'_>]) -> Result<(), ParseError> {
    let mut names: HashSet<String> = HashSet::default();

    for command in commands {
        if !names.insert(command.name().to_ascii_lowercase()) {
            return Err(ParseError::Config(format!(
                "duplicate command name '{}'.",
                command.name()
            )));
        }
    }

    Ok(())
}
