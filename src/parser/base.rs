use crate::api::Argument;
use crate::matcher::{contains_template, find_argument, split_token, validate_arguments};
use crate::model::{ParseError, ParseOutcome};
use crate::parser::interface::UserInterface;
use crate::parser::options::ParseOptions;

/// The argument scan itself, shared by top-level and per-command parsing.
///
/// Walks the token vector left to right, matching each token against the
/// definition set and binding extracted values.  Unmatched tokens are
/// skipped without complaint; a host mixing recognized and unrecognized
/// tokens still gets its recognized ones bound.
pub(crate) struct Engine<'o> {
    options: &'o ParseOptions,
    interactive: bool,
}

impl<'o> Engine<'o> {
    pub(crate) fn new(options: &'o ParseOptions, interactive: bool) -> Self {
        Self {
            options,
            interactive,
        }
    }

    pub(crate) fn parse(
        &self,
        tokens: &[&str],
        arguments: &mut [Argument<'_>],
        interface: &dyn UserInterface,
    ) -> Result<ParseOutcome, ParseError> {
        validate_arguments(arguments)?;

        if tokens.is_empty() && self.options.fail_on_no_arguments {
            return Ok(ParseOutcome::NoArguments);
        }

        let separator = self.options.argument_value_separator;
        let prompting = self.interactive && interface.is_attended();
        let mut bound = vec![false; arguments.len()];

        let mut i = 0;
        while i < tokens.len() {
            let split = split_token(tokens[i], separator);
            let Some(index) = find_argument(split.name, arguments) else {
                i += 1;
                continue;
            };

            #[cfg(feature = "tracing_debug")]
            tracing::debug!(token = tokens[i], argument = arguments[index].name(), "matched");

            let argument = &mut arguments[index];
            let mut consumed = 0;

            if argument.requires_value() {
                let mut value = if separator == ' ' {
                    let available =
                        std::cmp::min(argument.token_count(), tokens.len() - (i + 1));
                    consumed = available;
                    tokens[i + 1..i + 1 + available].join(" ")
                } else {
                    split.inline_value.unwrap_or("").to_string()
                };

                if value.trim().is_empty() && prompting {
                    if let Some(answer) = prompt_for_value(argument, interface) {
                        value = answer;
                    }
                }

                if value.trim().is_empty() {
                    return Ok(ParseOutcome::MissingValue {
                        name: argument.name().to_string(),
                    });
                }

                if let Some(outcome) = self.bind(argument, &value)? {
                    return Ok(outcome);
                }
            } else if let Some(outcome) = self.bind(argument, "")? {
                return Ok(outcome);
            }

            bound[index] = true;
            i += 1 + consumed;
        }

        // A help request supersedes interactive backfill; the caller is about
        // to render usage, not run anything.
        if prompting && !self.help_requested(tokens) {
            for (index, argument) in arguments.iter_mut().enumerate() {
                if bound[index] || !argument.is_required() || !argument.requires_value() {
                    continue;
                }

                let value = prompt_for_value(argument, interface).unwrap_or_default();
                if value.trim().is_empty() {
                    return Ok(ParseOutcome::MissingValue {
                        name: argument.name().to_string(),
                    });
                }

                if let Some(outcome) = self.bind(argument, &value)? {
                    return Ok(outcome);
                }

                bound[index] = true;
            }
        }

        let missing: Vec<String> = arguments
            .iter()
            .zip(bound.iter())
            .filter(|(argument, bound)| argument.is_required() && !**bound)
            .map(|(argument, _)| argument.name().to_string())
            .collect();

        if missing.is_empty() {
            Ok(ParseOutcome::Success)
        } else {
            Ok(ParseOutcome::MissingRequired { names: missing })
        }
    }

    fn bind(
        &self,
        argument: &mut Argument<'_>,
        value: &str,
    ) -> Result<Option<ParseOutcome>, ParseError> {
        match argument.bind(value) {
            Ok(()) => Ok(None),
            Err(error) => {
                if self.options.throw_on_setter_error {
                    Err(ParseError::Setter {
                        name: argument.name().to_string(),
                        source: error,
                    })
                } else {
                    Ok(Some(ParseOutcome::BindingFailed {
                        name: argument.name().to_string(),
                        error,
                    }))
                }
            }
        }
    }

    fn help_requested(&self, tokens: &[&str]) -> bool {
        match &self.options.help_argument {
            Some(template) => contains_template(tokens, template),
            None => false,
        }
    }
}

fn prompt_for_value(argument: &Argument<'_>, interface: &dyn UserInterface) -> Option<String> {
    interface.print(format!(
        "Please provide a value for the argument {} - {}",
        argument.name(),
        argument.description()
    ));

    let prompt = format!("{}: ", argument.name());
    if argument.is_password() {
        interface.prompt_masked(prompt)
    } else {
        interface.prompt_line(prompt)
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use rstest::rstest;

    use super::*;
    use crate::api::{parse_into, store_into, toggle};
    use crate::model::BindError;
    use crate::parser::interface::util::InMemoryInterface;

    fn engine_parse(
        options: &ParseOptions,
        interactive: bool,
        tokens: &[&str],
        arguments: &mut [Argument<'_>],
        interface: &InMemoryInterface,
    ) -> Result<ParseOutcome, ParseError> {
        Engine::new(options, interactive).parse(tokens, arguments, interface)
    }

    #[test]
    fn space_separated_values() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::unattended();
        let mut user = String::new();
        let mut count: u32 = 0;
        let mut arguments = vec![
            Argument::required_value("-userName", &["-u"], "", store_into(&mut user)),
            Argument::optional_value("-count", &[], "", parse_into(&mut count)),
        ];

        // Execute
        let outcome = engine_parse(
            &options,
            false,
            &["-u", "bob", "-count", "3"],
            &mut arguments,
            &interface,
        )
        .unwrap();

        // Verify
        assert_eq!(outcome, ParseOutcome::Success);
        drop(arguments);
        assert_eq!(user, "bob");
        assert_eq!(count, 3);
    }

    #[rstest]
    #[case('=', &["-userName=bob"])]
    #[case(':', &["-USERNAME:bob"])]
    fn inline_separator_values(#[case] separator: char, #[case] tokens: &[&str]) {
        // Setup
        let options = ParseOptions {
            argument_value_separator: separator,
            ..ParseOptions::default()
        };
        let interface = InMemoryInterface::unattended();
        let mut user = String::new();
        let mut arguments = vec![Argument::required_value(
            "-userName",
            &[],
            "",
            store_into(&mut user),
        )];

        // Execute
        let outcome = engine_parse(&options, false, tokens, &mut arguments, &interface).unwrap();

        // Verify
        assert_eq!(outcome, ParseOutcome::Success);
        drop(arguments);
        assert_eq!(user, "bob");
    }

    #[test]
    fn multi_token_value_joins() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::unattended();
        let mut files = String::new();
        let mut flagged = false;
        let mut arguments = vec![
            Argument::optional_value("-files", &[], "", store_into(&mut files)).value_token_count(3),
            Argument::optional("-y", &[], "", toggle(&mut flagged)),
        ];

        // Execute
        let outcome = engine_parse(
            &options,
            false,
            &["-files", "a", "b", "c", "-y"],
            &mut arguments,
            &interface,
        )
        .unwrap();

        // Verify: the value tokens are joined and not re-scanned.
        assert_eq!(outcome, ParseOutcome::Success);
        drop(arguments);
        assert_eq!(files, "a b c");
        assert!(flagged);
    }

    #[test]
    fn multi_token_value_truncated_at_end_of_input() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::unattended();
        let mut files = String::new();
        let mut arguments =
            vec![Argument::optional_value("-files", &[], "", store_into(&mut files))
                .value_token_count(3)];

        // Execute
        let outcome =
            engine_parse(&options, false, &["-files", "a", "b"], &mut arguments, &interface)
                .unwrap();

        // Verify
        assert_eq!(outcome, ParseOutcome::Success);
        drop(arguments);
        assert_eq!(files, "a b");
    }

    #[test]
    fn unmatched_tokens_skipped() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::unattended();
        let mut user = String::new();
        let mut arguments = vec![Argument::optional_value(
            "-userName",
            &[],
            "",
            store_into(&mut user),
        )];

        // Execute
        let outcome = engine_parse(
            &options,
            false,
            &["stray", "-unknown", "x", "-userName", "bob"],
            &mut arguments,
            &interface,
        )
        .unwrap();

        // Verify
        assert_eq!(outcome, ParseOutcome::Success);
        drop(arguments);
        assert_eq!(user, "bob");
    }

    #[test]
    fn repeated_argument_rebinds() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::unattended();
        let mut user = String::new();
        let mut arguments = vec![Argument::optional_value(
            "-userName",
            &[],
            "",
            store_into(&mut user),
        )];

        // Execute
        let outcome = engine_parse(
            &options,
            false,
            &["-userName", "alice", "-userName", "bob"],
            &mut arguments,
            &interface,
        )
        .unwrap();

        // Verify: last write wins.
        assert_eq!(outcome, ParseOutcome::Success);
        drop(arguments);
        assert_eq!(user, "bob");
    }

    #[test]
    fn missing_value() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::unattended();
        let mut user = String::new();
        let mut arguments = vec![Argument::required_value(
            "-userName",
            &[],
            "",
            store_into(&mut user),
        )];

        // Execute
        let outcome =
            engine_parse(&options, false, &["-userName"], &mut arguments, &interface).unwrap();

        // Verify
        assert_eq!(
            outcome,
            ParseOutcome::MissingValue {
                name: "-userName".to_string()
            }
        );
    }

    #[test]
    fn missing_required() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::unattended();
        let mut arguments = vec![
            Argument::required_value("-a", &[], "", |_| Ok(())),
            Argument::flag("-b", &[], ""),
            Argument::required_value("-c", &[], "", |_| Ok(())),
        ];

        // Execute
        let outcome = engine_parse(&options, false, &["-b"], &mut arguments, &interface).unwrap();

        // Verify: definition order, not match order.
        assert_eq!(
            outcome,
            ParseOutcome::MissingRequired {
                names: vec!["-a".to_string(), "-c".to_string()]
            }
        );
    }

    #[test]
    fn no_arguments() {
        // Setup
        let options = ParseOptions {
            fail_on_no_arguments: true,
            ..ParseOptions::default()
        };
        let interface = InMemoryInterface::unattended();
        let mut arguments = vec![Argument::flag("-a", &[], "")];

        // Execute & verify
        let outcome = engine_parse(&options, false, &[], &mut arguments, &interface).unwrap();
        assert_eq!(outcome, ParseOutcome::NoArguments);

        // Without the option, empty input is an ordinary (empty) scan.
        let options = ParseOptions::default();
        let outcome = engine_parse(&options, false, &[], &mut arguments, &interface).unwrap();
        assert_eq!(outcome, ParseOutcome::Success);
    }

    #[test]
    fn setter_error_propagates() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::unattended();
        let mut count: u32 = 0;
        let mut arguments =
            vec![Argument::optional_value("-count", &[], "", parse_into(&mut count))];

        // Execute
        let result = engine_parse(
            &options,
            false,
            &["-count", "blah"],
            &mut arguments,
            &interface,
        );

        // Verify
        assert_matches!(result, Err(ParseError::Setter { name, .. }) if name == "-count");
    }

    #[test]
    fn setter_error_captured() {
        // Setup
        let options = ParseOptions {
            throw_on_setter_error: false,
            ..ParseOptions::default()
        };
        let interface = InMemoryInterface::unattended();
        let mut count: u32 = 0;
        let mut arguments =
            vec![Argument::optional_value("-count", &[], "", parse_into(&mut count))];

        // Execute
        let outcome = engine_parse(
            &options,
            false,
            &["-count", "blah"],
            &mut arguments,
            &interface,
        )
        .unwrap();

        // Verify
        assert_eq!(
            outcome,
            ParseOutcome::BindingFailed {
                name: "-count".to_string(),
                error: BindError::new("cannot convert 'blah' to u32."),
            }
        );
    }

    #[test]
    fn duplicate_definitions_rejected() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::unattended();
        let mut arguments = vec![
            Argument::flag("-a", &[], ""),
            Argument::flag("-A", &[], ""),
        ];

        // Execute & verify
        let result = engine_parse(&options, false, &["-a"], &mut arguments, &interface);
        assert_matches!(result, Err(ParseError::Config(_)));
    }

    #[test]
    fn prompts_for_missing_inline_value() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::attended();
        interface.respond("bob");
        let mut user = String::new();
        let mut arguments = vec![Argument::required_value(
            "-userName",
            &[],
            "The user to log in as.",
            store_into(&mut user),
        )];

        // Execute
        let outcome =
            engine_parse(&options, true, &["-userName"], &mut arguments, &interface).unwrap();

        // Verify
        assert_eq!(outcome, ParseOutcome::Success);
        drop(arguments);
        assert_eq!(user, "bob");
        let (messages, _, prompts) = interface.consume();
        assert_eq!(
            messages,
            vec!["Please provide a value for the argument -userName - The user to log in as."
                .to_string()]
        );
        assert_eq!(prompts, vec!["-userName: ".to_string()]);
    }

    #[test]
    fn backfills_unmentioned_required_values() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::attended();
        interface.respond("hunter2");
        let mut user = String::new();
        let mut password = String::new();
        let mut arguments = vec![
            Argument::required_value("-userName", &[], "", store_into(&mut user)),
            Argument::required_password("-password", &[], "", store_into(&mut password)),
        ];

        // Execute
        let outcome = engine_parse(
            &options,
            true,
            &["-userName", "bob"],
            &mut arguments,
            &interface,
        )
        .unwrap();

        // Verify: the password prompt is masked.
        assert_eq!(outcome, ParseOutcome::Success);
        drop(arguments);
        assert_eq!(user, "bob");
        assert_eq!(password, "hunter2");
        let (_, _, prompts) = interface.consume();
        assert_eq!(prompts, vec!["masked:-password: ".to_string()]);
    }

    #[test]
    fn backfill_skipped_when_help_requested() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::attended();
        let mut user = String::new();
        let mut arguments = vec![Argument::required_value(
            "-userName",
            &[],
            "",
            store_into(&mut user),
        )];

        // Execute
        let outcome = engine_parse(&options, true, &["-help"], &mut arguments, &interface).unwrap();

        // Verify: no prompt fired; the required argument is reported instead.
        assert_eq!(
            outcome,
            ParseOutcome::MissingRequired {
                names: vec!["-userName".to_string()]
            }
        );
        let (_, _, prompts) = interface.consume();
        assert!(prompts.is_empty());
    }

    #[test]
    fn declined_prompt_is_a_missing_value() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::attended();
        interface.decline();
        let mut arguments = vec![Argument::required_value("-userName", &[], "", |_| Ok(()))];

        // Execute & verify
        let outcome = engine_parse(&options, true, &[], &mut arguments, &interface).unwrap();
        assert_eq!(
            outcome,
            ParseOutcome::MissingValue {
                name: "-userName".to_string()
            }
        );
    }

    #[test]
    fn unattended_interface_never_prompts() {
        // Setup
        let options = ParseOptions::default();
        let interface = InMemoryInterface::unattended();
        let mut arguments = vec![Argument::required_value("-userName", &[], "", |_| Ok(()))];

        // Execute
        let outcome =
            engine_parse(&options, true, &["-userName"], &mut arguments, &interface).unwrap();

        // Verify
        assert_eq!(
            outcome,
            ParseOutcome::MissingValue {
                name: "-userName".to_string()
            }
        );
        let (_, _, prompts) = interface.consume();
        assert!(prompts.is_empty());
    }
}
