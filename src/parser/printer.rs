use terminal_size::{terminal_size, Width};

use crate::api::{Argument, ArgumentTemplate, Command, HelpCommandTemplate};
use crate::constant::{FALLBACK_TERMINAL_WIDTH, USAGE_PREFIX_OFFSET};
use crate::parser::interface::UserInterface;
use crate::parser::options::{ParseOptions, WriteUsageMode};

/// A usage-rendering hook: return `Some(line)` to replace an argument's
/// detail row wholesale, or `None` to keep the default rendering.
pub type UsageOverride<'f> = &'f dyn Fn(&str) -> Option<String>;

const DETAIL_INDENT: usize = 2;

/// The display-relevant slice of an argument definition.
#[derive(Debug, Clone)]
pub(crate) struct UsageRow {
    pub(crate) required: bool,
    pub(crate) requires_value: bool,
    pub(crate) name: String,
    pub(crate) description: String,
    pub(crate) aliases: Vec<String>,
    pub(crate) ordinal: i32,
}

impl From<&Argument<'_>> for UsageRow {
    fn from(argument: &Argument<'_>) -> Self {
        Self {
            required: argument.is_required(),
            requires_value: argument.requires_value(),
            name: argument.name().to_string(),
            description: argument.description().to_string(),
            aliases: argument.aliases().to_vec(),
            ordinal: argument.display_ordinal(),
        }
    }
}

impl From<&ArgumentTemplate> for UsageRow {
    fn from(template: &ArgumentTemplate) -> Self {
        Self {
            required: template.is_required,
            requires_value: template.requires_value,
            name: template.name.clone(),
            description: template.description.clone(),
            aliases: template.aliases.clone(),
            ordinal: i32::MAX,
        }
    }
}

/// The display-relevant slice of a command definition.
#[derive(Debug, Clone)]
pub(crate) struct CommandRow {
    pub(crate) name: String,
    pub(crate) title: String,
    pub(crate) description: String,
    pub(crate) ordinal: i32,
    pub(crate) arguments: Vec<UsageRow>,
}

impl From<&Command<'_>> for CommandRow {
    fn from(command: &Command<'_>) -> Self {
        Self {
            name: command.name().to_string(),
            title: command.display_title().to_string(),
            description: command.description().to_string(),
            ordinal: command.display_ordinal(),
            arguments: command.arguments().iter().map(UsageRow::from).collect(),
        }
    }
}

impl From<&HelpCommandTemplate> for CommandRow {
    fn from(template: &HelpCommandTemplate) -> Self {
        Self {
            name: template.name.clone(),
            title: template.title.clone(),
            description: template.description.clone(),
            ordinal: i32::MAX,
            arguments: vec![UsageRow::from(&template.command_argument)],
        }
    }
}

/// Renders usage text through a [`UserInterface`], wrapping to the terminal
/// width.
pub(crate) struct Printer<'o> {
    program: &'o str,
    options: &'o ParseOptions,
    terminal_width: usize,
}

impl<'o> Printer<'o> {
    pub(crate) fn terminal(program: &'o str, options: &'o ParseOptions) -> Self {
        let terminal_width = match terminal_size() {
            Some((Width(width), _)) => width as usize,
            None => FALLBACK_TERMINAL_WIDTH,
        };
        Self {
            program,
            options,
            terminal_width,
        }
    }

    #[cfg(test)]
    pub(crate) fn fixed(program: &'o str, options: &'o ParseOptions, width: usize) -> Self {
        Self {
            program,
            options,
            terminal_width: width,
        }
    }

    /// Top-level argument usage: summary line, blank line, detail rows.
    pub(crate) fn write_arguments(
        &self,
        interface: &dyn UserInterface,
        rows: &[UsageRow],
        usage_override: Option<UsageOverride<'_>>,
    ) {
        let rows = sorted(rows);
        self.write_summary(interface, None, &rows);
        interface.print(String::default());
        self.write_details(interface, &rows, usage_override);
    }

    /// Detailed usage for a single command.
    pub(crate) fn write_command(
        &self,
        interface: &dyn UserInterface,
        command: &CommandRow,
        usage_override: Option<UsageOverride<'_>>,
    ) {
        let rows = sorted(&command.arguments);
        self.write_summary(interface, Some(&command.name), &rows);

        if !command.description.is_empty() {
            interface.print(String::default());
            for line in wrap(&command.description, self.terminal_width) {
                interface.print(line);
            }
        }

        if !rows.is_empty() {
            interface.print(String::default());
            self.write_details(interface, &rows, usage_override);
        }
    }

    /// The command listing, at the detail level of
    /// [`ParseOptions::write_usage_mode`].
    pub(crate) fn write_command_list(&self, interface: &dyn UserInterface, rows: &[CommandRow]) {
        let mut rows: Vec<&CommandRow> = rows.iter().collect();
        rows.sort_by(|a, b| {
            a.ordinal
                .cmp(&b.ordinal)
                .then_with(|| a.name.to_ascii_lowercase().cmp(&b.name.to_ascii_lowercase()))
        });

        interface.print(format!("Usage: {} <COMMAND>", self.program));
        interface.print(String::default());
        interface.print("Available Commands:".to_string());

        for row in rows {
            match self.options.write_usage_mode {
                WriteUsageMode::CommandNameOnly => {
                    interface.print(format!("{:DETAIL_INDENT$}{}", "", row.name));
                }
                WriteUsageMode::CommandNameAndTitle => {
                    self.write_indented(
                        interface,
                        DETAIL_INDENT,
                        &format!("{} - {}", row.name, row.title),
                    );
                }
                WriteUsageMode::CommandNameAndArguments => {
                    self.write_indented(
                        interface,
                        DETAIL_INDENT,
                        &format!("{} - {}", row.name, row.title),
                    );
                    let arguments = sorted(&row.arguments);
                    for argument in &arguments {
                        self.write_detail_row(interface, argument, DETAIL_INDENT * 2, None);
                    }
                }
            }
        }
    }

    fn write_summary(
        &self,
        interface: &dyn UserInterface,
        command: Option<&str>,
        rows: &[UsageRow],
    ) {
        let width = self.terminal_width.saturating_sub(USAGE_PREFIX_OFFSET);
        let mut head = self.program.to_string();
        if let Some(command) = command {
            head.push(' ');
            head.push_str(command);
        }

        // Pack whole decorated items per line; never split one across lines.
        let mut lines: Vec<String> = Vec::default();
        let mut current = head;
        for row in rows {
            let item = self.decorate(row);
            if current.len() + 1 + item.len() <= width {
                current.push(' ');
                current.push_str(&item);
            } else {
                lines.push(std::mem::replace(&mut current, item));
            }
        }
        lines.push(current);

        for (i, line) in lines.into_iter().enumerate() {
            if i == 0 {
                interface.print(format!("Usage: {line}"));
            } else {
                interface.print(format!("{:USAGE_PREFIX_OFFSET$}{line}", ""));
            }
        }
    }

    fn write_details(
        &self,
        interface: &dyn UserInterface,
        rows: &[UsageRow],
        usage_override: Option<UsageOverride<'_>>,
    ) {
        for row in rows {
            self.write_detail_row(interface, row, DETAIL_INDENT, usage_override);
        }
    }

    fn write_detail_row(
        &self,
        interface: &dyn UserInterface,
        row: &UsageRow,
        indent: usize,
        usage_override: Option<UsageOverride<'_>>,
    ) {
        if let Some(hook) = usage_override {
            if let Some(line) = hook(&row.name) {
                interface.print(format!("{:indent$}{line}", ""));
                return;
            }
        }

        let indicator = &self.options.required_argument_indicator;
        let marker = if row.required {
            indicator.clone()
        } else {
            " ".repeat(indicator.len())
        };

        let mut text = self.value_phrase(row);
        if !row.description.is_empty() {
            text.push_str(" - ");
            text.push_str(&row.description);
        }

        let aliases: Vec<&str> = row
            .aliases
            .iter()
            .map(String::as_str)
            .filter(|alias| !alias.trim().is_empty())
            .collect();
        if !aliases.is_empty() {
            text.push_str(&format!(" ({})", aliases.join(", ")));
        }

        let offset = indent + marker.len();
        let width = self.terminal_width.saturating_sub(offset);
        for (i, line) in wrap(&text, width).into_iter().enumerate() {
            if i == 0 {
                interface.print(format!("{:indent$}{marker}{line}", ""));
            } else {
                interface.print(format!("{:offset$}{line}", ""));
            }
        }
    }

    fn write_indented(&self, interface: &dyn UserInterface, indent: usize, text: &str) {
        let width = self.terminal_width.saturating_sub(indent);
        for line in wrap(text, width) {
            interface.print(format!("{:indent$}{line}", ""));
        }
    }

    // "-name <value>" for a space separator, "-name=<value>" otherwise.
    fn value_phrase(&self, row: &UsageRow) -> String {
        if row.requires_value {
            format!(
                "{}{}{}",
                row.name, self.options.argument_value_separator, self.options.argument_value_indicator
            )
        } else {
            row.name.clone()
        }
    }

    // "<-name <value>>" / "[-name]" per the configured formats.
    fn decorate(&self, row: &UsageRow) -> String {
        let format = if row.required {
            &self.options.required_argument_format
        } else {
            &self.options.optional_argument_format
        };
        format.replacen("{}", &self.value_phrase(row), 1)
    }
}

// Required first, then the ordinal hint, then the name.
fn sorted(rows: &[UsageRow]) -> Vec<UsageRow> {
    let mut rows = rows.to_vec();
    rows.sort_by(|a, b| {
        b.required
            .cmp(&a.required)
            .then_with(|| a.ordinal.cmp(&b.ordinal))
            .then_with(|| a.name.to_ascii_lowercase().cmp(&b.name.to_ascii_lowercase()))
    });
    rows
}

fn wrap(text: &str, width: usize) -> Vec<String> {
    let mut lines = Vec::default();
    let mut current = String::default();

    for word in text.split(' ').filter(|word| !word.is_empty()) {
        if current.is_empty() {
            break_word(width, &mut lines, &mut current, word);
        } else if current.len() + 1 + word.len() <= width {
            current.push(' ');
            current.push_str(word);
        } else {
            lines.push(std::mem::take(&mut current));
            break_word(width, &mut lines, &mut current, word);
        }
    }

    if !current.is_empty() {
        lines.push(current);
    }

    lines
}

// Split a word longer than the line, marking each break with a hyphen.
fn break_word(width: usize, lines: &mut Vec<String>, current: &mut String, word: &str) {
    let stride = std::cmp::max(width.saturating_sub(1), 1);
    let mut start = 0;

    while word.len() - start > width {
        lines.push(format!("{}-", &word[start..start + stride]));
        start += stride;
    }

    current.push_str(&word[start..]);
}
