pub(crate) const HELP_ARGUMENT_NAME: &str = "-help";
pub(crate) const HELP_ARGUMENT_ALIASES: &[&str] = &["-?", "/?"];
pub(crate) const QUIET_ARGUMENT_NAME: &str = "-quiet";
pub(crate) const QUIET_ARGUMENT_ALIASES: &[&str] = &["-q", "/q"];
pub(crate) const INTERACTIVE_ARGUMENT_NAME: &str = "-interactive";

pub(crate) const HELP_COMMAND_NAME: &str = "Help";
pub(crate) const HELP_COMMAND_DESCRIPTION: &str =
    "Displays usage information for the given command";
pub(crate) const HELP_COMMAND_ARGUMENT_NAME: &str = "-command";
pub(crate) const HELP_COMMAND_ARGUMENT_ALIASES: &[&str] = &["-c"];

pub(crate) const ARGUMENT_VALUE_INDICATOR: &str = "<value>";
pub(crate) const REQUIRED_ARGUMENT_INDICATOR: &str = "(*) ";
pub(crate) const REQUIRED_ARGUMENT_FORMAT: &str = "<{}>";
pub(crate) const OPTIONAL_ARGUMENT_FORMAT: &str = "[{}]";

// 7 = the length of the usage prefix, "Usage: ".
pub(crate) const USAGE_PREFIX_OFFSET: usize = 7;
pub(crate) const FALLBACK_TERMINAL_WIDTH: usize = 80;
