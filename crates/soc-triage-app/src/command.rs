//! Interactive input commands.

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the input with this text and submit it.
    Alert(String),
    /// Prefill sample (zero-based index).
    Sample(usize),
    /// Submit the current input.
    Submit,
    /// Print history.
    History,
    /// Print help.
    Help,
    /// Leave the session.
    Quit,
    /// Unrecognized or malformed command, with a message for the user.
    Invalid(String),
}

/// Help text for interactive mode.
pub const HELP_TEXT: &str = "\
Type or paste an alert and press Enter to analyze it.
An empty line analyzes the current input.
  :sample <n>  prefill sample alert n
  :submit      analyze the current input
  :history     list past analyses, newest first
  :help        show this help
  :quit        exit";

/// Parses one line of interactive input.
///
/// Lines starting with `:` are commands and an empty line submits the current
/// input; anything else is alert text.
pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    if trimmed.is_empty() {
        return Command::Submit;
    }
    let Some(command) = trimmed.strip_prefix(':') else {
        return Command::Alert(line.to_string());
    };

    let mut parts = command.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let argument = parts.next();

    match (name, argument) {
        ("sample", Some(raw)) => match raw.parse::<usize>() {
            Ok(number) if number >= 1 => Command::Sample(number - 1),
            _ => Command::Invalid(format!("sample number must be 1 or greater, got '{raw}'")),
        },
        ("sample", None) => Command::Invalid("usage: :sample <n>".to_string()),
        ("submit", None) => Command::Submit,
        ("history", None) => Command::History,
        ("help", None) => Command::Help,
        ("quit" | "exit", None) => Command::Quit,
        _ => Command::Invalid(format!("unknown command ':{command}'")),
    }
}
