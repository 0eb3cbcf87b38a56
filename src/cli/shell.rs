use std::{
    borrow::Cow,
    fmt,
    io::{self, BufRead},
};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::{ValidationContext, ValidationResult, Validator},
    Cmd, Context as ReadlineContext, Editor, Helper, KeyEvent,
};
use shell_words::split;

use crate::cli::core::{CliError, CliMode, CommandError, LoopControl, ShellContext};
use crate::cli::output::info as output_info;

/// Setting this variable switches the shell to reading commands from stdin
/// without prompts or colors.
pub const SCRIPT_ENV: &str = "SPENDLOG_CLI_SCRIPT";

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;

    tracing::info!(?mode, root = %context.storage_root.display(), "shell started");

    let outcome = match mode {
        CliMode::Interactive => run_interactive(&mut context),
        CliMode::Script => run_script(&mut context),
    };
    tracing::debug!(state = %context.status(), "shell stopped");
    outcome
}

fn run_interactive(context: &mut ShellContext) -> Result<(), CliError> {
    let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
    editor.set_helper(Some(CommandHelper::new(context.command_names())));
    editor.bind_sequence(KeyEvent::from('?'), Cmd::Complete);
    output_info("Type `help` for commands, `exit` or Ctrl-D to leave.");

    while context.running {
        let line = match editor.readline(&context.prompt()) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) if context.confirm_exit()? => break,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                output_info("Exiting shell.");
                break;
            }
            Err(err) => return Err(err.into()),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.trim()).ok();
        }
        step(context, &line)?;
    }
    Ok(())
}

fn run_script(context: &mut ShellContext) -> Result<(), CliError> {
    for line in io::stdin().lock().lines() {
        if !context.running {
            break;
        }
        step(context, &line?)?;
    }
    Ok(())
}

/// Runs one input line. Command failures are reported and the shell keeps
/// going; only output or prompt failures propagate.
fn step(context: &mut ShellContext, line: &str) -> Result<(), CliError> {
    let line = line.trim();
    if line.is_empty() || line.starts_with('#') {
        return Ok(());
    }
    match handle_line(context, line) {
        Ok(LoopControl::Continue) => Ok(()),
        Ok(LoopControl::Exit) => {
            context.running = false;
            Ok(())
        }
        Err(err) => context.report_error(err),
    }
}

fn handle_line(context: &mut ShellContext, line: &str) -> Result<LoopControl, CommandError> {
    let tokens = match parse_command_line(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            context.print_warning(&err.message);
            return Ok(LoopControl::Continue);
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return Ok(LoopControl::Continue);
    };

    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    context.last_command = Some(line.to_string());
    context.dispatch(&raw.to_lowercase(), raw, &args)
}

/// Second-word completions for commands that take a fixed action.
const SUBCOMMANDS: &[(&str, &[&str])] = &[
    ("period", &["month", "year", "range"]),
    ("filter", &["show", "reset", "from", "to"]),
    ("category", &["list", "add", "edit", "remove"]),
    ("settings", &["show", "reset", "period"]),
    ("currency", &["USD", "EUR", "RUB"]),
];

struct CommandHelper {
    commands: Vec<String>,
}

impl CommandHelper {
    fn new(names: Vec<&'static str>) -> Self {
        let mut commands: Vec<String> = names
            .into_iter()
            .map(|name| name.to_ascii_lowercase())
            .collect();
        commands.sort();
        commands.dedup();
        Self { commands }
    }

    fn candidates(&self, words: &[&str], needle: &str) -> Vec<String> {
        let needle = needle.to_ascii_lowercase();
        let pool: Vec<String> = match words {
            [] => self.commands.clone(),
            [command] => SUBCOMMANDS
                .iter()
                .find(|(name, _)| command.eq_ignore_ascii_case(name))
                .map(|(_, actions)| actions.iter().map(|action| action.to_string()).collect())
                .unwrap_or_default(),
            _ => Vec::new(),
        };
        pool.into_iter()
            .filter(|candidate| candidate.to_ascii_lowercase().starts_with(&needle))
            .collect()
    }
}

impl Helper for CommandHelper {}

impl Completer for CommandHelper {
    type Candidate = Pair;

    fn complete(
        &self,
        line: &str,
        pos: usize,
        _ctx: &ReadlineContext<'_>,
    ) -> rustyline::Result<(usize, Vec<Pair>)> {
        let prefix = &line[..pos];
        let start = prefix
            .rfind(char::is_whitespace)
            .map(|idx| idx + 1)
            .unwrap_or(0);
        let words: Vec<&str> = prefix[..start].split_whitespace().collect();

        let candidates = self
            .candidates(&words, &prefix[start..])
            .into_iter()
            .map(|name| Pair {
                display: name.clone(),
                replacement: name,
            })
            .collect();
        Ok((start, candidates))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;
}

impl Highlighter for CommandHelper {
    fn highlight<'l>(&self, line: &'l str, _pos: usize) -> Cow<'l, str> {
        Cow::Borrowed(line)
    }
}

impl Validator for CommandHelper {
    fn validate(&self, ctx: &mut ValidationContext) -> rustyline::Result<ValidationResult> {
        let _ = ctx;
        Ok(ValidationResult::Valid(None))
    }
}

pub(crate) fn parse_command_line(input: &str) -> Result<Vec<String>, ParseError> {
    split(input).map_err(|err| ParseError {
        message: err.to_string(),
    })
}

#[derive(Debug)]
pub(crate) struct ParseError {
    message: String,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_command_line_honours_quotes() {
        let tokens = parse_command_line("add 12 \"Food & Dining\" 2024-06-01").unwrap();
        assert_eq!(tokens, vec!["add", "12", "Food & Dining", "2024-06-01"]);
        assert!(parse_command_line("add \"unterminated").is_err());
    }

    #[test]
    fn completes_commands_then_actions() {
        let helper = CommandHelper::new(vec!["period", "list", "help"]);
        assert_eq!(helper.candidates(&[], "pe"), vec!["period"]);
        assert_eq!(helper.candidates(&["period"], "y"), vec!["year"]);
        assert_eq!(helper.candidates(&["currency"], "e"), vec!["EUR"]);
        assert!(helper.candidates(&["list"], "").is_empty());
        assert!(helper.candidates(&["period", "range"], "").is_empty());
    }
}
