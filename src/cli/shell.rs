use std::io::{self, BufRead, StdinLock};

use rustyline::{
    completion::{Completer, Pair},
    error::ReadlineError,
    highlight::Highlighter,
    hint::Hinter,
    history::DefaultHistory,
    validate::Validator,
    Context as ReadlineContext, Editor, Helper,
};

use crate::domain::INFLUENCE_FACTORS;

use super::context::{CliError, CliMode, LoopControl, ShellContext};
use super::output;

pub const SCRIPT_ENV: &str = "STERDIARY_CLI_SCRIPT";

/// Where command lines come from.
trait LineSource {
    /// `None` once input is exhausted or the user closed the prompt.
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>, CliError>;

    fn remember(&mut self, _line: &str) {}
}

struct EditorSource {
    editor: Editor<CommandHelper, DefaultHistory>,
}

impl LineSource for EditorSource {
    fn next_line(&mut self, prompt: &str) -> Result<Option<String>, CliError> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(Some(line)),
            Err(ReadlineError::Interrupted) | Err(ReadlineError::Eof) => {
                output::info("Exiting shell.");
                Ok(None)
            }
            Err(err) => Err(err.into()),
        }
    }

    fn remember(&mut self, line: &str) {
        if let Err(err) = self.editor.add_history_entry(line) {
            tracing::debug!(%err, "history entry dropped");
        }
    }
}

struct ScriptSource<'a> {
    lines: io::Lines<StdinLock<'a>>,
}

impl LineSource for ScriptSource<'_> {
    fn next_line(&mut self, _prompt: &str) -> Result<Option<String>, CliError> {
        self.lines.next().transpose().map_err(CliError::from)
    }
}

pub fn run_cli() -> Result<(), CliError> {
    let mode = if std::env::var_os(SCRIPT_ENV).is_some() {
        output::disable_colors();
        CliMode::Script
    } else {
        CliMode::Interactive
    };

    let mut context = ShellContext::new(mode)?;
    context.flush_notices();
    tracing::debug!(?mode, screen = ?context.session.current_screen(), "shell started");

    match mode {
        CliMode::Interactive => {
            let mut editor = Editor::<CommandHelper, DefaultHistory>::new()?;
            editor.set_helper(Some(CommandHelper::new(&context)));
            output::hint("Type `help` to list commands.");
            drive(&mut context, &mut EditorSource { editor })
        }
        CliMode::Script => {
            let stdin = io::stdin();
            let lines = stdin.lock().lines();
            drive(&mut context, &mut ScriptSource { lines })
        }
    }
}

fn drive(context: &mut ShellContext, source: &mut dyn LineSource) -> Result<(), CliError> {
    while context.running {
        let prompt = context.prompt();
        let Some(line) = source.next_line(&prompt)? else {
            break;
        };
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        source.remember(line);
        if execute(context, line) == LoopControl::Exit {
            context.running = false;
        }
    }
    Ok(())
}

/// Runs one command line; failures are reported and the shell carries on.
fn execute(context: &mut ShellContext, line: &str) -> LoopControl {
    let tokens = match shell_words::split(line) {
        Ok(tokens) => tokens,
        Err(err) => {
            output::warning(format!("Could not read that line: {}", err));
            return LoopControl::Continue;
        }
    };
    let Some((raw, rest)) = tokens.split_first() else {
        return LoopControl::Continue;
    };
    let args: Vec<&str> = rest.iter().map(String::as_str).collect();
    match context.dispatch(&raw.to_lowercase(), raw, &args) {
        Ok(control) => control,
        Err(err) => {
            context.report_error(err);
            LoopControl::Continue
        }
    }
}

/// Values offered after a command name.
fn argument_choices(command: &str) -> &'static [&'static str] {
    match command {
        "tab" => &["archive", "statistics", "settings"],
        "mode" => &["day", "moment"],
        "factor" => &INFLUENCE_FACTORS,
        "leave" => &["confirm", "cancel"],
        "pin" => &["setup", "remove"],
        "settings" => &["show", "theme", "nickname", "structure"],
        _ => &[],
    }
}

/// Completes command names and their first argument, and hints the usage of
/// a fully typed command.
struct CommandHelper {
    commands: Vec<(&'static str, &'static str)>,
}

impl CommandHelper {
    fn new(context: &ShellContext) -> Self {
        let mut commands: Vec<(&'static str, &'static str)> = context
            .registry
            .iter()
            .map(|definition| (definition.name, definition.usage))
            .collect();
        commands.sort_unstable();
        Self { commands }
    }

    fn candidates(&self, line: &str) -> (usize, Vec<String>) {
        let start = line.rfind(char::is_whitespace).map_or(0, |index| index + 1);
        let needle = line[start..].to_lowercase();
        let words: Vec<&str> = line[..start].split_whitespace().collect();
        let matches = match words.as_slice() {
            [] => self
                .commands
                .iter()
                .map(|(name, _)| *name)
                .filter(|name| name.starts_with(&needle))
                .map(str::to_string)
                .collect(),
            [command] => argument_choices(&command.to_lowercase())
                .iter()
                .filter(|choice| choice.to_lowercase().starts_with(&needle))
                .map(|choice| choice.to_string())
                .collect(),
            _ => Vec::new(),
        };
        (start, matches)
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
        let (start, matches) = self.candidates(&line[..pos]);
        let pairs = matches
            .into_iter()
            .map(|value| Pair {
                display: value.clone(),
                replacement: value,
            })
            .collect();
        Ok((start, pairs))
    }
}

impl Hinter for CommandHelper {
    type Hint = String;

    fn hint(&self, line: &str, pos: usize, _ctx: &ReadlineContext<'_>) -> Option<String> {
        if pos < line.len() {
            return None;
        }
        let typed = line.trim_start();
        self.commands
            .iter()
            .find(|(name, _)| *name == typed)
            .and_then(|(name, usage)| usage.strip_prefix(name))
            .filter(|rest| !rest.is_empty())
            .map(str::to_string)
    }
}

impl Highlighter for CommandHelper {}

impl Validator for CommandHelper {}
