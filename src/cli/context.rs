use std::io;

use rustyline::error::ReadlineError;
use thiserror::Error;

use crate::config::ConfigManager;
use crate::domain::ScreenId;
use crate::errors::DiaryError;
use crate::session::DiarySession;
use crate::storage::JsonEntryStore;
use crate::utils::paths::PathResolver;
use crate::wizard::EntryDraft;

use super::commands::{self, CommandDefinition, CommandRegistry};
use super::output;
use super::terminal::TerminalCompositor;

pub type ShellSession = DiarySession<JsonEntryStore, TerminalCompositor>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Failures that stop the shell.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Diary(#[from] DiaryError),
    #[error(transparent)]
    Readline(#[from] ReadlineError),
    #[error(transparent)]
    Io(#[from] io::Error),
}

/// Failures of a single command; reported and the shell carries on.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("{0}")]
    InvalidArguments(String),
    #[error(transparent)]
    Diary(#[from] DiaryError),
    #[error("exit requested")]
    ExitRequested,
}

pub type CommandResult = Result<(), CommandError>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LoopControl {
    Continue,
    Exit,
}

pub struct ShellContext {
    pub mode: CliMode,
    pub registry: CommandRegistry,
    pub session: ShellSession,
    pub running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        let base = PathResolver::base_dir();
        let config = ConfigManager::with_base_dir(base.clone())?;
        let settings = config.load()?;
        let store = JsonEntryStore::open(Some(base))?;
        let mut session = DiarySession::new(store, TerminalCompositor::new(true), settings)
            .with_config(config);
        session.start()?;

        Ok(Self {
            mode,
            registry: CommandRegistry::new(commands::all_groups()),
            session,
            running: true,
        })
    }

    pub fn command(&self, name: &str) -> Option<&CommandDefinition> {
        self.registry.get(name)
    }

    pub fn prompt(&self) -> String {
        let screen = self
            .session
            .current_screen()
            .map_or("closed", ScreenId::label);
        format!("sterdiary:{}> ", screen)
    }

    pub(crate) fn dispatch(
        &mut self,
        command: &str,
        raw: &str,
        args: &[&str],
    ) -> Result<LoopControl, CommandError> {
        let Some(handler) = self.registry.get(command).map(|definition| definition.handler)
        else {
            self.suggest_command(raw);
            return Ok(LoopControl::Continue);
        };
        let result = handler(self, args);
        self.flush_notices();
        match result {
            Ok(()) if self.session.is_exited() => Ok(LoopControl::Exit),
            Ok(()) => Ok(LoopControl::Continue),
            Err(CommandError::ExitRequested) => Ok(LoopControl::Exit),
            Err(err) => Err(err),
        }
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::warning(format!(
            "Unknown command `{}`. Type `help` to see available commands.",
            input
        ));
        if let Some(name) = self.registry.closest(input) {
            output::hint(format!("Did you mean `{}`?", name));
        }
    }

    pub(crate) fn report_error(&self, err: CommandError) {
        match err {
            CommandError::ExitRequested => {}
            CommandError::InvalidArguments(message) => {
                output::error(message);
                output::hint("Use `help <command>` for usage details.");
            }
            CommandError::Diary(err) => output::error(err),
        }
    }

    pub fn flush_notices(&mut self) {
        for notice in self.session.take_notices() {
            output::warning(notice);
        }
    }

    /// Draft edited by the field commands: the editor's while editing, the
    /// wizard's otherwise.
    pub fn active_draft(&mut self) -> Result<&mut EntryDraft, CommandError> {
        if self.session.current_screen() == Some(ScreenId::NoteEdit) {
            Ok(self.session.edit_draft_mut()?)
        } else {
            Ok(self.session.draft_mut()?)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn command_errors_wrap_diary_errors() {
        let err: CommandError = DiaryError::NotFound("entry 4".into()).into();
        assert_eq!(err.to_string(), "Not found: entry 4");
    }
}
