pub mod browse;
pub mod entry;
pub mod settings;
pub mod system;

use strsim::levenshtein;

use super::context::{CommandError, CommandResult, ShellContext};

/// Largest edit distance still offered as a "did you mean" suggestion.
const SUGGESTION_DISTANCE: usize = 3;

/// Command groups in the order `help` lists them.
pub(crate) fn all_groups() -> Vec<CommandGroup> {
    vec![
        CommandGroup::new("Browsing", browse::definitions()),
        CommandGroup::new("Writing entries", entry::definitions()),
        CommandGroup::new("Settings and lock", settings::definitions()),
        CommandGroup::new("Shell", system::definitions()),
    ]
}

pub type CommandHandler = fn(&mut ShellContext, &[&str]) -> CommandResult;

#[derive(Clone)]
pub struct CommandDefinition {
    pub name: &'static str,
    pub description: &'static str,
    pub usage: &'static str,
    pub handler: CommandHandler,
}

impl CommandDefinition {
    pub const fn new(
        name: &'static str,
        description: &'static str,
        usage: &'static str,
        handler: CommandHandler,
    ) -> Self {
        Self {
            name,
            description,
            usage,
            handler,
        }
    }
}

pub struct CommandGroup {
    pub title: &'static str,
    pub commands: Vec<CommandDefinition>,
}

impl CommandGroup {
    pub fn new(title: &'static str, commands: Vec<CommandDefinition>) -> Self {
        Self { title, commands }
    }
}

/// Shell commands, grouped for help output and looked up by exact name.
pub struct CommandRegistry {
    groups: Vec<CommandGroup>,
}

impl CommandRegistry {
    pub fn new(groups: Vec<CommandGroup>) -> Self {
        Self { groups }
    }

    pub fn get(&self, name: &str) -> Option<&CommandDefinition> {
        self.iter().find(|definition| definition.name == name)
    }

    pub fn groups(&self) -> &[CommandGroup] {
        &self.groups
    }

    pub fn iter(&self) -> impl Iterator<Item = &CommandDefinition> {
        self.groups.iter().flat_map(|group| group.commands.iter())
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.iter().map(|definition| definition.name)
    }

    /// Nearest known name for a mistyped command. Ties go to the command
    /// listed first.
    pub fn closest(&self, input: &str) -> Option<&'static str> {
        let input = input.to_lowercase();
        self.names()
            .map(|name| (levenshtein(name, &input), name))
            .min_by_key(|(distance, _)| *distance)
            .filter(|(distance, _)| *distance <= SUGGESTION_DISTANCE)
            .map(|(_, name)| name)
    }
}

pub(crate) fn usage_error(usage: &str) -> CommandError {
    CommandError::InvalidArguments(format!("Usage: {}", usage))
}

pub(crate) fn parse_switch(raw: &str) -> Result<bool, CommandError> {
    match raw.to_ascii_lowercase().as_str() {
        "on" | "yes" | "true" => Ok(true),
        "off" | "no" | "false" => Ok(false),
        other => Err(CommandError::InvalidArguments(format!(
            "expected on/off, got `{}`",
            other
        ))),
    }
}
