use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::config::Theme;
use crate::domain::ScreenId;

use super::{parse_switch, usage_error, CommandDefinition};

const SETTINGS_USAGE: &str =
    "settings [show | theme <system|light|dark> | nickname <name> | structure <discomfort|reflection|actions> <on|off>]";
const PIN_USAGE: &str = "pin <code> | pin setup | pin remove";

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("settings", "Open or change settings", SETTINGS_USAGE, cmd_settings),
        CommandDefinition::new("pin", "Unlock, set up or remove the PIN", PIN_USAGE, cmd_pin),
    ]
}

fn cmd_settings(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.session.current_screen() != Some(ScreenId::Settings) {
        context.session.open_settings()?;
    }
    match args {
        [] => return Ok(()),
        ["show"] => {
            print_settings(context);
            return Ok(());
        }
        ["theme", raw] => {
            let theme: Theme = raw.parse()?;
            context.session.update_settings(|settings| settings.theme = theme);
        }
        ["nickname", rest @ ..] if !rest.is_empty() => {
            let nickname = rest.join(" ");
            context
                .session
                .update_settings(|settings| settings.set_nickname(&nickname));
        }
        ["structure", part, switch] => {
            let enabled = parse_switch(switch)?;
            let part = part.to_ascii_lowercase();
            if !matches!(part.as_str(), "discomfort" | "reflection" | "actions") {
                return Err(CommandError::InvalidArguments(format!(
                    "unknown structure part `{}`",
                    part
                )));
            }
            context.session.update_settings(|settings| {
                let toggles = &mut settings.structure;
                match part.as_str() {
                    "discomfort" => toggles.discomfort_level = enabled,
                    "reflection" => toggles.reflection = enabled,
                    _ => toggles.actions = enabled,
                }
            });
        }
        _ => return Err(usage_error(SETTINGS_USAGE)),
    }
    context.session.save_settings()?;
    output::success("Settings saved.");
    Ok(())
}

fn print_settings(context: &ShellContext) {
    let settings = context.session.settings();
    output::section("Settings");
    output::info(format!("  Theme      : {:?}", settings.theme));
    output::info(format!("  Nickname   : {}", settings.nickname));
    output::info(format!(
        "  PIN        : {}",
        if settings.has_pin() { "set" } else { "not set" }
    ));
    output::info(format!(
        "  Structure  : discomfort={} reflection={} actions={}",
        settings.structure.discomfort_level,
        settings.structure.reflection,
        settings.structure.actions
    ));
}

fn cmd_pin(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        ["setup"] => {
            context.session.open_pin_setup()?;
            output::info("Type the new PIN with `pin <code>`.");
        }
        ["remove"] => context.session.remove_pin()?,
        [code] => {
            if context.session.enter_pin(code)? && context.session.pin_mode().is_none() {
                if let Some(screen) = context.session.current_screen() {
                    output::success(format!("Unlocked. Now on {}.", screen));
                }
            }
        }
        _ => return Err(usage_error(PIN_USAGE)),
    }
    Ok(())
}
