use chrono::{NaiveDate, NaiveTime};

use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::domain::{Displayable, EntryMode, ScreenId};
use crate::navigation::BackOutcome;

use super::browse::print_entry_details;
use super::{usage_error, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new("new", "Start a new entry", "new", cmd_new),
        CommandDefinition::new("mode", "Choose what the entry describes", "mode <day|moment>", cmd_mode),
        CommandDefinition::new("score", "Set the discomfort level", "score <0-100>", cmd_score),
        CommandDefinition::new(
            "emotion",
            "Toggle an emotion, or pick one in the emotion picker",
            "emotion <name>",
            cmd_emotion,
        ),
        CommandDefinition::new("factor", "Toggle an influence factor", "factor <name>", cmd_factor),
        CommandDefinition::new("reflect", "Write the reflection text", "reflect <text>", cmd_reflect),
        CommandDefinition::new(
            "when",
            "Change the entry date and time",
            "when <YYYY-MM-DD> [HH:MM]",
            cmd_when,
        ),
        CommandDefinition::new("next", "Next wizard step", "next", cmd_next),
        CommandDefinition::new("prev", "Previous wizard step, or ask to leave", "prev", cmd_prev),
        CommandDefinition::new("finish", "Save the new entry", "finish", cmd_finish),
        CommandDefinition::new(
            "leave",
            "Leave the wizard, discarding the draft",
            "leave [confirm|cancel]",
            cmd_leave,
        ),
        CommandDefinition::new("picker", "Open the emotion picker", "picker", cmd_picker),
        CommandDefinition::new("edit", "Edit the open entry", "edit", cmd_edit),
        CommandDefinition::new("act", "Write what you did, while editing", "act <text>", cmd_act),
        CommandDefinition::new("save-edit", "Save changes to the open entry", "save-edit", cmd_save_edit),
        CommandDefinition::new("delete", "Delete the open entry", "delete", cmd_delete),
    ]
}

fn joined(args: &[&str], usage: &str) -> Result<String, CommandError> {
    let text = args.join(" ");
    if text.trim().is_empty() {
        return Err(usage_error(usage));
    }
    Ok(text)
}

fn cmd_new(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.open_new_entry()?;
    output::info("Choose a mode: `mode day` or `mode moment`.");
    Ok(())
}

fn cmd_mode(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error("mode <day|moment>"));
    };
    let mode: EntryMode = raw.parse()?;
    if context.session.select_mode(mode)? {
        output::info(context.session.draft_mut()?.prompt());
    }
    Ok(())
}

fn cmd_score(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let score = match args {
        [raw] => raw
            .trim_end_matches('%')
            .parse::<u8>()
            .ok()
            .filter(|value| *value <= 100),
        _ => None,
    }
    .ok_or_else(|| usage_error("score <0-100>"))?;
    context.active_draft()?.set_discomfort(score)?;
    Ok(())
}

fn cmd_emotion(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = joined(args, "emotion <name>")?;
    if context.session.current_screen() == Some(ScreenId::EmotionPicker) {
        if context.session.pick_emotion(&name)? {
            output::success(format!("Picked {}.", name.trim()));
        } else {
            output::info(format!("{} is already there.", name.trim()));
        }
        return Ok(());
    }
    let selected = context.active_draft()?.toggle_emotion(&name)?;
    let verb = if selected { "Selected" } else { "Removed" };
    output::info(format!("{} {}.", verb, name.trim()));
    Ok(())
}

fn cmd_factor(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let name = joined(args, "factor <name>")?;
    let selected = context.active_draft()?.toggle_factor(&name)?;
    let verb = if selected { "Selected" } else { "Removed" };
    output::info(format!("{} {}.", verb, name.trim()));
    Ok(())
}

fn cmd_reflect(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let text = joined(args, "reflect <text>")?;
    context.active_draft()?.set_reflection(&text);
    Ok(())
}

fn cmd_when(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    const USAGE: &str = "when <YYYY-MM-DD> [HH:MM]";
    let (date, time) = match args {
        [date] => (*date, None),
        [date, time] => (*date, Some(*time)),
        _ => return Err(usage_error(USAGE)),
    };
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| usage_error(USAGE))?;
    let time = time
        .map(|raw| NaiveTime::parse_from_str(raw, "%H:%M").map_err(|_| usage_error(USAGE)))
        .transpose()?;
    let draft = context.active_draft()?;
    draft.set_date(date);
    if let Some(time) = time {
        draft.set_time(time);
    }
    Ok(())
}

fn cmd_next(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.session.wizard_next()? {
        output::info("This is the last step. Use `finish` to save the entry.");
    }
    Ok(())
}

fn cmd_prev(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.session.wizard_back()? {
        output::warning("Leave the new entry? Unsaved answers are lost. `leave confirm` or `leave cancel`.");
    }
    Ok(())
}

fn cmd_finish(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if let Some(entry) = context.session.finish_entry()? {
        output::success(format!("Entry #{} saved.", entry.id));
    }
    Ok(())
}

fn cmd_leave(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            context.session.request_leave_wizard()?;
            output::warning("Leave the new entry? Unsaved answers are lost. `leave confirm` or `leave cancel`.");
        }
        ["confirm"] | ["yes"] => {
            if !context.session.leave_requested() {
                context.session.request_leave_wizard()?;
            }
            if context.session.confirm_leave_wizard()? == BackOutcome::Exit {
                output::info("Goodbye.");
            }
        }
        ["cancel"] | ["no"] => context.session.cancel_leave_wizard(),
        _ => return Err(usage_error("leave [confirm|cancel]")),
    }
    Ok(())
}

fn cmd_picker(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.open_emotion_picker()?;
    let names: Vec<String> = context
        .session
        .picker_tags()?
        .into_iter()
        .map(|tag| tag.display_label())
        .collect();
    output::info(names.join(", "));
    Ok(())
}

fn cmd_edit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    context.session.start_edit()?;
    output::info("Editing. Use `score`, `emotion`, `factor`, `reflect`, `act`, then `save-edit`.");
    Ok(())
}

fn cmd_act(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let text = joined(args, "act <text>")?;
    context.session.set_edit_actions(&text)?;
    Ok(())
}

fn cmd_save_edit(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let entry = context.session.save_edit()?;
    print_entry_details(&entry);
    Ok(())
}

fn cmd_delete(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let entry = context.session.delete_open_entry()?;
    output::success(format!("Entry #{} deleted.", entry.id));
    Ok(())
}
