use crate::archive::ArchiveItem;
use crate::cli::context::{CommandError, CommandResult, ShellContext};
use crate::cli::output;
use crate::domain::{Displayable, Entry, PanelId, ScreenId, TabId};
use crate::navigation::BackOutcome;

use super::{usage_error, CommandDefinition};

pub(crate) fn definitions() -> Vec<CommandDefinition> {
    vec![
        CommandDefinition::new(
            "tab",
            "Switch bottom bar tab",
            "tab <archive|statistics|settings>",
            cmd_tab,
        ),
        CommandDefinition::new(
            "search",
            "Open search, optionally filtering entries",
            "search [query]",
            cmd_search,
        ),
        CommandDefinition::new("list", "List entries grouped by month", "list", cmd_list),
        CommandDefinition::new("open", "Open an entry", "open <id>", cmd_open),
        CommandDefinition::new("back", "Go back one screen", "back", cmd_back),
        CommandDefinition::new("status", "Show screen, panels and wizard state", "status", cmd_status),
    ]
}

fn cmd_tab(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage_error("tab <archive|statistics|settings>"));
    };
    let tab: TabId = raw.parse()?;
    context.session.open_tab(tab)?;
    Ok(())
}

fn cmd_search(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if context.session.current_screen() != Some(ScreenId::Search) {
        context.session.open_search()?;
    }
    if args.is_empty() {
        return Ok(());
    }
    let query = args.join(" ");
    let found = context.session.search(&query)?;
    if found.is_empty() {
        output::info(format!("No entries match `{}`.", query));
    }
    for entry in &found {
        print_entry_line(entry);
    }
    Ok(())
}

fn cmd_list(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let items = context.session.archive()?;
    if items.is_empty() {
        output::info("The diary is empty. Use `new` to write the first entry.");
    }
    for item in items {
        match item {
            ArchiveItem::Divider(month) => output::section(month),
            ArchiveItem::Row(row) => output::info(format!(
                "  #{:<4} {} {}  {:<22} {}",
                row.id, row.date, row.time, row.situation, row.mood
            )),
        }
    }
    Ok(())
}

fn cmd_open(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = match args {
        [raw] => raw
            .trim_start_matches('#')
            .parse::<u64>()
            .map_err(|_| CommandError::InvalidArguments(format!("`{}` is not an entry id", raw)))?,
        _ => return Err(usage_error("open <id>")),
    };
    let entry = context.session.open_entry(id)?;
    print_entry_details(&entry);
    Ok(())
}

fn cmd_back(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    match context.session.back()? {
        BackOutcome::Exit => output::info("Goodbye."),
        BackOutcome::Restored(screen) => output::info(format!("Back on {}.", screen)),
    }
    Ok(())
}

fn cmd_status(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let session = &context.session;
    output::section("Status");
    let stack: Vec<&str> = session
        .navigation()
        .stack()
        .as_slice()
        .iter()
        .map(|screen| screen.label())
        .collect();
    let current = session.current_screen().map_or("closed", ScreenId::label);
    output::info(format!("  Screen : {}", current));
    output::info(format!("  Stack  : {}", stack.join(" > ")));

    let board = session.compositor().board();
    let bars: Vec<String> = board
        .visible_bars()
        .iter()
        .map(|panel| format!("{:?}", panel))
        .collect();
    output::info(format!("  Bars   : {}", bars.join(", ")));
    if let Some(tab) = board.selected_tab() {
        output::info(format!("  Tab    : {}", tab.title()));
    }

    if let Some(wizard) = session.wizard() {
        let sections: Vec<&str> = wizard
            .current_step_sections()
            .iter()
            .map(|section| section.label())
            .collect();
        output::info(format!(
            "  Wizard : {} ({}%)",
            wizard.step_title(),
            wizard.progress_percent()
        ));
        output::info(format!("  Shows  : {}", sections.join(", ")));
        output::info(format!("  Prompt : {}", wizard.draft().prompt()));
        output::info(format!("  Button : {}", wizard.primary_button()));
        for line in wizard.draft().summary_lines() {
            output::info(format!("    {}", line));
        }
    }
    if let Some(title) = board.title(PanelId::NoteViewTopBar) {
        if session.opened_entry().is_some() {
            output::info(format!("  Entry  : {}", title));
        }
    }
    Ok(())
}

pub(crate) fn print_entry_line(entry: &Entry) {
    output::info(format!("  {}  {}", entry.display_label(), entry.discomfort_before));
}

pub(crate) fn print_entry_details(entry: &Entry) {
    output::info(format!("  Mode      : {}", entry.situation));
    output::info(format!("  Before    : {}", entry.discomfort_before));
    output::info(format!("  Emotions  : {}", entry.emotions.join(", ")));
    output::info(format!("  Influence : {}", entry.influence_factors().join(", ")));
    if !entry.feelings.is_empty() {
        output::info(format!("  Reflection: {}", entry.feelings));
    }
    if !entry.actions.is_empty() {
        output::info(format!("  Actions   : {}", entry.actions));
    }
}
