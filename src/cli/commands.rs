//! Command table and handlers for the shell.

use crate::{
    errors::LedgerError,
    ledger::{totals::format_plain, ExpenseRecord},
    session::InputForm,
};

use super::{
    context::{CliMode, ShellContext},
    output, render, CommandError, CommandResult, LoopControl,
};

type Handler = fn(&mut ShellContext, &[&str]) -> CommandResult;

pub struct CommandSpec {
    pub name: &'static str,
    pub usage: &'static str,
    pub summary: &'static str,
    handler: Handler,
}

pub const COMMANDS: &[CommandSpec] = &[
    CommandSpec {
        name: "budget",
        usage: "budget <amount>",
        summary: "Add an amount to the running budget",
        handler: cmd_budget,
    },
    CommandSpec {
        name: "add",
        usage: "add [<title> <amount> <quantity>]",
        summary: "Record an expense; without arguments submits the form",
        handler: cmd_add,
    },
    CommandSpec {
        name: "list",
        usage: "list",
        summary: "Show all expenses",
        handler: cmd_list,
    },
    CommandSpec {
        name: "edit",
        usage: "edit <id>",
        summary: "Move an expense back into the form for resubmission",
        handler: cmd_edit,
    },
    CommandSpec {
        name: "delete",
        usage: "delete <id>",
        summary: "Remove an expense",
        handler: cmd_delete,
    },
    CommandSpec {
        name: "totals",
        usage: "totals",
        summary: "Show budget, expenses and balance",
        handler: cmd_totals,
    },
    CommandSpec {
        name: "form",
        usage: "form",
        summary: "Show the pending expense form",
        handler: cmd_form,
    },
    CommandSpec {
        name: "reset",
        usage: "reset",
        summary: "Clear all expenses and the budget",
        handler: cmd_reset,
    },
    CommandSpec {
        name: "config",
        usage: "config [delay <seconds> | ids <on|off>]",
        summary: "Show or change settings",
        handler: cmd_config,
    },
    CommandSpec {
        name: "version",
        usage: "version",
        summary: "Show build information",
        handler: cmd_version,
    },
    CommandSpec {
        name: "help",
        usage: "help",
        summary: "List commands",
        handler: cmd_help,
    },
    CommandSpec {
        name: "exit",
        usage: "exit",
        summary: "Leave the shell",
        handler: cmd_exit,
    },
];

pub fn names() -> Vec<&'static str> {
    let mut names: Vec<&'static str> = COMMANDS.iter().map(|spec| spec.name).collect();
    names.push("quit");
    names
}

/// Runs `command`; unknown names get a suggestion rather than an error.
pub fn dispatch(context: &mut ShellContext, command: &str, args: &[&str]) -> CommandResult {
    let command = if command == "quit" { "exit" } else { command };
    match COMMANDS.iter().find(|spec| spec.name == command) {
        Some(spec) => (spec.handler)(context, args),
        None => {
            context.suggest_command(command);
            Ok(LoopControl::Continue)
        }
    }
}

fn usage(name: &str) -> CommandError {
    let text = COMMANDS
        .iter()
        .find(|spec| spec.name == name)
        .map_or(name, |spec| spec.usage);
    CommandError::Usage(text.to_string())
}

fn parse_id(name: &str, args: &[&str]) -> Result<u64, CommandError> {
    match args {
        [raw] => raw
            .parse::<u64>()
            .map_err(|_| CommandError::Input(format!("`{raw}` is not an expense id"))),
        _ => Err(usage(name)),
    }
}

fn cmd_budget(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let [raw] = args else {
        return Err(usage("budget"));
    };
    let totals = context.session.submit_budget(raw)?;
    output::success(format!(
        "Budget is now {}.",
        crate::ledger::format_amount(totals.budget)
    ));
    context.print_totals();
    Ok(LoopControl::Continue)
}

fn cmd_add(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [title, amount, quantity] => {
            context
                .session
                .set_form(InputForm::new(*title, *amount, *quantity));
        }
        [] if context.mode == CliMode::Interactive && context.session.form().is_empty() => {
            let form = context.prompt_form(&InputForm::default())?;
            context.session.set_form(form);
        }
        [] => {}
        _ => return Err(usage("add")),
    }
    let record = context.session.submit_form()?;
    output::success(format!(
        "Added expense #{}: {} ({} x {}).",
        record.id,
        record.title,
        crate::ledger::format_amount(record.amount),
        record.quantity
    ));
    context.print_totals();
    Ok(LoopControl::Continue)
}

fn cmd_list(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage("list"));
    }
    output::section("Expenses");
    output::block(&render::expense_table(
        context.session.records(),
        context.config.show_ids,
    ));
    context.print_totals();
    Ok(LoopControl::Continue)
}

fn cmd_edit(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id("edit", args)?;
    if context.mode == CliMode::Script {
        let Some(record) = context.session.edit_expense(id)? else {
            output::warning(format!("No expense #{id} to edit."));
            return Ok(LoopControl::Continue);
        };
        announce_edit(&record);
        output::info("Run `add` to resubmit the form.");
        context.print_totals();
        return Ok(LoopControl::Continue);
    }
    edit_with_prompt(context, id, |context, initial| context.prompt_form(initial))
}

/// Collects the new values before the record is removed, so an aborted
/// prompt leaves the ledger untouched.
fn edit_with_prompt<F>(context: &mut ShellContext, id: u64, prompt: F) -> CommandResult
where
    F: FnOnce(&ShellContext, &InputForm) -> Result<InputForm, CommandError>,
{
    let Some(initial) = context
        .session
        .ledger()
        .find_expense(id)
        .map(InputForm::from_record)
    else {
        output::warning(format!("No expense #{id} to edit."));
        return Ok(LoopControl::Continue);
    };
    let form = prompt(context, &initial)?;

    if let Some(record) = context.session.edit_expense(id)? {
        announce_edit(&record);
    }
    context.session.set_form(form);
    match context.session.submit_form() {
        Ok(updated) => {
            output::success(format!("Saved expense #{}.", updated.id));
            context.print_totals();
            Ok(LoopControl::Continue)
        }
        Err(LedgerError::Validation(reason)) => {
            output::warning("The edited values are still in the form; fix them and run `add`.");
            Err(LedgerError::Validation(reason).into())
        }
        Err(err) => Err(err.into()),
    }
}

fn announce_edit(record: &ExpenseRecord) {
    output::info(format!(
        "Expense #{} removed for editing: {}, {}, {}.",
        record.id,
        record.title,
        format_plain(record.amount),
        record.quantity
    ));
}

fn cmd_delete(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    let id = parse_id("delete", args)?;
    match context.session.delete_expense(id)? {
        Some(record) => output::success(format!("Deleted expense #{}: {}.", id, record.title)),
        None => output::info(format!("No expense #{id}; nothing deleted.")),
    }
    context.print_totals();
    Ok(LoopControl::Continue)
}

fn cmd_totals(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    if !args.is_empty() {
        return Err(usage("totals"));
    }
    context.print_totals();
    Ok(LoopControl::Continue)
}

fn cmd_form(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    let form = context.session.form();
    if form.is_empty() {
        output::info("The expense form is empty.");
    } else {
        output::info(format!(
            "Form: title `{}`, amount `{}`, quantity `{}`.",
            form.title, form.amount, form.quantity
        ));
    }
    Ok(LoopControl::Continue)
}

fn cmd_reset(context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    if !context.confirm("Remove every expense and reset the budget?")? {
        output::info("Reset cancelled.");
        return Ok(LoopControl::Continue);
    }
    context.session.reset()?;
    output::success("All data cleared.");
    context.print_totals();
    Ok(LoopControl::Continue)
}

fn cmd_config(context: &mut ShellContext, args: &[&str]) -> CommandResult {
    match args {
        [] => {
            output::section("Configuration");
            output::info(format!(
                "notice delay: {}s",
                context.config.notice_delay_secs
            ));
            output::info(format!(
                "show ids: {}",
                if context.config.show_ids { "on" } else { "off" }
            ));
            output::info(format!("store: {}", context.store_path.display()));
            output::info(format!(
                "config file: {}",
                context.config_manager.path().display()
            ));
        }
        ["delay", raw] => {
            let secs = raw
                .parse::<u64>()
                .map_err(|_| CommandError::Input(format!("`{raw}` is not a number of seconds")))?;
            context.config.notice_delay_secs = secs;
            context.session.notifier_mut().set_delay_secs(secs);
            context.persist_config()?;
            output::success(format!("Notice delay set to {secs}s."));
        }
        ["ids", value] => {
            context.config.show_ids = match *value {
                "on" | "true" | "yes" => true,
                "off" | "false" | "no" => false,
                other => {
                    return Err(CommandError::Input(format!(
                        "`{other}` is not one of on/off"
                    )))
                }
            };
            context.persist_config()?;
            output::success("Setting saved.");
        }
        _ => return Err(usage("config")),
    }
    Ok(LoopControl::Continue)
}

fn cmd_version(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::info(format!(
        "budget_tracker {} ({} {}, built {})",
        env!("CARGO_PKG_VERSION"),
        env!("BUDGET_TRACKER_BUILD_HASH"),
        env!("BUDGET_TRACKER_BUILD_PROFILE"),
        env!("BUDGET_TRACKER_BUILD_TIMESTAMP"),
    ));
    Ok(LoopControl::Continue)
}

fn cmd_help(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    output::section("Commands");
    let width = COMMANDS
        .iter()
        .map(|spec| spec.usage.len())
        .max()
        .unwrap_or(0);
    for spec in COMMANDS {
        output::block(&format!("  {:<width$}  {}", spec.usage, spec.summary));
    }
    Ok(LoopControl::Continue)
}

fn cmd_exit(_context: &mut ShellContext, _args: &[&str]) -> CommandResult {
    Ok(LoopControl::Exit)
}
