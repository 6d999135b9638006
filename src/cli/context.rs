use std::path::PathBuf;

use dialoguer::{theme::ColorfulTheme, Confirm, Input};
use strsim::levenshtein;

use crate::{
    config::{Config, ConfigManager},
    errors::LedgerError,
    session::{InputForm, Session},
    storage::JsonFileStore,
};

use super::{commands, output, render, CliError, CommandError};

const SUGGESTION_DISTANCE: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CliMode {
    Interactive,
    Script,
}

/// Everything a command needs: the session, configuration and prompt theme.
pub struct ShellContext {
    pub(crate) mode: CliMode,
    pub(crate) session: Session,
    pub(crate) config: Config,
    pub(crate) config_manager: ConfigManager,
    pub(crate) store_path: PathBuf,
    pub(crate) theme: ColorfulTheme,
    pub(crate) running: bool,
}

impl ShellContext {
    pub fn new(mode: CliMode) -> Result<Self, CliError> {
        Self::with_config_manager(mode, ConfigManager::new()?)
    }

    pub fn with_config_manager(
        mode: CliMode,
        config_manager: ConfigManager,
    ) -> Result<Self, CliError> {
        let config = config_manager.load()?;
        let store_path = config_manager.store_path(&config);
        let store = JsonFileStore::open(&store_path)?;
        let (session, warnings) = Session::open(Box::new(store), &config)?;
        for warning in warnings {
            output::warning(warning);
        }
        Ok(Self {
            mode,
            session,
            config,
            config_manager,
            store_path,
            theme: ColorfulTheme::default(),
            running: true,
        })
    }

    pub fn mode(&self) -> CliMode {
        self.mode
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// Prompt text; carries the active notice while it is visible.
    pub fn prompt(&mut self) -> String {
        match self.session.notice() {
            Some(notice) => format!("budget [{}]> ", notice.message),
            None => "budget> ".to_string(),
        }
    }

    pub(crate) fn print_totals(&self) {
        output::info(render::summary_cards(&self.session.totals()));
    }

    pub(crate) fn persist_config(&self) -> Result<(), CommandError> {
        self.config_manager.save(&self.config)?;
        Ok(())
    }

    pub(crate) fn confirm(&self, prompt: &str) -> Result<bool, CommandError> {
        if self.mode == CliMode::Script {
            return Ok(true);
        }
        Ok(Confirm::with_theme(&self.theme)
            .with_prompt(prompt)
            .default(false)
            .interact()?)
    }

    /// Asks for the three expense fields, pre-filled with `initial`.
    pub(crate) fn prompt_form(&self, initial: &InputForm) -> Result<InputForm, CommandError> {
        let title = self.prompt_field("Expense title", &initial.title)?;
        let amount = self.prompt_field("Amount", &initial.amount)?;
        let quantity = self.prompt_field("Quantity", &initial.quantity)?;
        Ok(InputForm::new(title, amount, quantity))
    }

    fn prompt_field(&self, prompt: &str, initial: &str) -> Result<String, CommandError> {
        Ok(Input::<String>::with_theme(&self.theme)
            .with_prompt(prompt)
            .with_initial_text(initial)
            .allow_empty(true)
            .interact_text()?)
    }

    pub(crate) fn suggest_command(&self, input: &str) {
        output::error(format!("Unknown command `{input}`. Type `help` for a list."));
        let best = commands::COMMANDS
            .iter()
            .map(|spec| (levenshtein(spec.name, input), spec.name))
            .min_by_key(|(distance, _)| *distance);
        if let Some((distance, name)) = best {
            if distance <= SUGGESTION_DISTANCE {
                output::info(format!("Suggestion: `{name}`?"));
            }
        }
    }

    /// Reports a failed command. Only errors that make the shell unusable
    /// are passed back up.
    pub(crate) fn report_error(&mut self, err: CommandError) -> Result<(), CliError> {
        match err {
            CommandError::Ledger(LedgerError::Validation(reason)) => {
                output::error(reason.notice());
                tracing::debug!(%reason, "validation failure reported");
                Ok(())
            }
            CommandError::Dialog(err) => Err(CliError::Dialog(err)),
            other => {
                output::error(other);
                Ok(())
            }
        }
    }
}
