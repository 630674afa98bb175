//! Interactive command loop
//!
//! The shell shows the menu, reads a selector, gathers the typed arguments for
//! that action and hands them to the [`RecordStore`]. Whatever the action
//! produces (success, not found, a rejected confirmation, a storage fault) is
//! reported and the loop returns to the menu. Only the exit action, or the end
//! of input, leaves the loop.
//!
//! ```text
//! MenuWait --selector--> ActionInProgress --outcome--> MenuWait
//!     |
//!     +--0 / end of input--> Exit
//! ```

pub mod action;
pub mod input;
pub mod reader;

use std::io::Write;

use crate::record::RecordPatch;
use crate::storage::{DeleteOutcome, RecordStore, UpdateOutcome};
use crate::ui;

pub use action::Action;
pub use input::{ParseResult, Prompter};
pub use reader::{EditorReader, LineReader, ReadOutcome, ScriptedReader};

/// Literal the operator must type before a delete goes through
pub const CONFIRM_TOKEN: &str = "DELETE";

/// Where the loop currently is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShellState {
    MenuWait,
    ActionInProgress(Action),
    Exit,
}

/// Ways an action can be cut short
#[derive(Debug, thiserror::Error)]
pub enum ShellError {
    #[error("interrupted")]
    Interrupted,

    #[error("end of input")]
    EndOfInput,

    #[error("input source failed: {0}")]
    Reader(crate::Error),

    #[error("storage failed: {0}")]
    Store(crate::Error),

    #[error("output failed: {0}")]
    Output(#[from] std::io::Error),
}

/// The menu-driven command loop over a store.
pub struct Shell<'s, R: LineReader, W: Write> {
    store: &'s RecordStore,
    reader: R,
    out: W,
    state: ShellState,
}

impl<'s, R: LineReader, W: Write> Shell<'s, R, W> {
    pub fn new(store: &'s RecordStore, reader: R, out: W) -> Self {
        Self {
            store,
            reader,
            out,
            state: ShellState::MenuWait,
        }
    }

    pub fn state(&self) -> ShellState {
        self.state
    }

    /// Give back the reader and output sink
    pub fn into_parts(self) -> (R, W) {
        (self.reader, self.out)
    }

    /// Run until the exit action or end of input.
    ///
    /// Returns an error only when the input source or output sink itself
    /// breaks; every action-level failure is reported and survived.
    pub fn run(&mut self) -> crate::Result<()> {
        tracing::info!("shell started");
        while self.state != ShellState::Exit {
            self.step()?;
        }
        tracing::info!("shell finished");
        Ok(())
    }

    /// One pass: menu, selection, and the chosen action.
    pub fn step(&mut self) -> crate::Result<ShellState> {
        if self.state == ShellState::Exit {
            return Ok(self.state);
        }

        let result = self.menu_and_dispatch();
        self.state = match result {
            Ok(state) => state,
            Err(e) => self.recover(e)?,
        };
        Ok(self.state)
    }

    fn menu_and_dispatch(&mut self) -> Result<ShellState, ShellError> {
        self.print_menu()?;
        let selector = self.prompter().ask("Select option: ", input::parse_selector)?;

        let Some(action) = Action::from_selector(selector) else {
            ui::warn(&mut self.out, "Unknown option")?;
            return Ok(ShellState::MenuWait);
        };

        if action == Action::Exit {
            writeln!(self.out, "{} Bye", ui::Icons::WAVE)?;
            return Ok(ShellState::Exit);
        }

        self.state = ShellState::ActionInProgress(action);
        tracing::debug!(%action, "action started");
        self.perform(action).map_err(|e| {
            if let ShellError::Store(err) = &e {
                tracing::error!(%action, error = %err, "action failed");
            }
            e
        })?;
        Ok(ShellState::MenuWait)
    }

    /// Map an aborted pass to the next state, or give up if I/O is broken.
    fn recover(&mut self, e: ShellError) -> crate::Result<ShellState> {
        match e {
            ShellError::Interrupted => {
                writeln!(self.out)?;
                writeln!(self.out, "Interrupted. Returning to menu.")?;
                Ok(ShellState::MenuWait)
            }
            ShellError::EndOfInput => {
                tracing::debug!("input closed");
                writeln!(self.out)?;
                writeln!(self.out, "{} Bye", ui::Icons::WAVE)?;
                Ok(ShellState::Exit)
            }
            ShellError::Store(_) => {
                ui::error(&mut self.out, "Operation failed - returning to menu.")?;
                Ok(ShellState::MenuWait)
            }
            ShellError::Reader(err) => Err(err),
            ShellError::Output(err) => Err(err.into()),
        }
    }

    fn perform(&mut self, action: Action) -> Result<(), ShellError> {
        match action {
            Action::Create => self.create(),
            Action::FetchOne => self.fetch_one(),
            Action::ListAll => self.list_all(),
            Action::Update => self.update(),
            Action::Delete => self.delete(),
            Action::Exit => Ok(()),
        }
    }

    fn create(&mut self) -> Result<(), ShellError> {
        let mut prompter = self.prompter();
        let name = prompter.ask("Name: ", input::parse_name)?;
        let price = prompter.ask("Price: ", input::parse_price)?;
        let qty = prompter.ask("Qty: ", input::parse_qty)?;

        let id = self.store.create(&name, price, qty).map_err(ShellError::Store)?;
        ui::success(&mut self.out, &format!("Product added with id={}", id))?;
        Ok(())
    }

    fn fetch_one(&mut self) -> Result<(), ShellError> {
        let id = self.prompter().ask("id: ", input::parse_id)?;

        match self.store.fetch_one(id).map_err(ShellError::Store)? {
            Some(record) => writeln!(self.out, "{}", ui::records_table(&[record]))?,
            None => ui::warn(&mut self.out, "Product not found")?,
        }
        Ok(())
    }

    fn list_all(&mut self) -> Result<(), ShellError> {
        let records = self.store.fetch_all().map_err(ShellError::Store)?;
        if records.is_empty() {
            ui::warn(&mut self.out, "No products found")?;
        } else {
            writeln!(self.out, "{}", ui::records_table(&records))?;
            writeln!(self.out, "{}", ui::dim(&format!("{} product(s)", records.len())))?;
        }
        Ok(())
    }

    fn update(&mut self) -> Result<(), ShellError> {
        let id = self.prompter().ask("id to update: ", input::parse_id)?;
        writeln!(self.out, "Leave a value empty to keep current")?;

        let mut prompter = self.prompter();
        let patch = RecordPatch {
            name: prompter.ask_optional("New name: ", input::parse_name)?,
            price: prompter.ask_optional("New price: ", input::parse_price)?,
            qty: prompter.ask_optional("New qty: ", input::parse_qty)?,
        };

        match self.store.update(id, &patch).map_err(ShellError::Store)? {
            UpdateOutcome::Updated => {
                ui::success(&mut self.out, &format!("Product id={} updated", id))?
            }
            UpdateOutcome::NotFound => {
                ui::warn(&mut self.out, &format!("No product with id={} found", id))?
            }
            UpdateOutcome::NoFieldsGiven => ui::warn(&mut self.out, "No fields to update")?,
        }
        Ok(())
    }

    fn delete(&mut self) -> Result<(), ShellError> {
        let mut prompter = self.prompter();
        let id = prompter.ask("id to delete: ", input::parse_id)?;
        let confirm = prompter.ask(
            &format!("Type {} to confirm: ", CONFIRM_TOKEN),
            input::parse_text,
        )?;

        if confirm != CONFIRM_TOKEN {
            tracing::debug!(id, "delete cancelled by operator");
            ui::warn(&mut self.out, "Delete cancelled")?;
            return Ok(());
        }

        match self.store.delete(id).map_err(ShellError::Store)? {
            DeleteOutcome::Deleted => {
                ui::deleted(&mut self.out, &format!("Product id={} deleted", id))?
            }
            DeleteOutcome::NotFound => {
                ui::warn(&mut self.out, &format!("No product with id={} found", id))?
            }
        }
        Ok(())
    }

    fn print_menu(&mut self) -> std::io::Result<()> {
        writeln!(self.out)?;
        ui::header(&mut self.out, "Products CRUD CLI")?;
        for action in Action::all() {
            ui::menu_item(&mut self.out, action.selector(), action.label())?;
        }
        Ok(())
    }

    fn prompter(&mut self) -> Prompter<'_, R, W> {
        Prompter::new(&mut self.reader, &mut self.out)
    }
}
