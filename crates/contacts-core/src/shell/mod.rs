//! Application shell
//!
//! Composes the table and the add/edit dialogs around one sync hook. The
//! shell keeps only what is visible (which dialog is open, which page is
//! shown); contact data stays with [`ContactSync`].

use std::sync::Arc;

use tracing::debug;

use crate::config::{ContactsConfig, FormConfig};
use crate::error::Result;
use crate::form::{ContactForm, SubmitOutcome};
use crate::sync::ContactSync;
use crate::table::{ContactTable, DeleteOutcome, TableRow};

/// The dialog currently on screen
#[derive(Debug, Clone, Default)]
pub enum Modal {
    #[default]
    None,
    Add(ContactForm),
    Edit(ContactForm),
}

impl Modal {
    pub fn is_open(&self) -> bool {
        !matches!(self, Modal::None)
    }

    pub fn form(&self) -> Option<&ContactForm> {
        match self {
            Modal::None => None,
            Modal::Add(form) | Modal::Edit(form) => Some(form),
        }
    }

    fn form_mut(&mut self) -> Option<&mut ContactForm> {
        match self {
            Modal::None => None,
            Modal::Add(form) | Modal::Edit(form) => Some(form),
        }
    }
}

/// Contact screen state
pub struct ContactShell {
    sync: Arc<ContactSync>,
    table: ContactTable,
    modal: Modal,
    form_config: FormConfig,
}

impl ContactShell {
    pub fn new(sync: Arc<ContactSync>, config: &ContactsConfig) -> Self {
        Self {
            sync,
            table: ContactTable::new(&config.table),
            modal: Modal::None,
            form_config: config.form.clone(),
        }
    }

    /// Attach the hook, running the initial fetch once per endpoint
    pub async fn mount(&self) -> bool {
        self.sync.attach(&[]).await
    }

    pub fn sync(&self) -> &ContactSync {
        &self.sync
    }

    pub fn table(&self) -> &ContactTable {
        &self.table
    }

    pub fn table_mut(&mut self) -> &mut ContactTable {
        &mut self.table
    }

    pub fn modal(&self) -> &Modal {
        &self.modal
    }

    /// Rows of the current page
    pub async fn visible_rows(&self) -> Vec<TableRow> {
        let contacts = self.sync.contacts().await;
        self.table.rows(&contacts)
    }

    /// Number of contacts in the local list
    pub async fn total(&self) -> usize {
        self.sync.contacts().await.len()
    }

    /// Show an empty add dialog
    pub fn open_add(&mut self) -> Result<()> {
        self.modal = Modal::Add(ContactForm::for_create(&self.form_config)?);
        Ok(())
    }

    /// Show the edit dialog for `id`
    ///
    /// # Returns
    ///
    /// `false` when no such contact is in the local list
    pub async fn open_edit(&mut self, id: &str) -> Result<bool> {
        let contacts = self.sync.contacts().await;
        let Some(contact) = self.table.request_edit(&contacts, id) else {
            debug!("No contact {} to edit", id);
            return Ok(false);
        };

        self.modal = Modal::Edit(ContactForm::for_edit(contact, &self.form_config)?);
        Ok(true)
    }

    /// The open dialog's form
    pub fn form_mut(&mut self) -> Option<&mut ContactForm> {
        self.modal.form_mut()
    }

    /// Submit the open dialog
    ///
    /// The dialog closes once a request was issued; it stays open on
    /// validation errors or while the hook is busy.
    pub async fn submit(&mut self) -> Option<SubmitOutcome> {
        let form = self.modal.form_mut()?;
        let outcome = form.submit(&self.sync).await;

        if let SubmitOutcome::Closed(_) = outcome {
            self.modal = Modal::None;
            let total = self.sync.contacts().await.len();
            self.table.clamp(total);
        }

        Some(outcome)
    }

    /// Discard the open dialog
    pub fn close(&mut self) {
        if let Some(form) = self.modal.form_mut() {
            form.cancel();
        }
        self.modal = Modal::None;
    }

    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.table.request_delete(id);
    }

    pub fn cancel_delete(&mut self) {
        self.table.cancel_delete();
    }

    pub async fn confirm_delete(&mut self) -> DeleteOutcome {
        self.table.confirm_delete(&self.sync).await
    }
}
