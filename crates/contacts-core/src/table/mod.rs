//! Contact table state
//!
//! Pages over the list the sync hook already holds; it never asks the store
//! for partial pages. Also owns the delete confirmation step.

use crate::config::TableConfig;
use crate::contact::Contact;
use crate::sync::{ContactSync, SyncOutcome};

/// One rendered table row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableRow {
    pub id: String,
    pub full_name: String,
    pub email: String,
    pub phone: String,
}

impl From<&Contact> for TableRow {
    fn from(contact: &Contact) -> Self {
        Self {
            id: contact.id.clone(),
            full_name: contact.full_name(),
            email: contact.email.clone(),
            phone: contact.phone.clone(),
        }
    }
}

/// Result of confirming a pending delete
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    /// No delete was awaiting confirmation
    NothingPending,
    /// The sync hook is busy; the confirmation stays open
    Busy,
    /// The delete was issued and the confirmation closed
    Done(SyncOutcome),
}

/// Pagination and delete-confirmation state
#[derive(Debug, Clone)]
pub struct ContactTable {
    page: usize,
    page_size: usize,
    pending_delete: Option<String>,
}

impl ContactTable {
    pub fn new(config: &TableConfig) -> Self {
        Self {
            page: 0,
            page_size: config.page_size.max(1),
            pending_delete: None,
        }
    }

    /// Zero-based current page
    pub fn page(&self) -> usize {
        self.page
    }

    pub fn page_size(&self) -> usize {
        self.page_size
    }

    /// Number of pages for `total` rows (zero when there are none)
    pub fn page_count(&self, total: usize) -> usize {
        total.div_ceil(self.page_size)
    }

    /// The records on the current page
    pub fn page_slice<'a>(&self, contacts: &'a [Contact]) -> &'a [Contact] {
        let start = (self.page * self.page_size).min(contacts.len());
        let end = (start + self.page_size).min(contacts.len());
        &contacts[start..end]
    }

    pub fn rows(&self, contacts: &[Contact]) -> Vec<TableRow> {
        self.page_slice(contacts).iter().map(TableRow::from).collect()
    }

    /// "6–10 of 12" style footer
    pub fn range_label(&self, total: usize) -> String {
        if total == 0 {
            return "0–0 of 0".to_string();
        }
        let start = (self.page * self.page_size).min(total);
        let end = (start + self.page_size).min(total);
        format!("{}–{} of {}", start + 1, end, total)
    }

    /// Jump to `page`, clamped to the pages that exist
    pub fn set_page(&mut self, page: usize, total: usize) {
        self.page = page.min(self.last_page(total));
    }

    pub fn next_page(&mut self, total: usize) {
        self.set_page(self.page + 1, total);
    }

    pub fn prev_page(&mut self) {
        self.page = self.page.saturating_sub(1);
    }

    /// Keep the current page valid after the list changed size
    pub fn clamp(&mut self, total: usize) {
        self.set_page(self.page, total);
    }

    fn last_page(&self, total: usize) -> usize {
        self.page_count(total).saturating_sub(1)
    }

    /// The record to open in the edit dialog
    pub fn request_edit(&self, contacts: &[Contact], id: &str) -> Option<Contact> {
        contacts.iter().find(|c| c.id == id).cloned()
    }

    /// Open the delete confirmation for `id`
    pub fn request_delete(&mut self, id: impl Into<String>) {
        self.pending_delete = Some(id.into());
    }

    /// Id awaiting confirmation, if the confirmation is open
    pub fn pending_delete(&self) -> Option<&str> {
        self.pending_delete.as_deref()
    }

    /// Close the confirmation without deleting anything
    pub fn cancel_delete(&mut self) {
        self.pending_delete = None;
    }

    /// Delete the pending record through the hook
    pub async fn confirm_delete(&mut self, sync: &ContactSync) -> DeleteOutcome {
        if self.pending_delete.is_none() {
            return DeleteOutcome::NothingPending;
        }
        if sync.is_busy() {
            return DeleteOutcome::Busy;
        }

        let Some(id) = self.pending_delete.take() else {
            return DeleteOutcome::NothingPending;
        };
        let outcome = sync.remove(&id).await;

        self.clamp(sync.contacts().await.len());
        DeleteOutcome::Done(outcome)
    }
}
