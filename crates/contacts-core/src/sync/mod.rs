//! Contact sync hook
//!
//! `ContactSync` is the single owner of the local contact list and the only
//! component that talks to the [`ContactStore`]. It is responsible for:
//! - Reading the collection and replacing the local list
//! - Forwarding create/update/delete to the store
//! - Re-reading the whole collection after every successful mutation
//! - Reporting every outcome on the notification channel
//!
//! ## Architecture
//!
//! ```text
//!   ContactShell / ContactForm / ContactTable
//!                  │  create / update / remove / list
//!                  ▼
//!          ┌───────────────┐
//!          │  ContactSync  │── Notification ──▶ toasts
//!          └───────────────┘
//!                  │  one request per call, then GET
//!                  ▼
//!          ┌───────────────┐
//!          │ ContactStore  │
//!          └───────────────┘
//! ```
//!
//! ## Failure model
//!
//! Operations never return an error. A failure leaves the local list as it
//! was, sends an error notification, and yields [`SyncOutcome::Failed`].

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use chrono::{DateTime, Utc};
use tokio::sync::{Mutex, RwLock, mpsc};
use tracing::{debug, info, warn};

use crate::config::SyncConfig;
use crate::contact::{Contact, ContactFields, ContactPatch};
use crate::error::{Error, Result};
use crate::traits::ContactStore;

/// Severity of a notification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NotificationLevel {
    Success,
    Error,
}

/// A transient, user-facing message (a toast)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: NotificationLevel,
    pub message: String,
    pub at: DateTime<Utc>,
}

impl Notification {
    fn new(level: NotificationLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
            at: Utc::now(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.level == NotificationLevel::Error
    }
}

/// How a sync operation settled
///
/// Carries no failure cause; the cause only reaches the user as text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SyncOutcome {
    Succeeded,
    Failed,
}

impl SyncOutcome {
    pub fn is_success(self) -> bool {
        self == SyncOutcome::Succeeded
    }
}

#[derive(Debug, Clone, Copy)]
enum Operation {
    List,
    Create,
    Update,
    Delete,
}

impl Operation {
    fn name(self) -> &'static str {
        match self {
            Operation::List => "list",
            Operation::Create => "create",
            Operation::Update => "update",
            Operation::Delete => "delete",
        }
    }

    fn success_message(self) -> Option<&'static str> {
        match self {
            Operation::List => None,
            Operation::Create => Some("Contact added successfully!"),
            Operation::Update => Some("Contact updated successfully!"),
            Operation::Delete => Some("Contact deleted successfully!"),
        }
    }

    fn failure_prefix(self) -> &'static str {
        match self {
            Operation::List => "Failed to fetch contacts",
            Operation::Create => "Failed to add contact",
            Operation::Update => "Failed to update contact",
            Operation::Delete => "Failed to delete contact",
        }
    }
}

/// Counts one issued operation for as long as it lives
///
/// Raised before waiting on the op lock, so a queued call keeps the hook
/// busy while the call ahead of it releases the lock.
struct BusyGuard<'a>(&'a AtomicUsize);

impl<'a> BusyGuard<'a> {
    fn raise(pending: &'a AtomicUsize) -> Self {
        pending.fetch_add(1, Ordering::SeqCst);
        Self(pending)
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.fetch_sub(1, Ordering::SeqCst);
    }
}

/// Endpoint plus caller-declared dependencies of the last attach
#[derive(Debug, Clone, PartialEq, Eq)]
struct AttachKey {
    endpoint: String,
    dependencies: Vec<String>,
}

/// The contact sync hook
///
/// ## Lifecycle
///
/// 1. Create with [`ContactSync::new()`], keep the notification receiver
/// 2. Call [`ContactSync::attach()`] to run the initial fetch
/// 3. Drive `create` / `update` / `remove` from the UI
/// 4. Drop to discard the local list
///
/// ## Sequencing
///
/// Operations are serialized by an internal lock. A mutation and the refresh
/// that follows it run under the same lock acquisition, and the busy flag
/// stays up across both. A call waiting for the lock already counts as busy.
pub struct ContactSync {
    /// Store all requests go to
    store: RwLock<Arc<dyn ContactStore>>,

    /// Last successfully fetched collection
    contacts: RwLock<Vec<Contact>>,

    /// Operations issued and not yet settled, queued ones included
    busy: AtomicUsize,

    /// Serializes operations
    op_lock: Mutex<()>,

    /// Key of the last attach, if any
    attached: Mutex<Option<AttachKey>>,

    /// Notification sender
    notify_tx: mpsc::Sender<Notification>,
}

impl ContactSync {
    /// Create a new sync hook over `store`
    ///
    /// # Returns
    ///
    /// A tuple of (hook, notification_receiver)
    pub fn new(
        store: Arc<dyn ContactStore>,
        config: &SyncConfig,
    ) -> Result<(Self, mpsc::Receiver<Notification>)> {
        if config.notification_channel_capacity == 0 {
            return Err(Error::config("Notification channel capacity must be > 0"));
        }

        let (tx, rx) = mpsc::channel(config.notification_channel_capacity);

        let sync = Self {
            store: RwLock::new(store),
            contacts: RwLock::new(Vec::new()),
            busy: AtomicUsize::new(0),
            op_lock: Mutex::new(()),
            attached: Mutex::new(None),
            notify_tx: tx,
        };

        Ok((sync, rx))
    }

    /// Snapshot of the local list
    pub async fn contacts(&self) -> Vec<Contact> {
        self.contacts.read().await.clone()
    }

    /// Look up one record of the local list
    pub async fn contact(&self, id: &str) -> Option<Contact> {
        self.contacts
            .read()
            .await
            .iter()
            .find(|c| c.id == id)
            .cloned()
    }

    /// True while list/create/update/remove is issued and unsettled
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::SeqCst) > 0
    }

    /// Address of the store currently in use
    pub async fn endpoint(&self) -> String {
        self.store.read().await.endpoint()
    }

    /// Run the initial fetch if this is a new attachment
    ///
    /// The first call fetches. Later calls fetch again only when the store
    /// endpoint or `dependencies` differ from the previous attach.
    ///
    /// # Returns
    ///
    /// `true` if a fetch was issued
    pub async fn attach(&self, dependencies: &[&str]) -> bool {
        let key = AttachKey {
            endpoint: self.endpoint().await,
            dependencies: dependencies.iter().map(|d| d.to_string()).collect(),
        };

        {
            let mut attached = self.attached.lock().await;
            if attached.as_ref() == Some(&key) {
                debug!("Already attached to {}, skipping initial fetch", key.endpoint);
                return false;
            }
            *attached = Some(key);
        }

        self.list().await;
        true
    }

    /// Point the hook at a different store and re-attach
    ///
    /// Waits for any in-flight operation before swapping. Dependencies of
    /// the previous attach are kept.
    pub async fn retarget(&self, store: Arc<dyn ContactStore>) -> bool {
        {
            let _op = self.op_lock.lock().await;
            info!("Retargeting contact sync to {}", store.endpoint());
            *self.store.write().await = store;
        }

        let dependencies = self
            .attached
            .lock()
            .await
            .as_ref()
            .map(|key| key.dependencies.clone())
            .unwrap_or_default();
        let dependencies: Vec<&str> = dependencies.iter().map(String::as_str).collect();

        self.attach(&dependencies).await
    }

    /// Read the whole collection and replace the local list
    pub async fn list(&self) -> SyncOutcome {
        let _busy = BusyGuard::raise(&self.busy);
        let _op = self.op_lock.lock().await;

        let store = self.current_store().await;
        self.refresh(store.as_ref()).await
    }

    /// Create a contact, then refresh
    pub async fn create(&self, fields: ContactFields) -> SyncOutcome {
        let _busy = BusyGuard::raise(&self.busy);
        let _op = self.op_lock.lock().await;

        let store = self.current_store().await;
        debug!("POST {}", store.endpoint());
        let result = store.create(&fields).await;

        self.settle_mutation(Operation::Create, store.as_ref(), result)
            .await
    }

    /// Partially update contact `id`, then refresh
    pub async fn update(&self, id: &str, patch: ContactPatch) -> SyncOutcome {
        let _busy = BusyGuard::raise(&self.busy);
        let _op = self.op_lock.lock().await;

        let store = self.current_store().await;
        debug!("PATCH {}/{}", store.endpoint(), id);
        let result = store.update(id, &patch).await;

        self.settle_mutation(Operation::Update, store.as_ref(), result)
            .await
    }

    /// Delete contact `id`, then refresh
    pub async fn remove(&self, id: &str) -> SyncOutcome {
        let _busy = BusyGuard::raise(&self.busy);
        let _op = self.op_lock.lock().await;

        let store = self.current_store().await;
        debug!("DELETE {}/{}", store.endpoint(), id);
        let result = store.delete(id).await;

        self.settle_mutation(Operation::Delete, store.as_ref(), result)
            .await
    }

    async fn current_store(&self) -> Arc<dyn ContactStore> {
        Arc::clone(&*self.store.read().await)
    }

    /// Fetch and replace. Caller holds the op lock.
    async fn refresh(&self, store: &dyn ContactStore) -> SyncOutcome {
        debug!("GET {}", store.endpoint());

        let fetched = match store.list().await.and_then(check_identifiers) {
            Ok(fetched) => fetched,
            Err(e) => {
                self.report_failure(Operation::List, &e);
                return SyncOutcome::Failed;
            }
        };

        debug!("Fetched {} contact(s) from {}", fetched.len(), store.store_name());
        *self.contacts.write().await = fetched;
        SyncOutcome::Succeeded
    }

    /// Refresh and notify after a mutation. Caller holds the op lock.
    async fn settle_mutation(
        &self,
        op: Operation,
        store: &dyn ContactStore,
        result: Result<()>,
    ) -> SyncOutcome {
        match result {
            Ok(()) => {
                info!("Contact {} succeeded on {}", op.name(), store.store_name());
                self.refresh(store).await;
                if let Some(message) = op.success_message() {
                    self.emit(Notification::new(NotificationLevel::Success, message));
                }
                SyncOutcome::Succeeded
            }
            Err(e) => {
                self.report_failure(op, &e);
                SyncOutcome::Failed
            }
        }
    }

    fn report_failure(&self, op: Operation, error: &Error) {
        warn!("Contact {} failed: {}", op.name(), error);
        self.emit(Notification::new(
            NotificationLevel::Error,
            format!("{}: {}", op.failure_prefix(), error),
        ));
    }

    fn emit(&self, notification: Notification) {
        if self.notify_tx.try_send(notification).is_err() {
            warn!("Notification channel full or closed, dropping notification");
        }
    }
}

/// Every record in the local list must carry a store-assigned id
fn check_identifiers(contacts: Vec<Contact>) -> Result<Vec<Contact>> {
    if contacts.iter().any(|c| c.id.is_empty()) {
        return Err(Error::store("collection contains a record without an id"));
    }
    Ok(contacts)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryContactStore;

    fn fields(first: &str) -> ContactFields {
        ContactFields {
            first_name: first.to_string(),
            last_name: "Test".to_string(),
            email: "test@example.com".to_string(),
            phone: "+998 (99) 999-99-99".to_string(),
        }
    }

    #[tokio::test]
    async fn create_refreshes_and_notifies() {
        let store = MemoryContactStore::new();
        let (sync, mut rx) =
            ContactSync::new(Arc::new(store.clone()), &SyncConfig::default()).unwrap();

        let outcome = sync.create(fields("Ada")).await;

        assert_eq!(outcome, SyncOutcome::Succeeded);
        assert_eq!(sync.contacts().await, store.contacts().await);
        let note = rx.try_recv().unwrap();
        assert_eq!(note.level, NotificationLevel::Success);
        assert_eq!(note.message, "Contact added successfully!");
        assert!(!sync.is_busy());
    }

    #[tokio::test]
    async fn failed_delete_keeps_list_and_reports_error() {
        let store = MemoryContactStore::with_contacts(vec![Contact::from_fields("1", fields("Ada"))]);
        let (sync, mut rx) = ContactSync::new(Arc::new(store), &SyncConfig::default()).unwrap();
        sync.list().await;

        let outcome = sync.remove("404").await;

        assert_eq!(outcome, SyncOutcome::Failed);
        assert_eq!(sync.contacts().await.len(), 1);
        let note = rx.try_recv().unwrap();
        assert!(note.is_error());
        assert!(note.message.starts_with("Failed to delete contact: "));
    }

    #[test]
    fn records_without_ids_are_rejected() {
        let mut contact = Contact::from_fields("1", fields("Ada"));
        contact.id.clear();
        assert!(check_identifiers(vec![contact]).is_err());
    }

    #[test]
    fn zero_capacity_channel_is_a_config_error() {
        let config = SyncConfig {
            notification_channel_capacity: 0,
        };
        assert!(ContactSync::new(Arc::new(MemoryContactStore::new()), &config).is_err());
    }
}
