//! Test doubles and common utilities for contract tests
//!
//! `RecordingStore` wraps a `MemoryContactStore` and records every request
//! the sync hook issues, so tests can assert on call counts and order.

#![allow(dead_code)]

use contacts_core::error::Result;
use contacts_core::sync::Notification;
use contacts_core::traits::ContactStore;
use contacts_core::{
    Contact, ContactFields, ContactPatch, ContactSync, Error, MemoryContactStore, SyncConfig,
};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::sync::{Semaphore, mpsc};

/// One request as seen by the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    List,
    Create(String),
    Update(String),
    Delete(String),
}

/// A store that records requests and can be told to fail or stall
///
/// Clones share the log, the failure switches, and the gate.
#[derive(Clone)]
pub struct RecordingStore {
    backing: MemoryContactStore,
    calls: Arc<Mutex<Vec<Call>>>,
    fail_lists: Arc<AtomicBool>,
    fail_mutations: Arc<AtomicBool>,
    gate: Arc<Mutex<Option<Arc<Semaphore>>>>,
}

impl RecordingStore {
    pub fn new(backing: MemoryContactStore) -> Self {
        Self {
            backing,
            calls: Arc::new(Mutex::new(Vec::new())),
            fail_lists: Arc::new(AtomicBool::new(false)),
            fail_mutations: Arc::new(AtomicBool::new(false)),
            gate: Arc::new(Mutex::new(None)),
        }
    }

    pub fn seeded(contacts: Vec<Contact>) -> Self {
        Self::new(MemoryContactStore::with_contacts(contacts))
    }

    /// The authoritative collection behind this store
    pub fn backing(&self) -> &MemoryContactStore {
        &self.backing
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().unwrap().clear();
    }

    /// Make every list request fail with a 500
    pub fn fail_lists(&self, fail: bool) {
        self.fail_lists.store(fail, Ordering::SeqCst);
    }

    /// Make every create/update/delete request fail with a 500
    pub fn fail_mutations(&self, fail: bool) {
        self.fail_mutations.store(fail, Ordering::SeqCst);
    }

    /// Hold every following request until the returned semaphore gets permits
    ///
    /// Each request consumes one permit once it has been recorded.
    pub fn close_gate(&self) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        *self.gate.lock().unwrap() = Some(Arc::clone(&gate));
        gate
    }

    /// Wait until at least `n` requests have been recorded
    pub async fn wait_for_calls(&self, n: usize) {
        tokio::time::timeout(Duration::from_secs(5), async {
            while self.call_count() < n {
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        })
        .await
        .expect("store should see the expected number of requests");
    }

    async fn enter(&self, call: Call) {
        self.calls.lock().unwrap().push(call);

        let gate = self.gate.lock().unwrap().clone();
        if let Some(gate) = gate {
            gate.acquire().await.expect("gate is never closed").forget();
        }
    }

    fn server_error() -> Error {
        Error::http("500 Internal Server Error")
    }
}

#[async_trait::async_trait]
impl ContactStore for RecordingStore {
    async fn list(&self) -> Result<Vec<Contact>> {
        self.enter(Call::List).await;
        if self.fail_lists.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }
        self.backing.list().await
    }

    async fn create(&self, fields: &ContactFields) -> Result<()> {
        self.enter(Call::Create(fields.first_name.clone())).await;
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }
        self.backing.create(fields).await
    }

    async fn update(&self, id: &str, patch: &ContactPatch) -> Result<()> {
        self.enter(Call::Update(id.to_string())).await;
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }
        self.backing.update(id, patch).await
    }

    async fn delete(&self, id: &str) -> Result<()> {
        self.enter(Call::Delete(id.to_string())).await;
        if self.fail_mutations.load(Ordering::SeqCst) {
            return Err(Self::server_error());
        }
        self.backing.delete(id).await
    }

    fn endpoint(&self) -> String {
        self.backing.endpoint()
    }

    fn store_name(&self) -> &'static str {
        "recording"
    }
}

/// A valid set of contact fields
pub fn fields(first: &str) -> ContactFields {
    ContactFields {
        first_name: first.to_string(),
        last_name: "Tester".to_string(),
        email: format!("{}@example.com", first.to_lowercase()),
        phone: "+998 (99) 123-45-67".to_string(),
    }
}

pub fn contact(id: &str, first: &str) -> Contact {
    Contact::from_fields(id, fields(first))
}

/// Contacts with ids "1" through "n"
pub fn numbered(n: usize) -> Vec<Contact> {
    (1..=n)
        .map(|i| contact(&i.to_string(), &format!("Person{}", i)))
        .collect()
}

/// A sync hook over `store` with the default channel capacity
pub fn sync_over(store: RecordingStore) -> (Arc<ContactSync>, mpsc::Receiver<Notification>) {
    let (sync, rx) =
        ContactSync::new(Arc::new(store), &SyncConfig::default()).expect("sync construction succeeds");
    (Arc::new(sync), rx)
}

/// Everything currently waiting on the notification channel
pub fn drain(rx: &mut mpsc::Receiver<Notification>) -> Vec<Notification> {
    let mut notes = Vec::new();
    while let Ok(note) = rx.try_recv() {
        notes.push(note);
    }
    notes
}

pub fn ids(contacts: &[Contact]) -> Vec<String> {
    contacts.iter().map(|c| c.id.clone()).collect()
}
