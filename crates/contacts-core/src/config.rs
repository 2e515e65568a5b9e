//! Configuration types for the contacts client
//!
//! This module defines all configuration structures used throughout the crate.

use serde::{Deserialize, Serialize};

use crate::contact::Contact;

/// Main contacts configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContactsConfig {
    /// Remote store configuration
    pub store: StoreConfig,

    /// Sync hook settings
    #[serde(default)]
    pub sync: SyncConfig,

    /// Contact form settings
    #[serde(default)]
    pub form: FormConfig,

    /// Contact table settings
    #[serde(default)]
    pub table: TableConfig,
}

impl ContactsConfig {
    /// Create a new configuration with defaults
    pub fn new(store: StoreConfig) -> Self {
        Self {
            store,
            sync: SyncConfig::default(),
            form: FormConfig::default(),
            table: TableConfig::default(),
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        self.store.validate()?;
        self.sync.validate()?;
        self.form.validate()?;
        self.table.validate()?;
        Ok(())
    }
}

/// Contact store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum StoreConfig {
    /// REST collection over HTTP
    Http {
        /// Base resource URL (e.g. "https://api.example.com/contacts")
        base_url: String,
        /// Transport timeout in seconds
        #[serde(default = "default_timeout_secs")]
        timeout_secs: u64,
    },

    /// In-process store (not persistent)
    Memory {
        /// Records the store starts with
        #[serde(default)]
        seed: Vec<Contact>,
    },
}

impl StoreConfig {
    /// Validate the store configuration
    pub fn validate(&self) -> Result<(), crate::Error> {
        match self {
            StoreConfig::Http {
                base_url,
                timeout_secs,
            } => {
                if base_url.is_empty() {
                    return Err(crate::Error::config("HTTP store base URL cannot be empty"));
                }
                if !base_url.starts_with("http://") && !base_url.starts_with("https://") {
                    return Err(crate::Error::config(format!(
                        "HTTP store base URL must use http or https: {}",
                        base_url
                    )));
                }
                if !(1..=300).contains(timeout_secs) {
                    return Err(crate::Error::config(format!(
                        "HTTP store timeout must be between 1 and 300 seconds, got {}",
                        timeout_secs
                    )));
                }
                Ok(())
            }
            StoreConfig::Memory { seed } => {
                if seed.iter().any(|c| c.id.is_empty()) {
                    return Err(crate::Error::config(
                        "Memory store seed records must have an id",
                    ));
                }
                Ok(())
            }
        }
    }

    /// Get the store type name
    pub fn type_name(&self) -> &'static str {
        match self {
            StoreConfig::Http { .. } => "http",
            StoreConfig::Memory { .. } => "memory",
        }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        StoreConfig::Memory { seed: Vec::new() }
    }
}

/// Sync hook configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SyncConfig {
    /// Capacity of the notification channel
    ///
    /// When full, new notifications are dropped (with a warning log).
    #[serde(default = "default_notification_channel_capacity")]
    pub notification_channel_capacity: usize,
}

impl SyncConfig {
    fn validate(&self) -> Result<(), crate::Error> {
        if self.notification_channel_capacity == 0 {
            return Err(crate::Error::config(
                "Notification channel capacity must be > 0",
            ));
        }
        Ok(())
    }
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            notification_channel_capacity: default_notification_channel_capacity(),
        }
    }
}

/// Contact form configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FormConfig {
    /// Country code of the phone mask, digits only (e.g. "998")
    #[serde(default = "default_country_code")]
    pub country_code: String,
}

impl FormConfig {
    fn validate(&self) -> Result<(), crate::Error> {
        if self.country_code.is_empty()
            || self.country_code.len() > 3
            || !self.country_code.chars().all(|c| c.is_ascii_digit())
        {
            return Err(crate::Error::config(format!(
                "Country code must be 1 to 3 digits, got '{}'",
                self.country_code
            )));
        }
        Ok(())
    }
}

impl Default for FormConfig {
    fn default() -> Self {
        Self {
            country_code: default_country_code(),
        }
    }
}

/// Contact table configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableConfig {
    /// Rows per page
    #[serde(default = "default_page_size")]
    pub page_size: usize,
}

impl TableConfig {
    fn validate(&self) -> Result<(), crate::Error> {
        if !(1..=100).contains(&self.page_size) {
            return Err(crate::Error::config(format!(
                "Page size must be between 1 and 100, got {}",
                self.page_size
            )));
        }
        Ok(())
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_notification_channel_capacity() -> usize {
    100
}

fn default_country_code() -> String {
    "998".to_string()
}

fn default_page_size() -> usize {
    5
}
