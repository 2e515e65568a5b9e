// # contacts - terminal front end
//
// This binary is a THIN layer over contacts-core:
// 1. Reading configuration from environment variables
// 2. Initializing logging and the runtime
// 3. Building the contact store through the registry
// 4. Running an interactive command loop over `ContactShell`
//
// Contact logic (validation, paging, refresh-after-mutation) lives in
// contacts-core and is not duplicated here.
//
// ## Configuration
//
// - `CONTACTS_STORE_TYPE`: Store type (http, memory). Default: http
// - `CONTACTS_STORE_URL`: Collection URL (required for http)
// - `CONTACTS_HTTP_TIMEOUT_SECS`: HTTP timeout, 1..=300. Default: 30
// - `CONTACTS_PAGE_SIZE`: Rows per page, 1..=100. Default: 5
// - `CONTACTS_COUNTRY_CODE`: Phone mask country code. Default: 998
// - `CONTACTS_LOG_LEVEL`: trace, debug, info, warn, error. Default: warn
//
// ## Example
//
// ```bash
// export CONTACTS_STORE_URL=https://api.example.com/contacts
// contacts
// ```

mod commands;

use anyhow::{Result, bail};
use commands::{Command, HELP, is_yes};
use contacts_core::sync::Notification;
use contacts_core::traits::ContactStore;
use contacts_core::{
    ContactShell, ContactSync, ContactsConfig, Field, FormMode, StoreConfig, StoreRegistry,
    SubmitOutcome,
};
use std::env;
use std::fmt::Display;
use std::io::Write;
use std::process::ExitCode;
use std::str::FromStr;
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use tokio::sync::mpsc;
use tracing::{Level, error, info};
use tracing_subscriber::FmtSubscriber;

/// Exit codes for different termination scenarios
///
/// - 0: Clean shutdown
/// - 1: Configuration or startup error
/// - 2: Runtime error (unexpected)
#[derive(Debug, Clone, Copy)]
enum ContactsExitCode {
    CleanShutdown = 0,
    ConfigError = 1,
    RuntimeError = 2,
}

impl From<ContactsExitCode> for ExitCode {
    fn from(code: ContactsExitCode) -> Self {
        ExitCode::from(code as u8)
    }
}

/// Application configuration
#[derive(Debug, Clone)]
struct Config {
    store_type: String,
    store_url: Option<String>,
    http_timeout_secs: u64,
    page_size: usize,
    country_code: String,
    log_level: String,
}

impl Config {
    /// Load configuration from environment variables
    fn from_env() -> Result<Self> {
        Ok(Self {
            store_type: env::var("CONTACTS_STORE_TYPE").unwrap_or_else(|_| "http".to_string()),
            store_url: env::var("CONTACTS_STORE_URL").ok(),
            http_timeout_secs: parse_var("CONTACTS_HTTP_TIMEOUT_SECS", 30)?,
            page_size: parse_var("CONTACTS_PAGE_SIZE", 5)?,
            country_code: env::var("CONTACTS_COUNTRY_CODE").unwrap_or_else(|_| "998".to_string()),
            log_level: env::var("CONTACTS_LOG_LEVEL").unwrap_or_else(|_| "warn".to_string()),
        })
    }

    /// Validate the configuration
    ///
    /// Checks what only the environment layer knows about, then defers to
    /// `ContactsConfig::validate` for value ranges.
    fn validate(&self) -> Result<()> {
        match self.store_type.as_str() {
            "http" => {
                if self.store_url.as_ref().is_none_or(|u| u.is_empty()) {
                    bail!(
                        "CONTACTS_STORE_URL is required when CONTACTS_STORE_TYPE=http. \
                        Set it via: export CONTACTS_STORE_URL=https://api.example.com/contacts"
                    );
                }
            }
            "memory" => {}
            other => bail!(
                "CONTACTS_STORE_TYPE '{}' is not supported. Supported types: http, memory",
                other
            ),
        }

        match self.log_level.to_lowercase().as_str() {
            "trace" | "debug" | "info" | "warn" | "error" => {}
            _ => bail!(
                "CONTACTS_LOG_LEVEL '{}' is not valid. \
                Valid levels: trace, debug, info, warn, error",
                self.log_level
            ),
        }

        self.contacts_config().validate()?;
        Ok(())
    }

    fn contacts_config(&self) -> ContactsConfig {
        let store = match self.store_type.as_str() {
            "http" => StoreConfig::Http {
                base_url: self.store_url.clone().unwrap_or_default(),
                timeout_secs: self.http_timeout_secs,
            },
            _ => StoreConfig::Memory { seed: Vec::new() },
        };

        let mut config = ContactsConfig::new(store);
        config.table.page_size = self.page_size;
        config.form.country_code = self.country_code.clone();
        config
    }

    fn log_level(&self) -> Level {
        match self.log_level.to_lowercase().as_str() {
            "trace" => Level::TRACE,
            "debug" => Level::DEBUG,
            "info" => Level::INFO,
            "error" => Level::ERROR,
            _ => Level::WARN,
        }
    }
}

/// Read a numeric variable, falling back to `default` when unset
fn parse_var<T>(name: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: Display,
{
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| anyhow::anyhow!("{} must be a number, got '{}': {}", name, raw, e)),
        Err(_) => Ok(default),
    }
}

/// Build the store named by the configuration
fn build_store(config: &ContactsConfig) -> Result<Arc<dyn ContactStore>> {
    let registry = StoreRegistry::with_builtin();

    #[cfg(feature = "http")]
    contacts_store_http::register(&registry);

    info!("Available stores: {}", registry.list_stores().join(", "));
    let store = registry.create_store(&config.store)?;
    Ok(Arc::from(store))
}

fn main() -> ExitCode {
    let config = match Config::from_env() {
        Ok(cfg) => cfg,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            return ContactsExitCode::ConfigError.into();
        }
    };

    if let Err(e) = config.validate() {
        eprintln!("Configuration validation error: {}", e);
        return ContactsExitCode::ConfigError.into();
    }

    // Logs go to stderr so they do not interleave with the table on stdout
    let subscriber = FmtSubscriber::builder()
        .with_max_level(config.log_level())
        .with_writer(std::io::stderr)
        .finish();

    if let Err(e) = tracing::subscriber::set_global_default(subscriber) {
        eprintln!("Failed to set tracing subscriber: {}", e);
        return ContactsExitCode::ConfigError.into();
    }

    let contacts_config = config.contacts_config();
    let store = match build_store(&contacts_config) {
        Ok(store) => store,
        Err(e) => {
            eprintln!("Failed to create contact store: {}", e);
            return ContactsExitCode::ConfigError.into();
        }
    };

    let rt = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!("Failed to create tokio runtime: {}", e);
            return ContactsExitCode::RuntimeError.into();
        }
    };

    let result = rt.block_on(async {
        if let Err(e) = run(store, &contacts_config).await {
            error!("Contacts error: {}", e);
            eprintln!("Error: {}", e);
            ContactsExitCode::RuntimeError
        } else {
            ContactsExitCode::CleanShutdown
        }
    });

    result.into()
}

type Input = Lines<BufReader<Stdin>>;

/// Run the interactive loop until `quit`, end of input, or Ctrl-C
async fn run(store: Arc<dyn ContactStore>, config: &ContactsConfig) -> Result<()> {
    let (sync, mut toasts) = ContactSync::new(store, &config.sync)?;
    let mut shell = ContactShell::new(Arc::new(sync), config);
    let mut input = BufReader::new(tokio::io::stdin()).lines();

    info!("Connecting to {}", shell.sync().endpoint().await);
    shell.mount().await;
    print_toasts(&mut toasts);
    print_page(&shell).await;
    println!("Type 'help' for commands.");

    loop {
        let line = tokio::select! {
            line = prompt(&mut input, "> ") => line?,
            _ = tokio::signal::ctrl_c() => {
                info!("Received SIGINT");
                None
            }
        };
        let Some(line) = line else {
            break;
        };
        if line.trim().is_empty() {
            continue;
        }

        let command = match line.parse::<Command>() {
            Ok(command) => command,
            Err(e) => {
                println!("{}", e);
                continue;
            }
        };

        if command == Command::Quit {
            break;
        }
        execute(&mut shell, &mut input, command).await?;
        print_toasts(&mut toasts);
    }

    info!("Shutting down");
    Ok(())
}

async fn execute(shell: &mut ContactShell, input: &mut Input, command: Command) -> Result<()> {
    let total = shell.total().await;

    match command {
        Command::List => print_page(shell).await,
        Command::Next => {
            shell.table_mut().next_page(total);
            print_page(shell).await;
        }
        Command::Prev => {
            shell.table_mut().prev_page();
            print_page(shell).await;
        }
        Command::Page(page) => {
            shell.table_mut().set_page(page, total);
            print_page(shell).await;
        }
        Command::Refresh => {
            shell.sync().list().await;
            let total = shell.total().await;
            shell.table_mut().clamp(total);
            print_page(shell).await;
        }
        Command::Add => {
            shell.open_add()?;
            fill_form(shell, input).await?;
        }
        Command::Edit(id) => {
            if shell.open_edit(&id).await? {
                fill_form(shell, input).await?;
            } else {
                println!("No contact with id {}", id);
            }
        }
        Command::Delete(id) => confirm_delete(shell, input, id).await?,
        Command::Help => println!("{}", HELP),
        Command::Quit => {}
    }

    Ok(())
}

/// Walk the open dialog's fields, then submit until valid or abandoned
async fn fill_form(shell: &mut ContactShell, input: &mut Input) -> Result<()> {
    loop {
        let Some(form) = shell.form_mut() else {
            return Ok(());
        };
        println!("-- {} --", form.title());
        let editing = matches!(form.mode(), FormMode::Edit(_));

        for field in Field::ALL {
            let current = form.value(field).to_string();
            let label = match (editing || !current.is_empty(), field) {
                (true, _) => format!("{} [{}]: ", field, current),
                (false, Field::Phone) => format!("{} (digits only): ", field),
                (false, _) => format!("{}: ", field),
            };

            let Some(answer) = prompt(input, &label).await? else {
                shell.close();
                return Ok(());
            };
            // Empty input keeps the current value
            if !answer.trim().is_empty() {
                form.set_field(field, answer.trim());
            }
        }

        match shell.submit().await {
            Some(SubmitOutcome::Invalid(errors)) => {
                for (field, message) in errors.iter() {
                    println!("  {}: {}", field, message);
                }
                let retry = prompt(input, "Fix and try again? [y/N] ").await?;
                if !retry.as_deref().is_some_and(is_yes) {
                    shell.close();
                    return Ok(());
                }
            }
            Some(SubmitOutcome::Busy) => {
                println!("Still working on the previous request, try again");
                shell.close();
                return Ok(());
            }
            Some(SubmitOutcome::Closed(_)) => {
                print_page(shell).await;
                return Ok(());
            }
            None => return Ok(()),
        }
    }
}

async fn confirm_delete(shell: &mut ContactShell, input: &mut Input, id: String) -> Result<()> {
    let Some(contact) = shell.sync().contact(&id).await else {
        println!("No contact with id {}", id);
        return Ok(());
    };

    shell.request_delete(id);
    let question = format!("Delete {}? [y/N] ", contact.full_name());
    let answer = prompt(input, &question).await?;

    if answer.as_deref().is_some_and(is_yes) {
        shell.confirm_delete().await;
        print_page(shell).await;
    } else {
        shell.cancel_delete();
        println!("Cancelled");
    }
    Ok(())
}

/// Print `text` and read one line; `None` at end of input
async fn prompt(input: &mut Input, text: &str) -> Result<Option<String>> {
    print!("{}", text);
    std::io::stdout().flush()?;
    Ok(input.next_line().await?)
}

async fn print_page(shell: &ContactShell) {
    let rows = shell.visible_rows().await;
    let total = shell.total().await;
    let table = shell.table();

    if rows.is_empty() {
        println!("(no contacts)");
    } else {
        println!("{:<6} {:<28} {:<30} {}", "ID", "Full Name", "Email", "Phone Number");
        for row in rows {
            println!("{:<6} {:<28} {:<30} {}", row.id, row.full_name, row.email, row.phone);
        }
    }

    println!(
        "{}  (page {}/{})",
        table.range_label(total),
        table.page() + 1,
        table.page_count(total).max(1)
    );
}

fn print_toasts(toasts: &mut mpsc::Receiver<Notification>) {
    while let Ok(note) = toasts.try_recv() {
        let tag = if note.is_error() { "error" } else { "ok" };
        println!("[{} {}] {}", note.at.format("%H:%M:%S"), tag, note.message);
    }
}
