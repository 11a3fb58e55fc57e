//! CLI interface and command dispatcher

use super::api::{SharedStore, start_server};
use super::client::ContactsClient;
use super::common::write_contacts;
use super::error::CliError;
use clap::{Parser, Subcommand, ValueEnum};
use contacts::storage::{PersistenceBackend, SyncMode};
use contacts::{Contact, ContactStore};
use log::{info, warn};
use parking_lot::RwLock;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

// =============================================================================
// CLI CONFIGURATION STRUCTS
// =============================================================================

#[derive(Parser, Debug)]
#[command(name = "contacts")]
#[command(about = "Manage a list of contacts from the command line or over HTTP")]
#[command(version)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// JSON file holding the contact collection
    #[arg(long, env = "CONTACTS_FILE")]
    pub file: PathBuf,

    /// Port of the HTTP API, served locally or reached in http mode
    #[arg(long, env = "CONTACTS_PORT", default_value = "8080")]
    pub port: u16,

    /// Persist every change to the contacts file
    #[arg(long, global = true, conflicts_with = "http")]
    pub memory: bool,

    /// Forward changes to a running instance over HTTP
    #[arg(long, global = true)]
    pub http: bool,

    #[arg(long, global = true, hide = true)]
    pub promise: bool,

    /// File sync mode for `--memory` writes
    #[arg(
        long,
        global = true,
        value_enum,
        env = "CONTACTS_SYNC",
        default_value_t = FileSyncMode::Immediate
    )]
    pub sync: FileSyncMode,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
pub enum Commands {
    /// Display the list of contacts
    List,
    /// Add a contact to the list
    Add {
        first_name: String,
        last_name: String,
    },
    /// Remove a contact from the list
    Remove {
        #[arg(allow_hyphen_values = true)]
        id: String,
    },
    /// Update the names of a contact
    Update {
        #[arg(allow_hyphen_values = true)]
        id: String,
        first_name: String,
        last_name: String,
    },
    /// Start the HTTP API
    Serve,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum FileSyncMode {
    None,
    Immediate,
}

impl From<FileSyncMode> for SyncMode {
    fn from(v: FileSyncMode) -> Self {
        match v {
            FileSyncMode::None => SyncMode::None,
            FileSyncMode::Immediate => SyncMode::Immediate,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Changes live only as long as the process.
    Volatile,
    /// `--memory`: changes are written to the contacts file.
    Memory,
    /// `--http`: changes are forwarded to a running instance.
    Http,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.memory {
            Mode::Memory
        } else if self.http {
            Mode::Http
        } else {
            Mode::Volatile
        }
    }

    pub fn persistence_backend(&self) -> PersistenceBackend {
        match self.mode() {
            Mode::Memory => PersistenceBackend::new_json_file(&self.file, self.sync.into()),
            Mode::Volatile | Mode::Http => PersistenceBackend::Volatile,
        }
    }
}

// =============================================================================
// COMMAND DISPATCHERS
// =============================================================================

/// Load the collection and run one command to completion.
///
/// File writes and outbound calls are awaited here, so nothing is pending
/// when the process exits.
pub async fn run(cli: Cli) -> Result<(), CliError> {
    if cli.promise {
        warn!("--promise has no effect and is ignored");
    }
    let mode = cli.mode();
    let store = ContactStore::load(&cli.file, &cli.persistence_backend())?;
    let store: SharedStore = Arc::new(RwLock::new(store));

    if cli.command == Commands::Serve {
        info!("Starting contacts API in {mode:?} mode");
        return start_server(cli.port, store)
            .await
            .map_err(|e| CliError::Server(e.to_string()));
    }

    let remote = ContactsClient::for_port(cli.port);
    let mut stdout = std::io::stdout();
    handle_cli_command(&store, mode, &remote, cli.command, &mut stdout).await
}

pub async fn handle_cli_command<W: Write>(
    store: &SharedStore,
    mode: Mode,
    remote: &ContactsClient,
    command: Commands,
    out: &mut W,
) -> Result<(), CliError> {
    match command {
        Commands::List => handle_list_command(store, mode, remote, out).await,
        Commands::Add {
            first_name,
            last_name,
        } => handle_add_command(store, mode, remote, &first_name, &last_name, out).await,
        Commands::Remove { id } => handle_remove_command(store, mode, remote, &id, out).await,
        Commands::Update {
            id,
            first_name,
            last_name,
        } => {
            handle_update_command(store, mode, remote, &id, &first_name, &last_name, out).await
        }
        Commands::Serve => Err(CliError::Server(
            "serve must be started through run".to_string(),
        )),
    }
}

fn snapshot(store: &SharedStore) -> Vec<Contact> {
    store.read().list().to_vec()
}

pub async fn handle_list_command<W: Write>(
    store: &SharedStore,
    mode: Mode,
    remote: &ContactsClient,
    out: &mut W,
) -> Result<(), CliError> {
    let contacts = match mode {
        Mode::Http => remote.list_contacts().await?,
        Mode::Volatile | Mode::Memory => snapshot(store),
    };
    write_contacts(out, &contacts)?;
    Ok(())
}

pub async fn handle_add_command<W: Write>(
    store: &SharedStore,
    mode: Mode,
    remote: &ContactsClient,
    first_name: &str,
    last_name: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let contact = store.write().add(first_name, last_name)?;
    match mode {
        Mode::Http => {
            let location = remote.create_contact(first_name, last_name).await?;
            writeln!(out, "{location}")?;
        }
        Mode::Volatile | Mode::Memory => {
            writeln!(out, "Added contact {}", contact.id)?;
        }
    }
    Ok(())
}

pub async fn handle_remove_command<W: Write>(
    store: &SharedStore,
    mode: Mode,
    remote: &ContactsClient,
    id: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let removed = store.write().remove(id)?;
    match mode {
        Mode::Http => {
            if remote.delete_contact(id).await? {
                writeln!(out, "Removed contact {id}")?;
            } else {
                writeln!(out, "Contact {id} not found on {}", remote.base_url())?;
            }
        }
        Mode::Volatile | Mode::Memory => {
            if removed.is_some() {
                writeln!(out, "Removed contact {id}")?;
            }
        }
    }
    Ok(())
}

pub async fn handle_update_command<W: Write>(
    store: &SharedStore,
    mode: Mode,
    remote: &ContactsClient,
    id: &str,
    first_name: &str,
    last_name: &str,
    out: &mut W,
) -> Result<(), CliError> {
    let updated = store.write().update(id, first_name, last_name)?;
    match mode {
        Mode::Http => match remote.update_contact(id, first_name, last_name).await? {
            Some(contact) => writeln!(out, "Updated contact {}", contact.id)?,
            None => writeln!(out, "Contact {id} not found on {}", remote.base_url())?,
        },
        Mode::Volatile | Mode::Memory => {
            if let Some(contact) = updated {
                writeln!(out, "Updated contact {}", contact.id)?;
            }
        }
    }
    Ok(())
}
