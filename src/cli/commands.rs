//! CLI command implementations
//!
//! Startup order for `serve`:
//! 1. Configuration load (defaults, file, environment, flags)
//! 2. Logging
//! 3. Record store connection (fatal on failure)
//! 4. Listener bind and serve
//!
//! Nothing is served until the store is open.

use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::Arc;

use tracing::info;

use super::args::{Cli, Command};
use super::config::Config;
use super::errors::{CliError, CliResult};
use crate::http_server::HttpServer;
use crate::observability::init_tracing;
use crate::storage::{open_store, RecordStore, StoreAddress};

/// Main CLI entry point
///
/// Parses arguments and dispatches to the appropriate command.
pub fn run() -> CliResult<()> {
    // A missing .env is normal.
    let _ = dotenvy::dotenv();

    let cli = Cli::parse_args();
    run_command(cli.command)
}

/// Run the appropriate command based on CLI args
pub fn run_command(cmd: Command) -> CliResult<()> {
    match cmd {
        Command::Serve {
            config,
            host,
            port,
            store,
        } => {
            let mut config = resolve_config(config, store)?;
            if let Some(host) = host {
                config.host = host;
            }
            if let Some(port) = port {
                config.port = port;
            }
            config.validate()?;

            init_tracing(config.log_json)?;
            serve(&config)
        }
        Command::List { config, store } => {
            let config = resolve_config(config, store)?;
            config.validate()?;
            list(&config, &mut io::stdout())
        }
    }
}

fn resolve_config(path: Option<PathBuf>, store: Option<String>) -> CliResult<Config> {
    let mut config = Config::load(path.as_deref())?;
    if let Some(store) = store {
        config.store = store;
    }
    Ok(config)
}

/// Opens the configured record store.
pub fn connect_store(config: &Config) -> CliResult<Arc<dyn RecordStore>> {
    let address = StoreAddress::parse(&config.store)?;
    let store = open_store(&address)
        .map_err(|e| CliError::store_unavailable(format!("{}: {}", address, e)))?;

    info!(store = %address, records = store.len()?, "record store connected");
    Ok(store)
}

/// Connects to the store, then serves the student API until shutdown.
pub fn serve(config: &Config) -> CliResult<()> {
    let store = connect_store(config)?;
    let server = HttpServer::new(config.http_config(), store);

    let rt = tokio::runtime::Runtime::new()
        .map_err(|e| CliError::boot_failed(format!("Failed to create tokio runtime: {}", e)))?;

    rt.block_on(async {
        server
            .start()
            .await
            .map_err(|e| CliError::boot_failed(format!("HTTP server failed: {}", e)))
    })
}

/// Writes every stored student as a pretty JSON array, newest first.
pub fn list<W: Write>(config: &Config, out: &mut W) -> CliResult<()> {
    let store = connect_store(config)?;
    let records = store.find_all_sorted_desc()?;

    serde_json::to_writer_pretty(&mut *out, &records)?;
    writeln!(out)?;
    out.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::super::errors::CliErrorCode;
    use super::*;
    use crate::schema::{Gender, NewStudent};
    use crate::storage::FileStore;
    use serde_json::Value;
    use tempfile::TempDir;

    fn config_for(store: &str) -> Config {
        Config {
            store: store.to_string(),
            ..Config::default()
        }
    }

    #[test]
    fn test_connect_rejects_unsupported_scheme() {
        let err = connect_store(&config_for("mongodb://127.0.0.1:27017/studentsdb")).err().expect("expected connect_store to fail");
        assert_eq!(err.code(), &CliErrorCode::StoreUnavailable);
    }

    #[test]
    fn test_connect_fails_on_corrupt_file() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(temp_dir.path().join(crate::storage::RECORD_FILE), b"garbage!").unwrap();

        let err = connect_store(&config_for(&temp_dir.path().to_string_lossy())).err().expect("expected connect_store to fail");
        assert_eq!(err.code(), &CliErrorCode::StoreUnavailable);
    }

    #[test]
    fn test_list_prints_newest_first() {
        let temp_dir = TempDir::new().unwrap();
        {
            let store = FileStore::open(temp_dir.path()).unwrap();
            store.insert_one(NewStudent::new("Old", "1", Gender::Male)).unwrap();
            store.insert_one(NewStudent::new("New", "2", Gender::Female)).unwrap();
        }

        let mut out = Vec::new();
        list(&config_for(&temp_dir.path().to_string_lossy()), &mut out).unwrap();

        let printed: Value = serde_json::from_slice(&out).unwrap();
        let names: Vec<_> = printed
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["name"].as_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["New", "Old"]);
    }

    #[test]
    fn test_list_empty_memory_store() {
        let mut out = Vec::new();
        list(&config_for("memory://"), &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap().trim(), "[]");
    }
}
