//! CLI runner - executes commands

use crate::cli::commands::{Cli, Commands, Filters, OutputFormat};
use crate::client::ProviderClient;
use crate::config::{load_config, ClientConfig, DEFAULT_AUTH_TYPE};
use crate::error::{Error, Result, ResultExt};
use crate::query::{StatusChangesQuery, TripsQuery};
use serde::Serialize;
use std::io::Write;
use tracing::info;

/// CLI runner
pub struct Runner {
    cli: Cli,
}

impl Runner {
    /// Create a new runner
    pub fn new(cli: Cli) -> Self {
        Self { cli }
    }

    /// Run the CLI command
    pub async fn run(&self) -> Result<()> {
        let client = ProviderClient::new(self.client_config()?)?;

        match &self.cli.command {
            Commands::StatusChanges { filters } => {
                let query = status_changes_query(filters);
                let records = client.get_status_changes(&query).await?;
                info!("Fetched {} status_changes", records.len());
                self.print(&records)
            }
            Commands::Trips {
                device_id,
                vehicle_id,
                filters,
            } => {
                let mut query = trips_query(filters);
                query.device_id.clone_from(device_id);
                query.vehicle_id.clone_from(vehicle_id);
                let records = client.get_trips(&query).await?;
                info!("Fetched {} trips", records.len());
                self.print(&records)
            }
        }
    }

    /// Load the config file and apply command-line overrides
    fn client_config(&self) -> Result<ClientConfig> {
        let mut config = match (&self.cli.config, &self.cli.url) {
            (Some(path), _) => load_config(path)?,
            (None, Some(url)) => ClientConfig::builder(url.clone()).build(),
            (None, None) => {
                return Err(Error::config(
                    "No provider configured (use -c <file> or --url <url>)",
                ))
            }
        };

        if let Some(url) = &self.cli.url {
            config.url.clone_from(url);
        }
        if let Some(token) = &self.cli.token {
            config.token = Some(token.clone());
            config.user = None;
            config.password = None;
            if config.is_basic_auth() {
                config.auth_type = DEFAULT_AUTH_TYPE.to_string();
            }
        }

        Ok(config)
    }

    fn print<T: Serialize>(&self, records: &[T]) -> Result<()> {
        let stdout = std::io::stdout();
        let mut out = stdout.lock();
        write_records(&mut out, records, self.cli.format)
            .and_then(|()| out.flush().map_err(Error::from))
            .context("Failed to write records to stdout")
    }
}

fn status_changes_query(filters: &Filters) -> StatusChangesQuery {
    StatusChangesQuery {
        start_time: filters.start_time,
        end_time: filters.end_time,
        bbox: filters.bbox,
        extra: filters.params.iter().cloned().collect(),
        paging: !filters.no_paging,
    }
}

fn trips_query(filters: &Filters) -> TripsQuery {
    TripsQuery {
        start_time: filters.start_time,
        end_time: filters.end_time,
        bbox: filters.bbox,
        extra: filters.params.iter().cloned().collect(),
        paging: !filters.no_paging,
        ..TripsQuery::default()
    }
}

fn write_records<W: Write, T: Serialize>(
    out: &mut W,
    records: &[T],
    format: OutputFormat,
) -> Result<()> {
    match format {
        OutputFormat::Json => {
            for record in records {
                serde_json::to_writer(&mut *out, record)?;
                writeln!(out)?;
            }
        }
        OutputFormat::Pretty => {
            serde_json::to_writer_pretty(&mut *out, records)?;
            writeln!(out)?;
        }
    }
    Ok(())
}
