//! CLI commands and argument parsing

use crate::types::{BoundingBox, Timestamp};
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// MDS Provider API client
#[derive(Parser, Debug)]
#[command(name = "mds-provider-client")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Provider configuration file (YAML)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Override the provider base URL
    #[arg(long, global = true)]
    pub url: Option<String>,

    /// Override the access token
    #[arg(long, global = true)]
    pub token: Option<String>,

    /// Output format
    #[arg(short, long, global = true, default_value = "json")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch status changes
    StatusChanges {
        #[command(flatten)]
        filters: Filters,
    },

    /// Fetch trips
    Trips {
        /// Only trips taken by this device
        #[arg(long)]
        device_id: Option<String>,

        /// Only trips taken by this vehicle
        #[arg(long)]
        vehicle_id: Option<String>,

        #[command(flatten)]
        filters: Filters,
    },
}

/// Filters shared by both endpoints
#[derive(Args, Debug, Clone, Default)]
pub struct Filters {
    /// Start of the time window (Unix seconds or RFC 3339)
    #[arg(long, value_parser = parse_timestamp)]
    pub start_time: Option<Timestamp>,

    /// End of the time window (Unix seconds or RFC 3339)
    #[arg(long, value_parser = parse_timestamp)]
    pub end_time: Option<Timestamp>,

    /// Bounding box: sw_lon,sw_lat,ne_lon,ne_lat
    #[arg(long, value_parser = parse_bbox, allow_hyphen_values = true)]
    pub bbox: Option<BoundingBox>,

    /// Extra provider-specific filter (repeatable)
    #[arg(long = "param", value_name = "KEY=VALUE", value_parser = parse_key_value)]
    pub params: Vec<(String, String)>,

    /// Read only the first page
    #[arg(long)]
    pub no_paging: bool,
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output (one record per line)
    Json,
    /// Pretty-printed JSON array
    Pretty,
}

fn parse_timestamp(s: &str) -> Result<Timestamp, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

fn parse_bbox(s: &str) -> Result<BoundingBox, String> {
    s.parse().map_err(|e: crate::Error| e.to_string())
}

fn parse_key_value(s: &str) -> Result<(String, String), String> {
    match s.split_once('=') {
        Some((key, value)) if !key.trim().is_empty() => {
            Ok((key.trim().to_string(), value.to_string()))
        }
        _ => Err(format!("expected KEY=VALUE, got '{s}'")),
    }
}
