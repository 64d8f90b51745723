use clap::{Parser, Subcommand};
use std::path::PathBuf;

pub const DATA_FILE_ENV: &str = "LINKLET_DATA_FILE";
pub const BASE_URL_ENV: &str = "LINKLET_BASE_URL";
pub const LOG_ENDPOINT_ENV: &str = "LINKLET_LOG_ENDPOINT";
pub const LOG_TOKEN_ENV: &str = "LINKLET_LOG_TOKEN";

pub const DEFAULT_DATA_FILE: &str = "linklet.json";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

#[derive(Debug, Parser)]
#[command(name = "linklet", about = "Local-first URL shortener")]
pub struct Cli {
    /// Path of the JSON blob holding the link collection.
    #[arg(long, env = DATA_FILE_ENV, default_value = DEFAULT_DATA_FILE)]
    pub data_file: PathBuf,

    /// Base used to render short URLs; display-only, never served.
    #[arg(long, env = BASE_URL_ENV, default_value = DEFAULT_BASE_URL)]
    pub base_url: String,

    /// Remote log collector endpoint; telemetry is disabled when unset.
    #[arg(long, env = LOG_ENDPOINT_ENV)]
    pub log_endpoint: Option<String>,

    /// Bearer credential for the log collector.
    #[arg(long, env = LOG_TOKEN_ENV)]
    pub log_token: Option<String>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shorten a URL.
    Shorten {
        /// The URL to shorten.
        url: String,
        /// Validity period in minutes (default 30).
        #[arg(long)]
        validity: Option<u32>,
        /// Custom shortcode (alphanumeric).
        #[arg(long)]
        code: Option<String>,
    },
    /// Record a visit to a link and print its target URL.
    Visit {
        /// Id of the link to visit.
        id: u64,
    },
    /// Show the most recent active links.
    List,
    /// Show statistics for every link, including click details.
    Stats,
}
