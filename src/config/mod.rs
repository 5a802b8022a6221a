pub mod models;

use std::{path::PathBuf, time::Duration};

use anyhow::{ensure, Result};
use clap::{ArgAction, Args, Parser, Subcommand};

use crate::api::cloudflare::API_BASE_URL;
pub use models::{BatchSettings, Connection, RecordTemplate};

#[derive(Debug, Parser)]
#[command(name = "cfbatch")]
#[command(about = "Batch zone provisioning and HTTPS enforcement on Cloudflare", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Cloudflare API token (Zone:Edit, DNS:Edit, Zone Settings:Edit)
    #[arg(long, env = "CLOUDFLARE_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    #[arg(long, env = "CLOUDFLARE_API_BASE_URL", default_value = API_BASE_URL)]
    pub base_url: String,

    /// Per-request timeout in seconds
    #[arg(long, env = "CFBATCH_TIMEOUT_SECS", default_value_t = 10)]
    pub timeout_secs: u64,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Add every domain as a zone and create the template record in it
    Provision {
        /// Account the new zones are created under
        #[arg(long, env = "CLOUDFLARE_ACCOUNT_ID")]
        account_id: String,

        #[command(flatten)]
        batch: BatchArgs,

        #[command(flatten)]
        record: RecordArgs,

        /// Wait between zone creation and record creation, in seconds
        #[arg(long, default_value_t = 2)]
        propagation_delay_secs: u64,
    },

    /// Turn on "Always Use HTTPS" for every domain's existing zone
    EnableHttps {
        #[command(flatten)]
        batch: BatchArgs,
    },

    /// Check that the API token is valid and active
    VerifyToken,
}

#[derive(Debug, Args)]
pub struct BatchArgs {
    /// File with one domain per line
    #[arg(long, env = "CFBATCH_DOMAINS_FILE", default_value = "domains.txt")]
    pub domains_file: PathBuf,

    /// Pause between two domains, in seconds
    #[arg(long, env = "CFBATCH_DELAY_SECS", default_value_t = 2)]
    pub delay_secs: u64,
}

#[derive(Debug, Args)]
pub struct RecordArgs {
    #[arg(long, default_value = "A")]
    pub record_type: String,

    /// Record name, `@` for the zone apex
    #[arg(long, default_value = "www")]
    pub record_name: String,

    /// Record value (IP address, hostname or text)
    #[arg(long, env = "CFBATCH_RECORD_CONTENT")]
    pub record_content: String,

    #[arg(long, default_value_t = 3600)]
    pub ttl: u32,

    /// Route traffic through the Cloudflare proxy (A/CNAME only)
    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    pub proxied: bool,

    /// Priority for MX/SRV records
    #[arg(long)]
    pub priority: Option<u16>,
}

impl Cli {
    pub fn connection(&self) -> Result<Connection> {
        let connection = Connection {
            api_token: self.api_token.clone(),
            base_url: self.base_url.clone(),
            timeout: Duration::from_secs(self.timeout_secs),
        };
        connection.validate()?;
        Ok(connection)
    }
}

impl BatchArgs {
    pub fn settings(&self) -> BatchSettings {
        BatchSettings {
            domains_file: self.domains_file.clone(),
            delay: Duration::from_secs(self.delay_secs),
        }
    }
}

impl RecordArgs {
    pub fn template(&self) -> Result<RecordTemplate> {
        let template = RecordTemplate {
            record_type: self.record_type.to_uppercase(),
            name: self.record_name.clone(),
            content: self.record_content.clone(),
            ttl: self.ttl,
            proxied: self.proxied,
            priority: self.priority,
        };
        template.validate()?;
        Ok(template)
    }
}

pub fn validate_account_id(account_id: &str) -> Result<()> {
    ensure!(!account_id.trim().is_empty(), "Account ID cannot be empty");
    Ok(())
}
