use std::{path::PathBuf, time::Duration};

use anyhow::{ensure, Result};

/// The one record every provisioned zone receives.
#[derive(Debug, Clone)]
pub struct RecordTemplate {
    pub record_type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    pub proxied: bool,
    pub priority: Option<u16>,
}

impl RecordTemplate {
    /// `@` stands for the zone apex.
    pub fn name_for<'a>(&'a self, domain: &'a str) -> &'a str {
        if self.name == "@" {
            domain
        } else {
            &self.name
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure!(!self.record_type.trim().is_empty(), "Record type cannot be empty");
        ensure!(!self.name.trim().is_empty(), "Record name cannot be empty");
        ensure!(!self.content.trim().is_empty(), "Record content cannot be empty");
        ensure!(self.ttl > 0, "TTL must be greater than 0");
        Ok(())
    }
}

/// Settings shared by every subcommand.
#[derive(Debug, Clone)]
pub struct Connection {
    pub api_token: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl Connection {
    pub fn validate(&self) -> Result<()> {
        ensure!(!self.api_token.trim().is_empty(), "API token cannot be empty");
        ensure!(!self.base_url.trim().is_empty(), "API base URL cannot be empty");
        ensure!(!self.timeout.is_zero(), "Timeout must be greater than 0");
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct BatchSettings {
    pub domains_file: PathBuf,
    pub delay: Duration,
}
