mod api;
mod batch;
mod config;
mod domains;
mod https;
mod provision;
#[cfg(test)]
mod tests;

use anyhow::{bail, Result};
use api::{CloudflareClient, DnsApiClient};
use batch::run_batch;
use clap::Parser;
use config::{Cli, Commands};
use https::HttpsEnabler;
use log::info;
use provision::ZoneProvisioner;
use std::time::Duration;

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let connection = cli.connection()?;
    let client = CloudflareClient::new(
        &connection.api_token,
        &connection.base_url,
        connection.timeout,
    )?;

    match &cli.command {
        Commands::Provision {
            account_id,
            batch,
            record,
            propagation_delay_secs,
        } => {
            config::validate_account_id(account_id)?;
            let template = record.template()?;
            let settings = batch.settings();
            let domains = domains::load_domains(&settings.domains_file, true)?;
            info!("Loaded {} domains", domains.len());

            let provisioner = ZoneProvisioner::new(
                &client,
                account_id.clone(),
                template,
                Duration::from_secs(*propagation_delay_secs),
            );
            let report = run_batch(&provisioner, &domains, settings.delay).await;

            println!("\n--- Provisioning finished ---");
            println!("{}", report);
            if !report.successful_domains.is_empty() {
                println!("\nUpdate the registrar name servers for every provisioned domain:");
                for domain in &report.successful_domains {
                    println!("  - {}", domain);
                }
            }
        }
        Commands::EnableHttps { batch } => {
            let settings = batch.settings();
            let domains = domains::load_domains(&settings.domains_file, false)?;
            info!("Loaded {} domains", domains.len());

            let enabler = HttpsEnabler::new(&client);
            let report = run_batch(&enabler, &domains, settings.delay).await;

            println!("\n--- Always Use HTTPS finished ---");
            println!("{}", report);
        }
        Commands::VerifyToken => {
            let Some(token) = client.verify_token().await else {
                bail!("Token verification request failed");
            };
            println!("Token {} is {}", token.id, token.status);
            if token.status != "active" {
                bail!("Token is not active: {}", token.status);
            }
        }
    }

    Ok(())
}
