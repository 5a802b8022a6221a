use async_trait::async_trait;
use log::{error, info, warn};
use std::time::Duration;
use tokio::time::sleep;

use crate::api::{models::NewDnsRecord, models::Zone, DnsApiClient};
use crate::batch::{DomainTask, Outcome};
use crate::config::RecordTemplate;

/// Adds a domain as a new zone, then creates the template record in it.
pub struct ZoneProvisioner<'a, C> {
    client: &'a C,
    account_id: String,
    template: RecordTemplate,
    propagation_delay: Duration,
}

impl<'a, C: DnsApiClient> ZoneProvisioner<'a, C> {
    pub fn new(
        client: &'a C,
        account_id: String,
        template: RecordTemplate,
        propagation_delay: Duration,
    ) -> Self {
        Self {
            client,
            account_id,
            template,
            propagation_delay,
        }
    }

    fn record_for(&self, domain: &str) -> NewDnsRecord {
        NewDnsRecord::new(
            &self.template.record_type,
            self.template.name_for(domain),
            &self.template.content,
            self.template.ttl,
            self.template.proxied,
            self.template.priority,
        )
    }
}

#[async_trait]
impl<C: DnsApiClient> DomainTask for ZoneProvisioner<'_, C> {
    async fn process(&self, domain: &str) -> Outcome {
        info!("Adding zone '{}'", domain);
        let Some(zone) = self.client.create_zone(domain, &self.account_id).await else {
            warn!("Skipping DNS record for '{}': zone creation failed", domain);
            return Outcome::Skipped;
        };

        print_name_servers(domain, &zone);

        // Zone creation is eventually consistent; record creation right after can 404.
        if !self.propagation_delay.is_zero() {
            info!("Waiting {:?} before adding records", self.propagation_delay);
            sleep(self.propagation_delay).await;
        }

        let record = self.record_for(domain);
        info!(
            "Adding {} record '{}' -> '{}'",
            record.r#type, record.name, record.content
        );

        if self.client.create_dns_record(&zone.id, &record).await {
            info!("Record added for '{}'", domain);
            Outcome::Succeeded
        } else {
            error!("Failed to add record for '{}'", domain);
            Outcome::Failed
        }
    }
}

fn print_name_servers(domain: &str, zone: &Zone) {
    println!("Zone '{}' created (ID: {})", domain, zone.id);
    if let Some(status) = &zone.status {
        println!("Status: {}", status);
    }
    println!("Point the registrar's name servers for '{}' to:", domain);
    for ns in &zone.name_servers {
        println!("  - {}", ns);
    }
}
