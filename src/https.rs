use async_trait::async_trait;
use log::{error, info, warn};

use crate::api::DnsApiClient;
use crate::batch::{DomainTask, Outcome};

pub const ALWAYS_USE_HTTPS: &str = "always_use_https";

/// Turns on "Always Use HTTPS" for domains that already have a zone.
pub struct HttpsEnabler<'a, C> {
    client: &'a C,
}

impl<'a, C: DnsApiClient> HttpsEnabler<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self { client }
    }

    /// Reads the setting first and only writes when it is not already on.
    pub async fn enable_always_use_https(&self, zone_id: &str, domain: &str) -> bool {
        info!("Checking '{}' for '{}'", ALWAYS_USE_HTTPS, domain);
        let Some(current) = self.client.get_setting(zone_id, ALWAYS_USE_HTTPS).await else {
            error!("Could not read '{}' for '{}'", ALWAYS_USE_HTTPS, domain);
            return false;
        };

        if current.is_on() {
            info!("'{}' already on for '{}'", ALWAYS_USE_HTTPS, domain);
            return true;
        }

        info!("'{}' is {} for '{}', turning it on", ALWAYS_USE_HTTPS, current.value, domain);
        match self
            .client
            .update_setting(zone_id, ALWAYS_USE_HTTPS, "on")
            .await
        {
            Some(updated) if updated.is_on() => {
                info!("'{}' turned on for '{}'", ALWAYS_USE_HTTPS, domain);
                true
            }
            Some(updated) => {
                error!(
                    "'{}' for '{}' still reports {} after update",
                    ALWAYS_USE_HTTPS, domain, updated.value
                );
                false
            }
            None => false,
        }
    }
}

#[async_trait]
impl<C: DnsApiClient> DomainTask for HttpsEnabler<'_, C> {
    async fn process(&self, domain: &str) -> Outcome {
        let Some(zone_id) = self.client.get_zone_id_by_name(domain).await else {
            warn!("Skipping '{}': no zone ID", domain);
            return Outcome::Skipped;
        };

        if self.enable_always_use_https(&zone_id, domain).await {
            Outcome::Succeeded
        } else {
            Outcome::Failed
        }
    }
}
