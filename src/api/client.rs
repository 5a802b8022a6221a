use super::models::*;
use async_trait::async_trait;

/// Operations the batch flows need from the DNS provider.
///
/// Every method has already logged its own failure; callers only see
/// `None`/`false`.
#[async_trait]
pub trait DnsApiClient: Send + Sync {
    async fn create_zone(&self, domain: &str, account_id: &str) -> Option<Zone>;
    async fn create_dns_record(&self, zone_id: &str, record: &NewDnsRecord) -> bool;
    async fn get_zone_id_by_name(&self, domain: &str) -> Option<String>;
    async fn get_setting(&self, zone_id: &str, setting: &str) -> Option<ZoneSetting>;
    async fn update_setting(&self, zone_id: &str, setting: &str, value: &str)
        -> Option<ZoneSetting>;
    async fn verify_token(&self) -> Option<TokenStatus>;
}
