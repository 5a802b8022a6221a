use std::time::Duration;

use super::{client::DnsApiClient, models::*};
use anyhow::{anyhow, bail, Context, Result};
use async_trait::async_trait;
use log::{debug, error, info, warn};
use reqwest::{
    header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE},
    Method,
};
use serde::{de::DeserializeOwned, Serialize};

pub const API_BASE_URL: &str = "https://api.cloudflare.com/client/v4";

pub struct CloudflareClient {
    client: reqwest::Client,
    base_url: String,
}

#[async_trait]
impl DnsApiClient for CloudflareClient {
    async fn create_zone(&self, domain: &str, account_id: &str) -> Option<Zone> {
        let payload = NewZone {
            name: domain,
            account: AccountRef { id: account_id },
            jump_start: true,
        };
        self.request(Method::POST, "/zones", &[], Some(&payload))
            .await
    }

    async fn create_dns_record(&self, zone_id: &str, record: &NewDnsRecord) -> bool {
        let path = format!("/zones/{}/dns_records", zone_id);
        match self
            .request::<ApiDnsRecord, _>(Method::POST, &path, &[], Some(record))
            .await
        {
            Some(created) => {
                debug!(
                    "Created {} record {} -> {} ({})",
                    created.r#type, created.name, created.content, created.id
                );
                true
            }
            None => false,
        }
    }

    async fn get_zone_id_by_name(&self, domain: &str) -> Option<String> {
        let zones: Vec<Zone> = self
            .request(Method::GET, "/zones", &[("name", domain)], None::<&()>)
            .await?;

        if zones.len() > 1 {
            warn!(
                "{} zones match name '{}', using the first one ({})",
                zones.len(),
                domain,
                zones[0].id
            );
        }

        match zones.into_iter().next() {
            Some(zone) => Some(zone.id),
            None => {
                info!("No zone found for '{}' on this account", domain);
                None
            }
        }
    }

    async fn get_setting(&self, zone_id: &str, setting: &str) -> Option<ZoneSetting> {
        let path = format!("/zones/{}/settings/{}", zone_id, setting);
        self.request(Method::GET, &path, &[], None::<&()>).await
    }

    async fn update_setting(
        &self,
        zone_id: &str,
        setting: &str,
        value: &str,
    ) -> Option<ZoneSetting> {
        let path = format!("/zones/{}/settings/{}", zone_id, setting);
        self.request(Method::PATCH, &path, &[], Some(&SettingUpdate { value }))
            .await
    }

    async fn verify_token(&self) -> Option<TokenStatus> {
        self.request(Method::GET, "/user/tokens/verify", &[], None::<&()>)
            .await
    }
}

impl CloudflareClient {
    pub fn new(api_token: &str, base_url: &str, timeout: Duration) -> Result<Self> {
        let client = reqwest::Client::builder()
            .default_headers(Self::build_headers(api_token)?)
            .timeout(timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    fn build_headers(api_token: &str) -> Result<HeaderMap> {
        let mut auth = HeaderValue::from_str(&format!("Bearer {}", api_token))
            .context("API token contains characters not allowed in a header")?;
        auth.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        Ok(headers)
    }

    /// Performs a call and unwraps the `result` of the envelope.
    ///
    /// Any failure is logged here and comes back as `None`.
    async fn request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Option<T>
    where
        T: DeserializeOwned + Send,
        B: Serialize + ?Sized + Sync,
    {
        match self.try_request(method.clone(), path, query, body).await {
            Ok(result) => Some(result),
            Err(e) => {
                error!("{} {} failed: {:#}", method, path, e);
                None
            }
        }
    }

    async fn try_request<T, B>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned + Send,
        B: Serialize + ?Sized + Sync,
    {
        let mut request = self
            .client
            .request(method, format!("{}{}", self.base_url, path));
        if !query.is_empty() {
            request = request.query(query);
        }
        if let Some(body) = body {
            request = request.json(body);
        }

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let text = response.text().await.map_err(transport_error)?;

        if !status.is_success() {
            bail!("HTTP error: {} - {}", status.as_u16(), text);
        }

        let parsed: ApiResponse<T> = serde_json::from_str(&text).map_err(|e| {
            anyhow!("Failed to parse API response: {}. Response: {}", e, text)
        })?;

        if !parsed.success {
            let errors: Vec<String> = parsed.errors.iter().map(ToString::to_string).collect();
            bail!("Cloudflare API error: {}", errors.join(", "));
        }

        parsed
            .result
            .ok_or_else(|| anyhow!("Cloudflare API response carried no result"))
    }
}

fn transport_error(e: reqwest::Error) -> anyhow::Error {
    if e.is_timeout() {
        anyhow!("Request timed out: {}", e)
    } else if e.is_connect() {
        anyhow!("Connection error: {}", e)
    } else {
        anyhow!("Request failed: {}", e)
    }
}
