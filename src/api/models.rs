use serde::{Deserialize, Serialize};
use std::fmt;

/// Envelope every Cloudflare v4 endpoint answers with.
#[derive(Debug, Deserialize)]
pub struct ApiResponse<T> {
    pub success: bool,
    pub result: Option<T>,
    #[serde(default)]
    pub errors: Vec<ApiError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    #[serde(default)]
    pub code: i64,
    #[serde(default)]
    pub message: String,
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct Zone {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub name_servers: Vec<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct AccountRef<'a> {
    pub id: &'a str,
}

#[derive(Debug, Serialize)]
pub struct NewZone<'a> {
    pub name: &'a str,
    pub account: AccountRef<'a>,
    pub jump_start: bool,
}

/// Body for `POST /zones/{id}/dns_records`.
///
/// `proxied` only exists for A/CNAME records and `priority` only for MX/SRV,
/// so both are left out of the JSON when not applicable.
#[derive(Debug, Serialize)]
pub struct NewDnsRecord {
    pub r#type: String,
    pub name: String,
    pub content: String,
    pub ttl: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub proxied: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<u16>,
}

impl NewDnsRecord {
    pub fn new(
        record_type: &str,
        name: &str,
        content: &str,
        ttl: u32,
        proxied: bool,
        priority: Option<u16>,
    ) -> Self {
        let record_type = record_type.to_uppercase();
        let proxied = matches!(record_type.as_str(), "A" | "CNAME").then_some(proxied);
        let priority = if matches!(record_type.as_str(), "MX" | "SRV") {
            priority
        } else {
            None
        };

        Self {
            r#type: record_type,
            name: name.to_string(),
            content: content.to_string(),
            ttl,
            proxied,
            priority,
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct ApiDnsRecord {
    pub id: String,
    pub name: String,
    pub content: String,
    pub r#type: String,
}

/// A zone setting such as `always_use_https`.
#[derive(Debug, Clone, Deserialize)]
pub struct ZoneSetting {
    pub id: String,
    pub value: serde_json::Value,
}

impl ZoneSetting {
    pub fn is_on(&self) -> bool {
        self.value.as_str() == Some("on")
    }
}

#[derive(Debug, Serialize)]
pub struct SettingUpdate<'a> {
    pub value: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct TokenStatus {
    pub id: String,
    pub status: String,
}
