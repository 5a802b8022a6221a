use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::api::models::{NewDnsRecord, TokenStatus, Zone, ZoneSetting};
use crate::api::DnsApiClient;
use crate::batch::{run_batch, BatchReport, Outcome};
use crate::config::RecordTemplate;
use crate::https::HttpsEnabler;
use crate::provision::ZoneProvisioner;

/// In-memory provider that records every call it receives.
#[derive(Default)]
struct FakeClient {
    rejected_zones: HashSet<String>,
    rejected_records: HashSet<String>,
    zones: HashMap<String, String>,
    https: Mutex<HashMap<String, bool>>,
    calls: Mutex<Vec<String>>,
}

impl FakeClient {
    fn log(&self, call: String) {
        self.calls.lock().unwrap().push(call);
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    fn calls_starting_with(&self, prefix: &str) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter(|c| c.starts_with(prefix))
            .collect()
    }
}

#[async_trait]
impl DnsApiClient for FakeClient {
    async fn create_zone(&self, domain: &str, account_id: &str) -> Option<Zone> {
        self.log(format!("create_zone {} {}", domain, account_id));
        if self.rejected_zones.contains(domain) {
            return None;
        }
        Some(Zone {
            id: format!("zone-{}", domain),
            name: domain.to_string(),
            name_servers: vec!["ada.ns.cloudflare.com".into(), "bob.ns.cloudflare.com".into()],
            status: Some("pending".into()),
        })
    }

    async fn create_dns_record(&self, zone_id: &str, record: &NewDnsRecord) -> bool {
        self.log(format!(
            "create_dns_record {} {} {}",
            zone_id, record.r#type, record.name
        ));
        !self.rejected_records.contains(zone_id)
    }

    async fn get_zone_id_by_name(&self, domain: &str) -> Option<String> {
        self.log(format!("get_zone_id_by_name {}", domain));
        self.zones.get(domain).cloned()
    }

    async fn get_setting(&self, zone_id: &str, setting: &str) -> Option<ZoneSetting> {
        self.log(format!("get_setting {} {}", zone_id, setting));
        let on = *self.https.lock().unwrap().get(zone_id)?;
        Some(ZoneSetting {
            id: setting.to_string(),
            value: if on { "on".into() } else { "off".into() },
        })
    }

    async fn update_setting(
        &self,
        zone_id: &str,
        setting: &str,
        value: &str,
    ) -> Option<ZoneSetting> {
        self.log(format!("update_setting {} {} {}", zone_id, setting, value));
        self.https
            .lock()
            .unwrap()
            .insert(zone_id.to_string(), value == "on");
        Some(ZoneSetting {
            id: setting.to_string(),
            value: value.into(),
        })
    }

    async fn verify_token(&self) -> Option<TokenStatus> {
        None
    }
}

fn create_test_template(name: &str) -> RecordTemplate {
    RecordTemplate {
        record_type: "A".to_string(),
        name: name.to_string(),
        content: "192.0.2.10".to_string(),
        ttl: 3600,
        proxied: true,
        priority: None,
    }
}

fn domains(list: &[&str]) -> Vec<String> {
    list.iter().map(|d| d.to_string()).collect()
}

fn assert_counters_balance(report: &BatchReport) {
    assert_eq!(
        report.processed,
        report.succeeded + report.failed + report.skipped
    );
}

#[tokio::test]
async fn test_zone_failure_skips_record_creation() {
    let client = FakeClient {
        rejected_zones: HashSet::from(["example.com".to_string()]),
        ..Default::default()
    };
    let provisioner =
        ZoneProvisioner::new(&client, "acc123".into(), create_test_template("www"), Duration::ZERO);

    let report = run_batch(&provisioner, &domains(&["example.com"]), Duration::ZERO).await;

    assert_eq!(report.skipped, 1);
    assert_eq!(report.failed, 0);
    assert!(report.successful_domains.is_empty());
    assert!(client.calls_starting_with("create_dns_record").is_empty());
}

#[tokio::test]
async fn test_provision_mixed_outcomes() {
    let client = FakeClient {
        rejected_zones: HashSet::from(["taken.com".to_string()]),
        rejected_records: HashSet::from(["zone-broken.com".to_string()]),
        ..Default::default()
    };
    let provisioner =
        ZoneProvisioner::new(&client, "acc123".into(), create_test_template("www"), Duration::ZERO);

    let report = run_batch(
        &provisioner,
        &domains(&["good.com", "taken.com", "broken.com"]),
        Duration::ZERO,
    )
    .await;

    assert_eq!(report.processed, 3);
    assert_eq!(report.succeeded, 1);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 1);
    assert_eq!(report.successful_domains, vec!["good.com"]);
    assert_counters_balance(&report);

    assert_eq!(
        client.calls(),
        vec![
            "create_zone good.com acc123",
            "create_dns_record zone-good.com A www",
            "create_zone taken.com acc123",
            "create_zone broken.com acc123",
            "create_dns_record zone-broken.com A www",
        ]
    );
}

#[tokio::test]
async fn test_apex_record_uses_domain_name() {
    let client = FakeClient::default();
    let provisioner =
        ZoneProvisioner::new(&client, "acc123".into(), create_test_template("@"), Duration::ZERO);

    let outcome = crate::batch::DomainTask::process(&provisioner, "example.com").await;

    assert_eq!(outcome, Outcome::Succeeded);
    assert_eq!(
        client.calls_starting_with("create_dns_record"),
        vec!["create_dns_record zone-example.com A example.com"]
    );
}

#[tokio::test(start_paused = true)]
async fn test_propagation_delay_precedes_record() {
    let client = FakeClient::default();
    let provisioner = ZoneProvisioner::new(
        &client,
        "acc123".into(),
        create_test_template("www"),
        Duration::from_secs(2),
    );

    let started = tokio::time::Instant::now();
    let report = run_batch(&provisioner, &domains(&["example.com"]), Duration::ZERO).await;

    assert_eq!(report.succeeded, 1);
    assert!(started.elapsed() >= Duration::from_secs(2));
}

#[tokio::test]
async fn test_https_flow_outcomes() {
    let client = FakeClient {
        zones: HashMap::from([
            ("on.com".to_string(), "z-on".to_string()),
            ("off.com".to_string(), "z-off".to_string()),
            ("unreadable.com".to_string(), "z-unreadable".to_string()),
        ]),
        https: Mutex::new(HashMap::from([
            ("z-on".to_string(), true),
            ("z-off".to_string(), false),
        ])),
        ..Default::default()
    };
    let enabler = HttpsEnabler::new(&client);

    let report = run_batch(
        &enabler,
        &domains(&["on.com", "off.com", "missing.com", "unreadable.com"]),
        Duration::ZERO,
    )
    .await;

    assert_eq!(report.processed, 4);
    assert_eq!(report.succeeded, 2);
    assert_eq!(report.failed, 1);
    assert_eq!(report.skipped, 1);
    assert_counters_balance(&report);

    assert_eq!(
        client.calls_starting_with("update_setting"),
        vec!["update_setting z-off always_use_https on"]
    );
    assert!(client.calls_starting_with("get_setting").len() == 3);
}

#[tokio::test]
async fn test_enable_https_twice_patches_once() {
    let client = FakeClient {
        https: Mutex::new(HashMap::from([("z1".to_string(), false)])),
        ..Default::default()
    };
    let enabler = HttpsEnabler::new(&client);

    assert!(enabler.enable_always_use_https("z1", "example.com").await);
    assert!(enabler.enable_always_use_https("z1", "example.com").await);
    assert_eq!(client.calls_starting_with("update_setting").len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_delay_between_domains_only() {
    let client = FakeClient::default();
    let enabler = HttpsEnabler::new(&client);

    let started = tokio::time::Instant::now();
    let report = run_batch(
        &enabler,
        &domains(&["a.com", "b.com", "c.com"]),
        Duration::from_secs(2),
    )
    .await;

    let elapsed = started.elapsed();
    assert_eq!(report.skipped, 3);
    assert!(elapsed >= Duration::from_secs(4));
    assert!(elapsed < Duration::from_secs(6));
}

#[test]
fn test_report_summary_lists_counters() {
    let report = BatchReport {
        processed: 3,
        succeeded: 1,
        failed: 1,
        skipped: 1,
        successful_domains: vec!["good.com".into()],
    };

    let summary = report.to_string();
    assert!(summary.contains("Domains processed: 3"));
    assert!(summary.contains("Skipped:           1"));
}
