use async_trait::async_trait;
use log::info;
use std::{fmt, time::Duration};
use tokio::time::sleep;

/// How a single domain ended up.
///
/// `Skipped` means the prerequisite step (zone creation or lookup) failed,
/// `Failed` means the prerequisite worked but the final action did not.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Succeeded,
    Failed,
    Skipped,
}

#[async_trait]
pub trait DomainTask: Send + Sync {
    async fn process(&self, domain: &str) -> Outcome;
}

#[derive(Debug, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub processed: usize,
    pub succeeded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub successful_domains: Vec<String>,
}

impl BatchReport {
    fn record(&mut self, domain: &str, outcome: Outcome) {
        self.processed += 1;
        match outcome {
            Outcome::Succeeded => {
                self.succeeded += 1;
                self.successful_domains.push(domain.to_string());
            }
            Outcome::Failed => self.failed += 1,
            Outcome::Skipped => self.skipped += 1,
        }
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Domains processed: {}", self.processed)?;
        writeln!(f, "Succeeded:         {}", self.succeeded)?;
        writeln!(f, "Failed:            {}", self.failed)?;
        write!(f, "Skipped:           {}", self.skipped)
    }
}

/// Runs `task` over every domain in order, pausing `delay` between two domains.
pub async fn run_batch<T>(task: &T, domains: &[String], delay: Duration) -> BatchReport
where
    T: DomainTask + ?Sized,
{
    let mut report = BatchReport::default();
    let total = domains.len();

    for (index, domain) in domains.iter().enumerate() {
        println!("\n--- [{}/{}] {} ---", index + 1, total, domain);

        let outcome = task.process(domain).await;
        info!("{}: {:?}", domain, outcome);
        report.record(domain, outcome);

        if index + 1 < total && !delay.is_zero() {
            sleep(delay).await;
        }
    }

    report
}
