use anyhow::{bail, Context, Result};
use std::path::Path;

/// One domain per line; surrounding whitespace and blank lines are dropped.
pub fn parse_domains(contents: &str, lowercase: bool) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(|line| {
            if lowercase {
                line.to_lowercase()
            } else {
                line.to_string()
            }
        })
        .collect()
}

/// Reads the domain list, failing when the file is missing or yields nothing.
pub fn load_domains(path: &Path, lowercase: bool) -> Result<Vec<String>> {
    let contents = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read domain list: {}", path.display()))?;

    let domains = parse_domains(&contents, lowercase);
    if domains.is_empty() {
        bail!("Domain list is empty: {}", path.display());
    }
    Ok(domains)
}
