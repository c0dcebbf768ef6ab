// Remote catalog fetch: command definitions JSON and the enum name list.
// One blocking call each at startup; any failure aborts the run.

use std::collections::HashSet;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::DateTime;

use scmgen_codegen::schema::Definitions;

const FETCH_TIMEOUT: Duration = Duration::from_secs(15);

fn client() -> Result<reqwest::blocking::Client> {
    reqwest::blocking::Client::builder()
        .timeout(FETCH_TIMEOUT)
        .build()
        .context("failed to build HTTP client")
}

/// Fetch and parse the command definitions catalog.
pub fn fetch_definitions(url: &str) -> Result<Definitions> {
    let body = client()?
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .with_context(|| format!("failed to fetch command definitions from `{url}`"))?
        .text()
        .context("failed to read command definitions response")?;
    let definitions: Definitions = serde_json::from_str(&body)
        .with_context(|| format!("failed to parse command definitions from `{url}`"))?;

    let last_update = DateTime::from_timestamp_millis(definitions.meta.last_update)
        .map(|t| t.format("%Y-%m-%d %H:%M:%S").to_string())
        .unwrap_or_else(|| "unknown".into());
    log::info!(
        "Loaded definitions from `{url}`, version {}, last updated at {last_update} (UTC)",
        definitions.meta.version
    );

    Ok(definitions)
}

/// Fetch the enum definition list and extract the bare enum type names.
pub fn fetch_enum_names(url: &str) -> Result<HashSet<String>> {
    let body = client()?
        .get(url)
        .send()
        .and_then(|resp| resp.error_for_status())
        .with_context(|| format!("failed to fetch enum definitions from `{url}`"))?
        .text()
        .context("failed to read enum definitions response")?;

    let enums = parse_enum_names(&body);
    log::info!("Loaded {} enums from `{url}`", enums.len());
    Ok(enums)
}

/// Lines of the form `enum <Name> ...`; only the first whitespace-delimited
/// token after `enum` is the name.
fn parse_enum_names(body: &str) -> HashSet<String> {
    body.lines()
        .filter_map(|line| line.strip_prefix("enum "))
        .filter_map(|rest| rest.split_whitespace().next())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_enum_names() {
        let body = "\
enum WeaponType
some other line
enum CarLock = 0
 enum Indented
enumNotAKeyword X
enum PedType";
        let enums = parse_enum_names(body);
        assert_eq!(enums.len(), 3);
        assert!(enums.contains("WeaponType"));
        assert!(enums.contains("CarLock"));
        assert!(enums.contains("PedType"));
        // Indented and malformed lines are ignored.
        assert!(!enums.contains("Indented"));
        assert!(!enums.contains("X"));
    }
}
