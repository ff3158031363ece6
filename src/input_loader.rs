use std::fs;
use std::path::Path;

use log::info;

use crate::error::ScrapeError;

/// Reads account numbers, one per line. Blank lines are skipped.
/// A missing or unreadable file is fatal for the run.
pub fn load_accounts<P: AsRef<Path>>(path: P) -> Result<Vec<String>, ScrapeError> {
    let content = fs::read_to_string(path.as_ref())?;
    let accounts: Vec<String> = content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect();

    info!("Loaded {} accounts from {:?}", accounts.len(), path.as_ref());
    Ok(accounts)
}
