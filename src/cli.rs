use chrono::{Datelike, Local};
use clap::Parser;

/// Fetch HCAD valuation records for a list of account numbers and
/// summarize them as CSV.
#[derive(Debug, Parser)]
#[command(name = "hcad_scraper", version)]
pub struct Args {
    /// Rate limit between requests (seconds)
    #[arg(long, default_value_t = 1.0)]
    pub rate: f64,

    /// Limit number of accounts to process
    #[arg(long)]
    pub limit: Option<usize>,

    /// Tax year (default: current year)
    #[arg(long)]
    pub taxyear: Option<i32>,

    /// Save each raw response under debug_html/ and log at debug level
    #[arg(long)]
    pub debug: bool,

    /// Skip land/living area extraction (omit those columns)
    #[arg(long)]
    pub no_areas: bool,
}

impl Args {
    pub fn tax_year(&self) -> i32 {
        self.taxyear.unwrap_or_else(|| Local::now().year())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let args = Args::try_parse_from(["hcad_scraper"]).unwrap();
        assert_eq!(args.rate, 1.0);
        assert_eq!(args.limit, None);
        assert!(!args.debug);
        assert!(!args.no_areas);
    }

    #[test]
    fn test_explicit_tax_year() {
        let args = Args::try_parse_from(["hcad_scraper", "--taxyear", "2023"]).unwrap();
        assert_eq!(args.tax_year(), 2023);
    }

    #[test]
    fn test_rate_and_limit() {
        let args =
            Args::try_parse_from(["hcad_scraper", "--rate", "0.5", "--limit", "10"]).unwrap();
        assert_eq!(args.rate, 0.5);
        assert_eq!(args.limit, Some(10));
    }
}
