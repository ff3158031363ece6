use hcad_scraper_lib::{cli, delay_manager, input_loader, logger, writer};
use hcad_scraper_lib::{Extractor, HcadClient};

use std::error::Error;
use std::fs;
use std::path::Path;

use clap::Parser;
use log::{debug, error, info};

const ACCOUNTS_FILE: &str = "accounts.txt";
const OUTPUT_FILE: &str = "hcad_results.csv";
const DEBUG_DIR: &str = "debug_html";

fn main() -> Result<(), Box<dyn Error>> {
    let args = cli::Args::parse();
    logger::init(args.debug);

    let tax_year = args.tax_year();
    let include_areas = !args.no_areas;
    info!("Starting HCAD scraper for tax year {}...", tax_year);

    // 1. Load the account list
    let mut accounts = input_loader::load_accounts(ACCOUNTS_FILE)?;
    if let Some(limit) = args.limit {
        accounts.truncate(limit);
    }

    if args.debug && !Path::new(DEBUG_DIR).exists() {
        fs::create_dir_all(DEBUG_DIR)?;
    }

    // 2. One client and one extractor for the whole run
    let client = HcadClient::new();
    let extractor = Extractor::new(include_areas);

    let total = accounts.len();
    let mut results = Vec::new();

    // 3. Strictly sequential: fetch, extract, accumulate, pause
    for (i, account) in accounts.iter().enumerate() {
        info!("Processing {} / {} : {}", i + 1, total, account);

        match client.fetch_record(account, tax_year) {
            Ok(html) => {
                if args.debug {
                    let debug_file = format!("{}/{}.html", DEBUG_DIR, account);
                    match fs::write(&debug_file, &html) {
                        Ok(()) => debug!("Saved HTML for account {} to {}", account, debug_file),
                        Err(e) => error!("Failed to save HTML for {}: {}", account, e),
                    }
                }

                let record = extractor.extract(&html, account);
                info!(
                    "{} | {} Appraised: {} | Prev Appraised: {} | % Change: {} | {} Market: {} | Prev Market: {} | % Change: {}",
                    account,
                    tax_year,
                    writer::value_or_na(&record.appraised_curr),
                    writer::value_or_na(&record.appraised_prev),
                    writer::pct_or_na(record.pct_appraised),
                    tax_year,
                    writer::value_or_na(&record.market_curr),
                    writer::value_or_na(&record.market_prev),
                    writer::pct_or_na(record.pct_market),
                );
                results.push(record);
            }
            Err(e) => {
                // One bad account never aborts the run.
                error!("Error fetching {}: {}", account, e);
            }
        }

        delay_manager::request_delay(args.rate);
    }

    // 4. Single write at the end of the run
    writer::write_results(OUTPUT_FILE, &results, tax_year, include_areas)?;
    info!(
        "Scraping complete! {} records saved to {}",
        results.len(),
        OUTPUT_FILE
    );
    Ok(())
}
